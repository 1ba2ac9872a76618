mod alu;
mod bus;
mod cb;
mod dispatch;
mod exec;
mod helpers;
mod init;
mod interrupts;
mod regs;
mod step;
mod timing;
mod trace;

use std::fmt;

use bitflags::bitflags;

pub use alu::{AluOp, AluOutput, ShiftOp};
pub use bus::{Bus, FlatMemory};
pub use dispatch::{lookup, Handler};
pub use interrupts::InterruptRegisters;
pub use regs::{
    RegisterPair, Registers, R16_BC, R16_DE, R16_HL, R16_SP, R8_A, R8_B, R8_C, R8_D, R8_E, R8_H,
    R8_HL_INDIRECT, R8_L,
};
pub use step::ExecState;
pub use timing::{CycleAccountant, NullPacer, Pacer, SleepPacer};
pub use trace::{LogTracer, TraceRecord, Tracer};

/// The pure flag algebra, exposed for callers that want to check flag
/// behaviour without a CPU instance.
pub mod flag_algebra {
    pub use super::alu::{
        add16, add16_signed, add8, alu8, and8, bit, ccf, cpl, daa, dec8, inc8, or8, rotate_a, scf,
        shift8, sub8, xor8,
    };
}

bitflags! {
    /// Flag bits in the F register.
    ///
    /// - bit 7: Z (zero)
    /// - bit 6: N (subtract)
    /// - bit 5: H (half carry)
    /// - bit 4: C (carry)
    /// - bits 0–3 are always zero.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct Flags: u8 {
        const Z = 1 << 7;
        const N = 1 << 6;
        const H = 1 << 5;
        const C = 1 << 4;
    }
}

/// SM83 instruction core.
///
/// Owns the register file, the interrupt registers the external controller
/// consults, and the cycle accountant. Created once with [`Cpu::start`] and
/// driven one instruction at a time through [`Cpu::step`].
pub struct Cpu {
    pub regs: Registers,
    ime: bool,
    halted: bool,
    /// STOP low-power state. Left the same way as HALT, on a pending
    /// interrupt.
    stopped: bool,
    halt_bug: bool,
    /// Instruction boundaries left before a pending EI takes effect.
    ei_countdown: u8,
    interrupts: InterruptRegisters,
    state: ExecState,
    timing: CycleAccountant,
    tracer: Option<Box<dyn Tracer>>,
}

impl Cpu {
    #[inline]
    pub fn get_flag(&self, flag: Flags) -> bool {
        self.regs.flags().contains(flag)
    }

    #[inline]
    pub fn set_flag(&mut self, flag: Flags, value: bool) {
        let mut flags = self.regs.flags();
        flags.set(flag, value);
        self.regs.set_flags(flags);
    }

    #[inline]
    pub fn flags(&self) -> Flags {
        self.regs.flags()
    }

    #[inline]
    pub fn set_flags(&mut self, flags: Flags) {
        self.regs.set_flags(flags);
    }

    #[inline]
    pub fn is_halted(&self) -> bool {
        self.halted
    }

    #[inline]
    pub fn is_stopped(&self) -> bool {
        self.stopped
    }

    #[inline]
    pub fn state(&self) -> &ExecState {
        &self.state
    }

    pub fn timing(&self) -> &CycleAccountant {
        &self.timing
    }

    /// Mutable access for the display timing collaborator, which drains the
    /// scanline counter.
    pub fn timing_mut(&mut self) -> &mut CycleAccountant {
        &mut self.timing
    }

    #[inline]
    pub fn total_cycles(&self) -> u64 {
        self.timing.total_cycles()
    }

    /// Install or remove the per-instruction trace collaborator.
    pub fn set_tracer(&mut self, tracer: Option<Box<dyn Tracer>>) {
        self.tracer = tracer;
    }
}

impl fmt::Display for Cpu {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let flags = self.flags();
        let flag = |bit: Flags, c: char| if flags.contains(bit) { c } else { '-' };

        writeln!(
            f,
            " AF = 0x{:04X}   BC = 0x{:04X}   DE = 0x{:04X}",
            self.regs.af(),
            self.regs.bc(),
            self.regs.de()
        )?;
        writeln!(
            f,
            " HL = 0x{:04X}   SP = 0x{:04X}   PC = 0x{:04X}",
            self.regs.hl(),
            self.regs.sp,
            self.regs.pc
        )?;
        writeln!(
            f,
            " flags = [{}{}{}{}]   IME = {}   IE = 0x{:02X}   IF = 0x{:02X}",
            flag(Flags::Z, 'Z'),
            flag(Flags::N, 'N'),
            flag(Flags::H, 'H'),
            flag(Flags::C, 'C'),
            self.ime as u8,
            self.interrupts.enable,
            self.interrupts.request
        )?;
        writeln!(f, " executed total cycles = {}", self.timing.total_cycles())?;
        write!(
            f,
            " time until next CPU throttle = {:.6} ms",
            self.timing.time_until_throttle_ms()
        )
    }
}
