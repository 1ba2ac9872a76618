use anyhow::{ensure, Context, Result};
use tinyboy_cpu::{Cpu, CpuConfig, FlatMemory};
use typed_builder::TypedBuilder;

#[derive(Clone, Debug, TypedBuilder)]
pub struct RunOptions {
    #[builder(default)]
    pub config: CpuConfig,
    /// Stop after this many instructions. Runs until the core faults or
    /// falls asleep when unset.
    #[builder(default, setter(strip_option))]
    pub max_steps: Option<u64>,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self::builder().build()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StopReason {
    StepLimit,
    /// HALT or STOP with no interrupt that flat memory could ever raise.
    Asleep,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RunSummary {
    pub steps: u64,
    pub total_cycles: u64,
    pub pc: u16,
    pub reason: StopReason,
}

/// Load `rom` at address 0 of a flat 64 KiB image and execute it from the
/// post-boot entry point.
pub fn run(options: RunOptions, rom: &[u8]) -> Result<RunSummary> {
    ensure!(!rom.is_empty(), "ROM image is empty");
    if rom.len() > 0x10000 {
        log::warn!(
            "ROM is {} bytes, only the first 64 KiB are mapped",
            rom.len()
        );
    }

    let mut memory = FlatMemory::with_rom(rom);
    let mut cpu = Cpu::start(options.config);

    let mut steps = 0u64;
    let reason = loop {
        if options.max_steps.is_some_and(|max| steps >= max) {
            break StopReason::StepLimit;
        }
        if (cpu.is_halted() || cpu.is_stopped()) && cpu.pending_interrupts() == 0 {
            break StopReason::Asleep;
        }

        cpu.step(&mut memory)
            .with_context(|| format!("CPU faulted after {steps} instructions"))?;
        steps += 1;
    };

    log::info!(
        "stopped ({:?}) after {} instructions, {} cycles, PC=0x{:04X}",
        reason,
        steps,
        cpu.total_cycles(),
        cpu.regs.pc
    );

    Ok(RunSummary {
        steps,
        total_cycles: cpu.total_cycles(),
        pc: cpu.regs.pc,
        reason,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tinyboy_cpu::CpuFault;

    fn rom_with_entry(code: &[u8]) -> Vec<u8> {
        let mut rom = vec![0u8; 0x8000];
        rom[0x0100..0x0100 + code.len()].copy_from_slice(code);
        rom
    }

    fn unthrottled() -> CpuConfig {
        CpuConfig::builder().throttle(false).build()
    }

    #[test]
    fn runs_until_step_limit() {
        // NOP ; JR -2
        let rom = rom_with_entry(&[0x00, 0x18, 0xFE]);
        let options = RunOptions::builder()
            .config(unthrottled())
            .max_steps(10)
            .build();

        let summary = run(options, &rom).unwrap();
        assert_eq!(summary.steps, 10);
        assert_eq!(summary.total_cycles, 2 + 9 * 4);
        assert_eq!(summary.pc, 0x0101);
        assert_eq!(summary.reason, StopReason::StepLimit);
    }

    #[test]
    fn stops_when_halted_with_nothing_to_wake_it() {
        // LD A,0x42 ; HALT
        let rom = rom_with_entry(&[0x3E, 0x42, 0x76]);
        let options = RunOptions::builder().config(unthrottled()).build();

        let summary = run(options, &rom).unwrap();
        assert_eq!(summary.steps, 2);
        assert_eq!(summary.pc, 0x0103);
        assert_eq!(summary.reason, StopReason::Asleep);
    }

    #[test]
    fn undefined_opcode_surfaces_as_error() {
        let rom = rom_with_entry(&[0x00, 0xED]);
        let options = RunOptions::builder().config(unthrottled()).build();

        let err = run(options, &rom).unwrap_err();
        assert_eq!(
            err.downcast_ref::<CpuFault>(),
            Some(&CpuFault::UndefinedOpcode {
                opcode: 0xED,
                pc: 0x0101,
                next: [0x00, 0x00],
            })
        );
        assert!(format!("{err:#}").contains("after 1 instructions"));
    }

    #[test]
    fn empty_rom_is_rejected() {
        assert!(run(RunOptions::default(), &[]).is_err());
    }
}
