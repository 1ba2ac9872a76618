use super::{lookup, Bus, Cpu, TraceRecord};
use crate::{CpuFault, Result};

/// Execution driver state.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum ExecState {
    #[default]
    Running,
    /// Terminal. Every further `step` reports the stored fault.
    Faulted(CpuFault),
}

impl ExecState {
    #[inline]
    pub fn is_running(&self) -> bool {
        matches!(self, ExecState::Running)
    }
}

impl Cpu {
    /// Execute a single instruction and return the number of cycles
    /// accounted for it (nominal cost plus one).
    ///
    /// While halted or stopped with nothing pending the step idles for one
    /// nominal cycle. A fault moves the core to [`ExecState::Faulted`] after
    /// dumping its state; the core does not recover from that.
    pub fn step<B: Bus>(&mut self, bus: &mut B) -> Result<u32> {
        if let ExecState::Faulted(fault) = &self.state {
            return Err(fault.clone());
        }

        if self.halted || self.stopped {
            if self.pending_interrupts() == 0 {
                return Ok(self.timing.account(1));
            }
            self.halted = false;
            self.stopped = false;
        }

        let pc = self.regs.pc;
        let opcode = bus.read_byte(pc);
        let Some(handler) = lookup(opcode) else {
            let next = [
                bus.read_byte(pc.wrapping_add(1)),
                bus.read_byte(pc.wrapping_add(2)),
            ];
            return Err(self.fault(CpuFault::UndefinedOpcode { opcode, pc, next }));
        };

        if self.halt_bug {
            // HALT bug: this opcode fetch does not advance PC.
            self.halt_bug = false;
        } else {
            self.regs.pc = pc.wrapping_add(1);
        }

        let nominal = match self.exec_opcode(bus, handler, opcode) {
            Ok(nominal) => nominal,
            Err(fault) => return Err(self.fault(fault)),
        };
        let cycles = self.timing.account(nominal);
        self.apply_ime_delay();

        if let Some(tracer) = self.tracer.as_mut() {
            tracer.trace(&TraceRecord {
                pc,
                opcode,
                handler,
                cycles,
                total_cycles: self.timing.total_cycles(),
                regs: self.regs,
            });
        }

        Ok(cycles)
    }

    /// Log the register and timing state at `error` level, one line at a
    /// time.
    pub fn dump_state(&self) {
        for line in self.to_string().lines() {
            log::error!("{line}");
        }
    }

    fn fault(&mut self, fault: CpuFault) -> CpuFault {
        match &fault {
            CpuFault::UndefinedOpcode { opcode, next, .. } => log::error!(
                "undefined opcode {:02X} {:02X} {:02X}, dumping CPU state...",
                opcode,
                next[0],
                next[1]
            ),
            CpuFault::InvalidRegister { .. } => {
                log::error!("{fault}, dumping CPU state...")
            }
        }
        self.dump_state();
        self.state = ExecState::Faulted(fault.clone());
        fault
    }
}
