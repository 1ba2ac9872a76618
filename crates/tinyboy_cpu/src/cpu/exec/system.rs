use crate::cpu::{Bus, Cpu};

impl Cpu {
    pub(super) fn exec_stop<B: Bus>(&mut self, bus: &mut B) -> u32 {
        // STOP is a 2-byte instruction; the padding byte is discarded.
        let _padding = self.fetch8(bus);
        self.stopped = true;
        self.halted = false;
        1
    }

    pub(super) fn exec_halt(&mut self) -> u32 {
        if !self.ime && self.pending_interrupts() != 0 {
            // HALT bug: the CPU does not halt and the next opcode byte is
            // read twice.
            self.halt_bug = true;
        } else {
            self.halted = true;
        }
        1
    }

    /// DI takes effect at once and also cancels an EI still in flight.
    pub(super) fn exec_di(&mut self) -> u32 {
        self.disable_interrupts();
        1
    }

    pub(super) fn exec_ei(&mut self) -> u32 {
        self.schedule_ime_enable();
        1
    }
}
