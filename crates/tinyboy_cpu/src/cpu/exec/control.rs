use crate::cpu::{Bus, Cpu};

impl Cpu {
    /// JR NZ/Z/NC/C,e. The displacement byte is consumed either way.
    pub(super) fn exec_jr_cc<B: Bus>(&mut self, bus: &mut B, opcode: u8) -> u32 {
        debug_assert_eq!(opcode & 0xE7, 0x20);
        let taken = self.branch_taken(opcode);
        self.jr(bus, taken)
    }

    pub(super) fn exec_jp_cc<B: Bus>(&mut self, bus: &mut B, opcode: u8) -> u32 {
        debug_assert_eq!(opcode & 0xE7, 0xC2);
        let taken = self.branch_taken(opcode);
        self.jp_cond(bus, taken)
    }

    pub(super) fn exec_jp_a16<B: Bus>(&mut self, bus: &mut B) -> u32 {
        self.regs.pc = self.fetch16(bus);
        4
    }

    pub(super) fn exec_jp_hl(&mut self) -> u32 {
        self.regs.pc = self.regs.hl();
        1
    }

    pub(super) fn exec_call_a16<B: Bus>(&mut self, bus: &mut B) -> u32 {
        self.call_cond(bus, true)
    }

    pub(super) fn exec_call_cc<B: Bus>(&mut self, bus: &mut B, opcode: u8) -> u32 {
        debug_assert_eq!(opcode & 0xE7, 0xC4);
        let taken = self.branch_taken(opcode);
        self.call_cond(bus, taken)
    }

    pub(super) fn exec_ret<B: Bus>(&mut self, bus: &mut B) -> u32 {
        self.regs.pc = self.pop_u16(bus);
        4
    }

    pub(super) fn exec_ret_cc<B: Bus>(&mut self, bus: &mut B, opcode: u8) -> u32 {
        debug_assert_eq!(opcode & 0xE7, 0xC0);
        let taken = self.branch_taken(opcode);
        self.ret_cond(bus, taken)
    }

    /// RETI enables IME immediately, unlike EI.
    pub(super) fn exec_reti<B: Bus>(&mut self, bus: &mut B) -> u32 {
        self.regs.pc = self.pop_u16(bus);
        self.disable_interrupts();
        self.ime = true;
        4
    }

    pub(super) fn exec_rst<B: Bus>(&mut self, bus: &mut B, opcode: u8) -> u32 {
        debug_assert!(opcode & 0xC7 == 0xC7);
        let ret = self.regs.pc;
        self.push_u16(bus, ret);
        self.regs.pc = (opcode & 0x38) as u16;
        4
    }
}
