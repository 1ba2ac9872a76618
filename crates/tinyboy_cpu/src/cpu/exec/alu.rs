use crate::cpu::alu::{self, AluOp, AluOutput, ShiftOp};
use crate::cpu::{Bus, Cpu, Flags, R8_HL_INDIRECT};
use crate::Result;

impl Cpu {
    /// Write an accumulator result back, except for CP which only sets flags.
    #[inline]
    fn apply_acc(&mut self, op: AluOp, out: AluOutput) {
        if op != AluOp::Cp {
            self.regs.set_a(out.value);
        }
        self.set_flags(out.flags);
    }

    /// ADD/ADC/SUB/SBC/AND/XOR/OR/CP A,r and A,(HL).
    pub(super) fn exec_alu_reg_group<B: Bus>(&mut self, bus: &mut B, opcode: u8) -> Result<u32> {
        debug_assert!(matches!(opcode, 0x80..=0xBF));

        let src = opcode & 0x07;
        let value = self.read_operand(bus, src)?;
        let op = AluOp::from_opcode(opcode);
        let out = alu::alu8(op, self.regs.a(), value, self.get_flag(Flags::C));
        self.apply_acc(op, out);

        Ok(if src == R8_HL_INDIRECT { 2 } else { 1 })
    }

    pub(super) fn exec_alu_imm<B: Bus>(&mut self, bus: &mut B, opcode: u8) -> u32 {
        debug_assert!(matches!(
            opcode,
            0xC6 | 0xCE | 0xD6 | 0xDE | 0xE6 | 0xEE | 0xF6 | 0xFE
        ));

        let value = self.fetch8(bus);
        let op = AluOp::from_opcode(opcode);
        let out = alu::alu8(op, self.regs.a(), value, self.get_flag(Flags::C));
        self.apply_acc(op, out);
        2
    }

    pub(super) fn exec_add_hl_rr(&mut self, opcode: u8) -> Result<u32> {
        debug_assert!(matches!(opcode, 0x09 | 0x19 | 0x29 | 0x39));

        let value = self.regs.read16((opcode >> 4) & 0x03)?;
        let (result, flags) = alu::add16(self.regs.hl(), value, self.flags());
        self.regs.set_hl(result);
        self.set_flags(flags);
        Ok(2)
    }

    pub(super) fn exec_add_sp_r8<B: Bus>(&mut self, bus: &mut B) -> u32 {
        let imm = self.fetch8(bus);
        let (value, flags) = alu::add16_signed(self.regs.sp, imm);
        self.regs.sp = value;
        self.set_flags(flags);
        4
    }

    /// RLCA / RRCA / RLA / RRA.
    pub(super) fn exec_rotate_a(&mut self, opcode: u8) -> u32 {
        debug_assert!(matches!(opcode, 0x07 | 0x0F | 0x17 | 0x1F));

        let out = alu::rotate_a(
            ShiftOp::from_opcode(opcode),
            self.regs.a(),
            self.get_flag(Flags::C),
        );
        self.regs.set_a(out.value);
        self.set_flags(out.flags);
        1
    }

    pub(super) fn exec_daa(&mut self) -> u32 {
        let out = alu::daa(self.regs.a(), self.flags());
        self.regs.set_a(out.value);
        self.set_flags(out.flags);
        1
    }

    pub(super) fn exec_cpl(&mut self) -> u32 {
        let out = alu::cpl(self.regs.a(), self.flags());
        self.regs.set_a(out.value);
        self.set_flags(out.flags);
        1
    }

    pub(super) fn exec_scf(&mut self) -> u32 {
        self.set_flags(alu::scf(self.flags()));
        1
    }

    pub(super) fn exec_ccf(&mut self) -> u32 {
        self.set_flags(alu::ccf(self.flags()));
        1
    }
}
