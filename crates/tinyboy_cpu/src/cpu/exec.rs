mod alu;
mod control;
mod incdec;
mod ld;
mod stack;
mod system;

use super::{Bus, Cpu, Handler};
use crate::Result;

impl Cpu {
    /// Execute one decoded opcode and return its nominal cycle cost.
    ///
    /// PC already points past the opcode byte. Handlers that go through the
    /// register file by index propagate an invalid-index fault; the rest
    /// cannot fail.
    pub(super) fn exec_opcode<B: Bus>(
        &mut self,
        bus: &mut B,
        handler: Handler,
        opcode: u8,
    ) -> Result<u32> {
        let cycles = match handler {
            Handler::Nop => 1,
            Handler::Stop => self.exec_stop(bus),
            Handler::Halt => self.exec_halt(),
            Handler::Di => self.exec_di(),
            Handler::Ei => self.exec_ei(),
            Handler::Prefix => self.step_cb(bus)?,

            // 8-bit loads.
            Handler::LdRR | Handler::LdRHl | Handler::LdHlR => self.exec_ld_r_r(bus, opcode)?,
            Handler::LdRImm8 | Handler::LdHlImm8 => self.exec_ld_r_d8(bus, opcode)?,
            Handler::LdIndirectA => self.exec_ld_indirect_a(bus, opcode),
            Handler::LdAIndirect => self.exec_ld_a_indirect(bus, opcode),
            Handler::LdhImm8A | Handler::LdhAImm8 => self.exec_ldh_a8(bus, opcode),
            Handler::LdhCA | Handler::LdhAC => self.exec_ldh_c(bus, opcode),
            Handler::LdImm16A | Handler::LdAImm16 => self.exec_ld_a16_a(bus, opcode),

            // 16-bit loads.
            Handler::LdRrImm16 => self.exec_ld_rr_d16(bus, opcode)?,
            Handler::LdImm16Sp => self.exec_ld_a16_sp(bus),
            Handler::LdSpHl => self.exec_ld_sp_hl(),
            Handler::LdHlSpImm8 => self.exec_ld_hl_sp_r8(bus),
            Handler::Push => self.exec_push_rr(bus, opcode)?,
            Handler::Pop => self.exec_pop_rr(bus, opcode)?,

            // Increment / decrement.
            Handler::IncR | Handler::IncHl => self.exec_inc8(bus, opcode)?,
            Handler::DecR | Handler::DecHl => self.exec_dec8(bus, opcode)?,
            Handler::IncRr => self.exec_inc16_rr(opcode)?,
            Handler::DecRr => self.exec_dec16_rr(opcode)?,

            // Arithmetic and logic.
            Handler::AluR | Handler::AluHl => self.exec_alu_reg_group(bus, opcode)?,
            Handler::AluImm8 => self.exec_alu_imm(bus, opcode),
            Handler::AddHlRr => self.exec_add_hl_rr(opcode)?,
            Handler::AddSpImm8 => self.exec_add_sp_r8(bus),
            Handler::RotateA => self.exec_rotate_a(opcode),
            Handler::Daa => self.exec_daa(),
            Handler::Cpl => self.exec_cpl(),
            Handler::Scf => self.exec_scf(),
            Handler::Ccf => self.exec_ccf(),

            // Control flow.
            Handler::Jr => self.jr(bus, true),
            Handler::JrCond => self.exec_jr_cc(bus, opcode),
            Handler::Jp => self.exec_jp_a16(bus),
            Handler::JpCond => self.exec_jp_cc(bus, opcode),
            Handler::JpHl => self.exec_jp_hl(),
            Handler::Call => self.exec_call_a16(bus),
            Handler::CallCond => self.exec_call_cc(bus, opcode),
            Handler::Ret => self.exec_ret(bus),
            Handler::RetCond => self.exec_ret_cc(bus, opcode),
            Handler::Reti => self.exec_reti(bus),
            Handler::Rst => self.exec_rst(bus, opcode),
        };
        Ok(cycles)
    }
}
