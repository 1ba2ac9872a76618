use crate::cpu::{alu, Bus, Cpu, R8_HL_INDIRECT};
use crate::Result;

impl Cpu {
    pub(super) fn exec_inc8<B: Bus>(&mut self, bus: &mut B, opcode: u8) -> Result<u32> {
        debug_assert!(matches!(
            opcode,
            0x04 | 0x0C | 0x14 | 0x1C | 0x24 | 0x2C | 0x34 | 0x3C
        ));

        let reg = (opcode >> 3) & 0x07;
        let value = self.read_operand(bus, reg)?;
        let out = alu::inc8(value, self.flags());
        self.write_operand(bus, reg, out.value)?;
        self.set_flags(out.flags);

        Ok(if reg == R8_HL_INDIRECT { 3 } else { 1 })
    }

    pub(super) fn exec_dec8<B: Bus>(&mut self, bus: &mut B, opcode: u8) -> Result<u32> {
        debug_assert!(matches!(
            opcode,
            0x05 | 0x0D | 0x15 | 0x1D | 0x25 | 0x2D | 0x35 | 0x3D
        ));

        let reg = (opcode >> 3) & 0x07;
        let value = self.read_operand(bus, reg)?;
        let out = alu::dec8(value, self.flags());
        self.write_operand(bus, reg, out.value)?;
        self.set_flags(out.flags);

        Ok(if reg == R8_HL_INDIRECT { 3 } else { 1 })
    }

    pub(super) fn exec_inc16_rr(&mut self, opcode: u8) -> Result<u32> {
        debug_assert!(matches!(opcode, 0x03 | 0x13 | 0x23 | 0x33));

        let rp = (opcode >> 4) & 0x03;
        let value = self.regs.read16(rp)?;
        self.regs.write16(rp, value.wrapping_add(1))?;
        Ok(2)
    }

    pub(super) fn exec_dec16_rr(&mut self, opcode: u8) -> Result<u32> {
        debug_assert!(matches!(opcode, 0x0B | 0x1B | 0x2B | 0x3B));

        let rp = (opcode >> 4) & 0x03;
        let value = self.regs.read16(rp)?;
        self.regs.write16(rp, value.wrapping_sub(1))?;
        Ok(2)
    }
}
