use crate::cpu::{Bus, Cpu};
use crate::Result;

impl Cpu {
    pub(super) fn exec_push_rr<B: Bus>(&mut self, bus: &mut B, opcode: u8) -> Result<u32> {
        debug_assert!(matches!(opcode, 0xC5 | 0xD5 | 0xE5 | 0xF5));

        let value = self.regs.read16_stack((opcode >> 4) & 0x03)?;
        self.push_u16(bus, value);
        Ok(4)
    }

    /// POP AF drops the low nibble of F.
    pub(super) fn exec_pop_rr<B: Bus>(&mut self, bus: &mut B, opcode: u8) -> Result<u32> {
        debug_assert!(matches!(opcode, 0xC1 | 0xD1 | 0xE1 | 0xF1));

        let value = self.pop_u16(bus);
        self.regs.write16_stack((opcode >> 4) & 0x03, value)?;
        Ok(3)
    }
}
