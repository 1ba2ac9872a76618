use super::alu::{self, ShiftOp};
use super::{Bus, Cpu, Flags, R8_HL_INDIRECT};
use crate::Result;

impl Cpu {
    /// Execute the byte after a 0xCB prefix.
    ///
    /// Bits 6–7 pick the group (shift, BIT, RES, SET), bits 3–5 the shift
    /// kind or bit number, bits 0–2 the operand.
    pub(super) fn step_cb<B: Bus>(&mut self, bus: &mut B) -> Result<u32> {
        let cb = self.fetch8(bus);
        let x = cb >> 6;
        let y = (cb >> 3) & 0x07;
        let z = cb & 0x07;
        let memory = z == R8_HL_INDIRECT;

        let value = self.read_operand(bus, z)?;
        match x {
            0 => {
                let out = alu::shift8(ShiftOp::from_opcode(cb), value, self.get_flag(Flags::C));
                self.write_operand(bus, z, out.value)?;
                self.set_flags(out.flags);
            }
            1 => {
                // BIT b,r only reads its operand.
                let flags = alu::bit(value, y, self.flags());
                self.set_flags(flags);
                return Ok(if memory { 3 } else { 2 });
            }
            2 => self.write_operand(bus, z, value & !(1 << y))?,
            _ => self.write_operand(bus, z, value | (1 << y))?,
        }

        Ok(if memory { 4 } else { 2 })
    }
}
