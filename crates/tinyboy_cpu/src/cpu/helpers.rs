use super::{Bus, Cpu, Flags, R8_HL_INDIRECT};
use crate::Result;

impl Cpu {
    /// Read an 8-bit operand by opcode field index.
    ///
    /// 0=B, 1=C, 2=D, 3=E, 4=H, 5=L, 6=(HL), 7=A. Index 6 goes to the bus;
    /// everything else is resolved by the register file.
    #[inline]
    pub(super) fn read_operand<B: Bus>(&mut self, bus: &mut B, index: u8) -> Result<u8> {
        if index == R8_HL_INDIRECT {
            Ok(bus.read_byte(self.regs.hl()))
        } else {
            self.regs.read8(index)
        }
    }

    /// Write an 8-bit operand by opcode field index. See `read_operand`.
    #[inline]
    pub(super) fn write_operand<B: Bus>(&mut self, bus: &mut B, index: u8, value: u8) -> Result<()> {
        if index == R8_HL_INDIRECT {
            bus.write_byte(self.regs.hl(), value);
            Ok(())
        } else {
            self.regs.write8(index, value)
        }
    }

    #[inline]
    pub(super) fn fetch8<B: Bus>(&mut self, bus: &mut B) -> u8 {
        let value = bus.read_byte(self.regs.pc);
        self.regs.pc = self.regs.pc.wrapping_add(1);
        value
    }

    #[inline]
    pub(super) fn fetch16<B: Bus>(&mut self, bus: &mut B) -> u16 {
        let value = bus.read_word(self.regs.pc);
        self.regs.pc = self.regs.pc.wrapping_add(2);
        value
    }

    #[inline]
    pub(super) fn push_u16<B: Bus>(&mut self, bus: &mut B, value: u16) {
        self.regs.sp = self.regs.sp.wrapping_sub(2);
        bus.write_word(self.regs.sp, value);
    }

    #[inline]
    pub(super) fn pop_u16<B: Bus>(&mut self, bus: &mut B) -> u16 {
        let value = bus.read_word(self.regs.sp);
        self.regs.sp = self.regs.sp.wrapping_add(2);
        value
    }

    /// Branch condition encoded in bits 3–4 of a conditional opcode:
    /// NZ, Z, NC, C.
    #[inline]
    pub(super) fn branch_taken(&self, opcode: u8) -> bool {
        match (opcode >> 3) & 0x03 {
            0 => !self.get_flag(Flags::Z),
            1 => self.get_flag(Flags::Z),
            2 => !self.get_flag(Flags::C),
            _ => self.get_flag(Flags::C),
        }
    }

    /// Shared tail of JR and JR cc. The offset is two's complement and
    /// counts from the byte after the displacement.
    pub(super) fn jr<B: Bus>(&mut self, bus: &mut B, cond: bool) -> u32 {
        let offset = self.fetch8(bus) as i8;
        if cond {
            self.regs.pc = self.regs.pc.wrapping_add(offset as i16 as u16);
            3
        } else {
            2
        }
    }

    /// JP cc,a16: 4 cycles taken, 3 not taken.
    pub(super) fn jp_cond<B: Bus>(&mut self, bus: &mut B, cond: bool) -> u32 {
        let addr = self.fetch16(bus);
        if cond {
            self.regs.pc = addr;
            4
        } else {
            3
        }
    }

    /// Shared tail of CALL and CALL cc. Pushes the address after the operand.
    pub(super) fn call_cond<B: Bus>(&mut self, bus: &mut B, cond: bool) -> u32 {
        let addr = self.fetch16(bus);
        if cond {
            let ret = self.regs.pc;
            self.push_u16(bus, ret);
            self.regs.pc = addr;
            6
        } else {
            3
        }
    }

    /// RET cc: 5 cycles taken, 2 not taken.
    pub(super) fn ret_cond<B: Bus>(&mut self, bus: &mut B, cond: bool) -> u32 {
        if cond {
            self.regs.pc = self.pop_u16(bus);
            5
        } else {
            2
        }
    }
}
