use crate::cpu::{alu, Bus, Cpu, R8_HL_INDIRECT};
use crate::Result;

impl Cpu {
    /// LD r,r' / LD r,(HL) / LD (HL),r. 0x76 is HALT and never reaches here.
    pub(super) fn exec_ld_r_r<B: Bus>(&mut self, bus: &mut B, opcode: u8) -> Result<u32> {
        debug_assert!(matches!(opcode, 0x40..=0x7F) && opcode != 0x76);

        let dst = (opcode >> 3) & 0x07;
        let src = opcode & 0x07;
        let value = self.read_operand(bus, src)?;
        self.write_operand(bus, dst, value)?;

        Ok(if dst == R8_HL_INDIRECT || src == R8_HL_INDIRECT {
            2
        } else {
            1
        })
    }

    pub(super) fn exec_ld_r_d8<B: Bus>(&mut self, bus: &mut B, opcode: u8) -> Result<u32> {
        debug_assert!(matches!(
            opcode,
            0x06 | 0x0E | 0x16 | 0x1E | 0x26 | 0x2E | 0x36 | 0x3E
        ));

        let reg = (opcode >> 3) & 0x07;
        let value = self.fetch8(bus);
        self.write_operand(bus, reg, value)?;

        Ok(if reg == R8_HL_INDIRECT { 3 } else { 2 })
    }

    pub(super) fn exec_ld_rr_d16<B: Bus>(&mut self, bus: &mut B, opcode: u8) -> Result<u32> {
        debug_assert!(matches!(opcode, 0x01 | 0x11 | 0x21 | 0x31));

        let value = self.fetch16(bus);
        self.regs.write16((opcode >> 4) & 0x03, value)?;
        Ok(3)
    }

    pub(super) fn exec_ld_a16_sp<B: Bus>(&mut self, bus: &mut B) -> u32 {
        let addr = self.fetch16(bus);
        bus.write_word(addr, self.regs.sp);
        5
    }

    pub(super) fn exec_ldh_a8<B: Bus>(&mut self, bus: &mut B, opcode: u8) -> u32 {
        debug_assert!(matches!(opcode, 0xE0 | 0xF0));

        let addr = 0xFF00 | self.fetch8(bus) as u16;
        if opcode == 0xE0 {
            bus.write_byte(addr, self.regs.a());
        } else {
            let value = bus.read_byte(addr);
            self.regs.set_a(value);
        }
        3
    }

    pub(super) fn exec_ldh_c<B: Bus>(&mut self, bus: &mut B, opcode: u8) -> u32 {
        debug_assert!(matches!(opcode, 0xE2 | 0xF2));

        let addr = 0xFF00 | self.regs.bc.lo() as u16;
        if opcode == 0xE2 {
            bus.write_byte(addr, self.regs.a());
        } else {
            let value = bus.read_byte(addr);
            self.regs.set_a(value);
        }
        2
    }

    pub(super) fn exec_ld_a16_a<B: Bus>(&mut self, bus: &mut B, opcode: u8) -> u32 {
        debug_assert!(matches!(opcode, 0xEA | 0xFA));

        let addr = self.fetch16(bus);
        if opcode == 0xEA {
            bus.write_byte(addr, self.regs.a());
        } else {
            let value = bus.read_byte(addr);
            self.regs.set_a(value);
        }
        4
    }

    /// Address for the (BC)/(DE)/(HL+)/(HL-) forms. HL is post-adjusted.
    fn indirect_addr(&mut self, opcode: u8) -> u16 {
        match (opcode >> 4) & 0x03 {
            0 => self.regs.bc(),
            1 => self.regs.de(),
            2 => {
                let hl = self.regs.hl();
                self.regs.set_hl(hl.wrapping_add(1));
                hl
            }
            _ => {
                let hl = self.regs.hl();
                self.regs.set_hl(hl.wrapping_sub(1));
                hl
            }
        }
    }

    pub(super) fn exec_ld_indirect_a<B: Bus>(&mut self, bus: &mut B, opcode: u8) -> u32 {
        debug_assert!(matches!(opcode, 0x02 | 0x12 | 0x22 | 0x32));

        let addr = self.indirect_addr(opcode);
        bus.write_byte(addr, self.regs.a());
        2
    }

    pub(super) fn exec_ld_a_indirect<B: Bus>(&mut self, bus: &mut B, opcode: u8) -> u32 {
        debug_assert!(matches!(opcode, 0x0A | 0x1A | 0x2A | 0x3A));

        let addr = self.indirect_addr(opcode);
        let value = bus.read_byte(addr);
        self.regs.set_a(value);
        2
    }

    pub(super) fn exec_ld_sp_hl(&mut self) -> u32 {
        self.regs.sp = self.regs.hl();
        2
    }

    pub(super) fn exec_ld_hl_sp_r8<B: Bus>(&mut self, bus: &mut B) -> u32 {
        let imm = self.fetch8(bus);
        let (value, flags) = alu::add16_signed(self.regs.sp, imm);
        self.regs.set_hl(value);
        self.set_flags(flags);
        3
    }
}
