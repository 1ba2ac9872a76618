use crate::{CpuFault, Flags, Result};

/// 8-bit register indices in opcode field order.
pub const R8_B: u8 = 0;
pub const R8_C: u8 = 1;
pub const R8_D: u8 = 2;
pub const R8_E: u8 = 3;
pub const R8_H: u8 = 4;
pub const R8_L: u8 = 5;
/// Memory operand `(HL)`; never a valid register file index.
pub const R8_HL_INDIRECT: u8 = 6;
pub const R8_A: u8 = 7;

/// 16-bit pair indices in opcode field order (bits 4–5).
pub const R16_BC: u8 = 0;
pub const R16_DE: u8 = 1;
pub const R16_HL: u8 = 2;
pub const R16_SP: u8 = 3;

/// Two 8-bit registers backed by one 16-bit store.
///
/// Writing the pair replaces both halves; writing one half keeps the other.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RegisterPair(u16);

impl RegisterPair {
    #[inline]
    pub const fn new(value: u16) -> Self {
        Self(value)
    }

    #[inline]
    pub const fn get(self) -> u16 {
        self.0
    }

    #[inline]
    pub fn set(&mut self, value: u16) {
        self.0 = value;
    }

    #[inline]
    pub const fn hi(self) -> u8 {
        (self.0 >> 8) as u8
    }

    #[inline]
    pub const fn lo(self) -> u8 {
        self.0 as u8
    }

    #[inline]
    pub fn set_hi(&mut self, value: u8) {
        self.0 = (self.0 & 0x00FF) | ((value as u16) << 8);
    }

    #[inline]
    pub fn set_lo(&mut self, value: u8) {
        self.0 = (self.0 & 0xFF00) | value as u16;
    }
}

/// Registers for the SM83 core.
///
/// A/F, B/C, D/E and H/L live in shared pairs. The low nibble of F is
/// masked on every write so it always reads back as zero.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Registers {
    af: RegisterPair,
    pub bc: RegisterPair,
    pub de: RegisterPair,
    pub hl: RegisterPair,
    pub sp: u16,
    pub pc: u16,
}

impl Registers {
    #[inline]
    pub fn a(&self) -> u8 {
        self.af.hi()
    }

    #[inline]
    pub fn set_a(&mut self, value: u8) {
        self.af.set_hi(value);
    }

    #[inline]
    pub fn flags(&self) -> Flags {
        Flags::from_bits_truncate(self.af.lo())
    }

    #[inline]
    pub fn set_flags(&mut self, flags: Flags) {
        self.af.set_lo(flags.bits());
    }

    #[inline]
    pub fn af(&self) -> u16 {
        self.af.get()
    }

    #[inline]
    pub fn set_af(&mut self, value: u16) {
        // Lower 4 bits of F are always zero.
        self.af.set(value & 0xFFF0);
    }

    #[inline]
    pub fn bc(&self) -> u16 {
        self.bc.get()
    }

    #[inline]
    pub fn set_bc(&mut self, value: u16) {
        self.bc.set(value);
    }

    #[inline]
    pub fn de(&self) -> u16 {
        self.de.get()
    }

    #[inline]
    pub fn set_de(&mut self, value: u16) {
        self.de.set(value);
    }

    #[inline]
    pub fn hl(&self) -> u16 {
        self.hl.get()
    }

    #[inline]
    pub fn set_hl(&mut self, value: u16) {
        self.hl.set(value);
    }

    /// Read an 8-bit register by its opcode field index.
    ///
    /// 0=B, 1=C, 2=D, 3=E, 4=H, 5=L, 7=A. Index 6 encodes `(HL)` and must be
    /// resolved by the caller; it is rejected here along with anything >7.
    pub fn read8(&self, index: u8) -> Result<u8> {
        match index {
            R8_B => Ok(self.bc.hi()),
            R8_C => Ok(self.bc.lo()),
            R8_D => Ok(self.de.hi()),
            R8_E => Ok(self.de.lo()),
            R8_H => Ok(self.hl.hi()),
            R8_L => Ok(self.hl.lo()),
            R8_A => Ok(self.a()),
            _ => Err(CpuFault::InvalidRegister { index, width: 8 }),
        }
    }

    /// Write an 8-bit register by its opcode field index. See [`read8`](Self::read8).
    pub fn write8(&mut self, index: u8, value: u8) -> Result<()> {
        match index {
            R8_B => self.bc.set_hi(value),
            R8_C => self.bc.set_lo(value),
            R8_D => self.de.set_hi(value),
            R8_E => self.de.set_lo(value),
            R8_H => self.hl.set_hi(value),
            R8_L => self.hl.set_lo(value),
            R8_A => self.set_a(value),
            _ => return Err(CpuFault::InvalidRegister { index, width: 8 }),
        }
        Ok(())
    }

    /// Read a 16-bit pair by its opcode field index: 0=BC, 1=DE, 2=HL, 3=SP.
    pub fn read16(&self, index: u8) -> Result<u16> {
        match index {
            R16_BC => Ok(self.bc()),
            R16_DE => Ok(self.de()),
            R16_HL => Ok(self.hl()),
            R16_SP => Ok(self.sp),
            _ => Err(CpuFault::InvalidRegister { index, width: 16 }),
        }
    }

    pub fn write16(&mut self, index: u8, value: u16) -> Result<()> {
        match index {
            R16_BC => self.set_bc(value),
            R16_DE => self.set_de(value),
            R16_HL => self.set_hl(value),
            R16_SP => self.sp = value,
            _ => return Err(CpuFault::InvalidRegister { index, width: 16 }),
        }
        Ok(())
    }

    /// PUSH/POP pair encoding: 0=BC, 1=DE, 2=HL, 3=AF.
    pub(crate) fn read16_stack(&self, index: u8) -> Result<u16> {
        match index {
            3 => Ok(self.af()),
            _ => self.read16(index),
        }
    }

    pub(crate) fn write16_stack(&mut self, index: u8, value: u16) -> Result<()> {
        match index {
            3 => {
                self.set_af(value);
                Ok(())
            }
            _ => self.write16(index, value),
        }
    }
}
