/// Abstraction over the addressable memory the core executes from.
///
/// Implementations own whatever mapping, banking and IO policy the machine
/// needs; the core sees a flat 16-bit address space.
pub trait Bus {
    fn read_byte(&mut self, addr: u16) -> u8;
    fn write_byte(&mut self, addr: u16, value: u8);

    /// Little-endian 16-bit read.
    fn read_word(&mut self, addr: u16) -> u16 {
        let lo = self.read_byte(addr);
        let hi = self.read_byte(addr.wrapping_add(1));
        u16::from_le_bytes([lo, hi])
    }

    /// Little-endian 16-bit write.
    fn write_word(&mut self, addr: u16, value: u16) {
        let [lo, hi] = value.to_le_bytes();
        self.write_byte(addr, lo);
        self.write_byte(addr.wrapping_add(1), hi);
    }
}

/// 64 KiB of plain RAM with no mapping at all.
///
/// Used by the command-line runner and tests.
pub struct FlatMemory {
    memory: Box<[u8; 0x10000]>,
}

impl Default for FlatMemory {
    fn default() -> Self {
        Self {
            memory: Box::new([0; 0x10000]),
        }
    }
}

impl FlatMemory {
    /// Build a memory image with `rom` copied to address 0. Bytes beyond
    /// the 16-bit space are dropped.
    pub fn with_rom(rom: &[u8]) -> Self {
        let mut memory = Self::default();
        memory.load(0x0000, rom);
        memory
    }

    /// Copy `bytes` starting at `addr`, truncating at the end of the space.
    pub fn load(&mut self, addr: u16, bytes: &[u8]) {
        let start = addr as usize;
        let len = bytes.len().min(self.memory.len() - start);
        self.memory[start..start + len].copy_from_slice(&bytes[..len]);
    }
}

impl Bus for FlatMemory {
    #[inline]
    fn read_byte(&mut self, addr: u16) -> u8 {
        self.memory[addr as usize]
    }

    #[inline]
    fn write_byte(&mut self, addr: u16, value: u8) {
        self.memory[addr as usize] = value;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rom_lands_at_address_zero() {
        let mut memory = FlatMemory::with_rom(&[0x31, 0xFE, 0xFF]);
        assert_eq!(memory.read_byte(0x0000), 0x31);
        assert_eq!(memory.read_word(0x0001), 0xFFFE);
        assert_eq!(memory.read_byte(0x0003), 0x00);
    }

    #[test]
    fn load_truncates_at_end_of_space() {
        let mut memory = FlatMemory::default();
        memory.load(0xFFFE, &[0x11, 0x22, 0x33, 0x44]);
        assert_eq!(memory.read_byte(0xFFFE), 0x11);
        assert_eq!(memory.read_byte(0xFFFF), 0x22);
        // Nothing wrapped to the bottom of the space.
        assert_eq!(memory.read_byte(0x0000), 0x00);
    }

    #[test]
    fn word_access_is_little_endian_and_wraps() {
        let mut memory = FlatMemory::default();
        memory.write_word(0xC000, 0xBEEF);
        assert_eq!(memory.read_byte(0xC000), 0xEF);
        assert_eq!(memory.read_byte(0xC001), 0xBE);

        memory.write_word(0xFFFF, 0x1234);
        assert_eq!(memory.read_byte(0xFFFF), 0x34);
        assert_eq!(memory.read_byte(0x0000), 0x12);
        assert_eq!(memory.read_word(0xFFFF), 0x1234);
    }
}
