use super::Cpu;

/// Mask of the five interrupt sources (VBlank, STAT, Timer, Serial, Joypad).
const INTERRUPT_MASK: u8 = 0x1F;

/// IE ($FFFF) and IF ($FF0F) storage.
///
/// The core only keeps these bytes; an external interrupt controller decides
/// when to vector.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct InterruptRegisters {
    pub enable: u8,
    pub request: u8,
}

impl Cpu {
    #[inline]
    pub fn ime(&self) -> bool {
        self.ime
    }

    #[inline]
    pub fn interrupt_enable(&self) -> u8 {
        self.interrupts.enable
    }

    #[inline]
    pub fn set_interrupt_enable(&mut self, value: u8) {
        self.interrupts.enable = value;
    }

    #[inline]
    pub fn interrupt_request(&self) -> u8 {
        self.interrupts.request
    }

    #[inline]
    pub fn set_interrupt_request(&mut self, value: u8) {
        self.interrupts.request = value;
    }

    /// Raise request bit `index` (0–4) in IF.
    pub fn request_interrupt(&mut self, index: u8) {
        debug_assert!(index < 5, "interrupt index {index} out of range");
        self.interrupts.request |= 1 << index;
    }

    /// Sources that are both requested and enabled.
    #[inline]
    pub fn pending_interrupts(&self) -> u8 {
        self.interrupts.enable & self.interrupts.request & INTERRUPT_MASK
    }

    /// Called by the interrupt controller when it vectors: IME is cleared
    /// and any low-power state is left.
    pub fn begin_interrupt_dispatch(&mut self) {
        self.disable_interrupts();
        self.halted = false;
        self.stopped = false;
    }

    /// Called by the interrupt controller when the handler returns through
    /// its own path rather than RETI.
    pub fn end_interrupt_dispatch(&mut self) {
        self.ime = true;
    }

    /// Clear IME and drop any EI still counting down.
    #[inline]
    pub(super) fn disable_interrupts(&mut self) {
        self.ime = false;
        self.ei_countdown = 0;
    }

    /// EI lands two boundaries from now: its own, then the next
    /// instruction's.
    #[inline]
    pub(super) fn schedule_ime_enable(&mut self) {
        self.ei_countdown = 2;
    }

    /// Run at every instruction boundary.
    #[inline]
    pub(super) fn apply_ime_delay(&mut self) {
        match self.ei_countdown {
            0 => {}
            1 => {
                self.ei_countdown = 0;
                self.ime = true;
            }
            n => self.ei_countdown = n - 1,
        }
    }
}
