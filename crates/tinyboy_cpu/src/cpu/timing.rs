use std::thread;
use std::time::Duration;

use crate::SCANLINE_TIME_MS;

/// Real-time pause invoked by the throttle.
pub trait Pacer {
    fn pause(&mut self, ms: u64);
}

/// Blocks the emulation thread with `std::thread::sleep`.
#[derive(Clone, Copy, Debug, Default)]
pub struct SleepPacer;

impl Pacer for SleepPacer {
    fn pause(&mut self, ms: u64) {
        thread::sleep(Duration::from_millis(ms));
    }
}

/// Never pauses. Window counters still reset when the threshold is hit.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullPacer;

impl Pacer for NullPacer {
    fn pause(&mut self, _ms: u64) {}
}

/// Cycle bookkeeping and amortised real-time pacing.
///
/// Every accounted instruction is charged one cycle more than its nominal
/// cost; scanline and throttle timing downstream are calibrated against
/// that convention.
pub struct CycleAccountant {
    clock_hz: u32,
    cycles_per_ms: u32,
    cycles_per_scanline: u32,
    threshold_ms: f64,
    total_cycles: u64,
    window_cycles: u64,
    window_ms: f64,
    scanline_cycles: u32,
    pacer: Box<dyn Pacer>,
}

impl CycleAccountant {
    pub fn new(clock_hz: u32, threshold_ms: f64, pacer: Box<dyn Pacer>) -> Self {
        let cycles_per_ms = clock_hz / 1000;
        let cycles_per_scanline = (cycles_per_ms as f64 * SCANLINE_TIME_MS) as u32;
        Self {
            clock_hz,
            cycles_per_ms,
            cycles_per_scanline,
            threshold_ms,
            total_cycles: 0,
            window_cycles: 0,
            window_ms: 0.0,
            scanline_cycles: 0,
            pacer,
        }
    }

    /// Charge an instruction with `nominal` cycles and return the cycles
    /// actually accounted (`nominal + 1`).
    pub fn account(&mut self, nominal: u32) -> u32 {
        let cycles = nominal + 1;
        self.total_cycles += cycles as u64;
        self.window_cycles += cycles as u64;
        self.scanline_cycles = self.scanline_cycles.saturating_add(cycles);

        self.window_ms += cycles as f64 * 1000.0 / self.clock_hz as f64;
        if self.window_ms >= self.threshold_ms {
            let ms = self.window_ms as u64;
            log::trace!(
                "accumulated {} cycles, delaying {} ms",
                self.window_cycles,
                ms
            );
            self.pacer.pause(ms);
            self.window_ms = 0.0;
            self.window_cycles = 0;
        }

        cycles
    }

    #[inline]
    pub fn clock_hz(&self) -> u32 {
        self.clock_hz
    }

    #[inline]
    pub fn cycles_per_ms(&self) -> u32 {
        self.cycles_per_ms
    }

    #[inline]
    pub fn cycles_per_scanline(&self) -> u32 {
        self.cycles_per_scanline
    }

    #[inline]
    pub fn threshold_ms(&self) -> f64 {
        self.threshold_ms
    }

    #[inline]
    pub fn total_cycles(&self) -> u64 {
        self.total_cycles
    }

    #[inline]
    pub fn window_cycles(&self) -> u64 {
        self.window_cycles
    }

    #[inline]
    pub fn window_ms(&self) -> f64 {
        self.window_ms
    }

    pub fn time_until_throttle_ms(&self) -> f64 {
        self.threshold_ms - self.window_ms
    }

    /// Cycles accumulated since the display collaborator last drained them.
    #[inline]
    pub fn scanline_cycles(&self) -> u32 {
        self.scanline_cycles
    }

    /// Consume one scanline's worth of cycles if available.
    pub fn consume_scanline(&mut self) -> bool {
        if self.cycles_per_scanline > 0 && self.scanline_cycles >= self.cycles_per_scanline {
            self.scanline_cycles -= self.cycles_per_scanline;
            true
        } else {
            false
        }
    }

    pub fn reset_scanline_cycles(&mut self) {
        self.scanline_cycles = 0;
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;
    use crate::{CGB_CPU_SPEED, GB_CPU_SPEED};

    #[derive(Clone, Default)]
    struct RecordingPacer(Rc<RefCell<Vec<u64>>>);

    impl Pacer for RecordingPacer {
        fn pause(&mut self, ms: u64) {
            self.0.borrow_mut().push(ms);
        }
    }

    #[test]
    fn derived_constants_follow_clock_speed() {
        let classic = CycleAccountant::new(GB_CPU_SPEED, 2.0, Box::new(NullPacer));
        assert_eq!(classic.cycles_per_ms(), 4194);
        assert_eq!(classic.cycles_per_scanline(), 455);

        let double = CycleAccountant::new(CGB_CPU_SPEED, 2.0, Box::new(NullPacer));
        assert_eq!(double.cycles_per_ms(), 8388);
        assert_eq!(double.cycles_per_scanline(), 911);
    }

    #[test]
    fn account_adds_one_cycle_per_call() {
        let mut timing = CycleAccountant::new(GB_CPU_SPEED, 2.0, Box::new(NullPacer));
        let nominal = [1u32, 3, 2, 4, 1, 6];
        let mut expected = 0u64;
        for &c in &nominal {
            assert_eq!(timing.account(c), c + 1);
            expected += (c + 1) as u64;
        }
        assert_eq!(timing.total_cycles(), expected);
        assert_eq!(timing.window_cycles(), expected);
        assert_eq!(timing.scanline_cycles(), expected as u32);
    }

    #[test]
    fn throttle_fires_once_and_resets_window() {
        let pacer = RecordingPacer::default();
        let pauses = pacer.0.clone();
        // 1 kHz: every accounted cycle is exactly one millisecond.
        let mut timing = CycleAccountant::new(1000, 5.0, Box::new(pacer));

        timing.account(1); // 2 ms
        assert!(pauses.borrow().is_empty());
        assert_eq!(timing.window_cycles(), 2);
        assert!((timing.time_until_throttle_ms() - 3.0).abs() < 1e-9);

        timing.account(4); // 7 ms total, crosses 5 ms
        assert_eq!(*pauses.borrow(), vec![7]);
        assert_eq!(timing.window_cycles(), 0);
        assert_eq!(timing.window_ms(), 0.0);
        assert_eq!(timing.total_cycles(), 7);

        timing.account(0); // 1 ms, below threshold again
        assert_eq!(pauses.borrow().len(), 1);
    }

    #[test]
    fn throttle_pause_is_floored() {
        let pacer = RecordingPacer::default();
        let pauses = pacer.0.clone();
        // 2 kHz: each accounted cycle is 0.5 ms.
        let mut timing = CycleAccountant::new(2000, 2.0, Box::new(pacer));

        timing.account(2); // 1.5 ms
        assert!(pauses.borrow().is_empty());
        timing.account(1); // 2.5 ms
        assert_eq!(*pauses.borrow(), vec![2]);
        assert_eq!(timing.window_cycles(), 0);
    }

    #[test]
    fn classic_speed_throttles_after_two_milliseconds() {
        let pacer = RecordingPacer::default();
        let pauses = pacer.0.clone();
        let mut timing = CycleAccountant::new(GB_CPU_SPEED, 2.0, Box::new(pacer));

        // 2 ms at 4.19 MHz is 8388.6 cycles; NOPs account 2 cycles each.
        for _ in 0..4194 {
            timing.account(1);
        }
        assert!(pauses.borrow().is_empty());
        timing.account(1);
        assert_eq!(*pauses.borrow(), vec![2]);
        assert_eq!(timing.total_cycles(), 8390);
    }

    #[test]
    fn scanline_counter_is_drained_by_consumer() {
        let mut timing = CycleAccountant::new(GB_CPU_SPEED, 2.0, Box::new(NullPacer));
        for _ in 0..100 {
            timing.account(4);
        }
        assert_eq!(timing.scanline_cycles(), 500);
        assert!(timing.consume_scanline());
        assert_eq!(timing.scanline_cycles(), 45);
        assert!(!timing.consume_scanline());
        timing.reset_scanline_cycles();
        assert_eq!(timing.scanline_cycles(), 0);
    }
}
