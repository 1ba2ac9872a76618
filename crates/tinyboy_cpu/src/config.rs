use typed_builder::TypedBuilder;

use crate::{CGB_CPU_SPEED, GB_CPU_SPEED, THROTTLE_THRESHOLD_MS};

/// CPU clock selection, fixed for the lifetime of a [`Cpu`](crate::Cpu).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ClockSpeed {
    /// DMG clock (4.19 MHz).
    #[default]
    Classic,
    /// CGB double-speed clock (8.39 MHz).
    DoubleSpeed,
}

impl ClockSpeed {
    pub fn from_double_speed(double_speed: bool) -> Self {
        if double_speed {
            ClockSpeed::DoubleSpeed
        } else {
            ClockSpeed::Classic
        }
    }

    #[inline]
    pub fn hz(self) -> u32 {
        match self {
            ClockSpeed::Classic => GB_CPU_SPEED,
            ClockSpeed::DoubleSpeed => CGB_CPU_SPEED,
        }
    }
}

/// Startup options for the instruction core.
#[derive(Clone, Debug, TypedBuilder)]
pub struct CpuConfig {
    #[builder(default)]
    pub clock_speed: ClockSpeed,
    /// Pause the calling thread so emulated time never outruns real time.
    #[builder(default = true)]
    pub throttle: bool,
    #[builder(default = THROTTLE_THRESHOLD_MS)]
    pub throttle_threshold_ms: f64,
    /// Attach a [`LogTracer`](crate::LogTracer) that logs every instruction.
    #[builder(default = false)]
    pub trace: bool,
}

impl Default for CpuConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}
