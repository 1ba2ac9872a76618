pub mod config;
pub mod cpu;
mod error;

pub use config::{ClockSpeed, CpuConfig};
pub use cpu::{
    Bus, Cpu, CycleAccountant, ExecState, FlatMemory, Flags, LogTracer, NullPacer, Pacer,
    RegisterPair, Registers, SleepPacer, TraceRecord, Tracer,
};
pub use error::{CpuFault, Result};

/// Classic (DMG) CPU clock in Hz.
pub const GB_CPU_SPEED: u32 = 4_194_304;
/// Double-speed (CGB) CPU clock in Hz.
pub const CGB_CPU_SPEED: u32 = 8_388_608;

/// Accumulated virtual time (ms) after which the throttle pauses.
pub const THROTTLE_THRESHOLD_MS: f64 = 2.0;

/// Duration of one display scanline in milliseconds (456 dots at 4.19 MHz).
pub const SCANLINE_TIME_MS: f64 = 0.108_718_872;
