use super::dispatch::OPCODE_TABLE;
use super::{
    CycleAccountant, ExecState, InterruptRegisters, LogTracer, NullPacer, Pacer, Registers,
    SleepPacer, Tracer,
};
use crate::{Cpu, CpuConfig};

impl Default for Cpu {
    fn default() -> Self {
        Self::start(CpuConfig::default())
    }
}

impl Cpu {
    /// Bring the core up in its post-boot state.
    ///
    /// Selects the clock from `config`, derives the timing constants the
    /// display collaborator consumes, and installs a sleeping pacer when
    /// throttling is enabled.
    pub fn start(config: CpuConfig) -> Self {
        let pacer: Box<dyn Pacer> = if config.throttle {
            Box::new(SleepPacer)
        } else {
            Box::new(NullPacer)
        };
        Self::with_pacer(config, pacer)
    }

    /// Like [`start`](Self::start) but with a caller-provided pacer.
    pub fn with_pacer(config: CpuConfig, pacer: Box<dyn Pacer>) -> Self {
        lazy_static::initialize(&OPCODE_TABLE);

        let clock_hz = config.clock_speed.hz();
        let timing = CycleAccountant::new(clock_hz, config.throttle_threshold_ms, pacer);
        let tracer: Option<Box<dyn Tracer>> = if config.trace {
            Some(Box::new(LogTracer))
        } else {
            None
        };

        let mut cpu = Self {
            regs: Registers::default(),
            ime: false,
            halted: false,
            stopped: false,
            halt_bug: false,
            ei_countdown: 0,
            interrupts: InterruptRegisters::default(),
            state: ExecState::Running,
            timing,
            tracer,
        };
        cpu.apply_boot_state();

        log::info!(
            "[cpu] started with speed {} MHz",
            clock_hz as f64 / 1_000_000.0
        );
        log::info!("[cpu] cycles per ms = {}", cpu.timing.cycles_per_ms());
        log::info!(
            "[cpu] cycles per v-line refresh = {}",
            cpu.timing.cycles_per_scanline()
        );

        cpu
    }

    /// Return registers and control state to the post-boot values. Cycle
    /// counters are kept; they are lifetime totals.
    pub fn reset(&mut self) {
        self.halted = false;
        self.stopped = false;
        self.halt_bug = false;
        self.ei_countdown = 0;
        self.state = ExecState::Running;
        self.apply_boot_state();
    }

    /// Register values left behind by the boot ROM when it jumps to the
    /// cartridge entry point at 0x0100.
    fn apply_boot_state(&mut self) {
        self.regs.set_af(0x01B0);
        self.regs.set_bc(0x0013);
        self.regs.set_de(0x00D8);
        self.regs.set_hl(0x014D);
        self.regs.sp = 0xFFFE;
        self.regs.pc = 0x0100;

        self.ime = false;
        self.interrupts = InterruptRegisters::default();
    }
}
