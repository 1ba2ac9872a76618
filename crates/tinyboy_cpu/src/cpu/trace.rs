use super::{Handler, Registers};

/// One executed instruction, reported after it retired.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TraceRecord {
    /// Address the opcode was fetched from.
    pub pc: u16,
    pub opcode: u8,
    pub handler: Handler,
    /// Cycles accounted for this instruction.
    pub cycles: u32,
    pub total_cycles: u64,
    /// Register file after execution.
    pub regs: Registers,
}

/// Per-instruction observer installed on the core.
pub trait Tracer {
    fn trace(&mut self, record: &TraceRecord);
}

/// Writes one `trace`-level log line per instruction.
#[derive(Clone, Copy, Debug, Default)]
pub struct LogTracer;

impl Tracer for LogTracer {
    fn trace(&mut self, record: &TraceRecord) {
        let regs = &record.regs;
        log::trace!(
            "{:04X}: {:02X} {:<12} +{} AF={:04X} BC={:04X} DE={:04X} HL={:04X} SP={:04X} cyc={}",
            record.pc,
            record.opcode,
            format!("{:?}", record.handler),
            record.cycles,
            regs.af(),
            regs.bc(),
            regs.de(),
            regs.hl(),
            regs.sp,
            record.total_cycles
        );
    }
}
