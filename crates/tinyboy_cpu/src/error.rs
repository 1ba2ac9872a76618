use thiserror::Error;

pub type Result<T> = std::result::Result<T, CpuFault>;

/// Fatal conditions raised by the instruction core.
///
/// Neither variant is recoverable: the driver dumps the CPU state and parks
/// itself in [`ExecState::Faulted`](crate::ExecState::Faulted).
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum CpuFault {
    #[error("undefined opcode {opcode:02X} at PC=0x{pc:04X} (followed by {next:02X?})")]
    UndefinedOpcode { opcode: u8, pc: u16, next: [u8; 2] },

    #[error("invalid {width}-bit register index {index}")]
    InvalidRegister { index: u8, width: u8 },
}
