//! Simulator fault taxonomy.
//!
//! Every abnormal condition the assembler or the pipeline can hit maps to one
//! of these faults, and every fault maps to a stable process exit code.

use thiserror::Error;

/// Fatal simulation fault.
///
/// Faults detected while decoding operands are stored in the assembled
/// program as deferred-error slots and only surface when the offending
/// instruction reaches the ID stage. Address faults are raised by the MEM
/// stage.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum Fault {
    /// A register operand did not resolve to one of the 32 registers.
    #[error("Invalid register provided or syntax error in providing register")]
    InvalidRegister,

    /// A branch or jump referenced a label that is undefined or poisoned by
    /// redefinition.
    #[error("Label used not defined or defined too many times")]
    InvalidLabel,

    /// A data address was unaligned, inside the instruction region, or past
    /// the end of memory.
    #[error("Unaligned or invalid memory address specified")]
    InvalidAddress,

    /// An unknown mnemonic or a malformed operand token.
    #[error("Syntax error encountered")]
    SyntaxError,

    /// The program itself does not fit in the modeled memory.
    #[error("Memory limit exceeded")]
    MemoryLimit,
}

impl Fault {
    /// Process exit code for this fault (0 is reserved for success).
    pub fn exit_code(self) -> i32 {
        match self {
            Fault::InvalidRegister => 1,
            Fault::InvalidLabel => 2,
            Fault::InvalidAddress => 3,
            Fault::SyntaxError => 4,
            Fault::MemoryLimit => 5,
        }
    }
}
