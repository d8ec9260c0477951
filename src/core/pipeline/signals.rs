//! Pipeline control signals.
//!
//! All control bits an instruction needs downstream of ID are generated once,
//! during decode, and travel with the instruction inside its latch. No signal
//! is global.

/// ALU operation selector.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AluOp {
    /// Integer addition (also computes lw/sw addresses).
    #[default]
    Add,
    /// Integer subtraction.
    Sub,
    /// Integer multiplication (wrapping 32-bit).
    Mul,
    /// Set-less-than (signed), producing 0 or 1.
    Slt,
}

/// Conditional branch kind resolved by the EX comparison.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum BranchKind {
    /// Not a branch.
    #[default]
    None,
    /// Taken when the operands compare equal (`beq`).
    Eq,
    /// Taken when the operands compare unequal (`bne`).
    Ne,
}

/// Control signals for the EX, MEM and WB stages.
///
/// Written by ID, read-only afterwards.
#[derive(Clone, Copy, Debug, Default)]
pub struct ControlSignals {
    /// Write the WB value to the destination register.
    pub reg_write: bool,
    /// Load a word from data memory in MEM.
    pub mem_read: bool,
    /// Store a word to data memory in MEM.
    pub mem_write: bool,
    /// Select the memory-read value (instead of the ALU result) at WB.
    pub mem_to_reg: bool,
    /// Select the immediate (instead of the second register value) as the
    /// second ALU operand.
    pub alu_src: bool,
    /// ALU operation to perform.
    pub alu: AluOp,
    /// Branch comparison kind, [`BranchKind::None`] for non-branches.
    pub branch: BranchKind,
}
