//! Instruction pipeline plumbing.
//!
//! This module contains the inter-stage latches of the five-stage pipeline
//! (IF/ID, ID/EX, EX/MEM, MEM/WB), the control signals generated during
//! decode, and the write-pending vector used for RAW hazard detection.

/// RAW hazard tracking via the per-register write-pending vector.
pub mod hazards;

/// Inter-stage pipeline latches (IF/ID, ID/EX, EX/MEM, MEM/WB).
pub mod latches;

/// Control signals generated during instruction decode.
pub mod signals;

pub use hazards::PendingWrites;
pub use latches::{ExMem, IdEx, IfId, MemWb};
pub use signals::{AluOp, BranchKind, ControlSignals};
