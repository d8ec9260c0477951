//! Pipeline latch structures for inter-stage communication.
//!
//! Each latch holds the state one instruction carries into the next stage.
//! The stages run in reverse order within a cycle, so every latch is consumed
//! by its reader before its writer refills it; an empty slot (`None` at the
//! `Cpu` level) is a bubble.

use crate::core::pipeline::signals::ControlSignals;

/// IF/ID latch entry (Fetch to Decode).
///
/// Fetch hands decode nothing but the instruction index; the decoded program
/// lives in the `Cpu` and is looked up at ID.
#[derive(Clone, Copy, Debug)]
pub struct IfId {
    /// Instruction index of the fetched instruction.
    pub pc: usize,
}

/// ID/EX latch entry (Decode to Execute).
#[derive(Clone, Copy, Debug)]
pub struct IdEx {
    /// Instruction index, for tracing.
    pub pc: usize,
    /// First ALU operand, read from the register file at ID.
    pub data1: i32,
    /// Second register operand (R-type and branches).
    pub data2: i32,
    /// Immediate: the addi constant, the lw/sw offset, or the precomputed
    /// branch offset `labelPC - (pc + 1)`.
    pub imm: i32,
    /// Successor of the instruction's own PC; branch targets are computed as
    /// `pc_next + imm` at EX.
    pub pc_next: usize,
    /// Hazard destination register, if any. For stores this names rt even
    /// though no register write happens; the pending bit it holds is released
    /// when the store retires at WB.
    pub dest: Option<usize>,
    /// Register whose value a store reads at MEM time.
    pub store_reg: usize,
    /// Control signals for the downstream stages.
    pub ctrl: ControlSignals,
}

/// EX/MEM latch entry (Execute to Memory).
#[derive(Clone, Copy, Debug)]
pub struct ExMem {
    /// Instruction index, for tracing.
    pub pc: usize,
    /// ALU result; for lw/sw this is the byte address.
    pub alu: i32,
    /// Branch target instruction index captured at EX.
    pub branch_target: usize,
    /// Branch condition outcome ("zero" flag): true means taken.
    pub zero: bool,
    /// Register whose value a store reads at MEM time.
    pub store_reg: usize,
    /// Hazard destination register, if any.
    pub dest: Option<usize>,
    /// Control signals for MEM and WB.
    pub ctrl: ControlSignals,
}

/// MEM/WB latch entry (Memory to Writeback).
#[derive(Clone, Copy, Debug)]
pub struct MemWb {
    /// Instruction index, for tracing.
    pub pc: usize,
    /// ALU result.
    pub alu: i32,
    /// Word loaded from data memory, selected by MemToReg.
    pub mem_data: i32,
    /// Hazard destination register, if any. WB releases its pending bit even
    /// when RegWrite is clear.
    pub dest: Option<usize>,
    /// Control signals for WB.
    pub ctrl: ControlSignals,
}
