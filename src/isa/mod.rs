//! Instruction Set Architecture definitions.
//!
//! The simulated subset of MIPS32: ten integer opcodes, decoded once at
//! assembly time into a closed tagged variant. Stages dispatch by matching on
//! the variant instead of re-parsing mnemonics in the hot loop.

/// Register name resolution.
pub mod reg;

/// The recognized mnemonics, in no particular order.
///
/// Label names are not allowed to collide with these.
pub const MNEMONICS: [&str; 10] = [
    "add", "sub", "mul", "slt", "addi", "lw", "sw", "beq", "bne", "j",
];

/// A decoded MIPS instruction.
///
/// Register fields are canonical indices in `0..32`. Branch and jump targets
/// are instruction indices, already resolved from the label map; instructions
/// whose label did not resolve never construct one of these (they assemble
/// into deferred-error slots instead).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Instruction {
    Add { rd: usize, rs: usize, rt: usize },
    Sub { rd: usize, rs: usize, rt: usize },
    Mul { rd: usize, rs: usize, rt: usize },
    Slt { rd: usize, rs: usize, rt: usize },
    Addi { rt: usize, rs: usize, imm: i32 },
    Lw { rt: usize, base: usize, offset: i32 },
    Sw { rt: usize, base: usize, offset: i32 },
    Beq { rs: usize, rt: usize, target: usize },
    Bne { rs: usize, rt: usize, target: usize },
    J { target: usize },
}
