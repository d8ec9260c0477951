//! Command decoding: tokenized commands to tagged instruction variants.

use std::collections::HashMap;

use crate::error::Fault;
use crate::isa::{reg, Instruction, MNEMONICS};

/// Decodes one padded command. Errors are returned, not raised: the caller
/// stores them as deferred-error slots.
pub(crate) fn decode(
    tokens: &[String],
    labels: &HashMap<String, isize>,
) -> Result<Instruction, Fault> {
    let op = tokens[0].as_str();
    match op {
        "add" | "sub" | "mul" | "slt" => {
            let rd = register(&tokens[1])?;
            let rs = register(&tokens[2])?;
            let rt = register(&tokens[3])?;
            Ok(match op {
                "add" => Instruction::Add { rd, rs, rt },
                "sub" => Instruction::Sub { rd, rs, rt },
                "mul" => Instruction::Mul { rd, rs, rt },
                _ => Instruction::Slt { rd, rs, rt },
            })
        }
        "addi" => {
            let rt = register(&tokens[1])?;
            let rs = register(&tokens[2])?;
            let imm = tokens[3].parse::<i32>().map_err(|_| Fault::SyntaxError)?;
            Ok(Instruction::Addi { rt, rs, imm })
        }
        "lw" | "sw" => {
            let rt = register(&tokens[1])?;
            let (base, offset) = memory_operand(&tokens[2])?;
            Ok(if op == "lw" {
                Instruction::Lw { rt, base, offset }
            } else {
                Instruction::Sw { rt, base, offset }
            })
        }
        "beq" | "bne" => {
            let target = label_target(&tokens[3], labels)?;
            let rs = register(&tokens[1])?;
            let rt = register(&tokens[2])?;
            Ok(if op == "beq" {
                Instruction::Beq { rs, rt, target }
            } else {
                Instruction::Bne { rs, rt, target }
            })
        }
        "j" => {
            let target = label_target(&tokens[1], labels)?;
            Ok(Instruction::J { target })
        }
        _ => Err(Fault::SyntaxError),
    }
}

fn register(token: &str) -> Result<usize, Fault> {
    reg::lookup(token).ok_or(Fault::InvalidRegister)
}

/// Parses a `lw`/`sw` address operand.
///
/// The usual form is `offset(base)` with an optional signed decimal offset.
/// A bare decimal integer is an absolute address: it decodes as an offset
/// from `$zero`, which reads identically.
fn memory_operand(token: &str) -> Result<(usize, i32), Fault> {
    match token.find('(') {
        Some(open) => {
            let inner = token[open + 1..]
                .strip_suffix(')')
                .ok_or(Fault::SyntaxError)?;
            let offset = if open == 0 {
                0
            } else {
                token[..open].parse::<i32>().map_err(|_| Fault::SyntaxError)?
            };
            let base = register(inner)?;
            Ok((base, offset))
        }
        None => {
            let offset = token.parse::<i32>().map_err(|_| Fault::SyntaxError)?;
            Ok((reg::ZERO, offset))
        }
    }
}

/// Validates a label reference token and resolves it to an instruction index.
///
/// Malformed names are syntax errors; well-formed names that are undefined or
/// poisoned are label errors. The order matters and is observable in the exit
/// code.
fn label_target(token: &str, labels: &HashMap<String, isize>) -> Result<usize, Fault> {
    if !valid_label_name(token) {
        return Err(Fault::SyntaxError);
    }
    match labels.get(token) {
        Some(&pc) if pc >= 0 => Ok(pc as usize),
        _ => Err(Fault::InvalidLabel),
    }
}

/// A usable label name: leading ASCII letter, alphanumeric throughout, and
/// not shadowing a mnemonic.
pub fn valid_label_name(name: &str) -> bool {
    let mut chars = name.chars();
    let leading = match chars.next() {
        Some(c) => c.is_ascii_alphabetic(),
        None => false,
    };
    leading && chars.all(|c| c.is_ascii_alphanumeric()) && !MNEMONICS.contains(&name)
}
