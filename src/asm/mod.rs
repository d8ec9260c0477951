//! Assembler front end.
//!
//! Turns assembly source text into an [`Program`]: a first pass strips
//! comments, tokenizes each line and builds the label table, a second pass
//! decodes every tokenized command into an [`Instruction`]. Decoding never
//! aborts assembly: malformed commands become deferred-error slots that fault
//! only when the pipeline actually reaches them.

use std::collections::HashMap;

use crate::error::Fault;
use crate::isa::Instruction;

mod decode;

pub use decode::valid_label_name;

/// Sentinel stored in the label map for a label defined more than once.
pub const POISONED: isize = -1;

/// Number of token slots a command is padded to (mnemonic + three operands).
const COMMAND_SLOTS: usize = 4;

/// An assembled program, ready for the pipeline.
#[derive(Debug, Default)]
pub struct Program {
    /// Decoded instructions, index-aligned with `commands`. An `Err` slot is
    /// a command that did not decode; it faults when it reaches ID.
    pub instructions: Vec<Result<Instruction, Fault>>,
    /// Label name to instruction index, [`POISONED`] on redefinition.
    pub labels: HashMap<String, isize>,
    /// Source tokens per instruction, padded to exactly four slots. Kept for
    /// diagnostics and the per-instruction execution report.
    pub commands: Vec<Vec<String>>,
}

impl Program {
    pub fn len(&self) -> usize {
        self.instructions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }
}

/// Assembles source text into a [`Program`].
pub fn assemble(source: &str) -> Program {
    let mut labels = HashMap::new();
    let mut commands = Vec::new();

    for line in source.lines() {
        parse_line(line, &mut labels, &mut commands);
    }

    let instructions = commands
        .iter()
        .map(|command| decode::decode(command, &labels))
        .collect();

    Program {
        instructions,
        labels,
        commands,
    }
}

/// Tokenizes one source line, registering at most one label definition and
/// appending at most one command.
fn parse_line(line: &str, labels: &mut HashMap<String, isize>, commands: &mut Vec<Vec<String>>) {
    let code = line.split('#').next().unwrap_or("");
    let mut tokens: Vec<String> = code
        .split([',', ' ', '\t'])
        .filter(|t| !t.is_empty())
        .map(str::to_owned)
        .collect();

    if tokens.is_empty() {
        return;
    }

    if tokens.len() == 1 {
        if let Some(name) = tokens[0].strip_suffix(':') {
            register_label(labels, name, commands.len());
        }
        return;
    }

    if tokens[0].ends_with(':') {
        let name = tokens[0][..tokens[0].len() - 1].to_owned();
        register_label(labels, &name, commands.len());
        tokens.remove(0);
    } else if let Some(colon) = tokens[0].find(':') {
        let name = tokens[0][..colon].to_owned();
        register_label(labels, &name, commands.len());
        tokens[0] = tokens[0][colon + 1..].to_owned();
    } else if tokens[1].starts_with(':') {
        register_label(labels, &tokens[0].clone(), commands.len());
        tokens[1] = tokens[1][1..].to_owned();
        if tokens[1].is_empty() {
            tokens.drain(0..2);
        } else {
            tokens.remove(0);
        }
    }

    if tokens.is_empty() {
        return;
    }

    // Extra operands fold into the third slot; short commands pad with "".
    if tokens.len() > COMMAND_SLOTS {
        let extra = tokens.split_off(COMMAND_SLOTS).join(" ");
        tokens[COMMAND_SLOTS - 1] = format!("{} {}", tokens[COMMAND_SLOTS - 1], extra);
    }
    tokens.resize(COMMAND_SLOTS, String::new());
    commands.push(tokens);
}

fn register_label(labels: &mut HashMap<String, isize>, name: &str, pc: usize) {
    labels
        .entry(name.to_owned())
        .and_modify(|slot| *slot = POISONED)
        .or_insert(pc as isize);
}
