//! Trace emission.
//!
//! The per-cycle records the engine writes to its output sink, and the
//! end-of-run report. The formats are fixed: registers print in lowercase
//! hexadecimal, the memory log and addresses in decimal, every value followed
//! by a single space.

use std::io::{self, Write};

use crate::asm::Program;
use crate::core::{DataMemory, RegisterFile};
use crate::error::Fault;
use crate::stats::SimStats;

/// One pipeline cycle record: cycle header, register snapshot, and the
/// cumulative modified-memory log.
pub fn cycle_record<W: Write>(
    out: &mut W,
    cycle: u64,
    regs: &RegisterFile,
    mem_log: &[(usize, i32)],
) -> io::Result<()> {
    register_record(out, cycle, regs)?;
    write!(out, "{} ", mem_log.len())?;
    for (addr, value) in mem_log {
        write!(out, "{} {} ", addr, value)?;
    }
    writeln!(out)
}

/// Cycle header plus register snapshot (the interpreter emits only this).
pub fn register_record<W: Write>(out: &mut W, cycle: u64, regs: &RegisterFile) -> io::Result<()> {
    writeln!(out, "Cycle number: {}", cycle)?;
    for value in regs.dump() {
        write!(out, "{:x} ", value)?;
    }
    writeln!(out)
}

/// The end-of-run report: fault diagnostics to stderr, then the non-zero
/// memory listing, cycle total, and per-instruction execution counts.
pub fn final_report<W: Write>(
    out: &mut W,
    fault: Option<Fault>,
    program: &Program,
    mem: &DataMemory,
    stats: &SimStats,
    error_pc: usize,
) -> io::Result<()> {
    writeln!(out)?;
    if let Some(fault) = fault {
        eprintln!("{}", fault);
        eprintln!("Error encountered at:");
        if let Some(tokens) = program.commands.get(error_pc) {
            let mut line = String::new();
            for token in tokens {
                line.push_str(token);
                line.push(' ');
            }
            eprintln!("{}", line);
        }
    }

    writeln!(out, "\nFollowing are the non-zero data values:")?;
    for (word, value) in mem.nonzero_words() {
        writeln!(out, "{}-{}: {:x}", 4 * word, 4 * word + 3, value)?;
    }
    writeln!(out, "\nTotal number of cycles: {}", stats.cycles)?;
    writeln!(out, "Count of instructions executed:")?;
    for (index, tokens) in program.commands.iter().enumerate() {
        write!(out, "{} times:\t", stats.exec_counts[index])?;
        for token in tokens {
            write!(out, "{} ", token)?;
        }
        writeln!(out)?;
    }
    Ok(())
}
