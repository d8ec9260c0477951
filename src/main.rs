//! MIPS32 Pipeline Simulator CLI.
//!
//! Assembles the given source file and runs it through the five-stage
//! pipeline (or, with `--unpipelined`, the reference interpreter), printing
//! the per-cycle records to stdout and the end-of-run report on exit.

use clap::Parser;
use std::io::{self, Write};
use std::{fs, process};

use mipsim::asm::{self, Program};
use mipsim::config::Config;
use mipsim::core::{Cpu, DataMemory};
use mipsim::error::Fault;
use mipsim::interp::Interp;
use mipsim::stats::SimStats;
use mipsim::trace;

/// Command-line arguments for the pipeline simulator.
#[derive(Parser, Debug)]
#[command(author, version, about = "MIPS32 five-stage pipeline simulator")]
struct Args {
    /// Assembly source file.
    file: String,

    /// TOML configuration file (defaults apply when omitted).
    #[arg(short, long)]
    config: Option<String>,

    /// Emit a stage-by-stage trace to stderr.
    #[arg(long)]
    trace: bool,

    /// Execute with the non-pipelined reference interpreter instead of the
    /// pipeline.
    #[arg(long)]
    unpipelined: bool,
}

fn main() {
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => {
            let content = fs::read_to_string(path).expect("Failed to read config");
            toml::from_str(&content).expect("Failed to parse config")
        }
        None => Config::default(),
    };
    if args.trace {
        config.general.trace_stages = true;
    }

    let source = match fs::read_to_string(&args.file) {
        Ok(source) => source,
        Err(err) => {
            eprintln!("Error: cannot read {}: {}", args.file, err);
            process::exit(1);
        }
    };

    let program = asm::assemble(&source);

    let stdout = io::stdout();
    let mut out = stdout.lock();

    if args.unpipelined {
        let mut sim = Interp::new(program);
        let result = if config.output.cycle_records {
            sim.run(&mut out)
        } else {
            sim.run(&mut io::sink())
        };
        finish(
            &mut out,
            &config,
            result,
            &sim.program,
            &sim.mem,
            &sim.stats,
            sim.pc,
        );
    } else {
        let mut cpu = Cpu::new(program, &config);
        let result = if config.output.cycle_records {
            cpu.run(&mut out)
        } else {
            cpu.run(&mut io::sink())
        };
        finish(
            &mut out,
            &config,
            result,
            &cpu.program,
            &cpu.mem,
            &cpu.stats,
            cpu.pc,
        );
    }
}

/// Prints the end-of-run report and exits with the mapped code.
fn finish<W: Write>(
    out: &mut W,
    config: &Config,
    result: Result<(), Fault>,
    program: &Program,
    mem: &DataMemory,
    stats: &SimStats,
    pc: usize,
) -> ! {
    let fault = result.err();
    if config.output.final_report {
        trace::final_report(out, fault, program, mem, stats, pc).ok();
    }
    out.flush().ok();
    process::exit(fault.map_or(0, Fault::exit_code));
}
