//! MIPS32 Five-Stage Pipeline Simulator Library.
//!
//! This crate implements a cycle-accurate simulator for a subset of the
//! MIPS32 integer instruction set. It assembles source text into an internal
//! instruction vector, then drives it through a classic five-stage in-order
//! pipeline (Fetch, Decode, Execute, Memory, Writeback), emitting per-cycle
//! register snapshots and a modified-memory log.
//!
//! # Architecture
//!
//! * **Pipeline**: five in-order stages with inter-stage latches, executed in
//!   reverse order each cycle; RAW hazards stall in ID (no forwarding);
//!   branches resolve at MEM without speculation; jumps resolve at ID.
//! * **Memory**: 2^18 signed words, word-addressed, with the low byte range
//!   reserved for the instruction region.
//! * **Assembler**: comment stripping, comma/whitespace tokenization, label
//!   table with lazy reference validation.
//!
//! # Modules
//!
//! * `asm`: assembler front end producing the instruction vector.
//! * `config`: TOML configuration loading.
//! * `core`: the pipeline engine and architectural state.
//! * `error`: fault taxonomy and exit codes.
//! * `interp`: non-pipelined reference interpreter.
//! * `isa`: instruction and register definitions.
//! * `stats`: cycle, stall and execution counters.
//! * `trace`: per-cycle records and the end-of-run report.

/// Assembler front end producing the instruction vector.
pub mod asm;

/// Configuration loading and parsing.
pub mod config;

/// CPU core implementation: pipeline stages, latches, architectural state.
pub mod core;

/// Fault taxonomy and process exit codes.
pub mod error;

/// Non-pipelined reference interpreter.
pub mod interp;

/// Instruction Set Architecture definitions.
pub mod isa;

/// Simulation statistics collection.
pub mod stats;

/// Per-cycle trace records and the end-of-run report.
pub mod trace;
