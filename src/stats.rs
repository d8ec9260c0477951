//! Simulation statistics.
//!
//! Cycle and stall counters plus the per-instruction execution counts that
//! feed the end-of-run report.

/// Counters collected over one simulation run.
#[derive(Debug, Default)]
pub struct SimStats {
    /// Total clock cycles (one per pass through all five stages).
    pub cycles: u64,
    /// How many times each instruction index entered the pipeline.
    pub exec_counts: Vec<u64>,
    /// Cycles lost to RAW hazard stalls in ID.
    pub stalls_data: u64,
    /// Cycles fetch spent frozen behind unresolved branches.
    pub stalls_control: u64,
}

impl SimStats {
    pub fn new(program_len: usize) -> Self {
        SimStats {
            exec_counts: vec![0; program_len],
            ..Default::default()
        }
    }
}
