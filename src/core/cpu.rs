//! The pipeline driver.

use std::io::Write;

use crate::asm::Program;
use crate::config::Config;
use crate::core::mem::{DataMemory, MEM_WORDS};
use crate::core::pipeline::{ExMem, IdEx, IfId, MemWb, PendingWrites};
use crate::core::reg_file::RegisterFile;
use crate::core::stages;
use crate::error::Fault;
use crate::stats::SimStats;
use crate::trace;

/// The simulated processor: architectural state, program, latches, and the
/// control flags the stages communicate through.
pub struct Cpu {
    pub regs: RegisterFile,
    pub mem: DataMemory,
    pub program: Program,

    /// Address of the instruction currently entering IF.
    pub pc: usize,
    /// Precomputed successor of `pc`.
    pub pc_next: usize,

    pub if_id: Option<IfId>,
    pub id_ex: Option<IdEx>,
    pub ex_mem: Option<ExMem>,
    pub mem_wb: Option<MemWb>,

    /// Per-register write-pending bits for RAW hazard detection.
    pub pending: PendingWrites,
    /// Branch redirect target asserted by MEM, consumed by IF in the same
    /// cycle.
    pub pc_src: Option<usize>,
    /// Fetch freeze while a branch is unresolved.
    pub halt_fetch: bool,
    /// Set by ID when it stalls this cycle; keeps IF from advancing.
    pub stalled: bool,

    /// Cumulative (word address, value) log of every store, in order.
    pub mem_log: Vec<(usize, i32)>,

    pub stats: SimStats,
    /// Stage-by-stage trace to stderr.
    pub trace: bool,
}

impl Cpu {
    pub fn new(program: Program, config: &Config) -> Self {
        let mem = DataMemory::new(program.len());
        let stats = SimStats::new(program.len());
        Cpu {
            regs: RegisterFile::new(),
            mem,
            program,
            pc: 0,
            pc_next: 0,
            if_id: None,
            id_ex: None,
            ex_mem: None,
            mem_wb: None,
            pending: PendingWrites::new(),
            pc_src: None,
            halt_fetch: false,
            stalled: false,
            mem_log: Vec::new(),
            stats,
            trace: config.general.trace_stages,
        }
    }

    /// Executes one clock cycle: all five stages in reverse order, so each
    /// latch is consumed before it is refilled.
    pub fn tick(&mut self) -> Result<(), Fault> {
        self.stats.cycles += 1;
        self.stalled = false;

        stages::write_back::wb_stage(self);
        stages::memory_access::mem_stage(self)?;
        stages::execute::ex_stage(self);
        stages::decode::id_stage(self)?;
        stages::fetch::if_stage(self);

        Ok(())
    }

    /// Runs the program to completion, emitting one trace record per cycle.
    ///
    /// Returns the first fault encountered; in-flight instructions are
    /// abandoned at that point.
    pub fn run<W: Write>(&mut self, out: &mut W) -> Result<(), Fault> {
        if self.program.len() >= MEM_WORDS {
            return Err(Fault::MemoryLimit);
        }

        loop {
            self.tick()?;
            trace::cycle_record(out, self.stats.cycles, &self.regs, &self.mem_log).ok();
            if self.drained() {
                return Ok(());
            }
        }
    }

    /// True once every latch is empty and there is nothing left to fetch.
    pub fn drained(&self) -> bool {
        self.if_id.is_none()
            && self.id_ex.is_none()
            && self.ex_mem.is_none()
            && self.mem_wb.is_none()
            && self.pc >= self.program.len()
    }
}
