//! Non-pipelined reference interpreter.
//!
//! Executes the assembled program one instruction per cycle, with the same
//! architectural semantics and fault taxonomy as the pipeline but none of its
//! timing. Useful as an oracle for the pipelined results.

use std::io::Write;

use crate::asm::Program;
use crate::core::mem::{DataMemory, MEM_WORDS};
use crate::core::reg_file::RegisterFile;
use crate::error::Fault;
use crate::isa::Instruction;
use crate::stats::SimStats;
use crate::trace;

pub struct Interp {
    pub regs: RegisterFile,
    pub mem: DataMemory,
    pub program: Program,
    pub pc: usize,
    pub stats: SimStats,
}

impl Interp {
    pub fn new(program: Program) -> Self {
        let mem = DataMemory::new(program.len());
        let stats = SimStats::new(program.len());
        Interp {
            regs: RegisterFile::new(),
            mem,
            program,
            pc: 0,
            stats,
        }
    }

    /// Runs to completion, emitting a register record per instruction.
    pub fn run<W: Write>(&mut self, out: &mut W) -> Result<(), Fault> {
        if self.program.len() >= MEM_WORDS {
            return Err(Fault::MemoryLimit);
        }

        while self.pc < self.program.len() {
            self.stats.cycles += 1;
            let inst = self.program.instructions[self.pc]?;
            let next = self.step(inst)?;
            self.stats.exec_counts[self.pc] += 1;
            self.pc = next;
            trace::register_record(out, self.stats.cycles, &self.regs).ok();
        }
        Ok(())
    }

    /// Executes one instruction and returns the next pc.
    fn step(&mut self, inst: Instruction) -> Result<usize, Fault> {
        let next = self.pc + 1;
        match inst {
            Instruction::Add { rd, rs, rt } => {
                let value = self.regs.read(rs).wrapping_add(self.regs.read(rt));
                self.regs.write(rd, value);
            }
            Instruction::Sub { rd, rs, rt } => {
                let value = self.regs.read(rs).wrapping_sub(self.regs.read(rt));
                self.regs.write(rd, value);
            }
            Instruction::Mul { rd, rs, rt } => {
                let value = self.regs.read(rs).wrapping_mul(self.regs.read(rt));
                self.regs.write(rd, value);
            }
            Instruction::Slt { rd, rs, rt } => {
                let value = (self.regs.read(rs) < self.regs.read(rt)) as i32;
                self.regs.write(rd, value);
            }
            Instruction::Addi { rt, rs, imm } => {
                let value = self.regs.read(rs).wrapping_add(imm);
                self.regs.write(rt, value);
            }
            Instruction::Lw { rt, base, offset } => {
                let addr = self.regs.read(base).wrapping_add(offset);
                let word = self.mem.resolve(addr)?;
                self.regs.write(rt, self.mem.load(word));
            }
            Instruction::Sw { rt, base, offset } => {
                let addr = self.regs.read(base).wrapping_add(offset);
                let word = self.mem.resolve(addr)?;
                self.mem.store(word, self.regs.read(rt));
            }
            Instruction::Beq { rs, rt, target } => {
                if self.regs.read(rs) == self.regs.read(rt) {
                    return Ok(target);
                }
            }
            Instruction::Bne { rs, rt, target } => {
                if self.regs.read(rs) != self.regs.read(rt) {
                    return Ok(target);
                }
            }
            Instruction::J { target } => return Ok(target),
        }
        Ok(next)
    }
}
