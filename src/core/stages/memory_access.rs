use crate::core::pipeline::{BranchKind, MemWb};
use crate::core::Cpu;
use crate::error::Fault;

pub fn mem_stage(cpu: &mut Cpu) -> Result<(), Fault> {
    let Some(ex) = cpu.ex_mem.take() else {
        return Ok(());
    };

    if ex.ctrl.branch != BranchKind::None {
        // Branch resolution: unfreeze fetch, and redirect it if taken.
        cpu.halt_fetch = false;
        if ex.zero {
            cpu.pc_src = Some(ex.branch_target);
            if cpu.trace {
                eprintln!("MEM pc={} branch taken -> {}", ex.pc, ex.branch_target);
            }
        }
    }

    let mut mem_data = 0;
    if ex.ctrl.mem_read {
        let word = cpu.mem.resolve(ex.alu)?;
        mem_data = cpu.mem.load(word);
        if cpu.trace {
            eprintln!("MEM pc={} load [{}] = {}", ex.pc, ex.alu, mem_data);
        }
    }
    if ex.ctrl.mem_write {
        let word = cpu.mem.resolve(ex.alu)?;
        // Store data is read from the register file at MEM time; any
        // earlier writer has already retired because WB runs first.
        let value = cpu.regs.read(ex.store_reg);
        cpu.mem.store(word, value);
        cpu.mem_log.push((word, value));
        if cpu.trace {
            eprintln!("MEM pc={} store [{}] = {}", ex.pc, ex.alu, value);
        }
    }

    cpu.mem_wb = Some(MemWb {
        pc: ex.pc,
        alu: ex.alu,
        mem_data,
        dest: ex.dest,
        ctrl: ex.ctrl,
    });
    Ok(())
}
