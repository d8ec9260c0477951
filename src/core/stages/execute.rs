use crate::core::pipeline::{AluOp, BranchKind, ExMem};
use crate::core::Cpu;

pub fn ex_stage(cpu: &mut Cpu) {
    let Some(id) = cpu.id_ex.take() else {
        return;
    };

    let (alu, branch_target, zero) = if id.ctrl.branch != BranchKind::None {
        // The offset was precomputed at ID as labelPC - pc_next, so the
        // target is a plain add.
        let target = (id.pc_next as i64 + id.imm as i64) as usize;
        let zero = match id.ctrl.branch {
            BranchKind::Eq => id.data1 == id.data2,
            BranchKind::Ne => id.data1 != id.data2,
            BranchKind::None => false,
        };
        (0, target, zero)
    } else {
        let a = id.data1;
        let b = if id.ctrl.alu_src { id.imm } else { id.data2 };
        let alu = match id.ctrl.alu {
            AluOp::Add => a.wrapping_add(b),
            AluOp::Sub => a.wrapping_sub(b),
            AluOp::Mul => a.wrapping_mul(b),
            AluOp::Slt => (a < b) as i32,
        };
        (alu, 0, false)
    };

    if cpu.trace {
        eprintln!("EX  pc={} alu={}", id.pc, alu);
    }

    cpu.ex_mem = Some(ExMem {
        pc: id.pc,
        alu,
        branch_target,
        zero,
        store_reg: id.store_reg,
        dest: id.dest,
        ctrl: id.ctrl,
    });
}
