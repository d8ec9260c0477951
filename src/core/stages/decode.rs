use crate::core::pipeline::{AluOp, BranchKind, ControlSignals, IdEx};
use crate::core::Cpu;
use crate::error::Fault;
use crate::isa::Instruction;

pub fn id_stage(cpu: &mut Cpu) -> Result<(), Fault> {
    let Some(if_id) = cpu.if_id else {
        return Ok(());
    };
    let pc = if_id.pc;

    // Commands that failed to decode fault here, when they are reached.
    let inst = cpu.program.instructions[pc]?;

    let hazard = match inst {
        Instruction::Add { rs, rt, .. }
        | Instruction::Sub { rs, rt, .. }
        | Instruction::Mul { rs, rt, .. }
        | Instruction::Slt { rs, rt, .. }
        | Instruction::Beq { rs, rt, .. }
        | Instruction::Bne { rs, rt, .. } => cpu.pending.any(&[rs, rt]),
        Instruction::Addi { rs, .. } => cpu.pending.any(&[rs]),
        Instruction::Lw { base, .. } | Instruction::Sw { base, .. } => cpu.pending.any(&[base]),
        Instruction::J { .. } => false,
    };

    if hazard {
        // Leave IF/ID alone; EX already drained ID/EX, so the bubble is the
        // empty slot we do not refill.
        cpu.stalled = true;
        cpu.stats.stalls_data += 1;
        if cpu.trace {
            eprintln!("ID  pc={} stall", pc);
        }
        return Ok(());
    }

    let latch = match inst {
        Instruction::Add { rd, rs, rt } => r_type(cpu, pc, rd, rs, rt, AluOp::Add),
        Instruction::Sub { rd, rs, rt } => r_type(cpu, pc, rd, rs, rt, AluOp::Sub),
        Instruction::Mul { rd, rs, rt } => r_type(cpu, pc, rd, rs, rt, AluOp::Mul),
        Instruction::Slt { rd, rs, rt } => r_type(cpu, pc, rd, rs, rt, AluOp::Slt),
        Instruction::Addi { rt, rs, imm } => {
            cpu.pending.set(rt);
            IdEx {
                pc,
                data1: cpu.regs.read(rs),
                data2: 0,
                imm,
                pc_next: pc + 1,
                dest: Some(rt),
                store_reg: 0,
                ctrl: ControlSignals {
                    reg_write: true,
                    alu_src: true,
                    ..Default::default()
                },
            }
        }
        Instruction::Lw { rt, base, offset } => {
            cpu.pending.set(rt);
            IdEx {
                pc,
                data1: cpu.regs.read(base),
                data2: 0,
                imm: offset,
                pc_next: pc + 1,
                dest: Some(rt),
                store_reg: 0,
                ctrl: ControlSignals {
                    reg_write: true,
                    mem_read: true,
                    mem_to_reg: true,
                    alu_src: true,
                    ..Default::default()
                },
            }
        }
        Instruction::Sw { rt, base, offset } => {
            // rt is only read (at MEM time), but marking it write-pending
            // keeps later readers ordered behind the store conservatively.
            cpu.pending.set(rt);
            IdEx {
                pc,
                data1: cpu.regs.read(base),
                data2: 0,
                imm: offset,
                pc_next: pc + 1,
                dest: Some(rt),
                store_reg: rt,
                ctrl: ControlSignals {
                    mem_write: true,
                    alu_src: true,
                    ..Default::default()
                },
            }
        }
        Instruction::Beq { rs, rt, target } => branch(cpu, pc, rs, rt, target, BranchKind::Eq),
        Instruction::Bne { rs, rt, target } => branch(cpu, pc, rs, rt, target, BranchKind::Ne),
        Instruction::J { target } => {
            // Jumps resolve here: redirect fetch and drop out of the
            // pipeline, no downstream work.
            if cpu.trace {
                eprintln!("ID  pc={} jump -> {}", pc, target);
            }
            cpu.pc = target;
            cpu.pc_next = target;
            cpu.if_id = None;
            return Ok(());
        }
    };

    if cpu.trace {
        eprintln!("ID  pc={} issue", pc);
    }
    cpu.id_ex = Some(latch);
    cpu.if_id = None;
    Ok(())
}

fn r_type(cpu: &mut Cpu, pc: usize, rd: usize, rs: usize, rt: usize, alu: AluOp) -> IdEx {
    cpu.pending.set(rd);
    IdEx {
        pc,
        data1: cpu.regs.read(rs),
        data2: cpu.regs.read(rt),
        imm: 0,
        pc_next: pc + 1,
        dest: Some(rd),
        store_reg: 0,
        ctrl: ControlSignals {
            reg_write: true,
            alu,
            ..Default::default()
        },
    }
}

fn branch(cpu: &mut Cpu, pc: usize, rs: usize, rt: usize, target: usize, kind: BranchKind) -> IdEx {
    // Freeze fetch until MEM resolves the branch: the 2-cycle penalty.
    cpu.halt_fetch = true;
    let pc_next = pc + 1;
    IdEx {
        pc,
        data1: cpu.regs.read(rs),
        data2: cpu.regs.read(rt),
        imm: (target as i64 - pc_next as i64) as i32,
        pc_next,
        dest: None,
        store_reg: 0,
        ctrl: ControlSignals {
            branch: kind,
            ..Default::default()
        },
    }
}
