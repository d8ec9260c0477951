use crate::core::Cpu;
use crate::isa::reg;

pub fn wb_stage(cpu: &mut Cpu) {
    let Some(wb) = cpu.mem_wb.take() else {
        return;
    };

    if let Some(dest) = wb.dest {
        if wb.ctrl.reg_write && dest != reg::ZERO {
            let value = if wb.ctrl.mem_to_reg {
                wb.mem_data
            } else {
                wb.alu
            };
            cpu.regs.write(dest, value);
            if cpu.trace {
                eprintln!("WB  pc={} ${} <= {}", wb.pc, dest, value);
            }
        }
        // Release the pending bit even for non-writing destinations
        // (a store's conservative rt marking retires here).
        cpu.pending.clear(dest);
    }
}
