//! Integration tests for the five-stage pipeline engine: timing, hazards,
//! branch resolution, memory faults, and the trace record contract.

use std::collections::HashMap;
use std::io;

use mipsim::asm;
use mipsim::config::Config;
use mipsim::core::Cpu;
use mipsim::error::Fault;

/// Assembles the source and runs it through the pipeline to completion.
fn run(source: &str) -> Cpu {
    let mut cpu = Cpu::new(asm::assemble(source), &Config::default());
    cpu.run(&mut io::sink()).expect("program should complete");
    cpu
}

/// Assembles the source and runs it until the expected fault.
fn run_err(source: &str) -> Fault {
    let mut cpu = Cpu::new(asm::assemble(source), &Config::default());
    cpu.run(&mut io::sink())
        .expect_err("program should fault")
}

/// Tests basic arithmetic with back-to-back register dependencies.
///
/// The final `add` reads $t1 one instruction after its producer, so it
/// stalls twice; total cycles are 3 + 4 + 2.
#[test]
fn test_arithmetic_chain() {
    let cpu = run(
        "addi $t0, $zero, 5\n\
         addi $t1, $zero, 7\n\
         add $t2, $t0, $t1\n",
    );

    assert_eq!(cpu.regs.read(8), 5);
    assert_eq!(cpu.regs.read(9), 7);
    assert_eq!(cpu.regs.read(10), 12);
    assert_eq!(cpu.stats.cycles, 9);
    assert_eq!(cpu.stats.stalls_data, 2);
}

/// Tests the RAW stall at distance one: two bubbles.
#[test]
fn test_raw_stall_distance_one() {
    let cpu = run(
        "addi $t0, $zero, 1\n\
         add $t1, $t0, $t0\n",
    );

    assert_eq!(cpu.regs.read(9), 2);
    assert_eq!(cpu.stats.cycles, 8);
    assert_eq!(cpu.stats.stalls_data, 2);
}

/// Tests the RAW stall at distance two: one bubble.
#[test]
fn test_raw_stall_distance_two() {
    let cpu = run(
        "addi $t0, $zero, 1\n\
         addi $t5, $zero, 2\n\
         add $t1, $t0, $t0\n",
    );

    assert_eq!(cpu.regs.read(9), 2);
    assert_eq!(cpu.stats.cycles, 8);
    assert_eq!(cpu.stats.stalls_data, 1);
}

/// Tests the RAW stall at distance three: the producer retires just in time.
#[test]
fn test_raw_stall_distance_three() {
    let cpu = run(
        "addi $t0, $zero, 1\n\
         addi $t5, $zero, 2\n\
         addi $t6, $zero, 3\n\
         add $t1, $t0, $t0\n",
    );

    assert_eq!(cpu.regs.read(9), 2);
    assert_eq!(cpu.stats.cycles, 8);
    assert_eq!(cpu.stats.stalls_data, 0);
}

/// Tests that an independent straight-line program retires in N + 4 cycles.
#[test]
fn test_no_hazard_baseline() {
    let cpu = run(
        "addi $t0, $zero, 1\n\
         addi $t1, $zero, 2\n\
         addi $t2, $zero, 3\n",
    );

    assert_eq!(cpu.stats.cycles, 7);
    assert_eq!(cpu.stats.stalls_data, 0);
    assert_eq!(cpu.stats.stalls_control, 0);
}

/// Tests the store/load/use chain: store data is read at MEM time, the load
/// value lands, and the dependent add waits for the load's writeback.
#[test]
fn test_load_use_chain() {
    let cpu = run(
        "addi $t0, $zero, 64\n\
         sw $t0, 0($t0)\n\
         lw $t1, 0($t0)\n\
         add $t2, $t1, $t1\n",
    );

    assert_eq!(cpu.mem.load(16), 64);
    assert_eq!(cpu.regs.read(10), 128);
    assert!(cpu.mem_log.contains(&(16, 64)));
    assert_eq!(cpu.stats.cycles, 14);
}

/// Tests a taken branch: the fall-through instruction never executes and the
/// target does.
#[test]
fn test_taken_branch() {
    let cpu = run(
        "addi $t0, $zero, 1\n\
         beq $t0, $t0, target\n\
         addi $t1, $zero, 99\n\
         target: addi $t2, $zero, 7\n",
    );

    assert_eq!(cpu.regs.read(9), 0);
    assert_eq!(cpu.regs.read(10), 7);
    assert_eq!(cpu.stats.cycles, 11);
    assert_eq!(cpu.stats.exec_counts, vec![1, 1, 0, 1]);
}

/// Tests a not-taken branch: execution falls through and still reaches the
/// label.
#[test]
fn test_not_taken_branch() {
    let cpu = run(
        "addi $t0, $zero, 1\n\
         bne $t0, $t0, target\n\
         addi $t1, $zero, 99\n\
         target: addi $t2, $zero, 7\n",
    );

    assert_eq!(cpu.regs.read(9), 99);
    assert_eq!(cpu.regs.read(10), 7);
    assert_eq!(cpu.stats.cycles, 12);
    assert_eq!(cpu.stats.exec_counts, vec![1, 1, 1, 1]);
}

/// Tests that a branch resolved at MEM freezes fetch for exactly two cycles.
#[test]
fn test_branch_costs_two_bubbles() {
    let cpu = run(
        "beq $zero, $zero, target\n\
         addi $t0, $zero, 5\n\
         target: addi $t1, $zero, 4\n",
    );

    assert_eq!(cpu.regs.read(8), 0);
    assert_eq!(cpu.regs.read(9), 4);
    assert_eq!(cpu.stats.cycles, 8);
    assert_eq!(cpu.stats.stalls_control, 2);
}

/// Tests that a jump resolves at ID: the next fetch is the target, with no
/// bubble beyond the jump itself.
#[test]
fn test_jump() {
    let cpu = run(
        "j target\n\
         addi $t0, $zero, 5\n\
         target: addi $t1, $zero, 9\n",
    );

    assert_eq!(cpu.regs.read(8), 0);
    assert_eq!(cpu.regs.read(9), 9);
    assert_eq!(cpu.stats.cycles, 6);
    assert_eq!(cpu.stats.exec_counts, vec![1, 0, 1]);
}

/// Tests that writes aimed at $zero are discarded and do not stall readers.
#[test]
fn test_zero_register_writes_discarded() {
    let cpu = run(
        "addi $zero, $zero, 5\n\
         add $t0, $zero, $zero\n",
    );

    assert_eq!(cpu.regs.read(0), 0);
    assert_eq!(cpu.regs.read(8), 0);
    // $zero is never marked pending, so the reader does not stall.
    assert_eq!(cpu.stats.cycles, 6);
    assert_eq!(cpu.stats.stalls_data, 0);
}

/// Tests the conservative store hazard: an instruction reading the store's
/// data register waits until the store retires.
#[test]
fn test_store_marks_data_register() {
    let cpu = run(
        "addi $t1, $zero, 64\n\
         sw $t0, 0($t1)\n\
         add $t2, $t0, $t0\n",
    );

    assert_eq!(cpu.regs.read(10), 0);
    assert_eq!(cpu.mem.load(16), 0);
    // Two stalls behind the producer of $t1, two behind the store's rt mark.
    assert_eq!(cpu.stats.cycles, 11);
    assert_eq!(cpu.stats.stalls_data, 4);
}

/// Tests that the write-pending vector mirrors the hazard destinations held
/// in the ID/EX, EX/MEM and MEM/WB latches, every cycle.
#[test]
fn test_pending_bits_match_latches() {
    let sources = [
        "addi $t0, $zero, 64\n\
         sw $t0, 0($t0)\n\
         lw $t1, 0($t0)\n\
         add $t2, $t1, $t1\n",
        "addi $t0, $zero, 1\n\
         beq $t0, $t0, target\n\
         addi $t1, $zero, 99\n\
         target: addi $t2, $zero, 7\n",
    ];

    for source in sources {
        let mut cpu = Cpu::new(asm::assemble(source), &Config::default());
        loop {
            cpu.tick().expect("program should not fault");

            let mut expected = [false; 32];
            let dests = [
                cpu.id_ex.and_then(|latch| latch.dest),
                cpu.ex_mem.and_then(|latch| latch.dest),
                cpu.mem_wb.and_then(|latch| latch.dest),
            ];
            for dest in dests.into_iter().flatten() {
                if dest != 0 {
                    expected[dest] = true;
                }
            }
            for r in 0..32 {
                assert_eq!(cpu.pending.pending(r), expected[r], "register {}", r);
            }

            if cpu.drained() {
                break;
            }
        }
    }
}

/// Tests that replaying the modified-memory log from zero reproduces the
/// final data memory.
#[test]
fn test_memory_log_replay() {
    let cpu = run(
        "addi $t0, $zero, 64\n\
         addi $t1, $zero, 100\n\
         sw $t0, 0($t0)\n\
         sw $t1, 4($t0)\n\
         sw $t1, 0($t0)\n\
         sw $zero, 4($t0)\n",
    );

    let mut replay: HashMap<usize, i32> = HashMap::new();
    for &(word, value) in &cpu.mem_log {
        replay.insert(word, value);
    }

    for (&word, &value) in &replay {
        assert_eq!(cpu.mem.load(word), value);
    }
    for (word, value) in cpu.mem.nonzero_words() {
        assert_eq!(replay.get(&word), Some(&value));
    }
    assert_eq!(cpu.mem.load(16), 100);
    assert_eq!(cpu.mem.load(17), 0);
}

/// Tests the per-cycle record format and that one record is emitted per
/// cycle.
#[test]
fn test_cycle_record_format() {
    let mut cpu = Cpu::new(asm::assemble("addi $t0, $zero, 1\n"), &Config::default());
    let mut out = Vec::new();
    cpu.run(&mut out).expect("program should complete");

    let text = String::from_utf8(out).expect("records are valid utf-8");
    let lines: Vec<&str> = text.lines().collect();

    let records = lines
        .iter()
        .filter(|line| line.starts_with("Cycle number: "))
        .count() as u64;
    assert_eq!(records, cpu.stats.cycles);
    assert_eq!(cpu.stats.cycles, 5);

    assert_eq!(lines[0], "Cycle number: 1");
    assert_eq!(lines[1], "0 ".repeat(32));
    assert_eq!(lines[2], "0 ");

    // The writeback lands in the record of the final cycle.
    assert_eq!(lines[12], "Cycle number: 5");
    let final_regs = format!("{}1 {}", "0 ".repeat(8), "0 ".repeat(23));
    assert_eq!(lines[13], final_regs);
}

/// Tests that stores show up in the cumulative memory-log line as
/// word-address/value pairs.
#[test]
fn test_memory_log_record() {
    let mut cpu = Cpu::new(
        asm::assemble("addi $t0, $zero, 64\nsw $t0, 0($t0)\n"),
        &Config::default(),
    );
    let mut out = Vec::new();
    cpu.run(&mut out).expect("program should complete");

    let text = String::from_utf8(out).expect("records are valid utf-8");
    assert!(text.contains("\n1 16 64 \n"));
}

/// Tests that negative register values print as 32-bit two's complement hex.
#[test]
fn test_negative_register_hex() {
    let mut cpu = Cpu::new(asm::assemble("addi $t0, $zero, -1\n"), &Config::default());
    let mut out = Vec::new();
    cpu.run(&mut out).expect("program should complete");

    let text = String::from_utf8(out).expect("records are valid utf-8");
    assert!(text.contains("ffffffff"));
}

/// Tests the address fault cases: unaligned, inside the instruction region,
/// and past the end of memory.
#[test]
fn test_address_faults() {
    let unaligned = run_err(
        "addi $t0, $zero, 63\n\
         addi $t5, $zero, 0\n\
         addi $t6, $zero, 0\n\
         sw $t0, 0($t0)\n",
    );
    assert_eq!(unaligned, Fault::InvalidAddress);

    let reserved = run_err("lw $t1, 0($zero)\n");
    assert_eq!(reserved, Fault::InvalidAddress);

    let past_end = run_err(
        "addi $t0, $zero, 1048576\n\
         addi $t5, $zero, 0\n\
         addi $t6, $zero, 0\n\
         lw $t1, 0($t0)\n",
    );
    assert_eq!(past_end, Fault::InvalidAddress);
}

/// Tests that a malformed command only faults when it reaches ID.
#[test]
fn test_decode_faults_surface_at_id() {
    let fault = run_err(
        "addi $t0, $zero, 1\n\
         add $t1, $q0, $t0\n",
    );
    assert_eq!(fault, Fault::InvalidRegister);

    // The same malformed command is harmless if control flow skips it.
    let cpu = run(
        "beq $zero, $zero, target\n\
         add $t1, $q0, $t0\n\
         target: addi $t2, $zero, 2\n",
    );
    assert_eq!(cpu.regs.read(10), 2);
}

/// Tests branch and jump label faults at execution time.
#[test]
fn test_label_faults() {
    let undefined = run_err("beq $t0, $t0, nowhere\n");
    assert_eq!(undefined, Fault::InvalidLabel);

    let poisoned = run_err(
        "loop: addi $t0, $zero, 1\n\
         loop: addi $t1, $zero, 2\n\
         j loop\n",
    );
    assert_eq!(poisoned, Fault::InvalidLabel);
}

/// Tests that a program too large for the modeled memory is rejected before
/// execution starts.
#[test]
fn test_program_too_large() {
    let source = "addi $t0, $zero, 1\n".repeat(1 << 18);
    let mut cpu = Cpu::new(asm::assemble(&source), &Config::default());
    let fault = cpu
        .run(&mut io::sink())
        .expect_err("program should be rejected");

    assert_eq!(fault, Fault::MemoryLimit);
    assert_eq!(cpu.stats.cycles, 0);
}

/// Tests that an empty program drains in a single cycle.
#[test]
fn test_empty_program() {
    let cpu = run("# nothing but comments\n");

    assert_eq!(cpu.stats.cycles, 1);
    for r in 0..32 {
        assert_eq!(cpu.regs.read(r), 0);
    }
}
