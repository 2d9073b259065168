//! The six literal conformance scenarios.

use mars_core::core::Core;
use mars_core::execute::{execute, Outcome};
use mars_core::operand::evaluate;
use mars_core::params::BattleParameters;
use mars_core::process_queues::{Contestant, ProcessQueues};
use mars_core::rng::PlacementRng;
use mars_core::round::{run_round, RoundOutcome};
use redcode::{AddrMode, CompleteInstruction, Instruction, Modifier, Opcode};

fn params() -> BattleParameters {
    BattleParameters {
        core_size: 8000,
        max_cycles: 80_000,
        max_processes: 8000,
        read_limit: 8000,
        write_limit: 8000,
        min_distance: 100,
        max_warrior_length: 100,
        rounds: 1,
        seed: None,
        strict_1988_mode: false,
    }
}

fn warrior(instrs: Vec<CompleteInstruction>) -> redcode::Warrior {
    redcode::Warrior {
        code: instrs,
        entry_point: 0,
    }
}

#[test]
fn imp_reproduces_itself_across_the_core() {
    let p = params();
    let mut core = Core::new(p.core_size);
    let imp = CompleteInstruction {
        instr: Instruction {
            opcode: Opcode::Mov,
            modifier: Modifier::I,
            a_addr_mode: AddrMode::Direct,
            b_addr_mode: AddrMode::Direct,
        },
        a_field: 0,
        b_field: 1,
    };
    core.set(0, imp);

    let mut pc = 0;
    for _ in 0..10 {
        let ops = evaluate(&mut core, pc, &p);
        let next = match execute(&mut core, pc, &ops) {
            Outcome::Next(n) => n,
            other => panic!("imp should only ever advance to pc+1, got {other:?}"),
        };
        assert_eq!(next, pc + 1);
        assert_eq!(core.get(pc), imp);
        assert_eq!(core.get(next), imp);
        pc = next;
    }
}

#[test]
fn dat_warrior_is_declared_loser_after_one_cycle() {
    let imp = warrior(vec![CompleteInstruction {
        instr: Instruction {
            opcode: Opcode::Mov,
            modifier: Modifier::I,
            a_addr_mode: AddrMode::Direct,
            b_addr_mode: AddrMode::Direct,
        },
        a_field: 0,
        b_field: 1,
    }]);
    let dat = warrior(vec![CompleteInstruction {
        instr: Instruction {
            opcode: Opcode::Dat,
            modifier: Modifier::F,
            a_addr_mode: AddrMode::Immediate,
            b_addr_mode: AddrMode::Immediate,
        },
        a_field: 0,
        b_field: 0,
    }]);
    let outcome = run_round(&dat, &imp, &params(), 0, 0);
    assert_eq!(outcome, RoundOutcome::Winner(Contestant::Second));
}

#[test]
fn divide_by_zero_terminates_after_one_cycle() {
    let p = params();
    let mut core = Core::new(p.core_size);
    core.set(
        0,
        CompleteInstruction {
            instr: Instruction {
                opcode: Opcode::Div,
                modifier: Modifier::AB,
                a_addr_mode: AddrMode::Immediate,
                b_addr_mode: AddrMode::Direct,
            },
            a_field: 0,
            b_field: 0,
        },
    );
    core.set(
        1,
        CompleteInstruction {
            instr: Instruction {
                opcode: Opcode::Dat,
                modifier: Modifier::F,
                a_addr_mode: AddrMode::Immediate,
                b_addr_mode: AddrMode::Immediate,
            },
            a_field: 0,
            b_field: 0,
        },
    );
    let ops = evaluate(&mut core, 0, &p);
    assert_eq!(execute(&mut core, 0, &ops), Outcome::Terminate);
}

#[test]
fn spl_never_exceeds_max_processes() {
    let p = BattleParameters {
        max_processes: 1,
        ..params()
    };
    let mut core = Core::new(p.core_size);
    core.set(
        0,
        CompleteInstruction {
            instr: Instruction {
                opcode: Opcode::Spl,
                modifier: Modifier::B,
                a_addr_mode: AddrMode::Direct,
                b_addr_mode: AddrMode::Direct,
            },
            a_field: 0,
            b_field: 0,
        },
    );
    let mut queues = ProcessQueues::new(p.max_processes, 0, 9999);
    for _ in 0..20 {
        let Some(pc) = queues.pop(Contestant::First) else {
            break;
        };
        let ops = evaluate(&mut core, pc, &p);
        match execute(&mut core, pc, &ops) {
            Outcome::Split(next, a) => {
                queues.push_back(Contestant::First, next);
                queues.push_back(Contestant::First, a);
            }
            other => panic!("SPL should always split, got {other:?}"),
        }
        assert!(queues.process_count(Contestant::First) <= 1);
    }
}

#[test]
fn jmn_i_and_djn_i_use_or_not_and_semantics() {
    let p = params();

    // JMN.I: B-target has only one field non-zero -> OR semantics branch.
    let mut core = Core::new(p.core_size);
    core.set(
        0,
        CompleteInstruction {
            instr: Instruction {
                opcode: Opcode::Jmn,
                modifier: Modifier::I,
                a_addr_mode: AddrMode::Direct,
                b_addr_mode: AddrMode::Direct,
            },
            a_field: 10,
            b_field: 1,
        },
    );
    core.set(
        1,
        CompleteInstruction {
            instr: Instruction {
                opcode: Opcode::Dat,
                modifier: Modifier::F,
                a_addr_mode: AddrMode::Immediate,
                b_addr_mode: AddrMode::Immediate,
            },
            a_field: 0,
            b_field: 1,
        },
    );
    let ops = evaluate(&mut core, 0, &p);
    assert_eq!(execute(&mut core, 0, &ops), Outcome::Branch(10));

    // DJN.I: same asymmetry, decrement then branch iff either field nonzero.
    let mut core = Core::new(p.core_size);
    core.set(
        0,
        CompleteInstruction {
            instr: Instruction {
                opcode: Opcode::Djn,
                modifier: Modifier::I,
                a_addr_mode: AddrMode::Direct,
                b_addr_mode: AddrMode::Direct,
            },
            a_field: 10,
            b_field: 1,
        },
    );
    core.set(
        1,
        CompleteInstruction {
            instr: Instruction {
                opcode: Opcode::Dat,
                modifier: Modifier::F,
                a_addr_mode: AddrMode::Immediate,
                b_addr_mode: AddrMode::Immediate,
            },
            a_field: 0,
            b_field: 1,
        },
    );
    let ops = evaluate(&mut core, 0, &p);
    assert_eq!(execute(&mut core, 0, &ops), Outcome::Branch(10));
}

#[test]
fn placement_offsets_follow_the_park_miller_sequence_seeded_from_one() {
    let core_size = 8000_i64;
    let min_distance = 100_i64;
    let placements = core_size - 2 * min_distance + 1;

    let mut rng = PlacementRng::from_seed(1);
    let offsets: Vec<i64> = (0..8).map(|_| rng.next_offset(placements)).collect();

    // Recomputed independently from the documented Park-Miller state
    // sequence seeded from 1 (see rng::tests::seed_one_matches_park_miller_reference_sequence).
    let expected_states = [
        16_807_i64,
        282_475_249,
        1_622_650_073,
        984_943_658,
        1_144_108_930,
        470_211_272,
        101_027_544,
        1_457_850_878,
    ];
    let expected: Vec<i64> = expected_states.iter().map(|s| s % placements).collect();
    assert_eq!(offsets, expected);
}
