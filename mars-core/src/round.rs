//! The Match Engine: runs one round to completion (spec §4.6).

use redcode::{normalize, Warrior};

use crate::core::Core;
use crate::execute::{execute, Outcome};
use crate::operand::evaluate;
use crate::params::BattleParameters;
use crate::process_queues::{Contestant, ProcessQueues};
use crate::CoreAddr;

/// The result of one round: either warrior wins outright, or neither queue
/// empties by the cycle cap (a tie).
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RoundOutcome {
    /// `Contestant` is the sole survivor.
    Winner(Contestant),
    /// Both queues non-empty at the cycle cap, or both emptied on the same
    /// step.
    Tie,
}

/// Runs one round: loads `warrior_first` at offset 0 and `warrior_second` at
/// `normalize(min_distance + offset, core_size)`, then alternates process
/// steps starting from `first = round_index mod 2` until a winner emerges or
/// `max_cycles` elapses.
#[must_use]
pub fn run_round(
    warrior_first: &Warrior,
    warrior_second: &Warrior,
    params: &BattleParameters,
    offset: CoreAddr,
    round_index: u32,
) -> RoundOutcome {
    let mut core = Core::new(params.core_size);
    let first_entry = core.load(warrior_first, 0);
    let second_start = normalize(
        i64::from(params.min_distance) + i64::from(offset),
        params.core_size,
    );
    let second_entry = core.load(warrior_second, second_start);

    let mut queues = ProcessQueues::new(params.max_processes, first_entry, second_entry);

    let first = if round_index % 2 == 0 {
        Contestant::First
    } else {
        Contestant::Second
    };
    let order = [first, first.opponent()];

    for _ in 0..params.max_cycles {
        for &who in &order {
            if let Some(outcome) = check_winner(&queues) {
                return outcome;
            }
            step(&mut core, &mut queues, who, params);
            if let Some(outcome) = check_winner(&queues) {
                return outcome;
            }
        }
    }
    RoundOutcome::Tie
}

fn check_winner(queues: &ProcessQueues) -> Option<RoundOutcome> {
    match (
        queues.is_alive(Contestant::First),
        queues.is_alive(Contestant::Second),
    ) {
        (true, false) => Some(RoundOutcome::Winner(Contestant::First)),
        (false, true) => Some(RoundOutcome::Winner(Contestant::Second)),
        (false, false) => Some(RoundOutcome::Tie),
        (true, true) => None,
    }
}

fn step(core: &mut Core, queues: &mut ProcessQueues, who: Contestant, params: &BattleParameters) {
    let Some(pc) = queues.pop(who) else {
        return;
    };
    let ops = evaluate(core, pc, params);
    match execute(core, pc, &ops) {
        Outcome::Next(next_pc) | Outcome::Skip(next_pc) | Outcome::Branch(next_pc) => {
            queues.push_back(who, next_pc);
        }
        Outcome::Split(next_pc, a_pc) => {
            queues.push_back(who, next_pc);
            queues.push_back(who, a_pc);
        }
        Outcome::Terminate => {}
    }
}
