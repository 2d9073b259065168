//! The Execution Unit: dispatches on `(opcode, modifier)`, mutates core
//! memory, and reports the next program counter(s) to queue.

use redcode::{normalize, CompleteInstruction, Modifier, Opcode};

use crate::core::Core;
use crate::operand::Operands;
use crate::CoreAddr;

/// What the owning warrior's process queue should receive after one
/// instruction executes.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// Push `pc + 1` (the common case: no branch, no skip, no termination).
    Next(CoreAddr),
    /// Push `pc + 2` (a condition opcode's skip).
    Skip(CoreAddr),
    /// Push the resolved A-address (an unconditional or taken branch).
    Branch(CoreAddr),
    /// Push both `pc + 1` and the resolved A-address, in that order (`SPL`).
    Split(CoreAddr, CoreAddr),
    /// Push nothing: the process terminates (`DAT`, or a division by zero).
    Terminate,
}

fn next(pc: CoreAddr, size: CoreAddr) -> CoreAddr {
    normalize(i64::from(pc) + 1, size)
}

fn skip(pc: CoreAddr, size: CoreAddr) -> CoreAddr {
    normalize(i64::from(pc) + 2, size)
}

/// Executes the instruction at `pc` against already-resolved `ops`, mutating
/// `core` and returning the [`Outcome`] the caller should apply to the
/// owning warrior's process queue.
///
/// `ops.finish` is always called by this function exactly once, at the point
/// spec §4.4 mandates: after the write (for writing opcodes) or immediately
/// (for opcodes that only read the B-operand).
pub fn execute(core: &mut Core, pc: CoreAddr, ops: &Operands) -> Outcome {
    let instr = core.get(pc).instr;
    let size = core.size();

    let outcome = match instr.opcode {
        Opcode::Dat => Outcome::Terminate,
        Opcode::Nop => Outcome::Next(next(pc, size)),
        Opcode::Mov => {
            mov(core, instr.modifier, ops);
            Outcome::Next(next(pc, size))
        }
        Opcode::Add | Opcode::Sub | Opcode::Mul | Opcode::Div | Opcode::Mod => {
            arithmetic(core, instr.opcode, instr.modifier, ops, size, pc)
        }
        Opcode::Jmp => Outcome::Branch(ops.a_addr),
        Opcode::Jmz => {
            if is_zero(instr.modifier, ops.b_value) {
                Outcome::Branch(ops.a_addr)
            } else {
                Outcome::Next(next(pc, size))
            }
        }
        Opcode::Jmn => {
            if is_non_zero(instr.modifier, ops.b_value) {
                Outcome::Branch(ops.a_addr)
            } else {
                Outcome::Next(next(pc, size))
            }
        }
        Opcode::Djn => djn(core, instr.modifier, ops, pc, size),
        Opcode::Spl => Outcome::Split(next(pc, size), ops.a_addr),
        Opcode::Slt => {
            if slt(instr.modifier, ops.a_value, ops.b_value) {
                Outcome::Skip(skip(pc, size))
            } else {
                Outcome::Next(next(pc, size))
            }
        }
        Opcode::Cmp => {
            if cmp_equal(instr.modifier, ops.a_value, ops.b_value) {
                Outcome::Skip(skip(pc, size))
            } else {
                Outcome::Next(next(pc, size))
            }
        }
        Opcode::Sne => {
            if !cmp_equal(instr.modifier, ops.a_value, ops.b_value) {
                Outcome::Skip(skip(pc, size))
            } else {
                Outcome::Next(next(pc, size))
            }
        }
    };

    ops.finish(core);
    outcome
}

fn mov(core: &mut Core, modifier: Modifier, ops: &Operands) {
    let a = ops.a_value;
    let mut dst = core.get(ops.b_addr);
    match modifier {
        Modifier::A => dst.a_field = a.a_field,
        Modifier::B => dst.b_field = a.b_field,
        Modifier::AB => dst.b_field = a.a_field,
        Modifier::BA => dst.a_field = a.b_field,
        Modifier::F => {
            dst.a_field = a.a_field;
            dst.b_field = a.b_field;
        }
        Modifier::X => {
            dst.a_field = a.b_field;
            dst.b_field = a.a_field;
        }
        Modifier::I => {
            dst = a;
        }
    }
    core.set(ops.b_addr, dst);
}

/// Field-wise modular arithmetic, `None` marking a division by zero.
fn checked_op(opcode: Opcode, lhs: CoreAddr, rhs: CoreAddr, size: CoreAddr) -> Option<CoreAddr> {
    match opcode {
        Opcode::Add => Some(normalize(i64::from(lhs) + i64::from(rhs), size)),
        Opcode::Sub => Some(normalize(i64::from(lhs) - i64::from(rhs), size)),
        Opcode::Mul => {
            let product = u64::from(lhs) * u64::from(rhs);
            Some(normalize(i64::try_from(product).unwrap_or(0), size))
        }
        Opcode::Div => (rhs != 0).then(|| lhs / rhs),
        Opcode::Mod => (rhs != 0).then(|| lhs % rhs),
        _ => None,
    }
}

/// Runs `ADD`/`SUB`/`MUL`/`DIV`/`MOD` for every field pair named by
/// `modifier`, writing only the fields whose divisor (for DIV/MOD) was
/// non-zero, and terminating the process iff *any* required divisor was
/// zero (spec §4.5: per-field independence doesn't matter for termination).
fn arithmetic(
    core: &mut Core,
    opcode: Opcode,
    modifier: Modifier,
    ops: &Operands,
    size: CoreAddr,
    pc: CoreAddr,
) -> Outcome {
    let a = ops.a_value;
    let b = ops.b_value;
    let pairs: &[(CoreAddr, CoreAddr, Field)] = &match modifier {
        Modifier::A => [(a.a_field, b.a_field, Field::A), (0, 0, Field::Unused)],
        Modifier::B => [(a.b_field, b.b_field, Field::B), (0, 0, Field::Unused)],
        Modifier::AB => [(a.a_field, b.b_field, Field::B), (0, 0, Field::Unused)],
        Modifier::BA => [(a.b_field, b.a_field, Field::A), (0, 0, Field::Unused)],
        Modifier::F | Modifier::I => [
            (a.a_field, b.a_field, Field::A),
            (a.b_field, b.b_field, Field::B),
        ],
        Modifier::X => [
            (a.b_field, b.a_field, Field::A),
            (a.a_field, b.b_field, Field::B),
        ],
    };

    let mut dst = core.get(ops.b_addr);
    let mut any_div_by_zero = false;
    let mut wrote = false;
    for &(a_val, b_val, field) in pairs {
        if matches!(field, Field::Unused) {
            continue;
        }
        match checked_op(opcode, b_val, a_val, size) {
            Some(result) => {
                match field {
                    Field::A => dst.a_field = result,
                    Field::B => dst.b_field = result,
                    Field::Unused => {}
                }
                wrote = true;
            }
            None => any_div_by_zero = true,
        }
    }

    if any_div_by_zero {
        if wrote {
            core.set(ops.b_addr, dst);
        }
        return Outcome::Terminate;
    }

    core.set(ops.b_addr, dst);
    Outcome::Next(next(pc, size))
}

#[derive(Copy, Clone, Debug)]
enum Field {
    A,
    B,
    Unused,
}

fn djn(core: &mut Core, modifier: Modifier, ops: &Operands, pc: CoreAddr, size: CoreAddr) -> Outcome {
    let mut dst = core.get(ops.b_addr);
    let decrement = |v: CoreAddr| normalize(i64::from(v) - 1, size);

    let non_zero = match modifier {
        Modifier::A | Modifier::BA => {
            dst.a_field = decrement(dst.a_field);
            dst.a_field != 0
        }
        Modifier::B | Modifier::AB => {
            dst.b_field = decrement(dst.b_field);
            dst.b_field != 0
        }
        Modifier::F | Modifier::X | Modifier::I => {
            dst.a_field = decrement(dst.a_field);
            dst.b_field = decrement(dst.b_field);
            dst.a_field != 0 || dst.b_field != 0
        }
    };
    core.set(ops.b_addr, dst);

    if non_zero {
        Outcome::Branch(ops.a_addr)
    } else {
        Outcome::Next(next(pc, size))
    }
}

fn is_zero(modifier: Modifier, b: CompleteInstruction) -> bool {
    match modifier {
        Modifier::A | Modifier::BA => b.a_field == 0,
        Modifier::B | Modifier::AB => b.b_field == 0,
        Modifier::F | Modifier::X | Modifier::I => b.a_field == 0 && b.b_field == 0,
    }
}

fn is_non_zero(modifier: Modifier, b: CompleteInstruction) -> bool {
    match modifier {
        Modifier::A | Modifier::BA => b.a_field != 0,
        Modifier::B | Modifier::AB => b.b_field != 0,
        Modifier::F | Modifier::X | Modifier::I => b.a_field != 0 || b.b_field != 0,
    }
}

fn slt(modifier: Modifier, a: CompleteInstruction, b: CompleteInstruction) -> bool {
    match modifier {
        Modifier::A => a.a_field < b.a_field,
        Modifier::B => a.b_field < b.b_field,
        Modifier::AB => a.a_field < b.b_field,
        Modifier::BA => a.b_field < b.a_field,
        Modifier::F | Modifier::I => a.a_field < b.a_field && a.b_field < b.b_field,
        Modifier::X => a.a_field < b.b_field && a.b_field < b.a_field,
    }
}

fn cmp_equal(modifier: Modifier, a: CompleteInstruction, b: CompleteInstruction) -> bool {
    match modifier {
        Modifier::A => a.a_field == b.a_field,
        Modifier::B => a.b_field == b.b_field,
        Modifier::AB => a.a_field == b.b_field,
        Modifier::BA => a.b_field == b.a_field,
        Modifier::F => a.a_field == b.a_field && a.b_field == b.b_field,
        Modifier::X => a.a_field == b.b_field && a.b_field == b.a_field,
        Modifier::I => {
            a.instr == b.instr && a.a_field == b.a_field && a.b_field == b.b_field
        }
    }
}

#[cfg(test)]
mod tests {
    use coverage_helper::test;
    use redcode::{AddrMode, Instruction};

    use super::*;
    use crate::params::BattleParameters;

    fn params() -> BattleParameters {
        BattleParameters {
            core_size: 10,
            max_cycles: 1000,
            max_processes: 8,
            read_limit: 10,
            write_limit: 10,
            min_distance: 2,
            max_warrior_length: 2,
            rounds: 1,
            seed: None,
            strict_1988_mode: false,
        }
    }

    fn put(core: &mut Core, addr: CoreAddr, opcode: Opcode, modifier: Modifier, a_mode: AddrMode, a_field: CoreAddr, b_mode: AddrMode, b_field: CoreAddr) {
        core.set(
            addr,
            CompleteInstruction {
                instr: Instruction {
                    opcode,
                    modifier,
                    a_addr_mode: a_mode,
                    b_addr_mode: b_mode,
                },
                a_field,
                b_field,
            },
        );
    }

    #[test]
    fn dat_terminates() {
        let mut core = Core::new(10);
        put(&mut core, 0, Opcode::Dat, Modifier::F, AddrMode::Immediate, 0, AddrMode::Immediate, 0);
        let ops = crate::operand::evaluate(&mut core, 0, &params());
        assert_eq!(execute(&mut core, 0, &ops), Outcome::Terminate);
    }

    #[test]
    fn div_by_zero_terminates_without_writing() {
        let mut core = Core::new(10);
        put(&mut core, 0, Opcode::Div, Modifier::AB, AddrMode::Immediate, 0, AddrMode::Direct, 0);
        let before = core.get(0);
        let ops = crate::operand::evaluate(&mut core, 0, &params());
        let outcome = execute(&mut core, 0, &ops);
        assert_eq!(outcome, Outcome::Terminate);
        assert_eq!(core.get(0), before);
    }

    #[test]
    fn mov_i_copies_full_instruction() {
        let mut core = Core::new(10);
        put(&mut core, 0, Opcode::Mov, Modifier::I, AddrMode::Direct, 1, AddrMode::Direct, 1);
        put(&mut core, 1, Opcode::Add, Modifier::AB, AddrMode::Immediate, 4, AddrMode::Direct, 3);
        let ops = crate::operand::evaluate(&mut core, 0, &params());
        execute(&mut core, 0, &ops);
        let copied = core.get(1);
        assert_eq!(copied.instr.opcode, Opcode::Add);
        assert_eq!(copied.a_field, 4);
        assert_eq!(copied.b_field, 3);
    }

    #[test]
    fn mov_i_with_immediate_a_keeps_the_sources_own_opcode_and_modes() {
        let mut core = Core::new(10);
        put(&mut core, 0, Opcode::Mov, Modifier::I, AddrMode::Immediate, 9, AddrMode::Direct, 1);
        put(&mut core, 1, Opcode::Dat, Modifier::F, AddrMode::Immediate, 0, AddrMode::Immediate, 0);
        let ops = crate::operand::evaluate(&mut core, 0, &params());
        execute(&mut core, 0, &ops);
        let copied = core.get(1);
        // The destination must keep the source instruction's real identity
        // (Mov.I, Immediate A-mode) with only the fields replaced by the
        // immediate value -- never a fabricated Dat.F #0, #0 placeholder.
        assert_eq!(copied.instr.opcode, Opcode::Mov);
        assert_eq!(copied.instr.modifier, Modifier::I);
        assert_eq!(copied.instr.a_addr_mode, AddrMode::Immediate);
        assert_eq!(copied.a_field, 9);
        assert_eq!(copied.b_field, 9);
    }

    #[test]
    fn jmn_i_uses_or_semantics() {
        let mut core = Core::new(10);
        // B target has a_field=0, b_field=1: JMN.I should branch (OR), not
        // require both non-zero (AND would not branch).
        put(&mut core, 0, Opcode::Jmn, Modifier::I, AddrMode::Direct, 5, AddrMode::Direct, 1);
        put(&mut core, 1, Opcode::Dat, Modifier::F, AddrMode::Immediate, 0, AddrMode::Immediate, 1);
        let ops = crate::operand::evaluate(&mut core, 0, &params());
        let outcome = execute(&mut core, 0, &ops);
        assert_eq!(outcome, Outcome::Branch(5));
    }

    #[test]
    fn djn_decrements_and_branches_on_post_decrement_nonzero() {
        let mut core = Core::new(10);
        put(&mut core, 0, Opcode::Djn, Modifier::B, AddrMode::Direct, 5, AddrMode::Direct, 1);
        put(&mut core, 1, Opcode::Dat, Modifier::F, AddrMode::Immediate, 0, AddrMode::Immediate, 1);
        let ops = crate::operand::evaluate(&mut core, 0, &params());
        let outcome = execute(&mut core, 0, &ops);
        assert_eq!(core.get(1).b_field, 0);
        assert_eq!(outcome, Outcome::Next(1));
    }

    #[test]
    fn spl_pushes_next_then_a() {
        let mut core = Core::new(10);
        put(&mut core, 0, Opcode::Spl, Modifier::B, AddrMode::Direct, 3, AddrMode::Immediate, 0);
        let ops = crate::operand::evaluate(&mut core, 0, &params());
        let outcome = execute(&mut core, 0, &ops);
        assert_eq!(outcome, Outcome::Split(1, 3));
    }

    #[test]
    fn cmp_i_requires_full_instruction_equality() {
        let mut core = Core::new(10);
        put(&mut core, 0, Opcode::Cmp, Modifier::I, AddrMode::Direct, 1, AddrMode::Direct, 2);
        put(&mut core, 1, Opcode::Mov, Modifier::I, AddrMode::Immediate, 9, AddrMode::Immediate, 9);
        put(&mut core, 2, Opcode::Add, Modifier::I, AddrMode::Immediate, 9, AddrMode::Immediate, 9);
        let ops = crate::operand::evaluate(&mut core, 0, &params());
        let outcome = execute(&mut core, 0, &ops);
        // different opcodes -> not equal -> no skip
        assert_eq!(outcome, Outcome::Next(1));
    }
}
