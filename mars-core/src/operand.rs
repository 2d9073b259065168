//! Operand evaluation: resolves the A- and B-operands of one instruction,
//! applying predecrement/postincrement side effects in the exact order
//! mandated by spec §4.4.

use redcode::{fold, normalize, AddrMode, CompleteInstruction};

use crate::core::Core;
use crate::params::BattleParameters;
use crate::CoreAddr;

/// Which field of a pointed-to cell an indirect/predec/postinc mode
/// dereferences or mutates.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Field {
    A,
    B,
}

/// A deferred B-operand postincrement: the address and field to increment
/// after the execution unit's write (or, for condition opcodes that never
/// write, immediately after dispatch).
#[derive(Copy, Clone, Debug)]
struct PendingPostinc {
    addr: CoreAddr,
    field: Field,
}

/// The fully resolved operands for one instruction.
pub struct Operands {
    /// Resolved A-pointer address.
    pub a_addr: CoreAddr,
    /// Effective A-operand source value, read once before any write.
    pub a_value: CompleteInstruction,
    /// Resolved B-pointer address (write target for writing opcodes).
    pub b_addr: CoreAddr,
    /// Destination snapshot, read before any execution-unit write.
    pub b_value: CompleteInstruction,
    /// Deferred B-postincrement, applied by [`Operands::finish`].
    b_postinc: Option<PendingPostinc>,
}

impl Operands {
    /// Applies the deferred B-postincrement, if this instruction's B-mode was
    /// a postincrement. Must be called exactly once, after the execution
    /// unit's write (or immediately, for opcodes that only test the B-value).
    pub fn finish(&self, core: &mut Core) {
        if let Some(pending) = self.b_postinc {
            let mut cell = core.get(pending.addr);
            match pending.field {
                Field::A => {
                    cell.a_field = normalize(i64::from(cell.a_field) + 1, core.size());
                }
                Field::B => {
                    cell.b_field = normalize(i64::from(cell.b_field) + 1, core.size());
                }
            }
            core.set(pending.addr, cell);
        }
    }
}

/// Resolves the A- and B-operands of the instruction at `pc`, applying every
/// predecrement and the A-postincrement inline (per spec §4.4's ordering);
/// the B-postincrement is returned as a pending action for the execution unit
/// to apply after its write.
pub fn evaluate(
    core: &mut Core,
    pc: CoreAddr,
    params: &BattleParameters,
) -> Operands {
    let instr = core.get(pc);
    let size = core.size();

    let (a_addr, a_value) = resolve_a(core, pc, instr, params.read_limit, size);

    let (b_addr, b_value, b_postinc) =
        resolve_b(core, pc, instr, params.write_limit, size);

    core.tracer
        .log_instruction(pc, instr, a_addr, a_value, b_addr, b_value);

    Operands {
        a_addr,
        a_value,
        b_addr,
        b_value,
        b_postinc,
    }
}

/// Resolves the A-operand, applying predecrement before the read and
/// postincrement immediately after (before the caller evaluates B).
fn resolve_a(
    core: &mut Core,
    pc: CoreAddr,
    instr: CompleteInstruction,
    read_limit: CoreAddr,
    size: CoreAddr,
) -> (CoreAddr, CompleteInstruction) {
    if instr.instr.a_addr_mode == AddrMode::Immediate {
        let synthetic = CompleteInstruction {
            instr: instr.instr,
            a_field: instr.a_field,
            b_field: instr.a_field,
        };
        return (pc, synthetic);
    }

    let primary = fold(i64::from(instr.a_field), read_limit);
    let intermediate = normalize(i64::from(pc) + primary, size);

    if instr.instr.a_addr_mode == AddrMode::Direct {
        let addr = intermediate;
        return (addr, core.get(addr));
    }

    let side = indirect_side(instr.instr.a_addr_mode);
    apply_predec(core, intermediate, instr.instr.a_addr_mode, size);
    let field_value = read_field(core, intermediate, side);
    let secondary = fold(i64::from(field_value), read_limit);
    let addr = normalize(
        i64::from(pc) + fold(primary.wrapping_add(secondary), read_limit),
        size,
    );
    let value = core.get(addr);

    apply_postinc(core, intermediate, instr.instr.a_addr_mode, size);

    (addr, value)
}

/// Resolves the B-operand. Predecrement fires inline; postincrement is
/// returned for the caller to apply after the execution unit's write.
fn resolve_b(
    core: &mut Core,
    pc: CoreAddr,
    instr: CompleteInstruction,
    write_limit: CoreAddr,
    size: CoreAddr,
) -> (CoreAddr, CompleteInstruction, Option<PendingPostinc>) {
    if instr.instr.b_addr_mode == AddrMode::Immediate {
        return (pc, core.get(pc), None);
    }

    let primary = fold(i64::from(instr.b_field), write_limit);
    let intermediate = normalize(i64::from(pc) + primary, size);

    if instr.instr.b_addr_mode == AddrMode::Direct {
        let addr = intermediate;
        return (addr, core.get(addr), None);
    }

    let side = indirect_side(instr.instr.b_addr_mode);
    apply_predec(core, intermediate, instr.instr.b_addr_mode, size);
    let field_value = read_field(core, intermediate, side);
    let secondary = fold(i64::from(field_value), write_limit);
    let addr = normalize(
        i64::from(pc) + fold(primary.wrapping_add(secondary), write_limit),
        size,
    );
    let value = core.get(addr);

    let pending = matches!(
        instr.instr.b_addr_mode,
        AddrMode::PostincA | AddrMode::PostincB
    )
    .then_some(PendingPostinc {
        addr: intermediate,
        field: side,
    });

    (addr, value, pending)
}

/// Which field an A-side (`*`, `{`, `}`) or B-side (`@`, `<`, `>`) indirect
/// mode dereferences.
fn indirect_side(mode: AddrMode) -> Field {
    match mode {
        AddrMode::IndirectA | AddrMode::PredecA | AddrMode::PostincA => Field::A,
        _ => Field::B,
    }
}

fn read_field(core: &Core, addr: CoreAddr, field: Field) -> CoreAddr {
    let cell = core.get(addr);
    match field {
        Field::A => cell.a_field,
        Field::B => cell.b_field,
    }
}

fn apply_predec(core: &mut Core, addr: CoreAddr, mode: AddrMode, size: CoreAddr) {
    match mode {
        AddrMode::PredecA => {
            let mut cell = core.get(addr);
            cell.a_field = normalize(i64::from(cell.a_field) - 1, size);
            core.set(addr, cell);
        }
        AddrMode::PredecB => {
            let mut cell = core.get(addr);
            cell.b_field = normalize(i64::from(cell.b_field) - 1, size);
            core.set(addr, cell);
        }
        _ => {}
    }
}

fn apply_postinc(core: &mut Core, addr: CoreAddr, mode: AddrMode, size: CoreAddr) {
    match mode {
        AddrMode::PostincA => {
            let mut cell = core.get(addr);
            cell.a_field = normalize(i64::from(cell.a_field) + 1, size);
            core.set(addr, cell);
        }
        AddrMode::PostincB => {
            let mut cell = core.get(addr);
            cell.b_field = normalize(i64::from(cell.b_field) + 1, size);
            core.set(addr, cell);
        }
        _ => {}
    }
}
