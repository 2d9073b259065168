use core::convert::Into;

use crate::address::normalize;
use crate::{CompleteInstruction, Instruction, Warrior};

/// A [`CompleteInstruction`] that allows field values less than zero or
/// greater than `core_size`.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Default)]
pub struct RelaxedCompleteInstruction {
    /// The opcode, modifier, and modes used by this instruction
    pub instr: Instruction,
    /// The A-field stored in this instruction, interpreted modulo `core_size`
    pub a_field: i64,
    /// The B-field stored in this instruction, interpreted modulo `core_size`
    pub b_field: i64,
}

impl RelaxedCompleteInstruction {
    /// Convert into a [`CompleteInstruction`], possibly by evaluating fields
    /// modulo `core_size`
    pub fn normalize<T>(&self, core_size: T) -> CompleteInstruction
    where T: Into<u64> + Copy {
        CompleteInstruction {
            instr: self.instr,
            a_field: normalize(self.a_field, core_size),
            b_field: normalize(self.b_field, core_size),
        }
    }
}

/// A [`Warrior`] with [`RelaxedCompleteInstruction`]s that allow field values
/// less than zero or greater than `core_size`, and an entry point that may not
/// yet have been resolved to a concrete offset.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct RelaxedWarrior {
    /// A sequence of redcode instructions
    pub code: Vec<RelaxedCompleteInstruction>,
    /// Offset from the start of a warrior where execution begins, either the
    /// literal 0 default or resolved from an `ORG <label>` directive by the
    /// parser before normalization.
    pub entry_point: i64,
}

impl RelaxedWarrior {
    /// Convert into a [`Warrior`] consisting of [`CompleteInstruction`]s,
    /// possibly by evaluating fields modulo `core_size`
    pub fn normalize<T>(&self, core_size: T) -> Warrior
    where T: Into<u64> + Copy {
        let code = self
            .code
            .iter()
            .map(|insn| insn.normalize(core_size))
            .collect();
        Warrior {
            code,
            entry_point: normalize(self.entry_point, core_size),
        }
    }
}

impl Default for RelaxedWarrior {
    fn default() -> Self {
        Self {
            code: vec![RelaxedCompleteInstruction::default()],
            entry_point: 0,
        }
    }
}
