//! The circular core memory that one round is played out on.

use redcode::{normalize, CompleteInstruction, Warrior};

use crate::trace::Tracer;
use crate::CoreAddr;

/// A circular array of [`CompleteInstruction`]s, plus the lazily-opened trace
/// sink for the round it belongs to.
///
/// A `Core` lives for exactly one round (spec §3: "cores live for one
/// round"); [`crate::round::run_round`] constructs a fresh one every time.
pub struct Core {
    /// In-core instructions, always `core_size` long.
    cells: Vec<CompleteInstruction>,
    /// Per-round instruction trace sink.
    pub tracer: Tracer,
}

impl Core {
    /// Builds a core of `core_size` cells, every one initialized to the
    /// default `DAT.F $0, $0`.
    #[must_use]
    pub fn new(core_size: CoreAddr) -> Self {
        Self {
            cells: vec![CompleteInstruction::default(); core_size as usize],
            tracer: Tracer::new(),
        }
    }

    /// Number of addressable cells.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, reason = "core_size is bounded by construction")]
    pub fn size(&self) -> CoreAddr {
        self.cells.len() as CoreAddr
    }

    /// Reads the cell at `addr`, reducing `addr` modulo `core_size` first.
    #[must_use]
    pub fn get(&self, addr: CoreAddr) -> CompleteInstruction {
        let idx = normalize(i64::from(addr), self.size()) as usize;
        self.cells[idx]
    }

    /// Writes `value` into the cell at `addr`, reducing `addr` modulo
    /// `core_size` first.
    pub fn set(&mut self, addr: CoreAddr, value: CompleteInstruction) {
        let idx = normalize(i64::from(addr), self.size()) as usize;
        self.cells[idx] = value;
        self.tracer.log_write(addr, value);
    }

    /// Copies `warrior`'s instructions into the core starting at `start`,
    /// wrapping around the end of the core. Returns the warrior's absolute
    /// entry address (`start + entry_point`, normalized).
    pub fn load(&mut self, warrior: &Warrior, start: CoreAddr) -> CoreAddr {
        for (offset, instr) in warrior.code.iter().enumerate() {
            let Ok(offset) = CoreAddr::try_from(offset) else {
                continue;
            };
            let addr = normalize(i64::from(start) + i64::from(offset), self.size());
            self.cells[addr as usize] = *instr;
        }
        normalize(i64::from(start) + i64::from(warrior.entry_point), self.size())
    }
}
