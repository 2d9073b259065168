//! Optional, `log`-backed per-instruction trace sink.
//!
//! A [`Tracer`] is owned by a single [`crate::core::Core`] for the lifetime
//! of one round; it is never global state, matching the teacher's existing
//! instinct to avoid shared mutable handles (spec §9's "global mutable trace
//! file handle" redesign flag). Trace lines go through the `log` crate at
//! `trace` level rather than a hand-rolled file handle: `mars-cli` decides
//! where they land (stderr, or a `REDCODE_TRACE_FILE` target) by configuring
//! `env_logger`, so this crate never opens a file itself. When the `trace`
//! feature is disabled, [`Tracer`] is a zero-sized no-op so the formatting
//! and the `log::trace!` call site compile out entirely rather than merely
//! being filtered at runtime.

use redcode::CompleteInstruction;

use crate::CoreAddr;

/// Per-round trace sink. Emits `log::trace!` lines; carries no state of its
/// own beyond the `trace` feature gate.
#[derive(Default)]
pub struct Tracer;

impl Tracer {
    /// Constructs the tracer. A no-argument constructor (rather than reading
    /// `REDCODE_TRACE_FILE` itself) because routing trace output is a
    /// logging-backend concern owned by the host binary, not this crate.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Emits the `PC=... | A=... {...}, B=... {...}` line for one executed
    /// instruction, at `log::Level::Trace`.
    #[cfg(feature = "trace")]
    pub fn log_instruction(
        &mut self,
        pc: CoreAddr,
        instr: CompleteInstruction,
        a_addr: CoreAddr,
        a_value: CompleteInstruction,
        b_addr: CoreAddr,
        b_value: CompleteInstruction,
    ) {
        log::trace!(
            "PC={pc} {instr} | A={a_addr} {{{a_value}}}, B={b_addr} {{{b_value}}}"
        );
    }

    /// No-op: tracing is compiled out when the `trace` feature is disabled.
    #[cfg(not(feature = "trace"))]
    #[inline]
    pub fn log_instruction(
        &mut self,
        _pc: CoreAddr,
        _instr: CompleteInstruction,
        _a_addr: CoreAddr,
        _a_value: CompleteInstruction,
        _b_addr: CoreAddr,
        _b_value: CompleteInstruction,
    ) {
    }

    /// Emits the `-> WRITE @<addr> {<value>}` line following a field
    /// mutation, at `log::Level::Trace`.
    #[cfg(feature = "trace")]
    pub fn log_write(&mut self, addr: CoreAddr, value: CompleteInstruction) {
        log::trace!("-> WRITE @{addr} {{{value}}}");
    }

    /// No-op: tracing is compiled out when the `trace` feature is disabled.
    #[cfg(not(feature = "trace"))]
    #[inline]
    pub fn log_write(&mut self, _addr: CoreAddr, _value: CompleteInstruction) {}
}
