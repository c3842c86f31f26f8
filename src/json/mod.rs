//! Purpose: Internal JSON parsing boundary for rendered template output.
//! Exports: `parse` module with the decode helper used by the pipeline.
//! Role: Single seam for the parser so callsites avoid ad hoc decode logic.
//! Invariants: Runtime JSON decoding goes through this module.
//! Invariants: Helper APIs stay small and deterministic (no hidden global state).

pub(crate) mod parse;
