//! Purpose: Attach resolved line/column positions to offset-carrying errors.
//! Exports: `annotate`.
//! Role: Bridge between raw collaborator failures and readable diagnostics.
//! Invariants: The original error text is embedded verbatim as the message suffix.
//! Invariants: Errors without an offset pass through untouched; positions are
//! never fabricated.

use crate::core::error::Error;
use crate::core::locate::locate;

/// Rewrite `err`'s message to `error in line {l}, char {c}: {original}` when
/// it carries a byte offset into `text`, recording the resolved location.
///
/// The caller must pass the text the offset was computed against: the template
/// source for substitution failures, the rendered output for parse failures.
pub fn annotate(text: &str, err: Error) -> Error {
    let Some(offset) = err.offset() else {
        return err;
    };
    let location = locate(text, usize::try_from(offset).unwrap_or(usize::MAX));
    let message = match err.message() {
        Some(original) => format!(
            "error in line {}, char {}: {original}",
            location.line, location.column
        ),
        None => format!("error in line {}, char {}", location.line, location.column),
    };
    err.with_message(message).with_location(location)
}
