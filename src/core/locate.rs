//! Purpose: Map byte offsets in source text to 1-indexed line/column positions.
//! Exports: `Location`, `locate`.
//! Role: Pure position math backing every diagnostic the pipeline emits.
//! Invariants: Never panics; offsets past end-of-input clamp to the last valid position.
//! Invariants: A newline belongs to the line it terminates, not the line after it.

use serde::Serialize;

/// A 1-indexed position within a text. Column counts bytes within the line,
/// matching the unit upstream parsers report offsets in.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
pub struct Location {
    pub line: usize,
    pub column: usize,
}

/// Resolve a zero-based byte offset to the line/column that contains it.
///
/// Each line consumes its byte length plus one for the newline that ends it,
/// so an offset landing exactly on a `\n` resolves to the end of the line the
/// newline terminates. Offsets at or past end-of-input resolve to the last
/// line, one column past its final byte. Empty text resolves to (1, 1).
pub fn locate(text: &str, offset: usize) -> Location {
    let mut line_start = 0usize;
    let mut last_line = 1usize;
    let mut last_len = 0usize;
    for (index, line) in text.split('\n').enumerate() {
        let line_end = line_start + line.len() + 1;
        if offset < line_end {
            return Location {
                line: index + 1,
                column: offset - line_start + 1,
            };
        }
        last_line = index + 1;
        last_len = line.len();
        line_start = line_end;
    }
    Location {
        line: last_line,
        column: last_len + 1,
    }
}
