//! Purpose: Decode rendered template output as JSON with offset-carrying errors.
//! Exports: `from_str`.
//! Role: Parser boundary that centralizes serde_json usage details.
//! Invariants: Syntax failures always carry the zero-based byte offset of the
//! first offending byte, satisfying the annotator's contract.
//! Invariants: The parser's own message text is preserved verbatim.

use serde_json::Value;

use crate::core::error::{Error, ErrorKind};

pub(crate) fn from_str(input: &str) -> Result<Value, Error> {
    serde_json::from_str(input).map_err(|err| {
        let offset = offset_of(input, err.line(), err.column());
        Error::new(ErrorKind::Syntax)
            .with_message(err.to_string())
            .with_offset(offset as u64)
    })
}

// serde_json reports 1-indexed line/column (column counts bytes); recover the
// byte offset of the offending byte against the text the parser consumed.
fn offset_of(input: &str, line: usize, column: usize) -> usize {
    let mut line_start = 0usize;
    for (index, text) in input.split('\n').enumerate() {
        if index + 1 == line {
            return line_start + column.saturating_sub(1).min(text.len());
        }
        line_start += text.len() + 1;
    }
    input.len()
}

#[cfg(test)]
mod tests {
    use super::from_str;
    use crate::core::error::ErrorKind;
    use serde_json::json;

    #[test]
    fn well_formed_input_decodes_to_a_value() {
        let value = from_str(r#"{"prompt": "hello", "steps": 50}"#).expect("decode");
        assert_eq!(value, json!({"prompt": "hello", "steps": 50}));
    }

    #[test]
    fn syntax_errors_carry_the_offending_byte_offset() {
        // The unquoted `abc` starts at byte 25.
        let input = r#"{"prompt": "x", "steps": abc}"#;
        let err = from_str(input).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Syntax);
        assert_eq!(err.offset(), Some(input.find("abc").unwrap() as u64));
    }

    #[test]
    fn offsets_resolve_on_later_lines() {
        let input = "{\n  \"a\": 1,\n  \"b\": xyz\n}";
        let err = from_str(input).unwrap_err();
        assert_eq!(err.offset(), Some(input.find("xyz").unwrap() as u64));
    }

    #[test]
    fn truncated_input_reports_an_offset_within_bounds() {
        let input = r#"{"a": 1"#;
        let err = from_str(input).unwrap_err();
        let offset = err.offset().expect("offset") as usize;
        assert!(offset <= input.len());
    }

    #[test]
    fn empty_input_reports_offset_zero() {
        let err = from_str("").unwrap_err();
        assert_eq!(err.offset(), Some(0));
    }
}
