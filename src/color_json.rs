//! Purpose: Render pretty JSON with optional ANSI colorization for CLI output.
//! Exports: colorize_json.
//! Role: Small, pure formatter used by the check command's stdout path.
//! Invariants: When color is disabled, output equals serde_json::to_string_pretty.
//! Invariants: ANSI escapes appear only when explicitly enabled.
use serde_json::Value;

const INDENT: &str = "  ";

// Conservative 8/16-color palette for broad terminal compatibility.
const COLOR_KEY: &str = "36";
const COLOR_STRING: &str = "32";
const COLOR_SCALAR: &str = "33";
const COLOR_PUNCT: &str = "39";

pub fn colorize_json(value: &Value, use_color: bool) -> String {
    let mut out = String::new();
    write_value(value, 0, use_color, &mut out);
    out
}

fn write_value(value: &Value, indent: usize, use_color: bool, out: &mut String) {
    match value {
        Value::Null | Value::Bool(_) | Value::Number(_) => {
            push_colored(&value.to_string(), COLOR_SCALAR, use_color, out);
        }
        Value::String(text) => push_colored(&encode_string(text), COLOR_STRING, use_color, out),
        Value::Array(items) if items.is_empty() => {
            push_colored("[]", COLOR_PUNCT, use_color, out);
        }
        Value::Object(map) if map.is_empty() => {
            push_colored("{}", COLOR_PUNCT, use_color, out);
        }
        Value::Array(items) => {
            push_colored("[", COLOR_PUNCT, use_color, out);
            for (idx, item) in items.iter().enumerate() {
                open_entry(idx, indent, out);
                write_value(item, indent + 1, use_color, out);
            }
            close_container("]", indent, use_color, out);
        }
        Value::Object(map) => {
            push_colored("{", COLOR_PUNCT, use_color, out);
            for (idx, (key, item)) in map.iter().enumerate() {
                open_entry(idx, indent, out);
                push_colored(&encode_string(key), COLOR_KEY, use_color, out);
                push_colored(":", COLOR_PUNCT, use_color, out);
                out.push(' ');
                write_value(item, indent + 1, use_color, out);
            }
            close_container("}", indent, use_color, out);
        }
    }
}

fn open_entry(idx: usize, indent: usize, out: &mut String) {
    if idx > 0 {
        out.push(',');
    }
    out.push('\n');
    for _ in 0..=indent {
        out.push_str(INDENT);
    }
}

fn close_container(close: &str, indent: usize, use_color: bool, out: &mut String) {
    out.push('\n');
    for _ in 0..indent {
        out.push_str(INDENT);
    }
    push_colored(close, COLOR_PUNCT, use_color, out);
}

fn encode_string(text: &str) -> String {
    serde_json::to_string(text).unwrap_or_else(|_| "\"\"".to_string())
}

fn push_colored(text: &str, color: &str, use_color: bool, out: &mut String) {
    if !use_color {
        out.push_str(text);
        return;
    }
    out.push_str("\u{1b}[");
    out.push_str(color);
    out.push('m');
    out.push_str(text);
    out.push_str("\u{1b}[0m");
}
