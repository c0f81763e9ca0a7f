//! Serializer: [`Value`] → text.
//!
//! Two layouts share one walker:
//!
//! - **Compact** (`indent < 0`): no whitespace except one space after each
//!   object key's colon, e.g. `{"a": [1,2]}`.
//! - **Pretty** (`indent >= 0`): one member per line, each nesting level indented
//!   by `indent` more spaces, closing bracket at the parent's indentation.
//!
//! Empty collections are always `[]` / `{}`. Object members come out in the
//! map's insertion order.
//!
//! Floats use Rust's shortest round-trip `Display` (never exponent notation) and
//! always keep a `.` so they parse back as floats. NaN and infinities, which the
//! format cannot express, are written as `null`.
//!
//! The writer recurses once per nesting level with no limit of its own. Parsed
//! trees are bounded by [`MAX_DEPTH_LIMIT`](crate::MAX_DEPTH_LIMIT); a tree built in
//! code far deeper than that can exhaust the stack here, as it can when dropped.

use std::fmt;

use crate::value::Value;

/// Serialize `value`. A negative `indent` selects the compact layout.
pub fn dump(value: &Value, indent: i32) -> String {
    let mut out = String::new();
    dump_to(value, indent, &mut out);
    out
}

/// Like [`dump`], appending to an existing buffer.
pub fn dump_to(value: &Value, indent: i32, out: &mut String) {
    let step = usize::try_from(indent).ok();
    write_value(value, step, 0, out);
}

impl Value {
    /// Serialize this value. See [`dump`].
    pub fn dump(&self, indent: i32) -> String {
        dump(self, indent)
    }
}

/// `{}` writes the compact form, `{:#}` the pretty form with a 2-space indent.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let indent = if f.alternate() { 2 } else { -1 };
        f.write_str(&dump(self, indent))
    }
}

/// `step` is `None` for compact output; `level` is the current indentation in spaces.
fn write_value(value: &Value, step: Option<usize>, level: usize, out: &mut String) {
    match value {
        Value::Null => out.push_str("null"),
        Value::Bool(b) => out.push_str(if *b { "true" } else { "false" }),
        Value::Integer(n) => out.push_str(&n.to_string()),
        Value::Float(f) => write_float(*f, out),
        Value::String(s) => write_string(s, out),
        Value::Array(items) => {
            out.push('[');
            if !items.is_empty() {
                open_block(step, out);
                for (i, item) in items.iter().enumerate() {
                    let inner = begin_member(step, level, out);
                    write_value(item, step, inner, out);
                    end_member(step, i + 1 < items.len(), out);
                }
                close_block(step, level, out);
            }
            out.push(']');
        }
        Value::Object(map) => {
            out.push('{');
            if !map.is_empty() {
                open_block(step, out);
                for (i, (key, item)) in map.iter().enumerate() {
                    let inner = begin_member(step, level, out);
                    write_string(key, out);
                    out.push_str(": ");
                    write_value(item, step, inner, out);
                    end_member(step, i + 1 < map.len(), out);
                }
                close_block(step, level, out);
            }
            out.push('}');
        }
    }
}

fn open_block(step: Option<usize>, out: &mut String) {
    if step.is_some() {
        out.push('\n');
    }
}

/// Indent a member line and return the indentation its own children start from.
fn begin_member(step: Option<usize>, level: usize, out: &mut String) -> usize {
    match step {
        Some(step) => {
            push_indent(level + step, out);
            level + step
        }
        None => level,
    }
}

fn end_member(step: Option<usize>, more: bool, out: &mut String) {
    if more {
        out.push(',');
    }
    if step.is_some() {
        out.push('\n');
    }
}

fn close_block(step: Option<usize>, level: usize, out: &mut String) {
    if step.is_some() {
        push_indent(level, out);
    }
}

fn push_indent(width: usize, out: &mut String) {
    out.extend(std::iter::repeat(' ').take(width));
}

fn write_float(f: f64, out: &mut String) {
    if !f.is_finite() {
        out.push_str("null");
        return;
    }
    let text = f.to_string();
    out.push_str(&text);
    if !text.contains('.') {
        out.push_str(".0");
    }
}

/// Quote and escape a string. Only `"`, `\` and control characters are escaped;
/// non-ASCII text passes through unchanged.
fn write_string(s: &str, out: &mut String) {
    out.push('"');
    for ch in s.chars() {
        match ch {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\u{08}' => out.push_str("\\b"),
            '\u{0c}' => out.push_str("\\f"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if (c as u32) < 0x20 => out.push_str(&format!("\\u{:04x}", c as u32)),
            c => out.push(c),
        }
    }
    out.push('"');
}
