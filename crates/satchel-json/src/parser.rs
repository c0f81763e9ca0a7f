//! Recursive-descent parser: text → [`Value`].
//!
//! One forward pass over the input bytes with a single byte of lookahead. The
//! first non-whitespace byte of each value selects the production:
//!
//! - `{` object, `[` array, `"` string
//! - `t` / `f` boolean, `n` null
//! - `-` or a digit: number (a `.` makes it a float, otherwise an integer)
//!
//! # Deviations from strict JSON
//!
//! - No exponent syntax in numbers; leading zeros are accepted.
//! - `\uXXXX` escapes are validated and consumed but decode to `?`.
//! - Duplicate object keys keep the first value.
//! - Raw control characters inside strings are accepted.
//!
//! # Key design decisions
//!
//! - **Bounded recursion**: every object/array increments a depth counter that is
//!   checked against [`ParseOptions::max_depth`], so hostile nesting produces an
//!   [`Error::Parse`] instead of a stack overflow. The configured limit is itself
//!   clamped to [`MAX_DEPTH_LIMIT`], which fits the default 2 MiB thread stack.
//! - **Positions**: errors carry the byte offset plus 1-based line and column of
//!   the byte that stopped the parse.

use std::str::FromStr;

use crate::error::{Error, Result};
use crate::value::{Map, Value};

/// Nesting limit used by [`parse`].
pub const DEFAULT_MAX_DEPTH: usize = 128;

/// Hard ceiling for [`ParseOptions::max_depth`]. Larger settings are clamped.
pub const MAX_DEPTH_LIMIT: usize = 512;

/// Character stored in place of every `\uXXXX` escape.
pub const UNICODE_PLACEHOLDER: char = '?';

/// Parser settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseOptions {
    /// Maximum number of nested objects/arrays, at most [`MAX_DEPTH_LIMIT`].
    pub max_depth: usize,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl ParseOptions {
    /// Set the nesting limit, clamped to [`MAX_DEPTH_LIMIT`].
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth.min(MAX_DEPTH_LIMIT);
        self
    }
}

/// Parse a complete document with the default [`ParseOptions`].
///
/// Exactly one value is read; anything but whitespace after it is an error.
pub fn parse(text: &str) -> Result<Value> {
    parse_with(text, &ParseOptions::default())
}

/// Parse a complete document with explicit options.
pub fn parse_with(text: &str, options: &ParseOptions) -> Result<Value> {
    // `max_depth` is public and can bypass the builder.
    let mut parser = Parser::new(text, options.max_depth.min(MAX_DEPTH_LIMIT));
    let value = parser.parse_value()?;
    parser.skip_ws();
    if parser.peek().is_some() {
        return Err(parser.error("extra characters after document"));
    }
    Ok(value)
}

impl FromStr for Value {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        parse(s)
    }
}

struct Parser<'a> {
    text: &'a str,
    bytes: &'a [u8],
    pos: usize,
    depth: usize,
    max_depth: usize,
}

impl<'a> Parser<'a> {
    fn new(text: &'a str, max_depth: usize) -> Self {
        Self {
            text,
            bytes: text.as_bytes(),
            pos: 0,
            depth: 0,
            max_depth,
        }
    }

    fn peek(&self) -> Option<u8> {
        self.bytes.get(self.pos).copied()
    }

    fn bump(&mut self) -> Option<u8> {
        let b = self.peek()?;
        self.pos += 1;
        Some(b)
    }

    /// The full character at the cursor, for messages. `pos` is always on a
    /// char boundary when this is called.
    fn current_char(&self) -> char {
        self.text[self.pos..].chars().next().unwrap_or('\0')
    }

    fn skip_ws(&mut self) {
        while let Some(b' ' | b'\t' | b'\n' | b'\r' | 0x0b | 0x0c) = self.peek() {
            self.pos += 1;
        }
    }

    fn skip_digits(&mut self) {
        while let Some(b'0'..=b'9') = self.peek() {
            self.pos += 1;
        }
    }

    fn expect(&mut self, expected: u8) -> Result<()> {
        self.skip_ws();
        if self.peek() == Some(expected) {
            self.pos += 1;
            Ok(())
        } else {
            Err(self.error(format!("expected '{}'", expected as char)))
        }
    }

    fn error(&self, message: impl Into<String>) -> Error {
        self.error_at(self.pos, message)
    }

    fn error_at(&self, offset: usize, message: impl Into<String>) -> Error {
        let before = &self.bytes[..offset];
        let line_start = before
            .iter()
            .rposition(|&b| b == b'\n')
            .map_or(0, |i| i + 1);
        let line = before.iter().filter(|&&b| b == b'\n').count() + 1;
        // Count chars, not bytes: skip UTF-8 continuation bytes.
        let column = before[line_start..]
            .iter()
            .filter(|&&b| (b & 0xc0) != 0x80)
            .count()
            + 1;
        Error::Parse {
            message: message.into(),
            offset,
            line,
            column,
        }
    }

    fn descend(&mut self) -> Result<()> {
        if self.depth >= self.max_depth {
            return Err(self.error(format!("nesting depth exceeds {}", self.max_depth)));
        }
        self.depth += 1;
        Ok(())
    }

    fn parse_value(&mut self) -> Result<Value> {
        self.skip_ws();
        match self.peek() {
            Some(b'{') => self.parse_object(),
            Some(b'[') => self.parse_array(),
            Some(b'"') => self.parse_string().map(Value::String),
            Some(b't' | b'f') => self.parse_bool(),
            Some(b'n') => self.parse_null(),
            Some(b'-' | b'0'..=b'9') => self.parse_number(),
            Some(_) => Err(self.error(format!("unexpected character '{}'", self.current_char()))),
            None => Err(self.error("unexpected end of input")),
        }
    }

    fn parse_object(&mut self) -> Result<Value> {
        self.expect(b'{')?;
        self.descend()?;
        let mut map = Map::new();
        self.skip_ws();
        if self.peek() == Some(b'}') {
            self.pos += 1;
            self.depth -= 1;
            return Ok(Value::Object(map));
        }
        loop {
            self.skip_ws();
            let key = self.parse_string()?;
            self.expect(b':')?;
            let value = self.parse_value()?;
            // First occurrence wins.
            map.entry(key).or_insert(value);
            self.skip_ws();
            match self.peek() {
                Some(b',') => self.pos += 1,
                Some(b'}') => {
                    self.pos += 1;
                    break;
                }
                _ => return Err(self.error("expected ',' or '}' in object")),
            }
        }
        self.depth -= 1;
        Ok(Value::Object(map))
    }

    fn parse_array(&mut self) -> Result<Value> {
        self.expect(b'[')?;
        self.descend()?;
        let mut items = Vec::new();
        self.skip_ws();
        if self.peek() == Some(b']') {
            self.pos += 1;
            self.depth -= 1;
            return Ok(Value::Array(items));
        }
        loop {
            items.push(self.parse_value()?);
            self.skip_ws();
            match self.peek() {
                Some(b',') => self.pos += 1,
                Some(b']') => {
                    self.pos += 1;
                    break;
                }
                _ => return Err(self.error("expected ',' or ']' in array")),
            }
        }
        self.depth -= 1;
        Ok(Value::Array(items))
    }

    fn parse_string(&mut self) -> Result<String> {
        self.expect(b'"')?;
        let text = self.text;
        let mut out = String::new();
        loop {
            // Copy the run up to the next quote or backslash in one slice. Both
            // stop bytes are ASCII, so the slice ends on a char boundary.
            let run_start = self.pos;
            while let Some(b) = self.peek() {
                if b == b'"' || b == b'\\' {
                    break;
                }
                self.pos += 1;
            }
            out.push_str(&text[run_start..self.pos]);
            match self.bump() {
                None => return Err(self.error("unterminated string")),
                Some(b'"') => return Ok(out),
                Some(_) => self.parse_escape(&mut out)?,
            }
        }
    }

    /// Called with the cursor just past a backslash.
    fn parse_escape(&mut self, out: &mut String) -> Result<()> {
        let Some(esc) = self.peek() else {
            return Err(self.error("unterminated escape"));
        };
        match esc {
            b'"' => out.push('"'),
            b'\\' => out.push('\\'),
            b'/' => out.push('/'),
            b'b' => out.push('\u{08}'),
            b'f' => out.push('\u{0c}'),
            b'n' => out.push('\n'),
            b'r' => out.push('\r'),
            b't' => out.push('\t'),
            b'u' => {
                self.pos += 1;
                for _ in 0..4 {
                    match self.peek() {
                        Some(b) if b.is_ascii_hexdigit() => self.pos += 1,
                        _ => return Err(self.error("invalid \\u escape")),
                    }
                }
                out.push(UNICODE_PLACEHOLDER);
                return Ok(());
            }
            _ => return Err(self.error(format!("invalid escape \\{}", self.current_char()))),
        }
        self.pos += 1;
        Ok(())
    }

    fn parse_number(&mut self) -> Result<Value> {
        let text = self.text;
        let start = self.pos;
        if self.peek() == Some(b'-') {
            self.pos += 1;
        }
        self.skip_digits();
        if self.peek() == Some(b'.') {
            self.pos += 1;
            self.skip_digits();
            let literal = &text[start..self.pos];
            return match literal.parse::<f64>() {
                Ok(f) if f.is_finite() => Ok(Value::Float(f)),
                Ok(_) => Err(self.error_at(start, "float literal out of range")),
                Err(_) => Err(self.error_at(start, "invalid number literal")),
            };
        }
        let literal = &text[start..self.pos];
        if literal == "-" {
            return Err(self.error_at(start, "invalid number literal"));
        }
        literal
            .parse::<i64>()
            .map(Value::Integer)
            .map_err(|_| self.error_at(start, "integer literal out of range"))
    }

    fn parse_bool(&mut self) -> Result<Value> {
        let rest = &self.bytes[self.pos..];
        if rest.starts_with(b"true") {
            self.pos += 4;
            Ok(Value::Bool(true))
        } else if rest.starts_with(b"false") {
            self.pos += 5;
            Ok(Value::Bool(false))
        } else {
            Err(self.error("invalid boolean literal"))
        }
    }

    fn parse_null(&mut self) -> Result<Value> {
        if self.bytes[self.pos..].starts_with(b"null") {
            self.pos += 4;
            Ok(Value::Null)
        } else {
            Err(self.error("invalid null literal"))
        }
    }
}
