//! Relaxed object-literal parser.
//!
//! Metadata blocks are written as source-language object literals, not
//! strict JSON: they carry comments, unquoted keys, single-quoted strings,
//! and trailing commas. This reader tolerates all of that and produces a
//! `serde_json::Value`, so the normalizer sees one shape regardless of
//! where the block came from.
//!
//! Bare identifier values (`type: string`) are kept as strings; the
//! normalizer's presence/shape checks decide what to do with them.

use declgen_discovery::{MetadataParser, ParseError};
use serde_json::{Map, Number, Value};

/// Default [`MetadataParser`] implementation.
#[derive(Debug, Clone, Copy, Default)]
pub struct LiteralParser;

impl MetadataParser for LiteralParser {
    fn parse(&self, text: &str) -> Result<Value, ParseError> {
        let mut reader = Reader {
            bytes: text.as_bytes(),
            pos: 0,
        };
        reader.skip_trivia()?;
        let value = reader.parse_value()?;
        reader.skip_trivia()?;
        if reader.pos < reader.bytes.len() {
            return Err(reader.error("unexpected trailing input"));
        }
        Ok(value)
    }
}

struct Reader<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl Reader<'_> {
    fn peek(&self) -> Option<u8> {
        self.bytes.get(self.pos).copied()
    }

    fn peek_at(&self, offset: usize) -> Option<u8> {
        self.bytes.get(self.pos + offset).copied()
    }

    fn bump(&mut self) -> Option<u8> {
        let byte = self.peek()?;
        self.pos += 1;
        Some(byte)
    }

    fn error(&self, message: impl Into<String>) -> ParseError {
        ParseError {
            message: message.into(),
            offset: self.pos,
        }
    }

    /// Skips whitespace plus line and block comments.
    fn skip_trivia(&mut self) -> Result<(), ParseError> {
        loop {
            match self.peek() {
                Some(byte) if byte.is_ascii_whitespace() => {
                    self.pos += 1;
                }
                Some(b'/') if self.peek_at(1) == Some(b'/') => {
                    while let Some(byte) = self.peek() {
                        self.pos += 1;
                        if byte == b'\n' {
                            break;
                        }
                    }
                }
                Some(b'/') if self.peek_at(1) == Some(b'*') => {
                    let start = self.pos;
                    self.pos += 2;
                    loop {
                        match self.peek() {
                            Some(b'*') if self.peek_at(1) == Some(b'/') => {
                                self.pos += 2;
                                break;
                            }
                            Some(_) => self.pos += 1,
                            None => {
                                return Err(ParseError {
                                    message: "unterminated block comment".to_string(),
                                    offset: start,
                                });
                            }
                        }
                    }
                }
                _ => return Ok(()),
            }
        }
    }

    fn parse_value(&mut self) -> Result<Value, ParseError> {
        match self.peek() {
            Some(b'{') => self.parse_object(),
            Some(b'[') => self.parse_array(),
            Some(quote @ (b'"' | b'\'')) => Ok(Value::String(self.parse_string(quote)?)),
            Some(byte) if byte == b'-' || byte.is_ascii_digit() => self.parse_number(),
            Some(byte) if is_ident_start(byte) => {
                let ident = self.parse_ident();
                Ok(match ident.as_str() {
                    "true" => Value::Bool(true),
                    "false" => Value::Bool(false),
                    "null" => Value::Null,
                    _ => Value::String(ident),
                })
            }
            Some(_) => Err(self.error("unexpected character")),
            None => Err(self.error("unexpected end of input")),
        }
    }

    fn parse_object(&mut self) -> Result<Value, ParseError> {
        self.bump(); // `{`
        let mut record = Map::new();
        loop {
            self.skip_trivia()?;
            match self.peek() {
                Some(b'}') => {
                    self.bump();
                    return Ok(Value::Object(record));
                }
                Some(quote @ (b'"' | b'\'')) => {
                    let key = self.parse_string(quote)?;
                    self.parse_entry_into(&mut record, key)?;
                }
                Some(byte) if is_ident_start(byte) => {
                    let key = self.parse_ident();
                    self.parse_entry_into(&mut record, key)?;
                }
                Some(_) => return Err(self.error("expected a key or `}`")),
                None => return Err(self.error("unterminated object")),
            }
            self.skip_trivia()?;
            match self.peek() {
                Some(b',') => {
                    self.bump();
                }
                Some(b'}') => {
                    self.bump();
                    return Ok(Value::Object(record));
                }
                _ => return Err(self.error("expected `,` or `}`")),
            }
        }
    }

    // A duplicate key silently overwrites the earlier entry.
    fn parse_entry_into(
        &mut self,
        record: &mut Map<String, Value>,
        key: String,
    ) -> Result<(), ParseError> {
        self.skip_trivia()?;
        if self.peek() != Some(b':') {
            return Err(self.error("expected `:` after key"));
        }
        self.bump();
        self.skip_trivia()?;
        let value = self.parse_value()?;
        record.insert(key, value);
        Ok(())
    }

    fn parse_array(&mut self) -> Result<Value, ParseError> {
        self.bump(); // `[`
        let mut items = Vec::new();
        loop {
            self.skip_trivia()?;
            match self.peek() {
                Some(b']') => {
                    self.bump();
                    return Ok(Value::Array(items));
                }
                Some(_) => items.push(self.parse_value()?),
                None => return Err(self.error("unterminated array")),
            }
            self.skip_trivia()?;
            match self.peek() {
                Some(b',') => {
                    self.bump();
                }
                Some(b']') => {
                    self.bump();
                    return Ok(Value::Array(items));
                }
                _ => return Err(self.error("expected `,` or `]`")),
            }
        }
    }

    fn parse_string(&mut self, quote: u8) -> Result<String, ParseError> {
        let start = self.pos;
        self.bump(); // opening quote
        let mut contents = String::new();
        loop {
            match self.bump() {
                Some(byte) if byte == quote => return Ok(contents),
                Some(b'\\') => {
                    let escape_offset = self.pos - 1;
                    match self.bump() {
                        Some(b'n') => contents.push('\n'),
                        Some(b't') => contents.push('\t'),
                        Some(b'r') => contents.push('\r'),
                        Some(b'b') => contents.push('\u{8}'),
                        Some(b'f') => contents.push('\u{c}'),
                        Some(b'u') => contents.push(self.parse_unicode_escape(escape_offset)?),
                        Some(byte) => contents.push(byte as char),
                        None => {
                            return Err(ParseError {
                                message: "unterminated string".to_string(),
                                offset: start,
                            });
                        }
                    }
                }
                Some(byte) if byte.is_ascii() => contents.push(byte as char),
                Some(byte) => {
                    // Re-assemble the multi-byte UTF-8 sequence the byte
                    // cursor split apart.
                    let tail = 1 + (byte >= 0xE0) as usize + (byte >= 0xF0) as usize;
                    let end = self.pos + tail;
                    let slice = self
                        .bytes
                        .get(self.pos - 1..end)
                        .and_then(|bytes| std::str::from_utf8(bytes).ok())
                        .ok_or_else(|| self.error("invalid utf-8 in string"))?;
                    contents.push_str(slice);
                    self.pos = end;
                }
                None => {
                    return Err(ParseError {
                        message: "unterminated string".to_string(),
                        offset: start,
                    });
                }
            }
        }
    }

    fn parse_unicode_escape(&mut self, escape_offset: usize) -> Result<char, ParseError> {
        let mut code_point = 0u32;
        for _ in 0..4 {
            let digit = self
                .bump()
                .and_then(|byte| (byte as char).to_digit(16))
                .ok_or(ParseError {
                    message: "invalid unicode escape".to_string(),
                    offset: escape_offset,
                })?;
            code_point = code_point * 16 + digit;
        }
        char::from_u32(code_point).ok_or(ParseError {
            message: "invalid unicode escape".to_string(),
            offset: escape_offset,
        })
    }

    fn parse_number(&mut self) -> Result<Value, ParseError> {
        let start = self.pos;
        if self.peek() == Some(b'-') {
            self.bump();
        }
        while let Some(byte) = self.peek() {
            if byte.is_ascii_digit() || matches!(byte, b'.' | b'e' | b'E' | b'+' | b'-') {
                self.bump();
            } else {
                break;
            }
        }
        let text = std::str::from_utf8(&self.bytes[start..self.pos]).unwrap_or("");
        if let Ok(integer) = text.parse::<i64>() {
            return Ok(Value::Number(Number::from(integer)));
        }
        text.parse::<f64>()
            .ok()
            .and_then(Number::from_f64)
            .map(Value::Number)
            .ok_or(ParseError {
                message: "invalid number".to_string(),
                offset: start,
            })
    }

    fn parse_ident(&mut self) -> String {
        let start = self.pos;
        while let Some(byte) = self.peek() {
            if is_ident_part(byte) {
                self.bump();
            } else {
                break;
            }
        }
        String::from_utf8_lossy(&self.bytes[start..self.pos]).into_owned()
    }
}

fn is_ident_start(byte: u8) -> bool {
    byte.is_ascii_alphabetic() || byte == b'_' || byte == b'$'
}

fn is_ident_part(byte: u8) -> bool {
    byte.is_ascii_alphanumeric() || byte == b'_' || byte == b'$'
}
