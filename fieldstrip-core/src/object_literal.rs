//! A tolerant scanner for object literals in JavaScript and JSON sources.
//!
//! The scanner does not evaluate or fully parse JavaScript. It walks the
//! text once, skipping string literals, template literals and comments, and
//! records every `{ ... }` it meets as an [`ObjectLiteral`] with the byte
//! spans of its entries. Keys are recognized when an entry starts with a
//! quoted string or a bare identifier followed by `:`.
//!
//! All delimiters the scanner cares about are ASCII, so it works on bytes
//! and every span it reports falls on a UTF-8 character boundary.
//!
//! Known limitation: JavaScript regular expression literals are not
//! recognized; a quote inside one can desynchronize string tracking.

use crate::errors::StripError;

/// A byte range `[start, end)` into the scanned source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn text<'a>(&self, source: &'a str) -> &'a str {
        &source[self.start..self.end]
    }
}

/// The key of an entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Key {
    /// The key as written, without quotes. Escapes are not decoded.
    pub name: String,
    /// The quote character, or `None` for a bare identifier.
    pub quote: Option<char>,
}

/// One member of an object literal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    /// From the first significant byte of the entry to the end of its value.
    /// Separating commas, whitespace and comments are outside the span.
    pub span: Span,
    /// Present for `key: value` entries; shorthand, spread and method
    /// entries have no key.
    pub key: Option<Key>,
    /// Trimmed value span of a `key: value` entry.
    pub value: Option<Span>,
    /// Offset of the comma that separates this entry from the next one.
    pub comma: Option<usize>,
}

/// A `{ ... }` block and its entries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectLiteral {
    /// Offset of `{`.
    pub open: usize,
    /// Offset of the matching `}`.
    pub close: usize,
    pub entries: Vec<Entry>,
}

/// Scans `source` and returns every object literal found, in order of their
/// closing braces (inner objects come before the objects that contain them).
pub fn scan(source: &str) -> Result<Vec<ObjectLiteral>, StripError> {
    let mut scanner = Scanner {
        src: source,
        bytes: source.as_bytes(),
        pos: 0,
        objects: Vec::new(),
    };
    scanner.scan_block(None)?;
    Ok(scanner.objects)
}

struct Scanner<'a> {
    src: &'a str,
    bytes: &'a [u8],
    pos: usize,
    objects: Vec<ObjectLiteral>,
}

fn is_ident_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_' || b == b'$' || b >= 0x80
}

impl<'a> Scanner<'a> {
    fn peek(&self) -> Option<u8> {
        self.bytes.get(self.pos).copied()
    }

    fn peek_at(&self, offset: usize) -> Option<u8> {
        self.bytes.get(self.pos + offset).copied()
    }

    fn error(&self, offset: usize, message: &str) -> StripError {
        StripError::parse_at(self.src, offset, message)
    }

    /// Skips whitespace and comments.
    fn skip_trivia(&mut self) -> Result<(), StripError> {
        while let Some(b) = self.peek() {
            match b {
                b' ' | b'\t' | b'\n' | b'\r' | 0x0b | 0x0c => self.pos += 1,
                b'/' if self.peek_at(1) == Some(b'/') => {
                    while let Some(c) = self.peek() {
                        if c == b'\n' {
                            break;
                        }
                        self.pos += 1;
                    }
                }
                b'/' if self.peek_at(1) == Some(b'*') => {
                    let start = self.pos;
                    self.pos += 2;
                    loop {
                        match self.peek() {
                            None => return Err(self.error(start, "unterminated block comment")),
                            Some(b'*') if self.peek_at(1) == Some(b'/') => {
                                self.pos += 2;
                                break;
                            }
                            Some(_) => self.pos += 1,
                        }
                    }
                }
                _ => break,
            }
        }
        Ok(())
    }

    /// Skips a string or template literal. `pos` must be on the opening quote.
    fn skip_string(&mut self) -> Result<(), StripError> {
        let start = self.pos;
        let quote = self.bytes[start];
        self.pos += 1;
        loop {
            match self.peek() {
                None => return Err(self.error(start, "unterminated string literal")),
                Some(b'\\') => self.pos += 2,
                Some(b'\n') if quote != b'`' => {
                    return Err(self.error(start, "unterminated string literal"))
                }
                Some(b'$') if quote == b'`' && self.peek_at(1) == Some(b'{') => {
                    self.pos += 2;
                    self.scan_block(Some(b'}'))?;
                }
                Some(c) if c == quote => {
                    self.pos += 1;
                    return Ok(());
                }
                Some(_) => self.pos += 1,
            }
        }
    }

    /// Scans arbitrary code until `closer` (consumed) or end of input.
    fn scan_block(&mut self, closer: Option<u8>) -> Result<(), StripError> {
        let start = self.pos.saturating_sub(1);
        loop {
            self.skip_trivia()?;
            let Some(b) = self.peek() else {
                return match closer {
                    Some(c) => Err(self.error(
                        start,
                        &format!("unclosed '{}'", opener_for(c) as char),
                    )),
                    None => Ok(()),
                };
            };
            match b {
                b'{' => self.scan_object()?,
                b'[' => {
                    self.pos += 1;
                    self.scan_block(Some(b']'))?;
                }
                b'(' => {
                    self.pos += 1;
                    self.scan_block(Some(b')'))?;
                }
                b'"' | b'\'' | b'`' => self.skip_string()?,
                c if Some(c) == closer => {
                    self.pos += 1;
                    return Ok(());
                }
                b'}' | b']' | b')' => {
                    return Err(self.error(self.pos, &format!("unexpected '{}'", b as char)))
                }
                _ => self.pos += 1,
            }
        }
    }

    /// Scans one object literal. `pos` must be on `{`.
    fn scan_object(&mut self) -> Result<(), StripError> {
        let open = self.pos;
        self.pos += 1;
        let mut entries = Vec::new();

        let close = loop {
            self.skip_trivia()?;
            match self.peek() {
                None => return Err(self.error(open, "unterminated object literal")),
                Some(b'}') => break self.pos,
                Some(b',') => {
                    self.pos += 1;
                    continue;
                }
                Some(_) => {}
            }

            let entry_start = self.pos;
            let key = self.scan_key()?;
            let after_key = self.pos;
            self.skip_trivia()?;

            let (key, value, end) = match (key, self.peek()) {
                (Some(key), Some(b':')) => {
                    self.pos += 1;
                    self.skip_trivia()?;
                    let value_start = self.pos;
                    let value_end = self.scan_value()?.max(value_start);
                    let value = Span { start: value_start, end: value_end };
                    (Some(key), Some(value), value_end)
                }
                _ => {
                    self.pos = after_key;
                    let end = self.scan_value()?;
                    (None, None, end.max(after_key))
                }
            };

            let comma = if self.peek() == Some(b',') {
                self.pos += 1;
                Some(self.pos - 1)
            } else {
                None
            };

            entries.push(Entry {
                span: Span { start: entry_start, end: end.max(entry_start) },
                key,
                value,
                comma,
            });
        };

        self.pos = close + 1;
        self.objects.push(ObjectLiteral { open, close, entries });
        Ok(())
    }

    /// Reads a quoted or bare key, if the entry starts with one.
    fn scan_key(&mut self) -> Result<Option<Key>, StripError> {
        let start = self.pos;
        match self.peek() {
            Some(q @ (b'"' | b'\'')) => {
                self.skip_string()?;
                Ok(Some(Key {
                    name: self.src[start + 1..self.pos - 1].to_string(),
                    quote: Some(q as char),
                }))
            }
            Some(b) if is_ident_byte(b) => {
                while self.peek().is_some_and(is_ident_byte) {
                    self.pos += 1;
                }
                Ok(Some(Key {
                    name: self.src[start..self.pos].to_string(),
                    quote: None,
                }))
            }
            _ => Ok(None),
        }
    }

    /// Scans a value up to (not including) the `,` or `}` that ends it and
    /// returns the end offset of its last significant byte.
    fn scan_value(&mut self) -> Result<usize, StripError> {
        let mut last_end = self.pos;
        loop {
            self.skip_trivia()?;
            let Some(b) = self.peek() else {
                // The enclosing object reports the unterminated brace.
                return Ok(last_end);
            };
            match b {
                b',' | b'}' => return Ok(last_end),
                b'{' => self.scan_object()?,
                b'[' => {
                    self.pos += 1;
                    self.scan_block(Some(b']'))?;
                }
                b'(' => {
                    self.pos += 1;
                    self.scan_block(Some(b')'))?;
                }
                b'"' | b'\'' | b'`' => self.skip_string()?,
                b']' | b')' => {
                    return Err(self.error(self.pos, &format!("unexpected '{}'", b as char)))
                }
                _ => self.pos += 1,
            }
            last_end = self.pos;
        }
    }
}

fn opener_for(closer: u8) -> u8 {
    match closer {
        b'}' => b'{',
        b']' => b'[',
        _ => b'(',
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keys(obj: &ObjectLiteral) -> Vec<Option<&str>> {
        obj.entries
            .iter()
            .map(|e| e.key.as_ref().map(|k| k.name.as_str()))
            .collect()
    }

    #[test]
    fn scans_flat_json_object() {
        let src = r#"{"name": "Dish A", "isSpicy": true, "cookingTime": 30}"#;
        let objects = scan(src).unwrap();
        assert_eq!(objects.len(), 1);
        let obj = &objects[0];
        assert_eq!(obj.open, 0);
        assert_eq!(obj.close, src.len() - 1);
        assert_eq!(keys(obj), vec![Some("name"), Some("isSpicy"), Some("cookingTime")]);
        let value = obj.entries[1].value.unwrap();
        assert_eq!(value.text(src), "true");
        assert_eq!(obj.entries[2].span.text(src), r#""cookingTime": 30"#);
    }

    #[test]
    fn inner_objects_come_first() {
        let src = r#"[{"a": {"b": 1}}, {"c": [1, {"d": 2}]}]"#;
        let objects = scan(src).unwrap();
        assert_eq!(objects.len(), 4);
        assert_eq!(keys(&objects[0]), vec![Some("b")]);
        assert_eq!(keys(&objects[1]), vec![Some("a")]);
        assert_eq!(keys(&objects[2]), vec![Some("d")]);
        assert_eq!(keys(&objects[3]), vec![Some("c")]);
        assert_eq!(objects[1].entries[0].value.unwrap().text(src), r#"{"b": 1}"#);
    }

    #[test]
    fn bare_and_single_quoted_keys() {
        let src = "const d = { name: 'x', 'isSpicy': false, cookingTime: 5 };";
        let objects = scan(src).unwrap();
        let obj = &objects[0];
        assert_eq!(keys(obj), vec![Some("name"), Some("isSpicy"), Some("cookingTime")]);
        assert_eq!(obj.entries[1].key.as_ref().unwrap().quote, Some('\''));
        assert_eq!(obj.entries[0].key.as_ref().unwrap().quote, None);
    }

    #[test]
    fn ignores_braces_in_strings_and_comments() {
        let src = "{ a: \"}{\", /* } */ b: 1, // {\n c: `${ {x: 1}.x }` }";
        let objects = scan(src).unwrap();
        let outer = objects.last().unwrap();
        assert_eq!(keys(outer), vec![Some("a"), Some("b"), Some("c")]);
        assert_eq!(outer.entries[1].value.unwrap().text(src), "1");
    }

    #[test]
    fn value_span_excludes_trailing_comment() {
        let src = "{ isSpicy: Math.random() > 0.6, // 40%\n cookingTime: 5 /* min */ }";
        let obj = &scan(src).unwrap()[0];
        assert_eq!(obj.entries[0].value.unwrap().text(src), "Math.random() > 0.6");
        assert_eq!(obj.entries[1].value.unwrap().text(src), "5");
    }

    #[test]
    fn shorthand_spread_and_methods_have_no_key() {
        let src = "{ name, ...rest, go() { return 1 }, tags: [] }";
        let objects = scan(src).unwrap();
        let outer = objects.last().unwrap();
        assert_eq!(keys(outer), vec![None, None, None, Some("tags")]);
        assert_eq!(outer.entries[2].span.text(src), "go() { return 1 }");
    }

    #[test]
    fn trailing_comma_is_not_an_entry() {
        let src = "{\n  a: 1,\n  b: 2,\n}";
        let obj = &scan(src).unwrap()[0];
        assert_eq!(obj.entries.len(), 2);
        assert_eq!(obj.entries[1].span.text(src), "b: 2");
        assert_eq!(obj.entries[1].comma, Some(src.len() - 3));
    }

    #[test]
    fn records_separator_comma_after_comment() {
        let src = "{ a: 1 /* x, y */ , b: 2 }";
        let obj = &scan(src).unwrap()[0];
        assert_eq!(obj.entries[0].comma, src.find(" , ").map(|i| i + 1));
        assert_eq!(obj.entries[1].comma, None);
    }

    #[test]
    fn multibyte_text_keeps_char_boundaries() {
        let src = "{ name: '宫保鸡丁', note: 清淡 }";
        let obj = &scan(src).unwrap()[0];
        assert_eq!(obj.entries[0].value.unwrap().text(src), "'宫保鸡丁'");
        assert_eq!(obj.entries[1].value.unwrap().text(src), "清淡");
    }

    #[test]
    fn reports_unterminated_object() {
        let err = scan("[\n  {\"a\": 1,\n").unwrap_err();
        assert!(matches!(err, StripError::Parse { line: 2, column: 3, .. }), "{err}");
    }

    #[test]
    fn reports_unterminated_string() {
        let err = scan("{\"a\": \"oops}\n").unwrap_err();
        assert!(err.to_string().contains("unterminated string literal"));
    }

    #[test]
    fn reports_mismatched_closer() {
        let err = scan("{ a: [1, 2 }").unwrap_err();
        assert!(err.to_string().contains("unexpected '}'"), "{err}");
    }
}
