//! Depth-aware splitting of an object into its top-level `key:value` fragments.
//!
//! The splitter works on cleaned text (see [`strip_whitespace`]) and only
//! understands braces, commas and double quotes:
//!
//! - `{` / `}` raise and lower the nesting level
//! - a `,` at level 1 ends a fragment
//! - the `}` that brings the level back to 0 ends the last fragment
//! - a `"` toggles string mode; braces, commas and colons inside a string
//!   are content
//!
//! There are no escape sequences, so a string cannot contain a `"`.
//! A nested object is never looked into here: its whole `{...}` text stays
//! inside the fragment and is split again when that value is materialized.

use crate::error::{ParseError, Result};
use log::{debug, warn};

/// One raw `key:value` pair found at nesting level 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fragment<'a> {
    text: &'a str,
}

impl<'a> Fragment<'a> {
    pub fn as_str(&self) -> &'a str {
        self.text
    }

    /// Split at the first `:` outside a string into `(key, value)` tokens.
    pub fn key_value(&self) -> Result<(&'a str, &'a str)> {
        let colon = find_outside_strings(self.text, b':').ok_or_else(|| {
            ParseError::Malformed(format!("missing ':' in pair {:?}", self.text))
        })?;
        let (key, value) = (&self.text[..colon], &self.text[colon + 1..]);
        if value.is_empty() {
            return Err(ParseError::Malformed(format!("missing value for key {key}")));
        }
        Ok((key, value))
    }
}

/// Remove whitespace that sits outside string literals.
pub fn strip_whitespace(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_string = false;
    for c in text.chars() {
        if c == '"' {
            in_string = !in_string;
        }
        if in_string || !c.is_whitespace() {
            out.push(c);
        }
    }
    out
}

/// Split a cleaned object into its top-level fragments.
///
/// At most `max_kvp` fragments are returned; later ones are dropped with a
/// warning. The whole text is still checked for balanced braces and quotes.
/// `{}` yields no fragments; any other empty fragment (`{"a":1,}`) is
/// malformed.
///
/// ```
/// use jsonkv_core::split_top_level;
///
/// let fragments = split_top_level(r#"{"a":1,"b":{"c":2,"d":3}}"#, 1024).unwrap();
/// let raw: Vec<&str> = fragments.iter().map(|f| f.as_str()).collect();
/// assert_eq!(raw, [r#""a":1"#, r#""b":{"c":2,"d":3}"#]);
/// ```
pub fn split_top_level(text: &str, max_kvp: usize) -> Result<Vec<Fragment<'_>>> {
    if text.len() < 2 || !text.starts_with('{') || !text.ends_with('}') {
        return Err(ParseError::Malformed(format!(
            "expected an object wrapped in braces, got {text:?}"
        )));
    }

    let mut splitter = Splitter::new(max_kvp);
    let mut depth = 0usize;
    let mut start = 0;
    let mut in_string = false;
    let mut closed = false;

    for (i, byte) in text.bytes().enumerate() {
        if closed {
            return Err(ParseError::Malformed(format!(
                "unexpected data after closing brace: {:?}",
                &text[i..]
            )));
        }
        match byte {
            b'"' => in_string = !in_string,
            _ if in_string => {}
            b'{' => {
                depth += 1;
                if depth == 1 {
                    start = i + 1;
                }
            }
            b'}' => {
                depth -= 1;
                if depth == 0 {
                    splitter.push(&text[start..i]);
                    closed = true;
                }
            }
            b',' if depth == 1 => {
                splitter.push(&text[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }

    if in_string {
        return Err(ParseError::Malformed("unterminated string".to_string()));
    }
    if depth != 0 {
        return Err(ParseError::Malformed(format!(
            "unbalanced braces, {depth} object(s) left open"
        )));
    }
    splitter.finish()
}

/// Collects fragments while enforcing the count bound.
struct Splitter<'a> {
    fragments: Vec<Fragment<'a>>,
    max_kvp: usize,
    seen: usize,
    empty: bool,
}

impl<'a> Splitter<'a> {
    fn new(max_kvp: usize) -> Self {
        Self {
            fragments: Vec::new(),
            max_kvp,
            seen: 0,
            empty: false,
        }
    }

    fn push(&mut self, text: &'a str) {
        self.seen += 1;
        if text.is_empty() {
            self.empty = true;
            return;
        }
        if self.fragments.len() < self.max_kvp {
            self.fragments.push(Fragment { text });
        }
    }

    fn finish(self) -> Result<Vec<Fragment<'a>>> {
        if self.empty {
            // `{}` is the only place an empty fragment is allowed.
            if self.seen == 1 {
                return Ok(Vec::new());
            }
            return Err(ParseError::Malformed("empty key/value pair".to_string()));
        }
        if self.seen > self.max_kvp {
            warn!(
                "object has {} pairs, keeping the first {} and dropping {}",
                self.seen,
                self.max_kvp,
                self.seen - self.max_kvp
            );
        }
        debug!("split object into {} fragment(s)", self.fragments.len());
        Ok(self.fragments)
    }
}

fn find_outside_strings(text: &str, needle: u8) -> Option<usize> {
    let mut in_string = false;
    for (i, byte) in text.bytes().enumerate() {
        match byte {
            b'"' => in_string = !in_string,
            b if b == needle && !in_string => return Some(i),
            _ => {}
        }
    }
    None
}
