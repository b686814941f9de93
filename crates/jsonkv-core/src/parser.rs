//! Parse entry points: body bytes → nested [`Table`].
//!
//! The pipeline for one object is split → infer → materialize → insert.
//! Nested objects re-enter [`parse_object`] one level deeper. A pair that
//! finds its table full is skipped with a warning and the parse goes on. Any
//! other error aborts the whole parse; tables built so far are dropped on the
//! way out.

use crate::config::ParseConfig;
use crate::error::{ParseError, Result, TableError};
use crate::infer::infer_type_with;
use crate::splitter::{split_top_level, strip_whitespace};
use crate::table::Table;
use crate::value::{materialize, unquote};
use log::{debug, warn};

/// Parse a request body with the default [`ParseConfig`].
///
/// The body may be NUL-terminated; everything from the first NUL byte on is
/// ignored.
///
/// ```
/// use jsonkv_core::{parse, TypedValue};
///
/// let table = parse(br#"{"a":1,"b":"hello","c":true}"#).unwrap();
/// assert_eq!(table.get("a"), Some(&TypedValue::Int(1)));
/// assert_eq!(table.get("b"), Some(&TypedValue::String("hello".into())));
/// assert_eq!(table.get("c"), Some(&TypedValue::Bool(true)));
/// ```
pub fn parse(buffer: &[u8]) -> Result<Table> {
    parse_with(buffer, &ParseConfig::default())
}

/// Parse a request body with explicit limits.
pub fn parse_with(buffer: &[u8], config: &ParseConfig) -> Result<Table> {
    let body = match buffer.iter().position(|&b| b == 0) {
        Some(end) => &buffer[..end],
        None => buffer,
    };
    if body.len() > config.max_body_len {
        return Err(ParseError::BodyTooLarge {
            len: body.len(),
            max: config.max_body_len,
        });
    }
    let text = std::str::from_utf8(body)?;
    let cleaned = strip_whitespace(text);
    debug!(
        "parsing body of {} bytes ({} after cleaning)",
        body.len(),
        cleaned.len()
    );
    parse_object(&cleaned, config, 1)
}

/// Build the table for one cleaned `{...}` object at nesting level `depth`.
pub fn parse_object(text: &str, config: &ParseConfig, depth: usize) -> Result<Table> {
    if depth > config.max_depth {
        return Err(ParseError::TooDeep {
            max: config.max_depth,
        });
    }

    let fragments = split_top_level(text, config.max_kvp)?;
    debug!("depth {depth}: {} pair(s)", fragments.len());

    let mut table = Table::from_config(config);
    for fragment in fragments {
        let (raw_key, token) = fragment.key_value()?;
        let key = unquote(raw_key).ok_or_else(|| ParseError::UnquotedKey(raw_key.to_string()))?;
        let ty = infer_type_with(token, config.signed_numbers);
        let value = materialize(token, ty, |nested| parse_object(nested, config, depth + 1))?;
        match table.insert(key, value) {
            Ok(_) => {}
            Err(TableError::TableFull { key, capacity }) => {
                warn!("depth {depth}: table full ({capacity} slots occupied), skipping key {key:?}");
            }
            Err(err) => return Err(err.into()),
        }
    }
    Ok(table)
}
