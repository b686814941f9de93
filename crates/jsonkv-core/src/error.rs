//! Error types for parsing and table operations.

use thiserror::Error;

/// Errors raised by the hashtable storage engine.
///
/// Both variants are recoverable: the table that produced them is left
/// unchanged and remains usable.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TableError {
    /// The key hashed to an empty primary slot but every primary slot the
    /// table may occupy is already taken.
    #[error("table is full ({capacity} primary slots occupied), cannot insert key {key:?}")]
    TableFull { key: String, capacity: usize },

    /// A search or delete did not find the key.
    #[error("key not found: {0:?}")]
    KeyNotFound(String),
}

/// Errors that abort a `parse` call.
///
/// A parse that fails returns no table; anything built before the failure
/// (including nested tables) is dropped. A full table does not abort a
/// parse: the pair is skipped with a warning.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseError {
    /// Structural problem: missing outer braces, unbalanced nesting,
    /// a fragment without a `:`, an empty value, trailing data.
    #[error("malformed input: {0}")]
    Malformed(String),

    /// A key that is not wrapped in double quotes.
    #[error("key is not a quoted string: {0}")]
    UnquotedKey(String),

    /// A value classified as a string that lacks its surrounding quotes.
    #[error("string value is not quoted: {0}")]
    UnquotedString(String),

    /// A token shaped like a number that does not parse as one (`1.2.3`, `.`).
    #[error("invalid number: {0}")]
    InvalidNumber(String),

    /// An integer outside the `i64` range, or a float that parses to a
    /// non-finite value.
    #[error("numeric overflow: {0}")]
    NumericOverflow(String),

    /// Objects nested deeper than the configured limit.
    #[error("objects nested deeper than {max} levels")]
    TooDeep { max: usize },

    /// The body exceeds the configured maximum length.
    #[error("body is {len} bytes, maximum is {max}")]
    BodyTooLarge { len: usize, max: usize },

    /// The body is not valid UTF-8.
    #[error("body is not valid UTF-8: {0}")]
    InvalidUtf8(#[from] std::str::Utf8Error),

    /// A table operation failed. Lets `?` lift a [`TableError`] inside code
    /// that returns [`Result`].
    #[error(transparent)]
    Table(#[from] TableError),
}

/// Errors raised while loading a [`ParseConfig`](crate::config::ParseConfig).
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The config document is not valid JSON or has wrongly typed fields.
    #[error("config parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// The values parsed but are inconsistent.
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Convenience alias used throughout jsonkv-core.
pub type Result<T> = std::result::Result<T, ParseError>;
