//! # jsonkv-core
//!
//! Parser for a restricted JSON object grammar that stores the result in a
//! typed, nested, fixed-size hashtable.
//!
//! The grammar is a single object of `"key":value` pairs where a value is
//! `null`, an integer, a decimal float, `true`/`false`, a double-quoted string
//! or a nested object. There are no arrays, no escape sequences and no
//! exponent notation. Keys and values may contain `,`, `{`, `}` and `:` only
//! inside double quotes. Whitespace outside strings is ignored.
//!
//! ## Quick start
//!
//! ```rust
//! use jsonkv_core::{dispose, format, parse, TypedValue};
//!
//! let table = parse(br#"{"outer": {"inner": 2.5}, "name": "x"}"#).unwrap();
//! assert_eq!(table.get_path("outer.inner"), Some(&TypedValue::Float(2.5)));
//!
//! let rendered = format(&table);
//! assert!(rendered.contains("\"inner\": 2.5"));
//!
//! dispose(table);
//! ```
//!
//! ## Modules
//!
//! - [`splitter`]: cleaned text → top-level `key:value` fragments
//! - [`infer`]: raw token → [`ValueType`]
//! - [`value`]: [`TypedValue`] and token materialization
//! - [`table`]: the chained hashtable ([`Table`], [`Entry`])
//! - [`chain`]: overflow chain used by the table for collisions
//! - [`parser`]: [`parse`] / [`parse_with`] entry points
//! - [`format`](mod@format): renderings of a table
//! - [`config`]: limits ([`ParseConfig`])
//! - [`error`]: error types

pub mod chain;
pub mod config;
pub mod error;
pub mod format;
pub mod infer;
pub mod parser;
pub mod splitter;
pub mod table;
pub mod value;

pub use config::{ParseConfig, CAPACITY, MAX_KVP};
pub use error::{ConfigError, ParseError, TableError};
pub use format::{format, format_slots};
pub use infer::{infer_type, infer_type_with, ValueType};
pub use parser::{parse, parse_with};
pub use splitter::{split_top_level, strip_whitespace, Fragment};
pub use table::{hash_key, Entry, Table};
pub use value::{materialize, TypedValue};

/// Free a table obtained from [`parse`], nested tables included.
///
/// Ownership makes a second call impossible.
pub fn dispose(table: Table) {
    table.teardown();
}
