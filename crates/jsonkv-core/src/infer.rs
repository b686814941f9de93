//! Value type inference from the raw shape of a token.

use std::fmt;

/// The six kinds of value a token can hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueType {
    Null,
    Int,
    Float,
    Bool,
    String,
    Object,
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ValueType::Null => "null",
            ValueType::Int => "int",
            ValueType::Float => "float",
            ValueType::Bool => "bool",
            ValueType::String => "string",
            ValueType::Object => "object",
        };
        f.write_str(name)
    }
}

/// Classify a value token, first match wins:
///
/// 1. `null` in any case → `Null`
/// 2. only digits and `.` → `Float` when a `.` is present, `Int` otherwise
/// 3. `true` / `false` in any case → `Bool`
/// 4. starts with `{` and ends with `}` → `Object`
/// 5. anything else → `String`
///
/// The numeric check runs before the boolean and object checks. Only the
/// shape is inspected; whether the token actually parses is decided when the
/// value is materialized. A leading `-` is not numeric here, so `-5` is a
/// `String`; see [`infer_type_with`] for the signed grammar.
///
/// ```
/// use jsonkv_core::{infer_type, ValueType};
///
/// assert_eq!(infer_type("NULL"), ValueType::Null);
/// assert_eq!(infer_type("2.5"), ValueType::Float);
/// assert_eq!(infer_type("-5"), ValueType::String);
/// assert_eq!(infer_type("\"2.5\""), ValueType::String);
/// assert_eq!(infer_type("{\"a\":1}"), ValueType::Object);
/// ```
pub fn infer_type(token: &str) -> ValueType {
    infer_type_with(token, false)
}

/// Like [`infer_type`], but with `signed` set one leading `-` may precede
/// the digits of a number.
///
/// ```
/// use jsonkv_core::{infer_type_with, ValueType};
///
/// assert_eq!(infer_type_with("-5", true), ValueType::Int);
/// assert_eq!(infer_type_with("-5", false), ValueType::String);
/// ```
pub fn infer_type_with(token: &str, signed: bool) -> ValueType {
    if token.eq_ignore_ascii_case("null") {
        return ValueType::Null;
    }

    if is_numeric(token, signed) {
        if token.contains('.') {
            return ValueType::Float;
        }
        return ValueType::Int;
    }

    if token.eq_ignore_ascii_case("true") || token.eq_ignore_ascii_case("false") {
        return ValueType::Bool;
    }

    if token.len() >= 2 && token.starts_with('{') && token.ends_with('}') {
        return ValueType::Object;
    }

    ValueType::String
}

fn is_numeric(token: &str, signed: bool) -> bool {
    let digits = match token.strip_prefix('-') {
        Some(rest) if signed => rest,
        _ => token,
    };
    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit() || b == b'.')
}
