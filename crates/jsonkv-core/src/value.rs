//! Typed values and their construction from raw tokens.

use crate::error::{ParseError, Result};
use crate::infer::ValueType;
use crate::table::Table;
use serde::ser::{Serialize, Serializer};
use std::num::IntErrorKind;

/// A stored value. `Object` exclusively owns its nested table.
#[derive(Debug, Clone, PartialEq)]
pub enum TypedValue {
    Null,
    Int(i64),
    Float(f64),
    Bool(bool),
    String(String),
    Object(Table),
}

impl TypedValue {
    pub fn value_type(&self) -> ValueType {
        match self {
            TypedValue::Null => ValueType::Null,
            TypedValue::Int(_) => ValueType::Int,
            TypedValue::Float(_) => ValueType::Float,
            TypedValue::Bool(_) => ValueType::Bool,
            TypedValue::String(_) => ValueType::String,
            TypedValue::Object(_) => ValueType::Object,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, TypedValue::Null)
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            TypedValue::Int(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            TypedValue::Float(f) => Some(*f),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            TypedValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            TypedValue::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_table(&self) -> Option<&Table> {
        match self {
            TypedValue::Object(table) => Some(table),
            _ => None,
        }
    }

    pub fn as_table_mut(&mut self) -> Option<&mut Table> {
        match self {
            TypedValue::Object(table) => Some(table),
            _ => None,
        }
    }
}

impl From<i64> for TypedValue {
    fn from(n: i64) -> Self {
        TypedValue::Int(n)
    }
}

impl From<f64> for TypedValue {
    fn from(f: f64) -> Self {
        TypedValue::Float(f)
    }
}

impl From<bool> for TypedValue {
    fn from(b: bool) -> Self {
        TypedValue::Bool(b)
    }
}

impl From<&str> for TypedValue {
    fn from(s: &str) -> Self {
        TypedValue::String(s.to_string())
    }
}

impl From<String> for TypedValue {
    fn from(s: String) -> Self {
        TypedValue::String(s)
    }
}

impl From<Table> for TypedValue {
    fn from(table: Table) -> Self {
        TypedValue::Object(table)
    }
}

impl Serialize for TypedValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            TypedValue::Null => serializer.serialize_unit(),
            TypedValue::Int(n) => serializer.serialize_i64(*n),
            TypedValue::Float(f) => serializer.serialize_f64(*f),
            TypedValue::Bool(b) => serializer.serialize_bool(*b),
            TypedValue::String(s) => serializer.serialize_str(s),
            TypedValue::Object(table) => table.serialize(serializer),
        }
    }
}

/// Turn a classified token into an owned value.
///
/// `parse_nested` is called with the whole token when `ty` is
/// [`ValueType::Object`]; its error is returned unchanged and nothing it
/// built is kept.
///
/// ```
/// use jsonkv_core::{materialize, Table, TypedValue, ValueType};
///
/// let value = materialize("\"hello\"", ValueType::String, |_| Ok(Table::new(1))).unwrap();
/// assert_eq!(value, TypedValue::String("hello".into()));
/// ```
pub fn materialize<F>(token: &str, ty: ValueType, parse_nested: F) -> Result<TypedValue>
where
    F: FnOnce(&str) -> Result<Table>,
{
    match ty {
        ValueType::Null => Ok(TypedValue::Null),
        ValueType::Int => parse_int(token).map(TypedValue::Int),
        ValueType::Float => parse_float(token).map(TypedValue::Float),
        ValueType::Bool => parse_bool(token).map(TypedValue::Bool),
        ValueType::String => unquote(token)
            .map(|inner| TypedValue::String(inner.to_string()))
            .ok_or_else(|| ParseError::UnquotedString(token.to_string())),
        ValueType::Object => parse_nested(token).map(TypedValue::Object),
    }
}

/// Strip exactly one leading and one trailing double quote.
pub(crate) fn unquote(token: &str) -> Option<&str> {
    token.strip_prefix('"')?.strip_suffix('"')
}

fn parse_int(token: &str) -> Result<i64> {
    token.parse::<i64>().map_err(|e| match e.kind() {
        IntErrorKind::PosOverflow | IntErrorKind::NegOverflow => {
            ParseError::NumericOverflow(token.to_string())
        }
        _ => ParseError::InvalidNumber(token.to_string()),
    })
}

fn parse_float(token: &str) -> Result<f64> {
    let value = token
        .parse::<f64>()
        .map_err(|_| ParseError::InvalidNumber(token.to_string()))?;
    if !value.is_finite() {
        return Err(ParseError::NumericOverflow(token.to_string()));
    }
    Ok(value)
}

fn parse_bool(token: &str) -> Result<bool> {
    if token.eq_ignore_ascii_case("true") {
        Ok(true)
    } else if token.eq_ignore_ascii_case("false") {
        Ok(false)
    } else {
        Err(ParseError::Malformed(format!("not a boolean: {token}")))
    }
}
