//! Human-readable renderings of a [`Table`].
//!
//! [`format`] produces indented object syntax that [`parse`](crate::parse)
//! reads back: keys are listed slot by slot, each primary entry followed by
//! its overflow chain. [`format_slots`] is a diagnostic dump that also shows
//! where every entry lives.

use crate::table::Table;
use crate::value::TypedValue;
use std::fmt::{self, Write};

const INDENT: &str = "  ";

/// Render a table as indented object text.
///
/// ```
/// use jsonkv_core::{format, parse};
///
/// let table = parse(br#"{"outer":{"inner":2.5}}"#).unwrap();
/// assert_eq!(format(&table), "{\n  \"outer\": {\n    \"inner\": 2.5\n  }\n}");
/// ```
pub fn format(table: &Table) -> String {
    let mut out = String::new();
    write_table(table, 0, &mut out);
    out
}

/// Render every entry with its slot index, one line per entry.
///
/// Chained entries carry their position in the chain. Nested tables are
/// listed below their key, indented by one level.
pub fn format_slots(table: &Table) -> String {
    SlotDump(table).to_string()
}

/// Render a float so that it is read back as a float: always with a `.`,
/// never in exponent notation.
pub fn format_float(f: f64) -> String {
    let mut s = f.to_string();
    if !s.contains('.') {
        s.push_str(".0");
    }
    s
}

fn write_table(table: &Table, depth: usize, out: &mut String) {
    if table.is_empty() {
        out.push_str("{}");
        return;
    }
    out.push_str("{\n");
    for (i, entry) in table.iter().enumerate() {
        if i > 0 {
            out.push_str(",\n");
        }
        push_indent(depth + 1, out);
        out.push('"');
        out.push_str(&entry.key);
        out.push_str("\": ");
        write_value(&entry.value, depth + 1, out);
    }
    out.push('\n');
    push_indent(depth, out);
    out.push('}');
}

fn write_value(value: &TypedValue, depth: usize, out: &mut String) {
    match value {
        TypedValue::Null => out.push_str("null"),
        TypedValue::Int(n) => out.push_str(&n.to_string()),
        TypedValue::Float(f) => out.push_str(&format_float(*f)),
        TypedValue::Bool(b) => out.push_str(if *b { "true" } else { "false" }),
        TypedValue::String(s) => {
            out.push('"');
            out.push_str(s);
            out.push('"');
        }
        TypedValue::Object(table) => write_table(table, depth, out),
    }
}

fn write_slots<W: Write>(table: &Table, depth: usize, out: &mut W) -> fmt::Result {
    for (index, chain_pos, entry) in table.iter_slots() {
        for _ in 0..depth * 2 {
            out.write_str(INDENT)?;
        }
        match chain_pos {
            None => write!(out, "INDEX: {index}, KEY: {}, VALUE: ", entry.key)?,
            Some(pos) => write!(out, "INDEX: {index}, CHAIN: {pos}, KEY: {}, VALUE: ", entry.key)?,
        }
        match &entry.value {
            TypedValue::String(s) => writeln!(out, "{s}")?,
            TypedValue::Null => writeln!(out, "(NULL)")?,
            TypedValue::Object(nested) => {
                writeln!(out, "TABLE ({} keys)", nested.len())?;
                write_slots(nested, depth + 1, out)?;
            }
            other => writeln!(out, "{other}")?,
        }
    }
    Ok(())
}

/// Slot dump of a table, rendered through [`fmt::Display`].
struct SlotDump<'a>(&'a Table);

impl fmt::Display for SlotDump<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_slots(self.0, 0, f)
    }
}

fn push_indent(depth: usize, out: &mut String) {
    for _ in 0..depth {
        out.push_str(INDENT);
    }
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format(self))
    }
}

impl fmt::Display for TypedValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut out = String::new();
        write_value(self, 0, &mut out);
        f.write_str(&out)
    }
}
