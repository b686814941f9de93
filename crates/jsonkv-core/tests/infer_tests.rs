use jsonkv_core::{infer_type, infer_type_with, materialize, ParseError, Table, TypedValue, ValueType};

fn no_nested(_: &str) -> Result<Table, ParseError> {
    panic!("nested parse should not be called")
}

// ============================================================================
// Type inference
// ============================================================================

#[test]
fn null_in_any_case() {
    for token in ["null", "NULL", "Null", "nUlL"] {
        assert_eq!(infer_type(token), ValueType::Null, "{token}");
    }
}

#[test]
fn digits_are_int_digits_with_dot_are_float() {
    assert_eq!(infer_type("0"), ValueType::Int);
    assert_eq!(infer_type("12345"), ValueType::Int);
    assert_eq!(infer_type("1.5"), ValueType::Float);
    assert_eq!(infer_type(".5"), ValueType::Float);
}

#[test]
fn leading_minus_is_not_numeric_by_default() {
    assert_eq!(infer_type("-12"), ValueType::String);
    assert_eq!(infer_type("-0.25"), ValueType::String);
    assert_eq!(infer_type_with("-12", false), ValueType::String);
}

#[test]
fn signed_grammar_accepts_one_leading_minus() {
    assert_eq!(infer_type_with("-12", true), ValueType::Int);
    assert_eq!(infer_type_with("-0.25", true), ValueType::Float);
    assert_eq!(infer_type_with("12", true), ValueType::Int);
    assert_eq!(infer_type_with("-", true), ValueType::String);
    assert_eq!(infer_type_with("--1", true), ValueType::String);
    assert_eq!(infer_type_with("1-", true), ValueType::String);
}

#[test]
fn numeric_shape_wins_even_when_unparseable() {
    assert_eq!(infer_type("1.2.3"), ValueType::Float);
    assert_eq!(infer_type("."), ValueType::Float);
}

#[test]
fn not_numeric_shapes() {
    assert_eq!(infer_type("-"), ValueType::String);
    assert_eq!(infer_type("1e5"), ValueType::String);
    assert_eq!(infer_type("+1"), ValueType::String);
    assert_eq!(infer_type("--1"), ValueType::String);
    assert_eq!(infer_type(""), ValueType::String);
}

#[test]
fn booleans_in_any_case() {
    for token in ["true", "TRUE", "False", "fAlSe"] {
        assert_eq!(infer_type(token), ValueType::Bool, "{token}");
    }
    assert_eq!(infer_type("truthy"), ValueType::String);
}

#[test]
fn braces_mean_object() {
    assert_eq!(infer_type("{}"), ValueType::Object);
    assert_eq!(infer_type(r#"{"a":1}"#), ValueType::Object);
    assert_eq!(infer_type("{"), ValueType::String);
    assert_eq!(infer_type(r#""{}""#), ValueType::String);
}

#[test]
fn everything_else_is_string() {
    assert_eq!(infer_type(r#""hello""#), ValueType::String);
    assert_eq!(infer_type(r#""null""#), ValueType::String);
    assert_eq!(infer_type("hello"), ValueType::String);
}

#[test]
fn value_type_display() {
    assert_eq!(ValueType::Object.to_string(), "object");
    assert_eq!(TypedValue::Int(1).value_type(), ValueType::Int);
}

// ============================================================================
// Materialization
// ============================================================================

#[test]
fn materialize_primitives() {
    assert_eq!(
        materialize("null", ValueType::Null, no_nested),
        Ok(TypedValue::Null)
    );
    assert_eq!(
        materialize("-17", ValueType::Int, no_nested),
        Ok(TypedValue::Int(-17))
    );
    assert_eq!(
        materialize("2.5", ValueType::Float, no_nested),
        Ok(TypedValue::Float(2.5))
    );
    assert_eq!(
        materialize("TRUE", ValueType::Bool, no_nested),
        Ok(TypedValue::Bool(true))
    );
    assert_eq!(
        materialize("false", ValueType::Bool, no_nested),
        Ok(TypedValue::Bool(false))
    );
}

#[test]
fn materialize_string_strips_one_pair_of_quotes() {
    assert_eq!(
        materialize(r#""hello""#, ValueType::String, no_nested),
        Ok(TypedValue::String("hello".into()))
    );
    assert_eq!(
        materialize(r#""""#, ValueType::String, no_nested),
        Ok(TypedValue::String(String::new()))
    );
}

#[test]
fn materialize_string_requires_both_quotes() {
    for token in ["hello", r#""hello"#, r#"hello""#, r#"""#] {
        assert_eq!(
            materialize(token, ValueType::String, no_nested),
            Err(ParseError::UnquotedString(token.to_string())),
            "{token}"
        );
    }
}

#[test]
fn materialize_object_delegates_to_nested_parse() {
    let value = materialize(r#"{"a":1}"#, ValueType::Object, |text| {
        assert_eq!(text, r#"{"a":1}"#);
        let mut table = Table::new(4);
        table.insert("a", TypedValue::Int(1))?;
        Ok(table)
    })
    .unwrap();

    assert_eq!(value.as_table().and_then(|t| t.get("a")), Some(&TypedValue::Int(1)));
}

#[test]
fn materialize_object_propagates_nested_error() {
    let err = materialize("{x}", ValueType::Object, |_| {
        Err(ParseError::Malformed("inner".to_string()))
    })
    .unwrap_err();

    assert_eq!(err, ParseError::Malformed("inner".to_string()));
}

#[test]
fn materialize_number_errors() {
    assert!(matches!(
        materialize("99999999999999999999", ValueType::Int, no_nested),
        Err(ParseError::NumericOverflow(_))
    ));
    assert!(matches!(
        materialize("1.2.3", ValueType::Float, no_nested),
        Err(ParseError::InvalidNumber(_))
    ));
}
