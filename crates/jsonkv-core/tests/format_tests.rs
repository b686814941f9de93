use jsonkv_core::format::format_float;
use jsonkv_core::{format, format_slots, parse, parse_with, ParseConfig, Table, TypedValue};

#[test]
fn format_empty_table() {
    assert_eq!(format(&Table::new(4)), "{}");
}

#[test]
fn format_flat_table_in_slot_order() {
    let table = parse(br#"{"b":"hello","a":1,"c":true}"#).unwrap();

    // "a" = 97, "b" = 98, "c" = 99
    assert_eq!(
        format(&table),
        "{\n  \"a\": 1,\n  \"b\": \"hello\",\n  \"c\": true\n}"
    );
}

#[test]
fn format_lists_chain_after_primary() {
    let table = parse(br#"{"ba":1,"c":null,"ab":2}"#).unwrap();

    assert_eq!(
        format(&table),
        "{\n  \"c\": null,\n  \"ba\": 1,\n  \"ab\": 2\n}"
    );
}

#[test]
fn format_nested_tables() {
    let table = parse(br#"{"outer":{"inner":2.5,"e":{}}}"#).unwrap();

    assert_eq!(
        format(&table),
        "{\n  \"outer\": {\n    \"e\": {},\n    \"inner\": 2.5\n  }\n}"
    );
}

#[test]
fn floats_always_render_with_a_decimal_point() {
    assert_eq!(format_float(2.5), "2.5");
    assert_eq!(format_float(1.0), "1.0");
    assert_eq!(format_float(-3.0), "-3.0");
    assert_eq!(format_float(0.001), "0.001");
    assert!(!format_float(1e300).contains('e'));
    assert!(format_float(1e300).ends_with(".0"));
}

#[test]
fn format_output_parses_back() {
    let body = br#"{"a":1,"f":1.0,"s":"x, y","n":null,"o":{"p":{"q":false}}}"#;
    let table = parse(body).unwrap();

    let reparsed = parse(format(&table).as_bytes()).unwrap();

    assert_eq!(reparsed, table);
    assert_eq!(reparsed.get("f"), Some(&TypedValue::Float(1.0)));
}

#[test]
fn display_matches_format() {
    let table = parse(br#"{"k":"v"}"#).unwrap();
    assert_eq!(table.to_string(), format(&table));
    assert_eq!(TypedValue::String("v".into()).to_string(), "\"v\"");
    assert_eq!(TypedValue::Float(3.0).to_string(), "3.0");
    assert_eq!(TypedValue::Null.to_string(), "null");
}

#[test]
fn slot_dump_shows_indices_and_chain_positions() {
    let config = ParseConfig {
        slots: 100,
        capacity: 100,
        ..ParseConfig::default()
    };
    let table = parse_with(br#"{"ab":1,"ba":"two","n":null,"o":{"x":true}}"#, &config).unwrap();

    // "ab"/"ba" = 195 % 100 = 95, "n" = 110 % 100 = 10, "o" = 111 % 100 = 11, "x" = 120 % 100 = 20
    assert_eq!(
        format_slots(&table),
        "INDEX: 10, KEY: n, VALUE: (NULL)\n\
         INDEX: 11, KEY: o, VALUE: TABLE (1 keys)\n\
         \x20   INDEX: 20, KEY: x, VALUE: true\n\
         INDEX: 95, KEY: ab, VALUE: 1\n\
         INDEX: 95, CHAIN: 0, KEY: ba, VALUE: two\n"
    );
}

#[test]
fn slot_dump_of_two_nested_levels() {
    let config = ParseConfig {
        slots: 100,
        capacity: 100,
        ..ParseConfig::default()
    };
    let table = parse_with(br#"{"o":{"p":{"f":1.0,"s":"x, y"}}}"#, &config).unwrap();

    // "o" = 11, "p" = 112 % 100 = 12, "f" = 2, "s" = 15
    assert_eq!(
        format_slots(&table),
        "INDEX: 11, KEY: o, VALUE: TABLE (1 keys)\n\
         \x20   INDEX: 12, KEY: p, VALUE: TABLE (2 keys)\n\
         \x20       INDEX: 2, KEY: f, VALUE: 1.0\n\
         \x20       INDEX: 15, KEY: s, VALUE: x, y\n"
    );
    assert_eq!(format_slots(&Table::new(4)), "");
}
