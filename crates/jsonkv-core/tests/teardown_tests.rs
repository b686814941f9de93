//! Allocation accounting around parse and dispose.
//!
//! A counting global allocator tracks live allocations per thread, so tests
//! running in parallel do not see each other's traffic. Disposing a table must
//! bring the count back to where it was before the parse: anything left over is
//! a leak, anything below is a double free.

use jsonkv_core::{dispose, parse_with, ParseConfig, Table, TypedValue};
use std::alloc::{GlobalAlloc, Layout, System};
use std::cell::Cell;

struct CountingAlloc;

thread_local! {
    static LIVE: Cell<isize> = const { Cell::new(0) };
    static TOTAL: Cell<usize> = const { Cell::new(0) };
}

unsafe impl GlobalAlloc for CountingAlloc {
    unsafe fn alloc(&self, layout: Layout) -> *mut u8 {
        let ptr = System.alloc(layout);
        if !ptr.is_null() {
            let _ = LIVE.try_with(|live| live.set(live.get() + 1));
            let _ = TOTAL.try_with(|total| total.set(total.get() + 1));
        }
        ptr
    }

    unsafe fn dealloc(&self, ptr: *mut u8, layout: Layout) {
        System.dealloc(ptr, layout);
        let _ = LIVE.try_with(|live| live.set(live.get() - 1));
    }
}

#[global_allocator]
static GLOBAL: CountingAlloc = CountingAlloc;

fn live() -> isize {
    LIVE.with(Cell::get)
}

fn total() -> usize {
    TOTAL.with(Cell::get)
}

fn config() -> ParseConfig {
    ParseConfig {
        slots: 32,
        capacity: 32,
        ..ParseConfig::default()
    }
}

const FIVE_LEVELS: &[u8] = br#"{
    "name": "root",
    "ab": 1, "ba": 2,
    "l1": {
        "x": 1.5,
        "l2": {
            "y": "two",
            "l3": {
                "ab": null, "ba": true,
                "l4": {
                    "l5": { "deep": "end", "ab": 5, "ba": 6 }
                }
            }
        }
    }
}"#;

#[test]
fn dispose_after_five_level_parse_frees_everything() {
    let before = live();
    let allocated_before = total();

    let table = parse_with(FIVE_LEVELS, &config()).unwrap();
    assert_eq!(table.depth(), 6);
    assert!(live() > before, "parse should hold allocations");
    assert!(total() - allocated_before >= 6, "one slot array per table at least");

    dispose(table);

    assert_eq!(live(), before, "leak or double free after dispose");
}

#[test]
fn failed_parse_keeps_nothing() {
    let before = live();

    let result = parse_with(br#"{"a":{"b":{"c":1,"bad":nope}},"z":1}"#, &config());
    assert!(result.is_err());
    drop(result);

    assert_eq!(live(), before, "partially built tables were not freed");
}

#[test]
fn deleting_nested_value_frees_its_table() {
    let before = live();
    let mut table = parse_with(br#"{"keep":1,"gone":{"a":{"b":"c"}}}"#, &config()).unwrap();
    let with_nested = live();

    let removed = table.delete("gone").unwrap();
    assert!(matches!(removed, TypedValue::Object(_)));
    drop(removed);
    assert!(live() < with_nested);

    dispose(table);
    assert_eq!(live(), before);
}

#[test]
fn clear_frees_entries_but_keeps_slots() {
    let mut table = Table::new(32);
    let empty = live();

    table.insert("ab", TypedValue::String("x".into())).unwrap();
    table.insert("ba", TypedValue::Int(1)).unwrap();
    assert!(live() > empty);

    table.clear();
    assert_eq!(live(), empty);
}
