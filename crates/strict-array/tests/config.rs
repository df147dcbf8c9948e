//! Integration tests for print configuration.

use strict_array::{Array1, PrintOptions};

// ---------------------------------------------------------------------------
// Presets
// ---------------------------------------------------------------------------

#[test]
fn presets_parse_case_insensitively() {
    assert_eq!("Compact".parse::<PrintOptions>().unwrap(), PrintOptions::compact());
    assert_eq!("full".parse::<PrintOptions>().unwrap(), PrintOptions::full());
    assert_eq!("default".parse::<PrintOptions>().unwrap(), PrintOptions::default());
    assert!("loud".parse::<PrintOptions>().is_err());
}

#[test]
fn precision_applies_to_floats() {
    let a = Array1::from_vec(vec![1.0f64, 2.5]);
    let opts = PrintOptions::new(Some(2), 3, 1000);
    assert_eq!(a.format_with(&opts), "[1.00, 2.50]");
    assert_eq!(a.to_string(), "[1, 2.5]");
}

#[test]
fn zero_edge_items_prints_only_the_marker() {
    let opts = PrintOptions::new(None, 0, 8);
    let a = Array1::from_vec((0..20).collect::<Vec<i32>>());
    assert_eq!(a.format_with(&opts), "[...]");
    let m = a.view2(10, 2).unwrap();
    assert_eq!(m.format_with(&opts), "[...]");
    let short = Array1::from_vec(vec![1, 2, 3]);
    assert_eq!(short.format_with(&opts), "[1, 2, 3]");
}

// ---------------------------------------------------------------------------
// Serde
// ---------------------------------------------------------------------------

#[test]
fn options_round_trip_through_json() {
    let opts = PrintOptions::compact();
    let text = serde_json::to_string(&opts).unwrap();
    let back: PrintOptions = serde_json::from_str(&text).unwrap();
    assert_eq!(back, opts);
}

#[test]
fn missing_fields_take_defaults() {
    let opts: PrintOptions = serde_json::from_str(r#"{ "edge_items": 1 }"#).unwrap();
    assert_eq!(opts.edge_items, 1);
    assert_eq!(opts.threshold, PrintOptions::default().threshold);
    assert_eq!(opts.precision, None);
}
