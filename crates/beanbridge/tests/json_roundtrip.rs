// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

#![allow(clippy::uninlined_format_args)] // Test/bench code readability over pedantic
#![allow(clippy::float_cmp)] // Test assertions with constants
#![allow(clippy::missing_panics_doc)] // Tests/examples panic on failure
#![allow(clippy::items_after_statements)] // Test helpers
#![allow(clippy::needless_pass_by_value)] // Test functions

//! JSON round-trip tests: the engine discovers every nested record through
//! the adapter, never through per-type code.

use beanbridge::json::{JsonReader, JsonWriter, TYPE_TAG};
use beanbridge::{BeanError, BridgeConfig, FrameworkAdapter, Record};
use serde_json::json;
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};
use std::fmt::Debug;

#[derive(Debug, Clone, PartialEq, Record)]
struct Foo {
    bar: i32,
    baz: String,
}

#[derive(Debug, Clone, PartialEq, Record)]
struct ContainsFoo {
    foo: Foo,
}

#[derive(Debug, Clone, PartialEq, Record)]
struct Measure {
    #[record(alias = "val")]
    value: f64,
    unit: String,
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Record)]
struct Coord {
    x: i32,
    y: i32,
}

#[derive(Debug, Clone, PartialEq, Record)]
struct ContainsListOfFoo {
    foo: Vec<Foo>,
}

#[derive(Debug, Clone, PartialEq, Record)]
struct ContainsSetOfCoord {
    coords: HashSet<Coord>,
}

#[derive(Debug, Clone, PartialEq, Record)]
struct ContainsSortedSetOfCoord {
    coords: BTreeSet<Coord>,
}

#[derive(Debug, Clone, PartialEq, Record)]
struct ContainsMapOfFoo {
    by_name: BTreeMap<String, Foo>,
}

#[derive(Debug, Clone, PartialEq, Record)]
struct ContainsRecordKeys {
    labels: BTreeMap<Coord, String>,
    cells: HashMap<Coord, Foo>,
}

#[derive(Debug, Clone, PartialEq, Record)]
struct Optionals {
    maybe_foo: Option<Foo>,
    maybe_list: Option<Vec<u16>>,
    #[record(default)]
    maybe_char: Option<char>,
}

#[derive(Debug, Clone, PartialEq, Record)]
struct Tree {
    label: String,
    #[record(default)]
    kids: Vec<Self>,
}

fn foo(bar: i32, baz: &str) -> Foo {
    Foo {
        bar,
        baz: baz.into(),
    }
}

fn roundtrip<T: Record + PartialEq + Debug>(value: &T) -> T {
    let adapter = FrameworkAdapter::new();
    let text = JsonWriter::new(&adapter).write(value).expect("encode");
    let back: T = JsonReader::new(&adapter).read(&text).expect("decode");
    assert_eq!(&back, value, "round-trip through {}", text);
    back
}

#[test]
fn test_foo() {
    roundtrip(&foo(42, "abc"));
}

#[test]
fn test_contains_foo() {
    let value = ContainsFoo {
        foo: foo(42, "abc"),
    };
    let adapter = FrameworkAdapter::new();
    let tree = JsonWriter::new(&adapter).write_tree(&value).expect("encode");
    assert_eq!(tree, json!({"foo": {"bar": 42, "baz": "abc"}}));

    roundtrip(&value);
}

#[test]
fn test_alias_written_and_both_names_read() {
    let adapter = FrameworkAdapter::new();
    let value = Measure {
        value: 1.5,
        unit: "m".into(),
    };

    let tree = JsonWriter::new(&adapter).write_tree(&value).expect("encode");
    assert_eq!(tree, json!({"val": 1.5, "unit": "m"}));

    let reader = JsonReader::new(&adapter);
    let by_alias: Measure = reader.read(r#"{"val": 1.5, "unit": "m"}"#).expect("alias");
    let by_name: Measure = reader.read(r#"{"value": 1.5, "unit": "m"}"#).expect("name");
    assert_eq!(by_alias, value);
    assert_eq!(by_name, value);
}

#[test]
fn test_list_of_records() {
    roundtrip(&ContainsListOfFoo {
        foo: vec![foo(1, "a"), foo(2, "b"), foo(1, "a")],
    });
    roundtrip(&ContainsListOfFoo { foo: Vec::new() });
}

#[test]
fn test_sets_of_records() {
    let coords = [Coord { x: 1, y: 2 }, Coord { x: -3, y: 0 }];
    roundtrip(&ContainsSetOfCoord {
        coords: coords.iter().cloned().collect(),
    });
    roundtrip(&ContainsSortedSetOfCoord {
        coords: coords.iter().cloned().collect(),
    });
}

#[test]
fn test_maps_of_records() {
    let by_name = [("first", foo(1, "a")), ("second", foo(2, "b"))]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v))
        .collect();
    let value = ContainsMapOfFoo { by_name };

    let adapter = FrameworkAdapter::new();
    let tree = JsonWriter::new(&adapter).write_tree(&value).expect("encode");
    assert!(tree["by_name"].is_object());

    roundtrip(&value);
}

#[test]
fn test_record_keys() {
    let value = ContainsRecordKeys {
        labels: [(Coord { x: 0, y: 0 }, "origin".to_string())]
            .into_iter()
            .collect(),
        cells: [
            (Coord { x: 1, y: 1 }, foo(11, "one-one")),
            (Coord { x: 2, y: 5 }, foo(25, "two-five")),
        ]
        .into_iter()
        .collect(),
    };

    let adapter = FrameworkAdapter::new();
    let tree = JsonWriter::new(&adapter).write_tree(&value).expect("encode");
    assert_eq!(tree["labels"], json!([[{"x": 0, "y": 0}, "origin"]]));

    roundtrip(&value);
}

#[test]
fn test_optionals() {
    roundtrip(&Optionals {
        maybe_foo: None,
        maybe_list: None,
        maybe_char: None,
    });
    roundtrip(&Optionals {
        maybe_foo: Some(foo(7, "seven")),
        maybe_list: Some(vec![1, 2, 3]),
        maybe_char: Some('z'),
    });
}

#[test]
fn test_absent_optional_with_default() {
    let adapter = FrameworkAdapter::new();
    let value: Optionals = JsonReader::new(&adapter)
        .read(r#"{"maybe_foo": null, "maybe_list": [4]}"#)
        .expect("decode");
    assert_eq!(value.maybe_list, Some(vec![4]));
    assert_eq!(value.maybe_char, None);
}

#[test]
fn test_type_tag_roundtrip() {
    let adapter = FrameworkAdapter::with_config(BridgeConfig::new().emit_type_tag(true));
    let value = ContainsFoo {
        foo: foo(3, "tagged"),
    };

    let tree = JsonWriter::new(&adapter).write_tree(&value).expect("encode");
    assert_eq!(
        tree[TYPE_TAG],
        json!(<ContainsFoo as Record>::shape().type_name)
    );
    // Only the root carries the tag.
    assert!(tree["foo"].get(TYPE_TAG).is_none());

    let back: ContainsFoo = JsonReader::new(&adapter)
        .read_tree(tree)
        .expect("decode");
    assert_eq!(back, value);
}

#[test]
fn test_nested_error_surfaces() {
    let adapter = FrameworkAdapter::new();
    let err = JsonReader::new(&adapter)
        .read::<ContainsFoo>(r#"{"foo": {"bar": 1}}"#)
        .expect_err("nested missing");
    match err {
        BeanError::MissingRequiredProperty { record, names } => {
            assert!(record.ends_with("::Foo"), "{}", record);
            assert_eq!(names, vec!["baz".to_string()]);
        }
        other => panic!("Expected MissingRequiredProperty, got {:?}", other),
    }
}

#[test]
fn test_recursive_record() {
    let leaf = |label: &str| Tree {
        label: label.into(),
        kids: Vec::new(),
    };
    let tree = Tree {
        label: "root".into(),
        kids: vec![
            Tree {
                label: "left".into(),
                kids: vec![leaf("left-left")],
            },
            leaf("right"),
        ],
    };

    let adapter = FrameworkAdapter::new();
    let tree_json = JsonWriter::new(&adapter).write_tree(&tree).expect("encode");
    assert_eq!(tree_json["kids"][0]["kids"][0]["label"], json!("left-left"));

    roundtrip(&tree);

    // Omitted children take the declared default.
    let bare: Tree = JsonReader::new(&adapter)
        .read(r#"{"label": "alone"}"#)
        .expect("decode");
    assert_eq!(bare, leaf("alone"));
}

