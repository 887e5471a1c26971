//! Nested update scenarios over file fixtures

mod fixtures;

use datacurators::{nested_update, KeyPath, MergeError, ValueKind};
use serde_json::json;

#[test]
fn nothing_happens_with_mirrored_input() {
    let step01 = fixtures::step01();
    let result = nested_update(&step01, &step01).unwrap();
    assert_eq!(result, step01);
}

#[test]
fn add_missing_to_base() {
    let result = nested_update(&fixtures::step01(), &fixtures::step02()).unwrap();
    assert_eq!(result, fixtures::step02());
}

#[test]
fn shallow_update_loses_nested_keys() {
    // A plain top-level key replacement is what the nested update improves on.
    let mut shallow = fixtures::step02().as_object().cloned().unwrap();
    for (key, value) in fixtures::step01().as_object().cloned().unwrap() {
        shallow.insert(key, value);
    }
    assert_eq!(shallow["type"], json!({}));
}

#[test]
fn nested_mappings_survive_empty_overlay() {
    let result = nested_update(&fixtures::step02(), &fixtures::step01()).unwrap();
    assert_eq!(result["name"], "preocts");
    assert_eq!(result["type"]["style"], "egg");
    assert_eq!(result["type"]["size"], "smol");
    assert_eq!(result["likes"], fixtures::step02()["likes"]);
}

#[test]
fn nested_mappings_are_updated() {
    let result = nested_update(&fixtures::step02(), &fixtures::step03()).unwrap();
    assert_eq!(result["likes"], json!([{"id": 0}]));
    assert_eq!(result["type"]["style"], "Egg");
    assert_eq!(result["type"]["shell"], "thicc");
    assert_eq!(result["type"]["size"], "smol");
    assert_eq!(result["name"], "Preocts");
}

#[test]
fn inputs_are_not_mutated() {
    let base = fixtures::step02();
    let overlay = fixtures::step03();
    let _ = nested_update(&base, &overlay).unwrap();

    assert_eq!(base, fixtures::step02());
    assert_eq!(overlay, fixtures::step03());
}

#[test]
fn raise_on_type_errors() {
    let err = nested_update(&fixtures::step04(), &fixtures::step01()).unwrap_err();
    assert_eq!(
        err,
        MergeError::InvalidArgumentType {
            path: KeyPath::root(),
            base: ValueKind::Sequence,
            overlay: ValueKind::Mapping,
        }
    );

    let err = nested_update(&fixtures::step01(), &fixtures::step04()).unwrap_err();
    assert!(matches!(
        err,
        MergeError::InvalidArgumentType {
            overlay: ValueKind::Sequence,
            ..
        }
    ));
}

#[test]
fn raise_on_nested_type_mismatch() {
    let overlay = json!({"name": {"first": "pre", "last": "octs"}});
    let err = nested_update(&fixtures::step02(), &overlay).unwrap_err();
    assert_eq!(err.path().to_string(), "$.name");
}
