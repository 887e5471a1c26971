//! Test fixtures for the nested update scenarios
//!
//! - step01: flat mapping with an empty nested mapping
//! - step02: fuller mapping with nested keys and a sequence of mappings
//! - step03: partial overlay (TOML) touching nested keys and the sequence
//! - step04: the three steps as a sequence, which is not a mapping

use datacurators::load_file;
use serde_json::Value;
use std::path::{Path, PathBuf};

/// Path to the nested update fixture directory
pub fn nested_update_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/nested_update")
}

fn load(name: &str) -> Value {
    let path = nested_update_dir().join(name);
    load_file(&path)
        .unwrap_or_else(|e| panic!("failed to load fixture {}: {e}", path.display()))
        .value
}

pub fn step01() -> Value {
    load("step01.json")
}

pub fn step02() -> Value {
    load("step02.json")
}

pub fn step03() -> Value {
    load("step03.toml")
}

pub fn step04() -> Value {
    load("step04.json")
}
