//! Nested merge of two mappings
//!
//! Merge semantics:
//! - Keys only in the overlay are added as-is (no recursion)
//! - Overlay non-mappings (scalars, sequences, null) replace the base value
//! - Overlay mappings merge into the base mapping at the same key
//! - Overlay mapping over a base non-mapping is an error
//!
//! Both entry points keep their own stack of open mappings, so input depth
//! is bounded by memory rather than by the call stack.

use serde_json::map::{Entry, IntoIter, Iter};
use serde_json::{Map, Value};
use tracing::{debug, trace};

use crate::error::MergeError;
use crate::value::{clone_value, KeyPath, ValueKind};

/// A borrowed mapping being merged, waiting for the rest of its overlay.
struct Frame<'a> {
    base: &'a Map<String, Value>,
    merged: Map<String, Value>,
    pending: Iter<'a>,
}

impl<'a> Frame<'a> {
    /// Copy one level of `base`. Keys the overlay touches are left as
    /// placeholders and filled in when the overlay entry is visited.
    fn open(base: &'a Map<String, Value>, overlay: &'a Map<String, Value>) -> Self {
        let merged = base
            .iter()
            .map(|(key, value)| {
                let value = if overlay.contains_key(key) {
                    Value::Null
                } else {
                    clone_value(value)
                };
                (key.clone(), value)
            })
            .collect();

        Self {
            base,
            merged,
            pending: overlay.iter(),
        }
    }
}

/// An owned mapping being merged.
struct OwnedFrame {
    merged: Map<String, Value>,
    pending: IntoIter,
}

/// Merge `overlay` into `base`, returning a new mapping.
///
/// Neither input is modified. Fails with [`MergeError::InvalidArgumentType`]
/// if either argument is not a mapping, or if the overlay holds a mapping at
/// a key where the base holds anything else.
///
/// ```
/// use datacurators::nested_update;
/// use serde_json::json;
///
/// let base = json!({"type": {"style": "egg", "size": "smol"}});
/// let overlay = json!({"type": {"style": "Egg"}});
/// let merged = nested_update(&base, &overlay).unwrap();
/// assert_eq!(merged, json!({"type": {"style": "Egg", "size": "smol"}}));
/// ```
pub fn nested_update(base: &Value, overlay: &Value) -> Result<Value, MergeError> {
    let (Value::Object(base_map), Value::Object(overlay_map)) = (base, overlay) else {
        return Err(mismatch(KeyPath::root(), base, overlay));
    };

    let mut current = Frame::open(base_map, overlay_map);
    // Suspended frames, each with the key its open child belongs under.
    let mut stack: Vec<(Frame<'_>, &str)> = Vec::new();

    loop {
        match current.pending.next() {
            Some((key, value)) => {
                let base = current.base;
                match (base.get(key), value) {
                    (Some(Value::Object(base_map)), Value::Object(overlay_map)) => {
                        trace!(key = %key, depth = stack.len(), "merging nested mapping");
                        let child = Frame::open(base_map, overlay_map);
                        stack.push((std::mem::replace(&mut current, child), key.as_str()));
                    }
                    (Some(other), Value::Object(_)) => {
                        let path = path_to(stack.iter().map(|(_, k)| *k), key);
                        return Err(nested_mismatch(path, other));
                    }
                    (_, value) => {
                        current.merged.insert(key.clone(), clone_value(value));
                    }
                }
            }
            None => match stack.pop() {
                Some((mut parent, key)) => {
                    parent
                        .merged
                        .insert(key.to_owned(), Value::Object(current.merged));
                    current = parent;
                }
                None => return Ok(Value::Object(current.merged)),
            },
        }
    }
}

/// Same as [`nested_update`], consuming both inputs.
pub fn nested_update_owned(base: Value, overlay: Value) -> Result<Value, MergeError> {
    let (base, overlay) = match (base, overlay) {
        (Value::Object(base), Value::Object(overlay)) => (base, overlay),
        (base, overlay) => return Err(mismatch(KeyPath::root(), &base, &overlay)),
    };

    let mut current = OwnedFrame {
        merged: base,
        pending: overlay.into_iter(),
    };
    let mut stack: Vec<(OwnedFrame, String)> = Vec::new();

    loop {
        match current.pending.next() {
            Some((key, value)) => match current.merged.entry(key) {
                Entry::Vacant(entry) => {
                    entry.insert(value);
                }
                Entry::Occupied(mut entry) => match value {
                    Value::Object(overlay_map) => {
                        let key = entry.key().clone();
                        // Placeholder until the child frame is written back.
                        match std::mem::take(entry.get_mut()) {
                            Value::Object(base_map) => {
                                trace!(key = %key, depth = stack.len(), "merging nested mapping");
                                let child = OwnedFrame {
                                    merged: base_map,
                                    pending: overlay_map.into_iter(),
                                };
                                stack.push((std::mem::replace(&mut current, child), key));
                            }
                            other => {
                                let path = path_to(stack.iter().map(|(_, k)| k.as_str()), &key);
                                return Err(nested_mismatch(path, &other));
                            }
                        }
                    }
                    value => {
                        entry.insert(value);
                    }
                },
            },
            None => match stack.pop() {
                Some((mut parent, key)) => {
                    parent.merged.insert(key, Value::Object(current.merged));
                    current = parent;
                }
                None => return Ok(Value::Object(current.merged)),
            },
        }
    }
}

fn path_to<'k>(parents: impl Iterator<Item = &'k str>, key: &'k str) -> KeyPath {
    parents
        .chain(std::iter::once(key))
        .map(str::to_owned)
        .collect()
}

fn nested_mismatch(path: KeyPath, base: &Value) -> MergeError {
    let base = ValueKind::of(base);
    debug!(path = %path, base = %base, "overlay mapping over non-mapping");
    MergeError::InvalidArgumentType {
        path,
        base,
        overlay: ValueKind::Mapping,
    }
}

fn mismatch(path: KeyPath, base: &Value, overlay: &Value) -> MergeError {
    MergeError::InvalidArgumentType {
        path,
        base: ValueKind::of(base),
        overlay: ValueKind::of(overlay),
    }
}
