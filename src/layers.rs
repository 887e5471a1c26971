//! Layered merging with provenance
//!
//! Layers are merged in the order they are pushed: the first is the base
//! and every later layer takes precedence over the ones before it. Each
//! layer records where it came from.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::path::Path;
use tracing::trace;

use crate::document::load_file;
use crate::error::{LayerError, MergeError};
use crate::merge::nested_update_owned;

/// Merge several mappings in precedence order (last wins).
///
/// An empty list yields an empty mapping.
pub fn merge_layers(layers: Vec<Value>) -> Result<Value, MergeError> {
    layers
        .into_iter()
        .try_fold(Value::Object(Map::new()), nested_update_owned)
}

/// Origin of a layer
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LayerOrigin {
    Inline,
    File,
}

/// A contributing layer with provenance
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LayerSource {
    pub origin: LayerOrigin,

    pub label: String,

    /// File path (None for inline layers)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,

    /// SHA-256 digest of raw file bytes (None for inline layers)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub digest: Option<String>,
}

/// Ordered collection of layers waiting to be merged
#[derive(Debug, Default)]
pub struct LayerStack {
    layers: Vec<(LayerSource, Value)>,
}

impl LayerStack {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an in-memory layer.
    pub fn push_value(mut self, label: impl Into<String>, value: Value) -> Self {
        self.layers.push((
            LayerSource {
                origin: LayerOrigin::Inline,
                label: label.into(),
                path: None,
                digest: None,
            },
            value,
        ));
        self
    }

    /// Load a JSON or TOML file and add it as a layer.
    pub fn push_file(mut self, path: &Path) -> Result<Self, LayerError> {
        let doc = load_file(path)?;
        let path = doc.path.to_string_lossy().to_string();
        self.layers.push((
            LayerSource {
                origin: LayerOrigin::File,
                label: path.clone(),
                path: Some(path),
                digest: Some(doc.digest),
            },
            doc.value,
        ));
        Ok(self)
    }

    pub fn len(&self) -> usize {
        self.layers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    /// Merge all layers.
    pub fn build(self) -> Result<MergedLayers, LayerError> {
        let mut merged = Value::Object(Map::new());
        let mut sources = Vec::with_capacity(self.layers.len());

        for (index, (source, value)) in self.layers.into_iter().enumerate() {
            merged = nested_update_owned(merged, value).map_err(|source_err| LayerError::Merge {
                layer: index,
                label: source.label.clone(),
                source: source_err,
            })?;
            trace!(layer = index, label = %source.label, "merged layer");
            sources.push(source);
        }

        Ok(MergedLayers {
            value: merged,
            sources,
        })
    }
}

/// Result of merging a layer stack
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MergedLayers {
    /// The merged mapping
    pub value: Value,

    /// Contributing layers in precedence order
    pub sources: Vec<LayerSource>,
}

impl MergedLayers {
    /// Get a value by path (dot-separated)
    pub fn get(&self, path: &str) -> Option<&Value> {
        let mut current = &self.value;
        for part in path.split('.') {
            current = current.get(part)?;
        }
        Some(current)
    }

    /// Render the merged mapping as pretty JSON
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(&self.value)
    }
}
