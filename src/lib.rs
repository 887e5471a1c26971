//! Datacurators - nested merge of configuration-like mappings
//!
//! This crate merges two mappings into a new one. Values from the overlay
//! win on conflict, nested mappings are merged key by key and everything
//! else (sequences included) is replaced wholesale.

pub mod document;
pub mod error;
pub mod layers;
pub mod merge;
pub mod value;

pub use document::{load_file, parse_str, DocumentFormat, LoadedDocument};
pub use error::{DocumentError, LayerError, MergeError};
pub use layers::{merge_layers, LayerOrigin, LayerSource, LayerStack, MergedLayers};
pub use merge::{nested_update, nested_update_owned};
pub use value::{KeyPath, ValueKind};
