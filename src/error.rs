//! Error types for merging, document loading and layering.

use std::path::PathBuf;

use crate::document::DocumentFormat;
use crate::value::{KeyPath, ValueKind};

/// Merge errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MergeError {
    /// One side of a merge was not a mapping.
    ///
    /// At the top level this means a caller passed a non-mapping. Below it,
    /// the overlay holds a mapping where the base holds something else.
    #[error("expected two mappings at {path}, got {base} and {overlay}")]
    InvalidArgumentType {
        path: KeyPath,
        base: ValueKind,
        overlay: ValueKind,
    },
}

impl MergeError {
    /// Key path at which the merge failed.
    pub fn path(&self) -> &KeyPath {
        match self {
            Self::InvalidArgumentType { path, .. } => path,
        }
    }
}

/// Document loading errors
#[derive(Debug, thiserror::Error)]
pub enum DocumentError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{} is not valid UTF-8", path.display())]
    InvalidUtf8 { path: PathBuf },

    #[error("cannot infer document format of {} (expected .json or .toml)", path.display())]
    UnknownFormat { path: PathBuf },

    #[error("{format} parse error: {message}")]
    Parse {
        format: DocumentFormat,
        message: String,
    },
}

/// Layer stack errors
#[derive(Debug, thiserror::Error)]
pub enum LayerError {
    #[error(transparent)]
    Document(#[from] DocumentError),

    #[error("layer {layer} ({label}) does not merge: {source}")]
    Merge {
        layer: usize,
        label: String,
        #[source]
        source: MergeError,
    },
}
