//! Loading mappings from JSON and TOML documents
//!
//! Documents are converted into `serde_json::Value` so every source feeds
//! the merge with the same value model.

use serde_json::Value;
use sha2::{Digest, Sha256};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::error::DocumentError;

/// Supported document formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Json,
    Toml,
}

impl DocumentFormat {
    /// Infer the format from a file extension (`.json` or `.toml`).
    pub fn from_path(path: &Path) -> Result<Self, DocumentError> {
        let ext = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase());

        match ext.as_deref() {
            Some("json") => Ok(Self::Json),
            Some("toml") => Ok(Self::Toml),
            _ => Err(DocumentError::UnknownFormat {
                path: path.to_path_buf(),
            }),
        }
    }
}

impl fmt::Display for DocumentFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Json => write!(f, "JSON"),
            Self::Toml => write!(f, "TOML"),
        }
    }
}

/// A document read from disk
#[derive(Debug, Clone)]
pub struct LoadedDocument {
    pub path: PathBuf,

    /// SHA-256 of the raw file bytes, hex encoded
    pub digest: String,

    pub value: Value,
}

/// Parse document text into a value.
pub fn parse_str(text: &str, format: DocumentFormat) -> Result<Value, DocumentError> {
    match format {
        DocumentFormat::Json => serde_json::from_str(text).map_err(|e| DocumentError::Parse {
            format,
            message: e.to_string(),
        }),
        DocumentFormat::Toml => {
            let table: toml::Table = toml::from_str(text).map_err(|e| DocumentError::Parse {
                format,
                message: e.to_string(),
            })?;
            Ok(toml_to_json(toml::Value::Table(table)))
        }
    }
}

/// Read and parse a document, picking the format from its extension.
pub fn load_file(path: &Path) -> Result<LoadedDocument, DocumentError> {
    let format = DocumentFormat::from_path(path)?;

    let bytes = fs::read(path).map_err(|source| DocumentError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let digest = hex::encode(Sha256::digest(&bytes));

    let text = String::from_utf8(bytes).map_err(|_| DocumentError::InvalidUtf8 {
        path: path.to_path_buf(),
    })?;

    let value = parse_str(&text, format)?;
    debug!(path = %path.display(), %format, %digest, "loaded document");

    Ok(LoadedDocument {
        path: path.to_path_buf(),
        digest,
        value,
    })
}

/// Convert a TOML value to a JSON value
fn toml_to_json(toml: toml::Value) -> Value {
    match toml {
        toml::Value::String(s) => Value::String(s),
        toml::Value::Integer(i) => Value::Number(i.into()),
        toml::Value::Float(f) => serde_json::Number::from_f64(f)
            .map(Value::Number)
            .unwrap_or(Value::Null),
        toml::Value::Boolean(b) => Value::Bool(b),
        toml::Value::Datetime(dt) => Value::String(dt.to_string()),
        toml::Value::Array(arr) => Value::Array(arr.into_iter().map(toml_to_json).collect()),
        toml::Value::Table(table) => Value::Object(
            table
                .into_iter()
                .map(|(k, v)| (k, toml_to_json(v)))
                .collect(),
        ),
    }
}
