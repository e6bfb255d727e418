//! Error types for document loading and output
//!
//! Flattening itself never fails; these cover reading and decoding
//! documents and rendering results.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FlattenError {
    #[error("Failed to load document from {path}: {reason}")]
    LoadError { path: String, reason: String },

    #[error("Invalid document structure: {0}")]
    InvalidStructure(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid path: {0}")]
    InvalidPath(PathBuf),
}
