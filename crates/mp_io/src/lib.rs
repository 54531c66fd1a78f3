//! crates/mp_io/src/lib.rs
//! I/O crate for the meeting-protocol engine.
//!
//! - `package`: the OPC/DOCX assembler (the only module that knows part names
//!   and relationship ids).
//! - `canonical_json` + `hasher`: sorted-key JSON bytes and SHA-256 digests.
//! - `loader`: local JSON snapshots and parameter files.
//!
//! Shared error type for file/JSON work is `IoError`; the assembler has its
//! own `PackageError`.

#![forbid(unsafe_code)]

use thiserror::Error;

/// Unified error for loading/writing (not for package assembly).
#[derive(Debug, Error)]
pub enum IoError {
    /// Filesystem / path errors (open, create_dir_all, rename, fsync).
    #[error("io/path error: {0}")]
    Path(String),

    /// JSON (de)serialization errors; `at` is `line:column` when known.
    #[error("json error at {at}: {msg}")]
    Json { at: String, msg: String },

    /// Parsed fine but failed a domain check.
    #[error("invalid: {0}")]
    Invalid(String),
}

pub type IoResult<T> = Result<T, IoError>;

impl From<std::io::Error> for IoError {
    fn from(e: std::io::Error) -> Self {
        IoError::Path(e.to_string())
    }
}

impl From<serde_json::Error> for IoError {
    fn from(e: serde_json::Error) -> Self {
        let at = if e.line() == 0 { "/".to_string() } else { format!("{}:{}", e.line(), e.column()) };
        IoError::Json { at, msg: e.to_string() }
    }
}

pub mod canonical_json;
pub mod hasher;
pub mod loader;
pub mod package;

pub use package::{assemble, ImageSet, PackageError, DOCX_CONTENT_TYPE};
