use std::collections::TryReserveError;
use std::path::PathBuf;

use thiserror::Error;

/// Fatal errors: anything that stops a whole run rather than a single file.
#[derive(Error, Debug)]
pub enum QmcError {
    #[error("worker pool error: {0}")]
    Pool(#[from] rayon::ThreadPoolBuildError),
}

// Convenient crate-wide result type
pub type Result<T> = std::result::Result<T, QmcError>;

/// Per-file failures. Each one is contained to the file it names.
#[derive(Error, Debug)]
pub enum DecodeError {
    #[error("qmc file read error: {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("unrecognized suffix: {path}")]
    UnrecognizedSuffix { path: PathBuf },

    #[error("create buffer error: {path} ({len} bytes)")]
    Alloc {
        path: PathBuf,
        len: u64,
        #[source]
        source: Option<TryReserveError>,
    },

    #[error("open dump file error: {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl DecodeError {
    /// Short stable name of the failure kind, used in run summaries.
    pub fn kind(&self) -> &'static str {
        match self {
            DecodeError::Read { .. } => "read",
            DecodeError::UnrecognizedSuffix { .. } => "unrecognized-suffix",
            DecodeError::Alloc { .. } => "alloc",
            DecodeError::Write { .. } => "write",
        }
    }
}
