//! core/error.rs
//! Error type for everything in `core` that can actually fail.
//!
//! Per-value decisions (a value failing validation, an exclusion hit) are
//! NOT errors. They only show up as a value missing from the survivors.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// An operation needs a loaded file and there is none.
    #[error("no file loaded")]
    NoFileLoaded,

    #[error("file not found: {}", .0.display())]
    FileNotFound(PathBuf),

    #[error("configuration file not found: {}", .0.display())]
    ConfigNotFound(PathBuf),

    #[error("failed to read configuration {}: {source}", path.display())]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid configuration: {0}")]
    ConfigParse(String),

    #[error("failed to read tags from {}: {source}", path.display())]
    TagRead {
        path: PathBuf,
        #[source]
        source: id3::Error,
    },

    #[error("failed to write tags to {}: {source}", path.display())]
    TagWrite {
        path: PathBuf,
        #[source]
        source: id3::Error,
    },

    #[error("audio probe failed: {0}")]
    AudioProbe(String),

    #[error("unknown field: {0}")]
    UnknownField(String),
}

pub type Result<T> = std::result::Result<T, Error>;
