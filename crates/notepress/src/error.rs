use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum NotepressError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Note source error: {0}")]
    Source(String),

    #[error("Process `{program}` failed: {reason}")]
    Process { program: String, reason: String },

    #[error("Process `{program}` timed out after {seconds}s")]
    Timeout { program: String, seconds: u64 },

    #[error("Version control error: {0}")]
    Vcs(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Path not found: {}", .0.display())]
    PathNotFound(PathBuf),
}

pub type Result<T> = std::result::Result<T, NotepressError>;
