use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TriageError {
    #[error("Path does not exist: {0}")]
    PathNotFound(PathBuf),

    #[error("Path is not a directory: {0}")]
    NotADirectory(PathBuf),

    #[error("Permission denied: {0}")]
    PermissionDenied(PathBuf),

    #[error("Cannot read {path}: {source}")]
    Catalog {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Directory listing failed: {0}")]
    Walk(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Review is already complete")]
    ReviewComplete,
}

impl TriageError {
    /// Classify an IO failure on `path` into the most specific variant
    pub fn from_io(path: PathBuf, source: std::io::Error) -> Self {
        match source.kind() {
            std::io::ErrorKind::NotFound => TriageError::PathNotFound(path),
            std::io::ErrorKind::PermissionDenied => TriageError::PermissionDenied(path),
            _ => TriageError::Catalog { path, source },
        }
    }
}

pub type Result<T> = std::result::Result<T, TriageError>;
