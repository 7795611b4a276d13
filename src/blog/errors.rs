//! # Blog Store Errors

use thiserror::Error;

/// Result type for blog store operations
pub type BlogResult<T> = Result<T, BlogError>;

/// Errors raised while reading or writing the blog document
#[derive(Debug, Clone, Error)]
pub enum BlogError {
    #[error("Blog document not found: {0}")]
    DocumentMissing(String),

    #[error("Blog document is malformed: {0}")]
    Malformed(String),

    #[error("I/O error: {0}")]
    IoError(String),
}

impl BlogError {
    pub(crate) fn io(path: &std::path::Path, err: std::io::Error) -> Self {
        if err.kind() == std::io::ErrorKind::NotFound {
            BlogError::DocumentMissing(path.display().to_string())
        } else {
            BlogError::IoError(format!("{}: {}", path.display(), err))
        }
    }
}
