//! # Media Errors

use thiserror::Error;

/// Result type for media operations
pub type MediaResult<T> = Result<T, MediaError>;

/// Errors raised while writing uploads or snapshots
#[derive(Debug, Clone, Error)]
pub enum MediaError {
    #[error("File not found: {0}")]
    NotFound(String),

    #[error("Invalid path: {0}")]
    InvalidPath(String),

    #[error("I/O error: {0}")]
    IoError(String),
}

impl MediaError {
    /// Get HTTP status code
    pub fn status_code(&self) -> u16 {
        match self {
            MediaError::NotFound(_) => 404,
            MediaError::InvalidPath(_) => 400,
            MediaError::IoError(_) => 500,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(MediaError::NotFound("a.png".into()).status_code(), 404);
        assert_eq!(MediaError::InvalidPath("../a".into()).status_code(), 400);
        assert_eq!(MediaError::IoError("disk".into()).status_code(), 500);
    }
}
