//! # Media Backend Trait

use super::errors::MediaResult;

/// Longest file name, in bytes, common filesystems accept
pub const MAX_FILE_NAME_BYTES: usize = 255;

/// Flat file store used for uploads and snapshots.
///
/// Names are single path components; implementations reject anything else.
pub trait MediaBackend: Send + Sync + std::fmt::Debug {
    /// Write data under name, replacing any existing file
    fn write(&self, name: &str, data: &[u8]) -> MediaResult<()>;

    /// Delete the file stored under name
    fn delete(&self, name: &str) -> MediaResult<()>;

    /// Check if name exists
    fn exists(&self, name: &str) -> MediaResult<bool>;
}
