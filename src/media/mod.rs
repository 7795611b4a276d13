//! # Media Module
//!
//! Flat-directory file storage for uploaded media and rendered snapshots.

pub mod backend;
pub mod errors;
pub mod local;
pub mod snapshot;
pub mod upload;

pub use backend::{MediaBackend, MAX_FILE_NAME_BYTES};
pub use errors::{MediaError, MediaResult};
pub use local::LocalBackend;
pub use snapshot::{snapshot_file_name, SnapshotWriter};
pub use upload::{sanitize_filename, StoredUpload, UploadHandler, DEFAULT_ALLOWED_EXTENSIONS};
