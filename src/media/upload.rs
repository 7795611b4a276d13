//! # Upload Handler
//!
//! Accepts an uploaded file when its sanitized name carries an allowed
//! extension and stores it in the upload directory under that name.
//! Rejections are not errors: the caller simply gets no stored name back.

use std::collections::BTreeSet;
use std::sync::OnceLock;

use regex::Regex;
use tracing::{info, warn};

use super::backend::{MediaBackend, MAX_FILE_NAME_BYTES};
use super::errors::{MediaError, MediaResult};

/// Extensions accepted when no configuration overrides them
pub const DEFAULT_ALLOWED_EXTENSIONS: [&str; 7] = ["png", "jpg", "jpeg", "gif", "mp4", "avi", "mov"];

static UNSAFE_FILENAME_CHARS: OnceLock<Regex> = OnceLock::new();

fn unsafe_filename_chars() -> &'static Regex {
    UNSAFE_FILENAME_CHARS.get_or_init(|| Regex::new(r"[^A-Za-z0-9_.\-]").expect("static regex"))
}

/// Reduce a client-supplied filename to a safe single path component.
///
/// Path separators count as whitespace, whitespace runs become `_`, only
/// ASCII letters, digits, `_`, `.` and `-` survive, and leading or trailing
/// `.`/`_` are trimmed. Returns `None` when nothing is left.
pub fn sanitize_filename(file_name: &str) -> Option<String> {
    let spaced = file_name.replace(['/', '\\'], " ");
    let joined = spaced.split_whitespace().collect::<Vec<_>>().join("_");
    let kept = unsafe_filename_chars().replace_all(&joined, "");
    let trimmed = kept.trim_matches(|c| c == '.' || c == '_');
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// An accepted upload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredUpload {
    /// Name under the upload directory
    pub name: String,
    /// No file with this name existed before the write
    pub created: bool,
}

/// Writes accepted uploads through a [`MediaBackend`]
#[derive(Debug)]
pub struct UploadHandler<B: MediaBackend> {
    backend: B,
    allowed_extensions: BTreeSet<String>,
}

impl<B: MediaBackend> UploadHandler<B> {
    pub fn new<I, S>(backend: B, allowed_extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            backend,
            allowed_extensions: allowed_extensions
                .into_iter()
                .map(|ext| ext.as_ref().to_lowercase())
                .collect(),
        }
    }

    pub fn with_default_extensions(backend: B) -> Self {
        Self::new(backend, DEFAULT_ALLOWED_EXTENSIONS)
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Whether the name has a dot and an allowed extension after the last one
    pub fn is_allowed(&self, file_name: &str) -> bool {
        file_name
            .rsplit_once('.')
            .map(|(_, ext)| self.allowed_extensions.contains(&ext.to_lowercase()))
            .unwrap_or(false)
    }

    /// Store an upload, returning the name it was stored under.
    ///
    /// `Ok(None)` means the upload was rejected and nothing was written.
    /// An existing file with the same name is overwritten.
    pub fn accept(&self, file_name: &str, data: &[u8]) -> MediaResult<Option<StoredUpload>> {
        let Some(stored_name) = sanitize_filename(file_name) else {
            warn!(file = file_name, "upload rejected: unusable filename");
            return Ok(None);
        };
        if stored_name.len() > MAX_FILE_NAME_BYTES {
            warn!(bytes = stored_name.len(), "upload rejected: filename too long");
            return Ok(None);
        }
        if !self.is_allowed(&stored_name) {
            warn!(file = file_name, "upload rejected: extension not allowed");
            return Ok(None);
        }

        let created = !self.backend.exists(&stored_name)?;
        self.backend.write(&stored_name, data)?;
        info!(file = %stored_name, bytes = data.len(), created, "stored upload");
        Ok(Some(StoredUpload {
            name: stored_name,
            created,
        }))
    }

    /// Remove an upload whose entry was never saved.
    ///
    /// Files that existed before the upload overwrote them are left alone.
    pub fn discard(&self, upload: &StoredUpload) -> MediaResult<()> {
        if !upload.created {
            return Ok(());
        }
        match self.backend.delete(&upload.name) {
            Ok(()) | Err(MediaError::NotFound(_)) => {
                info!(file = %upload.name, "discarded orphaned upload");
                Ok(())
            }
            Err(e) => Err(e),
        }
    }
}
