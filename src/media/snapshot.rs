//! # Snapshot Writer
//!
//! Renders an entry to `<slug>.html` in the snapshot directory. Snapshots
//! are written after the document is saved and are not rolled back with it.

use tracing::{debug, info};

use super::backend::MediaBackend;
use super::errors::{MediaError, MediaResult};
use crate::blog::BlogEntry;
use crate::templates::blog_page;

/// File name of the snapshot for a slug
pub fn snapshot_file_name(slug: &str) -> String {
    format!("{}.html", slug)
}

#[derive(Debug)]
pub struct SnapshotWriter<B: MediaBackend> {
    backend: B,
}

impl<B: MediaBackend> SnapshotWriter<B> {
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Render and write the snapshot, replacing any previous one.
    ///
    /// Returns the file name written.
    pub fn write_snapshot(&self, entry: &BlogEntry) -> MediaResult<String> {
        let name = snapshot_file_name(&entry.slug);
        let html = blog_page(entry).into_string();
        self.backend.write(&name, html.as_bytes())?;
        info!(id = entry.id, file = %name, "wrote snapshot");
        Ok(name)
    }

    /// Remove the snapshot for a slug that is no longer in use.
    ///
    /// A missing file is not an error.
    pub fn remove_snapshot(&self, slug: &str) -> MediaResult<()> {
        let name = snapshot_file_name(slug);
        match self.backend.delete(&name) {
            Ok(()) => {
                info!(file = %name, "removed stale snapshot");
                Ok(())
            }
            Err(MediaError::NotFound(_)) => {
                debug!(file = %name, "no stale snapshot to remove");
                Ok(())
            }
            Err(e) => Err(e),
        }
    }
}
