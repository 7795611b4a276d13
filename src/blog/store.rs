//! # Blog Store
//!
//! The whole collection lives in one JSON array document. Every write
//! replaces the document: the new contents go to a sibling temporary file
//! which is then renamed over the original, so readers see either the old
//! or the new collection and never a partial one.
//!
//! Read-modify-write cycles go through [`BlogStore::update`], which holds a
//! process-wide lock for the whole cycle.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

use tracing::{debug, info};

use super::entry::{id_after, BlogEntry};
use super::errors::{BlogError, BlogResult};

/// Handle to the JSON document holding every entry
#[derive(Debug)]
pub struct BlogStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl BlogStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.is_file()
    }

    /// Create an empty document if none exists.
    ///
    /// Returns `true` when a document was created.
    pub fn init(&self) -> BlogResult<bool> {
        let _guard = self.lock();
        if self.exists() {
            return Ok(false);
        }
        self.write_document(&[])?;
        info!(path = %self.path.display(), "created empty blog document");
        Ok(true)
    }

    /// Read the full collection.
    ///
    /// Entries without an id (documents from before ids existed) are
    /// numbered after the highest id present, in document order.
    pub fn load(&self) -> BlogResult<Vec<BlogEntry>> {
        let raw = fs::read(&self.path).map_err(|e| BlogError::io(&self.path, e))?;
        let mut entries: Vec<BlogEntry> = serde_json::from_slice(&raw)
            .map_err(|e| BlogError::Malformed(format!("{}: {}", self.path.display(), e)))?;
        assign_missing_ids(&mut entries)?;
        debug!(count = entries.len(), "loaded blog document");
        Ok(entries)
    }

    /// Replace the full collection
    pub fn save(&self, entries: &[BlogEntry]) -> BlogResult<()> {
        let _guard = self.lock();
        self.write_document(entries)
    }

    /// Run one load-mutate-save cycle under the writer lock.
    ///
    /// The document is written back only when `f` succeeds.
    pub fn update<T, E>(&self, f: impl FnOnce(&mut Vec<BlogEntry>) -> Result<T, E>) -> Result<T, E>
    where
        E: From<BlogError>,
    {
        let _guard = self.lock();
        let mut entries = self.load()?;
        let value = f(&mut entries)?;
        self.write_document(&entries)?;
        Ok(value)
    }

    fn lock(&self) -> MutexGuard<'_, ()> {
        // The guarded value is `()`, so a poisoned lock carries no broken state.
        self.write_lock
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn write_document(&self, entries: &[BlogEntry]) -> BlogResult<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| BlogError::io(parent, e))?;
        }

        let json = serde_json::to_vec_pretty(entries)
            .map_err(|e| BlogError::Malformed(e.to_string()))?;

        let tmp_path = self.temp_path();
        let mut file = fs::File::create(&tmp_path).map_err(|e| BlogError::io(&tmp_path, e))?;
        file.write_all(&json)
            .and_then(|_| file.sync_all())
            .map_err(|e| BlogError::io(&tmp_path, e))?;
        drop(file);

        fs::rename(&tmp_path, &self.path).map_err(|e| BlogError::io(&self.path, e))?;
        debug!(count = entries.len(), "saved blog document");
        Ok(())
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| "blogs.json".into());
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

fn assign_missing_ids(entries: &mut [BlogEntry]) -> BlogResult<()> {
    let mut last = entries.iter().map(|e| e.id).max().unwrap_or(0);
    for entry in entries.iter_mut().filter(|e| e.id == 0) {
        last = id_after(last)?;
        entry.id = last;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blog::entry::{next_id, BackgroundColor, EntryDraft, TextColor};
    use tempfile::TempDir;

    fn entry(id: u64, title: &str) -> BlogEntry {
        BlogEntry::from_draft(
            id,
            EntryDraft {
                title: title.to_string(),
                content: format!("content of {}", title),
                text_color: TextColor::Black,
                background_color: BackgroundColor::White,
            },
        )
    }

    fn store_in(temp: &TempDir) -> BlogStore {
        BlogStore::new(temp.path().join("blogs.json"))
    }

    #[test]
    fn test_load_missing_document() {
        let temp = TempDir::new().unwrap();
        let store = store_in(&temp);
        assert!(matches!(store.load(), Err(BlogError::DocumentMissing(_))));
    }

    #[test]
    fn test_load_malformed_document() {
        let temp = TempDir::new().unwrap();
        let store = store_in(&temp);
        fs::write(store.path(), b"{not json").unwrap();
        assert!(matches!(store.load(), Err(BlogError::Malformed(_))));
    }

    #[test]
    fn test_init_creates_empty_document_once() {
        let temp = TempDir::new().unwrap();
        let store = store_in(&temp);

        assert!(store.init().unwrap());
        assert!(store.load().unwrap().is_empty());

        store.save(&[entry(1, "kept")]).unwrap();
        assert!(!store.init().unwrap());
        assert_eq!(store.load().unwrap().len(), 1);
    }

    #[test]
    fn test_round_trip_preserves_order_and_fields() {
        let temp = TempDir::new().unwrap();
        let store = store_in(&temp);

        let mut entries: Vec<_> = (1..=5).map(|i| entry(i, &format!("Post {}", i))).collect();
        entries[2].image = Some("photo.png".to_string());
        entries[4].video = Some("clip.mov".to_string());

        store.save(&entries).unwrap();
        assert_eq!(store.load().unwrap(), entries);
    }

    #[test]
    fn test_save_leaves_no_temp_file() {
        let temp = TempDir::new().unwrap();
        let store = store_in(&temp);
        store.save(&[entry(1, "a")]).unwrap();
        assert!(!store.temp_path().exists());
    }

    #[test]
    fn test_save_creates_parent_directory() {
        let temp = TempDir::new().unwrap();
        let store = BlogStore::new(temp.path().join("nested/dir/blogs.json"));
        store.save(&[]).unwrap();
        assert!(store.exists());
    }

    #[test]
    fn test_legacy_entries_get_positional_ids() {
        let temp = TempDir::new().unwrap();
        let store = store_in(&temp);
        fs::write(
            store.path(),
            r#"[
                {"title":"A","slug":"a","content":"x","text_color":"black","background_color":"white","image":null,"video":null},
                {"title":"B","slug":"b","content":"y","text_color":"red","background_color":"green","image":"b.gif","video":null}
            ]"#,
        )
        .unwrap();

        let entries = store.load().unwrap();
        assert_eq!(entries.iter().map(|e| e.id).collect::<Vec<_>>(), vec![1, 2]);
        assert_eq!(entries[1].image.as_deref(), Some("b.gif"));
    }

    #[test]
    fn test_highest_id_loads_but_cannot_grow() {
        let temp = TempDir::new().unwrap();
        let store = store_in(&temp);
        store.save(&[entry(u64::MAX, "last")]).unwrap();

        assert_eq!(store.load().unwrap()[0].id, u64::MAX);

        let result = store.update(|entries| -> BlogResult<()> {
            let id = next_id(entries)?;
            entries.push(entry(id, "overflow"));
            Ok(())
        });
        assert!(matches!(result, Err(BlogError::Malformed(_))));
        assert_eq!(store.load().unwrap().len(), 1);
    }

    #[test]
    fn test_legacy_entry_after_highest_id_is_malformed() {
        let temp = TempDir::new().unwrap();
        let store = store_in(&temp);
        fs::write(
            store.path(),
            format!(
                r#"[
                    {{"id":{},"title":"A","slug":"a","content":"x","text_color":"black","background_color":"white"}},
                    {{"title":"B","slug":"b","content":"y","text_color":"black","background_color":"white"}}
                ]"#,
                u64::MAX
            ),
        )
        .unwrap();

        assert!(matches!(store.load(), Err(BlogError::Malformed(_))));
    }

    #[test]
    fn test_update_writes_on_success() {
        let temp = TempDir::new().unwrap();
        let store = store_in(&temp);
        store.init().unwrap();

        let id = store
            .update(|entries| -> BlogResult<u64> {
                let id = next_id(entries)?;
                entries.push(entry(id, "new"));
                Ok(id)
            })
            .unwrap();

        assert_eq!(id, 1);
        assert_eq!(store.load().unwrap().len(), 1);
    }

    #[test]
    fn test_update_discards_on_error() {
        let temp = TempDir::new().unwrap();
        let store = store_in(&temp);
        store.save(&[entry(1, "original")]).unwrap();

        let result = store.update(|entries| -> BlogResult<()> {
            entries.clear();
            Err(BlogError::IoError("boom".to_string()))
        });

        assert!(result.is_err());
        assert_eq!(store.load().unwrap().len(), 1);
    }

    #[test]
    fn test_concurrent_updates_are_not_lost() {
        let temp = TempDir::new().unwrap();
        let store = std::sync::Arc::new(store_in(&temp));
        store.init().unwrap();

        let handles: Vec<_> = (0..8)
            .map(|i| {
                let store = store.clone();
                std::thread::spawn(move || {
                    store
                        .update(|entries| -> BlogResult<()> {
                            let id = next_id(entries)?;
                            entries.push(entry(id, &format!("thread {}", i)));
                            Ok(())
                        })
                        .unwrap();
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        let entries = store.load().unwrap();
        assert_eq!(entries.len(), 8);
        let mut ids: Vec<_> = entries.iter().map(|e| e.id).collect();
        ids.sort_unstable();
        assert_eq!(ids, (1..=8).collect::<Vec<_>>());
    }
}
