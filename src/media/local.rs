//! # Local Directory Backend

use std::fs;
use std::path::{Component, Path, PathBuf};

use super::backend::MediaBackend;
use super::errors::{MediaError, MediaResult};

/// Stores files directly inside one directory
#[derive(Debug, Clone)]
pub struct LocalBackend {
    root: PathBuf,
}

impl LocalBackend {
    /// Create a new local backend
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Create the root directory if needed
    pub fn ensure_root(&self) -> MediaResult<()> {
        fs::create_dir_all(&self.root).map_err(|e| MediaError::IoError(e.to_string()))
    }

    fn full_path(&self, name: &str) -> MediaResult<PathBuf> {
        let mut components = Path::new(name).components();
        match (components.next(), components.next()) {
            (Some(Component::Normal(_)), None) => Ok(self.root.join(name)),
            _ => Err(MediaError::InvalidPath(name.to_string())),
        }
    }
}

impl MediaBackend for LocalBackend {
    fn write(&self, name: &str, data: &[u8]) -> MediaResult<()> {
        let full_path = self.full_path(name)?;
        self.ensure_root()?;

        fs::write(&full_path, data).map_err(|e| MediaError::IoError(e.to_string()))
    }

    fn delete(&self, name: &str) -> MediaResult<()> {
        let full_path = self.full_path(name)?;

        fs::remove_file(&full_path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                MediaError::NotFound(name.to_string())
            } else {
                MediaError::IoError(e.to_string())
            }
        })
    }

    fn exists(&self, name: &str) -> MediaResult<bool> {
        Ok(self.full_path(name)?.is_file())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_write() {
        let temp = TempDir::new().unwrap();
        let backend = LocalBackend::new(temp.path());

        assert!(!backend.exists("test.png").unwrap());
        backend.write("test.png", b"hello").unwrap();
        assert!(backend.exists("test.png").unwrap());
        assert_eq!(fs::read(temp.path().join("test.png")).unwrap(), b"hello");
    }

    #[test]
    fn test_write_creates_root() {
        let temp = TempDir::new().unwrap();
        let backend = LocalBackend::new(temp.path().join("static/uploads"));

        backend.write("a.gif", b"gif").unwrap();
        assert!(temp.path().join("static/uploads/a.gif").is_file());
    }

    #[test]
    fn test_overwrite() {
        let temp = TempDir::new().unwrap();
        let backend = LocalBackend::new(temp.path());

        backend.write("same.jpg", b"first").unwrap();
        backend.write("same.jpg", b"second").unwrap();
        assert_eq!(fs::read(temp.path().join("same.jpg")).unwrap(), b"second");
    }

    #[test]
    fn test_rejects_nested_and_parent_paths() {
        let temp = TempDir::new().unwrap();
        let backend = LocalBackend::new(temp.path().join("root"));

        for name in ["../escape.png", "a/b.png", "/abs.png", "..", ".", ""] {
            let result = backend.write(name, b"x");
            assert!(
                matches!(result, Err(MediaError::InvalidPath(_))),
                "accepted {:?}",
                name
            );
        }
        assert!(!temp.path().join("escape.png").exists());
    }

    #[test]
    fn test_delete() {
        let temp = TempDir::new().unwrap();
        let backend = LocalBackend::new(temp.path());

        backend.write("delete-me.html", b"bye").unwrap();
        assert!(backend.exists("delete-me.html").unwrap());

        backend.delete("delete-me.html").unwrap();
        assert!(!backend.exists("delete-me.html").unwrap());
    }

    #[test]
    fn test_not_found() {
        let temp = TempDir::new().unwrap();
        let backend = LocalBackend::new(temp.path());

        let result = backend.delete("nonexistent.png");
        assert!(matches!(result, Err(MediaError::NotFound(_))));
    }
}
