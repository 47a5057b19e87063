//! In-memory filesystem adapter for testing.

use std::{
    collections::{HashMap, HashSet},
    path::{Path, PathBuf},
    sync::{Arc, RwLock},
};

use clikit_core::application::{ApplicationError, ports::Filesystem};
use clikit_core::error::ClikitResult;

/// In-memory filesystem for testing.
///
/// Clones share state, so a test can keep one handle while the code under
/// test owns another.
#[derive(Debug, Clone, Default)]
pub struct MemoryFilesystem {
    inner: Arc<RwLock<MemoryFilesystemInner>>,
}

#[derive(Debug, Default)]
struct MemoryFilesystemInner {
    files: HashMap<PathBuf, String>,
    directories: HashSet<PathBuf>,
    read_only: HashSet<PathBuf>,
}

impl MemoryFilesystem {
    /// Create a new empty memory filesystem.
    pub fn new() -> Self {
        Self::default()
    }

    /// Make writes to `path` (or anything below it) fail.
    pub fn deny_writes(&self, path: impl Into<PathBuf>) {
        if let Ok(mut inner) = self.inner.write() {
            inner.read_only.insert(path.into());
        }
    }

    /// List all files, sorted.
    pub fn list_files(&self) -> Vec<PathBuf> {
        let mut files: Vec<_> = self
            .inner
            .read()
            .map(|inner| inner.files.keys().cloned().collect())
            .unwrap_or_default();
        files.sort();
        files
    }
}

fn lock_error(path: &Path) -> ApplicationError {
    ApplicationError::FilesystemError {
        path: path.to_path_buf(),
        reason: "memory filesystem lock poisoned".into(),
    }
}

impl Filesystem for MemoryFilesystem {
    fn exists(&self, path: &Path) -> bool {
        self.inner
            .read()
            .map(|inner| inner.files.contains_key(path) || inner.directories.contains(path))
            .unwrap_or(false)
    }

    fn read_file(&self, path: &Path) -> ClikitResult<String> {
        let inner = self.inner.read().map_err(|_| lock_error(path))?;
        inner.files.get(path).cloned().ok_or_else(|| {
            ApplicationError::FilesystemError {
                path: path.to_path_buf(),
                reason: "No such file".into(),
            }
            .into()
        })
    }

    fn write_file(&self, path: &Path, content: &str) -> ClikitResult<()> {
        let mut inner = self.inner.write().map_err(|_| lock_error(path))?;

        if inner.read_only.iter().any(|p| path.starts_with(p)) {
            return Err(ApplicationError::FilesystemError {
                path: path.to_path_buf(),
                reason: "Permission denied".into(),
            }
            .into());
        }

        if let Some(parent) = path.parent() {
            let mut current = PathBuf::new();
            for component in parent.components() {
                current.push(component);
                inner.directories.insert(current.clone());
            }
        }

        inner.files.insert(path.to_path_buf(), content.to_string());
        Ok(())
    }

    fn create_dir_all(&self, path: &Path) -> ClikitResult<()> {
        let mut inner = self.inner.write().map_err(|_| lock_error(path))?;

        let mut current = PathBuf::new();
        for component in path.components() {
            current.push(component);
            inner.directories.insert(current.clone());
        }

        Ok(())
    }

    fn remove_dir_all(&self, path: &Path) -> ClikitResult<()> {
        let mut inner = self.inner.write().map_err(|_| lock_error(path))?;

        inner.directories.retain(|p| !p.starts_with(path));
        inner.files.retain(|p, _| !p.starts_with(path));

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn write_registers_parent_directories() {
        let fs = MemoryFilesystem::new();
        fs.write_file(Path::new("demo/src/main.rs"), "fn main() {}")
            .unwrap();

        assert!(fs.exists(Path::new("demo")));
        assert!(fs.exists(Path::new("demo/src")));
        assert_eq!(
            fs.read_file(Path::new("demo/src/main.rs")).unwrap(),
            "fn main() {}"
        );
    }

    #[test]
    fn clones_share_state() {
        let fs = MemoryFilesystem::new();
        let other = fs.clone();
        other.write_file(Path::new("a.txt"), "x").unwrap();
        assert_eq!(fs.list_files(), vec![PathBuf::from("a.txt")]);
    }

    #[test]
    fn denied_writes_fail() {
        let fs = MemoryFilesystem::new();
        fs.deny_writes("locked");
        assert!(fs.write_file(Path::new("locked/a.txt"), "x").is_err());
        assert!(fs.write_file(Path::new("open/a.txt"), "x").is_ok());
    }

    #[test]
    fn remove_dir_all_drops_subtree() {
        let fs = MemoryFilesystem::new();
        fs.write_file(Path::new("demo/a.txt"), "").unwrap();
        fs.write_file(Path::new("keep/b.txt"), "").unwrap();

        fs.remove_dir_all(Path::new("demo")).unwrap();
        assert!(!fs.exists(Path::new("demo")));
        assert_eq!(fs.list_files(), vec![PathBuf::from("keep/b.txt")]);
    }
}
