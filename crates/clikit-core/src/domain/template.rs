use std::collections::HashSet;
use std::fmt;
use std::path::{Path, PathBuf};

use super::error::DomainError;

/// A filesystem path guaranteed to be **relative**.
///
/// Template trees are copied under a new project root; an absolute entry
/// would escape that root.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RelativePath(PathBuf);

impl RelativePath {
    /// Create a new relative path.
    ///
    /// # Panics
    /// Panics if the provided path is absolute.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        assert!(
            !path.is_absolute(),
            "RelativePath cannot be absolute: {path:?}"
        );
        Self(path)
    }

    /// Non-panicking variant of [`RelativePath::new`].
    pub fn try_new(path: impl Into<PathBuf>) -> Result<Self, DomainError> {
        let path = path.into();
        if path.is_absolute() {
            Err(DomainError::AbsolutePathNotAllowed {
                path: path.display().to_string(),
            })
        } else {
            Ok(Self(path))
        }
    }

    pub fn as_path(&self) -> &Path {
        &self.0
    }
}

impl AsRef<Path> for RelativePath {
    fn as_ref(&self) -> &Path {
        &self.0
    }
}

impl From<&str> for RelativePath {
    fn from(s: &str) -> Self {
        RelativePath::new(s)
    }
}

impl fmt::Display for RelativePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.display())
    }
}

/// One text file of a template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateFile {
    pub path: RelativePath,
    pub content: String,
}

/// The directories and files copied into a new project, in copy order.
///
/// Directories are listed separately so that empty ones survive the copy;
/// parents of files are created implicitly when the file is written.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TemplateTree {
    directories: Vec<RelativePath>,
    files: Vec<TemplateFile>,
}

impl TemplateTree {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_directory(&mut self, path: RelativePath) {
        self.directories.push(path);
    }

    pub fn add_file(&mut self, path: RelativePath, content: impl Into<String>) {
        self.files.push(TemplateFile {
            path,
            content: content.into(),
        });
    }

    pub fn with_directory(mut self, path: impl Into<RelativePath>) -> Self {
        self.add_directory(path.into());
        self
    }

    pub fn with_file(mut self, path: impl Into<RelativePath>, content: impl Into<String>) -> Self {
        self.add_file(path.into(), content);
        self
    }

    pub fn directories(&self) -> impl Iterator<Item = &RelativePath> {
        self.directories.iter()
    }

    pub fn files(&self) -> impl Iterator<Item = &TemplateFile> {
        self.files.iter()
    }

    pub fn file(&self, path: &Path) -> Option<&TemplateFile> {
        self.files.iter().find(|f| f.path.as_path() == path)
    }

    pub fn file_mut(&mut self, path: &Path) -> Option<&mut TemplateFile> {
        self.files.iter_mut().find(|f| f.path.as_path() == path)
    }

    pub fn file_count(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty() && self.directories.is_empty()
    }

    /// Reject duplicate entries; relativity is guaranteed by [`RelativePath`].
    pub fn validate(&self) -> Result<(), DomainError> {
        let mut seen = HashSet::new();
        let paths = self
            .directories
            .iter()
            .chain(self.files.iter().map(|f| &f.path));

        for path in paths {
            if !seen.insert(path.as_path()) {
                return Err(DomainError::DuplicatePath {
                    path: path.to_string(),
                });
            }
        }
        Ok(())
    }
}
