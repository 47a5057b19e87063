//! Filesystem-based template source.
//!
//! Walks a directory and turns every regular file into a template file,
//! keyed by its path relative to the root. A trailing `.tmpl` is dropped
//! from file names, so `Cargo.toml.tmpl` becomes `Cargo.toml`.
//!
//! # Directory layout expected
//!
//! ```text
//! my-template/
//! ├── Cargo.toml.tmpl
//! ├── README.md
//! └── src/
//!     └── main.rs
//! ```

use std::{
    ffi::OsStr,
    fs,
    path::{Path, PathBuf},
};

use tracing::{debug, instrument};
use walkdir::{DirEntry, WalkDir};

use clikit_core::application::{ApplicationError, ports::TemplateSource};
use clikit_core::domain::{RelativePath, TemplateTree};
use clikit_core::error::ClikitResult;

const TEMPLATE_SUFFIX: &str = ".tmpl";

/// Version-control and build output never belong to a template.
const SKIPPED_DIRS: &[&str] = &[".git", "target"];

#[derive(Debug, Clone)]
pub struct DirectoryTemplate {
    root: PathBuf,
}

impl DirectoryTemplate {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl TemplateSource for DirectoryTemplate {
    #[instrument(skip(self), fields(dir = %self.root.display()))]
    fn load(&self) -> ClikitResult<TemplateTree> {
        if !self.root.is_dir() {
            return Err(load_error(format!(
                "'{}' is not a directory",
                self.root.display()
            )));
        }

        let mut tree = TemplateTree::new();
        let walker = WalkDir::new(&self.root)
            .min_depth(1)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|e| !is_skipped(e));

        for entry in walker {
            let entry = entry.map_err(|e| load_error(format!("directory walk error: {e}")))?;
            let rel = entry.path().strip_prefix(&self.root).map_err(|_| {
                load_error(format!(
                    "failed to relativise '{}' against '{}'",
                    entry.path().display(),
                    self.root.display()
                ))
            })?;

            if entry.file_type().is_dir() {
                tree.add_directory(RelativePath::try_new(rel)?);
                continue;
            }

            if !entry.file_type().is_file() {
                continue; // Skip symlinks and other special types.
            }

            let content = fs::read_to_string(entry.path()).map_err(|e| {
                load_error(format!("failed to read '{}': {e}", rel.display()))
            })?;
            let path = strip_template_suffix(rel);
            debug!(path = %path.display(), "template file");
            tree.add_file(RelativePath::try_new(path)?, content);
        }

        tree.validate()?;
        Ok(tree)
    }

    fn describe(&self) -> String {
        format!("template at {}", self.root.display())
    }
}

fn is_skipped(entry: &DirEntry) -> bool {
    entry.file_type().is_dir()
        && entry
            .file_name()
            .to_str()
            .is_some_and(|name| SKIPPED_DIRS.contains(&name))
}

fn strip_template_suffix(path: &Path) -> PathBuf {
    match path
        .file_name()
        .and_then(OsStr::to_str)
        .and_then(|name| name.strip_suffix(TEMPLATE_SUFFIX))
    {
        Some(stem) if !stem.is_empty() => path.with_file_name(stem),
        _ => path.to_path_buf(),
    }
}

fn load_error(reason: String) -> clikit_core::error::ClikitError {
    ApplicationError::TemplateLoad { reason }.into()
}
