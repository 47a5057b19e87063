//! Scaffold Service - writes a new project from a template.
//!
//! This service coordinates the generation workflow:
//! 1. Refuse an existing target directory
//! 2. Load the template tree and apply the substitution rules
//! 3. Write to filesystem, rolling back on failure

use std::path::{Path, PathBuf};
use tracing::{info, instrument, warn};

use crate::{
    application::{
        ApplicationError,
        ports::{SharedFilesystem, TemplateSource},
    },
    domain::{ProjectAnswers, TemplateTree, rewrites_for},
    error::{ClikitError, ClikitResult},
};

/// What a successful scaffold produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScaffoldReport {
    pub root: PathBuf,
    pub files_written: usize,
}

/// Main scaffolding service.
pub struct ScaffoldService {
    filesystem: SharedFilesystem,
}

impl ScaffoldService {
    pub fn new(filesystem: SharedFilesystem) -> Self {
        Self { filesystem }
    }

    /// `true` if `target` is already taken.
    pub fn target_exists(&self, target: &Path) -> bool {
        self.filesystem.exists(target)
    }

    /// Scaffold a new project into `target`.
    #[instrument(
        skip_all,
        fields(
            project = %answers.project_name(),
            target = %target.display(),
            template = %source.describe()
        )
    )]
    pub fn scaffold(
        &self,
        source: &dyn TemplateSource,
        answers: &ProjectAnswers,
        target: &Path,
    ) -> ClikitResult<ScaffoldReport> {
        if self.filesystem.exists(target) {
            return Err(ApplicationError::ProjectExists {
                path: target.to_path_buf(),
            }
            .into());
        }

        let mut tree = source.load()?;
        tree.validate()?;
        apply_rewrites(&mut tree, answers)?;
        info!(files = tree.file_count(), "Template prepared");

        match self.write_tree(&tree, target) {
            Ok(files_written) => {
                info!(files_written, "Scaffold completed successfully");
                Ok(ScaffoldReport {
                    root: target.to_path_buf(),
                    files_written,
                })
            }
            Err(e) => {
                warn!(error = %e, "Write failed, attempting rollback");
                self.rollback(target, &e)?;
                Err(e)
            }
        }
    }

    fn write_tree(&self, tree: &TemplateTree, root: &Path) -> ClikitResult<usize> {
        self.filesystem.create_dir_all(root)?;

        for dir in tree.directories() {
            self.filesystem.create_dir_all(&root.join(dir))?;
        }

        let mut written = 0;
        for file in tree.files() {
            self.filesystem
                .write_file(&root.join(&file.path), &file.content)?;
            written += 1;
        }
        Ok(written)
    }

    /// Remove the partially written project. If that fails too, the caller
    /// gets [`ApplicationError::RollbackFailed`] so the leftovers are reported.
    fn rollback(&self, root: &Path, cause: &ClikitError) -> Result<(), ApplicationError> {
        match self.filesystem.remove_dir_all(root) {
            Ok(()) => {
                info!("Rollback successful");
                Ok(())
            }
            Err(e) => {
                warn!(error = %e, path = %root.display(), "Rollback failed");
                Err(ApplicationError::RollbackFailed {
                    path: root.to_path_buf(),
                    reason: format!("{e} (after: {cause})"),
                })
            }
        }
    }
}

fn apply_rewrites(tree: &mut TemplateTree, answers: &ProjectAnswers) -> ClikitResult<()> {
    for rewrite in rewrites_for(answers) {
        let file = tree.file_mut(Path::new(rewrite.path)).ok_or_else(|| {
            ApplicationError::TemplateFileMissing {
                path: rewrite.path.to_string(),
            }
        })?;
        file.content = rewrite.apply(&file.content);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::{MockFilesystem, MockTemplateSource};
    use std::sync::Arc;

    fn answers() -> ProjectAnswers {
        ProjectAnswers::new("Greeter", "Says hello", "Ada", "greeter").unwrap()
    }

    fn template() -> TemplateTree {
        TemplateTree::new()
            .with_directory("src")
            .with_file("Cargo.toml", "name = \"{{COMMAND_NAME}}\"\n")
            .with_file(
                "src/main.rs",
                ".name(\"my-cli-app\")\n.about(\"A simple CLI application that echoes your name\")\n",
            )
            .with_file("README.md", "# My CLI App\n")
    }

    fn source(tree: TemplateTree) -> MockTemplateSource {
        let mut source = MockTemplateSource::new();
        source.expect_describe().return_const("test".to_string());
        source.expect_load().returning(move || Ok(tree.clone()));
        source
    }

    #[test]
    fn refuses_existing_directory() {
        let mut fs = MockFilesystem::new();
        fs.expect_exists().return_const(true);
        fs.expect_create_dir_all().never();

        let service = ScaffoldService::new(Arc::new(fs));
        let err = service
            .scaffold(&source(template()), &answers(), Path::new("demo"))
            .unwrap_err();
        assert!(matches!(
            err,
            ClikitError::Application(ApplicationError::ProjectExists { .. })
        ));
    }

    #[test]
    fn missing_rewrite_target_fails_before_writing() {
        let mut fs = MockFilesystem::new();
        fs.expect_exists().return_const(false);
        fs.expect_create_dir_all().never();
        fs.expect_write_file().never();

        let tree = TemplateTree::new().with_file("Cargo.toml", "");
        let service = ScaffoldService::new(Arc::new(fs));
        let err = service
            .scaffold(&source(tree), &answers(), Path::new("demo"))
            .unwrap_err();
        assert!(matches!(
            err,
            ClikitError::Application(ApplicationError::TemplateFileMissing { .. })
        ));
    }

    #[test]
    fn failed_write_rolls_back() {
        let mut fs = MockFilesystem::new();
        fs.expect_exists().return_const(false);
        fs.expect_create_dir_all().returning(|_| Ok(()));
        fs.expect_write_file().returning(|path, _| {
            Err(ApplicationError::FilesystemError {
                path: path.to_path_buf(),
                reason: "disk full".into(),
            }
            .into())
        });
        fs.expect_remove_dir_all()
            .withf(|path| path.ends_with("demo"))
            .times(1)
            .returning(|_| Ok(()));

        let service = ScaffoldService::new(Arc::new(fs));
        let err = service
            .scaffold(&source(template()), &answers(), Path::new("demo"))
            .unwrap_err();
        assert!(matches!(
            err,
            ClikitError::Application(ApplicationError::FilesystemError { .. })
        ));
    }

    #[test]
    fn failed_rollback_is_reported() {
        let mut fs = MockFilesystem::new();
        fs.expect_exists().return_const(false);
        fs.expect_create_dir_all().returning(|_| Ok(()));
        fs.expect_write_file().returning(|path, _| {
            Err(ApplicationError::FilesystemError {
                path: path.to_path_buf(),
                reason: "disk full".into(),
            }
            .into())
        });
        fs.expect_remove_dir_all().times(1).returning(|path| {
            Err(ApplicationError::FilesystemError {
                path: path.to_path_buf(),
                reason: "permission denied".into(),
            }
            .into())
        });

        let service = ScaffoldService::new(Arc::new(fs));
        let err = service
            .scaffold(&source(template()), &answers(), Path::new("demo"))
            .unwrap_err();
        match err {
            ClikitError::Application(ApplicationError::RollbackFailed { path, reason }) => {
                assert_eq!(path, PathBuf::from("demo"));
                assert!(reason.contains("permission denied"));
                assert!(reason.contains("disk full"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn writes_every_file_under_root() {
        let mut fs = MockFilesystem::new();
        fs.expect_exists().return_const(false);
        fs.expect_create_dir_all().returning(|_| Ok(()));
        fs.expect_write_file()
            .withf(|path, content| {
                path.starts_with("demo") && !content.contains("{{") && !content.contains("my-cli-app")
            })
            .times(3)
            .returning(|_, _| Ok(()));
        fs.expect_remove_dir_all().never();

        let service = ScaffoldService::new(Arc::new(fs));
        let report = service
            .scaffold(&source(template()), &answers(), Path::new("demo"))
            .unwrap();
        assert_eq!(report.files_written, 3);
        assert_eq!(report.root, PathBuf::from("demo"));
    }
}
