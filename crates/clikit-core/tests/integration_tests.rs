//! Integration tests for clikit-core: wiring services through the container.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use clikit_core::application::ApplicationError;
use clikit_core::prelude::*;

/// Minimal in-memory filesystem so the core can be exercised on its own.
#[derive(Default)]
struct MapFilesystem {
    files: Mutex<HashMap<PathBuf, String>>,
}

impl Filesystem for MapFilesystem {
    fn exists(&self, path: &Path) -> bool {
        let files = self.files.lock().unwrap();
        files.keys().any(|p| p.starts_with(path))
    }

    fn read_file(&self, path: &Path) -> ClikitResult<String> {
        self.files
            .lock()
            .unwrap()
            .get(path)
            .cloned()
            .ok_or_else(|| {
                ApplicationError::FilesystemError {
                    path: path.to_path_buf(),
                    reason: "not found".into(),
                }
                .into()
            })
    }

    fn write_file(&self, path: &Path, content: &str) -> ClikitResult<()> {
        self.files
            .lock()
            .unwrap()
            .insert(path.to_path_buf(), content.to_string());
        Ok(())
    }

    fn create_dir_all(&self, _path: &Path) -> ClikitResult<()> {
        Ok(())
    }

    fn remove_dir_all(&self, path: &Path) -> ClikitResult<()> {
        self.files.lock().unwrap().retain(|p, _| !p.starts_with(path));
        Ok(())
    }
}

struct FixedTemplate;

impl TemplateSource for FixedTemplate {
    fn load(&self) -> ClikitResult<TemplateTree> {
        Ok(TemplateTree::new()
            .with_file("Cargo.toml", "[package]\nname = \"{{COMMAND_NAME}}\"\n")
            .with_file("src/main.rs", "Command::new(\"x\").name(\"my-cli-app\")")
            .with_file("README.md", "# My CLI App"))
    }

    fn describe(&self) -> String {
        "fixed".into()
    }
}

fn container() -> ServiceContainer {
    let container = ServiceContainer::new();
    let fs: SharedFilesystem = Arc::new(MapFilesystem::default());
    container.register_instance(fs).unwrap();
    container
        .register(ServiceDescriptor::constructor(
            Lifetime::Transient,
            vec![ServiceKey::of::<SharedFilesystem>()],
            |deps| Ok(ScaffoldService::new(deps.take_cloned::<SharedFilesystem>()?)),
        ))
        .unwrap();
    container
}

#[test]
fn scaffold_service_resolved_from_container_writes_project() {
    let container = container();
    let service = container.resolve::<ScaffoldService>().unwrap();
    let answers = ProjectAnswers::new("Greeter", "Says hello", "", "greeter").unwrap();

    let report = service
        .scaffold(&FixedTemplate, &answers, Path::new("greeter"))
        .unwrap();
    assert_eq!(report.files_written, 3);

    let fs = container.resolve_cloned::<SharedFilesystem>().unwrap();
    let manifest = fs.read_file(Path::new("greeter/Cargo.toml")).unwrap();
    assert!(manifest.contains("name = \"greeter\""));
    let readme = fs.read_file(Path::new("greeter/README.md")).unwrap();
    assert_eq!(readme, "# Greeter");

    // a second run hits the existing directory
    let again = service.scaffold(&FixedTemplate, &answers, Path::new("greeter"));
    assert!(matches!(
        again,
        Err(ClikitError::Application(ApplicationError::ProjectExists { .. }))
    ));
}

#[test]
fn transient_services_share_singleton_dependencies() {
    let container = container();
    let a = container.resolve::<ScaffoldService>().unwrap();
    let b = container.resolve::<ScaffoldService>().unwrap();
    assert!(!Arc::ptr_eq(&a, &b));

    let fs1 = container.resolve::<SharedFilesystem>().unwrap();
    let fs2 = container.resolve::<SharedFilesystem>().unwrap();
    assert!(Arc::ptr_eq(&fs1, &fs2));
}

#[test]
fn configuration_flows_through_container() {
    let container = ServiceContainer::new();
    container
        .register_instance(ConfigurationService::with_env(|key| {
            (key == "LOG_FILE").then(|| "/tmp/x.log".to_string())
        }))
        .unwrap();

    let service = container.resolve::<ConfigurationService>().unwrap();
    let config = service.load(None).unwrap();
    container.register_instance(config).unwrap();

    let config = container.resolve::<Configuration>().unwrap();
    assert_eq!(config.log_level, LogLevel::Info);
    assert_eq!(config.log_file.as_deref(), Some(Path::new("/tmp/x.log")));
}

#[test]
fn unregistered_service_is_an_error_not_a_panic() {
    let container = ServiceContainer::new();
    let err = container.resolve::<Configuration>().unwrap_err();
    assert_eq!(err.category(), clikit_core::error::ErrorCategory::NotFound);
}
