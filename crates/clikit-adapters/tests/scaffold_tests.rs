//! End-to-end scaffolding through the real adapters.

use std::path::Path;
use std::sync::Arc;

use clikit_adapters::{
    DirectoryTemplate, EmbeddedTemplate, FileLogger, LocalFilesystem, MemoryFilesystem,
};
use clikit_core::application::ApplicationError;
use clikit_core::prelude::*;
use tempfile::TempDir;

fn answers() -> ProjectAnswers {
    ProjectAnswers::new("Greeter Tool", "Says hello politely", "Ada Lovelace", "greeter").unwrap()
}

#[test]
fn embedded_template_into_memory() {
    let fs = MemoryFilesystem::new();
    let service = ScaffoldService::new(Arc::new(fs.clone()));

    let report = service
        .scaffold(&EmbeddedTemplate, &answers(), Path::new("greeter"))
        .unwrap();
    assert_eq!(report.files_written, 12);

    let manifest = fs.read_file(Path::new("greeter/Cargo.toml")).unwrap();
    assert!(manifest.contains("name = \"greeter\""));
    assert!(manifest.contains("description = \"Says hello politely\""));
    assert!(manifest.contains("authors = [\"Ada Lovelace\"]"));
    assert!(manifest.contains("title = \"Greeter Tool\""));
    assert!(!manifest.contains("{{"));

    let main = fs.read_file(Path::new("greeter/src/main.rs")).unwrap();
    assert!(main.contains(".name(\"greeter\")"));
    assert!(main.contains(".about(\"Says hello politely\")"));

    let readme = fs.read_file(Path::new("greeter/README.md")).unwrap();
    assert!(readme.starts_with("# Greeter Tool\n"));
    assert!(readme.contains("Says hello politely"));
    assert!(readme.contains("greeter echo --name Ada"));
    assert!(!readme.contains("my-cli-app"));

    assert!(fs.exists(Path::new("greeter/.gitignore")));
}

#[test]
fn failed_write_leaves_nothing_behind() {
    let fs = MemoryFilesystem::new();
    fs.deny_writes("greeter/src");
    let service = ScaffoldService::new(Arc::new(fs.clone()));

    let err = service
        .scaffold(&EmbeddedTemplate, &answers(), Path::new("greeter"))
        .unwrap_err();
    assert!(matches!(
        err,
        ClikitError::Application(ApplicationError::FilesystemError { .. })
    ));
    assert!(!fs.exists(Path::new("greeter")));
    assert!(fs.list_files().is_empty());
}

#[test]
fn directory_template_onto_disk() {
    let template = TempDir::new().unwrap();
    std::fs::create_dir_all(template.path().join("src")).unwrap();
    std::fs::write(
        template.path().join("Cargo.toml.tmpl"),
        "[package]\nname = \"{{COMMAND_NAME}}\"\n",
    )
    .unwrap();
    std::fs::write(
        template.path().join("src/main.rs"),
        "fn main() { let _ = Command::new(\"x\").name(\"my-cli-app\"); }\n",
    )
    .unwrap();
    std::fs::write(template.path().join("README.md"), "# My CLI App\n").unwrap();

    let out = TempDir::new().unwrap();
    let target = out.path().join("greeter");
    let service = ScaffoldService::new(Arc::new(LocalFilesystem));

    service
        .scaffold(&DirectoryTemplate::new(template.path()), &answers(), &target)
        .unwrap();

    let manifest = std::fs::read_to_string(target.join("Cargo.toml")).unwrap();
    assert_eq!(manifest, "[package]\nname = \"greeter\"\n");
    assert!(!target.join("Cargo.toml.tmpl").exists());
}

#[test]
fn file_logger_on_local_disk_appends() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("logs/app.log");
    let logger = FileLogger::new(&path, Arc::new(LocalFilesystem), LogLevel::Info);

    logger.info("one");
    logger.debug("dropped");
    logger.warn("two");

    let content = std::fs::read_to_string(&path).unwrap();
    let lines: Vec<_> = content.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].ends_with("[INFO] one"));
    assert!(lines[1].ends_with("[WARN] two"));
}
