//! The project template compiled into the binary.

use clikit_core::application::ports::TemplateSource;
use clikit_core::domain::TemplateTree;
use clikit_core::error::ClikitResult;

/// Template files as `(project path, content)`.
///
/// The manifest is stored as `Cargo.toml.tmpl` so Cargo never mistakes the
/// template directory for a package.
const FILES: &[(&str, &str)] = &[
    ("Cargo.toml", include_str!("../../template/Cargo.toml.tmpl")),
    (".gitignore", include_str!("../../template/.gitignore")),
    ("README.md", include_str!("../../template/README.md")),
    ("src/main.rs", include_str!("../../template/src/main.rs")),
    ("src/app.rs", include_str!("../../template/src/app.rs")),
    ("src/config.rs", include_str!("../../template/src/config.rs")),
    ("src/container.rs", include_str!("../../template/src/container.rs")),
    ("src/error.rs", include_str!("../../template/src/error.rs")),
    ("src/logging.rs", include_str!("../../template/src/logging.rs")),
    ("src/registry.rs", include_str!("../../template/src/registry.rs")),
    (
        "src/commands/mod.rs",
        include_str!("../../template/src/commands/mod.rs"),
    ),
    (
        "src/commands/echo.rs",
        include_str!("../../template/src/commands/echo.rs"),
    ),
];

const DIRECTORIES: &[&str] = &["src", "src/commands"];

#[derive(Debug, Clone, Copy, Default)]
pub struct EmbeddedTemplate;

impl EmbeddedTemplate {
    pub fn new() -> Self {
        Self
    }
}

impl TemplateSource for EmbeddedTemplate {
    fn load(&self) -> ClikitResult<TemplateTree> {
        let tree = DIRECTORIES
            .iter()
            .fold(TemplateTree::new(), |tree, dir| tree.with_directory(*dir));
        Ok(FILES
            .iter()
            .fold(tree, |tree, (path, content)| tree.with_file(*path, *content)))
    }

    fn describe(&self) -> String {
        "built-in template".into()
    }
}
