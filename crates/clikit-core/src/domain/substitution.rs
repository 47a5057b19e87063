//! Literal placeholder substitution applied to a freshly copied template.
//!
//! Rules are plain string replacements, never patterns; each one either
//! replaces every occurrence or only the first.

use super::project::ProjectAnswers;

pub const CARGO_MANIFEST: &str = "Cargo.toml";
pub const ENTRY_POINT: &str = "src/main.rs";
pub const README: &str = "README.md";

/// Name and help text the template's entry point ships with.
pub const TEMPLATE_COMMAND_NAME: &str = "my-cli-app";
pub const TEMPLATE_TITLE: &str = "My CLI App";
pub const TEMPLATE_ABOUT: &str = "A simple CLI application that echoes your name";
pub const TEMPLATE_README_DESCRIPTION: &str =
    "A simple CLI application that echoes your name with optional transformations.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Replace {
    All,
    First,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Substitution {
    pub from: String,
    pub to: String,
    pub mode: Replace,
}

impl Substitution {
    pub fn all(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            mode: Replace::All,
        }
    }

    pub fn first(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            mode: Replace::First,
        }
    }

    pub fn apply(&self, content: &str) -> String {
        match self.mode {
            Replace::All => content.replace(&self.from, &self.to),
            Replace::First => content.replacen(&self.from, &self.to, 1),
        }
    }
}

/// The ordered substitutions for one template file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileRewrite {
    pub path: &'static str,
    pub substitutions: Vec<Substitution>,
}

impl FileRewrite {
    pub fn apply(&self, content: &str) -> String {
        self.substitutions
            .iter()
            .fold(content.to_owned(), |acc, s| s.apply(&acc))
    }
}

/// Build the rewrite rules for a project.
pub fn rewrites_for(answers: &ProjectAnswers) -> Vec<FileRewrite> {
    vec![
        FileRewrite {
            path: CARGO_MANIFEST,
            substitutions: vec![
                Substitution::all("{{PROJECT_NAME}}", answers.project_name()),
                Substitution::all("{{DESCRIPTION}}", answers.description()),
                Substitution::all("{{AUTHOR}}", answers.author()),
                Substitution::all("{{COMMAND_NAME}}", answers.command_name()),
            ],
        },
        FileRewrite {
            path: ENTRY_POINT,
            substitutions: vec![
                Substitution::first(
                    format!(".name(\"{TEMPLATE_COMMAND_NAME}\")"),
                    format!(".name(\"{}\")", answers.command_name()),
                ),
                Substitution::first(
                    format!(".about(\"{TEMPLATE_ABOUT}\")"),
                    format!(".about(\"{}\")", answers.description()),
                ),
            ],
        },
        FileRewrite {
            path: README,
            substitutions: vec![
                Substitution::all(TEMPLATE_TITLE, answers.project_name()),
                Substitution::all(TEMPLATE_COMMAND_NAME, answers.command_name()),
                Substitution::first(TEMPLATE_README_DESCRIPTION, answers.description()),
            ],
        },
    ]
}
