use serde::Serialize;

use super::error::DomainError;

/// Description used when the user accepts the default.
pub const DEFAULT_DESCRIPTION: &str = "A Rust CLI application";

/// Answers collected by `clikit new`, validated and ready for substitution.
///
/// Every value is written verbatim into TOML strings and Rust string
/// literals, so characters that would terminate those literals are refused.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectAnswers {
    project_name: String,
    description: String,
    author: String,
    command_name: String,
}

impl ProjectAnswers {
    pub fn new(
        project_name: impl Into<String>,
        description: impl Into<String>,
        author: impl Into<String>,
        command_name: impl Into<String>,
    ) -> Result<Self, DomainError> {
        let answers = Self {
            project_name: project_name.into(),
            description: description.into(),
            author: author.into(),
            command_name: command_name.into(),
        };
        answers.validate()?;
        Ok(answers)
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        if self.project_name.is_empty() {
            return Err(DomainError::EmptyProjectName);
        }
        validate_command_name(&self.command_name)?;

        for (field, value) in [
            ("project name", &self.project_name),
            ("description", &self.description),
            ("author", &self.author),
        ] {
            check_literal_safe(field, value)?;
        }
        Ok(())
    }

    pub fn project_name(&self) -> &str {
        &self.project_name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn author(&self) -> &str {
        &self.author
    }

    pub fn command_name(&self) -> &str {
        &self.command_name
    }
}

/// Derive a command name from a project name: every character outside
/// `[A-Za-z0-9-]` becomes `-`, then the result is lowercased.
pub fn default_command_name(project_name: &str) -> String {
    project_name
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' {
                c.to_ascii_lowercase()
            } else {
                '-'
            }
        })
        .collect()
}

/// Command names must match `^[a-z0-9-]+$`.
pub fn validate_command_name(name: &str) -> Result<(), DomainError> {
    let valid = !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-');

    if valid {
        Ok(())
    } else {
        Err(DomainError::InvalidCommandName { value: name.into() })
    }
}

fn check_literal_safe(field: &'static str, value: &str) -> Result<(), DomainError> {
    match value.chars().find(|c| matches!(c, '"' | '\\' | '\n' | '\r')) {
        Some(character) => Err(DomainError::UnsupportedCharacter { field, character }),
        None => Ok(()),
    }
}
