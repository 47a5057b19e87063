//! Questions asked by `clikit new`.

use std::io::IsTerminal as _;

use crate::error::CliResult;

/// Source of answers for the generator's questions.
pub trait Prompter {
    /// Ask `question`, offering `default`. An empty reply means the default.
    fn ask(&self, question: &str, default: &str) -> CliResult<String>;

    /// Ask `question` with `initial` pre-filled as editable text. Clearing it
    /// gives an empty answer rather than falling back to `initial`.
    fn ask_editable(&self, question: &str, initial: &str) -> CliResult<String> {
        self.ask(question, initial)
    }
}

/// Takes every default without asking. Used for `--yes` and when stdin is
/// not a terminal.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultsPrompter;

impl Prompter for DefaultsPrompter {
    fn ask(&self, _question: &str, default: &str) -> CliResult<String> {
        Ok(default.to_string())
    }
}

#[cfg(feature = "interactive")]
#[derive(Debug, Clone, Copy, Default)]
pub struct TerminalPrompter;

#[cfg(feature = "interactive")]
impl Prompter for TerminalPrompter {
    fn ask(&self, question: &str, default: &str) -> CliResult<String> {
        dialoguer::Input::<String>::new()
            .with_prompt(question)
            .default(default.to_string())
            .show_default(!default.is_empty())
            .allow_empty(true)
            .interact_text()
            .map_err(prompt_error)
    }

    fn ask_editable(&self, question: &str, initial: &str) -> CliResult<String> {
        dialoguer::Input::<String>::new()
            .with_prompt(question)
            .with_initial_text(initial)
            .allow_empty(true)
            .interact_text()
            .map_err(prompt_error)
    }
}

#[cfg(feature = "interactive")]
fn prompt_error(err: dialoguer::Error) -> crate::error::CliError {
    crate::error::CliError::Prompt {
        message: err.to_string(),
    }
}

/// Pick the prompter for this run.
pub fn prompter(assume_yes: bool) -> Box<dyn Prompter> {
    if assume_yes || !std::io::stdin().is_terminal() {
        return Box::new(DefaultsPrompter);
    }
    interactive()
}

#[cfg(feature = "interactive")]
fn interactive() -> Box<dyn Prompter> {
    Box::new(TerminalPrompter)
}

#[cfg(not(feature = "interactive"))]
fn interactive() -> Box<dyn Prompter> {
    tracing::debug!("built without the interactive feature, using defaults");
    Box::new(DefaultsPrompter)
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::collections::HashMap;
    use std::sync::Mutex;

    use super::*;

    /// Answers from a table; questions not in it get their default.
    #[derive(Default)]
    pub struct ScriptedPrompter {
        answers: HashMap<&'static str, &'static str>,
        asked: Mutex<Vec<String>>,
        editable: Mutex<Vec<String>>,
    }

    impl ScriptedPrompter {
        pub fn answer(mut self, question: &'static str, reply: &'static str) -> Self {
            self.answers.insert(question, reply);
            self
        }

        pub fn asked(&self) -> Vec<String> {
            self.asked.lock().map(|a| a.clone()).unwrap_or_default()
        }

        /// Questions that were asked as editable text.
        pub fn editable(&self) -> Vec<String> {
            self.editable.lock().map(|a| a.clone()).unwrap_or_default()
        }
    }

    impl Prompter for ScriptedPrompter {
        fn ask(&self, question: &str, default: &str) -> CliResult<String> {
            if let Ok(mut asked) = self.asked.lock() {
                asked.push(question.to_string());
            }
            Ok(self
                .answers
                .get(question)
                .map_or_else(|| default.to_string(), |r| r.to_string()))
        }

        fn ask_editable(&self, question: &str, initial: &str) -> CliResult<String> {
            if let Ok(mut editable) = self.editable.lock() {
                editable.push(question.to_string());
            }
            self.ask(question, initial)
        }
    }
}
