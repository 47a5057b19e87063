//! `clikit new`: generate a project from the template.
//!
//! Translates arguments and answers into [`ProjectAnswers`], hands them to the
//! core [`ScaffoldService`] and prints the result. The substitution rules
//! live in core.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use clap::{ArgMatches, Args, FromArgMatches};
use serde_json::json;
use tracing::{debug, instrument};

use clikit_adapters::DirectoryTemplate;
use clikit_core::domain::{DEFAULT_DESCRIPTION, ProjectAnswers, default_command_name};
use clikit_core::error::ClikitError;
use clikit_core::prelude::{ScaffoldService, SharedLogger, SharedTemplateSource, TemplateSource};

use crate::error::{CliError, CliResult};
use crate::output::OutputManager;
use crate::prompt::{self, Prompter};
use crate::registry::{CommandContext, CommandDescriptor, CommandOutcome};

#[derive(Debug, Clone, Args)]
pub struct NewArgs {
    /// A plain name creates `./name`; a path such as `../tools/name` works too.
    #[arg(value_name = "FOLDER", help = "Folder to create the project in")]
    pub folder: String,

    #[arg(long = "project-name", value_name = "NAME", help = "Project name")]
    pub project_name: Option<String>,

    #[arg(
        short = 'd',
        long = "description",
        value_name = "TEXT",
        help = "Project description"
    )]
    pub description: Option<String>,

    #[arg(short = 'a', long = "author", value_name = "NAME", help = "Author name")]
    pub author: Option<String>,

    #[arg(
        short = 'c',
        long = "command-name",
        value_name = "NAME",
        help = "CLI command name (lowercase letters, digits and hyphens)"
    )]
    pub command_name: Option<String>,

    /// Walk this directory instead of using the built-in template.
    #[arg(
        short = 't',
        long = "template-dir",
        value_name = "DIR",
        help = "Use a template directory instead of the built-in template"
    )]
    pub template_dir: Option<PathBuf>,

    #[arg(short = 'y', long = "yes", help = "Accept defaults for every unanswered question")]
    pub yes: bool,
}

pub fn descriptor() -> CommandDescriptor {
    CommandDescriptor {
        name: "new",
        description: "Create a new CLI project from the template",
        configure: |cmd| {
            NewArgs::augment_args(cmd).after_help(
                "EXAMPLES:\n\
                \x20 clikit new my-cli\n\
                \x20 clikit new my-cli --yes\n\
                \x20 clikit new tools/greeter -d \"Says hello\" -a \"Ada\" -c greet -y",
            )
        },
        execute,
    }
}

fn execute(matches: &ArgMatches, ctx: &CommandContext<'_>) -> CliResult<CommandOutcome> {
    let args = NewArgs::from_arg_matches(matches)?;

    let output = ctx.container.resolve::<OutputManager>()?;
    let service = ctx.container.resolve::<ScaffoldService>()?;
    let template: SharedTemplateSource = match &args.template_dir {
        Some(dir) => Arc::new(DirectoryTemplate::new(dir)),
        None => ctx.container.resolve_cloned::<SharedTemplateSource>()?,
    };
    let prompter = prompt::prompter(args.yes);

    let generator = Generator {
        service: &service,
        template: template.as_ref(),
        prompter: prompter.as_ref(),
        output: &output,
        logger: &ctx.logger,
    };
    generator.run(&args)
}

struct Generator<'a> {
    service: &'a ScaffoldService,
    template: &'a dyn TemplateSource,
    prompter: &'a dyn Prompter,
    output: &'a OutputManager,
    logger: &'a SharedLogger,
}

impl Generator<'_> {
    /// Dispatch sequence:
    /// 1. Resolve the folder and refuse an existing directory
    /// 2. Collect answers (flags, prompts or defaults)
    /// 3. Check the directory again, since prompting takes time
    /// 4. Scaffold
    /// 5. Print next steps
    #[instrument(skip_all, fields(folder = %args.folder))]
    fn run(&self, args: &NewArgs) -> CliResult<CommandOutcome> {
        let (folder_name, target) = resolve_folder(&args.folder)?;
        self.ensure_absent(&target)?;

        self.output.header("Creating a new Rust CLI application")?;

        let Some(answers) = collect_answers(args, &folder_name, self.prompter)? else {
            self.output.warning("Project creation cancelled")?;
            return Ok(CommandOutcome::success("Project creation cancelled"));
        };
        debug!(
            project = answers.project_name(),
            command = answers.command_name(),
            "answers collected"
        );

        self.ensure_absent(&target)?;

        self.output
            .info(&format!("Creating project in {}", target.display()))?;
        let spinner = self
            .output
            .spinner(format!("Writing files from the {}", self.template.describe()));
        let result = self.service.scaffold(self.template, &answers, &target);
        spinner.finish_and_clear();
        let report = result?;

        self.logger.debug(&format!(
            "Wrote {} files to {}",
            report.files_written,
            report.root.display()
        ));

        self.output.success("Project created successfully!")?;
        self.output.print("")?;
        self.output.print("Next steps:")?;
        self.output.print(&format!("  cd {}", args.folder))?;
        self.output.print("  cargo build")?;
        self.output.print(&format!(
            "  cargo run -- echo --name \"{}\"",
            answers.project_name()
        ))?;

        Ok(
            CommandOutcome::success(format!("Created {}", answers.project_name())).with_data(
                json!({
                    "path": report.root.display().to_string(),
                    "filesWritten": report.files_written,
                    "answers": answers,
                }),
            ),
        )
    }

    fn ensure_absent(&self, target: &Path) -> CliResult<()> {
        if self.service.target_exists(target) {
            return Err(CliError::DirectoryExists {
                path: target.to_path_buf(),
            });
        }
        Ok(())
    }
}

/// Split the folder argument into the default project name and the target
/// path.
pub fn resolve_folder(folder: &str) -> CliResult<(String, PathBuf)> {
    let path = Path::new(folder);

    let name = path
        .file_name()
        .and_then(|n| n.to_str())
        .filter(|n| !n.is_empty())
        .ok_or_else(|| CliError::InvalidProjectName {
            name: folder.into(),
            reason: "cannot extract a folder name".into(),
        })?;

    Ok((name.to_string(), path.to_path_buf()))
}

/// Flags win; anything not given on the command line is asked for.
///
/// Returns `None` when the project name is left empty, which cancels.
fn collect_answers(
    args: &NewArgs,
    folder_name: &str,
    prompter: &dyn Prompter,
) -> CliResult<Option<ProjectAnswers>> {
    let ask = |given: &Option<String>, question: &str, default: &str| match given {
        Some(value) => Ok(value.clone()),
        None => prompter.ask(question, default),
    };

    // Pre-filled rather than defaulted, so clearing it cancels.
    let project_name = match &args.project_name {
        Some(value) => value.clone(),
        None => prompter.ask_editable("Project name", folder_name)?,
    };
    if project_name.trim().is_empty() {
        return Ok(None);
    }
    let description = ask(&args.description, "Project description", DEFAULT_DESCRIPTION)?;
    let author = ask(&args.author, "Author name", "")?;
    let command_name = ask(
        &args.command_name,
        "CLI command name",
        &default_command_name(&project_name),
    )?;

    ProjectAnswers::new(project_name, description, author, command_name)
        .map(Some)
        .map_err(|e| ClikitError::from(e).into())
}
