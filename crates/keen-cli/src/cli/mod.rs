//! CLI argument definitions using the clap derive API.
//!
//! This module is the *only* place that knows about argument names, aliases,
//! and help text.  No business logic lives here.
//!
//! The project name and type are not clap arguments. Every token that does
//! not belong to one of the options below is handed, in order, to
//! [`Invocation::from_args`], which applies the tool's own token scan.

use std::ffi::OsString;
use std::path::PathBuf;

use clap::{Arg, Args, Command, CommandFactory, Parser};

use keen_core::domain::{DomainError, Invocation};

pub mod global;
pub use global::{GlobalArgs, OutputFormat};

const TYPE_FLAG: &str = "--type";

/// Main CLI entry-point.
#[derive(Debug, Parser)]
#[command(
    name    = "keen-project-create",
    bin_name = "keen-project-create",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "Create a new Keen project",
    long_about = "Copies the bundled Keen template into ./<project-name>, \
                  fills in the project name and installs dependencies with npm.",
    override_usage = "keen-project-create [OPTIONS] <project-name> [type] [--type <type>]",
    after_help = "PROJECT:\n\
        \x20 <project-name>     First argument not starting with '-'\n\
        \x20 [type]             Second such argument, used when --type is absent\n\
        \x20 --type <type>      Project type; --type=<type> also works\n\
        \n\
        EXAMPLES:\n\
        \x20 keen-project-create my-agent\n\
        \x20 keen-project-create my-agent --type vscode\n\
        \x20 keen-project-create my-agent --skip-install",
)]
pub struct Cli {
    /// Flags that shape logging and output.
    #[command(flatten)]
    pub global: GlobalArgs,

    /// What to create.
    #[command(flatten)]
    pub project: CreateArgs,
}

/// Arguments describing the project to create.
#[derive(Debug, Args)]
pub struct CreateArgs {
    /// Tokens left for the project scan, in command-line order.
    #[arg(skip)]
    pub tokens: Vec<String>,

    /// Directory holding the template trees.
    #[arg(
        long = "templates-dir",
        value_name = "DIR",
        help = "Use templates from DIR instead of the bundled ones"
    )]
    pub templates_dir: Option<PathBuf>,

    /// Do not run the package manager after creating the project.
    #[arg(long = "skip-install", help = "Skip installing dependencies")]
    pub skip_install: bool,
}

impl CreateArgs {
    /// Reduce the project tokens to an [`Invocation`].
    pub fn invocation(&self) -> Result<Invocation, DomainError> {
        Invocation::from_args(&self.tokens)
    }
}

impl Cli {
    /// Parse `raw` (program name first).
    ///
    /// Tokens naming one of the declared options, plus the value each one
    /// takes, go to clap. Everything else goes to [`CreateArgs::tokens`].
    pub fn try_parse_split<I, T>(raw: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString>,
    {
        let raw = raw
            .into_iter()
            .map(|token| token.into().to_string_lossy().into_owned());

        let mut cmd = Self::command();
        cmd.build();
        let (owned, tokens) = split_args(&cmd, raw);

        let mut cli = Self::try_parse_from(owned)?;
        cli.project.tokens = tokens;
        Ok(cli)
    }
}

fn split_args(cmd: &Command, raw: impl IntoIterator<Item = String>) -> (Vec<String>, Vec<String>) {
    let mut raw = raw.into_iter();
    let mut owned: Vec<String> = raw.next().into_iter().collect();
    let mut project = Vec::new();

    while let Some(token) = raw.next() {
        if token == TYPE_FLAG {
            // The scan decides what follows a bare `--type`.
            project.push(token);
            project.extend(raw.next());
            continue;
        }
        match owning_arg(cmd, &token) {
            Some(needs_value) => {
                owned.push(token);
                if needs_value {
                    owned.extend(raw.next());
                }
            }
            None => project.push(token),
        }
    }
    (owned, project)
}

/// `Some(needs_value)` when `token` names a declared option. `needs_value`
/// is true when the option's value is the next token.
fn owning_arg(cmd: &Command, token: &str) -> Option<bool> {
    if let Some(long) = token.strip_prefix("--") {
        let (name, inline) = match long.split_once('=') {
            Some((name, _)) => (name, true),
            None => (long, false),
        };
        if name.is_empty() {
            return None;
        }
        let arg = cmd.get_arguments().find(|a| a.get_long() == Some(name))?;
        return Some(takes_value(arg) && !inline);
    }

    let shorts = token.strip_prefix('-').filter(|s| !s.is_empty())?;
    let count = shorts.chars().count();
    for (i, c) in shorts.chars().enumerate() {
        let arg = cmd.get_arguments().find(|a| a.get_short() == Some(c))?;
        if takes_value(arg) {
            return Some(i + 1 == count);
        }
    }
    Some(false)
}

fn takes_value(arg: &Arg) -> bool {
    arg.get_action().takes_values()
}

// ── tests ─────────────────────────────────────────────────────────────────────
