//! # keen-project-create
//!
//! Creates a new Keen project from the bundled template.
//!
//! ## Startup sequence
//!
//! 1. Parse CLI arguments; clap prints `--help` / `--version` itself and the
//!    remaining tokens are kept for the project scan.
//! 2. Initialise the tracing subscriber (logging).
//! 3. Reject a missing project name before anything touches the disk.
//! 4. Load configuration (file + env + defaults).
//! 5. Build the [`OutputManager`].
//! 6. Run project creation.
//! 7. Translate any [`CliError`] into a user-facing message.
//!
//! ## Exit codes
//!
//! | Code | Meaning                            |
//! |------|------------------------------------|
//! |  0   | Success, `--help`, `--version`     |
//! |  1   | Any failure, including bad usage   |

use std::process::ExitCode;

use tracing::{debug, info};

use crate::{
    cli::Cli,
    config::AppConfig,
    error::{CliError, CliResult},
    logging::init_logging,
    output::OutputManager,
};

mod cli;
mod commands;
mod config;
mod error;
mod logging;
mod output;

fn main() -> ExitCode {
    // A missing .env is normal.
    let _ = dotenvy::dotenv();

    // ── 1. Parse arguments ────────────────────────────────────────────────
    let cli = match Cli::try_parse_split(std::env::args_os()) {
        Ok(cli) => cli,
        Err(e) => {
            // clap routes help/version to stdout and real errors to stderr.
            let _ = e.print();
            return if e.use_stderr() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    // ── 2. Initialise tracing ─────────────────────────────────────────────
    if let Err(e) = init_logging(&cli.global) {
        eprintln!("Failed to initialise logging: {e}");
        return ExitCode::FAILURE;
    }

    debug!(
        verbose = cli.global.verbose,
        quiet = cli.global.quiet,
        no_color = cli.global.no_color,
        "CLI started"
    );

    let verbose = cli.global.verbose > 0;
    match run(cli) {
        Ok(()) => {
            info!("keen-project-create completed successfully");
            ExitCode::SUCCESS
        }
        Err(e) => handle_error(e, verbose),
    }
}

fn run(cli: Cli) -> CliResult<()> {
    // ── 3. Usage check ────────────────────────────────────────────────────
    let invocation = cli.project.invocation().map_err(|e| CliError::Core(e.into()))?;
    debug!(%invocation, "Invocation parsed");

    // ── 4. Configuration ──────────────────────────────────────────────────
    let config = AppConfig::load(cli.global.config.as_deref())?;

    // ── 5. Output ─────────────────────────────────────────────────────────
    let output = OutputManager::new(&cli.global, &config);

    // ── 6. Create ─────────────────────────────────────────────────────────
    commands::create::execute(cli.project, invocation, &config, &output)
}

/// Print `err` to stderr and pick the exit code.
fn handle_error(err: CliError, verbose: bool) -> ExitCode {
    err.log();

    let msg = if std::io::IsTerminal::is_terminal(&std::io::stderr()) {
        err.format_colored(verbose)
    } else {
        err.format_plain(verbose)
    };
    eprint!("{msg}");

    ExitCode::from(err.exit_code())
}

// ── tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_version_matches_cargo() {
        let cmd = Cli::command();
        assert_eq!(cmd.get_version(), Some(env!("CARGO_PKG_VERSION")));
    }

    #[test]
    fn cli_has_author() {
        assert!(Cli::command().get_author().is_some());
    }

    #[test]
    fn missing_name_fails_before_config_is_read() {
        let cli = Cli::try_parse_split([
            "keen-project-create",
            "--config",
            "/definitely/not/here.toml",
        ])
        .unwrap();

        let err = run(cli).unwrap_err();
        assert_eq!(err.to_string(), "Missing project name");
    }
}
