//! Project creation, the tool's only command.
//!
//! Responsibility: resolve the working directory, template root and install
//! preference, wire the adapters into the core scaffold service, and render
//! progress. No business logic lives here.

use std::cell::RefCell;

use indicatif::ProgressBar;
use tracing::{debug, info, instrument};

use keen_adapters::{BundledTemplates, LocalFilesystem, ProcessInstaller};
use keen_core::{
    application::{
        ScaffoldObserver, ScaffoldReport, ScaffoldRequest, ScaffoldService, Stage, StepOutcome,
    },
    domain::{Invocation, PackageManager, PlanStep},
};

use crate::{
    cli::CreateArgs,
    config::AppConfig,
    error::{CliResult, IntoCli},
    output::OutputManager,
};

/// Execute project creation for an already validated invocation.
///
/// Sequence:
/// 1. Capture the current directory once; the target is `<cwd>/<name>`
/// 2. Resolve the template root (`--templates-dir`, config, bundled)
/// 3. Run the scaffold service with a terminal observer
/// 4. Print the completion message and next steps
#[instrument(skip_all, fields(project = %invocation.project_name()))]
pub fn execute(
    args: CreateArgs,
    invocation: Invocation,
    config: &AppConfig,
    output: &OutputManager,
) -> CliResult<()> {
    let cwd = std::env::current_dir().with_cli_context(|| "reading the current directory")?;

    let skip_install = args.skip_install || config.install.skip;
    let templates_root = args
        .templates_dir
        .as_deref()
        .or(config.templates.root.as_deref());

    let request = ScaffoldRequest::new(invocation, &cwd).skip_install(skip_install);
    debug!(
        target_dir = %request.target_dir.display(),
        skip_install,
        "Request resolved"
    );

    let service = ScaffoldService::new(
        Box::new(LocalFilesystem::new()),
        Box::new(BundledTemplates::discover(templates_root)),
        Box::new(ProcessInstaller::new()),
    );

    output.step(&format!("Creating project: {}", request.project_name()))?;

    let report = {
        let observer = TerminalObserver::new(output, request.package_manager);
        service.scaffold(&request, &observer)?
    };
    info!(target_dir = %report.target_dir.display(), "Project ready");

    print_next_steps(&request, &report, output)?;
    Ok(())
}

fn print_next_steps(
    request: &ScaffoldRequest,
    report: &ScaffoldReport,
    output: &OutputManager,
) -> CliResult<()> {
    output.print("")?;
    output.success("Done!")?;

    if report.installed_with.is_none() {
        output.warning(&format!(
            "Dependencies were not installed; run `{} install` inside the project",
            request.package_manager.program()
        ))?;
    }

    output.print("Next steps:")?;
    output.print(&format!("  cd {}", request.project_name()))?;
    output.print(&format!("  {}", request.package_manager.dev_command()))?;
    Ok(())
}

// ── Progress rendering ────────────────────────────────────────────────────────

/// Turns pipeline stage events into `> ...` progress lines, with a spinner
/// while the template is copied.
struct TerminalObserver<'a> {
    output: &'a OutputManager,
    package_manager: PackageManager,
    spinner: RefCell<Option<ProgressBar>>,
}

impl<'a> TerminalObserver<'a> {
    fn new(output: &'a OutputManager, package_manager: PackageManager) -> Self {
        Self {
            output,
            package_manager,
            spinner: RefCell::new(None),
        }
    }

    fn clear_spinner(&self) {
        if let Some(spinner) = self.spinner.borrow_mut().take() {
            spinner.finish_and_clear();
        }
    }

    /// Progress output is best effort; a closed stdout must not abort the
    /// scaffold halfway through.
    fn emit(&self, result: std::io::Result<()>) {
        if let Err(e) = result {
            debug!(error = %e, "Progress output failed");
        }
    }
}

impl ScaffoldObserver for TerminalObserver<'_> {
    fn stage_started(&self, stage: Stage) {
        match stage {
            Stage::Copy => {
                self.emit(self.output.step("Copying template…"));
                *self.spinner.borrow_mut() = self.output.spinner("copying files");
            }
            Stage::Install => self.emit(self.output.step(&format!(
                "Installing dependencies with {}…",
                self.package_manager
            ))),
            Stage::Prepare | Stage::Personalize => {}
        }
    }

    fn stage_finished(&self, stage: Stage) {
        if stage == Stage::Copy {
            self.clear_spinner();
        }
    }

    fn step_completed(&self, step: &PlanStep, outcome: StepOutcome) {
        let line = match outcome {
            StepOutcome::Applied => step.describe(),
            StepOutcome::Skipped => format!("{} (not in template, skipped)", step.describe()),
        };
        self.emit(self.output.detail(&line));
    }
}

impl Drop for TerminalObserver<'_> {
    fn drop(&mut self) {
        self.clear_spinner();
    }
}
