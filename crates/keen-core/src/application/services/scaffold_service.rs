//! Scaffold Service - the project creation pipeline.
//!
//! Stages run strictly in order and each must finish before the next starts:
//! 1. Prepare the target directory (create it, require it to be empty)
//! 2. Copy the selected template tree into it
//! 3. Apply the [`ScaffoldPlan`] (placeholder rewrites + agent folder rename)
//! 4. Install dependencies with the package manager
//!
//! Any failure aborts the run. Nothing is rolled back; a partially populated
//! target directory is left as is.

use std::path::{Path, PathBuf};

use tracing::{debug, info, instrument, warn};

use crate::{
    application::{
        ApplicationError,
        ports::{
            Filesystem, PackageInstaller, ScaffoldObserver, Stage, StepOutcome, TemplateCatalog,
        },
    },
    domain::{Invocation, PackageManager, PlanStep, Replacements, ScaffoldPlan, TemplateKind},
    error::{ScaffoldError, ScaffoldResult},
};

/// Everything the pipeline needs to know about one run.
///
/// Built once from the invocation and the working directory captured at
/// startup, then passed down unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScaffoldRequest {
    pub invocation: Invocation,
    pub target_dir: PathBuf,
    pub template: TemplateKind,
    pub package_manager: PackageManager,
    pub skip_install: bool,
}

impl ScaffoldRequest {
    /// Resolve the target directory as `cwd/<project name>` and select the
    /// template and package manager.
    pub fn new(invocation: Invocation, cwd: impl AsRef<Path>) -> Self {
        let target_dir = cwd.as_ref().join(invocation.project_name());
        let template = TemplateKind::select(invocation.project_type());
        Self {
            invocation,
            target_dir,
            template,
            package_manager: PackageManager::detect(),
            skip_install: false,
        }
    }

    pub fn skip_install(mut self, skip: bool) -> Self {
        self.skip_install = skip;
        self
    }

    pub fn project_name(&self) -> &str {
        self.invocation.project_name()
    }
}

/// Summary of a completed run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScaffoldReport {
    pub target_dir: PathBuf,
    pub template: TemplateKind,
    pub files_copied: usize,
    pub steps_applied: usize,
    pub steps_skipped: usize,
    /// `None` when the install stage was skipped.
    pub installed_with: Option<PackageManager>,
}

/// Main scaffolding service.
pub struct ScaffoldService {
    filesystem: Box<dyn Filesystem>,
    catalog: Box<dyn TemplateCatalog>,
    installer: Box<dyn PackageInstaller>,
}

impl ScaffoldService {
    /// Create a new scaffold service with the given adapters.
    pub fn new(
        filesystem: Box<dyn Filesystem>,
        catalog: Box<dyn TemplateCatalog>,
        installer: Box<dyn PackageInstaller>,
    ) -> Self {
        Self {
            filesystem,
            catalog,
            installer,
        }
    }

    /// Run the whole pipeline for `request`.
    #[instrument(
        skip_all,
        fields(
            project = %request.project_name(),
            target = %request.target_dir.display(),
            template = %request.template,
        )
    )]
    pub fn scaffold(
        &self,
        request: &ScaffoldRequest,
        observer: &dyn ScaffoldObserver,
    ) -> ScaffoldResult<ScaffoldReport> {
        let target = request.target_dir.as_path();
        debug!(
            requested_type = %request.invocation.project_type(),
            selected = %request.template,
            "Template selected"
        );

        observer.stage_started(Stage::Prepare);
        self.prepare_target(target)?;
        observer.stage_finished(Stage::Prepare);

        observer.stage_started(Stage::Copy);
        let files_copied = self.copy_template(request.template, target)?;
        observer.stage_finished(Stage::Copy);

        observer.stage_started(Stage::Personalize);
        let plan = ScaffoldPlan::for_project(request.project_name());
        let (steps_applied, steps_skipped) = self.apply_plan(&plan, target, observer)?;
        observer.stage_finished(Stage::Personalize);

        let installed_with = if request.skip_install {
            info!("Dependency install skipped");
            None
        } else {
            observer.stage_started(Stage::Install);
            self.install(request.package_manager, target)?;
            observer.stage_finished(Stage::Install);
            Some(request.package_manager)
        };

        info!(files_copied, steps_applied, steps_skipped, "Project created");

        Ok(ScaffoldReport {
            target_dir: request.target_dir.clone(),
            template: request.template,
            files_copied,
            steps_applied,
            steps_skipped,
            installed_with,
        })
    }

    /// Ensure `dir` exists and has no entries.
    #[instrument(skip(self, dir), fields(dir = %dir.display()))]
    pub fn prepare_target(&self, dir: &Path) -> ScaffoldResult<()> {
        self.filesystem
            .create_dir_all(dir)
            .map_err(|e| target_unavailable(dir, e))?;

        let entries = self
            .filesystem
            .list_dir(dir)
            .map_err(|e| target_unavailable(dir, e))?;

        if !entries.is_empty() {
            debug!(entries = entries.len(), "Target directory has entries");
            return Err(ApplicationError::TargetNotEmpty {
                path: dir.to_path_buf(),
            }
            .into());
        }

        Ok(())
    }

    /// Copy the template for `kind` into `dest`.
    #[instrument(skip(self, dest), fields(dest = %dest.display()))]
    pub fn copy_template(&self, kind: TemplateKind, dest: &Path) -> ScaffoldResult<usize> {
        let source = self.catalog.locate(kind);
        if !self.filesystem.is_dir(&source) {
            return Err(ApplicationError::TemplateMissing { path: source }.into());
        }

        debug!(source = %source.display(), "Copying template");
        let copied = self.filesystem.copy_tree(&source, dest)?;
        info!(files = copied, "Template copied");
        Ok(copied)
    }

    /// Apply every plan step under `root`, in order.
    ///
    /// Returns `(applied, skipped)` step counts.
    pub fn apply_plan(
        &self,
        plan: &ScaffoldPlan,
        root: &Path,
        observer: &dyn ScaffoldObserver,
    ) -> ScaffoldResult<(usize, usize)> {
        let mut applied = 0;
        let mut skipped = 0;

        for step in plan {
            let outcome = match step {
                PlanStep::Rewrite { path, replacements } => {
                    self.rewrite_file(&root.join(path), replacements)?
                }
                PlanStep::RenameDir { parent, from, to } => {
                    self.rename_dir(&root.join(parent), from, to)?
                }
            };

            match outcome {
                StepOutcome::Applied => applied += 1,
                StepOutcome::Skipped => skipped += 1,
            }
            debug!(step = %step.describe(), ?outcome, "Plan step done");
            observer.step_completed(step, outcome);
        }

        Ok((applied, skipped))
    }

    /// Replace placeholders in one file. A missing file is skipped and not
    /// created.
    pub fn rewrite_file(
        &self,
        path: &Path,
        replacements: &Replacements,
    ) -> ScaffoldResult<StepOutcome> {
        if !self.filesystem.exists(path) {
            return Ok(StepOutcome::Skipped);
        }

        let original = self.filesystem.read_to_string(path)?;
        let rewritten = replacements.apply(&original);

        if is_json(path) && breaks_json(&original, &rewritten) {
            warn!(
                path = %path.display(),
                "File is no longer valid JSON after substitution"
            );
        }

        self.filesystem.write_file(path, &rewritten)?;
        Ok(StepOutcome::Applied)
    }

    /// Rename `parent/from` to `parent/to`. A missing source is skipped.
    pub fn rename_dir(&self, parent: &Path, from: &str, to: &str) -> ScaffoldResult<StepOutcome> {
        let source = parent.join(from);
        if !self.filesystem.exists(&source) {
            return Ok(StepOutcome::Skipped);
        }

        self.filesystem.rename(&source, &parent.join(to))?;
        Ok(StepOutcome::Applied)
    }

    /// Run the package manager's install command in `dir`.
    #[instrument(skip(self, dir), fields(dir = %dir.display()))]
    pub fn install(&self, manager: PackageManager, dir: &Path) -> ScaffoldResult<()> {
        info!(program = manager.program(), "Installing dependencies");
        self.installer.install(manager, dir)
    }
}

fn target_unavailable(dir: &Path, err: ScaffoldError) -> ScaffoldError {
    let reason = match err {
        ScaffoldError::Application(ApplicationError::FilesystemError { reason, .. }) => reason,
        other => other.to_string(),
    };
    ApplicationError::TargetUnavailable {
        path: dir.to_path_buf(),
        reason,
    }
    .into()
}

fn is_json(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == "json")
}

fn breaks_json(before: &str, after: &str) -> bool {
    serde_json::from_str::<serde_json::Value>(before).is_ok()
        && serde_json::from_str::<serde_json::Value>(after).is_err()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::{
        MockFilesystem, MockPackageInstaller, MockTemplateCatalog, NoopObserver,
    };
    use crate::domain::Placeholder;
    use std::cell::RefCell;

    fn io_err(path: &str, reason: &str) -> ScaffoldError {
        ApplicationError::FilesystemError {
            path: PathBuf::from(path),
            reason: reason.into(),
        }
        .into()
    }

    fn service(
        fs: MockFilesystem,
        catalog: MockTemplateCatalog,
        installer: MockPackageInstaller,
    ) -> ScaffoldService {
        ScaffoldService::new(Box::new(fs), Box::new(catalog), Box::new(installer))
    }

    fn request(name: &str) -> ScaffoldRequest {
        let invocation = Invocation::from_args(&[name]).unwrap();
        ScaffoldRequest::new(invocation, "/work")
    }

    #[derive(Default)]
    struct RecordingObserver {
        events: RefCell<Vec<String>>,
    }

    impl ScaffoldObserver for RecordingObserver {
        fn stage_started(&self, stage: Stage) {
            self.events.borrow_mut().push(format!("start:{stage}"));
        }

        fn stage_finished(&self, stage: Stage) {
            self.events.borrow_mut().push(format!("end:{stage}"));
        }
    }

    // ── request ──────────────────────────────────────────────────────────

    #[test]
    fn request_resolves_target_under_cwd() {
        let req = request("demo");
        assert_eq!(req.target_dir, PathBuf::from("/work/demo"));
        assert_eq!(req.template, TemplateKind::Vscode);
        assert_eq!(req.package_manager, PackageManager::Npm);
        assert!(!req.skip_install);
    }

    // ── prepare_target ───────────────────────────────────────────────────

    #[test]
    fn non_empty_target_is_rejected() {
        let mut fs = MockFilesystem::new();
        fs.expect_create_dir_all().returning(|_| Ok(()));
        fs.expect_list_dir()
            .returning(|p| Ok(vec![p.join("README.md")]));

        let svc = service(fs, MockTemplateCatalog::new(), MockPackageInstaller::new());
        let err = svc.prepare_target(Path::new("/work/demo")).unwrap_err();
        assert!(matches!(
            err,
            ScaffoldError::Application(ApplicationError::TargetNotEmpty { .. })
        ));
    }

    #[test]
    fn create_failure_is_target_unavailable() {
        let mut fs = MockFilesystem::new();
        fs.expect_create_dir_all()
            .returning(|_| Err(io_err("/work/demo", "permission denied")));

        let svc = service(fs, MockTemplateCatalog::new(), MockPackageInstaller::new());
        let err = svc.prepare_target(Path::new("/work/demo")).unwrap_err();
        match err {
            ScaffoldError::Application(ApplicationError::TargetUnavailable { reason, .. }) => {
                assert_eq!(reason, "permission denied");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn non_empty_target_stops_before_copy() {
        let mut fs = MockFilesystem::new();
        fs.expect_create_dir_all().returning(|_| Ok(()));
        fs.expect_list_dir()
            .returning(|p| Ok(vec![p.join("existing.txt")]));
        fs.expect_copy_tree().times(0);

        let mut installer = MockPackageInstaller::new();
        installer.expect_install().times(0);

        let svc = service(fs, MockTemplateCatalog::new(), installer);
        assert!(svc.scaffold(&request("demo"), &NoopObserver).is_err());
    }

    // ── copy_template ────────────────────────────────────────────────────

    #[test]
    fn missing_template_is_reported() {
        let mut fs = MockFilesystem::new();
        fs.expect_is_dir().returning(|_| false);
        fs.expect_copy_tree().times(0);

        let mut catalog = MockTemplateCatalog::new();
        catalog
            .expect_locate()
            .returning(|kind| PathBuf::from("/opt/templates").join(kind.dir_name()));

        let svc = service(fs, catalog, MockPackageInstaller::new());
        let err = svc
            .copy_template(TemplateKind::Vscode, Path::new("/work/demo"))
            .unwrap_err();
        assert!(matches!(
            err,
            ScaffoldError::Application(ApplicationError::TemplateMissing { ref path })
                if path == Path::new("/opt/templates/vscode")
        ));
    }

    // ── rewrite_file / rename_dir ────────────────────────────────────────

    #[test]
    fn rewrite_skips_missing_file_without_creating_it() {
        let mut fs = MockFilesystem::new();
        fs.expect_exists().returning(|_| false);
        fs.expect_read_to_string().times(0);
        fs.expect_write_file().times(0);

        let svc = service(fs, MockTemplateCatalog::new(), MockPackageInstaller::new());
        let outcome = svc
            .rewrite_file(
                Path::new("/work/demo/keen.json"),
                &Replacements::single(Placeholder::ProjectName, "demo"),
            )
            .unwrap();
        assert_eq!(outcome, StepOutcome::Skipped);
    }

    #[test]
    fn rewrite_writes_substituted_content() {
        let mut fs = MockFilesystem::new();
        fs.expect_exists().returning(|_| true);
        fs.expect_read_to_string()
            .returning(|_| Ok(r#"{"name":"__PROJECT_NAME_REPLACE__"}"#.into()));
        fs.expect_write_file()
            .withf(|path, content| {
                path == Path::new("/work/demo/keen.json") && content == r#"{"name":"demo"}"#
            })
            .times(1)
            .returning(|_, _| Ok(()));

        let svc = service(fs, MockTemplateCatalog::new(), MockPackageInstaller::new());
        let outcome = svc
            .rewrite_file(
                Path::new("/work/demo/keen.json"),
                &Replacements::single(Placeholder::ProjectName, "demo"),
            )
            .unwrap();
        assert_eq!(outcome, StepOutcome::Applied);
    }

    #[test]
    fn rename_skips_missing_agent_dir() {
        let mut fs = MockFilesystem::new();
        fs.expect_exists().returning(|_| false);
        fs.expect_rename().times(0);

        let svc = service(fs, MockTemplateCatalog::new(), MockPackageInstaller::new());
        let outcome = svc
            .rename_dir(Path::new("/work/demo/src/agents"), "Agent-x", "Agent-y")
            .unwrap();
        assert_eq!(outcome, StepOutcome::Skipped);
    }

    #[test]
    fn rename_stays_in_parent() {
        let mut fs = MockFilesystem::new();
        fs.expect_exists().returning(|_| true);
        fs.expect_rename()
            .withf(|from, to| {
                from == Path::new("/r/src/agents/Agent-__PROJECT_NAME_REPLACE__")
                    && to == Path::new("/r/src/agents/Agent-demo")
            })
            .times(1)
            .returning(|_, _| Ok(()));

        let svc = service(fs, MockTemplateCatalog::new(), MockPackageInstaller::new());
        svc.rename_dir(
            Path::new("/r/src/agents"),
            "Agent-__PROJECT_NAME_REPLACE__",
            "Agent-demo",
        )
        .unwrap();
    }

    // ── scaffold ─────────────────────────────────────────────────────────

    fn empty_template_fs() -> MockFilesystem {
        let mut fs = MockFilesystem::new();
        fs.expect_create_dir_all().returning(|_| Ok(()));
        fs.expect_list_dir().returning(|_| Ok(vec![]));
        fs.expect_is_dir().returning(|_| true);
        fs.expect_copy_tree().returning(|_, _| Ok(4));
        fs.expect_exists().returning(|_| false);
        fs
    }

    fn catalog() -> MockTemplateCatalog {
        let mut catalog = MockTemplateCatalog::new();
        catalog
            .expect_locate()
            .returning(|kind| PathBuf::from("/tpl").join(kind.dir_name()));
        catalog
    }

    #[test]
    fn install_runs_in_target_dir() {
        let mut installer = MockPackageInstaller::new();
        installer
            .expect_install()
            .withf(|pm, dir| *pm == PackageManager::Npm && dir == Path::new("/work/demo"))
            .times(1)
            .returning(|_, _| Ok(()));

        let svc = service(empty_template_fs(), catalog(), installer);
        let report = svc.scaffold(&request("demo"), &NoopObserver).unwrap();

        assert_eq!(report.files_copied, 4);
        assert_eq!(report.steps_applied, 0);
        assert_eq!(report.steps_skipped, 7);
        assert_eq!(report.installed_with, Some(PackageManager::Npm));
    }

    #[test]
    fn install_failure_fails_the_run() {
        let mut installer = MockPackageInstaller::new();
        installer.expect_install().returning(|pm, _| {
            Err(ApplicationError::InstallFailed {
                program: pm.program().into(),
                code: Some(1),
            }
            .into())
        });

        let svc = service(empty_template_fs(), catalog(), installer);
        let err = svc.scaffold(&request("demo"), &NoopObserver).unwrap_err();
        assert_eq!(err.to_string(), "npm install failed");
    }

    #[test]
    fn skip_install_never_calls_installer() {
        let mut installer = MockPackageInstaller::new();
        installer.expect_install().times(0);

        let svc = service(empty_template_fs(), catalog(), installer);
        let report = svc
            .scaffold(&request("demo").skip_install(true), &NoopObserver)
            .unwrap();
        assert_eq!(report.installed_with, None);
    }

    #[test]
    fn stages_are_reported_in_order() {
        let mut installer = MockPackageInstaller::new();
        installer.expect_install().returning(|_, _| Ok(()));

        let observer = RecordingObserver::default();
        let svc = service(empty_template_fs(), catalog(), installer);
        svc.scaffold(&request("demo"), &observer).unwrap();

        assert_eq!(
            observer.events.into_inner(),
            vec![
                "start:prepare",
                "end:prepare",
                "start:copy",
                "end:copy",
                "start:personalize",
                "end:personalize",
                "start:install",
                "end:install",
            ]
        );
    }

    #[test]
    fn breaking_json_is_detected() {
        assert!(breaks_json(r#"{"n":"x"}"#, r#"{"n":"a"b"}"#));
        assert!(!breaks_json("// comment\n{}", "// comment\n{}"));
    }
}
