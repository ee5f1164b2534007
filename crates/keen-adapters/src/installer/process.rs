//! Package install as a child process.

use std::path::Path;
use std::process::{Command, Stdio};

use tracing::{debug, instrument};

use keen_core::{
    application::{ApplicationError, ports::PackageInstaller},
    domain::PackageManager,
    error::ScaffoldResult,
};

/// Runs `<pm> install` in the project directory with the terminal's stdio.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessInstaller;

impl ProcessInstaller {
    pub fn new() -> Self {
        Self
    }
}

impl PackageInstaller for ProcessInstaller {
    #[instrument(skip(self, dir), fields(program = manager.program(), dir = %dir.display()))]
    fn install(&self, manager: PackageManager, dir: &Path) -> ScaffoldResult<()> {
        let mut cmd = install_command(manager, dir);
        debug!(command = ?cmd, "Spawning installer");

        let status = cmd
            .status()
            .map_err(|e| ApplicationError::InstallSpawnFailed {
                program: manager.program().into(),
                reason: e.to_string(),
            })?;

        if status.success() {
            Ok(())
        } else {
            Err(ApplicationError::InstallFailed {
                program: manager.program().into(),
                code: status.code(),
            }
            .into())
        }
    }
}

/// Build the install command for `manager`, running in `dir`.
///
/// On Windows the package manager is a `.cmd` shim, so it goes through
/// `cmd /C`; elsewhere it is spawned directly.
pub fn install_command(manager: PackageManager, dir: &Path) -> Command {
    let mut cmd = if cfg!(windows) {
        let mut c = Command::new("cmd");
        c.arg("/C").arg(manager.program());
        c
    } else {
        Command::new(manager.program())
    };

    cmd.args(manager.install_args())
        .current_dir(dir)
        .stdin(Stdio::inherit())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit());
    cmd
}
