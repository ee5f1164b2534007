//! Package manager used to install the generated project's dependencies.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PackageManager {
    #[default]
    Npm,
}

impl PackageManager {
    /// The package manager to use. Always npm; no probing for alternatives.
    pub fn detect() -> Self {
        Self::default()
    }

    /// Executable name looked up on `PATH`.
    pub const fn program(self) -> &'static str {
        match self {
            Self::Npm => "npm",
        }
    }

    pub const fn install_args(self) -> &'static [&'static str] {
        match self {
            Self::Npm => &["install"],
        }
    }

    /// Command suggested to start the generated project.
    pub fn dev_command(self) -> String {
        format!("{} run dev", self.program())
    }
}

impl fmt::Display for PackageManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.program())
    }
}
