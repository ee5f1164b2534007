//! Dependency installer adapters.

mod process;

pub use process::{ProcessInstaller, install_command};
