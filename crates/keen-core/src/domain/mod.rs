//! Domain layer: pure values describing what a new project looks like.
//!
//! Nothing in here touches the filesystem or spawns processes.

pub mod error;
pub mod invocation;
pub mod package_manager;
pub mod placeholder;
pub mod plan;
pub mod template;

pub use error::DomainError;
pub use invocation::Invocation;
pub use package_manager::PackageManager;
pub use placeholder::{Placeholder, Replacements};
pub use plan::{AGENT_PREFIX, AGENTS_DIR, PlanStep, ScaffoldPlan, agent_dir_name};
pub use template::TemplateKind;
