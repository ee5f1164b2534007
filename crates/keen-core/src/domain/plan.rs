//! The personalization steps applied to a freshly copied template.
//!
//! All paths are relative to the target directory. Steps run strictly in
//! order; the agent directory rename comes before the rewrite of the settings
//! file that lives inside it, and that rewrite already uses the renamed path.

use std::path::{Path, PathBuf};

use crate::domain::placeholder::{Placeholder, Replacements};

/// Directory holding the agent folders, relative to the target root.
pub const AGENTS_DIR: &str = "src/agents";

/// Prefix of the agent folder name.
pub const AGENT_PREFIX: &str = "Agent-";

/// One personalization step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlanStep {
    /// Replace every occurrence of the placeholder in a file. A missing file
    /// is skipped.
    Rewrite {
        path: PathBuf,
        replacements: Replacements,
    },
    /// Rename `parent/from` to `parent/to`. A missing source is skipped.
    RenameDir {
        parent: PathBuf,
        from: String,
        to: String,
    },
}

impl PlanStep {
    fn rewrite(path: impl Into<PathBuf>, placeholder: Placeholder, name: &str) -> Self {
        Self::Rewrite {
            path: path.into(),
            replacements: Replacements::single(placeholder, name),
        }
    }

    /// Short description for logs and progress output.
    pub fn describe(&self) -> String {
        match self {
            Self::Rewrite { path, .. } => format!("rewrite {}", path.display()),
            Self::RenameDir { parent, from, to } => format!(
                "rename {} -> {}",
                parent.join(from).display(),
                parent.join(to).display()
            ),
        }
    }
}

/// Ordered list of [`PlanStep`]s for one project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScaffoldPlan {
    steps: Vec<PlanStep>,
}

impl ScaffoldPlan {
    /// The fixed plan for the bundled template, personalized with
    /// `project_name`.
    pub fn for_project(project_name: &str) -> Self {
        let agent_from = agent_dir_name(Placeholder::ProjectName.token());
        let agent_to = agent_dir_name(project_name);
        let agents = PathBuf::from(AGENTS_DIR);

        let steps = vec![
            PlanStep::rewrite("package.json", Placeholder::AppName, project_name),
            PlanStep::rewrite(
                Path::new(".vscode").join("launch.json"),
                Placeholder::ProjectName,
                project_name,
            ),
            PlanStep::rewrite("keen.json", Placeholder::ProjectName, project_name),
            PlanStep::RenameDir {
                parent: agents.clone(),
                from: agent_from,
                to: agent_to.clone(),
            },
            PlanStep::rewrite(
                agents.join(&agent_to).join("settings.json"),
                Placeholder::ProjectName,
                project_name,
            ),
            PlanStep::rewrite(
                Path::new("src")
                    .join("flows")
                    .join("Project")
                    .join("instructions.json"),
                Placeholder::ProjectName,
                project_name,
            ),
            PlanStep::rewrite(
                Path::new("src").join("flows").join("Project.flow.json"),
                Placeholder::ProjectName,
                project_name,
            ),
        ];

        Self { steps }
    }

    pub fn steps(&self) -> &[PlanStep] {
        &self.steps
    }

    /// Paths touched by rewrite steps, in order.
    pub fn rewrite_paths(&self) -> impl Iterator<Item = &Path> {
        self.steps.iter().filter_map(|step| match step {
            PlanStep::Rewrite { path, .. } => Some(path.as_path()),
            PlanStep::RenameDir { .. } => None,
        })
    }
}

impl<'a> IntoIterator for &'a ScaffoldPlan {
    type Item = &'a PlanStep;
    type IntoIter = std::slice::Iter<'a, PlanStep>;

    fn into_iter(self) -> Self::IntoIter {
        self.steps.iter()
    }
}

/// `Agent-<name>`, derived by substituting into the template folder name.
pub fn agent_dir_name(project_name: &str) -> String {
    Replacements::single(Placeholder::ProjectName, project_name)
        .apply(&format!("{AGENT_PREFIX}{}", Placeholder::ProjectName.token()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plan_has_six_rewrites_and_one_rename() {
        let plan = ScaffoldPlan::for_project("demo");
        assert_eq!(plan.steps().len(), 7);
        assert_eq!(plan.rewrite_paths().count(), 6);
    }

    #[test]
    fn package_json_uses_app_name_token() {
        let plan = ScaffoldPlan::for_project("demo");
        match &plan.steps()[0] {
            PlanStep::Rewrite { path, replacements } => {
                assert_eq!(path, Path::new("package.json"));
                assert_eq!(
                    replacements.iter().collect::<Vec<_>>(),
                    vec![(Placeholder::AppName, "demo")]
                );
            }
            other => panic!("unexpected first step: {other:?}"),
        }
    }

    #[test]
    fn rename_precedes_agent_settings_rewrite() {
        let plan = ScaffoldPlan::for_project("demo");
        let rename_at = plan
            .steps()
            .iter()
            .position(|s| matches!(s, PlanStep::RenameDir { .. }))
            .unwrap();
        let settings_at = plan
            .steps()
            .iter()
            .position(|s| matches!(s, PlanStep::Rewrite { path, .. } if path.ends_with("settings.json")))
            .unwrap();
        assert!(rename_at < settings_at);
    }

    #[test]
    fn agent_settings_path_uses_renamed_folder() {
        let plan = ScaffoldPlan::for_project("demo");
        let expected = Path::new("src/agents/Agent-demo/settings.json");
        assert!(plan.rewrite_paths().any(|p| p == expected));
    }

    #[test]
    fn rename_step_names() {
        let plan = ScaffoldPlan::for_project("demo");
        let rename = plan
            .steps()
            .iter()
            .find(|s| matches!(s, PlanStep::RenameDir { .. }))
            .unwrap();
        assert_eq!(
            rename,
            &PlanStep::RenameDir {
                parent: PathBuf::from("src/agents"),
                from: "Agent-__PROJECT_NAME_REPLACE__".into(),
                to: "Agent-demo".into(),
            }
        );
    }

    #[test]
    fn agent_dir_name_embeds_project() {
        assert_eq!(agent_dir_name("my-app"), "Agent-my-app");
    }
}
