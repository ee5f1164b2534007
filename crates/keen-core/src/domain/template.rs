//! Bundled template variants.

use std::fmt;

/// The template trees shipped with the tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TemplateKind {
    /// Plain project without editor configuration.
    Default,
    /// Project with a `.vscode/launch.json`.
    Vscode,
}

impl TemplateKind {
    pub const ALL: [TemplateKind; 2] = [TemplateKind::Default, TemplateKind::Vscode];

    /// Pick the template for a requested project type.
    ///
    /// Every project currently gets the `vscode` template; the requested type
    /// is accepted but does not influence the choice.
    pub fn select(_project_type: &str) -> Self {
        Self::Vscode
    }

    /// Directory name under the template root.
    pub const fn dir_name(self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Vscode => "vscode",
        }
    }
}

impl fmt::Display for TemplateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.dir_name())
    }
}
