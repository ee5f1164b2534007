//! Location of the template trees shipped with the tool.
//!
//! # Directory layout expected
//!
//! ```text
//! templates/
//! ├── default/
//! │   ├── package.json
//! │   ├── keen.json
//! │   └── src/...
//! └── vscode/
//!     ├── .vscode/launch.json
//!     ├── package.json
//!     └── src/agents/Agent-__PROJECT_NAME_REPLACE__/settings.json
//! ```
//!
//! # Search order
//!
//! 1. An explicit root (`--templates-dir` or config `templates.root`)
//! 2. `<exe dir>/templates`
//! 3. `<exe dir>/../templates`
//! 4. `<exe dir>/../share/keen-project-create/templates`
//! 5. The workspace `templates/` directory recorded at compile time

use std::path::{Path, PathBuf};

use tracing::debug;

use keen_core::{application::ports::TemplateCatalog, domain::TemplateKind};

/// Template root baked in at build time.
const COMPILED_ROOT: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/../../templates");

/// Catalog backed by a directory holding one subdirectory per [`TemplateKind`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BundledTemplates {
    root: PathBuf,
}

impl BundledTemplates {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Find the template root.
    ///
    /// An explicit root is used as given, even if it does not exist, so a typo
    /// is reported instead of silently falling back.
    pub fn discover(explicit: Option<&Path>) -> Self {
        if let Some(root) = explicit {
            debug!(root = %root.display(), "Using explicit template root");
            return Self::new(root);
        }

        let root = Self::search_paths()
            .into_iter()
            .find(|candidate| candidate.is_dir())
            .unwrap_or_else(Self::compiled_root);

        debug!(root = %root.display(), "Template root discovered");
        Self::new(root)
    }

    /// Candidate roots in search order, excluding an explicit override.
    pub fn search_paths() -> Vec<PathBuf> {
        let mut paths = Vec::new();

        if let Some(exe_dir) = std::env::current_exe()
            .ok()
            .and_then(|exe| exe.parent().map(Path::to_path_buf))
        {
            paths.push(exe_dir.join("templates"));
            paths.push(exe_dir.join("..").join("templates"));
            paths.push(
                exe_dir
                    .join("..")
                    .join("share")
                    .join("keen-project-create")
                    .join("templates"),
            );
        }

        paths.push(Self::compiled_root());
        paths
    }

    pub fn compiled_root() -> PathBuf {
        PathBuf::from(COMPILED_ROOT)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl TemplateCatalog for BundledTemplates {
    fn locate(&self, kind: TemplateKind) -> PathBuf {
        self.root.join(kind.dir_name())
    }
}
