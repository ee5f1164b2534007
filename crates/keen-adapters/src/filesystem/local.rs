//! Local filesystem adapter using std::fs.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::trace;
use walkdir::WalkDir;

use keen_core::{
    application::{ApplicationError, ports::Filesystem},
    error::{ScaffoldError, ScaffoldResult},
};

/// Production filesystem implementation using `std::fs`.
#[derive(Debug, Clone, Copy)]
pub struct LocalFilesystem;

impl LocalFilesystem {
    /// Create a new local filesystem adapter.
    pub fn new() -> Self {
        Self
    }
}

impl Default for LocalFilesystem {
    fn default() -> Self {
        Self::new()
    }
}

impl Filesystem for LocalFilesystem {
    fn create_dir_all(&self, path: &Path) -> ScaffoldResult<()> {
        fs::create_dir_all(path).map_err(|e| map_io_error(path, e, "create directory"))
    }

    fn list_dir(&self, path: &Path) -> ScaffoldResult<Vec<PathBuf>> {
        let entries = fs::read_dir(path).map_err(|e| map_io_error(path, e, "read directory"))?;

        entries
            .map(|entry| {
                entry
                    .map(|e| e.path())
                    .map_err(|e| map_io_error(path, e, "read directory entry"))
            })
            .collect()
    }

    fn copy_tree(&self, src: &Path, dest: &Path) -> ScaffoldResult<usize> {
        fs::create_dir_all(dest).map_err(|e| map_io_error(dest, e, "create directory"))?;

        let mut copied = 0;
        for entry in WalkDir::new(src).min_depth(1) {
            let entry = entry.map_err(|e| {
                let path = e.path().unwrap_or(src).to_path_buf();
                ScaffoldError::from(ApplicationError::FilesystemError {
                    path,
                    reason: format!("Failed to walk template: {e}"),
                })
            })?;

            // WalkDir only yields paths below `src`.
            let relative = entry.path().strip_prefix(src).unwrap_or(entry.path());
            let target = dest.join(relative);

            if entry.file_type().is_dir() {
                fs::create_dir_all(&target)
                    .map_err(|e| map_io_error(&target, e, "create directory"))?;
            } else {
                if let Some(parent) = target.parent() {
                    fs::create_dir_all(parent)
                        .map_err(|e| map_io_error(parent, e, "create directory"))?;
                }
                fs::copy(entry.path(), &target)
                    .map_err(|e| map_io_error(entry.path(), e, "copy file"))?;
                trace!(file = %relative.display(), "Copied");
                copied += 1;
            }
        }

        Ok(copied)
    }

    fn read_to_string(&self, path: &Path) -> ScaffoldResult<String> {
        let bytes = fs::read(path).map_err(|e| map_io_error(path, e, "read file"))?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }

    fn write_file(&self, path: &Path, content: &str) -> ScaffoldResult<()> {
        fs::write(path, content).map_err(|e| map_io_error(path, e, "write file"))
    }

    fn rename(&self, from: &Path, to: &Path) -> ScaffoldResult<()> {
        fs::rename(from, to).map_err(|e| map_io_error(from, e, "rename"))
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }
}

fn map_io_error(path: &Path, e: io::Error, operation: &str) -> ScaffoldError {
    ApplicationError::FilesystemError {
        path: path.to_path_buf(),
        reason: format!("Failed to {}: {}", operation, e),
    }
    .into()
}
