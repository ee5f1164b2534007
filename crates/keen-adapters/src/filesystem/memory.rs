//! In-memory filesystem adapter for testing.

use std::{
    collections::{BTreeMap, BTreeSet},
    path::{Path, PathBuf},
    sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard},
};

use keen_core::{
    application::{ApplicationError, ports::Filesystem},
    error::{ScaffoldError, ScaffoldResult},
};

/// In-memory filesystem for testing.
///
/// Clones share the same contents, so a test can hand one clone to the
/// service and inspect the other afterwards.
#[derive(Debug, Clone, Default)]
pub struct MemoryFilesystem {
    inner: Arc<RwLock<MemoryFilesystemInner>>,
}

#[derive(Debug, Default)]
struct MemoryFilesystemInner {
    files: BTreeMap<PathBuf, Vec<u8>>,
    directories: BTreeSet<PathBuf>,
}

impl MemoryFilesystemInner {
    fn add_dir_all(&mut self, path: &Path) {
        let mut current = PathBuf::new();
        for component in path.components() {
            current.push(component);
            self.directories.insert(current.clone());
        }
    }
}

impl MemoryFilesystem {
    /// Create a new empty memory filesystem.
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a file, creating its parent directories (testing helper).
    pub fn add_file(&self, path: impl AsRef<Path>, content: impl Into<Vec<u8>>) {
        let path = path.as_ref();
        let mut inner = self.write_inner();
        if let Some(parent) = path.parent() {
            inner.add_dir_all(parent);
        }
        inner.files.insert(path.to_path_buf(), content.into());
    }

    /// Seed an empty directory (testing helper).
    pub fn add_dir(&self, path: impl AsRef<Path>) {
        self.write_inner().add_dir_all(path.as_ref());
    }

    /// Read a file's content as text (testing helper).
    pub fn read_file(&self, path: impl AsRef<Path>) -> Option<String> {
        let inner = self.read_inner();
        let bytes = inner.files.get(path.as_ref())?;
        String::from_utf8(bytes.clone()).ok()
    }

    /// Files below `root`, as paths relative to it, sorted.
    pub fn files_under(&self, root: impl AsRef<Path>) -> Vec<PathBuf> {
        let root = root.as_ref();
        self.read_inner()
            .files
            .keys()
            .filter_map(|p| p.strip_prefix(root).ok().map(Path::to_path_buf))
            .collect()
    }

    // A panic while holding the lock only happens inside a failing test, so
    // the poisoned data is still the best view of the filesystem.
    fn read_inner(&self) -> RwLockReadGuard<'_, MemoryFilesystemInner> {
        self.inner.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write_inner(&self) -> RwLockWriteGuard<'_, MemoryFilesystemInner> {
        self.inner.write().unwrap_or_else(|e| e.into_inner())
    }
}

impl Filesystem for MemoryFilesystem {
    fn create_dir_all(&self, path: &Path) -> ScaffoldResult<()> {
        let mut inner = self.write_inner();
        if inner.files.contains_key(path) {
            return Err(fs_error(path, "a file exists at this path"));
        }
        inner.add_dir_all(path);
        Ok(())
    }

    fn list_dir(&self, path: &Path) -> ScaffoldResult<Vec<PathBuf>> {
        let inner = self.read_inner();
        if !inner.directories.contains(path) {
            return Err(fs_error(path, "no such directory"));
        }

        let children = inner
            .directories
            .iter()
            .chain(inner.files.keys())
            .filter(|p| p.parent() == Some(path))
            .cloned()
            .collect();
        Ok(children)
    }

    fn copy_tree(&self, src: &Path, dest: &Path) -> ScaffoldResult<usize> {
        let mut inner = self.write_inner();
        if !inner.directories.contains(src) {
            return Err(fs_error(src, "no such directory"));
        }

        let dirs: Vec<PathBuf> = inner
            .directories
            .iter()
            .filter_map(|p| p.strip_prefix(src).ok())
            .map(|rel| dest.join(rel))
            .collect();
        let files: Vec<(PathBuf, Vec<u8>)> = inner
            .files
            .iter()
            .filter_map(|(p, content)| {
                p.strip_prefix(src)
                    .ok()
                    .map(|rel| (dest.join(rel), content.clone()))
            })
            .collect();

        for dir in dirs {
            inner.add_dir_all(&dir);
        }
        let copied = files.len();
        inner.files.extend(files);
        Ok(copied)
    }

    fn read_to_string(&self, path: &Path) -> ScaffoldResult<String> {
        let inner = self.read_inner();
        let bytes = inner
            .files
            .get(path)
            .ok_or_else(|| fs_error(path, "no such file"))?;
        Ok(String::from_utf8_lossy(bytes).into_owned())
    }

    fn write_file(&self, path: &Path, content: &str) -> ScaffoldResult<()> {
        let mut inner = self.write_inner();

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !inner.directories.contains(parent) {
                return Err(fs_error(path, "parent directory does not exist"));
            }
        }

        inner
            .files
            .insert(path.to_path_buf(), content.as_bytes().to_vec());
        Ok(())
    }

    fn rename(&self, from: &Path, to: &Path) -> ScaffoldResult<()> {
        let mut inner = self.write_inner();
        if !inner.directories.contains(from) && !inner.files.contains_key(from) {
            return Err(fs_error(from, "no such file or directory"));
        }
        if inner.directories.contains(to) || inner.files.contains_key(to) {
            return Err(fs_error(to, "destination already exists"));
        }

        let moved = |p: &Path| p.strip_prefix(from).ok().map(|rel| to.join(rel));

        let directories = std::mem::take(&mut inner.directories);
        inner.directories = directories
            .into_iter()
            .map(|p| moved(&p).unwrap_or(p))
            .collect();

        let files = std::mem::take(&mut inner.files);
        inner.files = files
            .into_iter()
            .map(|(p, c)| (moved(&p).unwrap_or(p), c))
            .collect();

        Ok(())
    }

    fn exists(&self, path: &Path) -> bool {
        let inner = self.read_inner();
        inner.files.contains_key(path) || inner.directories.contains(path)
    }

    fn is_dir(&self, path: &Path) -> bool {
        self.read_inner().directories.contains(path)
    }
}

fn fs_error(path: &Path, reason: &str) -> ScaffoldError {
    ApplicationError::FilesystemError {
        path: path.to_path_buf(),
        reason: reason.into(),
    }
    .into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn list_dir_of_fresh_directory_is_empty() {
        let fs = MemoryFilesystem::new();
        fs.create_dir_all(Path::new("/work/demo")).unwrap();
        assert!(fs.list_dir(Path::new("/work/demo")).unwrap().is_empty());
    }

    #[test]
    fn list_dir_sees_files_and_directories() {
        let fs = MemoryFilesystem::new();
        fs.add_file("/w/a.txt", "a");
        fs.add_dir("/w/sub");
        fs.add_file("/w/sub/b.txt", "b");

        let entries = fs.list_dir(Path::new("/w")).unwrap();
        assert_eq!(entries.len(), 2);
    }

    #[test]
    fn copy_tree_mirrors_source() {
        let fs = MemoryFilesystem::new();
        fs.add_file("/tpl/package.json", "{}");
        fs.add_file("/tpl/src/flows/Project.flow.json", "[]");
        fs.add_dir("/tpl/empty");

        let copied = fs.copy_tree(Path::new("/tpl"), Path::new("/out")).unwrap();

        assert_eq!(copied, 2);
        assert_eq!(fs.files_under("/out"), fs.files_under("/tpl"));
        assert!(fs.is_dir(Path::new("/out/empty")));
        assert_eq!(fs.read_file("/out/package.json").as_deref(), Some("{}"));
    }

    #[test]
    fn invalid_utf8_is_read_lossily() {
        let fs = MemoryFilesystem::new();
        fs.add_file("/w/keen.json", b"a\xffb".to_vec());
        assert_eq!(
            fs.read_to_string(Path::new("/w/keen.json")).unwrap(),
            "a\u{fffd}b"
        );
    }

    #[test]
    fn rename_moves_children() {
        let fs = MemoryFilesystem::new();
        fs.add_file("/r/Agent-x/settings.json", "{}");

        fs.rename(Path::new("/r/Agent-x"), Path::new("/r/Agent-y"))
            .unwrap();

        assert!(!fs.exists(Path::new("/r/Agent-x")));
        assert!(fs.is_dir(Path::new("/r/Agent-y")));
        assert!(fs.exists(Path::new("/r/Agent-y/settings.json")));
    }

    #[test]
    fn write_requires_parent() {
        let fs = MemoryFilesystem::new();
        assert!(fs.write_file(Path::new("/nope/file.txt"), "x").is_err());
    }
}
