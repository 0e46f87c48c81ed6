use crate::artifacts::index::entry_mode::FileMode;
use crate::errors::{KitError, Result};
use bytes::Bytes;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Directory names never treated as worktree content
pub const IGNORED_PATHS: [&str; 2] = [".kit", ".git"];

#[derive(Debug)]
pub struct Workspace {
    path: Box<Path>,
}

impl Workspace {
    pub fn new(path: Box<Path>) -> Self {
        Workspace { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Immediate children of a worktree directory, relative to the worktree root
    ///
    /// Children are returned sorted by name so that snapshots of identical
    /// directories enumerate identically on every filesystem.
    pub fn list_dir(&self, dir_path: &Path) -> Result<Vec<PathBuf>> {
        let absolute_path = self.path.join(dir_path);

        let mut children = std::fs::read_dir(&absolute_path)
            .map_err(|e| KitError::io(&absolute_path, e))?
            .map(|entry| entry.map_err(|e| KitError::io(&absolute_path, e)))
            .collect::<Result<Vec<_>>>()?
            .into_iter()
            .filter(|entry| !Self::is_ignored(Path::new(&entry.file_name())))
            .map(|entry| dir_path.join(entry.file_name()))
            .collect::<Vec<_>>();
        children.sort();

        Ok(children)
    }

    /// Whether a path holds a line break, which the line-based index and
    /// tree formats cannot record
    pub fn has_line_break(path: &Path) -> bool {
        path.as_os_str()
            .as_encoded_bytes()
            .iter()
            .any(|byte| matches!(byte, b'\n' | b'\r'))
    }

    /// Every regular file under the worktree root, relative to it, sorted by path
    pub fn list_files(&self) -> Result<Vec<PathBuf>> {
        WalkDir::new(&self.path)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| entry.depth() == 0 || !Self::is_ignored(entry.path()))
            .filter_map(|entry| match entry {
                Ok(entry) if entry.file_type().is_file() => Some(Ok(entry.into_path())),
                Ok(_) => None,
                Err(e) => Some(Err(KitError::io(
                    e.path().unwrap_or(self.path()).to_path_buf(),
                    e.into(),
                ))),
            })
            .map(|path| path.map(|path| self.relative_path(&path)))
            .collect()
    }

    /// Resolve a user-supplied path (relative to the current directory) to a
    /// worktree-relative one
    pub fn resolve(&self, path: &Path) -> Result<PathBuf> {
        let absolute_path = std::fs::canonicalize(path).map_err(|e| KitError::io(path, e))?;

        absolute_path
            .strip_prefix(&self.path)
            .map(Path::to_path_buf)
            .map_err(|_| {
                KitError::io(
                    path,
                    std::io::Error::new(
                        std::io::ErrorKind::InvalidInput,
                        "path is outside the repository",
                    ),
                )
            })
    }

    fn relative_path(&self, path: &Path) -> PathBuf {
        path.strip_prefix(&self.path)
            .map(Path::to_path_buf)
            .unwrap_or_else(|_| path.to_path_buf())
    }

    fn is_ignored(path: &Path) -> bool {
        path.file_name()
            .map(|name| IGNORED_PATHS.iter().any(|ignored| name == OsStr::new(ignored)))
            .unwrap_or(false)
    }

    pub fn is_dir(&self, path: &Path) -> bool {
        self.path.join(path).is_dir()
    }

    pub fn read_file(&self, file_path: &Path) -> Result<Bytes> {
        let file_path = self.path.join(file_path);

        std::fs::read(&file_path)
            .map(Bytes::from)
            .map_err(|e| KitError::io(&file_path, e))
    }

    pub fn file_mode(&self, file_path: &Path) -> FileMode {
        FileMode::of_file(&self.path.join(file_path))
    }

    pub fn make_directory(&self, dir_path: &Path) -> Result<()> {
        let dir_path = self.path.join(dir_path);

        std::fs::create_dir_all(&dir_path).map_err(|e| KitError::io(&dir_path, e))
    }

    /// Write a file, creating missing parent directories and replacing any existing file
    pub fn write_file(&self, file_path: &Path, data: &[u8], mode: &FileMode) -> Result<()> {
        if let Some(parent) = file_path.parent() {
            self.make_directory(parent)?;
        }

        let path = self.path.join(file_path);
        std::fs::write(&path, data).map_err(|e| KitError::io(&path, e))?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let permissions = std::fs::Permissions::from_mode(mode.as_u32() & 0o777);
            std::fs::set_permissions(&path, permissions).map_err(|e| KitError::io(&path, e))?;
        }
        #[cfg(not(unix))]
        let _ = mode;

        Ok(())
    }
}
