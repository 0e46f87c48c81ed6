use crate::areas::repository::Repository;
use crate::areas::workspace::{IGNORED_PATHS, Workspace};
use crate::artifacts::index::index_entry::IndexEntry;
use crate::artifacts::objects::blob::Blob;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};

impl Repository {
    pub async fn add(&mut self, paths: &[String]) -> anyhow::Result<()> {
        self.ensure_initialized()?;

        let index = self.index();
        let mut index = index.lock().await;

        // Load the index file from the disk
        index.rehydrate()?;

        // Resolve every path up front so a missing one fails before anything is staged
        let paths = self.expand_paths(paths)?;

        for path in paths {
            if Workspace::has_line_break(&path) {
                tracing::warn!(path = ?path, "skipping path with a line break");
                continue;
            }
            if self.workspace().is_dir(&path) {
                tracing::warn!(path = %path.display(), "skipping directory");
                continue;
            }

            let blob = Blob::new(self.workspace().read_file(&path)?);
            let blob_id = self.database().store(&blob)?;
            let name = IndexEntry::name_from_path(&path)?;

            if index
                .entry_by_path(&name)
                .is_some_and(|entry| entry.oid == blob_id)
            {
                continue;
            }

            let mode = self.workspace().file_mode(&path);
            index.append(IndexEntry::new(name.clone(), blob_id, mode))?;

            writeln!(self.writer(), "Added {name} to the index")?;
        }

        Ok(())
    }

    /// Turn command-line paths into worktree-relative ones
    ///
    /// The worktree root itself (e.g. `.`) expands to every file in it; any
    /// other directory is kept as-is and skipped by `add`.
    fn expand_paths(&self, paths: &[String]) -> anyhow::Result<Vec<PathBuf>> {
        let mut expanded = Vec::new();

        for path in paths {
            let path = self.workspace().resolve(Path::new(path))?;

            if path.as_os_str().is_empty() {
                expanded.extend(self.workspace().list_files()?);
            } else if path.components().any(|component| {
                IGNORED_PATHS
                    .iter()
                    .any(|ignored| component.as_os_str() == OsStr::new(ignored))
            }) {
                tracing::warn!(path = %path.display(), "skipping repository metadata");
            } else {
                expanded.push(path);
            }
        }

        Ok(expanded)
    }
}
