use crate::areas::repository::Repository;
use crate::areas::workspace::Workspace;
use crate::artifacts::index::entry_mode::EntryMode;
use crate::artifacts::objects::blob::Blob;
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::tree::{Tree, TreeEntry};
use std::path::Path;

impl Repository {
    pub fn write_tree(&mut self) -> anyhow::Result<()> {
        self.ensure_initialized()?;

        let tree_id = self.build_tree_from_directory(Path::new(""))?;
        writeln!(self.writer(), "{tree_id}")?;

        Ok(())
    }

    /// Store a directory snapshot as nested trees and return the root tree ID
    ///
    /// `dir_path` is relative to the worktree root. Subdirectories become
    /// child trees; entries keep the order the workspace lists them in.
    pub fn build_tree_from_directory(&self, dir_path: &Path) -> crate::errors::Result<ObjectId> {
        let mut entries = Vec::new();

        for child in self.workspace().list_dir(dir_path)? {
            if Workspace::has_line_break(&child) {
                tracing::warn!(path = ?child, "skipping path with a line break");
                continue;
            }

            let name = child
                .file_name()
                .map(|name| name.to_string_lossy().to_string())
                .unwrap_or_default();

            let entry = if self.workspace().is_dir(&child) {
                let oid = self.build_tree_from_directory(&child)?;
                TreeEntry::new(EntryMode::Directory, oid, name)
            } else {
                let blob = Blob::new(self.workspace().read_file(&child)?);
                let oid = self.database().store(&blob)?;
                TreeEntry::new(self.workspace().file_mode(&child).into(), oid, name)
            };

            entries.push(entry);
        }

        self.database().store(&Tree::new(entries))
    }
}
