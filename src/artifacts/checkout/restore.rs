//! Tree materialization
//!
//! Restoring a tree writes every blob it references (recursively through
//! child trees) below a base directory, overwriting existing files and
//! creating missing directories. It is additive: files absent from the tree
//! are left alone.

use crate::areas::database::Database;
use crate::areas::workspace::Workspace;
use crate::artifacts::index::entry_mode::EntryMode;
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::Result;
use derive_new::new;
use std::path::Path;

#[derive(new)]
pub struct Restore<'r> {
    database: &'r Database,
    workspace: &'r Workspace,
}

impl Restore<'_> {
    /// Tree ID recorded in a commit
    pub fn resolve_tree_oid(&self, commit_oid: &ObjectId) -> Result<ObjectId> {
        Ok(self
            .database
            .parse_object_as_commit(commit_oid)?
            .tree_oid()
            .clone())
    }

    /// Write the tree's content below `base_dir` (relative to the worktree root)
    ///
    /// Returns the number of files written.
    pub fn restore(&self, tree_oid: &ObjectId, base_dir: &Path) -> Result<usize> {
        let tree = self.database.parse_object_as_tree(tree_oid)?;
        let mut written = 0;

        for entry in tree.entries() {
            let target = base_dir.join(&entry.name);

            match &entry.mode {
                EntryMode::Directory => {
                    self.workspace.make_directory(&target)?;
                    written += self.restore(&entry.oid, &target)?;
                }
                EntryMode::File(mode) => {
                    let blob = self.database.parse_object_as_blob(&entry.oid)?;
                    self.workspace.write_file(&target, blob.content(), mode)?;
                    tracing::debug!(path = %target.display(), oid = %entry.oid, "restored file");
                    written += 1;
                }
            }
        }

        Ok(written)
    }
}
