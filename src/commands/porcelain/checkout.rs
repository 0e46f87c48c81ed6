use crate::areas::repository::Repository;
use crate::artifacts::checkout::restore::Restore;
use crate::artifacts::objects::object_id::ObjectId;
use std::path::Path;

impl Repository {
    /// Write the files of a commit's tree into the working directory
    ///
    /// Files not in the tree are kept. HEAD and the index are left untouched.
    pub fn checkout(&mut self, target: &str) -> anyhow::Result<()> {
        self.ensure_initialized()?;

        let commit_oid = ObjectId::try_parse(target.to_string())?;
        let restore = Restore::new(self.database(), self.workspace());

        let tree_oid = restore.resolve_tree_oid(&commit_oid)?;
        let restored = restore.restore(&tree_oid, Path::new(""))?;

        tracing::info!(commit = %commit_oid, restored, "checked out commit");

        writeln!(
            self.writer(),
            "Checked out commit {}",
            commit_oid.to_short_oid()
        )?;

        Ok(())
    }
}
