use crate::areas::repository::Repository;
use crate::artifacts::objects::commit::{Author, Commit};
use crate::artifacts::objects::tree::Tree;
use crate::errors::KitError;
use std::collections::BTreeMap;

const DEFAULT_COMMIT_MESSAGE: &str = "Default commit message";

impl Repository {
    /// Record the staged files as a new commit on top of HEAD
    ///
    /// On success HEAD points at the new commit and the index is emptied.
    pub async fn commit(&mut self, message: &str) -> anyhow::Result<()> {
        self.ensure_initialized()?;

        let index = self.index();
        let mut index = index.lock().await;

        if !index.exists() {
            return Err(KitError::NoStagingArea.into());
        }
        index.rehydrate()?;

        let parent = self.refs().read_head()?;
        let parent_files = match &parent {
            Some(parent_oid) => {
                let parent_commit = self.database().parse_object_as_commit(parent_oid)?;
                self.database()
                    .parse_object_as_tree(parent_commit.tree_oid())?
                    .flat_entries()
            }
            None => BTreeMap::new(),
        };

        let staged_files = index.tracked_oids();
        if staged_files.is_empty() {
            return Err(KitError::NoFilesStaged.into());
        }

        let changed_files = staged_files
            .iter()
            .filter(|(path, oid)| parent_files.get(*path) != Some(*oid))
            .count();

        let tree = Tree::build(index.records());
        let tree_oid = self.database().store(&tree)?;

        let message = match message.trim() {
            "" => DEFAULT_COMMIT_MESSAGE.to_string(),
            message => message.to_string(),
        };
        let is_root = parent.is_none();
        let commit = Commit::new(parent, tree_oid, Author::load_from_env(), message);
        let commit_oid = self.database().store(&commit)?;

        self.refs().update_head(&commit_oid)?;
        index.clear()?;

        tracing::info!(commit = %commit_oid, changed_files, "created commit");

        let root_marker = if is_root { "(root-commit) " } else { "" };
        writeln!(
            self.writer(),
            "[{}{}] {}",
            root_marker,
            commit_oid.to_short_oid(),
            commit.short_message()
        )?;
        writeln!(
            self.writer(),
            "{} {} changed",
            changed_files,
            if changed_files == 1 { "file" } else { "files" }
        )?;

        Ok(())
    }
}
