use crate::areas::repository::Repository;
use crate::artifacts::log::history::History;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object_id::ObjectId;

impl Repository {
    /// Print the history reachable from HEAD, newest first
    pub fn log(&mut self) -> anyhow::Result<()> {
        self.ensure_initialized()?;

        let head = self.refs().read_head()?;

        for (position, item) in History::new(self.database(), head).into_iter().enumerate() {
            let (commit_oid, commit) = item?;

            if position > 0 {
                writeln!(self.writer())?;
            }
            self.show_commit(&commit_oid, &commit)?;
        }

        Ok(())
    }

    fn show_commit(&self, commit_oid: &ObjectId, commit: &Commit) -> anyhow::Result<()> {
        let mut writer = self.writer();

        writeln!(writer, "commit {commit_oid}")?;
        if let Some(parent) = commit.parent() {
            writeln!(writer, "Parent: {parent}")?;
        }
        writeln!(writer, "Date:   {}", commit.committer().readable_timestamp())?;
        writeln!(writer, "Committer: {}", commit.committer().display_name())?;
        writeln!(writer)?;

        for line in commit.message().lines() {
            writeln!(writer, "    {line}")?;
        }

        Ok(())
    }
}
