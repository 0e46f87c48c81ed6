use crate::areas::repository::Repository;
use crate::artifacts::objects::object_id::ObjectId;

impl Repository {
    pub fn ls_tree(&mut self, object_sha: &str, name_only: bool) -> anyhow::Result<()> {
        self.ensure_initialized()?;
        let oid: ObjectId = object_sha.parse()?;

        let tree = self.database().parse_object_as_tree(&oid)?;

        for entry in tree.entries() {
            if name_only {
                writeln!(self.writer(), "{}", entry.name)?;
            } else {
                writeln!(
                    self.writer(),
                    "{} {} {}\t{}",
                    entry.mode.as_str(),
                    entry.kind(),
                    entry.oid,
                    entry.name
                )?;
            }
        }

        Ok(())
    }
}
