use crate::areas::repository::Repository;
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;

/// What `cat-file` prints about an object
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatFileMode {
    /// Raw bytes for blobs, the parsed listing for trees and commits
    Pretty,
    Type,
    Size,
}

impl Repository {
    pub fn cat_file(&mut self, object_id: &str, mode: CatFileMode) -> anyhow::Result<()> {
        self.ensure_initialized()?;
        let object_id: ObjectId = object_id.parse()?;

        let (object_type, payload) = self.database().read_object_data(&object_id)?;

        match (mode, object_type) {
            (CatFileMode::Type, _) => writeln!(self.writer(), "{object_type}")?,
            (CatFileMode::Size, _) => writeln!(self.writer(), "{}", payload.len())?,
            (CatFileMode::Pretty, ObjectType::Blob) => self.writer().write_all(&payload)?,
            (CatFileMode::Pretty, ObjectType::Tree | ObjectType::Commit) => {
                let object = self.database().parse_object(&object_id)?;
                writeln!(self.writer(), "{}", object.display())?;
            }
        }

        Ok(())
    }
}
