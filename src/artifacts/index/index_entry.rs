//! Index entry representation
//!
//! Each record of the index names one staged file:
//! - File mode (regular or executable)
//! - Content hash (blob object ID)
//! - Path relative to the repository root, `/`-separated
//!
//! ## Record Format
//!
//! `<mode> <oid> <path>` on a single line; the path is everything after
//! the second space.

use crate::artifacts::index::entry_mode::{EntryMode, FileMode};
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::KitError;
use derive_new::new;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Eq, new)]
pub struct IndexEntry {
    /// File path relative to repository root
    pub name: String,
    /// SHA-1 hash of file content
    pub oid: ObjectId,
    pub mode: FileMode,
}

impl IndexEntry {
    /// Normalize a workspace-relative path into an index name
    pub fn name_from_path(path: &Path) -> crate::errors::Result<String> {
        let name = path
            .components()
            .filter_map(|component| match component {
                std::path::Component::Normal(part) => Some(part.to_str()),
                _ => None,
            })
            .collect::<Option<Vec<_>>>()
            .ok_or_else(|| {
                KitError::io(
                    path,
                    std::io::Error::new(std::io::ErrorKind::InvalidData, "path is not valid UTF-8"),
                )
            })?
            .join("/");

        if name.contains(['\n', '\r']) {
            return Err(KitError::io(
                path,
                std::io::Error::new(std::io::ErrorKind::InvalidData, "path contains a line break"),
            ));
        }

        Ok(name)
    }

    pub fn parse(line: &str) -> crate::errors::Result<Self> {
        let malformed = || KitError::CorruptObject(format!("malformed index record '{line}'"));

        let mut fields = line.splitn(3, ' ');
        let (Some(mode), Some(oid), Some(name)) = (fields.next(), fields.next(), fields.next())
        else {
            return Err(malformed());
        };

        if name.is_empty() {
            return Err(malformed());
        }

        Ok(IndexEntry {
            name: name.to_string(),
            oid: ObjectId::try_parse(oid.to_string()).map_err(|_| malformed())?,
            mode: FileMode::try_from(mode)?,
        })
    }
}

impl std::fmt::Display for IndexEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} {} {}",
            EntryMode::File(self.mode.clone()).as_str(),
            self.oid,
            self.name
        )
    }
}
