//! Tree object
//!
//! Trees are ordered lists of named references to blobs and other trees.
//!
//! ## Format
//!
//! On disk: `tree <size>\0<entries>`
//! Each entry: `<mode> <kind> <oid> <name>\n`
//!
//! The name is everything after the third space, so it may contain spaces
//! but never a newline.
//!
//! ## Tree Shapes
//!
//! Two shapes share this format:
//! - Nested: built from a directory snapshot, subdirectories become child trees
//! - Flat: built from the index, one blob entry per full relative path, sorted by path

use crate::artifacts::index::entry_mode::EntryMode;
use crate::artifacts::index::index_entry::IndexEntry;
use crate::artifacts::objects::object::Unpackable;
use crate::artifacts::objects::object::{Object, Packable};
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use crate::errors::KitError;
use bytes::Bytes;
use derive_new::new;
use std::collections::BTreeMap;
use std::io::BufRead;

/// One child of a tree
#[derive(Debug, Clone, PartialEq, Eq, new)]
pub struct TreeEntry {
    pub mode: EntryMode,
    pub oid: ObjectId,
    pub name: String,
}

impl TreeEntry {
    pub fn kind(&self) -> ObjectType {
        if self.mode.is_tree() {
            ObjectType::Tree
        } else {
            ObjectType::Blob
        }
    }

    /// A name must stay inside the directory it is restored into
    ///
    /// It is one or more `/`-separated segments, none of them empty, `.` or
    /// `..`, with no line breaks.
    pub fn is_safe_name(name: &str) -> bool {
        !name.contains(['\n', '\r'])
            && name
                .split('/')
                .all(|segment| !matches!(segment, "" | "." | ".."))
    }

    fn parse(line: &str) -> crate::errors::Result<Self> {
        let malformed = || KitError::CorruptObject(format!("malformed tree entry '{line}'"));

        let mut fields = line.splitn(4, ' ');
        let (Some(mode), Some(kind), Some(oid), Some(name)) =
            (fields.next(), fields.next(), fields.next(), fields.next())
        else {
            return Err(malformed());
        };

        let mode = EntryMode::try_from(mode)?;
        let kind = ObjectType::try_from(kind)?;
        let oid = ObjectId::try_parse(oid.to_string()).map_err(|_| malformed())?;

        let entry = TreeEntry::new(mode, oid, name.to_string());
        if entry.kind() != kind || !Self::is_safe_name(name) {
            return Err(malformed());
        }

        Ok(entry)
    }
}

impl std::fmt::Display for TreeEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} {} {} {}",
            self.mode.as_str(),
            self.kind(),
            self.oid,
            self.name
        )
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, new)]
pub struct Tree {
    entries: Vec<TreeEntry>,
}

impl Tree {
    /// Build a flat tree from index entries
    ///
    /// Later entries for the same path replace earlier ones; the result is
    /// sorted by path and keeps the full relative path as the entry name.
    pub fn build<'e>(entries: impl IntoIterator<Item = &'e IndexEntry>) -> Self {
        let entries = entries
            .into_iter()
            .map(|entry| (entry.name.clone(), entry))
            .collect::<BTreeMap<_, _>>()
            .into_values()
            .map(|entry| {
                TreeEntry::new(
                    EntryMode::File(entry.mode.clone()),
                    entry.oid.clone(),
                    entry.name.clone(),
                )
            })
            .collect();

        Tree { entries }
    }

    pub fn entries(&self) -> impl Iterator<Item = &TreeEntry> {
        self.entries.iter()
    }

    /// Read the tree as a flat `name -> oid` mapping
    ///
    /// Only meaningful for trees built from the index, where every name is a
    /// full relative path.
    pub fn flat_entries(&self) -> BTreeMap<String, ObjectId> {
        self.entries
            .iter()
            .map(|entry| (entry.name.clone(), entry.oid.clone()))
            .collect()
    }
}

impl Packable for Tree {
    fn serialize(&self) -> crate::errors::Result<Bytes> {
        let content = self
            .entries
            .iter()
            .map(|entry| format!("{entry}\n"))
            .collect::<String>();

        Ok(Bytes::from(content))
    }
}

impl Unpackable for Tree {
    fn deserialize(reader: impl BufRead) -> crate::errors::Result<Self> {
        let entries = reader
            .lines()
            .map(|line| line.map_err(|e| KitError::CorruptObject(e.to_string())))
            .filter(|line| !matches!(line, Ok(line) if line.is_empty()))
            .map(|line| line.and_then(|line| TreeEntry::parse(&line)))
            .collect::<crate::errors::Result<Vec<_>>>()?;

        Ok(Tree { entries })
    }
}

impl Object for Tree {
    fn object_type(&self) -> ObjectType {
        ObjectType::Tree
    }

    fn display(&self) -> String {
        self.entries
            .iter()
            .map(|entry| {
                format!(
                    "{} {} {}\t{}",
                    entry.mode.as_str(),
                    entry.kind(),
                    entry.oid,
                    entry.name
                )
            })
            .collect::<Vec<String>>()
            .join("\n")
    }
}
