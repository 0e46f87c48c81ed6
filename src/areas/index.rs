//! Staging index
//!
//! The index tracks which file contents should go into the next commit.
//! It is an append-only log of `<mode> <oid> <path>` records: staging a
//! file never rewrites earlier records, so a path can appear many times
//! and the last record for it is authoritative.
//!
//! ## Lifecycle
//!
//! - Created and extended by `add`
//! - Truncated to zero records after a successful commit
//! - Absent until the first `add` (commit then fails with `NoStagingArea`)
//!
//! ## Locking
//!
//! Appends and truncation hold an exclusive advisory lock on the index file,
//! reads hold a shared one. A full `add` or `commit` is still a
//! read-modify-write sequence and is not safe against a concurrent process.

use crate::artifacts::index::index_entry::IndexEntry;
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::{KitError, Result};
use file_guard::Lock;
use std::collections::BTreeMap;
use std::io::{Read, Write};
use std::ops::DerefMut;
use std::path::Path;

#[derive(Debug, Clone)]
pub struct Index {
    /// Path to the index file (typically `.kit/index`)
    path: Box<Path>,
    /// Records in file order, duplicates included
    records: Vec<IndexEntry>,
}

impl Index {
    pub fn new(path: Box<Path>) -> Self {
        Index {
            path,
            records: Vec::new(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether the index file exists on disk
    pub fn exists(&self) -> bool {
        self.path.is_file()
    }

    /// Load all records from disk
    ///
    /// A missing index file loads as an empty log; the file is not created.
    pub fn rehydrate(&mut self) -> Result<()> {
        self.records.clear();

        if !self.exists() {
            return Ok(());
        }

        let mut index_file = std::fs::OpenOptions::new()
            .read(true)
            .open(self.path())
            .map_err(|e| KitError::io(self.path(), e))?;
        let mut lock = file_guard::lock(&mut index_file, Lock::Shared, 0, 1)
            .map_err(|e| KitError::io(&self.path, e))?;

        let mut content = String::new();
        lock.deref_mut()
            .read_to_string(&mut content)
            .map_err(|e| KitError::io(&self.path, e))?;

        self.records = content
            .lines()
            .filter(|line| !line.trim().is_empty())
            .map(IndexEntry::parse)
            .collect::<Result<Vec<_>>>()?;

        tracing::debug!(records = self.records.len(), "loaded index");

        Ok(())
    }

    /// Records in file order, including superseded ones
    pub fn records(&self) -> impl Iterator<Item = &IndexEntry> {
        self.records.iter()
    }

    /// Last-write-wins `path -> oid` mapping
    pub fn tracked_oids(&self) -> BTreeMap<String, ObjectId> {
        self.records
            .iter()
            .map(|entry| (entry.name.clone(), entry.oid.clone()))
            .collect()
    }

    pub fn entry_by_path(&self, path: &str) -> Option<&IndexEntry> {
        self.records.iter().rev().find(|entry| entry.name == path)
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Append a record to the end of the index file, creating it if needed
    pub fn append(&mut self, entry: IndexEntry) -> Result<()> {
        let mut index_file = std::fs::OpenOptions::new()
            .append(true)
            .create(true)
            .open(self.path())
            .map_err(|e| KitError::io(self.path(), e))?;
        let mut lock = file_guard::lock(&mut index_file, Lock::Exclusive, 0, 1)
            .map_err(|e| KitError::io(&self.path, e))?;

        writeln!(lock.deref_mut(), "{entry}").map_err(|e| KitError::io(&self.path, e))?;
        tracing::debug!(path = %entry.name, oid = %entry.oid, "appended index record");

        self.records.push(entry);

        Ok(())
    }

    /// Truncate the index file to zero records
    pub fn clear(&mut self) -> Result<()> {
        let mut index_file = std::fs::OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(false)
            .open(self.path())
            .map_err(|e| KitError::io(self.path(), e))?;
        let lock = file_guard::lock(&mut index_file, Lock::Exclusive, 0, 1)
            .map_err(|e| KitError::io(&self.path, e))?;

        // truncate only once the lock is held
        lock.set_len(0).map_err(|e| KitError::io(&self.path, e))?;

        self.records.clear();
        tracing::debug!("cleared index");

        Ok(())
    }
}
