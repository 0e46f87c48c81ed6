//! HEAD reference
//!
//! HEAD names the most recent commit. It is a single line holding the
//! commit's 40-character object ID, and it is absent (or empty) before the
//! first commit. History is linear, so there are no branches or symbolic
//! references to follow.

use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::{KitError, Result};
use derive_new::new;
use file_guard::Lock;
use std::io::{Read, Write};
use std::ops::DerefMut;
use std::path::Path;

/// Name of the HEAD reference file
pub const HEAD_REF_NAME: &str = "HEAD";

#[derive(Debug, new)]
pub struct Refs {
    /// Path to the metadata directory (typically `.kit`)
    path: Box<Path>,
}

impl Refs {
    pub fn head_path(&self) -> Box<Path> {
        self.path.join(HEAD_REF_NAME).into_boxed_path()
    }

    /// Read the commit HEAD points to, if any
    pub fn read_head(&self) -> Result<Option<ObjectId>> {
        let head_path = self.head_path();

        if !head_path.exists() {
            return Ok(None);
        }

        let mut head_file = std::fs::OpenOptions::new()
            .read(true)
            .open(&head_path)
            .map_err(|e| KitError::io(&head_path, e))?;
        let mut lock = file_guard::lock(&mut head_file, Lock::Shared, 0, 1)
            .map_err(|e| KitError::io(&head_path, e))?;

        let mut content = String::new();
        lock.deref_mut()
            .read_to_string(&mut content)
            .map_err(|e| KitError::io(&head_path, e))?;
        let content = content.trim();

        if content.is_empty() {
            return Ok(None);
        }

        Ok(Some(content.parse()?))
    }

    /// Point HEAD at a new commit
    ///
    /// # Locking
    ///
    /// Acquires an exclusive lock on the HEAD file during the update.
    pub fn update_head(&self, oid: &ObjectId) -> Result<()> {
        let head_path = self.head_path();

        let mut head_file = std::fs::OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(false)
            .open(&head_path)
            .map_err(|e| KitError::io(&head_path, e))?;
        let mut lock = file_guard::lock(&mut head_file, Lock::Exclusive, 0, 1)
            .map_err(|e| KitError::io(&head_path, e))?;

        // truncate only once the lock is held
        lock.set_len(0).map_err(|e| KitError::io(&head_path, e))?;

        writeln!(lock.deref_mut(), "{oid}").map_err(|e| KitError::io(&head_path, e))?;
        tracing::debug!(%oid, "updated HEAD");

        Ok(())
    }
}
