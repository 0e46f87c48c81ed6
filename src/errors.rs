//! Failure taxonomy shared by the repository areas
//!
//! Area-level operations (object database, index, HEAD, workspace) return
//! [`Result`], so callers can branch on the failure kind. Commands wrap these
//! in `anyhow::Error`; the underlying [`KitError`] stays reachable through
//! `downcast_ref`.

use crate::artifacts::objects::object_id::ObjectId;
use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum KitError {
    #[error("object not found: {0}")]
    ObjectNotFound(ObjectId),

    /// Bad header, failed decompression, or an unparsable object body.
    #[error("corrupt object: {0}")]
    CorruptObject(String),

    #[error("nothing to commit (create/copy files and use 'kit add' to track)")]
    NoStagingArea,

    #[error("no files staged for commit")]
    NoFilesStaged,

    #[error("object {0} is not a commit")]
    NotACommit(ObjectId),

    #[error("object {0} is not a tree")]
    NotATree(ObjectId),

    #[error("invalid object id: {0}")]
    InvalidObjectId(String),

    #[error("not a kit repository: {}", .0.display())]
    NotARepository(PathBuf),

    #[error("repository already exists at {}", .0.display())]
    AlreadyInitialized(PathBuf),

    #[error("I/O failure at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl KitError {
    pub fn io(path: impl AsRef<Path>, source: std::io::Error) -> Self {
        KitError::Io {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, KitError>;
