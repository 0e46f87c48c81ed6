//! Object identifier (SHA-1 digest)
//!
//! Object IDs are 40-character lowercase hexadecimal strings. They name every
//! stored object (blobs, trees, commits) and double as its storage key.
//!
//! ## Format
//!
//! - Full: 40 hex characters (e.g., "abc123...def")
//! - Short: First 7 characters (e.g., "abc1234")
//!
//! ## Storage
//!
//! Objects are stored in `.kit/objects/<first-2-chars>/<remaining-38-chars>`

use crate::artifacts::objects::{OBJECT_ID_LENGTH, SHARD_LENGTH, SHORT_OBJECT_ID_LENGTH};
use crate::errors::KitError;
use std::path::PathBuf;

/// Object identifier (SHA-1 digest in hex)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
pub struct ObjectId(String);

impl ObjectId {
    /// Parse and validate an object ID from a string
    ///
    /// Uppercase hex digits are accepted and normalized to lowercase.
    pub fn try_parse(id: String) -> crate::errors::Result<Self> {
        if id.len() != OBJECT_ID_LENGTH || !id.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(KitError::InvalidObjectId(id));
        }

        Ok(Self(id.to_ascii_lowercase()))
    }

    /// Build an object ID from a raw digest
    pub fn from_digest(digest: &[u8]) -> crate::errors::Result<Self> {
        let hex = digest
            .iter()
            .map(|byte| format!("{byte:02x}"))
            .collect::<String>();

        Self::try_parse(hex)
    }

    /// Convert to file system path for object storage
    ///
    /// Splits the hash as `XX/YYYYYY...` where XX is the first 2 chars.
    pub fn to_path(&self) -> PathBuf {
        let (dir, file) = self.0.split_at(SHARD_LENGTH);
        PathBuf::from(dir).join(file)
    }

    /// First 7 characters of the hash
    pub fn to_short_oid(&self) -> String {
        self.0.split_at(SHORT_OBJECT_ID_LENGTH).0.to_string()
    }
}

impl AsRef<str> for ObjectId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ObjectId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for ObjectId {
    type Err = KitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::try_parse(s.trim().to_string())
    }
}
