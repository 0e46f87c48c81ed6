//! Object types and operations
//!
//! All content is stored as immutable objects identified by SHA-1 digests:
//!
//! - **Blob**: File content (raw bytes)
//! - **Tree**: Directory listing (modes, kinds, object IDs and names)
//! - **Commit**: Snapshot with metadata (tree, optional parent, author, committer, message)
//!
//! Every object is framed as `<type> <size>\0<payload>` before hashing and
//! compression. The payload may contain NUL bytes; only the first one ends
//! the header.

pub mod blob;
pub mod commit;
pub mod object;
pub mod object_id;
pub mod object_type;
pub mod tree;

/// Length of a SHA-1 hash in hexadecimal format
pub const OBJECT_ID_LENGTH: usize = 40;

/// Length of the abbreviated object ID
pub const SHORT_OBJECT_ID_LENGTH: usize = 7;

/// Number of leading hex characters selecting the shard directory
pub const SHARD_LENGTH: usize = 2;

/// Terminator of the `<type> <size>` header
pub const HEADER_SEPARATOR: u8 = b'\0';
