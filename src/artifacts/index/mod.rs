//! Index file format
//!
//! The index (staging area) is a UTF-8 text file holding one record per line:
//!
//! ```text
//! <mode> <oid> <path>
//! ```
//!
//! Records are only ever appended. The same path may appear several times;
//! the last record for a path wins when the file is replayed.

pub mod entry_mode;
pub mod index_entry;
