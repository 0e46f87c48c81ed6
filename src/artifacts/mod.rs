//! Data structures and algorithms
//!
//! - `checkout`: Restoring a commit's tree into the working directory
//! - `index`: Staging index record types
//! - `log`: Commit history traversal
//! - `objects`: Object types (blob, tree, commit) and their canonical encodings

pub mod checkout;
pub mod index;
pub mod log;
pub mod objects;
