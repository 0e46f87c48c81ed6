//! Plumbing commands (low-level object operations)
//!
//! Plumbing commands provide direct access to the object database. They're
//! primarily used for scripting and as building blocks for porcelain commands.
//!
//! ## Commands
//!
//! - `hash-object`: Compute object ID and optionally store in database
//! - `cat-file`: Print an object's payload, type, or size
//! - `write-tree`: Snapshot the working directory as nested tree objects
//! - `ls-tree`: List contents of a tree object

pub mod cat_file;
pub mod hash_object;
pub mod ls_tree;
pub mod write_tree;
