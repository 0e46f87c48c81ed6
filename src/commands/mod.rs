//! Command implementations
//!
//! Commands are grouped the way they are exposed on the command line:
//!
//! - `plumbing`: Low-level object commands (hash-object, cat-file, write-tree, ls-tree)
//! - `porcelain`: User-facing workflow commands (init, add, commit, log, checkout)
//!
//! Every command is an `impl Repository` block writing its output through
//! the repository's writer.

pub mod plumbing;
pub mod porcelain;
