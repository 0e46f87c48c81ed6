//! Porcelain commands (user-facing operations)
//!
//! Porcelain commands compose the object database, the index and HEAD into
//! the everyday workflow.
//!
//! ## Commands
//!
//! - `init`: Initialize a new repository
//! - `add`: Stage files for commit
//! - `commit`: Record the staged files as a new commit
//! - `log`: Show commit history
//! - `checkout`: Restore a commit's files into the working directory

pub mod add;
pub mod checkout;
pub mod commit;
pub mod init;
pub mod log;
