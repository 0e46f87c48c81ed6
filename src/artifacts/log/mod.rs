//! Commit history traversal
//!
//! - `history`: Walks the parent chain from a starting commit, one commit per step

pub mod history;
