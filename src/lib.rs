//! A minimal content-addressed version control store
//!
//! Files are stored as compressed, SHA-1 addressed objects under `.kit`,
//! staged through an append-only index, and recorded as a linear chain of
//! commits reachable from HEAD.

pub mod areas;
pub mod artifacts;
pub mod commands;
pub mod errors;
