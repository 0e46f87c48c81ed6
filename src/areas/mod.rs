//! Core repository components
//!
//! This module contains the on-disk areas of a repository:
//!
//! - `database`: Content-addressed object store for blobs, trees, and commits
//! - `index`: Append-only staging area
//! - `refs`: The HEAD pointer
//! - `repository`: Coordination of the areas plus the output writer
//! - `workspace`: Working directory file system operations

pub mod database;
pub mod index;
pub mod refs;
pub mod repository;
pub mod workspace;
