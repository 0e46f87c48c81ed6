//! Checkout operations
//!
//! - `restore`: Materializes a commit's tree into the working directory

pub mod restore;
