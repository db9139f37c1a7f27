//! # graphwalk-common
//!
//! Foundation layer for Graphwalk: errors, collections, and cancellation.
//!
//! This crate provides the building blocks used by all other Graphwalk
//! crates. It has no internal dependencies and should be kept minimal.
//!
//! ## Modules
//!
//! - [`cancel`] - Cooperative cancellation token shared with running algorithms
//! - [`collections`] - Hash map/set aliases with a deterministic hasher
//! - [`utils`] - Error types

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod cancel;
pub mod collections;
pub mod utils;

// Re-export commonly used types at crate root
pub use cancel::CancellationToken;
pub use collections::{WalkIndexMap, WalkIndexSet, WalkMap, WalkSet};
pub use utils::error::{Error, Result};
