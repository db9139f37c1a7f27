//! Common utilities used throughout Graphwalk.
//!
//! - [`error`] - The [`Error`] taxonomy shared by every algorithm

pub mod error;

pub use error::{Error, Result};
