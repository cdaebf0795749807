//! # Wikiviews Common
//!
//! Shared types, utilities, and common functionality for Wikiviews.
//!
//! This crate provides the foundational types and utilities used across
//! all other crates in the Wikiviews workspace.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod error;
pub mod types;
pub mod utils;

#[cfg(any(test, feature = "testing"))]
pub mod test_utils;

pub use error::*;
pub use types::*;
pub use utils::*;
