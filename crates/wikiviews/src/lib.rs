//! # Wikiviews
//!
//! Command-line page comparing weekly Wikipedia pageviews across the
//! language editions read in one country.
//!
//! This is the main binary crate that wires configuration, logging, the
//! shared pageview data and the comparison page together.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod cli;
pub mod error;
pub mod logging;
pub mod page;

pub use cli::*;
pub use error::*;
pub use logging::*;
pub use page::*;
