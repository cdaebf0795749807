//! # Wikiviews I18n
//!
//! Internationalization support using Fluent localization system for Wikiviews.
//!
//! Every user-visible string of the comparison page lives in an embedded
//! Fluent catalog, looked up through typed [`MessageKey`]s.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod loader;
pub mod messages;

pub use loader::*;
pub use messages::*;
