//! # Wikiviews Graphs
//!
//! Pageview comparison pipeline and chart rendering for Wikiviews.
//!
//! The pipeline filters the shared pageview table to one country, a set of
//! language editions and a date window, then sums views per calendar week
//! and language. The resulting tidy table feeds the weekly line chart
//! rendered natively with plotters.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod pipeline;
pub mod selection;
pub mod table;
pub mod traits;
pub mod utils;
pub mod weekly;
pub mod weekly_views_chart;

pub use pipeline::*;
pub use selection::*;
pub use table::*;
pub use traits::*;
pub use utils::*;
pub use weekly::*;
pub use weekly_views_chart::*;
