//! Display formatting for terminal output
//!
//! Every view renders from a `Totals` value or the furnishing manager; none
//! of them computes amounts of its own.

pub mod breakdown;
pub mod chart;
pub mod furnishing;
pub mod mahr;
pub mod report;
pub mod saved;
pub mod summary;

pub use breakdown::{breakdown_notes, breakdown_rows, format_breakdown, BreakdownRow};
pub use chart::format_chart;
pub use furnishing::{format_category_list, format_furnishing};
pub use mahr::format_mahr;
pub use saved::format_saved_list;
pub use summary::{format_summary, rate_line};
