//! Service layer for wedding-budget
//!
//! The calculator session and the aggregation engine hold the budgeting
//! logic; the calculation service persists sessions through the storage
//! layer.

pub mod aggregate;
pub mod calculation;
pub mod calculator;
pub mod furnishing;

pub use aggregate::{aggregate, AggregateInput, BreakdownLine, Totals};
pub use calculation::CalculationService;
pub use calculator::{Calculator, MahrPart};
pub use furnishing::{FurnishingManager, FurnishingTotals, ItemDraft};
