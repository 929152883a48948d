//! Types that represent the core data model, such as `Amount` and `Summary`.
mod amount;
mod date;
mod summary;

pub use amount::{Amount, OutOfRange, WithSymbol};
pub use date::{expand_range, TargetDate};
pub use summary::{RowBreakdown, StructureReport, Summary};
