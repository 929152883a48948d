pub mod args;
pub mod commands;
pub mod config;
mod error;
pub mod model;
pub mod table;
pub mod totals;
mod utils;

#[cfg(test)]
mod test;

pub use config::TotalsOptions;
pub use error::{Error, NoTotals, Result};
