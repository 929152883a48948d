//! Command handlers for the totals CLI.
//!
//! This module contains implementations for all CLI subcommands.

mod dates;
mod probe;
mod totals;

use crate::args::{ColumnArgs, Common};
use crate::config::{self, TotalsOptions};
use crate::table::{self, TableSource};
use crate::Result;
use anyhow::Context;
use serde::Serialize;
use std::fmt::Debug;
use tracing::debug;

pub use dates::{dates, dates_report};
pub use probe::{probe, probe_report};
pub use totals::{totals, totals_report};

/// The output type for a command. This allows the command to return a consistent message and,
/// optionally, structured data.
#[derive(Debug, Clone, Serialize)]
pub struct Out<T>
where
    T: Serialize + Clone + Debug,
{
    /// A message that can be printed to the user regarding the outcome of the command execution.
    message: String,

    /// Any structured data that needs to be output from the call.
    structure: Option<T>,
}

impl<T, S> From<S> for Out<T>
where
    T: Debug + Clone + Serialize,
    S: Into<String>,
{
    fn from(value: S) -> Self {
        Out::new_message(value)
    }
}

/// How a command's output is printed to stdout.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Default,
    serde::Serialize,
    serde::Deserialize,
    clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// The human-readable report.
    #[default]
    Text,
    /// The structured result as pretty-printed JSON, `null` when there is none.
    Json,
}

serde_plain::derive_display_from_serialize!(OutputFormat);
serde_plain::derive_fromstr_from_deserialize!(OutputFormat);

impl<T> Out<T>
where
    T: Serialize + Clone + Debug,
{
    /// Create a new `Out` object that has `Some(structure)`.
    pub fn new<S>(message: S, structure: T) -> Self
    where
        S: Into<String>,
    {
        Self {
            message: message.into(),
            structure: Some(structure),
        }
    }

    /// Create a new `Out` object that has `None` for `structure`.
    pub fn new_message<S>(message: S) -> Self
    where
        S: Into<String>,
    {
        Self {
            message: message.into(),
            structure: None,
        }
    }

    /// Get the `message`.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Get the structured data stored in `structure`.
    pub fn structure(&self) -> Option<&T> {
        self.structure.as_ref()
    }

    /// Renders the output in `format`: the message for text, the structure for JSON.
    pub fn render(&self, format: OutputFormat) -> Result<String> {
        match format {
            OutputFormat::Text => Ok(self.message.clone()),
            OutputFormat::Json => serde_json::to_string_pretty(&self.structure)
                .context("Unable to serialize command output"),
        }
    }

    /// Prints the rendered output to stdout.
    pub fn print(&self, format: OutputFormat) -> Result<()> {
        if format == OutputFormat::Json {
            debug!("{}", self.message);
        }
        println!("{}", self.render(format)?);
        Ok(())
    }
}

/// Resolves the options from the config file and then the command line overrides.
async fn options(common: &Common, columns: &ColumnArgs) -> Result<TotalsOptions> {
    let options = config::load_options(common.config()).await?;
    Ok(columns.apply(options))
}

/// Loads the table named by the common arguments.
async fn load_table(common: &Common) -> Result<Box<dyn TableSource>> {
    table::load(common.input(), common.input_format(), common.has_headers()).await
}
