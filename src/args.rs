//! These structs provide the CLI interface for the totals CLI.

use crate::commands::OutputFormat;
use crate::config::TotalsOptions;
use crate::model::expand_range;
use crate::table::SourceKind;
use crate::Result;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing_subscriber::filter::LevelFilter;

/// totals: add up the rows of a table that match a date.
///
/// Reads a saved HTML page (or a CSV export) containing a table, picks the rows whose date column
/// equals a DD/MM/YYYY date, and reports the total amount, total expenses, net total and averages.
///
/// Column positions default to date=12, amount=6, expenses=10 and 11, with `£` stripped from the
/// amount. Use `totals probe` to see a table's headers and find the right positions.
#[derive(Debug, Parser, Clone)]
pub struct Args {
    #[clap(flatten)]
    common: Common,

    #[command(subcommand)]
    command: Command,
}

impl Args {
    pub fn common(&self) -> &Common {
        &self.common
    }

    pub fn command(&self) -> &Command {
        &self.command
    }
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Calculate totals for one date.
    Totals(TotalsArgs),
    /// Calculate totals for several dates, or for every day in a range.
    Dates(DatesArgs),
    /// Show the table's header labels and first data row.
    Probe,
}

/// Arguments common to all subcommands.
#[derive(Debug, Parser, Clone)]
pub struct Common {
    /// The logging verbosity. One of, from least to most verbose:
    /// off, error, warn, info, debug, trace
    ///
    /// This can be overridden by RUST_LOG.
    #[arg(long, default_value_t = LevelFilter::INFO)]
    log_level: LevelFilter,

    /// Path to a JSON config file. Defaults to <config dir>/table-totals/config.json if it exists.
    #[arg(long, env = "TOTALS_CONFIG")]
    config: Option<PathBuf>,

    /// The document containing the table. Reads stdin when omitted or `-`.
    #[arg(long, short = 'i')]
    input: Option<PathBuf>,

    /// The format of the input. Inferred from the file extension when omitted (HTML for stdin).
    #[arg(long, value_enum)]
    input_format: Option<SourceKind>,

    /// For CSV input: the first record is data, not a header row.
    #[arg(long)]
    no_headers: bool,

    /// How to print results: human-readable text or JSON.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
}

impl Common {
    pub fn log_level(&self) -> LevelFilter {
        self.log_level
    }

    pub fn config(&self) -> Option<&Path> {
        self.config.as_deref()
    }

    pub fn input(&self) -> Option<&Path> {
        self.input.as_deref()
    }

    pub fn input_format(&self) -> Option<SourceKind> {
        self.input_format
    }

    pub fn has_headers(&self) -> bool {
        !self.no_headers
    }

    pub fn format(&self) -> OutputFormat {
        self.format
    }
}

/// Column and display overrides shared by `totals` and `dates`. Anything left out comes from the
/// config file or the defaults.
#[derive(Debug, Parser, Clone, Default)]
pub struct ColumnArgs {
    /// Show the parsed values of each matching row.
    #[arg(long)]
    details: bool,

    /// Zero-based index of the date column.
    #[arg(long)]
    date_column: Option<usize>,

    /// Zero-based index of the amount column.
    #[arg(long)]
    amount_column: Option<usize>,

    /// Zero-based index of the first expense column.
    #[arg(long)]
    expense_column_1: Option<usize>,

    /// Zero-based index of the second expense column.
    #[arg(long)]
    expense_column_2: Option<usize>,

    /// The currency symbol to remove from the amount before parsing it.
    #[arg(long)]
    currency_symbol: Option<String>,
}

impl ColumnArgs {
    /// Overrides `options` with every flag that was given.
    pub fn apply(&self, mut options: TotalsOptions) -> TotalsOptions {
        if let Some(v) = self.date_column {
            options.date_column = v;
        }
        if let Some(v) = self.amount_column {
            options.amount_column = v;
        }
        if let Some(v) = self.expense_column_1 {
            options.expense_column_1 = v;
        }
        if let Some(v) = self.expense_column_2 {
            options.expense_column_2 = v;
        }
        if let Some(s) = &self.currency_symbol {
            options.currency_symbol = s.clone();
        }
        if self.details {
            options.show_details = true;
        }
        options
    }
}

/// (Not shown): Args for the `totals totals` command.
#[derive(Debug, Parser, Clone)]
pub struct TotalsArgs {
    /// The date to total, in DD/MM/YYYY form.
    date: String,

    #[clap(flatten)]
    columns: ColumnArgs,
}

impl TotalsArgs {
    pub fn new(date: impl Into<String>, columns: ColumnArgs) -> Self {
        Self {
            date: date.into(),
            columns,
        }
    }

    pub fn date(&self) -> &str {
        &self.date
    }

    pub fn columns(&self) -> &ColumnArgs {
        &self.columns
    }
}

/// (Not shown): Args for the `totals dates` command.
#[derive(Debug, Parser, Clone)]
pub struct DatesArgs {
    /// The dates to total, in DD/MM/YYYY form, reported in the order given.
    #[arg(required_unless_present = "from")]
    dates: Vec<String>,

    /// The first day of an inclusive range of dates.
    #[arg(long, requires = "to", conflicts_with = "dates")]
    from: Option<String>,

    /// The last day of an inclusive range of dates.
    #[arg(long, requires = "from")]
    to: Option<String>,

    #[clap(flatten)]
    columns: ColumnArgs,
}

impl DatesArgs {
    pub fn new_range(from: impl Into<String>, to: impl Into<String>, columns: ColumnArgs) -> Self {
        Self {
            dates: Vec::new(),
            from: Some(from.into()),
            to: Some(to.into()),
            columns,
        }
    }

    /// The explicit dates, or every day from `--from` to `--to`.
    pub fn dates(&self) -> Result<Vec<String>> {
        match (&self.from, &self.to) {
            (Some(from), Some(to)) => expand_range(from, to),
            _ => Ok(self.dates.clone()),
        }
    }

    pub fn columns(&self) -> &ColumnArgs {
        &self.columns
    }
}
