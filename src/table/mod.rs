//! Read access to a rendered table.
//!
//! The aggregation code never touches HTML directly. It reads through the `TableSource` trait, which
//! is implemented over a parsed HTML document (`HtmlTable`) and over rows held in memory
//! (`MemoryTable`, which is also how CSV input is represented).

mod html;
mod memory;

use crate::{utils, Result};
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

pub use html::HtmlTable;
pub use memory::MemoryTable;

/// The text of each cell in one table row, in column order.
pub type Row = Vec<String>;

/// The structural queries needed to total and inspect a table.
///
/// Cell text is returned as-is; callers trim it when they need to.
pub trait TableSource {
    /// Every row in document order. The cells of a row are its data cells only, so a header row
    /// made of `th` cells comes back empty.
    fn rows(&self) -> Vec<Row>;

    /// The header row's cells, if there is a header row.
    fn header_row(&self) -> Option<Row>;

    /// The first body row's data cells, if there is one.
    fn first_body_row(&self) -> Option<Row>;
}

/// The format of an input document.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    /// A saved HTML page containing the table.
    #[default]
    Html,
    /// A CSV export of the table.
    Csv,
}

serde_plain::derive_display_from_serialize!(SourceKind);
serde_plain::derive_fromstr_from_deserialize!(SourceKind);

impl SourceKind {
    /// Guesses the format from a file extension: `.csv` is CSV, everything else is HTML.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("csv") => SourceKind::Csv,
            _ => SourceKind::Html,
        }
    }
}

/// Builds a `TableSource` from document text.
///
/// `has_headers` only applies to CSV, where it decides whether the first record is the header row.
pub fn parse(text: &str, kind: SourceKind, has_headers: bool) -> Result<Box<dyn TableSource>> {
    Ok(match kind {
        SourceKind::Html => Box::new(HtmlTable::parse(text)),
        SourceKind::Csv => Box::new(MemoryTable::from_csv(text, has_headers)?),
    })
}

/// Reads a document from `input` (or stdin when `input` is `None` or `-`) and builds a
/// `TableSource` from it. When `kind` is `None` it is inferred from the file extension.
pub async fn load(
    input: Option<&Path>,
    kind: Option<SourceKind>,
    has_headers: bool,
) -> Result<Box<dyn TableSource>> {
    let (text, kind) = match input {
        Some(path) if path != Path::new("-") => {
            let kind = kind.unwrap_or_else(|| SourceKind::from_path(path));
            debug!("Reading {kind} table from {}", path.display());
            (utils::read(path).await?, kind)
        }
        _ => {
            let kind = kind.unwrap_or_default();
            debug!("Reading {kind} table from stdin");
            (utils::read_stdin().await?, kind)
        }
    };
    parse(&text, kind, has_headers).context("Unable to read the table")
}
