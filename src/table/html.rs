//! Implements `TableSource` over a parsed HTML document using CSS selectors.

use crate::table::{Row, TableSource};
use scraper::{ElementRef, Html, Selector};
use std::sync::LazyLock;

static ROW: LazyLock<Selector> = LazyLock::new(|| selector("tr"));
static DATA_CELL: LazyLock<Selector> = LazyLock::new(|| selector("td"));
static HEADER_CELL: LazyLock<Selector> = LazyLock::new(|| selector("th"));
static HEADER_ROW: LazyLock<Selector> = LazyLock::new(|| selector("thead tr"));
static BODY_ROW: LazyLock<Selector> = LazyLock::new(|| selector("tbody tr"));

fn selector(css: &str) -> Selector {
    Selector::parse(css).expect("selector should parse")
}

/// A table read from an HTML document.
///
/// The document is parsed the way a browser parses it, so a `<table>` written without `<tbody>`
/// still has its rows inside an implied `tbody`. Queries run over the whole document, not one
/// particular table.
pub struct HtmlTable {
    document: Html,
}

impl HtmlTable {
    /// Parses a complete HTML document or fragment. HTML parsing does not fail; malformed markup
    /// is repaired by the parser.
    pub fn parse(html: &str) -> Self {
        Self {
            document: Html::parse_document(html),
        }
    }
}

impl TableSource for HtmlTable {
    fn rows(&self) -> Vec<Row> {
        self.document
            .select(&ROW)
            .map(|row| cell_texts(row, &DATA_CELL))
            .collect()
    }

    fn header_row(&self) -> Option<Row> {
        self.document
            .select(&HEADER_ROW)
            .next()
            .map(|row| cell_texts(row, &HEADER_CELL))
    }

    fn first_body_row(&self) -> Option<Row> {
        self.document
            .select(&BODY_ROW)
            .next()
            .map(|row| cell_texts(row, &DATA_CELL))
    }
}

/// The concatenated text of every descendant of `row` matching `cells`.
fn cell_texts(row: ElementRef<'_>, cells: &Selector) -> Row {
    row.select(cells)
        .map(|cell| cell.text().collect::<String>())
        .collect()
}
