//! Implements `TableSource` over rows held in memory. CSV input is loaded into this type.

use crate::table::{Row, TableSource};
use crate::Result;
use anyhow::Context;
use std::io::Cursor;

/// A table held in memory as an optional header row and a list of body rows.
#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct MemoryTable {
    header: Option<Row>,
    body: Vec<Row>,
}

impl MemoryTable {
    /// Create a new `MemoryTable` from a header row (if any) and body rows.
    pub fn new<S, R>(header: Option<R>, body: impl IntoIterator<Item = R>) -> Self
    where
        S: Into<String>,
        R: IntoIterator<Item = S>,
    {
        Self {
            header: header.map(|h| h.into_iter().map(Into::into).collect()),
            body: body
                .into_iter()
                .map(|row| row.into_iter().map(Into::into).collect())
                .collect(),
        }
    }

    /// Loads a table from CSV text. Records may have differing lengths. When `has_headers` is true
    /// the first record becomes the header row.
    pub fn from_csv(csv_data: &str, has_headers: bool) -> Result<Self> {
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(Cursor::new(csv_data.as_bytes()));

        let mut rows: Vec<Row> = Vec::new();
        for (ix, result) in rdr.records().enumerate() {
            let record = result.with_context(|| format!("Unable to read CSV record {}", ix + 1))?;
            rows.push(record.iter().map(|field| field.to_string()).collect());
        }

        let header = if has_headers && !rows.is_empty() {
            Some(rows.remove(0))
        } else {
            None
        };
        Ok(Self { header, body: rows })
    }
}

impl TableSource for MemoryTable {
    fn rows(&self) -> Vec<Row> {
        self.body.clone()
    }

    fn header_row(&self) -> Option<Row> {
        self.header.clone()
    }

    fn first_body_row(&self) -> Option<Row> {
        self.body.first().cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new() {
        let table = MemoryTable::new(Some(vec!["a", "b"]), vec![vec!["1", "2"], vec!["3", "4"]]);
        assert_eq!(table.header_row(), Some(vec!["a".to_string(), "b".to_string()]));
        assert_eq!(table.rows().len(), 2);
        assert_eq!(
            table.first_body_row(),
            Some(vec!["1".to_string(), "2".to_string()])
        );
    }

    #[test]
    fn test_empty() {
        let table = MemoryTable::default();
        assert!(table.rows().is_empty());
        assert_eq!(table.header_row(), None);
        assert_eq!(table.first_body_row(), None);
    }

    #[test]
    fn test_from_csv_with_headers() {
        let table = MemoryTable::from_csv("Ref,Amount\nA,\"£1,000\"\nB,£2\n", true).unwrap();
        assert_eq!(
            table.header_row(),
            Some(vec!["Ref".to_string(), "Amount".to_string()])
        );
        assert_eq!(
            table.rows(),
            vec![
                vec!["A".to_string(), "£1,000".to_string()],
                vec!["B".to_string(), "£2".to_string()],
            ]
        );
    }

    #[test]
    fn test_from_csv_without_headers() {
        let table = MemoryTable::from_csv("A,1\nB,2\n", false).unwrap();
        assert_eq!(table.header_row(), None);
        assert_eq!(table.rows().len(), 2);
    }

    #[test]
    fn test_from_csv_ragged_rows() {
        let table = MemoryTable::from_csv("a,b,c\nshort\n1,2,3\n", true).unwrap();
        let rows = table.rows();
        assert_eq!(rows[0], vec!["short".to_string()]);
        assert_eq!(rows[1].len(), 3);
    }

    #[test]
    fn test_from_csv_empty() {
        let table = MemoryTable::from_csv("", true).unwrap();
        assert_eq!(table, MemoryTable::default());
    }
}
