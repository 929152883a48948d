use crate::args::Common;
use crate::commands::{load_table, Out};
use crate::model::StructureReport;
use crate::table::TableSource;
use crate::totals::analyze_structure;
use crate::Result;
use std::fmt::Write;

/// Loads the table named by the arguments and reports its structure.
pub async fn probe(common: &Common) -> Result<Out<StructureReport>> {
    let table = load_table(common).await?;
    Ok(probe_report(table.as_ref()))
}

/// Reports the header labels with their column indices and the size of the first body row.
pub fn probe_report(table: &dyn TableSource) -> Out<StructureReport> {
    let report = analyze_structure(table);
    let mut message = String::from("Analyzing table structure...\n");

    if report.headers.is_empty() {
        message.push_str("No header row found\n");
    } else {
        message.push_str("Table columns:\n");
        for (ix, header) in report.headers.iter().enumerate() {
            let _ = writeln!(message, "  [{ix}]: \"{header}\"");
        }
    }

    if table.first_body_row().is_some() {
        let _ = write!(
            message,
            "\nFirst row has {} columns",
            report.sample_data.len()
        );
    } else {
        message.push_str("\nNo data rows found");
    }

    Out::new(message, report)
}
