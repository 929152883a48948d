use crate::args::{Common, TotalsArgs};
use crate::commands::{load_table, options, Out};
use crate::config::TotalsOptions;
use crate::error::NoTotals;
use crate::model::{RowBreakdown, Summary};
use crate::table::TableSource;
use crate::totals::{calculate_totals, Tally};
use crate::Result;
use std::fmt::Write;

/// Loads the table and options named by the arguments and totals the rows for one date.
///
/// A date with no totals is not an error: the returned `Out` carries the reason as its message and
/// has no structure.
pub async fn totals(common: &Common, args: &TotalsArgs) -> Result<Out<Summary>> {
    let options = options(common, args.columns()).await?;
    let table = load_table(common).await?;
    Ok(totals_report(table.as_ref(), args.date(), &options))
}

/// Totals the rows of `table` for `date` and renders the text report.
pub fn totals_report(table: &dyn TableSource, date: &str, options: &TotalsOptions) -> Out<Summary> {
    let outcome = calculate_totals(table, date, options);
    let message = render_outcome(date, &outcome, options);
    match outcome {
        Ok(tally) => Out::new(message, tally.summary),
        Err(_) => Out::new_message(message),
    }
}

/// The text report for one date, whether or not it produced totals.
pub(super) fn render_outcome(
    date: &str,
    outcome: &std::result::Result<Tally, NoTotals>,
    options: &TotalsOptions,
) -> String {
    match outcome {
        Err(e @ NoTotals::InvalidDate { .. }) => e.to_string(),
        Err(e) => format!("Calculating totals for: {date}\n\n{e}"),
        Ok(tally) => {
            let mut s = format!("Calculating totals for: {date}\n\n");
            for row in &tally.details {
                render_row(&mut s, row, &options.currency_symbol);
            }
            render_summary(&mut s, &tally.summary, &options.currency_symbol);
            s
        }
    }
}

fn render_row(s: &mut String, row: &RowBreakdown, sym: &str) {
    let amount = row.amount.with_symbol(sym);
    let expenses = row.expenses.with_symbol(sym);
    let _ = writeln!(s, "Row {}:", row.label);
    let _ = writeln!(s, "  Amount: {amount}");
    let _ = writeln!(
        s,
        "  Expenses: {} + {} = {expenses}",
        row.expense_1.with_symbol(sym),
        row.expense_2.with_symbol(sym),
    );
    let _ = writeln!(
        s,
        "  Net: {amount} - {expenses} = {}",
        row.net.with_symbol(sym)
    );
    let _ = writeln!(s, "---");
}

fn render_summary(s: &mut String, summary: &Summary, sym: &str) {
    let _ = writeln!(s, "=== RESULTS FOR {} ===", summary.date());
    let _ = writeln!(s, "Total Rows: {}", summary.row_count());
    let _ = writeln!(s, "Total Amount: {}", summary.total_amount().with_symbol(sym));
    let _ = writeln!(
        s,
        "Total Expenses: {}",
        summary.total_expenses().with_symbol(sym)
    );
    let _ = writeln!(s, "Net Total: {}", summary.total_net().with_symbol(sym));
    let _ = writeln!(s, "Averages:");
    let _ = writeln!(
        s,
        "   Amount: {}",
        summary.average_amount().with_symbol(sym)
    );
    let _ = writeln!(
        s,
        "   Expenses: {}",
        summary.average_expenses().with_symbol(sym)
    );
    let _ = write!(s, "   Net: {}", summary.average_net().with_symbol(sym));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::args::ColumnArgs;
    use crate::commands::OutputFormat;
    use crate::table::{HtmlTable, MemoryTable};
    use crate::test::{common, row, SAMPLE_HTML};

    #[test]
    fn test_report_text() {
        let table = HtmlTable::parse(SAMPLE_HTML);
        let out = totals_report(&table, "01/01/2025", &TotalsOptions::default());
        let expected = "Calculating totals for: 01/01/2025\n\n\
            === RESULTS FOR 01/01/2025 ===\n\
            Total Rows: 2\n\
            Total Amount: £300.00\n\
            Total Expenses: £30.00\n\
            Net Total: £270.00\n\
            Averages:\n   \
            Amount: £150.00\n   \
            Expenses: £15.00\n   \
            Net: £135.00";
        assert_eq!(out.message(), expected);
        assert_eq!(out.structure().unwrap().row_count(), 2);
    }

    #[test]
    fn test_report_details() {
        let table = HtmlTable::parse(SAMPLE_HTML);
        let options = TotalsOptions {
            show_details: true,
            ..TotalsOptions::default()
        };
        let out = totals_report(&table, "03/01/2025", &options);
        let message = out.message();
        assert!(message.contains("Row A-004:\n"));
        assert!(message.contains("  Amount: £80.50\n"));
        assert!(message.contains("  Expenses: £0.00 + £4.50 = £4.50\n"));
        assert!(message.contains("  Net: £80.50 - £4.50 = £76.00\n---\n"));
        assert!(message.contains("Net Total: £76.00"));
    }

    #[test]
    fn test_report_invalid_date() {
        let table = HtmlTable::parse(SAMPLE_HTML);
        let out = totals_report(&table, "1/1/2025", &TotalsOptions::default());
        assert!(out.structure().is_none());
        assert!(out.message().starts_with("Please use DD/MM/YYYY format"));
    }

    #[test]
    fn test_report_no_data() {
        let table = HtmlTable::parse(SAMPLE_HTML);
        let out = totals_report(&table, "09/09/2025", &TotalsOptions::default());
        assert!(out.structure().is_none());
        assert!(out.message().ends_with("No data found for: 09/09/2025"));
    }

    #[test]
    fn test_report_out_of_range() {
        let table = MemoryTable::new(
            None::<Vec<String>>,
            vec![
                row("A", "01/01/2025", "£7e28", "0", "0"),
                row("B", "01/01/2025", "£7e28", "0", "0"),
            ],
        );
        let out = totals_report(&table, "01/01/2025", &TotalsOptions::default());
        assert!(out.structure().is_none());
        assert_eq!(
            out.message(),
            "Calculating totals for: 01/01/2025\n\nTotals for 01/01/2025 are too large to calculate"
        );
    }

    #[tokio::test]
    async fn test_totals_from_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("page.html");
        std::fs::write(&path, SAMPLE_HTML).unwrap();
        let config = dir.path().join("config.json");
        std::fs::write(
            &config,
            r#"{"app_name": "table-totals", "config_version": 1, "currency_symbol": "£"}"#,
        )
        .unwrap();

        let common = common(&[
            "--config",
            config.to_str().unwrap(),
            "--input",
            path.to_str().unwrap(),
        ]);
        let args = TotalsArgs::new("02/01/2025", ColumnArgs::default());
        let out = totals(&common, &args).await.unwrap();
        let summary = out.structure().unwrap();
        assert_eq!(summary.row_count(), 1);
        assert_eq!(summary.total_net().to_string(), "75.00");

        let json = out.render(OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["date"], "02/01/2025");
        assert_eq!(value["row_count"], 1);
        assert_eq!(value["total_amount"], 150.0);
        assert_eq!(value["total_expenses"], 75.0);
        assert_eq!(value["average_net"], 75.0);
    }
}
