use crate::args::{Common, DatesArgs};
use crate::commands::totals::render_outcome;
use crate::commands::{load_table, options, Out};
use crate::config::TotalsOptions;
use crate::model::Summary;
use crate::table::TableSource;
use crate::totals::{calculate_multiple_dates, summaries};
use crate::Result;
use tracing::info;

/// Separates the per-date sections of the text report.
const SEPARATOR_WIDTH: usize = 50;

/// Loads the table and options named by the arguments and totals the rows for each date.
pub async fn dates(common: &Common, args: &DatesArgs) -> Result<Out<Vec<Summary>>> {
    let dates = args.dates()?;
    let options = options(common, args.columns()).await?;
    let table = load_table(common).await?;
    Ok(dates_report(table.as_ref(), &dates, &options))
}

/// Totals the rows of `table` for each of `dates`, in order. The structure holds only the dates
/// that had totals; the message has a section for every date.
pub fn dates_report<S>(
    table: &dyn TableSource,
    dates: &[S],
    options: &TotalsOptions,
) -> Out<Vec<Summary>>
where
    S: AsRef<str>,
{
    let outcomes = calculate_multiple_dates(table, dates, options);
    let separator = "=".repeat(SEPARATOR_WIDTH);

    let mut message = String::from("CALCULATING FOR MULTIPLE DATES\n");
    for (date, outcome) in &outcomes {
        message.push('\n');
        message.push_str(&render_outcome(date, outcome, options));
        message.push_str("\n\n");
        message.push_str(&separator);
        message.push('\n');
    }

    let found = summaries(&outcomes);
    info!("{} of {} dates had data", found.len(), outcomes.len());
    Out::new(message, found)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::args::ColumnArgs;
    use crate::table::{HtmlTable, MemoryTable};
    use crate::test::{common, row, SAMPLE_CSV, SAMPLE_HTML};

    #[test]
    fn test_report_keeps_order_and_drops_missing() {
        let table = HtmlTable::parse(SAMPLE_HTML);
        let out = dates_report(
            &table,
            &["03/01/2025", "04/01/2025", "01/01/2025"],
            &TotalsOptions::default(),
        );
        let found: Vec<&str> = out.structure().unwrap().iter().map(|s| s.date()).collect();
        assert_eq!(found, vec!["03/01/2025", "01/01/2025"]);

        let message = out.message();
        assert!(message.starts_with("CALCULATING FOR MULTIPLE DATES\n"));
        assert!(message.contains("No data found for: 04/01/2025"));
        assert_eq!(message.matches(&"=".repeat(50)).count(), 3);
        let first = message.find("RESULTS FOR 03/01/2025").unwrap();
        let last = message.find("RESULTS FOR 01/01/2025").unwrap();
        assert!(first < last);
    }

    #[test]
    fn test_only_first_date_matches() {
        let table = MemoryTable::new(
            None::<Vec<String>>,
            vec![row("A", "01/01/2025", "£100", "10", "0")],
        );
        let out = dates_report(
            &table,
            &["01/01/2025", "02/01/2025"],
            &TotalsOptions::default(),
        );
        let found = out.structure().unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].date(), "01/01/2025");
    }

    #[test]
    fn test_no_dates() {
        let table = MemoryTable::default();
        let out = dates_report::<&str>(&table, &[], &TotalsOptions::default());
        assert!(out.structure().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_range_from_csv_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("export.csv");
        std::fs::write(&path, SAMPLE_CSV).unwrap();
        let config = dir.path().join("config.json");
        std::fs::write(&config, r#"{"app_name": "table-totals", "config_version": 1}"#).unwrap();

        let common = common(&[
            "--config",
            config.to_str().unwrap(),
            "--input",
            path.to_str().unwrap(),
        ]);
        let args = DatesArgs::new_range("31/12/2024", "03/01/2025", ColumnArgs::default());
        let out = dates(&common, &args).await.unwrap();
        let found: Vec<(String, usize)> = out
            .structure()
            .unwrap()
            .iter()
            .map(|s| (s.date().to_string(), s.row_count()))
            .collect();
        assert_eq!(
            found,
            vec![
                ("01/01/2025".to_string(), 2),
                ("02/01/2025".to_string(), 1),
                ("03/01/2025".to_string(), 1),
            ]
        );
    }

    #[tokio::test]
    async fn test_reversed_range_is_an_error() {
        let common = common(&["--input", "unused.html"]);
        let args = DatesArgs::new_range("03/01/2025", "01/01/2025", ColumnArgs::default());
        assert!(dates(&common, &args).await.is_err());
    }
}
