//! Totals, expenses and averages for the rows of a table that match a date, plus a probe of the
//! table's structure.

use crate::config::TotalsOptions;
use crate::error::NoTotals;
use crate::model::{Amount, OutOfRange, RowBreakdown, StructureReport, Summary, TargetDate};
use crate::table::TableSource;
use tracing::{debug, warn};

/// The result of totalling one date: the `Summary` plus, when `show_details` was set, the parsed
/// values of every qualifying row in table order.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Tally {
    pub summary: Summary,
    pub details: Vec<RowBreakdown>,
}

/// Totals the rows of `table` whose date cell equals `target_date`.
///
/// For each qualifying row, `net = amount - (expense_1 + expense_2)`. The amount cell has the first
/// occurrence of the currency symbol removed before parsing; cells that do not parse count as zero.
/// Rows with too few cells for the configured columns are skipped.
///
/// # Errors
/// - `NoTotals::InvalidDate` if `target_date` is not `DD/MM/YYYY`.
/// - `NoTotals::NoData` if no row matches.
/// - `NoTotals::OutOfRange` if a matching cell or any running total is too large for an `Amount`.
pub fn calculate_totals(
    table: &dyn TableSource,
    target_date: &str,
    options: &TotalsOptions,
) -> Result<Tally, NoTotals> {
    let Some(date) = TargetDate::parse(target_date) else {
        warn!("Please use DD/MM/YYYY format, got '{target_date}'");
        return Err(NoTotals::InvalidDate {
            date: target_date.to_string(),
        });
    };
    debug!("Calculating totals for: {date}");

    let max_column = options.max_column();
    let mut running = Running::default();
    let mut details = Vec::new();

    for cells in table.rows() {
        if cells.len() <= max_column {
            continue;
        }
        if cells[options.date_column].trim() != date.as_str() {
            continue;
        }

        let added = parse_row(&cells, options).and_then(|row| running.add(&row).map(|_| row));
        let row = match added {
            Ok(row) => row,
            Err(e) => {
                warn!("Row '{}' for {date}: {e}", cells[0]);
                return Err(NoTotals::OutOfRange {
                    date: date.to_string(),
                });
            }
        };

        if options.show_details {
            details.push(row);
        }
    }

    let Running {
        amount: total_amount,
        expenses: total_expenses,
        net: total_net,
        count: row_count,
    } = running;

    if row_count == 0 {
        warn!("No data found for: {date}");
        return Err(NoTotals::NoData {
            date: date.to_string(),
        });
    }

    debug!("{row_count} rows matched {date}");
    Ok(Tally {
        summary: Summary::new(
            date.as_str(),
            total_amount,
            total_expenses,
            total_net,
            row_count,
        ),
        details,
    })
}

/// Running totals over the qualifying rows.
#[derive(Debug, Default)]
struct Running {
    amount: Amount,
    expenses: Amount,
    net: Amount,
    count: usize,
}

impl Running {
    fn add(&mut self, row: &RowBreakdown) -> Result<(), OutOfRange> {
        self.amount = self.amount.checked_add(row.amount).ok_or(OutOfRange)?;
        self.expenses = self.expenses.checked_add(row.expenses).ok_or(OutOfRange)?;
        self.net = self.net.checked_add(row.net).ok_or(OutOfRange)?;
        self.count += 1;
        Ok(())
    }
}

/// Parses the amount and expense cells of a row already known to be long enough.
fn parse_row(cells: &[String], options: &TotalsOptions) -> Result<RowBreakdown, OutOfRange> {
    let amount =
        Amount::parse_cell_with_symbol(&cells[options.amount_column], &options.currency_symbol)?;
    let expense_1 = Amount::parse_cell(cells[options.expense_column_1].trim())?;
    let expense_2 = Amount::parse_cell(cells[options.expense_column_2].trim())?;
    let expenses = expense_1.checked_add(expense_2).ok_or(OutOfRange)?;
    let net = amount.checked_sub(expenses).ok_or(OutOfRange)?;
    Ok(RowBreakdown {
        label: cells[0].clone(),
        amount,
        expense_1,
        expense_2,
        expenses,
        net,
    })
}

/// Runs `calculate_totals` once per date, in order. Dates that produce no totals are left out, so
/// the output may be shorter than `dates`.
pub fn calculate_multiple_dates<S>(
    table: &dyn TableSource,
    dates: &[S],
    options: &TotalsOptions,
) -> Vec<(String, Result<Tally, NoTotals>)>
where
    S: AsRef<str>,
{
    dates
        .iter()
        .map(|date| {
            let date = date.as_ref();
            (date.to_string(), calculate_totals(table, date, options))
        })
        .collect()
}

/// The summaries from `calculate_multiple_dates`, dropping the dates that had none.
pub fn summaries(outcomes: &[(String, Result<Tally, NoTotals>)]) -> Vec<Summary> {
    outcomes
        .iter()
        .filter_map(|(_, outcome)| outcome.as_ref().ok())
        .map(|tally| tally.summary.clone())
        .collect()
}

/// Reports the header labels and the first body row of `table`. Missing rows give an empty report,
/// never an error.
pub fn analyze_structure(table: &dyn TableSource) -> StructureReport {
    let headers: Vec<String> = table
        .header_row()
        .unwrap_or_default()
        .iter()
        .map(|h| h.trim().to_string())
        .collect();
    let sample_data = table
        .first_body_row()
        .unwrap_or_default()
        .iter()
        .map(|c| c.trim().to_string())
        .collect();
    StructureReport {
        total_columns: headers.len(),
        headers,
        sample_data,
    }
}
