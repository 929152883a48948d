//! Shared test fixtures.
//!
//! This module is only compiled when running tests (`#[cfg(test)]`). The sample tables use the
//! default column layout: amount in column 6, expenses in 10 and 11, date in 12.

use crate::args::{Args, Common};
use clap::Parser;

/// Parses global command line arguments the way `main` would.
pub fn common(args: &[&str]) -> Common {
    let argv = std::iter::once("totals")
        .chain(args.iter().copied())
        .chain(std::iter::once("probe"));
    Args::try_parse_from(argv).unwrap().common().clone()
}

/// Builds a 13-cell row with the given values placed at the default column positions.
pub fn row(label: &str, date: &str, amount: &str, expense_1: &str, expense_2: &str) -> Vec<String> {
    let mut cells = vec![String::new(); 13];
    cells[0] = label.to_string();
    cells[6] = amount.to_string();
    cells[10] = expense_1.to_string();
    cells[11] = expense_2.to_string();
    cells[12] = date.to_string();
    cells
}

/// A saved page with one orders table.
pub const SAMPLE_HTML: &str = r##"<!DOCTYPE html>
<html>
<head><title>Orders</title></head>
<body>
<table class="orders">
  <thead>
    <tr><th>Ref</th><th>Customer</th><th>Item</th><th>Qty</th><th>Status</th><th>Channel</th><th>Amount</th><th>Notes</th><th>Region</th><th>Agent</th><th>Fee</th><th>Postage</th><th>Date</th></tr>
  </thead>
  <tbody>
    <tr><td>A-001</td><td>J. Smith</td><td>Lamp</td><td>1</td><td>Paid</td><td>Web</td><td>£100.00</td><td></td><td>North</td><td>Kim</td><td>10</td><td>0</td><td>01/01/2025</td></tr>
    <tr><td>A-002</td><td>R. Patel</td><td>Desk</td><td>1</td><td>Paid</td><td>Shop</td><td>£200.00</td><td>gift</td><td>South</td><td>Lee</td><td>0</td><td>20</td><td>01/01/2025</td></tr>
    <tr><td>A-003</td><td>M. Jones</td><td>Chair</td><td>2</td><td>Paid</td><td>Web</td><td>£150.00</td><td></td><td>East</td><td>Kim</td><td>50</td><td>25</td><td>02/01/2025</td></tr>
    <tr><td>A-004</td><td>T. Brown</td><td>Rug</td><td>1</td><td>Pending</td><td>Web</td><td>£80.50</td><td></td><td>West</td><td>Ash</td><td>n/a</td><td>4.50</td><td>03/01/2025</td></tr>
  </tbody>
</table>
</body>
</html>
"##;

/// The same table as `SAMPLE_HTML`, exported to CSV.
pub const SAMPLE_CSV: &str = r##"Ref,Customer,Item,Qty,Status,Channel,Amount,Notes,Region,Agent,Fee,Postage,Date
A-001,J. Smith,Lamp,1,Paid,Web,£100.00,,North,Kim,10,0,01/01/2025
A-002,R. Patel,Desk,1,Paid,Shop,£200.00,gift,South,Lee,0,20,01/01/2025
A-003,M. Jones,Chair,2,Paid,Web,£150.00,,East,Kim,50,25,02/01/2025
A-004,T. Brown,Rug,1,Pending,Web,£80.50,,West,Ash,n/a,4.50,03/01/2025
"##;
