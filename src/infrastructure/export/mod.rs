//! Spreadsheet export of the journal report
pub mod csv_dir;
pub mod workbook;
pub mod xlsx;

pub use csv_dir::write_csv_dir;
pub use workbook::{Cell, RATE_SOURCE, Sheet, Workbook};
pub use xlsx::write_xlsx;

use chrono::NaiveDate;

/// `coinpnl_2024-06-30.xlsx`
pub fn default_file_name(day: NaiveDate) -> String {
    format!("coinpnl_{}.xlsx", day.format("%Y-%m-%d"))
}

/// Directory used by CSV mode: `coinpnl_2024-06-30/`
pub fn default_csv_dir_name(day: NaiveDate) -> String {
    format!("coinpnl_{}", day.format("%Y-%m-%d"))
}
