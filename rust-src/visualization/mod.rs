//! Visualization layer for charts and PDF reports.

mod charts;
mod pdf;

#[allow(unused_imports)]
pub use charts::{render_charts, open_file};
#[allow(unused_imports)]
pub use pdf::{report_lines, write_monthly_report, LineStyle, ReportLine};
