//! Report command - monthly PDF.

use std::io::Write;

use anyhow::{Context, Result};
use crossterm::style::Stylize;

use crate::aggregation::{monthly_recommendations, summarize_month};
use crate::config::Settings;
use crate::storage::RecordStore;
use crate::visualization::write_monthly_report;

use super::explain_no_data;


/// Write `Monthly_Report_<YYYY>-<MM>.pdf` into the reports directory.
pub fn run(settings: &Settings, store: &RecordStore, year: i32, month: u32, out: &mut impl Write) -> Result<()> {
    let averages = match summarize_month(store.entries(), year, month) {
        Ok(averages) => averages,
        Err(e) => return explain_no_data(e, out),
    };
    let tips = monthly_recommendations(&averages);

    let pdf_path = settings.report_path(year, month);
    write_monthly_report(&pdf_path, year, month, &averages, &tips)
        .with_context(|| format!("Failed to write report to {}", pdf_path.display()))?;

    writeln!(out, "{}", format!("PDF saved at: {}", pdf_path.display()).green())?;

    Ok(())
}
