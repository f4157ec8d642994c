//! CLI command implementations.

use std::io::Write;

use anyhow::Result;
use crossterm::style::Stylize;

use crate::error::HealthError;

pub mod add;
pub mod analyze;
pub mod charts;
pub mod prompt;
pub mod report;
pub mod shell;


/// Turn "nothing to report" errors into a user message; pass the rest on.
pub(crate) fn explain_no_data(err: HealthError, out: &mut impl Write) -> Result<()> {
    let message = match err {
        HealthError::EmptyDataset => "No data available.",
        HealthError::NoDataForMonth { .. } | HealthError::EmptySelection => {
            "No data for the selected month."
        }
        other => return Err(other.into()),
    };

    writeln!(out, "{}", message.yellow())?;
    Ok(())
}
