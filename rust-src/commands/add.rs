//! Add command - record one day's measurements.

use std::io::Write;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use crossterm::style::Stylize;

use crate::models::{HealthEntry, Measurements};
use crate::storage::RecordStore;


/// Validate, derive BMI and append the entry to the store.
pub fn run(
    store: &mut RecordStore,
    date: NaiveDate,
    measurements: Measurements,
    out: &mut impl Write,
) -> Result<()> {
    let entry = HealthEntry::record(date, measurements)?;
    let (bmi, category) = (entry.bmi, entry.bmi_category);

    store
        .append(entry)
        .with_context(|| format!("Failed to save entry to {}", store.path().display()))?;

    writeln!(out, "{}", "Record saved successfully!".green())?;
    writeln!(out, "BMI: {bmi:.1} ({category})")?;

    Ok(())
}
