//! Charts command - export the three chart images.

use std::io::Write;

use anyhow::{Context, Result};
use crossterm::style::Stylize;

use crate::config::Settings;
use crate::storage::RecordStore;
use crate::visualization::{open_file, render_charts};


/// Render all charts from every recorded entry.
pub fn run(settings: &Settings, store: &RecordStore, should_open: bool, out: &mut impl Write) -> Result<()> {
    if store.is_empty() {
        writeln!(out, "{}", "No data to generate graphs.".yellow())?;
        return Ok(());
    }

    let paths = settings.chart_paths();
    render_charts(store.entries(), &paths).context("Failed to render charts")?;

    for path in paths.all() {
        writeln!(out, "{}", format!("+ Exported to: {}", path.display()).green())?;
    }

    if should_open {
        for path in paths.all() {
            open_file(path)?;
        }
    }

    Ok(())
}
