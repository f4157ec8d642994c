//! Monthly filtering and averaging.

use std::collections::HashMap;

use chrono::Datelike;
use serde::Serialize;

use crate::error::{HealthError, Result};
use crate::models::{BmiCategory, HealthEntry};


/// Arithmetic means over one month's entries.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlyAverages {
    pub entries: usize,
    pub sleep: f64,
    pub steps: f64,
    pub water_intake: f64,
    pub weight: f64,
    pub height: f64,
    pub screen_time: f64,
    pub calories_intake: f64,
    pub bmi: f64,
}


/// Keep entries dated in the given year and month, preserving order.
pub fn filter_by_month(entries: &[HealthEntry], year: i32, month: u32) -> Vec<&HealthEntry> {
    entries
        .iter()
        .filter(|e| e.date.year() == year && e.date.month() == month)
        .collect()
}


/// Average every numeric field. An empty selection is an error.
pub fn monthly_averages(entries: &[&HealthEntry]) -> Result<MonthlyAverages> {
    if entries.is_empty() {
        return Err(HealthError::EmptySelection);
    }

    Ok(MonthlyAverages {
        entries: entries.len(),
        sleep: mean(entries, |e| e.sleep),
        steps: mean(entries, |e| e.steps as f64),
        water_intake: mean(entries, |e| e.water_intake),
        weight: mean(entries, |e| e.weight),
        height: mean(entries, |e| e.height),
        screen_time: mean(entries, |e| e.screen_time),
        calories_intake: mean(entries, |e| e.calories_intake),
        bmi: mean(entries, |e| e.bmi),
    })
}


fn mean(entries: &[&HealthEntry], field: impl Fn(&HealthEntry) -> f64) -> f64 {
    let total: f64 = entries.iter().map(|&e| field(e)).sum();
    total / entries.len() as f64
}


/// Filter and average in one step.
pub fn summarize_month(entries: &[HealthEntry], year: i32, month: u32) -> Result<MonthlyAverages> {
    if entries.is_empty() {
        return Err(HealthError::EmptyDataset);
    }

    let selected = filter_by_month(entries, year, month);
    if selected.is_empty() {
        return Err(HealthError::NoDataForMonth { year, month });
    }

    monthly_averages(&selected)
}


/// Count entries per BMI category, most frequent first.
///
/// Only categories that occur are returned. Ties keep category order.
pub fn category_counts(entries: &[HealthEntry]) -> Vec<(BmiCategory, usize)> {
    let mut counts: HashMap<BmiCategory, usize> = HashMap::new();
    for entry in entries {
        *counts.entry(entry.bmi_category).or_default() += 1;
    }

    let mut counts: Vec<(BmiCategory, usize)> = counts.into_iter().collect();
    counts.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
    counts
}
