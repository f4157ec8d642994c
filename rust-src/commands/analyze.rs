//! Analyze command - monthly averages and tips on the terminal.

use std::io::Write;

use anyhow::Result;
use crossterm::style::Stylize;

use crate::aggregation::{monthly_recommendations, summarize_month, MonthlyAverages};
use crate::storage::RecordStore;

use super::explain_no_data;


/// Print the summary for one month.
pub fn run(store: &RecordStore, year: i32, month: u32, json: bool, out: &mut impl Write) -> Result<()> {
    let averages = match summarize_month(store.entries(), year, month) {
        Ok(averages) => averages,
        Err(e) => return explain_no_data(e, out),
    };

    if json {
        writeln!(out, "{}", serde_json::to_string_pretty(&averages)?)?;
    } else {
        print_summary(&averages, out)?;
    }

    Ok(())
}


fn print_summary(averages: &MonthlyAverages, out: &mut impl Write) -> Result<()> {
    writeln!(out, "\n{}", "===== Monthly Summary =====".bold())?;
    writeln!(out, "Entries: {}", averages.entries)?;
    writeln!(out, "Average Sleep: {:.1} hrs", averages.sleep)?;
    writeln!(out, "Average Steps: {:.0}", averages.steps)?;
    writeln!(out, "Average Water Intake: {:.1} L", averages.water_intake)?;
    writeln!(out, "Average BMI: {:.1}", averages.bmi)?;
    writeln!(out, "Average Screen Time: {:.1} hrs", averages.screen_time)?;
    writeln!(out, "Average Calories Intake: {:.0}", averages.calories_intake)?;

    writeln!(out, "\n{}", "Recommendations:".bold())?;
    for tip in monthly_recommendations(averages) {
        writeln!(out, "- {tip}")?;
    }

    Ok(())
}


#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use tempfile::TempDir;
    use crate::models::{HealthEntry, Measurements};

    fn create_test_store(tmp_dir: &TempDir) -> RecordStore {
        let mut store = RecordStore::open(tmp_dir.path().join("data.csv")).unwrap();
        for (day, sleep) in [(3, 6.0), (17, 8.0)] {
            let entry = HealthEntry::record(
                NaiveDate::from_ymd_opt(2024, 5, day).unwrap(),
                Measurements {
                    sleep,
                    steps: 9000,
                    water_intake: 2.5,
                    weight: 70.0,
                    height: 175.0,
                    screen_time: 2.0,
                    calories_intake: 2100.0,
                },
            )
            .unwrap();
            store.append(entry).unwrap();
        }
        store
    }

    #[test]
    fn test_summary_output() {
        let tmp_dir = TempDir::new().unwrap();
        let store = create_test_store(&tmp_dir);
        let mut out = Vec::new();

        run(&store, 2024, 5, false, &mut out).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("Entries: 2"));
        assert!(text.contains("Average Sleep: 7.0 hrs"));
        assert!(text.contains("Average Steps: 9000"));
        assert!(text.contains("Average BMI: 22.9"));
        assert!(text.contains("- Great job! Your monthly stats look healthy."));
    }

    #[test]
    fn test_json_output() {
        let tmp_dir = TempDir::new().unwrap();
        let store = create_test_store(&tmp_dir);
        let mut out = Vec::new();

        run(&store, 2024, 5, true, &mut out).unwrap();

        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(value["entries"], 2);
        assert_eq!(value["sleep"], 7.0);
    }

    #[test]
    fn test_no_data_messages() {
        let tmp_dir = TempDir::new().unwrap();
        let empty = RecordStore::open(tmp_dir.path().join("empty.csv")).unwrap();
        let mut out = Vec::new();
        run(&empty, 2024, 5, false, &mut out).unwrap();
        assert!(String::from_utf8(out).unwrap().contains("No data available."));

        let store = create_test_store(&tmp_dir);
        let mut out = Vec::new();
        run(&store, 2024, 6, false, &mut out).unwrap();
        assert!(String::from_utf8(out).unwrap().contains("No data for the selected month."));
    }
}
