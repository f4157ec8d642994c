//! Application settings and path constants.

use std::path::{Path, PathBuf};


/// Default CSV file holding every recorded entry.
pub const DEFAULT_DATA_FILE: &str = "lifestyle_data.csv";

/// Default directory for monthly PDF reports.
pub const DEFAULT_REPORTS_DIR: &str = "Reports";

/// Default directory for chart images.
pub const DEFAULT_CHARTS_DIR: &str = ".";

/// Chart file names.
pub const BMI_CATEGORY_CHART: &str = "Bmi_cat.jpg";
pub const SLEEP_BMI_CHART: &str = "Sleep_bmi.jpg";
pub const STEPS_CALORIES_CHART: &str = "Steps_calories.jpg";


/// Paths used by the record store and the report generators.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub data_file: PathBuf,
    pub reports_dir: PathBuf,
    pub charts_dir: PathBuf,
}


/// Output locations of the three charts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChartPaths {
    pub bmi_categories: PathBuf,
    pub sleep_vs_bmi: PathBuf,
    pub steps_vs_calories: PathBuf,
}


impl ChartPaths {
    /// All three paths in rendering order.
    pub fn all(&self) -> [&Path; 3] {
        [&self.bmi_categories, &self.sleep_vs_bmi, &self.steps_vs_calories]
    }
}


impl Default for Settings {
    fn default() -> Self {
        Self {
            data_file: PathBuf::from(DEFAULT_DATA_FILE),
            reports_dir: PathBuf::from(DEFAULT_REPORTS_DIR),
            charts_dir: PathBuf::from(DEFAULT_CHARTS_DIR),
        }
    }
}


impl Settings {
    /// Build settings rooted at an arbitrary directory.
    #[cfg(test)]
    pub fn in_dir(root: &Path) -> Self {
        Self {
            data_file: root.join(DEFAULT_DATA_FILE),
            reports_dir: root.join(DEFAULT_REPORTS_DIR),
            charts_dir: root.to_path_buf(),
        }
    }

    /// PDF path for a given month, e.g. `Reports/Monthly_Report_2024-03.pdf`.
    pub fn report_path(&self, year: i32, month: u32) -> PathBuf {
        self.reports_dir
            .join(format!("Monthly_Report_{year}-{month:02}.pdf"))
    }

    /// Fixed chart file names inside the charts directory.
    pub fn chart_paths(&self) -> ChartPaths {
        ChartPaths {
            bmi_categories: self.charts_dir.join(BMI_CATEGORY_CHART),
            sleep_vs_bmi: self.charts_dir.join(SLEEP_BMI_CHART),
            steps_vs_calories: self.charts_dir.join(STEPS_CALORIES_CHART),
        }
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.data_file, PathBuf::from("lifestyle_data.csv"));
        assert_eq!(settings.reports_dir, PathBuf::from("Reports"));
        assert_eq!(settings.charts_dir, PathBuf::from("."));
    }

    #[test]
    fn test_report_path_zero_pads_month() {
        let settings = Settings::default();
        let path = settings.report_path(2024, 3);
        assert_eq!(path, Path::new("Reports").join("Monthly_Report_2024-03.pdf"));

        let path = settings.report_path(2023, 11);
        assert!(path.to_string_lossy().ends_with("Monthly_Report_2023-11.pdf"));
    }

    #[test]
    fn test_chart_paths() {
        let settings = Settings::in_dir(Path::new("/tmp/health"));
        let charts = settings.chart_paths();
        assert_eq!(charts.bmi_categories, Path::new("/tmp/health/Bmi_cat.jpg"));
        assert_eq!(charts.sleep_vs_bmi, Path::new("/tmp/health/Sleep_bmi.jpg"));
        assert_eq!(charts.steps_vs_calories, Path::new("/tmp/health/Steps_calories.jpg"));
    }
}
