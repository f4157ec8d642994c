//! Configuration and settings for the tracker.

mod settings;

#[allow(unused_imports)]
pub use settings::{
    ChartPaths,
    Settings,
    DEFAULT_DATA_FILE,
    DEFAULT_REPORTS_DIR,
    DEFAULT_CHARTS_DIR,
    BMI_CATEGORY_CHART,
    SLEEP_BMI_CHART,
    STEPS_CALORIES_CHART,
};
