//! Health entry models and BMI calculations.

mod bmi;
mod health_entry;

#[allow(unused_imports)]
pub use bmi::{bmi_category, calculate_bmi, BmiCategory};
#[allow(unused_imports)]
pub use health_entry::{
    check_hours,
    check_non_negative,
    check_positive,
    HealthEntry,
    Measurements,
    MAX_DAILY_HOURS,
};
