//! Daily health entry model and input validation.

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};

use super::bmi::{bmi_category, calculate_bmi, BmiCategory};
use crate::error::{HealthError, Result};


/// Hours in a day; upper bound for sleep and screen time.
pub const MAX_DAILY_HOURS: f64 = 24.0;


/// Raw measurements for one day, as entered by the user.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Measurements {
    pub sleep: f64,
    pub steps: u32,
    pub water_intake: f64,
    pub weight: f64,
    pub height: f64,
    pub screen_time: f64,
    pub calories_intake: f64,
}


/// One row of the persisted table.
///
/// `bmi` and `bmi_category` are derived when the entry is recorded and are
/// never recomputed afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthEntry {
    #[serde(rename = "Date")]
    pub date: NaiveDate,
    #[serde(rename = "Sleep")]
    pub sleep: f64,
    #[serde(rename = "Steps", deserialize_with = "deserialize_steps")]
    pub steps: u32,
    #[serde(rename = "Water Intake")]
    pub water_intake: f64,
    #[serde(rename = "Weight")]
    pub weight: f64,
    #[serde(rename = "Height")]
    pub height: f64,
    #[serde(rename = "Screen Time")]
    pub screen_time: f64,
    #[serde(rename = "Calories Intake")]
    pub calories_intake: f64,
    #[serde(rename = "BMI")]
    pub bmi: f64,
    #[serde(rename = "BMI_Category")]
    pub bmi_category: BmiCategory,
}


impl HealthEntry {
    /// Validate measurements and derive BMI for a new entry.
    pub fn record(date: NaiveDate, m: Measurements) -> Result<Self> {
        m.validate()?;

        let bmi = calculate_bmi(m.weight, m.height);
        Ok(Self {
            date,
            sleep: m.sleep,
            steps: m.steps,
            water_intake: m.water_intake,
            weight: m.weight,
            height: m.height,
            screen_time: m.screen_time,
            calories_intake: m.calories_intake,
            bmi,
            bmi_category: bmi_category(bmi),
        })
    }
}


impl Measurements {
    /// Check every field against its allowed range.
    pub fn validate(&self) -> Result<()> {
        check_hours("sleep", self.sleep)?;
        check_non_negative("water intake", self.water_intake)?;
        check_positive("weight", self.weight)?;
        check_positive("height", self.height)?;
        check_hours("screen time", self.screen_time)?;
        check_non_negative("calories intake", self.calories_intake)?;
        Ok(())
    }
}


/// Reject NaN, infinities and negative values.
pub fn check_non_negative(field: &'static str, value: f64) -> Result<f64> {
    if !value.is_finite() {
        return Err(HealthError::invalid(field, "must be a finite number"));
    }
    if value < 0.0 {
        return Err(HealthError::invalid(field, format!("{value} is negative")));
    }
    Ok(value)
}


/// Reject anything that is not strictly positive.
pub fn check_positive(field: &'static str, value: f64) -> Result<f64> {
    check_non_negative(field, value)?;
    if value == 0.0 {
        return Err(HealthError::invalid(field, "must be greater than zero"));
    }
    Ok(value)
}


/// Hours within a single day.
pub fn check_hours(field: &'static str, value: f64) -> Result<f64> {
    check_non_negative(field, value)?;
    if value > MAX_DAILY_HOURS {
        return Err(HealthError::invalid(
            field,
            format!("{value} exceeds {MAX_DAILY_HOURS} hours"),
        ));
    }
    Ok(value)
}


/// Accept `8000` as well as `8000.0`, which dataframe tools tend to write.
fn deserialize_steps<'de, D>(deserializer: D) -> std::result::Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = f64::deserialize(deserializer)?;
    if !raw.is_finite() || raw < 0.0 || raw.fract() != 0.0 || raw > u32::MAX as f64 {
        return Err(serde::de::Error::custom(format!("invalid step count: {raw}")));
    }
    Ok(raw as u32)
}
