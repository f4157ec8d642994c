//! Body-mass index formula and category thresholds.

use std::fmt;

use serde::{Deserialize, Serialize};


/// Upper bound (exclusive) of the underweight band.
pub const UNDERWEIGHT_BELOW: f64 = 18.5;

/// Upper bound (exclusive) of the normal band.
pub const NORMAL_BELOW: f64 = 24.9;

/// Upper bound (exclusive) of the overweight band.
pub const OVERWEIGHT_BELOW: f64 = 29.9;


/// BMI band derived from a BMI value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum BmiCategory {
    Underweight,
    Normal,
    Overweight,
    Obese,
}


impl BmiCategory {
    pub const ALL: [BmiCategory; 4] = [
        BmiCategory::Underweight,
        BmiCategory::Normal,
        BmiCategory::Overweight,
        BmiCategory::Obese,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            BmiCategory::Underweight => "Underweight",
            BmiCategory::Normal => "Normal",
            BmiCategory::Overweight => "Overweight",
            BmiCategory::Obese => "Obese",
        }
    }
}


impl fmt::Display for BmiCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}


/// Compute BMI from weight in kilograms and height in centimetres.
///
/// Rounded to one decimal place, exact ties to even. Height must be positive; callers validate
/// before getting here.
pub fn calculate_bmi(weight_kg: f64, height_cm: f64) -> f64 {
    let height_m = height_cm / 100.0;
    round_to_tenth(weight_kg / (height_m * height_m))
}


/// Map a BMI value to its category.
///
/// Each band includes its lower bound. The 24.9 and 29.9 cutoffs are kept as-is.
pub fn bmi_category(bmi: f64) -> BmiCategory {
    if bmi < UNDERWEIGHT_BELOW {
        BmiCategory::Underweight
    } else if bmi < NORMAL_BELOW {
        BmiCategory::Normal
    } else if bmi < OVERWEIGHT_BELOW {
        BmiCategory::Overweight
    } else {
        BmiCategory::Obese
    }
}


fn round_to_tenth(value: f64) -> f64 {
    (value * 10.0).round_ties_even() / 10.0
}
