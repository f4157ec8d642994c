//! Threshold rules turning monthly averages into tips.

use super::monthly::MonthlyAverages;


pub const SLEEP_TIP: &str = "Increase sleep to 7–8 hours.";
pub const WATER_TIP: &str = "Drink more than 2 liters of water.";
pub const STEPS_TIP: &str = "Increase steps to 8000+ for better weight control.";
pub const SCREEN_TIP: &str = "Reduce screen time below 4 hours daily.";
pub const HEALTHY_TIP: &str = "Great job! Your monthly stats look healthy.";

const MIN_SLEEP_HOURS: f64 = 7.0;
const MIN_WATER_LITERS: f64 = 2.0;
const MAX_BMI: f64 = 25.0;
const MAX_SCREEN_HOURS: f64 = 4.0;


/// Every rule is checked independently; tips come out in rule order.
pub fn recommendations(avg_sleep: f64, avg_water: f64, avg_bmi: f64, avg_screen: f64) -> Vec<&'static str> {
    let rules = [
        (avg_sleep < MIN_SLEEP_HOURS, SLEEP_TIP),
        (avg_water < MIN_WATER_LITERS, WATER_TIP),
        (avg_bmi > MAX_BMI, STEPS_TIP),
        (avg_screen > MAX_SCREEN_HOURS, SCREEN_TIP),
    ];

    let tips: Vec<&'static str> = rules
        .into_iter()
        .filter_map(|(fires, tip)| fires.then_some(tip))
        .collect();

    if tips.is_empty() {
        vec![HEALTHY_TIP]
    } else {
        tips
    }
}


/// Tips for a month's averages.
pub fn monthly_recommendations(averages: &MonthlyAverages) -> Vec<&'static str> {
    recommendations(
        averages.sleep,
        averages.water_intake,
        averages.bmi,
        averages.screen_time,
    )
}
