//! Aggregation layer for monthly statistics and tips.

mod monthly;
mod recommendations;

#[allow(unused_imports)]
pub use monthly::{
    MonthlyAverages,
    filter_by_month,
    monthly_averages,
    summarize_month,
    category_counts,
};
#[allow(unused_imports)]
pub use recommendations::{
    recommendations,
    monthly_recommendations,
    HEALTHY_TIP,
};
