use crate::ledger::CalorieTracker;
use crate::models::SummaryResponse;
use crate::storage::Store;
use chrono::{Local, NaiveDate};

pub fn build_summary<S: Store>(tracker: &CalorieTracker<S>) -> SummaryResponse {
    build_summary_at(Local::now().date_naive(), tracker)
}

pub fn build_summary_at<S: Store>(today: NaiveDate, tracker: &CalorieTracker<S>) -> SummaryResponse {
    let progress = tracker.progress_fraction();

    SummaryResponse {
        date: today.format("%Y-%m-%d").to_string(),
        calorie_limit: tracker.calorie_limit(),
        total_calories: tracker.total_calories(),
        consumed: tracker.consumed(),
        burned: tracker.burned(),
        remaining: tracker.remaining(),
        progress,
        // bar width; a net-negative day draws an empty bar
        progress_percent: (progress * 100.0).max(0.0),
        over_limit: tracker.is_over_limit(),
    }
}
