use chrono::NaiveDate;

use crate::fees::target_roi;
use crate::model::{AnalysisConfig, AnalysisOutcome, SaleReport};
use crate::{parser, stats};

/// Maximum buy price that still hits the target ROI at the observed
/// sale velocity, rounded to 2dp.
pub fn recommend(avg_net_last10: f64, avg_days_primary: f64) -> f64 {
    let roi = target_roi(avg_days_primary);
    round2(avg_net_last10 / (1.0 + roi))
}

/// Full analysis of one paste: parse, filter, aggregate, recommend.
///
/// The only entry point the presentation layer calls. Never panics;
/// thin pastes come back as `InsufficientData` and a missing velocity
/// figure drops the recommendation but keeps the price statistics.
pub fn run(raw_text: &str, config: &AnalysisConfig, now: NaiveDate) -> AnalysisOutcome {
    let records = parser::parse(raw_text, now);
    let sales = stats::qualifying(&records, config, now);

    let aggregate = match stats::from_qualifying(&sales, config.velocity_window) {
        Some(agg) => agg,
        None => return AnalysisOutcome::InsufficientData { qualifying: sales.len() },
    };

    let roi = aggregate.avg_days_primary.map(target_roi);
    let max_pay = aggregate
        .avg_days_primary
        .map(|days| recommend(aggregate.avg_net_last10, days));

    AnalysisOutcome::Report(SaleReport {
        aggregate,
        target_roi: roi,
        max_pay,
        sales,
    })
}

fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}
