use statrs::statistics::Statistics;
use chrono::{Duration, NaiveDate};

use crate::fees::net_payout;
use crate::model::{AggregateResult, AnalysisConfig, PriceBound, SaleRecord};

/// Sales older than this never count, regardless of price.
pub const RECENCY_WINDOW_DAYS: i64 = 120;

// A days-between figure needs at least one gap.
const MIN_VELOCITY_RECORDS: usize = 2;

/// Apply the price and recency filters, newest sale first.
pub fn qualifying(
    records: &[SaleRecord],
    config: &AnalysisConfig,
    now: NaiveDate,
) -> Vec<SaleRecord> {
    let cutoff = now - Duration::days(RECENCY_WINDOW_DAYS);

    let mut kept: Vec<SaleRecord> = records
        .iter()
        .copied()
        .filter(|r| match config.price_bound {
            PriceBound::Inclusive => r.price >= config.min_price,
            PriceBound::Exclusive => r.price > config.min_price,
        })
        .filter(|r| r.date >= cutoff)
        .collect();

    kept.sort_by(|a, b| b.date.cmp(&a.date));
    kept
}

/// Filter and aggregate in one step. None when fewer than 2 sales qualify.
pub fn aggregate(
    records: &[SaleRecord],
    config: &AnalysisConfig,
    now: NaiveDate,
) -> Option<AggregateResult> {
    let kept = qualifying(records, config, now);
    from_qualifying(&kept, config.velocity_window)
}

/// Aggregate over already-filtered sales (must be date-descending).
///
/// Every figure is computed from this same subset: `avg_net_last10` and the
/// velocity windows all slice the front of the date-descending list. A
/// velocity window below 2 yields no velocity rather than an error.
pub fn from_qualifying(kept: &[SaleRecord], velocity_window: usize) -> Option<AggregateResult> {
    if kept.len() < 2 {
        return None;
    }

    let count = kept.len();
    let avg_price = kept.iter().map(|r| r.price).mean();
    let avg_net = kept.iter().map(|r| net_payout(r.price)).mean();

    let last10 = &kept[..count.min(10)];
    let avg_net_last10 = last10.iter().map(|r| net_payout(r.price)).mean();

    let avg_days_primary = if velocity_window >= MIN_VELOCITY_RECORDS {
        avg_gap_days(&kept[..count.min(velocity_window)])
    } else {
        None
    };
    let avg_days_last10 = avg_gap_days(last10);
    let avg_days_last50 = if count >= 50 {
        avg_gap_days(&kept[..50])
    } else {
        None
    };

    Some(AggregateResult {
        count,
        avg_price,
        avg_net,
        avg_net_last10,
        avg_days_primary,
        avg_days_last10,
        avg_days_last50,
    })
}

/// Mean gap in days between consecutive sales of a date-descending slice,
/// rounded to one decimal. None below 2 records.
fn avg_gap_days(desc: &[SaleRecord]) -> Option<f64> {
    if desc.len() < MIN_VELOCITY_RECORDS {
        return None;
    }
    let gaps: Vec<f64> = desc
        .windows(2)
        .map(|w| (w[0].date - w[1].date).num_days() as f64)
        .collect();
    Some((gaps.mean() * 10.0).round() / 10.0)
}
