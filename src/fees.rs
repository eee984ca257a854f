// Marketplace fee schedule and ROI targets.

// Below this gross price the marketplace charges the flat-fee-heavy
// low-value schedule.
const LOW_PRICE_CUTOFF: f64 = 57.0;

/// Seller payout after marketplace fees. Total; may be negative for
/// prices near the fee floor and is deliberately not clamped.
pub fn net_payout(price: f64) -> f64 {
    if price < LOW_PRICE_CUTOFF {
        price * 0.97 - 8.5
    } else {
        price * 0.89 - 4.0
    }
}

/// Target ROI fraction for a given average days-between-sales.
///
/// Step function: under 5 days demands 30%, 10-15 days demands 40%,
/// everything else demands 45%. Days in [5, 10) fall through to the
/// slowest tier; do not smooth this into a monotonic ladder.
pub fn target_roi(avg_days: f64) -> f64 {
    if avg_days < 5.0 {
        0.30
    } else if (10.0..=15.0).contains(&avg_days) {
        0.40
    } else {
        0.45
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn net_payout_below_cutoff() {
        let expected = 56.99 * 0.97 - 8.5;
        assert!((net_payout(56.99) - expected).abs() < 1e-9);
    }

    #[test]
    fn net_payout_at_cutoff_uses_high_schedule() {
        assert!((net_payout(57.0) - (57.0 * 0.89 - 4.0)).abs() < 1e-9);
    }

    #[test]
    fn net_payout_can_go_negative() {
        assert!(net_payout(5.0) < 0.0);
    }

    #[test]
    fn roi_tiers_and_gap_region() {
        assert_eq!(target_roi(4.9), 0.30);
        assert_eq!(target_roi(5.0), 0.45); // gap region, not 0.40
        assert_eq!(target_roi(9.99), 0.45);
        assert_eq!(target_roi(10.0), 0.40);
        assert_eq!(target_roi(15.0), 0.40);
        assert_eq!(target_roi(15.01), 0.45);
    }
}
