use chrono::NaiveDate;
use serde::{Serialize, Deserialize};

/// One extracted sale: calendar day + gross price in pounds.
/// Duplicates (same date and price) are legal and kept.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SaleRecord {
    pub date: NaiveDate,
    pub price: f64,
}

/// How the minimum-price threshold is compared.
/// Inclusive (`>=`) is the default; Exclusive (`>`) drops sales at
/// exactly the threshold.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PriceBound {
    Inclusive,
    Exclusive,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AnalysisConfig {
    pub min_price: f64,
    pub price_bound: PriceBound,
    /// How many most-recent sales feed the primary days-between figure.
    /// Must be at least 2 to produce a velocity at all.
    pub velocity_window: usize,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        AnalysisConfig {
            min_price: 0.0,
            price_bound: PriceBound::Inclusive,
            velocity_window: 10,
        }
    }
}

/// Statistics over the qualifying (price- and recency-filtered) sales.
/// Recomputed from scratch on every analysis; never persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct AggregateResult {
    pub count: usize,
    pub avg_price: f64,
    pub avg_net: f64,
    /// Mean net payout over the 10 most recent sales (all of them when
    /// fewer than 10 qualify).
    pub avg_net_last10: f64,
    /// Mean days between consecutive sales over the velocity window.
    /// None when the window holds fewer than 2 records.
    pub avg_days_primary: Option<f64>,
    pub avg_days_last10: Option<f64>,
    /// Omitted entirely when fewer than 50 sales qualify.
    pub avg_days_last50: Option<f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SaleReport {
    pub aggregate: AggregateResult,
    /// Target ROI fraction; None when no velocity figure exists.
    pub target_roi: Option<f64>,
    /// Recommended maximum buy price, 2dp; None when no velocity exists.
    pub max_pay: Option<f64>,
    /// Qualifying sales, most recent first (for the chart and table).
    pub sales: Vec<SaleRecord>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum AnalysisOutcome {
    /// Fewer than 2 sales survived the price/recency filters.
    InsufficientData { qualifying: usize },
    Report(SaleReport),
}
