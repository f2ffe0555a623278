//! Return-on-investment projections from earnings history
//!
//! Two estimation strategies exist in production use and are kept as an
//! explicit, named choice rather than being merged:
//!
//! - `LifetimeAverage`: daily average over every distinct earning day,
//!   confidence from how many days of history exist;
//! - `TrailingWindow`: daily average over the 7 most recent rows,
//!   confidence from how volatile that window is.
//!
//! All arithmetic is finite-safe: divisions are guarded and the
//! documented fallback value is substituted instead of propagating NaN.
//! The compounding APY extrapolation is intentionally left unclamped.

use crate::database::{Database, EarningsRecord};
use crate::logger::{self, LogTag};
use crate::prices::{AssetKind, PriceCache};
use serde::Serialize;
use std::collections::BTreeSet;
use std::sync::Arc;

/// Records considered by the trailing-window strategy
const TRAILING_WINDOW: usize = 7;

/// Days used for the monthly projection
const PROJECTION_DAYS: f64 = 30.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EstimatorStrategy {
    LifetimeAverage,
    TrailingWindow,
}

impl EstimatorStrategy {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "lifetime-average" => Some(EstimatorStrategy::LifetimeAverage),
            "trailing-window" => Some(EstimatorStrategy::TrailingWindow),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            EstimatorStrategy::LifetimeAverage => "lifetime-average",
            EstimatorStrategy::TrailingWindow => "trailing-window",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PredictionConfidence {
    #[serde(rename = "LOW")]
    Low,
    #[serde(rename = "MEDIUM")]
    Medium,
    #[serde(rename = "HIGH")]
    High,
}

/// Fully derived projection, recomputed on every request
///
/// `days_to_roi` can be positive infinity (unreachable breakeven);
/// serde_json renders non-finite floats as null.
#[derive(Debug, Clone, Serialize)]
pub struct RoiReport {
    pub total_investment: f64,
    pub total_earnings: f64,
    pub daily_average: f64,
    pub projected_monthly: f64,
    pub current_value_usd: f64,
    pub roi_percentage: f64,
    pub days_to_roi: f64,
    pub daily_apy: f64,
    pub apy: f64,
    pub prediction_confidence: PredictionConfidence,
}

pub struct RoiEstimator {
    db: Arc<Database>,
    prices: Arc<PriceCache>,
    strategy: EstimatorStrategy,
    total_investment: f64,
}

impl RoiEstimator {
    pub fn new(
        db: Arc<Database>,
        prices: Arc<PriceCache>,
        strategy: EstimatorStrategy,
        total_investment: f64,
    ) -> Self {
        Self {
            db,
            prices,
            strategy,
            total_investment,
        }
    }

    pub fn strategy(&self) -> EstimatorStrategy {
        self.strategy
    }

    /// Build the current report. Never fails: a storage error degrades
    /// to an empty history and a missing gold price is treated as zero.
    pub async fn report(&self) -> RoiReport {
        let earnings = match self.db.list_earnings().await {
            Ok(rows) => rows,
            Err(e) => {
                logger::warning(
                    LogTag::Roi,
                    &format!("Earnings read failed, reporting on empty history: {}", e),
                );
                Vec::new()
            }
        };

        let gold_price = self
            .prices
            .get(AssetKind::GoldToken, false)
            .await
            .unwrap_or(0.0);

        compute_report(self.strategy, self.total_investment, &earnings, gold_price)
    }
}

/// Pure projection math. `earnings` must be ordered most recent first,
/// as `Database::list_earnings` returns them.
pub fn compute_report(
    strategy: EstimatorStrategy,
    total_investment: f64,
    earnings: &[EarningsRecord],
    gold_price: f64,
) -> RoiReport {
    let total_earnings: f64 = earnings.iter().map(|e| e.amount).sum();

    let (daily_average, prediction_confidence) = match strategy {
        EstimatorStrategy::LifetimeAverage => lifetime_average(earnings, total_earnings),
        EstimatorStrategy::TrailingWindow => trailing_window(earnings),
    };

    let current_value_usd = total_earnings * gold_price;

    let roi_percentage = if total_investment > 0.0 {
        ((current_value_usd - total_investment) / total_investment) * 100.0
    } else {
        0.0
    };

    let projected_monthly = daily_average * PROJECTION_DAYS;
    let daily_average_usd = daily_average * gold_price;

    let days_to_roi = if daily_average_usd > 0.0 {
        (total_investment - current_value_usd).max(0.0) / daily_average_usd
    } else {
        f64::INFINITY
    };

    let (daily_apy, apy) = if total_investment > 0.0 {
        let daily_apy = (daily_average_usd / total_investment) * 100.0;
        let apy = ((1.0 + daily_apy / 100.0).powf(365.0) - 1.0) * 100.0;
        (daily_apy, apy)
    } else {
        (0.0, 0.0)
    };

    RoiReport {
        total_investment,
        total_earnings,
        daily_average,
        projected_monthly,
        current_value_usd,
        roi_percentage,
        days_to_roi,
        daily_apy,
        apy,
        prediction_confidence,
    }
}

/// Lifetime average over distinct earning days; confidence grows with
/// the length of the history.
fn lifetime_average(
    earnings: &[EarningsRecord],
    total_earnings: f64,
) -> (f64, PredictionConfidence) {
    let days_span = earnings
        .iter()
        .map(|e| e.date)
        .collect::<BTreeSet<_>>()
        .len()
        .max(1);

    let daily_average = total_earnings / days_span as f64;

    let confidence = if days_span >= 30 {
        PredictionConfidence::High
    } else if days_span >= 14 {
        PredictionConfidence::Medium
    } else {
        PredictionConfidence::Low
    };

    (daily_average, confidence)
}

/// Average of the most recent rows; confidence from the window's
/// relative standard deviation.
fn trailing_window(earnings: &[EarningsRecord]) -> (f64, PredictionConfidence) {
    let window: Vec<f64> = earnings
        .iter()
        .take(TRAILING_WINDOW)
        .map(|e| e.amount)
        .collect();

    if window.is_empty() {
        return (0.0, PredictionConfidence::Low);
    }

    let len = window.len() as f64;
    let mean = window.iter().sum::<f64>() / len;

    if mean <= 0.0 {
        return (mean, PredictionConfidence::Low);
    }

    let variance = window.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / len;
    let stddev = variance.sqrt();

    let confidence = if stddev < mean * 0.2 {
        PredictionConfidence::High
    } else if stddev < mean * 0.5 {
        PredictionConfidence::Medium
    } else {
        PredictionConfidence::Low
    };

    (mean, confidence)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn record(date: &str, amount: f64) -> EarningsRecord {
        EarningsRecord {
            id: 0,
            date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
            amount,
            source: "Quest".to_string(),
        }
    }

    fn approx(a: f64, b: f64) {
        assert!((a - b).abs() < 1e-9, "{} != {}", a, b);
    }

    #[test]
    fn test_lifetime_average_worked_example() {
        let earnings = vec![record("2024-01-02", 150.0), record("2024-01-01", 100.0)];
        let report = compute_report(
            EstimatorStrategy::LifetimeAverage,
            475.0,
            &earnings,
            0.1,
        );

        approx(report.total_earnings, 250.0);
        approx(report.daily_average, 125.0);
        approx(report.current_value_usd, 25.0);
        approx(report.roi_percentage, ((25.0 - 475.0) / 475.0) * 100.0);
        approx(report.projected_monthly, 3750.0);
        // (475 - 25) / (125 * 0.1) days to breakeven
        approx(report.days_to_roi, 36.0);
        assert_eq!(report.prediction_confidence, PredictionConfidence::Low);
    }

    #[test]
    fn test_distinct_dates_counted_once() {
        let earnings = vec![
            record("2024-01-01", 100.0),
            record("2024-01-01", 50.0),
            record("2024-01-02", 150.0),
        ];
        let report = compute_report(
            EstimatorStrategy::LifetimeAverage,
            475.0,
            &earnings,
            0.1,
        );

        approx(report.total_earnings, 300.0);
        approx(report.daily_average, 150.0);
    }

    #[test]
    fn test_empty_history_lifetime() {
        let report = compute_report(EstimatorStrategy::LifetimeAverage, 475.0, &[], 0.1);

        approx(report.total_earnings, 0.0);
        approx(report.daily_average, 0.0);
        assert!(report.days_to_roi.is_infinite());
        assert_eq!(report.prediction_confidence, PredictionConfidence::Low);
    }

    #[test]
    fn test_empty_history_trailing() {
        let report = compute_report(EstimatorStrategy::TrailingWindow, 475.0, &[], 0.1);

        approx(report.daily_average, 0.0);
        assert!(report.days_to_roi.is_infinite());
        assert_eq!(report.prediction_confidence, PredictionConfidence::Low);
    }

    #[test]
    fn test_zero_investment_never_nan() {
        let earnings = vec![record("2024-01-01", 100.0)];
        let report = compute_report(EstimatorStrategy::LifetimeAverage, 0.0, &earnings, 0.1);

        assert_eq!(report.roi_percentage, 0.0);
        assert_eq!(report.daily_apy, 0.0);
        assert_eq!(report.apy, 0.0);
        assert!(!report.roi_percentage.is_nan());
        // Positive daily USD income with nothing left to recover
        approx(report.days_to_roi, 0.0);
    }

    #[test]
    fn test_zero_gold_price_means_unreachable_breakeven() {
        let earnings = vec![record("2024-01-01", 100.0)];
        let report = compute_report(EstimatorStrategy::LifetimeAverage, 475.0, &earnings, 0.0);

        approx(report.current_value_usd, 0.0);
        assert!(report.days_to_roi.is_infinite());
    }

    #[test]
    fn test_days_to_roi_clamped_at_zero_after_breakeven() {
        // Earnings already worth more than the investment
        let earnings = vec![record("2024-01-01", 10_000.0)];
        let report = compute_report(EstimatorStrategy::LifetimeAverage, 475.0, &earnings, 0.1);

        approx(report.days_to_roi, 0.0);
        assert!(report.roi_percentage > 0.0);
    }

    #[test]
    fn test_confidence_bands_by_days_span() {
        let mut earnings = Vec::new();
        for day in 1..=14 {
            earnings.push(record(&format!("2024-01-{:02}", day), 10.0));
        }
        let report = compute_report(
            EstimatorStrategy::LifetimeAverage,
            475.0,
            &earnings,
            0.1,
        );
        assert_eq!(report.prediction_confidence, PredictionConfidence::Medium);

        for day in 1..=16 {
            earnings.push(record(&format!("2024-02-{:02}", day), 10.0));
        }
        let report = compute_report(
            EstimatorStrategy::LifetimeAverage,
            475.0,
            &earnings,
            0.1,
        );
        assert_eq!(report.prediction_confidence, PredictionConfidence::High);
    }

    #[test]
    fn test_trailing_window_uses_recent_records_only() {
        // Ten days of history, most recent first; the window covers the
        // seven most recent rows (amount 40), the older 100s are ignored
        // for the average but still count toward totals.
        let mut earnings = Vec::new();
        for day in (4..=10).rev() {
            earnings.push(record(&format!("2024-01-{:02}", day), 40.0));
        }
        for day in (1..=3).rev() {
            earnings.push(record(&format!("2024-01-{:02}", day), 100.0));
        }

        let report = compute_report(
            EstimatorStrategy::TrailingWindow,
            475.0,
            &earnings,
            0.1,
        );

        approx(report.daily_average, 40.0);
        approx(report.total_earnings, 7.0 * 40.0 + 3.0 * 100.0);
        // Identical window values: zero deviation, high confidence
        assert_eq!(report.prediction_confidence, PredictionConfidence::High);
    }

    #[test]
    fn test_trailing_window_confidence_degrades_with_volatility() {
        let earnings = vec![
            record("2024-01-07", 1.0),
            record("2024-01-06", 200.0),
            record("2024-01-05", 3.0),
            record("2024-01-04", 150.0),
            record("2024-01-03", 2.0),
            record("2024-01-02", 180.0),
            record("2024-01-01", 1.0),
        ];
        let report = compute_report(
            EstimatorStrategy::TrailingWindow,
            475.0,
            &earnings,
            0.1,
        );
        assert_eq!(report.prediction_confidence, PredictionConfidence::Low);
    }

    #[test]
    fn test_apy_compounds_daily_rate() {
        let earnings = vec![record("2024-01-01", 100.0)];
        let report = compute_report(EstimatorStrategy::LifetimeAverage, 475.0, &earnings, 0.1);

        // daily_apy = (10 / 475) * 100
        approx(report.daily_apy, (10.0 / 475.0) * 100.0);
        let expected = ((1.0 + report.daily_apy / 100.0).powf(365.0) - 1.0) * 100.0;
        approx(report.apy, expected);
        assert!(report.apy.is_finite());
    }

    #[test]
    fn test_strategy_names_round_trip() {
        assert_eq!(
            EstimatorStrategy::from_name("lifetime-average"),
            Some(EstimatorStrategy::LifetimeAverage)
        );
        assert_eq!(
            EstimatorStrategy::from_name("trailing-window"),
            Some(EstimatorStrategy::TrailingWindow)
        );
        assert_eq!(EstimatorStrategy::from_name("weekly"), None);
    }
}
