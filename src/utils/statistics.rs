//! Realised volatility from a series of closing prices.

use statrs::statistics::Statistics;

/// Trading days per year used to annualise daily volatility
pub const TRADING_DAYS_PER_YEAR: f64 = 252.0;

/// Daily log returns `ln(c[i] / c[i-1])`.
///
/// Pairs containing a non-positive or non-finite close are skipped.
pub fn log_returns(closes: &[f64]) -> Vec<f64> {
    closes
        .windows(2)
        .filter(|w| w.iter().all(|c| c.is_finite() && *c > 0.0))
        .map(|w| (w[1] / w[0]).ln())
        .collect()
}

/// Annualised historical volatility: population standard deviation of the
/// daily log returns scaled by `sqrt(252)`.
///
/// Returns `None` with fewer than two usable closes.
pub fn historical_volatility(closes: &[f64]) -> Option<f64> {
    let returns = log_returns(closes);
    if returns.is_empty() {
        return None;
    }
    let daily = returns.iter().population_std_dev();
    Some(daily * TRADING_DAYS_PER_YEAR.sqrt())
}
