use crate::error::{HeatmapError, Result};
use crate::models::{ContractParams, OptionType};
use std::f64::consts::SQRT_2;

/// Standard normal cumulative distribution function.
///
/// Written in terms of `erfc` so the lower tail keeps full relative
/// precision instead of cancelling against 1.
pub fn norm_cdf(x: f64) -> f64 {
    0.5 * libm::erfc(-x / SQRT_2)
}

/// Calculate d1 parameter for Black-Scholes model
fn calculate_d1(s: f64, k: f64, t: f64, r: f64, sigma: f64) -> f64 {
    ((s / k).ln() + (r + 0.5 * sigma * sigma) * t) / (sigma * t.sqrt())
}

/// Calculate d2 parameter for Black-Scholes model
fn calculate_d2(d1: f64, sigma: f64, t: f64) -> f64 {
    d1 - sigma * t.sqrt()
}

/// `value` must be finite and strictly positive.
pub fn require_positive(name: &'static str, value: f64) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(HeatmapError::InvalidParameter { name, value })
    }
}

/// `value` must be finite; sign is free.
pub fn require_finite(name: &'static str, value: f64) -> Result<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(HeatmapError::InvalidParameter { name, value })
    }
}

/// Check the pricing domain, naming the first offending input.
pub fn check_inputs(s: f64, k: f64, t: f64, r: f64, sigma: f64) -> Result<()> {
    require_positive("spot", s)?;
    require_positive("strike", k)?;
    require_positive("maturity", t)?;
    require_positive("volatility", sigma)?;
    require_finite("rate", r)
}

/// Call and put prices for the same inputs, sharing d1/d2.
///
/// Returns `(NaN, NaN)` when the inputs fall outside the model's domain
/// (non-positive spot, strike, maturity or volatility, or a non-finite rate).
pub fn price_pair(s: f64, k: f64, t: f64, r: f64, sigma: f64) -> (f64, f64) {
    if check_inputs(s, k, t, r, sigma).is_err() {
        return (f64::NAN, f64::NAN);
    }
    let d1 = calculate_d1(s, k, t, r, sigma);
    let d2 = calculate_d2(d1, sigma, t);
    let discounted = ContractParams::new(k, t, r).discounted_strike();
    let call = s * norm_cdf(d1) - discounted * norm_cdf(d2);
    let put = discounted * norm_cdf(-d2) - s * norm_cdf(-d1);
    (call, put)
}

/// Black-Scholes European option price.
///
/// Returns `NaN` outside the pricing domain; use [`try_price`] to get the
/// reason instead.
pub fn price(kind: OptionType, s: f64, k: f64, t: f64, r: f64, sigma: f64) -> f64 {
    let (call, put) = price_pair(s, k, t, r, sigma);
    match kind {
        OptionType::Call => call,
        OptionType::Put => put,
    }
}

/// Checked variant of [`price`].
pub fn try_price(kind: OptionType, s: f64, k: f64, t: f64, r: f64, sigma: f64) -> Result<f64> {
    check_inputs(s, k, t, r, sigma)?;
    Ok(price(kind, s, k, t, r, sigma))
}
