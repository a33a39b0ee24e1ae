use crate::error::{HeatmapError, Result};
use ndarray::Array1;
use serde::{Deserialize, Serialize};

/// Evenly spaced points over `[min, max]`, endpoint inclusive.
///
/// `n == 0` gives an empty axis and `n == 1` gives `[min]`. The last point
/// is pinned to `max` so rounding never shifts the upper bound.
pub fn linspace(min: f64, max: f64, n: usize) -> Array1<f64> {
    match n {
        0 => Array1::zeros(0),
        1 => Array1::from_elem(1, min),
        _ => {
            let step = (max - min) / (n - 1) as f64;
            let mut axis = Array1::from_shape_fn(n, |i| min + step * i as f64);
            axis[n - 1] = max;
            axis
        }
    }
}

/// Bounds and resolution of one heatmap axis
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AxisSpec {
    pub min: f64,
    pub max: f64,
    pub points: usize,
}

impl AxisSpec {
    pub fn new(min: f64, max: f64, points: usize) -> Self {
        Self { min, max, points }
    }

    /// Reject non-finite or reversed bounds.
    pub fn validate(&self, label: &str) -> Result<()> {
        if !self.min.is_finite() || !self.max.is_finite() {
            return Err(HeatmapError::MalformedAxis(format!(
                "{} bounds must be finite (got {}..{})",
                label, self.min, self.max
            )));
        }
        if self.min > self.max {
            return Err(HeatmapError::MalformedAxis(format!(
                "{} minimum {} exceeds maximum {}",
                label, self.min, self.max
            )));
        }
        Ok(())
    }

    pub fn build(&self, label: &str) -> Result<Array1<f64>> {
        self.validate(label)?;
        Ok(linspace(self.min, self.max, self.points))
    }
}
