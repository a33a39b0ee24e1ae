//! Call and put price grids over spot price and volatility
//!
//! Rows follow the volatility axis and columns follow the spot axis, so
//! `calls[[j, i]]` is the call price at `(spots[i], vols[j])`.

use crate::error::Result;
use crate::models::option::ContractParams;
use crate::utils::axis::AxisSpec;
use crate::utils::price_pair;
use ndarray::{Array1, Array2, ArrayView1};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::debug;

fn price_row(params: &ContractParams, spots: ArrayView1<f64>, sigma: f64) -> (Vec<f64>, Vec<f64>) {
    spots
        .iter()
        .map(|&s| price_pair(s, params.strike, params.maturity, params.rate, sigma))
        .unzip()
}

fn assemble(rows: Vec<(Vec<f64>, Vec<f64>)>, n_cols: usize) -> (Array2<f64>, Array2<f64>) {
    let mut calls = Array2::zeros((rows.len(), n_cols));
    let mut puts = Array2::zeros((rows.len(), n_cols));
    for (j, (call_row, put_row)) in rows.iter().enumerate() {
        calls.row_mut(j).assign(&ArrayView1::from(call_row.as_slice()));
        puts.row_mut(j).assign(&ArrayView1::from(put_row.as_slice()));
    }
    (calls, puts)
}

/// Evaluate Black-Scholes call and put prices on every `(spot, vol)` pair.
///
/// Returns `(calls, puts)`, each shaped `(vol_axis.len(), spot_axis.len())`.
/// An empty axis yields empty matrices. Cells outside the pricing domain
/// (a zero or negative spot or volatility, for instance) hold `NaN` and the
/// sweep continues.
pub fn generate_grid(
    params: &ContractParams,
    spot_axis: &[f64],
    vol_axis: &[f64],
) -> (Array2<f64>, Array2<f64>) {
    generate_grid_view(params, ArrayView1::from(spot_axis), ArrayView1::from(vol_axis))
}

/// Row-parallel [`generate_grid`] on the rayon pool.
///
/// Produces matrices bit-identical to the sequential version.
pub fn generate_grid_parallel(
    params: &ContractParams,
    spot_axis: &[f64],
    vol_axis: &[f64],
) -> (Array2<f64>, Array2<f64>) {
    generate_grid_parallel_view(params, ArrayView1::from(spot_axis), ArrayView1::from(vol_axis))
}

/// [`generate_grid`] over axis views of any memory layout.
pub fn generate_grid_view(
    params: &ContractParams,
    spots: ArrayView1<f64>,
    vols: ArrayView1<f64>,
) -> (Array2<f64>, Array2<f64>) {
    let rows = vols
        .iter()
        .map(|&sigma| price_row(params, spots, sigma))
        .collect();
    assemble(rows, spots.len())
}

/// [`generate_grid_parallel`] over axis views of any memory layout.
pub fn generate_grid_parallel_view(
    params: &ContractParams,
    spots: ArrayView1<f64>,
    vols: ArrayView1<f64>,
) -> (Array2<f64>, Array2<f64>) {
    let rows = (0..vols.len())
        .into_par_iter()
        .map(|j| price_row(params, spots, vols[j]))
        .collect();
    assemble(rows, spots.len())
}

/// Black-Scholes price heatmap for one set of contract terms
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PriceHeatmap {
    /// Contract terms shared by every cell
    pub params: ContractParams,
    /// Spot price axis (columns)
    pub spots: Array1<f64>,
    /// Volatility axis (rows)
    pub vols: Array1<f64>,
    /// Call prices (vols x spots)
    pub calls: Array2<f64>,
    /// Put prices (vols x spots)
    pub puts: Array2<f64>,
}

impl PriceHeatmap {
    pub fn generate(params: ContractParams, spots: Array1<f64>, vols: Array1<f64>) -> Self {
        let (calls, puts) = generate_grid_view(&params, spots.view(), vols.view());
        Self {
            params,
            spots,
            vols,
            calls,
            puts,
        }
    }

    pub fn generate_parallel(params: ContractParams, spots: Array1<f64>, vols: Array1<f64>) -> Self {
        let (calls, puts) = generate_grid_parallel_view(&params, spots.view(), vols.view());
        Self {
            params,
            spots,
            vols,
            calls,
            puts,
        }
    }

    /// (rows, columns) = (volatility points, spot points)
    pub fn shape(&self) -> (usize, usize) {
        (self.vols.len(), self.spots.len())
    }

    pub fn is_empty(&self) -> bool {
        self.calls.is_empty()
    }

    /// Number of cells that fell outside the pricing domain
    pub fn invalid_cells(&self) -> usize {
        self.calls.iter().filter(|v| !v.is_finite()).count()
    }
}

/// A validated unit of work: contract terms plus both axis specifications
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HeatmapRequest {
    pub params: ContractParams,
    pub spot_axis: AxisSpec,
    pub vol_axis: AxisSpec,
}

impl HeatmapRequest {
    pub fn new(params: ContractParams, spot_axis: AxisSpec, vol_axis: AxisSpec) -> Self {
        Self {
            params,
            spot_axis,
            vol_axis,
        }
    }

    /// Validate the request and evaluate it.
    ///
    /// Bad contract terms or malformed axes are reported up front; cells
    /// that are still outside the domain (a zero spot bound, say) come back
    /// as `NaN`.
    pub fn evaluate(&self, parallel: bool) -> Result<PriceHeatmap> {
        self.params.validate()?;
        let spots = self.spot_axis.build("spot")?;
        let vols = self.vol_axis.build("volatility")?;

        debug!(
            "Evaluating {}x{} grid (strike {}, maturity {}, rate {}, parallel {})",
            vols.len(),
            spots.len(),
            self.params.strike,
            self.params.maturity,
            self.params.rate,
            parallel
        );

        let heatmap = if parallel {
            PriceHeatmap::generate_parallel(self.params, spots, vols)
        } else {
            PriceHeatmap::generate(self.params, spots, vols)
        };
        Ok(heatmap)
    }
}
