//! Data models for option contracts and price heatmaps
//!
//! This module contains the contract terms shared across a heatmap and the
//! call/put price grids built from them.

pub mod heatmap;
mod option;

pub use heatmap::{
    generate_grid, generate_grid_parallel, generate_grid_parallel_view, generate_grid_view,
    HeatmapRequest, PriceHeatmap,
};
pub use option::*;
