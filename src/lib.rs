//! # bs-heatmap
//!
//! Black-Scholes prices for European calls and puts, evaluated over a grid
//! of spot prices and volatilities and rendered as a pair of heatmaps.
//!
//! ## Features
//!
//! - Closed-form Black-Scholes pricing with a double-precision normal CDF
//! - Sequential and rayon-parallel grid evaluation into `ndarray` matrices
//! - Ticker lookup for last close and trailing historical volatility
//! - PNG heatmap rendering for the call and put grids
//! - Environment-based configuration
//!
//! ## Example
//!
//! ```rust,no_run
//! use bs_heatmap::models::{ContractParams, HeatmapRequest};
//! use bs_heatmap::utils::axis::AxisSpec;
//! use bs_heatmap::utils::{plot_price_heatmaps, HeatmapStyle};
//!
//! fn main() -> bs_heatmap::error::Result<()> {
//!     let request = HeatmapRequest::new(
//!         ContractParams::new(100.0, 1.0, 0.05),
//!         AxisSpec::new(50.0, 150.0, 10),
//!         AxisSpec::new(0.2, 0.5, 10),
//!     );
//!     let heatmap = request.evaluate(true)?;
//!     plot_price_heatmaps(&heatmap, &HeatmapStyle::default(), "heatmap.png")?;
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod utils;

// Re-export commonly used types
pub use api::{MarketSnapshot, RestClient};
pub use config::Config;
pub use error::{HeatmapError, Result};
pub use models::{generate_grid, ContractParams, HeatmapRequest, OptionType, PriceHeatmap};
