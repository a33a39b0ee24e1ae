//! Market data client
//!
//! Looks up the last close and trailing historical volatility for a ticker,
//! used to suggest strike and volatility inputs for a heatmap.

mod rest;

pub use rest::{ChartResponse, MarketSnapshot, RestClient};
