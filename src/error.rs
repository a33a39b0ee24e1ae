use thiserror::Error;

/// Custom error types for the bs-heatmap library
#[derive(Error, Debug)]
pub enum HeatmapError {
    #[error("Invalid parameter: {name} = {value} (must be strictly positive and finite)")]
    InvalidParameter { name: &'static str, value: f64 },

    #[error("Malformed axis: {0}")]
    MalformedAxis(String),

    #[error("Market data error: {0}")]
    MarketData(String),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Plot error: {0}")]
    Plot(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serde error: {0}")]
    SerdeError(#[from] serde_json::Error),
}

impl HeatmapError {
    /// True for errors caused by bad caller input rather than a failure of
    /// the system itself.
    pub fn is_invalid_input(&self) -> bool {
        matches!(
            self,
            HeatmapError::InvalidParameter { .. } | HeatmapError::MalformedAxis(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, HeatmapError>;
