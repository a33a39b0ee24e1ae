use crate::error::{HeatmapError, Result};
use crate::utils::axis::AxisSpec;
use dotenv::dotenv;
use serde::Deserialize;
use std::env;
use std::path::PathBuf;
use std::str::FromStr;

/// Configuration for the market data provider
#[derive(Debug, Clone, Deserialize)]
pub struct MarketDataConfig {
    /// Chart API base URL
    pub data_url: String,
    /// User agent sent with every request
    pub user_agent: String,
    /// History window used for the volatility estimate
    pub lookback_range: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for MarketDataConfig {
    fn default() -> Self {
        Self {
            data_url: "https://query1.finance.yahoo.com".to_string(),
            user_agent: "Mozilla/5.0 (X11; Linux x86_64) bs-heatmap/0.1".to_string(),
            lookback_range: "1mo".to_string(),
            timeout_secs: 10,
        }
    }
}

/// Default heatmap bounds, used when the caller leaves them unset
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct GridDefaults {
    pub spot_min: f64,
    pub spot_max: f64,
    pub vol_min: f64,
    pub vol_max: f64,
    /// Points per axis
    pub grid_size: usize,
}

impl Default for GridDefaults {
    fn default() -> Self {
        Self {
            spot_min: 50.0,
            spot_max: 150.0,
            vol_min: 0.2,
            vol_max: 0.5,
            grid_size: 10,
        }
    }
}

impl GridDefaults {
    pub fn spot_axis(&self) -> AxisSpec {
        AxisSpec::new(self.spot_min, self.spot_max, self.grid_size)
    }

    pub fn vol_axis(&self) -> AxisSpec {
        AxisSpec::new(self.vol_min, self.vol_max, self.grid_size)
    }
}

/// Configuration for the application
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Market data provider configuration
    pub market_data: MarketDataConfig,
    /// Default grid bounds
    pub grid: GridDefaults,
    /// Directory rendered heatmaps are written to
    pub output_dir: PathBuf,
    /// Log level
    pub log_level: String,
}

fn env_parse<T: FromStr>(key: &str, default: T) -> Result<T> {
    match env::var(key) {
        Ok(raw) => raw.trim().parse::<T>().map_err(|_| {
            HeatmapError::ConfigError(format!("{} has an invalid value: {:?}", key, raw))
        }),
        Err(_) => Ok(default),
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if it exists
        dotenv().ok();

        let market_defaults = MarketDataConfig::default();
        let grid_defaults = GridDefaults::default();

        let market_data = MarketDataConfig {
            data_url: env::var("MARKET_DATA_URL").unwrap_or(market_defaults.data_url),
            user_agent: env::var("MARKET_DATA_USER_AGENT").unwrap_or(market_defaults.user_agent),
            lookback_range: env::var("MARKET_DATA_RANGE").unwrap_or(market_defaults.lookback_range),
            timeout_secs: env_parse("MARKET_DATA_TIMEOUT_SECS", market_defaults.timeout_secs)?,
        };

        let grid = GridDefaults {
            spot_min: env_parse("HEATMAP_SPOT_MIN", grid_defaults.spot_min)?,
            spot_max: env_parse("HEATMAP_SPOT_MAX", grid_defaults.spot_max)?,
            vol_min: env_parse("HEATMAP_VOL_MIN", grid_defaults.vol_min)?,
            vol_max: env_parse("HEATMAP_VOL_MAX", grid_defaults.vol_max)?,
            grid_size: env_parse("HEATMAP_GRID_SIZE", grid_defaults.grid_size)?,
        };

        let output_dir = env::var("HEATMAP_OUTPUT_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("output"));
        let log_level = env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        Ok(Config {
            market_data,
            grid,
            output_dir,
            log_level,
        })
    }

    /// Initialize logging based on configuration
    pub fn init_logging(&self) -> Result<()> {
        use tracing_subscriber::{fmt, EnvFilter};

        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&self.log_level));

        fmt()
            .with_env_filter(filter)
            .with_target(true)
            .try_init()
            .map_err(|e| HeatmapError::ConfigError(format!("Failed to initialize logging: {}", e)))?;

        Ok(())
    }
}
