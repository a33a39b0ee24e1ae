use crate::config::MarketDataConfig;
use crate::error::{HeatmapError, Result};
use crate::utils::statistics::historical_volatility;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChartResponse {
    pub chart: Chart,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Chart {
    #[serde(default)]
    pub result: Option<Vec<ChartResult>>,
    #[serde(default)]
    pub error: Option<ChartError>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChartError {
    pub code: String,
    pub description: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChartResult {
    pub meta: ChartMeta,
    #[serde(default)]
    pub timestamp: Vec<i64>,
    pub indicators: Indicators,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChartMeta {
    pub symbol: String,
    #[serde(rename = "regularMarketPrice")]
    pub regular_market_price: Option<f64>,
    pub currency: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Indicators {
    #[serde(default)]
    pub quote: Vec<QuoteIndicator>,
}

// Yahoo leaves gaps in the series as nulls
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuoteIndicator {
    #[serde(default)]
    pub close: Vec<Option<f64>>,
}

/// Last close and trailing annualised volatility for one ticker
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarketSnapshot {
    pub symbol: String,
    /// Most recent daily close
    pub last_price: f64,
    /// Annualised historical volatility of daily log returns
    pub volatility: f64,
    /// Number of closes the volatility was computed from
    pub observations: usize,
    /// Time of the most recent close, when the provider reported one
    pub as_of: Option<DateTime<Utc>>,
}

impl MarketSnapshot {
    /// Build a snapshot from a decoded chart response.
    pub fn from_chart(response: ChartResponse) -> Result<Self> {
        if let Some(err) = response.chart.error {
            return Err(HeatmapError::MarketData(format!(
                "{}: {}",
                err.code, err.description
            )));
        }

        let result = response
            .chart
            .result
            .and_then(|r| r.into_iter().next())
            .ok_or_else(|| HeatmapError::MarketData("No chart data returned".to_string()))?;

        let series = result
            .indicators
            .quote
            .first()
            .map(|q| q.close.as_slice())
            .unwrap_or(&[]);

        let mut closes = Vec::with_capacity(series.len());
        let mut last_ts = None;
        for (i, close) in series.iter().enumerate() {
            if let Some(c) = close {
                closes.push(*c);
                last_ts = result.timestamp.get(i).copied();
            }
        }

        let last_price = *closes.last().ok_or_else(|| {
            HeatmapError::MarketData(format!("No closing prices for {}", result.meta.symbol))
        })?;
        let volatility = historical_volatility(&closes).ok_or_else(|| {
            HeatmapError::MarketData(format!(
                "Need at least two closes for {} to estimate volatility",
                result.meta.symbol
            ))
        })?;

        Ok(Self {
            symbol: result.meta.symbol,
            last_price,
            volatility,
            observations: closes.len(),
            as_of: last_ts.and_then(|ts| DateTime::from_timestamp(ts, 0)),
        })
    }
}

/// Client for the Yahoo Finance chart endpoint
pub struct RestClient {
    client: reqwest::Client,
    config: MarketDataConfig,
}

impl RestClient {
    pub fn new(config: MarketDataConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self { client, config })
    }

    /// Fetch the daily chart for `symbol` over `range` (e.g. "1mo").
    pub async fn get_daily_chart(&self, symbol: &str, range: &str) -> Result<ChartResponse> {
        debug!("Getting daily chart for {} over {}", symbol, range);
        let url = format!("{}/v8/finance/chart/{}", self.config.data_url, symbol);
        let resp = self
            .client
            .get(&url)
            .query(&[("range", range), ("interval", "1d")])
            .send()
            .await?
            .error_for_status()?;
        let chart = resp.json::<ChartResponse>().await.map_err(|e| {
            HeatmapError::MarketData(format!("Failed to parse chart for {}: {}", symbol, e))
        })?;
        Ok(chart)
    }

    /// Last close and one-month trailing volatility for `symbol`.
    pub async fn get_snapshot(&self, symbol: &str) -> Result<MarketSnapshot> {
        info!("Getting market snapshot for {}", symbol);
        let chart = self.get_daily_chart(symbol, &self.config.lookback_range).await?;
        MarketSnapshot::from_chart(chart)
    }
}
