//! Command-line front end for bs-heatmap
//!
//! Collects contract terms and grid bounds, evaluates the call and put
//! price grids and writes them out as a PNG heatmap (and optionally JSON).
//! A `--ticker` lookup only suggests inputs; if it fails the grid is still
//! computed.

use bs_heatmap::api::RestClient;
use bs_heatmap::config::Config;
use bs_heatmap::error::Result;
use bs_heatmap::models::{ContractParams, HeatmapRequest};
use bs_heatmap::utils::axis::AxisSpec;
use bs_heatmap::utils::{plot_price_heatmaps, HeatmapStyle};
use clap::Parser;
use std::path::{Path, PathBuf};
use tracing::{error, info, warn};

#[derive(Parser)]
#[command(name = "bs-heatmap")]
#[command(about = "Black-Scholes call/put price heatmaps over spot and volatility")]
struct Args {
    /// Strike price
    #[arg(long)]
    strike: f64,

    /// Time to maturity in years
    #[arg(long)]
    maturity: f64,

    /// Risk-free rate as a decimal (0.05 = 5%)
    #[arg(long, allow_negative_numbers = true)]
    rate: f64,

    #[arg(long)]
    spot_min: Option<f64>,

    #[arg(long)]
    spot_max: Option<f64>,

    #[arg(long)]
    vol_min: Option<f64>,

    #[arg(long)]
    vol_max: Option<f64>,

    /// Points per axis
    #[arg(long)]
    grid_size: Option<usize>,

    /// Print each cell's price on the heatmap
    #[arg(long)]
    annotate: bool,

    /// Evaluate grid rows on the rayon thread pool
    #[arg(long)]
    parallel: bool,

    /// Output PNG path (defaults to <output dir>/price_heatmap.png)
    #[arg(long, short)]
    output: Option<PathBuf>,

    /// Also write the grids as JSON to this path
    #[arg(long)]
    json: Option<PathBuf>,

    /// Look up the last price and historical volatility for this ticker
    #[arg(long)]
    ticker: Option<String>,
}

async fn suggest_from_ticker(config: &Config, ticker: &str) {
    let client = match RestClient::new(config.market_data.clone()) {
        Ok(c) => c,
        Err(e) => {
            warn!("Could not create market data client: {}", e);
            return;
        }
    };
    match client.get_snapshot(ticker).await {
        Ok(snapshot) => info!(
            "{}: last price {:.2}, historical volatility {:.2}% over {} closes",
            snapshot.symbol,
            snapshot.last_price,
            snapshot.volatility * 100.0,
            snapshot.observations
        ),
        Err(e) => warn!("Failed to fetch market data for {}: {}", ticker, e),
    }
}

/// Evaluate `request` and write the PNG (and optional JSON).
///
/// Invalid input is logged and skipped with `Ok(None)`, leaving no output
/// behind. Any other failure is returned. On success the PNG path is
/// returned.
fn run_heatmap(
    request: &HeatmapRequest,
    parallel: bool,
    style: &HeatmapStyle,
    output_path: &Path,
    json_path: Option<&Path>,
) -> Result<Option<PathBuf>> {
    let heatmap = match request.evaluate(parallel) {
        Ok(h) => h,
        Err(e) if e.is_invalid_input() => {
            // Bad inputs suppress the heatmap rather than rendering garbage
            warn!("Skipping heatmap: {}", e);
            return Ok(None);
        }
        Err(e) => {
            error!("Heatmap evaluation failed: {}", e);
            return Err(e);
        }
    };

    let (rows, cols) = heatmap.shape();
    info!("Computed {}x{} price grid", rows, cols);
    let invalid = heatmap.invalid_cells();
    if invalid > 0 {
        warn!("{} cells fell outside the pricing domain and are NaN", invalid);
    }

    if heatmap.is_empty() {
        warn!("Grid is empty, nothing to render");
        return Ok(None);
    }

    if let Err(e) = plot_price_heatmaps(&heatmap, style, output_path) {
        error!("Failed to render heatmap: {}", e);
        return Err(e);
    }
    info!("Heatmap saved to {:?}", output_path);

    if let Some(json_path) = json_path {
        let file = std::fs::File::create(json_path)?;
        serde_json::to_writer_pretty(std::io::BufWriter::new(file), &heatmap)?;
        info!("Price grids saved to {:?}", json_path);
    }

    Ok(Some(output_path.to_path_buf()))
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let config = Config::from_env()?;
    config.init_logging()?;

    info!("Starting bs-heatmap");

    if let Some(ticker) = args.ticker.as_deref() {
        suggest_from_ticker(&config, ticker).await;
    }

    let grid = config.grid;
    let points = args.grid_size.unwrap_or(grid.grid_size);
    let request = HeatmapRequest::new(
        ContractParams::new(args.strike, args.maturity, args.rate),
        AxisSpec::new(
            args.spot_min.unwrap_or(grid.spot_min),
            args.spot_max.unwrap_or(grid.spot_max),
            points,
        ),
        AxisSpec::new(
            args.vol_min.unwrap_or(grid.vol_min),
            args.vol_max.unwrap_or(grid.vol_max),
            points,
        ),
    );

    let output_path = match args.output {
        Some(path) => path,
        None => {
            std::fs::create_dir_all(&config.output_dir)?;
            config.output_dir.join("price_heatmap.png")
        }
    };
    let style = HeatmapStyle {
        annotate: args.annotate,
        ..HeatmapStyle::default()
    };
    run_heatmap(
        &request,
        args.parallel,
        &style,
        &output_path,
        args.json.as_deref(),
    )?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use bs_heatmap::error::HeatmapError;
    use tempfile::tempdir;

    fn request(maturity: f64, vol_min: f64, vol_max: f64) -> HeatmapRequest {
        HeatmapRequest::new(
            ContractParams::new(100.0, maturity, 0.05),
            AxisSpec::new(50.0, 150.0, 5),
            AxisSpec::new(vol_min, vol_max, 5),
        )
    }

    fn small_style() -> HeatmapStyle {
        HeatmapStyle {
            width: 600,
            height: 300,
            annotate: false,
        }
    }

    #[test]
    fn test_invalid_input_is_skipped_without_output() {
        let dir = tempdir().unwrap();
        let png = dir.path().join("heatmap.png");
        let json = dir.path().join("heatmap.json");

        let bad_terms = request(0.0, 0.2, 0.5);
        let result = run_heatmap(&bad_terms, false, &small_style(), &png, Some(&json));
        assert!(matches!(result, Ok(None)));

        let reversed_axis = request(1.0, 0.5, 0.2);
        let result = run_heatmap(&reversed_axis, true, &small_style(), &png, Some(&json));
        assert!(matches!(result, Ok(None)));

        assert!(!png.exists());
        assert!(!json.exists());
    }

    #[test]
    fn test_valid_request_writes_png_and_json() {
        let dir = tempdir().unwrap();
        let png = dir.path().join("heatmap.png");
        let json = dir.path().join("heatmap.json");

        let written = run_heatmap(&request(1.0, 0.2, 0.5), false, &small_style(), &png, Some(&json))
            .unwrap();
        assert_eq!(written.as_deref(), Some(png.as_path()));
        assert!(std::fs::metadata(&png).unwrap().len() > 0);

        let value: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&json).unwrap()).unwrap();
        assert!(value.get("calls").is_some());
        assert!(value.get("puts").is_some());
    }

    #[test]
    fn test_empty_grid_renders_nothing() {
        let dir = tempdir().unwrap();
        let png = dir.path().join("heatmap.png");
        let empty = HeatmapRequest::new(
            ContractParams::new(100.0, 1.0, 0.05),
            AxisSpec::new(50.0, 150.0, 0),
            AxisSpec::new(0.2, 0.5, 5),
        );
        assert!(matches!(run_heatmap(&empty, false, &small_style(), &png, None), Ok(None)));
        assert!(!png.exists());
    }

    #[test]
    fn test_render_failure_is_an_error() {
        let dir = tempdir().unwrap();
        let png = dir.path().join("missing").join("heatmap.png");
        let err = run_heatmap(&request(1.0, 0.2, 0.5), false, &small_style(), &png, None)
            .unwrap_err();
        assert!(!err.is_invalid_input());
        assert!(matches!(err, HeatmapError::Plot(_)));
    }
}
