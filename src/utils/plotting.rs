use crate::error::{HeatmapError, Result};
use crate::models::{OptionType, PriceHeatmap};
use colorous::Gradient;
use ndarray::{Array1, Array2};
use plotters::backend::BitMapBackend;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use std::path::Path;
use tracing::debug;

const NAN_COLOR: RGBColor = RGBColor(200, 200, 200);

/// Rendering switches for [`plot_price_heatmaps`]
#[derive(Debug, Clone, Copy)]
pub struct HeatmapStyle {
    pub width: u32,
    pub height: u32,
    /// Print each cell's price inside it
    pub annotate: bool,
}

impl Default for HeatmapStyle {
    fn default() -> Self {
        Self {
            width: 2000,
            height: 800,
            annotate: false,
        }
    }
}

fn gradient_for(kind: OptionType) -> Gradient {
    match kind {
        OptionType::Call => colorous::BLUES,
        OptionType::Put => colorous::REDS,
    }
}

/// Smallest and largest finite value, or `None` if there are none.
pub fn finite_range(values: &Array2<f64>) -> Option<(f64, f64)> {
    values
        .iter()
        .filter(|v| v.is_finite())
        .fold(None, |acc, &v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })
}

/// Colour for `value` on `gradient` scaled to `[lo, hi]`; grey for NaN.
pub fn cell_color(gradient: &Gradient, value: f64, lo: f64, hi: f64) -> RGBColor {
    if !value.is_finite() {
        return NAN_COLOR;
    }
    let t = if hi > lo { (value - lo) / (hi - lo) } else { 0.5 };
    let c = gradient.eval_continuous(t.clamp(0.0, 1.0));
    RGBColor(c.r, c.g, c.b)
}

/// Cell boundaries around each axis point: midpoints between neighbours,
/// extended by half a step at both ends.
///
/// An axis whose points all coincide (one point, or `min == max`) is split
/// into equal-width cells around that value.
pub fn cell_edges(axis: &Array1<f64>) -> Vec<f64> {
    let n = axis.len();
    if n == 0 {
        return Vec::new();
    }
    if axis[n - 1] == axis[0] {
        let half = (axis[0].abs() * 0.05).max(0.005);
        let width = 2.0 * half / n as f64;
        return (0..=n).map(|i| axis[0] - half + width * i as f64).collect();
    }
    let mut edges = Vec::with_capacity(n + 1);
    edges.push(axis[0] - 0.5 * (axis[1] - axis[0]));
    for i in 1..n {
        edges.push(0.5 * (axis[i - 1] + axis[i]));
    }
    edges.push(axis[n - 1] + 0.5 * (axis[n - 1] - axis[n - 2]));
    edges
}

fn cell_centers(edges: &[f64]) -> Vec<f64> {
    edges.windows(2).map(|w| 0.5 * (w[0] + w[1])).collect()
}

fn draw_panel<DB: DrawingBackend>(
    area: &DrawingArea<DB, plotters::coord::Shift>,
    heatmap: &PriceHeatmap,
    kind: OptionType,
    style: &HeatmapStyle,
) -> Result<()> {
    let values = match kind {
        OptionType::Call => &heatmap.calls,
        OptionType::Put => &heatmap.puts,
    };
    let (lo, hi) = finite_range(values).unwrap_or((0.0, 0.0));
    let gradient = gradient_for(kind);

    let x_edges = cell_edges(&heatmap.spots);
    let y_edges = cell_edges(&heatmap.vols);
    let (x_min, x_max) = (x_edges[0], x_edges[x_edges.len() - 1]);
    let (y_min, y_max) = (y_edges[0], y_edges[y_edges.len() - 1]);

    // Low volatility sits at the bottom, so the highest row is drawn on top.
    let mut chart = ChartBuilder::on(area)
        .caption(
            format!("{} Option Prices ({:.2} - {:.2})", kind, lo, hi),
            ("sans-serif", 24).into_font(),
        )
        .margin(15)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(x_min..x_max, y_min..y_max)
        .map_err(|e| HeatmapError::Plot(e.to_string()))?;

    chart
        .configure_mesh()
        .disable_mesh()
        .x_desc("Spot Price (S)")
        .y_desc("Volatility (σ)")
        .x_label_formatter(&|x| format!("{:.2}", x))
        .y_label_formatter(&|y| format!("{:.2}", y))
        .axis_desc_style(("sans-serif", 15))
        .draw()
        .map_err(|e| HeatmapError::Plot(e.to_string()))?;

    let (n_rows, n_cols) = values.dim();
    chart
        .draw_series((0..n_rows).flat_map(|j| {
            let (x_edges, y_edges, gradient) = (&x_edges, &y_edges, &gradient);
            (0..n_cols).map(move |i| {
                let color = cell_color(gradient, values[[j, i]], lo, hi);
                Rectangle::new(
                    [(x_edges[i], y_edges[j]), (x_edges[i + 1], y_edges[j + 1])],
                    color.filled(),
                )
            })
        }))
        .map_err(|e| HeatmapError::Plot(e.to_string()))?;

    if style.annotate {
        let x_centers = cell_centers(&x_edges);
        let y_centers = cell_centers(&y_edges);
        let font = ("sans-serif", 12)
            .into_font()
            .color(&BLACK)
            .pos(Pos::new(HPos::Center, VPos::Center));
        chart
            .draw_series((0..n_rows).flat_map(|j| {
                let font = font.clone();
                let (x_centers, y_centers) = (&x_centers, &y_centers);
                (0..n_cols).map(move |i| {
                    Text::new(
                        format!("{:.2}", values[[j, i]]),
                        (x_centers[i], y_centers[j]),
                        font.clone(),
                    )
                })
            }))
            .map_err(|e| HeatmapError::Plot(e.to_string()))?;
    }

    Ok(())
}

/// Draw the call and put grids side by side onto `root`.
pub fn render_price_heatmaps<DB: DrawingBackend>(
    root: &DrawingArea<DB, plotters::coord::Shift>,
    heatmap: &PriceHeatmap,
    style: &HeatmapStyle,
) -> Result<()> {
    if heatmap.is_empty() {
        return Err(HeatmapError::Plot(
            "No cells to render for price heatmap".to_string(),
        ));
    }
    root.fill(&WHITE)
        .map_err(|e| HeatmapError::Plot(e.to_string()))?;

    let panels = root.split_evenly((1, 2));
    draw_panel(&panels[0], heatmap, OptionType::Call, style)?;
    draw_panel(&panels[1], heatmap, OptionType::Put, style)?;

    root.present()
        .map_err(|e| HeatmapError::Plot(e.to_string()))?;

    Ok(())
}

/// Render the call and put grids side by side into a PNG at `output_path`.
pub fn plot_price_heatmaps<P: AsRef<Path>>(
    heatmap: &PriceHeatmap,
    style: &HeatmapStyle,
    output_path: P,
) -> Result<()> {
    let output_path = output_path.as_ref();
    debug!("Rendering {:?} heatmap to {:?}", heatmap.shape(), output_path);

    let root = BitMapBackend::new(output_path, (style.width, style.height)).into_drawing_area();
    render_price_heatmaps(&root, heatmap, style)
}
