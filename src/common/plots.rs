//! Distribution plot rendering
//!
//! Per graph, two PNG panels built with the [`plotters`] bitmap backend
//! at a fixed 1200x800 resolution (headless-safe, no system font
//! dependencies):
//!
//! 1. A linear-scale panel overlaying the three counter series as
//!    outlined 200-bin histograms.
//! 2. A log-log panel plotting bin count against bin upper-edge value
//!    as a line with markers, zero-count bins skipped.
//!
//! Input series must be sanitized (positive, sorted) before rendering;
//! nothing here mutates its input and the output is deterministic.

use crate::common::histogram::Histogram;
use plotters::prelude::*;
use std::path::Path;
use thiserror::Error;

/// Errors that can occur during plot generation
#[derive(Error, Debug)]
pub enum PlotError {
    #[error("Failed to create drawing area: {0}")]
    DrawingArea(String),

    #[error("Failed to configure chart: {0}")]
    ChartConfig(String),

    #[error("Failed to draw chart elements: {0}")]
    Drawing(String),

    #[error("Failed to save plot to file: {0}")]
    FileSave(#[from] std::io::Error),

    #[error("Invalid data: {0}")]
    InvalidData(String),
}

type Result<T> = core::result::Result<T, PlotError>;

/// Fixed bin count for both panels.
pub const HISTOGRAM_BINS: usize = 200;

/// Fixed colors for the start/end/gap overlay, in series order.
const SERIES_COLORS: [RGBColor; 3] = [RED, GREEN, BLUE];

/// Builds the outline polyline of a histogram: a step curve that rises
/// from zero at the left edge and returns to zero at the right edge.
fn histogram_outline(hist: &Histogram) -> Vec<(f64, f64)> {
    let mut points = Vec::with_capacity(hist.counts.len() * 2 + 2);
    points.push((hist.edges[0], 0.0));
    for (i, &count) in hist.counts.iter().enumerate() {
        points.push((hist.edges[i], count as f64));
        points.push((hist.edges[i + 1], count as f64));
    }
    points.push((hist.edges[hist.edges.len() - 1], 0.0));
    points
}

/// Histograms every non-empty series; errors if nothing is plottable.
fn bin_series<'a>(series: &[(&'a str, &[i64])]) -> Result<Vec<(&'a str, Histogram)>> {
    let binned: Vec<(&str, Histogram)> = series
        .iter()
        .filter_map(|(name, values)| {
            Histogram::from_values(values, HISTOGRAM_BINS).map(|h| (*name, h))
        })
        .collect();
    if binned.is_empty() {
        return Err(PlotError::InvalidData(
            "All series are empty after sanitization".to_string(),
        ));
    }
    Ok(binned)
}

/// Renders the linear-scale overlaid histogram panel for one graph.
pub fn render_linear_histogram(
    graph: &str,
    series: &[(&str, &[i64])],
    output_path: &Path,
) -> Result<()> {
    let binned = bin_series(series)?;

    let x_min = binned
        .iter()
        .map(|(_, h)| h.edges[0])
        .fold(f64::INFINITY, f64::min);
    let x_max = binned
        .iter()
        .map(|(_, h)| h.edges[h.edges.len() - 1])
        .fold(f64::NEG_INFINITY, f64::max);
    let y_max = binned
        .iter()
        .flat_map(|(_, h)| h.counts.iter().copied())
        .max()
        .unwrap_or(1) as f64
        * 1.05;

    let root = BitMapBackend::new(output_path, (1200, 800));
    let drawing_area = root.into_drawing_area();
    drawing_area
        .fill(&WHITE)
        .map_err(|e| PlotError::DrawingArea(e.to_string()))?;

    let mut chart = ChartBuilder::on(&drawing_area)
        .caption(
            format!("Counter Value Distribution (Linear): {graph}"),
            ("sans-serif", 40),
        )
        .margin(20)
        .x_label_area_size(60)
        .y_label_area_size(85)
        .build_cartesian_2d(x_min..x_max, 0.0..y_max.max(1.0))
        .map_err(|e| PlotError::ChartConfig(e.to_string()))?;

    chart
        .configure_mesh()
        .x_desc("Counter value")
        .x_label_style(("sans-serif", 35))
        .y_desc("Frequency")
        .y_label_style(("sans-serif", 35))
        .label_style(("sans-serif", 25))
        .draw()
        .map_err(|e| PlotError::Drawing(e.to_string()))?;

    for (index, (name, hist)) in binned.iter().enumerate() {
        let color = SERIES_COLORS[index % SERIES_COLORS.len()];
        let outline = histogram_outline(hist);
        chart
            .draw_series(LineSeries::new(outline, color.stroke_width(2)))
            .map_err(|e| PlotError::Drawing(e.to_string()))?
            .label(*name)
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color));
    }

    chart
        .configure_series_labels()
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .label_font(("sans-serif", 25))
        .draw()
        .map_err(|e| PlotError::Drawing(e.to_string()))?;

    drawing_area
        .present()
        .map_err(|e| PlotError::Drawing(e.to_string()))?;
    Ok(())
}

/// Renders the log-log count-vs-value panel for one graph.
pub fn render_loglog_plot(
    graph: &str,
    series: &[(&str, &[i64])],
    output_path: &Path,
) -> Result<()> {
    let binned = bin_series(series)?;

    let points: Vec<(&str, Vec<(f64, f64)>)> = binned
        .iter()
        .map(|(name, hist)| {
            let pts = hist
                .occupied_bins()
                .map(|(edge, count)| (edge, count as f64))
                .collect::<Vec<_>>();
            (*name, pts)
        })
        .filter(|(_, pts)| !pts.is_empty())
        .collect();
    if points.is_empty() {
        return Err(PlotError::InvalidData(
            "No occupied histogram bins to plot".to_string(),
        ));
    }

    let x_min = points
        .iter()
        .flat_map(|(_, pts)| pts.iter().map(|(x, _)| *x))
        .fold(f64::INFINITY, f64::min)
        .max(f64::MIN_POSITIVE);
    let mut x_max = points
        .iter()
        .flat_map(|(_, pts)| pts.iter().map(|(x, _)| *x))
        .fold(f64::NEG_INFINITY, f64::max);
    let y_min = 1.0f64;
    let mut y_max = points
        .iter()
        .flat_map(|(_, pts)| pts.iter().map(|(_, y)| *y))
        .fold(f64::NEG_INFINITY, f64::max);

    // Degenerate ranges break log axes; widen by a decade.
    if x_max <= x_min {
        x_max = x_min * 10.0;
    }
    if y_max <= y_min {
        y_max = y_min * 10.0;
    }

    let root = BitMapBackend::new(output_path, (1200, 800));
    let drawing_area = root.into_drawing_area();
    drawing_area
        .fill(&WHITE)
        .map_err(|e| PlotError::DrawingArea(e.to_string()))?;

    let mut chart = ChartBuilder::on(&drawing_area)
        .caption(
            format!("Log-Log Distribution: {graph}"),
            ("sans-serif", 40),
        )
        .margin(20)
        .x_label_area_size(60)
        .y_label_area_size(85)
        .build_cartesian_2d((x_min..x_max).log_scale(), (y_min..y_max).log_scale())
        .map_err(|e| PlotError::ChartConfig(e.to_string()))?;

    chart
        .configure_mesh()
        .x_desc("Value (log scale)")
        .x_label_style(("sans-serif", 35))
        .y_desc("Count (log scale)")
        .y_label_style(("sans-serif", 35))
        .label_style(("sans-serif", 25))
        .draw()
        .map_err(|e| PlotError::Drawing(e.to_string()))?;

    for (index, (name, pts)) in points.iter().enumerate() {
        let color = SERIES_COLORS[index % SERIES_COLORS.len()];
        chart
            .draw_series(LineSeries::new(pts.iter().copied(), color.stroke_width(2)))
            .map_err(|e| PlotError::Drawing(e.to_string()))?
            .label(*name)
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color));
        chart
            .draw_series(
                pts.iter()
                    .map(|&(x, y)| Circle::new((x, y), 3, color.filled())),
            )
            .map_err(|e| PlotError::Drawing(e.to_string()))?;
    }

    chart
        .configure_series_labels()
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .label_font(("sans-serif", 25))
        .draw()
        .map_err(|e| PlotError::Drawing(e.to_string()))?;

    drawing_area
        .present()
        .map_err(|e| PlotError::Drawing(e.to_string()))?;
    Ok(())
}
