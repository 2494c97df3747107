//! SVG figures for the two pipelines.
//!
//! Rendering is text-free on purpose (no font backend is compiled in);
//! figures carry polylines and highlight rectangles only, with titles and
//! axis meaning documented next to the output files.

use std::path::Path;

use plotters::coord::cartesian::Cartesian2d;
use plotters::coord::types::RangedCoordf64;
use plotters::coord::Shift;
use plotters::prelude::*;

use crate::core::series::Series;
use crate::error::{Error, Result};
use crate::pipeline::query::MatchRecord;

/// Figure geometry. Total height scales with the number of panels.
#[derive(Debug, Clone)]
pub struct PlotConfig {
    pub width: u32,
    pub height_per_panel: u32,
}

impl Default for PlotConfig {
    fn default() -> Self {
        Self {
            width: 1280,
            height_per_panel: 240,
        }
    }
}

/// Overlaid aligned motif windows, seed drawn with a thicker stroke.
pub fn plot_alignment(
    path: &Path,
    windows: &[Vec<f64>],
    seed_index: usize,
    cfg: &PlotConfig,
) -> Result<()> {
    if windows.is_empty() {
        return Ok(());
    }
    let m = windows[0].len();
    let (y_min, y_max) = padded_range(windows.iter().flatten().copied());

    let root = SVGBackend::new(path, (cfg.width, cfg.height_per_panel * 2)).into_drawing_area();
    root.fill(&WHITE).map_err(render_err)?;
    let mut chart = ChartBuilder::on(&root)
        .margin(10)
        .build_cartesian_2d(0f64..(m.max(2) - 1) as f64, y_min..y_max)
        .map_err(render_err)?;

    for (i, window) in windows.iter().enumerate() {
        let color = Palette99::pick(i).to_rgba();
        let width = if i == seed_index { 4 } else { 1 };
        for run in finite_runs(window) {
            chart
                .draw_series(LineSeries::new(run, color.stroke_width(width)))
                .map_err(render_err)?;
        }
    }
    root.present().map_err(render_err)
}

/// One panel per series with a shared y-range; the aligned window of each
/// series is highlighted with a translucent rectangle.
pub fn plot_signal_panels(
    path: &Path,
    series: &[Series],
    highlights: &[(usize, usize)],
    y_range: (f64, f64),
    cfg: &PlotConfig,
) -> Result<()> {
    if series.is_empty() {
        return Ok(());
    }
    let root = SVGBackend::new(
        path,
        (cfg.width, cfg.height_per_panel * series.len() as u32),
    )
    .into_drawing_area();
    root.fill(&WHITE).map_err(render_err)?;
    let panels = root.split_evenly((series.len(), 1));

    for (i, (s, panel)) in series.iter().zip(&panels).enumerate() {
        let n = s.len().max(2);
        let mut chart = ChartBuilder::on(panel)
            .margin(5)
            .build_cartesian_2d(0f64..(n - 1) as f64, y_range.0..y_range.1)
            .map_err(render_err)?;

        let (start, len) = highlights[i];
        chart
            .draw_series(std::iter::once(Rectangle::new(
                [
                    (start as f64, y_range.0),
                    ((start + len) as f64, y_range.1),
                ],
                Palette99::pick(i).mix(0.3).filled(),
            )))
            .map_err(render_err)?;
        for run in finite_runs(s.fshapes()) {
            chart
                .draw_series(LineSeries::new(run, Palette99::pick(i).stroke_width(1)))
                .map_err(render_err)?;
        }
    }
    root.present().map_err(render_err)
}

/// Query panel on top, then one panel per match showing the full candidate
/// series with the matched window and its neighbors re-drawn on top.
/// A run with no matches skips the figure entirely.
pub fn plot_query_matches(
    path: &Path,
    query: &Series,
    records: &[MatchRecord],
    cfg: &PlotConfig,
) -> Result<()> {
    if records.is_empty() {
        return Ok(());
    }
    let m = query.len();
    let panels_count = records.len() + 1;
    let root = SVGBackend::new(
        path,
        (cfg.width, cfg.height_per_panel * panels_count as u32),
    )
    .into_drawing_area();
    root.fill(&WHITE).map_err(render_err)?;
    let panels = root.split_evenly((panels_count, 1));

    draw_polyline_panel(&panels[0], query.fshapes(), &BLUE.to_rgba())?;

    for (record, panel) in records.iter().zip(&panels[1..]) {
        let data = record.series.fshapes();
        let n = data.len().max(2);
        let (y_min, y_max) = padded_range(data.iter().copied());
        let mut chart = ChartBuilder::on(panel)
            .margin(5)
            .build_cartesian_2d(0f64..(n - 1) as f64, y_min..y_max)
            .map_err(render_err)?;

        for run in finite_runs(data) {
            chart
                .draw_series(LineSeries::new(run, BLUE.stroke_width(1)))
                .map_err(render_err)?;
        }
        draw_window(&mut chart, data, record.start(), m, &RED.to_rgba(), 2)?;
        for &neighbor in &record.motif.neighbor_offsets {
            draw_window(&mut chart, data, neighbor, m, &GREEN.to_rgba(), 2)?;
        }
    }
    root.present().map_err(render_err)
}

/// Query panel on top, then one panel per match showing only the matched
/// window.
pub fn plot_matched_windows(
    path: &Path,
    query: &Series,
    records: &[MatchRecord],
    cfg: &PlotConfig,
) -> Result<()> {
    if records.is_empty() {
        return Ok(());
    }
    let m = query.len();
    let panels_count = records.len() + 1;
    let root = SVGBackend::new(
        path,
        (cfg.width, cfg.height_per_panel * panels_count as u32),
    )
    .into_drawing_area();
    root.fill(&WHITE).map_err(render_err)?;
    let panels = root.split_evenly((panels_count, 1));

    draw_polyline_panel(&panels[0], query.fshapes(), &BLUE.to_rgba())?;
    for (record, panel) in records.iter().zip(&panels[1..]) {
        draw_polyline_panel(panel, record.fshape_window(m), &RED.to_rgba())?;
    }
    root.present().map_err(render_err)
}

fn draw_polyline_panel<DB: DrawingBackend>(
    panel: &DrawingArea<DB, Shift>,
    values: &[f64],
    color: &RGBAColor,
) -> Result<()> {
    let n = values.len().max(2);
    let (y_min, y_max) = padded_range(values.iter().copied());
    let mut chart = ChartBuilder::on(panel)
        .margin(5)
        .build_cartesian_2d(0f64..(n - 1) as f64, y_min..y_max)
        .map_err(render_err)?;
    for run in finite_runs(values) {
        chart
            .draw_series(LineSeries::new(run, color.stroke_width(1)))
            .map_err(render_err)?;
    }
    Ok(())
}

fn draw_window<DB: DrawingBackend>(
    chart: &mut ChartContext<'_, DB, Cartesian2d<RangedCoordf64, RangedCoordf64>>,
    data: &[f64],
    start: usize,
    m: usize,
    color: &RGBAColor,
    width: u32,
) -> Result<()> {
    let window = &data[start..(start + m).min(data.len())];
    let points: Vec<(f64, f64)> = window
        .iter()
        .enumerate()
        .filter(|(_, v)| v.is_finite())
        .map(|(k, &v)| ((start + k) as f64, v))
        .collect();
    chart
        .draw_series(LineSeries::new(points, color.stroke_width(width)))
        .map_err(render_err)?;
    Ok(())
}

/// Maximal runs of consecutive finite points, as (index, value) pairs.
fn finite_runs(values: &[f64]) -> Vec<Vec<(f64, f64)>> {
    let mut runs = Vec::new();
    let mut current = Vec::new();
    for (i, &v) in values.iter().enumerate() {
        if v.is_finite() {
            current.push((i as f64, v));
        } else if !current.is_empty() {
            runs.push(std::mem::take(&mut current));
        }
    }
    if !current.is_empty() {
        runs.push(current);
    }
    runs
}

/// Finite min/max padded by 5% of the span; a degenerate or empty input
/// falls back to a unit range so chart construction never sees an empty
/// coordinate range.
fn padded_range(values: impl Iterator<Item = f64>) -> (f64, f64) {
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for v in values {
        if v.is_finite() {
            min = min.min(v);
            max = max.max(v);
        }
    }
    if min > max {
        return (0.0, 1.0);
    }
    let pad = ((max - min) * 0.05).max(0.1);
    (min - pad, max + pad)
}

fn render_err<E: std::fmt::Display>(e: E) -> Error {
    Error::Render(e.to_string())
}
