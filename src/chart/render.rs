//! Chart drawing with the `plotters` bitmap backend

use super::style::{self, canvas_size, points_to_px, Theme};
use super::violin::{build_violin, dash_segments, density_curve, ViolinShape};
use crate::channels::Channel;
use crate::dataset::Dataset;
use crate::stats::{format_thousands, StatsError, StatsTracker};
use plotters::coord::types::RangedCoordf64;
use plotters::coord::Shift;
use plotters::drawing::DrawingAreaErrorKind;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use plotters::style::{FontDesc, FontFamily, FontStyle, FontTransform, TextStyle, TRANSPARENT};
use std::io::IsTerminal;
use std::path::Path;
use thiserror::Error;
use tracing::{debug, info};

/// File the chart is written to, relative to the working directory
pub const OUTPUT_FILE: &str = "chart.png";

pub const TITLE: &str = "Customer Support Response Time Distribution by Channel";
pub const ORGANIZATION: &str = "Schoen Rippin and Wilderman Analytics";
pub const X_LABEL: &str = "Support Channel";
pub const Y_LABEL: &str = "Response Time (Hours)";
pub const ANALYSIS_PERIOD: &str = "Analysis Period: Q4 2024";

/// Visible response-time range; data above is truncated visually only
pub const Y_RANGE: (f64, f64) = (0.0, 100.0);

/// Qualitative "Set2" palette
pub const SET2: [RGBColor; 8] = [
    RGBColor(0x66, 0xc2, 0xa5),
    RGBColor(0xfc, 0x8d, 0x62),
    RGBColor(0x8d, 0xa0, 0xcb),
    RGBColor(0xe7, 0x8a, 0xc3),
    RGBColor(0xa6, 0xd8, 0x54),
    RGBColor(0xff, 0xd9, 0x2f),
    RGBColor(0xe5, 0xc4, 0x94),
    RGBColor(0xb3, 0xb3, 0xb3),
];

const PLOT_BACKGROUND: RGBColor = RGBColor(0xfa, 0xfa, 0xfa);
const SPINE_COLOR: RGBColor = RGBColor(0xcc, 0xcc, 0xcc);
const GRID_COLOR: RGBColor = RGBColor(0x80, 0x80, 0x80);
const OUTLINE_COLOR: RGBColor = RGBColor(0x42, 0x42, 0x42);

const TITLE_PT: f64 = 16.0;
const AXIS_LABEL_PT: f64 = 14.0;
const ANNOTATION_PT: f64 = 10.0;
const VIOLIN_LINE_PT: f64 = 1.5;
const SPINE_LINE_PT: f64 = 0.8;
const TITLE_PAD_PT: f64 = 20.0;

/// Annotation anchor in axes fractions (left, top)
const ANNOTATION_ANCHOR: (f64, f64) = (0.02, 0.98);

// Dash pattern for quartile markers, in category-slot units
const QUARTILE_DASH: (f64, f64) = (0.03, 0.02);
const MEDIAN_DASH: (f64, f64) = (0.06, 0.02);

/// Errors raised while rendering the chart
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Chart drawing failed: {0}")]
    Drawing(String),

    #[error("Dataset has no channels to plot")]
    EmptyDataset,

    #[error("Cannot summarize channel for plotting: {0}")]
    Stats(#[from] StatsError),
}

impl<E: std::error::Error + Send + Sync> From<DrawingAreaErrorKind<E>> for RenderError {
    fn from(err: DrawingAreaErrorKind<E>) -> Self {
        RenderError::Drawing(err.to_string())
    }
}

/// One violin ready to draw, with its category label and color
#[derive(Debug, Clone)]
pub struct PlottedViolin {
    pub channel: Channel,
    pub color: RGBColor,
    pub shape: ViolinShape,
}

/// Compute violin shapes for every channel, in first-appearance order
pub fn build_violins(dataset: &Dataset) -> Result<Vec<PlottedViolin>, RenderError> {
    let channels = dataset.channels();
    if channels.is_empty() {
        return Err(RenderError::EmptyDataset);
    }

    let tracker = StatsTracker::from_dataset(dataset);
    let samples: Vec<Vec<f64>> = channels
        .iter()
        .map(|&c| dataset.response_times(c))
        .collect();
    let curves: Vec<_> = samples.iter().map(|s| density_curve(s)).collect();
    let scale_max = curves
        .iter()
        .flatten()
        .map(|c| c.max_density())
        .fold(0.0, f64::max);

    let mut violins = Vec::with_capacity(channels.len());
    for (i, (&channel, curve)) in channels.iter().zip(&curves).enumerate() {
        let Some(curve) = curve else {
            debug!(channel = channel.name(), "no spread in samples, skipping violin");
            continue;
        };
        let stats = tracker.describe(channel)?;
        let shape = build_violin(
            i as f64,
            &samples[i],
            curve,
            scale_max,
            [stats.p25, stats.median, stats.p75],
        );
        violins.push(PlottedViolin {
            channel,
            color: SET2[i % SET2.len()],
            shape: shape.clipped(Y_RANGE.0, Y_RANGE.1),
        });
    }
    Ok(violins)
}

type Chart<'a, 'b> = ChartContext<'a, BitMapBackend<'b>, Cartesian2d<RangedCoordf64, RangedCoordf64>>;

fn text_style<'a>(theme: &'a Theme, points: f64, bold: bool) -> TextStyle<'a> {
    let style = if bold {
        FontStyle::Bold
    } else {
        FontStyle::Normal
    };
    let family = FontFamily::from(theme.font_family.as_str());
    FontDesc::new(family, points_to_px(points), style).color(&BLACK)
}

fn stroke_px(points: f64) -> u32 {
    points_to_px(points).round().max(1.0) as u32
}

fn draw_title(area: &DrawingArea<BitMapBackend<'_>, Shift>, theme: &Theme) -> Result<(), RenderError> {
    let (width, _) = area.dim_in_pixel();
    let centered = Pos::new(HPos::Center, VPos::Top);
    let style = text_style(theme, TITLE_PT, true).pos(centered);
    let line_height = points_to_px(TITLE_PT * 1.2).round() as i32;
    let top = (points_to_px(TITLE_PAD_PT) / 2.0).round() as i32;
    let x = width as i32 / 2;

    area.draw(&Text::new(TITLE, (x, top), style.clone()))?;
    area.draw(&Text::new(ORGANIZATION, (x, top + line_height), style))?;
    Ok(())
}

/// Render the violin chart for `dataset` into a PNG at `path`
pub fn render_chart(dataset: &Dataset, path: &Path) -> Result<(), RenderError> {
    let theme = style::theme();
    let violins = build_violins(dataset)?;
    let n = dataset.channels().len();

    let size = canvas_size();
    debug!(path = %path.display(), width = size.0, height = size.1, "rendering chart");

    let root = BitMapBackend::new(path, size).into_drawing_area();
    root.fill(&WHITE)?;

    let title_height =
        (points_to_px(TITLE_PT * 1.2) * 2.0 + points_to_px(TITLE_PAD_PT)).round() as u32;
    let (title_area, body) = root.split_vertically(title_height);
    draw_title(&title_area, theme)?;

    let tick_font = text_style(theme, theme.tick_label_pt(), false);
    let axis_font = text_style(theme, AXIS_LABEL_PT, true);

    // Rotated labels hang below the axis; reserve their longest extent
    let longest_label = dataset
        .channels()
        .iter()
        .map(|c| root.estimate_text_size(c.name(), &tick_font))
        .collect::<Result<Vec<_>, _>>()?
        .into_iter()
        .map(|(w, _)| w)
        .max()
        .unwrap_or(0);
    let x_label_area = longest_label + points_to_px(AXIS_LABEL_PT * 2.0).round() as u32 + 8;

    let x_range = -0.5..(n as f64 - 0.5);
    let (y_min, y_max) = Y_RANGE;

    let mut chart = ChartBuilder::on(&body)
        .margin(10)
        .x_label_area_size(x_label_area)
        .y_label_area_size(70)
        .build_cartesian_2d(x_range.clone(), y_min..y_max)?;

    chart.plotting_area().fill(&PLOT_BACKGROUND)?;

    let grid_style = if theme.draws_grid() {
        GRID_COLOR.mix(theme.grid_alpha)
    } else {
        TRANSPARENT
    };

    chart
        .configure_mesh()
        .disable_x_mesh()
        .bold_line_style(grid_style)
        .light_line_style(TRANSPARENT)
        .axis_style(SPINE_COLOR)
        .x_labels(n)
        .x_label_formatter(&|_| String::new())
        .y_labels(6)
        .y_label_formatter(&|y| format!("{:.0}", y))
        .y_label_style(tick_font.clone())
        .x_desc(X_LABEL)
        .y_desc(Y_LABEL)
        .axis_desc_style(axis_font)
        .draw()?;

    // Vertical grid lines at category centers
    if theme.draws_grid() {
        chart.draw_series((0..n).map(|i| {
            PathElement::new(vec![(i as f64, y_min), (i as f64, y_max)], grid_style)
        }))?;
    }

    let outline_px = stroke_px(VIOLIN_LINE_PT);
    for violin in &violins {
        draw_violin(&mut chart, violin, outline_px)?;
    }

    // Thin border on all four plot edges
    chart.draw_series(std::iter::once(Rectangle::new(
        [(x_range.start, y_max), (x_range.end, y_min)],
        SPINE_COLOR.stroke_width(stroke_px(SPINE_LINE_PT)),
    )))?;

    // Category labels, rotated to read bottom-to-top below each tick
    let label_style = tick_font.transform(FontTransform::Rotate270);
    for (i, channel) in dataset.channels().iter().enumerate() {
        let (w, h) = root.estimate_text_size(channel.name(), &tick_font)?;
        let (px, py) = chart.backend_coord(&(i as f64, y_min));
        let anchor = (px - h as i32 / 2, py + 6 + w as i32);
        root.draw(&Text::new(channel.name(), anchor, label_style.clone()))?;
    }

    draw_annotation(&mut chart, &root, theme, dataset.len())?;

    root.present()?;
    info!(path = %path.display(), violins = violins.len(), "chart written");
    Ok(())
}

fn draw_violin(
    chart: &mut Chart<'_, '_>,
    violin: &PlottedViolin,
    outline_px: u32,
) -> Result<(), RenderError> {
    let outline = violin.shape.outline();
    if outline.is_empty() {
        return Ok(());
    }

    chart.draw_series(std::iter::once(Polygon::new(
        outline.clone(),
        violin.color.filled(),
    )))?;

    let mut closed = outline;
    closed.push(closed[0]);
    chart.draw_series(std::iter::once(PathElement::new(
        closed,
        OUTLINE_COLOR.stroke_width(outline_px),
    )))?;

    for q in &violin.shape.quartiles {
        let (dash, gap) = if q.is_median {
            MEDIAN_DASH
        } else {
            QUARTILE_DASH
        };
        chart.draw_series(dash_segments(q.x_start, q.x_end, dash, gap).into_iter().map(
            |(x0, x1)| PathElement::new(vec![(x0, q.y), (x1, q.y)], OUTLINE_COLOR.stroke_width(1)),
        ))?;
    }
    Ok(())
}

fn draw_annotation(
    chart: &mut Chart<'_, '_>,
    root: &DrawingArea<BitMapBackend<'_>, Shift>,
    theme: &Theme,
    total: usize,
) -> Result<(), RenderError> {
    let lines = [
        format!("Dataset: {} support interactions", format_thousands(total as u64)),
        ANALYSIS_PERIOD.to_string(),
    ];
    let text_font = text_style(theme, ANNOTATION_PT, false);

    let mut box_w = 0u32;
    let mut line_h = 0u32;
    for line in &lines {
        let (w, h) = root.estimate_text_size(line, &text_font)?;
        box_w = box_w.max(w);
        line_h = line_h.max(h);
    }
    let pad = points_to_px(ANNOTATION_PT * 0.3).round() as i32 + 2;
    let line_step = line_h as i32 + 2;
    let box_size = (
        box_w as i32 + 2 * pad,
        line_step * lines.len() as i32 + 2 * pad,
    );

    let x_spec = chart.x_range();
    let (y_min, y_max) = Y_RANGE;
    let anchor = (
        x_spec.start + ANNOTATION_ANCHOR.0 * (x_spec.end - x_spec.start),
        y_min + ANNOTATION_ANCHOR.1 * (y_max - y_min),
    );

    let element = EmptyElement::at(anchor)
        + Rectangle::new([(0, 0), box_size], WHITE.mix(0.8).filled())
        + Rectangle::new([(0, 0), box_size], SPINE_COLOR.stroke_width(1))
        + Text::new(lines[0].clone(), (pad, pad), text_font.clone())
        + Text::new(lines[1].clone(), (pad, pad + line_step), text_font);
    chart.draw_series(std::iter::once(element))?;
    Ok(())
}

/// Show the rendered chart when attached to an interactive terminal
///
/// No viewer is launched; in a batch context this does nothing.
pub fn show(path: &Path) {
    if std::io::stdout().is_terminal() {
        info!(path = %path.display(), "chart available for viewing");
    } else {
        debug!("non-interactive context, skipping chart display");
    }
}
