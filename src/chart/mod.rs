// Violin chart of response times per support channel
//
// - style: process-wide theme (whitegrid look, talk context), set once
// - violin: kernel density estimates and violin/quartile geometry
// - render: plotters drawing, annotation and PNG output

mod render;
pub mod style;
mod violin;

pub use render::{
    build_violins, render_chart, show, PlottedViolin, RenderError, ANALYSIS_PERIOD,
    ORGANIZATION, OUTPUT_FILE, SET2, TITLE, X_LABEL, Y_LABEL, Y_RANGE,
};
pub use style::{canvas_size, set_theme, theme, Theme};
pub use violin::{
    build_violin, dash_segments, density_curve, gaussian_kde, scott_bandwidth, DensityCurve,
    QuartileLine, ViolinShape, CUT, GRID_SIZE, VIOLIN_WIDTH,
};

#[cfg(test)]
mod tests;
