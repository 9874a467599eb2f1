// Process-wide plotting theme
//
// The theme is installed once per process and read by every drawing call.
// It mirrors a "whitegrid" axes style under the "talk" plotting context:
// white figure, light plot background, faint grid, context-scaled tick labels.

use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

/// Output resolution in dots per inch
pub const DPI: f64 = 64.0;

/// Figure edge length in inches (square canvas)
pub const FIGURE_SIZE_IN: f64 = 8.0;

/// Tick label size, in points, under the baseline ("notebook") context
const BASE_TICK_LABEL_PT: f64 = 11.0;

static THEME: OnceLock<Theme> = OnceLock::new();

/// Axes decoration style
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AxesStyle {
    Whitegrid,
    Darkgrid,
    White,
}

/// Plotting context, scaling text relative to the notebook baseline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlotContext {
    Paper,
    Notebook,
    Talk,
    Poster,
}

impl PlotContext {
    pub fn scale(self) -> f64 {
        match self {
            PlotContext::Paper => 0.8,
            PlotContext::Notebook => 1.0,
            PlotContext::Talk => 1.5,
            PlotContext::Poster => 2.0,
        }
    }
}

/// Global chart styling
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Theme {
    pub style: AxesStyle,
    pub context: PlotContext,
    pub font_scale: f64,
    pub font_family: String,
    /// Opacity of grid lines (0.0-1.0)
    pub grid_alpha: f64,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            style: AxesStyle::Whitegrid,
            context: PlotContext::Talk,
            font_scale: 1.0,
            font_family: "sans-serif".to_string(),
            grid_alpha: 0.3,
        }
    }
}

impl Theme {
    /// Tick label size in points after context and font scaling
    pub fn tick_label_pt(&self) -> f64 {
        BASE_TICK_LABEL_PT * self.context.scale() * self.font_scale
    }

    /// Whether horizontal and vertical grid lines are drawn
    pub fn draws_grid(&self) -> bool {
        matches!(self.style, AxesStyle::Whitegrid | AxesStyle::Darkgrid)
    }
}

/// Install the process-wide theme
///
/// Returns `false` if a theme was already installed; the first one stays.
pub fn set_theme(theme: Theme) -> bool {
    let installed = THEME.set(theme).is_ok();
    if !installed {
        tracing::debug!("plotting theme already initialized, keeping existing theme");
    }
    installed
}

/// The active theme, falling back to the default if none was installed
pub fn theme() -> &'static Theme {
    THEME.get_or_init(Theme::default)
}

/// Convert a size in typographic points to pixels at [`DPI`]
pub fn points_to_px(points: f64) -> f64 {
    points * DPI / 72.0
}

/// Canvas size in pixels for the configured figure size and resolution
pub fn canvas_size() -> (u32, u32) {
    let px = (FIGURE_SIZE_IN * DPI).round() as u32;
    (px, px)
}
