// Violin geometry: Gaussian kernel density estimates mirrored around a
// category center, plus quartile marker segments.
//
// Densities are evaluated on a fixed grid that extends CUT bandwidths past
// the data range. Half-widths are scaled by the largest density across all
// violins of a chart, so every violin encloses a comparable area.

use std::f64::consts::PI;

/// Number of grid points per density curve
pub const GRID_SIZE: usize = 100;

/// How many bandwidths the support extends beyond the data range
pub const CUT: f64 = 2.0;

/// Full width of the widest violin, in category-slot units
pub const VIOLIN_WIDTH: f64 = 0.8;

/// Density curve for one category, before width scaling
#[derive(Debug, Clone, PartialEq)]
pub struct DensityCurve {
    /// (y, density) pairs with strictly increasing y
    pub points: Vec<(f64, f64)>,
    pub bandwidth: f64,
}

impl DensityCurve {
    pub fn max_density(&self) -> f64 {
        self.points.iter().map(|&(_, d)| d).fold(0.0, f64::max)
    }
}

/// Horizontal marker across a violin at a quartile value
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QuartileLine {
    pub y: f64,
    pub x_start: f64,
    pub x_end: f64,
    pub is_median: bool,
}

/// Drawable violin in chart coordinates (x = category slot, y = hours)
#[derive(Debug, Clone, PartialEq)]
pub struct ViolinShape {
    pub center: f64,
    /// (y, half_width) pairs, y increasing
    pub profile: Vec<(f64, f64)>,
    pub quartiles: Vec<QuartileLine>,
}

impl ViolinShape {
    /// Closed outline: right edge bottom-to-top, then left edge top-to-bottom
    pub fn outline(&self) -> Vec<(f64, f64)> {
        let right = self.profile.iter().map(|&(y, w)| (self.center + w, y));
        let left = self.profile.iter().rev().map(|&(y, w)| (self.center - w, y));
        right.chain(left).collect()
    }

    /// Truncate the shape to the visible y range
    ///
    /// Segments crossing a bound are cut at the bound by linear interpolation;
    /// quartile markers outside the range are dropped.
    pub fn clipped(&self, y_min: f64, y_max: f64) -> ViolinShape {
        let mut profile = Vec::with_capacity(self.profile.len() + 2);

        for (i, &(y, w)) in self.profile.iter().enumerate() {
            if i > 0 {
                let (py, pw) = self.profile[i - 1];
                for bound in [y_min, y_max] {
                    let crosses = (py < bound && y > bound) || (py > bound && y < bound);
                    if crosses {
                        let t = (bound - py) / (y - py);
                        profile.push((bound, pw + t * (w - pw)));
                    }
                }
            }
            if (y_min..=y_max).contains(&y) {
                profile.push((y, w));
            }
        }

        ViolinShape {
            center: self.center,
            profile,
            quartiles: self
                .quartiles
                .iter()
                .copied()
                .filter(|q| (y_min..=y_max).contains(&q.y))
                .collect(),
        }
    }
}

/// Scott's rule bandwidth: sample std * n^(-1/5)
pub fn scott_bandwidth(samples: &[f64]) -> f64 {
    let n = samples.len();
    if n < 2 {
        return 0.0;
    }
    let mean = samples.iter().sum::<f64>() / n as f64;
    let variance = samples.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / (n - 1) as f64;
    variance.sqrt() * (n as f64).powf(-0.2)
}

/// Gaussian kernel density at `y`
pub fn gaussian_kde(samples: &[f64], bandwidth: f64, y: f64) -> f64 {
    if samples.is_empty() || bandwidth <= 0.0 {
        return 0.0;
    }
    let norm = 1.0 / (samples.len() as f64 * bandwidth * (2.0 * PI).sqrt());
    samples
        .iter()
        .map(|x| {
            let z = (y - x) / bandwidth;
            (-0.5 * z * z).exp()
        })
        .sum::<f64>()
        * norm
}

/// Evaluate the density on an evenly spaced grid covering the data
///
/// Returns `None` when the samples are empty or have no spread.
pub fn density_curve(samples: &[f64]) -> Option<DensityCurve> {
    let bandwidth = scott_bandwidth(samples);
    if bandwidth <= 0.0 || !bandwidth.is_finite() {
        return None;
    }

    let lo = samples.iter().copied().fold(f64::INFINITY, f64::min) - CUT * bandwidth;
    let hi = samples.iter().copied().fold(f64::NEG_INFINITY, f64::max) + CUT * bandwidth;
    let step = (hi - lo) / (GRID_SIZE - 1) as f64;

    let points = (0..GRID_SIZE)
        .map(|i| {
            let y = lo + step * i as f64;
            (y, gaussian_kde(samples, bandwidth, y))
        })
        .collect();

    Some(DensityCurve { points, bandwidth })
}

/// Build a violin at `center` from a density curve
///
/// `scale_max` is the largest density across every violin on the chart;
/// `quartiles` holds the 25th, 50th and 75th percentile values.
pub fn build_violin(
    center: f64,
    samples: &[f64],
    curve: &DensityCurve,
    scale_max: f64,
    quartiles: [f64; 3],
) -> ViolinShape {
    let half = VIOLIN_WIDTH / 2.0;
    let scale = if scale_max > 0.0 { half / scale_max } else { 0.0 };

    let profile = curve
        .points
        .iter()
        .map(|&(y, d)| (y, (d * scale).min(half)))
        .collect();

    let quartiles = quartiles
        .iter()
        .enumerate()
        .map(|(i, &q)| {
            let w = (gaussian_kde(samples, curve.bandwidth, q) * scale).min(half);
            QuartileLine {
                y: q,
                x_start: center - w,
                x_end: center + w,
                is_median: i == 1,
            }
        })
        .collect();

    ViolinShape {
        center,
        profile,
        quartiles,
    }
}

/// Split a horizontal segment into dashes of `dash` length separated by `gap`
pub fn dash_segments(x_start: f64, x_end: f64, dash: f64, gap: f64) -> Vec<(f64, f64)> {
    let mut dashes = Vec::new();
    if dash <= 0.0 || x_end <= x_start {
        return dashes;
    }
    let mut x = x_start;
    while x < x_end {
        let end = (x + dash).min(x_end);
        dashes.push((x, end));
        x = end + gap.max(0.0);
    }
    dashes
}
