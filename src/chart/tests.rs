// Tests for violin geometry, theme handling and violin assembly

use super::style::{points_to_px, AxesStyle, PlotContext};
use super::*;
use crate::channels::Channel;
use crate::dataset::{generate_support_data, Dataset, InteractionRecord, DEFAULT_SEED};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn seeded() -> Dataset {
    let mut rng = StdRng::seed_from_u64(DEFAULT_SEED);
    generate_support_data(&mut rng).unwrap()
}

#[test]
fn test_canvas_is_512_square() {
    assert_eq!(canvas_size(), (512, 512));
}

#[test]
fn test_points_to_px_at_64_dpi() {
    assert!((points_to_px(72.0) - 64.0).abs() < 1e-9);
    assert!((points_to_px(9.0) - 8.0).abs() < 1e-9);
}

#[test]
fn test_default_theme_is_whitegrid_talk() {
    let theme = Theme::default();
    assert_eq!(theme.style, AxesStyle::Whitegrid);
    assert_eq!(theme.context, PlotContext::Talk);
    assert_eq!(theme.font_scale, 1.0);
    assert!(theme.draws_grid());
    assert!((theme.tick_label_pt() - 16.5).abs() < 1e-9);
}

#[test]
fn test_theme_initializes_once() {
    set_theme(Theme::default());
    let louder = Theme {
        font_scale: 2.0,
        ..Theme::default()
    };
    assert!(!set_theme(louder));
    assert_eq!(theme(), &Theme::default());
}

#[test]
fn test_theme_serializes_lowercase_names() {
    let json = serde_json::to_value(Theme::default()).unwrap();
    assert_eq!(json["style"], "whitegrid");
    assert_eq!(json["context"], "talk");
    assert_eq!(json["font_family"], "sans-serif");
}

#[test]
fn test_scott_bandwidth() {
    // std of [1, 2, 3, 4, 5] is sqrt(2.5); n^(-1/5) with n = 5
    let bw = scott_bandwidth(&[1.0, 2.0, 3.0, 4.0, 5.0]);
    let expected = 2.5f64.sqrt() * 5f64.powf(-0.2);
    assert!((bw - expected).abs() < 1e-12);
}

#[test]
fn test_scott_bandwidth_degenerate() {
    assert_eq!(scott_bandwidth(&[]), 0.0);
    assert_eq!(scott_bandwidth(&[3.0]), 0.0);
    assert_eq!(scott_bandwidth(&[2.0, 2.0, 2.0]), 0.0);
}

#[test]
fn test_gaussian_kde_single_point_peak() {
    // One sample, unit bandwidth: standard normal pdf
    let peak = gaussian_kde(&[0.0], 1.0, 0.0);
    assert!((peak - 1.0 / (2.0 * std::f64::consts::PI).sqrt()).abs() < 1e-12);
    assert!(gaussian_kde(&[0.0], 1.0, 1.0) < peak);
    assert_eq!(gaussian_kde(&[], 1.0, 0.0), 0.0);
}

#[test]
fn test_density_curve_extends_past_data() {
    let samples = [2.0, 4.0, 4.5, 5.0, 9.0];
    let curve = density_curve(&samples).unwrap();
    assert_eq!(curve.points.len(), GRID_SIZE);

    let first = curve.points.first().unwrap().0;
    let last = curve.points.last().unwrap().0;
    assert!((first - (2.0 - CUT * curve.bandwidth)).abs() < 1e-9);
    assert!((last - (9.0 + CUT * curve.bandwidth)).abs() < 1e-9);
    assert!(curve.points.windows(2).all(|w| w[0].0 < w[1].0));
    assert!(curve.points.iter().all(|&(_, d)| d >= 0.0));
}

#[test]
fn test_density_curve_integrates_near_one() {
    let samples: Vec<f64> = (0..200).map(|i| (i as f64 * 0.37).sin() * 3.0 + 10.0).collect();
    let curve = density_curve(&samples).unwrap();
    let area: f64 = curve
        .points
        .windows(2)
        .map(|w| (w[1].0 - w[0].0) * (w[0].1 + w[1].1) / 2.0)
        .sum();
    assert!((area - 1.0).abs() < 0.05, "area = {}", area);
}

#[test]
fn test_density_curve_no_spread() {
    assert!(density_curve(&[5.0, 5.0, 5.0]).is_none());
    assert!(density_curve(&[]).is_none());
}

#[test]
fn test_violin_is_symmetric_and_bounded() {
    let samples = [1.0, 2.0, 2.5, 3.0, 3.2, 4.0, 6.0];
    let curve = density_curve(&samples).unwrap();
    let violin = build_violin(2.0, &samples, &curve, curve.max_density(), [2.25, 3.0, 3.6]);

    let widest = violin.profile.iter().map(|&(_, w)| w).fold(0.0, f64::max);
    assert!((widest - VIOLIN_WIDTH / 2.0).abs() < 1e-9);

    let outline = violin.outline();
    assert_eq!(outline.len(), violin.profile.len() * 2);
    let n = violin.profile.len();
    for i in 0..n {
        let (xr, yr) = outline[i];
        let (xl, yl) = outline[2 * n - 1 - i];
        assert_eq!(yr, yl);
        assert!(((xr - 2.0) - (2.0 - xl)).abs() < 1e-12);
        assert!(xr <= 2.0 + VIOLIN_WIDTH / 2.0 + 1e-12);
    }
}

#[test]
fn test_violin_quartile_lines() {
    let samples = [1.0, 2.0, 2.5, 3.0, 3.2, 4.0, 6.0];
    let curve = density_curve(&samples).unwrap();
    let violin = build_violin(0.0, &samples, &curve, curve.max_density(), [2.25, 3.0, 3.6]);

    assert_eq!(violin.quartiles.len(), 3);
    assert!(violin.quartiles[1].is_median);
    assert!(!violin.quartiles[0].is_median && !violin.quartiles[2].is_median);
    for q in &violin.quartiles {
        assert!((q.x_start + q.x_end).abs() < 1e-12, "centered on 0");
        assert!(q.x_end > 0.0);
    }
}

#[test]
fn test_smaller_peak_gives_narrower_violin() {
    let tight = [5.0, 5.1, 5.2, 4.9, 4.8, 5.0];
    let wide = [1.0, 4.0, 9.0, 15.0, 22.0, 30.0];
    let tight_curve = density_curve(&tight).unwrap();
    let wide_curve = density_curve(&wide).unwrap();
    let scale_max = tight_curve.max_density().max(wide_curve.max_density());

    let narrow = build_violin(1.0, &wide, &wide_curve, scale_max, [4.0, 12.0, 20.0]);
    let widest = narrow.profile.iter().map(|&(_, w)| w).fold(0.0, f64::max);
    assert!(widest < VIOLIN_WIDTH / 2.0);
}

#[test]
fn test_clipped_truncates_to_range() {
    let shape = ViolinShape {
        center: 0.0,
        profile: vec![(-10.0, 0.1), (50.0, 0.4), (150.0, 0.2)],
        quartiles: vec![
            QuartileLine {
                y: 20.0,
                x_start: -0.3,
                x_end: 0.3,
                is_median: false,
            },
            QuartileLine {
                y: 120.0,
                x_start: -0.2,
                x_end: 0.2,
                is_median: true,
            },
        ],
    };

    let clipped = shape.clipped(0.0, 100.0);
    let ys: Vec<f64> = clipped.profile.iter().map(|&(y, _)| y).collect();
    assert_eq!(ys, vec![0.0, 50.0, 100.0]);

    // linear interpolation at the bounds
    assert!((clipped.profile[0].1 - 0.15).abs() < 1e-9);
    assert!((clipped.profile[2].1 - 0.3).abs() < 1e-9);

    assert_eq!(clipped.quartiles.len(), 1);
    assert_eq!(clipped.quartiles[0].y, 20.0);
}

#[test]
fn test_clipped_inside_range_is_unchanged() {
    let shape = ViolinShape {
        center: 1.0,
        profile: vec![(5.0, 0.1), (10.0, 0.3), (20.0, 0.1)],
        quartiles: vec![],
    };
    assert_eq!(shape.clipped(0.0, 100.0), shape);
}

#[test]
fn test_dash_segments() {
    let dashes = dash_segments(0.0, 1.0, 0.3, 0.1);
    assert_eq!(dashes.len(), 3);
    assert_eq!(dashes[0], (0.0, 0.3));
    assert!((dashes[2].1 - 1.0).abs() < 1e-12);
    for (a, b) in &dashes {
        assert!(b > a);
        assert!(*b <= 1.0);
    }
}

#[test]
fn test_dash_segments_degenerate() {
    assert!(dash_segments(1.0, 1.0, 0.1, 0.1).is_empty());
    assert!(dash_segments(0.0, 1.0, 0.0, 0.1).is_empty());
    assert_eq!(dash_segments(0.0, 1.0, 0.5, 0.0).len(), 2);
}

#[test]
fn test_build_violins_order_and_palette() {
    let violins = build_violins(&seeded()).unwrap();
    let channels: Vec<_> = violins.iter().map(|v| v.channel).collect();
    assert_eq!(
        channels,
        vec![
            Channel::LiveChat,
            Channel::Email,
            Channel::Phone,
            Channel::SocialMedia,
            Channel::TicketSystem,
        ]
    );
    for (i, violin) in violins.iter().enumerate() {
        assert_eq!(violin.color, SET2[i]);
        assert_eq!(violin.shape.center, i as f64);
    }
}

#[test]
fn test_build_violins_within_visible_range() {
    let (y_min, y_max) = Y_RANGE;
    for violin in build_violins(&seeded()).unwrap() {
        assert!(!violin.shape.profile.is_empty());
        for &(y, w) in &violin.shape.profile {
            assert!((y_min..=y_max).contains(&y));
            assert!(w >= 0.0 && w <= VIOLIN_WIDTH / 2.0 + 1e-12);
        }
        for q in &violin.shape.quartiles {
            assert!((y_min..=y_max).contains(&q.y));
        }
    }
}

#[test]
fn test_build_violins_empty_dataset() {
    assert!(matches!(
        build_violins(&Dataset::default()),
        Err(RenderError::EmptyDataset)
    ));
}

#[test]
fn test_build_violins_skips_constant_channel() {
    let dataset = Dataset::from_records(vec![
        InteractionRecord::new(Channel::Phone, 3.0),
        InteractionRecord::new(Channel::Phone, 3.0),
        InteractionRecord::new(Channel::Email, 10.0),
        InteractionRecord::new(Channel::Email, 14.0),
        InteractionRecord::new(Channel::Email, 30.0),
    ]);
    let violins = build_violins(&dataset).unwrap();
    assert_eq!(violins.len(), 1);
    assert_eq!(violins[0].channel, Channel::Email);
    assert_eq!(violins[0].shape.center, 1.0);
    assert_eq!(violins[0].color, SET2[1]);
}
