//! Per-channel response time statistics and the console report
//!
//! Mean, variance, min and max come from `trueno::Vector`; quartiles come from
//! aprender's `DescriptiveStats` (R-7 linear interpolation). Standard deviation
//! is the sample form (n-1 denominator).

use crate::channels::Channel;
use crate::dataset::Dataset;
use aprender::stats::DescriptiveStats;
use std::collections::HashMap;
use std::fmt;
use std::io::{self, Write};
use thiserror::Error;
use trueno::Vector;

/// Banner printed above the statistics table
pub const REPORT_TITLE: &str = "Customer Support Response Time Analysis";

/// Width of the `=` rule under the banner
const RULE_WIDTH: usize = 50;

/// Name of the grouping column in the table header
const GROUP_COLUMN: &str = "Support_Channel";

const COLUMNS: [&str; 8] = ["count", "mean", "std", "min", "25%", "50%", "75%", "max"];

/// Errors raised while summarizing response times
#[derive(Error, Debug)]
pub enum StatsError {
    #[error("No response times recorded for {0}")]
    EmptyChannel(Channel),

    #[error("Failed to compute {what} for {channel}: {message}")]
    Computation {
        channel: Channel,
        what: &'static str,
        message: String,
    },
}

/// Response times collected for one channel
#[derive(Debug, Clone, Default)]
pub struct ChannelSamples {
    /// Number of recorded interactions
    pub count: u64,
    /// Individual response times in hours
    pub hours: Vec<f64>,
}

/// Descriptive statistics for one channel
#[derive(Debug, Clone, PartialEq)]
pub struct DescribeStats {
    pub count: u64,
    pub mean: f64,
    /// Sample standard deviation; NaN with fewer than two samples
    pub std: f64,
    pub min: f64,
    pub p25: f64,
    pub median: f64,
    pub p75: f64,
    pub max: f64,
}

impl DescribeStats {
    /// Values in table column order
    fn columns(&self) -> [f64; 8] {
        [
            self.count as f64,
            self.mean,
            self.std,
            self.min,
            self.p25,
            self.median,
            self.p75,
            self.max,
        ]
    }
}

/// Tracks response times per channel
#[derive(Debug, Default)]
pub struct StatsTracker {
    stats: HashMap<Channel, ChannelSamples>,
}

impl StatsTracker {
    /// Create a new statistics tracker
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a tracker holding every record of a dataset
    pub fn from_dataset(dataset: &Dataset) -> Self {
        let mut tracker = Self::new();
        for record in dataset.records() {
            tracker.record(record.channel, record.response_time_hours);
        }
        tracker
    }

    /// Record one interaction
    pub fn record(&mut self, channel: Channel, hours: f64) {
        let entry = self.stats.entry(channel).or_default();
        entry.count += 1;
        entry.hours.push(hours);
    }

    pub fn samples(&self, channel: Channel) -> Option<&ChannelSamples> {
        self.stats.get(&channel)
    }

    /// Total interactions across every channel
    pub fn total_count(&self) -> u64 {
        self.stats.values().map(|s| s.count).sum()
    }

    /// Channels sorted by display name, matching group-by key order
    pub fn channels_by_name(&self) -> Vec<Channel> {
        let mut channels: Vec<_> = self.stats.keys().copied().collect();
        channels.sort_by_key(|c| c.name());
        channels
    }

    /// Compute descriptive statistics for one channel
    pub fn describe(&self, channel: Channel) -> Result<DescribeStats, StatsError> {
        let samples = self
            .stats
            .get(&channel)
            .filter(|s| !s.hours.is_empty())
            .ok_or(StatsError::EmptyChannel(channel))?;

        let hours: Vec<f32> = samples.hours.iter().map(|&h| h as f32).collect();
        compute_describe(channel, samples.count, &hours)
    }

    /// Describe every channel, rows ordered by channel name
    pub fn summary_table(&self) -> Result<StatsTable, StatsError> {
        let rows = self
            .channels_by_name()
            .into_iter()
            .map(|channel| Ok((channel, self.describe(channel)?)))
            .collect::<Result<Vec<_>, StatsError>>()?;
        Ok(StatsTable { rows })
    }
}

fn compute_describe(
    channel: Channel,
    count: u64,
    hours: &[f32],
) -> Result<DescribeStats, StatsError> {
    let err = |what: &'static str, message: String| StatsError::Computation {
        channel,
        what,
        message,
    };

    let v = Vector::from_slice(hours);
    let mean = v.mean().map_err(|e| err("mean", e.to_string()))?;
    let min = v.min().map_err(|e| err("min", e.to_string()))?;
    let max = v.max().map_err(|e| err("max", e.to_string()))?;

    // trueno reports population variance; rescale to the sample form
    let n = hours.len();
    let std = if n < 2 {
        f64::NAN
    } else {
        let variance = v.variance().map_err(|e| err("variance", e.to_string()))?;
        (f64::from(variance) * n as f64 / (n - 1) as f64).sqrt()
    };

    let descriptive = DescriptiveStats::new(&v);
    let p25 = descriptive
        .quantile(0.25)
        .map_err(|e| err("25th percentile", e.to_string()))?;
    let median = descriptive
        .quantile(0.5)
        .map_err(|e| err("median", e.to_string()))?;
    let p75 = descriptive
        .quantile(0.75)
        .map_err(|e| err("75th percentile", e.to_string()))?;

    Ok(DescribeStats {
        count,
        mean: f64::from(mean),
        std,
        min: f64::from(min),
        p25: f64::from(p25),
        median: f64::from(median),
        p75: f64::from(p75),
        max: f64::from(max),
    })
}

/// Describe table, one row per channel
#[derive(Debug, Clone)]
pub struct StatsTable {
    rows: Vec<(Channel, DescribeStats)>,
}

impl StatsTable {
    pub fn rows(&self) -> &[(Channel, DescribeStats)] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    fn cells(&self) -> Vec<[String; 8]> {
        self.rows
            .iter()
            .map(|(_, stats)| stats.columns().map(|value| format!("{:.2}", round2(value))))
            .collect()
    }
}

impl fmt::Display for StatsTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let cells = self.cells();

        let label_width = self
            .rows
            .iter()
            .map(|(c, _)| c.name().len())
            .chain(std::iter::once(GROUP_COLUMN.len()))
            .max()
            .unwrap_or(0);

        let widths: Vec<usize> = (0..COLUMNS.len())
            .map(|i| {
                cells
                    .iter()
                    .map(|row| row[i].len())
                    .chain(std::iter::once(COLUMNS[i].len()))
                    .max()
                    .unwrap_or(0)
            })
            .collect();

        write!(f, "{:label_width$}", "")?;
        for (name, &width) in COLUMNS.iter().zip(&widths) {
            write!(f, "  {:>width$}", name)?;
        }
        writeln!(f)?;
        writeln!(f, "{}", GROUP_COLUMN)?;

        for ((channel, _), row) in self.rows.iter().zip(&cells) {
            write!(f, "{:<label_width$}", channel)?;
            for (cell, &width) in row.iter().zip(&widths) {
                write!(f, "  {:>width$}", cell)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Round to two decimals, half away from zero
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Format an integer with comma thousands separators (3500 -> "3,500")
pub fn format_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Write the banner, total count and per-channel table
pub fn write_report<W: Write>(out: &mut W, dataset: &Dataset) -> anyhow::Result<()> {
    let tracker = StatsTracker::from_dataset(dataset);
    let table = tracker.summary_table()?;

    writeln!(out, "{}", REPORT_TITLE)?;
    writeln!(out, "{}", "=".repeat(RULE_WIDTH))?;
    writeln!(
        out,
        "Total interactions analyzed: {}",
        format_thousands(dataset.len() as u64)
    )?;
    writeln!(out, "\nResponse Time Statistics by Channel (Hours):")?;
    write!(out, "{}", table)?;
    Ok(())
}

/// Print the report to stdout
pub fn print_report(dataset: &Dataset) -> anyhow::Result<()> {
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    write_report(&mut handle, dataset)?;
    handle.flush()?;
    Ok(())
}
