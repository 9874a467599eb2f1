//! Synthetic support-interaction dataset
//!
//! Response times are drawn per channel from a log-normal distribution whose
//! underlying normal has mean `ln(profile.mean_hours)` and sigma
//! [`LOGNORMAL_SIGMA`], then clipped into [`MIN_RESPONSE_HOURS`,
//! `MAX_RESPONSE_HOURS`]. Records are kept in generation order: profile order
//! first, then draw order within a profile.

use crate::channels::{Channel, ChannelProfile, ChannelType, LOGNORMAL_SIGMA, PROFILES};
use rand::Rng;
use rand_distr::{Distribution, LogNormal};
use thiserror::Error;
use tracing::debug;

/// Seed used by the binary so every run produces the same dataset
pub const DEFAULT_SEED: u64 = 42;

/// Lower clip bound for response times (hours)
pub const MIN_RESPONSE_HOURS: f64 = 0.5;

/// Upper clip bound for response times (hours)
pub const MAX_RESPONSE_HOURS: f64 = 120.0;

/// Errors raised while synthesizing the dataset
#[derive(Error, Debug)]
pub enum DatasetError {
    #[error("Invalid log-normal parameters for {channel}: {source}")]
    Distribution {
        channel: Channel,
        #[source]
        source: rand_distr::NormalError,
    },
}

/// One synthetic support interaction
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InteractionRecord {
    pub channel: Channel,
    pub response_time_hours: f64,
    pub channel_type: ChannelType,
}

impl InteractionRecord {
    pub fn new(channel: Channel, response_time_hours: f64) -> Self {
        Self {
            channel,
            response_time_hours,
            channel_type: channel.channel_type(),
        }
    }
}

/// Ordered collection of interaction records
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    records: Vec<InteractionRecord>,
}

impl Dataset {
    pub fn from_records(records: Vec<InteractionRecord>) -> Self {
        Self { records }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[InteractionRecord] {
        &self.records
    }

    /// Distinct channels in order of first appearance
    pub fn channels(&self) -> Vec<Channel> {
        let mut seen = Vec::new();
        for record in &self.records {
            if !seen.contains(&record.channel) {
                seen.push(record.channel);
            }
        }
        seen
    }

    /// Response times for one channel, in draw order
    pub fn response_times(&self, channel: Channel) -> Vec<f64> {
        self.records
            .iter()
            .filter(|r| r.channel == channel)
            .map(|r| r.response_time_hours)
            .collect()
    }
}

/// Clip a response time into the accepted range
pub fn clip_response_time(hours: f64) -> f64 {
    hours.clamp(MIN_RESPONSE_HOURS, MAX_RESPONSE_HOURS)
}

/// Draw `profile.size` clipped response times for a single channel
pub fn sample_channel<R: Rng + ?Sized>(
    profile: &ChannelProfile,
    rng: &mut R,
) -> Result<Vec<f64>, DatasetError> {
    // profile.std_hours is intentionally not used; every channel shares the shape
    let dist = LogNormal::new(profile.mean_hours.ln(), LOGNORMAL_SIGMA).map_err(|source| {
        DatasetError::Distribution {
            channel: profile.channel,
            source,
        }
    })?;

    Ok((0..profile.size)
        .map(|_| clip_response_time(dist.sample(rng)))
        .collect())
}

/// Generate the full dataset from the static channel profiles
pub fn generate_support_data<R: Rng + ?Sized>(rng: &mut R) -> Result<Dataset, DatasetError> {
    generate_from_profiles(&PROFILES, rng)
}

/// Generate a dataset from an arbitrary set of profiles
pub fn generate_from_profiles<R: Rng + ?Sized>(
    profiles: &[ChannelProfile],
    rng: &mut R,
) -> Result<Dataset, DatasetError> {
    let capacity = profiles.iter().map(|p| p.size).sum();
    let mut records = Vec::with_capacity(capacity);

    for profile in profiles {
        let times = sample_channel(profile, rng)?;
        debug!(
            channel = profile.channel.name(),
            samples = times.len(),
            "sampled response times"
        );
        records.extend(
            times
                .into_iter()
                .map(|t| InteractionRecord::new(profile.channel, t)),
        );
    }

    Ok(Dataset::from_records(records))
}
