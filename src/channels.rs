//! Support channels and their response-time profiles
//!
//! The five channel profiles are static configuration. Each profile carries a
//! nominal standard deviation, but sampling uses the fixed log-normal shape
//! [`LOGNORMAL_SIGMA`] for every channel.

use std::fmt;

/// Shape (sigma of the underlying normal) used for every channel
pub const LOGNORMAL_SIGMA: f64 = 0.5;

/// A customer-support contact medium
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Channel {
    LiveChat,
    Email,
    Phone,
    SocialMedia,
    TicketSystem,
}

impl Channel {
    /// Display name, as it appears in the chart and the statistics table
    pub fn name(self) -> &'static str {
        match self {
            Channel::LiveChat => "Live Chat",
            Channel::Email => "Email",
            Channel::Phone => "Phone",
            Channel::SocialMedia => "Social Media",
            Channel::TicketSystem => "Ticket System",
        }
    }

    /// Fixed two-way classification: Live Chat and Phone answer in real time
    pub fn channel_type(self) -> ChannelType {
        match self {
            Channel::LiveChat | Channel::Phone => ChannelType::RealTime,
            Channel::Email | Channel::SocialMedia | Channel::TicketSystem => {
                ChannelType::Asynchronous
            }
        }
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}

/// Whether a channel is answered live or queued
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChannelType {
    RealTime,
    Asynchronous,
}

impl ChannelType {
    pub fn label(self) -> &'static str {
        match self {
            ChannelType::RealTime => "Real-time",
            ChannelType::Asynchronous => "Asynchronous",
        }
    }
}

impl fmt::Display for ChannelType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.label())
    }
}

/// Response-time characteristics of one channel
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChannelProfile {
    pub channel: Channel,
    /// Typical response time in hours (median of the log-normal draw)
    pub mean_hours: f64,
    /// Nominal spread in hours; not consumed by the sampler
    pub std_hours: f64,
    /// Number of interactions to synthesize
    pub size: usize,
}

/// The five channel profiles, in generation order
pub const PROFILES: [ChannelProfile; 5] = [
    // Fast response
    ChannelProfile {
        channel: Channel::LiveChat,
        mean_hours: 5.0,
        std_hours: 2.0,
        size: 800,
    },
    // Moderate response
    ChannelProfile {
        channel: Channel::Email,
        mean_hours: 24.0,
        std_hours: 12.0,
        size: 1200,
    },
    // Quick response
    ChannelProfile {
        channel: Channel::Phone,
        mean_hours: 8.0,
        std_hours: 4.0,
        size: 600,
    },
    // Variable response
    ChannelProfile {
        channel: Channel::SocialMedia,
        mean_hours: 18.0,
        std_hours: 8.0,
        size: 400,
    },
    // Slower response
    ChannelProfile {
        channel: Channel::TicketSystem,
        mean_hours: 48.0,
        std_hours: 20.0,
        size: 500,
    },
];

/// Total number of interactions across all profiles
pub fn total_size() -> usize {
    PROFILES.iter().map(|p| p.size).sum()
}
