//! Run configuration.
//!
//! Defaults reproduce the classic emulator setup: ten messages over a clean
//! channel, one new message every 1000 time units on average, seed 9999.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{
    error::{SimulationError, SimulationResult},
    network::{config::check_probability, ChannelConfiguration},
};

/// Parameters of one simulation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Number of application messages to generate before stopping.
    pub messages: u64,
    /// Probability that the channel drops a packet.
    pub loss_probability: f64,
    /// Probability that the channel corrupts a packet.
    pub corrupt_probability: f64,
    /// Mean time between application messages at A.
    pub mean_interarrival: f64,
    /// Trace verbosity: 0 warnings only, 1 faults, 2 events, 3+ everything.
    pub trace: u8,
    /// Seed of the random source.
    pub seed: u64,
    /// Retransmission timeout of the sender.
    pub timeout: f64,
    /// Keep running after the last message until nothing is in flight.
    pub drain: bool,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            messages: 10,
            loss_probability: 0.0,
            corrupt_probability: 0.0,
            mean_interarrival: 1000.0,
            trace: 1,
            seed: 9999,
            timeout: 5000.0,
            drain: false,
        }
    }
}

impl SimulationConfig {
    /// Loads a configuration from a JSON file. Missing fields take defaults.
    pub fn from_json_file(path: impl AsRef<Path>) -> SimulationResult<Self> {
        let raw = std::fs::read_to_string(path)?;
        let config: SimulationConfig = serde_json::from_str(&raw)?;
        Ok(config)
    }

    /// Sets the seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Sets the number of messages.
    pub fn with_messages(mut self, messages: u64) -> Self {
        self.messages = messages;
        self
    }

    /// Sets loss and corruption probabilities.
    pub fn with_faults(mut self, loss_probability: f64, corrupt_probability: f64) -> Self {
        self.loss_probability = loss_probability;
        self.corrupt_probability = corrupt_probability;
        self
    }

    /// Enables or disables draining in-flight traffic at the end.
    pub fn with_drain(mut self, drain: bool) -> Self {
        self.drain = drain;
        self
    }

    /// Channel model derived from this configuration.
    pub fn channel_config(&self) -> ChannelConfiguration {
        ChannelConfiguration::new(self.loss_probability, self.corrupt_probability)
    }

    /// Maps the trace verbosity onto a log level.
    pub fn log_level(&self) -> tracing::Level {
        match self.trace {
            0 => tracing::Level::WARN,
            1 => tracing::Level::INFO,
            2 => tracing::Level::DEBUG,
            _ => tracing::Level::TRACE,
        }
    }

    /// Checks every field for range errors.
    pub fn validate(&self) -> SimulationResult<()> {
        check_probability("loss probability", self.loss_probability)?;
        check_probability("corruption probability", self.corrupt_probability)?;
        if !(self.mean_interarrival > 0.0) {
            return Err(SimulationError::InvalidConfig(format!(
                "mean interarrival time must be positive, got {}",
                self.mean_interarrival
            )));
        }
        if !(self.timeout > 0.0) {
            return Err(SimulationError::InvalidConfig(format!(
                "timeout must be positive, got {}",
                self.timeout
            )));
        }
        if self.drain && (self.loss_probability >= 1.0 || self.corrupt_probability >= 1.0) {
            return Err(SimulationError::InvalidConfig(
                "draining never finishes on a channel that loses or corrupts every packet"
                    .to_string(),
            ));
        }
        self.channel_config().validate()
    }
}
