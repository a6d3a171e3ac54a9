//! Estimator configuration

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Configuration for bitrate estimation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EstimatorConfig {
    /// Maximum span of upcoming media averaged per track
    #[serde(rename = "max_future_window_ms", with = "duration_ms")]
    pub max_future_window: Duration,
    /// Maximum span of downloaded media averaged for the reference format
    #[serde(rename = "max_past_window_ms", with = "duration_ms")]
    pub max_past_window: Duration,
    /// Prefer history over lookahead when lookahead falls below the
    /// format's nominal bitrate
    pub use_nominal_as_lower_bound: bool,
}

impl Default for EstimatorConfig {
    fn default() -> Self {
        Self {
            max_future_window: Duration::from_secs(30),
            max_past_window: Duration::from_secs(30),
            use_nominal_as_lower_bound: false,
        }
    }
}

impl EstimatorConfig {
    /// Parse a configuration from JSON; missing fields take their defaults
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize to JSON
    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_default()
    }

    /// Check that both windows fit the estimators' microsecond range
    pub fn validate(&self) -> Result<()> {
        for (name, window) in [
            ("max_future_window", self.max_future_window),
            ("max_past_window", self.max_past_window),
        ] {
            if window_us(window).is_none() {
                return Err(Error::InvalidConfig(format!(
                    "{name} of {window:?} exceeds the supported range"
                )));
            }
        }
        Ok(())
    }

    /// Lookahead window in microseconds
    pub fn max_future_window_us(&self) -> i64 {
        window_us(self.max_future_window).unwrap_or(i64::MAX)
    }

    /// History window in microseconds
    pub fn max_past_window_us(&self) -> i64 {
        window_us(self.max_past_window).unwrap_or(i64::MAX)
    }
}

fn window_us(window: Duration) -> Option<i64> {
    i64::try_from(window.as_micros()).ok()
}

mod duration_ms {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(
        duration: &Duration,
        serializer: S,
    ) -> std::result::Result<S::Ok, S::Error> {
        let millis = u64::try_from(duration.as_millis()).unwrap_or(u64::MAX);
        serializer.serialize_u64(millis)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> std::result::Result<Duration, D::Error> {
        u64::deserialize(deserializer).map(Duration::from_millis)
    }
}
