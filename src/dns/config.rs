//! Host cache configuration.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default delay between two refresh cycles of a host.
pub const DEFAULT_REFRESH_INTERVAL: Duration = Duration::from_secs(60);

/// Shortest accepted delay between two refresh cycles.
pub const MIN_REFRESH_INTERVAL: Duration = Duration::from_secs(1);

/// Configuration of a [`HostCache`](super::HostCache).
///
/// Deserializes from a section such as:
///
/// ```json
/// { "tag": "upstream-resolver", "refresh_interval_secs": 30 }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolverConfig {
    /// Label attached to every log event of this cache
    pub tag: String,
    /// Delay between refresh cycles, regardless of their outcome
    #[serde(rename = "refresh_interval_secs", with = "duration_secs")]
    pub refresh_interval: Duration,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            tag: "resolver".to_string(),
            refresh_interval: DEFAULT_REFRESH_INTERVAL,
        }
    }
}

impl ResolverConfig {
    /// Create a new config with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the log tag.
    pub fn tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = tag.into();
        self
    }

    /// Set the refresh interval, raised to [`MIN_REFRESH_INTERVAL`] if shorter.
    pub fn refresh_interval(mut self, interval: Duration) -> Self {
        self.refresh_interval = interval.max(MIN_REFRESH_INTERVAL);
        self
    }
}

mod duration_secs {
    use serde::{de::Error, Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(value.as_secs())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        let secs = u64::deserialize(deserializer)?;
        if secs == 0 {
            return Err(D::Error::custom("refresh_interval_secs must be at least 1"));
        }
        Ok(Duration::from_secs(secs))
    }
}
