use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Tunable timings and sizes of the assistant.
///
/// Durations are written in milliseconds. Missing fields take their defaults:
///
/// ```
/// use std::time::Duration;
///
/// use neuroblox_assistant::AssistantConfig;
///
/// let config: AssistantConfig = serde_json::from_str(r#"{ "autoplay_delay_ms": 50 }"#).unwrap();
/// assert_eq!(config.autoplay_delay, Duration::from_millis(50));
/// assert_eq!(config.hint_interval, Duration::from_secs(5));
/// assert_eq!(config.prediction_count, 3);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AssistantConfig {
    /// Pause between two autonomous moves.
    #[serde(rename = "autoplay_delay_ms", with = "millis")]
    pub autoplay_delay: Duration,
    /// Pause between two periodic hints.
    #[serde(rename = "hint_interval_ms", with = "millis")]
    pub hint_interval: Duration,
    /// Number of upcoming pieces shown in predictive mode.
    pub prediction_count: usize,
}

impl AssistantConfig {
    pub const DEFAULT_AUTOPLAY_DELAY: Duration = Duration::from_millis(300);
    pub const DEFAULT_HINT_INTERVAL: Duration = Duration::from_secs(5);
    pub const DEFAULT_PREDICTION_COUNT: usize = 3;
}

impl Default for AssistantConfig {
    fn default() -> Self {
        Self {
            autoplay_delay: Self::DEFAULT_AUTOPLAY_DELAY,
            hint_interval: Self::DEFAULT_HINT_INTERVAL,
            prediction_count: Self::DEFAULT_PREDICTION_COUNT,
        }
    }
}

mod millis {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let millis = u64::try_from(value.as_millis()).unwrap_or(u64::MAX);
        serializer.serialize_u64(millis)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let millis = u64::deserialize(deserializer)?;
        Ok(Duration::from_millis(millis))
    }
}
