//! Run configuration.

use serde::{Deserialize, Serialize};

/// What happens to values actions emit.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Emission {
    /// Keep every emitted value and return it to the caller
    #[default]
    Collect,

    /// Drop emitted values as they are produced
    Discard,
}

/// Settings for a single run.
///
/// # Example
///
/// ```rust
/// use mealy::{Emission, RunConfig};
///
/// let config = RunConfig::default().with_transcript(true);
///
/// assert_eq!(config.emission, Emission::Collect);
/// assert!(config.record_transcript);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    /// Emission handling for every action invocation
    pub emission: Emission,

    /// Record a transcript entry for each accepted token
    pub record_transcript: bool,
}

impl RunConfig {
    /// Collect emissions, no transcript.
    pub fn collecting() -> Self {
        Self::default()
    }

    /// Discard emissions, no transcript.
    pub fn discarding() -> Self {
        Self::default().with_emission(Emission::Discard)
    }

    /// Set the emission mode.
    pub fn with_emission(mut self, emission: Emission) -> Self {
        self.emission = emission;
        self
    }

    /// Enable or disable the transcript.
    pub fn with_transcript(mut self, record: bool) -> Self {
        self.record_transcript = record;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn presets_select_emission_mode() {
        assert_eq!(RunConfig::collecting().emission, Emission::Collect);
        assert_eq!(RunConfig::discarding().emission, Emission::Discard);
        assert!(!RunConfig::discarding().record_transcript);
    }

    #[test]
    fn missing_fields_use_defaults() {
        let config: RunConfig = serde_json::from_str(r#"{"emission":"discard"}"#).unwrap();

        assert_eq!(config.emission, Emission::Discard);
        assert!(!config.record_transcript);
    }

    #[test]
    fn config_roundtrips_through_json() {
        let config = RunConfig::discarding().with_transcript(true);

        let json = serde_json::to_string(&config).unwrap();
        let deserialized: RunConfig = serde_json::from_str(&json).unwrap();

        assert_eq!(config, deserialized);
    }
}
