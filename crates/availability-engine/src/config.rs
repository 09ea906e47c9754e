//! Engine configuration.

use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::error::{AvailabilityError, Result};
use crate::format::parse_timezone;

/// What to do when one participant's events cannot be retrieved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FetchFailurePolicy {
    /// Abort the whole computation with a retrieval error.
    #[default]
    Fail,
    /// Leave the participant out and report them in the result.
    Exclude,
    /// Count the participant as busy for the entire window.
    #[serde(alias = "busy")]
    TreatAsBusy,
}

impl std::str::FromStr for FetchFailurePolicy {
    type Err = AvailabilityError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "fail" => Ok(Self::Fail),
            "exclude" => Ok(Self::Exclude),
            "busy" | "treat_as_busy" => Ok(Self::TreatAsBusy),
            other => Err(AvailabilityError::Config(format!(
                "Unknown fetch failure policy: '{}'. Available policies: fail, exclude, busy",
                other
            ))),
        }
    }
}

/// Settings shared by every computation of one engine.
///
/// Loaded from TOML:
///
/// ```toml
/// fetch_failure_policy = "exclude"
/// timezone = "America/New_York"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub fetch_failure_policy: FetchFailurePolicy,
    /// IANA timezone used to read and write naive datetimes.
    pub timezone: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            fetch_failure_policy: FetchFailurePolicy::default(),
            timezone: "UTC".to_string(),
        }
    }
}

impl EngineConfig {
    /// Parse and validate a TOML configuration. Missing keys take defaults.
    pub fn from_toml_str(s: &str) -> Result<Self> {
        let config: Self =
            toml::from_str(s).map_err(|e| AvailabilityError::Config(e.to_string()))?;
        config.tz()?;
        Ok(config)
    }

    pub fn tz(&self) -> Result<Tz> {
        parse_timezone(&self.timezone)
    }
}
