//! Adapter Configuration

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{error, info};

use crate::error::{AbsorptionError, AbsorptionResult};

/// Runtime limits for the absorption adapter
///
/// Hosts can override the defaults with a JSON file (see
/// [`AbsorptionConfig::load`]); a missing or malformed file falls back to
/// defaults rather than failing plugin load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AbsorptionConfig {
    /// Lowest sample rate `set_fs` accepts (Hz)
    pub min_sample_rate: u32,

    /// Highest sample rate `set_fs` accepts (Hz)
    pub max_sample_rate: u32,

    /// Longest input impulse response `apply` accepts (samples)
    pub max_input_len: usize,
}

impl Default for AbsorptionConfig {
    fn default() -> Self {
        Self {
            min_sample_rate: 8_000,
            max_sample_rate: 192_000,
            // 10 seconds of IR at the highest supported rate
            max_input_len: 1_920_000,
        }
    }
}

impl AbsorptionConfig {
    /// Validate configuration
    pub fn validate(&self) -> AbsorptionResult<()> {
        if self.min_sample_rate == 0 || self.min_sample_rate > self.max_sample_rate {
            return Err(AbsorptionError::InvalidConfig(format!(
                "sample rate bounds {}..{} are not a valid range",
                self.min_sample_rate, self.max_sample_rate
            )));
        }
        if self.max_input_len == 0 {
            return Err(AbsorptionError::InvalidConfig(
                "max_input_len must be nonzero".into(),
            ));
        }
        Ok(())
    }

    /// Whether `rate` falls inside the configured bounds
    pub fn allows_sample_rate(&self, rate: u32) -> bool {
        (self.min_sample_rate..=self.max_sample_rate).contains(&rate)
    }

    /// Load configuration from a JSON file, falling back to defaults
    pub fn load(path: &Path) -> Self {
        if path.exists() {
            match fs::File::open(path) {
                Ok(file) => match serde_json::from_reader::<_, Self>(file) {
                    Ok(config) => {
                        if let Err(e) = config.validate() {
                            error!("Rejecting config from {:?}: {}", path, e);
                        } else {
                            info!("Config loaded from {:?}", path);
                            return config;
                        }
                    }
                    Err(e) => {
                        error!("Failed to parse config file: {}", e);
                    }
                },
                Err(e) => {
                    error!("Failed to open config file: {}", e);
                }
            }
        }

        info!("Using default config");
        Self::default()
    }
}
