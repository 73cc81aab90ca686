use thiserror::Error;

/// Errors raised while loading settings from the environment
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Required setting '{setting_name}' is missing")]
    MissingSetting { setting_name: String },

    #[error("Setting '{setting_name}' must be at least {expected} characters, got {actual}")]
    TooShort {
        setting_name: String,
        expected: usize,
        actual: usize,
    },

    #[error("Setting '{setting_name}' has invalid format. Expected: {expected}, got: {actual}")]
    InvalidFormat {
        setting_name: String,
        expected: String,
        actual: String,
    },
}

impl ConfigError {
    pub fn missing(setting_name: &str) -> Self {
        Self::MissingSetting {
            setting_name: setting_name.to_string(),
        }
    }

    pub fn too_short(setting_name: &str, expected: usize, actual: usize) -> Self {
        Self::TooShort {
            setting_name: setting_name.to_string(),
            expected,
            actual,
        }
    }

    pub fn invalid_format(setting_name: &str, expected: &str, actual: &str) -> Self {
        Self::InvalidFormat {
            setting_name: setting_name.to_string(),
            expected: expected.to_string(),
            actual: actual.to_string(),
        }
    }
}
