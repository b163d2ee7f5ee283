//! Model settings, loaded from an optional TOML file.
//!
//! Every key is optional; missing keys keep the values below.

use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file `{}`: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ModelConfig {
    /// Share of rows held out for the test accuracy.
    pub test_ratio: f64,
    pub seed: u64,
    /// Inverse regularization strength `C`.
    pub regularization: f64,
    pub max_iterations: usize,
    pub tolerance: f64,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            test_ratio: 0.1,
            seed: 1,
            regularization: 1.0,
            max_iterations: 100,
            tolerance: 1e-6,
        }
    }
}

impl ModelConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&contents)?;

        tracing::info!(path = %path.display(), ?config, "loaded model config");
        Ok(config)
    }

    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        let config: ModelConfig = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.test_ratio.is_nan() || self.test_ratio <= 0.0 || self.test_ratio >= 1.0 {
            return Err(ConfigError::Invalid(format!(
                "test_ratio must be between 0 and 1 (exclusive), got {}",
                self.test_ratio
            )));
        }
        if !self.regularization.is_finite() || self.regularization <= 0.0 {
            return Err(ConfigError::Invalid(format!(
                "regularization must be a positive number, got {}",
                self.regularization
            )));
        }
        if self.max_iterations == 0 {
            return Err(ConfigError::Invalid(
                "max_iterations must be at least 1".to_owned(),
            ));
        }
        if self.tolerance.is_nan() || self.tolerance <= 0.0 {
            return Err(ConfigError::Invalid(format!(
                "tolerance must be positive, got {}",
                self.tolerance
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn defaults_hold_out_a_tenth_with_seed_one() {
        let config = ModelConfig::default();
        assert!((config.test_ratio - 0.1).abs() < f64::EPSILON);
        assert_eq!(config.seed, 1);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn missing_keys_fall_back_to_defaults() {
        let config = ModelConfig::from_toml_str("seed = 42").unwrap();
        assert_eq!(config.seed, 42);
        assert_eq!(config.max_iterations, ModelConfig::default().max_iterations);
    }

    #[test]
    fn empty_file_is_the_default_config() {
        assert_eq!(
            ModelConfig::from_toml_str("").unwrap(),
            ModelConfig::default()
        );
    }

    #[test]
    fn loads_from_disk() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "test_ratio = 0.2\nregularization = 0.5").unwrap();

        let config = ModelConfig::load(file.path()).unwrap();
        assert!((config.test_ratio - 0.2).abs() < f64::EPSILON);
        assert!((config.regularization - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn rejects_out_of_range_values() {
        for toml in [
            "test_ratio = 0.0",
            "test_ratio = 1.0",
            "regularization = 0.0",
            "max_iterations = 0",
            "tolerance = -1.0",
        ] {
            assert!(
                matches!(ModelConfig::from_toml_str(toml), Err(ConfigError::Invalid(_))),
                "{toml} should be rejected"
            );
        }
    }

    #[test]
    fn rejects_unknown_keys() {
        assert!(matches!(
            ModelConfig::from_toml_str("learning_rate = 0.1"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn missing_file_is_a_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = ModelConfig::load(&dir.path().join("model.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }
}
