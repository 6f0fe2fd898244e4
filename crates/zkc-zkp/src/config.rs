//! # Proving Configuration
//!
//! Where the proving and verification keys live and which commitment-key
//! segment sizes to initialize. Loaded from YAML, then overridden from the
//! environment, then validated.
//!
//! Variables:
//! - `ZKC_PROVING_KEY_PATH`
//! - `ZKC_VERIFICATION_KEY_PATH`
//! - `ZKC_MAX_SEGMENT_SIZE` (default: `1 << 17`)
//! - `ZKC_SUPPORTED_SEGMENT_SIZE` (default: `1 << 15`)
//!
//! Key paths are opaque references handed to the backend. They are never
//! opened or checked for existence here.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::circuits::age;
use crate::error::ConfigError;
use crate::keys::KeyParams;

/// Proving key references and commitment-key sizes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProvingConfig {
    /// Opaque proving key reference.
    pub proving_key_path: PathBuf,
    /// Opaque verification key reference.
    pub verification_key_path: PathBuf,
    /// Largest commitment-key segment.
    #[serde(default = "default_max_segment_size")]
    pub max_segment_size: usize,
    /// Segment size circuits are compiled for.
    #[serde(default = "default_supported_segment_size")]
    pub supported_segment_size: usize,
}

fn default_max_segment_size() -> usize {
    age::MAX_SEGMENT_SIZE
}

fn default_supported_segment_size() -> usize {
    age::SUPPORTED_SEGMENT_SIZE
}

impl Default for ProvingConfig {
    fn default() -> Self {
        Self {
            proving_key_path: PathBuf::from("keys/age-threshold.pk"),
            verification_key_path: PathBuf::from("keys/age-threshold.vk"),
            max_segment_size: default_max_segment_size(),
            supported_segment_size: default_supported_segment_size(),
        }
    }
}

impl ProvingConfig {
    /// Parse YAML. Does not validate.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Read and parse a YAML file. Does not validate.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml_str(&raw)
    }

    /// File (or defaults), then `ZKC_*` overrides, then validation.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let base = match path {
            Some(p) => Self::from_file(p)?,
            None => Self::default(),
        };
        let config = base.with_overrides(|var| std::env::var(var).ok())?;
        config.validate()?;
        tracing::debug!(
            max_segment_size = config.max_segment_size,
            supported_segment_size = config.supported_segment_size,
            "proving config loaded"
        );
        Ok(config)
    }

    /// Apply overrides from `lookup` (normally the process environment).
    pub fn with_overrides(
        mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        if let Some(v) = lookup("ZKC_PROVING_KEY_PATH") {
            self.proving_key_path = PathBuf::from(v);
        }
        if let Some(v) = lookup("ZKC_VERIFICATION_KEY_PATH") {
            self.verification_key_path = PathBuf::from(v);
        }
        if let Some(v) = lookup("ZKC_MAX_SEGMENT_SIZE") {
            self.max_segment_size = parse_size("ZKC_MAX_SEGMENT_SIZE", v)?;
        }
        if let Some(v) = lookup("ZKC_SUPPORTED_SEGMENT_SIZE") {
            self.supported_segment_size = parse_size("ZKC_SUPPORTED_SEGMENT_SIZE", v)?;
        }
        Ok(self)
    }

    /// Segment sizes must be powers of two with supported ≤ max.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.max_segment_size.is_power_of_two() {
            return Err(ConfigError::Invalid(format!(
                "max_segment_size {} is not a power of two",
                self.max_segment_size
            )));
        }
        if !self.supported_segment_size.is_power_of_two() {
            return Err(ConfigError::Invalid(format!(
                "supported_segment_size {} is not a power of two",
                self.supported_segment_size
            )));
        }
        if self.supported_segment_size > self.max_segment_size {
            return Err(ConfigError::Invalid(format!(
                "supported_segment_size {} exceeds max_segment_size {}",
                self.supported_segment_size, self.max_segment_size
            )));
        }
        if self.proving_key_path.as_os_str().is_empty()
            || self.verification_key_path.as_os_str().is_empty()
        {
            return Err(ConfigError::Invalid("key paths must not be empty".to_string()));
        }
        Ok(())
    }

    /// Segment sizes as key parameters.
    pub fn key_params(&self) -> KeyParams {
        KeyParams {
            max_segment_size: self.max_segment_size,
            supported_segment_size: self.supported_segment_size,
        }
    }
}

fn parse_size(var: &'static str, value: String) -> Result<usize, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::InvalidEnv { var, value })
}
