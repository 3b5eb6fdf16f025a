//! Configuration for kvlib
//!
//! Centralized configuration with sensible defaults.

use std::path::PathBuf;

use crate::error::{KvError, Result};

/// Default control device path
pub const DEFAULT_DEVICE_PATH: &str = "/dev/kvstore";

/// Default ioctl magic (the driver's major number)
pub const DEFAULT_IOCTL_MAGIC: u8 = 100;

/// Default value ceiling in bytes, terminator excluded
pub const DEFAULT_MAX_VALUE_LEN: usize = 8192;

/// Main configuration for a kvlib client
#[derive(Debug, Clone)]
pub struct Config {
    // -------------------------------------------------------------------------
    // Device Configuration
    // -------------------------------------------------------------------------
    /// Special file the driver exposes; opened once per operation
    pub device_path: PathBuf,

    /// Type field used when encoding ioctl request codes
    pub ioctl_magic: u8,

    // -------------------------------------------------------------------------
    // Limits
    // -------------------------------------------------------------------------
    /// Largest value accepted by set and returned by get (in bytes)
    pub max_value_len: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            device_path: PathBuf::from(DEFAULT_DEVICE_PATH),
            ioctl_magic: DEFAULT_IOCTL_MAGIC,
            max_value_len: DEFAULT_MAX_VALUE_LEN,
        }
    }
}

impl Config {
    /// Create a new config builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    /// Check that the limits fit the request record
    pub fn validate(&self) -> Result<()> {
        if self.max_value_len == 0 {
            return Err(KvError::Config("max_value_len must be non-zero".to_string()));
        }
        if self.max_value_len >= u32::MAX as usize {
            return Err(KvError::Config(format!(
                "max_value_len {} does not fit the request record",
                self.max_value_len
            )));
        }
        if self.device_path.as_os_str().is_empty() {
            return Err(KvError::Config("device_path must not be empty".to_string()));
        }
        Ok(())
    }
}

/// Builder for Config
#[derive(Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Set the control device path
    pub fn device_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.device_path = path.into();
        self
    }

    /// Set the ioctl magic number
    pub fn ioctl_magic(mut self, magic: u8) -> Self {
        self.config.ioctl_magic = magic;
        self
    }

    /// Set the value ceiling (in bytes)
    pub fn max_value_len(mut self, len: usize) -> Self {
        self.config.max_value_len = len;
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}
