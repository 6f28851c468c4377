//! Configuration for RingKV
//!
//! Centralized configuration with sensible defaults.

use crate::error::{Result, RingError};

/// Main configuration for a block store instance
#[derive(Debug, Clone)]
pub struct Config {
    // -------------------------------------------------------------------------
    // Buffer Configuration
    // -------------------------------------------------------------------------
    /// Size of the pre-allocated ring region (in bytes). Fixed for the
    /// lifetime of the store.
    pub capacity: usize,

    // -------------------------------------------------------------------------
    // Admission Configuration
    // -------------------------------------------------------------------------
    /// Largest frame (header + key + value) a single put may write.
    /// `None` means the whole capacity.
    pub max_frame_size: Option<usize>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            capacity: 64 * 1024 * 1024, // 64 MB
            max_frame_size: None,
        }
    }
}

impl Config {
    /// Create a new config builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    /// Frame size limit actually enforced on puts
    pub fn frame_limit(&self) -> usize {
        self.max_frame_size
            .map(|limit| limit.min(self.capacity))
            .unwrap_or(self.capacity)
    }

    /// Check the configuration for values a store cannot be built with
    pub fn validate(&self) -> Result<()> {
        if self.capacity == 0 {
            return Err(RingError::InvalidConfig(
                "capacity must be greater than zero".to_string(),
            ));
        }

        if self.max_frame_size == Some(0) {
            return Err(RingError::InvalidConfig(
                "max_frame_size must be greater than zero".to_string(),
            ));
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
    /// Set the ring capacity (in bytes)
    pub fn capacity(mut self, bytes: usize) -> Self {
        self.config.capacity = bytes;
        self
    }

    /// Cap the size of any single frame (in bytes)
    pub fn max_frame_size(mut self, bytes: usize) -> Self {
        self.config.max_frame_size = Some(bytes);
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}
