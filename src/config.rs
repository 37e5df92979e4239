//! Configuration for demo runs
//!
//! [`GalleryConfig::from_env`] reads:
//! - `SNIPGALLERY_HEAP_LIMIT`: heap limit in bytes (default 10 MiB)
//! - `SNIPGALLERY_FAIL_ALLOC`: 1-based index of the allocation to fail
//! - `NO_COLOR`: any non-empty value disables styled output
//!
//! The builder covers the same knobs for tests and CLI overrides.

use crate::runtime::constants::DEFAULT_HEAP_LIMIT;
use thiserror::Error;

pub const ENV_HEAP_LIMIT: &str = "SNIPGALLERY_HEAP_LIMIT";
pub const ENV_FAIL_ALLOC: &str = "SNIPGALLERY_FAIL_ALLOC";
pub const ENV_NO_COLOR: &str = "NO_COLOR";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("{var}: expected a positive integer, got {value:?}")]
    InvalidNumber { var: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GalleryConfig {
    /// Maximum bytes the simulated heap hands out
    pub heap_limit: usize,
    /// Allocation request (1-based) that returns NULL
    pub fail_allocation: Option<usize>,
    /// Style terminal output
    pub color: bool,
}

impl Default for GalleryConfig {
    fn default() -> Self {
        GalleryConfig {
            heap_limit: DEFAULT_HEAP_LIMIT,
            fail_allocation: None,
            color: true,
        }
    }
}

impl GalleryConfig {
    pub fn builder() -> GalleryConfigBuilder {
        GalleryConfigBuilder::default()
    }

    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Build a config from an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = GalleryConfig::default();

        if let Some(raw) = lookup(ENV_HEAP_LIMIT) {
            config.heap_limit = parse_positive(ENV_HEAP_LIMIT, &raw)?;
        }
        if let Some(raw) = lookup(ENV_FAIL_ALLOC) {
            config.fail_allocation = Some(parse_positive(ENV_FAIL_ALLOC, &raw)?);
        }
        if lookup(ENV_NO_COLOR).is_some_and(|v| !v.is_empty()) {
            config.color = false;
        }

        Ok(config)
    }
}

fn parse_positive(var: &'static str, raw: &str) -> Result<usize, ConfigError> {
    match raw.trim().parse::<usize>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(ConfigError::InvalidNumber {
            var,
            value: raw.to_string(),
        }),
    }
}

#[derive(Debug, Clone, Default)]
pub struct GalleryConfigBuilder {
    config: GalleryConfig,
}

impl GalleryConfigBuilder {
    pub fn heap_limit(mut self, bytes: usize) -> Self {
        self.config.heap_limit = bytes;
        self
    }

    pub fn fail_allocation(mut self, ordinal: usize) -> Self {
        self.config.fail_allocation = Some(ordinal);
        self
    }

    pub fn color(mut self, on: bool) -> Self {
        self.config.color = on;
        self
    }

    pub fn build(self) -> GalleryConfig {
        self.config
    }
}
