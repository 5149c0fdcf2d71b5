//! Configuration loaded from environment variables.

use std::env;

use anyhow::{Context, Result, bail};

use crate::content::{DEFAULT_EXCERPT_LENGTH, MAX_CONTENT_LENGTH};

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Longest accepted article body, in characters (default: 100000).
    pub max_content_length: usize,

    /// Default excerpt length, in characters (default: 200).
    pub excerpt_length: usize,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let max_content_length = lookup("GAZETTE_MAX_CONTENT_LENGTH")
            .map(|v| v.trim().parse::<usize>())
            .transpose()
            .context("GAZETTE_MAX_CONTENT_LENGTH must be a valid non-negative integer")?
            .unwrap_or(MAX_CONTENT_LENGTH);

        if max_content_length == 0 {
            bail!("GAZETTE_MAX_CONTENT_LENGTH must be greater than zero");
        }

        let excerpt_length = lookup("GAZETTE_EXCERPT_LENGTH")
            .map(|v| v.trim().parse::<usize>())
            .transpose()
            .context("GAZETTE_EXCERPT_LENGTH must be a valid non-negative integer")?
            .unwrap_or(DEFAULT_EXCERPT_LENGTH);

        Ok(Self {
            max_content_length,
            excerpt_length,
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_content_length: MAX_CONTENT_LENGTH,
            excerpt_length: DEFAULT_EXCERPT_LENGTH,
        }
    }
}
