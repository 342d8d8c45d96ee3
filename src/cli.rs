//! Command-line interface parsing for Trip Guide
//!
//! This module handles parsing of CLI arguments using clap: the itinerary
//! service base URL, demo mode, the health check interval and the log file.

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use thiserror::Error;

use crate::background::DEFAULT_HEALTH_INTERVAL;
use crate::data::client::DEFAULT_BASE_URL;

/// Error types for CLI argument parsing
#[derive(Debug, Error)]
pub enum CliError {
    /// The base URL is not an http(s) URL
    #[error("Invalid base URL: '{0}'. Expected something like http://localhost:5000")]
    InvalidBaseUrl(String),

    /// The health check interval is zero
    #[error("Invalid health interval: must be at least 1 second")]
    InvalidHealthInterval,
}

/// Trip Guide - plan a trip and browse a day-by-day itinerary in the terminal
#[derive(Parser, Debug)]
#[command(name = "tripguide")]
#[command(about = "Terminal trip planner backed by an itinerary generation service")]
#[command(version)]
pub struct Cli {
    /// Base URL of the itinerary service
    #[arg(long, env = "TRIPGUIDE_API_URL", default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// Render itineraries from the bundled demo dataset instead of the service
    #[arg(long)]
    pub demo: bool,

    /// Seconds between connectivity checks
    #[arg(long, value_name = "SECS", default_value_t = DEFAULT_HEALTH_INTERVAL.as_secs())]
    pub health_interval: u64,

    /// Write logs to this file instead of the default cache location
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

/// Configuration derived from CLI arguments for application startup
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StartupConfig {
    /// Itinerary service base URL, without a trailing slash
    pub base_url: String,
    /// Whether to render from the bundled dataset
    pub demo: bool,
    /// Interval between connectivity checks
    pub health_interval: Duration,
    /// Explicit log file location
    pub log_file: Option<PathBuf>,
}

impl Default for StartupConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            demo: false,
            health_interval: DEFAULT_HEALTH_INTERVAL,
            log_file: None,
        }
    }
}

/// Checks that a base URL looks like `http(s)://host[...]`
///
/// # Returns
/// * `Ok(String)` with any trailing slashes removed
/// * `Err(CliError::InvalidBaseUrl)` otherwise
pub fn parse_base_url(raw: &str) -> Result<String, CliError> {
    let trimmed = raw.trim().trim_end_matches('/');
    let host = trimmed
        .strip_prefix("http://")
        .or_else(|| trimmed.strip_prefix("https://"));

    match host {
        Some(rest) if !rest.is_empty() && !rest.contains(char::is_whitespace) => {
            Ok(trimmed.to_string())
        }
        _ => Err(CliError::InvalidBaseUrl(raw.to_string())),
    }
}

impl StartupConfig {
    /// Creates a StartupConfig from parsed CLI arguments.
    ///
    /// # Returns
    /// * `Ok(StartupConfig)` with validated settings
    /// * `Err(CliError)` if the base URL or interval is invalid
    pub fn from_cli(cli: &Cli) -> Result<Self, CliError> {
        if cli.health_interval == 0 {
            return Err(CliError::InvalidHealthInterval);
        }

        Ok(StartupConfig {
            base_url: parse_base_url(&cli.base_url)?,
            demo: cli.demo,
            health_interval: Duration::from_secs(cli.health_interval),
            log_file: cli.log_file.clone(),
        })
    }
}
