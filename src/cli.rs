//! Command-line interface parsing for fishcast
//!
//! This module handles parsing of CLI arguments using clap and turns them into
//! a validated [`StartupConfig`]: which location to forecast, how many days to
//! fetch, the initial list ordering and where to write logs.

use std::path::PathBuf;

use clap::Parser;
use thiserror::Error;

use crate::data::weather::{DEFAULT_FORECAST_DAYS, MAX_FORECAST_DAYS};
use crate::data::{default_location, get_location_by_id, Location};
use crate::forecast::SortMode;

/// Error types for CLI argument parsing
#[derive(Debug, Error)]
pub enum CliError {
    /// The specified location id is not a known preset
    #[error("Invalid location: '{0}'. Valid locations: miami, san-diego, key-west, seattle, charleston")]
    InvalidLocation(String),

    /// Only one of --lat / --lon was given
    #[error("Both --lat and --lon are required for custom coordinates")]
    IncompleteCoordinates,

    /// Coordinates outside the valid range
    #[error("Invalid coordinates: latitude must be within -90..90 and longitude within -180..180 (got {lat}, {lon})")]
    CoordinatesOutOfRange { lat: f64, lon: f64 },

    /// Forecast length outside what the API supports
    #[error("Invalid number of days: {0}. Must be between 1 and 16")]
    InvalidDays(u8),
}

/// fishcast - Rank upcoming days by fishing conditions
#[derive(Parser, Debug)]
#[command(name = "fishcast")]
#[command(about = "Fishing forecast ranked by weather, sea state and moon phase")]
#[command(version)]
pub struct Cli {
    /// Preset location to forecast
    ///
    /// Valid locations: miami, san-diego, key-west, seattle, charleston
    #[arg(long, value_name = "LOCATION")]
    pub location: Option<String>,

    /// Latitude for a custom location (requires --lon)
    #[arg(long, allow_negative_numbers = true, value_name = "DEGREES")]
    pub lat: Option<f64>,

    /// Longitude for a custom location (requires --lat)
    #[arg(long, allow_negative_numbers = true, value_name = "DEGREES")]
    pub lon: Option<f64>,

    /// Number of forecast days (1-16)
    #[arg(long, default_value_t = DEFAULT_FORECAST_DAYS)]
    pub days: u8,

    /// Start with the best days listed first
    #[arg(long)]
    pub ranked: bool,

    /// Write logs to this file (honors RUST_LOG)
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

/// Configuration derived from CLI arguments for application startup
#[derive(Debug, Clone)]
pub struct StartupConfig {
    /// Location to forecast
    pub location: Location,
    /// Number of forecast days
    pub days: u8,
    /// Initial ordering of the forecast list
    pub sort_mode: SortMode,
    /// Log file, if logging is enabled
    pub log_file: Option<PathBuf>,
}

impl Default for StartupConfig {
    fn default() -> Self {
        Self {
            location: default_location(),
            days: DEFAULT_FORECAST_DAYS,
            sort_mode: SortMode::Chronological,
            log_file: None,
        }
    }
}

/// Parses a location argument into a preset Location.
///
/// # Returns
/// * `Ok(Location)` if the id matches a preset
/// * `Err(CliError::InvalidLocation)` if it doesn't
pub fn parse_location_arg(s: &str) -> Result<Location, CliError> {
    get_location_by_id(s)
        .copied()
        .ok_or_else(|| CliError::InvalidLocation(s.to_string()))
}

/// Builds a custom location, checking the coordinate ranges.
pub fn parse_coordinates(lat: f64, lon: f64) -> Result<Location, CliError> {
    if !(-90.0..=90.0).contains(&lat) || !(-180.0..=180.0).contains(&lon) {
        return Err(CliError::CoordinatesOutOfRange { lat, lon });
    }
    Ok(Location::custom(lat, lon))
}

impl StartupConfig {
    /// Creates a StartupConfig from parsed CLI arguments.
    ///
    /// Custom coordinates take precedence over `--location`.
    ///
    /// # Returns
    /// * `Ok(StartupConfig)` with appropriate settings
    /// * `Err(CliError)` if any argument is invalid
    pub fn from_cli(cli: &Cli) -> Result<Self, CliError> {
        if cli.days == 0 || cli.days > MAX_FORECAST_DAYS {
            return Err(CliError::InvalidDays(cli.days));
        }

        let location = match (cli.lat, cli.lon) {
            (Some(lat), Some(lon)) => parse_coordinates(lat, lon)?,
            (Some(_), None) | (None, Some(_)) => return Err(CliError::IncompleteCoordinates),
            (None, None) => match &cli.location {
                Some(id) => parse_location_arg(id)?,
                None => default_location(),
            },
        };

        let sort_mode = if cli.ranked {
            SortMode::Ranked
        } else {
            SortMode::Chronological
        };

        Ok(StartupConfig {
            location,
            days: cli.days,
            sort_mode,
            log_file: cli.log_file.clone(),
        })
    }
}
