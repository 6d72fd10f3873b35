//! Core data models for fishcast
//!
//! This module contains the normalized per-day observation consumed by the
//! scoring engine, the fishing locations, and the Open-Meteo client that
//! produces observations from remote forecast data.

pub mod locations;
pub mod weather;

pub use locations::{all_locations, default_location, get_location_by_id, Location};
pub use weather::{ForecastClient, ForecastError};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Surface pressure assumed when the forecast has no value (hPa)
pub const DEFAULT_PRESSURE_HPA: f64 = 1013.0;

/// Visibility assumed when the forecast has no value (meters)
pub const DEFAULT_VISIBILITY_M: f64 = 10000.0;

/// Feet per meter, used for wave heights
pub const FEET_PER_METER: f64 = 3.28084;

/// Converts meters to feet.
pub fn meters_to_feet(meters: f64) -> f64 {
    meters * FEET_PER_METER
}

/// Converts degrees Celsius to degrees Fahrenheit.
pub fn celsius_to_fahrenheit(celsius: f64) -> f64 {
    celsius * 9.0 / 5.0 + 32.0
}

/// One day of normalized weather and marine conditions.
///
/// Every field is populated: missing upstream values are replaced with their
/// documented fallback during ingestion, so scoring never sees a gap.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyWeatherObservation {
    /// Forecast day in the location's timezone
    pub date: NaiveDate,
    /// Representative (noon) temperature in Fahrenheit
    pub temperature_f: f64,
    /// Feels-like temperature in Fahrenheit
    pub apparent_temperature_f: f64,
    /// Daily accumulated precipitation in inches
    pub precipitation_in: f64,
    /// Chance of precipitation (0-100)
    pub precipitation_probability_pct: f64,
    /// Maximum daily wind speed in knots
    pub wind_speed_kt: f64,
    /// Wind direction in degrees (0-360)
    pub wind_direction_deg: f64,
    /// Mean cloud cover (0-100)
    pub cloud_cover_pct: f64,
    /// Maximum wave height in feet
    pub wave_height_ft: f64,
    /// Maximum wave period in seconds
    pub wave_period_s: f64,
    /// Relative humidity (0-100)
    pub relative_humidity_pct: f64,
    /// Surface pressure in hPa
    pub surface_pressure_hpa: f64,
    /// Visibility in meters
    pub visibility_m: f64,
}

impl DailyWeatherObservation {
    /// Creates an observation for `date` with every field at its fallback value.
    pub fn with_defaults(date: NaiveDate) -> Self {
        Self {
            date,
            temperature_f: 0.0,
            apparent_temperature_f: 0.0,
            precipitation_in: 0.0,
            precipitation_probability_pct: 0.0,
            wind_speed_kt: 0.0,
            wind_direction_deg: 0.0,
            cloud_cover_pct: 0.0,
            wave_height_ft: 0.0,
            wave_period_s: 0.0,
            relative_humidity_pct: 0.0,
            surface_pressure_hpa: DEFAULT_PRESSURE_HPA,
            visibility_m: DEFAULT_VISIBILITY_M,
        }
    }
}
