//! Open-Meteo forecast and marine API client
//!
//! Fetches the weather forecast and marine forecast for a location
//! concurrently and normalizes them into one [`DailyWeatherObservation`] per
//! forecast day. Missing values are replaced with documented fallbacks here so
//! the scoring engine never has to deal with gaps.

use chrono::NaiveDate;
use reqwest::Client;
use serde::Deserialize;
use thiserror::Error;

use super::{
    celsius_to_fahrenheit, meters_to_feet, DailyWeatherObservation, Location,
    DEFAULT_PRESSURE_HPA, DEFAULT_VISIBILITY_M,
};

/// Base URL for the Open-Meteo forecast API
const OPEN_METEO_FORECAST_URL: &str = "https://api.open-meteo.com/v1/forecast";

/// Base URL for the Open-Meteo marine API
const OPEN_METEO_MARINE_URL: &str = "https://marine-api.open-meteo.com/v1/marine";

/// Daily fields requested from the forecast API
const DAILY_FIELDS: &str = "temperature_2m_max,temperature_2m_min,precipitation_sum,precipitation_probability_max,wind_speed_10m_max,cloud_cover_mean";

/// Hourly fields requested from the forecast API
const HOURLY_FIELDS: &str = "temperature_2m,relative_humidity_2m,apparent_temperature,precipitation,cloud_cover,wind_speed_10m,wind_direction_10m,surface_pressure,visibility";

/// Hour of day sampled as the representative value for hourly fields
const NOON_HOUR: usize = 12;

/// Number of forecast days fetched when not specified
pub const DEFAULT_FORECAST_DAYS: u8 = 10;

/// Maximum forecast days supported by Open-Meteo
pub const MAX_FORECAST_DAYS: u8 = 16;

/// Errors that can occur when fetching forecast data
#[derive(Debug, Error)]
pub enum ForecastError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    /// Service answered with a non-success status
    #[error("{service} API returned HTTP {status}")]
    HttpStatus { service: &'static str, status: u16 },

    /// Failed to parse JSON response
    #[error("Failed to parse JSON response: {0}")]
    ParseError(#[from] serde_json::Error),

    /// Missing expected field in response
    #[error("Missing expected field in response: {0}")]
    MissingField(String),

    /// Invalid date in response
    #[error("Invalid date: {0}")]
    InvalidDate(String),
}

/// Client for fetching daily fishing observations from Open-Meteo
#[derive(Debug, Clone)]
pub struct ForecastClient {
    client: Client,
    forecast_url: String,
    marine_url: String,
}

impl Default for ForecastClient {
    fn default() -> Self {
        Self::new()
    }
}

impl ForecastClient {
    /// Create a new ForecastClient with default settings
    pub fn new() -> Self {
        Self::with_client(Client::new())
    }

    /// Create a new ForecastClient with a custom HTTP client
    pub fn with_client(client: Client) -> Self {
        Self {
            client,
            forecast_url: OPEN_METEO_FORECAST_URL.to_string(),
            marine_url: OPEN_METEO_MARINE_URL.to_string(),
        }
    }

    /// Points the client at different forecast and marine endpoints
    pub fn with_base_urls(mut self, forecast: impl Into<String>, marine: impl Into<String>) -> Self {
        self.forecast_url = forecast.into();
        self.marine_url = marine.into();
        self
    }

    /// Builds the forecast request URL in imperial units
    fn forecast_request_url(&self, location: &Location, days: u8) -> String {
        format!(
            "{}?latitude={}&longitude={}&daily={}&hourly={}&timezone=auto&forecast_days={}&temperature_unit=fahrenheit&wind_speed_unit=kn&precipitation_unit=inch",
            self.forecast_url, location.latitude, location.longitude, DAILY_FIELDS, HOURLY_FIELDS, days
        )
    }

    /// Builds the marine request URL (wave heights come back in meters)
    fn marine_request_url(&self, location: &Location, days: u8) -> String {
        format!(
            "{}?latitude={}&longitude={}&daily=wave_height_max,wave_period_max&timezone=auto&forecast_days={}",
            self.marine_url, location.latitude, location.longitude, days
        )
    }

    /// Fetch normalized daily observations for a location
    ///
    /// # Arguments
    /// * `location` - Where to fetch the forecast for
    /// * `days` - Number of forecast days (clamped to 1..=16)
    ///
    /// # Returns
    /// * `Ok(Vec<DailyWeatherObservation>)` - One observation per forecast day
    /// * `Err(ForecastError)` - If either request or the parsing fails
    pub async fn fetch_observations(
        &self,
        location: &Location,
        days: u8,
    ) -> Result<Vec<DailyWeatherObservation>, ForecastError> {
        let days = days.clamp(1, MAX_FORECAST_DAYS);
        let forecast_url = self.forecast_request_url(location, days);
        let marine_url = self.marine_request_url(location, days);

        tracing::debug!(location = location.id, days, "fetching forecast and marine data");

        let (forecast_text, marine_text) = futures::try_join!(
            self.get_text(&forecast_url, "forecast"),
            self.get_text(&marine_url, "marine"),
        )?;

        let forecast: ForecastResponse = serde_json::from_str(&forecast_text)?;
        let marine: MarineResponse = serde_json::from_str(&marine_text)?;

        let observations = normalize_observations(&forecast, &marine)?;
        tracing::info!(
            location = location.id,
            count = observations.len(),
            "forecast normalized"
        );
        Ok(observations)
    }

    /// Performs a GET and returns the body, failing on non-success statuses
    async fn get_text(&self, url: &str, service: &'static str) -> Result<String, ForecastError> {
        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            tracing::warn!(service, status = status.as_u16(), "request rejected");
            return Err(ForecastError::HttpStatus {
                service,
                status: status.as_u16(),
            });
        }
        Ok(response.text().await?)
    }
}

/// Returns the value at `index`, treating out-of-range and null alike
fn value_at(values: &[Option<f64>], index: usize) -> Option<f64> {
    values.get(index).copied().flatten()
}

/// Combines the forecast and marine payloads into daily observations
fn normalize_observations(
    forecast: &ForecastResponse,
    marine: &MarineResponse,
) -> Result<Vec<DailyWeatherObservation>, ForecastError> {
    let daily = &forecast.daily;
    let hourly = &forecast.hourly;

    if daily.time.is_empty() {
        return Err(ForecastError::MissingField("daily.time".to_string()));
    }

    let to_fahrenheit = |value: f64| {
        if forecast.reports_celsius() {
            celsius_to_fahrenheit(value)
        } else {
            value
        }
    };

    let empty = MarineDaily::default();
    let marine_daily = marine.daily.as_ref().unwrap_or(&empty);

    let mut observations = Vec::with_capacity(daily.time.len());

    for (i, day) in daily.time.iter().enumerate() {
        let date = NaiveDate::parse_from_str(day, "%Y-%m-%d")
            .map_err(|_| ForecastError::InvalidDate(day.clone()))?;
        let noon = i * 24 + NOON_HOUR;
        let daily_max = value_at(&daily.temperature_2m_max, i);

        let temperature = value_at(&hourly.temperature_2m, noon).or(daily_max);
        if temperature.is_none() {
            tracing::warn!(%date, "no temperature in forecast, using fallback");
        }
        let apparent = value_at(&hourly.apparent_temperature, noon).or(daily_max);

        let wave_height_m = value_at(&marine_daily.wave_height_max, i).unwrap_or(0.0);

        observations.push(DailyWeatherObservation {
            date,
            temperature_f: temperature.map(to_fahrenheit).unwrap_or(0.0),
            apparent_temperature_f: apparent.map(to_fahrenheit).unwrap_or(0.0),
            precipitation_in: value_at(&daily.precipitation_sum, i)
                .unwrap_or(0.0)
                .max(0.0),
            precipitation_probability_pct: value_at(&daily.precipitation_probability_max, i)
                .unwrap_or(0.0)
                .clamp(0.0, 100.0),
            wind_speed_kt: value_at(&daily.wind_speed_10m_max, i)
                .unwrap_or(0.0)
                .max(0.0),
            wind_direction_deg: value_at(&hourly.wind_direction_10m, noon)
                .unwrap_or(0.0)
                .rem_euclid(360.0),
            cloud_cover_pct: value_at(&daily.cloud_cover_mean, i)
                .unwrap_or(0.0)
                .clamp(0.0, 100.0),
            wave_height_ft: meters_to_feet(wave_height_m.max(0.0)),
            wave_period_s: value_at(&marine_daily.wave_period_max, i)
                .unwrap_or(0.0)
                .max(0.0),
            relative_humidity_pct: value_at(&hourly.relative_humidity_2m, noon)
                .unwrap_or(0.0)
                .clamp(0.0, 100.0),
            surface_pressure_hpa: value_at(&hourly.surface_pressure, noon)
                .unwrap_or(DEFAULT_PRESSURE_HPA),
            visibility_m: value_at(&hourly.visibility, noon)
                .unwrap_or(DEFAULT_VISIBILITY_M)
                .max(0.0),
        });
    }

    Ok(observations)
}

/// Open-Meteo forecast response structure
#[derive(Debug, Deserialize)]
struct ForecastResponse {
    #[serde(default)]
    hourly_units: Option<HourlyUnits>,
    daily: ForecastDaily,
    #[serde(default)]
    hourly: ForecastHourly,
}

impl ForecastResponse {
    /// True when the payload reports temperatures in Celsius
    fn reports_celsius(&self) -> bool {
        self.hourly_units
            .as_ref()
            .and_then(|u| u.temperature_2m.as_deref())
            .is_some_and(|unit| unit.contains('C'))
    }
}

/// Units reported for hourly fields
#[derive(Debug, Deserialize)]
struct HourlyUnits {
    #[serde(default)]
    temperature_2m: Option<String>,
}

/// Daily forecast arrays; any entry may be null
#[derive(Debug, Deserialize)]
struct ForecastDaily {
    time: Vec<String>,
    #[serde(default)]
    temperature_2m_max: Vec<Option<f64>>,
    #[serde(default)]
    precipitation_sum: Vec<Option<f64>>,
    #[serde(default)]
    precipitation_probability_max: Vec<Option<f64>>,
    #[serde(default)]
    wind_speed_10m_max: Vec<Option<f64>>,
    #[serde(default)]
    cloud_cover_mean: Vec<Option<f64>>,
}

/// Hourly forecast arrays; any entry may be null
#[derive(Debug, Default, Deserialize)]
struct ForecastHourly {
    #[serde(default)]
    temperature_2m: Vec<Option<f64>>,
    #[serde(default)]
    apparent_temperature: Vec<Option<f64>>,
    #[serde(default)]
    relative_humidity_2m: Vec<Option<f64>>,
    #[serde(default)]
    wind_direction_10m: Vec<Option<f64>>,
    #[serde(default)]
    surface_pressure: Vec<Option<f64>>,
    #[serde(default)]
    visibility: Vec<Option<f64>>,
}

/// Open-Meteo marine response structure
///
/// Inland points come back without a daily block.
#[derive(Debug, Deserialize)]
struct MarineResponse {
    #[serde(default)]
    daily: Option<MarineDaily>,
}

/// Daily marine arrays (wave heights in meters)
#[derive(Debug, Default, Deserialize)]
struct MarineDaily {
    #[serde(default)]
    wave_height_max: Vec<Option<f64>>,
    #[serde(default)]
    wave_period_max: Vec<Option<f64>>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    /// Builds a two-day forecast payload whose hourly values encode the hour index
    fn two_day_forecast() -> serde_json::Value {
        let temps: Vec<f64> = (0..48).map(|h| 60.0 + h as f64 * 0.5).collect();
        let apparent: Vec<f64> = (0..48).map(|h| 61.0 + h as f64 * 0.5).collect();
        let humidity: Vec<f64> = (0..48).map(|h| 50.0 + h as f64).collect();
        let direction: Vec<f64> = vec![180.0; 48];
        let pressure: Vec<f64> = vec![1018.5; 48];
        let visibility: Vec<f64> = vec![24140.0; 48];

        json!({
            "latitude": 25.76,
            "longitude": -80.19,
            "timezone": "America/New_York",
            "hourly_units": { "time": "iso8601", "temperature_2m": "°F" },
            "daily": {
                "time": ["2024-07-15", "2024-07-16"],
                "temperature_2m_max": [88.0, 90.0],
                "temperature_2m_min": [78.0, 79.0],
                "precipitation_sum": [0.0, 0.35],
                "precipitation_probability_max": [10.0, 65.0],
                "wind_speed_10m_max": [8.2, 17.5],
                "cloud_cover_mean": [45.0, 80.0]
            },
            "hourly": {
                "temperature_2m": temps,
                "apparent_temperature": apparent,
                "relative_humidity_2m": humidity,
                "wind_direction_10m": direction,
                "surface_pressure": pressure,
                "visibility": visibility
            }
        })
    }

    fn two_day_marine() -> serde_json::Value {
        json!({
            "daily": {
                "time": ["2024-07-15", "2024-07-16"],
                "wave_height_max": [0.5, 1.2],
                "wave_period_max": [6.5, 8.0]
            }
        })
    }

    fn parse(
        forecast: serde_json::Value,
        marine: serde_json::Value,
    ) -> Result<Vec<DailyWeatherObservation>, ForecastError> {
        let forecast: ForecastResponse = serde_json::from_value(forecast)?;
        let marine: MarineResponse = serde_json::from_value(marine)?;
        normalize_observations(&forecast, &marine)
    }

    #[test]
    fn test_normalize_samples_noon_values() {
        let days = parse(two_day_forecast(), two_day_marine()).expect("Failed to normalize");
        assert_eq!(days.len(), 2);

        // Hour 12 on day one, hour 36 on day two
        assert!((days[0].temperature_f - 66.0).abs() < 0.001);
        assert!((days[1].temperature_f - 78.0).abs() < 0.001);
        assert!((days[0].apparent_temperature_f - 67.0).abs() < 0.001);
        assert!((days[0].relative_humidity_pct - 62.0).abs() < 0.001);
        assert!((days[1].relative_humidity_pct - 86.0).abs() < 0.001);
        assert!((days[0].surface_pressure_hpa - 1018.5).abs() < 0.001);
        assert!((days[0].visibility_m - 24140.0).abs() < 0.001);
        assert!((days[0].wind_direction_deg - 180.0).abs() < 0.001);
    }

    #[test]
    fn test_normalize_daily_values() {
        let days = parse(two_day_forecast(), two_day_marine()).expect("Failed to normalize");

        assert_eq!(days[0].date, NaiveDate::from_ymd_opt(2024, 7, 15).unwrap());
        assert_eq!(days[1].date, NaiveDate::from_ymd_opt(2024, 7, 16).unwrap());
        assert!((days[1].precipitation_in - 0.35).abs() < 0.001);
        assert!((days[1].precipitation_probability_pct - 65.0).abs() < 0.001);
        assert!((days[1].wind_speed_kt - 17.5).abs() < 0.001);
        assert!((days[0].cloud_cover_pct - 45.0).abs() < 0.001);
    }

    #[test]
    fn test_wave_height_converted_to_feet() {
        let days = parse(two_day_forecast(), two_day_marine()).expect("Failed to normalize");

        assert!((days[0].wave_height_ft - 0.5 * 3.28084).abs() < 1e-9);
        assert!((days[1].wave_height_ft - 1.2 * 3.28084).abs() < 1e-9);
        assert!((days[1].wave_period_s - 8.0).abs() < 0.001);
    }

    #[test]
    fn test_missing_values_use_fallbacks() {
        let forecast = json!({
            "daily": {
                "time": ["2024-07-15"],
                "temperature_2m_max": [88.0],
                "precipitation_sum": [null],
                "wind_speed_10m_max": [null],
                "cloud_cover_mean": [null]
            },
            "hourly": {
                "temperature_2m": [null],
                "surface_pressure": [],
                "visibility": []
            }
        });

        let days = parse(forecast, json!({})).expect("Failed to normalize");
        let day = &days[0];

        // Temperature falls back to the daily maximum
        assert!((day.temperature_f - 88.0).abs() < 0.001);
        assert!((day.apparent_temperature_f - 88.0).abs() < 0.001);
        assert_eq!(day.precipitation_in, 0.0);
        assert_eq!(day.precipitation_probability_pct, 0.0);
        assert_eq!(day.wind_speed_kt, 0.0);
        assert_eq!(day.cloud_cover_pct, 0.0);
        assert_eq!(day.wave_height_ft, 0.0);
        assert_eq!(day.wave_period_s, 0.0);
        assert_eq!(day.relative_humidity_pct, 0.0);
        assert!((day.surface_pressure_hpa - 1013.0).abs() < 0.001);
        assert!((day.visibility_m - 10000.0).abs() < 0.001);
    }

    #[test]
    fn test_zero_values_are_kept() {
        let mut forecast = two_day_forecast();
        forecast["hourly"]["temperature_2m"][12] = json!(0.0);

        let days = parse(forecast, two_day_marine()).expect("Failed to normalize");

        // A real zero is a reading, not a gap
        assert_eq!(days[0].temperature_f, 0.0);
    }

    #[test]
    fn test_out_of_domain_values_are_normalized() {
        let direction: Vec<f64> = vec![370.0; 24];
        let forecast = json!({
            "daily": {
                "time": ["2024-07-15"],
                "temperature_2m_max": [70.0],
                "precipitation_sum": [-0.1],
                "precipitation_probability_max": [140.0],
                "wind_speed_10m_max": [-3.0],
                "cloud_cover_mean": [105.0]
            },
            "hourly": {
                "wind_direction_10m": direction
            }
        });
        let marine = json!({ "daily": { "wave_height_max": [-1.0], "wave_period_max": [-2.0] } });

        let days = parse(forecast, marine).expect("Failed to normalize");
        let day = &days[0];

        assert_eq!(day.precipitation_in, 0.0);
        assert_eq!(day.precipitation_probability_pct, 100.0);
        assert_eq!(day.wind_speed_kt, 0.0);
        assert_eq!(day.cloud_cover_pct, 100.0);
        assert!((day.wind_direction_deg - 10.0).abs() < 0.001);
        assert_eq!(day.wave_height_ft, 0.0);
        assert_eq!(day.wave_period_s, 0.0);
    }

    #[test]
    fn test_celsius_payload_converted() {
        let temps: Vec<f64> = vec![20.0; 24];
        let forecast = json!({
            "hourly_units": { "temperature_2m": "°C" },
            "daily": { "time": ["2024-07-15"], "temperature_2m_max": [30.0] },
            "hourly": {
                "temperature_2m": temps
            }
        });

        let days = parse(forecast, json!({})).expect("Failed to normalize");
        assert!((days[0].temperature_f - 68.0).abs() < 0.001);
        assert!((days[0].apparent_temperature_f - 86.0).abs() < 0.001);
    }

    #[test]
    fn test_empty_daily_time_is_missing_field() {
        let forecast = json!({ "daily": { "time": [] } });
        match parse(forecast, json!({})) {
            Err(ForecastError::MissingField(field)) => assert_eq!(field, "daily.time"),
            other => panic!("Expected MissingField error, got {:?}", other),
        }
    }

    #[test]
    fn test_invalid_date_is_rejected() {
        let forecast = json!({ "daily": { "time": ["15/07/2024"] } });
        match parse(forecast, json!({})) {
            Err(ForecastError::InvalidDate(value)) => assert_eq!(value, "15/07/2024"),
            other => panic!("Expected InvalidDate error, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_daily_block_fails_to_parse() {
        let result: Result<ForecastResponse, _> = serde_json::from_value(json!({ "hourly": {} }));
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_malformed_json() {
        let result: Result<ForecastResponse, _> = serde_json::from_str("{ invalid json }");
        assert!(result.is_err());
    }

    #[test]
    fn test_request_urls_use_imperial_units() {
        let client = ForecastClient::new();
        let location = crate::data::default_location();

        let url = client.forecast_request_url(&location, 10);
        assert!(url.starts_with(OPEN_METEO_FORECAST_URL));
        assert!(url.contains("latitude=25.7617"));
        assert!(url.contains("longitude=-80.1918"));
        assert!(url.contains("forecast_days=10"));
        assert!(url.contains("temperature_unit=fahrenheit"));
        assert!(url.contains("wind_speed_unit=kn"));
        assert!(url.contains("precipitation_unit=inch"));

        let marine = client.marine_request_url(&location, 7);
        assert!(marine.starts_with(OPEN_METEO_MARINE_URL));
        assert!(marine.contains("wave_height_max"));
        assert!(marine.contains("forecast_days=7"));
    }

    #[test]
    fn test_with_base_urls() {
        let client = ForecastClient::new().with_base_urls("http://localhost/f", "http://localhost/m");
        let location = crate::data::default_location();
        assert!(client
            .forecast_request_url(&location, 3)
            .starts_with("http://localhost/f?"));
        assert!(client
            .marine_request_url(&location, 3)
            .starts_with("http://localhost/m?"));
    }

    #[test]
    fn test_http_status_error_message() {
        let err = ForecastError::HttpStatus {
            service: "marine",
            status: 503,
        };
        assert_eq!(err.to_string(), "marine API returned HTTP 503");
    }
}
