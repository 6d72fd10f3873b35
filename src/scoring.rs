//! Fishing suitability scoring engine.
//!
//! Combines one day's weather and marine observation with the moon phase into
//! an integer score from 1 to 10, and classifies that score into a label and
//! color band. Everything here is pure: the same inputs always produce the
//! same outputs.

use chrono::NaiveDate;
use serde::Serialize;

use crate::data::DailyWeatherObservation;
use crate::moon::{compute_moon_phase, MoonPhase};

// ============================================================================
// THRESHOLDS
// ============================================================================

/// Starting score before any factor is applied
pub const BASE_SCORE: f64 = 5.0;
/// Maximum points contributed by the moon phase
pub const MOON_WEIGHT: f64 = 3.0;
/// Ideal temperature range in Fahrenheit (inclusive)
pub const IDEAL_TEMP_F: (f64, f64) = (60.0, 80.0);
/// Acceptable temperature range in Fahrenheit (min inclusive, max exclusive)
pub const FAIR_TEMP_F: (f64, f64) = (50.0, 90.0);
/// Wind below this speed (knots) is calm
pub const CALM_WIND_KT: f64 = 10.0;
/// Wind above this speed (knots) is strong
pub const STRONG_WIND_KT: f64 = 15.0;
/// Wind above this speed (knots) is a gale for small boats
pub const GALE_WIND_KT: f64 = 20.0;
/// Daily rain above this (inches) is heavy
pub const HEAVY_RAIN_IN: f64 = 0.5;
/// Daily rain above this (inches) is noticeable
pub const LIGHT_RAIN_IN: f64 = 0.2;
/// Waves below this height (feet) are calm
pub const CALM_SEAS_FT: f64 = 2.0;
/// Waves at or above this height (feet) are rough
pub const ROUGH_SEAS_FT: f64 = 3.0;
/// Waves at or above this height (feet) are very rough
pub const VERY_ROUGH_SEAS_FT: f64 = 5.0;
/// Favorable cloud cover range in percent (inclusive)
pub const CLOUD_BAND_PCT: (f64, f64) = (40.0, 70.0);
/// Lowest possible score
pub const MIN_SCORE: u8 = 1;
/// Highest possible score
pub const MAX_SCORE: u8 = 10;

/// Precipitation (inches) above which the rain tip fires
const RAIN_TIP_IN: f64 = 5.0;

// ============================================================================
// SCORING ENGINE
// ============================================================================

/// Points contributed by each factor for one day.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScoreBreakdown {
    /// Moon phase points (0-3)
    pub moon: f64,
    /// Temperature points (0 to +2)
    pub temperature: f64,
    /// Wind points (-2 to +1)
    pub wind: f64,
    /// Precipitation points (-2 to 0)
    pub precipitation: f64,
    /// Wave height points (-3 to +1)
    pub waves: f64,
    /// Cloud cover points (0 to +1)
    pub clouds: f64,
}

impl ScoreBreakdown {
    /// Computes every factor for an observation and a moon phase.
    pub fn new(observation: &DailyWeatherObservation, moon: &MoonPhase) -> Self {
        Self {
            moon: score_moon(moon),
            temperature: score_temperature(observation.temperature_f),
            wind: score_wind(observation.wind_speed_kt),
            precipitation: score_precipitation(observation.precipitation_in),
            waves: score_waves(observation.wave_height_ft),
            clouds: score_clouds(observation.cloud_cover_pct),
        }
    }

    /// Sum of the base score and all factors, before rounding or clamping.
    pub fn raw(&self) -> f64 {
        BASE_SCORE
            + self.moon
            + self.temperature
            + self.wind
            + self.precipitation
            + self.waves
            + self.clouds
    }

    /// Final score: the raw sum rounded half away from zero, saturated to 1-10.
    pub fn score(&self) -> u8 {
        let rounded = self.raw().round();
        rounded.clamp(MIN_SCORE as f64, MAX_SCORE as f64) as u8
    }
}

/// Moon points scale linearly with the phase's own 0-10 score.
pub fn score_moon(moon: &MoonPhase) -> f64 {
    (moon.moon_score as f64 / 10.0) * MOON_WEIGHT
}

/// Temperature points: +2 in the ideal range, +1 in the fair range.
pub fn score_temperature(temp_f: f64) -> f64 {
    if temp_f >= IDEAL_TEMP_F.0 && temp_f <= IDEAL_TEMP_F.1 {
        2.0
    } else if temp_f >= FAIR_TEMP_F.0 && temp_f < FAIR_TEMP_F.1 {
        1.0
    } else {
        0.0
    }
}

/// Wind points. Bands are checked in order and the first match wins.
pub fn score_wind(wind_kt: f64) -> f64 {
    if wind_kt < CALM_WIND_KT {
        1.0
    } else if wind_kt > GALE_WIND_KT {
        -2.0
    } else if wind_kt > STRONG_WIND_KT {
        -1.0
    } else {
        0.0
    }
}

/// Precipitation points: rain only ever hurts.
pub fn score_precipitation(precip_in: f64) -> f64 {
    if precip_in > HEAVY_RAIN_IN {
        -2.0
    } else if precip_in > LIGHT_RAIN_IN {
        -1.0
    } else {
        0.0
    }
}

/// Wave points: calm seas help, rough seas hurt a lot. 2-3 ft is neutral.
pub fn score_waves(wave_ft: f64) -> f64 {
    if wave_ft < CALM_SEAS_FT {
        1.0
    } else if wave_ft >= ROUGH_SEAS_FT && wave_ft < VERY_ROUGH_SEAS_FT {
        -2.0
    } else if wave_ft >= VERY_ROUGH_SEAS_FT {
        -3.0
    } else {
        0.0
    }
}

/// Cloud points: partial overcast helps.
pub fn score_clouds(cloud_pct: f64) -> f64 {
    if cloud_pct >= CLOUD_BAND_PCT.0 && cloud_pct <= CLOUD_BAND_PCT.1 {
        1.0
    } else {
        0.0
    }
}

/// Computes the fishing score (1-10) for an observation on `date`.
///
/// The moon phase is derived from `date`; the observation's own date is not
/// consulted.
pub fn compute_fishing_score(observation: &DailyWeatherObservation, date: NaiveDate) -> u8 {
    let moon = compute_moon_phase(date);
    ScoreBreakdown::new(observation, &moon).score()
}

// ============================================================================
// CLASSIFICATION
// ============================================================================

/// Verbal rating of a score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ScoreLabel {
    Excellent,
    Good,
    Fair,
    Poor,
}

impl ScoreLabel {
    /// Returns the display text for the label.
    pub fn as_str(&self) -> &'static str {
        match self {
            ScoreLabel::Excellent => "Excellent",
            ScoreLabel::Good => "Good",
            ScoreLabel::Fair => "Fair",
            ScoreLabel::Poor => "Poor",
        }
    }
}

/// Four-tier color classification of a score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ColorBand {
    Green,
    Yellow,
    Orange,
    Red,
}

impl ColorBand {
    /// Returns the band name.
    pub fn as_str(&self) -> &'static str {
        match self {
            ColorBand::Green => "green",
            ColorBand::Yellow => "yellow",
            ColorBand::Orange => "orange",
            ColorBand::Red => "red",
        }
    }
}

/// Label and color band for a score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ScoreClass {
    pub label: ScoreLabel,
    pub band: ColorBand,
}

/// Classifies a score: 8+ Excellent, 6-7 Good, 4-5 Fair, below 4 Poor.
pub fn classify_score(score: u8) -> ScoreClass {
    let (label, band) = if score >= 8 {
        (ScoreLabel::Excellent, ColorBand::Green)
    } else if score >= 6 {
        (ScoreLabel::Good, ColorBand::Yellow)
    } else if score >= 4 {
        (ScoreLabel::Fair, ColorBand::Orange)
    } else {
        (ScoreLabel::Poor, ColorBand::Red)
    };
    ScoreClass { label, band }
}

// ============================================================================
// TIPS AND DESCRIPTORS
// ============================================================================

/// Whether a tip is encouraging or a caution
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TipKind {
    Success,
    Warning,
}

/// A short piece of advice shown in the day detail view
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FishingTip {
    pub kind: TipKind,
    pub message: &'static str,
}

/// Collects the tips that apply to a day, in display order.
pub fn fishing_tips(observation: &DailyWeatherObservation, moon: &MoonPhase) -> Vec<FishingTip> {
    let candidates = [
        (
            moon.is_major(),
            TipKind::Success,
            "Excellent moon phase! Fish are highly active during full and new moons.",
        ),
        (
            observation.wind_speed_kt < CALM_WIND_KT,
            TipKind::Success,
            "Light winds create ideal conditions for fishing.",
        ),
        (
            observation.wind_speed_kt > GALE_WIND_KT,
            TipKind::Warning,
            "Strong winds may make fishing difficult.",
        ),
        (
            observation.precipitation_in > RAIN_TIP_IN,
            TipKind::Warning,
            "Rain can affect visibility and fish behavior.",
        ),
        (
            score_clouds(observation.cloud_cover_pct) > 0.0,
            TipKind::Success,
            "Overcast conditions can improve fishing success.",
        ),
        (
            observation.wave_height_ft >= ROUGH_SEAS_FT
                && observation.wave_height_ft < VERY_ROUGH_SEAS_FT,
            TipKind::Warning,
            "Rough seas (3+ ft) - fishing will be challenging.",
        ),
        (
            observation.wave_height_ft >= VERY_ROUGH_SEAS_FT,
            TipKind::Warning,
            "Very rough seas (5+ ft) - not recommended for fishing.",
        ),
    ];

    candidates
        .into_iter()
        .filter(|(applies, _, _)| *applies)
        .map(|(_, kind, message)| FishingTip { kind, message })
        .collect()
}

/// Describes cloud cover.
pub fn describe_cloud_cover(cloud_pct: f64) -> &'static str {
    if cloud_pct > 70.0 {
        "Overcast"
    } else if cloud_pct > 40.0 {
        "Partly Cloudy"
    } else {
        "Clear"
    }
}

/// Describes visibility in meters.
pub fn describe_visibility(visibility_m: f64) -> &'static str {
    if visibility_m > 5000.0 {
        "Good"
    } else {
        "Limited"
    }
}

/// Describes surface pressure relative to the standard atmosphere.
pub fn describe_pressure(pressure_hpa: f64) -> &'static str {
    if pressure_hpa > 1013.0 {
        "High"
    } else {
        "Low"
    }
}

/// Describes the chance of rain.
pub fn describe_rain_probability(probability_pct: f64) -> &'static str {
    if probability_pct > 70.0 {
        "Likely"
    } else if probability_pct > 30.0 {
        "Possible"
    } else {
        "Unlikely"
    }
}
