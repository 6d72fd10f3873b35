//! Scored multi-day forecast
//!
//! Pairs each normalized observation with its moon phase, fishing score and
//! classification, and offers the chronological and ranked orderings used by
//! the forecast list.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::data::{DailyWeatherObservation, Location};
use crate::moon::{compute_moon_phase, MoonPhase};
use crate::scoring::{classify_score, fishing_tips, FishingTip, ScoreBreakdown, ScoreClass};

/// One forecast day with everything derived from it
#[derive(Debug, Clone, Serialize)]
pub struct DayForecast {
    /// Normalized weather and marine conditions
    pub observation: DailyWeatherObservation,
    /// Moon phase for the day
    pub moon: MoonPhase,
    /// Per-factor score contributions
    pub breakdown: ScoreBreakdown,
    /// Fishing score (1-10)
    pub score: u8,
    /// Label and color band for the score
    pub class: ScoreClass,
}

impl DayForecast {
    /// Scores one observation using its own date for the moon phase.
    pub fn from_observation(observation: DailyWeatherObservation) -> Self {
        let moon = compute_moon_phase(observation.date);
        let breakdown = ScoreBreakdown::new(&observation, &moon);
        let score = breakdown.score();
        Self {
            observation,
            moon,
            breakdown,
            score,
            class: classify_score(score),
        }
    }

    /// Tips that apply to this day
    pub fn tips(&self) -> Vec<FishingTip> {
        fishing_tips(&self.observation, &self.moon)
    }
}

/// How the forecast list is ordered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortMode {
    /// Earliest day first
    #[default]
    Chronological,
    /// Best score first, ties broken by date
    Ranked,
}

impl SortMode {
    /// Returns the other mode.
    pub fn toggle(self) -> Self {
        match self {
            SortMode::Chronological => SortMode::Ranked,
            SortMode::Ranked => SortMode::Chronological,
        }
    }

    /// Short label for the header
    pub fn label(&self) -> &'static str {
        match self {
            SortMode::Chronological => "By date",
            SortMode::Ranked => "Best first",
        }
    }
}

/// A scored forecast for one location
#[derive(Debug, Clone, Serialize)]
pub struct Forecast {
    /// Where the forecast is for
    pub location: Location,
    /// Scored days in chronological order
    pub days: Vec<DayForecast>,
    /// When the underlying data was fetched
    pub fetched_at: DateTime<Utc>,
}

impl Forecast {
    /// Scores every observation. Days are kept in date order.
    pub fn new(
        location: Location,
        mut observations: Vec<DailyWeatherObservation>,
        fetched_at: DateTime<Utc>,
    ) -> Self {
        observations.sort_by_key(|o| o.date);
        let days = observations
            .into_iter()
            .map(DayForecast::from_observation)
            .collect();
        Self {
            location,
            days,
            fetched_at,
        }
    }

    /// Number of days in the forecast
    pub fn len(&self) -> usize {
        self.days.len()
    }

    /// Returns true if the forecast has no days
    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    /// Indices into `days` ordered by score, highest first.
    ///
    /// Equal scores keep date order.
    pub fn ranked(&self) -> Vec<usize> {
        let mut order: Vec<usize> = (0..self.days.len()).collect();
        order.sort_by(|&a, &b| self.days[b].score.cmp(&self.days[a].score));
        order
    }

    /// Indices into `days` in the requested order.
    pub fn ordered(&self, mode: SortMode) -> Vec<usize> {
        match mode {
            SortMode::Chronological => (0..self.days.len()).collect(),
            SortMode::Ranked => self.ranked(),
        }
    }

    /// The highest scoring day, earliest on ties
    pub fn best_day(&self) -> Option<&DayForecast> {
        self.ranked().first().map(|&i| &self.days[i])
    }

    /// Scores in date order, for the sparkline
    pub fn scores(&self) -> Vec<u8> {
        self.days.iter().map(|d| d.score).collect()
    }
}
