//! Moon phase approximation
//!
//! Derives a discrete moon phase and an illumination percentage from a
//! calendar date using a Julian-day style approximation. No ephemeris data is
//! involved, so results are only roughly aligned with the real sky, but they
//! are fully deterministic for any date.

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

/// Mean length of the synodic month in days
const SYNODIC_MONTH_DAYS: f64 = 29.5305882;

/// Day offset aligning the approximation with a reference new moon
const EPOCH_OFFSET_DAYS: f64 = 694039.09;

/// Days per year used by the approximation
const DAYS_PER_YEAR: f64 = 365.25;

/// Average days per month used by the approximation
const DAYS_PER_MONTH: f64 = 30.6;

/// Number of discrete phases in the table
const PHASE_COUNT: usize = 8;

/// Static description of one phase
#[derive(Debug, Clone, Copy)]
struct PhaseRecord {
    name: &'static str,
    icon: &'static str,
    score: u8,
}

/// Phase table, indexed by the 8-way bucket of the lunar cycle position
const PHASES: [PhaseRecord; PHASE_COUNT] = [
    PhaseRecord { name: "New Moon", icon: "\u{1F311}", score: 10 },
    PhaseRecord { name: "Waxing Crescent", icon: "\u{1F312}", score: 7 },
    PhaseRecord { name: "First Quarter", icon: "\u{1F313}", score: 8 },
    PhaseRecord { name: "Waxing Gibbous", icon: "\u{1F314}", score: 7 },
    PhaseRecord { name: "Full Moon", icon: "\u{1F315}", score: 10 },
    PhaseRecord { name: "Waning Gibbous", icon: "\u{1F316}", score: 7 },
    PhaseRecord { name: "Last Quarter", icon: "\u{1F317}", score: 8 },
    PhaseRecord { name: "Waning Crescent", icon: "\u{1F318}", score: 7 },
];

/// Moon phase for a single day
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MoonPhase {
    /// Human-readable phase name
    pub name: &'static str,
    /// Display glyph for the phase
    pub icon: &'static str,
    /// Fishing score contributed by the phase (7-10)
    pub moon_score: u8,
    /// Position in the lunar cycle as a percentage (0-99)
    pub illumination_pct: u8,
}

impl MoonPhase {
    /// Returns true for new and full moons, the strongest feeding periods.
    pub fn is_major(&self) -> bool {
        self.moon_score >= 9
    }

    /// Returns the names of all phases in cycle order.
    pub fn all_names() -> [&'static str; PHASE_COUNT] {
        PHASES.map(|p| p.name)
    }
}

/// Computes the fractional position in the lunar cycle for a date, in [0, 1).
///
/// January and February count as months 13 and 14 of the previous year, then
/// the month is incremented once more before scaling. Truncation of the cycle
/// count is toward zero; the remainder is folded into [0, 1) so dates before
/// the epoch continue the cycle instead of going negative.
fn cycle_fraction(date: NaiveDate) -> f64 {
    let mut year = date.year();
    let mut month = date.month() as i32;
    let day = date.day() as f64;

    if month < 3 {
        year -= 1;
        month += 12;
    }
    month += 1;

    let c = DAYS_PER_YEAR * year as f64;
    let e = DAYS_PER_MONTH * month as f64;
    let jd = (c + e + day - EPOCH_OFFSET_DAYS) / SYNODIC_MONTH_DAYS;

    (jd - jd.trunc()).rem_euclid(1.0)
}

/// Maps a cycle fraction to an index into the phase table.
///
/// Uses rounding rather than flooring, so the New Moon bucket straddles the
/// cycle boundary.
fn phase_index(fraction: f64) -> usize {
    let bucket = (fraction * PHASE_COUNT as f64).round() as usize;
    if bucket >= PHASE_COUNT {
        0
    } else {
        bucket
    }
}

/// Maps a cycle fraction to an illumination percentage (0-99).
fn illumination_from_fraction(fraction: f64) -> u8 {
    let pct = (fraction * 100.0).round() as u8;
    if pct >= 100 {
        0
    } else {
        pct
    }
}

/// Computes the illumination percentage for a date.
pub fn compute_illumination(date: NaiveDate) -> u8 {
    illumination_from_fraction(cycle_fraction(date))
}

/// Computes the moon phase for a date.
///
/// Phase and illumination are both derived from one cycle position so they
/// always agree with each other.
pub fn compute_moon_phase(date: NaiveDate) -> MoonPhase {
    let fraction = cycle_fraction(date);
    let record = PHASES[phase_index(fraction)];

    MoonPhase {
        name: record.name,
        icon: record.icon,
        moon_score: record.score,
        illumination_pct: illumination_from_fraction(fraction),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_known_new_moon() {
        let phase = compute_moon_phase(date(2024, 1, 11));
        assert_eq!(phase.name, "New Moon");
        assert_eq!(phase.moon_score, 10);
        assert_eq!(phase.illumination_pct, 4);
    }

    #[test]
    fn test_known_full_moon() {
        let phase = compute_moon_phase(date(2024, 1, 25));
        assert_eq!(phase.name, "Full Moon");
        assert_eq!(phase.moon_score, 10);
        assert_eq!(phase.illumination_pct, 51);
    }

    #[test]
    fn test_known_waxing_gibbous() {
        let phase = compute_moon_phase(date(2024, 7, 15));
        assert_eq!(phase.name, "Waxing Gibbous");
        assert_eq!(phase.moon_score, 7);
        assert_eq!(phase.illumination_pct, 33);
    }

    #[test]
    fn test_known_first_quarter() {
        let phase = compute_moon_phase(date(2026, 10, 19));
        assert_eq!(phase.name, "First Quarter");
        assert_eq!(phase.moon_score, 8);
        assert_eq!(phase.illumination_pct, 31);
    }

    #[test]
    fn test_waning_phases() {
        let last_quarter = compute_moon_phase(date(2024, 2, 1));
        assert_eq!(last_quarter.name, "Last Quarter");
        assert_eq!(last_quarter.moon_score, 8);
        assert_eq!(last_quarter.illumination_pct, 74);

        let waning_gibbous = compute_moon_phase(date(2024, 2, 27));
        assert_eq!(waning_gibbous.name, "Waning Gibbous");
        assert_eq!(waning_gibbous.illumination_pct, 62);

        let waning_crescent = compute_moon_phase(date(2024, 2, 5));
        assert_eq!(waning_crescent.name, "Waning Crescent");
        assert_eq!(waning_crescent.illumination_pct, 87);
    }

    #[test]
    fn test_waxing_crescent_in_january_uses_previous_year() {
        let phase = compute_moon_phase(date(2025, 1, 1));
        assert_eq!(phase.name, "Waxing Crescent");
        assert_eq!(phase.illumination_pct, 7);
    }

    #[test]
    fn test_late_cycle_wraps_to_new_moon() {
        // Fraction ~0.98 rounds to bucket 8, which wraps to New Moon
        let phase = compute_moon_phase(date(2024, 4, 8));
        assert_eq!(phase.name, "New Moon");
        assert_eq!(phase.illumination_pct, 98);
    }

    #[test]
    fn test_illumination_wraps_at_cycle_end() {
        // Fraction ~0.996 would round to 100
        assert_eq!(compute_illumination(date(2024, 11, 1)), 0);
        assert_eq!(compute_moon_phase(date(2024, 11, 1)).name, "New Moon");
    }

    #[test]
    fn test_dates_before_epoch_stay_in_range() {
        let phase = compute_moon_phase(date(1899, 12, 31));
        assert_eq!(phase.illumination_pct, 98);
        assert_eq!(phase.name, "New Moon");

        let old = compute_moon_phase(date(1800, 5, 5));
        assert!(old.illumination_pct <= 99);
    }

    #[test]
    fn test_illumination_matches_phase_computation() {
        let mut day = date(2023, 1, 1);
        for _ in 0..800 {
            assert_eq!(
                compute_illumination(day),
                compute_moon_phase(day).illumination_pct
            );
            day = day.succ_opt().unwrap();
        }
    }

    #[test]
    fn test_all_dates_produce_valid_phase() {
        let names = MoonPhase::all_names();
        let mut day = date(1990, 1, 1);
        for _ in 0..2000 {
            let phase = compute_moon_phase(day);
            assert!(phase.illumination_pct <= 99);
            assert!(names.contains(&phase.name));
            day = day + chrono::Duration::days(7);
        }
    }

    #[test]
    fn test_deterministic() {
        let d = date(2024, 6, 22);
        assert_eq!(compute_moon_phase(d), compute_moon_phase(d));
        assert_eq!(compute_illumination(d), compute_illumination(d));
    }

    #[test]
    fn test_phase_table_scores() {
        let scores: Vec<u8> = PHASES.iter().map(|p| p.score).collect();
        assert_eq!(scores, vec![10, 7, 8, 7, 10, 7, 8, 7]);
    }

    #[test]
    fn test_phase_index_boundaries() {
        assert_eq!(phase_index(0.0), 0);
        assert_eq!(phase_index(0.06), 0);
        assert_eq!(phase_index(0.07), 1);
        assert_eq!(phase_index(0.5), 4);
        assert_eq!(phase_index(0.93), 7);
        assert_eq!(phase_index(0.95), 0);
    }

    #[test]
    fn test_is_major() {
        assert!(compute_moon_phase(date(2024, 1, 11)).is_major());
        assert!(compute_moon_phase(date(2024, 1, 25)).is_major());
        assert!(!compute_moon_phase(date(2024, 7, 15)).is_major());
    }
}
