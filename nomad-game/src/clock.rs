//! World clock and time-of-day windows.
//!
//! Time advances in fixed 15-minute ticks. Windows are overlapping labels
//! on the minute-of-day that scale work payouts; a moment can sit inside
//! several windows at once and payouts use the best one.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::constants::{
    DAY_MINUTES, DAYLIGHT_END_MIN, DAYLIGHT_START_MIN, OFF_WINDOW_MULT, TICK_MINUTES,
    WINDOW_MULT_DAYLIGHT, WINDOW_MULT_GOLDEN_HOUR, WINDOW_MULT_MORNING, WINDOW_MULT_NIGHT,
    WINDOW_MULT_NIGHT_CLEAR, WINDOW_MULT_SUNRISE,
};
use crate::weather::WeatherSample;

const SUNRISE_START_MIN: u64 = 5 * 60 + 30;
const SUNRISE_END_MIN: u64 = 7 * 60 + 30;
const GOLDEN_AM_START_MIN: u64 = 6 * 60;
const GOLDEN_AM_END_MIN: u64 = 8 * 60;
const GOLDEN_PM_START_MIN: u64 = 18 * 60 + 30;
const GOLDEN_PM_END_MIN: u64 = 20 * 60;
const MORNING_START_MIN: u64 = 7 * 60;
const MORNING_END_MIN: u64 = 11 * 60;

/// Absolute simulation clock in minutes since campaign start.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub struct WorldClock {
    minutes: u64,
}

impl WorldClock {
    #[must_use]
    pub const fn from_minutes(minutes: u64) -> Self {
        Self { minutes }
    }

    #[must_use]
    pub const fn minutes(self) -> u64 {
        self.minutes
    }

    /// Zero-based day index since campaign start.
    #[must_use]
    pub const fn day_index(self) -> u64 {
        self.minutes / DAY_MINUTES
    }

    #[must_use]
    pub const fn minute_of_day(self) -> u64 {
        self.minutes % DAY_MINUTES
    }

    /// Daylight runs 06:00 to 20:00.
    #[must_use]
    pub const fn is_daylight(self) -> bool {
        let m = self.minute_of_day();
        m >= DAYLIGHT_START_MIN && m < DAYLIGHT_END_MIN
    }

    /// Fraction of peak sun at this moment. Half-sine over the daylight
    /// span, zero at night.
    #[must_use]
    pub fn daylight_fraction(self) -> f32 {
        let m = self.minute_of_day();
        if m < DAYLIGHT_START_MIN || m >= DAYLIGHT_END_MIN {
            return 0.0;
        }
        let span = (DAYLIGHT_END_MIN - DAYLIGHT_START_MIN) as f32;
        let progress = (m - DAYLIGHT_START_MIN) as f32 / span;
        (progress * std::f32::consts::PI).sin().clamp(0.0, 1.0)
    }

    pub const fn advance_tick(&mut self) {
        self.minutes += TICK_MINUTES;
    }

    pub const fn advance_minutes(&mut self, minutes: u64) {
        self.minutes += minutes;
    }

    /// Render as "Day N, HH:MM" for the session log.
    #[must_use]
    pub fn fmt_day_time(self) -> String {
        let day = self.day_index() + 1;
        let m = self.minute_of_day();
        format!("Day {day}, {:02}:{:02}", m / 60, m % 60)
    }
}

/// Time-of-day labels that scale work payouts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Window {
    Sunrise,
    GoldenHour,
    Morning,
    Daylight,
    Night,
    NightClear,
}

impl Window {
    #[must_use]
    pub const fn multiplier(self) -> f32 {
        match self {
            Self::Sunrise => WINDOW_MULT_SUNRISE,
            Self::GoldenHour => WINDOW_MULT_GOLDEN_HOUR,
            Self::Morning => WINDOW_MULT_MORNING,
            Self::Daylight => WINDOW_MULT_DAYLIGHT,
            Self::Night => WINDOW_MULT_NIGHT,
            Self::NightClear => WINDOW_MULT_NIGHT_CLEAR,
        }
    }

    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Sunrise => "sunrise",
            Self::GoldenHour => "golden-hour",
            Self::Morning => "morning",
            Self::Daylight => "daylight",
            Self::Night => "night",
            Self::NightClear => "night-clear",
        }
    }
}

/// The windows active at one moment. Rarely more than three.
pub type WindowSet = SmallVec<[Window; 4]>;

/// All windows active at the given clock moment under the given sky.
#[must_use]
pub fn windows_at(clock: WorldClock, weather: &WeatherSample) -> WindowSet {
    let m = clock.minute_of_day();
    let mut set = WindowSet::new();

    if (SUNRISE_START_MIN..SUNRISE_END_MIN).contains(&m) {
        set.push(Window::Sunrise);
    }
    if (GOLDEN_AM_START_MIN..GOLDEN_AM_END_MIN).contains(&m)
        || (GOLDEN_PM_START_MIN..GOLDEN_PM_END_MIN).contains(&m)
    {
        set.push(Window::GoldenHour);
    }
    if (MORNING_START_MIN..MORNING_END_MIN).contains(&m) {
        set.push(Window::Morning);
    }
    if clock.is_daylight() {
        set.push(Window::Daylight);
    } else {
        set.push(Window::Night);
        if weather.is_clear_sky() {
            set.push(Window::NightClear);
        }
    }
    set
}

/// Payout multiplier for working toward `preferred` during `active` windows.
/// A job with no preference earns the best active multiplier; a preference
/// outside the active set earns the off-window penalty.
#[must_use]
pub fn window_multiplier(preferred: Option<Window>, active: &WindowSet) -> f32 {
    match preferred {
        Some(w) if active.contains(&w) => w.multiplier(),
        Some(_) => OFF_WINDOW_MULT,
        None => active
            .iter()
            .map(|w| w.multiplier())
            .fold(OFF_WINDOW_MULT, f32::max),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::weather::{HeatBand, WindBand};

    fn clear_sample() -> WeatherSample {
        WeatherSample {
            season: "summer".into(),
            wind: WindBand::Low,
            heat: HeatBand::Mild,
            temp_f: 70.0,
            humidity: 20.0,
            uv_index: 6.0,
            monsoon: false,
            flood_watch: false,
        }
    }

    #[test]
    fn clock_splits_day_and_minute() {
        let clock = WorldClock::from_minutes(DAY_MINUTES * 2 + 390);
        assert_eq!(clock.day_index(), 2);
        assert_eq!(clock.minute_of_day(), 390);
        assert!(clock.is_daylight());
        assert_eq!(clock.fmt_day_time(), "Day 3, 06:30");
    }

    #[test]
    fn daylight_fraction_peaks_midday() {
        let noon = WorldClock::from_minutes(13 * 60);
        let dawn = WorldClock::from_minutes(6 * 60 + 15);
        let night = WorldClock::from_minutes(2 * 60);
        assert!(noon.daylight_fraction() > 0.99);
        assert!(dawn.daylight_fraction() < 0.1);
        assert!(dawn.daylight_fraction() > 0.0);
        assert!(night.daylight_fraction().abs() < f32::EPSILON);
    }

    #[test]
    fn sunrise_overlaps_golden_and_daylight() {
        let sample = clear_sample();
        let at = windows_at(WorldClock::from_minutes(6 * 60 + 30), &sample);
        assert!(at.contains(&Window::Sunrise));
        assert!(at.contains(&Window::GoldenHour));
        assert!(at.contains(&Window::Daylight));
        assert!(!at.contains(&Window::Night));
    }

    #[test]
    fn clear_night_adds_astro_window() {
        let sample = clear_sample();
        let at = windows_at(WorldClock::from_minutes(23 * 60), &sample);
        assert!(at.contains(&Window::Night));
        assert!(at.contains(&Window::NightClear));

        let mut stormy = clear_sample();
        stormy.monsoon = true;
        let at = windows_at(WorldClock::from_minutes(23 * 60), &stormy);
        assert!(!at.contains(&Window::NightClear));
    }

    #[test]
    fn multiplier_prefers_best_active_window() {
        let sample = clear_sample();
        let at = windows_at(WorldClock::from_minutes(6 * 60 + 30), &sample);
        assert!((window_multiplier(None, &at) - WINDOW_MULT_SUNRISE).abs() < f32::EPSILON);
        assert!(
            (window_multiplier(Some(Window::Night), &at) - OFF_WINDOW_MULT).abs() < f32::EPSILON
        );
    }
}
