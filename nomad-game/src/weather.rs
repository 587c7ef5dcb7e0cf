//! Season table and deterministic weather sampling.
//!
//! Weather is a pure function of the campaign weather seed, the location,
//! and the clock. Two sessions with the same seed see identical skies at
//! identical moments, which keeps route planning honest.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::clock::WorldClock;
use crate::constants::{
    FLOOD_WATCH_CHANCE, HEAT_COLD_BELOW_F, HEAT_HOT_FROM_F, HEAT_VERY_HOT_FROM_F, HUMIDITY_JITTER,
    LAPSE_RATE_PER_KFT, MONSOON_CHANCE, REFERENCE_ELEVATION_FT, SPEED_MOD_FLOOD_WATCH,
    SPEED_MOD_HEAT, SPEED_MOD_HIGH_WIND,
};
use crate::rng::seeded;
use crate::world::{Location, SeasonRule};

/// Sustained wind strength bucketed for turbine output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum WindBand {
    #[default]
    Low,
    Medium,
    High,
}

const WIND_ORDER: [WindBand; 3] = [WindBand::Low, WindBand::Medium, WindBand::High];
const WIND_WEIGHTS: [u32; 3] = [4, 3, 2];

impl WindBand {
    /// Fraction of rated turbine output this band delivers.
    #[must_use]
    pub const fn power_fraction(self) -> f32 {
        match self {
            Self::Low => 0.2,
            Self::Medium => 0.6,
            Self::High => 1.0,
        }
    }

}

/// Felt temperature bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum HeatBand {
    Cold,
    #[default]
    Mild,
    Hot,
    VeryHot,
}

impl HeatBand {
    #[must_use]
    pub const fn from_temp_f(temp_f: f32) -> Self {
        if temp_f >= HEAT_VERY_HOT_FROM_F {
            Self::VeryHot
        } else if temp_f >= HEAT_HOT_FROM_F {
            Self::Hot
        } else if temp_f < HEAT_COLD_BELOW_F {
            Self::Cold
        } else {
            Self::Mild
        }
    }

    #[must_use]
    pub const fn is_hot(self) -> bool {
        matches!(self, Self::Hot | Self::VeryHot)
    }
}

/// Per-season climate inputs for the temperature and UV formulas.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClimateParams {
    pub uv_peak: f32,
    pub temp_base_f: f32,
    pub diurnal_amp_f: f32,
    pub humidity_base: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Season {
    pub name: String,
    pub duration_days: u64,
    pub climate: ClimateParams,
}

/// Ordered season cycle the calendar walks through, repeating forever.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeasonTable {
    pub seasons: Vec<Season>,
}

impl SeasonTable {
    /// Load a season table from JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON cannot be parsed or fails validation.
    pub fn from_json(json_str: &str) -> Result<Self, String> {
        let table: Self =
            serde_json::from_str(json_str).map_err(|e| format!("JSON parse error: {e}"))?;
        table.validate()?;
        Ok(table)
    }

    fn validate(&self) -> Result<(), String> {
        if self.seasons.is_empty() {
            return Err("Season table must not be empty".into());
        }
        for season in &self.seasons {
            if season.duration_days == 0 {
                return Err(format!("Season '{}' has zero duration", season.name));
            }
            if season.climate.uv_peak <= 0.0 {
                return Err(format!("Season '{}' has non-positive uv_peak", season.name));
            }
        }
        Ok(())
    }

    /// Get embedded default season cycle.
    #[must_use]
    pub fn default_config() -> Self {
        Self::from_json(include_str!("../assets/seasons.json")).unwrap_or_else(|_| Self {
            seasons: vec![Season {
                name: "summer".into(),
                duration_days: 365,
                climate: ClimateParams {
                    uv_peak: 10.0,
                    temp_base_f: 85.0,
                    diurnal_amp_f: 25.0,
                    humidity_base: 15.0,
                },
            }],
        })
    }

    /// Total length of one full season cycle in days.
    #[must_use]
    pub fn cycle_days(&self) -> u64 {
        self.seasons.iter().map(|s| s.duration_days).sum()
    }

    /// The season active on the given campaign day.
    #[must_use]
    pub fn season_for_day(&self, day: u64) -> &Season {
        let mut remaining = day % self.cycle_days().max(1);
        for season in &self.seasons {
            if remaining < season.duration_days {
                return season;
            }
            remaining -= season.duration_days;
        }
        // Unreachable for validated tables; fall back to the first entry.
        &self.seasons[0]
    }
}

/// The sky at one location and moment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherSample {
    pub season: String,
    pub wind: WindBand,
    pub heat: HeatBand,
    pub temp_f: f32,
    pub humidity: f32,
    pub uv_index: f32,
    pub monsoon: bool,
    pub flood_watch: bool,
}

impl WeatherSample {
    /// Clear enough for astro photography.
    #[must_use]
    pub const fn is_clear_sky(&self) -> bool {
        !self.monsoon && !self.flood_watch && !matches!(self.wind, WindBand::High)
    }
}

fn pick_wind_band<R: Rng>(rng: &mut R) -> WindBand {
    let total: u32 = WIND_WEIGHTS.iter().sum();
    let mut roll = rng.gen_range(0..total);
    for (band, weight) in WIND_ORDER.iter().zip(WIND_WEIGHTS) {
        if roll < weight {
            return *band;
        }
        roll -= weight;
    }
    WindBand::Low
}

/// Sample the weather at `loc` at the moment `clock`. Pure in its inputs.
#[must_use]
pub fn sample(
    base_seed: u64,
    table: &SeasonTable,
    loc: &Location,
    clock: WorldClock,
) -> WeatherSample {
    let day = clock.day_index();
    let season = table.season_for_day(day);
    let climate = season.climate;

    let mut day_rng = seeded(base_seed, &loc.id, day, "weather.day");
    let wind = pick_wind_band(&mut day_rng);
    let humidity = (climate.humidity_base
        + day_rng.gen_range(-HUMIDITY_JITTER..=HUMIDITY_JITTER))
    .clamp(0.0, 100.0);

    let monsoon_season = season.name == "monsoon";
    let monsoon = monsoon_season
        && loc.season_rules.contains(&SeasonRule::Monsoon)
        && day_rng.r#gen::<f32>() < MONSOON_CHANCE;
    let flood_watch = monsoon
        && loc.season_rules.contains(&SeasonRule::FlashFlood)
        && day_rng.r#gen::<f32>() < FLOOD_WATCH_CHANCE / MONSOON_CHANCE;

    let frac = clock.daylight_fraction();
    let lapse = (loc.elevation_ft - REFERENCE_ELEVATION_FT) / 1_000.0 * LAPSE_RATE_PER_KFT;
    let temp_f = climate.temp_base_f + lapse + climate.diurnal_amp_f * (2.0 * frac - 1.0);
    let uv_index = climate.uv_peak * frac;

    WeatherSample {
        season: season.name.clone(),
        wind,
        heat: HeatBand::from_temp_f(temp_f),
        temp_f,
        humidity,
        uv_index,
        monsoon,
        flood_watch,
    }
}

/// Combined speed multiplier the current sky puts on driving.
#[must_use]
pub fn weather_speed_mod(sample: &WeatherSample) -> f32 {
    let mut m = 1.0;
    if sample.heat.is_hot() {
        m *= SPEED_MOD_HEAT;
    }
    if sample.wind == WindBand::High {
        m *= SPEED_MOD_HIGH_WIND;
    }
    if sample.flood_watch {
        m *= SPEED_MOD_FLOOD_WATCH;
    }
    m
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::World;

    #[test]
    fn heat_bands_bucket_correctly() {
        assert_eq!(HeatBand::from_temp_f(30.0), HeatBand::Cold);
        assert_eq!(HeatBand::from_temp_f(60.0), HeatBand::Mild);
        assert_eq!(HeatBand::from_temp_f(90.0), HeatBand::Hot);
        assert_eq!(HeatBand::from_temp_f(104.0), HeatBand::VeryHot);
        assert!(HeatBand::VeryHot.is_hot());
        assert!(!HeatBand::Cold.is_hot());
    }

    #[test]
    fn season_walk_covers_cycle() {
        let table = SeasonTable::default_config();
        let cycle = table.cycle_days();
        assert!(cycle >= 360);
        assert_eq!(table.season_for_day(0).name, table.seasons[0].name);
        assert_eq!(table.season_for_day(cycle).name, table.seasons[0].name);
        let last = table.seasons.last().unwrap();
        assert_eq!(table.season_for_day(cycle - 1).name, last.name);
    }

    #[test]
    fn bad_tables_fail_validation() {
        assert!(SeasonTable::from_json("{\"seasons\":[]}").is_err());
        let zero = r#"{"seasons":[{"name":"x","duration_days":0,
            "climate":{"uv_peak":5.0,"temp_base_f":60.0,"diurnal_amp_f":10.0,"humidity_base":30.0}}]}"#;
        assert!(SeasonTable::from_json(zero).is_err());
    }

    #[test]
    fn sampling_is_deterministic() {
        let world = World::default_world();
        let table = SeasonTable::default_config();
        let loc = world.get("moab").unwrap();
        let clock = WorldClock::from_minutes(10 * 24 * 60 + 12 * 60);
        let a = sample(0x5EED, &table, loc, clock);
        let b = sample(0x5EED, &table, loc, clock);
        assert_eq!(a, b);
    }

    #[test]
    fn temperature_tracks_elevation_and_sun() {
        let world = World::default_world();
        let table = SeasonTable::default_config();
        let low = world.get("moab").unwrap();
        let high = world.get("la_sal").unwrap();
        let noon = WorldClock::from_minutes(13 * 60);
        let night = WorldClock::from_minutes(2 * 60);

        let low_noon = sample(1, &table, low, noon);
        let high_noon = sample(1, &table, high, noon);
        assert!(high_noon.temp_f < low_noon.temp_f);

        let low_night = sample(1, &table, low, night);
        assert!(low_night.temp_f < low_noon.temp_f);
        assert!(low_night.uv_index.abs() < f32::EPSILON);
        assert!(low_noon.uv_index > 0.0);
    }

    #[test]
    fn speed_mod_compounds_hazards() {
        let mut s = WeatherSample {
            season: "summer".into(),
            wind: WindBand::High,
            heat: HeatBand::Hot,
            temp_f: 95.0,
            humidity: 10.0,
            uv_index: 8.0,
            monsoon: true,
            flood_watch: true,
        };
        let expected = SPEED_MOD_HEAT * SPEED_MOD_HIGH_WIND * SPEED_MOD_FLOOD_WATCH;
        assert!((weather_speed_mod(&s) - expected).abs() < 1e-6);
        s.heat = HeatBand::Mild;
        s.wind = WindBand::Low;
        s.flood_watch = false;
        assert!((weather_speed_mod(&s) - 1.0).abs() < f32::EPSILON);
    }
}
