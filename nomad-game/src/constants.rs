//! Centralized balance and tuning constants for Nomad game logic.
//!
//! These values define the deterministic math for the core simulation.
//! Keeping them together ensures that gameplay can only be adjusted via
//! code changes reviewed in version control, rather than through external
//! JSON assets.

// Logging keys -------------------------------------------------------------
pub(crate) const LOG_TRAVELED: &str = "log.travel.arrived";
pub(crate) const LOG_TRAVEL_DETOUR: &str = "log.travel.detour";
pub(crate) const LOG_WORKED: &str = "log.work.paid";
pub(crate) const LOG_WORK_BONUS: &str = "log.work.client-bonus";
pub(crate) const LOG_GIG_DONE: &str = "log.work.gig-done";
pub(crate) const LOG_CAMPED: &str = "log.camp.morning";
pub(crate) const LOG_RANGER_CHECK: &str = "log.camp.ranger-check";
pub(crate) const LOG_RANGER_FINE: &str = "log.camp.ranger-fine";
pub(crate) const LOG_NO_SIGNAL_NIGHT: &str = "log.camp.no-signal";
pub(crate) const LOG_EPIC_SHOT: &str = "log.camp.epic-shot";
pub(crate) const LOG_REMOTE_CAMP_INCOME: &str = "log.camp.remote-income";
pub(crate) const LOG_SCENIC_FIND: &str = "log.hike.scenic-find";
pub(crate) const LOG_HIKE_DUSK_TURNBACK: &str = "log.hike.dusk-turnback";
pub(crate) const LOG_HIKE_FORAGED: &str = "log.hike.foraged";
pub(crate) const LOG_COOKED: &str = "log.camp.cooked";
pub(crate) const LOG_CHARGED: &str = "log.power.charged";
pub(crate) const LOG_REFUELED: &str = "log.power.refueled";
pub(crate) const LOG_DEVICE_FORCED_OFF: &str = "log.power.device-forced-off";
pub(crate) const LOG_PURCHASED: &str = "log.store.purchased";
pub(crate) const LOG_PET_ADOPTED: &str = "log.pet.adopted";
pub(crate) const LOG_PET_WATER_FOUND: &str = "log.pet.water-found";
pub(crate) const LOG_LEVEL_UP: &str = "log.player.level-up";

// Clock --------------------------------------------------------------------
pub(crate) const TICK_MINUTES: u64 = 15;
pub(crate) const DAY_MINUTES: u64 = 24 * 60;
pub(crate) const DAYLIGHT_START_MIN: u64 = 6 * 60;
pub(crate) const DAYLIGHT_END_MIN: u64 = 20 * 60;
pub(crate) const TICK_HOURS: f32 = 0.25;

// Electrical system --------------------------------------------------------
pub(crate) const SYSTEM_VOLTAGE: f32 = 12.0;
pub(crate) const HOUSE_CAP_BASE_AH: f32 = 100.0;
pub(crate) const BASE_DRAW_AMPS: f32 = 0.8;
pub(crate) const DIESEL_HEATER_BURN_GPH: f32 = 0.15;
pub(crate) const EV_SOLAR_TRICKLE_WATT_DIVISOR: f32 = 1000.0;
pub(crate) const EV_WIND_TRICKLE_WATT_DIVISOR: f32 = 300.0;
pub(crate) const ALTERNATOR_PCT_PER_HOUR: f32 = 2.0;
pub(crate) const IDLE_BURN_GPH: f32 = 0.2;
pub(crate) const EV_IDLE_PACK_PCT_PER_HOUR: f32 = 0.5;
pub(crate) const EV_RANGE_UPGRADE_CAP_MI: f32 = 360.0;

// Passive drains per tick --------------------------------------------------
pub(crate) const PASSIVE_WATER_DRAIN_L: f32 = 0.03;
pub(crate) const PASSIVE_ENERGY_DRAIN: f32 = 0.2;
pub(crate) const COMPANION_ENERGY_DRAIN: f32 = 0.5;

// Weather ------------------------------------------------------------------
pub(crate) const REFERENCE_ELEVATION_FT: f32 = 4_000.0;
pub(crate) const LAPSE_RATE_PER_KFT: f32 = -3.5;
pub(crate) const MONSOON_CHANCE: f32 = 0.20;
pub(crate) const FLOOD_WATCH_CHANCE: f32 = 0.15;
pub(crate) const HUMIDITY_JITTER: f32 = 8.0;
pub(crate) const HEAT_COLD_BELOW_F: f32 = 45.0;
pub(crate) const HEAT_HOT_FROM_F: f32 = 85.0;
pub(crate) const HEAT_VERY_HOT_FROM_F: f32 = 100.0;
pub(crate) const SPEED_MOD_HEAT: f32 = 0.95;
pub(crate) const SPEED_MOD_HIGH_WIND: f32 = 0.92;
pub(crate) const SPEED_MOD_FLOOD_WATCH: f32 = 0.90;

// Travel -------------------------------------------------------------------
pub(crate) const MIN_TRAVEL_SPEED_MPH: f32 = 15.0;
pub(crate) const DETOUR_CHANCE: f32 = 0.06;
pub(crate) const DETOUR_MIN_TICKS: u32 = 1;
pub(crate) const DETOUR_MAX_TICKS: u32 = 3;
pub(crate) const DRIVE_WATER_DRAIN_PER_HOUR: f32 = 0.1;
pub(crate) const DRIVE_ENERGY_DRAIN_PER_HOUR: f32 = 6.0;
pub(crate) const DRIVE_PET_ENERGY_PER_HOUR: f32 = 4.0;
pub(crate) const DRIVE_PET_ALERT_GAIN: f32 = 5.0;

// Work & economy -----------------------------------------------------------
pub(crate) const WORK_MIN_HOURS: f32 = 1.0;
pub(crate) const WORK_MAX_HOURS: f32 = 6.0;
pub(crate) const FATIGUE_FULL_BELOW_HOURS: f32 = 4.0;
pub(crate) const FATIGUE_STEP1_BELOW_HOURS: f32 = 6.0;
pub(crate) const FATIGUE_STEP2_BELOW_HOURS: f32 = 8.0;
pub(crate) const FATIGUE_FULL_MULT: f32 = 1.0;
pub(crate) const FATIGUE_STEP1_MULT: f32 = 0.85;
pub(crate) const FATIGUE_STEP2_MULT: f32 = 0.7;
pub(crate) const FATIGUE_FLOOR_MULT: f32 = 0.55;
pub(crate) const WORK_VARIANCE_MIN: f32 = 0.9;
pub(crate) const WORK_VARIANCE_MAX: f32 = 1.15;
pub(crate) const OFF_WINDOW_MULT: f32 = 0.6;
pub(crate) const WINDOW_MULT_SUNRISE: f32 = 1.6;
pub(crate) const WINDOW_MULT_GOLDEN_HOUR: f32 = 1.5;
pub(crate) const WINDOW_MULT_MORNING: f32 = 1.15;
pub(crate) const WINDOW_MULT_DAYLIGHT: f32 = 1.0;
pub(crate) const WINDOW_MULT_NIGHT: f32 = 0.9;
pub(crate) const WINDOW_MULT_NIGHT_CLEAR: f32 = 1.4;
pub(crate) const CREATIVE_BONUS_BASE_CHANCE: f32 = 0.15;
pub(crate) const CREATIVE_BONUS_GOLDEN_EXTRA: f32 = 0.05;
pub(crate) const CREATIVE_BONUS_MIN_CENTS: i64 = 4_000;
pub(crate) const CREATIVE_BONUS_MAX_CENTS: i64 = 14_000;
pub(crate) const WORK_ENERGY_PER_HOUR: f32 = 2.5;
pub(crate) const WORK_DEV_ENERGY_PER_HOUR: f32 = 1.5;
pub(crate) const WORK_WATER_PER_HOUR: f32 = 0.06;
pub(crate) const XP_PER_WORK_HOUR: f32 = 10.0;
pub(crate) const XP_DIFFICULTY_MULT: f32 = 1.25;
pub(crate) const GIG_MIN_HOURS: f32 = 1.5;
pub(crate) const GIG_MAX_HOURS: f32 = 3.0;
pub(crate) const GIG_ENERGY_PER_HOUR: f32 = 2.0;
pub(crate) const GIG_WATER_PER_HOUR: f32 = 0.05;
pub(crate) const MECHANIC_GIG_MULT: f32 = 1.1;

// Charging & refueling -----------------------------------------------------
pub(crate) const STATION_CHARGE_PCT: f32 = 40.0;
pub(crate) const STATION_COST_CENTS_PER_PCT: i64 = 50;
pub(crate) const STATION_CHARGE_MINUTES: u64 = 60;
pub(crate) const TRICKLE_CHARGE_MINUTES: u64 = 120;
pub(crate) const SOLAR_CHARGE_PCT_PER_KW: f32 = 8.0;
pub(crate) const WIND_CHARGE_PCT_PER_UNIT: f32 = 2.0;
pub(crate) const FUEL_PRICE_CENTS_PER_GAL: i64 = 400;
pub(crate) const REFUEL_MINUTES: u64 = 15;

// Camping ------------------------------------------------------------------
pub(crate) const WAKE_MINUTE_OF_DAY: u64 = 6 * 60;
pub(crate) const CAMP_WATER_PER_HOUR: f32 = 0.1;
pub(crate) const RANGER_KNOCK_PAID: f32 = 0.01;
pub(crate) const RANGER_KNOCK_STEALTH: f32 = 0.08;
pub(crate) const RANGER_KNOCK_STEALTH_STRICT_PETS: f32 = 0.06;
pub(crate) const RANGER_KNOCK_STEALTH_ALERT_PET: f32 = 0.04;
pub(crate) const RANGER_KNOCK_DISPERSED_PARK: f32 = 0.04;
pub(crate) const RANGER_KNOCK_DISPERSED_WILD: f32 = 0.005;
pub(crate) const STEALTH_FINE_CENTS: i64 = 2_500;
pub(crate) const STEALTH_FINE_MORALE: f32 = 6.0;
pub(crate) const EPIC_SHOT_CHANCE: f32 = 0.35;
pub(crate) const EPIC_SHOT_MIN_CENTS: i64 = 3_000;
pub(crate) const EPIC_SHOT_MAX_CENTS: i64 = 8_000;
pub(crate) const EPIC_SHOT_MORALE: f32 = 4.0;

// Hiking -------------------------------------------------------------------
pub(crate) const HIKE_SCENIC_BASE_CHANCE: f32 = 0.08;
pub(crate) const HIKE_SCENIC_MORALE: f32 = 4.0;
pub(crate) const HIKE_ENERGY_PER_HOUR: f32 = 3.0;
pub(crate) const HIKE_ENERGY_MAX: f32 = 12.0;
pub(crate) const HIKE_WATER_PER_HOUR: f32 = 0.12;
pub(crate) const HIKE_MIN_BASE_HOURS: u32 = 1;
pub(crate) const HIKE_MAX_BASE_HOURS: u32 = 5;

// Pets ---------------------------------------------------------------------
pub(crate) const PET_SEARCH_FIND_CHANCE: f32 = 0.4;
pub(crate) const PET_SEARCH_WATER_L: f32 = 1.0;
