//! Campaign state and the per-tick simulation step.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::action::{ActionError, ActionReport, ActionResult};
use crate::clock::WorldClock;
use crate::constants::{
    ALTERNATOR_PCT_PER_HOUR, COMPANION_ENERGY_DRAIN, DIESEL_HEATER_BURN_GPH,
    EV_IDLE_PACK_PCT_PER_HOUR, EV_SOLAR_TRICKLE_WATT_DIVISOR, EV_WIND_TRICKLE_WATT_DIVISOR,
    FUEL_PRICE_CENTS_PER_GAL, IDLE_BURN_GPH,
    LOG_CHARGED, LOG_DEVICE_FORCED_OFF, LOG_LEVEL_UP, LOG_PURCHASED, LOG_REFUELED,
    PASSIVE_ENERGY_DRAIN, PASSIVE_WATER_DRAIN_L, REFUEL_MINUTES, SOLAR_CHARGE_PCT_PER_KW,
    STATION_CHARGE_MINUTES, STATION_CHARGE_PCT, STATION_COST_CENTS_PER_PCT, TICK_HOURS,
    TICK_MINUTES, TRICKLE_CHARGE_MINUTES, WIND_CHARGE_PCT_PER_UNIT,
};
use crate::jobs::{JobId, JobPerks};
use crate::numbers::round_f32_to_i64;
use crate::pet::Companion;
use crate::power::{self, DeviceBank, DeviceKind, FuelKind};
use crate::rng::{self, SessionRng};
use crate::store::{Catalog, CatalogItem, ItemEffect, effective_price_cents};
use crate::travel::Route;
use crate::vehicle::{Drivetrain, VehicleState};
use crate::weather::{self, SeasonTable, WeatherSample};
use crate::world::World;
use crate::{GameData, NewGameConfig, NewGameError};

/// The traveler: money, condition, and career progress.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerState {
    pub name: String,
    pub cash_cents: i64,
    pub energy: f32,
    pub morale: f32,
    pub xp: f32,
}

impl PlayerState {
    #[must_use]
    pub fn new(name: String, cash_cents: i64) -> Self {
        Self {
            name,
            cash_cents,
            energy: 80.0,
            morale: 70.0,
            xp: 0.0,
        }
    }

    /// Current level, derived from xp. Level N requires
    /// `100 * N * (N + 1) / 2` total xp, so level is always consistent
    /// with xp no matter how it was earned.
    #[must_use]
    pub fn level(&self) -> u32 {
        let xp = u64::try_from(round_f32_to_i64(self.xp.max(0.0).floor())).unwrap_or(0);
        let mut level = 1u32;
        while u64::from(level) * u64::from(level + 1) * 50 <= xp {
            level += 1;
        }
        level
    }

    /// Debit cash, failing without mutation when short.
    ///
    /// # Errors
    ///
    /// Returns [`ActionError::InsufficientCash`] when the balance is short.
    pub fn try_spend(&mut self, cents: i64) -> Result<(), ActionError> {
        if cents > self.cash_cents {
            return Err(ActionError::InsufficientCash {
                needed_cents: cents,
                available_cents: self.cash_cents,
            });
        }
        self.cash_cents -= cents;
        Ok(())
    }

    pub fn add_cash(&mut self, cents: i64) {
        self.cash_cents += cents;
    }

    pub fn add_energy(&mut self, delta: f32) {
        self.energy = (self.energy + delta).clamp(0.0, 100.0);
    }

    pub fn add_morale(&mut self, delta: f32) {
        self.morale = (self.morale + delta).clamp(0.0, 100.0);
    }

    /// Grant xp and report how many levels it crossed.
    pub fn add_xp(&mut self, xp: f32) -> u32 {
        let before = self.level();
        self.xp += xp.max(0.0);
        self.level() - before
    }
}

/// Hours worked per activity kind since the last midnight. Fatigue is
/// same-day, same-kind: a morning of wrenching does not slow an evening
/// of photography.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct WorkLedger {
    pub day: u64,
    pub hours_by_kind: HashMap<String, f32>,
}

impl WorkLedger {
    pub fn record(&mut self, day: u64, kind: &str, hours: f32) {
        self.roll_to(day);
        *self.hours_by_kind.entry(kind.to_string()).or_insert(0.0) += hours;
    }

    #[must_use]
    pub fn hours_today(&self, kind: &str) -> f32 {
        self.hours_by_kind.get(kind).copied().unwrap_or(0.0)
    }

    pub fn roll_to(&mut self, day: u64) {
        if day != self.day {
            self.day = day;
            self.hours_by_kind.clear();
        }
    }
}

/// Full campaign state. Serializable except for the session RNG, which is
/// rebuilt from the campaign seed on load.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub world: World,
    pub seasons: SeasonTable,
    pub catalog: Catalog,
    pub job: JobId,
    pub perks: JobPerks,
    pub clock: WorldClock,
    pub location_id: String,
    pub player: PlayerState,
    pub vehicle: VehicleState,
    pub devices: DeviceBank,
    pub companion: Option<Companion>,
    pub route: Option<Route>,
    pub work: WorkLedger,
    /// Gig id to the last campaign day it was worked.
    pub gig_cooldowns: HashMap<String, u64>,
    pub logs: Vec<String>,
    pub campaign_seed: u64,
    pub weather_seed: u64,
    #[serde(skip)]
    session_rng: Option<SessionRng>,
}

impl GameState {
    /// Start a new campaign.
    ///
    /// # Errors
    ///
    /// Returns [`NewGameError`] when the requested vehicle, drivetrain, or
    /// start location does not exist in the loaded data.
    pub fn new(data: GameData, cfg: &NewGameConfig) -> Result<Self, NewGameError> {
        let GameData {
            world,
            vehicles,
            jobs,
            seasons,
            catalog,
        } = data;

        let arch = vehicles
            .get(&cfg.vehicle)
            .ok_or_else(|| NewGameError::UnknownVehicle(cfg.vehicle.clone()))?;
        if !arch.drivetrains.contains(&cfg.drivetrain) {
            return Err(NewGameError::UnsupportedDrivetrain {
                vehicle: cfg.vehicle.clone(),
            });
        }
        let start_id = match &cfg.start_location {
            Some(id) => world
                .get(id)
                .ok_or_else(|| NewGameError::UnknownStart(id.clone()))?
                .id
                .clone(),
            None => world
                .locations()
                .find(|l| l.outfitter)
                .or_else(|| world.locations().next())
                .ok_or(NewGameError::EmptyWorld)?
                .id
                .clone(),
        };

        let vehicle = VehicleState::from_archetype(arch, cfg.drivetrain);
        let perks = jobs.perks(cfg.job);
        let weather_seed = rng::derive_stream_seed(cfg.seed, b"nomad.weather.v1");

        Ok(Self {
            world,
            seasons,
            catalog,
            job: cfg.job,
            perks,
            clock: WorldClock::default(),
            location_id: start_id,
            player: PlayerState::new(cfg.name.clone(), cfg.start_cash_cents),
            vehicle,
            devices: DeviceBank::default(),
            companion: None,
            route: None,
            work: WorkLedger::default(),
            gig_cooldowns: HashMap::new(),
            logs: Vec::new(),
            campaign_seed: cfg.seed,
            weather_seed,
            session_rng: None,
        })
    }

    /// The location the rig is parked at. The id is maintained as a valid
    /// key by every move operation.
    #[must_use]
    pub fn location(&self) -> &crate::world::Location {
        self.world
            .get(&self.location_id)
            .expect("location_id always names a world location")
    }

    /// Session RNG for run-to-run stochastic events. Lazily rebuilt after
    /// deserialization.
    pub fn rng(&mut self) -> &mut SessionRng {
        let seed = self.campaign_seed;
        self.session_rng.get_or_insert_with(|| rng::session_rng(seed))
    }

    /// Weather at the current location and moment. Pure in the seed.
    #[must_use]
    pub fn weather_now(&self) -> WeatherSample {
        weather::sample(self.weather_seed, &self.seasons, self.location(), self.clock)
    }

    /// Weather at a given location and moment.
    #[must_use]
    pub fn weather_at(&self, loc: &crate::world::Location, clock: WorldClock) -> WeatherSample {
        weather::sample(self.weather_seed, &self.seasons, loc, clock)
    }

    /// UV peak for the season active right now.
    #[must_use]
    pub fn season_uv_peak(&self) -> f32 {
        self.seasons
            .season_for_day(self.clock.day_index())
            .climate
            .uv_peak
    }

    /// Advance simulated time in whole ticks, dropping any remainder
    /// under a quarter hour. Returns the number of ticks run.
    pub fn advance(&mut self, minutes: u64) -> u32 {
        let ticks = minutes / TICK_MINUTES;
        for _ in 0..ticks {
            self.tick();
        }
        u32::try_from(ticks).unwrap_or(u32::MAX)
    }

    /// One 15-minute step. Power integrates from the state at the start
    /// of the tick, then fuel burns, then the clock moves, then passive
    /// drains and trickles apply.
    fn tick(&mut self) {
        let weather = self.weather_now();
        let uv_peak = self.season_uv_peak();
        let reading = power::net_current(
            &self.vehicle,
            &self.devices,
            self.location(),
            &weather,
            self.clock,
            uv_peak,
        );
        let capacity = self.vehicle.house_capacity_ah();
        if capacity > 0.0 {
            let delta_pct = reading.net_amps * TICK_HOURS / capacity * 100.0;
            self.vehicle.charge_house(delta_pct);
        }

        if self.devices.is_on(DeviceKind::DieselHeater) {
            let level = self.devices.fuel_level_mut(FuelKind::Diesel);
            *level = (*level - DIESEL_HEATER_BURN_GPH * TICK_HOURS).max(0.0);
            if *level <= 0.0 {
                self.devices.state_mut(DeviceKind::DieselHeater).on = false;
                self.logs.push(String::from(LOG_DEVICE_FORCED_OFF));
            }
        }

        self.clock.advance_tick();

        self.vehicle.drain_water(PASSIVE_WATER_DRAIN_L);
        self.player.add_energy(-PASSIVE_ENERGY_DRAIN);
        if let Some(pet) = &mut self.companion {
            pet.energy = (pet.energy - COMPANION_ENERGY_DRAIN).max(0.0);
        }

        if self.vehicle.drivetrain == Drivetrain::Electric {
            let solar = power::solar_watts(
                &self.vehicle,
                self.location(),
                &weather,
                self.clock,
                uv_peak,
            );
            let wind = power::wind_watts(&self.vehicle, self.location(), &weather);
            let trickle = (solar / EV_SOLAR_TRICKLE_WATT_DIVISOR
                + wind / EV_WIND_TRICKLE_WATT_DIVISOR)
                * TICK_HOURS;
            self.vehicle.charge_ev(trickle);
        }

        self.work.roll_to(self.clock.day_index());
    }

    /// Grant xp through the player and log any level-ups.
    pub fn grant_xp(&mut self, xp: f32) -> u32 {
        let levels = self.player.add_xp(xp);
        for _ in 0..levels {
            self.logs.push(String::from(LOG_LEVEL_UP));
        }
        levels
    }

    /// Switch an owned device on or off.
    ///
    /// # Errors
    ///
    /// Fails for unowned or non-switchable devices, and when switching on
    /// a fuel device with an empty reserve.
    pub fn toggle_device(&mut self, kind: DeviceKind) -> ActionResult {
        let state = self.devices.state(kind);
        if !state.owned {
            return Err(ActionError::DeviceNotOwned(kind.key().into()));
        }
        if !kind.switchable() {
            return Err(ActionError::DeviceNotSwitchable(kind.key().into()));
        }
        if !state.on {
            if let Some(fuel) = kind.fuel() {
                if self.devices.fuel_level(fuel) <= 0.0 {
                    return Err(ActionError::NoDeviceFuel(kind.key().into()));
                }
            }
        }
        self.devices.state_mut(kind).on = !state.on;
        Ok(ActionReport::default())
    }

    /// Fast-charge the EV pack at a station.
    ///
    /// # Errors
    ///
    /// Requires an electric drivetrain, a fast charger on site, headroom
    /// in the pack, and cash for the applied percentage.
    pub fn charge_at_station(&mut self) -> ActionResult {
        if self.vehicle.drivetrain != Drivetrain::Electric {
            return Err(ActionError::DrivetrainMismatch);
        }
        if !self.location().fast_charger {
            return Err(ActionError::MissingAmenity("fast charger"));
        }
        let headroom = 100.0 - self.vehicle.ev_charge_pct;
        let applied = headroom.min(STATION_CHARGE_PCT);
        if applied <= 0.0 {
            return Err(ActionError::PackAlreadyFull);
        }
        let cost = round_f32_to_i64(applied) * STATION_COST_CENTS_PER_PCT;
        self.player.try_spend(cost)?;
        self.vehicle.charge_ev(applied);
        let ticks = self.advance(STATION_CHARGE_MINUTES);
        self.logs.push(String::from(LOG_CHARGED));
        Ok(ActionReport {
            ticks,
            cash_delta_cents: -cost,
            ..ActionReport::default()
        })
    }

    /// Park for two hours with the panels tilted at the sun. Adds a
    /// direct charge on top of the per-tick harvest, scaled by how good
    /// the site is for solar.
    ///
    /// # Errors
    ///
    /// Needs daylight and installed solar capacity.
    pub fn solar_charge(&mut self) -> ActionResult {
        if self.vehicle.solar_watts <= 0.0 {
            return Err(ActionError::DeviceNotOwned("solar array".into()));
        }
        if !self.clock.is_daylight() {
            return Err(ActionError::Nighttime);
        }
        let site = self.location().resources.sun.factor();
        let pct = self.vehicle.solar_watts / EV_SOLAR_TRICKLE_WATT_DIVISOR
            * SOLAR_CHARGE_PCT_PER_KW
            * site;
        if self.vehicle.drivetrain == Drivetrain::Electric {
            self.vehicle.charge_ev(pct);
        }
        self.vehicle.charge_house(pct);
        let ticks = self.advance(TRICKLE_CHARGE_MINUTES);
        self.logs.push(String::from(LOG_CHARGED));
        Ok(ActionReport::with_ticks(ticks))
    }

    /// Park for two hours and let the turbine spin. Yield follows the
    /// current wind band.
    ///
    /// # Errors
    ///
    /// Needs an installed wind turbine.
    pub fn wind_charge(&mut self) -> ActionResult {
        if self.vehicle.wind_watts <= 0.0 {
            return Err(ActionError::DeviceNotOwned("wind turbine".into()));
        }
        let band = self.weather_now().wind.power_fraction();
        let pct = self.vehicle.wind_watts / EV_WIND_TRICKLE_WATT_DIVISOR
            * WIND_CHARGE_PCT_PER_UNIT
            * band;
        if self.vehicle.drivetrain == Drivetrain::Electric {
            self.vehicle.charge_ev(pct);
        }
        self.vehicle.charge_house(pct);
        let ticks = self.advance(TRICKLE_CHARGE_MINUTES);
        self.logs.push(String::from(LOG_CHARGED));
        Ok(ActionReport::with_ticks(ticks))
    }

    /// Swap the rig between drivetrain modes.
    ///
    /// # Errors
    ///
    /// Fails when already in that mode or when the archetype never
    /// supported the requested one.
    pub fn set_drivetrain(&mut self, drivetrain: Drivetrain) -> ActionResult {
        if self.vehicle.drivetrain == drivetrain {
            return Err(ActionError::DrivetrainUnchanged);
        }
        if !self.vehicle.drivetrains.contains(&drivetrain) {
            return Err(ActionError::DrivetrainUnsupported);
        }
        self.vehicle.drivetrain = drivetrain;
        Ok(ActionReport::default())
    }

    /// Run the engine to top up the house battery from the alternator.
    /// Burns fuel; electric rigs trade pack charge instead.
    pub fn idle_charge_house(&mut self, hours: f32) -> ActionResult {
        let hours = hours.clamp(0.25, 4.0);
        match self.vehicle.drivetrain {
            Drivetrain::Fuel => {
                let burn = IDLE_BURN_GPH * hours;
                if self.vehicle.fuel_gal < burn {
                    return Err(ActionError::InsufficientFuel {
                        needed_gal: burn,
                        available_gal: self.vehicle.fuel_gal,
                    });
                }
                self.vehicle.drain_fuel(burn);
            }
            Drivetrain::Electric => {
                let pack_cost = EV_IDLE_PACK_PCT_PER_HOUR * hours;
                if self.vehicle.ev_charge_pct < pack_cost {
                    return Err(ActionError::InsufficientCharge {
                        needed_pct: pack_cost,
                        available_pct: self.vehicle.ev_charge_pct,
                    });
                }
                self.vehicle.drain_ev(pack_cost);
            }
        }
        self.vehicle.charge_house(ALTERNATOR_PCT_PER_HOUR * hours);
        let ticks = self.advance(u64::from(crate::numbers::round_f32_to_u32(hours * 60.0)));
        self.logs.push(String::from(LOG_CHARGED));
        Ok(ActionReport::with_ticks(ticks))
    }

    /// Buy fuel at a station pump. The applied amount clamps to tank
    /// headroom and only the applied gallons are billed.
    ///
    /// # Errors
    ///
    /// Requires a fuel drivetrain, a station on site, and cash.
    pub fn refuel(&mut self, gallons: f32) -> ActionResult {
        if self.vehicle.drivetrain != Drivetrain::Fuel {
            return Err(ActionError::DrivetrainMismatch);
        }
        if !self.location().fuel_station {
            return Err(ActionError::MissingAmenity("fuel station"));
        }
        if gallons <= 0.0 {
            return Err(ActionError::InvalidQuantity);
        }
        let headroom = self.vehicle.tank_gal - self.vehicle.fuel_gal;
        let applied = gallons.min(headroom);
        if applied <= 0.0 {
            return Err(ActionError::InvalidQuantity);
        }
        let cost = round_f32_to_i64(applied * crate::numbers::i64_to_f32(FUEL_PRICE_CENTS_PER_GAL));
        self.player.try_spend(cost)?;
        self.vehicle.add_fuel(applied);
        let ticks = self.advance(REFUEL_MINUTES);
        self.logs.push(String::from(LOG_REFUELED));
        Ok(ActionReport {
            ticks,
            cash_delta_cents: -cost,
            ..ActionReport::default()
        })
    }

    /// Buy from the local outfitter. All-or-nothing: validation happens
    /// before any effect applies.
    ///
    /// # Errors
    ///
    /// Fails for unknown items, missing outfitter, level gates, duplicate
    /// unique gear, bad quantities, and short cash.
    pub fn purchase(&mut self, query: &str, quantity: u32) -> ActionResult {
        if !self.location().outfitter {
            return Err(ActionError::MissingAmenity("outfitter"));
        }
        if quantity == 0 {
            return Err(ActionError::InvalidQuantity);
        }
        let item = self
            .catalog
            .find(query)
            .ok_or_else(|| ActionError::UnknownItem(query.into()))?
            .clone();
        if self.player.level() < item.min_level {
            return Err(ActionError::LevelTooLow {
                required: item.min_level,
                level: self.player.level(),
            });
        }
        match item.effect {
            ItemEffect::GrantTent => {
                if quantity != 1 {
                    return Err(ActionError::InvalidQuantity);
                }
                if self.vehicle.tent {
                    return Err(ActionError::AlreadyOwned(item.id.clone()));
                }
            }
            ItemEffect::GrantDevice { device } => {
                if quantity != 1 {
                    return Err(ActionError::InvalidQuantity);
                }
                if self.devices.state(device).owned {
                    return Err(ActionError::AlreadyOwned(item.id.clone()));
                }
            }
            _ => {}
        }
        let unit = effective_price_cents(&item, self.perks.shop_discount);
        let total = unit * i64::from(quantity);
        self.player.try_spend(total)?;
        for _ in 0..quantity {
            self.apply_item_effect(&item);
        }
        self.logs.push(String::from(LOG_PURCHASED));
        Ok(ActionReport {
            cash_delta_cents: -total,
            ..ActionReport::default()
        })
    }

    fn apply_item_effect(&mut self, item: &CatalogItem) {
        match item.effect {
            ItemEffect::AddFood { rations } => self.vehicle.add_rations(rations),
            ItemEffect::AddWater { liters } => self.vehicle.add_water(liters),
            ItemEffect::AddSolarWatts { watts } => self.vehicle.add_solar(watts),
            ItemEffect::AddWindWatts { watts } => self.vehicle.add_wind(watts),
            ItemEffect::AddEvRange { miles } => self.vehicle.add_ev_range(miles),
            ItemEffect::AddStorage { water_l, rations } => {
                self.vehicle.add_storage(water_l, rations);
            }
            ItemEffect::GrantTent => self.vehicle.tent = true,
            ItemEffect::GrantDevice { device } => {
                self.devices.state_mut(device).owned = true;
            }
            ItemEffect::AddFuel { fuel, amount } => {
                let level = self.devices.fuel_level_mut(fuel);
                *level += amount.max(0.0);
            }
        }
    }
}

#[cfg(test)]
pub(crate) fn test_state() -> GameState {
    use crate::GameData;

    let cfg = NewGameConfig {
        name: "Tester".into(),
        vehicle: "van".into(),
        drivetrain: Drivetrain::Fuel,
        job: JobId::Photographer,
        start_location: Some("moab".into()),
        start_cash_cents: 50_000,
        seed: 0x5EED_CAFE,
    };
    GameState::new(GameData::bundled(), &cfg).expect("bundled data starts a campaign")
}
