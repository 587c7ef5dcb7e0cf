//! House electrical model: device loads, harvest, and net battery current.
//!
//! Everything runs on a nominal 12V bus. Harvest converts panel and
//! turbine watts to amps; loads sum device draws plus parasitic base
//! draw. The battery integrates the net current each tick.

use serde::{Deserialize, Serialize};

use crate::clock::WorldClock;
use crate::constants::{BASE_DRAW_AMPS, SYSTEM_VOLTAGE};
use crate::vehicle::VehicleState;
use crate::weather::WeatherSample;
use crate::world::Location;

/// Combustible stocks carried for devices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FuelKind {
    Diesel,
    Propane,
    Butane,
}

/// Appliances the rig can carry. Electric draws are in amps at 12V.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeviceKind {
    Fridge,
    Starlink,
    DieselHeater,
    PropaneStove,
    Jetboil,
}

impl DeviceKind {
    pub const ALL: [Self; 5] = [
        Self::Fridge,
        Self::Starlink,
        Self::DieselHeater,
        Self::PropaneStove,
        Self::Jetboil,
    ];

    /// Electric draw while on. None for devices that only burn fuel.
    #[must_use]
    pub const fn draw_amps(self) -> Option<f32> {
        match self {
            Self::Fridge => Some(4.0),
            Self::Starlink => Some(6.0),
            Self::DieselHeater => Some(1.2),
            Self::PropaneStove | Self::Jetboil => None,
        }
    }

    /// Fuel this device consumes while running, if any.
    #[must_use]
    pub const fn fuel(self) -> Option<FuelKind> {
        match self {
            Self::DieselHeater => Some(FuelKind::Diesel),
            Self::PropaneStove => Some(FuelKind::Propane),
            Self::Jetboil => Some(FuelKind::Butane),
            Self::Fridge | Self::Starlink => None,
        }
    }

    /// Devices that only matter while cooking never stay switched on.
    #[must_use]
    pub const fn switchable(self) -> bool {
        !matches!(self, Self::PropaneStove | Self::Jetboil)
    }

    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Fridge => "fridge",
            Self::Starlink => "starlink",
            Self::DieselHeater => "diesel-heater",
            Self::PropaneStove => "propane-stove",
            Self::Jetboil => "jetboil",
        }
    }

    #[must_use]
    pub fn from_key(key: &str) -> Option<Self> {
        let k = key.trim().to_ascii_lowercase().replace('_', "-");
        Self::ALL.iter().copied().find(|d| d.key() == k)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DeviceState {
    pub owned: bool,
    pub on: bool,
}

/// Owned devices plus the fuel stocks that keep them running.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DeviceBank {
    #[serde(default)]
    pub fridge: DeviceState,
    #[serde(default)]
    pub starlink: DeviceState,
    #[serde(default)]
    pub diesel_heater: DeviceState,
    #[serde(default)]
    pub propane_stove: DeviceState,
    #[serde(default)]
    pub jetboil: DeviceState,
    #[serde(default)]
    pub diesel_gal: f32,
    #[serde(default)]
    pub propane_lb: f32,
    #[serde(default)]
    pub butane_can: f32,
}

impl DeviceBank {
    #[must_use]
    pub const fn state(&self, kind: DeviceKind) -> DeviceState {
        match kind {
            DeviceKind::Fridge => self.fridge,
            DeviceKind::Starlink => self.starlink,
            DeviceKind::DieselHeater => self.diesel_heater,
            DeviceKind::PropaneStove => self.propane_stove,
            DeviceKind::Jetboil => self.jetboil,
        }
    }

    pub const fn state_mut(&mut self, kind: DeviceKind) -> &mut DeviceState {
        match kind {
            DeviceKind::Fridge => &mut self.fridge,
            DeviceKind::Starlink => &mut self.starlink,
            DeviceKind::DieselHeater => &mut self.diesel_heater,
            DeviceKind::PropaneStove => &mut self.propane_stove,
            DeviceKind::Jetboil => &mut self.jetboil,
        }
    }

    #[must_use]
    pub const fn is_on(&self, kind: DeviceKind) -> bool {
        let s = self.state(kind);
        s.owned && s.on
    }

    #[must_use]
    pub const fn fuel_level(&self, fuel: FuelKind) -> f32 {
        match fuel {
            FuelKind::Diesel => self.diesel_gal,
            FuelKind::Propane => self.propane_lb,
            FuelKind::Butane => self.butane_can,
        }
    }

    pub const fn fuel_level_mut(&mut self, fuel: FuelKind) -> &mut f32 {
        match fuel {
            FuelKind::Diesel => &mut self.diesel_gal,
            FuelKind::Propane => &mut self.propane_lb,
            FuelKind::Butane => &mut self.butane_can,
        }
    }

    /// Total electric draw of running devices, plus the parasitic base
    /// draw. Fuel-starved devices contribute nothing; the caller is
    /// responsible for forcing them off.
    #[must_use]
    pub fn load_amps(&self) -> f32 {
        let mut amps = BASE_DRAW_AMPS;
        for kind in DeviceKind::ALL {
            if !self.is_on(kind) {
                continue;
            }
            if let Some(fuel) = kind.fuel() {
                if self.fuel_level(fuel) <= 0.0 {
                    continue;
                }
            }
            if let Some(draw) = kind.draw_amps() {
                amps += draw;
            }
        }
        amps
    }
}

/// Snapshot of the bus at one moment, in amps.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PowerReading {
    pub solar_amps: f32,
    pub wind_amps: f32,
    pub load_amps: f32,
    pub net_amps: f32,
}

/// Harvested solar watts for the installed array at this site and moment.
/// Zero at night; scaled by site sun quality and by how close the UV is
/// to the seasonal peak.
#[must_use]
pub fn solar_watts(
    vehicle: &VehicleState,
    loc: &Location,
    weather: &WeatherSample,
    clock: WorldClock,
    season_uv_peak: f32,
) -> f32 {
    if !clock.is_daylight() {
        return 0.0;
    }
    let uv_ratio = if season_uv_peak > 0.0 {
        (weather.uv_index / season_uv_peak).clamp(0.0, 1.0)
    } else {
        0.0
    };
    vehicle.solar_watts * loc.resources.sun.factor() * uv_ratio
}

/// Harvested wind watts for the installed turbine in this wind band.
#[must_use]
pub fn wind_watts(vehicle: &VehicleState, loc: &Location, weather: &WeatherSample) -> f32 {
    vehicle.wind_watts * loc.resources.wind.factor() * weather.wind.power_fraction()
}

/// Net current into (positive) or out of (negative) the house battery.
#[must_use]
pub fn net_current(
    vehicle: &VehicleState,
    devices: &DeviceBank,
    loc: &Location,
    weather: &WeatherSample,
    clock: WorldClock,
    season_uv_peak: f32,
) -> PowerReading {
    let solar = solar_watts(vehicle, loc, weather, clock, season_uv_peak) / SYSTEM_VOLTAGE;
    let wind = wind_watts(vehicle, loc, weather) / SYSTEM_VOLTAGE;
    let load = devices.load_amps();
    PowerReading {
        solar_amps: solar,
        wind_amps: wind,
        load_amps: load,
        net_amps: solar + wind - load,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::weather::{HeatBand, WindBand};
    use crate::world::{ResourceGrades, ResourceQuality, World};

    fn sunny_sample() -> WeatherSample {
        WeatherSample {
            season: "summer".into(),
            wind: WindBand::Medium,
            heat: HeatBand::Hot,
            temp_f: 90.0,
            humidity: 15.0,
            uv_index: 10.0,
            monsoon: false,
            flood_watch: false,
        }
    }

    fn rig() -> VehicleState {
        let mut v = VehicleState::test_fuel_rig();
        v.solar_watts = 400.0;
        v.wind_watts = 120.0;
        v
    }

    #[test]
    fn device_keys_round_trip() {
        for kind in DeviceKind::ALL {
            assert_eq!(DeviceKind::from_key(kind.key()), Some(kind));
        }
        assert_eq!(DeviceKind::from_key("diesel_heater"), Some(DeviceKind::DieselHeater));
        assert_eq!(DeviceKind::from_key("microwave"), None);
    }

    #[test]
    fn load_sums_running_electric_devices() {
        let mut bank = DeviceBank::default();
        assert!((bank.load_amps() - BASE_DRAW_AMPS).abs() < f32::EPSILON);

        bank.fridge = DeviceState { owned: true, on: true };
        bank.starlink = DeviceState { owned: true, on: false };
        assert!((bank.load_amps() - (BASE_DRAW_AMPS + 4.0)).abs() < f32::EPSILON);

        // Dry heater draws nothing even while flagged on.
        bank.diesel_heater = DeviceState { owned: true, on: true };
        bank.diesel_gal = 0.0;
        assert!((bank.load_amps() - (BASE_DRAW_AMPS + 4.0)).abs() < f32::EPSILON);
        bank.diesel_gal = 2.0;
        assert!((bank.load_amps() - (BASE_DRAW_AMPS + 5.2)).abs() < f32::EPSILON);
    }

    #[test]
    fn solar_is_zero_at_night() {
        let world = World::default_world();
        let loc = world.get("moab").unwrap();
        let v = rig();
        let night = WorldClock::from_minutes(60);
        assert!(solar_watts(&v, loc, &sunny_sample(), night, 10.0).abs() < f32::EPSILON);
        let noon = WorldClock::from_minutes(13 * 60);
        assert!(solar_watts(&v, loc, &sunny_sample(), noon, 10.0) > 0.0);
    }

    #[test]
    fn site_quality_scales_harvest() {
        let world = World::default_world();
        let mut good = world.get("moab").unwrap().clone();
        good.resources = ResourceGrades {
            sun: ResourceQuality::Excellent,
            wind: ResourceQuality::Excellent,
            ..ResourceGrades::default()
        };
        let mut poor = good.clone();
        poor.resources.sun = ResourceQuality::Poor;
        poor.resources.wind = ResourceQuality::Poor;

        let v = rig();
        let noon = WorldClock::from_minutes(13 * 60);
        let sample = sunny_sample();
        assert!(
            solar_watts(&v, &good, &sample, noon, 10.0)
                > solar_watts(&v, &poor, &sample, noon, 10.0)
        );
        assert!(wind_watts(&v, &good, &sample) > wind_watts(&v, &poor, &sample));
    }

    #[test]
    fn net_current_balances_harvest_against_load() {
        let world = World::default_world();
        let loc = world.get("moab").unwrap();
        let v = rig();
        let mut bank = DeviceBank::default();
        bank.starlink = DeviceState { owned: true, on: true };
        let noon = WorldClock::from_minutes(13 * 60);
        let reading = net_current(&v, &bank, loc, &sunny_sample(), noon, 10.0);
        let expected = reading.solar_amps + reading.wind_amps - reading.load_amps;
        assert!((reading.net_amps - expected).abs() < 1e-6);
        assert!(reading.load_amps > BASE_DRAW_AMPS);
    }
}
