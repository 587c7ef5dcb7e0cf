//! Vehicle archetypes and the live rig state.

use serde::{Deserialize, Serialize};

use crate::constants::{EV_RANGE_UPGRADE_CAP_MI, HOUSE_CAP_BASE_AH};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Drivetrain {
    Electric,
    Fuel,
}

/// Authored vehicle class a campaign starts from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VehicleArchetype {
    pub id: String,
    pub name: String,
    pub drivetrains: Vec<Drivetrain>,
    pub mpg: f32,
    pub tank_gal: f32,
    pub ev_range_mi: f32,
    pub base_solar_watts: f32,
    #[serde(default)]
    pub base_wind_watts: f32,
    pub water_capacity_l: f32,
    pub food_capacity: u32,
    pub house_cap_factor: f32,
    /// How hard the rig is to spot while stealth camping. Lower is better.
    pub stealth_factor: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VehicleTable {
    pub vehicles: Vec<VehicleArchetype>,
}

impl VehicleTable {
    /// Load vehicle archetypes from JSON.
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
        if self.vehicles.is_empty() {
            return Err("Vehicle table must not be empty".into());
        }
        for v in &self.vehicles {
            if v.drivetrains.is_empty() {
                return Err(format!("Vehicle '{}' supports no drivetrain", v.id));
            }
            if v.mpg <= 0.0 || v.tank_gal <= 0.0 || v.ev_range_mi <= 0.0 {
                return Err(format!("Vehicle '{}' has non-positive range stats", v.id));
            }
            if v.house_cap_factor <= 0.0 {
                return Err(format!("Vehicle '{}' has non-positive house capacity", v.id));
            }
        }
        Ok(())
    }

    /// Embedded default archetypes.
    ///
    /// # Panics
    ///
    /// Panics if the bundled asset is invalid, which is a build defect.
    #[must_use]
    pub fn default_config() -> Self {
        Self::from_json(include_str!("../assets/vehicles.json"))
            .expect("bundled vehicles.json is valid")
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<&VehicleArchetype> {
        self.vehicles.iter().find(|v| v.id == id)
    }
}

/// The live rig: drivetrain, charge, fuel, water, rations, and upgrades.
/// All mutators clamp so callers cannot push a stock out of range.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VehicleState {
    pub archetype: String,
    pub drivetrain: Drivetrain,
    /// Drivetrains the archetype supports, for mode switches.
    pub drivetrains: Vec<Drivetrain>,
    pub mpg: f32,
    pub tank_gal: f32,
    pub fuel_gal: f32,
    pub ev_range_max_mi: f32,
    pub ev_charge_pct: f32,
    pub solar_watts: f32,
    pub wind_watts: f32,
    pub house_battery_pct: f32,
    pub house_cap_factor: f32,
    pub water_capacity_l: f32,
    pub water_l: f32,
    pub food_capacity: u32,
    pub rations: u32,
    pub stealth_factor: f32,
    #[serde(default)]
    pub tent: bool,
}

impl VehicleState {
    /// Build a fresh rig from an archetype. Fuel rigs start with a partial
    /// tank, electric rigs with a healthy but not full charge.
    #[must_use]
    pub fn from_archetype(arch: &VehicleArchetype, drivetrain: Drivetrain) -> Self {
        let (fuel_gal, ev_charge_pct) = match drivetrain {
            Drivetrain::Fuel => (arch.tank_gal * 0.6, 0.0),
            Drivetrain::Electric => (0.0, 80.0),
        };
        Self {
            archetype: arch.id.clone(),
            drivetrain,
            drivetrains: arch.drivetrains.clone(),
            mpg: arch.mpg,
            tank_gal: arch.tank_gal,
            fuel_gal,
            ev_range_max_mi: arch.ev_range_mi,
            ev_charge_pct,
            solar_watts: arch.base_solar_watts,
            wind_watts: arch.base_wind_watts,
            house_battery_pct: 100.0,
            house_cap_factor: arch.house_cap_factor,
            water_capacity_l: arch.water_capacity_l,
            water_l: arch.water_capacity_l * 0.5,
            food_capacity: arch.food_capacity,
            rations: arch.food_capacity.min(6),
            stealth_factor: arch.stealth_factor,
            tent: false,
        }
    }

    /// Usable house battery capacity in amp-hours.
    #[must_use]
    pub fn house_capacity_ah(&self) -> f32 {
        HOUSE_CAP_BASE_AH * self.house_cap_factor
    }

    /// Miles of EV range remaining at the current charge.
    #[must_use]
    pub fn ev_range_mi(&self) -> f32 {
        self.ev_range_max_mi * self.ev_charge_pct / 100.0
    }

    pub fn add_solar(&mut self, watts: f32) {
        self.solar_watts = (self.solar_watts + watts).max(0.0);
    }

    pub fn add_wind(&mut self, watts: f32) {
        self.wind_watts = (self.wind_watts + watts).max(0.0);
    }

    /// Range upgrades cap out; past the cap the pack bay is full.
    pub fn add_ev_range(&mut self, miles: f32) {
        self.ev_range_max_mi = (self.ev_range_max_mi + miles).min(EV_RANGE_UPGRADE_CAP_MI);
    }

    pub fn add_storage(&mut self, water_l: f32, rations: u32) {
        self.water_capacity_l += water_l.max(0.0);
        self.food_capacity += rations;
    }

    pub fn charge_house(&mut self, pct: f32) {
        self.house_battery_pct = (self.house_battery_pct + pct).clamp(0.0, 100.0);
    }

    pub fn charge_ev(&mut self, pct: f32) {
        self.ev_charge_pct = (self.ev_charge_pct + pct).clamp(0.0, 100.0);
    }

    pub fn drain_ev(&mut self, pct: f32) {
        self.ev_charge_pct = (self.ev_charge_pct - pct).clamp(0.0, 100.0);
    }

    pub fn add_fuel(&mut self, gal: f32) {
        self.fuel_gal = (self.fuel_gal + gal).clamp(0.0, self.tank_gal);
    }

    pub fn drain_fuel(&mut self, gal: f32) {
        self.fuel_gal = (self.fuel_gal - gal).max(0.0);
    }

    pub fn add_water(&mut self, liters: f32) {
        self.water_l = (self.water_l + liters).clamp(0.0, self.water_capacity_l);
    }

    pub fn drain_water(&mut self, liters: f32) {
        self.water_l = (self.water_l - liters).max(0.0);
    }

    pub fn add_rations(&mut self, count: u32) {
        self.rations = (self.rations + count).min(self.food_capacity);
    }

    /// Take one ration; false when the pantry is empty.
    pub fn take_ration(&mut self) -> bool {
        if self.rations == 0 {
            return false;
        }
        self.rations -= 1;
        true
    }
}

#[cfg(test)]
impl VehicleState {
    /// Plain fuel van for unit tests.
    pub fn test_fuel_rig() -> Self {
        Self {
            archetype: "van".into(),
            drivetrain: Drivetrain::Fuel,
            drivetrains: vec![Drivetrain::Fuel, Drivetrain::Electric],
            mpg: 18.0,
            tank_gal: 24.0,
            fuel_gal: 14.0,
            ev_range_max_mi: 220.0,
            ev_charge_pct: 0.0,
            solar_watts: 200.0,
            wind_watts: 0.0,
            house_battery_pct: 100.0,
            house_cap_factor: 1.0,
            water_capacity_l: 40.0,
            water_l: 20.0,
            food_capacity: 12,
            rations: 6,
            stealth_factor: 1.0,
            tent: false,
        }
    }

    /// Electric counterpart for unit tests.
    pub fn test_ev_rig() -> Self {
        let mut rig = Self::test_fuel_rig();
        rig.drivetrain = Drivetrain::Electric;
        rig.fuel_gal = 0.0;
        rig.ev_charge_pct = 80.0;
        rig
    }
}
