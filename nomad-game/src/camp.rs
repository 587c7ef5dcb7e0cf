//! Camping, cooking, and hiking.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::action::{ActionError, ActionReport, ActionResult, EnvEvent};
use crate::constants::{
    CAMP_WATER_PER_HOUR, DAY_MINUTES, DAYLIGHT_END_MIN, EPIC_SHOT_CHANCE, EPIC_SHOT_MAX_CENTS,
    EPIC_SHOT_MIN_CENTS, EPIC_SHOT_MORALE, HIKE_ENERGY_MAX, HIKE_ENERGY_PER_HOUR,
    HIKE_MAX_BASE_HOURS, HIKE_MIN_BASE_HOURS, HIKE_SCENIC_BASE_CHANCE, HIKE_SCENIC_MORALE,
    HIKE_WATER_PER_HOUR, LOG_CAMPED, LOG_COOKED, LOG_EPIC_SHOT, LOG_HIKE_DUSK_TURNBACK,
    LOG_HIKE_FORAGED,
    LOG_RANGER_CHECK, LOG_RANGER_FINE, LOG_REMOTE_CAMP_INCOME, LOG_NO_SIGNAL_NIGHT,
    LOG_SCENIC_FIND, RANGER_KNOCK_DISPERSED_PARK, RANGER_KNOCK_DISPERSED_WILD, RANGER_KNOCK_PAID,
    RANGER_KNOCK_STEALTH, RANGER_KNOCK_STEALTH_ALERT_PET, RANGER_KNOCK_STEALTH_STRICT_PETS,
    STEALTH_FINE_CENTS, STEALTH_FINE_MORALE, WAKE_MINUTE_OF_DAY,
};
use crate::numbers::round_f32_to_u32;
use crate::power::{DeviceKind, FuelKind};
use crate::state::GameState;
use crate::work::has_signal;
use crate::world::{Biome, Direction, SeasonRule};

const COOK_MINUTES: u64 = 30;
const COOK_WATER_L: f32 = 0.3;
const COOK_ENERGY: f32 = 8.0;
const COOK_MORALE: f32 = 3.0;
const NAP_MINUTES: u64 = 120;
const NAP_ENERGY: f32 = 12.0;
const NAP_PET_ENERGY: f32 = 10.0;
const TENT_ENERGY_BONUS: f32 = 4.0;
const TENT_MORALE_BONUS: f32 = 3.0;
const PET_OVERNIGHT_ENERGY: f32 = 30.0;
const HIKE_XP_PER_HOUR: f32 = 5.0;
const HIKE_PET_BOND: f32 = 3.0;
const HIKE_PET_ENERGY_PER_HOUR: f32 = 2.0;
const HIKE_MORALE_BASE: f32 = 2.0;
const HIKE_FORAGE_BASE_CHANCE: f32 = 0.1;
const SCENIC_GOOD_FROM: f32 = 0.75;

/// Where the night is spent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CampStyle {
    /// A paid campground. Safe, costs nothing here beyond the stay.
    Paid,
    /// Parked somewhere camping is not allowed. Risks a fine.
    Stealth,
    /// Free public land.
    Dispersed,
}

impl CampStyle {
    const fn energy_per_hour(self) -> f32 {
        match self {
            Self::Paid => 3.0,
            Self::Stealth => 2.2,
            Self::Dispersed => 2.6,
        }
    }

    const fn morale_gain(self) -> f32 {
        match self {
            Self::Paid => 10.0,
            Self::Stealth => 6.0,
            Self::Dispersed => 12.0,
        }
    }
}

/// Minutes from now until the 06:00 wake-up. Turning in before 06:00
/// sleeps to the same morning, later turns sleep to the next one.
fn sleep_minutes(minute_of_day: u64) -> u64 {
    if minute_of_day <= WAKE_MINUTE_OF_DAY {
        WAKE_MINUTE_OF_DAY - minute_of_day
    } else {
        DAY_MINUTES - minute_of_day + WAKE_MINUTE_OF_DAY
    }
}

fn ranger_knock_chance(gs: &GameState, style: CampStyle) -> f32 {
    let loc = gs.location();
    match style {
        CampStyle::Paid => RANGER_KNOCK_PAID,
        CampStyle::Dispersed => {
            if loc.park {
                RANGER_KNOCK_DISPERSED_PARK
            } else {
                RANGER_KNOCK_DISPERSED_WILD
            }
        }
        CampStyle::Stealth => {
            let mut chance = RANGER_KNOCK_STEALTH * gs.vehicle.stealth_factor;
            if let Some(pet) = &gs.companion {
                if pet.guard_mode && pet.alertness >= 60.0 {
                    chance = chance.min(RANGER_KNOCK_STEALTH_ALERT_PET);
                }
                if loc.season_rules.contains(&SeasonRule::StrictPets) {
                    chance += RANGER_KNOCK_STEALTH_STRICT_PETS;
                }
            }
            chance
        }
    }
}

/// Sleep until 06:00 in the chosen style.
///
/// # Errors
///
/// Paid camping needs a campground; dispersed camping needs land where
/// it is allowed.
pub fn camp(gs: &mut GameState, style: CampStyle) -> ActionResult {
    let loc = gs.location().clone();
    match style {
        CampStyle::Paid => {
            if !loc.park && loc.biome != Biome::Town {
                return Err(ActionError::MissingAmenity("campground"));
            }
        }
        CampStyle::Dispersed => {
            if !loc.dispersed_ok {
                return Err(ActionError::MissingAmenity("dispersed camping"));
            }
        }
        CampStyle::Stealth => {}
    }

    let minutes = sleep_minutes(gs.clock.minute_of_day());
    let hours = minutes as f32 / 60.0;
    let mut events = Vec::new();
    let mut cash: i64 = 0;

    let knock_chance = ranger_knock_chance(gs, style);
    if gs.rng().r#gen::<f32>() < knock_chance {
        events.push(EnvEvent::RangerCheck);
        gs.logs.push(String::from(LOG_RANGER_CHECK));
        if style == CampStyle::Stealth {
            cash -= STEALTH_FINE_CENTS;
            gs.player.add_cash(-STEALTH_FINE_CENTS);
            gs.player.add_morale(-STEALTH_FINE_MORALE);
            events.push(EnvEvent::RangerFine {
                cents: STEALTH_FINE_CENTS,
            });
            gs.logs.push(String::from(LOG_RANGER_FINE));
        }
    }

    // Overnight remote income for careers that earn in their sleep.
    if gs.perks.remote_camp_income_cents > 0 && loc.biome != Biome::Town {
        if has_signal(gs) {
            let income = gs.perks.remote_camp_income_cents;
            cash += income;
            gs.player.add_cash(income);
            events.push(EnvEvent::RemoteCampIncome { cents: income });
            gs.logs.push(String::from(LOG_REMOTE_CAMP_INCOME));
        } else {
            events.push(EnvEvent::NoSignalNight);
            gs.logs.push(String::from(LOG_NO_SIGNAL_NIGHT));
        }
    }

    // A clear dark sky over a scenic camp is a payday for some careers.
    if gs.perks.epic_bonus > 0.0 && loc.resources.scenery.factor() >= SCENIC_GOOD_FROM {
        let sky = gs.weather_now();
        let chance = EPIC_SHOT_CHANCE + gs.perks.epic_bonus;
        if sky.is_clear_sky() && gs.rng().r#gen::<f32>() < chance {
            let cents = gs.rng().gen_range(EPIC_SHOT_MIN_CENTS..=EPIC_SHOT_MAX_CENTS);
            cash += cents;
            gs.player.add_cash(cents);
            gs.player.add_morale(EPIC_SHOT_MORALE);
            events.push(EnvEvent::EpicShot { cents });
            gs.logs.push(String::from(LOG_EPIC_SHOT));
        }
    }

    let mut energy = style.energy_per_hour() * hours;
    let mut morale = style.morale_gain();
    if style == CampStyle::Dispersed {
        morale += gs.perks.dispersed_morale_bonus;
    }
    if gs.vehicle.tent && style != CampStyle::Paid {
        energy += TENT_ENERGY_BONUS;
        morale += TENT_MORALE_BONUS;
    }
    gs.player.add_energy(energy);
    gs.player.add_morale(morale);
    gs.vehicle.drain_water(CAMP_WATER_PER_HOUR * hours);
    if let Some(pet) = &mut gs.companion {
        pet.energy = (pet.energy + PET_OVERNIGHT_ENERGY).min(100.0);
        pet.alertness = (pet.alertness - 10.0).max(0.0);
    }

    let ticks = gs.advance(minutes);
    gs.logs.push(String::from(LOG_CAMPED));

    Ok(ActionReport {
        ticks,
        cash_delta_cents: cash,
        events,
        ..ActionReport::default()
    })
}

/// Cook a ration on whichever owned stove has fuel.
///
/// # Errors
///
/// Needs a stove with fuel, a ration, and a little water.
pub fn cook(gs: &mut GameState) -> ActionResult {
    let stove = [DeviceKind::PropaneStove, DeviceKind::Jetboil]
        .into_iter()
        .find(|d| gs.devices.state(*d).owned);
    let Some(stove) = stove else {
        return Err(ActionError::DeviceNotOwned("stove".into()));
    };
    let fuel = stove.fuel().ok_or(ActionError::DeviceNotSwitchable(
        stove.key().into(),
    ))?;
    let burn = match fuel {
        FuelKind::Propane => 0.1,
        FuelKind::Butane => 0.05,
        FuelKind::Diesel => 0.0,
    };
    if gs.devices.fuel_level(fuel) < burn {
        return Err(ActionError::NoDeviceFuel(stove.key().into()));
    }
    if gs.vehicle.rations == 0 {
        return Err(ActionError::OutOfFood);
    }
    if gs.vehicle.water_l < COOK_WATER_L {
        return Err(ActionError::WaterTooLow);
    }

    *gs.devices.fuel_level_mut(fuel) -= burn;
    let _ = gs.vehicle.take_ration();
    gs.vehicle.drain_water(COOK_WATER_L);
    gs.player.add_energy(COOK_ENERGY);
    gs.player.add_morale(COOK_MORALE);
    let ticks = gs.advance(COOK_MINUTES);
    gs.logs.push(String::from(LOG_COOKED));
    Ok(ActionReport::with_ticks(ticks))
}

/// A two-hour nap. Cheap energy when a full night is not on the table.
pub fn nap(gs: &mut GameState) -> ActionResult {
    gs.player.add_energy(NAP_ENERGY);
    if let Some(pet) = &mut gs.companion {
        pet.energy = (pet.energy + NAP_PET_ENERGY).min(100.0);
    }
    let ticks = gs.advance(NAP_MINUTES);
    Ok(ActionReport::with_ticks(ticks))
}

/// Hike the trail out of the current location in `direction`. Hikes
/// launched too close to dusk are cut short to get back by dark.
///
/// # Errors
///
/// Needs daylight, a trail in that direction, and enough water.
pub fn hike(gs: &mut GameState, direction: Direction) -> ActionResult {
    if !gs.clock.is_daylight() {
        return Err(ActionError::Nighttime);
    }
    let loc = gs.location().clone();
    let base_hours = *loc
        .hike_map
        .get(&direction)
        .ok_or(ActionError::InvalidDirection)?;
    let base_hours = u32::from(base_hours).clamp(HIKE_MIN_BASE_HOURS, HIKE_MAX_BASE_HOURS);

    let remaining_min = DAYLIGHT_END_MIN.saturating_sub(gs.clock.minute_of_day());
    let fit_hours = u32::try_from(remaining_min / 60).unwrap_or(0);
    if fit_hours < HIKE_MIN_BASE_HOURS {
        return Err(ActionError::DuskTooClose);
    }
    let hours = base_hours.min(fit_hours);
    let truncated = hours < base_hours;

    let hours_f = hours as f32;
    let water_need = HIKE_WATER_PER_HOUR * hours_f;
    if gs.vehicle.water_l < water_need {
        return Err(ActionError::WaterTooLow);
    }

    let energy_cost =
        (HIKE_ENERGY_PER_HOUR * hours_f * gs.perks.hike_energy_mult).min(HIKE_ENERGY_MAX);
    gs.player.add_energy(-energy_cost);
    gs.player.add_morale(HIKE_MORALE_BASE);
    gs.vehicle.drain_water(water_need);

    let mut events = Vec::new();
    let find_chance =
        (HIKE_SCENIC_BASE_CHANCE + gs.perks.hike_find_bonus) * loc.resources.scenery.factor();
    let mut found = false;
    for _ in 0..hours {
        if gs.rng().r#gen::<f32>() < find_chance {
            found = true;
        }
    }
    if found {
        gs.player.add_morale(HIKE_SCENIC_MORALE);
        events.push(EnvEvent::ScenicFind);
        gs.logs.push(String::from(LOG_SCENIC_FIND));
    }

    // Berry patches and pinyon stands along the trail.
    let forage_chance = HIKE_FORAGE_BASE_CHANCE * (0.5 + loc.resources.food.factor());
    if gs.rng().r#gen::<f32>() < forage_chance {
        gs.vehicle.add_rations(1);
        events.push(EnvEvent::ForagedRation);
        gs.logs.push(String::from(LOG_HIKE_FORAGED));
    }

    if let Some(pet) = &mut gs.companion {
        pet.energy = (pet.energy - HIKE_PET_ENERGY_PER_HOUR * hours_f).max(0.0);
        pet.bond = (pet.bond + HIKE_PET_BOND).min(100.0);
    }

    let xp = hours_f * HIKE_XP_PER_HOUR;
    gs.grant_xp(xp);
    if truncated {
        gs.logs.push(String::from(LOG_HIKE_DUSK_TURNBACK));
    }
    let ticks = gs.advance(u64::from(hours) * 60);

    Ok(ActionReport {
        ticks,
        xp_gained: round_f32_to_u32(xp),
        events,
        ..ActionReport::default()
    })
}
