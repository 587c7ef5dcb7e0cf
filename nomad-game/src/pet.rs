//! The canine companion: adoption, care, and commands.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::action::{ActionError, ActionReport, ActionResult, EnvEvent};
use crate::constants::{
    LOG_PET_ADOPTED, LOG_PET_WATER_FOUND, PET_SEARCH_FIND_CHANCE, PET_SEARCH_WATER_L,
};
use crate::state::GameState;

const ADOPTION_FEE_CENTS: i64 = 7_500;
const FEED_ENERGY: f32 = 20.0;
const FEED_BOND: f32 = 2.0;
const WATER_BOWL_L: f32 = 0.5;
const WALK_MINUTES: u64 = 30;
const PLAY_MINUTES: u64 = 30;
const SEARCH_MINUTES: u64 = 30;
const GUARD_OBEDIENCE_MIN: f32 = 40.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Companion {
    pub name: String,
    pub bond: f32,
    pub energy: f32,
    pub obedience: f32,
    pub alertness: f32,
    pub guard_mode: bool,
}

impl Companion {
    #[must_use]
    pub fn new(name: String) -> Self {
        Self {
            name,
            bond: 30.0,
            energy: 70.0,
            obedience: 50.0,
            alertness: 50.0,
            guard_mode: false,
        }
    }

    fn add_bond(&mut self, delta: f32) {
        self.bond = (self.bond + delta).clamp(0.0, 100.0);
    }

    fn add_energy(&mut self, delta: f32) {
        self.energy = (self.energy + delta).clamp(0.0, 100.0);
    }

    fn add_obedience(&mut self, delta: f32) {
        self.obedience = (self.obedience + delta).clamp(0.0, 100.0);
    }

    fn add_alertness(&mut self, delta: f32) {
        self.alertness = (self.alertness + delta).clamp(0.0, 100.0);
    }
}

/// Commands a trained companion responds to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PetCommand {
    Heel,
    Search,
    Guard,
    Calm,
    Fetch,
}

impl PetCommand {
    #[must_use]
    pub fn from_key(key: &str) -> Option<Self> {
        match key.trim().to_ascii_lowercase().as_str() {
            "heel" => Some(Self::Heel),
            "search" => Some(Self::Search),
            "guard" => Some(Self::Guard),
            "calm" => Some(Self::Calm),
            "fetch" => Some(Self::Fetch),
            _ => None,
        }
    }
}

/// Adopt a companion at a shelter.
///
/// # Errors
///
/// Needs a shelter on site, an empty passenger seat, and the fee.
pub fn adopt(gs: &mut GameState, name: &str) -> ActionResult {
    if !gs.location().pet_adoption {
        return Err(ActionError::MissingAmenity("animal shelter"));
    }
    if gs.companion.is_some() {
        return Err(ActionError::CompanionAlready);
    }
    gs.player.try_spend(ADOPTION_FEE_CENTS)?;
    gs.companion = Some(Companion::new(name.trim().to_string()));
    gs.player.add_morale(8.0);
    gs.logs.push(String::from(LOG_PET_ADOPTED));
    Ok(ActionReport {
        cash_delta_cents: -ADOPTION_FEE_CENTS,
        ..ActionReport::default()
    })
}

fn companion_mut(gs: &mut GameState) -> Result<&mut Companion, ActionError> {
    gs.companion.as_mut().ok_or(ActionError::NoCompanion)
}

/// Feed the companion a ration.
///
/// # Errors
///
/// Needs a companion and a ration in the pantry.
pub fn feed(gs: &mut GameState) -> ActionResult {
    if gs.companion.is_none() {
        return Err(ActionError::NoCompanion);
    }
    if !gs.vehicle.take_ration() {
        return Err(ActionError::OutOfFood);
    }
    let pet = companion_mut(gs)?;
    pet.add_energy(FEED_ENERGY);
    pet.add_bond(FEED_BOND);
    Ok(ActionReport::default())
}

/// Fill the water bowl from the tank.
///
/// # Errors
///
/// Needs a companion and water in the tank.
pub fn water(gs: &mut GameState) -> ActionResult {
    if gs.companion.is_none() {
        return Err(ActionError::NoCompanion);
    }
    if gs.vehicle.water_l < WATER_BOWL_L {
        return Err(ActionError::WaterTooLow);
    }
    gs.vehicle.drain_water(WATER_BOWL_L);
    companion_mut(gs)?.add_bond(1.0);
    Ok(ActionReport::default())
}

/// A short walk. Good for both of you.
///
/// # Errors
///
/// Needs a companion.
pub fn walk(gs: &mut GameState) -> ActionResult {
    let pet = companion_mut(gs)?;
    pet.add_energy(-3.0);
    pet.add_bond(2.0);
    pet.add_alertness(-5.0);
    gs.player.add_morale(2.0);
    let ticks = gs.advance(WALK_MINUTES);
    Ok(ActionReport::with_ticks(ticks))
}

/// Play fetch or tug for a while.
///
/// # Errors
///
/// Needs a companion.
pub fn play(gs: &mut GameState) -> ActionResult {
    let pet = companion_mut(gs)?;
    pet.add_energy(-5.0);
    pet.add_bond(4.0);
    pet.add_obedience(1.0);
    gs.player.add_morale(3.0);
    let ticks = gs.advance(PLAY_MINUTES);
    Ok(ActionReport::with_ticks(ticks))
}

/// Issue a command.
///
/// # Errors
///
/// Needs a companion; guard duty needs an obedient one.
pub fn command(gs: &mut GameState, cmd: PetCommand) -> ActionResult {
    if gs.companion.is_none() {
        return Err(ActionError::NoCompanion);
    }
    match cmd {
        PetCommand::Heel => {
            let pet = companion_mut(gs)?;
            pet.add_obedience(2.0);
            pet.add_bond(1.0);
            Ok(ActionReport::default())
        }
        PetCommand::Guard => {
            let pet = companion_mut(gs)?;
            if pet.obedience < GUARD_OBEDIENCE_MIN {
                return Err(ActionError::CompanionUntrained);
            }
            pet.guard_mode = true;
            pet.add_alertness(10.0);
            Ok(ActionReport::default())
        }
        PetCommand::Calm => {
            let pet = companion_mut(gs)?;
            pet.guard_mode = false;
            pet.add_alertness(-10.0);
            Ok(ActionReport::default())
        }
        PetCommand::Fetch => {
            let pet = companion_mut(gs)?;
            pet.add_energy(-3.0);
            pet.add_bond(2.0);
            gs.player.add_morale(2.0);
            Ok(ActionReport::default())
        }
        PetCommand::Search => {
            // A dry site halves the odds, a spring-fed one raises them.
            let chance = PET_SEARCH_FIND_CHANCE * (0.5 + gs.location().resources.water.factor());
            let found = gs.rng().r#gen::<f32>() < chance;
            let pet = companion_mut(gs)?;
            pet.add_energy(-5.0);
            let mut events = Vec::new();
            if found {
                gs.vehicle.add_water(PET_SEARCH_WATER_L);
                events.push(EnvEvent::WaterFound {
                    liters: PET_SEARCH_WATER_L,
                });
                gs.logs.push(String::from(LOG_PET_WATER_FOUND));
            }
            let ticks = gs.advance(SEARCH_MINUTES);
            Ok(ActionReport {
                ticks,
                events,
                ..ActionReport::default()
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::test_state;

    fn with_pet() -> GameState {
        let mut gs = test_state();
        adopt(&mut gs, "Juniper").unwrap();
        gs
    }

    #[test]
    fn adoption_requires_shelter_and_seat() {
        let mut gs = test_state();
        assert!(gs.location().pet_adoption, "hub should host a shelter");
        let report = adopt(&mut gs, "Juniper").unwrap();
        assert_eq!(report.cash_delta_cents, -ADOPTION_FEE_CENTS);
        assert!(gs.companion.is_some());
        assert!(matches!(
            adopt(&mut gs, "Second"),
            Err(ActionError::CompanionAlready)
        ));
    }

    #[test]
    fn care_moves_the_meters() {
        let mut gs = with_pet();
        let bond = gs.companion.as_ref().unwrap().bond;
        feed(&mut gs).unwrap();
        water(&mut gs).unwrap();
        walk(&mut gs).unwrap();
        play(&mut gs).unwrap();
        assert!(gs.companion.as_ref().unwrap().bond > bond);

        let mut alone = test_state();
        assert!(matches!(feed(&mut alone), Err(ActionError::NoCompanion)));
        assert!(matches!(walk(&mut alone), Err(ActionError::NoCompanion)));
    }

    #[test]
    fn guard_needs_obedience() {
        let mut gs = with_pet();
        gs.companion.as_mut().unwrap().obedience = 10.0;
        assert!(command(&mut gs, PetCommand::Guard).is_err());
        gs.companion.as_mut().unwrap().obedience = 80.0;
        command(&mut gs, PetCommand::Guard).unwrap();
        assert!(gs.companion.as_ref().unwrap().guard_mode);
        command(&mut gs, PetCommand::Calm).unwrap();
        assert!(!gs.companion.as_ref().unwrap().guard_mode);
    }

    #[test]
    fn command_keys_parse() {
        assert_eq!(PetCommand::from_key("GUARD"), Some(PetCommand::Guard));
        assert_eq!(PetCommand::from_key("sit"), None);
    }
}
