//! Core simulation for Nomad, a turn-based vanlife survival game.
//!
//! This crate owns the whole simulation: the world graph, the seasonal
//! weather generator, the 15-minute tick clock, the 12V power model,
//! time-dependent route planning, and the work, camp, hike, pet, and
//! store systems. Front ends drive it through [`GameEngine`] and the
//! action functions, which validate before mutating and report what
//! happened through [`ActionReport`].

use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use thiserror::Error;

pub mod action;
pub mod camp;
pub mod clock;
mod constants;
pub mod jobs;
pub mod numbers;
pub mod pet;
pub mod power;
pub mod rng;
pub mod state;
pub mod store;
pub mod travel;
pub mod vehicle;
pub mod weather;
pub mod work;
pub mod world;

pub use action::{ActionError, ActionErrorKind, ActionReport, ActionResult, EnvEvent};
pub use camp::{CampStyle, camp, cook, hike, nap};
pub use clock::{Window, WindowSet, WorldClock, window_multiplier, windows_at};
pub use jobs::{JobId, JobPerks, JobTable};
pub use pet::{Companion, PetCommand, adopt, command, feed, play, walk, water};
pub use power::{DeviceBank, DeviceKind, DeviceState, FuelKind, PowerReading, net_current};
pub use state::{GameState, PlayerState, WorkLedger};
pub use store::{Catalog, CatalogItem, ItemEffect, effective_price_cents};
pub use travel::{Route, RouteLeg, drive_one_edge, drive_route, edge_ticks, plan_route, route_to};
pub use vehicle::{Drivetrain, VehicleArchetype, VehicleState, VehicleTable};
pub use weather::{
    ClimateParams, HeatBand, Season, SeasonTable, WeatherSample, WindBand, weather_speed_mod,
};
pub use work::{fatigue_multiplier, has_signal, perform_work, work_gig};
pub use world::{
    Biome, Connection, Direction, GigListing, Grade, Location, ResourceGrades, ResourceQuality,
    RoadType, SeasonRule, World, WorldError,
};

/// Everything a campaign needs loaded before it can start.
#[derive(Debug, Clone)]
pub struct GameData {
    pub world: World,
    pub vehicles: VehicleTable,
    pub jobs: JobTable,
    pub seasons: SeasonTable,
    pub catalog: Catalog,
}

impl GameData {
    /// The data bundled into the binary.
    #[must_use]
    pub fn bundled() -> Self {
        Self {
            world: World::default_world(),
            vehicles: VehicleTable::default_config(),
            jobs: JobTable::default_config(),
            seasons: SeasonTable::default_config(),
            catalog: Catalog::default_config(),
        }
    }
}

/// Source of game data. Front ends that fetch assets at runtime implement
/// this over their own I/O.
pub trait DataLoader {
    type Error: std::error::Error + 'static;

    /// Load a complete data set.
    ///
    /// # Errors
    ///
    /// Implementation-defined; the bundled loader cannot fail.
    fn load_game_data(&self) -> Result<GameData, Self::Error>;
}

/// Loader for the assets compiled into the crate.
#[derive(Debug, Clone, Copy, Default)]
pub struct StaticAssets;

impl DataLoader for StaticAssets {
    type Error = Infallible;

    fn load_game_data(&self) -> Result<GameData, Self::Error> {
        Ok(GameData::bundled())
    }
}

/// Choices made on the new-game screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewGameConfig {
    pub name: String,
    pub vehicle: String,
    pub drivetrain: Drivetrain,
    pub job: JobId,
    #[serde(default)]
    pub start_location: Option<String>,
    pub start_cash_cents: i64,
    pub seed: u64,
}

/// Why a campaign could not start.
#[derive(Debug, Error)]
pub enum NewGameError {
    #[error("unknown vehicle '{0}'")]
    UnknownVehicle(String),
    #[error("vehicle '{vehicle}' does not support that drivetrain")]
    UnsupportedDrivetrain { vehicle: String },
    #[error("unknown start location '{0}'")]
    UnknownStart(String),
    #[error("world has no locations")]
    EmptyWorld,
}

/// Owns a campaign and the loader that provisioned it.
pub struct GameEngine<L: DataLoader> {
    loader: L,
    state: Option<GameState>,
}

impl<L: DataLoader> GameEngine<L> {
    pub const fn new(loader: L) -> Self {
        Self {
            loader,
            state: None,
        }
    }

    /// Start a fresh campaign, replacing any in progress.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Load`] when the loader fails and
    /// [`EngineError::NewGame`] when the configuration is invalid.
    pub fn start(&mut self, cfg: &NewGameConfig) -> Result<&mut GameState, EngineError<L::Error>> {
        let data = self.loader.load_game_data().map_err(EngineError::Load)?;
        let state = GameState::new(data, cfg).map_err(EngineError::NewGame)?;
        Ok(self.state.insert(state))
    }

    #[must_use]
    pub const fn state(&self) -> Option<&GameState> {
        self.state.as_ref()
    }

    pub fn state_mut(&mut self) -> Option<&mut GameState> {
        self.state.as_mut()
    }
}

/// Engine-level failures wrapping loader and setup errors.
#[derive(Debug, Error)]
pub enum EngineError<E: std::error::Error + 'static> {
    #[error("failed to load game data")]
    Load(#[source] E),
    #[error(transparent)]
    NewGame(NewGameError),
}
