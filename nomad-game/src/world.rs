//! World graph: locations, roads, and amenities.
//!
//! The map is a bidirectional graph keyed by location id. Connections are
//! authored one-way in the data file and mirrored during load so routing
//! always sees both directions.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use thiserror::Error;

use crate::clock::Window;

/// Problems found while loading or validating the map data.
#[derive(Debug, Error)]
pub enum WorldError {
    #[error("world JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("world has no locations")]
    Empty,
    #[error("duplicate location id '{0}'")]
    DuplicateId(String),
    #[error("connection from '{from}' points at unknown location '{to}'")]
    DanglingEdge { from: String, to: String },
    #[error("connection from '{from}' to '{to}' has non-positive distance")]
    BadDistance { from: String, to: String },
}

/// Road surface class. Determines the base speed before grade and weather.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoadType {
    Interstate,
    Highway,
    Scenic,
    Mixed,
    Gravel,
    Trail,
}

impl RoadType {
    #[must_use]
    pub const fn base_speed_mph(self) -> f32 {
        match self {
            Self::Interstate => 65.0,
            Self::Highway => 55.0,
            Self::Scenic => 45.0,
            Self::Mixed => 40.0,
            Self::Gravel => 30.0,
            Self::Trail => 10.0,
        }
    }
}

/// Terrain steepness class. Scales speed down on climbs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Grade {
    #[default]
    Flat,
    Light,
    Mixed,
    Moderate,
    Steep,
}

impl Grade {
    #[must_use]
    pub const fn speed_factor(self) -> f32 {
        match self {
            Self::Flat => 1.0,
            Self::Light => 0.95,
            Self::Mixed => 0.90,
            Self::Moderate => 0.85,
            Self::Steep => 0.70,
        }
    }
}

/// Quality grade for a site resource, scaling its yield.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ResourceQuality {
    Excellent,
    Good,
    #[default]
    Fair,
    Poor,
}

impl ResourceQuality {
    #[must_use]
    pub const fn factor(self) -> f32 {
        match self {
            Self::Excellent => 1.0,
            Self::Good => 0.75,
            Self::Fair => 0.5,
            Self::Poor => 0.25,
        }
    }
}

/// Site quality grades for the resources that power, water, feed, and
/// inspire a camp.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ResourceGrades {
    #[serde(default)]
    pub sun: ResourceQuality,
    #[serde(default)]
    pub wind: ResourceQuality,
    #[serde(default)]
    pub water: ResourceQuality,
    #[serde(default)]
    pub food: ResourceQuality,
    #[serde(default)]
    pub signal: ResourceQuality,
    #[serde(default)]
    pub scenery: ResourceQuality,
}

/// Seasonal hazards and rules a location is subject to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeasonRule {
    SummerHeat,
    ColdNights,
    Monsoon,
    FlashFlood,
    StrictPets,
}

/// Landscape class. Drives photogenic value and signal odds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Biome {
    #[default]
    Town,
    Canyon,
    Mesa,
    Desert,
    SaltFlat,
    Alpine,
}

/// Compass direction for trailheads out of a location.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    N,
    S,
    E,
    W,
    Ne,
    Nw,
    Se,
    Sw,
}

impl Direction {
    #[must_use]
    pub fn from_key(key: &str) -> Option<Self> {
        match key.trim().to_ascii_lowercase().as_str() {
            "n" | "north" => Some(Self::N),
            "s" | "south" => Some(Self::S),
            "e" | "east" => Some(Self::E),
            "w" | "west" => Some(Self::W),
            "ne" | "northeast" => Some(Self::Ne),
            "nw" | "northwest" => Some(Self::Nw),
            "se" | "southeast" => Some(Self::Se),
            "sw" | "southwest" => Some(Self::Sw),
            _ => None,
        }
    }
}

/// A local gig posting. Payout rolls within the listed band, scaled up
/// when worked inside the preferred window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GigListing {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub window: Option<Window>,
    pub payout_min_cents: i64,
    pub payout_max_cents: i64,
}

/// A one-way road segment as authored. Mirrored on load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Connection {
    pub to: String,
    pub road: RoadType,
    #[serde(default)]
    pub grade: Grade,
    pub miles: f32,
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub biome: Biome,
    pub elevation_ft: f32,
    #[serde(default)]
    pub resources: ResourceGrades,
    #[serde(default)]
    pub connections: Vec<Connection>,
    #[serde(default)]
    pub season_rules: Vec<SeasonRule>,
    #[serde(default)]
    pub pet_adoption: bool,
    #[serde(default)]
    pub outfitter: bool,
    #[serde(default)]
    pub fast_charger: bool,
    #[serde(default)]
    pub fuel_station: bool,
    #[serde(default)]
    pub park: bool,
    /// Whether camping here is legal without a stealth roll.
    #[serde(default = "default_true")]
    pub dispersed_ok: bool,
    #[serde(default)]
    pub gigs: Vec<GigListing>,
    /// Trailheads: direction to base hike duration in hours.
    #[serde(default)]
    pub hike_map: HashMap<Direction, u8>,
}

/// The full map. Locations are kept ordered by id so iteration, and
/// therefore routing tie-breaks, are deterministic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "WorldRecords", into = "WorldRecords")]
pub struct World {
    locations: BTreeMap<String, Location>,
}

/// Raw authored form of the map, before edge mirroring.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct WorldRecords {
    locations: Vec<Location>,
}

impl From<World> for WorldRecords {
    fn from(world: World) -> Self {
        Self {
            locations: world.locations.into_values().collect(),
        }
    }
}

impl TryFrom<WorldRecords> for World {
    type Error = WorldError;

    fn try_from(records: WorldRecords) -> Result<Self, WorldError> {
        Self::from_records(records.locations)
    }
}

impl World {
    /// Build a validated world from authored location records, mirroring
    /// every connection so the graph is bidirectional.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError`] for empty maps, duplicate ids, dangling
    /// edges, or non-positive distances.
    pub fn from_records(records: Vec<Location>) -> Result<Self, WorldError> {
        if records.is_empty() {
            return Err(WorldError::Empty);
        }
        let mut locations: BTreeMap<String, Location> = BTreeMap::new();
        for loc in records {
            if locations.contains_key(&loc.id) {
                return Err(WorldError::DuplicateId(loc.id));
            }
            locations.insert(loc.id.clone(), loc);
        }

        let mut mirrors: Vec<(String, Connection)> = Vec::new();
        for loc in locations.values() {
            for conn in &loc.connections {
                if !locations.contains_key(&conn.to) {
                    return Err(WorldError::DanglingEdge {
                        from: loc.id.clone(),
                        to: conn.to.clone(),
                    });
                }
                if conn.miles <= 0.0 {
                    return Err(WorldError::BadDistance {
                        from: loc.id.clone(),
                        to: conn.to.clone(),
                    });
                }
                mirrors.push((
                    conn.to.clone(),
                    Connection {
                        to: loc.id.clone(),
                        road: conn.road,
                        grade: conn.grade,
                        miles: conn.miles,
                    },
                ));
            }
        }
        for (owner, mirror) in mirrors {
            let entry = locations.get_mut(&owner).expect("validated above");
            if !entry.connections.iter().any(|c| c.to == mirror.to) {
                entry.connections.push(mirror);
            }
        }

        Ok(Self { locations })
    }

    /// Load and validate a world from JSON.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError`] for malformed JSON or an invalid graph.
    pub fn from_json(json_str: &str) -> Result<Self, WorldError> {
        let records: WorldRecords = serde_json::from_str(json_str)?;
        Self::from_records(records.locations)
    }

    /// Embedded default map.
    ///
    /// # Panics
    ///
    /// Panics if the bundled asset is invalid, which is a build defect.
    #[must_use]
    pub fn default_world() -> Self {
        Self::from_json(include_str!("../assets/world.json")).expect("bundled world.json is valid")
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Location> {
        self.locations.get(id)
    }

    /// Resolve fuzzy player input to a location: exact id, then
    /// case-insensitive name, then name substring.
    #[must_use]
    pub fn find(&self, query: &str) -> Option<&Location> {
        let q = query.trim();
        if let Some(loc) = self.locations.get(q) {
            return Some(loc);
        }
        let q_lower = q.to_lowercase();
        if let Some(loc) = self
            .locations
            .values()
            .find(|l| l.name.to_lowercase() == q_lower)
        {
            return Some(loc);
        }
        self.locations
            .values()
            .find(|l| l.name.to_lowercase().contains(&q_lower))
    }

    pub fn locations(&self) -> impl Iterator<Item = &Location> {
        self.locations.values()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.locations.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.locations.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn loc(id: &str, connections: Vec<Connection>) -> Location {
        Location {
            id: id.into(),
            name: id.to_uppercase(),
            biome: Biome::Desert,
            elevation_ft: 4_000.0,
            resources: ResourceGrades::default(),
            connections,
            season_rules: vec![],
            pet_adoption: false,
            outfitter: false,
            fast_charger: false,
            fuel_station: false,
            park: false,
            dispersed_ok: true,
            gigs: vec![],
            hike_map: HashMap::new(),
        }
    }

    fn conn(to: &str, miles: f32) -> Connection {
        Connection {
            to: to.into(),
            road: RoadType::Highway,
            grade: Grade::Flat,
            miles,
        }
    }

    #[test]
    fn edges_are_mirrored() {
        let world =
            World::from_records(vec![loc("a", vec![conn("b", 30.0)]), loc("b", vec![])]).unwrap();
        let back = world.get("b").unwrap();
        assert_eq!(back.connections.len(), 1);
        assert_eq!(back.connections[0].to, "a");
        assert!((back.connections[0].miles - 30.0).abs() < f32::EPSILON);
    }

    #[test]
    fn validation_rejects_bad_graphs() {
        assert!(matches!(
            World::from_records(vec![]),
            Err(WorldError::Empty)
        ));
        assert!(matches!(
            World::from_records(vec![loc("a", vec![]), loc("a", vec![])]),
            Err(WorldError::DuplicateId(_))
        ));
        assert!(matches!(
            World::from_records(vec![loc("a", vec![conn("ghost", 10.0)])]),
            Err(WorldError::DanglingEdge { .. })
        ));
        assert!(matches!(
            World::from_records(vec![
                loc("a", vec![conn("b", 0.0)]),
                loc("b", vec![])
            ]),
            Err(WorldError::BadDistance { .. })
        ));
    }

    #[test]
    fn find_resolves_fuzzy_queries() {
        let world = World::default_world();
        assert!(world.find("moab").is_some());
        assert_eq!(world.find("Moab").unwrap().id, "moab");
        assert_eq!(world.find("arch").unwrap().id, "arches");
        assert!(world.find("atlantis").is_none());
    }

    #[test]
    fn default_world_is_connected_enough() {
        let world = World::default_world();
        assert!(world.len() >= 8);
        let hub = world.get("moab").unwrap();
        assert!(hub.fast_charger && hub.fuel_station && hub.outfitter);
        assert!(hub.connections.len() >= 3);
    }

    #[test]
    fn road_and_grade_factors_are_monotonic() {
        assert!(RoadType::Interstate.base_speed_mph() > RoadType::Trail.base_speed_mph());
        assert!(Grade::Flat.speed_factor() > Grade::Steep.speed_factor());
        assert!(
            ResourceQuality::Excellent.factor() > ResourceQuality::Poor.factor()
        );
    }
}
