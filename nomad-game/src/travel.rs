//! Route planning and driving.
//!
//! Planning runs a time-dependent Dijkstra: each edge is costed with the
//! weather forecast at its departure moment, so a route planned into a
//! monsoon afternoon really is slower. Driving consumes one edge at a
//! time, all-or-nothing.

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashMap};

use crate::action::{ActionError, ActionReport, ActionResult, EnvEvent};
use crate::clock::WorldClock;
use crate::constants::{
    ALTERNATOR_PCT_PER_HOUR, DETOUR_CHANCE, DETOUR_MAX_TICKS, DETOUR_MIN_TICKS,
    DRIVE_ENERGY_DRAIN_PER_HOUR,
    DRIVE_PET_ALERT_GAIN, DRIVE_PET_ENERGY_PER_HOUR, DRIVE_WATER_DRAIN_PER_HOUR, LOG_TRAVELED,
    LOG_TRAVEL_DETOUR, MIN_TRAVEL_SPEED_MPH, TICK_MINUTES,
};
use crate::numbers::ceil_f32_to_u32;
use crate::rng::seeded;
use crate::state::GameState;
use crate::vehicle::Drivetrain;
use crate::weather::{self, SeasonTable, weather_speed_mod};
use crate::world::{Connection, Grade, Location, RoadType, World};

/// One planned road segment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteLeg {
    pub from: String,
    pub to: String,
    pub road: RoadType,
    pub grade: Grade,
    pub miles: f32,
}

/// A planned multi-leg route with a drive cursor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Route {
    pub legs: Vec<RouteLeg>,
    pub cursor: usize,
    /// Tick estimate at planning time; detours add to the actual drive.
    pub planned_ticks: u32,
}

impl Route {
    #[must_use]
    pub fn next_leg(&self) -> Option<&RouteLeg> {
        self.legs.get(self.cursor)
    }

    #[must_use]
    pub const fn is_complete(&self) -> bool {
        self.cursor >= self.legs.len()
    }

    #[must_use]
    pub fn destination(&self) -> Option<&str> {
        self.legs.last().map(|l| l.to.as_str())
    }
}

/// Ticks to drive one edge departing at `depart`, given the weather at
/// the departure end. Speed never drops below the crawl floor.
#[must_use]
pub fn edge_ticks(
    weather_seed: u64,
    seasons: &SeasonTable,
    from: &Location,
    conn: &Connection,
    depart: WorldClock,
) -> u32 {
    let sample = weather::sample(weather_seed, seasons, from, depart);
    let speed = (conn.road.base_speed_mph() * conn.grade.speed_factor() * weather_speed_mod(&sample))
        .max(MIN_TRAVEL_SPEED_MPH);
    let hours = conn.miles / speed;
    ceil_f32_to_u32(hours * 60.0 / TICK_MINUTES as f32).max(1)
}

/// Shortest route in ticks from `from_id` to `to_id` departing at `start`.
/// Ties break on location id, so plans are deterministic.
#[must_use]
pub fn plan_route(
    weather_seed: u64,
    world: &World,
    seasons: &SeasonTable,
    from_id: &str,
    to_id: &str,
    start: WorldClock,
) -> Option<Route> {
    let mut best: HashMap<&str, u32> = HashMap::new();
    let mut prev: HashMap<&str, (&str, &Connection)> = HashMap::new();
    let mut heap: BinaryHeap<Reverse<(u32, &str)>> = BinaryHeap::new();

    best.insert(from_id, 0);
    heap.push(Reverse((0, from_id)));

    while let Some(Reverse((ticks, node))) = heap.pop() {
        if ticks > *best.get(node).unwrap_or(&u32::MAX) {
            continue;
        }
        if node == to_id {
            break;
        }
        let loc = world.get(node)?;
        let depart = WorldClock::from_minutes(start.minutes() + u64::from(ticks) * TICK_MINUTES);
        for conn in &loc.connections {
            let cost = edge_ticks(weather_seed, seasons, loc, conn, depart);
            let next_ticks = ticks.saturating_add(cost);
            let entry = best.entry(conn.to.as_str()).or_insert(u32::MAX);
            if next_ticks < *entry {
                *entry = next_ticks;
                prev.insert(conn.to.as_str(), (node, conn));
                heap.push(Reverse((next_ticks, conn.to.as_str())));
            }
        }
    }

    let planned_ticks = *best.get(to_id)?;
    let mut legs = Vec::new();
    let mut cursor = to_id;
    while cursor != from_id {
        let &(parent, conn) = prev.get(cursor)?;
        legs.push(RouteLeg {
            from: parent.to_string(),
            to: conn.to.clone(),
            road: conn.road,
            grade: conn.grade,
            miles: conn.miles,
        });
        cursor = parent;
    }
    legs.reverse();
    Some(Route {
        legs,
        cursor: 0,
        planned_ticks,
    })
}

/// Plan and store a route to a destination named by the player.
///
/// # Errors
///
/// Fails for unknown destinations, routing to the current location, and
/// unreachable destinations.
pub fn route_to(gs: &mut GameState, destination: &str) -> ActionResult {
    let dest = gs
        .world
        .find(destination)
        .ok_or_else(|| ActionError::UnknownDestination(destination.into()))?;
    let dest_id = dest.id.clone();
    if dest_id == gs.location_id {
        return Err(ActionError::AlreadyThere);
    }
    let route = plan_route(
        gs.weather_seed,
        &gs.world,
        &gs.seasons,
        &gs.location_id,
        &dest_id,
        gs.clock,
    )
    .ok_or_else(|| ActionError::RouteNotFound {
        from: gs.location_id.clone(),
        to: dest_id.clone(),
    })?;
    gs.route = Some(route);
    Ok(ActionReport::default())
}

fn range_check(gs: &GameState, leg: &RouteLeg) -> Result<(), ActionError> {
    match gs.vehicle.drivetrain {
        Drivetrain::Fuel => {
            let needed = leg.miles / gs.vehicle.mpg;
            if gs.vehicle.fuel_gal < needed {
                return Err(ActionError::InsufficientFuel {
                    needed_gal: needed,
                    available_gal: gs.vehicle.fuel_gal,
                });
            }
        }
        Drivetrain::Electric => {
            let needed_pct = leg.miles / gs.vehicle.ev_range_max_mi * 100.0;
            if gs.vehicle.ev_charge_pct < needed_pct {
                return Err(ActionError::InsufficientCharge {
                    needed_pct,
                    available_pct: gs.vehicle.ev_charge_pct,
                });
            }
        }
    }
    Ok(())
}

/// Drive the next leg of the planned route. All validation happens before
/// any state mutates; a failed drive leaves the rig untouched.
///
/// # Errors
///
/// Fails when no route is planned, the route is complete, or range is
/// insufficient for the whole leg.
pub fn drive_one_edge(gs: &mut GameState) -> ActionResult {
    let route = gs.route.as_ref().ok_or(ActionError::NoRoute)?;
    let Some(leg) = route.next_leg().cloned() else {
        return Err(ActionError::RouteComplete);
    };
    range_check(gs, &leg)?;

    let from = gs
        .world
        .get(&leg.from)
        .ok_or_else(|| ActionError::UnknownDestination(leg.from.clone()))?;
    let conn = Connection {
        to: leg.to.clone(),
        road: leg.road,
        grade: leg.grade,
        miles: leg.miles,
    };
    let base_ticks = edge_ticks(gs.weather_seed, &gs.seasons, from, &conn, gs.clock);

    // Detours reroll per departure hour, not per attempt, so savescumming
    // a knock-on delay away requires actually waiting.
    let mut detour_rng = seeded(
        gs.campaign_seed,
        &leg.from,
        gs.clock.minutes() / 60,
        &format!("detour.{}", leg.to),
    );
    let mut events = Vec::new();
    let mut total_ticks = base_ticks;
    if detour_rng.r#gen::<f32>() < DETOUR_CHANCE {
        let extra = detour_rng.gen_range(DETOUR_MIN_TICKS..=DETOUR_MAX_TICKS);
        total_ticks += extra;
        events.push(EnvEvent::Detour { extra_ticks: extra });
        gs.logs.push(String::from(LOG_TRAVEL_DETOUR));
    }

    let hours = total_ticks as f32 * 0.25;
    match gs.vehicle.drivetrain {
        Drivetrain::Fuel => {
            gs.vehicle.drain_fuel(leg.miles / gs.vehicle.mpg);
            // The alternator tops up the house bank while the engine runs.
            gs.vehicle.charge_house(ALTERNATOR_PCT_PER_HOUR * hours);
        }
        Drivetrain::Electric => {
            gs.vehicle.drain_ev(leg.miles / gs.vehicle.ev_range_max_mi * 100.0);
        }
    }
    gs.vehicle.drain_water(DRIVE_WATER_DRAIN_PER_HOUR * hours);
    gs.player.add_energy(-DRIVE_ENERGY_DRAIN_PER_HOUR * hours);
    if let Some(pet) = &mut gs.companion {
        pet.energy = (pet.energy - DRIVE_PET_ENERGY_PER_HOUR * hours).max(0.0);
        pet.alertness = (pet.alertness + DRIVE_PET_ALERT_GAIN).min(100.0);
    }

    let ticks = gs.advance(u64::from(total_ticks) * TICK_MINUTES);
    gs.location_id = leg.to.clone();
    if let Some(route) = gs.route.as_mut() {
        route.cursor += 1;
        if route.is_complete() {
            gs.route = None;
        }
    }
    gs.logs.push(String::from(LOG_TRAVELED));

    Ok(ActionReport {
        ticks,
        events,
        ..ActionReport::default()
    })
}

/// Drive every remaining leg of the planned route.
///
/// # Errors
///
/// Stops at the first leg that fails; earlier legs remain driven.
pub fn drive_route(gs: &mut GameState) -> ActionResult {
    let mut combined = ActionReport::default();
    while gs.route.is_some() {
        let report = drive_one_edge(gs)?;
        combined.ticks += report.ticks;
        combined.cash_delta_cents += report.cash_delta_cents;
        combined.xp_gained += report.xp_gained;
        combined.events.extend(report.events);
    }
    Ok(combined)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::test_state;

    #[test]
    fn edge_ticks_scale_with_distance_and_surface() {
        let gs = test_state();
        let loc = gs.location().clone();
        let fast = Connection {
            to: "arches".into(),
            road: RoadType::Interstate,
            grade: Grade::Flat,
            miles: 65.0,
        };
        let slow = Connection {
            road: RoadType::Trail,
            ..fast.clone()
        };
        let noon = WorldClock::from_minutes(12 * 60);
        let fast_ticks = edge_ticks(gs.weather_seed, &gs.seasons, &loc, &fast, noon);
        let slow_ticks = edge_ticks(gs.weather_seed, &gs.seasons, &loc, &slow, noon);
        assert!(slow_ticks > fast_ticks);
        assert!(fast_ticks >= 4);
    }

    #[test]
    fn planner_finds_shortest_path() {
        let gs = test_state();
        let route = plan_route(
            gs.weather_seed,
            &gs.world,
            &gs.seasons,
            "moab",
            "arches",
            gs.clock,
        )
        .unwrap();
        assert!(!route.legs.is_empty());
        assert_eq!(route.legs[0].from, "moab");
        assert_eq!(route.destination(), Some("arches"));
        assert!(route.planned_ticks > 0);
    }

    #[test]
    fn planner_is_deterministic() {
        let gs = test_state();
        let a = plan_route(
            gs.weather_seed,
            &gs.world,
            &gs.seasons,
            "moab",
            "zion",
            gs.clock,
        );
        let b = plan_route(
            gs.weather_seed,
            &gs.world,
            &gs.seasons,
            "moab",
            "zion",
            gs.clock,
        );
        assert_eq!(a, b);
        assert!(a.is_some());
    }

    #[test]
    fn route_to_validates_destination() {
        let mut gs = test_state();
        assert!(matches!(
            route_to(&mut gs, "atlantis"),
            Err(ActionError::UnknownDestination(_))
        ));
        assert!(matches!(
            route_to(&mut gs, "moab"),
            Err(ActionError::AlreadyThere)
        ));
        assert!(route_to(&mut gs, "arches").is_ok());
        assert!(gs.route.is_some());
    }

    #[test]
    fn failed_drive_leaves_state_untouched() {
        let mut gs = test_state();
        route_to(&mut gs, "arches").unwrap();
        gs.vehicle.fuel_gal = 0.0;
        let fuel = gs.vehicle.fuel_gal;
        let minutes = gs.clock.minutes();
        assert!(matches!(
            drive_one_edge(&mut gs),
            Err(ActionError::InsufficientFuel { .. })
        ));
        assert_eq!(gs.location_id, "moab");
        assert!((gs.vehicle.fuel_gal - fuel).abs() < f32::EPSILON);
        assert_eq!(gs.clock.minutes(), minutes);
    }

    #[test]
    fn driving_moves_and_consumes() {
        let mut gs = test_state();
        route_to(&mut gs, "arches").unwrap();
        let fuel = gs.vehicle.fuel_gal;
        let minutes = gs.clock.minutes();
        let report = drive_one_edge(&mut gs).unwrap();
        assert_eq!(gs.location_id, "arches");
        assert!(gs.vehicle.fuel_gal < fuel);
        assert!(report.ticks >= 1);
        assert!(gs.clock.minutes() > minutes);
        assert!(gs.logs.iter().any(|l| l == LOG_TRAVELED));
    }

    #[test]
    fn drive_without_route_fails() {
        let mut gs = test_state();
        assert!(matches!(drive_one_edge(&mut gs), Err(ActionError::NoRoute)));
    }
}
