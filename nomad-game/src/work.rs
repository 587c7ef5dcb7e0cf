//! Work sessions and the gig board.
//!
//! Payouts multiply a career base rate by the time-of-day window, a
//! fatigue curve over hours already worked today, and a seeded variance
//! roll. Everything rolls from the campaign seed keyed on location and
//! day, so a session replays identically.

use rand::Rng;

use crate::action::{ActionError, ActionReport, ActionResult, EnvEvent};
use crate::clock::{Window, window_multiplier, windows_at};
use crate::constants::{
    CREATIVE_BONUS_BASE_CHANCE, CREATIVE_BONUS_GOLDEN_EXTRA, CREATIVE_BONUS_MAX_CENTS,
    CREATIVE_BONUS_MIN_CENTS, FATIGUE_FLOOR_MULT, FATIGUE_FULL_BELOW_HOURS, FATIGUE_FULL_MULT,
    FATIGUE_STEP1_BELOW_HOURS, FATIGUE_STEP1_MULT, FATIGUE_STEP2_BELOW_HOURS, FATIGUE_STEP2_MULT,
    GIG_ENERGY_PER_HOUR, GIG_MAX_HOURS, GIG_MIN_HOURS, GIG_WATER_PER_HOUR, LOG_GIG_DONE,
    LOG_WORK_BONUS, LOG_WORKED, MECHANIC_GIG_MULT, WORK_DEV_ENERGY_PER_HOUR, WORK_ENERGY_PER_HOUR,
    WORK_MAX_HOURS, WORK_MIN_HOURS, WORK_VARIANCE_MAX, WORK_VARIANCE_MIN, WORK_WATER_PER_HOUR,
    XP_DIFFICULTY_MULT, XP_PER_WORK_HOUR,
};
use crate::jobs::JobId;
use crate::numbers::{i64_to_f32, round_f32_to_i64, round_f32_to_u32};
use crate::power::DeviceKind;
use crate::rng::seeded;
use crate::state::GameState;
use crate::weather::{WeatherSample, WindBand};
use crate::world::Biome;

/// Hourly base rate in cents for a career at a location.
fn base_rate_cents(job: JobId, biome: Biome) -> f32 {
    match job {
        JobId::Photographer => 2_200.0 * photogenic_factor(biome),
        JobId::RemoteDev => {
            if biome == Biome::Town {
                2_800.0 * 1.2
            } else {
                2_800.0
            }
        }
        JobId::Mechanic => {
            if biome == Biome::Town {
                3_000.0
            } else {
                2_200.0
            }
        }
        JobId::TrailGuide => 2_400.0,
        JobId::Artist => 1_800.0,
    }
}

/// How much a landscape sells for through a lens.
fn photogenic_factor(biome: Biome) -> f32 {
    match biome {
        Biome::Canyon => 1.35,
        Biome::SaltFlat => 1.30,
        Biome::Desert => 1.25,
        Biome::Mesa => 1.20,
        Biome::Alpine => 1.15,
        Biome::Town => 1.0,
    }
}

const fn creative_career(job: JobId) -> bool {
    matches!(job, JobId::Photographer | JobId::Artist)
}

/// Careers paid for chasing light pick the best active window; desk and
/// trade careers just get the day or night baseline.
fn career_window_mult(job: JobId, active: &crate::clock::WindowSet) -> f32 {
    if creative_career(job) {
        window_multiplier(None, active)
    } else if active.contains(&Window::Daylight) {
        Window::Daylight.multiplier()
    } else {
        Window::Night.multiplier()
    }
}

/// Diminishing returns over hours already worked today.
#[must_use]
pub fn fatigue_multiplier(hours_already: f32) -> f32 {
    if hours_already < FATIGUE_FULL_BELOW_HOURS {
        FATIGUE_FULL_MULT
    } else if hours_already < FATIGUE_STEP1_BELOW_HOURS {
        FATIGUE_STEP1_MULT
    } else if hours_already < FATIGUE_STEP2_BELOW_HOURS {
        FATIGUE_STEP2_MULT
    } else {
        FATIGUE_FLOOR_MULT
    }
}

/// Harsh conditions earn extra xp.
fn difficulty_multiplier(weather: &WeatherSample) -> f32 {
    if weather.wind == WindBand::High || weather.heat.is_hot() {
        XP_DIFFICULTY_MULT
    } else {
        1.0
    }
}

/// Whether an upload-sized connection exists right now. Starlink makes
/// its own; towns always have one; elsewhere the site's signal grade is
/// the daily odds.
#[must_use]
pub fn has_signal(gs: &GameState) -> bool {
    if gs.devices.is_on(DeviceKind::Starlink) && gs.vehicle.house_battery_pct > 0.0 {
        return true;
    }
    let loc = gs.location();
    if loc.biome == Biome::Town {
        return true;
    }
    let mut rng = seeded(
        gs.weather_seed,
        &loc.id,
        gs.clock.day_index(),
        "signal.day",
    );
    rng.r#gen::<f32>() < loc.resources.signal.factor()
}

/// Work a session at the current career.
///
/// # Errors
///
/// Remote development fails without signal. Hours outside the session
/// band are rejected.
pub fn perform_work(gs: &mut GameState, hours: f32) -> ActionResult {
    if !(WORK_MIN_HOURS..=WORK_MAX_HOURS).contains(&hours) {
        return Err(ActionError::InvalidQuantity);
    }
    if gs.job == JobId::RemoteDev && !has_signal(gs) {
        return Err(ActionError::NoSignal);
    }

    let loc = gs.location().clone();
    let weather = gs.weather_now();
    let active = windows_at(gs.clock, &weather);
    let day = gs.clock.day_index();

    let base = base_rate_cents(gs.job, loc.biome);
    let window_mult = career_window_mult(gs.job, &active);
    let fatigue = fatigue_multiplier(gs.work.hours_today(gs.job.key()));
    let mut rng = seeded(gs.campaign_seed, &loc.id, day, gs.job.key());
    let variance = rng.gen_range(WORK_VARIANCE_MIN..=WORK_VARIANCE_MAX);

    let payout = round_f32_to_i64(base * hours * window_mult * fatigue * variance);

    let mut events = Vec::new();
    let mut cash = payout;
    if creative_career(gs.job) {
        let mut chance = CREATIVE_BONUS_BASE_CHANCE;
        if active.contains(&Window::GoldenHour) {
            chance += CREATIVE_BONUS_GOLDEN_EXTRA;
        }
        if rng.r#gen::<f32>() < chance {
            let bonus = rng.gen_range(CREATIVE_BONUS_MIN_CENTS..=CREATIVE_BONUS_MAX_CENTS);
            cash += bonus;
            events.push(EnvEvent::ClientBonus { cents: bonus });
            gs.logs.push(String::from(LOG_WORK_BONUS));
        }
    }

    let energy_rate = if gs.job == JobId::RemoteDev {
        WORK_DEV_ENERGY_PER_HOUR
    } else {
        WORK_ENERGY_PER_HOUR
    };
    gs.player.add_energy(-energy_rate * hours);
    gs.vehicle.drain_water(WORK_WATER_PER_HOUR * hours);
    gs.player.add_cash(cash);
    gs.work.record(day, gs.job.key(), hours);

    let xp = hours * XP_PER_WORK_HOUR * difficulty_multiplier(&weather);
    gs.grant_xp(xp);

    let ticks = gs.advance(u64::from(round_f32_to_u32(hours * 60.0)));
    gs.logs.push(String::from(LOG_WORKED));

    Ok(ActionReport {
        ticks,
        cash_delta_cents: cash,
        xp_gained: round_f32_to_u32(xp),
        events,
    })
}

/// Work a posted gig at the current location. Each posting can be worked
/// once per day.
///
/// # Errors
///
/// Fails when no gigs are posted here, the id is unknown, or the gig has
/// already been worked today.
pub fn work_gig(gs: &mut GameState, gig_id: &str) -> ActionResult {
    let loc = gs.location().clone();
    if loc.gigs.is_empty() {
        return Err(ActionError::NoGigsHere);
    }
    let listing = loc
        .gigs
        .iter()
        .find(|g| g.id == gig_id)
        .ok_or_else(|| ActionError::UnknownItem(gig_id.into()))?
        .clone();
    let day = gs.clock.day_index();
    if gs.gig_cooldowns.get(&listing.id) == Some(&day) {
        return Err(ActionError::GigExhausted);
    }

    let weather = gs.weather_now();
    let active = windows_at(gs.clock, &weather);
    let mut rng = seeded(gs.campaign_seed, &listing.id, day, "gig");
    let hours = rng.gen_range(GIG_MIN_HOURS..=GIG_MAX_HOURS);
    let mut payout =
        rng.gen_range(listing.payout_min_cents..=listing.payout_max_cents.max(listing.payout_min_cents));
    if let Some(window) = listing.window {
        let mult = window_multiplier(Some(window), &active);
        payout = round_f32_to_i64(i64_to_f32(payout) * mult);
    }
    if gs.job == JobId::Mechanic {
        payout = round_f32_to_i64(i64_to_f32(payout) * MECHANIC_GIG_MULT);
    }

    gs.player.add_energy(-GIG_ENERGY_PER_HOUR * hours);
    gs.vehicle.drain_water(GIG_WATER_PER_HOUR * hours);
    gs.player.add_cash(payout);
    gs.work.record(day, "gig", hours);
    gs.gig_cooldowns.insert(listing.id.clone(), day);

    let xp = hours * XP_PER_WORK_HOUR * difficulty_multiplier(&weather);
    gs.grant_xp(xp);

    let ticks = gs.advance(u64::from(round_f32_to_u32(hours * 60.0)));
    gs.logs.push(String::from(LOG_GIG_DONE));

    Ok(ActionReport {
        ticks,
        cash_delta_cents: payout,
        xp_gained: round_f32_to_u32(xp),
        ..ActionReport::default()
    })
}
