//! Action outcome types shared by every player-facing operation.
//!
//! Every command either fails fast with an [`ActionError`] before any state
//! mutates, or succeeds and returns an [`ActionReport`] describing what the
//! world did in response.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Broad failure class, used by front ends to decide presentation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActionErrorKind {
    /// The request itself was malformed (unknown id, bad quantity).
    Validation,
    /// The request was well-formed but a precondition is not met.
    Prerequisite,
    /// A consumable ran out mid-validation (cash, fuel, charge, water).
    ResourceExhausted,
}

/// Why a player command was rejected. No state has changed when one of
/// these is returned.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ActionError {
    #[error("no location matches '{0}'")]
    UnknownDestination(String),
    #[error("no catalog item matches '{0}'")]
    UnknownItem(String),
    #[error("no trail leads that direction from here")]
    InvalidDirection,
    #[error("quantity must be at least 1")]
    InvalidQuantity,
    #[error("no route is planned")]
    NoRoute,
    #[error("the planned route is already complete")]
    RouteComplete,
    #[error("already at that location")]
    AlreadyThere,
    #[error("no drivable route from {from} to {to}")]
    RouteNotFound { from: String, to: String },
    #[error("need {needed_pct:.0}% charge but only {available_pct:.0}% remains")]
    InsufficientCharge { needed_pct: f32, available_pct: f32 },
    #[error("the pack is already fully charged")]
    PackAlreadyFull,
    #[error("need {needed_gal:.1} gal of fuel but only {available_gal:.1} gal remains")]
    InsufficientFuel { needed_gal: f32, available_gal: f32 },
    #[error("no usable signal here")]
    NoSignal,
    #[error("this location has no {0}")]
    MissingAmenity(&'static str),
    #[error("that action does not apply to this drivetrain")]
    DrivetrainMismatch,
    #[error("the rig is already in that drivetrain mode")]
    DrivetrainUnchanged,
    #[error("this rig does not support that drivetrain")]
    DrivetrainUnsupported,
    #[error("it is too dark for that now")]
    Nighttime,
    #[error("not enough daylight left to get back before dark")]
    DuskTooClose,
    #[error("you do not own a {0}")]
    DeviceNotOwned(String),
    #[error("the {0} cannot be switched on or off")]
    DeviceNotSwitchable(String),
    #[error("the {0} is out of fuel")]
    NoDeviceFuel(String),
    #[error("you already own {0}")]
    AlreadyOwned(String),
    #[error("a companion already rides with you")]
    CompanionAlready,
    #[error("no companion rides with you")]
    NoCompanion,
    #[error("your companion is not obedient enough for that")]
    CompanionUntrained,
    #[error("requires level {required}, you are level {level}")]
    LevelTooLow { required: u32, level: u32 },
    #[error("need {needed_cents} cents but only {available_cents} on hand")]
    InsufficientCash {
        needed_cents: i64,
        available_cents: i64,
    },
    #[error("no rations left to cook")]
    OutOfFood,
    #[error("not enough water for that")]
    WaterTooLow,
    #[error("nobody is hiring gig work here")]
    NoGigsHere,
    #[error("that gig has already been worked today")]
    GigExhausted,
}

impl ActionError {
    /// Classify the failure for presentation.
    #[must_use]
    pub const fn kind(&self) -> ActionErrorKind {
        match self {
            Self::UnknownDestination(_)
            | Self::UnknownItem(_)
            | Self::InvalidDirection
            | Self::InvalidQuantity
            | Self::DrivetrainUnchanged => ActionErrorKind::Validation,
            Self::InsufficientCharge { .. }
            | Self::InsufficientFuel { .. }
            | Self::InsufficientCash { .. }
            | Self::OutOfFood
            | Self::WaterTooLow
            | Self::NoDeviceFuel(_) => ActionErrorKind::ResourceExhausted,
            _ => ActionErrorKind::Prerequisite,
        }
    }
}

/// Environmental events that happened while an action ran. These are
/// stochastic outcomes the player reacts to, not errors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum EnvEvent {
    Detour { extra_ticks: u32 },
    RangerCheck,
    RangerFine { cents: i64 },
    NoSignalNight,
    ScenicFind,
    ForagedRation,
    EpicShot { cents: i64 },
    ClientBonus { cents: i64 },
    RemoteCampIncome { cents: i64 },
    WaterFound { liters: f32 },
}

/// What a successful action did to the world.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ActionReport {
    /// Simulation ticks consumed, including detour padding.
    pub ticks: u32,
    /// Net cash movement in cents. Negative for purchases and fines.
    pub cash_delta_cents: i64,
    pub xp_gained: u32,
    pub events: Vec<EnvEvent>,
}

impl ActionReport {
    #[must_use]
    pub fn with_ticks(ticks: u32) -> Self {
        Self {
            ticks,
            ..Self::default()
        }
    }
}

pub type ActionResult = Result<ActionReport, ActionError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds_partition_errors() {
        assert_eq!(
            ActionError::UnknownItem("tent".into()).kind(),
            ActionErrorKind::Validation
        );
        assert_eq!(
            ActionError::Nighttime.kind(),
            ActionErrorKind::Prerequisite
        );
        assert_eq!(
            ActionError::InsufficientCash {
                needed_cents: 100,
                available_cents: 0
            }
            .kind(),
            ActionErrorKind::ResourceExhausted
        );
    }

    #[test]
    fn errors_render_for_players() {
        let err = ActionError::RouteNotFound {
            from: "moab".into(),
            to: "zion".into(),
        };
        assert!(err.to_string().contains("moab"));
        assert!(err.to_string().contains("zion"));
    }
}
