//! Career definitions and their passive perks.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobId {
    Photographer,
    Mechanic,
    RemoteDev,
    TrailGuide,
    Artist,
}

impl JobId {
    pub const ALL: [Self; 5] = [
        Self::Photographer,
        Self::Mechanic,
        Self::RemoteDev,
        Self::TrailGuide,
        Self::Artist,
    ];

    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Photographer => "photographer",
            Self::Mechanic => "mechanic",
            Self::RemoteDev => "remote_dev",
            Self::TrailGuide => "trail_guide",
            Self::Artist => "artist",
        }
    }

    #[must_use]
    pub fn from_key(key: &str) -> Option<Self> {
        let k = key.trim().to_ascii_lowercase().replace('-', "_");
        Self::ALL.iter().copied().find(|j| j.key() == k)
    }
}

const fn default_mult() -> f32 {
    1.0
}

/// Passive bonuses a career grants outside of direct work payouts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobPerks {
    pub label: String,
    /// Added to the overnight epic-shot chance while camped somewhere scenic.
    #[serde(default)]
    pub epic_bonus: f32,
    /// Fractional discount at outfitters.
    #[serde(default)]
    pub shop_discount: f32,
    /// Passive income per night camped far from town with working signal.
    #[serde(default)]
    pub remote_camp_income_cents: i64,
    /// Scales hiking energy cost. Guides hike cheap.
    #[serde(default = "default_mult")]
    pub hike_energy_mult: f32,
    /// Added to the scenic-find chance per hike hour.
    #[serde(default)]
    pub hike_find_bonus: f32,
    /// Extra morale from a night of dispersed camping.
    #[serde(default)]
    pub dispersed_morale_bonus: f32,
}

impl Default for JobPerks {
    fn default() -> Self {
        Self {
            label: String::new(),
            epic_bonus: 0.0,
            shop_discount: 0.0,
            remote_camp_income_cents: 0,
            hike_energy_mult: 1.0,
            hike_find_bonus: 0.0,
            dispersed_morale_bonus: 0.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobSpec {
    pub id: JobId,
    #[serde(flatten)]
    pub perks: JobPerks,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobTable {
    pub jobs: Vec<JobSpec>,
}

impl JobTable {
    /// Load career definitions from JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON cannot be parsed or a career is missing.
    pub fn from_json(json_str: &str) -> Result<Self, String> {
        let table: Self =
            serde_json::from_str(json_str).map_err(|e| format!("JSON parse error: {e}"))?;
        table.validate()?;
        Ok(table)
    }

    fn validate(&self) -> Result<(), String> {
        for id in JobId::ALL {
            if !self.jobs.iter().any(|j| j.id == id) {
                return Err(format!("Missing job definition for '{}'", id.key()));
            }
        }
        Ok(())
    }

    /// Embedded default careers.
    ///
    /// # Panics
    ///
    /// Panics if the bundled asset is invalid, which is a build defect.
    #[must_use]
    pub fn default_config() -> Self {
        Self::from_json(include_str!("../assets/jobs.json")).expect("bundled jobs.json is valid")
    }

    #[must_use]
    pub fn perks(&self, id: JobId) -> JobPerks {
        self.jobs
            .iter()
            .find(|j| j.id == id)
            .map_or_else(JobPerks::default, |j| j.perks.clone())
    }
}
