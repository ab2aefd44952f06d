//! The legacy schema -- record shapes from before the unified database.
//!
//! These types exist only so stored blobs from old installations can be read
//! and converted (see [`crate::bridge`]). Every field defaults: the legacy
//! writer had no schema validation, so a single odd record must not sink the
//! whole collection on decode.

use serde::{Deserialize, Serialize};

/// Storage key the legacy drink list lives under.
pub const LEGACY_DRINKS_KEY: &str = "drinks";

/// Storage key the legacy goals record lives under.
pub const LEGACY_GOALS_KEY: &str = "goals";

/// One consumption event under the legacy schema. Quantity is stored as raw
/// volume and strength rather than a standard-drink count, and the intention
/// and trigger tags are free strings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LegacyDrink {
    pub volume_ml: f64,
    pub abv_pct: f64,
    pub intention: String,
    pub craving: u8,
    pub halt: Vec<String>,
    pub alt: String,
    /// Event time, epoch milliseconds.
    pub ts: i64,
}

/// The legacy goals record, always stored whole.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LegacyGoals {
    pub daily_cap: f64,
    pub weekly_goal: f64,
    pub price_per_std: f64,
    pub baseline_monthly_spend: f64,
}

impl LegacyGoals {
    /// The defaults a partial goals record is merged over during migration.
    pub fn migration_defaults() -> Self {
        Self {
            daily_cap: 3.0,
            weekly_goal: 14.0,
            price_per_std: 2.0,
            baseline_monthly_spend: 200.0,
        }
    }
}

/// A goals record as actually found in storage: any subset of fields.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LegacyGoalsPatch {
    pub daily_cap: Option<f64>,
    pub weekly_goal: Option<f64>,
    pub price_per_std: Option<f64>,
    pub baseline_monthly_spend: Option<f64>,
}

impl LegacyGoalsPatch {
    /// Returns `true` if no field is present.
    pub fn is_empty(&self) -> bool {
        self.daily_cap.is_none()
            && self.weekly_goal.is_none()
            && self.price_per_std.is_none()
            && self.baseline_monthly_spend.is_none()
    }

    /// Fills the gaps with [`LegacyGoals::migration_defaults`].
    pub fn merged_over_defaults(&self) -> LegacyGoals {
        let defaults = LegacyGoals::migration_defaults();
        LegacyGoals {
            daily_cap: self.daily_cap.unwrap_or(defaults.daily_cap),
            weekly_goal: self.weekly_goal.unwrap_or(defaults.weekly_goal),
            price_per_std: self.price_per_std.unwrap_or(defaults.price_per_std),
            baseline_monthly_spend: self
                .baseline_monthly_spend
                .unwrap_or(defaults.baseline_monthly_spend),
        }
    }
}
