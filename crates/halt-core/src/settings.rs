//! Settings -- user configuration stored alongside entries in the unified
//! database.

use serde::{Deserialize, Serialize};
use std::fmt;

/// UI language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    En,
    Es,
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::En => "en",
            Self::Es => "es",
        })
    }
}

impl std::str::FromStr for Language {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "en" => Ok(Self::En),
            "es" => Ok(Self::Es),
            other => Err(format!("unknown language {other:?} (expected en or es)")),
        }
    }
}

/// Color theme preference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    Dark,
    #[default]
    System,
}

impl std::str::FromStr for Theme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "light" => Ok(Self::Light),
            "dark" => Ok(Self::Dark),
            "system" => Ok(Self::System),
            other => Err(format!(
                "unknown theme {other:?} (expected light, dark or system)"
            )),
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Light => "light",
            Self::Dark => "dark",
            Self::System => "system",
        })
    }
}

/// Biological sex, used only by the BAC estimate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sex {
    M,
    F,
    Other,
}

/// Reminder configuration. The times are `HH:MM` strings; scheduling itself
/// is outside this crate.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reminders {
    #[serde(default)]
    pub enabled: bool,

    #[serde(default)]
    pub times: Vec<String>,
}

/// Optional body profile for the BAC estimate.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight_kg: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sex: Option<Sex>,
}

/// User configuration record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    #[serde(default)]
    pub version: u32,

    #[serde(default)]
    pub language: Language,

    #[serde(default)]
    pub theme: Theme,

    /// Soft cap on standard drinks per day. 0 means no goal set.
    #[serde(default)]
    pub daily_goal_drinks: f64,

    /// Soft cap on standard drinks per week. 0 means no goal set.
    #[serde(default)]
    pub weekly_goal_drinks: f64,

    /// Monthly spending budget. 0 means no budget set.
    #[serde(default)]
    pub monthly_budget: f64,

    #[serde(default)]
    pub reminders: Reminders,

    #[serde(rename = "showBAC", default)]
    pub show_bac: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile: Option<Profile>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            version: crate::db::CURRENT_DB_VERSION,
            language: Language::default(),
            theme: Theme::default(),
            daily_goal_drinks: 0.0,
            weekly_goal_drinks: 0.0,
            monthly_budget: 0.0,
            reminders: Reminders::default(),
            show_bac: false,
            profile: None,
        }
    }
}

/// Typed partial-update struct for [`Settings`].
///
/// Only `Some` fields are applied; `None` fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SettingsPatch {
    pub language: Option<Language>,
    pub theme: Option<Theme>,
    pub daily_goal_drinks: Option<f64>,
    pub weekly_goal_drinks: Option<f64>,
    pub monthly_budget: Option<f64>,
    pub reminders: Option<Reminders>,
    pub show_bac: Option<bool>,
    pub profile: Option<Option<Profile>>,
}

impl SettingsPatch {
    /// Applies every `Some` field to the settings record.
    pub fn apply(&self, settings: &mut Settings) {
        if let Some(language) = self.language {
            settings.language = language;
        }
        if let Some(theme) = self.theme {
            settings.theme = theme;
        }
        if let Some(daily) = self.daily_goal_drinks {
            settings.daily_goal_drinks = daily;
        }
        if let Some(weekly) = self.weekly_goal_drinks {
            settings.weekly_goal_drinks = weekly;
        }
        if let Some(budget) = self.monthly_budget {
            settings.monthly_budget = budget;
        }
        if let Some(ref reminders) = self.reminders {
            settings.reminders = reminders.clone();
        }
        if let Some(show_bac) = self.show_bac {
            settings.show_bac = show_bac;
        }
        if let Some(ref profile) = self.profile {
            settings.profile = *profile;
        }
    }

    /// Returns `true` if no field is set.
    pub fn is_empty(&self) -> bool {
        self.language.is_none()
            && self.theme.is_none()
            && self.daily_goal_drinks.is_none()
            && self.weekly_goal_drinks.is_none()
            && self.monthly_budget.is_none()
            && self.reminders.is_none()
            && self.show_bac.is_none()
            && self.profile.is_none()
    }
}
