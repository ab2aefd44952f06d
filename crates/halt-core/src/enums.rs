//! Enum types for the unified schema.
//!
//! All variants serialize as lowercase strings. Unknown legacy values never
//! reach these enums directly: the converters in [`crate::bridge`] funnel
//! unrecognized intentions into [`Intention::Other`] before construction.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Why a drink was logged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Intention {
    Celebrate,
    Social,
    Taste,
    Bored,
    Cope,
    /// Catch-all bucket for anything the fixed taxonomy does not cover.
    #[default]
    Other,
}

impl Intention {
    /// Returns the string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Celebrate => "celebrate",
            Self::Social => "social",
            Self::Taste => "taste",
            Self::Bored => "bored",
            Self::Cope => "cope",
            Self::Other => "other",
        }
    }

    /// All variants, in display order.
    pub const ALL: [Intention; 6] = [
        Self::Celebrate,
        Self::Social,
        Self::Taste,
        Self::Bored,
        Self::Cope,
        Self::Other,
    ];
}

impl fmt::Display for Intention {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Intention {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "celebrate" => Ok(Self::Celebrate),
            "social" => Ok(Self::Social),
            "taste" => Ok(Self::Taste),
            "bored" => Ok(Self::Bored),
            "cope" => Ok(Self::Cope),
            "other" => Ok(Self::Other),
            other => Err(format!(
                "unknown intention {other:?} (expected celebrate, social, taste, bored, cope or other)"
            )),
        }
    }
}

/// Beverage category of an entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DrinkKind {
    Beer,
    Wine,
    Spirits,
    /// Anything else, including records migrated from the legacy schema,
    /// which never distinguished beverage kinds.
    #[default]
    Custom,
}

impl DrinkKind {
    /// Returns the string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Beer => "beer",
            Self::Wine => "wine",
            Self::Spirits => "spirits",
            Self::Custom => "custom",
        }
    }
}

impl fmt::Display for DrinkKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for DrinkKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "beer" => Ok(Self::Beer),
            "wine" => Ok(Self::Wine),
            "spirits" => Ok(Self::Spirits),
            "custom" => Ok(Self::Custom),
            other => Err(format!(
                "unknown drink kind {other:?} (expected beer, wine, spirits or custom)"
            )),
        }
    }
}
