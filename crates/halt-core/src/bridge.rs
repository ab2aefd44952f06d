//! Converters between the legacy schema and the unified schema.
//!
//! The forward direction (legacy drink -> entry) collapses volume and ABV
//! into a standard-drink count; the reverse direction reconstructs a
//! plausible volume/ABV pair from that count alone. The reverse is therefore
//! lossy for any drink that was not logged at the reference volume -- that is
//! the accepted cost of the unified schema, not a defect.

use crate::calc;
use crate::entry::{Entry, HaltFlags, NewEntry};
use crate::enums::{DrinkKind, Intention};
use crate::legacy::{LegacyDrink, LegacyGoals};
use crate::settings::{Settings, SettingsPatch};

/// HALT trigger tags as stored in the legacy schema.
pub mod halt_tag {
    pub const HUNGRY: &str = "hungry";
    pub const ANGRY: &str = "angry";
    pub const LONELY: &str = "lonely";
    pub const TIRED: &str = "tired";
}

/// Price per standard drink assumed when reconstructing legacy goals; the
/// unified settings record has no field for it.
pub const DEFAULT_PRICE_PER_STD: f64 = 2.0;

/// Volume assumed when reconstructing a drink from its standard-drink count.
const REFERENCE_VOLUME_ML: f64 = 355.0;

/// Safety bounds on reconstructed values.
const MAX_VOLUME_ML: f64 = 1000.0;
const MAX_ABV_PCT: f64 = 50.0;

/// Standard-drink count from volume and strength.
pub fn std_drinks_from_volume_abv(volume_ml: f64, abv_pct: f64) -> f64 {
    calc::std_drinks(volume_ml, abv_pct)
}

/// Converts a legacy trigger-tag list to parallel boolean flags.
///
/// Tags outside the fixed taxonomy are ignored.
pub fn halt_flags_from_tags(tags: &[String]) -> HaltFlags {
    HaltFlags {
        hungry: tags.iter().any(|t| t == halt_tag::HUNGRY),
        angry: tags.iter().any(|t| t == halt_tag::ANGRY),
        lonely: tags.iter().any(|t| t == halt_tag::LONELY),
        tired: tags.iter().any(|t| t == halt_tag::TIRED),
    }
}

/// Converts HALT flags back to the legacy tag list.
///
/// Output order is fixed (hungry, angry, lonely, tired); the legacy schema
/// attached no meaning to ordering.
pub fn halt_tags_from_flags(flags: &HaltFlags) -> Vec<&'static str> {
    let mut tags = Vec::new();
    if flags.hungry {
        tags.push(halt_tag::HUNGRY);
    }
    if flags.angry {
        tags.push(halt_tag::ANGRY);
    }
    if flags.lonely {
        tags.push(halt_tag::LONELY);
    }
    if flags.tired {
        tags.push(halt_tag::TIRED);
    }
    tags
}

/// Maps a legacy intention string to the unified enum.
pub fn intention_from_legacy(intention: &str) -> Intention {
    match intention {
        "taste" => Intention::Taste,
        "social" => Intention::Social,
        "cope" => Intention::Cope,
        "celebrate" => Intention::Celebrate,
        "bored" => Intention::Bored,
        // Retired legacy bucket; boredom is the closest match.
        "habit" => Intention::Bored,
        _ => Intention::Other,
    }
}

/// Converts a legacy drink to an entry ready for insertion into the unified
/// store.
pub fn legacy_drink_to_entry(drink: &LegacyDrink) -> NewEntry {
    NewEntry {
        ts: drink.ts,
        // The legacy schema never recorded a beverage kind.
        kind: DrinkKind::Custom,
        std_drinks: std_drinks_from_volume_abv(drink.volume_ml, drink.abv_pct),
        cost: None,
        intention: intention_from_legacy(&drink.intention),
        craving: drink.craving,
        halt: halt_flags_from_tags(&drink.halt),
        alt_action: if drink.alt.is_empty() {
            None
        } else {
            Some(drink.alt.clone())
        },
        notes: None,
    }
}

/// Reconstructs a legacy drink from an entry.
///
/// Volume is assumed to be `std_drinks * 355 mL` and ABV is derived from
/// that, so the pair round-trips only for entries originally logged at the
/// reference volume. Reconstructed values are clamped to 1000 mL / 50% as
/// safety bounds, which loses information for strong entries.
pub fn entry_to_legacy_drink(entry: &Entry) -> LegacyDrink {
    let volume_ml = (entry.std_drinks * REFERENCE_VOLUME_ML).round();
    let abv_pct = if volume_ml == 0.0 {
        0.0
    } else {
        (entry.std_drinks * calc::GRAMS_PER_STD_DRINK * 100.0
            / (volume_ml * calc::ETHANOL_DENSITY_G_PER_ML))
            .round()
    };

    LegacyDrink {
        volume_ml: volume_ml.min(MAX_VOLUME_ML),
        abv_pct: abv_pct.min(MAX_ABV_PCT),
        intention: entry.intention.as_str().to_owned(),
        craving: entry.craving,
        halt: halt_tags_from_flags(&entry.halt)
            .into_iter()
            .map(str::to_owned)
            .collect(),
        alt: entry.alt_action.clone().unwrap_or_default(),
        ts: entry.ts,
    }
}

/// Converts a legacy goals record to a unified settings patch.
///
/// `price_per_std` has no home in the unified schema and is dropped.
pub fn legacy_goals_to_settings(goals: &LegacyGoals) -> SettingsPatch {
    SettingsPatch {
        daily_goal_drinks: Some(goals.daily_cap),
        weekly_goal_drinks: Some(goals.weekly_goal),
        monthly_budget: Some(goals.baseline_monthly_spend),
        ..SettingsPatch::default()
    }
}

/// Reconstructs a legacy goals record from unified settings.
///
/// The dropped `price_per_std` comes back as [`DEFAULT_PRICE_PER_STD`].
pub fn settings_to_legacy_goals(settings: &Settings) -> LegacyGoals {
    LegacyGoals {
        daily_cap: settings.daily_goal_drinks,
        weekly_goal: settings.weekly_goal_drinks,
        price_per_std: DEFAULT_PRICE_PER_STD,
        baseline_monthly_spend: settings.monthly_budget,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn tags(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn std_drinks_for_a_reference_beer() {
        // 355 mL at 5.0% is almost exactly one US standard drink.
        let n = std_drinks_from_volume_abv(355.0, 5.0);
        assert!((n - 0.98).abs() < 0.05, "got {n}");
    }

    #[test]
    fn std_drinks_zero_volume_or_abv() {
        assert_eq!(std_drinks_from_volume_abv(0.0, 40.0), 0.0);
        assert_eq!(std_drinks_from_volume_abv(500.0, 0.0), 0.0);
    }

    #[test]
    fn halt_round_trips_every_subset() {
        let all = [
            halt_tag::HUNGRY,
            halt_tag::ANGRY,
            halt_tag::LONELY,
            halt_tag::TIRED,
        ];
        for mask in 0u8..16 {
            let subset: Vec<String> = all
                .iter()
                .enumerate()
                .filter(|(i, _)| mask & (1 << i) != 0)
                .map(|(_, t)| t.to_string())
                .collect();

            let flags = halt_flags_from_tags(&subset);
            let back: Vec<String> = halt_tags_from_flags(&flags)
                .into_iter()
                .map(str::to_owned)
                .collect();

            let mut expected = subset.clone();
            expected.sort();
            let mut got = back;
            got.sort();
            assert_eq!(got, expected, "subset mask {mask}");
        }
    }

    #[test]
    fn halt_ignores_unknown_tags_and_order() {
        let flags = halt_flags_from_tags(&tags(&["tired", "stressed", "hungry"]));
        assert!(flags.hungry && flags.tired);
        assert!(!flags.angry && !flags.lonely);
        assert_eq!(halt_tags_from_flags(&flags), vec!["hungry", "tired"]);
    }

    #[test]
    fn intention_mapping_table() {
        assert_eq!(intention_from_legacy("taste"), Intention::Taste);
        assert_eq!(intention_from_legacy("social"), Intention::Social);
        assert_eq!(intention_from_legacy("cope"), Intention::Cope);
        assert_eq!(intention_from_legacy("celebrate"), Intention::Celebrate);
        assert_eq!(intention_from_legacy("bored"), Intention::Bored);
        assert_eq!(intention_from_legacy("habit"), Intention::Bored);
    }

    #[test]
    fn intention_unrecognized_falls_back_to_other() {
        assert_eq!(intention_from_legacy("stress"), Intention::Other);
        assert_eq!(intention_from_legacy(""), Intention::Other);
        assert_eq!(intention_from_legacy("TASTE"), Intention::Other);
    }

    #[test]
    fn legacy_drink_converts_fully() {
        let drink = LegacyDrink {
            volume_ml: 500.0,
            abv_pct: 6.0,
            intention: "habit".into(),
            craving: 7,
            halt: tags(&["lonely"]),
            alt: "went for a run".into(),
            ts: 1_700_000_000_000,
        };

        let entry = legacy_drink_to_entry(&drink);
        assert_eq!(entry.ts, drink.ts);
        assert_eq!(entry.kind, DrinkKind::Custom);
        assert_eq!(entry.intention, Intention::Bored);
        assert_eq!(entry.craving, 7);
        assert!(entry.halt.lonely);
        assert_eq!(entry.alt_action.as_deref(), Some("went for a run"));
        assert!((entry.std_drinks - 500.0 * 0.06 * 0.789 / 14.0).abs() < 1e-9);
    }

    #[test]
    fn empty_alt_becomes_none() {
        let drink = LegacyDrink::default();
        assert_eq!(legacy_drink_to_entry(&drink).alt_action, None);
    }

    #[test]
    fn reverse_conversion_reconstructs_reference_beer() {
        let entry = NewEntry {
            std_drinks: 1.0,
            intention: Intention::Social,
            ..NewEntry::default()
        }
        .into_entry("e1");

        let drink = entry_to_legacy_drink(&entry);
        assert_eq!(drink.volume_ml, 355.0);
        // 1 std at 355 mL back-solves to ~5%.
        assert_eq!(drink.abv_pct, 5.0);
        assert_eq!(drink.intention, "social");
    }

    #[test]
    fn reverse_conversion_clamps_large_entries() {
        let entry = NewEntry {
            std_drinks: 12.0,
            ..NewEntry::default()
        }
        .into_entry("e1");

        let drink = entry_to_legacy_drink(&entry);
        assert!(drink.volume_ml <= 1000.0);
        assert!(drink.abv_pct <= 50.0);
    }

    #[test]
    fn reverse_conversion_zero_entry() {
        let entry = NewEntry::default().into_entry("e1");
        let drink = entry_to_legacy_drink(&entry);
        assert_eq!(drink.volume_ml, 0.0);
        assert_eq!(drink.abv_pct, 0.0);
    }

    #[test]
    fn reverse_conversion_is_lossy_away_from_reference_volume() {
        // A small strong pour: 44 mL at 40%.
        let std = std_drinks_from_volume_abv(44.0, 40.0);
        let entry = NewEntry {
            std_drinks: std,
            ..NewEntry::default()
        }
        .into_entry("e1");

        let drink = entry_to_legacy_drink(&entry);
        // Reconstruction lands nowhere near the original pair.
        assert_ne!(drink.volume_ml, 44.0);
        assert_ne!(drink.abv_pct, 40.0);
        // But the implied standard-drink count stays in the ballpark.
        let implied = std_drinks_from_volume_abv(drink.volume_ml, drink.abv_pct);
        assert!((implied - std).abs() < 0.2, "implied {implied}, was {std}");
    }

    #[test]
    fn goals_to_settings_patch() {
        let goals = LegacyGoals {
            daily_cap: 2.0,
            weekly_goal: 10.0,
            price_per_std: 3.5,
            baseline_monthly_spend: 150.0,
        };
        let patch = legacy_goals_to_settings(&goals);
        assert_eq!(patch.daily_goal_drinks, Some(2.0));
        assert_eq!(patch.weekly_goal_drinks, Some(10.0));
        assert_eq!(patch.monthly_budget, Some(150.0));
        // price_per_std has no unified home.
        assert!(patch.language.is_none() && patch.theme.is_none());
    }

    #[test]
    fn settings_to_goals_defaults_price() {
        let settings = Settings {
            daily_goal_drinks: 2.0,
            weekly_goal_drinks: 10.0,
            monthly_budget: 150.0,
            ..Settings::default()
        };
        let goals = settings_to_legacy_goals(&settings);
        assert_eq!(goals.price_per_std, DEFAULT_PRICE_PER_STD);
        assert_eq!(goals.daily_cap, 2.0);
        assert_eq!(goals.baseline_monthly_spend, 150.0);
    }
}
