//! Alcohol arithmetic: ethanol mass, standard drinks, and a Widmark BAC
//! estimate.

use crate::entry::Entry;
use crate::settings::Sex;

/// Density of ethanol in grams per milliliter.
pub const ETHANOL_DENSITY_G_PER_ML: f64 = 0.789;

/// Grams of ethanol in one US standard drink.
pub const GRAMS_PER_STD_DRINK: f64 = 14.0;

/// Grams of pure ethanol in a beverage of the given volume and strength.
pub fn grams_alcohol(volume_ml: f64, abv_pct: f64) -> f64 {
    volume_ml * (abv_pct / 100.0) * ETHANOL_DENSITY_G_PER_ML
}

/// Standard-drink count for a beverage of the given volume and strength.
///
/// Zero volume or zero ABV yields exactly 0. Negative inputs are not
/// validated; garbage in, garbage out.
pub fn std_drinks(volume_ml: f64, abv_pct: f64) -> f64 {
    grams_alcohol(volume_ml, abv_pct) / GRAMS_PER_STD_DRINK
}

/// Widmark blood-alcohol estimate from logged entries, as a percentage.
///
/// Counts entries at or before `now_ms`, eliminates at 0.015 %/h from the
/// first entry, and clamps to `[0, 0.4]`. A rough self-awareness figure, not
/// a medical one.
pub fn widmark_bac(entries: &[Entry], weight_kg: f64, sex: Sex, now_ms: i64) -> f64 {
    let r = match sex {
        Sex::M => 0.68,
        Sex::F => 0.55,
        Sex::Other => 0.6,
    };
    let grams: f64 = entries
        .iter()
        .filter(|e| e.ts <= now_ms)
        .map(|e| e.std_drinks * GRAMS_PER_STD_DRINK)
        .sum();
    if grams == 0.0 {
        return 0.0;
    }
    let first_ts = entries.iter().map(|e| e.ts).min().unwrap_or(now_ms);
    let hours = ((now_ms - first_ts) as f64 / 3_600_000.0).max(0.0);
    let bac = grams / (weight_kg * r * 1000.0) * 100.0 - 0.015 * hours;
    bac.clamp(0.0, 0.4)
}
