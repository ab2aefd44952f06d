//! Entry structs -- the central domain records of the unified schema.
//!
//! Serialization uses camelCase field names so the persisted JSON matches the
//! historical on-disk shape byte for byte.

use serde::{Deserialize, Serialize};

use crate::enums::{DrinkKind, Intention};

/// Parallel boolean flags for the HALT trigger taxonomy
/// (Hungry / Angry / Lonely / Tired).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HaltFlags {
    #[serde(rename = "H", default)]
    pub hungry: bool,

    #[serde(rename = "A", default)]
    pub angry: bool,

    #[serde(rename = "L", default)]
    pub lonely: bool,

    #[serde(rename = "T", default)]
    pub tired: bool,
}

impl HaltFlags {
    /// Returns `true` if any trigger is set.
    pub fn any(&self) -> bool {
        self.hungry || self.angry || self.lonely || self.tired
    }

    /// Number of triggers set.
    pub fn count(&self) -> u8 {
        u8::from(self.hungry) + u8::from(self.angry) + u8::from(self.lonely) + u8::from(self.tired)
    }
}

/// One logged consumption event.
///
/// `std_drinks` is the only measure of quantity -- volume and ABV are
/// collapsed into it at logging/migration time and cannot be recovered
/// exactly (see [`crate::bridge::entry_to_legacy_drink`]).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Entry {
    #[serde(default)]
    pub id: String,

    /// Event time, epoch milliseconds.
    #[serde(default)]
    pub ts: i64,

    #[serde(default)]
    pub kind: DrinkKind,

    #[serde(default)]
    pub std_drinks: f64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cost: Option<f64>,

    #[serde(default)]
    pub intention: Intention,

    /// Self-reported craving strength, 0-10. Not validated.
    #[serde(default)]
    pub craving: u8,

    #[serde(default)]
    pub halt: HaltFlags,

    /// Alternative action taken (or considered) instead of drinking.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alt_action: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,

    /// Set when the entry was edited after creation, epoch milliseconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub edited_at: Option<i64>,
}

/// An [`Entry`] before the store has assigned it an id.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewEntry {
    #[serde(default)]
    pub ts: i64,

    #[serde(default)]
    pub kind: DrinkKind,

    #[serde(default)]
    pub std_drinks: f64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cost: Option<f64>,

    #[serde(default)]
    pub intention: Intention,

    #[serde(default)]
    pub craving: u8,

    #[serde(default)]
    pub halt: HaltFlags,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alt_action: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl NewEntry {
    /// Promotes this record to a full [`Entry`] with the given id.
    pub fn into_entry(self, id: impl Into<String>) -> Entry {
        Entry {
            id: id.into(),
            ts: self.ts,
            kind: self.kind,
            std_drinks: self.std_drinks,
            cost: self.cost,
            intention: self.intention,
            craving: self.craving,
            halt: self.halt,
            alt_action: self.alt_action,
            notes: self.notes,
            edited_at: None,
        }
    }
}

/// Typed partial-update struct for entries.
///
/// Only `Some` fields are applied; `None` fields are left unchanged. The
/// double-`Option` fields distinguish "leave as is" from "clear".
#[derive(Debug, Clone, Default)]
pub struct EntryPatch {
    pub ts: Option<i64>,
    pub kind: Option<DrinkKind>,
    pub std_drinks: Option<f64>,
    pub cost: Option<Option<f64>>,
    pub intention: Option<Intention>,
    pub craving: Option<u8>,
    pub halt: Option<HaltFlags>,
    pub alt_action: Option<Option<String>>,
    pub notes: Option<Option<String>>,
}

impl EntryPatch {
    /// Applies every `Some` field to the entry. Does not stamp `edited_at`;
    /// the store does that so reads stay side-effect free.
    pub fn apply(&self, entry: &mut Entry) {
        if let Some(ts) = self.ts {
            entry.ts = ts;
        }
        if let Some(kind) = self.kind {
            entry.kind = kind;
        }
        if let Some(std_drinks) = self.std_drinks {
            entry.std_drinks = std_drinks;
        }
        if let Some(ref cost) = self.cost {
            entry.cost = *cost;
        }
        if let Some(intention) = self.intention {
            entry.intention = intention;
        }
        if let Some(craving) = self.craving {
            entry.craving = craving;
        }
        if let Some(halt) = self.halt {
            entry.halt = halt;
        }
        if let Some(ref alt_action) = self.alt_action {
            entry.alt_action = alt_action.clone();
        }
        if let Some(ref notes) = self.notes {
            entry.notes = notes.clone();
        }
    }

    /// Returns `true` if no field is set.
    pub fn is_empty(&self) -> bool {
        self.ts.is_none()
            && self.kind.is_none()
            && self.std_drinks.is_none()
            && self.cost.is_none()
            && self.intention.is_none()
            && self.craving.is_none()
            && self.halt.is_none()
            && self.alt_action.is_none()
            && self.notes.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn entry_serializes_camel_case() {
        let entry = NewEntry {
            ts: 1_700_000_000_000,
            std_drinks: 1.5,
            alt_action: Some("walk".into()),
            ..NewEntry::default()
        }
        .into_entry("e1");

        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["stdDrinks"], 1.5);
        assert_eq!(json["altAction"], "walk");
        assert_eq!(json["halt"]["H"], false);
        // Unset optionals are omitted entirely.
        assert!(json.get("notes").is_none());
        assert!(json.get("editedAt").is_none());
    }

    #[test]
    fn entry_deserializes_with_missing_fields() {
        let entry: Entry = serde_json::from_str(r#"{"ts": 1, "stdDrinks": 2.0}"#).unwrap();
        assert_eq!(entry.ts, 1);
        assert_eq!(entry.std_drinks, 2.0);
        assert_eq!(entry.kind, crate::enums::DrinkKind::Custom);
        assert_eq!(entry.halt, HaltFlags::default());
    }

    #[test]
    fn halt_flags_single_letter_keys() {
        let flags = HaltFlags {
            hungry: true,
            tired: true,
            ..HaltFlags::default()
        };
        let json = serde_json::to_string(&flags).unwrap();
        assert_eq!(json, r#"{"H":true,"A":false,"L":false,"T":true}"#);
        assert_eq!(flags.count(), 2);
        assert!(flags.any());
    }

    #[test]
    fn patch_applies_only_set_fields() {
        let mut entry = NewEntry {
            ts: 10,
            std_drinks: 1.0,
            notes: Some("keep".into()),
            ..NewEntry::default()
        }
        .into_entry("e1");

        let patch = EntryPatch {
            std_drinks: Some(2.5),
            cost: Some(Some(7.0)),
            ..EntryPatch::default()
        };
        patch.apply(&mut entry);

        assert_eq!(entry.std_drinks, 2.5);
        assert_eq!(entry.cost, Some(7.0));
        assert_eq!(entry.ts, 10);
        assert_eq!(entry.notes.as_deref(), Some("keep"));
    }

    #[test]
    fn patch_can_clear_optional_fields() {
        let mut entry = NewEntry {
            cost: Some(4.0),
            ..NewEntry::default()
        }
        .into_entry("e1");

        let patch = EntryPatch {
            cost: Some(None),
            ..EntryPatch::default()
        };
        patch.apply(&mut entry);
        assert_eq!(entry.cost, None);
    }

    #[test]
    fn empty_patch_is_empty() {
        assert!(EntryPatch::default().is_empty());
        assert!(!EntryPatch {
            craving: Some(3),
            ..EntryPatch::default()
        }
        .is_empty());
    }
}
