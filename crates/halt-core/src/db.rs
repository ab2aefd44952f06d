//! The persisted unified database record.

use serde::{Deserialize, Serialize};

use crate::entry::Entry;
use crate::settings::Settings;

/// Current on-disk schema version.
pub const CURRENT_DB_VERSION: u32 = 1;

/// Storage key the unified database is persisted under.
pub const DB_KEY: &str = "halt.db";

/// How long a delete can be undone, in milliseconds.
pub const UNDO_WINDOW_MS: i64 = 10 * 60_000;

/// A deleted entry, retained so the delete can be undone.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrashedEntry {
    pub id: String,
    pub snapshot: Entry,
    pub deleted_at: i64,
}

/// The undoable action kinds. Deletion is currently the only one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UndoAction {
    Delete,
}

/// Token describing the most recent undoable action.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UndoToken {
    pub action: UndoAction,
    pub entry_id: String,
    pub expires_at: i64,
}

/// Bookkeeping that travels with the database but is not entry data.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DbMeta {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_undo: Option<UndoToken>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reminder_suppressed_until: Option<i64>,
}

/// The whole unified database: everything the application persists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Db {
    #[serde(default)]
    pub version: u32,

    #[serde(default)]
    pub entries: Vec<Entry>,

    #[serde(default)]
    pub trash: Vec<TrashedEntry>,

    #[serde(default)]
    pub settings: Settings,

    #[serde(default)]
    pub meta: DbMeta,
}

impl Default for Db {
    fn default() -> Self {
        Self {
            version: CURRENT_DB_VERSION,
            entries: Vec::new(),
            trash: Vec::new(),
            settings: Settings::default(),
            meta: DbMeta::default(),
        }
    }
}

impl Db {
    /// Looks up an entry by id.
    pub fn entry(&self, id: &str) -> Option<&Entry> {
        self.entries.iter().find(|e| e.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn default_db_is_empty_at_current_version() {
        let db = Db::default();
        assert_eq!(db.version, CURRENT_DB_VERSION);
        assert!(db.entries.is_empty());
        assert!(db.trash.is_empty());
        assert!(db.meta.last_undo.is_none());
    }

    #[test]
    fn db_roundtrips_through_json() {
        let mut db = Db::default();
        db.entries.push(
            crate::entry::NewEntry {
                ts: 42,
                std_drinks: 1.0,
                ..Default::default()
            }
            .into_entry("e1"),
        );
        let json = serde_json::to_string(&db).unwrap();
        let back: Db = serde_json::from_str(&json).unwrap();
        assert_eq!(back, db);
    }

    #[test]
    fn db_deserializes_from_bare_object() {
        // Old or hand-edited blobs may omit almost everything.
        let db: Db = serde_json::from_str(r#"{"entries": []}"#).unwrap();
        assert_eq!(db.version, 0);
        assert_eq!(db.settings, crate::settings::Settings::default());
    }
}
