//! [`HaltStore`] -- the unified in-memory store with JSON persistence.

use std::sync::{Arc, Mutex, MutexGuard};

use tracing::{debug, info};
use uuid::Uuid;

use halt_core::db::{
    CURRENT_DB_VERSION, DB_KEY, Db, TrashedEntry, UNDO_WINDOW_MS, UndoAction, UndoToken,
};
use halt_core::entry::{Entry, EntryPatch, NewEntry};
use halt_core::settings::{Settings, SettingsPatch};
use halt_core::stats::{self, Stats};

use crate::dbmigrate::migrate_db;
use crate::error::{Result, StorageError};
use crate::kv::{DEFAULT_DEBOUNCE, KvStore};
use crate::prefs::Preferences;
use crate::traits::UnifiedStore;

/// The single mutable store instance backing the application.
///
/// All state lives in one [`Db`] value behind a mutex; every mutation
/// schedules a debounced JSON write of the whole record under [`DB_KEY`].
/// Must live inside a Tokio runtime (the persistence path spawns timers).
pub struct HaltStore<P> {
    kv: KvStore<P>,
    db: Mutex<Db>,
}

impl<P: Preferences + 'static> HaltStore<P> {
    /// Opens the store over the given backend, reading any persisted
    /// database.
    ///
    /// Absent or undecodable state falls back to defaults; a version
    /// mismatch is normalized by [`migrate_db`].
    pub async fn open(prefs: Arc<P>) -> Result<Self> {
        let kv = KvStore::new(prefs);
        let mut db: Db = kv.get_json(DB_KEY, Db::default()).await?;
        if db.version != CURRENT_DB_VERSION {
            debug!(from = db.version, to = CURRENT_DB_VERSION, "migrating persisted database");
            migrate_db(&mut db, CURRENT_DB_VERSION);
        }
        info!(entries = db.entries.len(), "unified store loaded");
        Ok(Self {
            kv,
            db: Mutex::new(db),
        })
    }

    // -- Mutations -----------------------------------------------------------

    /// Inserts an entry, assigning a fresh id, and returns the stored record.
    pub fn add_entry_returning(&self, entry: NewEntry) -> Result<Entry> {
        let entry = entry.into_entry(Uuid::new_v4().to_string());
        let mut db = self.lock_db()?;
        db.entries.push(entry.clone());
        self.persist(&db)?;
        debug!(id = %entry.id, std_drinks = entry.std_drinks, "entry added");
        Ok(entry)
    }

    /// Applies a partial update to an entry and stamps `edited_at`.
    pub fn edit_entry(&self, id: &str, patch: &EntryPatch) -> Result<()> {
        let mut db = self.lock_db()?;
        let now = now_ms();
        let entry = db
            .entries
            .iter_mut()
            .find(|e| e.id == id)
            .ok_or_else(|| StorageError::not_found("entry", id))?;
        patch.apply(entry);
        entry.edited_at = Some(now);
        self.persist(&db)
    }

    /// Moves an entry to the trash and arms the undo token.
    pub fn delete_entry(&self, id: &str) -> Result<()> {
        let mut db = self.lock_db()?;
        let idx = db
            .entries
            .iter()
            .position(|e| e.id == id)
            .ok_or_else(|| StorageError::not_found("entry", id))?;
        let snapshot = db.entries.remove(idx);
        let now = now_ms();
        db.trash.push(TrashedEntry {
            id: id.to_owned(),
            snapshot,
            deleted_at: now,
        });
        db.meta.last_undo = Some(UndoToken {
            action: UndoAction::Delete,
            entry_id: id.to_owned(),
            expires_at: now + UNDO_WINDOW_MS,
        });
        self.persist(&db)?;
        debug!(id, "entry moved to trash");
        Ok(())
    }

    /// Restores the most recently deleted entry if the undo window is still
    /// open. Returns `true` if something was restored.
    pub fn undo(&self) -> Result<bool> {
        let mut db = self.lock_db()?;
        let Some(token) = db.meta.last_undo.clone() else {
            return Ok(false);
        };
        if now_ms() > token.expires_at {
            db.meta.last_undo = None;
            self.persist(&db)?;
            return Ok(false);
        }
        let Some(pos) = db.trash.iter().position(|t| t.id == token.entry_id) else {
            db.meta.last_undo = None;
            self.persist(&db)?;
            return Ok(false);
        };
        let trashed = db.trash.remove(pos);
        db.entries.push(trashed.snapshot);
        db.meta.last_undo = None;
        self.persist(&db)?;
        debug!(id = %token.entry_id, "delete undone");
        Ok(true)
    }

    /// Applies a partial settings update.
    pub fn set_settings_patch(&self, patch: &SettingsPatch) -> Result<()> {
        let mut db = self.lock_db()?;
        patch.apply(&mut db.settings);
        self.persist(&db)
    }

    /// Suppresses reminder prompts until the given time.
    pub fn dismiss_reminders_until(&self, ts_ms: i64) -> Result<()> {
        let mut db = self.lock_db()?;
        db.meta.reminder_suppressed_until = Some(ts_ms);
        self.persist(&db)
    }

    /// Clears everything back to defaults. No-op unless `confirm` is true.
    pub fn wipe_all(&self, confirm: bool) -> Result<()> {
        if !confirm {
            return Ok(());
        }
        let mut db = self.lock_db()?;
        *db = Db::default();
        self.persist(&db)?;
        info!("unified store wiped");
        Ok(())
    }

    // -- Reads ---------------------------------------------------------------

    /// Snapshot of all entries.
    pub fn entries(&self) -> Result<Vec<Entry>> {
        Ok(self.lock_db()?.entries.clone())
    }

    /// Snapshot of the settings record.
    pub fn settings(&self) -> Result<Settings> {
        Ok(self.lock_db()?.settings.clone())
    }

    /// Snapshot of the whole database.
    pub fn db_snapshot(&self) -> Result<Db> {
        Ok(self.lock_db()?.clone())
    }

    /// Derived figures over the current log.
    pub fn stats(&self, now_ms: i64) -> Result<Stats> {
        Ok(stats::compute_stats(&self.lock_db()?.entries, now_ms))
    }

    /// Standard drinks logged on the day containing `now_ms`.
    pub fn today_total(&self, now_ms: i64) -> Result<f64> {
        Ok(stats::today_total(&self.lock_db()?.entries, now_ms))
    }

    // -- Lifecycle -----------------------------------------------------------

    /// Cancels any pending debounced write and persists the current state
    /// immediately. Short-lived processes call this before exit.
    pub async fn flush(&self) -> Result<()> {
        self.kv.cancel(DB_KEY)?;
        let snapshot = self.db_snapshot()?;
        self.kv.set_json(DB_KEY, &snapshot).await
    }

    fn persist(&self, db: &Db) -> Result<()> {
        self.kv.set_json_debounced(DB_KEY, db, DEFAULT_DEBOUNCE)
    }

    fn lock_db(&self) -> Result<MutexGuard<'_, Db>> {
        self.db
            .lock()
            .map_err(|e| StorageError::backend(format!("mutex poisoned: {e}")))
    }
}

impl<P: Preferences + 'static> UnifiedStore for HaltStore<P> {
    fn add_entry(&self, entry: NewEntry) -> Result<()> {
        self.add_entry_returning(entry).map(|_| ())
    }

    fn set_settings(&self, patch: SettingsPatch) -> Result<()> {
        self.set_settings_patch(&patch)
    }
}

fn now_ms() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prefs::MemoryPreferences;
    use pretty_assertions::assert_eq;

    async fn test_store() -> (Arc<MemoryPreferences>, HaltStore<MemoryPreferences>) {
        let prefs = Arc::new(MemoryPreferences::new());
        let store = HaltStore::open(Arc::clone(&prefs)).await.unwrap();
        (prefs, store)
    }

    fn sample_entry(std_drinks: f64) -> NewEntry {
        NewEntry {
            ts: 1_700_000_000_000,
            std_drinks,
            ..NewEntry::default()
        }
    }

    #[tokio::test]
    async fn add_entry_assigns_unique_ids() {
        let (_prefs, store) = test_store().await;
        let a = store.add_entry_returning(sample_entry(1.0)).unwrap();
        let b = store.add_entry_returning(sample_entry(2.0)).unwrap();
        assert_ne!(a.id, b.id);
        assert_eq!(store.entries().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn edit_entry_stamps_edited_at() {
        let (_prefs, store) = test_store().await;
        let entry = store.add_entry_returning(sample_entry(1.0)).unwrap();
        assert!(entry.edited_at.is_none());

        let patch = EntryPatch {
            std_drinks: Some(3.0),
            ..EntryPatch::default()
        };
        store.edit_entry(&entry.id, &patch).unwrap();

        let stored = &store.entries().unwrap()[0];
        assert_eq!(stored.std_drinks, 3.0);
        assert!(stored.edited_at.is_some());
    }

    #[tokio::test]
    async fn edit_unknown_entry_is_not_found() {
        let (_prefs, store) = test_store().await;
        let err = store
            .edit_entry("nope", &EntryPatch::default())
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn delete_then_undo_restores_entry() {
        let (_prefs, store) = test_store().await;
        let entry = store.add_entry_returning(sample_entry(1.0)).unwrap();

        store.delete_entry(&entry.id).unwrap();
        assert!(store.entries().unwrap().is_empty());
        assert_eq!(store.db_snapshot().unwrap().trash.len(), 1);

        assert!(store.undo().unwrap());
        let entries = store.entries().unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].id, entry.id);
        assert!(store.db_snapshot().unwrap().trash.is_empty());
    }

    #[tokio::test]
    async fn undo_without_token_is_noop() {
        let (_prefs, store) = test_store().await;
        assert!(!store.undo().unwrap());
    }

    #[tokio::test]
    async fn wipe_requires_confirmation() {
        let (_prefs, store) = test_store().await;
        store.add_entry_returning(sample_entry(1.0)).unwrap();

        store.wipe_all(false).unwrap();
        assert_eq!(store.entries().unwrap().len(), 1);

        store.wipe_all(true).unwrap();
        assert!(store.entries().unwrap().is_empty());
    }

    #[tokio::test]
    async fn settings_patch_through_trait() {
        let (_prefs, store) = test_store().await;
        let patch = SettingsPatch {
            daily_goal_drinks: Some(2.0),
            ..SettingsPatch::default()
        };
        UnifiedStore::set_settings(&store, patch).unwrap();
        assert_eq!(store.settings().unwrap().daily_goal_drinks, 2.0);
    }

    #[tokio::test]
    async fn flush_persists_and_survives_reopen() {
        let (prefs, store) = test_store().await;
        store.add_entry_returning(sample_entry(1.5)).unwrap();
        store
            .set_settings_patch(&SettingsPatch {
                monthly_budget: Some(100.0),
                ..SettingsPatch::default()
            })
            .unwrap();
        store.flush().await.unwrap();

        let reopened = HaltStore::open(prefs).await.unwrap();
        assert_eq!(reopened.entries().unwrap().len(), 1);
        assert_eq!(reopened.settings().unwrap().monthly_budget, 100.0);
    }

    #[tokio::test]
    async fn open_normalizes_old_version() {
        let prefs = Arc::new(MemoryPreferences::new());
        prefs.seed(DB_KEY, r#"{"entries": [], "version": 0}"#);
        let store = HaltStore::open(prefs).await.unwrap();
        assert_eq!(store.db_snapshot().unwrap().version, CURRENT_DB_VERSION);
    }

    #[tokio::test]
    async fn open_tolerates_corrupt_blob() {
        let prefs = Arc::new(MemoryPreferences::new());
        prefs.seed(DB_KEY, "definitely not json");
        let store = HaltStore::open(prefs).await.unwrap();
        assert!(store.entries().unwrap().is_empty());
    }
}
