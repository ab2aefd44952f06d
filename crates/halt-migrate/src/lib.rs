//! One-shot migration of legacy key-value data into the unified store.
//!
//! Old installations kept a drink list under `"drinks"` and a goals record
//! under `"goals"`. [`LegacyMigrator`] reads both once, converts every record
//! through [`halt_core::bridge`], inserts the results into the unified store,
//! and then retires the legacy keys.
//!
//! Failure semantics are at-most-one-attempt: a mid-run error is logged and
//! the run still ends in [`MigrationState::Done`], keeping whatever was
//! already inserted. There is no rollback and no retry within a process; a
//! run that failed leaves the legacy keys (and no completion marker) in
//! place, so the next process start attempts the migration again from the
//! original source.

use std::sync::{Arc, Mutex};

use tracing::{info, warn};

use halt_core::bridge::{legacy_drink_to_entry, legacy_goals_to_settings};
use halt_core::legacy::{LEGACY_DRINKS_KEY, LEGACY_GOALS_KEY, LegacyDrink, LegacyGoalsPatch};
use halt_storage::{KvStore, Preferences, Result, UnifiedStore};

/// Storage key marking that legacy data has been migrated.
pub const MIGRATED_MARKER_KEY: &str = "legacy_migrated";

/// Progress of a migrator instance. `Done` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MigrationState {
    Pending,
    Done,
}

/// What a migration run actually did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MigrationReport {
    /// Entries inserted into the unified store, including any inserted
    /// before a mid-run failure.
    pub entries_migrated: usize,
    /// Whether a goals record was applied to the settings.
    pub goals_migrated: bool,
}

/// One-shot legacy migration orchestrator.
///
/// Each instance owns its completion state; callers wanting process-wide
/// suppression hold a single instance. The state is only set once a run
/// finishes -- invoking the same instance concurrently before the first run
/// completes can insert duplicates, which is acceptable under the
/// single-threaded scheduling this layer assumes.
pub struct LegacyMigrator<P> {
    kv: KvStore<P>,
    state: Mutex<MigrationState>,
}

impl<P: Preferences + 'static> LegacyMigrator<P> {
    pub fn new(prefs: Arc<P>) -> Self {
        Self {
            kv: KvStore::new(prefs),
            state: Mutex::new(MigrationState::Pending),
        }
    }

    /// Current state of this instance.
    pub fn state(&self) -> MigrationState {
        *self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Runs the migration at most once per instance.
    ///
    /// A second call is a no-op. Errors are absorbed here: the run is logged
    /// and still transitions to `Done` (forward progress over rollback).
    pub async fn run<S: UnifiedStore>(&self, store: &S) -> MigrationReport {
        if self.state() == MigrationState::Done {
            return MigrationReport::default();
        }

        let mut report = MigrationReport::default();
        match self.try_migrate(store, &mut report).await {
            Ok(()) => {
                if report.entries_migrated > 0 || report.goals_migrated {
                    info!(
                        entries = report.entries_migrated,
                        goals = report.goals_migrated,
                        "legacy migration completed"
                    );
                }
            }
            Err(e) => {
                warn!(error = %e, "legacy migration failed; entries already inserted are kept");
            }
        }

        *self.state.lock().unwrap_or_else(|e| e.into_inner()) = MigrationState::Done;
        report
    }

    async fn try_migrate<S: UnifiedStore>(
        &self,
        store: &S,
        report: &mut MigrationReport,
    ) -> Result<()> {
        // A marker persisted by an earlier process means the legacy keys are
        // already retired.
        if self.kv.get_json(MIGRATED_MARKER_KEY, false).await? {
            return Ok(());
        }

        // Both legacy reads are issued before either resolves.
        let (drinks, goals) = tokio::join!(
            self.kv
                .get_json::<Vec<LegacyDrink>>(LEGACY_DRINKS_KEY, Vec::new()),
            self.kv
                .get_json::<LegacyGoalsPatch>(LEGACY_GOALS_KEY, LegacyGoalsPatch::default()),
        );
        let drinks = drinks?;
        let goals = goals?;

        if drinks.is_empty() && goals.is_empty() {
            // Nothing to migrate, and nothing written either.
            return Ok(());
        }

        info!(drinks = drinks.len(), "migrating legacy data into the unified store");

        // Sequential inserts, in array order; the store assigns ids.
        for drink in &drinks {
            store.add_entry(legacy_drink_to_entry(drink))?;
            report.entries_migrated += 1;
        }

        if !goals.is_empty() {
            let merged = goals.merged_over_defaults();
            store.set_settings(legacy_goals_to_settings(&merged))?;
            report.goals_migrated = true;
        }

        // Retire the legacy source so later cold starts cannot re-insert.
        self.kv.set_json(MIGRATED_MARKER_KEY, &true).await?;
        self.kv.prefs().remove(LEGACY_DRINKS_KEY).await?;
        self.kv.prefs().remove(LEGACY_GOALS_KEY).await?;
        Ok(())
    }
}
