//! The unified-store mutation seam.
//!
//! The migration orchestrator depends on this trait rather than on
//! [`HaltStore`](crate::store::HaltStore) directly so tests can substitute
//! counting or failing implementations.

use halt_core::entry::NewEntry;
use halt_core::settings::SettingsPatch;

use crate::error::Result;

/// Mutation interface of the unified store.
pub trait UnifiedStore {
    /// Inserts one entry. The store assigns the id.
    fn add_entry(&self, entry: NewEntry) -> Result<()>;

    /// Applies a partial settings update.
    fn set_settings(&self, patch: SettingsPatch) -> Result<()>;
}
