//! Persistence layer for the halt system.
//!
//! Provides the [`Preferences`] backend trait with in-memory and file
//! implementations, the JSON [`KvStore`] adapter with debounced writes, and
//! the unified [`HaltStore`] the rest of the system mutates through.

pub mod dbmigrate;
pub mod error;
pub mod kv;
pub mod prefs;
pub mod store;
pub mod traits;

// Re-exports for convenience.
pub use error::{Result, StorageError};
pub use kv::KvStore;
pub use prefs::{FilePreferences, MemoryPreferences, Preferences};
pub use store::HaltStore;
pub use traits::UnifiedStore;
