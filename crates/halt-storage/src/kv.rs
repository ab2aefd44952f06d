//! JSON layer over a [`Preferences`] backend, with debounced writes.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use serde::Serialize;
use serde::de::DeserializeOwned;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::error::{Result, StorageError};
use crate::prefs::Preferences;

/// Default quiet period for debounced writes.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(300);

/// JSON codec over a raw string backend.
///
/// Debounce timers are keyed per storage key and owned by this instance, so
/// two stores over different backends never interfere. Must be used from
/// within a Tokio runtime; the debounce path spawns timer tasks.
pub struct KvStore<P> {
    prefs: Arc<P>,
    timers: Arc<Mutex<HashMap<String, JoinHandle<()>>>>,
}

impl<P> Clone for KvStore<P> {
    fn clone(&self) -> Self {
        Self {
            prefs: Arc::clone(&self.prefs),
            timers: Arc::clone(&self.timers),
        }
    }
}

impl<P: Preferences + 'static> KvStore<P> {
    pub fn new(prefs: Arc<P>) -> Self {
        Self {
            prefs,
            timers: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Borrows the underlying backend.
    pub fn prefs(&self) -> &P {
        &self.prefs
    }

    /// Fetches and decodes `key`.
    ///
    /// A missing key or an undecodable stored value yields `default`
    /// silently; only backend failures propagate.
    pub async fn get_json<T: DeserializeOwned>(&self, key: &str, default: T) -> Result<T> {
        let Some(raw) = self.prefs.get(key).await? else {
            return Ok(default);
        };
        match serde_json::from_str(&raw) {
            Ok(value) => Ok(value),
            Err(e) => {
                debug!(key, error = %e, "undecodable stored value, using default");
                Ok(default)
            }
        }
    }

    /// Encodes and persists `value` immediately.
    pub async fn set_json<T: Serialize>(&self, key: &str, value: &T) -> Result<()> {
        let raw = serde_json::to_string(value)?;
        self.prefs.set(key, &raw).await
    }

    /// Schedules a write of `value` after `delay`, coalescing with any write
    /// already pending for the same key -- only the most recent value is
    /// persisted once the quiet period elapses.
    ///
    /// The value is serialized eagerly; a failure of the deferred backend
    /// write has no caller left to observe it and is logged and dropped.
    /// Callers that must observe write errors use [`set_json`](Self::set_json).
    pub fn set_json_debounced<T: Serialize>(
        &self,
        key: &str,
        value: &T,
        delay: Duration,
    ) -> Result<()> {
        let raw = serde_json::to_string(value)?;
        let prefs = Arc::clone(&self.prefs);
        let task_key = key.to_owned();

        let mut timers = self.lock_timers()?;
        // A finished timer left from an earlier write is reaped here; an
        // unfinished one is superseded.
        if let Some(old) = timers.remove(key) {
            old.abort();
        }
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            if let Err(e) = prefs.set(&task_key, &raw).await {
                warn!(key = %task_key, error = %e, "debounced write failed");
            }
        });
        timers.insert(key.to_owned(), handle);
        Ok(())
    }

    /// Drops any pending debounced write for `key` without persisting it.
    pub fn cancel(&self, key: &str) -> Result<()> {
        let mut timers = self.lock_timers()?;
        if let Some(handle) = timers.remove(key) {
            handle.abort();
            debug!(key, "pending debounced write cancelled");
        }
        Ok(())
    }

    fn lock_timers(&self) -> Result<MutexGuard<'_, HashMap<String, JoinHandle<()>>>> {
        self.timers
            .lock()
            .map_err(|e| StorageError::backend(format!("mutex poisoned: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prefs::MemoryPreferences;
    use pretty_assertions::assert_eq;
    use serde::{Deserialize, Serialize};

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Marker {
        n: i32,
    }

    fn kv() -> (Arc<MemoryPreferences>, KvStore<MemoryPreferences>) {
        let prefs = Arc::new(MemoryPreferences::new());
        let kv = KvStore::new(Arc::clone(&prefs));
        (prefs, kv)
    }

    #[tokio::test]
    async fn get_json_returns_default_on_missing_key() {
        let (_prefs, kv) = kv();
        let got: Marker = kv.get_json("missing", Marker { n: 7 }).await.unwrap();
        assert_eq!(got, Marker { n: 7 });
    }

    #[tokio::test]
    async fn get_json_returns_default_on_corrupt_value() {
        let (prefs, kv) = kv();
        prefs.seed("k", "not-json{");
        let got: Marker = kv.get_json("k", Marker { n: 7 }).await.unwrap();
        assert_eq!(got, Marker { n: 7 });
    }

    #[tokio::test]
    async fn set_json_persists_immediately() {
        let (prefs, kv) = kv();
        kv.set_json("k", &Marker { n: 1 }).await.unwrap();
        assert_eq!(prefs.get("k").await.unwrap().as_deref(), Some(r#"{"n":1}"#));
        let got: Marker = kv.get_json("k", Marker { n: 0 }).await.unwrap();
        assert_eq!(got, Marker { n: 1 });
    }

    #[tokio::test(start_paused = true)]
    async fn debounce_coalesces_rapid_writes() {
        let (prefs, kv) = kv();
        let delay = Duration::from_millis(100);

        kv.set_json_debounced("k", &Marker { n: 1 }, delay).unwrap();
        kv.set_json_debounced("k", &Marker { n: 2 }, delay).unwrap();

        // Nothing lands during the quiet period...
        tokio::time::sleep(Duration::from_millis(50)).await;
        assert_eq!(prefs.get("k").await.unwrap(), None);

        // ...then exactly one write, carrying the last value.
        tokio::time::sleep(Duration::from_millis(100)).await;
        assert_eq!(prefs.write_count(), 1);
        let got: Marker = kv.get_json("k", Marker { n: 0 }).await.unwrap();
        assert_eq!(got, Marker { n: 2 });
    }

    #[tokio::test(start_paused = true)]
    async fn debounce_timers_are_per_key() {
        let (prefs, kv) = kv();
        let delay = Duration::from_millis(100);

        kv.set_json_debounced("a", &Marker { n: 1 }, delay).unwrap();
        kv.set_json_debounced("b", &Marker { n: 2 }, delay).unwrap();

        tokio::time::sleep(Duration::from_millis(150)).await;
        assert_eq!(prefs.write_count(), 2);
        assert_eq!(
            kv.get_json::<Marker>("a", Marker { n: 0 }).await.unwrap().n,
            1
        );
        assert_eq!(
            kv.get_json::<Marker>("b", Marker { n: 0 }).await.unwrap().n,
            2
        );
    }

    #[tokio::test(start_paused = true)]
    async fn debounce_fires_again_after_quiet_period() {
        let (prefs, kv) = kv();
        let delay = Duration::from_millis(100);

        kv.set_json_debounced("k", &Marker { n: 1 }, delay).unwrap();
        tokio::time::sleep(Duration::from_millis(150)).await;

        kv.set_json_debounced("k", &Marker { n: 2 }, delay).unwrap();
        tokio::time::sleep(Duration::from_millis(150)).await;

        assert_eq!(prefs.write_count(), 2);
        let got: Marker = kv.get_json("k", Marker { n: 0 }).await.unwrap();
        assert_eq!(got, Marker { n: 2 });
    }

    #[tokio::test(start_paused = true)]
    async fn cancelled_write_never_lands() {
        let (prefs, kv) = kv();
        kv.set_json_debounced("k", &Marker { n: 1 }, Duration::from_millis(100))
            .unwrap();
        kv.cancel("k").unwrap();

        tokio::time::sleep(Duration::from_millis(200)).await;
        assert_eq!(prefs.write_count(), 0);
        assert_eq!(prefs.get("k").await.unwrap(), None);
    }

    #[test]
    fn default_debounce_matches_contract() {
        assert_eq!(DEFAULT_DEBOUNCE, Duration::from_millis(300));
    }
}
