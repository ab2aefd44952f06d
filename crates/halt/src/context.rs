//! Runtime context for command execution.

use std::env;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use tracing::debug;

use halt_storage::{FilePreferences, HaltStore};

use crate::cli::GlobalArgs;

/// Directory name holding the preference files.
const DATA_DIR_NAME: &str = ".halt";

/// Runtime context passed to every command handler.
///
/// Constructed once in `main` after CLI parsing, before command dispatch.
#[derive(Debug)]
pub struct RuntimeContext {
    /// Resolved data directory.
    pub data_dir: PathBuf,

    /// Verbose output.
    pub verbose: bool,
}

impl RuntimeContext {
    /// Builds a context from parsed global arguments.
    ///
    /// Resolution order: `--data` flag (or `HALT_DATA`, handled by clap) >
    /// walk-up discovery of an existing `.halt` directory > `.halt` in the
    /// current directory.
    pub fn from_global_args(global: &GlobalArgs) -> Self {
        let data_dir = global
            .data
            .clone()
            .or_else(Self::find_data_dir)
            .unwrap_or_else(|| PathBuf::from(DATA_DIR_NAME));
        debug!(?data_dir, "resolved data directory");
        Self {
            data_dir,
            verbose: global.verbose,
        }
    }

    /// Walks up from the current directory looking for an existing `.halt`.
    fn find_data_dir() -> Option<PathBuf> {
        let mut dir = env::current_dir().ok()?;
        loop {
            let candidate = dir.join(DATA_DIR_NAME);
            if candidate.is_dir() {
                return Some(candidate);
            }
            if !dir.pop() {
                break;
            }
        }
        None
    }

    /// Opens the preference backend under the resolved data directory.
    pub async fn open_prefs(&self) -> Result<Arc<FilePreferences>> {
        Ok(Arc::new(FilePreferences::open(self.data_dir.clone()).await?))
    }

    /// Opens the unified store under the resolved data directory.
    pub async fn open_store(&self) -> Result<HaltStore<FilePreferences>> {
        Ok(HaltStore::open(self.open_prefs().await?).await?)
    }
}

/// Current wall-clock time, epoch milliseconds.
pub fn now_ms() -> i64 {
    chrono::Utc::now().timestamp_millis()
}
