//! `halt migrate` -- bring legacy key-value data into the unified store.

use std::sync::Arc;

use anyhow::Result;

use halt_migrate::LegacyMigrator;
use halt_storage::HaltStore;

use crate::context::RuntimeContext;

pub async fn run(ctx: &RuntimeContext) -> Result<()> {
    let prefs = ctx.open_prefs().await?;
    let store = HaltStore::open(Arc::clone(&prefs)).await?;
    let migrator = LegacyMigrator::new(prefs);

    let report = migrator.run(&store).await;
    store.flush().await?;

    if report.entries_migrated == 0 && !report.goals_migrated {
        println!("Nothing to migrate.");
    } else {
        println!(
            "Migrated {} entries{}.",
            report.entries_migrated,
            if report.goals_migrated { " and goals" } else { "" }
        );
    }
    Ok(())
}
