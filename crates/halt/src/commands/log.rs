//! `halt log` -- record a drink.

use anyhow::{Result, bail};

use halt_core::bridge;
use halt_core::entry::NewEntry;

use crate::cli::LogArgs;
use crate::context::{RuntimeContext, now_ms};

pub async fn run(ctx: &RuntimeContext, args: &LogArgs) -> Result<()> {
    let std_drinks = match (args.std, args.volume, args.abv) {
        (Some(std), _, _) => std,
        (None, Some(volume), Some(abv)) => bridge::std_drinks_from_volume_abv(volume, abv),
        _ => bail!("specify either --std or both --volume and --abv"),
    };

    let store = ctx.open_store().await?;
    let entry = store.add_entry_returning(NewEntry {
        ts: args.ts.unwrap_or_else(now_ms),
        kind: args.kind,
        std_drinks,
        cost: args.cost,
        intention: args.intention,
        craving: args.craving,
        halt: bridge::halt_flags_from_tags(&args.halt),
        alt_action: args.alt.clone(),
        notes: args.notes.clone(),
    })?;
    store.flush().await?;

    println!("Logged {:.2} std drinks ({})", entry.std_drinks, entry.id);
    Ok(())
}
