//! `halt undo` -- restore the most recently deleted entry.

use anyhow::Result;

use crate::context::RuntimeContext;

pub async fn run(ctx: &RuntimeContext) -> Result<()> {
    let store = ctx.open_store().await?;
    let restored = store.undo()?;
    store.flush().await?;
    if restored {
        println!("Entry restored.");
    } else {
        println!("Nothing to undo.");
    }
    Ok(())
}
