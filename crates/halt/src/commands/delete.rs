//! `halt delete` -- move an entry to the trash.

use anyhow::Result;

use crate::cli::DeleteArgs;
use crate::context::RuntimeContext;

pub async fn run(ctx: &RuntimeContext, args: &DeleteArgs) -> Result<()> {
    let store = ctx.open_store().await?;
    store.delete_entry(&args.id)?;
    store.flush().await?;
    println!("Moved {} to trash (undo with `halt undo`)", args.id);
    Ok(())
}
