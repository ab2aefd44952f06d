//! `halt wipe` -- delete all data.

use anyhow::{Result, bail};

use crate::cli::WipeArgs;
use crate::context::RuntimeContext;

pub async fn run(ctx: &RuntimeContext, args: &WipeArgs) -> Result<()> {
    if !args.yes {
        bail!("this deletes every entry and setting; pass --yes to confirm");
    }
    let store = ctx.open_store().await?;
    store.wipe_all(true)?;
    store.flush().await?;
    println!("All data wiped.");
    Ok(())
}
