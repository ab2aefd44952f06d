//! `halt export` -- CSV export of the log.

use anyhow::Result;

use halt_core::export::{CsvOptions, db_to_csv};

use crate::cli::ExportArgs;
use crate::context::RuntimeContext;

pub async fn run(ctx: &RuntimeContext, args: &ExportArgs) -> Result<()> {
    let store = ctx.open_store().await?;
    let csv = db_to_csv(&store.db_snapshot()?, &CsvOptions {
        include_headers: !args.no_headers,
    });

    match &args.output {
        Some(path) => {
            tokio::fs::write(path, csv.as_bytes()).await?;
            println!("Wrote {}", path.display());
        }
        None => println!("{csv}"),
    }
    Ok(())
}
