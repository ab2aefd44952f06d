//! `halt list` -- show logged entries, newest first.

use anyhow::Result;
use chrono::DateTime;

use crate::cli::ListArgs;
use crate::context::RuntimeContext;

pub async fn run(ctx: &RuntimeContext, args: &ListArgs) -> Result<()> {
    let store = ctx.open_store().await?;
    let mut entries = store.entries()?;
    entries.sort_by_key(|e| std::cmp::Reverse(e.ts));

    if entries.is_empty() {
        println!("No entries logged yet.");
        return Ok(());
    }

    let total = entries.len();
    for entry in entries.iter().take(args.limit) {
        let dt = DateTime::from_timestamp_millis(entry.ts).unwrap_or(DateTime::UNIX_EPOCH);
        let mut line = format!(
            "{}  {:>5.2} std  {:<8} {:<10} craving {:>2}",
            dt.format("%Y-%m-%d %H:%M"),
            entry.std_drinks,
            entry.kind.as_str(),
            entry.intention.as_str(),
            entry.craving,
        );
        if entry.halt.any() {
            line.push_str(&format!("  HALT[{}]", halt_core::bridge::halt_tags_from_flags(&entry.halt).join(",")));
        }
        if let Some(alt) = &entry.alt_action {
            line.push_str(&format!("  alt: {alt}"));
        }
        line.push_str(&format!("  {}", entry.id));
        println!("{line}");
    }

    if total > args.limit {
        println!("... and {} more (use --limit)", total - args.limit);
    }
    Ok(())
}
