//! CSV export of the entry log.

use chrono::DateTime;

use crate::db::Db;
use crate::entry::Entry;

/// Export options.
#[derive(Debug, Clone)]
pub struct CsvOptions {
    pub include_headers: bool,
}

impl Default for CsvOptions {
    fn default() -> Self {
        Self {
            include_headers: true,
        }
    }
}

const HEADERS: [&str; 13] = [
    "Date",
    "Time",
    "Beverage",
    "Standard Drinks",
    "Cost",
    "Intention",
    "Craving",
    "HALT Hungry",
    "HALT Angry",
    "HALT Lonely",
    "HALT Tired",
    "Alternative Action",
    "Notes",
];

/// Renders entries as CSV, in the order given.
pub fn entries_to_csv(entries: &[Entry], options: &CsvOptions) -> String {
    let mut lines: Vec<String> = Vec::with_capacity(entries.len() + 1);

    if options.include_headers {
        lines.push(join_row(HEADERS.iter().map(|h| (*h).to_owned())));
    }

    for entry in entries {
        let dt = DateTime::from_timestamp_millis(entry.ts).unwrap_or(DateTime::UNIX_EPOCH);
        lines.push(join_row(
            [
                dt.format("%Y-%m-%d").to_string(),
                dt.format("%H:%M:%S").to_string(),
                entry.kind.as_str().to_owned(),
                format!("{:.2}", entry.std_drinks),
                format!("{:.2}", entry.cost.unwrap_or(0.0)),
                entry.intention.as_str().to_owned(),
                entry.craving.to_string(),
                yes_no(entry.halt.hungry),
                yes_no(entry.halt.angry),
                yes_no(entry.halt.lonely),
                yes_no(entry.halt.tired),
                entry.alt_action.clone().unwrap_or_default(),
                entry.notes.clone().unwrap_or_default(),
            ]
            .into_iter(),
        ));
    }

    lines.join("\n")
}

/// Renders the whole database as CSV, newest entry first.
pub fn db_to_csv(db: &Db, options: &CsvOptions) -> String {
    let mut sorted = db.entries.clone();
    sorted.sort_by_key(|e| std::cmp::Reverse(e.ts));
    entries_to_csv(&sorted, options)
}

fn yes_no(b: bool) -> String {
    if b { "Yes" } else { "No" }.to_owned()
}

fn join_row(fields: impl Iterator<Item = String>) -> String {
    fields
        .map(|f| escape_csv_field(&f))
        .collect::<Vec<_>>()
        .join(",")
}

/// RFC-4180 field escaping: quote fields containing a comma, quote or
/// newline, doubling inner quotes.
fn escape_csv_field(value: &str) -> String {
    if value.contains(',') || value.contains('"') || value.contains('\n') {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_owned()
    }
}
