//! Aggregations over the entry log: weekly buckets, a 30-day line,
//! alcohol-free streaks and monthly spend.
//!
//! All day bucketing is UTC-based; `now` is always passed in explicitly so
//! results are reproducible.

use std::collections::{BTreeMap, HashMap};

use chrono::{DateTime, Datelike, Days, NaiveDate, Utc};

use crate::entry::Entry;

const DAY_MS: i64 = 86_400_000;

/// How far back the streak scan looks, in days.
const STREAK_SCAN_DAYS: i64 = 1000;

/// UTC midnight of the day containing `ts_ms`, epoch milliseconds.
pub fn start_of_day(ts_ms: i64) -> i64 {
    ts_ms.div_euclid(DAY_MS) * DAY_MS
}

/// Whether two timestamps fall on the same UTC day.
pub fn is_same_day(a_ms: i64, b_ms: i64) -> bool {
    start_of_day(a_ms) == start_of_day(b_ms)
}

fn date_of(ts_ms: i64) -> NaiveDate {
    DateTime::<Utc>::from_timestamp_millis(ts_ms)
        .unwrap_or(DateTime::UNIX_EPOCH)
        .date_naive()
}

/// Monday of the week containing `ts_ms`.
fn week_start(ts_ms: i64) -> NaiveDate {
    let date = date_of(ts_ms);
    date - Days::new(u64::from(date.weekday().num_days_from_monday()))
}

fn is_same_month(a_ms: i64, b_ms: i64) -> bool {
    let a = date_of(a_ms);
    let b = date_of(b_ms);
    a.year() == b.year() && a.month() == b.month()
}

/// Totals for one Monday-to-Sunday week.
#[derive(Debug, Clone, PartialEq)]
pub struct WeekBucket {
    /// Monday of the week.
    pub start: NaiveDate,
    pub std_drinks: f64,
    pub cost: f64,
}

/// One point of the 30-day line.
#[derive(Debug, Clone, PartialEq)]
pub struct DayPoint {
    pub date: NaiveDate,
    pub std_drinks: f64,
}

/// All derived figures for the dashboard.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Stats {
    /// Weeks with at least one entry, oldest first.
    pub weekly: Vec<WeekBucket>,
    /// Daily totals for the 30 days ending at `now`, oldest first. Always 30
    /// points, zero-filled.
    pub line30: Vec<DayPoint>,
    /// Consecutive alcohol-free days ending today.
    pub current_af_streak: u32,
    /// Longest alcohol-free run in the scan window.
    pub longest_af_streak: u32,
    /// Cost sum of entries in the current calendar month.
    pub monthly_spend: f64,
}

/// Sum of standard drinks logged on the same UTC day as `now_ms`.
pub fn today_total(entries: &[Entry], now_ms: i64) -> f64 {
    entries
        .iter()
        .filter(|e| is_same_day(e.ts, now_ms))
        .map(|e| e.std_drinks)
        .sum()
}

/// Computes all derived figures in one pass over the log.
pub fn compute_stats(entries: &[Entry], now_ms: i64) -> Stats {
    // Weekly buckets, keyed by Monday.
    let mut weekly_map: BTreeMap<NaiveDate, (f64, f64)> = BTreeMap::new();
    for e in entries {
        let slot = weekly_map.entry(week_start(e.ts)).or_insert((0.0, 0.0));
        slot.0 += e.std_drinks;
        slot.1 += e.cost.unwrap_or(0.0);
    }
    let weekly = weekly_map
        .into_iter()
        .map(|(start, (std_drinks, cost))| WeekBucket {
            start,
            std_drinks,
            cost,
        })
        .collect();

    // 30-day line ending today, zero-filled.
    let today0 = start_of_day(now_ms);
    let mut per_day: BTreeMap<i64, f64> =
        (0..30).map(|i| (today0 - (29 - i) * DAY_MS, 0.0)).collect();
    for e in entries {
        if let Some(v) = per_day.get_mut(&start_of_day(e.ts)) {
            *v += e.std_drinks;
        }
    }
    let line30 = per_day
        .into_iter()
        .map(|(day, std_drinks)| DayPoint {
            date: date_of(day),
            std_drinks,
        })
        .collect();

    // Per-day totals for the streak scan.
    let mut days: HashMap<i64, f64> = HashMap::new();
    for e in entries {
        *days.entry(start_of_day(e.ts)).or_insert(0.0) += e.std_drinks;
    }

    Stats {
        weekly,
        line30,
        current_af_streak: af_streak(&days, today0, false),
        longest_af_streak: af_streak(&days, today0, true),
        monthly_spend: entries
            .iter()
            .filter(|e| is_same_month(e.ts, now_ms))
            .map(|e| e.cost.unwrap_or(0.0))
            .sum(),
    }
}

/// Scans the last [`STREAK_SCAN_DAYS`] days (inclusive of today) counting
/// alcohol-free runs.
fn af_streak(days: &HashMap<i64, f64>, today0: i64, longest: bool) -> u32 {
    let mut max = 0u32;
    let mut cur = 0u32;
    for i in (0..=STREAK_SCAN_DAYS).rev() {
        let day = today0 - i * DAY_MS;
        let drank = days.get(&day).copied().unwrap_or(0.0) > 0.0;
        if drank {
            if cur > max {
                max = cur;
            }
            cur = 0;
        } else {
            cur += 1;
            if cur > max {
                max = cur;
            }
        }
    }
    if longest { max } else { cur }
}
