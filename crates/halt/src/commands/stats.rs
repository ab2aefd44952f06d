//! `halt stats` -- totals, streaks and spend.

use anyhow::Result;

use halt_core::calc;

use crate::context::{RuntimeContext, now_ms};

pub async fn run(ctx: &RuntimeContext) -> Result<()> {
    let store = ctx.open_store().await?;
    let now = now_ms();
    let stats = store.stats(now)?;
    let today = store.today_total(now)?;
    let settings = store.settings()?;

    print_goal_line("Today", today, settings.daily_goal_drinks);
    let latest_week = stats.weekly.last().map(|w| w.std_drinks).unwrap_or(0.0);
    print_goal_line("Latest week", latest_week, settings.weekly_goal_drinks);

    println!("Alcohol-free streak: {} days (longest {})",
        stats.current_af_streak, stats.longest_af_streak);

    if settings.monthly_budget > 0.0 {
        println!(
            "This month's spend: {:.2} of {:.2} budget",
            stats.monthly_spend, settings.monthly_budget
        );
    } else {
        println!("This month's spend: {:.2}", stats.monthly_spend);
    }

    if settings.show_bac {
        if let Some(profile) = settings.profile {
            if let (Some(weight_kg), Some(sex)) = (profile.weight_kg, profile.sex) {
                let entries = store.entries()?;
                let bac = calc::widmark_bac(&entries, weight_kg, sex, now);
                println!("Estimated BAC: {bac:.3}%");
            }
        }
    }

    Ok(())
}

fn print_goal_line(label: &str, value: f64, goal: f64) {
    if goal > 0.0 {
        println!("{label}: {value:.2} of {goal:.2} std drinks");
    } else {
        println!("{label}: {value:.2} std drinks");
    }
}
