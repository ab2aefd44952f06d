//! `halt settings` -- show or change user configuration.

use anyhow::Result;

use halt_core::settings::SettingsPatch;

use crate::cli::SettingsArgs;
use crate::context::RuntimeContext;

pub async fn run(ctx: &RuntimeContext, args: &SettingsArgs) -> Result<()> {
    let store = ctx.open_store().await?;

    let patch = SettingsPatch {
        language: args.language,
        theme: args.theme,
        daily_goal_drinks: args.daily,
        weekly_goal_drinks: args.weekly,
        monthly_budget: args.budget,
        show_bac: args.show_bac,
        ..SettingsPatch::default()
    };

    if !patch.is_empty() {
        store.set_settings_patch(&patch)?;
        store.flush().await?;
    }

    let settings = store.settings()?;
    println!("Daily goal:     {:.2} std drinks", settings.daily_goal_drinks);
    println!("Weekly goal:    {:.2} std drinks", settings.weekly_goal_drinks);
    println!("Monthly budget: {:.2}", settings.monthly_budget);
    println!("Language:       {}", settings.language);
    println!("Theme:          {}", settings.theme);
    println!("Show BAC:       {}", settings.show_bac);
    Ok(())
}
