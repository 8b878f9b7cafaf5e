use crate::RunContext;
use crate::config::Config;
use crate::core::events::{discover_events, select_display_override, select_event};
use crate::core::inputs::{EVENTS_DIR, load_display_overrides};
use crate::errors::AppResult;
use crate::ui::messages::info;
use crate::utils::date::month_day;
use crate::utils::path::expand_tilde;

pub fn handle(cfg: &Config, ctx: &RunContext) -> AppResult<i32> {
    let data_dir = expand_tilde(&cfg.data_dir);
    let events = discover_events(&data_dir.join(EVENTS_DIR));

    if events.is_empty() {
        info("No events discovered");
    }

    let selected = select_event(ctx.today, &events).map(|e| e.name.clone());
    let (month, day) = month_day(ctx.today);

    for event in &events {
        let active = event.config.contains(month, day);
        let marker = match (&selected, active) {
            (Some(name), true) if *name == event.name => "selected",
            (_, true) => "active",
            (_, false) => "inactive",
        };
        println!(
            "{:<20} {:02}-{:02} → {:02}-{:02}  [{}]",
            event.name,
            event.config.start_month,
            event.config.start_day,
            event.config.end_month,
            event.config.end_day,
            marker
        );
    }

    let overrides = load_display_overrides(&data_dir)?;
    match select_display_override(ctx.today, &overrides) {
        Some(entry) => info(format!(
            "Display override active for {}: {} ({})",
            ctx.today, entry.name, entry.image
        )),
        None => info(format!("No display override for {}", ctx.today)),
    }

    Ok(0)
}
