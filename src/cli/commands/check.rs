use crate::RunContext;
use crate::config::Config;
use crate::core::events::select_display_override;
use crate::core::inputs::load_display_overrides;
use crate::errors::AppResult;
use crate::ui::messages::{error, info};
use crate::utils::path::expand_tilde;

/// Exit-code contract: 0 when a display override is active for the run
/// date, 1 otherwise. Calling automation branches on this.
pub fn handle(cfg: &Config, ctx: &RunContext) -> AppResult<i32> {
    let data_dir = expand_tilde(&cfg.data_dir);
    let overrides = load_display_overrides(&data_dir)?;

    let Some(entry) = select_display_override(ctx.today, &overrides) else {
        info(format!("No override for {}", ctx.today));
        return Ok(1);
    };

    let image = data_dir.join(&entry.image);
    if !image.exists() {
        error(format!("Override image not found: {}", image.display()));
        return Ok(1);
    }

    info(format!("Override found: {} ({})", entry.name, image.display()));
    Ok(0)
}
