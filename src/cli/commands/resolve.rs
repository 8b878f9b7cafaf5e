use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::inputs;
use crate::core::{matcher, resolver};
use crate::errors::AppResult;
use crate::utils::path::expand_tilde;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<i32> {
    let Commands::Resolve { pretty } = cmd else {
        return Ok(0);
    };

    let data_dir = expand_tilde(&cfg.data_dir);
    let inputs = inputs::load(&data_dir)?;

    let matches = matcher::match_positions(&inputs.employees, &inputs.positions);
    let directory = resolver::resolve(
        &inputs.employees,
        &inputs.positions,
        &matches,
        &inputs.location_overrides,
        &inputs.pictures,
    );

    let json = if *pretty {
        serde_json::to_string_pretty(&directory)?
    } else {
        serde_json::to_string(&directory)?
    };
    println!("{json}");

    Ok(0)
}
