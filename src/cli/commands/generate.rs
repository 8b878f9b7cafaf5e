use std::fs;
use std::path::Path;

use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::RunContext;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::compositor::processor::ProcessorRegistry;
use crate::core::compositor::raster::TvRenderer;
use crate::core::compositor::{document, load_font};
use crate::core::events::{select_display_override, select_event};
use crate::core::inputs::{self, Inputs};
use crate::core::{matcher, resolver};
use crate::errors::{AppError, AppResult};
use crate::models::resolved::{ResolvedDirectory, ResolvedEmployee};
use crate::ui::messages::{header, info, success, warning};
use crate::utils::path::{expand_tilde, sanitize_fragment};

pub fn handle(cmd: &Commands, cfg: &Config, ctx: &RunContext) -> AppResult<i32> {
    let Commands::Generate {
        unit,
        skip_tv,
        skip_document,
    } = cmd
    else {
        return Ok(0);
    };

    let data_dir = expand_tilde(&cfg.data_dir);
    let output_dir = expand_tilde(&cfg.output_dir);

    header("Loading inputs");
    let inputs = inputs::load(&data_dir)?;
    info(format!(
        "{} employees, {} placements, {} events discovered",
        inputs.employees.len(),
        inputs.positions.len(),
        inputs.events.len()
    ));

    // A display override replaces the generated output for this date
    // entirely; copying it out is the whole run.
    if let Some(entry) = select_display_override(ctx.today, &inputs.display_overrides) {
        let image = data_dir.join(&entry.image);
        if !image.exists() {
            return Err(AppError::MissingInput(image.display().to_string()));
        }
        let dest_dir = output_dir.join("tv");
        fs::create_dir_all(&dest_dir)?;
        let file_name = image
            .file_name()
            .ok_or_else(|| AppError::MissingInput(entry.image.clone()))?;
        fs::copy(&image, dest_dir.join(file_name))?;
        success(format!(
            "Display override '{}' active for {}; skipping map generation",
            entry.name, ctx.today
        ));
        return Ok(0);
    }

    header("Resolving directory");
    let directory = resolve_directory(&inputs);
    success(format!(
        "Positioned {} employees ({} positionless)",
        directory.stats.placed, directory.stats.positionless
    ));

    let event = select_event(ctx.today, &inputs.events);
    match event {
        Some(e) => info(format!("Active event: {}", e.name)),
        None => info("No active event"),
    }

    fs::create_dir_all(&output_dir)?;

    if !skip_document {
        header("Writing interactive document");
        let path = output_dir.join("map.json");
        document::write_document(&path, &directory, ctx.today)?;
        success(format!("Interactive document: {}", path.display()));
    }

    if !skip_tv {
        header("Rendering TV images");
        let tv_dir = output_dir.join("tv");
        fs::create_dir_all(&tv_dir)?;

        let font = load_font(&cfg.font_paths);
        let processors = match event {
            Some(e) => ProcessorRegistry::builtin(&e.dir),
            None => ProcessorRegistry::new(),
        };
        let floor_plan = inputs.floor_plan();
        let renderer = TvRenderer {
            data_dir: &inputs.data_dir,
            floor_plan: &floor_plan,
            font: font.as_ref(),
            event,
            processors,
        };
        let mut rng = match ctx.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        match unit {
            Some(unit) => {
                render_unit(&renderer, &directory, unit, &tv_dir, &mut rng)?;
            }
            None => {
                let all: Vec<&ResolvedEmployee> = directory.employees.iter().collect();
                let output = tv_dir.join("all_staff_map_tv.png");
                renderer.render(&all, "All Staff", all.len(), &mut rng, &output)?;
                success(format!("Generated: {}", output.display()));

                for unit in directory.units() {
                    render_unit(&renderer, &directory, &unit, &tv_dir, &mut rng)?;
                }
            }
        }
    }

    Ok(0)
}

fn resolve_directory(inputs: &Inputs) -> ResolvedDirectory {
    let matches = matcher::match_positions(&inputs.employees, &inputs.positions);
    let unmatched = inputs.employees.len() - matches.len();
    if unmatched > 0 {
        warning(format!(
            "{} employees without a placement match (kept positionless)",
            unmatched
        ));
    }
    resolver::resolve(
        &inputs.employees,
        &inputs.positions,
        &matches,
        &inputs.location_overrides,
        &inputs.pictures,
    )
}

fn render_unit(
    renderer: &TvRenderer<'_>,
    directory: &ResolvedDirectory,
    unit: &str,
    tv_dir: &Path,
    rng: &mut StdRng,
) -> AppResult<()> {
    let members: Vec<&ResolvedEmployee> = directory
        .employees
        .iter()
        .filter(|e| e.units.iter().any(|u| u == unit))
        .collect();
    if members.is_empty() {
        warning(format!("Skipping {}: no employees found", unit));
        return Ok(());
    }

    let output = tv_dir.join(format!("{}_map_tv.png", sanitize_fragment(unit)));
    renderer.render(&members, unit, members.len(), rng, &output)?;
    success(format!("Generated: {}", output.display()));
    Ok(())
}
