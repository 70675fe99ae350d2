use std::process::ExitCode;
use std::time::Instant;

use anyhow::{Context, Result};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use loadout_search::{
    DEFAULT_CONFIG_PATH, DamageModel, Enumerator, OptimizerConfig, ReportFormat, SearchSpace,
    SetEffectTable, load_artifacts, load_weapons, render_json, render_text,
};

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run() -> Result<ExitCode> {
    let config = OptimizerConfig::load_or_default(DEFAULT_CONFIG_PATH)
        .with_context(|| format!("loading {DEFAULT_CONFIG_PATH}"))?;
    info!(?config, "configuration");

    let artifacts = load_artifacts(&config.artifact_path, config.max_artifact_lines);
    let weapons = load_weapons(&config.weapon_path);

    let set_effects = SetEffectTable::builtin();
    let model = DamageModel::new(config.element, &set_effects, config.set_activation);
    info!(element = ?model.element(), activation = ?model.activation(), "damage model ready");
    let space = SearchSpace::new(&artifacts, &weapons, config.max_constellation);

    let start = Instant::now();
    let result = Enumerator::new(config.strategy).search(&space, &model);
    info!(
        elapsed_ms = start.elapsed().as_secs_f64() * 1000.0,
        "search completed"
    );

    let best = match result {
        Ok(best) => best,
        Err(err) => {
            warn!(%err, "no loadout produced");
            println!("No valid loadout found: {err}");
            return Ok(ExitCode::FAILURE);
        }
    };

    let report = match config.report_format {
        ReportFormat::Text => render_text(&best),
        ReportFormat::Json => render_json(&best).context("serializing report")?,
    };
    print!("{report}");
    if config.report_format == ReportFormat::Json {
        println!();
    }
    Ok(ExitCode::SUCCESS)
}

fn main() -> Result<ExitCode> {
    init_logging();
    run()
}
