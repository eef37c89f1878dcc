use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use foodie_seed::{SeedConfig, logger};
use shared::Dataset;

/// Wipe and re-seed the food catalog backend
#[derive(Debug, Parser)]
#[command(name = "foodie-seed", version, about)]
struct Cli {
    /// Dataset JSON file (defaults to the built-in dataset)
    #[arg(long)]
    dataset: Option<PathBuf>,

    /// Check the dataset and exit without touching the backend
    #[arg(long)]
    validate_only: bool,

    /// Log level or filter directive
    #[arg(long, env = "LOG_LEVEL", default_value = "info")]
    log_level: String,

    /// Emit JSON log lines
    #[arg(long)]
    json_logs: bool,

    /// Directory for the rotating run log
    #[arg(long, env = "LOG_DIR")]
    log_dir: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Environment (.env, logging)
    dotenv::dotenv().ok();
    let cli = Cli::parse();
    logger::init_logger(&cli.log_level, cli.json_logs, cli.log_dir.as_deref())?;
    if let Some(dir) = &cli.log_dir {
        logger::cleanup_old_logs(dir, logger::DEFAULT_RETENTION_DAYS)?;
    }

    // 2. Dataset
    let dataset = match &cli.dataset {
        Some(path) => Dataset::from_path(path)?,
        None => Dataset::embedded()?,
    };
    let issues = dataset.validate();
    for issue in &issues {
        tracing::warn!("Dataset issue: {issue}");
    }
    if cli.validate_only {
        tracing::info!(issues = issues.len(), "Dataset checked");
        return Ok(());
    }

    // 3. Seed
    let config = SeedConfig::from_env().context("invalid seeder configuration")?;
    tracing::info!(
        endpoint = %config.endpoint,
        project = %config.project_id,
        database = %config.database_id,
        "Seeding backend"
    );
    let report = foodie_seed::seed(&config, &dataset).await?;
    println!("{}", serde_json::to_string_pretty(&report)?);

    Ok(())
}
