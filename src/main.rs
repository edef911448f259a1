use anyhow::Context;
use cohort_builder::CohortConfig;
use log::info;
use std::path::PathBuf;

#[global_allocator]
static ALLOC: snmalloc_rs::SnMalloc = snmalloc_rs::SnMalloc;

fn main() -> anyhow::Result<()> {
    // Setup logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    // Optional JSON configuration as the only argument
    let config = match std::env::args_os().nth(1).map(PathBuf::from) {
        Some(path) => CohortConfig::from_json_file(&path)
            .with_context(|| format!("Failed to load configuration from {}", path.display()))?,
        None => CohortConfig::default(),
    };
    info!("{config}");

    let summary = cohort_builder::run(&config).context("Cohort build failed")?;

    info!(
        "Wrote {} subjects to {}; copied {} signal files ({} skipped, {} outside the cohort)",
        summary.outcome.cohort.len(),
        config.output_table.display(),
        summary.copy.copied,
        summary.copy.skipped,
        summary.unrouted_files
    );
    Ok(())
}
