//! Signature Verification Pipeline - Main Entry Point

use pipeline::{init_logging, run, PipelineConfig};
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_logging();

    info!("=== Signature Verification Pipeline v{} ===", env!("CARGO_PKG_VERSION"));

    let config_path = std::env::args().nth(1);
    let config = PipelineConfig::load(config_path.as_deref())?;
    info!("Data directory: {}, user {}", config.data_dir, config.user_id);

    let report = run(&config).await?;

    let accepted_genuine = report.genuine.iter().filter(|s| s.accepted).count();
    let rejected_forged = report.forged.iter().filter(|s| !s.accepted).count();
    info!(
        "Done: {}/{} genuine accepted, {}/{} forged rejected",
        accepted_genuine,
        report.genuine.len(),
        rejected_forged,
        report.forged.len()
    );

    Ok(())
}
