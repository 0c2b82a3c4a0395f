// crates/engine/src/main.rs
use adapters::{LoggingSink, SnapshotFile};
use anyhow::Context;
use common::ScreenerConfig;
use engine::CycleRunner;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;
use universe::ranking;

/// Config file looked up when `SCREENER_CONFIG_PATH` is unset
const DEFAULT_CONFIG_PATH: &str = "screener";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info"))
        )
        .with_target(false)
        .with_thread_ids(true)
        .init();

    let config_path = std::env::var("SCREENER_CONFIG_PATH")
        .unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
    let config = ScreenerConfig::load(&config_path)
        .with_context(|| format!("loading configuration from {}", config_path))?;

    let snapshot_path = std::env::args()
        .nth(1)
        .or_else(|| config.snapshot_path.clone())
        .context("no snapshot given: pass a path or set snapshot_path in the config")?;

    tracing::info!("Token screener starting on {}", snapshot_path);

    let source = Arc::new(SnapshotFile::new(&snapshot_path));
    let sink = Arc::new(LoggingSink::new());
    let runner = CycleRunner::new(&config, source.clone(), source, sink)?;

    let report = runner.run_cycle().await?;

    for (rank, scored) in ranking::with_ranks(&report.outcome.ranked) {
        tracing::debug!(
            rank,
            symbol = scored.symbol(),
            score = scored.score,
            anomaly_ratio = scored.anomaly_ratio,
            suspicious = report.outcome.is_suspicious(scored.symbol()),
            "ranked"
        );
    }

    match &report.admission {
        Some(admission) => tracing::info!(
            symbol = %admission.symbol,
            action = ?admission.decision.action,
            reason = %admission.decision.reason,
            "cycle complete"
        ),
        None => tracing::info!("cycle complete, nothing to admit"),
    }

    let output = serde_json::json!({
        "generated_at": chrono::Utc::now().to_rfc3339(),
        "report": report,
    });
    println!("{}", serde_json::to_string_pretty(&output)?);

    Ok(())
}
