//! Decision driver: reads one JSON snapshot per line and writes the chosen
//! actions as one JSON array per line.
mod config;

use std::path::Path;

use anyhow::{Context, Result};
use combat_content::{ConfigLoader, SkillCatalog, SnapshotAdapter};
use combat_core::CombatAiConfig;
use combat_runtime::CombatAi;
use config::CliConfig;
use tokio::io::{AsyncBufReadExt, AsyncRead, AsyncWriteExt, BufReader};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if it exists (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let config = CliConfig::from_env().with_args(std::env::args());
    let _guard = setup_logging(config.log_dir.as_deref())?;

    let ai_config = match &config.config_path {
        Some(path) => ConfigLoader::load(path)?,
        None => CombatAiConfig::default(),
    };
    let catalog = match &config.skills_path {
        Some(path) => SkillCatalog::load(path)?,
        None => SkillCatalog::builtin()?,
    };

    let mut ai = CombatAi::new(ai_config)?;
    if let Some(role) = &config.role {
        ai.set_role_by_name(role)?;
    }

    run(&config, &mut ai, &SnapshotAdapter::new(catalog)).await?;

    let metrics = ai.metrics_snapshot();
    tracing::info!(
        "decisions={} avg={:.3}ms max={:.3}ms window={}",
        metrics.decisions_made,
        metrics.average_decision_time_ms,
        metrics.max_decision_time_ms,
        metrics.window_len
    );
    Ok(())
}

async fn run(config: &CliConfig, ai: &mut CombatAi, adapter: &SnapshotAdapter) -> Result<()> {
    let input: Box<dyn AsyncRead + Unpin + Send> = match &config.input {
        Some(path) => Box::new(
            tokio::fs::File::open(path)
                .await
                .with_context(|| format!("Failed to open snapshots: {}", path.display()))?,
        ),
        None => Box::new(tokio::io::stdin()),
    };
    let mut lines = BufReader::new(input).lines();
    let mut stdout = tokio::io::stdout();

    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }
        let ctx = adapter.from_json_str(&line);

        if let Some(role) = config.role_for(&ctx.character().job)
            && role != ai.role()
        {
            tracing::info!("switching role {} -> {}", ai.role(), role);
            ai.set_role(role);
        }

        let actions = ai.decide(&ctx).await;
        tracing::debug!(
            "tick {}: state={} threat={:.2} actions={}",
            ctx.generation(),
            ai.state(),
            ctx.threat_level(),
            actions.len()
        );

        let mut encoded = serde_json::to_vec(&actions)?;
        encoded.push(b'\n');
        stdout.write_all(&encoded).await?;
        stdout.flush().await?;
    }
    Ok(())
}

/// Logs to stderr, and to `combat-ai.log` under `log_dir` when given.
fn setup_logging(log_dir: Option<&Path>) -> Result<Option<WorkerGuard>> {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    let stderr_layer = tracing_subscriber::fmt::layer().with_writer(std::io::stderr);

    let (file_layer, guard) = match log_dir {
        Some(dir) => {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create log dir: {}", dir.display()))?;
            let file_appender = tracing_appender::rolling::never(dir, "combat-ai.log");
            let (non_blocking_file, guard) = tracing_appender::non_blocking(file_appender);
            let layer = tracing_subscriber::fmt::layer()
                .with_writer(non_blocking_file)
                .with_ansi(false);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(stderr_layer)
        .with(file_layer)
        .init();

    Ok(guard)
}
