use anyhow::Context;
use tracing_subscriber::EnvFilter;

use aqi_predictor::{config::AppConfig, evaluate, model, server, InputCollector};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cfg = AppConfig::from_env().context("failed to read configuration")?;
    tracing::info!("config: {:?}", cfg);

    let handle = model::load(&cfg.model_path);
    match handle.predictor() {
        Some(p) => {
            // Warmup with the form defaults so a broken artifact shows up in the log early
            match evaluate(&InputCollector::new().request(), p.as_ref()) {
                Ok(r) => tracing::info!("warmup prediction ok: {}", r.category),
                Err(e) => tracing::warn!("warmup prediction failed: {e}"),
            }
        }
        None => tracing::warn!(
            "serving without a model; predictions are disabled until {} is provided",
            cfg.model_path.display()
        ),
    }

    server::run(cfg, handle).await
}
