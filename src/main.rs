use anyhow::Result;
use tracing::{info, warn};

mod types;
mod error;
mod config;
mod parser;
mod validator;
mod evaluator;

use config::load_config;
use evaluator::evaluate;
use types::EvaluationStatus;

fn main() -> Result<()> {
    init_tracing();
    let cfg = load_config()?;
    info!(
        "metric = {}, type = {}",
        cfg.metric_name.as_deref().unwrap_or("<unnamed>"),
        cfg.metric_type
    );

    let result = evaluate(cfg.value, &cfg.thresholds, cfg.metric_type);
    match result.status {
        EvaluationStatus::Success => match result.evaluation {
            Some(key) => info!("metric classified as {}", key),
            None => info!("no threshold rule matched"),
        },
        EvaluationStatus::Error => {
            warn!(
                "thresholds could not be evaluated: {}",
                result.error.as_deref().unwrap_or("unknown error")
            );
        }
    }

    println!("{}", serde_json::to_string(&result)?);
    Ok(())
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .try_init();
}
