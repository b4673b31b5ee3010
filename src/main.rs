//! Model Training - Main Entry Point
//!
//! Loads the preprocessed survey partitions, fits the classifier, selects the
//! deployment threshold and persists the model artifact.

use std::path::PathBuf;

use diabetes_risk_core::constants;
use diabetes_risk_core::logic::config::TrainerConfig;
use diabetes_risk_core::logic::trainer;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    log::info!(
        "Starting {} v{} - model training...",
        constants::APP_NAME,
        constants::APP_VERSION
    );

    let base_dir = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(constants::get_base_dir);

    match trainer::run_training(&base_dir, TrainerConfig::default()) {
        Ok(metrics) => {
            log::info!(
                "Training complete. Test sensitivity: {:.2}% | ROC AUC: {:.2}%",
                metrics.sensitivity * 100.0,
                metrics.roc_auc * 100.0
            );
        }
        Err(e) => {
            log::error!("Training failed: {}", e);
            std::process::exit(1);
        }
    }
}
