//! Central Configuration Constants
//!
//! Single source of truth for file locations and defaults.
//! To relocate the dataset or artifact, only edit this file.

use std::path::PathBuf;

/// App version
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// App name
pub const APP_NAME: &str = "Diabetes Risk Screener";

/// Preprocessed training partition (relative to the base directory)
pub const TRAIN_CSV: &str = "dataset/train.csv";

/// Preprocessed held-out partition (relative to the base directory)
pub const TEST_CSV: &str = "dataset/test.csv";

/// Persisted model artifact (relative to the base directory)
pub const ARTIFACT_FILE: &str = "artifacts/model.json";

// ============================================
// Helper functions to read from env with fallback
// ============================================

/// Get the base data directory from environment or use the working directory
pub fn get_base_dir() -> PathBuf {
    std::env::var("DIABETES_RISK_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("."))
}
