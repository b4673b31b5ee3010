//! Model Module - Training, Evaluation & Serving
//!
//! - `classifier` - GBDT backend behind the `RiskClassifier` trait
//! - `metrics` - Confusion matrix, sensitivity, ROC AUC, balance score
//! - `threshold` - Sensitivity-weighted decision threshold optimization
//! - `pipeline` - Evaluation and artifact packaging
//! - `artifact` - Atomic persistence of the trained bundle
//! - `inference` - Per-respondent scoring against a loaded artifact
//!
//! This module also owns the process-wide serving registry: the desktop
//! front-end loads one artifact at startup and every inference call reads an
//! immutable handle to it. Replacement swaps the handle atomically.

pub mod artifact;
pub mod classifier;
pub mod inference;
pub mod metrics;
pub mod pipeline;
pub mod threshold;

use std::path::Path;
use std::sync::Arc;

use parking_lot::RwLock;

// Re-export common types
pub use artifact::{load_artifact, save_artifact, ArtifactError, ModelArtifact};
pub use classifier::{ClassifierError, GbdtRiskClassifier, RiskClassifier};
pub use inference::{predict, InferenceError, RiskPrediction};
pub use metrics::{compute_metrics, InvalidInputError, MetricsRecord};
pub use pipeline::{evaluate, EvaluationReport, PipelineError};
pub use threshold::select_threshold;

/// The artifact type the serving process works with
pub type TrainedArtifact = ModelArtifact<GbdtRiskClassifier>;

// ============================================================================
// SERVING REGISTRY
// ============================================================================

/// Currently served artifact (loaded model)
static ARTIFACT: RwLock<Option<Arc<TrainedArtifact>>> = RwLock::new(None);

/// Install a freshly trained or loaded artifact, replacing any previous one.
/// Readers holding the old handle keep it; new calls see the new artifact.
pub fn install_artifact(artifact: TrainedArtifact) {
    log::info!(
        "Installing model artifact (threshold {:.4}, trained {})",
        artifact.threshold,
        artifact.trained_at
    );
    *ARTIFACT.write() = Some(Arc::new(artifact));
}

/// Load an artifact from disk and install it
pub fn load_from_path(path: &Path) -> Result<(), ArtifactError> {
    let artifact: TrainedArtifact = load_artifact(path)?;
    install_artifact(artifact);
    Ok(())
}

/// Get an immutable handle to the currently served artifact
pub fn current_artifact() -> Option<Arc<TrainedArtifact>> {
    ARTIFACT.read().clone()
}

/// Check if an artifact is loaded
pub fn is_loaded() -> bool {
    ARTIFACT.read().is_some()
}

/// Unload the served artifact
pub fn unload() {
    *ARTIFACT.write() = None;
    log::info!("Model artifact unloaded");
}
