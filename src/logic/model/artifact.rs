//! Model Artifact - Persistence
//!
//! The unit saved at the end of a training run and loaded by the serving
//! process: trained model, ordered feature names, selected threshold and the
//! held-out metrics. Writes go through a temporary sibling file and a rename,
//! so a concurrent reader never observes a partially written artifact.

use std::fs;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::logic::features::layout::{
    layout_hash, validate_layout, LayoutMismatchError, FEATURE_LAYOUT, FEATURE_VERSION,
};
use crate::logic::model::metrics::MetricsRecord;

// ============================================================================
// ERROR HANDLING
// ============================================================================

#[derive(Debug)]
pub enum ArtifactError {
    Io(std::io::Error),
    Corrupt(serde_json::Error),
    LayoutMismatch(LayoutMismatchError),
}

impl std::fmt::Display for ArtifactError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ArtifactError::Io(e) => write!(f, "Artifact IO Error: {}", e),
            ArtifactError::Corrupt(e) => write!(f, "Artifact Corrupt: {}", e),
            ArtifactError::LayoutMismatch(e) => write!(f, "Artifact stale: {}", e),
        }
    }
}

impl std::error::Error for ArtifactError {}

impl From<std::io::Error> for ArtifactError {
    fn from(err: std::io::Error) -> Self {
        ArtifactError::Io(err)
    }
}

impl From<serde_json::Error> for ArtifactError {
    fn from(err: serde_json::Error) -> Self {
        ArtifactError::Corrupt(err)
    }
}

impl From<LayoutMismatchError> for ArtifactError {
    fn from(err: LayoutMismatchError) -> Self {
        ArtifactError::LayoutMismatch(err)
    }
}

// ============================================================================
// MODEL ARTIFACT
// ============================================================================

/// Created once at the end of training, read-only afterwards. A retrain
/// produces a wholly new artifact that replaces this one atomically.
#[derive(Serialize, Deserialize)]
#[serde(bound(
    serialize = "M: Serialize",
    deserialize = "M: serde::de::DeserializeOwned"
))]
pub struct ModelArtifact<M> {
    /// Trained classifier, owned exclusively by this artifact
    pub model: M,
    /// Feature names in the exact order the model expects
    pub feature_names: Vec<String>,
    /// Deployment decision threshold, immutable until retraining
    pub threshold: f64,
    /// Metrics computed on the held-out partition
    pub metrics: MetricsRecord,
    /// Feature layout version at training time
    pub feature_version: u8,
    /// Feature layout hash at training time
    pub layout_hash: u32,
    pub trained_at: DateTime<Utc>,
}

impl<M> ModelArtifact<M> {
    /// Package a freshly trained model with the current feature layout.
    pub fn new(model: M, threshold: f64, metrics: MetricsRecord) -> Self {
        Self {
            model,
            feature_names: FEATURE_LAYOUT.iter().map(|s| s.to_string()).collect(),
            threshold,
            metrics,
            feature_version: FEATURE_VERSION,
            layout_hash: layout_hash(),
            trained_at: Utc::now(),
        }
    }

    /// Check the artifact against the current feature layout
    pub fn validate(&self) -> Result<(), LayoutMismatchError> {
        validate_layout(self.feature_version, self.layout_hash)
    }
}

// ============================================================================
// PERSISTENCE
// ============================================================================

/// Save the artifact as one JSON document.
///
/// Writes to a `.tmp` sibling first and renames over the destination, so
/// either the complete new artifact is visible or the old file is untouched.
pub fn save_artifact<M: Serialize>(
    artifact: &ModelArtifact<M>,
    path: &Path,
) -> Result<(), ArtifactError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let json = serde_json::to_vec(artifact)?;

    let tmp_path = path.with_extension("json.tmp");
    fs::write(&tmp_path, json)?;
    fs::rename(&tmp_path, path)?;

    Ok(())
}

/// Load and validate an artifact from disk.
pub fn load_artifact<M: serde::de::DeserializeOwned>(
    path: &Path,
) -> Result<ModelArtifact<M>, ArtifactError> {
    let data = fs::read(path)?;
    let artifact: ModelArtifact<M> = serde_json::from_slice(&data)?;
    artifact.validate()?;
    Ok(artifact)
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_metrics() -> MetricsRecord {
        MetricsRecord {
            sensitivity: 0.93,
            roc_auc: 0.81,
            balance_score: 0.87,
            true_positives: 93,
            true_negatives: 400,
            false_positives: 107,
            false_negatives: 7,
        }
    }

    // A stand-in model: persistence only cares that it serializes.
    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct StubModel {
        bias: f64,
    }

    #[test]
    fn test_round_trip_preserves_threshold_bits_and_feature_order() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("model.json");

        // A threshold straight off the optimizer grid, not representable
        // exactly in decimal
        let threshold = 0.001 + 397.0 * (0.499 / 999.0);
        let artifact = ModelArtifact::new(StubModel { bias: 0.25 }, threshold, sample_metrics());

        save_artifact(&artifact, &path).unwrap();
        let loaded: ModelArtifact<StubModel> = load_artifact(&path).unwrap();

        assert_eq!(loaded.threshold.to_bits(), artifact.threshold.to_bits());
        assert_eq!(loaded.feature_names, artifact.feature_names);
        assert_eq!(loaded.model, artifact.model);
        assert_eq!(loaded.metrics, artifact.metrics);
    }

    #[test]
    fn test_save_leaves_no_temporary_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("model.json");

        let artifact = ModelArtifact::new(StubModel { bias: 0.0 }, 0.2, sample_metrics());
        save_artifact(&artifact, &path).unwrap();

        assert!(path.exists());
        assert!(!path.with_extension("json.tmp").exists());
    }

    #[test]
    fn test_save_creates_parent_directory() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("artifacts").join("model.json");

        let artifact = ModelArtifact::new(StubModel { bias: 0.0 }, 0.2, sample_metrics());
        save_artifact(&artifact, &path).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_load_rejects_garbage() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("model.json");
        std::fs::write(&path, b"not json at all").unwrap();

        assert!(matches!(
            load_artifact::<StubModel>(&path),
            Err(ArtifactError::Corrupt(_))
        ));
    }

    #[test]
    fn test_load_rejects_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope.json");

        assert!(matches!(
            load_artifact::<StubModel>(&path),
            Err(ArtifactError::Io(_))
        ));
    }

    #[test]
    fn test_load_rejects_stale_layout() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("model.json");

        let mut artifact = ModelArtifact::new(StubModel { bias: 0.0 }, 0.2, sample_metrics());
        artifact.feature_version = FEATURE_VERSION + 1;
        save_artifact(&artifact, &path).unwrap();

        assert!(matches!(
            load_artifact::<StubModel>(&path),
            Err(ArtifactError::LayoutMismatch(_))
        ));
    }
}
