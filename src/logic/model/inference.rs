//! Inference Adapter
//!
//! Scores a single respondent against a loaded artifact. The classifier is
//! position-sensitive, so the feature order is re-validated on every call;
//! a mismatched vector is rejected rather than reordered.

use serde::{Deserialize, Serialize};

use crate::logic::features::layout::{validate_feature_names, FeatureMismatchError, LayoutMismatchError};
use crate::logic::features::vector::FeatureVector;
use crate::logic::model::artifact::ModelArtifact;
use crate::logic::model::classifier::{ClassifierError, RiskClassifier};

// ============================================================================
// ERROR HANDLING
// ============================================================================

#[derive(Debug)]
pub enum InferenceError {
    FeatureMismatch(FeatureMismatchError),
    StaleVector(LayoutMismatchError),
    Classifier(ClassifierError),
}

impl std::fmt::Display for InferenceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InferenceError::FeatureMismatch(e) => write!(f, "Inference: {}", e),
            InferenceError::StaleVector(e) => write!(f, "Inference: {}", e),
            InferenceError::Classifier(e) => write!(f, "Inference: {}", e),
        }
    }
}

impl std::error::Error for InferenceError {}

impl From<FeatureMismatchError> for InferenceError {
    fn from(err: FeatureMismatchError) -> Self {
        InferenceError::FeatureMismatch(err)
    }
}

impl From<LayoutMismatchError> for InferenceError {
    fn from(err: LayoutMismatchError) -> Self {
        InferenceError::StaleVector(err)
    }
}

impl From<ClassifierError> for InferenceError {
    fn from(err: ClassifierError) -> Self {
        InferenceError::Classifier(err)
    }
}

// ============================================================================
// PREDICTION
// ============================================================================

/// One scored respondent
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskPrediction {
    /// 1 = at risk, 0 = no risk
    pub prediction: u8,
    /// Positive-class probability behind the prediction
    pub probability: f64,
    /// Threshold the prediction was made at
    pub threshold: f64,
}

/// Score one respondent. Pure and deterministic for a fixed artifact.
pub fn predict<M: RiskClassifier>(
    artifact: &ModelArtifact<M>,
    features: &FeatureVector,
) -> Result<RiskPrediction, InferenceError> {
    features.validate()?;
    validate_feature_names(&artifact.feature_names)?;

    let probabilities = artifact
        .model
        .predict_proba(std::slice::from_ref(&features.values))?;
    let probability = probabilities
        .first()
        .copied()
        .ok_or_else(|| ClassifierError("classifier returned no score".into()))?;

    let prediction = if probability >= artifact.threshold { 1 } else { 0 };

    Ok(RiskPrediction {
        prediction,
        probability,
        threshold: artifact.threshold,
    })
}

// ============================================================================
// TESTS
// ============================================================================
