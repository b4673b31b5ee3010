//! Display DTOs for the desktop front-end

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::logic::model::artifact::ModelArtifact;
use crate::logic::model::inference::RiskPrediction;

/// Model summary for the questionnaire header banner
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelInfo {
    pub model_name: String,
    pub sensitivity: f64,
    pub roc_auc: f64,
    pub balance_score: f64,
    pub threshold: f64,
    pub feature_names: Vec<String>,
    pub trained_at: DateTime<Utc>,
}

impl ModelInfo {
    pub fn from_artifact<M>(artifact: &ModelArtifact<M>) -> Self {
        Self {
            model_name: "Gradient Boosted Trees".to_string(),
            sensitivity: artifact.metrics.sensitivity,
            roc_auc: artifact.metrics.roc_auc,
            balance_score: artifact.metrics.balance_score,
            threshold: artifact.threshold,
            feature_names: artifact.feature_names.clone(),
            trained_at: artifact.trained_at,
        }
    }
}

/// One scored respondent, ready for the result view
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RiskAssessment {
    pub at_risk: bool,
    pub probability: f64,
    pub threshold: f64,
    /// The derived BMI that went into the vector (shown alongside its band)
    pub bmi: f64,
}

impl RiskAssessment {
    pub fn new(prediction: &RiskPrediction, bmi: f64) -> Self {
        Self {
            at_risk: prediction.prediction == 1,
            probability: prediction.probability,
            threshold: prediction.threshold,
            bmi,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::features::layout::FEATURE_COUNT;
    use crate::logic::model::metrics::MetricsRecord;

    #[test]
    fn test_model_info_mirrors_artifact() {
        let metrics = MetricsRecord {
            sensitivity: 0.93,
            roc_auc: 0.81,
            balance_score: 0.87,
            true_positives: 93,
            true_negatives: 400,
            false_positives: 107,
            false_negatives: 7,
        };
        let artifact = ModelArtifact::new((), 0.0423, metrics);

        let info = ModelInfo::from_artifact(&artifact);
        assert_eq!(info.threshold, 0.0423);
        assert_eq!(info.sensitivity, 0.93);
        assert_eq!(info.feature_names.len(), FEATURE_COUNT);
    }

    #[test]
    fn test_risk_assessment_flags_positive_prediction() {
        let prediction = RiskPrediction {
            prediction: 1,
            probability: 0.31,
            threshold: 0.04,
        };
        let assessment = RiskAssessment::new(&prediction, 27.8);
        assert!(assessment.at_risk);
        assert_eq!(assessment.bmi, 27.8);
    }
}
