//! Classifier Backend - Gradient Boosted Decision Trees
//!
//! The training and threshold machinery only ever sees the `RiskClassifier`
//! capability trait, so the boosting backend can be swapped without touching
//! metrics, threshold optimization or inference.
//!
//! `GbdtRiskClassifier` wraps the `gbdt` crate with the `LogLikelyhood` loss
//! (binary classification, calibrated probabilities; label 1.0 = at risk,
//! -1.0 = not at risk). The gbdt crate works in `f32` internally while the
//! rest of the core uses `f64`; conversions happen at this boundary.

use gbdt::config::Config;
use gbdt::decision_tree::{Data, DataVec};
use gbdt::gradient_boost::GBDT;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

use crate::logic::config::TrainerConfig;
use crate::logic::features::layout::FEATURE_COUNT;

// ============================================================================
// ERROR HANDLING
// ============================================================================

#[derive(Debug, Clone)]
pub struct ClassifierError(pub String);

impl std::fmt::Display for ClassifierError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "ClassifierError: {}", self.0)
    }
}

impl std::error::Error for ClassifierError {}

// ============================================================================
// CAPABILITY TRAIT
// ============================================================================

/// Minimal black-box interface the core depends on: train once, then score
/// positive-class probabilities for feature rows in layout order.
pub trait RiskClassifier {
    fn fit(
        &mut self,
        rows: &[[f64; FEATURE_COUNT]],
        labels: &[u8],
    ) -> Result<(), ClassifierError>;

    fn predict_proba(&self, rows: &[[f64; FEATURE_COUNT]]) -> Result<Vec<f64>, ClassifierError>;
}

// ============================================================================
// GBDT IMPLEMENTATION
// ============================================================================

#[derive(Serialize, Deserialize)]
pub struct GbdtRiskClassifier {
    model: Option<GBDT>,
    params: TrainerConfig,
}

impl GbdtRiskClassifier {
    pub fn new(params: TrainerConfig) -> Self {
        Self {
            model: None,
            params,
        }
    }

    pub fn is_fitted(&self) -> bool {
        self.model.is_some()
    }

    fn training_config(&self) -> Config {
        let mut cfg = Config::new();
        cfg.set_feature_size(FEATURE_COUNT);
        cfg.set_max_depth(self.params.depth);
        cfg.set_iterations(self.params.iterations);
        cfg.set_shrinkage(self.params.learning_rate as f32);
        cfg.set_min_leaf_size(self.params.min_samples_leaf);
        cfg.set_loss("LogLikelyhood");
        cfg.set_debug(false);
        cfg.set_training_optimization_level(2);
        cfg
    }
}

impl RiskClassifier for GbdtRiskClassifier {
    fn fit(
        &mut self,
        rows: &[[f64; FEATURE_COUNT]],
        labels: &[u8],
    ) -> Result<(), ClassifierError> {
        if rows.is_empty() {
            return Err(ClassifierError("no training samples provided".into()));
        }
        if rows.len() != labels.len() {
            return Err(ClassifierError(format!(
                "feature count ({}) does not match label count ({})",
                rows.len(),
                labels.len()
            )));
        }

        let mut data: DataVec = rows
            .iter()
            .zip(labels.iter())
            .map(|(row, &label)| {
                let features: Vec<f32> = row.iter().map(|&v| v as f32).collect();
                let (target, weight) = if label == 1 {
                    (1.0, self.params.positive_class_weight as f32)
                } else {
                    (-1.0, 1.0)
                };
                Data::new_training_data(features, weight, target, None)
            })
            .collect();

        // The only stochastic step we own; seeded from config so a run is
        // reproducible without ambient global state.
        let mut rng = StdRng::seed_from_u64(self.params.random_seed);
        data.shuffle(&mut rng);

        let mut model = GBDT::new(&self.training_config());
        model.fit(&mut data);
        self.model = Some(model);

        log::info!(
            "Fitted GBDT: {} trees, depth {}, {} samples (seed {})",
            self.params.iterations,
            self.params.depth,
            rows.len(),
            self.params.random_seed
        );

        Ok(())
    }

    fn predict_proba(&self, rows: &[[f64; FEATURE_COUNT]]) -> Result<Vec<f64>, ClassifierError> {
        let model = self
            .model
            .as_ref()
            .ok_or_else(|| ClassifierError("classifier has not been fitted".into()))?;

        if rows.is_empty() {
            return Ok(Vec::new());
        }

        let data: DataVec = rows
            .iter()
            .map(|row| Data::new_test_data(row.iter().map(|&v| v as f32).collect(), None))
            .collect();

        let predictions = model.predict(&data);
        if predictions.len() != rows.len() {
            return Err(ClassifierError(format!(
                "backend returned {} scores for {} rows",
                predictions.len(),
                rows.len()
            )));
        }

        Ok(predictions.into_iter().map(|p| p as f64).collect())
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn row(bmi: f64, general_health: f64) -> [f64; FEATURE_COUNT] {
        let mut values = [0.0; FEATURE_COUNT];
        values[0] = bmi;
        values[8] = general_health;
        values
    }

    fn separable_training_set() -> (Vec<[f64; FEATURE_COUNT]>, Vec<u8>) {
        let mut rows = Vec::new();
        let mut labels = Vec::new();
        for i in 0..40 {
            let jitter = (i % 5) as f64 * 0.1;
            rows.push(row(20.0 + jitter, 1.0));
            labels.push(0);
            rows.push(row(35.0 + jitter, 5.0));
            labels.push(1);
        }
        (rows, labels)
    }

    fn small_config() -> TrainerConfig {
        TrainerConfig {
            iterations: 20,
            depth: 3,
            min_samples_leaf: 1,
            ..TrainerConfig::default()
        }
    }

    #[test]
    fn test_predict_before_fit_fails() {
        let classifier = GbdtRiskClassifier::new(TrainerConfig::default());
        assert!(!classifier.is_fitted());
        assert!(classifier.predict_proba(&[row(24.2, 3.0)]).is_err());
    }

    #[test]
    fn test_fit_rejects_empty_and_mismatched_input() {
        let mut classifier = GbdtRiskClassifier::new(small_config());
        assert!(classifier.fit(&[], &[]).is_err());
        assert!(classifier.fit(&[row(24.2, 3.0)], &[0, 1]).is_err());
    }

    #[test]
    fn test_fit_separates_obvious_classes() {
        let (rows, labels) = separable_training_set();
        let mut classifier = GbdtRiskClassifier::new(small_config());
        classifier.fit(&rows, &labels).unwrap();

        let probabilities = classifier
            .predict_proba(&[row(20.2, 1.0), row(35.2, 5.0)])
            .unwrap();
        assert!(
            probabilities[1] > probabilities[0],
            "at-risk profile should outscore healthy profile: {:?}",
            probabilities
        );
    }

    #[test]
    fn test_probabilities_in_unit_interval() {
        let (rows, labels) = separable_training_set();
        let mut classifier = GbdtRiskClassifier::new(small_config());
        classifier.fit(&rows, &labels).unwrap();

        let probabilities = classifier.predict_proba(&rows).unwrap();
        assert_eq!(probabilities.len(), rows.len());
        for p in probabilities {
            assert!((0.0..=1.0).contains(&p), "probability out of range: {}", p);
        }
    }
}
