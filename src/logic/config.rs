//! Trainer Configuration
//!
//! Hyperparameters for the gradient-boosted classifier. The random seed is an
//! explicit input here rather than ambient global state, so a training run is
//! reproducible from its configuration alone.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainerConfig {
    /// Boosting iterations (number of trees)
    pub iterations: usize,

    /// Shrinkage / learning rate
    pub learning_rate: f64,

    /// Maximum tree depth
    pub depth: u32,

    /// Minimum samples per leaf
    pub min_samples_leaf: usize,

    /// Sample weight applied to positive (at-risk) training rows.
    /// The positive class is rare; weighting it up trades precision
    /// for the sensitivity this screening model is optimized for.
    pub positive_class_weight: f64,

    /// Seed for the training-row shuffle
    pub random_seed: u64,
}

impl Default for TrainerConfig {
    fn default() -> Self {
        Self {
            iterations: 150,
            learning_rate: 0.07,
            depth: 6,
            min_samples_leaf: 20,
            positive_class_weight: 7.0,
            random_seed: 42,
        }
    }
}
