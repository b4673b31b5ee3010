//! Decision Threshold Optimization
//!
//! Scans a fixed grid of candidate thresholds and selects the one maximizing
//! a sensitivity-weighted Youden-style objective. The selected threshold is
//! persisted with the model and reused unchanged at every inference call
//! until the model is retrained.

use super::metrics::{roc_auc, validate_labels, ConfusionMatrix, InvalidInputError};

// ============================================================================
// GRID CONSTANTS
// ============================================================================

/// Number of candidate thresholds
pub const THRESHOLD_GRID_POINTS: usize = 1000;

/// Lower grid bound (inclusive)
pub const THRESHOLD_GRID_LOW: f64 = 0.001;

/// Upper grid bound (inclusive). The positive class is rare, so thresholds
/// above 0.5 are never useful operating points for this screener.
pub const THRESHOLD_GRID_HIGH: f64 = 0.5;

/// Objective weight on sensitivity. Missing an at-risk respondent costs far
/// more than an unnecessary follow-up, hence the 9:1 split. These weights are
/// load-bearing for the deployed operating point; do not retune them.
pub const SENSITIVITY_WEIGHT: f64 = 0.9;

/// Objective weight on specificity
pub const SPECIFICITY_WEIGHT: f64 = 0.1;

// ============================================================================
// THRESHOLD SELECTION
// ============================================================================

/// Convert probabilities into binary predictions at threshold `t`
pub fn apply_threshold(probabilities: &[f64], threshold: f64) -> Vec<u8> {
    probabilities
        .iter()
        .map(|&p| if p >= threshold { 1 } else { 0 })
        .collect()
}

/// Select the deployment threshold for the given held-out scores.
///
/// Evaluates `0.9 * sensitivity + 0.1 * specificity` over a uniform grid of
/// 1000 candidates spanning [0.001, 0.5] inclusive. Plateaus are common in
/// the step function, so ties are broken toward the smallest candidate: the
/// scan keeps a candidate only when it strictly improves the objective.
///
/// Returns the winning threshold and the ROC AUC of the whole probability
/// vector (independent of the winner). Deterministic for identical inputs.
pub fn select_threshold(
    true_labels: &[u8],
    probabilities: &[f64],
) -> Result<(f64, f64), InvalidInputError> {
    if probabilities.len() != true_labels.len() {
        return Err(InvalidInputError::LengthMismatch {
            argument: "probabilities",
            expected: true_labels.len(),
            found: probabilities.len(),
        });
    }
    validate_labels(true_labels)?;

    let achieved_roc_auc = roc_auc(true_labels, probabilities)?;

    let step = (THRESHOLD_GRID_HIGH - THRESHOLD_GRID_LOW) / (THRESHOLD_GRID_POINTS - 1) as f64;
    let mut best_threshold = THRESHOLD_GRID_LOW;
    let mut best_score = f64::NEG_INFINITY;

    for i in 0..THRESHOLD_GRID_POINTS {
        let candidate = THRESHOLD_GRID_LOW + step * i as f64;
        let predicted = apply_threshold(probabilities, candidate);
        let cm = ConfusionMatrix::from_predictions(true_labels, &predicted);

        let score = SENSITIVITY_WEIGHT * cm.sensitivity() + SPECIFICITY_WEIGHT * cm.specificity();
        if score > best_score {
            best_score = score;
            best_threshold = candidate;
        }
    }

    Ok((best_threshold, achieved_roc_auc))
}

// ============================================================================
// TESTS
// ============================================================================
