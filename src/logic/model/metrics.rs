//! Classification Metrics
//!
//! Confusion-matrix decomposition, sensitivity, rank-based ROC AUC and the
//! composite balance score reported for every dataset partition.

use serde::{Deserialize, Serialize};

// ============================================================================
// ERROR HANDLING
// ============================================================================

/// Malformed or degenerate label/probability input.
///
/// A label vector with a single class makes the confusion-matrix
/// decomposition and ROC AUC mathematically undefined; callers get this
/// error instead of a silent NaN or zero.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InvalidInputError {
    LengthMismatch {
        argument: &'static str,
        expected: usize,
        found: usize,
    },
    NonBinaryLabel {
        argument: &'static str,
        value: u8,
    },
    NonFiniteProbability {
        argument: &'static str,
        index: usize,
    },
    SingleClass {
        present: u8,
    },
}

impl std::fmt::Display for InvalidInputError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InvalidInputError::LengthMismatch {
                argument,
                expected,
                found,
            } => write!(
                f,
                "Invalid input: {} has length {}, expected {}",
                argument, found, expected
            ),
            InvalidInputError::NonBinaryLabel { argument, value } => {
                write!(f, "Invalid input: {} contains non-binary label {}", argument, value)
            }
            InvalidInputError::NonFiniteProbability { argument, index } => write!(
                f,
                "Invalid input: {} contains a non-finite value at index {}",
                argument, index
            ),
            InvalidInputError::SingleClass { present } => write!(
                f,
                "Invalid input: labels contain only class {}; metrics are undefined",
                present
            ),
        }
    }
}

impl std::error::Error for InvalidInputError {}

// ============================================================================
// CONFUSION MATRIX
// ============================================================================

/// 2x2 confusion matrix at a fixed threshold
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfusionMatrix {
    pub true_positives: usize,
    pub true_negatives: usize,
    pub false_positives: usize,
    pub false_negatives: usize,
}

impl ConfusionMatrix {
    /// Count the four cells. Inputs must already be validated as equal-length
    /// binary sequences.
    pub fn from_predictions(true_labels: &[u8], predicted_labels: &[u8]) -> Self {
        let mut cm = Self {
            true_positives: 0,
            true_negatives: 0,
            false_positives: 0,
            false_negatives: 0,
        };

        for (&truth, &predicted) in true_labels.iter().zip(predicted_labels.iter()) {
            match (truth, predicted) {
                (1, 1) => cm.true_positives += 1,
                (0, 0) => cm.true_negatives += 1,
                (0, 1) => cm.false_positives += 1,
                _ => cm.false_negatives += 1,
            }
        }

        cm
    }

    /// TP / (TP + FN); 0 when there are no positives, by policy
    pub fn sensitivity(&self) -> f64 {
        let denominator = self.true_positives + self.false_negatives;
        if denominator == 0 {
            0.0
        } else {
            self.true_positives as f64 / denominator as f64
        }
    }

    /// TN / (TN + FP); 0 when there are no negatives, by policy
    pub fn specificity(&self) -> f64 {
        let denominator = self.true_negatives + self.false_positives;
        if denominator == 0 {
            0.0
        } else {
            self.true_negatives as f64 / denominator as f64
        }
    }

    pub fn total(&self) -> usize {
        self.true_positives + self.true_negatives + self.false_positives + self.false_negatives
    }
}

// ============================================================================
// METRICS RECORD
// ============================================================================

/// Metrics for one (partition, threshold) pair. Immutable once computed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricsRecord {
    pub sensitivity: f64,
    pub roc_auc: f64,
    pub balance_score: f64,
    pub true_positives: usize,
    pub true_negatives: usize,
    pub false_positives: usize,
    pub false_negatives: usize,
}

// ============================================================================
// VALIDATION
// ============================================================================

/// Check that every probability is a finite number. The rank computation
/// would otherwise treat a NaN as tied with everything and skew the AUC
/// silently.
pub fn validate_probabilities(probabilities: &[f64]) -> Result<(), InvalidInputError> {
    for (index, &p) in probabilities.iter().enumerate() {
        if !p.is_finite() {
            return Err(InvalidInputError::NonFiniteProbability {
                argument: "probabilities",
                index,
            });
        }
    }
    Ok(())
}

/// Check that labels are binary and that both classes are present.
pub fn validate_labels(labels: &[u8]) -> Result<(), InvalidInputError> {
    let mut positives = 0usize;
    let mut negatives = 0usize;

    for &label in labels {
        match label {
            0 => negatives += 1,
            1 => positives += 1,
            value => {
                return Err(InvalidInputError::NonBinaryLabel {
                    argument: "true_labels",
                    value,
                })
            }
        }
    }

    if positives == 0 {
        return Err(InvalidInputError::SingleClass { present: 0 });
    }
    if negatives == 0 {
        return Err(InvalidInputError::SingleClass { present: 1 });
    }

    Ok(())
}

// ============================================================================
// ROC AUC
// ============================================================================

/// Rank-based area under the ROC curve.
///
/// Probability that a randomly chosen positive scores higher than a randomly
/// chosen negative; tied scores receive their average rank, so each tie
/// contributes half credit.
pub fn roc_auc(true_labels: &[u8], probabilities: &[f64]) -> Result<f64, InvalidInputError> {
    if true_labels.len() != probabilities.len() {
        return Err(InvalidInputError::LengthMismatch {
            argument: "probabilities",
            expected: true_labels.len(),
            found: probabilities.len(),
        });
    }
    validate_labels(true_labels)?;
    validate_probabilities(probabilities)?;

    let n = probabilities.len();
    let mut order: Vec<usize> = (0..n).collect();
    order.sort_by(|&a, &b| {
        probabilities[a]
            .partial_cmp(&probabilities[b])
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    // Average ranks across tied groups (1-based ranks)
    let mut ranks = vec![0.0f64; n];
    let mut i = 0;
    while i < n {
        let mut j = i;
        while j + 1 < n && probabilities[order[j + 1]] == probabilities[order[i]] {
            j += 1;
        }
        let average_rank = (i + j) as f64 / 2.0 + 1.0;
        for k in i..=j {
            ranks[order[k]] = average_rank;
        }
        i = j + 1;
    }

    let positives = true_labels.iter().filter(|&&l| l == 1).count() as f64;
    let negatives = n as f64 - positives;

    let positive_rank_sum: f64 = true_labels
        .iter()
        .zip(ranks.iter())
        .filter(|(&label, _)| label == 1)
        .map(|(_, &rank)| rank)
        .sum();

    Ok((positive_rank_sum - positives * (positives + 1.0) / 2.0) / (positives * negatives))
}

// ============================================================================
// METRICS COMPUTATION
// ============================================================================

/// Compute the metric record for one partition at a fixed threshold.
///
/// Pure function of its inputs. The ROC AUC comes from the continuous
/// probabilities and does not depend on `predicted_labels`.
pub fn compute_metrics(
    true_labels: &[u8],
    predicted_labels: &[u8],
    probabilities: &[f64],
) -> Result<MetricsRecord, InvalidInputError> {
    if predicted_labels.len() != true_labels.len() {
        return Err(InvalidInputError::LengthMismatch {
            argument: "predicted_labels",
            expected: true_labels.len(),
            found: predicted_labels.len(),
        });
    }
    if probabilities.len() != true_labels.len() {
        return Err(InvalidInputError::LengthMismatch {
            argument: "probabilities",
            expected: true_labels.len(),
            found: probabilities.len(),
        });
    }
    validate_labels(true_labels)?;
    for &label in predicted_labels {
        if label > 1 {
            return Err(InvalidInputError::NonBinaryLabel {
                argument: "predicted_labels",
                value: label,
            });
        }
    }

    let cm = ConfusionMatrix::from_predictions(true_labels, predicted_labels);
    let sensitivity = cm.sensitivity();
    let roc_auc = roc_auc(true_labels, probabilities)?;

    Ok(MetricsRecord {
        sensitivity,
        roc_auc,
        balance_score: (sensitivity + roc_auc) / 2.0,
        true_positives: cm.true_positives,
        true_negatives: cm.true_negatives,
        false_positives: cm.false_positives,
        false_negatives: cm.false_negatives,
    })
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_perfect_predictions() {
        let labels = [0, 0, 1, 1];
        let predicted = [0, 0, 1, 1];
        let probabilities = [0.1, 0.2, 0.8, 0.9];

        let record = compute_metrics(&labels, &predicted, &probabilities).unwrap();
        assert_eq!(record.sensitivity, 1.0);
        assert_eq!(record.roc_auc, 1.0);
        assert_eq!(record.balance_score, 1.0);
        assert_eq!(record.true_positives, 2);
        assert_eq!(record.true_negatives, 2);
        assert_eq!(record.false_positives, 0);
        assert_eq!(record.false_negatives, 0);
    }

    #[test]
    fn test_confusion_matrix_cells_sum_to_sample_count() {
        let labels = [0, 1, 0, 1, 1, 0, 0];
        let predicted = [1, 1, 0, 0, 1, 0, 1];
        let probabilities = [0.6, 0.7, 0.2, 0.3, 0.9, 0.1, 0.55];

        let record = compute_metrics(&labels, &predicted, &probabilities).unwrap();
        let total = record.true_positives
            + record.true_negatives
            + record.false_positives
            + record.false_negatives;
        assert_eq!(total, labels.len());
        assert!(record.sensitivity >= 0.0 && record.sensitivity <= 1.0);
        assert!(record.roc_auc >= 0.0 && record.roc_auc <= 1.0);
        assert!(record.balance_score >= 0.0 && record.balance_score <= 1.0);
    }

    #[test]
    fn test_single_class_labels_rejected() {
        let probabilities = [0.2, 0.4, 0.9];

        let all_negative = compute_metrics(&[0, 0, 0], &[0, 0, 0], &probabilities);
        assert_eq!(
            all_negative.unwrap_err(),
            InvalidInputError::SingleClass { present: 0 }
        );

        let all_positive = compute_metrics(&[1, 1, 1], &[1, 1, 1], &probabilities);
        assert_eq!(
            all_positive.unwrap_err(),
            InvalidInputError::SingleClass { present: 1 }
        );
    }

    #[test]
    fn test_length_mismatch_rejected() {
        let result = compute_metrics(&[0, 1], &[0], &[0.1, 0.9]);
        assert!(matches!(
            result,
            Err(InvalidInputError::LengthMismatch {
                argument: "predicted_labels",
                ..
            })
        ));

        let result = compute_metrics(&[0, 1], &[0, 1], &[0.1]);
        assert!(matches!(
            result,
            Err(InvalidInputError::LengthMismatch {
                argument: "probabilities",
                ..
            })
        ));
    }

    #[test]
    fn test_non_binary_label_rejected() {
        let result = compute_metrics(&[0, 2], &[0, 1], &[0.1, 0.9]);
        assert!(matches!(
            result,
            Err(InvalidInputError::NonBinaryLabel { value: 2, .. })
        ));
    }

    #[test]
    fn test_non_finite_probability_rejected() {
        let result = roc_auc(&[0, 1, 0, 1], &[0.1, f64::NAN, 0.35, 0.8]);
        assert_eq!(
            result.unwrap_err(),
            InvalidInputError::NonFiniteProbability {
                argument: "probabilities",
                index: 1,
            }
        );

        let result = compute_metrics(&[0, 1], &[0, 1], &[0.1, f64::INFINITY]);
        assert!(matches!(
            result,
            Err(InvalidInputError::NonFiniteProbability { index: 1, .. })
        ));
    }

    #[test]
    fn test_roc_auc_with_tied_scores() {
        // Tied positive/negative pair contributes half credit
        let auc = roc_auc(&[0, 1], &[0.3, 0.3]).unwrap();
        assert_eq!(auc, 0.5);
    }

    #[test]
    fn test_roc_auc_known_value() {
        // The negative at 0.35 outscores the positive at 0.3: one discordant
        // pair out of 2x2, so AUC = 3/4
        let auc = roc_auc(&[0, 1, 0, 1], &[0.1, 0.3, 0.35, 0.8]).unwrap();
        assert!((auc - 0.75).abs() < 1e-12);
    }

    #[test]
    fn test_roc_auc_independent_of_predicted_labels() {
        let labels = [0, 0, 1, 1];
        let probabilities = [0.1, 0.4, 0.35, 0.8];

        let a = compute_metrics(&labels, &[0, 0, 0, 1], &probabilities).unwrap();
        let b = compute_metrics(&labels, &[1, 1, 1, 1], &probabilities).unwrap();
        assert_eq!(a.roc_auc, b.roc_auc);
    }
}
