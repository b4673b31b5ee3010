//! Training Run Orchestration
//!
//! Full training run: load both partitions, fit the classifier, evaluate,
//! print the train-vs-test comparison and persist the artifact. Any failure
//! aborts the run before the artifact is written.

use std::path::Path;

use crate::constants;
use crate::logic::config::TrainerConfig;
use crate::logic::dataset::{load_survey_csv, DatasetError};
use crate::logic::features::layout::FEATURE_COUNT;
use crate::logic::model::artifact::{save_artifact, ArtifactError};
use crate::logic::model::classifier::{ClassifierError, GbdtRiskClassifier, RiskClassifier};
use crate::logic::model::metrics::MetricsRecord;
use crate::logic::model::pipeline::{self, PipelineError};

// ============================================================================
// ERROR HANDLING
// ============================================================================

#[derive(Debug)]
pub enum TrainError {
    Dataset(DatasetError),
    Classifier(ClassifierError),
    Pipeline(PipelineError),
    Artifact(ArtifactError),
}

impl std::fmt::Display for TrainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TrainError::Dataset(e) => write!(f, "Training: {}", e),
            TrainError::Classifier(e) => write!(f, "Training: {}", e),
            TrainError::Pipeline(e) => write!(f, "Training: {}", e),
            TrainError::Artifact(e) => write!(f, "Training: {}", e),
        }
    }
}

impl std::error::Error for TrainError {}

impl From<DatasetError> for TrainError {
    fn from(err: DatasetError) -> Self {
        TrainError::Dataset(err)
    }
}

impl From<ClassifierError> for TrainError {
    fn from(err: ClassifierError) -> Self {
        TrainError::Classifier(err)
    }
}

impl From<PipelineError> for TrainError {
    fn from(err: PipelineError) -> Self {
        TrainError::Pipeline(err)
    }
}

impl From<ArtifactError> for TrainError {
    fn from(err: ArtifactError) -> Self {
        TrainError::Artifact(err)
    }
}

// ============================================================================
// TRAINING RUN
// ============================================================================

/// Run a full training pass rooted at `base_dir`.
/// Returns the held-out metrics that went into the persisted artifact.
pub fn run_training(base_dir: &Path, config: TrainerConfig) -> Result<MetricsRecord, TrainError> {
    log::info!("Loading survey partitions...");
    let train = load_survey_csv(&base_dir.join(constants::TRAIN_CSV))?;
    let test = load_survey_csv(&base_dir.join(constants::TEST_CSV))?;

    log::info!("Train: {} samples | {} features", train.len(), FEATURE_COUNT);
    log::info!("Test:  {} samples", test.len());
    log::info!(
        "Distribution: {:.1}% positives in train",
        train.positive_rate() * 100.0
    );

    log::info!(
        "Training gradient-boosted classifier ({} iterations, depth {})...",
        config.iterations,
        config.depth
    );
    let mut classifier = GbdtRiskClassifier::new(config);
    classifier.fit(&train.rows, &train.labels)?;

    log::info!("Optimizing decision threshold on the held-out partition...");
    let report = pipeline::evaluate(classifier, &train, &test)?;

    print_results_table(&report.train_metrics, &report.artifact.metrics);

    let artifact_path = base_dir.join(constants::ARTIFACT_FILE);
    save_artifact(&report.artifact, &artifact_path)?;
    log::info!("Model artifact saved to {}", artifact_path.display());

    Ok(report.artifact.metrics.clone())
}

/// Final train-vs-test comparison, console counterpart of the GUI banner.
/// Train numbers are diagnostic only and are not persisted.
fn print_results_table(train: &MetricsRecord, test: &MetricsRecord) {
    println!("{:=<72}", "");
    println!("{:^72}", "FINAL RESULTS");
    println!("{:=<72}", "");
    println!("{:<30} | {:>15} | {:>17}", "Metric", "Train", "Test (held-out)");
    println!("{:-<30}-+-{:-<15}-+-{:-<17}", "", "", "");
    println!(
        "{:<30} | {:>14.2}% | {:>16.2}%",
        "Sensitivity (Recall)",
        train.sensitivity * 100.0,
        test.sensitivity * 100.0
    );
    println!(
        "{:<30} | {:>14.2}% | {:>16.2}%",
        "ROC AUC",
        train.roc_auc * 100.0,
        test.roc_auc * 100.0
    );
    println!(
        "{:<30} | {:>14.2}% | {:>16.2}%",
        "Balance Score",
        train.balance_score * 100.0,
        test.balance_score * 100.0
    );
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::features::layout::{FEATURE_LAYOUT, LABEL_COLUMN};
    use crate::logic::model::artifact::load_artifact;
    use crate::logic::model::TrainedArtifact;
    use std::io::Write;

    fn synthetic_row(label: u8, index: usize) -> String {
        // Clear signal: at-risk rows carry high BMI and poor general health
        let jitter = (index % 7) as f64 * 0.3;
        let (bmi, health, walking) = if label == 1 {
            (34.0 + jitter, 5.0, 1.0)
        } else {
            (21.0 + jitter, 2.0, 0.0)
        };
        format!(
            "{label}.0,{bmi:.1},{age},{sex},1,1,1,0,0,{health},2,1,{walking}",
            age = 5 + index % 8,
            sex = index % 2,
        )
    }

    fn write_partition(dir: &std::path::Path, name: &str, positives: usize, negatives: usize) {
        let mut columns = vec![LABEL_COLUMN.to_string()];
        columns.extend(FEATURE_LAYOUT.iter().map(|s| s.to_string()));

        let path = dir.join(name);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "{}", columns.join(",")).unwrap();
        for i in 0..negatives {
            writeln!(file, "{}", synthetic_row(0, i)).unwrap();
        }
        for i in 0..positives {
            writeln!(file, "{}", synthetic_row(1, i)).unwrap();
        }
    }

    #[test]
    fn test_full_training_run_persists_loadable_artifact() {
        let dir = tempfile::tempdir().unwrap();
        write_partition(dir.path(), constants::TRAIN_CSV, 20, 60);
        write_partition(dir.path(), constants::TEST_CSV, 8, 24);

        let config = TrainerConfig {
            iterations: 15,
            depth: 3,
            min_samples_leaf: 2,
            ..TrainerConfig::default()
        };

        let metrics = run_training(dir.path(), config).unwrap();
        // The separable synthetic signal must be caught at full sensitivity
        assert_eq!(metrics.sensitivity, 1.0);

        let artifact_path = dir.path().join(constants::ARTIFACT_FILE);
        let loaded: TrainedArtifact = load_artifact(&artifact_path).unwrap();
        assert_eq!(loaded.metrics, metrics);
        assert!(loaded.threshold >= 0.001 && loaded.threshold <= 0.5);
    }

    #[test]
    fn test_missing_dataset_fails_before_artifact_write() {
        let dir = tempfile::tempdir().unwrap();

        let result = run_training(dir.path(), TrainerConfig::default());
        assert!(matches!(result, Err(TrainError::Dataset(_))));
        assert!(!dir.path().join(constants::ARTIFACT_FILE).exists());
    }
}
