//! Survey Table Loader
//!
//! Reads the preprocessed train/test CSV partitions. The schema is strict:
//! one binarized label column followed by exactly the model features, in
//! layout order. Anything else is rejected with the offending column named.

use std::path::Path;

use crate::logic::features::layout::{FEATURE_COUNT, FEATURE_LAYOUT, LABEL_COLUMN};

// ============================================================================
// ERROR HANDLING
// ============================================================================

#[derive(Debug)]
pub enum DatasetError {
    Csv(csv::Error),
    Schema {
        position: usize,
        expected: String,
        found: String,
    },
    ColumnCount {
        expected: usize,
        found: usize,
    },
    InvalidLabel {
        row: usize,
        value: String,
    },
    InvalidField {
        row: usize,
        column: String,
        value: String,
    },
    Empty,
}

impl std::fmt::Display for DatasetError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DatasetError::Csv(e) => write!(f, "CSV Error: {}", e),
            DatasetError::Schema {
                position,
                expected,
                found,
            } => write!(
                f,
                "Schema Error: column {} should be '{}', found '{}'",
                position, expected, found
            ),
            DatasetError::ColumnCount { expected, found } => {
                write!(f, "Schema Error: expected {} columns, found {}", expected, found)
            }
            DatasetError::InvalidLabel { row, value } => {
                write!(f, "Invalid label at row {}: '{}' (must be 0 or 1)", row, value)
            }
            DatasetError::InvalidField { row, column, value } => {
                write!(f, "Invalid value at row {} column '{}': '{}'", row, column, value)
            }
            DatasetError::Empty => write!(f, "Dataset contains no rows"),
        }
    }
}

impl std::error::Error for DatasetError {}

impl From<csv::Error> for DatasetError {
    fn from(err: csv::Error) -> Self {
        DatasetError::Csv(err)
    }
}

// ============================================================================
// SURVEY TABLE
// ============================================================================

/// One loaded dataset partition, rows aligned index-for-index with labels.
#[derive(Debug, Clone)]
pub struct SurveyTable {
    pub rows: Vec<[f64; FEATURE_COUNT]>,
    pub labels: Vec<u8>,
}

impl SurveyTable {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Fraction of positive (at-risk) labels
    pub fn positive_rate(&self) -> f64 {
        if self.labels.is_empty() {
            return 0.0;
        }
        let positives = self.labels.iter().filter(|&&l| l == 1).count();
        positives as f64 / self.labels.len() as f64
    }
}

// ============================================================================
// LOADING
// ============================================================================

/// Load one preprocessed partition from disk.
pub fn load_survey_csv(path: &Path) -> Result<SurveyTable, DatasetError> {
    let mut reader = csv::Reader::from_path(path)?;

    validate_header(reader.headers()?)?;

    let mut rows = Vec::new();
    let mut labels = Vec::new();

    for (index, record) in reader.records().enumerate() {
        let record = record?;
        // Header is row 0 in the file
        let file_row = index + 2;

        if record.len() != FEATURE_COUNT + 1 {
            return Err(DatasetError::ColumnCount {
                expected: FEATURE_COUNT + 1,
                found: record.len(),
            });
        }

        labels.push(parse_label(record.get(0).unwrap_or(""), file_row)?);

        let mut values = [0.0; FEATURE_COUNT];
        for (i, name) in FEATURE_LAYOUT.iter().enumerate() {
            let field = record.get(i + 1).unwrap_or("");
            values[i] = field.trim().parse::<f64>().map_err(|_| DatasetError::InvalidField {
                row: file_row,
                column: name.to_string(),
                value: field.to_string(),
            })?;
        }
        rows.push(values);
    }

    if rows.is_empty() {
        return Err(DatasetError::Empty);
    }

    Ok(SurveyTable { rows, labels })
}

fn validate_header(headers: &csv::StringRecord) -> Result<(), DatasetError> {
    if headers.len() != FEATURE_COUNT + 1 {
        return Err(DatasetError::ColumnCount {
            expected: FEATURE_COUNT + 1,
            found: headers.len(),
        });
    }

    let first = headers.get(0).unwrap_or("");
    if first != LABEL_COLUMN {
        return Err(DatasetError::Schema {
            position: 0,
            expected: LABEL_COLUMN.to_string(),
            found: first.to_string(),
        });
    }

    for (i, expected) in FEATURE_LAYOUT.iter().enumerate() {
        let found = headers.get(i + 1).unwrap_or("");
        if found != *expected {
            return Err(DatasetError::Schema {
                position: i + 1,
                expected: expected.to_string(),
                found: found.to_string(),
            });
        }
    }

    Ok(())
}

/// Labels arrive pre-binarized from the preprocessing stage; "0.0"/"1.0"
/// spellings are accepted, anything else is fatal.
fn parse_label(field: &str, row: usize) -> Result<u8, DatasetError> {
    let value: f64 = field.trim().parse().map_err(|_| DatasetError::InvalidLabel {
        row,
        value: field.to_string(),
    })?;

    if value == 0.0 {
        Ok(0)
    } else if value == 1.0 {
        Ok(1)
    } else {
        Err(DatasetError::InvalidLabel {
            row,
            value: field.to_string(),
        })
    }
}
