//! Dataset Module - Preprocessed Survey Partitions
//!
//! The upstream preprocessing stage delivers two stratified CSV tables
//! (train, test) sharing one fixed schema. This module loads and validates
//! them; it performs no feature engineering of its own.

pub mod loader;


pub use loader::{load_survey_csv, DatasetError, SurveyTable};
