//! Logic Module - Training & Inference Engines
//!
//! - `features/` - Feature schema, versioned vectors, BMI derivation
//! - `dataset/` - Loading of the preprocessed survey partitions
//! - `model/` - Classifier, metrics, threshold optimization, artifact, inference
//! - `trainer` - Orchestration of a full training run

pub mod config;
pub mod dataset;
pub mod features;
pub mod model;
pub mod trainer;
