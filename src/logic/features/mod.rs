//! Features Module - Survey Feature Schema
//!
//! Single source of truth for the respondent feature layout the classifier
//! was trained on, plus the versioned vector the GUI builds per inference.

pub mod layout;
pub mod vector;

#[cfg(test)]
mod tests;

// Re-export common types
pub use layout::{
    FeatureMismatchError, LayoutMismatchError, FEATURE_COUNT, FEATURE_LAYOUT, FEATURE_VERSION,
    LABEL_COLUMN,
};
pub use vector::{body_mass_index, FeatureVector, FeatureVectorBuilder};
