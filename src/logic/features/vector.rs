//! Feature Vector - Core data structure for classifier input
//!
//! **Versioned feature vector with layout validation**
//!
//! Uses the centralized layout from `layout.rs` for:
//! - Consistent feature ordering
//! - Version tracking
//! - Layout hash for compatibility checks

use serde::{Deserialize, Serialize};

use super::layout::{
    self, layout_hash, validate_layout, FeatureMismatchError, LayoutMismatchError, FEATURE_COUNT,
    FEATURE_LAYOUT, FEATURE_VERSION,
};

// ============================================================================
// BODY-MASS INDEX
// ============================================================================

/// Derive body-mass index from raw measurements, rounded to one decimal.
///
/// The rounding is contractual: downstream risk-band display logic keys off
/// the one-decimal value, so it must happen before the vector is built.
pub fn body_mass_index(weight_kg: f64, height_cm: f64) -> f64 {
    let height_m = height_cm / 100.0;
    let raw = weight_kg / (height_m * height_m);
    (raw * 10.0).round() / 10.0
}

// ============================================================================
// VERSIONED FEATURE VECTOR
// ============================================================================

/// One respondent's answers in classifier order.
///
/// Always build through [`FeatureVectorBuilder`] or [`FeatureVector::from_named`];
/// never pass raw arrays around.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeatureVector {
    /// Feature layout version
    pub version: u8,
    /// CRC32 hash of the feature layout (for mismatch detection)
    pub layout_hash: u32,
    /// Feature values in order defined by FEATURE_LAYOUT
    pub values: [f64; FEATURE_COUNT],
}

impl FeatureVector {
    /// Create a new zeroed feature vector with current version
    pub fn new() -> Self {
        Self {
            version: FEATURE_VERSION,
            layout_hash: layout_hash(),
            values: [0.0; FEATURE_COUNT],
        }
    }

    /// Create from raw values with current version
    pub fn from_values(values: [f64; FEATURE_COUNT]) -> Self {
        Self {
            version: FEATURE_VERSION,
            layout_hash: layout_hash(),
            values,
        }
    }

    /// Create from named (key, value) pairs.
    ///
    /// The key sequence must equal the feature layout exactly, in order; any
    /// missing, extra or misordered key is rejected rather than repaired.
    pub fn from_named(pairs: &[(&str, f64)]) -> Result<Self, FeatureMismatchError> {
        let names: Vec<&str> = pairs.iter().map(|(name, _)| *name).collect();
        layout::validate_feature_names(&names)?;

        let mut values = [0.0; FEATURE_COUNT];
        for (i, (_, value)) in pairs.iter().enumerate() {
            values[i] = *value;
        }
        Ok(Self::from_values(values))
    }

    /// Get values as slice
    pub fn as_slice(&self) -> &[f64] {
        &self.values
    }

    /// Get feature by name
    pub fn get_by_name(&self, name: &str) -> Option<f64> {
        layout::feature_index(name).map(|i| self.values[i])
    }

    /// Set feature by name
    pub fn set_by_name(&mut self, name: &str, value: f64) -> bool {
        if let Some(index) = layout::feature_index(name) {
            self.values[index] = value;
            true
        } else {
            false
        }
    }

    /// Validate that this vector is compatible with current layout
    pub fn validate(&self) -> Result<(), LayoutMismatchError> {
        validate_layout(self.version, self.layout_hash)
    }

    /// Get feature names for this vector
    pub fn feature_names(&self) -> &'static [&'static str] {
        FEATURE_LAYOUT
    }
}

impl Default for FeatureVector {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// BUILDER PATTERN
// ============================================================================

/// Builder for creating FeatureVector with named setters.
/// This is the surface the desktop form maps widget values through.
pub struct FeatureVectorBuilder {
    vector: FeatureVector,
}

impl FeatureVectorBuilder {
    pub fn new() -> Self {
        Self {
            vector: FeatureVector::new(),
        }
    }

    /// Derive and set BMI from raw weight/height measurements
    pub fn body_measurements(mut self, weight_kg: f64, height_cm: f64) -> Self {
        self.vector
            .set_by_name("bmi", body_mass_index(weight_kg, height_cm));
        self
    }

    pub fn bmi(mut self, value: f64) -> Self {
        self.vector.set_by_name("bmi", value);
        self
    }

    pub fn age_band(mut self, value: f64) -> Self {
        self.vector.set_by_name("age_band", value);
        self
    }

    pub fn sex(mut self, value: f64) -> Self {
        self.vector.set_by_name("sex", value);
        self
    }

    pub fn physical_activity(mut self, value: f64) -> Self {
        self.vector.set_by_name("physical_activity", value);
        self
    }

    pub fn fruit_consumption(mut self, value: f64) -> Self {
        self.vector.set_by_name("fruit_consumption", value);
        self
    }

    pub fn vegetable_consumption(mut self, value: f64) -> Self {
        self.vector.set_by_name("vegetable_consumption", value);
        self
    }

    pub fn smoker_history(mut self, value: f64) -> Self {
        self.vector.set_by_name("smoker_history", value);
        self
    }

    pub fn heavy_alcohol_consumption(mut self, value: f64) -> Self {
        self.vector.set_by_name("heavy_alcohol_consumption", value);
        self
    }

    pub fn general_health(mut self, value: f64) -> Self {
        self.vector.set_by_name("general_health", value);
        self
    }

    pub fn poor_physical_health_days(mut self, value: f64) -> Self {
        self.vector.set_by_name("poor_physical_health_days", value);
        self
    }

    pub fn poor_mental_health_days(mut self, value: f64) -> Self {
        self.vector.set_by_name("poor_mental_health_days", value);
        self
    }

    pub fn difficulty_walking(mut self, value: f64) -> Self {
        self.vector.set_by_name("difficulty_walking", value);
        self
    }

    /// Set feature by name dynamically
    pub fn set(mut self, name: &str, value: f64) -> Self {
        self.vector.set_by_name(name, value);
        self
    }

    pub fn build(self) -> FeatureVector {
        self.vector
    }
}

impl Default for FeatureVectorBuilder {
    fn default() -> Self {
        Self::new()
    }
}
