//! Feature Layout - Centralized Feature Definition
//!
//! **CRITICAL: This file controls the feature schema**
//!
//! ## Rules (NEVER break these):
//! 1. Add feature → increment FEATURE_VERSION
//! 2. Change order → increment FEATURE_VERSION
//! 3. Remove feature → increment FEATURE_VERSION
//!
//! The classifier is position-sensitive: the order below is the order the
//! model was trained on and the order every inference call must use.

use crc32fast::Hasher;

// ============================================================================
// FEATURE VERSION
// ============================================================================

/// Current feature layout version
/// MUST be incremented when layout changes
pub const FEATURE_VERSION: u8 = 1;

// ============================================================================
// FEATURE LAYOUT (Authoritative source)
// ============================================================================

/// Feature names in exact order they appear in the vector.
/// This is the SINGLE SOURCE OF TRUTH for feature layout and matches the
/// column order of the preprocessed survey tables.
pub const FEATURE_LAYOUT: &[&str] = &[
    "bmi",                       // 0: Body-mass index, one decimal place
    "age_band",                  // 1: Age bracket code (1 = 18-24 .. 13 = 80+)
    "sex",                       // 2: 0 = female, 1 = male
    "physical_activity",         // 3: Physical activity in the last 30 days (0/1)
    "fruit_consumption",         // 4: Eats fruit daily (0/1)
    "vegetable_consumption",     // 5: Eats vegetables daily (0/1)
    "smoker_history",            // 6: Smoked at least 100 cigarettes ever (0/1)
    "heavy_alcohol_consumption", // 7: Heavy drinker flag (0/1)
    "general_health",            // 8: Self-rated health (1 = excellent .. 5 = poor)
    "poor_physical_health_days", // 9: Bad physical-health days in last 30
    "poor_mental_health_days",   // 10: Bad mental-health days in last 30
    "difficulty_walking",        // 11: Serious difficulty walking (0/1)
];

/// Total number of features
/// IMPORTANT: Must match FEATURE_LAYOUT.len()!
pub const FEATURE_COUNT: usize = 12;

/// Label column of the preprocessed survey tables (0 = no risk, 1 = risk)
pub const LABEL_COLUMN: &str = "diabetes_status";

// ============================================================================
// LAYOUT HASH
// ============================================================================

/// Compute CRC32 hash of the feature layout.
/// Used to detect stale artifacts at load time.
pub fn compute_layout_hash() -> u32 {
    let mut hasher = Hasher::new();

    hasher.update(&[FEATURE_VERSION]);

    for name in FEATURE_LAYOUT {
        hasher.update(name.as_bytes());
        hasher.update(&[0]); // Separator
    }

    hasher.finalize()
}

/// Get layout hash
pub fn layout_hash() -> u32 {
    compute_layout_hash()
}

// ============================================================================
// LAYOUT VALIDATION
// ============================================================================

/// Error when a serialized structure was built against another layout version
#[derive(Debug, Clone)]
pub struct LayoutMismatchError {
    pub expected_version: u8,
    pub expected_hash: u32,
    pub actual_version: u8,
    pub actual_hash: u32,
}

impl std::fmt::Display for LayoutMismatchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Feature layout mismatch: expected v{} (hash: {:08x}), got v{} (hash: {:08x})",
            self.expected_version, self.expected_hash, self.actual_version, self.actual_hash
        )
    }
}

impl std::error::Error for LayoutMismatchError {}

/// Validate that incoming data matches current layout
pub fn validate_layout(incoming_version: u8, incoming_hash: u32) -> Result<(), LayoutMismatchError> {
    let current_hash = layout_hash();

    if incoming_version != FEATURE_VERSION || incoming_hash != current_hash {
        return Err(LayoutMismatchError {
            expected_version: FEATURE_VERSION,
            expected_hash: current_hash,
            actual_version: incoming_version,
            actual_hash: incoming_hash,
        });
    }

    Ok(())
}

// ============================================================================
// FEATURE NAME VALIDATION
// ============================================================================

/// Error when a provided feature name sequence does not match the layout.
/// Names every offending key; callers must never reorder or drop silently.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeatureMismatchError {
    pub missing: Vec<String>,
    pub extra: Vec<String>,
    pub misordered: Vec<String>,
}

impl std::fmt::Display for FeatureMismatchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Feature set mismatch: missing [{}], extra [{}], misordered [{}]",
            self.missing.join(", "),
            self.extra.join(", "),
            self.misordered.join(", ")
        )
    }
}

impl std::error::Error for FeatureMismatchError {}

/// Validate that `provided` equals FEATURE_LAYOUT exactly, in order.
pub fn validate_feature_names<S: AsRef<str>>(provided: &[S]) -> Result<(), FeatureMismatchError> {
    let provided: Vec<&str> = provided.iter().map(|s| s.as_ref()).collect();

    let missing: Vec<String> = FEATURE_LAYOUT
        .iter()
        .copied()
        .filter(|name| !provided.contains(name))
        .map(|name| name.to_string())
        .collect();

    let extra: Vec<String> = provided
        .iter()
        .copied()
        .filter(|name| !FEATURE_LAYOUT.contains(name))
        .map(|name| name.to_string())
        .collect();

    // Order only meaningful once the sets agree
    let misordered: Vec<String> = if missing.is_empty() && extra.is_empty() {
        FEATURE_LAYOUT
            .iter()
            .copied()
            .zip(provided.iter().copied())
            .filter(|(expected, got)| expected != got)
            .map(|(expected, _)| expected.to_string())
            .collect()
    } else {
        Vec::new()
    };

    if missing.is_empty() && extra.is_empty() && misordered.is_empty() {
        Ok(())
    } else {
        Err(FeatureMismatchError {
            missing,
            extra,
            misordered,
        })
    }
}

// ============================================================================
// FEATURE INDEX LOOKUP
// ============================================================================

/// Get feature index by name (O(n) but features are few)
pub fn feature_index(name: &str) -> Option<usize> {
    FEATURE_LAYOUT.iter().position(|&n| n == name)
}

// ============================================================================
// TESTS
// ============================================================================
