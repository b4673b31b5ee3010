use super::layout::{feature_index, layout_hash, FEATURE_COUNT, FEATURE_LAYOUT, FEATURE_VERSION};
use super::vector::{body_mass_index, FeatureVector, FeatureVectorBuilder};

#[test]
fn test_feature_vector_new() {
    let vector = FeatureVector::new();
    assert_eq!(vector.version, FEATURE_VERSION);
    assert_eq!(vector.layout_hash, layout_hash());
    assert_eq!(vector.values.len(), FEATURE_COUNT);
    assert!(vector.validate().is_ok());
}

#[test]
fn test_feature_vector_builder() {
    let vector = FeatureVectorBuilder::new()
        .bmi(24.2)
        .age_band(7.0)
        .general_health(3.0)
        .build();

    assert_eq!(vector.get_by_name("bmi"), Some(24.2));
    assert_eq!(vector.get_by_name("age_band"), Some(7.0));
    assert_eq!(vector.get_by_name("general_health"), Some(3.0));
    assert_eq!(vector.get_by_name("sex"), Some(0.0));
}

#[test]
fn test_feature_vector_set_by_name() {
    let mut vector = FeatureVector::new();
    assert!(vector.set_by_name("smoker_history", 1.0));
    assert_eq!(vector.get_by_name("smoker_history"), Some(1.0));

    assert!(!vector.set_by_name("nonexistent", 0.0));
    assert_eq!(vector.get_by_name("nonexistent"), None);
}

#[test]
fn test_from_named_exact_order() {
    let pairs: Vec<(&str, f64)> = FEATURE_LAYOUT
        .iter()
        .enumerate()
        .map(|(i, name)| (*name, i as f64))
        .collect();

    let vector = FeatureVector::from_named(&pairs).unwrap();
    assert_eq!(vector.values[0], 0.0);
    assert_eq!(vector.values[FEATURE_COUNT - 1], (FEATURE_COUNT - 1) as f64);
    assert_eq!(vector.get_by_name("age_band"), Some(1.0));
}

#[test]
fn test_from_named_rejects_missing_key() {
    let pairs: Vec<(&str, f64)> = FEATURE_LAYOUT[..FEATURE_COUNT - 1]
        .iter()
        .map(|name| (*name, 1.0))
        .collect();

    let err = FeatureVector::from_named(&pairs).unwrap_err();
    assert_eq!(err.missing, vec!["difficulty_walking".to_string()]);
}

#[test]
fn test_from_named_rejects_misordered_keys() {
    let mut pairs: Vec<(&str, f64)> = FEATURE_LAYOUT.iter().map(|name| (*name, 1.0)).collect();
    pairs.swap(2, 3);

    let err = FeatureVector::from_named(&pairs).unwrap_err();
    assert!(err.missing.is_empty());
    assert!(err.extra.is_empty());
    assert!(!err.misordered.is_empty());
}

#[test]
fn test_bmi_derivation_rounds_to_one_decimal() {
    // 70 / 1.7^2 = 24.2214... -> 24.2
    assert_eq!(body_mass_index(70.0, 170.0), 24.2);
    // 90 / 1.8^2 = 27.777... -> 27.8
    assert_eq!(body_mass_index(90.0, 180.0), 27.8);
}

#[test]
fn test_builder_body_measurements_sets_rounded_bmi() {
    let vector = FeatureVectorBuilder::new()
        .body_measurements(70.0, 170.0)
        .build();
    assert_eq!(vector.get_by_name("bmi"), Some(24.2));
}

#[test]
fn test_feature_index_matches_layout() {
    assert_eq!(feature_index("bmi"), Some(0));
    for (i, name) in FEATURE_LAYOUT.iter().enumerate() {
        assert_eq!(feature_index(name), Some(i));
    }
}
