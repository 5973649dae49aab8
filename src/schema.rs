//! Feature Schema - Centralized Feature Definition
//!
//! **This file controls the feature layout shared with the model artifacts.**
//!
//! ## Rules:
//! 1. Add feature → increment FEATURE_VERSION
//! 2. Change order → increment FEATURE_VERSION
//! 3. Remove feature → increment FEATURE_VERSION
//!
//! The scaler and classifier artifacts store positional weights. A layout that
//! drifts from the one used at training time does not error, it silently
//! corrupts predictions, so artifacts declare their `feature_names` and the
//! loader rejects any mismatch with [`FEATURE_NAMES`].

use serde::Serialize;

// ============================================================================
// FEATURE VERSION
// ============================================================================

/// Current feature layout version
pub const FEATURE_VERSION: u8 = 1;

// ============================================================================
// FEATURE LAYOUT (Authoritative source)
// ============================================================================

/// Canonical feature names in the exact order of the model input vector
pub const FEATURE_NAMES: [&str; FEATURE_COUNT] = [
    "Pregnancies",              // 0
    "Glucose",                  // 1: plasma glucose, mg/dL
    "BloodPressure",            // 2: diastolic, mm Hg
    "SkinThickness",            // 3: triceps skin fold, mm
    "Insulin",                  // 4: 2-hour serum insulin, mu U/ml
    "BMI",                      // 5
    "DiabetesPedigreeFunction", // 6
    "Age",                      // 7: years
];

/// Total number of features
pub const FEATURE_COUNT: usize = 8;

// ============================================================================
// VALIDATION RANGES
// ============================================================================

/// Closed validation interval for one feature
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FeatureRange {
    pub name: &'static str,
    pub min: f64,
    pub max: f64,
}

impl FeatureRange {
    pub fn contains(&self, value: f64) -> bool {
        self.min <= value && value <= self.max
    }
}

/// Accepted ranges, same order as [`FEATURE_NAMES`]
pub const FEATURE_RANGES: [FeatureRange; FEATURE_COUNT] = [
    FeatureRange { name: "Pregnancies", min: 0.0, max: 20.0 },
    FeatureRange { name: "Glucose", min: 0.0, max: 300.0 },
    FeatureRange { name: "BloodPressure", min: 0.0, max: 200.0 },
    FeatureRange { name: "SkinThickness", min: 0.0, max: 100.0 },
    FeatureRange { name: "Insulin", min: 0.0, max: 900.0 },
    FeatureRange { name: "BMI", min: 0.0, max: 70.0 },
    FeatureRange { name: "DiabetesPedigreeFunction", min: 0.0, max: 3.0 },
    FeatureRange { name: "Age", min: 18.0, max: 120.0 },
];

/// Input help shown by `/info`, keyed by the snake_case request spelling
pub const INPUT_FORMAT: [(&str, &str); FEATURE_COUNT] = [
    ("pregnancies", "Number of pregnancies (0-20)"),
    ("glucose", "Plasma glucose concentration (0-300 mg/dL)"),
    ("blood_pressure", "Diastolic blood pressure (0-200 mm Hg)"),
    ("skin_thickness", "Triceps skin fold thickness (0-100 mm)"),
    ("insulin", "2-Hour serum insulin (0-900 mu U/ml)"),
    ("bmi", "Body mass index (0-70 kg/m²)"),
    ("diabetes_pedigree_function", "Diabetes pedigree function (0-3)"),
    ("age", "Age (18-120 years)"),
];

// ============================================================================
// LOOKUPS
// ============================================================================

pub fn index_of(name: &str) -> Option<usize> {
    FEATURE_NAMES.iter().position(|f| *f == name)
}

pub fn is_canonical(name: &str) -> bool {
    index_of(name).is_some()
}

pub fn range_of(name: &str) -> Option<&'static FeatureRange> {
    index_of(name).map(|i| &FEATURE_RANGES[i])
}

/// Check an artifact's declared layout against the compiled one
pub fn matches_layout<S: AsRef<str>>(names: &[S]) -> bool {
    names.len() == FEATURE_COUNT
        && names
            .iter()
            .zip(FEATURE_NAMES.iter())
            .all(|(a, b)| a.as_ref() == *b)
}
