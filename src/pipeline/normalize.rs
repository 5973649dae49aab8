//! Request key normalization
//!
//! Clients send snake_case (backend) or camelCase (frontend) keys; the model
//! layout uses PascalCase. Unknown keys are kept so the validator can report them.

use serde_json::{Map, Value};

/// Accepted spelling → canonical feature name
pub const FIELD_ALIASES: &[(&str, &str)] = &[
    ("pregnancies", "Pregnancies"),
    ("Pregnancies", "Pregnancies"),
    ("glucose", "Glucose"),
    ("Glucose", "Glucose"),
    ("blood_pressure", "BloodPressure"),
    ("bloodPressure", "BloodPressure"),
    ("BloodPressure", "BloodPressure"),
    ("skin_thickness", "SkinThickness"),
    ("skinThickness", "SkinThickness"),
    ("SkinThickness", "SkinThickness"),
    ("insulin", "Insulin"),
    ("Insulin", "Insulin"),
    ("bmi", "BMI"),
    ("BMI", "BMI"),
    ("diabetes_pedigree_function", "DiabetesPedigreeFunction"),
    ("diabetesPedigreeFunction", "DiabetesPedigreeFunction"),
    ("DiabetesPedigreeFunction", "DiabetesPedigreeFunction"),
    ("age", "Age"),
    ("Age", "Age"),
];

pub fn canonical_name(key: &str) -> Option<&'static str> {
    FIELD_ALIASES
        .iter()
        .find(|(alias, _)| *alias == key)
        .map(|(_, canonical)| *canonical)
}

/// Rename known spellings; later keys overwrite earlier ones for the same feature
pub fn normalize(raw: Map<String, Value>) -> Map<String, Value> {
    raw.into_iter()
        .map(|(key, value)| match canonical_name(&key) {
            Some(canonical) => (canonical.to_string(), value),
            None => (key, value),
        })
        .collect()
}
