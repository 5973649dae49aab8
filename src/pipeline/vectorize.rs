//! Ordered feature vector
//!
//! Position `i` holds `FEATURE_NAMES[i]`. The scaler and classifier weights are
//! positional, so this order is a contract with the artifacts (see `schema`).

use serde_json::{Map, Value};

use super::coerce_f64;
use crate::error::{AppError, AppResult};
use crate::schema::{FEATURE_COUNT, FEATURE_NAMES};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeatureVector([f64; FEATURE_COUNT]);

impl FeatureVector {
    pub fn new(values: [f64; FEATURE_COUNT]) -> Self {
        Self(values)
    }

    pub fn from_record(record: &Map<String, Value>) -> AppResult<Self> {
        let mut values = [0.0; FEATURE_COUNT];

        for (slot, name) in values.iter_mut().zip(FEATURE_NAMES.iter()) {
            let raw = record.get(*name).unwrap_or(&Value::Null);
            *slot = coerce_f64(raw).ok_or_else(|| AppError::TypeConversion {
                feature: name.to_string(),
                value: raw.to_string(),
            })?;
        }

        Ok(Self(values))
    }

    pub fn as_array(&self) -> &[f64; FEATURE_COUNT] {
        &self.0
    }

    pub fn get(&self, name: &str) -> Option<f64> {
        crate::schema::index_of(name).map(|i| self.0[i])
    }

    /// Back to canonical name → value pairs
    pub fn to_record(&self) -> Map<String, Value> {
        FEATURE_NAMES
            .iter()
            .zip(self.0.iter())
            .map(|(name, value)| (name.to_string(), Value::from(*value)))
            .collect()
    }
}
