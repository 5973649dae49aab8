//! Feature record validation
//!
//! Every check runs; errors are collected rather than short-circuited.

use std::collections::BTreeSet;

use serde_json::{Map, Value};

use super::coerce_f64;
use crate::schema::{self, FEATURE_NAMES, FEATURE_RANGES};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValidationReport {
    pub errors: Vec<String>,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}

pub fn validate(record: &Map<String, Value>) -> ValidationReport {
    let mut errors = Vec::new();

    let missing: Vec<&str> = FEATURE_NAMES
        .iter()
        .copied()
        .filter(|name| !record.contains_key(*name))
        .collect();
    if !missing.is_empty() {
        errors.push(format!("Missing features: {}", missing.join(", ")));
    }

    let extra: BTreeSet<&str> = record
        .keys()
        .map(String::as_str)
        .filter(|key| !schema::is_canonical(key))
        .collect();
    if !extra.is_empty() {
        let extra: Vec<&str> = extra.into_iter().collect();
        errors.push(format!("Unknown features: {}", extra.join(", ")));
    }

    for range in FEATURE_RANGES.iter() {
        // non-numeric values are the vectorizer's to reject
        let Some(value) = record.get(range.name).and_then(coerce_f64) else {
            continue;
        };
        if !range.contains(value) {
            errors.push(format!(
                "{} value {} is out of range [{}, {}]",
                range.name, value, range.min, range.max
            ));
        }
    }

    ValidationReport { errors }
}
