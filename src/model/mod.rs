//! Pre-fit model artifacts: scaler, classifier and their loader

pub mod artifacts;
pub mod classifier;
pub mod scaler;

use std::path::PathBuf;

use thiserror::Error;

use crate::schema::FEATURE_COUNT;

pub use artifacts::{ArtifactDigests, ModelMetadata};
pub use classifier::{Classifier, ModelArtifact};
pub use scaler::{ScalerArtifact, StandardScaler};

/// Normalized output of every classifier
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClassOutput {
    /// Predicted class, 0 or 1
    pub label: u8,
    /// Probability of the positive class
    pub probability: f64,
}

#[derive(Debug, Error)]
pub enum ArtifactError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {source}")]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("feature layout mismatch, artifact declares [{0}]")]
    LayoutMismatch(String),

    #[error("{field} has {actual} values, expected {expected}")]
    Shape {
        field: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("{field} contains non-finite values")]
    NonFinite { field: &'static str },
}

/// Turn a stored parameter list into a fixed-width row
pub(crate) fn to_row(field: &'static str, values: Vec<f64>) -> Result<[f64; FEATURE_COUNT], ArtifactError> {
    let actual = values.len();
    let row: [f64; FEATURE_COUNT] = values.try_into().map_err(|_| ArtifactError::Shape {
        field,
        expected: FEATURE_COUNT,
        actual,
    })?;

    if row.iter().any(|v| !v.is_finite()) {
        return Err(ArtifactError::NonFinite { field });
    }
    Ok(row)
}

pub(crate) fn check_layout(names: &[String]) -> Result<(), ArtifactError> {
    if crate::schema::matches_layout(names) {
        Ok(())
    } else {
        Err(ArtifactError::LayoutMismatch(names.join(", ")))
    }
}
