//! Binary classifiers over the scaled feature vector.
//!
//! Artifacts come in several families. Some expose class probabilities, some
//! only a decision value. The difference is resolved once, when the artifact
//! is turned into a `Box<dyn Classifier>`; request handling only ever calls
//! [`Classifier::predict_with_probability`].

use std::fmt;

use serde::{Deserialize, Serialize};

use super::{check_layout, to_row, ArtifactError, ClassOutput};
use crate::pipeline::FeatureVector;
use crate::schema::FEATURE_COUNT;

pub trait Classifier: Send + Sync + fmt::Debug {
    /// Model family, as stored in the artifact
    fn kind(&self) -> &'static str;

    /// False when probabilities are the hard label
    fn calibrated(&self) -> bool;

    fn predict_with_probability(&self, input: &FeatureVector) -> ClassOutput;
}

// ============================================================================
// ARTIFACT FORMAT
// ============================================================================

/// On-disk form: `diabetes_model_<model_type>_<version>.json`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "model_type", rename_all = "snake_case")]
pub enum ModelArtifact {
    LogisticRegression {
        feature_names: Vec<String>,
        coefficients: Vec<f64>,
        intercept: f64,
    },
    LinearSvc {
        feature_names: Vec<String>,
        coefficients: Vec<f64>,
        intercept: f64,
        /// Sigmoid calibration of the decision value, if it was fitted
        #[serde(default)]
        platt: Option<PlattScaling>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlattScaling {
    pub a: f64,
    pub b: f64,
}

impl ModelArtifact {
    /// Capability check: every variant ends up behind the same interface
    pub fn into_classifier(self) -> Result<Box<dyn Classifier>, ArtifactError> {
        match self {
            ModelArtifact::LogisticRegression { feature_names, coefficients, intercept } => {
                check_layout(&feature_names)?;
                let linear = LinearModel::new(to_row("coefficients", coefficients)?, intercept)?;
                Ok(Box::new(LogisticRegression { linear }))
            }
            ModelArtifact::LinearSvc { feature_names, coefficients, intercept, platt } => {
                check_layout(&feature_names)?;
                let linear = LinearModel::new(to_row("coefficients", coefficients)?, intercept)?;
                match platt {
                    Some(platt) => Ok(Box::new(PlattCalibrated { linear, platt })),
                    None => Ok(Box::new(HardLabel { linear })),
                }
            }
        }
    }
}

// ============================================================================
// MODELS
// ============================================================================

#[derive(Debug, Clone)]
struct LinearModel {
    weights: [f64; FEATURE_COUNT],
    intercept: f64,
}

impl LinearModel {
    fn new(weights: [f64; FEATURE_COUNT], intercept: f64) -> Result<Self, ArtifactError> {
        if !intercept.is_finite() {
            return Err(ArtifactError::NonFinite { field: "intercept" });
        }
        Ok(Self { weights, intercept })
    }

    fn decision(&self, input: &FeatureVector) -> f64 {
        self.weights
            .iter()
            .zip(input.as_array())
            .map(|(w, x)| w * x)
            .sum::<f64>()
            + self.intercept
    }
}

fn label_of(decision: f64) -> u8 {
    u8::from(decision > 0.0)
}

fn sigmoid(z: f64) -> f64 {
    if z >= 0.0 {
        1.0 / (1.0 + (-z).exp())
    } else {
        let e = z.exp();
        e / (1.0 + e)
    }
}

/// p = sigmoid(w·x + b)
#[derive(Debug)]
pub struct LogisticRegression {
    linear: LinearModel,
}

impl Classifier for LogisticRegression {
    fn kind(&self) -> &'static str {
        "logistic_regression"
    }

    fn calibrated(&self) -> bool {
        true
    }

    fn predict_with_probability(&self, input: &FeatureVector) -> ClassOutput {
        let z = self.linear.decision(input);
        ClassOutput {
            label: label_of(z),
            probability: sigmoid(z),
        }
    }
}

/// p = 1 / (1 + exp(a·f + b)) over the SVM decision value f
#[derive(Debug)]
pub struct PlattCalibrated {
    linear: LinearModel,
    platt: PlattScaling,
}

impl Classifier for PlattCalibrated {
    fn kind(&self) -> &'static str {
        "linear_svc"
    }

    fn calibrated(&self) -> bool {
        true
    }

    fn predict_with_probability(&self, input: &FeatureVector) -> ClassOutput {
        let f = self.linear.decision(input);
        ClassOutput {
            label: label_of(f),
            probability: sigmoid(-(self.platt.a * f + self.platt.b)),
        }
    }
}

/// Label-only model; the probability is the label itself
#[derive(Debug)]
pub struct HardLabel {
    linear: LinearModel,
}

impl Classifier for HardLabel {
    fn kind(&self) -> &'static str {
        "linear_svc"
    }

    fn calibrated(&self) -> bool {
        false
    }

    fn predict_with_probability(&self, input: &FeatureVector) -> ClassOutput {
        let label = label_of(self.linear.decision(input));
        ClassOutput {
            label,
            probability: f64::from(label),
        }
    }
}
