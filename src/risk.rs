//! Risk banding of the positive-class probability.
//!
//! Two schemes exist and a deployment picks exactly one (`RISK_SCHEME`).
//! Lower bounds are inclusive: a probability sitting on a threshold falls in
//! the higher band.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RiskLevel {
    Low,
    Medium,
    Moderate,
    High,
    #[serde(rename = "Very High")]
    VeryHigh,
}

impl RiskLevel {
    /// Ordinal position, comparable across both schemes
    pub fn rank(self) -> u8 {
        match self {
            RiskLevel::Low => 0,
            RiskLevel::Medium | RiskLevel::Moderate => 1,
            RiskLevel::High => 2,
            RiskLevel::VeryHigh => 3,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            RiskLevel::Low => "Low",
            RiskLevel::Medium => "Medium",
            RiskLevel::Moderate => "Moderate",
            RiskLevel::High => "High",
            RiskLevel::VeryHigh => "Very High",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RiskScheme {
    /// Low < 0.3 ≤ Medium < 0.6 ≤ High
    #[default]
    ThreeBand,
    /// Low < 0.3 ≤ Moderate < 0.6 ≤ High < 0.8 ≤ Very High
    FourBand,
}

impl RiskScheme {
    pub fn classify(self, probability: f64) -> RiskLevel {
        match self {
            RiskScheme::ThreeBand => {
                if probability >= 0.6 {
                    RiskLevel::High
                } else if probability >= 0.3 {
                    RiskLevel::Medium
                } else {
                    RiskLevel::Low
                }
            }
            RiskScheme::FourBand => {
                if probability >= 0.8 {
                    RiskLevel::VeryHigh
                } else if probability >= 0.6 {
                    RiskLevel::High
                } else if probability >= 0.3 {
                    RiskLevel::Moderate
                } else {
                    RiskLevel::Low
                }
            }
        }
    }

    /// Band lower bounds, for `/info`
    pub fn thresholds(self) -> Vec<(RiskLevel, f64)> {
        match self {
            RiskScheme::ThreeBand => vec![
                (RiskLevel::Low, 0.0),
                (RiskLevel::Medium, 0.3),
                (RiskLevel::High, 0.6),
            ],
            RiskScheme::FourBand => vec![
                (RiskLevel::Low, 0.0),
                (RiskLevel::Moderate, 0.3),
                (RiskLevel::High, 0.6),
                (RiskLevel::VeryHigh, 0.8),
            ],
        }
    }
}

impl fmt::Display for RiskScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RiskScheme::ThreeBand => f.write_str("three_band"),
            RiskScheme::FourBand => f.write_str("four_band"),
        }
    }
}

impl FromStr for RiskScheme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "three_band" | "3" => Ok(RiskScheme::ThreeBand),
            "four_band" | "4" => Ok(RiskScheme::FourBand),
            other => Err(format!("unknown risk scheme '{}'", other)),
        }
    }
}
