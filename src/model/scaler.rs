//! Standard scaler fitted at training time

use serde::{Deserialize, Serialize};

use super::{check_layout, to_row, ArtifactError};
use crate::pipeline::FeatureVector;
use crate::schema::FEATURE_COUNT;

/// On-disk form: `scaler_<version>.json`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScalerArtifact {
    pub feature_names: Vec<String>,
    pub mean: Vec<f64>,
    pub scale: Vec<f64>,
}

/// Per-feature `(x - mean) / scale`
#[derive(Debug, Clone, PartialEq)]
pub struct StandardScaler {
    mean: [f64; FEATURE_COUNT],
    scale: [f64; FEATURE_COUNT],
}

impl StandardScaler {
    pub fn new(mean: [f64; FEATURE_COUNT], scale: [f64; FEATURE_COUNT]) -> Self {
        // a constant training column has scale 0; it is stored as 1
        let scale = scale.map(|s| if s == 0.0 { 1.0 } else { s });
        Self { mean, scale }
    }

    pub fn from_artifact(artifact: ScalerArtifact) -> Result<Self, ArtifactError> {
        check_layout(&artifact.feature_names)?;
        let mean = to_row("mean", artifact.mean)?;
        let scale = to_row("scale", artifact.scale)?;
        Ok(Self::new(mean, scale))
    }

    pub fn transform(&self, input: &FeatureVector) -> FeatureVector {
        let raw = input.as_array();
        FeatureVector::new(std::array::from_fn(|i| (raw[i] - self.mean[i]) / self.scale[i]))
    }

    #[cfg(test)]
    pub fn to_artifact(&self) -> ScalerArtifact {
        ScalerArtifact {
            feature_names: crate::schema::FEATURE_NAMES
                .iter()
                .map(|s| s.to_string())
                .collect(),
            mean: self.mean.to_vec(),
            scale: self.scale.to_vec(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transform_is_affine_per_feature() {
        let scaler = StandardScaler::new([1.0, 100.0, 70.0, 20.0, 80.0, 30.0, 0.5, 30.0], [2.0; 8]);
        let input = FeatureVector::new([3.0, 120.0, 70.0, 10.0, 80.0, 31.0, 0.5, 40.0]);

        let scaled = scaler.transform(&input);
        assert_eq!(
            scaled.as_array(),
            &[1.0, 10.0, 0.0, -5.0, 0.0, 0.5, 0.0, 5.0]
        );
    }

    #[test]
    fn test_zero_scale_is_identity_shift() {
        let mut scale = [1.0; 8];
        scale[4] = 0.0;
        let scaler = StandardScaler::new([0.0; 8], scale);

        let scaled = scaler.transform(&FeatureVector::new([5.0; 8]));
        assert_eq!(scaled.as_array()[4], 5.0);
    }

    #[test]
    fn test_from_artifact_checks_layout() {
        let mut artifact = StandardScaler::new([0.0; 8], [1.0; 8]).to_artifact();
        assert!(StandardScaler::from_artifact(artifact.clone()).is_ok());

        artifact.feature_names.reverse();
        assert!(matches!(
            StandardScaler::from_artifact(artifact),
            Err(ArtifactError::LayoutMismatch(_))
        ));
    }

    #[test]
    fn test_from_artifact_checks_shape() {
        let mut artifact = StandardScaler::new([0.0; 8], [1.0; 8]).to_artifact();
        artifact.scale.pop();
        assert!(matches!(
            StandardScaler::from_artifact(artifact),
            Err(ArtifactError::Shape { field: "scale", .. })
        ));
    }
}
