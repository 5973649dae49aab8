//! Artifact loader
//!
//! Reads the versioned model / scaler / metadata files. Model and scaler are
//! loaded independently so `/health` can report each one.

use std::fs;
use std::path::Path;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use sha2::{Digest, Sha256};

use super::{ArtifactError, Classifier, ModelArtifact, ScalerArtifact, StandardScaler};

const DEFAULT_MODEL_NAME: &str = "Logistic Regression";
const DEFAULT_TRAINING_DATE: &str = "2025-10-23";

/// A parsed artifact plus the SHA-256 of the file it came from
#[derive(Debug)]
pub struct Loaded<T> {
    pub value: T,
    pub sha256: String,
}

/// Digests of the artifacts actually loaded, for `/info`
#[derive(Debug, Clone, Default, Serialize)]
pub struct ArtifactDigests {
    pub model_sha256: Option<String>,
    pub scaler_sha256: Option<String>,
}

/// Optional training-side description of the model
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelMetadata {
    #[serde(default = "default_model_name")]
    pub model_name: String,
    #[serde(default)]
    pub model_type: Option<String>,
    #[serde(default)]
    pub model_version: Option<String>,
    #[serde(default = "default_training_date")]
    pub training_date: String,
    #[serde(default)]
    pub performance_metrics: Map<String, Value>,
}

fn default_model_name() -> String {
    DEFAULT_MODEL_NAME.to_string()
}

fn default_training_date() -> String {
    DEFAULT_TRAINING_DATE.to_string()
}

impl ModelMetadata {
    pub fn fallback(version: &str) -> Self {
        Self {
            model_name: default_model_name(),
            model_type: None,
            model_version: Some(version.to_string()),
            training_date: default_training_date(),
            performance_metrics: Map::new(),
        }
    }
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<Loaded<T>, ArtifactError> {
    let bytes = fs::read(path).map_err(|source| ArtifactError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let value = serde_json::from_slice(&bytes).map_err(|source| ArtifactError::Json {
        path: path.to_path_buf(),
        source,
    })?;

    let mut hasher = Sha256::new();
    hasher.update(&bytes);

    Ok(Loaded {
        value,
        sha256: format!("{:x}", hasher.finalize()),
    })
}

pub fn load_scaler(path: &Path) -> Result<Loaded<StandardScaler>, ArtifactError> {
    tracing::info!("Loading scaler from: {}", path.display());
    let Loaded { value, sha256 } = read_json::<ScalerArtifact>(path)?;

    Ok(Loaded {
        value: StandardScaler::from_artifact(value)?,
        sha256,
    })
}

pub fn load_model(path: &Path) -> Result<Loaded<Box<dyn Classifier>>, ArtifactError> {
    tracing::info!("Loading model from: {}", path.display());
    let Loaded { value, sha256 } = read_json::<ModelArtifact>(path)?;
    let model = value.into_classifier()?;

    if model.calibrated() {
        tracing::info!(kind = model.kind(), "Model exposes class probabilities");
    } else {
        tracing::warn!(
            kind = model.kind(),
            "Model has no probability output, probabilities will be hard labels"
        );
    }

    Ok(Loaded { value: model, sha256 })
}

/// Metadata is optional: any failure falls back to defaults
pub fn load_metadata(path: &Path, version: &str) -> ModelMetadata {
    if !path.exists() {
        tracing::warn!("Metadata file not found at {}, using defaults", path.display());
        return ModelMetadata::fallback(version);
    }

    match read_json::<ModelMetadata>(path) {
        Ok(Loaded { value, .. }) => {
            if let Some(found) = value.model_version.as_deref() {
                if found != version {
                    tracing::warn!(
                        "Metadata version {} does not match configured version {}",
                        found,
                        version
                    );
                }
            }
            tracing::info!("Model metadata loaded");
            value
        }
        Err(e) => {
            tracing::warn!("Ignoring unreadable metadata: {}", e);
            ModelMetadata::fallback(version)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::FEATURE_NAMES;
    use serde_json::json;
    use std::io::Write;

    fn write(dir: &Path, name: &str, body: &str) -> std::path::PathBuf {
        let path = dir.join(name);
        let mut file = fs::File::create(&path).unwrap();
        file.write_all(body.as_bytes()).unwrap();
        path
    }

    #[test]
    fn test_load_scaler_and_digest() {
        let dir = tempfile::tempdir().unwrap();
        let body = json!({
            "feature_names": FEATURE_NAMES,
            "mean": vec![0.0; 8],
            "scale": vec![1.0; 8]
        })
        .to_string();
        let path = write(dir.path(), "scaler_v1.json", &body);

        let loaded = load_scaler(&path).unwrap();
        assert_eq!(loaded.sha256.len(), 64);
        assert_eq!(loaded.value, StandardScaler::new([0.0; 8], [1.0; 8]));
    }

    #[test]
    fn test_load_model_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_model(&dir.path().join("nope.json")).unwrap_err();
        assert!(matches!(err, ArtifactError::Io { .. }));
    }

    #[test]
    fn test_load_model_garbage() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(dir.path(), "model.json", "{\"model_type\": \"random_forest\"}");
        assert!(matches!(load_model(&path), Err(ArtifactError::Json { .. })));
    }

    #[test]
    fn test_metadata_defaults_when_missing() {
        let dir = tempfile::tempdir().unwrap();
        let meta = load_metadata(&dir.path().join("model_metadata_v2.json"), "v2");
        assert_eq!(meta.model_name, "Logistic Regression");
        assert_eq!(meta.model_version.as_deref(), Some("v2"));
        assert!(meta.performance_metrics.is_empty());
    }

    #[test]
    fn test_metadata_partial_document() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(
            dir.path(),
            "model_metadata_v3.json",
            r#"{"model_name": "Tuned LR", "performance_metrics": {"roc_auc": 0.83}}"#,
        );

        let meta = load_metadata(&path, "v3");
        assert_eq!(meta.model_name, "Tuned LR");
        assert_eq!(meta.training_date, "2025-10-23");
        assert_eq!(meta.performance_metrics["roc_auc"], json!(0.83));
    }
}
