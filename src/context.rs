//! Service context: everything loaded once at startup and shared read-only

use crate::config::Config;
use crate::model::artifacts::{self, Loaded};
use crate::model::{ArtifactDigests, Classifier, ModelMetadata, StandardScaler};
use crate::risk::RiskScheme;

/// Immutable after construction; request handlers only borrow from it.
#[derive(Debug)]
pub struct ServiceContext {
    model: Option<Box<dyn Classifier>>,
    scaler: Option<StandardScaler>,
    metadata: ModelMetadata,
    digests: ArtifactDigests,
    model_version: String,
    risk_scheme: RiskScheme,
}

impl ServiceContext {
    /// Load artifacts named by `config`. Failures leave the slot empty and
    /// the service unhealthy; they never abort startup.
    pub fn load(config: &Config) -> Self {
        let mut digests = ArtifactDigests::default();

        let model = match artifacts::load_model(&config.model_path()) {
            Ok(Loaded { value, sha256 }) => {
                digests.model_sha256 = Some(sha256);
                Some(value)
            }
            Err(e) => {
                tracing::error!("Error loading model: {}", e);
                None
            }
        };

        let scaler = match artifacts::load_scaler(&config.scaler_path()) {
            Ok(Loaded { value, sha256 }) => {
                digests.scaler_sha256 = Some(sha256);
                Some(value)
            }
            Err(e) => {
                tracing::error!("Error loading scaler: {}", e);
                None
            }
        };

        let metadata = artifacts::load_metadata(&config.metadata_path(), &config.model_version);

        if model.is_some() && scaler.is_some() {
            tracing::info!("ML artifacts loaded successfully");
        } else {
            tracing::warn!("Service starting without a complete artifact set");
        }

        Self {
            model,
            scaler,
            metadata,
            digests,
            model_version: config.model_version.clone(),
            risk_scheme: config.risk_scheme,
        }
    }

    /// Assemble a context from already-built parts
    pub fn from_parts(
        model: Option<Box<dyn Classifier>>,
        scaler: Option<StandardScaler>,
        metadata: ModelMetadata,
        model_version: impl Into<String>,
        risk_scheme: RiskScheme,
    ) -> Self {
        Self {
            model,
            scaler,
            metadata,
            digests: ArtifactDigests::default(),
            model_version: model_version.into(),
            risk_scheme,
        }
    }

    pub fn model(&self) -> Option<&dyn Classifier> {
        self.model.as_deref()
    }

    pub fn scaler(&self) -> Option<&StandardScaler> {
        self.scaler.as_ref()
    }

    pub fn model_loaded(&self) -> bool {
        self.model.is_some()
    }

    pub fn scaler_loaded(&self) -> bool {
        self.scaler.is_some()
    }

    pub fn is_ready(&self) -> bool {
        self.model_loaded() && self.scaler_loaded()
    }

    pub fn metadata(&self) -> &ModelMetadata {
        &self.metadata
    }

    pub fn digests(&self) -> &ArtifactDigests {
        &self.digests
    }

    pub fn model_version(&self) -> &str {
        &self.model_version
    }

    pub fn risk_scheme(&self) -> RiskScheme {
        self.risk_scheme
    }
}
