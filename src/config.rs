//! Configuration for diagnosis and training.
//!
//! Both config structs deserialize from JSON with every field optional;
//! missing fields take their defaults.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde::de::DeserializeOwned;

use crate::error::{Result, SymptomError};
use crate::model::ClassifierKind;

/// Configuration for the diagnosis pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiagnosisConfig {
    /// Maximum number of ranked predictions to report.
    pub top_k: usize,
    /// Ranked predictions must exceed this confidence (percent).
    pub min_confidence: f64,
    /// Number of vocabulary entries returned when nothing matched.
    pub vocabulary_sample_size: usize,
}

impl Default for DiagnosisConfig {
    fn default() -> Self {
        Self {
            top_k: 5,
            min_confidence: 0.5,
            vocabulary_sample_size: 30,
        }
    }
}

impl DiagnosisConfig {
    /// Load from a JSON file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let config: Self = load_json(path.as_ref())?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the pipeline cannot honor.
    pub fn validate(&self) -> Result<()> {
        if self.top_k == 0 {
            return Err(SymptomError::invalid_config("top_k must be at least 1"));
        }
        if !(0.0..100.0).contains(&self.min_confidence) {
            return Err(SymptomError::invalid_config(format!(
                "min_confidence must be in [0, 100), got {}",
                self.min_confidence
            )));
        }
        Ok(())
    }
}

/// Configuration for model training.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrainingConfig {
    /// Column holding the disease label.
    pub target_column: String,
    /// Fraction of each class held out for scoring.
    pub test_size: f64,
    /// Seed for the train/test shuffle.
    pub seed: u64,
    /// Classes with fewer samples are dropped.
    pub min_samples_per_class: usize,
    /// Classifier family to fit.
    pub classifier: ClassifierKind,
    /// Gaussian variance smoothing factor.
    pub var_smoothing: f64,
    /// Bernoulli additive smoothing.
    pub alpha: f64,
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            target_column: "diseases".to_string(),
            test_size: 0.2,
            seed: 42,
            min_samples_per_class: 2,
            classifier: ClassifierKind::Gaussian,
            var_smoothing: 1e-9,
            alpha: 1.0,
        }
    }
}

impl TrainingConfig {
    /// Load from a JSON file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let config: Self = load_json(path.as_ref())?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values training cannot honor.
    pub fn validate(&self) -> Result<()> {
        if self.target_column.trim().is_empty() {
            return Err(SymptomError::invalid_config("target_column must not be empty"));
        }
        if !(0.0..1.0).contains(&self.test_size) {
            return Err(SymptomError::invalid_config(format!(
                "test_size must be in [0, 1), got {}",
                self.test_size
            )));
        }
        if self.min_samples_per_class == 0 {
            return Err(SymptomError::invalid_config(
                "min_samples_per_class must be at least 1",
            ));
        }
        if self.var_smoothing <= 0.0 || self.alpha <= 0.0 {
            return Err(SymptomError::invalid_config(
                "var_smoothing and alpha must be positive",
            ));
        }
        Ok(())
    }
}

fn load_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let content = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}
