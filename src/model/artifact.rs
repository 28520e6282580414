//! Persisted bundle of vocabulary, classifier, label encoder and metadata.

use std::fs::{self, File};
use std::io::{BufReader, BufWriter};
use std::path::Path;

use bincode::Options;
use chrono::{DateTime, Utc};
use log::info;
use serde::{Deserialize, Serialize};

use crate::error::{Result, SymptomError};
use crate::model::classifier::{ClassifierModel, ProbabilisticClassifier};
use crate::model::label_encoder::LabelEncoder;
use crate::model::vocabulary::SymptomVocabulary;

/// Current on-disk layout version.
pub const ARTIFACT_FORMAT_VERSION: u32 = 1;

/// Encoding used for an artifact file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtifactFormat {
    Json,
    Bincode,
}

impl ArtifactFormat {
    /// `.json` files are JSON, everything else is bincode.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => ArtifactFormat::Json,
            _ => ArtifactFormat::Bincode,
        }
    }
}

/// A trained model and everything inference needs to interpret it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelArtifact {
    /// Feature columns, in classifier input order.
    pub symptom_columns: SymptomVocabulary,
    /// The trained classifier.
    pub model: ClassifierModel,
    /// Class index <-> disease name mapping.
    pub label_encoder: LabelEncoder,
    /// Held-out accuracy measured at training time, if any.
    pub accuracy: Option<f64>,
    /// Disease names known to the model.
    pub diseases: Vec<String>,
    /// When the model was trained.
    pub trained_at: Option<DateTime<Utc>>,
    /// Layout version of the artifact.
    pub format_version: u32,
}

impl ModelArtifact {
    /// Bundle a freshly trained model.
    pub fn new(
        symptom_columns: SymptomVocabulary,
        model: ClassifierModel,
        label_encoder: LabelEncoder,
        accuracy: Option<f64>,
    ) -> Result<Self> {
        let diseases = label_encoder.classes().to_vec();
        let artifact = ModelArtifact {
            symptom_columns,
            model,
            label_encoder,
            accuracy,
            diseases,
            trained_at: Some(Utc::now()),
            format_version: ARTIFACT_FORMAT_VERSION,
        };
        artifact.validate()?;
        Ok(artifact)
    }

    /// Load an artifact, reporting a missing file as [`SymptomError::MissingArtifact`].
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(SymptomError::missing_artifact(path));
        }

        let file = File::open(path)?;
        let size = file.metadata()?.len();
        let reader = BufReader::new(file);
        let artifact: ModelArtifact = match ArtifactFormat::from_path(path) {
            ArtifactFormat::Json => serde_json::from_reader(reader)?,
            // Length prefixes can never exceed the file size.
            ArtifactFormat::Bincode => bincode_options(size).deserialize_from(reader)?,
        };
        artifact.validate()?;

        info!(
            "Loaded {} model from {} ({} symptoms, {} diseases)",
            artifact.model.name(),
            path.display(),
            artifact.symptom_columns.len(),
            artifact.label_encoder.len()
        );
        Ok(artifact)
    }

    /// Save the artifact, creating parent directories as needed.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        let writer = BufWriter::new(File::create(path)?);
        match ArtifactFormat::from_path(path) {
            ArtifactFormat::Json => serde_json::to_writer(writer, self)?,
            ArtifactFormat::Bincode => bincode_options(u64::MAX).serialize_into(writer, self)?,
        }

        info!("Model saved to {}", path.display());
        Ok(())
    }

    /// Check that the vocabulary, classifier and label encoder agree.
    pub fn validate(&self) -> Result<()> {
        if self.format_version > ARTIFACT_FORMAT_VERSION {
            return Err(SymptomError::model(format!(
                "unsupported artifact version {} (max {ARTIFACT_FORMAT_VERSION})",
                self.format_version
            )));
        }
        if self.symptom_columns.is_empty() {
            return Err(SymptomError::model("artifact has an empty symptom vocabulary"));
        }
        if self.model.n_features() != self.symptom_columns.len() {
            return Err(SymptomError::model(format!(
                "classifier expects {} features but vocabulary has {} symptoms",
                self.model.n_features(),
                self.symptom_columns.len()
            )));
        }
        if self.model.n_classes() != self.label_encoder.len() {
            return Err(SymptomError::model(format!(
                "classifier has {} classes but label encoder has {}",
                self.model.n_classes(),
                self.label_encoder.len()
            )));
        }
        Ok(())
    }

    /// Feature dimensionality `D`.
    pub fn n_symptoms(&self) -> usize {
        self.symptom_columns.len()
    }

    /// Number of disease classes.
    pub fn n_diseases(&self) -> usize {
        self.label_encoder.len()
    }
}

/// Fixed-width integers and trailing bytes allowed, matching
/// `bincode::serialize`, with reads capped at `limit` bytes.
fn bincode_options(limit: u64) -> impl Options {
    bincode::DefaultOptions::new()
        .with_fixint_encoding()
        .allow_trailing_bytes()
        .with_limit(limit)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::gaussian_nb::GaussianNaiveBayes;
    use tempfile::TempDir;

    fn artifact() -> ModelArtifact {
        let vocabulary =
            SymptomVocabulary::new(vec!["fever".to_string(), "cough".to_string()]).unwrap();
        let (encoder, labels) = LabelEncoder::fit_transform(&["flu", "cold"]).unwrap();
        let samples = vec![vec![1.0, 0.0], vec![0.0, 1.0]];
        let model = GaussianNaiveBayes::fit(&samples, &labels, 2, 1e-9).unwrap();
        ModelArtifact::new(
            vocabulary,
            ClassifierModel::GaussianNb(model),
            encoder,
            Some(0.9),
        )
        .unwrap()
    }

    #[test]
    fn test_format_from_path() {
        assert_eq!(
            ArtifactFormat::from_path(Path::new("model.JSON")),
            ArtifactFormat::Json
        );
        assert_eq!(
            ArtifactFormat::from_path(Path::new("model.bin")),
            ArtifactFormat::Bincode
        );
        assert_eq!(
            ArtifactFormat::from_path(Path::new("model")),
            ArtifactFormat::Bincode
        );
    }

    #[test]
    fn test_load_missing_artifact() {
        let temp_dir = TempDir::new().unwrap();
        let result = ModelArtifact::load(temp_dir.path().join("absent.bin"));
        assert!(matches!(result, Err(SymptomError::MissingArtifact { .. })));
    }

    #[test]
    fn test_save_and_load_both_formats() {
        let temp_dir = TempDir::new().unwrap();
        let original = artifact();

        for name in ["nested/model.json", "model.bin"] {
            let path = temp_dir.path().join(name);
            original.save(&path).unwrap();

            let loaded = ModelArtifact::load(&path).unwrap();
            assert_eq!(loaded.symptom_columns, original.symptom_columns);
            assert_eq!(loaded.label_encoder, original.label_encoder);
            assert_eq!(loaded.accuracy, Some(0.9));
            assert_eq!(loaded.diseases, vec!["cold", "flu"]);
            assert_eq!(loaded.format_version, ARTIFACT_FORMAT_VERSION);

            let features = [1.0, 0.0];
            let expected = original.model.predict_proba(&features).unwrap();
            let actual = loaded.model.predict_proba(&features).unwrap();
            for (a, e) in actual.iter().zip(&expected) {
                assert!((a - e).abs() < 1e-9);
            }
            assert_eq!(loaded.model.predict(&features).unwrap(), 1);
        }
    }

    #[test]
    fn test_load_corrupt_bincode() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("medical_model.bin");
        // vocabulary length 1, then a string length far beyond the file
        fs::write(
            &path,
            [1, 0, 0, 0, 0, 0, 0, 0, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0, 0],
        )
        .unwrap();

        let result = ModelArtifact::load(&path);
        assert!(matches!(result, Err(SymptomError::Bincode(_))));
    }

    #[test]
    fn test_validate_rejects_mismatched_vocabulary() {
        let mut bad = artifact();
        bad.symptom_columns = SymptomVocabulary::new(vec!["fever".to_string()]).unwrap();
        assert!(matches!(bad.validate(), Err(SymptomError::Model(_))));
    }
}
