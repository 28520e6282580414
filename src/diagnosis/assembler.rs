//! Composition of response records.

use log::error;

use crate::diagnosis::ranking::DiseaseConfidence;
use crate::diagnosis::resolver::Resolution;
use crate::diagnosis::response::{
    DiagnosisReport, FailureReport, ModelInfo, NO_MATCH_ERROR, NoMatchReport, PredictionResponse,
};
use crate::error::SymptomError;
use crate::model::{ModelArtifact, SymptomVocabulary};

/// Message for a missing model artifact.
pub const MISSING_ARTIFACT_ERROR: &str =
    "ML model not found. Please train the model first by running: symptom-checker train --dataset <CSV>";

/// Message for an unparsable symptom list.
pub const MALFORMED_INPUT_ERROR: &str = "Invalid JSON input";

/// Builds the terminal records of the diagnosis pipeline.
pub struct ResultAssembler;

impl ResultAssembler {
    /// Error raised when nothing resolved, carrying a vocabulary sample.
    pub fn no_match_error(
        resolution: Resolution,
        vocabulary: &SymptomVocabulary,
        sample_size: usize,
    ) -> SymptomError {
        SymptomError::NoMatch {
            unmatched: resolution.unmatched,
            available: vocabulary.sample(sample_size),
            total_available: vocabulary.len(),
        }
    }

    /// Successful diagnosis record.
    #[allow(clippy::too_many_arguments)]
    pub fn success(
        artifact: &ModelArtifact,
        total_symptoms: usize,
        resolution: Resolution,
        primary_prediction: String,
        confidence: f64,
        top_predictions: Vec<DiseaseConfidence>,
        recommendations: Vec<String>,
    ) -> DiagnosisReport {
        let symptoms_analyzed = resolution.matched_names();
        DiagnosisReport {
            success: true,
            primary_prediction,
            confidence,
            top_predictions,
            matched_count: symptoms_analyzed.len(),
            symptoms_analyzed,
            unmatched_symptoms: resolution.unmatched,
            total_symptoms,
            recommendations,
            model_info: ModelInfo {
                accuracy: artifact.accuracy,
                total_diseases: artifact.n_diseases(),
                total_symptoms: artifact.n_symptoms(),
            },
        }
    }

    /// Recover an error into a `success = false` record.
    pub fn from_error(error: SymptomError) -> PredictionResponse {
        match error {
            SymptomError::NoMatch {
                unmatched,
                available,
                total_available,
            } => PredictionResponse::NoMatch(NoMatchReport {
                success: false,
                error: NO_MATCH_ERROR.to_string(),
                unmatched_symptoms: unmatched,
                matched_count: 0,
                available_symptoms: available,
                total_available,
            }),
            SymptomError::MissingArtifact { path } => {
                error!("Model artifact missing at {}", path.display());
                PredictionResponse::Failure(FailureReport::new(MISSING_ARTIFACT_ERROR))
            }
            SymptomError::MalformedInput(detail) => {
                error!("Malformed symptom input: {detail}");
                PredictionResponse::Failure(FailureReport::new(MALFORMED_INPUT_ERROR))
            }
            other => {
                error!("Prediction failed: {other}");
                PredictionResponse::Failure(FailureReport::new(format!(
                    "Prediction failed: {other}"
                )))
            }
        }
    }
}
