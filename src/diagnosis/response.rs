//! Structured diagnosis responses.
//!
//! Responses serialize to flat JSON documents. Success and failure records
//! are told apart by their `success` field.

use serde::{Serialize, Serializer};

use crate::diagnosis::ranking::DiseaseConfidence;
use crate::error::Result;

/// Message reported when no input symptom resolved.
pub const NO_MATCH_ERROR: &str = "No matching symptoms found in the dataset";

/// Metadata about the model that produced a diagnosis.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModelInfo {
    /// Held-out accuracy; serialized as `"Unknown"` when absent.
    #[serde(serialize_with = "serialize_accuracy")]
    pub accuracy: Option<f64>,
    pub total_diseases: usize,
    pub total_symptoms: usize,
}

fn serialize_accuracy<S: Serializer>(
    accuracy: &Option<f64>,
    serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
    match accuracy {
        Some(value) => serializer.serialize_f64(*value),
        None => serializer.serialize_str("Unknown"),
    }
}

/// A successful diagnosis.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DiagnosisReport {
    pub success: bool,
    pub primary_prediction: String,
    pub confidence: f64,
    pub top_predictions: Vec<DiseaseConfidence>,
    pub symptoms_analyzed: Vec<String>,
    pub unmatched_symptoms: Vec<String>,
    pub total_symptoms: usize,
    pub matched_count: usize,
    pub recommendations: Vec<String>,
    pub model_info: ModelInfo,
}

/// No input symptom resolved; carries context for correcting the input.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NoMatchReport {
    pub success: bool,
    pub error: String,
    pub unmatched_symptoms: Vec<String>,
    pub matched_count: usize,
    pub available_symptoms: Vec<String>,
    pub total_available: usize,
}

/// Any other recovered failure.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FailureReport {
    pub success: bool,
    pub error: String,
}

impl FailureReport {
    pub fn new<S: Into<String>>(error: S) -> Self {
        Self {
            success: false,
            error: error.into(),
        }
    }
}

/// The result of a diagnosis request.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum PredictionResponse {
    Success(DiagnosisReport),
    NoMatch(NoMatchReport),
    Failure(FailureReport),
}

impl PredictionResponse {
    pub fn is_success(&self) -> bool {
        matches!(self, PredictionResponse::Success(_))
    }

    /// Error message of a failed response.
    pub fn error(&self) -> Option<&str> {
        match self {
            PredictionResponse::Success(_) => None,
            PredictionResponse::NoMatch(report) => Some(&report.error),
            PredictionResponse::Failure(report) => Some(&report.error),
        }
    }

    /// The diagnosis, if the request succeeded.
    pub fn report(&self) -> Option<&DiagnosisReport> {
        match self {
            PredictionResponse::Success(report) => Some(report),
            _ => None,
        }
    }

    /// Serialize to a JSON string.
    pub fn to_json(&self, pretty: bool) -> Result<String> {
        Ok(if pretty {
            serde_json::to_string_pretty(self)?
        } else {
            serde_json::to_string(self)?
        })
    }
}

impl From<DiagnosisReport> for PredictionResponse {
    fn from(report: DiagnosisReport) -> Self {
        PredictionResponse::Success(report)
    }
}
