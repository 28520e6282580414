//! Error types for the symptom-checker library.
//!
//! All fallible operations return [`SymptomError`] through the crate-wide
//! [`Result`] alias. The diagnosis layer recovers these errors into
//! `success = false` response records, so callers of
//! [`DiagnosisEngine::diagnose`](crate::diagnosis::DiagnosisEngine::diagnose)
//! never see them directly.
//!
//! # Examples
//!
//! ```
//! use symptom_checker::error::{SymptomError, Result};
//!
//! fn example_operation() -> Result<()> {
//!     Err(SymptomError::malformed_input("expected a list of strings"))
//! }
//!
//! match example_operation() {
//!     Ok(_) => println!("Success"),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// The main error type for symptom-checker operations.
#[derive(Error, Debug)]
pub enum SymptomError {
    /// I/O errors (artifact files, datasets, config files)
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// CSV dataset errors
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Binary artifact encoding errors
    #[error("Serialization error: {0}")]
    Bincode(#[from] bincode::Error),

    /// The trained artifact does not exist at the given path.
    #[error("Model artifact not found: {}", path.display())]
    MissingArtifact { path: PathBuf },

    /// None of the reported symptoms resolved against the vocabulary.
    #[error("No matching symptoms found in the dataset")]
    NoMatch {
        /// Inputs that could not be resolved, in input order.
        unmatched: Vec<String>,
        /// Leading slice of the vocabulary to help the caller correct input.
        available: Vec<String>,
        /// Full vocabulary size.
        total_available: usize,
    },

    /// The symptom list could not be parsed.
    #[error("Malformed input: {0}")]
    MalformedInput(String),

    /// Failure while resolving, encoding, classifying or ranking.
    #[error("Inference error: {0}")]
    Inference(String),

    /// Inconsistent or unusable model state.
    #[error("Model error: {0}")]
    Model(String),

    /// Training-related errors
    #[error("Training error: {0}")]
    Training(String),

    /// Invalid configuration values
    #[error("Invalid configuration: {0}")]
    Config(String),
}

/// Result type alias for operations that may fail with SymptomError.
pub type Result<T> = std::result::Result<T, SymptomError>;

impl SymptomError {
    /// Create a new missing-artifact error.
    pub fn missing_artifact<P: Into<PathBuf>>(path: P) -> Self {
        SymptomError::MissingArtifact { path: path.into() }
    }

    /// Create a new malformed-input error.
    pub fn malformed_input<S: Into<String>>(msg: S) -> Self {
        SymptomError::MalformedInput(msg.into())
    }

    /// Create a new inference error.
    pub fn inference<S: Into<String>>(msg: S) -> Self {
        SymptomError::Inference(msg.into())
    }

    /// Create a new model error.
    pub fn model<S: Into<String>>(msg: S) -> Self {
        SymptomError::Model(msg.into())
    }

    /// Create a new training error.
    pub fn training<S: Into<String>>(msg: S) -> Self {
        SymptomError::Training(msg.into())
    }

    /// Create a new invalid config error.
    pub fn invalid_config<S: Into<String>>(msg: S) -> Self {
        SymptomError::Config(msg.into())
    }

    /// Returns true if this error means the artifact was never produced.
    pub fn is_missing_artifact(&self) -> bool {
        matches!(self, SymptomError::MissingArtifact { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_construction() {
        let error = SymptomError::inference("bad distribution");
        assert_eq!(error.to_string(), "Inference error: bad distribution");

        let error = SymptomError::model("feature count mismatch");
        assert_eq!(error.to_string(), "Model error: feature count mismatch");

        let error = SymptomError::invalid_config("top_k must be positive");
        assert_eq!(
            error.to_string(),
            "Invalid configuration: top_k must be positive"
        );
    }

    #[test]
    fn test_missing_artifact_message() {
        let error = SymptomError::missing_artifact("models/medical_model.bin");
        assert!(error.is_missing_artifact());
        assert_eq!(
            error.to_string(),
            "Model artifact not found: models/medical_model.bin"
        );
    }

    #[test]
    fn test_no_match_message() {
        let error = SymptomError::NoMatch {
            unmatched: vec!["xyz".to_string()],
            available: vec![],
            total_available: 0,
        };
        assert_eq!(error.to_string(), "No matching symptoms found in the dataset");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_error = io::Error::new(io::ErrorKind::NotFound, "File not found");
        let error = SymptomError::from(io_error);

        match error {
            SymptomError::Io(_) => {} // Expected
            _ => panic!("Expected IO error variant"),
        }
    }
}
