//! Parsing of symptom lists supplied as JSON.

use serde::Deserialize;

use crate::error::{Result, SymptomError};

#[derive(Deserialize)]
#[serde(untagged)]
enum SymptomPayload {
    List(Vec<String>),
    Object { symptoms: Vec<String> },
}

/// Parse `["a", "b"]` or `{"symptoms": ["a", "b"]}`.
pub fn parse_symptom_list(raw: &str) -> Result<Vec<String>> {
    match serde_json::from_str::<SymptomPayload>(raw) {
        Ok(SymptomPayload::List(symptoms)) | Ok(SymptomPayload::Object { symptoms }) => {
            Ok(symptoms)
        }
        Err(e) => Err(SymptomError::malformed_input(e.to_string())),
    }
}
