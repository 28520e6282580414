//! The fixed, ordered symptom vocabulary.
//!
//! Every entry is a feature column of the trained classifier, so the
//! vocabulary's order defines the layout of every feature vector.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::{Result, SymptomError};

/// Ordered list of unique symptom names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<String>", into = "Vec<String>")]
pub struct SymptomVocabulary {
    symptoms: Vec<String>,
}

impl SymptomVocabulary {
    /// Create a vocabulary, rejecting blank and duplicate names.
    ///
    /// A blank entry would be a substring of every input and swallow all
    /// non-exact matches.
    pub fn new(symptoms: Vec<String>) -> Result<Self> {
        let mut seen = HashSet::with_capacity(symptoms.len());
        for (index, symptom) in symptoms.iter().enumerate() {
            if symptom.trim().is_empty() {
                return Err(SymptomError::model(format!(
                    "blank symptom name at column {index}"
                )));
            }
            if !seen.insert(symptom.as_str()) {
                return Err(SymptomError::model(format!(
                    "duplicate symptom in vocabulary: {symptom:?}"
                )));
            }
        }

        Ok(SymptomVocabulary { symptoms })
    }

    /// Number of symptoms (the feature dimensionality `D`).
    pub fn len(&self) -> usize {
        self.symptoms.len()
    }

    /// Check if the vocabulary is empty.
    pub fn is_empty(&self) -> bool {
        self.symptoms.is_empty()
    }

    /// Get the symptom name at the given index.
    pub fn get(&self, index: usize) -> Option<&str> {
        self.symptoms.get(index).map(String::as_str)
    }

    /// Index of the first entry equal to `name` byte-for-byte.
    pub fn position(&self, name: &str) -> Option<usize> {
        self.symptoms.iter().position(|s| s == name)
    }

    /// Iterate over symptom names in stored order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.symptoms.iter().map(String::as_str)
    }

    /// All symptom names in stored order.
    pub fn as_slice(&self) -> &[String] {
        &self.symptoms
    }

    /// The first `limit` entries in stored order.
    pub fn sample(&self, limit: usize) -> Vec<String> {
        self.symptoms.iter().take(limit).cloned().collect()
    }

    /// Entries containing `query` case-insensitively, in stored order.
    pub fn search(&self, query: &str, limit: usize) -> Vec<String> {
        let needle = query.trim().to_lowercase();
        self.symptoms
            .iter()
            .filter(|s| s.to_lowercase().contains(&needle))
            .take(limit)
            .cloned()
            .collect()
    }
}

impl TryFrom<Vec<String>> for SymptomVocabulary {
    type Error = SymptomError;

    fn try_from(symptoms: Vec<String>) -> Result<Self> {
        SymptomVocabulary::new(symptoms)
    }
}

impl From<SymptomVocabulary> for Vec<String> {
    fn from(vocabulary: SymptomVocabulary) -> Self {
        vocabulary.symptoms
    }
}
