//! Mapping between disease names and internal class indices.

use serde::{Deserialize, Serialize};

use crate::error::{Result, SymptomError};

/// Encodes disease names as class indices in sorted name order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelEncoder {
    classes: Vec<String>,
}

impl LabelEncoder {
    /// Fit on a set of labels; classes are the sorted unique names.
    pub fn fit<S: AsRef<str>>(labels: &[S]) -> Self {
        let mut classes: Vec<String> = labels.iter().map(|l| l.as_ref().to_string()).collect();
        classes.sort();
        classes.dedup();
        LabelEncoder { classes }
    }

    /// Fit and encode in one step.
    pub fn fit_transform<S: AsRef<str>>(labels: &[S]) -> Result<(Self, Vec<usize>)> {
        let encoder = Self::fit(labels);
        let encoded = labels
            .iter()
            .map(|l| encoder.transform(l.as_ref()))
            .collect::<Result<Vec<_>>>()?;
        Ok((encoder, encoded))
    }

    /// Class index of a disease name.
    pub fn transform(&self, label: &str) -> Result<usize> {
        self.classes
            .binary_search_by(|c| c.as_str().cmp(label))
            .map_err(|_| SymptomError::model(format!("unknown label: {label:?}")))
    }

    /// Disease name of a class index.
    pub fn inverse_transform(&self, index: usize) -> Result<&str> {
        self.classes.get(index).map(String::as_str).ok_or_else(|| {
            SymptomError::inference(format!(
                "class index {index} out of range for {} classes",
                self.classes.len()
            ))
        })
    }

    /// All class names in index order.
    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    /// Number of classes.
    pub fn len(&self) -> usize {
        self.classes.len()
    }

    /// Check if no classes were fitted.
    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }
}
