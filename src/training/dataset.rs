//! Symptom/disease training datasets loaded from CSV.
//!
//! The first row names the columns. One column holds the disease label;
//! every other column is a symptom feature with a numeric value:
//!
//! ```csv
//! diseases,fever,cough,headache
//! influenza,1,1,1
//! migraine,0,0,1
//! ```

use std::collections::HashMap;
use std::io::Read;
use std::path::Path;

use csv::{ReaderBuilder, Trim};
use log::{info, warn};

use crate::error::{Result, SymptomError};

/// Feature rows with their disease labels.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    /// Symptom column names, in file order.
    pub feature_names: Vec<String>,
    /// One feature row per sample.
    pub samples: Vec<Vec<f64>>,
    /// Disease label per sample.
    pub labels: Vec<String>,
}

impl Dataset {
    /// Load a CSV file.
    pub fn from_csv_path<P: AsRef<Path>>(path: P, target_column: &str) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(SymptomError::training(format!(
                "dataset not found: {}",
                path.display()
            )));
        }
        let reader = ReaderBuilder::new().trim(Trim::All).from_path(path)?;
        let dataset = Self::from_csv(reader, target_column)?;
        info!(
            "Loaded dataset {}: {} samples, {} symptoms",
            path.display(),
            dataset.len(),
            dataset.feature_names.len()
        );
        Ok(dataset)
    }

    /// Load from any CSV reader.
    pub fn from_reader<R: Read>(reader: R, target_column: &str) -> Result<Self> {
        Self::from_csv(
            ReaderBuilder::new().trim(Trim::All).from_reader(reader),
            target_column,
        )
    }

    fn from_csv<R: Read>(mut reader: csv::Reader<R>, target_column: &str) -> Result<Self> {
        let headers = reader.headers()?.clone();
        let target = headers
            .iter()
            .position(|h| h == target_column)
            .ok_or_else(|| {
                SymptomError::training(format!("target column {target_column:?} not found"))
            })?;

        let feature_names: Vec<String> = headers
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != target)
            .map(|(_, h)| h.to_string())
            .collect();
        if feature_names.is_empty() {
            return Err(SymptomError::training("dataset has no symptom columns"));
        }
        // pandas writes its index column with an empty header
        if let Some(blank) = headers.iter().position(|h| h.is_empty()) {
            return Err(SymptomError::training(format!(
                "column {blank} has a blank header; drop the index column or name it"
            )));
        }

        let mut samples = Vec::new();
        let mut labels = Vec::new();
        for (row, record) in reader.records().enumerate() {
            let record = record?;
            let mut features = Vec::with_capacity(feature_names.len());
            for (i, field) in record.iter().enumerate() {
                if i == target {
                    continue;
                }
                let value = field.parse::<f64>().map_err(|_| {
                    SymptomError::training(format!(
                        "row {}: column {:?} is not numeric: {field:?}",
                        row + 1,
                        headers.get(i).unwrap_or_default()
                    ))
                })?;
                features.push(value);
            }
            labels.push(record.get(target).unwrap_or_default().to_string());
            samples.push(features);
        }

        Ok(Dataset {
            feature_names,
            samples,
            labels,
        })
    }

    /// Number of samples.
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Check if the dataset has no samples.
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Number of distinct labels.
    pub fn n_classes(&self) -> usize {
        self.class_counts().len()
    }

    /// Sample count per label.
    pub fn class_counts(&self) -> HashMap<&str, usize> {
        let mut counts = HashMap::new();
        for label in &self.labels {
            *counts.entry(label.as_str()).or_insert(0) += 1;
        }
        counts
    }

    /// Drop every class with fewer than `min_samples` samples.
    pub fn retain_classes_with_at_least(self, min_samples: usize) -> Self {
        let keep: HashMap<String, bool> = self
            .class_counts()
            .into_iter()
            .map(|(label, count)| (label.to_string(), count >= min_samples))
            .collect();

        let dropped = keep.values().filter(|k| !**k).count();
        if dropped > 0 {
            warn!("Dropping {dropped} classes with fewer than {min_samples} samples");
        }

        let (samples, labels): (Vec<_>, Vec<_>) = self
            .samples
            .into_iter()
            .zip(self.labels)
            .filter(|(_, label)| keep.get(label).copied().unwrap_or(false))
            .unzip();

        Dataset {
            feature_names: self.feature_names,
            samples,
            labels,
        }
    }
}
