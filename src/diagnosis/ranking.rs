//! Top-k ranking of class probabilities.

use serde::{Deserialize, Serialize};

use crate::config::DiagnosisConfig;
use crate::error::{Result, SymptomError};
use crate::model::LabelEncoder;

/// A disease with its confidence in percent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiseaseConfidence {
    pub disease: String,
    pub confidence: f64,
}

/// Selects the most probable diseases and applies a confidence floor.
#[derive(Debug, Clone, Copy)]
pub struct RankingEngine {
    top_k: usize,
    min_confidence: f64,
}

impl Default for RankingEngine {
    fn default() -> Self {
        Self::new(5, 0.5)
    }
}

impl RankingEngine {
    /// `min_confidence` is a percentage; kept entries must exceed it.
    pub fn new(top_k: usize, min_confidence: f64) -> Self {
        Self {
            top_k,
            min_confidence,
        }
    }

    pub fn from_config(config: &DiagnosisConfig) -> Self {
        Self::new(config.top_k, config.min_confidence)
    }

    /// Rank a distribution aligned with the encoder's class indices.
    ///
    /// Probabilities are sorted descending, ties going to the lower class
    /// index. The first `top_k` are converted to percentages and those at
    /// or below the floor are dropped.
    pub fn rank(&self, probabilities: &[f64], labels: &LabelEncoder) -> Result<Vec<DiseaseConfidence>> {
        if probabilities.len() != labels.len() {
            return Err(SymptomError::inference(format!(
                "distribution has {} entries but there are {} classes",
                probabilities.len(),
                labels.len()
            )));
        }

        let mut order: Vec<usize> = (0..probabilities.len()).collect();
        // Stable sort keeps lower indices first among equal probabilities.
        order.sort_by(|&a, &b| probabilities[b].total_cmp(&probabilities[a]));

        order
            .into_iter()
            .take(self.top_k)
            .map(|index| {
                Ok(DiseaseConfidence {
                    disease: labels.inverse_transform(index)?.to_string(),
                    confidence: to_percentage(probabilities[index]),
                })
            })
            .filter(|entry| {
                entry
                    .as_ref()
                    .map_or(true, |e| e.confidence > self.min_confidence)
            })
            .collect()
    }

    /// Highest probability over the whole distribution, in percent.
    pub fn primary_confidence(&self, probabilities: &[f64]) -> f64 {
        let max = probabilities.iter().copied().fold(0.0, f64::max);
        to_percentage(max)
    }
}

/// Probability to percentage, rounded to two decimals.
pub fn to_percentage(probability: f64) -> f64 {
    (probability * 100.0 * 100.0).round() / 100.0
}
