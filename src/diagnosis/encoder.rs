//! Binary presence encoding of resolved symptoms.

use crate::diagnosis::resolver::ResolvedSymptom;

/// Builds feature vectors over a vocabulary of fixed dimensionality.
#[derive(Debug, Clone, Copy)]
pub struct FeatureEncoder {
    dimensionality: usize,
}

impl FeatureEncoder {
    pub fn new(dimensionality: usize) -> Self {
        Self { dimensionality }
    }

    pub fn dimensionality(&self) -> usize {
        self.dimensionality
    }

    /// A zero vector with 1.0 at every matched index.
    ///
    /// Setting is idempotent, so repeated indices still yield 1.0.
    pub fn encode(&self, matched: &[ResolvedSymptom]) -> Vec<f64> {
        let mut features = vec![0.0; self.dimensionality];
        for symptom in matched {
            if let Some(slot) = features.get_mut(symptom.index) {
                *slot = 1.0;
            }
        }
        features
    }
}
