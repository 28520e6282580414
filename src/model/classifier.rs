//! Probabilistic classifier trait definition.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::error::{Result, SymptomError};
use crate::model::bernoulli_nb::BernoulliNaiveBayes;
use crate::model::gaussian_nb::GaussianNaiveBayes;

/// Multi-class probabilistic classifier over dense feature vectors.
///
/// Class indices are internal positions aligned with the
/// [`LabelEncoder`](crate::model::LabelEncoder) that was fitted together
/// with the classifier. The diagnosis pipeline only depends on this trait,
/// so any classifier family satisfying it can back an artifact.
pub trait ProbabilisticClassifier: Send + Sync {
    /// Predict the most likely class index for a feature vector.
    fn predict(&self, features: &[f64]) -> Result<usize>;

    /// Probability of every class, aligned with internal class indices.
    fn predict_proba(&self, features: &[f64]) -> Result<Vec<f64>>;

    /// Number of classes the model distinguishes.
    fn n_classes(&self) -> usize;

    /// Expected feature vector length.
    fn n_features(&self) -> usize;

    /// Get the name of this classifier for debugging and logging.
    fn name(&self) -> &str;
}

/// Check a feature vector against the expected dimensionality.
pub(crate) fn check_dimensions(features: &[f64], expected: usize) -> Result<()> {
    if features.len() != expected {
        return Err(SymptomError::inference(format!(
            "expected {expected} features, got {}",
            features.len()
        )));
    }
    Ok(())
}

/// Normalise joint log-likelihoods into probabilities (softmax in log space).
pub(crate) fn normalize_log_likelihoods(joint: &[f64]) -> Vec<f64> {
    let max = joint.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    if !max.is_finite() {
        let uniform = 1.0 / joint.len().max(1) as f64;
        return vec![uniform; joint.len()];
    }

    let exps: Vec<f64> = joint.iter().map(|j| (j - max).exp()).collect();
    let total: f64 = exps.iter().sum();
    exps.into_iter().map(|e| e / total).collect()
}

/// Index of the largest value; the lowest index wins ties.
pub(crate) fn argmax(values: &[f64]) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (i, &v) in values.iter().enumerate() {
        match best {
            Some((_, b)) if v <= b => {}
            _ => best = Some((i, v)),
        }
    }
    best.map(|(i, _)| i)
}

/// Supported classifier families.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClassifierKind {
    /// Gaussian naive Bayes.
    #[default]
    Gaussian,
    /// Bernoulli naive Bayes over binary presence features.
    Bernoulli,
}

/// A trained classifier as stored in an artifact.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClassifierModel {
    GaussianNb(GaussianNaiveBayes),
    BernoulliNb(BernoulliNaiveBayes),
}

impl ClassifierModel {
    /// The family of the wrapped classifier.
    pub fn kind(&self) -> ClassifierKind {
        match self {
            ClassifierModel::GaussianNb(_) => ClassifierKind::Gaussian,
            ClassifierModel::BernoulliNb(_) => ClassifierKind::Bernoulli,
        }
    }

    fn inner(&self) -> &dyn ProbabilisticClassifier {
        match self {
            ClassifierModel::GaussianNb(model) => model,
            ClassifierModel::BernoulliNb(model) => model,
        }
    }
}

impl ProbabilisticClassifier for ClassifierModel {
    fn predict(&self, features: &[f64]) -> Result<usize> {
        self.inner().predict(features)
    }

    fn predict_proba(&self, features: &[f64]) -> Result<Vec<f64>> {
        self.inner().predict_proba(features)
    }

    fn n_classes(&self) -> usize {
        self.inner().n_classes()
    }

    fn n_features(&self) -> usize {
        self.inner().n_features()
    }

    fn name(&self) -> &str {
        self.inner().name()
    }
}
