//! Bernoulli naive Bayes classifier for binary presence features.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::{Result, SymptomError};
use crate::model::classifier::{
    ProbabilisticClassifier, argmax, check_dimensions, normalize_log_likelihoods,
};
use crate::model::gaussian_nb::validate_training_input;

/// Bernoulli naive Bayes with additive (Laplace) smoothing.
///
/// Feature values greater than zero count as "present".
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BernoulliNaiveBayes {
    /// `ln P(feature present | class)`, `[class][feature]`.
    feature_log_prob: Vec<Vec<f64>>,
    /// `ln P(feature absent | class)`, `[class][feature]`.
    feature_log_neg_prob: Vec<Vec<f64>>,
    /// Log prior probability of each class.
    class_log_prior: Vec<f64>,
    /// Additive smoothing parameter.
    alpha: f64,
}

impl BernoulliNaiveBayes {
    /// Fit the model. See [`GaussianNaiveBayes::fit`](crate::model::GaussianNaiveBayes::fit)
    /// for the label layout.
    pub fn fit(samples: &[Vec<f64>], labels: &[usize], n_classes: usize, alpha: f64) -> Result<Self> {
        let n_features = validate_training_input(samples, labels, n_classes)?;
        if alpha <= 0.0 {
            return Err(SymptomError::training("alpha must be positive"));
        }

        let mut counts = vec![0usize; n_classes];
        for &label in labels {
            counts[label] += 1;
        }
        if let Some(empty) = counts.iter().position(|&c| c == 0) {
            return Err(SymptomError::training(format!(
                "class {empty} has no training samples"
            )));
        }

        let log_probs: Vec<(Vec<f64>, Vec<f64>)> = (0..n_classes)
            .into_par_iter()
            .map(|class| {
                let mut present = vec![0.0; n_features];
                for (sample, _) in samples.iter().zip(labels).filter(|(_, l)| **l == class) {
                    for (p, x) in present.iter_mut().zip(sample) {
                        if *x > 0.0 {
                            *p += 1.0;
                        }
                    }
                }
                let denominator = counts[class] as f64 + 2.0 * alpha;
                present
                    .iter()
                    .map(|p| {
                        let prob = (p + alpha) / denominator;
                        (prob.ln(), (1.0 - prob).ln())
                    })
                    .unzip()
            })
            .collect();
        let (feature_log_prob, feature_log_neg_prob) = log_probs.into_iter().unzip();

        let total = samples.len() as f64;
        let class_log_prior = counts.iter().map(|&c| (c as f64 / total).ln()).collect();

        Ok(BernoulliNaiveBayes {
            feature_log_prob,
            feature_log_neg_prob,
            class_log_prior,
            alpha,
        })
    }

    /// Smoothing parameter used during fitting.
    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    fn joint_log_likelihood(&self, features: &[f64]) -> Result<Vec<f64>> {
        check_dimensions(features, self.n_features())?;

        Ok(self
            .feature_log_prob
            .iter()
            .zip(&self.feature_log_neg_prob)
            .zip(&self.class_log_prior)
            .map(|((pos, neg), prior)| {
                prior
                    + features
                        .iter()
                        .zip(pos.iter().zip(neg))
                        .map(|(x, (p, n))| if *x > 0.0 { *p } else { *n })
                        .sum::<f64>()
            })
            .collect())
    }
}

impl ProbabilisticClassifier for BernoulliNaiveBayes {
    fn predict(&self, features: &[f64]) -> Result<usize> {
        let joint = self.joint_log_likelihood(features)?;
        argmax(&joint).ok_or_else(|| SymptomError::model("classifier has no classes"))
    }

    fn predict_proba(&self, features: &[f64]) -> Result<Vec<f64>> {
        let joint = self.joint_log_likelihood(features)?;
        Ok(normalize_log_likelihoods(&joint))
    }

    fn n_classes(&self) -> usize {
        self.class_log_prior.len()
    }

    fn n_features(&self) -> usize {
        self.feature_log_prob.first().map_or(0, Vec::len)
    }

    fn name(&self) -> &str {
        "bernoulli_nb"
    }
}
