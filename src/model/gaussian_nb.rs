//! Gaussian naive Bayes classifier.

use std::f64::consts::PI;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::{Result, SymptomError};
use crate::model::classifier::{
    ProbabilisticClassifier, argmax, check_dimensions, normalize_log_likelihoods,
};

/// Gaussian naive Bayes with per-class feature means and variances.
///
/// Variances are smoothed by `var_smoothing * max feature variance` so that
/// features constant within a class (very common with binary symptom
/// columns) do not produce zero-variance likelihoods.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GaussianNaiveBayes {
    /// Per-class feature means, `[class][feature]`.
    theta: Vec<Vec<f64>>,
    /// Per-class smoothed feature variances, `[class][feature]`.
    var: Vec<Vec<f64>>,
    /// Log prior probability of each class.
    class_log_prior: Vec<f64>,
    /// Smoothing added to every variance.
    epsilon: f64,
}

impl GaussianNaiveBayes {
    /// Fit the model.
    ///
    /// `labels[i]` is the class index of `samples[i]`; classes are
    /// `0..n_classes` and every class needs at least one sample.
    pub fn fit(
        samples: &[Vec<f64>],
        labels: &[usize],
        n_classes: usize,
        var_smoothing: f64,
    ) -> Result<Self> {
        let n_features = validate_training_input(samples, labels, n_classes)?;

        // Constant training data has zero variance; fall back to the raw
        // smoothing term so likelihoods stay finite.
        let epsilon = match var_smoothing * max_feature_variance(samples, n_features) {
            e if e > 0.0 => e,
            _ => var_smoothing,
        };
        if epsilon <= 0.0 {
            return Err(SymptomError::training("var_smoothing must be positive"));
        }

        let mut members: Vec<Vec<&[f64]>> = vec![Vec::new(); n_classes];
        for (sample, &label) in samples.iter().zip(labels) {
            members[label].push(sample);
        }
        if let Some(empty) = members.iter().position(Vec::is_empty) {
            return Err(SymptomError::training(format!(
                "class {empty} has no training samples"
            )));
        }

        let stats: Vec<(Vec<f64>, Vec<f64>)> = members
            .par_iter()
            .map(|rows| class_statistics(rows, n_features, epsilon))
            .collect();
        let (theta, var) = stats.into_iter().unzip();

        let total = samples.len() as f64;
        let class_log_prior = members
            .iter()
            .map(|rows| (rows.len() as f64 / total).ln())
            .collect();

        Ok(GaussianNaiveBayes {
            theta,
            var,
            class_log_prior,
            epsilon,
        })
    }

    /// Variance smoothing term applied during fitting.
    pub fn epsilon(&self) -> f64 {
        self.epsilon
    }

    fn joint_log_likelihood(&self, features: &[f64]) -> Result<Vec<f64>> {
        check_dimensions(features, self.n_features())?;

        Ok(self
            .theta
            .iter()
            .zip(&self.var)
            .zip(&self.class_log_prior)
            .map(|((means, vars), prior)| {
                let log_likelihood: f64 = features
                    .iter()
                    .zip(means)
                    .zip(vars)
                    .map(|((x, mean), var)| {
                        -0.5 * (2.0 * PI * var).ln() - 0.5 * (x - mean).powi(2) / var
                    })
                    .sum();
                prior + log_likelihood
            })
            .collect())
    }
}

impl ProbabilisticClassifier for GaussianNaiveBayes {
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
        self.theta.first().map_or(0, Vec::len)
    }

    fn name(&self) -> &str {
        "gaussian_nb"
    }
}

/// Shared shape checks for naive Bayes fitting. Returns the feature count.
pub(crate) fn validate_training_input(
    samples: &[Vec<f64>],
    labels: &[usize],
    n_classes: usize,
) -> Result<usize> {
    if samples.is_empty() {
        return Err(SymptomError::training("training samples cannot be empty"));
    }
    if samples.len() != labels.len() {
        return Err(SymptomError::training(format!(
            "{} samples but {} labels",
            samples.len(),
            labels.len()
        )));
    }
    let n_features = samples[0].len();
    if let Some(row) = samples.iter().position(|s| s.len() != n_features) {
        return Err(SymptomError::training(format!(
            "sample {row} has {} features, expected {n_features}",
            samples[row].len()
        )));
    }
    if let Some(&label) = labels.iter().find(|&&l| l >= n_classes) {
        return Err(SymptomError::training(format!(
            "label {label} out of range for {n_classes} classes"
        )));
    }
    Ok(n_features)
}

fn class_statistics(rows: &[&[f64]], n_features: usize, epsilon: f64) -> (Vec<f64>, Vec<f64>) {
    let count = rows.len() as f64;
    let mut means = vec![0.0; n_features];
    for row in rows {
        for (mean, x) in means.iter_mut().zip(row.iter()) {
            *mean += x;
        }
    }
    for mean in &mut means {
        *mean /= count;
    }

    let mut vars = vec![0.0; n_features];
    for row in rows {
        for ((var, x), mean) in vars.iter_mut().zip(row.iter()).zip(&means) {
            *var += (x - mean).powi(2);
        }
    }
    for var in &mut vars {
        *var = *var / count + epsilon;
    }

    (means, vars)
}

fn max_feature_variance(samples: &[Vec<f64>], n_features: usize) -> f64 {
    let count = samples.len() as f64;
    (0..n_features)
        .map(|j| {
            let mean = samples.iter().map(|s| s[j]).sum::<f64>() / count;
            samples.iter().map(|s| (s[j] - mean).powi(2)).sum::<f64>() / count
        })
        .fold(0.0, f64::max)
}
