//! Fitting a classifier and packaging it as a model artifact.

use log::info;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::config::TrainingConfig;
use crate::error::{Result, SymptomError};
use crate::model::{
    BernoulliNaiveBayes, ClassifierKind, ClassifierModel, GaussianNaiveBayes, LabelEncoder,
    ModelArtifact, ProbabilisticClassifier, SymptomVocabulary,
};
use crate::training::dataset::Dataset;
use crate::training::split::stratified_split;

/// Summary of a training run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainingReport {
    pub classifier: ClassifierKind,
    pub samples: usize,
    pub train_samples: usize,
    pub test_samples: usize,
    pub diseases: usize,
    pub symptoms: usize,
    pub dropped_samples: usize,
    /// Held-out accuracy; `None` when the test split is empty.
    pub accuracy: Option<f64>,
}

/// Trains classifiers from datasets.
#[derive(Debug, Clone, Default)]
pub struct Trainer {
    config: TrainingConfig,
}

impl Trainer {
    pub fn new(config: TrainingConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &TrainingConfig {
        &self.config
    }

    /// Filter rare classes, split, fit and score.
    pub fn train(&self, dataset: Dataset) -> Result<(ModelArtifact, TrainingReport)> {
        let total = dataset.len();
        let dataset = dataset.retain_classes_with_at_least(self.config.min_samples_per_class);
        if dataset.is_empty() {
            return Err(SymptomError::training(format!(
                "no class has at least {} samples",
                self.config.min_samples_per_class
            )));
        }

        let vocabulary = SymptomVocabulary::new(dataset.feature_names.clone())?;
        let (label_encoder, labels) = LabelEncoder::fit_transform(&dataset.labels)?;
        let split = stratified_split(&labels, self.config.test_size, self.config.seed);

        let train_x: Vec<Vec<f64>> = split.train.iter().map(|&i| dataset.samples[i].clone()).collect();
        let train_y: Vec<usize> = split.train.iter().map(|&i| labels[i]).collect();

        info!(
            "Training {:?} naive Bayes on {} samples ({} diseases, {} symptoms)",
            self.config.classifier,
            train_x.len(),
            label_encoder.len(),
            vocabulary.len()
        );
        let model = self.fit(&train_x, &train_y, label_encoder.len())?;

        let test: Vec<(&[f64], usize)> = split
            .test
            .iter()
            .map(|&i| (dataset.samples[i].as_slice(), labels[i]))
            .collect();
        let accuracy = score(&model, &test)?;
        match accuracy {
            Some(accuracy) => info!("Model accuracy: {accuracy:.4}"),
            None => info!("Test split is empty; accuracy not measured"),
        }

        let report = TrainingReport {
            classifier: self.config.classifier,
            samples: total,
            train_samples: train_x.len(),
            test_samples: test.len(),
            diseases: label_encoder.len(),
            symptoms: vocabulary.len(),
            dropped_samples: total - dataset.len(),
            accuracy,
        };
        let artifact = ModelArtifact::new(vocabulary, model, label_encoder, accuracy)?;

        Ok((artifact, report))
    }

    fn fit(&self, samples: &[Vec<f64>], labels: &[usize], n_classes: usize) -> Result<ClassifierModel> {
        Ok(match self.config.classifier {
            ClassifierKind::Gaussian => ClassifierModel::GaussianNb(GaussianNaiveBayes::fit(
                samples,
                labels,
                n_classes,
                self.config.var_smoothing,
            )?),
            ClassifierKind::Bernoulli => ClassifierModel::BernoulliNb(BernoulliNaiveBayes::fit(
                samples,
                labels,
                n_classes,
                self.config.alpha,
            )?),
        })
    }
}

/// Fraction of test rows predicted correctly.
pub fn score<C: ProbabilisticClassifier>(model: &C, test: &[(&[f64], usize)]) -> Result<Option<f64>> {
    if test.is_empty() {
        return Ok(None);
    }

    let hits = test
        .par_iter()
        .map(|(features, label)| Ok(model.predict(features)? == *label))
        .collect::<Result<Vec<bool>>>()?
        .into_iter()
        .filter(|hit| *hit)
        .count();

    Ok(Some(hits as f64 / test.len() as f64))
}
