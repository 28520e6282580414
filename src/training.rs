//! Training of symptom classifiers.
//!
//! Training loads a CSV dataset and drops classes too rare to split.
//! It holds out a stratified test set, fits the configured naive Bayes
//! variant and scores it on the held-out rows. The result is a
//! [`ModelArtifact`](crate::model::ModelArtifact) ready to be saved.

pub mod dataset;
pub mod split;
pub mod trainer;

pub use dataset::Dataset;
pub use split::{TrainTestSplit, stratified_split};
pub use trainer::{Trainer, TrainingReport, score};
