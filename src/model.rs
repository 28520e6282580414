//! Trained model components consumed by the diagnosis pipeline.
//!
//! A [`ModelArtifact`](artifact::ModelArtifact) bundles the symptom
//! vocabulary, a probabilistic classifier and the label encoder that maps
//! class indices back to disease names. Inference only ever reads these
//! values; nothing under this module is mutated after loading.

pub mod artifact;
pub mod bernoulli_nb;
pub mod classifier;
pub mod gaussian_nb;
pub mod label_encoder;
pub mod vocabulary;

pub use artifact::{ArtifactFormat, ModelArtifact};
pub use bernoulli_nb::BernoulliNaiveBayes;
pub use classifier::{ClassifierKind, ClassifierModel, ProbabilisticClassifier};
pub use gaussian_nb::GaussianNaiveBayes;
pub use label_encoder::LabelEncoder;
pub use vocabulary::SymptomVocabulary;
