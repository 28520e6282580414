//! # symptom-checker
//!
//! Maps reported symptoms to ranked candidate diseases with a trained
//! probabilistic classifier and derives rule-based self-care guidance.
//!
//! ## Features
//!
//! - Tiered symptom matching (exact, case-insensitive, substring)
//! - Pluggable probabilistic classifiers (Gaussian and Bernoulli naive Bayes)
//! - Top-k ranking with a confidence floor
//! - Table-driven recommendations
//! - CSV training with a stratified, seeded train/test split
//! - JSON or bincode model artifacts

pub mod cli;
pub mod config;
pub mod diagnosis;
pub mod error;
pub mod model;
pub mod training;

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
