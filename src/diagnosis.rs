//! Symptom-to-disease inference.
//!
//! The pipeline runs in a fixed order:
//!
//! 1. [`SymptomResolver`] maps raw strings onto the vocabulary.
//! 2. [`FeatureEncoder`] builds the binary presence vector.
//! 3. The artifact's classifier produces a class distribution.
//! 4. [`RankingEngine`] keeps the top predictions above the confidence floor.
//! 5. [`RecommendationEngine`] derives self-care guidance.
//! 6. [`ResultAssembler`] builds the response record.
//!
//! [`DiagnosisEngine`] wires these together; [`diagnose_json`] is the
//! single-call entry point used by the CLI.

pub mod assembler;
pub mod encoder;
pub mod engine;
pub mod input;
pub mod ranking;
pub mod recommendation;
pub mod resolver;
pub mod response;

pub use assembler::ResultAssembler;
pub use encoder::FeatureEncoder;
pub use engine::{DiagnosisEngine, diagnose_json, diagnose_with_artifact};
pub use input::parse_symptom_list;
pub use ranking::{DiseaseConfidence, RankingEngine};
pub use recommendation::{DiseaseRule, RecommendationEngine, SymptomRule};
pub use resolver::{MatchTier, Resolution, ResolvedSymptom, SymptomResolver};
pub use response::{
    DiagnosisReport, FailureReport, ModelInfo, NoMatchReport, PredictionResponse,
};
