//! The diagnosis pipeline: resolve, encode, classify, rank, recommend.

use std::path::Path;

use log::{debug, info};

use crate::config::DiagnosisConfig;
use crate::diagnosis::assembler::ResultAssembler;
use crate::diagnosis::encoder::FeatureEncoder;
use crate::diagnosis::input::parse_symptom_list;
use crate::diagnosis::ranking::RankingEngine;
use crate::diagnosis::recommendation::RecommendationEngine;
use crate::diagnosis::resolver::{Resolution, SymptomResolver};
use crate::diagnosis::response::{DiagnosisReport, PredictionResponse};
use crate::error::Result;
use crate::model::{ModelArtifact, ProbabilisticClassifier};

/// Runs diagnoses against a loaded artifact.
///
/// The engine never mutates its artifact, so a single instance can be
/// shared across threads behind an `Arc`.
#[derive(Debug, Clone)]
pub struct DiagnosisEngine {
    artifact: ModelArtifact,
    config: DiagnosisConfig,
    ranking: RankingEngine,
    recommendations: RecommendationEngine,
}

impl DiagnosisEngine {
    /// Create an engine over an artifact.
    pub fn new(artifact: ModelArtifact, config: DiagnosisConfig) -> Result<Self> {
        config.validate()?;
        artifact.validate()?;

        Ok(Self {
            ranking: RankingEngine::from_config(&config),
            recommendations: RecommendationEngine::default(),
            artifact,
            config,
        })
    }

    /// Load the artifact at `path` and create an engine over it.
    pub fn from_path<P: AsRef<Path>>(path: P, config: DiagnosisConfig) -> Result<Self> {
        Self::new(ModelArtifact::load(path)?, config)
    }

    /// Replace the recommendation rules.
    pub fn with_recommendations(mut self, recommendations: RecommendationEngine) -> Self {
        self.recommendations = recommendations;
        self
    }

    pub fn artifact(&self) -> &ModelArtifact {
        &self.artifact
    }

    pub fn config(&self) -> &DiagnosisConfig {
        &self.config
    }

    /// Resolve inputs against the artifact's vocabulary.
    pub fn resolve<S: AsRef<str>>(&self, symptoms: &[S]) -> Resolution {
        SymptomResolver::new(&self.artifact.symptom_columns).resolve(symptoms)
    }

    /// Diagnose, recovering every error into a `success = false` record.
    pub fn diagnose<S: AsRef<str>>(&self, symptoms: &[S]) -> PredictionResponse {
        match self.try_diagnose(symptoms) {
            Ok(report) => PredictionResponse::Success(report),
            Err(e) => ResultAssembler::from_error(e),
        }
    }

    /// Diagnose, returning errors (including no-match) to the caller.
    pub fn try_diagnose<S: AsRef<str>>(&self, symptoms: &[S]) -> Result<DiagnosisReport> {
        let vocabulary = &self.artifact.symptom_columns;
        let resolution = self.resolve(symptoms);
        debug!(
            "Resolved {} of {} symptoms",
            resolution.matched.len(),
            symptoms.len()
        );

        if resolution.is_empty() {
            return Err(ResultAssembler::no_match_error(
                resolution,
                vocabulary,
                self.config.vocabulary_sample_size,
            ));
        }

        let features = FeatureEncoder::new(vocabulary.len()).encode(&resolution.matched);

        let model = &self.artifact.model;
        let labels = &self.artifact.label_encoder;
        let predicted = model.predict(&features)?;
        let primary_prediction = labels.inverse_transform(predicted)?.to_string();
        let probabilities = model.predict_proba(&features)?;

        let top_predictions = self.ranking.rank(&probabilities, labels)?;
        let confidence = self.ranking.primary_confidence(&probabilities);

        let recommendations = self
            .recommendations
            .recommend(&resolution.matched_names(), &primary_prediction);

        info!("Predicted {primary_prediction} with {confidence}% confidence");

        Ok(ResultAssembler::success(
            &self.artifact,
            symptoms.len(),
            resolution,
            primary_prediction,
            confidence,
            top_predictions,
            recommendations,
        ))
    }
}

/// Load the artifact at `path` and diagnose `symptoms`.
///
/// A missing artifact is reported before any classification is attempted.
pub fn diagnose_with_artifact<P, S>(
    path: P,
    symptoms: &[S],
    config: DiagnosisConfig,
) -> PredictionResponse
where
    P: AsRef<Path>,
    S: AsRef<str>,
{
    match DiagnosisEngine::from_path(path, config) {
        Ok(engine) => engine.diagnose(symptoms),
        Err(e) => ResultAssembler::from_error(e),
    }
}

/// Parse a JSON symptom list and diagnose it with the artifact at `path`.
pub fn diagnose_json<P: AsRef<Path>>(
    path: P,
    raw_input: &str,
    config: DiagnosisConfig,
) -> PredictionResponse {
    match parse_symptom_list(raw_input) {
        Ok(symptoms) => diagnose_with_artifact(path, &symptoms, config),
        Err(e) => ResultAssembler::from_error(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnosis::recommendation::DiseaseRule;
    use crate::diagnosis::response::NO_MATCH_ERROR;
    use crate::model::{ClassifierModel, GaussianNaiveBayes, LabelEncoder, SymptomVocabulary};

    fn engine() -> DiagnosisEngine {
        let vocabulary = SymptomVocabulary::new(
            ["fever", "headache", "cough", "stomach pain"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
        )
        .unwrap();
        let (labels, encoded) =
            LabelEncoder::fit_transform(&["Influenza", "Influenza", "Bronchitis", "Gastritis"])
                .unwrap();
        let samples = vec![
            vec![1.0, 1.0, 0.0, 0.0],
            vec![1.0, 0.0, 0.0, 0.0],
            vec![0.0, 0.0, 1.0, 0.0],
            vec![0.0, 0.0, 0.0, 1.0],
        ];
        let model = GaussianNaiveBayes::fit(&samples, &encoded, labels.len(), 1e-9).unwrap();
        let artifact =
            ModelArtifact::new(vocabulary, ClassifierModel::GaussianNb(model), labels, Some(0.75))
                .unwrap();
        DiagnosisEngine::new(artifact, DiagnosisConfig::default()).unwrap()
    }

    #[test]
    fn test_diagnose_success() {
        let engine = engine();
        let report = engine.try_diagnose(&["fever", "headache"]).unwrap();

        assert!(report.success);
        assert_eq!(report.primary_prediction, "Influenza");
        assert_eq!(report.matched_count, 2);
        assert_eq!(report.total_symptoms, 2);
        assert!(report.unmatched_symptoms.is_empty());
        assert_eq!(report.model_info.total_diseases, 3);
        assert_eq!(report.model_info.total_symptoms, 4);
        assert_eq!(report.model_info.accuracy, Some(0.75));
        assert_eq!(report.top_predictions[0].disease, "Influenza");
        assert_eq!(report.confidence, report.top_predictions[0].confidence);
    }

    #[test]
    fn test_diagnose_no_match() {
        let engine = engine();
        let response = engine.diagnose(&["xyz_unknown_symptom"]);

        assert!(!response.is_success());
        assert_eq!(response.error(), Some(NO_MATCH_ERROR));
        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(value["unmatched_symptoms"][0], "xyz_unknown_symptom");
        assert_eq!(value["available_symptoms"].as_array().unwrap().len(), 4);
        assert_eq!(value["total_available"], 4);
        assert_eq!(value["matched_count"], 0);
    }

    #[test]
    fn test_partial_match_reports_unmatched() {
        let engine = engine();
        let report = engine.try_diagnose(&["COUGH", "glowing skin"]).unwrap();

        assert_eq!(report.primary_prediction, "Bronchitis");
        assert_eq!(report.symptoms_analyzed, vec!["cough"]);
        assert_eq!(report.unmatched_symptoms, vec!["glowing skin"]);
        assert_eq!(report.total_symptoms, 2);
        assert_eq!(report.matched_count, 1);
    }

    #[test]
    fn test_custom_recommendations() {
        let rules = RecommendationEngine::new()
            .with_disease_rule(DiseaseRule::new(&["influenza"], "Get a seasonal flu shot"));
        let engine = engine().with_recommendations(rules);

        let report = engine.try_diagnose(&["fever", "headache"]).unwrap();
        assert_eq!(report.primary_prediction, "Influenza");
        let n = report.recommendations.len();
        assert_eq!(report.recommendations[n - 2], "Get a seasonal flu shot");
    }

    #[test]
    fn test_engine_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<DiagnosisEngine>();
    }
}
