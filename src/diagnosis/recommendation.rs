//! Rule-based self-care guidance.
//!
//! Guidance is assembled from ordered rule tables:
//!
//! - a fixed baseline,
//! - symptom rules, each adding its block when any trigger keyword occurs
//!   in any matched symptom name (all rules are evaluated independently),
//! - disease rules, of which only the first whose trigger occurs in the
//!   primary disease name contributes,
//! - a fixed disclaimer.
//!
//! All keyword checks are case-insensitive substring tests.

const BASELINE: [&str; 3] = [
    "⚕️ Consult with a healthcare professional for proper diagnosis and treatment",
    "📝 Monitor your symptoms and note any changes or worsening",
    "📊 Keep a symptom diary to track patterns and triggers",
];

const DISCLAIMER: &str =
    "⚠️ This is an AI-generated analysis and should not replace professional medical advice";

const SYMPTOM_RULES: &[(&[&str], &[&str])] = &[
    (
        &["fever"],
        &[
            "🌡️ Monitor your temperature regularly and stay hydrated",
            "😴 Rest and avoid strenuous activities",
            "💊 Consider fever-reducing medication if recommended by a healthcare provider",
        ],
    ),
    (
        &["cough", "breathing"],
        &[
            "🚭 Avoid smoking and exposure to air pollutants",
            "💨 Use a humidifier to ease breathing",
            "🛏️ Stay upright when sleeping if breathing is difficult",
        ],
    ),
    (
        &["headache", "head"],
        &[
            "😴 Ensure adequate sleep and manage stress levels",
            "🌙 Stay in a quiet, dark environment",
            "💧 Stay hydrated and maintain regular meals",
        ],
    ),
    (
        &["stomach", "nausea", "vomit"],
        &[
            "🍌 Eat bland, easy-to-digest foods (BRAT diet: bananas, rice, applesauce, toast)",
            "💧 Stay hydrated with small, frequent sips of water",
            "🚫 Avoid dairy, caffeine, and spicy foods temporarily",
        ],
    ),
    (
        &["pain"],
        &[
            "🧊 Apply appropriate heat or cold therapy as suitable",
            "🤸 Gentle stretching or movement may help if tolerated",
            "⚠️ Avoid activities that worsen the pain",
        ],
    ),
];

const DISEASE_RULES: &[(&[&str], &str)] = &[
    (
        &["diabetes"],
        "📈 Monitor blood sugar levels regularly and follow diabetic diet guidelines",
    ),
    (
        &["hypertension", "blood pressure"],
        "🩺 Monitor blood pressure and reduce sodium intake",
    ),
    (
        &["asthma"],
        "💨 Avoid known triggers and keep rescue inhaler accessible",
    ),
    (
        &["arthritis"],
        "🏃 Gentle exercise and joint protection techniques may help",
    ),
];

/// A keyword rule over matched symptom names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SymptomRule {
    /// Lower-case keywords; any one occurring in any symptom fires the rule.
    pub triggers: Vec<String>,
    /// Advice appended when the rule fires.
    pub advice: Vec<String>,
}

impl SymptomRule {
    pub fn new<T, A>(triggers: &[T], advice: &[A]) -> Self
    where
        T: AsRef<str>,
        A: AsRef<str>,
    {
        Self {
            triggers: triggers.iter().map(|t| t.as_ref().to_lowercase()).collect(),
            advice: advice.iter().map(|a| a.as_ref().to_string()).collect(),
        }
    }

    fn fires(&self, symptoms: &[String]) -> bool {
        symptoms
            .iter()
            .any(|s| self.triggers.iter().any(|t| s.contains(t.as_str())))
    }
}

/// A keyword rule over the primary disease name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiseaseRule {
    pub triggers: Vec<String>,
    pub advice: String,
}

impl DiseaseRule {
    pub fn new<T: AsRef<str>>(triggers: &[T], advice: &str) -> Self {
        Self {
            triggers: triggers.iter().map(|t| t.as_ref().to_lowercase()).collect(),
            advice: advice.to_string(),
        }
    }

    fn fires(&self, disease: &str) -> bool {
        self.triggers.iter().any(|t| disease.contains(t.as_str()))
    }
}

/// Produces the recommendation list for a diagnosis.
#[derive(Debug, Clone)]
pub struct RecommendationEngine {
    baseline: Vec<String>,
    symptom_rules: Vec<SymptomRule>,
    disease_rules: Vec<DiseaseRule>,
    disclaimer: String,
}

impl Default for RecommendationEngine {
    fn default() -> Self {
        Self {
            baseline: BASELINE.iter().map(|s| s.to_string()).collect(),
            symptom_rules: SYMPTOM_RULES
                .iter()
                .map(|&(triggers, advice)| SymptomRule::new(triggers, advice))
                .collect(),
            disease_rules: DISEASE_RULES
                .iter()
                .map(|&(triggers, advice)| DiseaseRule::new(triggers, advice))
                .collect(),
            disclaimer: DISCLAIMER.to_string(),
        }
    }
}

impl RecommendationEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a symptom rule after the built-in ones.
    pub fn with_symptom_rule(mut self, rule: SymptomRule) -> Self {
        self.symptom_rules.push(rule);
        self
    }

    /// Append a disease rule with the lowest priority.
    pub fn with_disease_rule(mut self, rule: DiseaseRule) -> Self {
        self.disease_rules.push(rule);
        self
    }

    pub fn disclaimer(&self) -> &str {
        &self.disclaimer
    }

    pub fn baseline(&self) -> &[String] {
        &self.baseline
    }

    /// Build recommendations from matched symptom names and the primary disease.
    pub fn recommend<S: AsRef<str>>(&self, symptoms: &[S], primary_disease: &str) -> Vec<String> {
        let symptoms: Vec<String> = symptoms.iter().map(|s| s.as_ref().to_lowercase()).collect();
        let disease = primary_disease.to_lowercase();

        let mut recommendations = self.baseline.clone();

        for rule in self.symptom_rules.iter().filter(|r| r.fires(&symptoms)) {
            recommendations.extend(rule.advice.iter().cloned());
        }

        if let Some(rule) = self.disease_rules.iter().find(|r| r.fires(&disease)) {
            recommendations.push(rule.advice.clone());
        }

        recommendations.push(self.disclaimer.clone());
        recommendations
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn contains_block(recommendations: &[String], block: &[&str]) -> bool {
        block.iter().all(|b| recommendations.iter().any(|r| r == b))
    }

    #[test]
    fn test_baseline_and_disclaimer_only() {
        let engine = RecommendationEngine::new();
        let recommendations = engine.recommend(&["itching"], "Eczema");

        assert_eq!(recommendations.len(), 4);
        assert_eq!(&recommendations[..3], engine.baseline());
        assert_eq!(recommendations.last().unwrap(), DISCLAIMER);
    }

    #[test]
    fn test_fever_and_headache_blocks() {
        let engine = RecommendationEngine::new();
        let recommendations = engine.recommend(&["fever", "headache"], "Influenza");

        assert!(contains_block(&recommendations, SYMPTOM_RULES[0].1));
        assert!(!contains_block(&recommendations, SYMPTOM_RULES[1].1));
        assert!(contains_block(&recommendations, SYMPTOM_RULES[2].1));
        assert!(!contains_block(&recommendations, SYMPTOM_RULES[3].1));
        assert!(!contains_block(&recommendations, SYMPTOM_RULES[4].1));
        assert_eq!(recommendations.len(), 3 + 3 + 3 + 1);
    }

    #[test]
    fn test_rules_are_additive_and_ordered() {
        let engine = RecommendationEngine::new();
        let recommendations =
            engine.recommend(&["Stomach Pain", "difficulty breathing"], "Gastritis");

        // cough/breathing, stomach and pain rules fire, in table order
        let expected: Vec<&str> = BASELINE
            .iter()
            .chain(SYMPTOM_RULES[1].1)
            .chain(SYMPTOM_RULES[3].1)
            .chain(SYMPTOM_RULES[4].1)
            .chain(std::iter::once(&DISCLAIMER))
            .copied()
            .collect();
        assert_eq!(recommendations, expected);
    }

    #[test]
    fn test_disease_rules_are_exclusive() {
        let engine = RecommendationEngine::new();
        let recommendations = engine.recommend(&["cough"], "Asthma with High Blood Pressure");

        let disease_advice: Vec<&str> = DISEASE_RULES.iter().map(|(_, a)| *a).collect();
        let hits: Vec<&String> = recommendations
            .iter()
            .filter(|r| disease_advice.contains(&r.as_str()))
            .collect();
        assert_eq!(hits, vec![DISEASE_RULES[1].1]);
    }

    #[test]
    fn test_disease_rule_priority() {
        let engine = RecommendationEngine::new();
        let recommendations = engine.recommend(&["thirst"], "Type 2 DIABETES");
        assert_eq!(recommendations[3], DISEASE_RULES[0].1);
        assert_eq!(recommendations.len(), 5);
    }

    #[test]
    fn test_advice_keeps_icon_prefixes() {
        let engine = RecommendationEngine::new();
        let recommendations = engine.recommend(&["fever"], "Hypertension");

        assert_eq!(
            recommendations[0],
            "⚕️ Consult with a healthcare professional for proper diagnosis and treatment"
        );
        assert_eq!(
            recommendations[3],
            "🌡️ Monitor your temperature regularly and stay hydrated"
        );
        assert_eq!(
            recommendations[6],
            "🩺 Monitor blood pressure and reduce sodium intake"
        );
        assert_eq!(
            engine.disclaimer(),
            "⚠️ This is an AI-generated analysis and should not replace professional medical advice"
        );
    }

    #[test]
    fn test_custom_rules() {
        let engine = RecommendationEngine::new()
            .with_symptom_rule(SymptomRule::new(&["RASH"], &["Avoid scratching the affected area"]))
            .with_disease_rule(DiseaseRule::new(&["eczema"], "Moisturize regularly"));

        let recommendations = engine.recommend(&["skin rash"], "Eczema");
        assert_eq!(
            &recommendations[3..],
            &[
                "Avoid scratching the affected area",
                "Moisturize regularly",
                DISCLAIMER
            ]
        );
    }
}
