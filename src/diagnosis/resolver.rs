//! Resolution of free-text symptoms against the symptom vocabulary.
//!
//! Each input is tried against three tiers, first hit wins:
//!
//! 1. [`MatchTier::Exact`]: byte-for-byte equality.
//! 2. [`MatchTier::Normalized`]: equality after trimming and lower-casing.
//! 3. [`MatchTier::Substring`]: either normalized string contains the other.
//!
//! Tiers 2 and 3 share a single pass over the vocabulary: an entry is
//! checked for normalized equality, then containment, before moving to the
//! next entry. Inputs that normalize to an empty string are reported as
//! unmatched without being tiered, since the empty string is contained in
//! every entry.

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::model::SymptomVocabulary;

/// The tier that produced a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchTier {
    Exact,
    Normalized,
    Substring,
}

/// A raw input that resolved to a vocabulary entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedSymptom {
    /// The input as supplied.
    pub input: String,
    /// Vocabulary index, always `< vocabulary.len()`.
    pub index: usize,
    /// Vocabulary entry at `index`.
    pub symptom: String,
    /// How the match was made.
    pub tier: MatchTier,
}

/// Outcome of resolving a list of inputs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Resolution {
    /// Resolved inputs, in input order.
    pub matched: Vec<ResolvedSymptom>,
    /// Inputs that matched nothing, in input order.
    pub unmatched: Vec<String>,
}

impl Resolution {
    /// Vocabulary names of the matched inputs, one per resolved input.
    pub fn matched_names(&self) -> Vec<String> {
        self.matched.iter().map(|m| m.symptom.clone()).collect()
    }

    /// Whether nothing resolved.
    pub fn is_empty(&self) -> bool {
        self.matched.is_empty()
    }
}

/// Maps raw symptom strings to vocabulary indices.
#[derive(Debug, Clone)]
pub struct SymptomResolver<'a> {
    vocabulary: &'a SymptomVocabulary,
    normalized: Vec<String>,
}

impl<'a> SymptomResolver<'a> {
    /// Create a resolver over a vocabulary.
    pub fn new(vocabulary: &'a SymptomVocabulary) -> Self {
        let normalized = vocabulary.iter().map(normalize).collect();
        Self {
            vocabulary,
            normalized,
        }
    }

    /// Resolve every input; order is preserved in both output lists.
    pub fn resolve<S: AsRef<str>>(&self, inputs: &[S]) -> Resolution {
        let mut resolution = Resolution::default();

        for input in inputs {
            let input = input.as_ref();
            match self.resolve_one(input) {
                Some(resolved) => {
                    debug!(
                        "Resolved {:?} to {:?} ({:?})",
                        input, resolved.symptom, resolved.tier
                    );
                    resolution.matched.push(resolved);
                }
                None => {
                    debug!("No vocabulary match for {input:?}");
                    resolution.unmatched.push(input.to_string());
                }
            }
        }

        resolution
    }

    /// Resolve a single input.
    pub fn resolve_one(&self, input: &str) -> Option<ResolvedSymptom> {
        if let Some(index) = self.vocabulary.position(input) {
            return Some(self.resolved(input, index, MatchTier::Exact));
        }

        let needle = normalize(input);
        if needle.is_empty() {
            warn!("Ignoring empty symptom input {input:?}");
            return None;
        }

        self.normalized
            .iter()
            .enumerate()
            .find_map(|(index, entry)| {
                if *entry == needle {
                    Some((index, MatchTier::Normalized))
                } else if entry.contains(&needle) || needle.contains(entry.as_str()) {
                    Some((index, MatchTier::Substring))
                } else {
                    None
                }
            })
            .map(|(index, tier)| self.resolved(input, index, tier))
    }

    fn resolved(&self, input: &str, index: usize, tier: MatchTier) -> ResolvedSymptom {
        ResolvedSymptom {
            input: input.to_string(),
            index,
            symptom: self.vocabulary.get(index).unwrap_or_default().to_string(),
            tier,
        }
    }
}

/// Normalized comparison form: trimmed and lower-cased.
pub fn normalize(text: &str) -> String {
    text.trim().to_lowercase()
}
