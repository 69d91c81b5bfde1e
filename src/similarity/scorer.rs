// Cosine similarity scorer.
//
//   similarity = dot(v1, v2) / (|v1| * |v2|)
//
// where v1 and v2 are the word-frequency vectors of the two documents. The
// result is not clamped. When either document has no tokens the denominator is
// zero; `EmptyPolicy` decides whether that is a 0.0 score or an error.

use std::str::FromStr;
use std::time::{Duration, Instant};

use super::frequency::FrequencyVector;

/// What to do when a document tokenizes to nothing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum EmptyPolicy {
    /// Score is 0.0 (the default)
    #[default]
    Zero,
    /// Return `SimilarityError::EmptyVocabulary`
    Error,
}

impl FromStr for EmptyPolicy {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "zero" => Ok(Self::Zero),
            "error" => Ok(Self::Error),
            other => anyhow::bail!("unknown empty policy {other:?} (expected \"zero\" or \"error\")"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SimilarityError {
    #[error("similarity is undefined: {} no words after removing punctuation", describe_empty(.first_empty, .second_empty))]
    EmptyVocabulary { first_empty: bool, second_empty: bool },
}

fn describe_empty(first: &bool, second: &bool) -> &'static str {
    match (*first, *second) {
        (true, true) => "both texts have",
        (true, false) => "text1 has",
        _ => "text2 has",
    }
}

/// A similarity score together with the wall-clock time it took to compute.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimedScore {
    pub similarity: f64,
    pub elapsed: Duration,
}

/// Stateless scorer. Cheap to copy into every request handler.
#[derive(Debug, Clone, Copy, Default)]
pub struct SimilarityScorer {
    pub policy: EmptyPolicy,
}

impl SimilarityScorer {
    pub fn new(policy: EmptyPolicy) -> Self {
        Self { policy }
    }

    /// Score two raw texts.
    pub fn score(&self, text1: &str, text2: &str) -> Result<f64, SimilarityError> {
        let v1 = FrequencyVector::from_text(text1);
        let v2 = FrequencyVector::from_text(text2);
        self.score_vectors(&v1, &v2)
    }

    /// Score two prepared frequency vectors.
    pub fn score_vectors(
        &self,
        v1: &FrequencyVector,
        v2: &FrequencyVector,
    ) -> Result<f64, SimilarityError> {
        if v1.is_empty() || v2.is_empty() {
            return match self.policy {
                EmptyPolicy::Zero => Ok(0.0),
                EmptyPolicy::Error => Err(SimilarityError::EmptyVocabulary {
                    first_empty: v1.is_empty(),
                    second_empty: v2.is_empty(),
                }),
            };
        }

        Ok(v1.dot(v2) / (v1.norm() * v2.norm()))
    }

    /// Score and measure how long the computation took.
    pub fn score_timed(&self, text1: &str, text2: &str) -> Result<TimedScore, SimilarityError> {
        let start = Instant::now();
        let similarity = self.score(text1, text2)?;
        Ok(TimedScore {
            similarity,
            elapsed: start.elapsed(),
        })
    }
}

/// Cosine similarity of two texts, scoring degenerate input as 0.0.
pub fn compute_similarity(text1: &str, text2: &str) -> f64 {
    SimilarityScorer::new(EmptyPolicy::Zero)
        .score(text1, text2)
        .unwrap_or(0.0)
}
