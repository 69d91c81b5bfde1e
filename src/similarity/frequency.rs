// Word-frequency vectors — sparse token -> count maps.

use std::collections::HashMap;

use super::preprocess::tokenize;

/// Occurrence count of each distinct token in one document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrequencyVector {
    counts: HashMap<String, u32>,
}

impl FrequencyVector {
    /// Count already-tokenized input.
    pub fn from_tokens<I, S>(tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut counts = HashMap::new();
        for token in tokens {
            *counts.entry(token.into()).or_insert(0) += 1;
        }
        Self { counts }
    }

    /// Preprocess, tokenize and count raw text.
    pub fn from_text(text: &str) -> Self {
        Self::from_tokens(tokenize(text))
    }

    /// Count for `token`, 0 if it never appeared.
    pub fn get(&self, token: &str) -> u32 {
        self.counts.get(token).copied().unwrap_or(0)
    }

    /// Number of distinct tokens.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u32)> + '_ {
        self.counts.iter().map(|(k, &v)| (k.as_str(), v))
    }

    /// Dot product with `other`.
    ///
    /// Only this vector's keys are visited; a key missing from `other`
    /// contributes zero, so the result is the same either way round.
    pub fn dot(&self, other: &FrequencyVector) -> f64 {
        self.iter()
            .map(|(token, count)| f64::from(count) * f64::from(other.get(token)))
            .sum()
    }

    /// Euclidean norm.
    pub fn norm(&self) -> f64 {
        self.counts
            .values()
            .map(|&c| f64::from(c) * f64::from(c))
            .sum::<f64>()
            .sqrt()
    }
}
