pub mod builder;
pub mod consistency;
pub mod counts;
pub mod loader;

pub use self::builder::CorpusBuilder;
pub use self::consistency::ConsistencyFlag;
pub use self::counts::NgramCounts;

use crate::error::CorpusError;
use std::collections::BTreeMap;

/// Normalized n-gram probabilities. Immutable once built; identified by the
/// content hash of its integer counts.
///
/// Tables are `BTreeMap`s so every traversal visits entries in the same order,
/// which keeps floating-point sums over a corpus bit-identical between runs.
#[derive(Debug, Clone)]
pub struct Corpus {
    char_freq: BTreeMap<char, f64>,
    bigram_freq: BTreeMap<(char, char), f64>,
    trigram_freq: BTreeMap<(char, char, char), f64>,
    total_chars: u64,
    total_bigrams: u64,
    total_trigrams: u64,
    version: String,
    consistency_flags: Vec<ConsistencyFlag>,
    counts: NgramCounts,
}

impl Corpus {
    /// Single normalization pass over merged integer counts. Zero counts are
    /// dropped, so a table whose total is 0 ends up empty.
    pub fn from_counts(counts: NgramCounts) -> Result<Self, CorpusError> {
        let total_chars = counts.total_chars();
        if total_chars == 0 {
            return Err(CorpusError::Empty);
        }
        let total_bigrams = counts.total_bigrams();
        let total_trigrams = counts.total_trigrams();

        let char_freq = counts
            .chars
            .iter()
            .filter(|&(_, &n)| n > 0)
            .map(|(&c, &n)| (c, n as f64 / total_chars as f64))
            .collect();
        let bigram_freq = counts
            .bigrams
            .iter()
            .filter(|&(_, &n)| n > 0)
            .map(|(&b, &n)| (b, n as f64 / total_bigrams as f64))
            .collect();
        let trigram_freq = counts
            .trigrams
            .iter()
            .filter(|&(_, &n)| n > 0)
            .map(|(&t, &n)| (t, n as f64 / total_trigrams as f64))
            .collect();

        Ok(Self {
            char_freq,
            bigram_freq,
            trigram_freq,
            total_chars,
            total_bigrams,
            total_trigrams,
            version: counts.content_hash(),
            consistency_flags: Vec::new(),
            counts,
        })
    }

    pub(crate) fn with_consistency_flags(mut self, flags: Vec<ConsistencyFlag>) -> Self {
        self.consistency_flags = flags;
        self
    }

    pub fn char_freq(&self, c: char) -> f64 {
        self.char_freq.get(&c).copied().unwrap_or(0.0)
    }

    pub fn bigram_freq(&self, a: char, b: char) -> f64 {
        self.bigram_freq.get(&(a, b)).copied().unwrap_or(0.0)
    }

    pub fn trigram_freq(&self, a: char, b: char, c: char) -> f64 {
        self.trigram_freq.get(&(a, b, c)).copied().unwrap_or(0.0)
    }

    pub fn chars(&self) -> &BTreeMap<char, f64> {
        &self.char_freq
    }

    pub fn bigrams(&self) -> &BTreeMap<(char, char), f64> {
        &self.bigram_freq
    }

    pub fn trigrams(&self) -> &BTreeMap<(char, char, char), f64> {
        &self.trigram_freq
    }

    pub fn total_chars(&self) -> u64 {
        self.total_chars
    }

    pub fn total_bigrams(&self) -> u64 {
        self.total_bigrams
    }

    pub fn total_trigrams(&self) -> u64 {
        self.total_trigrams
    }

    /// Content hash ("corpus version").
    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn consistency_flags(&self) -> &[ConsistencyFlag] {
        &self.consistency_flags
    }

    pub fn counts(&self) -> &NgramCounts {
        &self.counts
    }
}
