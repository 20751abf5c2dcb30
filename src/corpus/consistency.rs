use super::{Corpus, NgramCounts};
use serde::{Deserialize, Serialize};

/// One n-gram whose frequency in a single source strays too far from the
/// merged corpus. Diagnostic only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConsistencyFlag {
    pub source: String,
    pub ngram: String,
    pub merged_freq: f64,
    pub source_freq: f64,
    /// `|source - merged| / merged`
    pub deviation: f64,
}

/// Compares each source's unigram, bigram and trigram frequencies against the merged
/// corpus. N-grams below `min_freq` in the merged corpus are ignored.
pub fn check_consistency(
    sources: &[(String, NgramCounts)],
    merged: &Corpus,
    threshold: f64,
    min_freq: f64,
) -> Vec<ConsistencyFlag> {
    let mut flags = Vec::new();

    for (name, counts) in sources {
        let char_total = counts.total_chars();
        if char_total > 0 {
            for (&c, &merged_freq) in merged.chars() {
                let n = counts.chars.get(&c).copied().unwrap_or(0);
                push_if_deviant(
                    &mut flags,
                    name,
                    c.to_string(),
                    merged_freq,
                    n as f64 / char_total as f64,
                    threshold,
                    min_freq,
                );
            }
        }

        let bigram_total = counts.total_bigrams();
        if bigram_total > 0 {
            for (&(a, b), &merged_freq) in merged.bigrams() {
                let n = counts.bigrams.get(&(a, b)).copied().unwrap_or(0);
                push_if_deviant(
                    &mut flags,
                    name,
                    format!("{}{}", a, b),
                    merged_freq,
                    n as f64 / bigram_total as f64,
                    threshold,
                    min_freq,
                );
            }
        }

        let trigram_total = counts.total_trigrams();
        if trigram_total > 0 {
            for (&(a, b, c), &merged_freq) in merged.trigrams() {
                let n = counts.trigrams.get(&(a, b, c)).copied().unwrap_or(0);
                push_if_deviant(
                    &mut flags,
                    name,
                    format!("{}{}{}", a, b, c),
                    merged_freq,
                    n as f64 / trigram_total as f64,
                    threshold,
                    min_freq,
                );
            }
        }
    }

    flags.sort_by(|a, b| b.deviation.total_cmp(&a.deviation));
    flags
}

fn push_if_deviant(
    flags: &mut Vec<ConsistencyFlag>,
    source: &str,
    ngram: String,
    merged_freq: f64,
    source_freq: f64,
    threshold: f64,
    min_freq: f64,
) {
    if merged_freq < min_freq || merged_freq <= 0.0 {
        return;
    }
    let deviation = (source_freq - merged_freq).abs() / merged_freq;
    if deviation > threshold {
        flags.push(ConsistencyFlag {
            source: source.to_string(),
            ngram,
            merged_freq,
            source_freq,
            deviation,
        });
    }
}
