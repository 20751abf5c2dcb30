use super::consistency::check_consistency;
use super::{Corpus, NgramCounts};
use crate::config::CorpusOptions;
use crate::error::CorpusError;
use rayon::prelude::*;
use tracing::{debug, info, warn};

/// Accumulates text sources as integer counts, then normalizes once.
pub struct CorpusBuilder {
    options: CorpusOptions,
    sources: Vec<(String, NgramCounts)>,
}

impl CorpusBuilder {
    pub fn new(options: CorpusOptions) -> Self {
        Self {
            options,
            sources: Vec::new(),
        }
    }

    pub fn options(&self) -> &CorpusOptions {
        &self.options
    }

    pub fn add_source(&mut self, name: &str, text: &str) -> &mut Self {
        let counts = count_text(text, &self.options);
        debug!(
            "Source '{}': {} chars, {} bigrams, {} trigrams",
            name,
            counts.total_chars(),
            counts.total_bigrams(),
            counts.total_trigrams()
        );
        self.sources.push((name.to_string(), counts));
        self
    }

    /// Adds a source that was counted elsewhere (e.g. a saved count table).
    pub fn add_counts(&mut self, name: &str, counts: NgramCounts) -> &mut Self {
        self.sources.push((name.to_string(), counts));
        self
    }

    pub fn source_count(&self) -> usize {
        self.sources.len()
    }

    pub fn build(&self) -> Result<Corpus, CorpusError> {
        let merged = self
            .sources
            .iter()
            .fold(NgramCounts::new(), |mut acc, (_, counts)| {
                acc.merge_from(counts);
                acc
            });

        let corpus = Corpus::from_counts(merged)?;

        let flags = if self.sources.len() > 1 {
            check_consistency(
                &self.sources,
                &corpus,
                self.options.consistency_threshold,
                self.options.consistency_min_freq,
            )
        } else {
            Vec::new()
        };

        for flag in flags.iter().take(5) {
            warn!(
                "Source '{}' deviates on '{}': {:.4} vs merged {:.4} ({:.0}%)",
                flag.source,
                flag.ngram,
                flag.source_freq,
                flag.merged_freq,
                flag.deviation * 100.0
            );
        }

        info!(
            "Corpus built from {} source(s): {} chars, {} bigrams, {} trigrams, {} consistency flag(s), version {}",
            self.sources.len(),
            corpus.total_chars(),
            corpus.total_bigrams(),
            corpus.total_trigrams(),
            flags.len(),
            &corpus.version()[..12]
        );

        Ok(corpus.with_consistency_flags(flags))
    }
}

/// Case-folds and filters `text`, returning the segments n-gram windows may
/// slide over. Whitespace is never a character; without cross-word n-grams it
/// also ends a segment. Filtered characters are dropped without splitting.
pub fn normalize(text: &str, options: &CorpusOptions) -> Vec<Vec<char>> {
    let mut segments = Vec::new();
    let mut current = Vec::new();

    for ch in text.chars() {
        if ch.is_whitespace() {
            if !options.cross_word_ngrams && !current.is_empty() {
                segments.push(std::mem::take(&mut current));
            }
            continue;
        }

        let mut push = |c: char| {
            if c.is_control() || (options.strip_non_alphabetic && !c.is_alphabetic()) {
                return;
            }
            current.push(c);
        };

        if options.lowercase {
            ch.to_lowercase().for_each(&mut push);
        } else {
            push(ch);
        }
    }

    if !current.is_empty() {
        segments.push(current);
    }
    segments
}

/// Map-reduce count of one text: chunks of start positions are counted on the
/// rayon pool and the integer tables summed.
pub fn count_text(text: &str, options: &CorpusOptions) -> NgramCounts {
    let segments = normalize(text, options);
    count_segments(&segments, options.chunk_size)
}

pub fn count_segments(segments: &[Vec<char>], chunk_size: usize) -> NgramCounts {
    let chunk = chunk_size.max(1);

    let work: Vec<(usize, usize, usize)> = segments
        .iter()
        .enumerate()
        .flat_map(|(idx, seg)| {
            (0..seg.len())
                .step_by(chunk)
                .map(move |start| (idx, start, start.saturating_add(chunk).min(seg.len())))
        })
        .collect();

    work.par_iter()
        .fold(NgramCounts::new, |mut acc, &(idx, start, end)| {
            acc.count_segment(&segments[idx], start, end);
            acc
        })
        .reduce(NgramCounts::new, NgramCounts::merge)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn opts(cross_word: bool, strip: bool) -> CorpusOptions {
        CorpusOptions {
            cross_word_ngrams: cross_word,
            strip_non_alphabetic: strip,
            ..Default::default()
        }
    }

    #[test]
    fn test_normalize_word_segments() {
        let segs = normalize("The  Fox\tran", &opts(false, false));
        let words: Vec<String> = segs.iter().map(|s| s.iter().collect()).collect();
        assert_eq!(words, vec!["the", "fox", "ran"]);
    }

    #[test]
    fn test_normalize_cross_word_joins() {
        let segs = normalize("ab cd", &opts(true, false));
        assert_eq!(segs, vec![vec!['a', 'b', 'c', 'd']]);
    }

    #[test]
    fn test_strip_drops_without_splitting() {
        let segs = normalize("don't stop.", &opts(false, true));
        let words: Vec<String> = segs.iter().map(|s| s.iter().collect()).collect();
        assert_eq!(words, vec!["dont", "stop"]);
    }

    #[test]
    fn test_chunk_size_does_not_change_counts() {
        let segs = normalize("a long stretch of cross word text", &opts(true, false));
        let one = count_segments(&segs, 1);
        let many = count_segments(&segs, 1_000);
        assert_eq!(one, many);
    }

    #[test]
    fn test_empty_source_fails() {
        let mut builder = CorpusBuilder::new(opts(false, true));
        builder.add_source("noise", "  ... !!! ,,, \n\t");
        assert_eq!(builder.build().unwrap_err(), CorpusError::Empty);
    }
}
