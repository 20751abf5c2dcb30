mod common;

use common::{corpus, corpus_with, EPS};
use keyscope::config::CorpusOptions;
use keyscope::corpus::builder::{count_segments, normalize};
use keyscope::corpus::{Corpus, CorpusBuilder, NgramCounts};
use keyscope::error::CorpusError;

#[test]
fn test_quick_brown_fox_frequencies() {
    let c = corpus("the quick brown fox");

    // 16 letters, whitespace never counted
    assert_eq!(c.total_chars(), 16);
    assert!((c.char_freq('o') - 2.0 / 16.0).abs() < EPS);
    assert!((c.char_freq('e') - 1.0 / 16.0).abs() < EPS);
    assert_eq!(c.char_freq(' '), 0.0);

    // 2 + 4 + 4 + 2 bigrams inside the four words
    assert_eq!(c.total_bigrams(), 12);
    assert!((c.bigram_freq('t', 'h') - 1.0 / 12.0).abs() < EPS);
    assert_eq!(c.bigram_freq('e', 'q'), 0.0, "word boundary must not be bridged");
}

#[test]
fn test_cross_word_ngrams_bridge_spaces() {
    let options = CorpusOptions {
        cross_word_ngrams: true,
        ..Default::default()
    };
    let c = corpus_with("the quick brown fox", options);

    assert_eq!(c.total_chars(), 16);
    assert_eq!(c.total_bigrams(), 15);
    assert!(c.bigram_freq('e', 'q') > 0.0);
    assert_eq!(c.bigram_freq('e', ' '), 0.0);
}

#[test]
fn test_case_folding() {
    let folded = corpus("AbA");
    assert!((folded.char_freq('a') - 2.0 / 3.0).abs() < EPS);

    let kept = corpus_with(
        "AbA",
        CorpusOptions {
            lowercase: false,
            ..Default::default()
        },
    );
    assert_eq!(kept.char_freq('a'), 0.0);
    assert!((kept.char_freq('A') - 2.0 / 3.0).abs() < EPS);
}

#[test]
fn test_filtered_characters_do_not_split_words() {
    let options = CorpusOptions {
        strip_non_alphabetic: true,
        ..Default::default()
    };
    let c = corpus_with("it's", options);
    assert!(c.bigram_freq('t', 's') > 0.0);
    assert_eq!(c.char_freq('\''), 0.0);
}

#[test]
fn test_punctuation_only_input_is_empty() {
    let mut builder = CorpusBuilder::new(CorpusOptions {
        strip_non_alphabetic: true,
        ..Default::default()
    });
    builder.add_source("noise", "   !!! ... \t\n ,,, 123");
    assert_eq!(builder.build().unwrap_err(), CorpusError::Empty);
}

#[test]
fn test_whitespace_only_input_is_empty() {
    let mut builder = CorpusBuilder::new(CorpusOptions::default());
    builder.add_source("blank", " \n\t  ");
    assert!(matches!(builder.build(), Err(CorpusError::Empty)));
}

#[test]
fn test_frequencies_sum_to_one() {
    let c = corpus("pack my box with five dozen liquor jugs");
    let chars: f64 = c.chars().values().sum();
    let bigrams: f64 = c.bigrams().values().sum();
    let trigrams: f64 = c.trigrams().values().sum();
    assert!((chars - 1.0).abs() < 1e-9);
    assert!((bigrams - 1.0).abs() < 1e-9);
    assert!((trigrams - 1.0).abs() < 1e-9);
}

#[test]
fn test_multiple_sources_merge_counts() {
    let mut split = CorpusBuilder::new(CorpusOptions::default());
    split.add_source("one", "hello there");
    split.add_source("two", "general kenobi");
    let split = split.build().unwrap();

    let whole = corpus("hello there general kenobi");

    assert_eq!(split.counts(), whole.counts());
    assert_eq!(split.version(), whole.version());
    assert_eq!(split.chars(), whole.chars());
}

#[test]
fn test_version_changes_with_content() {
    let a = corpus("alpha beta");
    let b = corpus("alpha gamma");
    assert_ne!(a.version(), b.version());
    assert_eq!(a.version(), corpus("alpha beta").version());
}

#[test]
fn test_chunked_counting_matches_whole_text() {
    let text = "sphinx of black quartz judge my vow ".repeat(50);
    let options = CorpusOptions {
        cross_word_ngrams: true,
        ..Default::default()
    };
    let segments = normalize(&text, &options);

    let reference = count_segments(&segments, usize::MAX);
    for chunk in [1, 2, 3, 7, 64, 1000] {
        assert_eq!(count_segments(&segments, chunk), reference, "chunk {}", chunk);
    }
}

#[test]
fn test_from_counts_normalizes_once() {
    let mut counts = NgramCounts::new();
    counts.chars.insert('a', 3);
    counts.chars.insert('b', 1);
    counts.bigrams.insert(('a', 'b'), 2);

    let c = Corpus::from_counts(counts).unwrap();
    assert!((c.char_freq('a') - 0.75).abs() < EPS);
    assert!((c.bigram_freq('a', 'b') - 1.0).abs() < EPS);
    assert_eq!(c.total_trigrams(), 0);
    assert!(c.trigrams().is_empty());
}

#[test]
fn test_consistency_flags_do_not_fail_build() {
    let mut builder = CorpusBuilder::new(CorpusOptions::default());
    builder.add_source("english", "the cat sat on the mat with the hat");
    builder.add_source("zzz", "zzz zzz zzz zzz zzz zzz zzz");
    let c = builder.build().unwrap();

    let flags = c.consistency_flags();
    println!("Scenario: divergent sources -> {} flag(s)", flags.len());
    assert!(!flags.is_empty());
    assert!(flags.iter().any(|f| f.source == "zzz" && f.ngram == "z"));
    // sorted by deviation, largest first
    assert!(flags.windows(2).all(|w| w[0].deviation >= w[1].deviation));
}

#[test]
fn test_consistency_min_freq_filters_rare_ngrams() {
    let options = CorpusOptions {
        consistency_min_freq: 1.0,
        ..Default::default()
    };
    let mut builder = CorpusBuilder::new(options);
    builder.add_source("a", "aaaa");
    builder.add_source("b", "bbbb");
    assert!(builder.build().unwrap().consistency_flags().is_empty());
}
