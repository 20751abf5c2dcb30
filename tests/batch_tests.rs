mod common;

use common::{corpus, known, partial_layout};
use keyscope::batch::{analyze_batch, BatchOutcome, CancelToken, NoProgress, ProgressCallback};
use keyscope::error::ComputationError;
use keyscope::geometry::{GeometryTable, Row, DEFAULT_HOME_COLUMNS};
use keyscope::layouts::KnownLayout;
use keyscope::scorer::{Analyzer, AnalyzerParams};
use std::sync::atomic::{AtomicUsize, Ordering};
use strum::IntoEnumIterator;

const TEXT: &str = "the five boxing wizards jump quickly over a lazy dog";

/// Stops the batch after the first finished layout.
struct StopAfterFirst {
    calls: AtomicUsize,
}

impl ProgressCallback for StopAfterFirst {
    fn on_progress(&self, _done: usize, _total: usize, _layout_name: &str) -> bool {
        self.calls.fetch_add(1, Ordering::SeqCst);
        false
    }
}

#[test]
fn test_outcomes_keep_input_order() {
    let layouts: Vec<_> = KnownLayout::iter().map(known).collect();
    let result = analyze_batch(
        &Analyzer::default(),
        &layouts,
        &corpus(TEXT),
        &CancelToken::new(),
        &NoProgress,
    );

    assert_eq!(result.completed, layouts.len());
    assert_eq!(result.failed, 0);
    assert_eq!(result.cancelled, 0);
    for (layout, (name, outcome)) in layouts.iter().zip(&result.outcomes) {
        assert_eq!(name, layout.name());
        assert_eq!(outcome.report().unwrap().layout_hash, layout.layout_hash());
    }
}

#[test]
fn test_batch_matches_single_analysis() {
    let analyzer = Analyzer::default();
    let c = corpus(TEXT);
    let layouts = vec![known(KnownLayout::Colemak), known(KnownLayout::Workman)];
    let result = analyze_batch(&analyzer, &layouts, &c, &CancelToken::new(), &NoProgress);

    for (layout, (_, outcome)) in layouts.iter().zip(&result.outcomes) {
        let single = analyzer.analyze(layout, &c).unwrap();
        assert_eq!(outcome.report(), Some(&single));
    }
}

#[test]
fn test_pre_cancelled_token_skips_everything() {
    let layouts: Vec<_> = KnownLayout::iter().map(known).collect();
    let token = CancelToken::new();
    token.cancel();

    let result = analyze_batch(&Analyzer::default(), &layouts, &corpus(TEXT), &token, &NoProgress);
    assert_eq!(result.cancelled, layouts.len());
    assert!(result
        .outcomes
        .iter()
        .all(|(_, o)| *o == BatchOutcome::Cancelled));
}

#[test]
fn test_callback_can_cancel_remaining_layouts() {
    // Enough layouts that some cannot have started before the first returns
    let layouts: Vec<_> = (0..64)
        .map(|_| known(KnownLayout::Qwerty))
        .collect();
    let callback = StopAfterFirst {
        calls: AtomicUsize::new(0),
    };
    let token = CancelToken::new();

    let result = analyze_batch(&Analyzer::default(), &layouts, &corpus(TEXT), &token, &callback);

    println!(
        "Scenario: stop after first -> {} completed, {} cancelled",
        result.completed, result.cancelled
    );
    assert!(token.is_cancelled());
    assert!(result.completed >= 1);
    assert_eq!(result.completed + result.cancelled, layouts.len());
    assert_eq!(callback.calls.load(Ordering::SeqCst), result.completed);
}

#[test]
fn test_failure_does_not_abort_batch() {
    let letters: Vec<_> = GeometryTable::standard()
        .slots
        .into_iter()
        .filter(|s| s.row != Row::Number)
        .collect();
    let analyzer = AnalyzerParams::builder()
        .geometry(GeometryTable::new("letters", letters, DEFAULT_HOME_COLUMNS).unwrap())
        .build()
        .build_analyzer()
        .unwrap();

    let layouts = vec![
        known(KnownLayout::Qwerty),
        partial_layout("numbers", &[('1', "N1"), ('a', "H0")]),
        known(KnownLayout::Dvorak),
    ];
    let result = analyze_batch(&analyzer, &layouts, &corpus(TEXT), &CancelToken::new(), &NoProgress);

    assert_eq!(result.completed, 2);
    assert_eq!(result.failed, 1);
    assert_eq!(
        result.outcomes[1].1,
        BatchOutcome::Failed(ComputationError::UnknownSlot {
            ch: '1',
            slot: "N1".to_string()
        })
    );
}
