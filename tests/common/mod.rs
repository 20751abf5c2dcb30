#![allow(dead_code)]

use keyscope::config::{CorpusOptions, LayoutRules};
use keyscope::corpus::{Corpus, CorpusBuilder};
use keyscope::geometry::GeometryTable;
use keyscope::layout::{Layout, LayoutSpec};
use keyscope::layouts::KnownLayout;
use keyscope::scorer::{Analyzer, MetricReport, MetricValue};
use std::collections::BTreeMap;

pub const EPS: f64 = 1e-9;

/// Word-bounded corpus from a single source with default options.
pub fn corpus(text: &str) -> Corpus {
    corpus_with(text, CorpusOptions::default())
}

pub fn corpus_with(text: &str, options: CorpusOptions) -> Corpus {
    let mut builder = CorpusBuilder::new(options);
    builder.add_source("test", text);
    builder.build().unwrap()
}

pub fn no_rules() -> LayoutRules {
    LayoutRules {
        required_alphabet: String::new(),
    }
}

pub fn known(layout: KnownLayout) -> Layout {
    layout
        .build(&GeometryTable::standard(), &LayoutRules::default())
        .unwrap()
}

pub fn qwerty() -> Layout {
    known(KnownLayout::Qwerty)
}

/// Hand-written partial layout, no required alphabet.
pub fn partial_layout(name: &str, keys: &[(char, &str)]) -> Layout {
    let spec = LayoutSpec {
        name: name.to_string(),
        keys: keys
            .iter()
            .map(|(c, id)| (c.to_string(), id.to_string()))
            .collect::<BTreeMap<_, _>>(),
    };
    Layout::validate(&spec, &GeometryTable::standard(), &no_rules()).unwrap()
}

pub fn analyze(layout: &Layout, corpus: &Corpus) -> MetricReport {
    Analyzer::default().analyze(layout, corpus).unwrap()
}

pub fn defined(v: MetricValue) -> f64 {
    v.value()
        .unwrap_or_else(|| panic!("expected a defined metric, got {:?}", v))
}

pub fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-6,
        "expected {}, got {}",
        expected,
        actual
    );
}
