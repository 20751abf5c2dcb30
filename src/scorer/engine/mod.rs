mod bigrams;
mod monograms;
mod trigrams;

use super::types::{MetricViolation, RawTallies};
use super::Analyzer;
use crate::corpus::Corpus;
use crate::geometry::KeySlot;
use fnv::FnvHashMap;

/// Character -> slot of the analyzer's geometry, resolved once per layout.
pub type PosMap<'a> = FnvHashMap<char, &'a KeySlot>;

/// One pass over each n-gram table. Every classifier runs inside that pass.
pub fn tally(analyzer: &Analyzer, pos_map: &PosMap, corpus: &Corpus) -> RawTallies {
    let mut t = RawTallies::default();

    monograms::accumulate_details(analyzer, pos_map, corpus, &mut t);
    bigrams::accumulate_details(analyzer, pos_map, corpus, &mut t);
    trigrams::accumulate_details(analyzer, pos_map, corpus, &mut t);

    t
}

/// Highest score first; ties broken by key label so the order is stable.
pub(crate) fn top_offenders(mut list: Vec<MetricViolation>, limit: usize) -> Vec<MetricViolation> {
    list.sort_by(|a, b| {
        b.score
            .total_cmp(&a.score)
            .then_with(|| a.keys.cmp(&b.keys))
    });
    list.truncate(limit);
    list
}
