use super::{top_offenders, PosMap};
use crate::corpus::Corpus;
use crate::scorer::flow::{analyze_flow, TrigramClass};
use crate::scorer::types::{MetricViolation, RawTallies};
use crate::scorer::Analyzer;

fn fmt_keys(c1: char, c2: char, c3: char) -> String {
    format!("{} {} {}", c1, c2, c3)
}

pub fn accumulate_details(analyzer: &Analyzer, pos_map: &PosMap, corpus: &Corpus, d: &mut RawTallies) {
    let mut redirs = Vec::new();

    for (&(c1, c2, c3), &freq) in corpus.trigrams() {
        let (Some(k1), Some(k2), Some(k3)) = (pos_map.get(&c1), pos_map.get(&c2), pos_map.get(&c3))
        else {
            d.unmapped_trigram_mass += freq;
            continue;
        };
        d.trigram_mass += freq;

        let flow = analyze_flow(k1, k2, k3);
        if flow.is_same_finger_skipgram {
            d.same_finger_skipgram += freq;
        }

        match flow.class {
            TrigramClass::Alternation { same_finger } => {
                d.alternation += freq;
                if same_finger {
                    d.alt_same_finger += freq;
                }
            }
            TrigramClass::RollIn => d.roll_in += freq,
            TrigramClass::RollOut => d.roll_out += freq,
            TrigramClass::Redirect => {
                d.redirect += freq;
                redirs.push(MetricViolation {
                    keys: fmt_keys(c1, c2, c3),
                    score: freq,
                    freq,
                });
            }
            TrigramClass::Other => d.other_trigrams += freq,
        }
    }

    d.top_redirs = top_offenders(redirs, analyzer.settings().top_offenders);
}
