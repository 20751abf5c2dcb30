use super::{top_offenders, PosMap};
use crate::corpus::Corpus;
use crate::scorer::physics::{analyze_interaction, BigramRoll, SameFingerClass, ScissorClass};
use crate::scorer::types::{MetricViolation, RawTallies};
use crate::scorer::Analyzer;

fn fmt_keys(c1: char, c2: char) -> String {
    format!("{} {}", c1, c2)
}

pub fn accumulate_details(analyzer: &Analyzer, pos_map: &PosMap, corpus: &Corpus, d: &mut RawTallies) {
    let settings = analyzer.settings();
    let mut sfbs = Vec::new();
    let mut scissors = Vec::new();

    for (&(c1, c2), &freq) in corpus.bigrams() {
        let (Some(k1), Some(k2)) = (pos_map.get(&c1), pos_map.get(&c2)) else {
            d.unmapped_bigram_mass += freq;
            continue;
        };
        d.bigram_mass += freq;

        let m = analyze_interaction(k1, k2, settings);

        d.distance_sum += m.distance * freq;
        if k2.finger.is_pinky() {
            d.pinky_distance_sum += m.distance * freq;
        }

        if m.is_repeat {
            d.same_key_repeat += freq;
            continue;
        }

        if m.is_two_row_jump {
            d.two_row_jump += freq;
        }

        if let Some(class) = m.same_finger {
            match class {
                SameFingerClass::TwoRowSfb => d.two_row_sfb += freq,
                SameFingerClass::SkipBigram3uPlus => d.skip_bigram_3u_plus += freq,
                SameFingerClass::SkipBigram2u => d.skip_bigram_2u += freq,
                SameFingerClass::BasicSfb => d.basic_sfb += freq,
            }
            sfbs.push(MetricViolation {
                keys: fmt_keys(c1, c2),
                score: m.distance * freq,
                freq,
            });
        }

        if let Some(class) = m.scissor {
            match class {
                ScissorClass::Pinky => d.pinky_scissors += freq,
                ScissorClass::General => d.general_scissors += freq,
            }
            scissors.push(MetricViolation {
                keys: fmt_keys(c1, c2),
                score: m.distance * freq,
                freq,
            });
        }

        if let Some(severity) = m.stretch {
            d.lateral_stretch_weighted += severity * freq;
            d.lateral_stretch_mass += freq;
        }

        match m.roll {
            Some(BigramRoll::In) => d.bigram_roll_in += freq,
            Some(BigramRoll::Out) => d.bigram_roll_out += freq,
            None => {}
        }
    }

    d.top_sfbs = top_offenders(sfbs, settings.top_offenders);
    d.top_scissors = top_offenders(scissors, settings.top_offenders);
}
