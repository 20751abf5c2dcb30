use super::types::{Diagnostics, Metric, MetricReport, MetricValue, RawTallies};
use crate::geometry::Hand;
use std::collections::BTreeMap;
use tracing::debug;

/// Identity of the inputs a report was computed from.
#[derive(Debug, Clone, Default)]
pub struct ReportHeader {
    pub layout_name: String,
    pub layout_hash: String,
    pub corpus_version: String,
    pub effort_model_version: String,
}

/// Turns weighted sums into ratios and percentages. Full precision; see
/// `MetricReport::rounded` for display.
pub fn build_report(header: ReportHeader, t: RawTallies) -> MetricReport {
    use MetricValue as V;

    let chars = t.char_mass;
    let bigrams = t.bigram_mass;
    let trigrams = t.trigram_mass;

    let left = t.hand_mass.get(&Hand::Left).copied().unwrap_or(0.0);
    let right = t.hand_mass.get(&Hand::Right).copied().unwrap_or(0.0);

    let metrics: BTreeMap<Metric, MetricValue> = BTreeMap::from([
        // Ratios
        (Metric::Effort, V::ratio(t.effort_sum, chars)),
        (Metric::Distance, V::ratio(t.distance_sum, bigrams)),
        (
            Metric::PinkyTravelShare,
            V::ratio(t.pinky_distance_sum, t.distance_sum),
        ),
        // Same finger
        (Metric::Sfb, V::percent(t.sfb_total(), bigrams)),
        (Metric::BasicSfb, V::percent(t.basic_sfb, bigrams)),
        (Metric::SkipBigram2u, V::percent(t.skip_bigram_2u, bigrams)),
        (
            Metric::SkipBigram3uPlus,
            V::percent(t.skip_bigram_3u_plus, bigrams),
        ),
        (Metric::TwoRowSfb, V::percent(t.two_row_sfb, bigrams)),
        (Metric::SameKeyRepeat, V::percent(t.same_key_repeat, bigrams)),
        (
            Metric::SameFingerSkipgram,
            V::percent(t.same_finger_skipgram, trigrams),
        ),
        // Bigram mechanics
        (Metric::PinkyScissors, V::percent(t.pinky_scissors, bigrams)),
        (
            Metric::GeneralScissors,
            V::percent(t.general_scissors, bigrams),
        ),
        (
            Metric::LateralStretch,
            V::percent(t.lateral_stretch_weighted, bigrams),
        ),
        (
            Metric::LateralStretchBigrams,
            V::percent(t.lateral_stretch_mass, bigrams),
        ),
        (Metric::TwoRowJump, V::percent(t.two_row_jump, bigrams)),
        (Metric::BigramRollIn, V::percent(t.bigram_roll_in, bigrams)),
        (Metric::BigramRollOut, V::percent(t.bigram_roll_out, bigrams)),
        // Positional
        (
            Metric::CenterColumnUsage,
            V::percent(t.center_column_mass, chars),
        ),
        (
            Metric::PinkyOffHome,
            V::percent(t.pinky_off_home_mass, t.pinky_mass),
        ),
        (Metric::HandImbalance, V::percent((left - right).abs(), chars)),
        // Trigram flow
        (Metric::Alternation, V::percent(t.alternation, trigrams)),
        (Metric::AltSameFinger, V::percent(t.alt_same_finger, trigrams)),
        (Metric::RollIn, V::percent(t.roll_in, trigrams)),
        (Metric::RollOut, V::percent(t.roll_out, trigrams)),
        (Metric::Redirect, V::percent(t.redirect, trigrams)),
        (Metric::OtherTrigrams, V::percent(t.other_trigrams, trigrams)),
    ]);

    let undefined_metrics: Vec<Metric> = metrics
        .iter()
        .filter(|(_, v)| !v.is_defined())
        .map(|(m, _)| *m)
        .collect();
    if !undefined_metrics.is_empty() {
        debug!(
            "Layout '{}': {} metric(s) undefined (zero denominator)",
            header.layout_name,
            undefined_metrics.len()
        );
    }

    let finger_usage = usage_map(&t.finger_mass, chars);
    let row_usage = usage_map(&t.row_mass, chars);
    let column_usage = usage_map(&t.column_mass, chars);
    let hand_usage = usage_map(&t.hand_mass, chars);

    let diagnostics = Diagnostics {
        unmapped_pct: V::percent(t.unmapped_char_mass, chars + t.unmapped_char_mass),
        unmapped_bigram_pct: V::percent(
            t.unmapped_bigram_mass,
            bigrams + t.unmapped_bigram_mass,
        ),
        unmapped_trigram_pct: V::percent(
            t.unmapped_trigram_mass,
            trigrams + t.unmapped_trigram_mass,
        ),
        unmapped_chars: t.unmapped_chars,
        undefined_metrics,
        top_sfbs: t.top_sfbs,
        top_scissors: t.top_scissors,
        top_redirs: t.top_redirs,
    };

    MetricReport {
        layout_name: header.layout_name,
        layout_hash: header.layout_hash,
        corpus_version: header.corpus_version,
        effort_model_version: header.effort_model_version,
        metrics,
        finger_usage,
        row_usage,
        column_usage,
        hand_usage,
        diagnostics,
    }
}

fn usage_map<K: Ord + Copy>(mass: &BTreeMap<K, f64>, total: f64) -> BTreeMap<K, MetricValue> {
    mass.iter()
        .map(|(k, v)| (*k, MetricValue::percent(*v, total)))
        .collect()
}
