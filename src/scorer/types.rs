use crate::geometry::{Finger, Hand, Row};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use strum_macros::{Display, EnumIter, EnumString};

/// A scalar that may be undefined because its denominator was zero.
/// Serializes as a bare number or `null`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MetricValue {
    Defined(f64),
    Undefined,
}

impl MetricValue {
    pub fn ratio(numerator: f64, denominator: f64) -> Self {
        if denominator > 0.0 && denominator.is_finite() {
            MetricValue::Defined(numerator / denominator)
        } else {
            MetricValue::Undefined
        }
    }

    pub fn percent(numerator: f64, denominator: f64) -> Self {
        match Self::ratio(numerator, denominator) {
            MetricValue::Defined(v) => MetricValue::Defined(v * 100.0),
            undefined => undefined,
        }
    }

    pub fn value(self) -> Option<f64> {
        match self {
            MetricValue::Defined(v) => Some(v),
            MetricValue::Undefined => None,
        }
    }

    pub fn is_defined(self) -> bool {
        matches!(self, MetricValue::Defined(_))
    }

    pub fn rounded(self, places: i32) -> Self {
        match self {
            MetricValue::Defined(v) => {
                let scale = 10f64.powi(places);
                MetricValue::Defined((v * scale).round() / scale)
            }
            undefined => undefined,
        }
    }
}

/// Named scalar metrics of a report. Percentages unless noted.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    EnumIter,
    EnumString,
    Display,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Metric {
    // Ratios
    Effort,
    Distance,
    PinkyTravelShare,

    // Same finger
    Sfb,
    BasicSfb,
    #[serde(rename = "skip_bigram_2u")]
    #[strum(to_string = "skip_bigram_2u")]
    SkipBigram2u,
    #[serde(rename = "skip_bigram_3u_plus")]
    #[strum(to_string = "skip_bigram_3u_plus")]
    SkipBigram3uPlus,
    TwoRowSfb,
    SameKeyRepeat,
    SameFingerSkipgram,

    // Bigram mechanics
    PinkyScissors,
    GeneralScissors,
    LateralStretch,
    LateralStretchBigrams,
    TwoRowJump,
    BigramRollIn,
    BigramRollOut,

    // Positional
    CenterColumnUsage,
    PinkyOffHome,
    HandImbalance,

    // Trigram flow
    Alternation,
    AltSameFinger,
    RollIn,
    RollOut,
    Redirect,
    OtherTrigrams,
}

impl Metric {
    /// Ratios are reported as-is; every other metric is a percentage.
    pub fn is_ratio(self) -> bool {
        matches!(
            self,
            Metric::Effort | Metric::Distance | Metric::PinkyTravelShare
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricViolation {
    pub keys: String, // e.g. "e d" or "e x d"
    pub score: f64,   // frequency-weighted contribution
    pub freq: f64,    // raw corpus frequency
}

/// Weighted sums straight out of the n-gram passes, before normalization.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct RawTallies {
    // === MONOGRAMS ===
    pub char_mass: f64,
    pub unmapped_char_mass: f64,
    pub effort_sum: f64,
    pub center_column_mass: f64,
    pub pinky_mass: f64,
    pub pinky_off_home_mass: f64,
    pub finger_mass: BTreeMap<Finger, f64>,
    pub row_mass: BTreeMap<Row, f64>,
    pub column_mass: BTreeMap<u8, f64>,
    pub hand_mass: BTreeMap<Hand, f64>,
    pub unmapped_chars: Vec<char>,

    // === BIGRAMS ===
    pub bigram_mass: f64,
    pub unmapped_bigram_mass: f64,
    pub distance_sum: f64,
    pub pinky_distance_sum: f64,

    pub basic_sfb: f64,
    pub skip_bigram_2u: f64,
    pub skip_bigram_3u_plus: f64,
    pub two_row_sfb: f64,
    pub same_key_repeat: f64,

    pub pinky_scissors: f64,
    pub general_scissors: f64,
    pub lateral_stretch_weighted: f64,
    pub lateral_stretch_mass: f64,
    pub two_row_jump: f64,
    pub bigram_roll_in: f64,
    pub bigram_roll_out: f64,

    // === TRIGRAMS ===
    pub trigram_mass: f64,
    pub unmapped_trigram_mass: f64,
    pub alternation: f64,
    pub alt_same_finger: f64,
    pub roll_in: f64,
    pub roll_out: f64,
    pub redirect: f64,
    pub other_trigrams: f64,
    pub same_finger_skipgram: f64,

    // === OFFENDERS ===
    pub top_sfbs: Vec<MetricViolation>,
    pub top_scissors: Vec<MetricViolation>,
    pub top_redirs: Vec<MetricViolation>,
}

impl RawTallies {
    pub fn sfb_total(&self) -> f64 {
        self.basic_sfb + self.skip_bigram_2u + self.skip_bigram_3u_plus + self.two_row_sfb
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Diagnostics {
    /// Share of corpus character mass with no slot in the layout.
    pub unmapped_pct: MetricValue,
    pub unmapped_bigram_pct: MetricValue,
    pub unmapped_trigram_pct: MetricValue,
    pub unmapped_chars: Vec<char>,
    pub undefined_metrics: Vec<Metric>,

    #[serde(default)]
    pub top_sfbs: Vec<MetricViolation>,
    #[serde(default)]
    pub top_scissors: Vec<MetricViolation>,
    #[serde(default)]
    pub top_redirs: Vec<MetricViolation>,
}

/// Produced fresh per (layout, corpus, effort model); never patched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricReport {
    pub layout_name: String,
    pub layout_hash: String,
    pub corpus_version: String,
    pub effort_model_version: String,

    #[serde(flatten)]
    pub metrics: BTreeMap<Metric, MetricValue>,

    pub finger_usage: BTreeMap<Finger, MetricValue>,
    pub row_usage: BTreeMap<Row, MetricValue>,
    pub column_usage: BTreeMap<u8, MetricValue>,
    pub hand_usage: BTreeMap<Hand, MetricValue>,

    pub diagnostics: Diagnostics,
}

impl MetricReport {
    pub fn get(&self, metric: Metric) -> MetricValue {
        self.metrics
            .get(&metric)
            .copied()
            .unwrap_or(MetricValue::Undefined)
    }

    /// Copy with every number rounded for display or export. Internal
    /// comparisons should use the full-precision report.
    pub fn rounded(&self, places: i32) -> MetricReport {
        let round_list = |list: &[MetricViolation]| {
            list.iter()
                .map(|v| MetricViolation {
                    keys: v.keys.clone(),
                    score: round_f64(v.score, places),
                    freq: round_f64(v.freq, places + 4),
                })
                .collect::<Vec<_>>()
        };

        MetricReport {
            layout_name: self.layout_name.clone(),
            layout_hash: self.layout_hash.clone(),
            corpus_version: self.corpus_version.clone(),
            effort_model_version: self.effort_model_version.clone(),
            metrics: round_map(&self.metrics, places),
            finger_usage: round_map(&self.finger_usage, places),
            row_usage: round_map(&self.row_usage, places),
            column_usage: round_map(&self.column_usage, places),
            hand_usage: round_map(&self.hand_usage, places),
            diagnostics: Diagnostics {
                unmapped_pct: self.diagnostics.unmapped_pct.rounded(places),
                unmapped_bigram_pct: self.diagnostics.unmapped_bigram_pct.rounded(places),
                unmapped_trigram_pct: self.diagnostics.unmapped_trigram_pct.rounded(places),
                unmapped_chars: self.diagnostics.unmapped_chars.clone(),
                undefined_metrics: self.diagnostics.undefined_metrics.clone(),
                top_sfbs: round_list(&self.diagnostics.top_sfbs),
                top_scissors: round_list(&self.diagnostics.top_scissors),
                top_redirs: round_list(&self.diagnostics.top_redirs),
            },
        }
    }
}

fn round_map<K: Ord + Copy>(
    m: &BTreeMap<K, MetricValue>,
    places: i32,
) -> BTreeMap<K, MetricValue> {
    m.iter().map(|(k, v)| (*k, v.rounded(places))).collect()
}

fn round_f64(v: f64, places: i32) -> f64 {
    let scale = 10f64.powi(places);
    (v * scale).round() / scale
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_denominator_is_undefined() {
        assert_eq!(MetricValue::ratio(1.0, 0.0), MetricValue::Undefined);
        assert_eq!(MetricValue::percent(0.0, 0.0), MetricValue::Undefined);
        assert_eq!(MetricValue::percent(1.0, 4.0), MetricValue::Defined(25.0));
    }

    #[test]
    fn test_undefined_serializes_as_null() {
        let json = serde_json::to_string(&vec![
            MetricValue::Defined(1.5),
            MetricValue::Undefined,
        ])
        .unwrap();
        assert_eq!(json, "[1.5,null]");
    }

    #[test]
    fn test_rounding() {
        assert_eq!(
            MetricValue::Defined(3.14159).rounded(2),
            MetricValue::Defined(3.14)
        );
        assert_eq!(MetricValue::Undefined.rounded(2), MetricValue::Undefined);
    }

    #[test]
    fn test_metric_names() {
        assert_eq!(Metric::SkipBigram2u.to_string(), "skip_bigram_2u");
        assert_eq!(Metric::SkipBigram3uPlus.to_string(), "skip_bigram_3u_plus");
        assert_eq!(
            serde_json::to_string(&Metric::TwoRowSfb).unwrap(),
            "\"two_row_sfb\""
        );
    }
}
