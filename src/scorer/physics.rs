use crate::config::ClassifierSettings;
use crate::geometry::KeySlot;
use crate::scorer::metrics::travel_dist;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use strum_macros::{Display, EnumIter};

/// Same-finger bigram buckets. Exactly one applies to any pair of distinct
/// keys struck by the same finger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumIter, Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum SameFingerClass {
    TwoRowSfb,
    SkipBigram3uPlus,
    SkipBigram2u,
    BasicSfb,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ScissorClass {
    Pinky,
    General,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum BigramRoll {
    In,
    Out,
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct KeyInteraction {
    pub is_same_hand: bool,
    pub is_repeat: bool,

    // Interaction Types
    pub same_finger: Option<SameFingerClass>,
    pub scissor: Option<ScissorClass>,
    pub roll: Option<BigramRoll>,
    /// Severity after the same-row multiplier.
    pub stretch: Option<f64>,
    pub is_two_row_jump: bool,

    // Geometric Details
    pub row_diff: u8,
    pub col_diff: u8,
    pub distance: f64,
}

/// Ordered guards: vertical distance wins over horizontal.
pub fn classify_same_finger(
    k1: &KeySlot,
    k2: &KeySlot,
    settings: &ClassifierSettings,
) -> Option<SameFingerClass> {
    if k1.finger != k2.finger || k1.id == k2.id {
        return None;
    }
    let row_diff = k1.row_diff(k2);
    let col_diff = k1.col_diff(k2);

    let class = if row_diff >= settings.sfb_two_row_min_row_diff {
        SameFingerClass::TwoRowSfb
    } else if col_diff >= settings.skip_bigram_far_col_diff {
        SameFingerClass::SkipBigram3uPlus
    } else if col_diff == settings.skip_bigram_col_diff {
        SameFingerClass::SkipBigram2u
    } else {
        SameFingerClass::BasicSfb
    };
    Some(class)
}

pub fn classify_scissor(
    k1: &KeySlot,
    k2: &KeySlot,
    settings: &ClassifierSettings,
) -> Option<ScissorClass> {
    if k1.hand != k2.hand || k1.finger.index().abs_diff(k2.finger.index()) != 1 {
        return None;
    }
    if k1.row_diff(k2) < settings.scissor_min_row_diff {
        return None;
    }
    if k1.finger.is_pinky() || k2.finger.is_pinky() {
        Some(ScissorClass::Pinky)
    } else {
        Some(ScissorClass::General)
    }
}

/// Severity of a sideways reach, `None` when the column pair is not in the
/// stretch table.
pub fn lateral_stretch_weight(
    k1: &KeySlot,
    k2: &KeySlot,
    settings: &ClassifierSettings,
) -> Option<f64> {
    if k1.hand != k2.hand || k1.id == k2.id {
        return None;
    }
    let severity = settings
        .stretch_rules
        .iter()
        .filter(|r| r.matches(k1.column, k2.column))
        .map(|r| r.severity)
        .fold(None, |acc: Option<f64>, s| Some(acc.map_or(s, |a| a.max(s))))?;

    if k1.row == k2.row {
        Some(severity * settings.same_row_stretch_multiplier)
    } else {
        Some(severity)
    }
}

pub fn classify_roll(k1: &KeySlot, k2: &KeySlot) -> Option<BigramRoll> {
    if k1.hand != k2.hand || k1.finger == k2.finger {
        return None;
    }
    match k1.finger.inward_rank().cmp(&k2.finger.inward_rank()) {
        Ordering::Less => Some(BigramRoll::In),
        Ordering::Greater => Some(BigramRoll::Out),
        Ordering::Equal => None,
    }
}

/// Runs every bigram pass over one pair of slots.
pub fn analyze_interaction(
    k1: &KeySlot,
    k2: &KeySlot,
    settings: &ClassifierSettings,
) -> KeyInteraction {
    let mut res = KeyInteraction {
        row_diff: k1.row_diff(k2),
        col_diff: k1.col_diff(k2),
        ..Default::default()
    };

    if k1.id == k2.id {
        res.is_same_hand = true;
        res.is_repeat = true;
        return res;
    }

    res.is_two_row_jump = res.row_diff >= settings.two_row_jump_min_row_diff;
    res.distance = travel_dist(k1, k2);

    if k1.hand != k2.hand {
        return res;
    }
    res.is_same_hand = true;

    res.same_finger = classify_same_finger(k1, k2, settings);
    res.scissor = classify_scissor(k1, k2, settings);
    res.roll = classify_roll(k1, k2);
    res.stretch = lateral_stretch_weight(k1, k2, settings);

    res
}
