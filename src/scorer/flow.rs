use crate::geometry::KeySlot;
use serde::{Deserialize, Serialize};
use strum_macros::Display;

/// Exactly one label per trigram.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum TrigramClass {
    Alternation { same_finger: bool },
    RollIn,
    RollOut,
    Redirect,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlowAnalysis {
    pub class: TrigramClass,
    pub is_same_finger_skipgram: bool,
}

pub fn classify_trigram(k1: &KeySlot, k2: &KeySlot, k3: &KeySlot) -> TrigramClass {
    if k1.hand != k2.hand && k2.hand != k3.hand {
        return TrigramClass::Alternation {
            same_finger: k1.finger == k3.finger,
        };
    }

    // Everything below needs a 3-key run on one hand
    if k1.hand != k2.hand || k2.hand != k3.hand {
        return TrigramClass::Other;
    }

    let r1 = k1.finger.inward_rank() as i8;
    let r2 = k2.finger.inward_rank() as i8;
    let r3 = k3.finger.inward_rank() as i8;
    let dir1 = r2 - r1;
    let dir2 = r3 - r2;

    if dir1 == 0 || dir2 == 0 {
        TrigramClass::Other
    } else if dir1 > 0 && dir2 > 0 {
        TrigramClass::RollIn
    } else if dir1 < 0 && dir2 < 0 {
        TrigramClass::RollOut
    } else {
        TrigramClass::Redirect
    }
}

pub fn analyze_flow(k1: &KeySlot, k2: &KeySlot, k3: &KeySlot) -> FlowAnalysis {
    FlowAnalysis {
        class: classify_trigram(k1, k2, k3),
        // A/B/A' on one finger, A != A'
        is_same_finger_skipgram: k1.finger == k3.finger && k1.id != k3.id,
    }
}
