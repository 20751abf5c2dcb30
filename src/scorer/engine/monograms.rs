use super::PosMap;
use crate::corpus::Corpus;
use crate::geometry::{Finger, Hand, Row};
use crate::scorer::types::RawTallies;
use crate::scorer::Analyzer;
use strum::IntoEnumIterator;
use tracing::debug;

pub fn accumulate_details(analyzer: &Analyzer, pos_map: &PosMap, corpus: &Corpus, d: &mut RawTallies) {
    let geometry = analyzer.geometry();
    let effort = analyzer.effort();
    let settings = analyzer.settings();

    // Every finger, row, hand and column shows up in the breakdowns, used or not
    d.finger_mass = Finger::iter().map(|f| (f, 0.0)).collect();
    d.row_mass = Row::iter().map(|r| (r, 0.0)).collect();
    d.hand_mass = Hand::iter().map(|h| (h, 0.0)).collect();
    d.column_mass = geometry.slots.iter().map(|s| (s.column, 0.0)).collect();

    for (&c, &freq) in corpus.chars() {
        let Some(slot) = pos_map.get(&c) else {
            d.unmapped_char_mass += freq;
            d.unmapped_chars.push(c);
            continue;
        };

        d.char_mass += freq;

        let is_center = settings.is_center_column(slot.column);
        d.effort_sum += effort.slot_effort(slot, is_center) * freq;
        if is_center {
            d.center_column_mass += freq;
        }

        *d.finger_mass.entry(slot.finger).or_default() += freq;
        *d.row_mass.entry(slot.row).or_default() += freq;
        *d.column_mass.entry(slot.column).or_default() += freq;
        *d.hand_mass.entry(slot.hand).or_default() += freq;

        if slot.finger.is_pinky() {
            d.pinky_mass += freq;
            if !geometry.is_home_slot(slot) {
                d.pinky_off_home_mass += freq;
            }
        }
    }

    if !d.unmapped_chars.is_empty() {
        debug!(
            "{} corpus character(s) unmapped ({:.4} of char mass): {}",
            d.unmapped_chars.len(),
            d.unmapped_char_mass,
            d.unmapped_chars.iter().collect::<String>()
        );
    }
}
