use crate::error::{KeyscopeError, KsResult};
use clap::{ArgAction, Args};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Args, Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AnalysisConfig {
    #[command(flatten)]
    pub corpus: CorpusOptions,
    #[command(flatten)]
    pub thresholds: Thresholds,
    #[command(flatten)]
    pub rules: LayoutRules,
}

impl AnalysisConfig {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> KsResult<Self> {
        let content = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }
}

#[derive(Args, Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CorpusOptions {
    #[arg(long, default_value_t = true, action = ArgAction::Set)]
    pub lowercase: bool,
    #[arg(long, default_value_t = false, action = ArgAction::Set)]
    pub strip_non_alphabetic: bool,
    #[arg(long, default_value_t = false, action = ArgAction::Set)]
    pub cross_word_ngrams: bool,

    // Cross-source consistency check (flags only, never fails)
    #[arg(long, default_value_t = 0.2)]
    pub consistency_threshold: f64,
    #[arg(long, default_value_t = 0.001)]
    pub consistency_min_freq: f64,

    /// N-gram start positions counted per parallel work item.
    #[arg(long, default_value_t = 65_536)]
    pub chunk_size: usize,
}

impl Default for CorpusOptions {
    fn default() -> Self {
        Self {
            lowercase: true,
            strip_non_alphabetic: false,
            cross_word_ngrams: false,
            consistency_threshold: 0.2,
            consistency_min_freq: 0.001,
            chunk_size: 65_536,
        }
    }
}

#[derive(Args, Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Thresholds {
    // === SAME FINGER ===
    #[arg(long, default_value_t = 2)]
    pub sfb_two_row_min_row_diff: u8,
    #[arg(long, default_value_t = 2)]
    pub skip_bigram_col_diff: u8,
    #[arg(long, default_value_t = 3)]
    pub skip_bigram_far_col_diff: u8,

    // === SCISSORS / JUMPS ===
    #[arg(long, default_value_t = 2)]
    pub scissor_min_row_diff: u8,
    #[arg(long, default_value_t = 2)]
    pub two_row_jump_min_row_diff: u8,

    // === LATERAL ===
    /// 0-based column indices, so "4,5" is the G/H pair.
    #[arg(long, default_value = "4,5")]
    pub center_columns: String,
    #[arg(
        long,
        default_value = "3-4:1.0,2-4:1.5,1-4:2.0,5-6:1.0,5-7:1.5,5-8:2.0"
    )]
    pub lateral_stretch_table: String,
    #[arg(long, default_value_t = 1.5)]
    pub same_row_stretch_multiplier: f64,

    // === REPORTING ===
    #[arg(long, default_value_t = 10)]
    pub top_offenders: usize,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            sfb_two_row_min_row_diff: 2,
            skip_bigram_col_diff: 2,
            skip_bigram_far_col_diff: 3,
            scissor_min_row_diff: 2,
            two_row_jump_min_row_diff: 2,
            center_columns: "4,5".to_string(),
            lateral_stretch_table: "3-4:1.0,2-4:1.5,1-4:2.0,5-6:1.0,5-7:1.5,5-8:2.0".to_string(),
            same_row_stretch_multiplier: 1.5,
            top_offenders: 10,
        }
    }
}

#[derive(Args, Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutRules {
    #[arg(long, default_value = "abcdefghijklmnopqrstuvwxyz")]
    pub required_alphabet: String,
}

impl Default for LayoutRules {
    fn default() -> Self {
        Self {
            required_alphabet: "abcdefghijklmnopqrstuvwxyz".to_string(),
        }
    }
}

/// A column pair (either order) that forces a sideways reach.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StretchRule {
    pub col_a: u8,
    pub col_b: u8,
    pub severity: f64,
}

impl StretchRule {
    pub fn matches(&self, c1: u8, c2: u8) -> bool {
        (c1 == self.col_a && c2 == self.col_b) || (c1 == self.col_b && c2 == self.col_a)
    }
}

/// Thresholds parsed into the typed form the classifier consumes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassifierSettings {
    pub sfb_two_row_min_row_diff: u8,
    pub skip_bigram_col_diff: u8,
    pub skip_bigram_far_col_diff: u8,
    pub scissor_min_row_diff: u8,
    pub two_row_jump_min_row_diff: u8,
    pub center_columns: Vec<u8>,
    pub stretch_rules: Vec<StretchRule>,
    pub same_row_stretch_multiplier: f64,
    pub top_offenders: usize,
}

impl Default for ClassifierSettings {
    fn default() -> Self {
        let rule = |col_a, col_b, severity| StretchRule {
            col_a,
            col_b,
            severity,
        };
        Self {
            sfb_two_row_min_row_diff: 2,
            skip_bigram_col_diff: 2,
            skip_bigram_far_col_diff: 3,
            scissor_min_row_diff: 2,
            two_row_jump_min_row_diff: 2,
            center_columns: vec![4, 5],
            stretch_rules: vec![
                rule(3, 4, 1.0),
                rule(2, 4, 1.5),
                rule(1, 4, 2.0),
                rule(5, 6, 1.0),
                rule(5, 7, 1.5),
                rule(5, 8, 2.0),
            ],
            same_row_stretch_multiplier: 1.5,
            top_offenders: 10,
        }
    }
}

impl ClassifierSettings {
    pub fn is_center_column(&self, column: u8) -> bool {
        self.center_columns.contains(&column)
    }
}

impl Thresholds {
    pub fn resolve(&self) -> KsResult<ClassifierSettings> {
        if self.sfb_two_row_min_row_diff == 0
            || self.scissor_min_row_diff == 0
            || self.two_row_jump_min_row_diff == 0
        {
            return Err(KeyscopeError::Config(
                "Row-difference thresholds must be at least 1".to_string(),
            ));
        }
        if self.skip_bigram_col_diff < 2 || self.skip_bigram_far_col_diff <= self.skip_bigram_col_diff
        {
            return Err(KeyscopeError::Config(format!(
                "Skip-bigram thresholds must satisfy 2 <= near ({}) < far ({})",
                self.skip_bigram_col_diff, self.skip_bigram_far_col_diff
            )));
        }
        if !self.same_row_stretch_multiplier.is_finite() || self.same_row_stretch_multiplier < 0.0
        {
            return Err(KeyscopeError::Config(
                "same_row_stretch_multiplier must be a non-negative number".to_string(),
            ));
        }

        Ok(ClassifierSettings {
            sfb_two_row_min_row_diff: self.sfb_two_row_min_row_diff,
            skip_bigram_col_diff: self.skip_bigram_col_diff,
            skip_bigram_far_col_diff: self.skip_bigram_far_col_diff,
            scissor_min_row_diff: self.scissor_min_row_diff,
            two_row_jump_min_row_diff: self.two_row_jump_min_row_diff,
            center_columns: parse_u8_list(&self.center_columns, "center_columns")?,
            stretch_rules: parse_stretch_table(&self.lateral_stretch_table)?,
            same_row_stretch_multiplier: self.same_row_stretch_multiplier,
            top_offenders: self.top_offenders,
        })
    }
}

fn parse_u8_list(s: &str, name: &str) -> KsResult<Vec<u8>> {
    s.split(',')
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(|p| {
            p.parse::<u8>()
                .map_err(|_| KeyscopeError::Config(format!("Invalid number '{}' in {}", p, name)))
        })
        .collect()
}

/// Parses `"3-4:1.0,5-6:1.0"` into stretch rules.
fn parse_stretch_table(s: &str) -> KsResult<Vec<StretchRule>> {
    let mut rules = Vec::new();
    for entry in s.split(',').map(str::trim).filter(|e| !e.is_empty()) {
        let bad = || KeyscopeError::Config(format!("Invalid lateral stretch entry '{}'", entry));

        let (cols, severity) = entry.split_once(':').ok_or_else(bad)?;
        let (a, b) = cols.split_once('-').ok_or_else(bad)?;
        let col_a = a.trim().parse::<u8>().map_err(|_| bad())?;
        let col_b = b.trim().parse::<u8>().map_err(|_| bad())?;
        let severity = severity.trim().parse::<f64>().map_err(|_| bad())?;

        if col_a == col_b || !severity.is_finite() || severity < 0.0 {
            return Err(bad());
        }
        rules.push(StretchRule {
            col_a,
            col_b,
            severity,
        });
    }
    Ok(rules)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_thresholds_resolve() {
        let settings = Thresholds::default().resolve().unwrap();
        assert_eq!(settings.center_columns, vec![4, 5]);
        assert_eq!(settings.stretch_rules.len(), 6);
        assert!(settings.stretch_rules[0].matches(4, 3));
        assert!(settings.is_center_column(5));
        assert!(!settings.is_center_column(6));
        assert_eq!(settings, ClassifierSettings::default());
    }

    #[test]
    fn test_bad_stretch_entry() {
        let t = Thresholds {
            lateral_stretch_table: "3-4:1.0,oops".to_string(),
            ..Default::default()
        };
        assert!(matches!(t.resolve(), Err(KeyscopeError::Config(_))));
    }

    #[test]
    fn test_bad_skip_thresholds() {
        let t = Thresholds {
            skip_bigram_col_diff: 3,
            skip_bigram_far_col_diff: 3,
            ..Default::default()
        };
        assert!(t.resolve().is_err());
    }
}
