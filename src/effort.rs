use crate::error::{ComputationError, KsResult};
use crate::geometry::{Finger, KeySlot, Row};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use strum::IntoEnumIterator;

/// Versioned strain tables. Reference data: never derived from the input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EffortModel {
    pub version: String,
    pub finger_strength: BTreeMap<Finger, f64>,
    pub row_difficulty: BTreeMap<Row, f64>,
    pub center_column_penalty: f64,
}

impl Default for EffortModel {
    fn default() -> Self {
        let finger_strength = Finger::iter()
            .map(|f| {
                let scale = match f.inward_rank() {
                    0 => 1.6,
                    1 => 1.3,
                    2 => 1.1,
                    _ => 1.0,
                };
                (f, scale)
            })
            .collect();

        let row_difficulty = BTreeMap::from([
            (Row::Number, 2.0),
            (Row::Top, 1.2),
            (Row::Home, 1.0),
            (Row::Bottom, 1.4),
        ]);

        Self {
            version: "standard-v1".to_string(),
            finger_strength,
            row_difficulty,
            center_column_penalty: 0.5,
        }
    }
}

impl EffortModel {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> KsResult<Self> {
        let content = fs::read_to_string(path)?;
        let model: EffortModel = serde_json::from_str(&content)?;
        model.validate()?;
        Ok(model)
    }

    /// Every finger and row needs a finite, non-negative multiplier.
    pub fn validate(&self) -> Result<(), ComputationError> {
        let check = |what: String, v: Option<&f64>| match v {
            None => Err(ComputationError::InvalidEffortModel(format!(
                "missing multiplier for {}",
                what
            ))),
            Some(x) if !x.is_finite() || *x < 0.0 => Err(ComputationError::InvalidEffortModel(
                format!("multiplier for {} is {}", what, x),
            )),
            Some(_) => Ok(()),
        };

        for finger in Finger::iter() {
            check(finger.to_string(), self.finger_strength.get(&finger))?;
        }
        for row in Row::iter() {
            check(format!("{} row", row), self.row_difficulty.get(&row))?;
        }
        check(
            "center column".to_string(),
            Some(&self.center_column_penalty),
        )
    }

    pub fn base(&self, finger: Finger, row: Row) -> f64 {
        let f = self.finger_strength.get(&finger).copied().unwrap_or(0.0);
        let r = self.row_difficulty.get(&row).copied().unwrap_or(0.0);
        f * r
    }

    pub fn slot_effort(&self, slot: &KeySlot, is_center: bool) -> f64 {
        let penalty = if is_center {
            self.center_column_penalty
        } else {
            0.0
        };
        self.base(slot.finger, slot.row) + penalty
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_model_is_valid() {
        let model = EffortModel::default();
        assert!(model.validate().is_ok());
        assert_eq!(model.base(Finger::LeftIndex, Row::Home), 1.0);
        assert!((model.base(Finger::RightPinky, Row::Bottom) - 1.6 * 1.4).abs() < 1e-12);
    }

    #[test]
    fn test_missing_finger_is_rejected() {
        let mut model = EffortModel::default();
        model.finger_strength.remove(&Finger::LeftRing);
        assert!(matches!(
            model.validate(),
            Err(ComputationError::InvalidEffortModel(_))
        ));
    }

    #[test]
    fn test_negative_penalty_is_rejected() {
        let model = EffortModel {
            center_column_penalty: -1.0,
            ..Default::default()
        };
        assert!(model.validate().is_err());
    }

    #[test]
    fn test_json_keys_are_snake_case() {
        let json = serde_json::to_string(&EffortModel::default()).unwrap();
        assert!(json.contains("\"left_pinky\""));
        assert!(json.contains("\"home\""));
        let back: EffortModel = serde_json::from_str(&json).unwrap();
        assert_eq!(back, EffortModel::default());
    }
}
