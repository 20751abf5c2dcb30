use crate::error::{KeyscopeError, KsResult};
use crate::scorer::metrics::euclidean_dist;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use strum_macros::{Display, EnumIter, EnumString};

/// Centre-to-centre distance of two adjacent 1u keys.
pub const KEY_PITCH_MM: f64 = 19.05;

/// Resting column of each finger, indexed by `Finger::index`.
pub const DEFAULT_HOME_COLUMNS: [u8; 8] = [0, 1, 2, 3, 6, 7, 8, 9];

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
pub enum Hand {
    Left,
    Right,
}

/// Physical rows, ordered top to bottom so that `index` differences are row jumps.
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
pub enum Row {
    Number,
    Top,
    Home,
    Bottom,
}

impl Row {
    pub fn index(self) -> u8 {
        self as u8
    }

    /// Letter used in slot identifiers (`T3`, `H0`, ...).
    pub fn prefix(self) -> char {
        match self {
            Row::Number => 'N',
            Row::Top => 'T',
            Row::Home => 'H',
            Row::Bottom => 'B',
        }
    }
}

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
pub enum Finger {
    LeftPinky,
    LeftRing,
    LeftMiddle,
    LeftIndex,
    RightIndex,
    RightMiddle,
    RightRing,
    RightPinky,
}

impl Finger {
    pub fn index(self) -> u8 {
        self as u8
    }

    pub fn hand(self) -> Hand {
        if self.index() < 4 {
            Hand::Left
        } else {
            Hand::Right
        }
    }

    pub fn is_pinky(self) -> bool {
        matches!(self, Finger::LeftPinky | Finger::RightPinky)
    }

    /// 0 = pinky ... 3 = index. Higher ranks sit closer to the keyboard centre,
    /// so an increasing rank is an inward movement on either hand.
    pub fn inward_rank(self) -> u8 {
        match self {
            Finger::LeftPinky | Finger::RightPinky => 0,
            Finger::LeftRing | Finger::RightRing => 1,
            Finger::LeftMiddle | Finger::RightMiddle => 2,
            Finger::LeftIndex | Finger::RightIndex => 3,
        }
    }

    /// Touch-typing assignment for a 10-column block.
    pub fn for_column(column: u8) -> Finger {
        match column {
            0 => Finger::LeftPinky,
            1 => Finger::LeftRing,
            2 => Finger::LeftMiddle,
            3 | 4 => Finger::LeftIndex,
            5 | 6 => Finger::RightIndex,
            7 => Finger::RightMiddle,
            8 => Finger::RightRing,
            _ => Finger::RightPinky,
        }
    }
}

/// One physical key position. Coordinates are in millimetres.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeySlot {
    pub id: String,
    pub row: Row,
    pub column: u8,
    pub finger: Finger,
    pub hand: Hand,
    pub x: f64,
    pub y: f64,
}

impl KeySlot {
    pub fn coord(&self) -> (f64, f64) {
        (self.x, self.y)
    }

    pub fn distance_to(&self, other: &KeySlot) -> f64 {
        euclidean_dist(self.x, self.y, other.x, other.y)
    }

    pub fn row_diff(&self, other: &KeySlot) -> u8 {
        self.row.index().abs_diff(other.row.index())
    }

    pub fn col_diff(&self, other: &KeySlot) -> u8 {
        self.column.abs_diff(other.column)
    }
}

/// The reference table of valid slots. Not user supplied: layouts are
/// validated against it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeometryTable {
    pub name: String,
    pub slots: Vec<KeySlot>,
    #[serde(default = "default_home_columns")]
    pub home_columns: [u8; 8],

    #[serde(skip)]
    lookup: HashMap<String, usize>,
}

fn default_home_columns() -> [u8; 8] {
    DEFAULT_HOME_COLUMNS
}

impl GeometryTable {
    pub fn new(name: &str, slots: Vec<KeySlot>, home_columns: [u8; 8]) -> KsResult<Self> {
        let mut table = Self {
            name: name.to_string(),
            slots,
            home_columns,
            lookup: HashMap::new(),
        };
        table.finalize()?;
        Ok(table)
    }

    pub fn load_from_file<P: AsRef<Path>>(path: P) -> KsResult<Self> {
        let content = fs::read_to_string(path)?;
        let mut table: GeometryTable = serde_json::from_str(&content)?;
        table.finalize()?;
        Ok(table)
    }

    /// Validates the slot list and rebuilds the id lookup.
    fn finalize(&mut self) -> KsResult<()> {
        if self.slots.is_empty() {
            return Err(KeyscopeError::Geometry(format!(
                "Geometry '{}' has 0 slots",
                self.name
            )));
        }

        self.lookup.clear();
        for (idx, slot) in self.slots.iter().enumerate() {
            if slot.hand != slot.finger.hand() {
                return Err(KeyscopeError::Geometry(format!(
                    "Slot '{}' is on the {} hand but uses {}",
                    slot.id, slot.hand, slot.finger
                )));
            }
            if !slot.x.is_finite() || !slot.y.is_finite() {
                return Err(KeyscopeError::Geometry(format!(
                    "Slot '{}' has non-finite coordinates",
                    slot.id
                )));
            }
            if self.lookup.insert(slot.id.clone(), idx).is_some() {
                return Err(KeyscopeError::Geometry(format!(
                    "Slot id '{}' is defined twice",
                    slot.id
                )));
            }
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn slot(&self, id: &str) -> Option<&KeySlot> {
        self.lookup.get(id).map(|&idx| &self.slots[idx])
    }

    pub fn contains(&self, id: &str) -> bool {
        self.lookup.contains_key(id)
    }

    /// The designated resting slot of a finger.
    pub fn home_slot(&self, finger: Finger) -> Option<&KeySlot> {
        let column = self.home_columns[finger.index() as usize];
        self.slots
            .iter()
            .find(|s| s.finger == finger && s.row == Row::Home && s.column == column)
    }

    pub fn is_home_slot(&self, slot: &KeySlot) -> bool {
        slot.row == Row::Home && self.home_columns[slot.finger.index() as usize] == slot.column
    }

    /// Slot ids of the given rows in row-major order, used to expand
    /// 30-character layout strings.
    pub fn row_major_ids(&self, rows: &[Row]) -> Vec<String> {
        let mut ids = Vec::new();
        for &row in rows {
            let mut in_row: Vec<&KeySlot> = self.slots.iter().filter(|s| s.row == row).collect();
            in_row.sort_by_key(|s| s.column);
            ids.extend(in_row.into_iter().map(|s| s.id.clone()));
        }
        ids
    }

    /// Row-staggered 40-key block (number row plus the three letter rows) of a
    /// standard ANSI board.
    pub fn standard() -> Self {
        Self::grid(
            "ansi_row_stagger",
            [
                (Row::Number, 0.0),
                (Row::Top, 0.5),
                (Row::Home, 0.75),
                (Row::Bottom, 1.25),
            ],
        )
    }

    /// Matrix (ortholinear) 40-key block: same ids and fingering, no stagger.
    pub fn ortho() -> Self {
        Self::grid(
            "ortho_4x10",
            [
                (Row::Number, 0.0),
                (Row::Top, 0.0),
                (Row::Home, 0.0),
                (Row::Bottom, 0.0),
            ],
        )
    }

    fn grid(name: &str, rows: [(Row, f64); 4]) -> Self {
        let mut slots = Vec::with_capacity(40);
        for (row, offset) in rows {
            for column in 0..10u8 {
                let finger = Finger::for_column(column);
                slots.push(KeySlot {
                    id: format!("{}{}", row.prefix(), column),
                    row,
                    column,
                    finger,
                    hand: finger.hand(),
                    x: (offset + column as f64) * KEY_PITCH_MM,
                    y: row.index() as f64 * KEY_PITCH_MM,
                });
            }
        }

        let lookup = slots
            .iter()
            .enumerate()
            .map(|(idx, s)| (s.id.clone(), idx))
            .collect();

        Self {
            name: name.to_string(),
            slots,
            home_columns: DEFAULT_HOME_COLUMNS,
            lookup,
        }
    }
}
