use crate::config::LayoutRules;
use crate::error::{KsResult, LayoutError};
use crate::geometry::{GeometryTable, KeySlot, Row};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::Path;
use tracing::debug;

/// Unvalidated character -> slot-identifier mapping, as supplied by a user or
/// an import.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LayoutSpec {
    #[serde(default)]
    pub name: String,
    pub keys: BTreeMap<String, String>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum LayoutDocument {
    Named {
        #[serde(default)]
        name: String,
        keys: BTreeMap<String, String>,
    },
    Bare(BTreeMap<String, String>),
}

impl LayoutSpec {
    /// Accepts either `{"name": .., "keys": {"a": "H0", ..}}` or a bare
    /// `{"a": "H0", ..}` object.
    pub fn from_json(json: &str) -> KsResult<Self> {
        let doc: LayoutDocument = serde_json::from_str(json)?;
        Ok(match doc {
            LayoutDocument::Named { name, keys } => Self { name, keys },
            LayoutDocument::Bare(keys) => Self {
                name: String::new(),
                keys,
            },
        })
    }

    pub fn load_from_file<P: AsRef<Path>>(path: P) -> KsResult<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;
        let mut spec = Self::from_json(&content)?;
        if spec.name.is_empty() {
            spec.name = path
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_default();
        }
        Ok(spec)
    }

    /// Spreads a row-major string over the Top, Home and Bottom rows.
    pub fn from_row_string(
        name: &str,
        s: &str,
        geometry: &GeometryTable,
    ) -> Result<Self, LayoutError> {
        let ids = geometry.row_major_ids(&[Row::Top, Row::Home, Row::Bottom]);
        let found = s.chars().count();
        if found != ids.len() {
            return Err(LayoutError::LengthMismatch {
                expected: ids.len(),
                found,
            });
        }

        let mut keys = BTreeMap::new();
        for (c, id) in s.chars().zip(ids) {
            if keys.insert(c.to_string(), id).is_some() {
                return Err(LayoutError::DuplicateCharacter(c));
            }
        }

        Ok(Self {
            name: name.to_string(),
            keys,
        })
    }
}

/// A validated mapping. Every character resolves to its full `KeySlot`.
#[derive(Debug, Clone, PartialEq)]
pub struct Layout {
    name: String,
    keys: BTreeMap<char, KeySlot>,
    hash: String,
}

impl Layout {
    pub fn validate(
        spec: &LayoutSpec,
        geometry: &GeometryTable,
        rules: &LayoutRules,
    ) -> Result<Self, LayoutError> {
        let mut keys = BTreeMap::new();
        let mut taken: HashMap<&str, char> = HashMap::new();

        for (key, slot_id) in &spec.keys {
            let mut chars = key.chars();
            let c = match (chars.next(), chars.next()) {
                (Some(c), None) => c,
                _ => return Err(LayoutError::InvalidCharacter(key.clone())),
            };

            let slot = geometry
                .slot(slot_id)
                .ok_or_else(|| LayoutError::InvalidSlot(slot_id.clone()))?;

            if taken.insert(slot_id.as_str(), c).is_some() {
                return Err(LayoutError::DuplicateAssignment(slot_id.clone()));
            }
            keys.insert(c, slot.clone());
        }

        if let Some(missing) = rules
            .required_alphabet
            .chars()
            .find(|c| !keys.contains_key(c))
        {
            return Err(LayoutError::MissingRequiredCharacter(missing));
        }

        let hash = layout_hash(&keys);
        debug!(
            "Layout '{}' validated: {} keys on '{}'",
            spec.name,
            keys.len(),
            geometry.name
        );

        Ok(Self {
            name: spec.name.clone(),
            keys,
            hash,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn slot(&self, c: char) -> Option<&KeySlot> {
        self.keys.get(&c)
    }

    pub fn keys(&self) -> &BTreeMap<char, KeySlot> {
        &self.keys
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Content hash of the mapping (the name is not part of it).
    pub fn layout_hash(&self) -> &str {
        &self.hash
    }

    pub fn to_spec(&self) -> LayoutSpec {
        LayoutSpec {
            name: self.name.clone(),
            keys: self
                .keys
                .iter()
                .map(|(c, s)| (c.to_string(), s.id.clone()))
                .collect(),
        }
    }
}

fn layout_hash(keys: &BTreeMap<char, KeySlot>) -> String {
    let mut hasher = Sha256::new();
    for (c, slot) in keys {
        hasher.update(format!("{}\t{}\n", c, slot.id).as_bytes());
    }
    hex::encode(hasher.finalize())
}
