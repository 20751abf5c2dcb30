use crate::config::LayoutRules;
use crate::error::LayoutError;
use crate::geometry::GeometryTable;
use crate::layout::{Layout, LayoutSpec};
use strum::IntoEnumIterator;
use strum_macros::{Display, EnumIter, EnumString};

#[derive(Debug, Clone, Copy, EnumIter, EnumString, Display, PartialEq, Eq, Hash)]
#[strum(serialize_all = "snake_case")]
pub enum KnownLayout {
    Qwerty,
    Colemak,
    ColemakDH,
    Canary,
    Dvorak,
    Graphite,
    Workman,
}

impl KnownLayout {
    // Top, home and bottom rows of the 30-key block, left to right.
    pub fn get_str(&self) -> &'static str {
        match self {
            Self::Qwerty => "qwertyuiopasdfghjkl;zxcvbnm,./",
            Self::Dvorak => "',.pyfgcrlaoeuidhtns;qjkxbmwvz",
            Self::Colemak => "qwfpgjluy;arstdhneiozxcvbkm,./",
            Self::ColemakDH => "qwfpbjluy;arstgmneiozxcdvkh,./",
            Self::Workman => "qdrwbjfup;ashtgyneoizxmcvkl,./",
            Self::Canary => "wlypbzfou'crstgmneiaqjvdkxh/,.",
            Self::Graphite => "bldwz'foujnrtsgyhaeiqxmcvkp.-/",
        }
    }

    pub fn to_spec(&self, geometry: &GeometryTable) -> Result<LayoutSpec, LayoutError> {
        LayoutSpec::from_row_string(&self.to_string(), self.get_str(), geometry)
    }

    pub fn build(&self, geometry: &GeometryTable, rules: &LayoutRules) -> Result<Layout, LayoutError> {
        Layout::validate(&self.to_spec(geometry)?, geometry, rules)
    }
}

pub fn get_all_layouts(geometry: &GeometryTable, rules: &LayoutRules) -> Result<Vec<Layout>, LayoutError> {
    KnownLayout::iter().map(|k| k.build(geometry, rules)).collect()
}
