//! Corner identifiers, allowed-corner policies and hit testing

use crate::error::{FlipError, Result};
use crate::{Point, Size};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

/// One of the four corners a flip can be anchored at
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Corner {
    #[serde(rename = "tl")]
    TopLeft,
    #[serde(rename = "tr")]
    TopRight,
    #[serde(rename = "bl")]
    BottomLeft,
    #[serde(rename = "br")]
    BottomRight,
}

impl Corner {
    pub const ALL: [Corner; 4] = [
        Corner::TopLeft,
        Corner::TopRight,
        Corner::BottomLeft,
        Corner::BottomRight,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Corner::TopLeft => "tl",
            Corner::TopRight => "tr",
            Corner::BottomLeft => "bl",
            Corner::BottomRight => "br",
        }
    }

    pub fn is_right(&self) -> bool {
        matches!(self, Corner::TopRight | Corner::BottomRight)
    }

    pub fn is_bottom(&self) -> bool {
        matches!(self, Corner::BottomLeft | Corner::BottomRight)
    }

    /// The corner's own point on a surface of the given size
    pub fn point_on(&self, size: Size) -> Point {
        Point {
            x: if self.is_right() { size.width } else { 0.0 },
            y: if self.is_bottom() { size.height } else { 0.0 },
        }
    }

    fn bit(&self) -> u8 {
        match self {
            Corner::TopLeft => 0b0001,
            Corner::TopRight => 0b0010,
            Corner::BottomLeft => 0b0100,
            Corner::BottomRight => 0b1000,
        }
    }
}

impl fmt::Display for Corner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Corner {
    type Err = FlipError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "tl" => Ok(Corner::TopLeft),
            "tr" => Ok(Corner::TopRight),
            "bl" => Ok(Corner::BottomLeft),
            "br" => Ok(Corner::BottomRight),
            other => Err(FlipError::InvalidCorner(other.to_string())),
        }
    }
}

/// A set of corners stored as a bitmask
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct CornerSet(u8);

impl CornerSet {
    pub const EMPTY: CornerSet = CornerSet(0);
    pub const FORWARD: CornerSet = CornerSet(0b1010);
    pub const BACKWARD: CornerSet = CornerSet(0b0101);
    pub const ALL: CornerSet = CornerSet(0b1111);

    pub fn contains(&self, corner: Corner) -> bool {
        self.0 & corner.bit() != 0
    }

    pub fn insert(&mut self, corner: Corner) {
        self.0 |= corner.bit();
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub fn iter(&self) -> impl Iterator<Item = Corner> + '_ {
        Corner::ALL.into_iter().filter(|c| self.contains(*c))
    }
}

impl FromIterator<Corner> for CornerSet {
    fn from_iter<I: IntoIterator<Item = Corner>>(iter: I) -> Self {
        let mut set = CornerSet::EMPTY;
        for corner in iter {
            set.insert(corner);
        }
        set
    }
}

/// Which corners may start a flip.
///
/// Deserializes from a preset name (`"forward"`, `"backward"`, `"all"`) or
/// an explicit list of corner literals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CornerPolicy {
    /// `tr` and `br`
    #[default]
    Forward,
    /// `tl` and `bl`
    Backward,
    All,
    Custom(CornerSet),
}

impl CornerPolicy {
    pub fn allowed(&self) -> CornerSet {
        match self {
            CornerPolicy::Forward => CornerSet::FORWARD,
            CornerPolicy::Backward => CornerSet::BACKWARD,
            CornerPolicy::All => CornerSet::ALL,
            CornerPolicy::Custom(set) => *set,
        }
    }
}

impl FromStr for CornerPolicy {
    type Err = FlipError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "forward" => Ok(CornerPolicy::Forward),
            "backward" => Ok(CornerPolicy::Backward),
            "all" => Ok(CornerPolicy::All),
            other => Err(FlipError::InvalidCornerPolicy(other.to_string())),
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum PolicyRepr {
    Preset(String),
    List(Vec<String>),
}

impl CornerPolicy {
    fn from_repr(repr: PolicyRepr) -> Result<Self> {
        match repr {
            PolicyRepr::Preset(name) => name.parse(),
            PolicyRepr::List(names) => {
                let set = names
                    .iter()
                    .map(|n| n.parse::<Corner>())
                    .collect::<Result<CornerSet>>()?;
                Ok(CornerPolicy::Custom(set))
            }
        }
    }
}

impl<'de> Deserialize<'de> for CornerPolicy {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let repr = PolicyRepr::deserialize(deserializer)?;
        CornerPolicy::from_repr(repr).map_err(serde::de::Error::custom)
    }
}

/// Map a surface-relative point to the corner zone it falls in.
///
/// Each zone is a `zone` x `zone` square at a corner. Zones must not overlap,
/// i.e. `zone < size.width / 2` and `zone < size.height / 2`; with larger
/// zones the first matching corner in `tl, tr, bl, br` order wins.
/// Returns `None` when no zone matches or the matching corner is not allowed.
pub fn detect(point: Point, size: Size, zone: f32, allowed: CornerSet) -> Option<Corner> {
    let top = point.y < zone;
    let bottom = point.y > size.height - zone;
    let left = point.x < zone;
    let right = point.x > size.width - zone;

    let corner = match (top, bottom, left, right) {
        (true, _, true, _) => Corner::TopLeft,
        (true, _, _, true) => Corner::TopRight,
        (_, true, true, _) => Corner::BottomLeft,
        (_, true, _, true) => Corner::BottomRight,
        _ => return None,
    };

    allowed.contains(corner).then_some(corner)
}
