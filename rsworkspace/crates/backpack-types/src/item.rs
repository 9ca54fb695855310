//! Closed enums for inventory entries.
//!
//! Each enum owns a static table mapping variant ↔ canonical name ↔ wire
//! value, so name lookups never depend on runtime reflection.

use std::fmt;
use std::str::FromStr;

/// Category of an inventory entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ItemType {
    Avatar,
    Weapon,
    Pet,
}

const ITEM_TYPES: [(ItemType, &str, i32); 3] = [
    (ItemType::Avatar, "ItemType_AVATAR", 1),
    (ItemType::Weapon, "ItemType_WEAPON", 2),
    (ItemType::Pet, "ItemType_PET", 3),
];

impl ItemType {
    /// Slot order used when cycling through item types.
    pub const CYCLE: [ItemType; 3] = [ItemType::Avatar, ItemType::Weapon, ItemType::Pet];

    pub fn as_str(self) -> &'static str {
        ITEM_TYPES
            .iter()
            .find(|(variant, _, _)| *variant == self)
            .map(|(_, name, _)| *name)
            .unwrap_or_default()
    }

    pub fn wire_value(self) -> i32 {
        ITEM_TYPES
            .iter()
            .find(|(variant, _, _)| *variant == self)
            .map(|(_, _, value)| *value)
            .unwrap_or_default()
    }

    pub fn from_name(name: &str) -> Option<Self> {
        ITEM_TYPES
            .iter()
            .find(|(_, n, _)| *n == name)
            .map(|(variant, _, _)| *variant)
    }

    pub fn from_wire(value: i32) -> Option<Self> {
        ITEM_TYPES
            .iter()
            .find(|(_, _, v)| *v == value)
            .map(|(variant, _, _)| *variant)
    }
}

impl fmt::Display for ItemType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ItemType {
    type Err = UnknownName;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s).ok_or_else(|| UnknownName(s.to_string()))
    }
}

/// Ownership state of an inventory entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ItemStatus {
    /// Owned forever.
    Permanent,
    /// Owned without an expiry timer attached.
    Inexpire,
}

const ITEM_STATUSES: [(ItemStatus, &str, i32); 2] = [
    (ItemStatus::Permanent, "PERMANENT", 1),
    (ItemStatus::Inexpire, "INEXPIRE", 2),
];

impl ItemStatus {
    pub fn as_str(self) -> &'static str {
        ITEM_STATUSES
            .iter()
            .find(|(variant, _, _)| *variant == self)
            .map(|(_, name, _)| *name)
            .unwrap_or_default()
    }

    pub fn wire_value(self) -> i32 {
        ITEM_STATUSES
            .iter()
            .find(|(variant, _, _)| *variant == self)
            .map(|(_, _, value)| *value)
            .unwrap_or_default()
    }

    pub fn from_name(name: &str) -> Option<Self> {
        ITEM_STATUSES
            .iter()
            .find(|(_, n, _)| *n == name)
            .map(|(variant, _, _)| *variant)
    }

    pub fn from_wire(value: i32) -> Option<Self> {
        ITEM_STATUSES
            .iter()
            .find(|(_, _, v)| *v == value)
            .map(|(variant, _, _)| *variant)
    }
}

impl fmt::Display for ItemStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ItemStatus {
    type Err = UnknownName;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s).ok_or_else(|| UnknownName(s.to_string()))
    }
}

/// A name that is not present in an enum's table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownName(pub String);

impl fmt::Display for UnknownName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown enum name: {}", self.0)
    }
}

impl std::error::Error for UnknownName {}
