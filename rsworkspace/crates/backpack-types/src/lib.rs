//! Shared types for player backpack records

pub mod item;
pub mod projection;
pub mod record;

pub use item::{ItemStatus, ItemType, UnknownName};
pub use projection::{PlainRecord, to_plain_mapping};
pub use record::*;
