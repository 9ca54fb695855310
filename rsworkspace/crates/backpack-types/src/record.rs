use std::collections::BTreeMap;

use crate::item::{ItemStatus, ItemType};

/// A player's backpack: wallet, equipped items, inventory, skins and the
/// weekly out-of-game currency.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerRecord {
    pub wallet: Wallet,
    pub selected_items: SelectedItems,
    pub inventory: Vec<InventoryItem>,
    pub cosmetic_skins: Vec<WeaponSkin>,
    pub weekly_currency: WeeklyCurrency,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Wallet {
    pub coins: u32,
    pub gems: u32,
    pub secondary_gems: u32,
    pub total_topup: u32,
    /// Unix seconds.
    pub last_topup_time: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectedItems {
    pub avatar_id: u32,
    pub weapon_id: u32,
    pub pet_id: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InventoryItem {
    pub id: u32,
    pub count: u32,
    pub item_type: ItemType,
    pub status: ItemStatus,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeaponSkin {
    pub skin_id: u32,
    pub name: String,
    /// Right key → value. Ordered so encoding is deterministic.
    pub rights: BTreeMap<u32, u32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeeklyCurrency {
    pub amount: u32,
    /// Unix seconds.
    pub refresh_time: i64,
}
