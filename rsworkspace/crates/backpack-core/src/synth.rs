//! Deterministic backpack synthesis.
//!
//! Every field is a fixed base plus the identifier modulo a small range, so
//! the same identifier and the same `now` always produce the same record.
//! Consumers of the encrypted payload depend on these exact formulas.

use std::collections::BTreeMap;

use backpack_types::{
    InventoryItem, ItemStatus, ItemType, PlayerRecord, SelectedItems, Wallet, WeaponSkin,
    WeeklyCurrency,
};

const SECONDS_PER_DAY: i64 = 86_400;
const INVENTORY_SLOTS: u64 = 3;

pub fn synthesize(identifier: u64, now: i64) -> PlayerRecord {
    PlayerRecord {
        wallet: Wallet {
            coins: offset(5_000, identifier, 5_000),
            gems: offset(100, identifier, 50),
            secondary_gems: offset(50, identifier, 20),
            total_topup: offset(10_000, identifier, 10_000),
            last_topup_time: now - SECONDS_PER_DAY * (identifier % 30) as i64,
        },
        selected_items: SelectedItems {
            avatar_id: offset(1_000, identifier, 10),
            weapon_id: offset(2_000, identifier, 20),
            pet_id: offset(3_000, identifier, 5),
        },
        inventory: (1..=INVENTORY_SLOTS)
            .map(|slot| inventory_slot(identifier, slot))
            .collect(),
        cosmetic_skins: vec![WeaponSkin {
            skin_id: offset(5_000, identifier, 100),
            name: format!("Skin_{}", identifier % 10),
            rights: BTreeMap::new(),
        }],
        weekly_currency: WeeklyCurrency {
            amount: offset(1_000, identifier, 500),
            refresh_time: now + SECONDS_PER_DAY,
        },
    }
}

fn inventory_slot(identifier: u64, slot: u64) -> InventoryItem {
    InventoryItem {
        id: offset(10_000, identifier, 1_000) + slot as u32,
        count: offset(1, identifier, 5),
        item_type: ItemType::CYCLE[(slot % 3) as usize],
        status: if identifier % 2 == 0 {
            ItemStatus::Permanent
        } else {
            ItemStatus::Inexpire
        },
    }
}

// `modulus` is at most 10_000, so the sum always fits in a u32.
fn offset(base: u32, identifier: u64, modulus: u64) -> u32 {
    base + (identifier % modulus) as u32
}
