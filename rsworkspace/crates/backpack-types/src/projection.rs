//! Plain key/value view of a [`PlayerRecord`] for JSON display.
//!
//! Key names follow the JSON shape existing consumers already read
//! (`gop_gems`, `coins_out_game`, `weapon_skins`, ...), which differs from
//! the Rust field names on purpose.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::record::{InventoryItem, PlayerRecord, WeaponSkin};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlainRecord {
    pub wallet: PlainWallet,
    pub selected_items: PlainSelectedItems,
    pub coins_out_game: PlainCoinsOutGame,
    pub items: Vec<PlainItem>,
    pub weapon_skins: Vec<PlainSkin>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlainWallet {
    pub coins: u32,
    pub gems: u32,
    pub gop_gems: u32,
    pub total_topup: u32,
    pub last_topup_time: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlainSelectedItems {
    pub avatar: u32,
    pub weapon: u32,
    pub pet_id: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlainCoinsOutGame {
    pub coins_weekly: u32,
    pub next_refresh_time: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlainItem {
    pub id: u32,
    pub count: u32,
    #[serde(rename = "type")]
    pub item_type: &'static str,
    pub status: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlainSkin {
    pub skin_id: u32,
    pub name: String,
    /// JSON object keys must be strings.
    pub rights: BTreeMap<String, u32>,
}

/// Project a record into its display form, rendering enums by canonical name.
pub fn to_plain_mapping(record: &PlayerRecord) -> PlainRecord {
    PlainRecord {
        wallet: PlainWallet {
            coins: record.wallet.coins,
            gems: record.wallet.gems,
            gop_gems: record.wallet.secondary_gems,
            total_topup: record.wallet.total_topup,
            last_topup_time: record.wallet.last_topup_time,
        },
        selected_items: PlainSelectedItems {
            avatar: record.selected_items.avatar_id,
            weapon: record.selected_items.weapon_id,
            pet_id: record.selected_items.pet_id,
        },
        coins_out_game: PlainCoinsOutGame {
            coins_weekly: record.weekly_currency.amount,
            next_refresh_time: record.weekly_currency.refresh_time,
        },
        items: record.inventory.iter().map(plain_item).collect(),
        weapon_skins: record.cosmetic_skins.iter().map(plain_skin).collect(),
    }
}

fn plain_item(item: &InventoryItem) -> PlainItem {
    PlainItem {
        id: item.id,
        count: item.count,
        item_type: item.item_type.as_str(),
        status: item.status.as_str(),
    }
}

fn plain_skin(skin: &WeaponSkin) -> PlainSkin {
    PlainSkin {
        skin_id: skin.skin_id,
        name: skin.name.clone(),
        rights: skin
            .rights
            .iter()
            .map(|(k, v)| (k.to_string(), *v))
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::{ItemStatus, ItemType};
    use crate::record::{SelectedItems, Wallet, WeeklyCurrency};

    fn sample() -> PlayerRecord {
        PlayerRecord {
            wallet: Wallet {
                coins: 5123,
                gems: 123,
                secondary_gems: 53,
                total_topup: 10123,
                last_topup_time: 1_700_000_000,
            },
            selected_items: SelectedItems {
                avatar_id: 1003,
                weapon_id: 2003,
                pet_id: 3003,
            },
            inventory: vec![InventoryItem {
                id: 10124,
                count: 4,
                item_type: ItemType::Weapon,
                status: ItemStatus::Inexpire,
            }],
            cosmetic_skins: vec![WeaponSkin {
                skin_id: 5023,
                name: "Skin_3".to_string(),
                rights: BTreeMap::from([(2, 20), (1, 10)]),
            }],
            weekly_currency: WeeklyCurrency {
                amount: 1123,
                refresh_time: 1_700_086_400,
            },
        }
    }

    #[test]
    fn json_uses_consumer_key_names() {
        let json = serde_json::to_value(to_plain_mapping(&sample())).unwrap();

        assert_eq!(json["wallet"]["gop_gems"], 53);
        assert_eq!(json["selected_items"]["avatar"], 1003);
        assert_eq!(json["coins_out_game"]["coins_weekly"], 1123);
        assert_eq!(json["coins_out_game"]["next_refresh_time"], 1_700_086_400);
        assert_eq!(json["items"][0]["count"], 4);
        assert_eq!(json["weapon_skins"][0]["name"], "Skin_3");
    }

    #[test]
    fn enums_render_by_canonical_name() {
        let json = serde_json::to_value(to_plain_mapping(&sample())).unwrap();

        assert_eq!(json["items"][0]["type"], "ItemType_WEAPON");
        assert_eq!(json["items"][0]["status"], "INEXPIRE");
    }

    #[test]
    fn rights_keys_are_stringified_in_order() {
        let plain = to_plain_mapping(&sample());
        let keys: Vec<_> = plain.weapon_skins[0].rights.keys().cloned().collect();
        assert_eq!(keys, vec!["1".to_string(), "2".to_string()]);

        let json = serde_json::to_value(&plain).unwrap();
        assert_eq!(json["weapon_skins"][0]["rights"]["2"], 20);
    }

    #[test]
    fn empty_collections_stay_arrays() {
        let mut record = sample();
        record.inventory.clear();
        record.cosmetic_skins.clear();

        let json = serde_json::to_value(to_plain_mapping(&record)).unwrap();
        assert_eq!(json["items"], serde_json::json!([]));
        assert_eq!(json["weapon_skins"], serde_json::json!([]));
    }
}
