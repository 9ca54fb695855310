//! [`PlayerRecord`] ↔ protobuf bytes.

use backpack_types::{
    InventoryItem, ItemStatus, ItemType, PlayerRecord, SelectedItems, Wallet, WeaponSkin,
    WeeklyCurrency,
};
use prost::Message;

use crate::error::EncodingError;
use crate::schema::{
    BackpackRequest, BackpackResponse, CoinsOutGameMessage, ItemMessage, SelectedItemsMessage,
    WalletMessage, WeaponSkinMessage,
};

pub fn encode(record: &PlayerRecord) -> Vec<u8> {
    to_message(record).encode_to_vec()
}

pub fn decode(bytes: &[u8]) -> Result<PlayerRecord, EncodingError> {
    let message = BackpackResponse::decode(bytes)?;
    from_message(message)
}

/// Encode the body the upstream game server expects for a backpack lookup.
pub fn encode_request(account_id: u64, region: &str) -> Vec<u8> {
    BackpackRequest {
        account_id,
        region: region.to_string(),
    }
    .encode_to_vec()
}

pub fn decode_request(bytes: &[u8]) -> Result<BackpackRequest, EncodingError> {
    Ok(BackpackRequest::decode(bytes)?)
}

fn to_message(record: &PlayerRecord) -> BackpackResponse {
    BackpackResponse {
        wallet: Some(WalletMessage {
            coins: record.wallet.coins,
            gems: record.wallet.gems,
            gop_gems: record.wallet.secondary_gems,
            total_topup: record.wallet.total_topup,
            last_topup_time: record.wallet.last_topup_time,
        }),
        selected_items: Some(SelectedItemsMessage {
            avatar: record.selected_items.avatar_id,
            weapon: record.selected_items.weapon_id,
            pet_id: record.selected_items.pet_id,
        }),
        items: record
            .inventory
            .iter()
            .map(|item| ItemMessage {
                id: item.id,
                cnt: item.count,
                item_type: item.item_type.wire_value(),
                item_status: item.status.wire_value(),
            })
            .collect(),
        weapon_skin_stat: record
            .cosmetic_skins
            .iter()
            .map(|skin| WeaponSkinMessage {
                weapon_skin_id: skin.skin_id,
                weapon_name: skin.name.clone(),
                rights: skin.rights.clone(),
            })
            .collect(),
        coins_out_game: Some(CoinsOutGameMessage {
            coins_weekly: record.weekly_currency.amount,
            next_refresh_time: record.weekly_currency.refresh_time,
        }),
    }
}

fn from_message(message: BackpackResponse) -> Result<PlayerRecord, EncodingError> {
    let wallet = message
        .wallet
        .ok_or(EncodingError::MissingField("wallet"))?;
    let selected = message
        .selected_items
        .ok_or(EncodingError::MissingField("selected_items"))?;
    let coins_out_game = message
        .coins_out_game
        .ok_or(EncodingError::MissingField("coins_out_game"))?;

    let inventory = message
        .items
        .into_iter()
        .map(item_from_message)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(PlayerRecord {
        wallet: Wallet {
            coins: wallet.coins,
            gems: wallet.gems,
            secondary_gems: wallet.gop_gems,
            total_topup: wallet.total_topup,
            last_topup_time: wallet.last_topup_time,
        },
        selected_items: SelectedItems {
            avatar_id: selected.avatar,
            weapon_id: selected.weapon,
            pet_id: selected.pet_id,
        },
        inventory,
        cosmetic_skins: message
            .weapon_skin_stat
            .into_iter()
            .map(|skin| WeaponSkin {
                skin_id: skin.weapon_skin_id,
                name: skin.weapon_name,
                rights: skin.rights,
            })
            .collect(),
        weekly_currency: WeeklyCurrency {
            amount: coins_out_game.coins_weekly,
            refresh_time: coins_out_game.next_refresh_time,
        },
    })
}

fn item_from_message(item: ItemMessage) -> Result<InventoryItem, EncodingError> {
    let item_type =
        ItemType::from_wire(item.item_type).ok_or(EncodingError::UnknownEnumValue {
            field: "item_type",
            value: item.item_type,
        })?;
    let status =
        ItemStatus::from_wire(item.item_status).ok_or(EncodingError::UnknownEnumValue {
            field: "item_status",
            value: item.item_status,
        })?;

    Ok(InventoryItem {
        id: item.id,
        count: item.cnt,
        item_type,
        status,
    })
}
