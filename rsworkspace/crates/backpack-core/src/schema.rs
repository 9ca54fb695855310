//! Protobuf wire messages.
//!
//! ```text
//! BackpackResponse
//!   1 wallet            WalletMessage
//!   2 selected_items    SelectedItemsMessage
//!   3 items             repeated ItemMessage
//!   4 weapon_skin_stat  repeated WeaponSkinMessage
//!   5 coins_out_game    CoinsOutGameMessage
//!
//! BackpackRequest
//!   1 account_id        uint64
//!   2 region            string
//! ```
//!
//! Enum fields travel as raw `int32` values; [`crate::codec`] maps them to
//! the closed enums in `backpack-types` and rejects anything unknown.

use std::collections::BTreeMap;

#[derive(Clone, PartialEq, prost::Message)]
pub struct BackpackResponse {
    #[prost(message, optional, tag = "1")]
    pub wallet: Option<WalletMessage>,
    #[prost(message, optional, tag = "2")]
    pub selected_items: Option<SelectedItemsMessage>,
    #[prost(message, repeated, tag = "3")]
    pub items: Vec<ItemMessage>,
    #[prost(message, repeated, tag = "4")]
    pub weapon_skin_stat: Vec<WeaponSkinMessage>,
    #[prost(message, optional, tag = "5")]
    pub coins_out_game: Option<CoinsOutGameMessage>,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct WalletMessage {
    #[prost(uint32, tag = "1")]
    pub coins: u32,
    #[prost(uint32, tag = "2")]
    pub gems: u32,
    #[prost(uint32, tag = "3")]
    pub gop_gems: u32,
    #[prost(uint32, tag = "4")]
    pub total_topup: u32,
    #[prost(int64, tag = "5")]
    pub last_topup_time: i64,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct SelectedItemsMessage {
    #[prost(uint32, tag = "1")]
    pub avatar: u32,
    #[prost(uint32, tag = "2")]
    pub weapon: u32,
    #[prost(uint32, tag = "3")]
    pub pet_id: u32,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct ItemMessage {
    #[prost(uint32, tag = "1")]
    pub id: u32,
    #[prost(uint32, tag = "2")]
    pub cnt: u32,
    #[prost(int32, tag = "3")]
    pub item_type: i32,
    #[prost(int32, tag = "4")]
    pub item_status: i32,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct WeaponSkinMessage {
    #[prost(uint32, tag = "1")]
    pub weapon_skin_id: u32,
    #[prost(string, tag = "2")]
    pub weapon_name: String,
    #[prost(btree_map = "uint32, uint32", tag = "3")]
    pub rights: BTreeMap<u32, u32>,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct CoinsOutGameMessage {
    #[prost(uint32, tag = "1")]
    pub coins_weekly: u32,
    #[prost(int64, tag = "2")]
    pub next_refresh_time: i64,
}

/// Body sent to the upstream game server before encryption.
#[derive(Clone, PartialEq, prost::Message)]
pub struct BackpackRequest {
    #[prost(uint64, tag = "1")]
    pub account_id: u64,
    #[prost(string, tag = "2")]
    pub region: String,
}
