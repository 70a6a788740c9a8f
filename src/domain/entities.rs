//! Catalog records mirrored from the game database.

use serde::{Deserialize, Serialize};

/// One row of `item_templates`.
///
/// Only `id`, `name` and `item_type` carry meaning for the catalog cache and
/// the view builder; the remaining columns are stored and returned untouched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemRecord {
    pub id: i32,
    pub name: String,
    #[serde(rename = "type")]
    pub item_type: i16,
    pub description: String,
    pub icon_id: i32,
    pub part: i32,
    pub gender: i16,
    pub power_require: i64,
    pub is_up_to_up: bool,
}

/// One row of `item_types`, the lookup table clients use to resolve
/// `ItemRecord::item_type` into a display name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemTypeRecord {
    pub id: i16,
    pub name: String,
}
