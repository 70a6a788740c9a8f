use serde::{Deserialize, Serialize};

fn default_part() -> i32 {
    -1
}

fn default_gender() -> i16 {
    3
}

#[derive(Debug, Deserialize, Serialize)]
pub struct ItemCreateRequest {
    pub id: i32,
    pub name: String,
    #[serde(rename = "type")]
    pub item_type: i16,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub icon_id: i32,
    #[serde(default = "default_part")]
    pub part: i32,
    #[serde(default = "default_gender")]
    pub gender: i16,
    #[serde(default)]
    pub power_require: i64,
    #[serde(default)]
    pub is_up_to_up: bool,
}

/// Full replacement of an item template; the id comes from the path.
#[derive(Debug, Deserialize, Serialize)]
pub struct ItemUpdateRequest {
    pub name: String,
    #[serde(rename = "type")]
    pub item_type: i16,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub icon_id: i32,
    #[serde(default = "default_part")]
    pub part: i32,
    #[serde(default = "default_gender")]
    pub gender: i16,
    #[serde(default)]
    pub power_require: i64,
    #[serde(default)]
    pub is_up_to_up: bool,
}
