//! World entity - The mission world the inquisitor is currently purifying

use serde::{Deserialize, Serialize};

use crate::value_objects::Percentage;

/// Status of the current mission world.
///
/// # Simple Data Struct
///
/// Every field is independently defaulted by the normalizer, so any
/// combination of values is valid. Serialized field names are the host's
/// primary keys.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorldState {
    #[serde(rename = "当前任务世界名称")]
    pub name: String,
    #[serde(rename = "世界类型与基调")]
    pub genre: String,
    #[serde(rename = "当前世界净化度")]
    pub purification: Percentage,
    #[serde(rename = "已净化世界数")]
    pub purified_worlds: u32,
    #[serde(rename = "时间")]
    pub time: String,
    #[serde(rename = "地点")]
    pub location: String,
    #[serde(rename = "任务")]
    pub mission: String,
}

impl Default for WorldState {
    fn default() -> Self {
        crate::defaults::seed_world()
    }
}
