//! Villain entity - An antagonist on the roster

use serde::{Deserialize, Serialize};

use crate::types::ThreatLevel;
use crate::value_objects::{Morality, Percentage};

/// An antagonist tracked by the dashboard.
///
/// `id` is unique within a parsed roster. Serialized field names are the
/// host's primary keys, so a typed villain can be written back as-is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Villain {
    pub id: String,
    #[serde(rename = "姓名")]
    pub name: String,
    #[serde(rename = "种族")]
    pub species: String,
    #[serde(rename = "等级")]
    pub level: u32,
    #[serde(rename = "身份")]
    pub identity: String,
    /// Free-text description of what the villain is doing right now
    #[serde(rename = "临时状态")]
    pub temporary_status: String,
    #[serde(rename = "对圣裁官的态度")]
    pub attitude: String,
    #[serde(rename = "好感度")]
    pub affinity: Percentage,
    #[serde(rename = "善恶值")]
    pub morality: Morality,
    #[serde(rename = "威胁度")]
    pub threat: ThreatLevel,
    #[serde(rename = "avatarUrl")]
    pub avatar_url: String,
}

/// First villain with the given id.
pub fn find_villain<'a>(roster: &'a [Villain], id: &str) -> Option<&'a Villain> {
    roster.iter().find(|v| v.id == id)
}

/// Villain with `selected` id, or the first villain when it no longer exists.
pub fn select_or_first<'a>(roster: &'a [Villain], selected: Option<&str>) -> Option<&'a Villain> {
    selected
        .and_then(|id| find_villain(roster, id))
        .or_else(|| roster.first())
}
