//! Game modes for the inquisitor's mission
//!
//! Modes stack: `Normal` is the permanent baseline, and every other mode is
//! layered on top of it once the player opts in.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A play mode that changes how the narrator treats the inquisitor.
///
/// Serializes as the host token (e.g. `"恶堕模式"`), which is also the key
/// used in the host's mode map.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
pub enum GameMode {
    /// Standard protocol, the inquisitor holds absolute control
    #[default]
    #[serde(rename = "普通模式")]
    Normal,
    /// The inquisitor can be defeated and corrupted in turn
    #[serde(rename = "恶堕模式")]
    Corruption,
    /// Villains are purified through the inquisitor's submission
    #[serde(rename = "抖M模式")]
    Masochist,
    /// The inquisitor starts from a lowly identity in the current world
    #[serde(rename = "下克上模式")]
    Underdog,
}

/// Every token the host has been seen to use for a mode.
///
/// Covers English identifiers, the host tokens themselves, and shorthand.
const MODE_TOKENS: &[(&str, GameMode)] = &[
    ("NORMAL", GameMode::Normal),
    ("CORRUPTION", GameMode::Corruption),
    ("MASOCHIST", GameMode::Masochist),
    ("UNDERDOG", GameMode::Underdog),
    ("普通模式", GameMode::Normal),
    ("恶堕模式", GameMode::Corruption),
    ("抖M模式", GameMode::Masochist),
    ("下克上模式", GameMode::Underdog),
    ("恶堕", GameMode::Corruption),
    ("抖M", GameMode::Masochist),
    ("下克上", GameMode::Underdog),
];

impl GameMode {
    /// All modes in display order (baseline first)
    pub fn all() -> &'static [GameMode] {
        &[
            GameMode::Normal,
            GameMode::Corruption,
            GameMode::Masochist,
            GameMode::Underdog,
        ]
    }

    /// Token the host stores for this mode (also the mode-map key)
    pub fn host_token(&self) -> &'static str {
        match self {
            GameMode::Normal => "普通模式",
            GameMode::Corruption => "恶堕模式",
            GameMode::Masochist => "抖M模式",
            GameMode::Underdog => "下克上模式",
        }
    }

    /// Rule text shown next to the mode toggle
    pub fn description(&self) -> &'static str {
        match self {
            GameMode::Normal => "标准执行协议：圣裁官拥有绝对主导权。",
            GameMode::Corruption => {
                "<user>不再无敌，有可能被对方击败并且反向污染恶堕(男性强行变为女性，种族和力量污染)"
            }
            GameMode::Masochist => "<user>是抖m，通过受虐和被调教治愈反派，从而净化反派",
            GameMode::Underdog => {
                "<user>穿越成当前世界身份低微的存在，但保留天罚神力，对地位高高在上的反派进行征服"
            }
        }
    }

    /// The baseline mode can never be switched off
    pub fn is_baseline(&self) -> bool {
        matches!(self, GameMode::Normal)
    }

    /// Look up a mode by any known token. Matching is exact.
    pub fn from_token(token: &str) -> Option<Self> {
        MODE_TOKENS
            .iter()
            .find(|(known, _)| *known == token)
            .map(|(_, mode)| *mode)
    }
}

impl fmt::Display for GameMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.host_token())
    }
}

impl FromStr for GameMode {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Self::from_token(trimmed)
            .or_else(|| Self::from_token(&trimmed.to_ascii_uppercase()))
            .ok_or_else(|| DomainError::parse(format!("Unknown game mode: {}", s)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_token_covers_identifiers_host_tokens_and_shorthand() {
        assert_eq!(GameMode::from_token("CORRUPTION"), Some(GameMode::Corruption));
        assert_eq!(GameMode::from_token("抖M模式"), Some(GameMode::Masochist));
        assert_eq!(GameMode::from_token("下克上"), Some(GameMode::Underdog));
        assert_eq!(GameMode::from_token("corruption"), None);
        assert_eq!(GameMode::from_token("unknown"), None);
    }

    #[test]
    fn test_from_str_is_case_insensitive_for_identifiers() {
        assert_eq!("underdog".parse::<GameMode>().ok(), Some(GameMode::Underdog));
        assert_eq!(" 恶堕 ".parse::<GameMode>().ok(), Some(GameMode::Corruption));
        assert!("chaos".parse::<GameMode>().is_err());
    }

    #[test]
    fn test_serializes_as_host_token() {
        let json = serde_json::to_string(&GameMode::Corruption).unwrap();
        assert_eq!(json, "\"恶堕模式\"");
        let back: GameMode = serde_json::from_str("\"普通模式\"").unwrap();
        assert_eq!(back, GameMode::Normal);
    }

    #[test]
    fn test_only_normal_is_baseline() {
        let baselines: Vec<_> = GameMode::all().iter().filter(|m| m.is_baseline()).collect();
        assert_eq!(baselines, vec![&GameMode::Normal]);
    }
}
