//! Ordered alias tables for host variable keys.
//!
//! The host's variables have been written by several generations of prompt
//! templates, so each logical field may live under more than one key. Reads
//! take the first alias that holds a non-null value; writes go to exactly one
//! alias and delete the rest.

use serde_json::{Map, Value};

/// An ordered list of keys naming one logical field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Aliases {
    keys: &'static [&'static str],
    write_default: &'static str,
}

impl Aliases {
    /// Alias table whose default write key is the first alias.
    pub const fn new(keys: &'static [&'static str]) -> Self {
        Self {
            keys,
            write_default: keys[0],
        }
    }

    /// Alias table with an explicit key to create when none is present.
    pub const fn with_write_default(
        keys: &'static [&'static str],
        write_default: &'static str,
    ) -> Self {
        Self {
            keys,
            write_default,
        }
    }

    pub fn keys(&self) -> &'static [&'static str] {
        self.keys
    }

    /// First alias with a non-null value. JSON null counts as absent.
    pub fn resolve<'a>(&self, map: &'a Map<String, Value>) -> Option<&'a Value> {
        self.keys
            .iter()
            .filter_map(|key| map.get(*key))
            .find(|value| !value.is_null())
    }

    /// Key a write should target: the first alias present (even if null),
    /// else the write default.
    pub fn write_key(&self, map: &Map<String, Value>) -> &'static str {
        self.keys
            .iter()
            .copied()
            .find(|key| map.contains_key(*key))
            .unwrap_or(self.write_default)
    }

    /// Write `value` under a single alias and remove every other alias.
    ///
    /// Returns the key written to.
    pub fn write_exclusive(&self, map: &mut Map<String, Value>, value: Value) -> &'static str {
        let target = self.write_key(map);
        map.insert(target.to_string(), value);
        for key in self.keys.iter().filter(|key| **key != target) {
            map.shift_remove(*key);
        }
        target
    }

    /// Number of aliases currently present in `map`.
    pub fn count_present(&self, map: &Map<String, Value>) -> usize {
        self.keys.iter().filter(|key| map.contains_key(**key)).count()
    }
}

// =============================================================================
// Root keys
// =============================================================================

pub const WORLD: Aliases = Aliases::new(&["世界", "世界状态", "worldState"]);
pub const PROTAGONIST: Aliases =
    Aliases::with_write_default(&["圣裁官", "主角", "inquisitor"], "主角");
pub const VILLAINS: Aliases = Aliases::new(&["反派列表", "反派", "villains"]);
pub const MODES: Aliases = Aliases::new(&["模式", "游戏模式", "activeGameModes"]);

/// Envelope key that may wrap the real root
pub const STAT_DATA: &str = "stat_data";

// =============================================================================
// World fields
// =============================================================================

pub const WORLD_NAME: Aliases = Aliases::new(&["当前任务世界名称", "世界名称"]);
pub const WORLD_GENRE: Aliases = Aliases::new(&["世界类型与基调"]);
pub const WORLD_PURIFICATION: Aliases = Aliases::new(&["当前世界净化度", "净化度"]);
pub const WORLD_PURIFIED_COUNT: Aliases = Aliases::new(&["已净化世界数"]);
pub const WORLD_TIME: Aliases = Aliases::new(&["时间", "当前时间"]);
pub const WORLD_LOCATION: Aliases = Aliases::new(&["地点", "当前地点"]);
pub const WORLD_MISSION: Aliases = Aliases::new(&["任务", "当前任务"]);

// =============================================================================
// Protagonist fields
// =============================================================================

pub const PROTAGONIST_NAME: Aliases = Aliases::new(&["圣裁官姓名", "姓名"]);
pub const GENDER: Aliases = Aliases::new(&["性别"]);
pub const LEVEL: Aliases = Aliases::new(&["等级"]);
pub const EXPERIENCE: Aliases = Aliases::new(&["经验值"]);
pub const MERIT_POINTS: Aliases = Aliases::new(&["善升点"]);
pub const IDENTITY: Aliases = Aliases::new(&["身份"]);
pub const TITLES: Aliases = Aliases::new(&["称号"]);
pub const PERMANENT_STATUSES: Aliases = Aliases::new(&["永久状态"]);
pub const TEMPORARY_STATUSES: Aliases = Aliases::new(&["临时状态"]);
pub const APPEARANCE: Aliases = Aliases::new(&["外貌", "分貌"]);
pub const CORRUPTION: Aliases = Aliases::new(&["堕落值"]);
pub const INVENTORY: Aliases = Aliases::new(&["物品栏"]);

// =============================================================================
// Villain fields
// =============================================================================

pub const VILLAIN_ID: Aliases = Aliases::new(&["id"]);
pub const VILLAIN_NAME: Aliases = Aliases::new(&["姓名"]);
pub const VILLAIN_SPECIES: Aliases = Aliases::new(&["种族"]);
pub const VILLAIN_ATTITUDE: Aliases = Aliases::new(&["对圣裁官的态度"]);
pub const VILLAIN_AFFINITY: Aliases = Aliases::new(&["好感度"]);
pub const VILLAIN_MORALITY: Aliases = Aliases::new(&["善恶值"]);
pub const VILLAIN_THREAT: Aliases = Aliases::new(&["威胁度"]);
pub const VILLAIN_AVATAR: Aliases = Aliases::new(&["avatarUrl"]);

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn object(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => panic!("fixture must be an object"),
        }
    }

    #[test]
    fn test_resolve_takes_first_present_alias() {
        let map = object(json!({"worldState": {"a": 1}, "世界": {"b": 2}}));
        assert_eq!(WORLD.resolve(&map), Some(&json!({"b": 2})));
    }

    #[test]
    fn test_resolve_skips_null() {
        let map = object(json!({"世界": null, "世界状态": "x"}));
        assert_eq!(WORLD.resolve(&map), Some(&json!("x")));
        assert_eq!(MODES.resolve(&map), None);
    }

    #[test]
    fn test_write_key_prefers_existing_alias() {
        let map = object(json!({"inquisitor": {}, "主角": {}}));
        assert_eq!(PROTAGONIST.write_key(&map), "主角");
        let map = object(json!({"inquisitor": {}}));
        assert_eq!(PROTAGONIST.write_key(&map), "inquisitor");
        assert_eq!(PROTAGONIST.write_key(&Map::new()), "主角");
        assert_eq!(MODES.write_key(&Map::new()), "模式");
    }

    #[test]
    fn test_write_key_counts_null_as_present() {
        let map = object(json!({"圣裁官": null, "主角": {"x": 1}}));
        assert_eq!(PROTAGONIST.write_key(&map), "圣裁官");
    }

    #[test]
    fn test_write_exclusive_removes_other_aliases() {
        let mut map = object(json!({"游戏模式": [], "activeGameModes": [], "other": 1}));
        let key = MODES.write_exclusive(&mut map, json!({"普通模式": true}));
        assert_eq!(key, "游戏模式");
        assert_eq!(MODES.count_present(&map), 1);
        assert_eq!(map.get("other"), Some(&json!(1)));
    }
}
