//! Normalizer - untyped host variables into the typed dashboard state.
//!
//! Nothing here can fail. Every field is resolved through its alias table,
//! coerced, and falls back to the seed data when the host value is missing
//! or unusable.

use std::collections::HashSet;

use serde_json::{Map, Value};
use tianfa_domain::defaults::{seed_inquisitor, seed_villains, seed_world, DEFAULT_AVATAR_URL};
use tianfa_domain::{
    ActiveModes, GameMode, Gender, Inquisitor, Morality, Percentage, ThreatLevel, Villain,
    WorldState,
};

use crate::aliases::{self, Aliases};
use crate::coerce::{is_enabled, js_string, number_or, string_list_or, string_or, u32_or, u64_or};
use crate::envelope::HostEnvelope;

/// Container shape observed for a list field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ListShape {
    Sequence,
    Mapping,
    Scalar,
    Missing,
}

impl ListShape {
    pub fn of(value: Option<&Value>) -> Self {
        match value {
            None | Some(Value::Null) => ListShape::Missing,
            Some(Value::Array(_)) => ListShape::Sequence,
            Some(Value::Object(_)) => ListShape::Mapping,
            Some(_) => ListShape::Scalar,
        }
    }
}

/// Everything the dashboard renders, derived from one read of the host.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedState {
    pub world: WorldState,
    pub inquisitor: Inquisitor,
    pub villains: Vec<Villain>,
    pub modes: ActiveModes,
    pub title_shape: ListShape,
    pub inventory_shape: ListShape,
}

/// Normalize a raw host payload, unwrapping `stat_data` if present.
pub fn normalize(raw: &Value) -> NormalizedState {
    let envelope = HostEnvelope::from_value(raw.clone());
    normalize_root(envelope.root())
}

/// Normalize an already-unwrapped root.
pub fn normalize_root(root: &Map<String, Value>) -> NormalizedState {
    let protagonist = sub_object(aliases::PROTAGONIST.resolve(root));

    NormalizedState {
        world: parse_world(&sub_object(aliases::WORLD.resolve(root))),
        inquisitor: parse_inquisitor(&protagonist),
        villains: parse_villains(aliases::VILLAINS.resolve(root)),
        modes: parse_modes(aliases::MODES.resolve(root)),
        title_shape: ListShape::of(aliases::TITLES.resolve(&protagonist)),
        inventory_shape: ListShape::of(aliases::INVENTORY.resolve(&protagonist)),
    }
}

/// Sub-object of the root, or empty for any other shape.
pub(crate) fn sub_object(value: Option<&Value>) -> Map<String, Value> {
    match value {
        Some(Value::Object(map)) => map.clone(),
        _ => Map::new(),
    }
}

fn field<'a>(map: &'a Map<String, Value>, aliases: Aliases) -> Option<&'a Value> {
    aliases.resolve(map)
}

pub fn parse_world(raw: &Map<String, Value>) -> WorldState {
    let seed = seed_world();
    WorldState {
        name: string_or(field(raw, aliases::WORLD_NAME), &seed.name),
        genre: string_or(field(raw, aliases::WORLD_GENRE), &seed.genre),
        purification: Percentage::clamped(number_or(
            field(raw, aliases::WORLD_PURIFICATION),
            f64::from(seed.purification.value()),
        )),
        purified_worlds: u32_or(field(raw, aliases::WORLD_PURIFIED_COUNT), seed.purified_worlds),
        time: string_or(field(raw, aliases::WORLD_TIME), &seed.time),
        location: string_or(field(raw, aliases::WORLD_LOCATION), &seed.location),
        mission: string_or(field(raw, aliases::WORLD_MISSION), &seed.mission),
    }
}

pub fn parse_inquisitor(raw: &Map<String, Value>) -> Inquisitor {
    let seed = seed_inquisitor();
    let gender = match field(raw, aliases::GENDER) {
        Some(Value::String(token)) => token.parse::<Gender>().unwrap_or(seed.gender),
        _ => seed.gender,
    };

    Inquisitor {
        name: string_or(field(raw, aliases::PROTAGONIST_NAME), &seed.name),
        gender,
        level: u32_or(field(raw, aliases::LEVEL), seed.level),
        experience: percentage_or(field(raw, aliases::EXPERIENCE), seed.experience),
        merit_points: u64_or(field(raw, aliases::MERIT_POINTS), seed.merit_points),
        identity: string_or(field(raw, aliases::IDENTITY), &seed.identity),
        titles: string_list_or(field(raw, aliases::TITLES), &seed.titles),
        permanent_statuses: string_list_or(
            field(raw, aliases::PERMANENT_STATUSES),
            &seed.permanent_statuses,
        ),
        temporary_statuses: string_list_or(
            field(raw, aliases::TEMPORARY_STATUSES),
            &seed.temporary_statuses,
        ),
        appearance: string_or(field(raw, aliases::APPEARANCE), &seed.appearance),
        corruption: percentage_or(field(raw, aliases::CORRUPTION), seed.corruption),
        inventory: string_list_or(field(raw, aliases::INVENTORY), &seed.inventory),
    }
}

fn percentage_or(value: Option<&Value>, fallback: Percentage) -> Percentage {
    Percentage::clamped(number_or(value, f64::from(fallback.value())))
}

/// Parse the villain roster.
///
/// A sequence parses positionally with fallback ids `villain-{index}`; a
/// mapping uses each key as the id. Seed values fill missing fields by
/// position. Duplicate ids are re-keyed so the first occurrence keeps its id.
pub fn parse_villains(raw: Option<&Value>) -> Vec<Villain> {
    let seeds = seed_villains();

    let parsed: Vec<Villain> = match raw {
        Some(Value::Array(items)) => items
            .iter()
            .enumerate()
            .map(|(index, item)| {
                let entry = sub_object(Some(item));
                let id = match field(&entry, aliases::VILLAIN_ID) {
                    Some(Value::String(id)) if !id.is_empty() => id.clone(),
                    _ => format!("villain-{}", index),
                };
                parse_villain(&entry, index, id, &seeds)
            })
            .collect(),
        Some(Value::Object(entries)) => entries
            .iter()
            .enumerate()
            .map(|(index, (key, item))| {
                parse_villain(&sub_object(Some(item)), index, key.clone(), &seeds)
            })
            .collect(),
        _ => Vec::new(),
    };

    dedupe_ids(parsed)
}

fn parse_villain(raw: &Map<String, Value>, index: usize, id: String, seeds: &[Villain]) -> Villain {
    let seed = seeds.get(index).or_else(|| seeds.first());
    let seed_str = |pick: fn(&Villain) -> &str| seed.map(pick).unwrap_or_default().to_string();

    let threat = match field(raw, aliases::VILLAIN_THREAT) {
        Some(value) => ThreatLevel::from_str_lenient(&js_string(value)),
        None => seed.map(|s| s.threat).unwrap_or_default(),
    };
    let avatar = seed
        .map(|s| s.avatar_url.as_str())
        .filter(|url| !url.is_empty())
        .unwrap_or(DEFAULT_AVATAR_URL);

    Villain {
        id,
        name: string_or(field(raw, aliases::VILLAIN_NAME), &seed_str(|s| s.name.as_str())),
        species: string_or(field(raw, aliases::VILLAIN_SPECIES), &seed_str(|s| s.species.as_str())),
        level: u32_or(field(raw, aliases::LEVEL), seed.map(|s| s.level).unwrap_or_default()),
        identity: string_or(field(raw, aliases::IDENTITY), &seed_str(|s| s.identity.as_str())),
        temporary_status: string_or(
            field(raw, aliases::TEMPORARY_STATUSES),
            &seed_str(|s| s.temporary_status.as_str()),
        ),
        attitude: string_or(
            field(raw, aliases::VILLAIN_ATTITUDE),
            &seed_str(|s| s.attitude.as_str()),
        ),
        affinity: percentage_or(
            field(raw, aliases::VILLAIN_AFFINITY),
            seed.map(|s| s.affinity).unwrap_or_default(),
        ),
        morality: Morality::clamped(number_or(
            field(raw, aliases::VILLAIN_MORALITY),
            f64::from(seed.map(|s| s.morality.value()).unwrap_or_default()),
        )),
        threat,
        avatar_url: string_or(field(raw, aliases::VILLAIN_AVATAR), avatar),
    }
}

/// Re-key later duplicates to `villain-{index}`, suffixing until unique.
fn dedupe_ids(villains: Vec<Villain>) -> Vec<Villain> {
    let mut seen: HashSet<String> = HashSet::new();
    let taken: HashSet<String> = villains.iter().map(|v| v.id.clone()).collect();

    villains
        .into_iter()
        .enumerate()
        .map(|(index, mut villain)| {
            if !seen.contains(&villain.id) {
                seen.insert(villain.id.clone());
                return villain;
            }

            let base = format!("villain-{}", index);
            let mut candidate = base.clone();
            let mut suffix = 1;
            while seen.contains(&candidate) || taken.contains(&candidate) {
                candidate = format!("{}-{}", base, suffix);
                suffix += 1;
            }
            tracing::warn!(
                duplicate_id = %villain.id,
                new_id = %candidate,
                "Duplicate villain id re-keyed"
            );
            seen.insert(candidate.clone());
            villain.id = candidate;
            villain
        })
        .collect()
}

/// Parse the active mode set. The baseline is always included.
pub fn parse_modes(raw: Option<&Value>) -> ActiveModes {
    let modes: Vec<GameMode> = match raw {
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(|item| GameMode::from_token(&js_string(item)))
            .collect(),
        Some(Value::Object(entries)) => entries
            .iter()
            .filter(|(_, enabled)| is_enabled(enabled))
            .filter_map(|(key, _)| GameMode::from_token(key))
            .collect(),
        _ => Vec::new(),
    };
    ActiveModes::from_modes(modes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_empty_payload_is_all_seed() {
        let state = normalize(&json!({}));
        assert_eq!(state.world, seed_world());
        assert_eq!(state.inquisitor, seed_inquisitor());
        assert!(state.villains.is_empty());
        assert_eq!(state.modes, ActiveModes::baseline());
        assert_eq!(state.title_shape, ListShape::Missing);
    }

    #[test]
    fn test_malformed_payloads_never_fail() {
        let payloads = [
            json!(null),
            json!("text"),
            json!(42),
            json!([1, 2]),
            json!({"世界": 5, "主角": [], "反派": "x", "模式": 1}),
        ];
        for raw in payloads {
            let state = normalize(&raw);
            assert_eq!(state.world, seed_world());
            assert_eq!(state.inquisitor, seed_inquisitor());
            assert!(state.modes.contains(GameMode::Normal));
        }
    }

    #[test]
    fn test_world_name_only() {
        let state = normalize(&json!({"世界": {"当前任务世界名称": "X"}}));
        let seed = seed_world();
        assert_eq!(state.world.name, "X");
        assert_eq!(state.world.genre, seed.genre);
        assert_eq!(state.world.purification, seed.purification);
        assert_eq!(state.world.mission, seed.mission);
    }

    #[test]
    fn test_world_field_aliases() {
        let state = normalize(&json!({
            "worldState": {"世界名称": "旧名", "净化度": "88", "当前时间": "09:00", "当前地点": "港口", "当前任务": "M"}
        }));
        assert_eq!(state.world.name, "旧名");
        assert_eq!(state.world.purification.value(), 88);
        assert_eq!(state.world.time, "09:00");
        assert_eq!(state.world.location, "港口");
        assert_eq!(state.world.mission, "M");
    }

    #[test]
    fn test_first_alias_wins_even_when_unusable() {
        let state = normalize(&json!({"世界": {"当前任务世界名称": 5, "世界名称": "B"}}));
        assert_eq!(state.world.name, seed_world().name);
    }

    #[test]
    fn test_stat_data_envelope() {
        let state = normalize(&json!({
            "stat_data": {"圣裁官": {"圣裁官姓名": "N"}},
            "圣裁官": {"圣裁官姓名": "outer"}
        }));
        assert_eq!(state.inquisitor.name, "N");
    }

    #[test]
    fn test_inquisitor_fields() {
        let state = normalize(&json!({"主角": {
            "姓名": "艾琳",
            "性别": "女",
            "等级": "12",
            "经验值": 150,
            "善升点": true,
            "称号": {"a": "A", "b": "B"},
            "物品栏": "钥匙",
            "分貌": "短发",
            "堕落值": -4
        }}));
        let inquisitor = state.inquisitor;
        assert_eq!(inquisitor.name, "艾琳");
        assert_eq!(inquisitor.gender, Gender::Female);
        assert_eq!(inquisitor.level, 12);
        assert_eq!(inquisitor.experience.value(), 100);
        assert_eq!(inquisitor.merit_points, 1);
        assert_eq!(inquisitor.titles, vec!["a: A", "b: B"]);
        assert_eq!(inquisitor.inventory, vec!["钥匙"]);
        assert_eq!(inquisitor.appearance, "短发");
        assert_eq!(inquisitor.corruption.value(), 0);
        assert_eq!(state.title_shape, ListShape::Mapping);
        assert_eq!(state.inventory_shape, ListShape::Scalar);
    }

    #[test]
    fn test_unknown_gender_falls_back() {
        let state = normalize(&json!({"主角": {"性别": "???"}}));
        assert_eq!(state.inquisitor.gender, Gender::Male);
    }

    #[test]
    fn test_unkeyed_villains_get_positional_ids() {
        let villains = parse_villains(Some(&json!([{"姓名": "甲"}, {"姓名": "乙"}])));
        let ids: Vec<&str> = villains.iter().map(|v| v.id.as_str()).collect();
        assert_eq!(ids, vec!["villain-0", "villain-1"]);
        assert_eq!(villains[1].name, "乙");
        // seed fallbacks by position
        assert_eq!(villains[1].threat, ThreatLevel::SS);
        assert_eq!(villains[1].avatar_url, "https://picsum.photos/200/201");
    }

    #[test]
    fn test_keyed_villains_use_key_as_id() {
        let villains = parse_villains(Some(&json!({"boss": {"id": "embedded", "威胁度": "sss"}})));
        assert_eq!(villains[0].id, "boss");
        assert_eq!(villains[0].threat, ThreatLevel::SSS);
    }

    #[test]
    fn test_villain_threat_fallbacks() {
        let villains = parse_villains(Some(&json!([{"威胁度": "Z"}, {}, {}, {}, {}])));
        assert_eq!(villains[0].threat, ThreatLevel::C);
        assert_eq!(villains[3].threat, ThreatLevel::A);
        // past the seed roster the first seed is used
        assert_eq!(villains[4].threat, ThreatLevel::S);
        assert_eq!(villains[4].name, seed_villains()[0].name);
    }

    #[test]
    fn test_villain_numbers_are_clamped() {
        let villains = parse_villains(Some(&json!([{"好感度": 300, "善恶值": "-500", "等级": "abc"}])));
        assert_eq!(villains[0].affinity.value(), 100);
        assert_eq!(villains[0].morality.value(), -100);
        assert_eq!(villains[0].level, 120);
    }

    #[test]
    fn test_duplicate_villain_ids_are_rekeyed() {
        let roster = json!([{"id": "a"}, {"id": "a"}, {"id": "villain-1"}]);
        let villains = parse_villains(Some(&roster));
        let ids: Vec<&str> = villains.iter().map(|v| v.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "villain-1-1", "villain-1"]);
        let unique: HashSet<&str> = ids.iter().copied().collect();
        assert_eq!(unique.len(), villains.len());
    }

    #[test]
    fn test_scalar_roster_is_empty() {
        assert!(parse_villains(Some(&json!("none"))).is_empty());
        assert!(parse_villains(None).is_empty());
    }

    #[test]
    fn test_modes_from_mapping() {
        let modes = normalize(&json!({"模式": {"恶堕模式": "开"}})).modes;
        assert_eq!(
            modes.iter().collect::<Vec<_>>(),
            vec![GameMode::Normal, GameMode::Corruption]
        );
    }

    #[test]
    fn test_modes_from_sequence_with_shorthand() {
        let modes = parse_modes(Some(&json!(["抖M", "UNDERDOG", "bogus"])));
        assert!(modes.contains(GameMode::Masochist));
        assert!(modes.contains(GameMode::Underdog));
        assert!(modes.contains(GameMode::Normal));
        assert_eq!(modes.len(), 3);
    }

    #[test]
    fn test_disabled_modes_are_dropped() {
        let modes = parse_modes(Some(&json!({"普通模式": false, "下克上模式": "否"})));
        assert_eq!(modes, ActiveModes::baseline());
    }
}
