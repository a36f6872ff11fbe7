//! Seed data used whenever host variables are missing or unusable.
//!
//! Every field of the normalized model falls back to the matching value here.

use crate::entities::{Inquisitor, Villain, WorldState};
use crate::types::{Gender, ThreatLevel};
use crate::value_objects::{Morality, Percentage};

/// Avatar used when neither the host nor the seed provides one
pub const DEFAULT_AVATAR_URL: &str = "https://picsum.photos/200/200";

pub fn seed_world() -> WorldState {
    WorldState {
        name: "霓虹·赛博坦09号".to_string(),
        genre: "赛博朋克 / 高科技反乌托邦".to_string(),
        purification: Percentage::clamped(15.0),
        purified_worlds: 3,
        time: "23:45".to_string(),
        location: "第7区 - 核心控制塔 - 顶层套房".to_string(),
        mission: "潜入反抗军高层，通过精神控制或肉体征服，瓦解其首领'莉莉丝'的意志，将其收编为联邦走狗。"
            .to_string(),
    }
}

pub fn seed_inquisitor() -> Inquisitor {
    Inquisitor {
        name: "亚弗戈蒙".to_string(),
        gender: Gender::Male,
        level: 78,
        experience: Percentage::clamped(45.0),
        merit_points: 12500,
        identity: "联邦特级审判官".to_string(),
        titles: strings(&["异端处刑者", "钢铁意志"]),
        permanent_statuses: strings(&["精神强韧 Lv.MAX", "机械义眼"]),
        temporary_statuses: Vec::new(),
        appearance: "身着漆黑的处刑官制服，银色长发束在脑后，右眼为散发着红光的机械义眼，手中握着名为'断罪'的充能手杖。"
            .to_string(),
        corruption: Percentage::clamped(5.0),
        inventory: strings(&["高压电击项圈", "纳米自白剂", "记忆修改芯片", "旧世界的相片"]),
    }
}

/// The four seed villains, in roster order.
///
/// Affinity values below zero in the source data are clamped into range.
pub fn seed_villains() -> Vec<Villain> {
    vec![
        seed_villain(SeedVillain {
            id: "v1",
            name: "莉莉丝·V·阿克拉",
            species: "改造生化人 / 吸血鬼始祖",
            level: 120,
            identity: "夜之城地下女皇",
            temporary_status: "轻蔑，手持红酒杯摇晃，眼神中透露着对联邦的不屑",
            attitude: "充满敌意，试图寻找你的弱点，言语间带着挑衅",
            affinity: 12.0,
            morality: -85.0,
            threat: ThreatLevel::S,
            avatar_url: "https://picsum.photos/200/200",
        }),
        seed_villain(SeedVillain {
            id: "v2",
            name: "代号：零",
            species: "强人工智能 / 机械飞升者",
            level: 99,
            identity: "旧网幽灵",
            temporary_status: "数据流紊乱，正在尝试暴力破解圣裁官的防火墙",
            attitude: "冷漠，正在计算击杀胜率",
            affinity: 0.0,
            morality: -10.0,
            threat: ThreatLevel::SS,
            avatar_url: "https://picsum.photos/200/201",
        }),
        seed_villain(SeedVillain {
            id: "v3",
            name: "奥古斯都·凯撒",
            species: "人类 / 独裁者",
            level: 45,
            identity: "第7区总督",
            temporary_status: "极度恐慌，在办公室来回踱步，试图销毁文件",
            attitude: "畏惧，试图通过巨额贿赂保全性命",
            affinity: -20.0,
            morality: -60.0,
            threat: ThreatLevel::B,
            avatar_url: "https://picsum.photos/200/202",
        }),
        seed_villain(SeedVillain {
            id: "v4",
            name: "实验体-734",
            species: "变异生物",
            level: 210,
            identity: "下水道之王",
            temporary_status: "狂暴，饥饿感占据了理智",
            attitude: "单纯的杀戮欲望",
            affinity: 0.0,
            morality: -90.0,
            threat: ThreatLevel::A,
            avatar_url: "https://picsum.photos/200/203",
        }),
    ]
}

struct SeedVillain {
    id: &'static str,
    name: &'static str,
    species: &'static str,
    level: u32,
    identity: &'static str,
    temporary_status: &'static str,
    attitude: &'static str,
    affinity: f64,
    morality: f64,
    threat: ThreatLevel,
    avatar_url: &'static str,
}

fn seed_villain(seed: SeedVillain) -> Villain {
    Villain {
        id: seed.id.to_string(),
        name: seed.name.to_string(),
        species: seed.species.to_string(),
        level: seed.level,
        identity: seed.identity.to_string(),
        temporary_status: seed.temporary_status.to_string(),
        attitude: seed.attitude.to_string(),
        affinity: Percentage::clamped(seed.affinity),
        morality: Morality::clamped(seed.morality),
        threat: seed.threat,
        avatar_url: seed.avatar_url.to_string(),
    }
}

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|s| s.to_string()).collect()
}
