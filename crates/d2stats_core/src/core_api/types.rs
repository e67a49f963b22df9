use serde::{Deserialize, Serialize};

use crate::model::CharacterClass;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DisplayAttributes {
    pub strength: i32,
    pub dexterity: i32,
    pub vitality: i32,
    pub energy: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Resistances {
    pub fire: i32,
    pub lightning: i32,
    pub poison: i32,
    pub cold: i32,
    pub physical: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Breakpoints {
    pub faster_hit_recovery: i32,
    pub next_faster_hit_recovery: i32,
    pub faster_cast_rate: i32,
    pub next_faster_cast_rate: i32,
    pub faster_block_rate: i32,
    pub next_faster_block_rate: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Keys {
    pub terror: u32,
    pub hate: u32,
    pub destruction: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpeedRunItems {
    pub full_rejuvs: u32,
    pub small_rejuvs: u32,
    pub chipped_gems: u32,
}

/// Everything shown on the stats overlay for one character.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DisplayStats {
    pub name: String,
    pub class: CharacterClass,
    pub level: u8,
    pub hardcore: bool,
    pub percent_to_next: String,
    pub attributes: DisplayAttributes,
    pub resistances: Resistances,
    pub breakpoints: Breakpoints,
    pub faster_run_walk: i32,
    pub increased_attack_speed: i32,
    pub magic_find: i32,
    pub gold_find: i32,
    pub gold: String,
    pub gold_in_stash: String,
    pub runes: String,
    pub runewords: String,
    pub keys: Keys,
    pub speed_run_items: SpeedRunItems,
    pub last_updated: String,
}
