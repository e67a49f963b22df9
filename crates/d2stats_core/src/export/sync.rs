//! The document pushed to the run-tracking service after every save.
//!
//! Only the payload is assembled here; sending it is up to the caller.

use serde::{Deserialize, Serialize};

use crate::config::SyncOptions;
use crate::core_api::DisplayStats;
use crate::model::Character;
use crate::translation::Translations;

use super::items::{ItemExporter, ItemPayload};
use super::mercenary::{Hireling, convert_mercenary};

const EVENT: &str = "DataRead";
const APPLICATION_VERSION: &str = "21.6.16";
const PROCESS_TYPE: &str = "D2R";
const PROCESS_VERSION: &str = "d2s";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ApplicationInfo {
    pub version: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ProcessInfo {
    #[serde(rename = "Type")]
    pub kind: String,
    pub version: String,
    pub command_line_args: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CompletedQuests {
    pub normal: Vec<i32>,
    pub nightmare: Vec<i32>,
    pub hell: Vec<i32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SyncRequest {
    pub event: String,
    pub headers: String,
    #[serde(rename = "DIApplicationInfo")]
    pub application_info: ApplicationInfo,
    #[serde(rename = "D2ProcessInfo")]
    pub process_info: ProcessInfo,
    pub seed: i32,
    #[serde(rename = "Seed_is_arg")]
    pub seed_is_arg: bool,
    pub new_character: bool,
    pub name: String,
    pub guid: String,
    pub char_class: i32,
    pub is_expansion: bool,
    pub is_hardcore: bool,
    pub is_dead: bool,
    pub area: i32,
    pub difficulty: i32,
    pub players_x: Option<i32>,
    pub deaths: i32,
    pub level: u8,
    pub experience: u64,
    pub strength: i32,
    pub dexterity: i32,
    pub vitality: i32,
    pub energy: i32,
    pub fire_resist: i32,
    pub cold_resist: i32,
    pub lightning_resist: i32,
    pub poison_resist: i32,
    pub gold: u64,
    pub gold_stash: u64,
    pub life: i64,
    pub life_max: i64,
    pub mana: i64,
    pub mana_max: i64,
    pub faster_cast_rate: i32,
    pub faster_hit_recovery: i32,
    pub faster_run_walk: i32,
    pub increased_attack_speed: i32,
    pub magic_find: i32,
    pub completed_quests: CompletedQuests,
    pub inventory_tab: Option<i32>,
    pub clear_items: bool,
    pub added_items: Vec<ItemPayload>,
    pub removed_items: Vec<ItemPayload>,
    pub hireling: Option<Hireling>,
}

/// Assemble the sync document from a character and its computed stats.
///
/// The whole item list is resent every time (`ClearItems`), so
/// `RemovedItems` stays empty.
pub fn build_sync_request(
    character: &Character,
    stats: &DisplayStats,
    translations: &Translations,
    exporter: &ItemExporter<'_>,
    options: &SyncOptions,
    equipment_only: bool,
) -> SyncRequest {
    let attributes = &character.attributes;
    let difficulty = character.current_difficulty();

    SyncRequest {
        event: EVENT.to_string(),
        headers: format!("API_KEY={}", options.api_key),
        application_info: ApplicationInfo {
            version: APPLICATION_VERSION.to_string(),
        },
        process_info: ProcessInfo {
            kind: PROCESS_TYPE.to_string(),
            version: PROCESS_VERSION.to_string(),
            command_line_args: Vec::new(),
        },
        seed: 0,
        seed_is_arg: false,
        new_character: attributes.experience == 0,
        name: character.name.clone(),
        guid: String::new(),
        char_class: character.class.id(),
        is_expansion: character.expansion,
        is_hardcore: character.hardcore,
        is_dead: character.died,
        area: 0,
        difficulty: difficulty.id(),
        players_x: None,
        deaths: 0,
        level: character.level,
        experience: attributes.experience,
        strength: stats.attributes.strength,
        dexterity: stats.attributes.dexterity,
        vitality: stats.attributes.vitality,
        energy: stats.attributes.energy,
        fire_resist: stats.resistances.fire,
        cold_resist: stats.resistances.cold,
        lightning_resist: stats.resistances.lightning,
        poison_resist: stats.resistances.poison,
        gold: attributes.gold,
        gold_stash: attributes.gold_in_stash,
        life: attributes.hp,
        life_max: attributes.max_hp,
        mana: attributes.mana,
        mana_max: attributes.max_mana,
        faster_cast_rate: stats.breakpoints.faster_cast_rate,
        faster_hit_recovery: stats.breakpoints.faster_hit_recovery,
        faster_run_walk: stats.faster_run_walk,
        increased_attack_speed: stats.increased_attack_speed,
        magic_find: stats.magic_find,
        completed_quests: CompletedQuests::default(),
        inventory_tab: None,
        clear_items: true,
        added_items: exporter.convert_items(&character.items, equipment_only, false, character.level),
        removed_items: Vec::new(),
        hireling: character
            .mercenary
            .as_ref()
            .map(|mercenary| convert_mercenary(mercenary, difficulty, translations, exporter)),
    }
}

/// Whether a save file should be skipped, by case-insensitive substring match.
pub fn ignore_by_name(file_name: &str, filters: &[String]) -> bool {
    let lowered = file_name.to_lowercase();
    filters
        .iter()
        .filter(|filter| !filter.is_empty())
        .any(|filter| lowered.contains(&filter.to_lowercase()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ignore_matches_substrings_case_insensitively() {
        let filters = vec!["mule".to_string(), "Test".to_string()];
        assert!(ignore_by_name("RuneMule.d2s", &filters));
        assert!(ignore_by_name("mytestchar.d2s", &filters));
        assert!(!ignore_by_name("Sorc.d2s", &filters));
        assert!(!ignore_by_name("Sorc.d2s", &[String::new()]));
        assert!(!ignore_by_name("Sorc.d2s", &[]));
    }

    #[test]
    fn fixed_header_fields_serialize_with_service_names() {
        let info = ProcessInfo {
            kind: PROCESS_TYPE.to_string(),
            version: PROCESS_VERSION.to_string(),
            command_line_args: Vec::new(),
        };
        let json = serde_json::to_value(&info).expect("process info should serialize");
        assert_eq!(json, serde_json::json!({"Type": "D2R", "Version": "d2s", "CommandLineArgs": []}));

        let quests = serde_json::to_value(CompletedQuests::default()).expect("quests should serialize");
        assert_eq!(quests, serde_json::json!({"Normal": [], "Nightmare": [], "Hell": []}));
    }
}
