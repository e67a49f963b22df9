use std::path::PathBuf;

use chrono::NaiveTime;
use d2stats_core::config::Config;
use d2stats_core::core_api::{CoreErrorCode, DisplayStats, Engine, Session};
use d2stats_core::export::SyncQuality;
use d2stats_core::model::{Difficulty, Location};

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name)
}

fn read_fixture(name: &str) -> Vec<u8> {
    std::fs::read(fixture(name)).expect("fixture should be readable")
}

fn engine(config: Config) -> Engine {
    Engine::from_sources(
        config,
        &[read_fixture("game_data.json")],
        &[read_fixture("translations_enUS.json")],
    )
    .expect("engine should build from fixtures")
}

fn necromancer(config: Config) -> Session {
    engine(config)
        .open_bytes(read_fixture("necromancer_level16.json"))
        .expect("fixture should parse")
}

fn stats_at_noon(session: &Session) -> DisplayStats {
    let noon = NaiveTime::from_hms_opt(12, 0, 0).expect("valid time");
    session.display_stats_at(noon)
}

#[test]
fn level_sixteen_necromancer_aggregate() {
    let stats = stats_at_noon(&necromancer(Config::default()));

    assert_eq!(stats.name, "Bonewright");
    assert_eq!(stats.level, 16);
    assert_eq!(stats.attributes.strength, 42);
    assert_eq!(stats.attributes.dexterity, 25);
    assert_eq!(stats.attributes.vitality, 70);
    assert_eq!(stats.attributes.energy, 25);
    assert_eq!(stats.resistances.fire, 28);
    assert_eq!(stats.resistances.cold, 53);
    assert_eq!(stats.resistances.lightning, 10);
    assert_eq!(stats.resistances.poison, 10);
    assert_eq!(stats.magic_find, 45);
    assert_eq!(stats.gold, "16");
    assert_eq!(stats.gold_in_stash, "5K");
    assert_eq!(stats.runes, "Nef, Eth, Ith (2), Tal (3), Ral");
    assert_eq!(stats.last_updated, "12:00");
}

#[test]
fn level_sixteen_necromancer_progress_and_speed() {
    let stats = stats_at_noon(&necromancer(Config::default()));

    assert_eq!(stats.percent_to_next, "54.2");
    assert_eq!(stats.faster_run_walk, 25);
    assert_eq!(stats.breakpoints.faster_hit_recovery, 25);
    assert_eq!(stats.breakpoints.next_faster_hit_recovery, 26);
    assert_eq!(stats.breakpoints.faster_cast_rate, 0);
    assert_eq!(stats.breakpoints.next_faster_cast_rate, 9);
    assert_eq!(stats.keys.terror, 1);
    assert_eq!(stats.keys.hate, 0);
    assert_eq!(stats.speed_run_items.full_rejuvs, 1);
    assert_eq!(stats.speed_run_items.small_rejuvs, 1);
    assert_eq!(stats.speed_run_items.chipped_gems, 1);
}

#[test]
fn assembled_runewords_are_hidden_unless_disabled() {
    let stats = stats_at_noon(&necromancer(Config::default()));
    assert_eq!(stats.runewords, "");

    let mut config = Config::default();
    config.stats.remove_duplicate_runeword = false;
    let stats = stats_at_noon(&necromancer(config));
    assert_eq!(stats.runewords, "Stealth");
}

#[test]
fn runes_with_x_changes_count_suffix() {
    let mut config = Config::default();
    config.stats.runes_with_x = true;
    let stats = stats_at_noon(&necromancer(config));
    assert_eq!(stats.runes, "Nef, Eth, Ith x2, Tal x3, Ral");
}

#[test]
fn nightmare_without_scrolls_loses_forty() {
    let session = necromancer(Config::default());
    let mut character = session.character().clone();
    character.quest_data.clear();
    let normal = stats_at_noon(
        &engine(Config::default())
            .open_character(character.clone())
            .expect("character should validate"),
    );

    character.locations = vec![Location {
        difficulty: Difficulty::Nightmare,
        active: true,
        act: 1,
    }];
    let nightmare = stats_at_noon(
        &engine(Config::default())
            .open_character(character)
            .expect("character should validate"),
    );

    assert_eq!(normal.resistances.fire, 18);
    assert_eq!(normal.resistances.cold, 43);
    assert_eq!(nightmare.resistances.fire, normal.resistances.fire - 40);
    assert_eq!(nightmare.resistances.cold, normal.resistances.cold - 40);
    assert_eq!(nightmare.resistances.lightning, normal.resistances.lightning - 40);
    assert_eq!(nightmare.resistances.poison, normal.resistances.poison - 40);
}

#[test]
fn resistances_never_exceed_caps() {
    let session = necromancer(Config::default());
    let mut character = session.character().clone();
    for item in &mut character.items {
        for property in &mut item.properties {
            if property.name == "coldresist" {
                property.values = vec![90];
            }
        }
    }
    let stats = stats_at_noon(
        &engine(Config::default())
            .open_character(character)
            .expect("character should validate"),
    );
    assert_eq!(stats.resistances.cold, 75);
}

#[test]
fn equipped_items_export_with_rendered_properties() {
    let session = necromancer(Config::default());
    let payloads = session.item_payloads(true);

    let names: Vec<&str> = payloads.iter().map(|p| p.item_name.as_str()).collect();
    assert_eq!(
        names,
        vec![
            "Cap",
            "Quilted Armor [Stealth (Tal + Eth)]",
            "Ring",
            "Ring",
            "Boots",
            "lgl",
            "Wand",
            "axe",
        ]
    );

    let cap = &payloads[0];
    assert_eq!(cap.quality, SyncQuality::Blue);
    assert_eq!(cap.class, 1);
    assert_eq!(cap.location.body_location, 1);
    assert_eq!(cap.properties, vec!["+5 to Strength", "Fire Resist +13%"]);

    let stealth = &payloads[1];
    assert_eq!(stealth.base_item, "Quilted Armor");
    assert_eq!(
        stealth.properties,
        vec![
            "+25% Faster Run/Walk",
            "+25% Faster Hit Recovery",
            "+6 to Dexterity",
            "+6 to Energy",
            "Socketed (2)",
        ]
    );

    assert_eq!(payloads[2].class, 4);
    assert_eq!(payloads[2].properties[1], "15% Better Chance of Getting Magic Items");
}

#[test]
fn full_export_skips_consumables_and_gems() {
    let session = necromancer(Config::default());
    let payloads = session.item_payloads(false);
    assert!(payloads.iter().all(|p| !p.base_item.contains("Potion")));
    assert!(payloads.iter().all(|p| p.base_item != "Chipped Amethyst"));
    let runes = payloads
        .iter()
        .filter(|p| p.quality == SyncQuality::Orange)
        .count();
    assert_eq!(runes, 9);
}

#[test]
fn hireling_is_converted() {
    let session = necromancer(Config::default());
    let hireling = session.hireling().expect("fixture has a mercenary");
    assert_eq!(hireling.name, "Blaise");
    assert_eq!(hireling.level, 5);
    assert_eq!(hireling.strength, 37);
    assert_eq!(hireling.dexterity, 49);
    assert_eq!(hireling.fire_resist, 14);
    assert_eq!(hireling.cold_resist, 4);
    assert_eq!(hireling.items.len(), 1);
    assert_eq!(hireling.items[0].item_name, "Short Bow");
}

#[test]
fn sync_document_carries_character_and_stats() {
    let mut config = Config::default();
    config.sync.api_key = "secret".to_string();
    let request = necromancer(config).sync_request();
    let json = serde_json::to_value(&request).expect("sync request should serialize");

    assert_eq!(json["Event"], "DataRead");
    assert_eq!(json["Headers"], "API_KEY=secret");
    assert_eq!(json["DIApplicationInfo"]["Version"], "21.6.16");
    assert_eq!(json["D2ProcessInfo"]["Type"], "D2R");
    assert_eq!(json["Seed_is_arg"], false);
    assert_eq!(json["NewCharacter"], false);
    assert_eq!(json["CharClass"], 2);
    assert_eq!(json["Difficulty"], 0);
    assert_eq!(json["PlayersX"], serde_json::Value::Null);
    assert_eq!(json["Strength"], 42);
    assert_eq!(json["ColdResist"], 53);
    assert_eq!(json["FasterHitRecovery"], 25);
    assert_eq!(json["MagicFind"], 45);
    assert_eq!(json["GoldStash"], 5432);
    assert_eq!(json["LifeMax"], 160);
    assert_eq!(json["ClearItems"], true);
    assert_eq!(json["AddedItems"].as_array().map(Vec::len), Some(8));
    assert_eq!(json["RemovedItems"], serde_json::json!([]));
    assert_eq!(json["Hireling"]["Name"], "Blaise");
}

#[test]
fn truncated_character_is_rejected() {
    let bytes = read_fixture("necromancer_level16.json");
    let err = engine(Config::default())
        .open_bytes(&bytes[..bytes.len() / 2])
        .expect_err("truncated document should fail");
    assert_eq!(err.code, CoreErrorCode::Parse);
}

#[test]
fn german_translations_are_selected_by_language() {
    let mut config = Config::default();
    config.translation.language = "deDE".to_string();
    let session = necromancer(config);
    let payloads = session.item_payloads(true);
    assert_eq!(payloads[0].properties, vec!["+5 auf Stärke", "Feuerwiderstand +13%"]);
}
