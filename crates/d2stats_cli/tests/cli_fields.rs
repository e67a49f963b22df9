use std::fs;
use std::path::PathBuf;
use std::process::Command;
use std::time::{SystemTime, UNIX_EPOCH};

use serde_json::Value;

fn fixture(name: &str) -> String {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("../d2stats_core/tests/fixtures")
        .join(name)
        .to_string_lossy()
        .to_string()
}

fn run_cli(args: &[&str]) -> std::process::Output {
    Command::new(env!("CARGO_BIN_EXE_d2stats"))
        .args(args)
        .output()
        .expect("failed to run d2stats CLI")
}

fn run_with_fixtures(extra: &[&str]) -> std::process::Output {
    let game_data = fixture("game_data.json");
    let translations = fixture("translations_enUS.json");
    let character = fixture("necromancer_level16.json");
    let mut args = vec![
        "--game-data",
        game_data.as_str(),
        "--translations",
        translations.as_str(),
    ];
    args.extend_from_slice(extra);
    args.push(character.as_str());
    run_cli(&args)
}

fn temp_dir(prefix: &str) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("system time before unix epoch")
        .as_nanos();
    let dir = std::env::temp_dir().join(format!("{prefix}_{}_{}", std::process::id(), nanos));
    fs::create_dir_all(&dir).expect("temp dir should be creatable");
    dir
}

#[test]
fn cli_prints_requested_fields_in_fixed_order() {
    let output = run_with_fixtures(&["--mf", "--level", "--name"]);
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(
        stdout.lines().collect::<Vec<_>>(),
        vec!["name=Bonewright", "level=16", "magic_find=45"]
    );
}

#[test]
fn cli_prints_grouped_fields_as_repeated_keys() {
    let output = run_with_fixtures(&["--resistances", "--runes"]);
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(
        stdout.lines().collect::<Vec<_>>(),
        vec![
            "resistance=fire=28",
            "resistance=cold=53",
            "resistance=lightning=10",
            "resistance=poison=10",
            "resistance=physical=10",
            "runes=Nef, Eth, Ith (2), Tal (3), Ral",
        ]
    );
}

#[test]
fn cli_json_selected_fields() {
    let output = run_with_fixtures(&["--json", "--attributes", "--gold-in-stash"]);
    assert!(output.status.success());

    let json: Value = serde_json::from_slice(&output.stdout).expect("stdout should be json");
    let keys: Vec<&str> = json
        .as_object()
        .expect("json should be an object")
        .keys()
        .map(String::as_str)
        .collect();
    assert_eq!(keys, vec!["attributes", "gold_in_stash"]);
    assert_eq!(json["attributes"]["vitality"], 70);
    assert_eq!(json["gold_in_stash"], "5K");
}

#[test]
fn cli_default_output_is_the_sheet() {
    let output = run_with_fixtures(&[]);
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("CHARACTER RECORD"));
    assert!(stdout.contains("  Name: Bonewright"));
    assert!(stdout.contains("Strength: 42"));
}

#[test]
fn cli_flags_override_config_defaults() {
    let output = run_with_fixtures(&[
        "--runes-with-x",
        "--keep-duplicate-runewords",
        "--runes",
        "--runewords",
    ]);
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(
        stdout.lines().collect::<Vec<_>>(),
        vec!["runes=Nef, Eth, Ith x2, Tal x3, Ral", "runewords=Stealth"]
    );
}

#[test]
fn cli_items_json_lists_equipment() {
    let output = run_with_fixtures(&["--items", "--json"]);
    assert!(output.status.success());

    let json: Value = serde_json::from_slice(&output.stdout).expect("stdout should be json");
    let items = json.as_array().expect("items should be an array");
    assert_eq!(items.len(), 8);
    assert_eq!(items[1]["name"], "Quilted Armor [Stealth (Tal + Eth)]");
    assert_eq!(items[1]["properties"][4], "Socketed (2)");
}

#[test]
fn cli_sync_prints_the_document() {
    let output = run_with_fixtures(&["--sync"]);
    assert!(output.status.success());

    let json: Value = serde_json::from_slice(&output.stdout).expect("stdout should be json");
    assert_eq!(json["Event"], "DataRead");
    assert_eq!(json["Name"], "Bonewright");
    assert_eq!(json["Hireling"]["Level"], 5);
}

#[test]
fn cli_sync_skips_ignored_names() {
    let dir = temp_dir("d2stats_cli_ignore");
    let config = dir.join("config.json");
    fs::write(&config, br#"{"sync":{"ignore_names_that_contain":["NECRO"]}}"#)
        .expect("config should be writable");
    let config = config.to_string_lossy().to_string();

    let output = run_with_fixtures(&["--sync", "--config", &config]);
    assert!(output.status.success());
    assert!(output.stdout.is_empty());

    fs::remove_dir_all(&dir).expect("temp dir should be removable");
}

#[test]
fn cli_latest_picks_a_character_from_directory() {
    let dir = temp_dir("d2stats_cli_latest");
    fs::copy(fixture("necromancer_level16.json"), dir.join("Bonewright.json"))
        .expect("fixture should copy");
    let dir_arg = dir.to_string_lossy().to_string();

    let output = run_cli(&["--latest", &dir_arg, "--name"]);
    assert!(output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout).trim(), "name=Bonewright");

    fs::remove_dir_all(&dir).expect("temp dir should be removable");
}

#[test]
fn cli_requires_a_character_source() {
    let output = run_cli(&["--name"]);
    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn cli_rejects_fields_with_items() {
    let output = run_with_fixtures(&["--items", "--name"]);
    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn cli_reports_missing_files() {
    let output = run_cli(&["/nonexistent/character.json"]);
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Error loading character"));
}

#[test]
fn cli_rejects_unknown_language() {
    let output = run_with_fixtures(&["--language", "xxXX"]);
    assert_eq!(output.status.code(), Some(1));
}
