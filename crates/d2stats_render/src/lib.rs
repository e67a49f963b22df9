use std::fmt::Write as _;

use d2stats_core::core_api::{Breakpoints, DisplayStats};
use d2stats_core::export::{ItemPayload, SyncQuality};
use serde_json::{Map as JsonMap, Value as JsonValue};

const SHEET_WIDTH: usize = 64;
const LEFT_COL_WIDTH: usize = 32;
const PROPERTY_INDENT: &str = "    ";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JsonStyle {
    #[default]
    CanonicalV1,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextStyle {
    #[default]
    ClassicSheet,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TextRenderOptions {
    /// Include the runeword list and speed-run counters.
    pub verbose: bool,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct FieldSelection {
    pub name: bool,
    pub class: bool,
    pub level: bool,
    pub percent_to_next: bool,
    pub attributes: bool,
    pub resistances: bool,
    pub breakpoints: bool,
    pub faster_run_walk: bool,
    pub increased_attack_speed: bool,
    pub magic_find: bool,
    pub gold_find: bool,
    pub gold: bool,
    pub gold_in_stash: bool,
    pub runes: bool,
    pub runewords: bool,
    pub keys: bool,
    pub speed_run_items: bool,
    pub last_updated: bool,
}

impl FieldSelection {
    pub fn is_any_selected(&self) -> bool {
        self.name
            || self.class
            || self.level
            || self.percent_to_next
            || self.attributes
            || self.resistances
            || self.breakpoints
            || self.faster_run_walk
            || self.increased_attack_speed
            || self.magic_find
            || self.gold_find
            || self.gold
            || self.gold_in_stash
            || self.runes
            || self.runewords
            || self.keys
            || self.speed_run_items
            || self.last_updated
    }
}

pub fn render_json_full(stats: &DisplayStats, style: JsonStyle) -> JsonValue {
    match style {
        JsonStyle::CanonicalV1 => JsonValue::Object(default_json(stats)),
    }
}

pub fn render_json_selected(
    stats: &DisplayStats,
    fields: &FieldSelection,
    style: JsonStyle,
) -> JsonValue {
    match style {
        JsonStyle::CanonicalV1 => JsonValue::Object(selected_json(fields, stats)),
    }
}

pub fn render_classic_sheet(stats: &DisplayStats) -> String {
    render_classic_sheet_with_options(stats, TextRenderOptions::default())
}

pub fn render_text(stats: &DisplayStats, style: TextStyle) -> String {
    render_text_with_options(stats, style, TextRenderOptions::default())
}

pub fn render_text_with_options(
    stats: &DisplayStats,
    style: TextStyle,
    options: TextRenderOptions,
) -> String {
    match style {
        TextStyle::ClassicSheet => render_classic_sheet_with_options(stats, options),
    }
}

/// Item payloads as a JSON array, one object per item.
pub fn render_items_json(items: &[ItemPayload]) -> JsonValue {
    JsonValue::Array(items.iter().map(item_to_json).collect())
}

/// Item payloads as text: one header line per item, properties indented.
pub fn render_items_text(items: &[ItemPayload]) -> String {
    let mut out = String::new();
    for item in items {
        writeln!(
            &mut out,
            "{} ({}, {})",
            item.item_name,
            item.base_item,
            quality_name(item.quality)
        )
        .expect("writing to String cannot fail");
        for line in &item.properties {
            writeln!(&mut out, "{PROPERTY_INDENT}{line}").expect("writing to String cannot fail");
        }
    }
    out
}

fn selected_json(fields: &FieldSelection, stats: &DisplayStats) -> JsonMap<String, JsonValue> {
    let mut out = JsonMap::new();

    if fields.name {
        out.insert("name".to_string(), JsonValue::String(stats.name.clone()));
    }
    if fields.class {
        out.insert(
            "class".to_string(),
            JsonValue::String(stats.class.to_string()),
        );
    }
    if fields.level {
        out.insert("level".to_string(), JsonValue::from(stats.level));
    }
    if fields.percent_to_next {
        out.insert(
            "percent_to_next".to_string(),
            JsonValue::String(stats.percent_to_next.clone()),
        );
    }
    if fields.attributes {
        out.insert("attributes".to_string(), attributes_to_json(stats));
    }
    if fields.resistances {
        out.insert("resistances".to_string(), resistances_to_json(stats));
    }
    if fields.breakpoints {
        out.insert(
            "breakpoints".to_string(),
            breakpoints_to_json(&stats.breakpoints),
        );
    }
    if fields.faster_run_walk {
        out.insert(
            "faster_run_walk".to_string(),
            JsonValue::from(stats.faster_run_walk),
        );
    }
    if fields.increased_attack_speed {
        out.insert(
            "increased_attack_speed".to_string(),
            JsonValue::from(stats.increased_attack_speed),
        );
    }
    if fields.magic_find {
        out.insert("magic_find".to_string(), JsonValue::from(stats.magic_find));
    }
    if fields.gold_find {
        out.insert("gold_find".to_string(), JsonValue::from(stats.gold_find));
    }
    if fields.gold {
        out.insert("gold".to_string(), JsonValue::String(stats.gold.clone()));
    }
    if fields.gold_in_stash {
        out.insert(
            "gold_in_stash".to_string(),
            JsonValue::String(stats.gold_in_stash.clone()),
        );
    }
    if fields.runes {
        out.insert("runes".to_string(), JsonValue::String(stats.runes.clone()));
    }
    if fields.runewords {
        out.insert(
            "runewords".to_string(),
            JsonValue::String(stats.runewords.clone()),
        );
    }
    if fields.keys {
        out.insert("keys".to_string(), keys_to_json(stats));
    }
    if fields.speed_run_items {
        out.insert("speed_run_items".to_string(), speed_run_to_json(stats));
    }
    if fields.last_updated {
        out.insert(
            "last_updated".to_string(),
            JsonValue::String(stats.last_updated.clone()),
        );
    }

    out
}

fn default_json(stats: &DisplayStats) -> JsonMap<String, JsonValue> {
    let mut out = JsonMap::new();

    out.insert("name".to_string(), JsonValue::String(stats.name.clone()));
    out.insert(
        "class".to_string(),
        JsonValue::String(stats.class.to_string()),
    );
    out.insert("level".to_string(), JsonValue::from(stats.level));
    out.insert("hardcore".to_string(), JsonValue::Bool(stats.hardcore));
    out.insert(
        "percent_to_next".to_string(),
        JsonValue::String(stats.percent_to_next.clone()),
    );
    out.insert("attributes".to_string(), attributes_to_json(stats));
    out.insert("resistances".to_string(), resistances_to_json(stats));
    out.insert(
        "breakpoints".to_string(),
        breakpoints_to_json(&stats.breakpoints),
    );
    out.insert(
        "faster_run_walk".to_string(),
        JsonValue::from(stats.faster_run_walk),
    );
    out.insert(
        "increased_attack_speed".to_string(),
        JsonValue::from(stats.increased_attack_speed),
    );
    out.insert("magic_find".to_string(), JsonValue::from(stats.magic_find));
    out.insert("gold_find".to_string(), JsonValue::from(stats.gold_find));
    out.insert("gold".to_string(), JsonValue::String(stats.gold.clone()));
    out.insert(
        "gold_in_stash".to_string(),
        JsonValue::String(stats.gold_in_stash.clone()),
    );
    out.insert("runes".to_string(), JsonValue::String(stats.runes.clone()));
    out.insert(
        "runewords".to_string(),
        JsonValue::String(stats.runewords.clone()),
    );
    out.insert("keys".to_string(), keys_to_json(stats));
    out.insert("speed_run_items".to_string(), speed_run_to_json(stats));
    out.insert(
        "last_updated".to_string(),
        JsonValue::String(stats.last_updated.clone()),
    );

    out
}

fn attributes_to_json(stats: &DisplayStats) -> JsonValue {
    let a = &stats.attributes;
    let mut out = JsonMap::new();
    out.insert("strength".to_string(), JsonValue::from(a.strength));
    out.insert("dexterity".to_string(), JsonValue::from(a.dexterity));
    out.insert("vitality".to_string(), JsonValue::from(a.vitality));
    out.insert("energy".to_string(), JsonValue::from(a.energy));
    JsonValue::Object(out)
}

fn resistances_to_json(stats: &DisplayStats) -> JsonValue {
    let r = &stats.resistances;
    let mut out = JsonMap::new();
    out.insert("fire".to_string(), JsonValue::from(r.fire));
    out.insert("cold".to_string(), JsonValue::from(r.cold));
    out.insert("lightning".to_string(), JsonValue::from(r.lightning));
    out.insert("poison".to_string(), JsonValue::from(r.poison));
    out.insert("physical".to_string(), JsonValue::from(r.physical));
    JsonValue::Object(out)
}

fn breakpoints_to_json(b: &Breakpoints) -> JsonValue {
    let pair = |current: i32, next: i32| {
        let mut m = JsonMap::new();
        m.insert("current".to_string(), JsonValue::from(current));
        m.insert("next".to_string(), JsonValue::from(next));
        JsonValue::Object(m)
    };
    let mut out = JsonMap::new();
    out.insert(
        "faster_cast_rate".to_string(),
        pair(b.faster_cast_rate, b.next_faster_cast_rate),
    );
    out.insert(
        "faster_hit_recovery".to_string(),
        pair(b.faster_hit_recovery, b.next_faster_hit_recovery),
    );
    out.insert(
        "faster_block_rate".to_string(),
        pair(b.faster_block_rate, b.next_faster_block_rate),
    );
    JsonValue::Object(out)
}

fn keys_to_json(stats: &DisplayStats) -> JsonValue {
    let mut out = JsonMap::new();
    out.insert("terror".to_string(), JsonValue::from(stats.keys.terror));
    out.insert("hate".to_string(), JsonValue::from(stats.keys.hate));
    out.insert(
        "destruction".to_string(),
        JsonValue::from(stats.keys.destruction),
    );
    JsonValue::Object(out)
}

fn speed_run_to_json(stats: &DisplayStats) -> JsonValue {
    let s = &stats.speed_run_items;
    let mut out = JsonMap::new();
    out.insert("full_rejuvs".to_string(), JsonValue::from(s.full_rejuvs));
    out.insert("small_rejuvs".to_string(), JsonValue::from(s.small_rejuvs));
    out.insert("chipped_gems".to_string(), JsonValue::from(s.chipped_gems));
    JsonValue::Object(out)
}

fn item_to_json(item: &ItemPayload) -> JsonValue {
    let mut location = JsonMap::new();
    location.insert("container".to_string(), JsonValue::from(item.location.container));
    location.insert(
        "body_location".to_string(),
        JsonValue::from(item.location.body_location),
    );
    location.insert("x".to_string(), JsonValue::from(item.location.x));
    location.insert("y".to_string(), JsonValue::from(item.location.y));
    location.insert("width".to_string(), JsonValue::from(item.location.width));
    location.insert("height".to_string(), JsonValue::from(item.location.height));

    let mut out = JsonMap::new();
    out.insert("guid".to_string(), JsonValue::from(item.guid));
    out.insert("name".to_string(), JsonValue::String(item.item_name.clone()));
    out.insert(
        "base".to_string(),
        JsonValue::String(item.base_item.clone()),
    );
    out.insert(
        "quality".to_string(),
        JsonValue::String(quality_name(item.quality).to_string()),
    );
    out.insert("class".to_string(), JsonValue::from(item.class));
    out.insert(
        "properties".to_string(),
        JsonValue::Array(
            item.properties
                .iter()
                .cloned()
                .map(JsonValue::String)
                .collect(),
        ),
    );
    out.insert("location".to_string(), JsonValue::Object(location));
    JsonValue::Object(out)
}

fn quality_name(quality: SyncQuality) -> &'static str {
    match quality {
        SyncQuality::None => "NONE",
        SyncQuality::White => "WHITE",
        SyncQuality::Blue => "BLUE",
        SyncQuality::Green => "GREEN",
        SyncQuality::Yellow => "YELLOW",
        SyncQuality::Gold => "GOLD",
        SyncQuality::Orange => "ORANGE",
    }
}

fn render_classic_sheet_with_options(stats: &DisplayStats, options: TextRenderOptions) -> String {
    let mut out = String::new();
    writeln!(&mut out).expect("writing to String cannot fail");
    writeln!(&mut out, "{}", centered_no_trailing("DIABLO II", SHEET_WIDTH))
        .expect("writing to String cannot fail");
    writeln!(&mut out, "{}", centered_no_trailing("CHARACTER RECORD", SHEET_WIDTH))
        .expect("writing to String cannot fail");
    let updated = format!("updated {}", stats.last_updated);
    writeln!(&mut out, "{}", centered_no_trailing(&updated, SHEET_WIDTH))
        .expect("writing to String cannot fail");
    writeln!(&mut out).expect("writing to String cannot fail");

    let mode = if stats.hardcore { " (Hardcore)" } else { "" };
    writeln!(&mut out, "  Name: {}{}", stats.name, mode).expect("writing to String cannot fail");
    writeln!(
        &mut out,
        "  Class: {:<17}Level: {:02} ({}% to next)",
        stats.class.to_string(),
        stats.level,
        stats.percent_to_next
    )
    .expect("writing to String cannot fail");
    writeln!(&mut out).expect("writing to String cannot fail");

    let a = &stats.attributes;
    let r = &stats.resistances;
    let b = &stats.breakpoints;
    let rows = [
        (
            format!("Strength: {}", a.strength),
            format!("Fire Res.: {}%", r.fire),
        ),
        (
            format!("Dexterity: {}", a.dexterity),
            format!("Cold Res.: {}%", r.cold),
        ),
        (
            format!("Vitality: {}", a.vitality),
            format!("Lightning Res.: {}%", r.lightning),
        ),
        (
            format!("Energy: {}", a.energy),
            format!("Poison Res.: {}%", r.poison),
        ),
        (
            String::new(),
            format!("Physical Res.: {}%", r.physical),
        ),
    ];
    write_two_columns(&mut out, &rows);
    writeln!(&mut out).expect("writing to String cannot fail");

    let speed_rows = [
        (
            format!("FCR: {}", b.faster_cast_rate),
            format!("next {}", b.next_faster_cast_rate),
        ),
        (
            format!("FHR: {}", b.faster_hit_recovery),
            format!("next {}", b.next_faster_hit_recovery),
        ),
        (
            format!("FBR: {}", b.faster_block_rate),
            format!("next {}", b.next_faster_block_rate),
        ),
        (
            format!("FRW: {}", stats.faster_run_walk),
            format!("IAS: {}", stats.increased_attack_speed),
        ),
        (
            format!("Magic Find: {}%", stats.magic_find),
            format!("Gold Find: {}%", stats.gold_find),
        ),
        (
            format!("Gold: {}", stats.gold),
            format!("Stash: {}", stats.gold_in_stash),
        ),
    ];
    write_two_columns(&mut out, &speed_rows);
    writeln!(&mut out).expect("writing to String cannot fail");

    writeln!(&mut out, "  Runes: {}", or_none(&stats.runes)).expect("writing to String cannot fail");
    writeln!(
        &mut out,
        "  Keys: Terror {}, Hate {}, Destruction {}",
        stats.keys.terror, stats.keys.hate, stats.keys.destruction
    )
    .expect("writing to String cannot fail");

    if options.verbose {
        writeln!(&mut out, "  Runewords: {}", or_none(&stats.runewords))
            .expect("writing to String cannot fail");
        let s = &stats.speed_run_items;
        writeln!(
            &mut out,
            "  Rejuvenation: {} full, {} small  Chipped gems: {}",
            s.full_rejuvs, s.small_rejuvs, s.chipped_gems
        )
        .expect("writing to String cannot fail");
    }

    out
}

fn write_two_columns(out: &mut String, rows: &[(String, String)]) {
    for (left, right) in rows {
        let line = format!("  {:<w$}{}", left, right, w = LEFT_COL_WIDTH);
        writeln!(out, "{}", line.trim_end()).expect("writing to String cannot fail");
    }
}

fn or_none(value: &str) -> &str {
    if value.is_empty() { "none" } else { value }
}

fn centered_no_trailing(value: &str, width: usize) -> String {
    let len = value.chars().count();
    if len >= width {
        return value.to_string();
    }

    let left_padding = (width - len) / 2;
    format!("{}{}", " ".repeat(left_padding), value)
}
