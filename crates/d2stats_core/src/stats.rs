//! Composing the display aggregate for one character.

use std::collections::BTreeMap;

use chrono::{Local, NaiveTime};
use tracing::{debug, warn};

use crate::aggregate::{
    DEXTERITY, ENERGY, FASTER_BLOCK_RATE, FASTER_CAST_RATE, FASTER_HIT_RECOVERY, FASTER_RUN_WALK,
    GOLD_FIND, INCREASED_ATTACK_SPEED, MAGIC_FIND, STRENGTH, VITALITY, sum_property,
};
use crate::breakpoints::{BreakpointKind, WeaponCategory, resolve_next};
use crate::config::StatsOptions;
use crate::core_api::{
    Breakpoints, DisplayAttributes, DisplayStats, Keys, Resistances, SpeedRunItems,
};
use crate::equipment::resolve_equipped;
use crate::experience::level_percentage;
use crate::game_data::GameData;
use crate::model::{
    Character, CharacterClass, Difficulty, Item, ItemContainer, ItemProperty, SharedStashTab,
};

const MAX_RESISTANCE: i32 = 95;
const BASE_MAX_RESISTANCE: i32 = 75;
const SCROLL_RESISTANCE: i32 = 10;
const MIN_KEY_LEVEL: i32 = 80;

const TERROR_KEY: &str = "pk1";
const HATE_KEY: &str = "pk2";
const DESTRUCTION_KEY: &str = "pk3";
const FULL_REJUVENATION: &str = "rvl";
const SMALL_REJUVENATION: &str = "rvs";
const CHIPPED_GEMS: &[&str] = &["gcv", "gcw", "gcg", "gcr", "gcb", "skc", "gcy"];

pub struct StatsCalculator<'a> {
    game_data: &'a GameData,
    options: &'a StatsOptions,
}

impl<'a> StatsCalculator<'a> {
    pub fn new(game_data: &'a GameData, options: &'a StatsOptions) -> Self {
        Self { game_data, options }
    }

    pub fn compute(&self, character: &Character, shared_stash: &[SharedStashTab]) -> DisplayStats {
        self.compute_at(character, shared_stash, Local::now().time())
    }

    pub fn compute_at(
        &self,
        character: &Character,
        shared_stash: &[SharedStashTab],
        now: NaiveTime,
    ) -> DisplayStats {
        let mut gold_in_stash = character.attributes.gold_in_stash;
        let mut all_items: Vec<&Item> = character.items.iter().collect();
        if self.options.include_shared_stash {
            for tab in shared_stash {
                gold_in_stash += tab.gold;
                all_items.extend(tab.items.iter());
            }
        }
        debug!(
            name = %character.name,
            items = character.items.len(),
            reachable = all_items.len(),
            "computing display stats"
        );

        let equipped = resolve_equipped(character);
        let set_bonuses = &character.equipped_set_benefits;
        let total = |name: &str| sum_property(name, equipped.iter().copied(), set_bonuses);

        let attributes = DisplayAttributes {
            strength: character.attributes.strength + total(STRENGTH),
            dexterity: character.attributes.dexterity + total(DEXTERITY),
            vitality: character.attributes.vitality + total(VITALITY),
            energy: character.attributes.energy + total(ENERGY),
        };

        let bonuses = character.all_bonuses();
        let resistances = Resistances {
            fire: resistance("fire", character, &equipped, &bonuses),
            lightning: resistance("light", character, &equipped, &bonuses),
            poison: resistance("poison", character, &equipped, &bonuses),
            cold: resistance("cold", character, &equipped, &bonuses),
            physical: resistance("damage", character, &equipped, &bonuses),
        };

        let weapon = WeaponCategory::from_equipped(equipped.iter().copied());
        let breakpoints = breakpoints(
            character.class,
            weapon,
            total(FASTER_HIT_RECOVERY),
            total(FASTER_CAST_RATE),
            total(FASTER_BLOCK_RATE),
        );

        let available = available_runes(all_items.iter().copied());
        let runes = rune_inventory(&available, self.game_data, self.options.runes_with_x);
        let on_character = if self.options.remove_duplicate_runeword {
            character.runewords_on_character()
        } else {
            Vec::new()
        };
        let runewords = available_runewords(&available, self.game_data, &on_character);

        DisplayStats {
            name: character.name.clone(),
            class: character.class,
            level: character.level,
            hardcore: character.hardcore,
            percent_to_next: level_percentage(character.level, character.attributes.experience),
            attributes,
            resistances,
            breakpoints,
            faster_run_walk: total(FASTER_RUN_WALK),
            increased_attack_speed: total(INCREASED_ATTACK_SPEED),
            magic_find: total(MAGIC_FIND),
            gold_find: total(GOLD_FIND),
            gold: gold_string(character.attributes.gold),
            gold_in_stash: gold_string(gold_in_stash),
            runes,
            runewords,
            keys: count_keys(all_items.iter().copied()),
            speed_run_items: count_speed_run_items(all_items.iter().copied()),
            last_updated: now.format("%H:%M").to_string(),
        }
    }
}

pub fn breakpoints(
    class: CharacterClass,
    weapon: WeaponCategory,
    faster_hit_recovery: i32,
    faster_cast_rate: i32,
    faster_block_rate: i32,
) -> Breakpoints {
    Breakpoints {
        faster_hit_recovery,
        next_faster_hit_recovery: resolve_next(
            BreakpointKind::HitRecovery,
            class,
            weapon,
            faster_hit_recovery,
        ),
        faster_cast_rate,
        next_faster_cast_rate: resolve_next(
            BreakpointKind::CastRate,
            class,
            weapon,
            faster_cast_rate,
        ),
        faster_block_rate,
        next_faster_block_rate: 0,
    }
}

/// Capped resistance for an element name as used in property names
/// (`fire`, `light`, `poison`, `cold`, `damage`).
pub fn resistance(
    element: &str,
    character: &Character,
    equipped: &[&Item],
    bonuses: &[ItemProperty],
) -> i32 {
    let sum = sum_property(&format!("{element}resist"), equipped.iter().copied(), bonuses);
    let max_bonus = sum_property(&format!("max{element}resist"), equipped.iter().copied(), bonuses);
    let cap = MAX_RESISTANCE.min(BASE_MAX_RESISTANCE + max_bonus);
    cap.min(adjust_for_progress(character, sum))
}

/// Add the resistance scrolls read and subtract the active difficulty penalty.
pub fn adjust_for_progress(character: &Character, sum: i32) -> i32 {
    let scrolls = character
        .quest_data
        .iter()
        .filter(|quest| quest.resistance_scroll_read)
        .count() as i32;
    sum + scrolls * SCROLL_RESISTANCE
        - difficulty_penalty(character.expansion, character.current_difficulty())
}

pub fn difficulty_penalty(expansion: bool, difficulty: Difficulty) -> i32 {
    match (expansion, difficulty) {
        (_, Difficulty::Normal) => 0,
        (true, Difficulty::Nightmare) => 40,
        (true, Difficulty::Hell) => 100,
        (false, Difficulty::Nightmare) => 20,
        (false, Difficulty::Hell) => 50,
    }
}

pub fn gold_string(gold: u64) -> String {
    if gold < 1000 {
        gold.to_string()
    } else {
        format!("{}K", gold / 1000)
    }
}

/// Rune counts by code for runes in the inventory or a stash.
pub fn available_runes<'a, I>(items: I) -> BTreeMap<String, u32>
where
    I: IntoIterator<Item = &'a Item>,
{
    let mut out = BTreeMap::new();
    for item in items {
        if item.is_rune()
            && matches!(item.container, ItemContainer::Inventory | ItemContainer::Stash)
        {
            *out.entry(item.code.clone()).or_default() += 1;
        }
    }
    out
}

pub fn rune_inventory(available: &BTreeMap<String, u32>, game_data: &GameData, with_x: bool) -> String {
    available
        .iter()
        .map(|(code, count)| {
            let name = game_data.rune_name(code).unwrap_or_else(|| {
                warn!(%code, "unknown rune code");
                code.as_str()
            });
            match (*count, with_x) {
                (1, _) => name.to_string(),
                (n, true) => format!("{name} x{n}"),
                (n, false) => format!("{name} ({n})"),
            }
        })
        .collect::<Vec<_>>()
        .join(", ")
}

pub fn available_runewords(
    available: &BTreeMap<String, u32>,
    game_data: &GameData,
    already_made: &[&str],
) -> String {
    game_data
        .runewords()
        .iter()
        .filter(|runeword| runeword.is_possible(available))
        .filter(|runeword| !already_made.contains(&runeword.name.as_str()))
        .map(|runeword| runeword.name.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

pub fn count_keys<'a, I>(items: I) -> Keys
where
    I: IntoIterator<Item = &'a Item>,
{
    let mut keys = Keys::default();
    for item in items.into_iter().filter(|item| item.level >= MIN_KEY_LEVEL) {
        match item.code.as_str() {
            TERROR_KEY => keys.terror += 1,
            HATE_KEY => keys.hate += 1,
            DESTRUCTION_KEY => keys.destruction += 1,
            _ => {}
        }
    }
    keys
}

pub fn count_speed_run_items<'a, I>(items: I) -> SpeedRunItems
where
    I: IntoIterator<Item = &'a Item>,
{
    let mut out = SpeedRunItems::default();
    for item in items {
        match item.code.as_str() {
            FULL_REJUVENATION => out.full_rejuvs += 1,
            SMALL_REJUVENATION => out.small_rejuvs += 1,
            code if CHIPPED_GEMS.contains(&code) => out.chipped_gems += 1,
            _ => {}
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Attributes, ItemLocation, ItemPosition, Location, QuestData};

    fn character(items: Vec<Item>) -> Character {
        Character {
            name: "Tester".to_string(),
            class: CharacterClass::Sorceress,
            level: 30,
            hardcore: false,
            expansion: true,
            died: false,
            attributes: Attributes {
                strength: 40,
                dexterity: 30,
                vitality: 50,
                energy: 60,
                ..Attributes::default()
            },
            items,
            equipped_set_benefits: Vec::new(),
            skills: Vec::new(),
            locations: Vec::new(),
            quest_data: Vec::new(),
            mercenary: None,
        }
    }

    fn worn(properties: Vec<ItemProperty>) -> Item {
        Item {
            code: "amu".to_string(),
            location: ItemLocation::Equipped,
            position: ItemPosition::Neck,
            properties,
            ..Item::default()
        }
    }

    fn rune(code: &str, container: ItemContainer) -> Item {
        Item {
            code: code.to_string(),
            type_code: "rune".to_string(),
            container,
            ..Item::default()
        }
    }

    #[test]
    fn gold_formatting() {
        assert_eq!(gold_string(0), "0");
        assert_eq!(gold_string(999), "999");
        assert_eq!(gold_string(1000), "1K");
        assert_eq!(gold_string(5432), "5K");
    }

    #[test]
    fn resistance_is_capped_by_max_bonus() {
        let c = character(vec![worn(vec![
            ItemProperty::new(39, "fireresist", vec![90], 0, 1),
            ItemProperty::new(40, "maxfireresist", vec![5], 0, 1),
        ])]);
        let equipped = resolve_equipped(&c);
        assert_eq!(resistance("fire", &c, &equipped, &[]), 80);

        let uncapped = character(vec![worn(vec![ItemProperty::new(
            39,
            "fireresist",
            vec![200],
            0,
            1,
        )])]);
        let equipped = resolve_equipped(&uncapped);
        assert_eq!(
            resistance("fire", &uncapped, &equipped, &[ItemProperty::new(40, "maxfireresist", vec![50], 0, 1)]),
            95
        );
    }

    #[test]
    fn scrolls_and_difficulty_adjust_resistance() {
        let mut c = character(vec![worn(vec![ItemProperty::new(43, "coldresist", vec![30], 0, 1)])]);
        c.quest_data = vec![
            QuestData {
                difficulty: Difficulty::Normal,
                resistance_scroll_read: true,
            },
            QuestData {
                difficulty: Difficulty::Nightmare,
                resistance_scroll_read: true,
            },
        ];
        c.locations = vec![
            Location {
                difficulty: Difficulty::Normal,
                active: false,
                act: 5,
            },
            Location {
                difficulty: Difficulty::Hell,
                active: true,
                act: 1,
            },
        ];
        let equipped = resolve_equipped(&c);
        assert_eq!(resistance("cold", &c, &equipped, &[]), 30 + 20 - 100);

        c.expansion = false;
        let equipped = resolve_equipped(&c);
        assert_eq!(resistance("cold", &c, &equipped, &[]), 30 + 20 - 50);
    }

    #[test]
    fn passive_skill_bonuses_count_for_resistances_only() {
        let c = character(Vec::new());
        let bonuses = vec![ItemProperty::new(39, "fireresist", vec![15], 0, 1)];
        assert_eq!(resistance("fire", &c, &[], &bonuses), 15);
    }

    #[test]
    fn penalty_table() {
        assert_eq!(difficulty_penalty(true, Difficulty::Normal), 0);
        assert_eq!(difficulty_penalty(true, Difficulty::Nightmare), 40);
        assert_eq!(difficulty_penalty(true, Difficulty::Hell), 100);
        assert_eq!(difficulty_penalty(false, Difficulty::Nightmare), 20);
        assert_eq!(difficulty_penalty(false, Difficulty::Hell), 50);
    }

    #[test]
    fn rune_listing_sorted_by_code_with_counts() {
        let data = GameData::builtin();
        let items = vec![
            rune("r07", ItemContainer::Stash),
            rune("r04", ItemContainer::Inventory),
            rune("r07", ItemContainer::Inventory),
            rune("r08", ItemContainer::HoradricCube),
        ];
        let available = available_runes(&items);
        assert_eq!(rune_inventory(&available, &data, false), "Nef, Tal (2)");
        assert_eq!(rune_inventory(&available, &data, true), "Nef, Tal x2");
    }

    #[test]
    fn duplicate_runewords_are_removed() {
        let data = GameData::builtin();
        let items = vec![rune("r07", ItemContainer::Stash), rune("r05", ItemContainer::Stash)];
        let available = available_runes(&items);
        assert_eq!(available_runewords(&available, &data, &[]), "Stealth");
        assert_eq!(available_runewords(&available, &data, &["Stealth"]), "");
    }

    #[test]
    fn keys_need_item_level_80() {
        let key = |code: &str, level: i32| Item {
            code: code.to_string(),
            level,
            ..Item::default()
        };
        let items = vec![key("pk1", 85), key("pk1", 79), key("pk2", 80), key("pk3", 90)];
        assert_eq!(
            count_keys(&items),
            Keys {
                terror: 1,
                hate: 1,
                destruction: 1
            }
        );
    }

    #[test]
    fn speed_run_items_are_counted() {
        let item = |code: &str| Item {
            code: code.to_string(),
            ..Item::default()
        };
        let items = vec![item("rvl"), item("rvl"), item("rvs"), item("gcv"), item("skc"), item("gsv")];
        assert_eq!(
            count_speed_run_items(&items),
            SpeedRunItems {
                full_rejuvs: 2,
                small_rejuvs: 1,
                chipped_gems: 2
            }
        );
    }

    #[test]
    fn shared_stash_only_counts_when_enabled() {
        let data = GameData::builtin();
        let c = character(Vec::new());
        let stash = vec![SharedStashTab {
            gold: 2500,
            items: vec![rune("r01", ItemContainer::Stash)],
        }];
        let time = NaiveTime::from_hms_opt(9, 5, 0).expect("valid time");

        let off = StatsOptions::default();
        let stats = StatsCalculator::new(&data, &off).compute_at(&c, &stash, time);
        assert_eq!(stats.runes, "");
        assert_eq!(stats.gold_in_stash, "0");
        assert_eq!(stats.last_updated, "09:05");

        let on = StatsOptions {
            include_shared_stash: true,
            ..StatsOptions::default()
        };
        let stats = StatsCalculator::new(&data, &on).compute_at(&c, &stash, time);
        assert_eq!(stats.runes, "El");
        assert_eq!(stats.gold_in_stash, "2K");
    }
}
