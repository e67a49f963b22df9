use serde::{Deserialize, Serialize};

use crate::aggregate::sum_property;
use crate::experience::level_for_experience;
use crate::model::{Difficulty, Mercenary};
use crate::translation::Translations;

use super::items::{ItemExporter, ItemPayload};

const MAX_RESISTANCE: i32 = 75;
const RESISTANCE_CEILING: i32 = 95;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Hireling {
    pub name: String,
    pub class: u16,
    pub level: u8,
    pub experience: u64,
    pub strength: i32,
    pub dexterity: i32,
    pub fire_resist: i32,
    pub cold_resist: i32,
    pub lightning_resist: i32,
    pub poison_resist: i32,
    pub skill_ids: Vec<i32>,
    pub items: Vec<ItemPayload>,
}

/// Hireling type bands by act.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Band {
    Rogue,
    Desert,
    IronWolf,
    Barbarian,
    Unknown,
}

impl Band {
    fn of(type_id: u16) -> Self {
        match type_id {
            0..6 => Self::Rogue,
            6..15 => Self::Desert,
            15..24 => Self::IronWolf,
            24..30 => Self::Barbarian,
            _ => Self::Unknown,
        }
    }
}

pub fn convert_mercenary(
    mercenary: &Mercenary,
    difficulty: Difficulty,
    translations: &Translations,
    exporter: &ItemExporter<'_>,
) -> Hireling {
    let level = level_for_experience(mercenary.experience);
    let band = Band::of(mercenary.type_id);
    let lvl = i32::from(level);
    let (strength, dexterity) = match band {
        Band::Rogue => (32 + lvl, 39 + 2 * lvl),
        Band::Desert => (41 + 2 * lvl, 26 + 2 * lvl),
        Band::IronWolf => (31 + lvl, 25 + lvl),
        Band::Barbarian => (49 + 2 * lvl, 29 + lvl),
        Band::Unknown => (0, 0),
    };
    let resist = |element: &str| resistance(level, difficulty, element, mercenary);

    Hireling {
        name: name(mercenary, band, translations),
        class: mercenary.type_id,
        level,
        experience: mercenary.experience,
        strength,
        dexterity,
        fire_resist: resist("fire"),
        cold_resist: resist("cold"),
        lightning_resist: resist("light"),
        poison_resist: resist("poison"),
        skill_ids: Vec::new(),
        items: exporter.convert_items(&mercenary.items, true, true, level),
    }
}

fn name(mercenary: &Mercenary, band: Band, translations: &Translations) -> String {
    let id = u32::from(mercenary.name_id);
    let key = match band {
        Band::Rogue => format!("merc{:02}", 1 + id),
        Band::Desert => format!("merca{}", 201 + id),
        Band::IronWolf => format!("merca{}", 222 + id),
        Band::Barbarian => format!("Merc{}", 101 + id),
        Band::Unknown => return format!("N.N. - {} [{}]", mercenary.name_id, mercenary.type_id),
    };
    translations.translate(&key).to_string()
}

/// Level base plus item resists, capped, minus the difficulty penalty.
/// Hirelings never receive the act-scroll bonuses.
pub fn resistance(level: u8, difficulty: Difficulty, element: &str, mercenary: &Mercenary) -> i32 {
    let base = if level < 4 { 0 } else { (i32::from(level) - 3) * 2 };
    let items = &mercenary.items;
    let sum = base + sum_property(&format!("{element}resist"), items, &[]);
    let cap = RESISTANCE_CEILING.min(MAX_RESISTANCE + sum_property(&format!("max{element}resist"), items, &[]));
    let penalty = match difficulty {
        Difficulty::Normal => 0,
        Difficulty::Nightmare => 40,
        Difficulty::Hell => 100,
    };
    cap.min(sum - penalty)
}
