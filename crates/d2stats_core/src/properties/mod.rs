//! Turning raw item properties into localized display lines.
//!
//! Rendering is a pure scan over the property list: it never mutates its
//! input, so the same item always renders the same way.

mod format;

pub use format::substitute;

use serde::{Deserialize, Serialize};
use tracing::{debug, error, warn};

use crate::core_api::RenderError;
use crate::game_data::GameData;
use crate::model::{CharacterClass, Item, ItemProperty};
use crate::translation::Translations;

const SOCKETABLE: &str = "Socketable";
const PER_LEVEL_SUFFIX: &str = "increaseswithplaylevelX";
const ALL_RESISTANCES: &str = "strModAllResistances";
const ALL_ATTRIBUTES: &str = "Moditem2allattrib";
const CHARGED_SKILL: &str = "ModStre10d";
const AURA: &str = "ModitemAura";
const CLASS_SKILL: &str = "ItemModifierClassSkill";
const POISON_DAMAGE: &str = "strModPoisonDamage";
const POISON_DAMAGE_RANGE: &str = "strModPoisonDamageRange";

// Resistances 39..=45 split across sockets are merged back together.
const MERGED_RESISTANCES: std::ops::RangeInclusive<u16> = 39..=45;
const POISON_LENGTH: u16 = 59;
const FIRST_SHIFTED_SKILL: i32 = 221;
const NO_CLASS_SELECTED: &str = "NO CLASS SELECTED";

/// Game string for a `+N to <tree> Skills` bonus, keyed by class and the
/// tree's position within that class (tab id modulo 8). The strings number
/// each class's trees in reverse.
struct SkillTab {
    class: CharacterClass,
    tree: i32,
    key: &'static str,
}

#[rustfmt::skip]
const SKILL_TABS: &[SkillTab] = &[
    SkillTab { class: CharacterClass::Amazon,      tree: 0, key: "StrSklTabItem3" },  // Bow and Crossbow
    SkillTab { class: CharacterClass::Amazon,      tree: 1, key: "StrSklTabItem2" },  // Passive and Magic
    SkillTab { class: CharacterClass::Amazon,      tree: 2, key: "StrSklTabItem1" },  // Javelin and Spear
    SkillTab { class: CharacterClass::Sorceress,   tree: 0, key: "StrSklTabItem15" }, // Fire
    SkillTab { class: CharacterClass::Sorceress,   tree: 1, key: "StrSklTabItem14" }, // Lightning
    SkillTab { class: CharacterClass::Sorceress,   tree: 2, key: "StrSklTabItem13" }, // Cold
    SkillTab { class: CharacterClass::Necromancer, tree: 0, key: "StrSklTabItem9" },  // Curses
    SkillTab { class: CharacterClass::Necromancer, tree: 1, key: "StrSklTabItem8" },  // Poison and Bone
    SkillTab { class: CharacterClass::Necromancer, tree: 2, key: "StrSklTabItem7" },  // Summoning
    SkillTab { class: CharacterClass::Paladin,     tree: 0, key: "StrSklTabItem6" },  // Combat
    SkillTab { class: CharacterClass::Paladin,     tree: 1, key: "StrSklTabItem5" },  // Offensive Auras
    SkillTab { class: CharacterClass::Paladin,     tree: 2, key: "StrSklTabItem4" },  // Defensive Auras
    SkillTab { class: CharacterClass::Barbarian,   tree: 0, key: "StrSklTabItem12" }, // Combat
    SkillTab { class: CharacterClass::Barbarian,   tree: 1, key: "StrSklTabItem11" }, // Masteries
    SkillTab { class: CharacterClass::Barbarian,   tree: 2, key: "StrSklTabItem10" }, // Warcries
    SkillTab { class: CharacterClass::Druid,       tree: 0, key: "StrSklTabItem18" }, // Summoning
    SkillTab { class: CharacterClass::Druid,       tree: 1, key: "StrSklTabItem17" }, // Shape Shifting
    SkillTab { class: CharacterClass::Druid,       tree: 2, key: "StrSklTabItem16" }, // Elemental
    SkillTab { class: CharacterClass::Assassin,    tree: 0, key: "StrSklTabItem21" }, // Traps
    SkillTab { class: CharacterClass::Assassin,    tree: 1, key: "StrSklTabItem20" }, // Shadow Disciplines
    SkillTab { class: CharacterClass::Assassin,    tree: 2, key: "StrSklTabItem19" }, // Martial Arts
];

fn skill_tab(tab: i32) -> Option<&'static SkillTab> {
    let class = CharacterClass::from_id(tab / 8)?;
    SKILL_TABS
        .iter()
        .find(|entry| entry.class == class && entry.tree == tab % 8)
}

/// Label key plus the ordered values to substitute into it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayProperty {
    pub label: String,
    pub values: Vec<String>,
    /// Append the last value once more after substitution.
    pub extend: bool,
}

impl DisplayProperty {
    pub fn new(label: impl Into<String>, values: Vec<String>) -> Self {
        Self {
            label: label.into(),
            values,
            extend: false,
        }
    }

    fn extended(label: impl Into<String>, values: Vec<String>) -> Self {
        Self {
            extend: true,
            ..Self::new(label, values)
        }
    }
}

enum Step {
    /// Emit (or drop) an entry and consume this many properties after the current one.
    Emit(Option<DisplayProperty>, usize),
    Generic,
}

#[derive(Debug, Clone, Copy)]
pub struct PropertyRenderer<'a> {
    game_data: &'a GameData,
    translations: &'a Translations,
}

impl<'a> PropertyRenderer<'a> {
    pub fn new(game_data: &'a GameData, translations: &'a Translations) -> Self {
        Self {
            game_data,
            translations,
        }
    }

    pub fn display_properties(
        &self,
        properties: &[ItemProperty],
        level: u8,
    ) -> Result<Vec<DisplayProperty>, RenderError> {
        let mut out = Vec::new();
        let mut i = 0;
        while i < properties.len() {
            let mut property = properties[i].clone();
            if property.is_hidden() {
                debug!(index = property.index, "hidden property skipped");
                i += 1;
                continue;
            }

            let mergeable = properties.get(i + 1).filter(|next| {
                MERGED_RESISTANCES.contains(&property.index)
                    && next.index == property.index
                    && (property.quality_flag == 0 || next.quality_flag == property.quality_flag)
            });
            if let Some(next) = mergeable {
                debug!(name = %property.name, "combining values");
                for (value, extra) in property.values.iter_mut().zip(&next.values) {
                    *value += *extra;
                }
                i += 1;
            }

            let first = property.first_value();
            if property.index == 43 && followed_by_equal(properties, i, &[41, 39, 45], first) {
                out.push(DisplayProperty::new(ALL_RESISTANCES, vec![first.to_string()]));
                i += 4;
                continue;
            }
            if property.index == 0 && followed_by_equal(properties, i, &[2, 3, 1], first) {
                out.push(DisplayProperty::new(ALL_ATTRIBUTES, vec![first.to_string()]));
                i += 4;
                continue;
            }

            match self.special(&property, i, properties, level)? {
                Step::Emit(entry, consumed) => {
                    out.extend(entry);
                    i += 1 + consumed;
                }
                Step::Generic => {
                    out.push(self.generic(&property));
                    i += 1;
                }
            }
        }
        Ok(out)
    }

    /// Final localized string for one entry.
    pub fn render(&self, entry: &DisplayProperty) -> String {
        let label = self.translations.translate(&entry.label);
        if entry.values.is_empty() {
            return label.to_string();
        }
        let mut line = substitute(label, &entry.values);
        if entry.extend {
            if let Some(last) = entry.values.last() {
                line.push(' ');
                line.push_str(last);
            }
        }
        line
    }

    /// Localized property lines for an item, including socketed jewels and
    /// the socket count. A malformed property list only affects this item.
    pub fn item_properties(&self, item: &Item, level: u8) -> Vec<String> {
        let mut entries = self.entries_or_log(item, level);
        for socketed in item.socketed_items.iter().filter(|s| s.is_jewel()) {
            debug!(code = %item.code, "adding socketed jewel properties");
            entries.extend(self.entries_or_log(socketed, level));
        }

        let mut lines: Vec<String> = entries.iter().map(|entry| self.render(entry)).collect();
        if item.sockets > 0 {
            lines.push(substitute(
                self.translations.translate(SOCKETABLE),
                &[item.sockets.to_string()],
            ));
        }
        lines
    }

    fn entries_or_log(&self, item: &Item, level: u8) -> Vec<DisplayProperty> {
        match self.display_properties(&item.properties, level) {
            Ok(entries) => entries,
            Err(e) => {
                error!(code = %item.code, name = %item.item_name, "failed to render properties: {e}");
                Vec::new()
            }
        }
    }

    fn special(
        &self,
        property: &ItemProperty,
        i: usize,
        properties: &[ItemProperty],
        level: u8,
    ) -> Result<Step, RenderError> {
        let next = properties.get(i + 1);
        let step = match property.index {
            23 | 24 | 56 | 59 | 140 | 159 | 160 | 356 => Step::Emit(None, 0),
            48 => paired(property, next, 49, "strModFireDamageRange")?,
            50 => paired(property, next, 51, "strModLightningDamageRange")?,
            52 => paired(property, next, 53, "strModMagicDamageRange")?,
            54 => paired(property, next, 55, "strModColdDamageRange")?,
            57 => poison(property, i, properties)?,
            83 => {
                let class_id = value(property, 0)?;
                let label = match CharacterClass::from_id(class_id) {
                    Some(CharacterClass::Amazon) => "ModStr3a",
                    Some(CharacterClass::Sorceress) => "ModStr3d",
                    Some(CharacterClass::Necromancer) => "ModStr3c",
                    Some(CharacterClass::Paladin) => "ModStr3b",
                    Some(CharacterClass::Barbarian) => "ModStr3e",
                    Some(CharacterClass::Druid) => "ModStre8a",
                    Some(CharacterClass::Assassin) => "ModStre8b",
                    Some(CharacterClass::None) => NO_CLASS_SELECTED,
                    None => {
                        error!(class_id, "no class for class skill bonus");
                        return Ok(Step::Emit(None, 0));
                    }
                };
                let entry = DisplayProperty::new(label, vec![value(property, 1)?.to_string()]);
                Step::Emit(Some(entry), 0)
            }
            107 => {
                let skill = value(property, 0)?;
                let class_only = self.class_only(CharacterClass::for_skill(skill));
                let entry = DisplayProperty::new(
                    CLASS_SKILL,
                    vec![value(property, 1)?.to_string(), self.skill_name(skill), class_only],
                );
                Step::Emit(Some(entry), 0)
            }
            151 => {
                let entry = DisplayProperty::new(
                    AURA,
                    vec![
                        value(property, 1)?.to_string(),
                        self.skill_name(value(property, 0)?),
                    ],
                );
                Step::Emit(Some(entry), 0)
            }
            188 => {
                let tab = value(property, 0)?;
                let Some(skill_tab) = skill_tab(tab) else {
                    error!(tab, "no skill tree for skill tab bonus");
                    return Ok(Step::Emit(None, 0));
                };
                let entry = DisplayProperty::extended(
                    skill_tab.key,
                    vec![
                        value(property, 1)?.to_string(),
                        self.class_only(Some(skill_tab.class)),
                    ],
                );
                Step::Emit(Some(entry), 0)
            }
            195..=199 | 201 => {
                let entry = DisplayProperty::new(
                    self.label_for(property),
                    vec![
                        value(property, 2)?.to_string(),
                        value(property, 0)?.to_string(),
                        self.skill_name(value(property, 1)?),
                    ],
                );
                Step::Emit(Some(entry), 0)
            }
            204 => {
                let entry = DisplayProperty::new(
                    CHARGED_SKILL,
                    vec![
                        value(property, 0)?.to_string(),
                        self.skill_name(value(property, 1)?),
                        value(property, 2)?.to_string(),
                        value(property, 3)?.to_string(),
                    ],
                );
                Step::Emit(Some(entry), 0)
            }
            214..=250 => {
                let scaled = (f64::from(value(property, 0)?) / 8.0 * f64::from(level)).floor();
                let entry = DisplayProperty::extended(
                    self.label_for(property),
                    vec![
                        (scaled as i32).to_string(),
                        self.translations.translate(PER_LEVEL_SUFFIX).to_string(),
                    ],
                );
                Step::Emit(Some(entry), 0)
            }
            _ => Step::Generic,
        };
        Ok(step)
    }

    fn generic(&self, property: &ItemProperty) -> DisplayProperty {
        let values = &property.values;
        let values: Vec<String> = match values.len() {
            1 | 2 => values.iter().map(i32::to_string).collect(),
            3 if values[0] == values[1] => vec![values[0].to_string()],
            3 => values.iter().map(i32::to_string).collect(),
            n => {
                warn!(index = property.index, len = n, "unsupported number of values");
                Vec::new()
            }
        };
        DisplayProperty::new(self.label_for(property), values)
    }

    fn label_for(&self, property: &ItemProperty) -> String {
        match self.game_data.stat_label(property.index) {
            Some(label) => label.to_string(),
            None => {
                warn!(index = property.index, name = %property.name, "no stat label, using property name");
                property.name.clone()
            }
        }
    }

    fn skill_name(&self, raw: i32) -> String {
        let id = if raw < FIRST_SHIFTED_SKILL { raw } else { raw + 1 };
        let key = if id < FIRST_SHIFTED_SKILL {
            format!("skillname{id}")
        } else {
            format!("Skillname{id}")
        };
        self.translations.translate(&key).to_string()
    }

    fn class_only(&self, class: Option<CharacterClass>) -> String {
        class
            .and_then(|class| class.class_only_key())
            .map(|key| self.translations.translate(&key).to_string())
            .unwrap_or_default()
    }
}

fn value(property: &ItemProperty, position: usize) -> Result<i32, RenderError> {
    property
        .values
        .get(position)
        .copied()
        .ok_or_else(|| RenderError::MissingValue {
            index: property.index,
            name: property.name.clone(),
            position,
        })
}

fn followed_by_equal(properties: &[ItemProperty], i: usize, indices: &[u16], first: i32) -> bool {
    indices.iter().enumerate().all(|(offset, index)| {
        properties
            .get(i + 1 + offset)
            .is_some_and(|p| p.index == *index && p.first_value() == first)
    })
}

fn paired(
    property: &ItemProperty,
    next: Option<&ItemProperty>,
    partner: u16,
    label: &str,
) -> Result<Step, RenderError> {
    match next {
        Some(max) if max.index == partner => {
            let entry = DisplayProperty::new(
                label,
                vec![value(property, 0)?.to_string(), value(max, 0)?.to_string()],
            );
            Ok(Step::Emit(Some(entry), 1))
        }
        _ => Ok(Step::Generic),
    }
}

// Poison damage is stored per frame (1/256th) together with a length in
// frames (25 per second) kept in a separate property.
fn poison(property: &ItemProperty, i: usize, properties: &[ItemProperty]) -> Result<Step, RenderError> {
    if i + 2 >= properties.len() {
        return Ok(Step::Generic);
    }
    let max = &properties[i + 1];
    let length = properties.iter().find(|p| p.index == POISON_LENGTH);
    let Some(length) = length.filter(|_| max.index == 58) else {
        return Ok(Step::Generic);
    };

    let length = i64::from(value(length, 0)?);
    let min_damage = i64::from(value(property, 0)?) * length / 256;
    let max_damage = i64::from(value(max, 0)?) * length / 256;
    let duration = (length / 25).to_string();
    let entry = if min_damage == max_damage {
        DisplayProperty::new(POISON_DAMAGE, vec![min_damage.to_string(), duration])
    } else {
        DisplayProperty::new(
            POISON_DAMAGE_RANGE,
            vec![min_damage.to_string(), max_damage.to_string(), duration],
        )
    };
    Ok(Step::Emit(Some(entry), 1))
}
