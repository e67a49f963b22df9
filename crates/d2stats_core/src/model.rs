//! Parsed character model as produced by the save-file parser.
//!
//! Everything in here is plain data. The stat engine never mutates it; each
//! computation reads a `Character` and produces fresh output values.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::core_api::{CoreError, CoreErrorCode};

pub const MAX_LEVEL: u8 = 99;

const CHARM_CODES: [&str; 3] = ["cm1", "cm2", "cm3"];
const SCROLL_CODES: [&str; 2] = ["tsc", "isc"];
const TOME_CODES: [&str; 2] = ["tbk", "ibk"];
const RUNE_TYPE: &str = "rune";
const JEWEL_CODE: &str = "jew";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub enum CharacterClass {
    Amazon,
    Sorceress,
    Necromancer,
    Paladin,
    Barbarian,
    Druid,
    Assassin,
    #[default]
    None,
}

impl CharacterClass {
    pub const PLAYABLE: [CharacterClass; 7] = [
        Self::Amazon,
        Self::Sorceress,
        Self::Necromancer,
        Self::Paladin,
        Self::Barbarian,
        Self::Druid,
        Self::Assassin,
    ];

    /// Class for the numeric id used in save files and item properties.
    pub fn from_id(id: i32) -> Option<Self> {
        if id < 0 {
            return None;
        }
        match id {
            0..=6 => Some(Self::PLAYABLE[id as usize]),
            7 => Some(Self::None),
            _ => None,
        }
    }

    pub fn id(&self) -> i32 {
        match *self {
            Self::Amazon => 0,
            Self::Sorceress => 1,
            Self::Necromancer => 2,
            Self::Paladin => 3,
            Self::Barbarian => 4,
            Self::Druid => 5,
            Self::Assassin => 6,
            Self::None => 7,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match *self {
            Self::Amazon => "Amazon",
            Self::Sorceress => "Sorceress",
            Self::Necromancer => "Necromancer",
            Self::Paladin => "Paladin",
            Self::Barbarian => "Barbarian",
            Self::Druid => "Druid",
            Self::Assassin => "Assassin",
            Self::None => "None",
        }
    }

    /// Translation key of the "(<Class> Only)" suffix, e.g. `NecOnly`.
    pub fn class_only_key(&self) -> Option<String> {
        match *self {
            Self::None => None,
            other => Some(format!("{}Only", &other.as_str()[..3])),
        }
    }

    /// Class owning a skill id. Ids follow the skills table order.
    pub fn for_skill(skill_id: i32) -> Option<Self> {
        match skill_id {
            6..=35 => Some(Self::Amazon),
            36..=65 => Some(Self::Sorceress),
            66..=95 => Some(Self::Necromancer),
            96..=125 => Some(Self::Paladin),
            126..=155 => Some(Self::Barbarian),
            221..=250 => Some(Self::Druid),
            251..=280 => Some(Self::Assassin),
            _ => None,
        }
    }
}

impl fmt::Display for CharacterClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Difficulty {
    #[default]
    Normal,
    Nightmare,
    Hell,
}

impl Difficulty {
    pub fn id(&self) -> i32 {
        match *self {
            Self::Normal => 0,
            Self::Nightmare => 1,
            Self::Hell => 2,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ItemLocation {
    #[default]
    Stored,
    Equipped,
    Belt,
    Cursor,
    Socketed,
}

/// Body slot of an equipped item. Declaration order is the body location id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ItemPosition {
    #[default]
    None,
    Head,
    Neck,
    Torso,
    RightHand,
    LeftHand,
    RightFinger,
    LeftFinger,
    Waist,
    Feet,
    Hands,
    RightSwap,
    LeftSwap,
}

impl ItemPosition {
    pub fn body_location(&self) -> i32 {
        *self as i32
    }

    pub fn is_swap(&self) -> bool {
        matches!(self, Self::RightSwap | Self::LeftSwap)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ItemContainer {
    #[default]
    Unknown,
    Inventory,
    HoradricCube,
    Stash,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ItemQuality {
    #[default]
    Unknown,
    None,
    Inferior,
    Normal,
    Superior,
    Magic,
    Set,
    Rare,
    Unique,
    Craft,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ItemKind {
    Armor,
    Weapon,
    #[default]
    Misc,
}

/// A single raw numeric modifier on an item, set bonus or passive skill.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemProperty {
    pub index: u16,
    pub name: String,
    pub values: Vec<i32>,
    #[serde(default)]
    pub quality_flag: i32,
    #[serde(default)]
    pub order: i32,
}

impl ItemProperty {
    pub fn new(
        index: u16,
        name: impl Into<String>,
        values: impl Into<Vec<i32>>,
        quality_flag: i32,
        order: i32,
    ) -> Self {
        Self {
            index,
            name: name.into(),
            values: values.into(),
            quality_flag,
            order,
        }
    }

    pub fn first_value(&self) -> i32 {
        self.values.first().copied().unwrap_or(0)
    }

    pub fn is_hidden(&self) -> bool {
        self.order == -1
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Item {
    pub guid: Option<String>,
    pub code: String,
    #[serde(rename = "type")]
    pub type_code: String,
    pub type2: String,
    pub kind: ItemKind,
    pub item_name: String,
    pub quality: ItemQuality,
    pub runeword: bool,
    pub durability: i32,
    pub max_durability: i32,
    pub location: ItemLocation,
    pub position: ItemPosition,
    pub container: ItemContainer,
    pub x: i32,
    pub y: i32,
    pub inv_width: i32,
    pub inv_height: i32,
    pub level: i32,
    pub req_level: i32,
    pub req_strength: i32,
    pub req_dexterity: i32,
    pub sockets: i32,
    pub socketed_items: Vec<Item>,
    pub prefix_ids: Vec<u16>,
    pub suffix_ids: Vec<u16>,
    pub rare_name_id1: i32,
    pub rare_name_id2: i32,
    pub properties: Vec<ItemProperty>,
}

impl Item {
    pub fn is_rune(&self) -> bool {
        self.type_code == RUNE_TYPE
    }

    pub fn is_charm(&self) -> bool {
        CHARM_CODES.contains(&self.code.as_str())
    }

    pub fn is_scroll(&self) -> bool {
        SCROLL_CODES.contains(&self.code.as_str())
    }

    pub fn is_tome(&self) -> bool {
        TOME_CODES.contains(&self.code.as_str())
    }

    pub fn is_gem(&self) -> bool {
        self.type_code.starts_with("gem") || self.type2 == "gem"
    }

    pub fn is_jewel(&self) -> bool {
        self.code == JEWEL_CODE
    }

    /// Broken items stop contributing; indestructible items report 0/0.
    pub fn contributes_properties(&self) -> bool {
        self.max_durability == 0 || self.durability > 0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Attributes {
    pub strength: i32,
    pub dexterity: i32,
    pub vitality: i32,
    pub energy: i32,
    pub experience: u64,
    pub gold: u64,
    pub gold_in_stash: u64,
    pub hp: i64,
    pub max_hp: i64,
    pub mana: i64,
    pub max_mana: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Skill {
    pub id: u16,
    pub points: u8,
    pub passive_bonuses: Vec<ItemProperty>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Location {
    pub difficulty: Difficulty,
    pub active: bool,
    pub act: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct QuestData {
    pub difficulty: Difficulty,
    pub resistance_scroll_read: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Mercenary {
    pub name_id: u16,
    pub type_id: u16,
    pub experience: u64,
    pub alive: bool,
    pub items: Vec<Item>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SharedStashTab {
    pub gold: u64,
    pub items: Vec<Item>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Character {
    pub name: String,
    pub class: CharacterClass,
    pub level: u8,
    #[serde(default)]
    pub hardcore: bool,
    #[serde(default = "default_expansion")]
    pub expansion: bool,
    #[serde(default)]
    pub died: bool,
    #[serde(default)]
    pub attributes: Attributes,
    #[serde(default)]
    pub items: Vec<Item>,
    #[serde(default)]
    pub equipped_set_benefits: Vec<ItemProperty>,
    #[serde(default)]
    pub skills: Vec<Skill>,
    #[serde(default)]
    pub locations: Vec<Location>,
    #[serde(default)]
    pub quest_data: Vec<QuestData>,
    #[serde(default)]
    pub mercenary: Option<Mercenary>,
}

fn default_expansion() -> bool {
    true
}

impl Character {
    /// Difficulty of the active location, Normal when none is flagged.
    pub fn current_difficulty(&self) -> Difficulty {
        self.locations
            .iter()
            .find(|location| location.active)
            .map(|location| location.difficulty)
            .unwrap_or_default()
    }

    /// Names of runewords already assembled on the character.
    pub fn runewords_on_character(&self) -> Vec<&str> {
        self.items
            .iter()
            .filter(|item| item.runeword)
            .map(|item| item.item_name.as_str())
            .collect()
    }

    /// Set bonuses plus every passive skill bonus.
    pub fn all_bonuses(&self) -> Vec<ItemProperty> {
        let mut out = self.equipped_set_benefits.clone();
        for skill in &self.skills {
            out.extend(skill.passive_bonuses.iter().cloned());
        }
        out
    }

    pub fn validate(&self) -> Result<(), CoreError> {
        if self.level == 0 || self.level > MAX_LEVEL {
            return Err(CoreError::new(
                CoreErrorCode::Validation,
                format!(
                    "character {} has level {}, expected 1-{MAX_LEVEL}",
                    self.name, self.level
                ),
            ));
        }

        let bonuses = self
            .equipped_set_benefits
            .iter()
            .chain(self.skills.iter().flat_map(|s| s.passive_bonuses.iter()));
        for property in bonuses {
            validate_property(property, "bonus list")?;
        }
        for item in &self.items {
            validate_item(item)?;
        }
        if let Some(mercenary) = &self.mercenary {
            for item in &mercenary.items {
                validate_item(item)?;
            }
        }
        Ok(())
    }
}

fn validate_item(item: &Item) -> Result<(), CoreError> {
    if item.code.is_empty() {
        return Err(CoreError::new(
            CoreErrorCode::Validation,
            format!("item '{}' has no code", item.item_name),
        ));
    }
    for property in &item.properties {
        validate_property(property, &item.code)?;
    }
    for socketed in &item.socketed_items {
        validate_item(socketed)?;
    }
    Ok(())
}

fn validate_property(property: &ItemProperty, owner: &str) -> Result<(), CoreError> {
    if property.values.is_empty() {
        return Err(CoreError::new(
            CoreErrorCode::Validation,
            format!(
                "property {} ({}) on {owner} has no values",
                property.index, property.name
            ),
        ));
    }
    Ok(())
}
