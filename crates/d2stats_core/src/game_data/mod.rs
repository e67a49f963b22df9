//! Reference data extracted from the game's text tables.
//!
//! A small built-in set covers runes, runewords and the common stat labels;
//! a complete set can be loaded from JSON exported from the game files.

mod builtin;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::core_api::{CoreError, CoreErrorCode};
use crate::model::ItemKind;

/// A runeword: display name, label key and the rune codes it consumes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Runeword {
    pub name: String,
    pub label: String,
    pub runes: Vec<String>,
}

impl Runeword {
    /// Whether the available rune counts cover every rune of the recipe,
    /// counting duplicates.
    pub fn is_possible(&self, available: &BTreeMap<String, u32>) -> bool {
        let mut needed: BTreeMap<&str, u32> = BTreeMap::new();
        for rune in &self.runes {
            *needed.entry(rune.as_str()).or_default() += 1;
        }
        needed
            .into_iter()
            .all(|(code, count)| available.get(code).copied().unwrap_or(0) >= count)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GameData {
    pub armor: BTreeMap<String, String>,
    pub weapons: BTreeMap<String, String>,
    pub misc: BTreeMap<String, String>,
    pub magic_prefixes: BTreeMap<u16, String>,
    pub magic_suffixes: BTreeMap<u16, String>,
    pub rare_prefixes: Vec<String>,
    pub rare_suffixes: Vec<String>,
    pub runewords: Vec<Runeword>,
    pub stat_labels: BTreeMap<u16, String>,
}

impl GameData {
    pub fn builtin() -> Self {
        builtin::game_data()
    }

    pub fn from_json_slice(bytes: &[u8]) -> Result<Self, CoreError> {
        serde_json::from_slice(bytes).map_err(|e| {
            CoreError::new(
                CoreErrorCode::Parse,
                format!("failed to parse game data: {e}"),
            )
        })
    }

    /// Built-in data with every non-empty table of `other` layered on top.
    pub fn merged(mut self, other: GameData) -> Self {
        self.armor.extend(other.armor);
        self.weapons.extend(other.weapons);
        self.misc.extend(other.misc);
        self.magic_prefixes.extend(other.magic_prefixes);
        self.magic_suffixes.extend(other.magic_suffixes);
        self.stat_labels.extend(other.stat_labels);
        if !other.rare_prefixes.is_empty() {
            self.rare_prefixes = other.rare_prefixes;
        }
        if !other.rare_suffixes.is_empty() {
            self.rare_suffixes = other.rare_suffixes;
        }
        if !other.runewords.is_empty() {
            self.runewords = other.runewords;
        }
        self
    }

    pub fn base_name(&self, kind: ItemKind, code: &str) -> Option<&str> {
        let table = match kind {
            ItemKind::Armor => &self.armor,
            ItemKind::Weapon => &self.weapons,
            ItemKind::Misc => &self.misc,
        };
        table.get(code).map(String::as_str)
    }

    pub fn misc_name(&self, code: &str) -> Option<&str> {
        self.misc.get(code).map(String::as_str)
    }

    /// Short rune name, e.g. "Nef" for `r04` ("Nef Rune").
    pub fn rune_name(&self, code: &str) -> Option<&str> {
        self.misc_name(code)
            .and_then(|name| name.split_whitespace().next())
    }

    pub fn stat_label(&self, index: u16) -> Option<&str> {
        self.stat_labels.get(&index).map(String::as_str)
    }

    pub fn magic_prefix(&self, id: u16) -> Option<&str> {
        self.magic_prefixes.get(&id).map(String::as_str)
    }

    pub fn magic_suffix(&self, id: u16) -> Option<&str> {
        self.magic_suffixes.get(&id).map(String::as_str)
    }

    pub fn rare_prefix(&self, index: usize) -> Option<&str> {
        self.rare_prefixes.get(index).map(String::as_str)
    }

    pub fn rare_suffix(&self, index: usize) -> Option<&str> {
        self.rare_suffixes.get(index).map(String::as_str)
    }

    pub fn runewords(&self) -> &[Runeword] {
        &self.runewords
    }

    pub fn runeword(&self, name: &str) -> Option<&Runeword> {
        self.runewords.iter().find(|runeword| runeword.name == name)
    }
}
