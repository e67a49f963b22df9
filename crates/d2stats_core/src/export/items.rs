use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::config::ExportOptions;
use crate::game_data::GameData;
use crate::model::{Item, ItemContainer, ItemKind, ItemLocation, ItemQuality};
use crate::properties::PropertyRenderer;
use crate::translation::{NOT_FOUND, Translations};

const QUEST_CODES: &[&str] = &["leg", "hdm", "hst", "vip", "msf", "g33", "hfh"];
const MERCENARY_CONTAINER: i32 = 10;
const RARE_PREFIX_OFFSET: i32 = 156;

/// Colour class used by the sync service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SyncQuality {
    None,
    White,
    Blue,
    Green,
    Yellow,
    Gold,
    Orange,
}

impl From<ItemQuality> for SyncQuality {
    fn from(quality: ItemQuality) -> Self {
        match quality {
            ItemQuality::None | ItemQuality::Unknown => Self::None,
            ItemQuality::Inferior | ItemQuality::Normal | ItemQuality::Superior => Self::White,
            ItemQuality::Magic => Self::Blue,
            ItemQuality::Set => Self::Green,
            ItemQuality::Rare => Self::Yellow,
            ItemQuality::Unique => Self::Gold,
            ItemQuality::Craft => Self::Orange,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ItemPlacement {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
    pub body_location: i32,
    pub container: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ItemPayload {
    #[serde(rename = "GUID")]
    pub guid: u32,
    pub class: i32,
    pub base_item: String,
    pub item_name: String,
    pub quality: SyncQuality,
    pub properties: Vec<String>,
    pub location: ItemPlacement,
}

pub struct ItemExporter<'a> {
    game_data: &'a GameData,
    translations: &'a Translations,
    options: &'a ExportOptions,
}

impl<'a> ItemExporter<'a> {
    pub fn new(
        game_data: &'a GameData,
        translations: &'a Translations,
        options: &'a ExportOptions,
    ) -> Self {
        Self {
            game_data,
            translations,
            options,
        }
    }

    pub fn convert_items<'i, I>(
        &self,
        items: I,
        equipped_only: bool,
        mercenary: bool,
        level: u8,
    ) -> Vec<ItemPayload>
    where
        I: IntoIterator<Item = &'i Item>,
    {
        let renderer = PropertyRenderer::new(self.game_data, self.translations);
        items
            .into_iter()
            .filter(|item| !equipped_only || item.location == ItemLocation::Equipped)
            .filter(|item| self.is_shared(item))
            .map(|item| {
                let base_item = self.base_name(item);
                ItemPayload {
                    guid: guid(item),
                    class: item_class(item),
                    item_name: self.item_name(item, &base_item),
                    base_item,
                    quality: quality(item),
                    properties: renderer.item_properties(item, level),
                    location: ItemPlacement {
                        x: item.x,
                        y: item.y,
                        width: item.inv_width,
                        height: item.inv_height,
                        body_location: item.position.body_location(),
                        container: container_id(item, mercenary),
                    },
                }
            })
            .collect()
    }

    // Consumables, gems, keys and the cube are left out unless allow-listed.
    fn is_shared(&self, item: &Item) -> bool {
        let skipped = item.item_name.contains("Potion")
            || item.is_scroll()
            || item.is_tome()
            || item.is_gem()
            || item.item_name == "Key"
            || item.item_name == "Horadric Cube";
        if !skipped {
            return true;
        }
        let allowed = self
            .options
            .always_share_these_item_codes
            .iter()
            .any(|code| *code == item.code);
        if allowed {
            debug!(code = %item.code, "sharing allow-listed item");
        }
        allowed
    }

    pub fn base_name(&self, item: &Item) -> String {
        let base = if self.options.translate_base_names {
            Some(self.translations.translate(&item.code))
        } else {
            self.game_data.base_name(item.kind, &item.code)
        };
        match base {
            Some(name) if name != NOT_FOUND => name.to_string(),
            _ => item.item_name.clone(),
        }
    }

    pub fn item_name(&self, item: &Item, base_name: &str) -> String {
        let t = self.translations;
        if item.runeword {
            let label = self
                .game_data
                .runeword(&item.item_name)
                .map(|runeword| runeword.label.as_str())
                .unwrap_or(item.item_name.as_str());
            let runes: Vec<String> = item
                .socketed_items
                .iter()
                .map(|rune| t.translate(&format!("{}L", rune.code)).to_string())
                .collect();
            return format!("{base_name} [{} ({})]", t.translate(label), runes.join(" + "));
        }

        match item.quality {
            ItemQuality::Magic => {
                let prefix = item
                    .prefix_ids
                    .first()
                    .and_then(|id| self.game_data.magic_prefix(*id))
                    .map(|name| format!("{} ", t.translate(name)))
                    .unwrap_or_default();
                let suffix = item
                    .suffix_ids
                    .first()
                    .and_then(|id| self.game_data.magic_suffix(*id))
                    .map(|name| format!(" {}", t.translate(name)))
                    .unwrap_or_default();
                format!("{prefix}{}{suffix}", t.translate(&item.code))
            }
            ItemQuality::Rare | ItemQuality::Craft => {
                let prefix = usize::try_from(item.rare_name_id1 - RARE_PREFIX_OFFSET)
                    .ok()
                    .and_then(|index| self.game_data.rare_prefix(index));
                let suffix = usize::try_from(item.rare_name_id2 - 1)
                    .ok()
                    .and_then(|index| self.game_data.rare_suffix(index));
                match (prefix, suffix) {
                    (Some(prefix), Some(suffix)) => {
                        format!("{} {}", t.translate(prefix), t.translate(suffix))
                    }
                    _ => {
                        warn!(
                            code = %item.code,
                            id1 = item.rare_name_id1,
                            id2 = item.rare_name_id2,
                            "rare name ids out of range"
                        );
                        t.translate(&item.code).to_string()
                    }
                }
            }
            ItemQuality::Set => t.translate(&item.item_name).to_string(),
            ItemQuality::Unique => format!("{base_name} [{}]", t.translate(&item.item_name)),
            _ => t.translate(&item.code).to_string(),
        }
    }
}

fn guid(item: &Item) -> u32 {
    match item.guid.as_deref() {
        None => 0,
        Some(raw) => raw.parse().unwrap_or_else(|_| {
            warn!(guid = raw, code = %item.code, "unparseable item guid");
            0
        }),
    }
}

pub fn item_class(item: &Item) -> i32 {
    if item.type_code == "ring" || item.type_code == "amul" {
        return 4;
    }
    match item.kind {
        ItemKind::Armor => 1,
        ItemKind::Weapon => 3,
        ItemKind::Misc => 2,
    }
}

pub fn quality(item: &Item) -> SyncQuality {
    if item.is_rune() {
        return SyncQuality::Orange;
    }
    if is_quest_item(item) {
        return SyncQuality::Gold;
    }
    SyncQuality::from(item.quality)
}

fn is_quest_item(item: &Item) -> bool {
    item.type_code == "ques"
        || item.code.starts_with("qf")
        || QUEST_CODES.contains(&item.code.as_str())
}

pub fn container_id(item: &Item, mercenary: bool) -> i32 {
    if mercenary {
        return MERCENARY_CONTAINER;
    }
    match (item.location, item.container) {
        (ItemLocation::Equipped, _) => 0,
        (ItemLocation::Belt, _) => 1,
        (_, ItemContainer::Inventory) => 2,
        (_, ItemContainer::HoradricCube) => 5,
        (_, ItemContainer::Stash) => 6,
        (location, container) => {
            warn!(?location, ?container, "unknown item container, reporting as stash");
            6
        }
    }
}
