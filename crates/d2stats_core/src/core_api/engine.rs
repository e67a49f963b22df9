use std::sync::Arc;

use chrono::NaiveTime;
use tracing::{debug, info};

use crate::config::Config;
use crate::equipment::resolve_equipped;
use crate::export::{Hireling, ItemExporter, ItemPayload, SyncRequest, build_sync_request, convert_mercenary};
use crate::game_data::GameData;
use crate::model::{Character, Item, SharedStashTab};
use crate::properties::PropertyRenderer;
use crate::stats::StatsCalculator;
use crate::translation::{Language, Translations};

use super::error::{CoreError, CoreErrorCode};
use super::types::DisplayStats;

/// Lookup tables and options shared by every session.
///
/// Built once at startup; sessions hold cheap clones of the tables.
#[derive(Debug, Clone)]
pub struct Engine {
    game_data: Arc<GameData>,
    translations: Arc<Translations>,
    config: Arc<Config>,
}

#[derive(Debug, Clone)]
pub struct Session {
    character: Character,
    shared_stash: Vec<SharedStashTab>,
    game_data: Arc<GameData>,
    translations: Arc<Translations>,
    config: Arc<Config>,
}

impl Engine {
    pub fn new(game_data: GameData, translations: Translations, config: Config) -> Self {
        Self {
            game_data: Arc::new(game_data),
            translations: Arc::new(translations),
            config: Arc::new(config),
        }
    }

    /// Built-in game data and an empty translation table for the configured
    /// language.
    pub fn with_config(config: Config) -> Result<Self, CoreError> {
        Self::from_sources::<&[u8]>(config, &[], &[])
    }

    /// Built-in game data merged with `game_data` documents, translations
    /// loaded from `translation_sources` in the configured language.
    ///
    /// An unsupported language code fails here, before any character is read.
    pub fn from_sources<B: AsRef<[u8]>>(
        config: Config,
        game_data: &[B],
        translation_sources: &[B],
    ) -> Result<Self, CoreError> {
        let mut data = GameData::builtin();
        for source in game_data {
            data = data.merged(GameData::from_json_slice(source.as_ref())?);
        }
        let translations = Translations::from_json_sources(
            &config.translation.language,
            config.translation.missing_key,
            translation_sources,
        )?;
        info!(
            language = %translations.language(),
            keys = translations.len(),
            runewords = data.runewords().len(),
            "engine ready"
        );
        Ok(Self::new(data, translations, config))
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn game_data(&self) -> &GameData {
        &self.game_data
    }

    pub fn translations(&self) -> &Translations {
        &self.translations
    }

    pub fn language(&self) -> Language {
        self.translations.language()
    }

    pub fn open_bytes<B: AsRef<[u8]>>(&self, bytes: B) -> Result<Session, CoreError> {
        let character: Character = serde_json::from_slice(bytes.as_ref()).map_err(|e| {
            CoreError::new(
                CoreErrorCode::Parse,
                format!("failed to parse character: {e}"),
            )
        })?;
        self.open_character(character)
    }

    pub fn open_character(&self, character: Character) -> Result<Session, CoreError> {
        character.validate()?;
        debug!(
            name = %character.name,
            class = %character.class,
            level = character.level,
            "opened character"
        );
        Ok(Session {
            character,
            shared_stash: Vec::new(),
            game_data: Arc::clone(&self.game_data),
            translations: Arc::clone(&self.translations),
            config: Arc::clone(&self.config),
        })
    }

    pub fn parse_shared_stash<B: AsRef<[u8]>>(bytes: B) -> Result<Vec<SharedStashTab>, CoreError> {
        serde_json::from_slice(bytes.as_ref()).map_err(|e| {
            CoreError::new(
                CoreErrorCode::Parse,
                format!("failed to parse shared stash: {e}"),
            )
        })
    }
}

impl Session {
    pub fn character(&self) -> &Character {
        &self.character
    }

    pub fn shared_stash(&self) -> &[SharedStashTab] {
        &self.shared_stash
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Attach shared-stash tabs. Whether they count is decided by
    /// `stats.include_shared_stash`.
    pub fn with_shared_stash(mut self, tabs: Vec<SharedStashTab>) -> Self {
        self.shared_stash = tabs;
        self
    }

    pub fn display_stats(&self) -> DisplayStats {
        StatsCalculator::new(&self.game_data, &self.config.stats)
            .compute(&self.character, &self.shared_stash)
    }

    pub fn display_stats_at(&self, now: NaiveTime) -> DisplayStats {
        StatsCalculator::new(&self.game_data, &self.config.stats)
            .compute_at(&self.character, &self.shared_stash, now)
    }

    pub fn equipped_items(&self) -> Vec<&Item> {
        resolve_equipped(&self.character)
    }

    /// Rendered property lines for one item, at the character's level.
    pub fn item_properties(&self, item: &Item) -> Vec<String> {
        PropertyRenderer::new(&self.game_data, &self.translations)
            .item_properties(item, self.character.level)
    }

    pub fn item_payloads(&self, equipment_only: bool) -> Vec<ItemPayload> {
        self.exporter()
            .convert_items(&self.character.items, equipment_only, false, self.character.level)
    }

    pub fn hireling(&self) -> Option<Hireling> {
        let exporter = self.exporter();
        let difficulty = self.character.current_difficulty();
        self.character
            .mercenary
            .as_ref()
            .map(|mercenary| convert_mercenary(mercenary, difficulty, &self.translations, &exporter))
    }

    pub fn sync_request(&self) -> SyncRequest {
        let stats = self.display_stats();
        build_sync_request(
            &self.character,
            &stats,
            &self.translations,
            &self.exporter(),
            &self.config.sync,
            self.config.export.equipment_only,
        )
    }

    fn exporter(&self) -> ItemExporter<'_> {
        ItemExporter::new(&self.game_data, &self.translations, &self.config.export)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn malformed_character_is_a_parse_error() {
        let engine = Engine::with_config(Config::default()).expect("default engine");
        let err = engine
            .open_bytes(br#"{"name": "Trunc"#)
            .expect_err("truncated json should fail");
        assert_eq!(err.code, CoreErrorCode::Parse);
    }

    #[test]
    fn invalid_level_is_a_validation_error() {
        let engine = Engine::with_config(Config::default()).expect("default engine");
        let err = engine
            .open_bytes(br#"{"name": "Zero", "class": "Amazon", "level": 0}"#)
            .expect_err("level 0 should fail");
        assert_eq!(err.code, CoreErrorCode::Validation);
    }

    #[test]
    fn unsupported_language_fails_at_startup() {
        let mut config = Config::default();
        config.translation.language = "xxXX".to_string();
        let err = Engine::with_config(config).expect_err("unknown language should fail");
        assert_eq!(err.code, CoreErrorCode::UnsupportedLanguage);
    }

    #[test]
    fn shared_stash_parses_tab_list() {
        let tabs = Engine::parse_shared_stash(br#"[{"gold": 100, "items": []}, {"gold": 5}]"#)
            .expect("stash should parse");
        assert_eq!(tabs.len(), 2);
        assert_eq!(tabs[1].gold, 5);
    }
}
