//! Options read from a JSON config document.
//!
//! Every field has a default, so an empty object `{}` is a valid config.

use serde::{Deserialize, Serialize};

use crate::core_api::{CoreError, CoreErrorCode};
use crate::translation::MissingKeyPolicy;

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub stats: StatsOptions,
    pub export: ExportOptions,
    pub translation: TranslationOptions,
    pub sync: SyncOptions,
}

impl Config {
    pub fn from_json_slice(bytes: &[u8]) -> Result<Self, CoreError> {
        serde_json::from_slice(bytes).map_err(|e| {
            CoreError::new(CoreErrorCode::Parse, format!("failed to parse config: {e}"))
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StatsOptions {
    /// Hide runewords the character already has assembled.
    pub remove_duplicate_runeword: bool,
    /// Count shared-stash tab items and gold.
    pub include_shared_stash: bool,
    /// Render rune counts as `Tal x3` instead of `Tal (3)`.
    pub runes_with_x: bool,
}

impl Default for StatsOptions {
    fn default() -> Self {
        Self {
            remove_duplicate_runeword: true,
            include_shared_stash: false,
            runes_with_x: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ExportOptions {
    pub translate_base_names: bool,
    pub equipment_only: bool,
    /// Item codes exported even when they would normally be skipped.
    pub always_share_these_item_codes: Vec<String>,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            translate_base_names: false,
            equipment_only: true,
            always_share_these_item_codes: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TranslationOptions {
    pub language: String,
    pub missing_key: MissingKeyPolicy,
}

impl Default for TranslationOptions {
    fn default() -> Self {
        Self {
            language: "enUS".to_string(),
            missing_key: MissingKeyPolicy::ReturnKey,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SyncOptions {
    pub api_key: String,
    /// Characters whose name contains any of these are never synced.
    pub ignore_names_that_contain: Vec<String>,
}

impl Default for SyncOptions {
    fn default() -> Self {
        Self {
            api_key: "NoKeySpecified".to_string(),
            ignore_names_that_contain: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_uses_defaults() {
        let config = Config::from_json_slice(b"{}").expect("empty config should parse");
        assert_eq!(config, Config::default());
        assert!(config.stats.remove_duplicate_runeword);
        assert!(config.export.equipment_only);
        assert_eq!(config.translation.language, "enUS");
    }

    #[test]
    fn partial_sections_keep_other_defaults() {
        let config = Config::from_json_slice(
            br#"{"stats": {"runes_with_x": true}, "translation": {"missing_key": "not_found"}}"#,
        )
        .expect("config should parse");
        assert!(config.stats.runes_with_x);
        assert!(config.stats.remove_duplicate_runeword);
        assert_eq!(config.translation.missing_key, MissingKeyPolicy::NotFound);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let err = Config::from_json_slice(br#"{"stats": {"runes_with_y": true}}"#)
            .expect_err("unknown key should fail");
        assert_eq!(err.code, CoreErrorCode::Parse);
    }
}
