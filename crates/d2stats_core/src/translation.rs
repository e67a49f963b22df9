//! Localized string lookup.
//!
//! Translation sources are JSON arrays of entries carrying an `id`, a `Key`
//! and one field per language code. The table is filled once at start-up and
//! only read afterwards, so it can be shared across threads behind an `Arc`.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::core_api::{CoreError, CoreErrorCode};

pub const NOT_FOUND: &str = "NOT_FOUND";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Language {
    EnUs,
    ZhTw,
    DeDe,
    EsEs,
    FrFr,
    ItIt,
    KoKr,
    PlPl,
    EsMx,
    JaJp,
    PtBr,
    RuRu,
    ZhCn,
}

impl Language {
    pub const ALL: [Language; 13] = [
        Self::EnUs,
        Self::ZhTw,
        Self::DeDe,
        Self::EsEs,
        Self::FrFr,
        Self::ItIt,
        Self::KoKr,
        Self::PlPl,
        Self::EsMx,
        Self::JaJp,
        Self::PtBr,
        Self::RuRu,
        Self::ZhCn,
    ];

    pub fn code(&self) -> &'static str {
        match *self {
            Self::EnUs => "enUS",
            Self::ZhTw => "zhTW",
            Self::DeDe => "deDE",
            Self::EsEs => "esES",
            Self::FrFr => "frFR",
            Self::ItIt => "itIT",
            Self::KoKr => "koKR",
            Self::PlPl => "plPL",
            Self::EsMx => "esMX",
            Self::JaJp => "jaJP",
            Self::PtBr => "ptBR",
            Self::RuRu => "ruRU",
            Self::ZhCn => "zhCN",
        }
    }
}

impl FromStr for Language {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|language| language.code() == s)
            .ok_or_else(|| {
                CoreError::new(
                    CoreErrorCode::UnsupportedLanguage,
                    format!("unsupported language '{s}'"),
                )
            })
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// What a lookup of an unknown key returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MissingKeyPolicy {
    #[default]
    ReturnKey,
    NotFound,
}

/// One row of a translation source file.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct TranslationEntry {
    #[serde(default)]
    pub id: Option<u32>,
    #[serde(rename = "Key")]
    pub key: String,
    #[serde(rename = "enUS", default)]
    pub en_us: Option<String>,
    #[serde(rename = "zhTW", default)]
    pub zh_tw: Option<String>,
    #[serde(rename = "deDE", default)]
    pub de_de: Option<String>,
    #[serde(rename = "esES", default)]
    pub es_es: Option<String>,
    #[serde(rename = "frFR", default)]
    pub fr_fr: Option<String>,
    #[serde(rename = "itIT", default)]
    pub it_it: Option<String>,
    #[serde(rename = "koKR", default)]
    pub ko_kr: Option<String>,
    #[serde(rename = "plPL", default)]
    pub pl_pl: Option<String>,
    #[serde(rename = "esMX", default)]
    pub es_mx: Option<String>,
    #[serde(rename = "jaJP", default)]
    pub ja_jp: Option<String>,
    #[serde(rename = "ptBR", default)]
    pub pt_br: Option<String>,
    #[serde(rename = "ruRU", default)]
    pub ru_ru: Option<String>,
    #[serde(rename = "zhCN", default)]
    pub zh_cn: Option<String>,
}

impl TranslationEntry {
    pub fn value_for(&self, language: Language) -> Option<&str> {
        let value = match language {
            Language::EnUs => &self.en_us,
            Language::ZhTw => &self.zh_tw,
            Language::DeDe => &self.de_de,
            Language::EsEs => &self.es_es,
            Language::FrFr => &self.fr_fr,
            Language::ItIt => &self.it_it,
            Language::KoKr => &self.ko_kr,
            Language::PlPl => &self.pl_pl,
            Language::EsMx => &self.es_mx,
            Language::JaJp => &self.ja_jp,
            Language::PtBr => &self.pt_br,
            Language::RuRu => &self.ru_ru,
            Language::ZhCn => &self.zh_cn,
        };
        value.as_deref()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Translations {
    language: Language,
    missing_key: MissingKeyPolicy,
    entries: HashMap<String, String>,
}

impl Translations {
    pub fn empty(language: Language, missing_key: MissingKeyPolicy) -> Self {
        Self {
            language,
            missing_key,
            entries: HashMap::new(),
        }
    }

    /// Build from raw JSON sources, later sources overriding earlier ones.
    pub fn from_json_sources<B: AsRef<[u8]>>(
        language: &str,
        missing_key: MissingKeyPolicy,
        sources: &[B],
    ) -> Result<Self, CoreError> {
        let language = Language::from_str(language)?;
        let mut entries = Vec::new();
        for (n, source) in sources.iter().enumerate() {
            let parsed: Vec<TranslationEntry> = serde_json::from_slice(source.as_ref())
                .map_err(|e| {
                    CoreError::new(
                        CoreErrorCode::Parse,
                        format!("failed to parse translation source #{n}: {e}"),
                    )
                })?;
            entries.extend(parsed);
        }
        Ok(Self::from_entries(language, missing_key, entries))
    }

    pub fn from_entries<I>(language: Language, missing_key: MissingKeyPolicy, entries: I) -> Self
    where
        I: IntoIterator<Item = TranslationEntry>,
    {
        let mut out = Self::empty(language, missing_key);
        for entry in entries {
            let Some(value) = entry.value_for(language) else {
                debug!(key = %entry.key, %language, "entry has no value for language");
                continue;
            };
            let value = strip_variant_tags(value).to_string();
            out.entries.insert(fix_key(&entry.key).to_string(), value);
        }
        out
    }

    /// Direct key/value pairs, already in the target language.
    pub fn from_pairs<I, K, V>(language: Language, missing_key: MissingKeyPolicy, pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut out = Self::empty(language, missing_key);
        out.entries
            .extend(pairs.into_iter().map(|(k, v)| (k.into(), v.into())));
        out
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn lookup(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// Localized value for `key`, falling back per the missing-key policy.
    pub fn translate<'a>(&'a self, key: &'a str) -> &'a str {
        if let Some(value) = self.lookup(key) {
            return value;
        }
        warn!(key, language = %self.language, "missing translation");
        match self.missing_key {
            MissingKeyPolicy::ReturnKey => key,
            MissingKeyPolicy::NotFound => NOT_FOUND,
        }
    }
}

// One key in the shipped string tables is misspelled.
fn fix_key(key: &str) -> &str {
    if key == "skillsname61" {
        "skillname61"
    } else {
        key
    }
}

/// Drop grammatical variant tags such as `[ms]Name[fs]Other`, keeping the
/// first variant. Tags are four characters wide.
pub fn strip_variant_tags(value: &str) -> &str {
    if !value.starts_with('[') {
        return value;
    }
    let rest = value.get(4..).unwrap_or("");
    match rest.find('[') {
        Some(end) => &rest[..end],
        None => rest,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SOURCE: &str = r#"[
        {"id": 1, "Key": "rin", "enUS": "Ring", "deDE": "[fs]Ring[ms]Ringe"},
        {"id": 2, "Key": "skillsname61", "enUS": "Fire Ball"},
        {"id": 3, "Key": "amu", "enUS": "Amulet"}
    ]"#;

    #[test]
    fn unsupported_language_is_fatal() {
        let err = Translations::from_json_sources("xxXX", MissingKeyPolicy::ReturnKey, &[SOURCE])
            .expect_err("language should be rejected");
        assert_eq!(err.code, CoreErrorCode::UnsupportedLanguage);
    }

    #[test]
    fn loads_selected_language_and_strips_tags() {
        let t = Translations::from_json_sources("deDE", MissingKeyPolicy::ReturnKey, &[SOURCE])
            .expect("source should parse");
        assert_eq!(t.translate("rin"), "Ring");
        assert_eq!(t.len(), 1);
    }

    #[test]
    fn misspelled_skill_key_is_corrected() {
        let t = Translations::from_json_sources("enUS", MissingKeyPolicy::ReturnKey, &[SOURCE])
            .expect("source should parse");
        assert_eq!(t.translate("skillname61"), "Fire Ball");
        assert_eq!(t.lookup("skillsname61"), None);
    }

    #[test]
    fn missing_keys_follow_policy() {
        let keyed = Translations::empty(Language::EnUs, MissingKeyPolicy::ReturnKey);
        assert_eq!(keyed.translate("nope"), "nope");
        let sentinel = Translations::empty(Language::EnUs, MissingKeyPolicy::NotFound);
        assert_eq!(sentinel.translate("nope"), NOT_FOUND);
    }

    #[test]
    fn variant_tags() {
        assert_eq!(strip_variant_tags("plain"), "plain");
        assert_eq!(strip_variant_tags("[ms]Schwert[fs]Klinge"), "Schwert");
        assert_eq!(strip_variant_tags("[fs]Axt"), "Axt");
        assert_eq!(strip_variant_tags("[x"), "");
    }
}
