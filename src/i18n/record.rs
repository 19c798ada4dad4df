//! Record view: the translation array, the primary language and preference resolution.
//!
//! A record keeps its translations under `i18n` or, in older documents,
//! `I18n`. The alias found is remembered so the same key can be stripped
//! from the output.

use crate::i18n::error::LocalizeError;
use crate::i18n::preference::{rank, LanguagePreference};
use crate::i18n::tag::LanguageTag;
use serde_json::{Map, Value};
use tracing::{debug, warn};

/// A JSON object record.
pub type Record = Map<String, Value>;

/// Accepted spellings of the translations field, in lookup order.
pub const TRANSLATION_KEYS: [&str; 2] = ["i18n", "I18n"];

/// Field naming the record's authoritative language.
pub const PRIMARY_LANGUAGE_KEY: &str = "PrimaryLanguage";

/// Field of a translation entry holding its language tag.
pub const LANGUAGE_KEY: &str = "Language";

/// One usable entry of the translation array.
#[derive(Debug, Clone)]
pub struct Translation<'a> {
    /// Position in the record's translation array
    pub index: usize,
    pub tag: LanguageTag,
    pub fields: &'a Record,
}

/// Where a single preference points.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Resolution {
    /// The record's primary translation
    Primary,
    /// An entry of `TranslationSet::entries`
    Entry(usize),
}

/// Borrowed view over a record's translations.
#[derive(Debug)]
pub struct TranslationSet<'a> {
    alias: &'static str,
    primary_language: Option<&'a str>,
    entries: Vec<Translation<'a>>,
}

impl<'a> TranslationSet<'a> {
    /// Locate the translations of a record.
    ///
    /// # Returns
    /// * `Some(TranslationSet)` if the record has an `i18n` or `I18n` field
    /// * `None` if it has neither, meaning the record passes through untouched
    pub fn from_record(record: &'a Record) -> Option<Self> {
        let (alias, value) = TRANSLATION_KEYS
            .iter()
            .find_map(|key| record.get(*key).map(|value| (*key, value)))?;

        let entries = match value.as_array() {
            Some(items) => items
                .iter()
                .enumerate()
                .filter_map(|(index, item)| Self::read_entry(index, item))
                .collect(),
            None => {
                warn!("Translations field '{}' is not an array, ignoring it", alias);
                Vec::new()
            }
        };

        Some(Self {
            alias,
            // An empty tag names no language
            primary_language: record
                .get(PRIMARY_LANGUAGE_KEY)
                .and_then(Value::as_str)
                .filter(|tag| !tag.is_empty()),
            entries,
        })
    }

    fn read_entry(index: usize, item: &'a Value) -> Option<Translation<'a>> {
        let Some(fields) = item.as_object() else {
            warn!("Translation entry {} is not an object, skipping", index);
            return None;
        };

        let Some(tag) = fields.get(LANGUAGE_KEY).and_then(LanguageTag::from_language_object)
        else {
            warn!("Translation entry {} has no usable language tag, skipping", index);
            return None;
        };

        Some(Translation { index, tag, fields })
    }

    /// Key under which the translations were found.
    pub fn alias(&self) -> &'static str {
        self.alias
    }

    /// The record's declared primary language, if any.
    pub fn primary_language(&self) -> Option<&'a str> {
        self.primary_language
    }

    pub fn entries(&self) -> &[Translation<'a>] {
        &self.entries
    }

    /// The authoritative translation of the record.
    ///
    /// With a declared primary language this is the entry carrying that IETF
    /// tag (the last one, if several do). Without one it is the first entry.
    ///
    /// # Returns
    /// * `Ok(&Translation)` if such an entry exists
    /// * `Err(LocalizeError::MissingPrimaryTranslation)` otherwise
    pub fn primary(&self) -> Result<&Translation<'a>, LocalizeError> {
        let found = match self.primary_language {
            Some(primary) => self.entries.iter().rev().find(|t| t.tag.is_ietf(primary)),
            None => self.entries.first(),
        };

        found.ok_or_else(|| LocalizeError::MissingPrimaryTranslation {
            primary: self.primary_language.map(str::to_string),
        })
    }

    /// Resolve one preference without consulting the primary entry yet.
    fn resolve(&self, preference: &LanguagePreference) -> Option<Resolution> {
        if preference.is_wildcard() {
            return Some(Resolution::Primary);
        }

        if preference.region.is_none() {
            if let Some(primary) = self.primary_language {
                if LanguageTag::parse(primary).code_matches(&preference.code) {
                    return Some(Resolution::Primary);
                }
            }
        }

        self.entries
            .iter()
            .position(|t| t.tag.matches(&preference.code, preference.region.as_deref()))
            .map(Resolution::Entry)
    }

    fn lookup(&self, resolution: Resolution) -> Result<&Translation<'a>, LocalizeError> {
        match resolution {
            Resolution::Primary => self.primary(),
            Resolution::Entry(position) => Ok(&self.entries[position]),
        }
    }

    /// Pick the single best translation for the given preferences.
    ///
    /// An empty list selects the primary translation. Otherwise the first
    /// preference, in descending quality, that resolves to anything wins.
    ///
    /// # Returns
    /// * `Ok(&Translation)` with the selected entry
    /// * `Err(LocalizeError::NoMatchFound)` if no preference resolves
    /// * `Err(LocalizeError::MissingPrimaryTranslation)` if the winner is the
    ///   primary language and the record has no entry for it
    pub fn select(
        &self,
        preferences: &[LanguagePreference],
    ) -> Result<&Translation<'a>, LocalizeError> {
        if preferences.is_empty() {
            debug!("No language preferences given, using primary translation");
            return self.primary();
        }

        let resolution = rank(preferences)
            .into_iter()
            .find_map(|preference| self.resolve(preference))
            .ok_or_else(|| LocalizeError::NoMatchFound {
                requested: preferences.to_vec(),
            })?;

        let selected = self.lookup(resolution)?;
        debug!("Selected translation '{}'", selected.tag.ietf);
        Ok(selected)
    }

    /// Every translation matched by the preferences, in preference order.
    ///
    /// Unlike [`select`](Self::select) this keeps all matches, so the same
    /// entry may appear more than once. An empty list yields the primary
    /// translation alone.
    pub fn matches(
        &self,
        preferences: &[LanguagePreference],
    ) -> Result<Vec<&Translation<'a>>, LocalizeError> {
        if preferences.is_empty() {
            return Ok(vec![self.primary()?]);
        }

        rank(preferences)
            .into_iter()
            .filter_map(|preference| self.resolve(preference))
            .map(|resolution| self.lookup(resolution))
            .collect()
    }
}
