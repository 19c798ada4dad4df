//! Per-field localization: pick a language independently for every requested field.

use crate::i18n::error::LocalizeError;
use crate::i18n::preference::LanguagePreference;
use crate::i18n::record::{Record, Translation, TranslationSet};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use tracing::debug;

/// Fields to localize.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldSpec {
    /// Fields that fall back to the primary translation when no match supplies them
    #[serde(default)]
    pub required: Vec<String>,

    /// Fields left null when no match supplies them
    #[serde(default)]
    pub optional: Vec<String>,
}

impl FieldSpec {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn required<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.required.extend(fields.into_iter().map(Into::into));
        self
    }

    pub fn optional<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.optional.extend(fields.into_iter().map(Into::into));
        self
    }
}

/// Result of a per-field localization.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FieldLocalization {
    /// Every requested field mapped to its chosen value (possibly null)
    pub translations: Record,

    /// IETF tag of the translation each field came from; absent for optional
    /// fields no translation supplied
    pub localization: BTreeMap<String, String>,
}

/// Localize individual fields of a record.
///
/// Each field takes its value from the first matched translation, in
/// preference order, where it is present (not null; empty arrays count).
/// Required fields then fall back to the primary translation; optional ones
/// become null without a localization entry.
///
/// A record without translations has its fields read from the record itself,
/// with no localization entries.
///
/// # Returns
/// * `Ok(FieldLocalization)` with the chosen values and their sources
/// * `Err(LocalizeError::MissingPrimaryTranslation)` if the record's primary
///   language has no translation entry
pub fn transform_by_field(
    record: &Record,
    preferences: &[LanguagePreference],
    fields: &FieldSpec,
) -> Result<FieldLocalization, LocalizeError> {
    let Some(set) = TranslationSet::from_record(record) else {
        return Ok(passthrough(record, fields));
    };

    let primary = set.primary()?;
    let matches = set.matches(preferences)?;
    debug!(
        "Localizing {} field(s) against {} matched translation(s)",
        fields.required.len() + fields.optional.len(),
        matches.len()
    );

    let mut result = FieldLocalization::default();

    for field in &fields.required {
        match first_present(&matches, field) {
            Some((value, ietf)) => result.set(field, value.clone(), Some(ietf)),
            None => {
                let value = primary.fields.get(field).cloned().unwrap_or(Value::Null);
                result.set(field, value, Some(primary.tag.ietf.as_str()));
            }
        }
    }

    for field in &fields.optional {
        match first_present(&matches, field) {
            Some((value, ietf)) => result.set(field, value.clone(), Some(ietf)),
            None => result.set(field, Value::Null, None),
        }
    }

    Ok(result)
}

/// Store the per-field result of `record` under `translations` and
/// `localization` in `destination`.
///
/// `destination` is only modified on success.
pub fn transform_by_field_into(
    record: &Record,
    destination: &mut Record,
    preferences: &[LanguagePreference],
    fields: &FieldSpec,
) -> Result<(), LocalizeError> {
    let result = transform_by_field(record, preferences, fields)?;

    let localization = result
        .localization
        .into_iter()
        .map(|(field, ietf)| (field, Value::String(ietf)))
        .collect();

    destination.insert("translations".to_string(), Value::Object(result.translations));
    destination.insert("localization".to_string(), Value::Object(localization));
    Ok(())
}

/// Completion-callback form of [`transform_by_field_into`].
///
/// `on_done` is called exactly once, before this function returns.
pub fn transform_by_field_into_with<F>(
    record: &Record,
    destination: &mut Record,
    preferences: &[LanguagePreference],
    fields: &FieldSpec,
    on_done: F,
) where
    F: FnOnce(Result<(), LocalizeError>),
{
    on_done(transform_by_field_into(record, destination, preferences, fields));
}

impl FieldLocalization {
    fn set(&mut self, field: &str, value: Value, source: Option<&str>) {
        self.translations.insert(field.to_string(), value);
        match source {
            Some(ietf) => {
                self.localization.insert(field.to_string(), ietf.to_string());
            }
            None => {
                self.localization.remove(field);
            }
        }
    }
}

fn first_present<'t>(
    matches: &'t [&'t Translation<'_>],
    field: &str,
) -> Option<(&'t Value, &'t str)> {
    matches.iter().find_map(|translation| {
        translation
            .fields
            .get(field)
            .filter(|value| !value.is_null())
            .map(|value| (value, translation.tag.ietf.as_str()))
    })
}

fn passthrough(record: &Record, fields: &FieldSpec) -> FieldLocalization {
    let mut result = FieldLocalization::default();
    for field in fields.required.iter().chain(&fields.optional) {
        let value = record.get(field).cloned().unwrap_or(Value::Null);
        result.translations.insert(field.clone(), value);
    }
    result
}
