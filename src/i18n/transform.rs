//! Whole-record localization: merge one selected translation into the record.

use crate::i18n::error::LocalizeError;
use crate::i18n::preference::LanguagePreference;
use crate::i18n::record::{Record, TranslationSet};
use tracing::debug;

/// Localize a record into the single best-matching language.
///
/// The selected translation's fields are merged over the record (translation
/// fields win on collision) and the translations array is removed. A record
/// without translations is returned unchanged.
///
/// # Arguments
/// * `record` - The record to localize
/// * `preferences` - Client preferences, in any order; the slice is not modified
///
/// # Returns
/// * `Some(Record)` with the localized record
/// * `None` if no acceptable language could be found
///
/// # Example
/// ```ignore
/// let prefs = parse_accept_language("en-US, fr;q=0.8");
/// let localized = transform(record, &prefs).ok_or(NotAcceptable)?;
/// ```
pub fn transform(record: Record, preferences: &[LanguagePreference]) -> Option<Record> {
    match try_transform(record, preferences) {
        Ok(localized) => Some(localized),
        Err(e) => {
            debug!("Record not localized: {}", e);
            None
        }
    }
}

/// Like [`transform`], but reports why no language was selected.
pub fn try_transform(
    mut record: Record,
    preferences: &[LanguagePreference],
) -> Result<Record, LocalizeError> {
    let selection = match TranslationSet::from_record(&record) {
        Some(set) => Some((set.alias(), set.select(preferences)?.fields.clone())),
        None => None,
    };
    let Some((alias, selected)) = selection else {
        return Ok(record);
    };

    record.extend(selected);
    record.remove(alias);
    Ok(record)
}

/// Merge the best-matching translation of `record` into `destination`.
///
/// `destination` is only modified on success. A record without translations
/// leaves it untouched and succeeds.
///
/// # Returns
/// * `Ok(())` once the selected fields are merged
/// * `Err(LocalizeError)` carrying the requested preferences otherwise
pub fn transform_into(
    record: &Record,
    destination: &mut Record,
    preferences: &[LanguagePreference],
) -> Result<(), LocalizeError> {
    let Some(set) = TranslationSet::from_record(record) else {
        return Ok(());
    };

    let selected = set.select(preferences).map_err(|e| match e {
        LocalizeError::MissingPrimaryTranslation { .. } => LocalizeError::NoMatchFound {
            requested: preferences.to_vec(),
        },
        other => other,
    })?;

    destination.extend(selected.fields.iter().map(|(k, v)| (k.clone(), v.clone())));
    Ok(())
}

/// Completion-callback form of [`transform_into`].
///
/// `on_done` is called exactly once, before this function returns.
pub fn transform_into_with<F>(
    record: &Record,
    destination: &mut Record,
    preferences: &[LanguagePreference],
    on_done: F,
) where
    F: FnOnce(Result<(), LocalizeError>),
{
    on_done(transform_into(record, destination, preferences));
}
