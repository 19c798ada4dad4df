//! Errors raised while localizing a record.

use crate::i18n::preference::{describe, LanguagePreference};
use thiserror::Error;

/// Errors that can occur when selecting a translation for a record
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LocalizeError {
    /// None of the requested languages resolved to a translation
    #[error("Could not find desired language (requested: {})", describe(.requested))]
    NoMatchFound { requested: Vec<LanguagePreference> },

    /// The record's primary language has no translation entry
    #[error("Primary translations are not available{}", primary_suffix(.primary))]
    MissingPrimaryTranslation { primary: Option<String> },
}

fn primary_suffix(primary: &Option<String>) -> String {
    match primary {
        Some(tag) => format!(" (primary language: {})", tag),
        None => String::new(),
    }
}
