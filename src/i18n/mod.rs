//! Record localization: select the translation of a record that best matches
//! a client's ranked language preferences.
//!
//! A record carries its translations under `i18n` (or `I18n`) and names its
//! authoritative language in `PrimaryLanguage`:
//!
//! ```json
//! {
//!   "DomainId": 123,
//!   "PrimaryLanguage": "en-US",
//!   "i18n": [
//!     { "Name": "...", "Language": { "IETF": "en-US", "Code": "en", "Region": "US" } },
//!     { "Name": "...", "Language": { "IETF": "en-GB", "Code": "en", "Region": "GB" } }
//!   ]
//! }
//! ```
//!
//! # Architecture
//!
//! - `tag`: `code[-region]` parsing and case-insensitive matching
//! - `preference`: client preferences and their ranking by quality
//! - `accept_language`: `Accept-Language` header parsing
//! - `record`: translation lookup, primary language and preference resolution
//! - `transform`: whole-record mode, one language merged over the record
//! - `by_field`: per-field mode, one language chosen per field
//!
//! # Example
//!
//! ```rust,ignore
//! use i18n_transform::i18n::{parse_accept_language, transform};
//!
//! let prefs = parse_accept_language("en-GB, en;q=0.8, *;q=0.1");
//! let localized = transform(record, &prefs);
//! ```

mod accept_language;
mod by_field;
mod error;
mod preference;
mod record;
mod tag;
mod transform;

pub use accept_language::parse_accept_language;
pub use by_field::{
    transform_by_field, transform_by_field_into, transform_by_field_into_with, FieldLocalization,
    FieldSpec,
};
pub use error::LocalizeError;
pub use preference::{rank, LanguagePreference, WILDCARD};
pub use record::{
    Record, Translation, TranslationSet, LANGUAGE_KEY, PRIMARY_LANGUAGE_KEY, TRANSLATION_KEYS,
};
pub use tag::LanguageTag;
pub use transform::{transform, transform_into, transform_into_with, try_transform};
