//! `Accept-Language` header parsing.
//!
//! Turns `en-US, fr;q=0.8, *;q=0.1` into the preference list the
//! localization functions take. Entries keep header order; ranking by
//! quality happens during selection.

use crate::i18n::preference::LanguagePreference;
use crate::i18n::tag::LanguageTag;

/// Parse an `Accept-Language` header value.
///
/// # Arguments
/// * `header` - Raw header value
///
/// # Returns
/// One preference per acceptable entry. Entries without `q` get quality 1.0,
/// out-of-range qualities are clamped to `[0, 1]` and an unparsable `q` is
/// ignored. Empty entries and entries with `q=0` are dropped.
///
/// # Example
/// ```ignore
/// let prefs = parse_accept_language("en-US, fr;q=0.8");
/// assert_eq!(prefs[1].quality, Some(0.8));
/// ```
pub fn parse_accept_language(header: &str) -> Vec<LanguagePreference> {
    header.split(',').filter_map(parse_entry).collect()
}

fn parse_entry(entry: &str) -> Option<LanguagePreference> {
    let mut parts = entry.split(';');
    let tag = parts.next()?.trim();
    if tag.is_empty() {
        return None;
    }

    let mut quality = 1.0;
    for param in parts {
        if let Some((key, value)) = param.split_once('=') {
            if key.trim().eq_ignore_ascii_case("q") {
                if let Ok(q) = value.trim().parse::<f64>() {
                    quality = q.clamp(0.0, 1.0);
                }
            }
        }
    }

    if quality == 0.0 {
        return None;
    }

    let LanguageTag { code, region, .. } = LanguageTag::parse(tag);
    Some(LanguagePreference {
        code,
        region,
        quality: Some(quality),
    })
}
