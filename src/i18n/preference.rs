//! Client language preferences and their ranking.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Code used by a preference that accepts any language.
pub const WILDCARD: &str = "*";

/// One entry of a client's ranked language list.
///
/// Mirrors an `Accept-Language` item: `en-US;q=0.8` becomes
/// `{ code: "en", region: Some("US"), quality: Some(0.8) }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LanguagePreference {
    /// Language code, or `*` for any language
    pub code: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,

    /// Relative weight; a missing quality ranks below every explicit one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quality: Option<f64>,
}

impl LanguagePreference {
    /// Create a region-less preference without a quality.
    pub fn new(code: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            region: None,
            quality: None,
        }
    }

    /// Create the `*` preference.
    pub fn wildcard() -> Self {
        Self::new(WILDCARD)
    }

    /// Set the region.
    pub fn with_region(mut self, region: impl Into<String>) -> Self {
        self.region = Some(region.into());
        self
    }

    /// Set the quality.
    pub fn with_quality(mut self, quality: f64) -> Self {
        self.quality = Some(quality);
        self
    }

    /// Check if this preference accepts any language.
    pub fn is_wildcard(&self) -> bool {
        self.code == WILDCARD
    }

    fn rank_key(&self) -> f64 {
        self.quality
            .filter(|quality| !quality.is_nan())
            .unwrap_or(f64::NEG_INFINITY)
    }
}

impl fmt::Display for LanguagePreference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code)?;
        if let Some(region) = &self.region {
            write!(f, "-{}", region)?;
        }
        if let Some(quality) = self.quality {
            write!(f, ";q={}", quality)?;
        }
        Ok(())
    }
}

/// Order preferences by descending quality without touching the caller's list.
///
/// The sort is stable, so entries of equal quality keep their input order.
/// Preferences without a quality sort after all others.
pub fn rank(preferences: &[LanguagePreference]) -> Vec<&LanguagePreference> {
    let mut ranked: Vec<&LanguagePreference> = preferences.iter().collect();
    ranked.sort_by(|a, b| b.rank_key().total_cmp(&a.rank_key()));
    ranked
}

/// Render a preference list for diagnostics, e.g. `es-MX;q=1, *;q=0.1`.
pub fn describe(preferences: &[LanguagePreference]) -> String {
    if preferences.is_empty() {
        return "(none)".to_string();
    }

    preferences
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn codes(ranked: &[&LanguagePreference]) -> Vec<String> {
        ranked.iter().map(|p| p.to_string()).collect()
    }

    // ==================== Construction Tests ====================

    #[test]
    fn test_builder() {
        let pref = LanguagePreference::new("en").with_region("US").with_quality(0.8);
        assert_eq!(pref.code, "en");
        assert_eq!(pref.region.as_deref(), Some("US"));
        assert_eq!(pref.quality, Some(0.8));
        assert!(!pref.is_wildcard());
    }

    #[test]
    fn test_wildcard() {
        assert!(LanguagePreference::wildcard().is_wildcard());
        assert!(LanguagePreference::new("*").with_quality(0.1).is_wildcard());
    }

    #[test]
    fn test_deserialize_without_optional_members() {
        let pref: LanguagePreference =
            serde_json::from_str(r#"{"code": "*"}"#).expect("Should deserialize");
        assert!(pref.is_wildcard());
        assert!(pref.region.is_none());
        assert!(pref.quality.is_none());
    }

    #[test]
    fn test_display() {
        let pref = LanguagePreference::new("es").with_region("MX").with_quality(1.0);
        assert_eq!(pref.to_string(), "es-MX;q=1");
        assert_eq!(LanguagePreference::wildcard().to_string(), "*");
    }

    // ==================== Ranking Tests ====================

    #[test]
    fn test_rank_descending_quality() {
        let prefs = vec![
            LanguagePreference::new("en").with_region("US").with_quality(0.6),
            LanguagePreference::new("de").with_region("DE").with_quality(1.0),
            LanguagePreference::new("en").with_quality(0.4),
            LanguagePreference::wildcard().with_quality(0.1),
            LanguagePreference::new("fr").with_quality(0.8),
        ];

        let ranked = rank(&prefs);
        assert_eq!(
            codes(&ranked),
            vec!["de-DE;q=1", "fr;q=0.8", "en-US;q=0.6", "en;q=0.4", "*;q=0.1"]
        );
    }

    #[test]
    fn test_rank_is_stable_for_equal_quality() {
        let prefs = vec![
            LanguagePreference::new("fr").with_quality(0.5),
            LanguagePreference::new("de").with_quality(0.5),
            LanguagePreference::new("it").with_quality(0.5),
        ];

        let ranked = rank(&prefs);
        assert_eq!(codes(&ranked), vec!["fr;q=0.5", "de;q=0.5", "it;q=0.5"]);
    }

    #[test]
    fn test_rank_missing_quality_sorts_last() {
        let prefs = vec![
            LanguagePreference::new("fr"),
            LanguagePreference::new("de").with_quality(0.1),
            LanguagePreference::new("it"),
        ];

        let ranked = rank(&prefs);
        assert_eq!(codes(&ranked), vec!["de;q=0.1", "fr", "it"]);
    }

    #[test]
    fn test_rank_leaves_input_untouched() {
        let prefs = vec![
            LanguagePreference::new("en").with_quality(0.2),
            LanguagePreference::new("fr").with_quality(0.9),
        ];
        let before = prefs.clone();

        let _ = rank(&prefs);
        assert_eq!(prefs, before);
    }

    // ==================== describe Tests ====================

    #[test]
    fn test_describe() {
        let prefs = vec![
            LanguagePreference::new("de").with_region("DE").with_quality(1.0),
            LanguagePreference::wildcard(),
        ];
        assert_eq!(describe(&prefs), "de-DE;q=1, *");
        assert_eq!(describe(&[]), "(none)");
    }
}
