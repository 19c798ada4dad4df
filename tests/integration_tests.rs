//! Integration tests for record localization
//!
//! These tests drive the public API the way a caller would: a deserialized
//! record plus a preference list, usually parsed from an `Accept-Language`
//! header.

use i18n_transform::i18n::{
    parse_accept_language, transform, transform_by_field, transform_into, transform_into_with,
    FieldSpec, LanguagePreference, LocalizeError, Record,
};
use proptest::prelude::*;
use serde_json::{json, Value};

// ==================== Test Helpers ====================

fn record(value: Value) -> Record {
    value.as_object().cloned().expect("fixture must be an object")
}

fn pref(code: &str, region: &str, quality: f64) -> LanguagePreference {
    LanguagePreference::new(code)
        .with_region(region)
        .with_quality(quality)
}

fn entry(name: &str, code: &str, region: &str) -> Value {
    json!({
        "Name": name,
        "Language": { "IETF": format!("{}-{}", code, region), "Code": code, "Region": region }
    })
}

/// en-US and en-GB, primary en-US, in the given order
fn english(us_first: bool) -> Record {
    let us = entry("gonna drink some beer and shoot some stuff y'all", "en", "US");
    let gb = entry("pip pip tally ho crumpets and tea", "en", "GB");
    let entries = if us_first { vec![us, gb] } else { vec![gb, us] };

    record(json!({
        "DomainId": 123,
        "i18n": entries,
        "PrimaryLanguage": "en-US"
    }))
}

fn three_languages() -> Record {
    record(json!({
        "DomainId": 123,
        "i18n": [
            entry("pip pip tally ho crumpets and tea", "en", "GB"),
            entry("gonna drink some beer and shoot some stuff y'all", "en", "US"),
            entry("j'ai du café et du croissant", "fr", "CA")
        ],
        "PrimaryLanguage": "en-US"
    }))
}

fn language_of(record: &Record) -> &str {
    record["Language"]["IETF"]
        .as_str()
        .expect("Language.IETF should be set")
}

// ==================== Whole-Record Selection Tests ====================

#[test]
fn test_exact_match_selects_language() {
    let result = transform(english(true), &[pref("en", "US", 1.0)]).expect("Should localize");
    assert_eq!(language_of(&result), "en-US");
    assert_eq!(result["DomainId"], 123);
}

#[test]
fn test_empty_preferences_select_primary() {
    let result = transform(english(false), &[]).expect("Should localize");
    assert_eq!(language_of(&result), "en-US");
}

#[test]
fn test_first_available_language_in_set() {
    let prefs = vec![pref("es", "MX", 1.0), pref("en", "US", 0.8)];
    let result = transform(english(true), &prefs).expect("Should localize");
    assert_eq!(language_of(&result), "en-US");
}

#[test]
fn test_wildcard_selects_primary() {
    let prefs = vec![
        pref("es", "MX", 1.0),
        pref("fr", "CA", 0.8),
        LanguagePreference::wildcard().with_quality(0.4),
    ];
    let result = transform(english(false), &prefs).expect("Should localize");
    assert_eq!(language_of(&result), "en-US");
}

#[test]
fn test_wildcard_anywhere_in_set_selects_primary() {
    let prefs = vec![
        pref("en", "GB", 0.4),
        LanguagePreference::wildcard().with_quality(0.8),
        pref("es", "MX", 1.0),
        pref("fr", "CA", 0.6),
    ];
    let result = transform(english(true), &prefs).expect("Should localize");
    assert_eq!(language_of(&result), "en-US");
}

#[test]
fn test_region_less_preference_prefers_primary_over_array_order() {
    let prefs = vec![LanguagePreference::new("en").with_quality(1.0)];
    let result = transform(english(false), &prefs).expect("Should localize");
    assert_eq!(language_of(&result), "en-US");
}

#[test]
fn test_first_match_from_complex_set() {
    let prefs = vec![
        pref("de", "DE", 1.0),
        LanguagePreference::new("fr").with_quality(0.8),
        pref("en", "US", 0.6),
        LanguagePreference::new("en").with_quality(0.4),
        LanguagePreference::wildcard().with_quality(0.1),
    ];
    let result = transform(three_languages(), &prefs).expect("Should localize");
    assert_eq!(language_of(&result), "fr-CA");
}

#[test]
fn test_preferences_sorted_by_quality() {
    let prefs = vec![
        pref("en", "US", 0.6),
        pref("de", "DE", 1.0),
        LanguagePreference::new("en").with_quality(0.4),
        LanguagePreference::wildcard().with_quality(0.1),
        LanguagePreference::new("fr").with_quality(0.8),
    ];
    let result = transform(three_languages(), &prefs).expect("Should localize");
    assert_eq!(language_of(&result), "fr-CA");
}

#[test]
fn test_equal_quality_keeps_input_order() {
    let prefs = vec![pref("fr", "CA", 0.5), pref("en", "GB", 0.5)];
    let result = transform(three_languages(), &prefs).expect("Should localize");
    assert_eq!(language_of(&result), "fr-CA");

    let prefs = vec![pref("en", "GB", 0.5), pref("fr", "CA", 0.5)];
    let result = transform(three_languages(), &prefs).expect("Should localize");
    assert_eq!(language_of(&result), "en-GB");
}

#[test]
fn test_case_insensitive_comparison() {
    let prefs = vec![LanguagePreference::new("En").with_region("us").with_quality(1.0)];
    let result = transform(english(false), &prefs).expect("Should localize");
    assert_eq!(language_of(&result), "en-US");
}

#[test]
fn test_translation_without_region() {
    let source = record(json!({
        "i18n": [
            { "Name": "plain english", "Language": { "IETF": "en", "Code": "en" } }
        ],
        "PrimaryLanguage": "en"
    }));
    let result = transform(source, &[pref("En", "US", 1.0)]).expect("Should localize");
    assert_eq!(language_of(&result), "en");
}

#[test]
fn test_empty_primary_language_uses_first_translation() {
    let source = record(json!({
        "i18n": [entry("pip pip tally ho crumpets and tea", "en", "GB")],
        "PrimaryLanguage": ""
    }));
    let result = transform(source.clone(), &[]).expect("Should localize");
    assert_eq!(language_of(&result), "en-GB");

    let fields = FieldSpec::new().required(["Name"]);
    let result = transform_by_field(&source, &[], &fields).expect("Should localize");
    assert_eq!(result.localization["Name"], "en-GB");
}

#[test]
fn test_caller_preferences_not_reordered() {
    let prefs = vec![pref("en", "GB", 0.1), pref("en", "US", 0.9)];
    let before = prefs.clone();
    let _ = transform(english(true), &prefs);
    assert_eq!(prefs, before);
}

// ==================== No Match Tests ====================

#[test]
fn test_no_match_returns_none() {
    let source = record(json!({
        "i18n": [entry("pip pip tally ho crumpets and tea", "en", "GB")],
        "PrimaryLanguage": "en-GB"
    }));
    assert!(transform(source, &[pref("de", "DE", 1.0)]).is_none());
}

#[test]
fn test_no_match_reported_through_callback() {
    let source = record(json!({
        "i18n": [entry("pip pip tally ho crumpets and tea", "en", "GB")],
        "PrimaryLanguage": "en-GB"
    }));
    let mut destination = Record::new();
    let mut error = None;

    transform_into_with(&source, &mut destination, &[pref("de", "DE", 1.0)], |outcome| {
        error = outcome.err()
    });

    let error = error.expect("Callback should receive an error");
    assert!(error.to_string().contains("de-DE"));
    assert!(destination.is_empty());
}

#[test]
fn test_transform_into_destination() {
    let mut destination = Record::new();
    transform_into(&english(true), &mut destination, &[pref("en", "GB", 1.0)])
        .expect("Should localize");
    assert_eq!(language_of(&destination), "en-GB");
}

// ==================== Accept-Language Tests ====================

#[test]
fn test_accept_language_header_end_to_end() {
    let prefs = parse_accept_language("de-DE, fr;q=0.8, en-US;q=0.6, *;q=0.1");
    let result = transform(three_languages(), &prefs).expect("Should localize");
    assert_eq!(language_of(&result), "fr-CA");
}

#[test]
fn test_accept_language_wildcard_only() {
    let prefs = parse_accept_language("*");
    let result = transform(three_languages(), &prefs).expect("Should localize");
    assert_eq!(language_of(&result), "en-US");
}

// ==================== Per-Field Tests ====================

#[test]
fn test_per_field_prefers_higher_ranked_match_over_primary() {
    let source = record(json!({
        "i18n": [
            {
                "Name": "US name",
                "Description": "US description",
                "Language": { "IETF": "en-US", "Code": "en", "Region": "US" }
            },
            {
                "Name": "nom",
                "Language": { "IETF": "fr-CA", "Code": "fr", "Region": "CA" }
            }
        ],
        "PrimaryLanguage": "en-US"
    }));
    let fields = FieldSpec::new().required(["Name", "Description"]);

    let result = transform_by_field(&source, &[pref("fr", "CA", 1.0)], &fields)
        .expect("Should localize");

    assert_eq!(result.translations["Name"], "nom");
    assert_eq!(result.localization["Name"], "fr-CA");
    assert_eq!(result.translations["Description"], "US description");
    assert_eq!(result.localization["Description"], "en-US");
}

#[test]
fn test_per_field_optional_absent_everywhere() {
    let fields = FieldSpec::new().optional(["Area"]);
    let result =
        transform_by_field(&english(true), &[pref("en", "GB", 1.0)], &fields).expect("Should localize");

    assert_eq!(result.translations["Area"], Value::Null);
    assert!(!result.localization.contains_key("Area"));

    let json = serde_json::to_value(&result).expect("Should serialize");
    assert!(json["localization"].as_object().unwrap().is_empty());
}

#[test]
fn test_per_field_missing_primary_translation() {
    let source = record(json!({
        "i18n": [entry("pip pip tally ho crumpets and tea", "en", "GB")],
        "PrimaryLanguage": "fr-CA"
    }));
    let fields = FieldSpec::new().required(["Name"]);

    let err = transform_by_field(&source, &[pref("xx", "XX", 1.0)], &fields).unwrap_err();
    assert!(matches!(
        err,
        LocalizeError::MissingPrimaryTranslation { .. }
    ));
    assert!(err
        .to_string()
        .contains("Primary translations are not available"));
}

// ==================== Property Tests ====================

fn scalar() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(|n| json!(n)),
        "[a-zA-Z ]{0,12}".prop_map(Value::String),
    ]
}

fn plain_record() -> impl Strategy<Value = Record> {
    prop::collection::btree_map("[A-Za-z]{1,8}", scalar(), 0..6).prop_map(|fields| {
        fields
            .into_iter()
            .filter(|(key, _)| key != "i18n" && key != "I18n")
            .collect()
    })
}

fn preference() -> impl Strategy<Value = LanguagePreference> {
    (
        prop_oneof![Just("en"), Just("fr"), Just("de"), Just("*")],
        prop::option::of(prop_oneof![Just("US"), Just("GB"), Just("CA")]),
        prop::option::of(0.0f64..=1.0),
    )
        .prop_map(|(code, region, quality)| LanguagePreference {
            code: code.to_string(),
            region: region.map(str::to_string),
            quality,
        })
}

proptest! {
    #[test]
    fn prop_record_without_translations_is_unchanged(
        source in plain_record(),
        prefs in prop::collection::vec(preference(), 0..5),
    ) {
        prop_assert_eq!(transform(source.clone(), &prefs), Some(source));
    }

    #[test]
    fn prop_output_never_contains_translations(
        prefs in prop::collection::vec(preference(), 1..5),
        capitalized in any::<bool>(),
    ) {
        let mut source = three_languages();
        if capitalized {
            let translations = source.remove("i18n").unwrap();
            source.insert("I18n".to_string(), translations);
        }

        if let Some(result) = transform(source, &prefs) {
            prop_assert!(!result.contains_key("i18n"));
            prop_assert!(!result.contains_key("I18n"));
        }
    }

    #[test]
    fn prop_wildcard_always_resolves(
        mut prefs in prop::collection::vec(preference(), 0..5),
    ) {
        prefs.push(LanguagePreference::wildcard().with_quality(0.0));
        prop_assert!(transform(three_languages(), &prefs).is_some());
    }
}
