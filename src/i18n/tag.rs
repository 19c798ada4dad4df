//! Language tag: the `code[-region]` shape shared by translations and preferences.
//!
//! Tags are compared case-insensitively and without any syntax validation.
//! A side that carries no region matches every region of the same code.

use serde_json::Value;

/// A parsed `code[-region]` language tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LanguageTag {
    /// Primary language subtag (e.g., "en", "fr")
    pub code: String,

    /// Region subtag, if the tag carried one (e.g., "US", "GB")
    pub region: Option<String>,

    /// Canonical `code[-region]` string as it appeared on the record
    pub ietf: String,
}

impl LanguageTag {
    /// Parse a tag string by splitting on the first `-`.
    ///
    /// # Arguments
    /// * `tag` - Tag string such as "en-US" or "en"
    ///
    /// # Returns
    /// The parsed tag; `region` is `None` when the string has no `-`.
    ///
    /// # Example
    /// ```ignore
    /// let tag = LanguageTag::parse("en-US");
    /// assert_eq!(tag.region.as_deref(), Some("US"));
    /// ```
    pub fn parse(tag: &str) -> LanguageTag {
        let (code, region) = match tag.split_once('-') {
            Some((code, region)) => (code, Some(region.to_string())),
            None => (tag, None),
        };

        LanguageTag {
            code: code.to_string(),
            region,
            ietf: tag.to_string(),
        }
    }

    /// Parse an optional tag string; absent input yields `None`.
    pub fn parse_opt(tag: Option<&str>) -> Option<LanguageTag> {
        tag.map(LanguageTag::parse)
    }

    /// Read the `Language` sub-object of a translation entry.
    ///
    /// Expects `{ "Code": .., "Region": .., "IETF": .. }`. A missing `IETF` is
    /// rebuilt from `Code`/`Region`; a missing `Code` is parsed out of `IETF`.
    ///
    /// # Returns
    /// * `Some(LanguageTag)` if the object names at least a code or an IETF tag
    /// * `None` if the value is not an object or carries neither
    pub fn from_language_object(value: &Value) -> Option<LanguageTag> {
        let object = value.as_object()?;
        let code = object.get("Code").and_then(Value::as_str);
        let region = object.get("Region").and_then(Value::as_str);
        let ietf = object.get("IETF").and_then(Value::as_str);

        match (code, ietf) {
            (Some(code), Some(ietf)) => Some(LanguageTag {
                code: code.to_string(),
                region: region.map(str::to_string),
                ietf: ietf.to_string(),
            }),
            (Some(code), None) => {
                let ietf = match region {
                    Some(region) => format!("{}-{}", code, region),
                    None => code.to_string(),
                };
                Some(LanguageTag {
                    code: code.to_string(),
                    region: region.map(str::to_string),
                    ietf,
                })
            }
            (None, Some(ietf)) => Some(LanguageTag::parse(ietf)),
            (None, None) => None,
        }
    }

    /// Check whether this tag's code equals `code`, ignoring case.
    pub fn code_matches(&self, code: &str) -> bool {
        self.code.eq_ignore_ascii_case(code)
    }

    /// Check whether this tag's region is compatible with `region`.
    ///
    /// # Returns
    /// `true` if either side has no region, or both are equal ignoring case.
    pub fn region_matches(&self, region: Option<&str>) -> bool {
        match (self.region.as_deref(), region) {
            (Some(ours), Some(theirs)) => ours.eq_ignore_ascii_case(theirs),
            _ => true,
        }
    }

    /// Full tag match: same code and compatible region.
    pub fn matches(&self, code: &str, region: Option<&str>) -> bool {
        self.code_matches(code) && self.region_matches(region)
    }

    /// Check whether this tag names the same IETF string as `ietf`, ignoring case.
    pub fn is_ietf(&self, ietf: &str) -> bool {
        self.ietf.eq_ignore_ascii_case(ietf)
    }
}
