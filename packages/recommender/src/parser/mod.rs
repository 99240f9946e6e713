//! Locale-aware field extraction from free-text messages.
//!
//! The extractor never fails: any field it cannot confidently match is
//! left absent, and numeric captures outside their bounds are dropped
//! silently (the rule loop simply moves on to the next pattern). All
//! pattern knowledge lives in [`rules`]; this module only walks the
//! tables.

pub mod confidence;
pub mod rules;

use tracing::debug;

use crate::config::PipelineConfig;
use crate::locale::{contains_latin_script, Locale};
use crate::types::{Location, ParsedAttributes};

pub use confidence::{missing_field_suggestions, score, USABLE_CONFIDENCE_THRESHOLD};

/// Age bounds accepted by the extractor.
const AGE_RANGE: std::ops::RangeInclusive<u8> = 1..=120;
/// Family size bounds accepted by the extractor.
const FAMILY_SIZE_RANGE: std::ops::RangeInclusive<u8> = 1..=20;
/// Minimum length for a captured city or occupation string.
const MIN_CAPTURE_LEN: usize = 3;

/// Outcome of parsing one message: the attributes (confidence filled in),
/// whether they clear the usability threshold, and localized prompts for
/// the fields still missing.
#[derive(Debug, Clone)]
pub struct ParseOutcome {
    pub attributes: ParsedAttributes,
    pub usable: bool,
    pub suggestions: Vec<String>,
}

/// Pattern-based attribute extractor.
#[derive(Debug, Clone)]
pub struct FieldExtractor {
    default_country: String,
}

impl FieldExtractor {
    /// Create an extractor that assigns the given country to matched
    /// locations.
    pub fn new(default_country: impl Into<String>) -> Self {
        Self {
            default_country: default_country.into(),
        }
    }

    pub fn from_config(config: &PipelineConfig) -> Self {
        Self::new(config.default_country.clone())
    }

    /// Extract structured attributes from raw text.
    pub fn extract(&self, text: &str, locale: Locale) -> ParsedAttributes {
        let rules = rules::rules_for(locale);

        let mut attrs = ParsedAttributes {
            age: extract_bounded_number(&rules.age, text, AGE_RANGE),
            gender: first_matching_group(&rules.gender, text),
            education: first_matching_group(&rules.education, text),
            location: self.extract_location(&rules.location, text),
            goals: extract_goals(&rules.goals, text),
            income: first_matching_group(&rules.income, text),
            occupation: extract_capture(&rules.occupation, text),
            family_size: extract_bounded_number(&rules.family_size, text, FAMILY_SIZE_RANGE),
            disabilities: extract_disabilities(&rules.disabilities, text),
            languages: detect_languages(text, locale),
            confidence: 0.0,
        };
        attrs.confidence = confidence::score(&attrs);

        debug!(
            locale = locale.code(),
            fields = attrs.weighted_fields_present(),
            confidence = attrs.confidence,
            "extracted attributes"
        );

        attrs
    }

    /// Extract, score, and produce missing-field suggestions in one call.
    pub fn parse(&self, text: &str, locale: Locale) -> ParseOutcome {
        let attributes = self.extract(text, locale);
        let usable = attributes.confidence > USABLE_CONFIDENCE_THRESHOLD;
        let suggestions = confidence::missing_field_suggestions(&attributes, locale);
        ParseOutcome {
            attributes,
            usable,
            suggestions,
        }
    }

    fn extract_location(&self, location_rules: &[regex::Regex], text: &str) -> Option<Location> {
        for rule in location_rules {
            if let Some(caps) = rule.captures(text) {
                if let Some(m) = caps.get(1) {
                    let city = m.as_str().trim();
                    if city.len() >= MIN_CAPTURE_LEN {
                        // No city/province/country disambiguation here;
                        // that would need a geo lookup the pipeline does
                        // not carry.
                        return Some(Location::city(city, self.default_country.clone()));
                    }
                }
            }
        }
        None
    }
}

/// First rule whose captured integer parses and lands in `range`.
fn extract_bounded_number(
    rules: &[regex::Regex],
    text: &str,
    range: std::ops::RangeInclusive<u8>,
) -> Option<u8> {
    for rule in rules {
        if let Some(caps) = rule.captures(text) {
            if let Some(value) = caps.get(1).and_then(|m| m.as_str().parse::<u8>().ok()) {
                if range.contains(&value) {
                    return Some(value);
                }
                // Out of bounds: drop the match and keep trying later
                // rules rather than surfacing an error.
            }
        }
    }
    None
}

/// First group (in declared priority order) with any matching rule.
fn first_matching_group<T: Copy>(groups: &[(T, Vec<regex::Regex>)], text: &str) -> Option<T> {
    for (value, rules) in groups {
        if rules.iter().any(|r| r.is_match(text)) {
            return Some(*value);
        }
    }
    None
}

/// First rule with a long-enough capture.
fn extract_capture(rules: &[regex::Regex], text: &str) -> Option<String> {
    for rule in rules {
        if let Some(caps) = rule.captures(text) {
            if let Some(m) = caps.get(1) {
                let captured = m.as_str().trim();
                if captured.len() >= MIN_CAPTURE_LEN {
                    return Some(captured.to_string());
                }
            }
        }
    }
    None
}

/// Every goal rule is tested independently; matches are collected in
/// declaration order, deduplicated by token.
fn extract_goals(rules: &[rules::GoalRule], text: &str) -> Vec<String> {
    let mut goals: Vec<String> = Vec::new();
    for rule in rules {
        if rule.pattern.is_match(text) && !goals.iter().any(|g| g == rule.token) {
            goals.push(rule.token.to_string());
        }
    }
    goals
}

/// Any disability indicator records the single "disability" tag.
fn extract_disabilities(rules: &[regex::Regex], text: &str) -> Vec<String> {
    if rules.iter().any(|r| r.is_match(text)) {
        vec!["disability".to_string()]
    } else {
        Vec::new()
    }
}

/// The detected locale's language is always tagged; "english" is added
/// whenever Latin script is present.
fn detect_languages(text: &str, locale: Locale) -> Vec<String> {
    let mut languages = Vec::new();
    if locale == Locale::Ur {
        languages.push("urdu".to_string());
    }
    if locale == Locale::En || contains_latin_script(text) {
        languages.push("english".to_string());
    }
    languages
}
