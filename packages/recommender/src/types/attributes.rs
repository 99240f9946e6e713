//! Attributes extracted from a single user message.

use serde::{Deserialize, Serialize};

/// Gender as extracted from user input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
    Other,
}

impl Gender {
    /// Stable label used in prompts and profile context.
    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "male",
            Gender::Female => "female",
            Gender::Other => "other",
        }
    }
}

/// Education level, ordered roughly by attainment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EducationLevel {
    None,
    Primary,
    Secondary,
    HighSchool,
    Bachelor,
    Master,
    Phd,
    Vocational,
    Technical,
}

impl EducationLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            EducationLevel::None => "none",
            EducationLevel::Primary => "primary",
            EducationLevel::Secondary => "secondary",
            EducationLevel::HighSchool => "high_school",
            EducationLevel::Bachelor => "bachelor",
            EducationLevel::Master => "master",
            EducationLevel::Phd => "phd",
            EducationLevel::Vocational => "vocational",
            EducationLevel::Technical => "technical",
        }
    }
}

/// Household income bracket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IncomeLevel {
    Low,
    Medium,
    High,
    VeryHigh,
}

impl IncomeLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            IncomeLevel::Low => "low",
            IncomeLevel::Medium => "medium",
            IncomeLevel::High => "high",
            IncomeLevel::VeryHigh => "very_high",
        }
    }
}

/// A user's location.
///
/// The extractor makes no attempt to disambiguate city vs. province vs.
/// country; the first matched locality lands in `city` and `country` is
/// set to the configured default.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub province: Option<String>,
    pub country: String,
}

impl Location {
    /// A city in the given country.
    pub fn city(city: impl Into<String>, country: impl Into<String>) -> Self {
        Self {
            city: Some(city.into()),
            province: None,
            country: country.into(),
        }
    }

    /// Best display label: city, then province, then country.
    pub fn label(&self) -> &str {
        self.city
            .as_deref()
            .or(self.province.as_deref())
            .unwrap_or(&self.country)
    }
}

/// Structured attributes extracted from one message.
///
/// Every field the extractor could not confidently match is left absent;
/// extraction never fails outright. `confidence` is computed by the scorer
/// after extraction.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedAttributes {
    /// Age in years (1-120)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub age: Option<u8>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub gender: Option<Gender>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub education: Option<EducationLevel>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<Location>,

    /// Topic tokens in discovery order, deduplicated
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub goals: Vec<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub income: Option<IncomeLevel>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub occupation: Option<String>,

    /// Household size (1-20)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub family_size: Option<u8>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub disabilities: Vec<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub languages: Vec<String>,

    /// How confident the extractor is in this attribute set (0.0-1.0)
    #[serde(default)]
    pub confidence: f32,
}

impl ParsedAttributes {
    /// Count of the eight weighted fields that are present.
    ///
    /// Languages and disabilities are tracked but carry no confidence
    /// weight.
    pub fn weighted_fields_present(&self) -> usize {
        let mut count = 0;
        if self.age.is_some() {
            count += 1;
        }
        if self.gender.is_some() {
            count += 1;
        }
        if self.education.is_some() {
            count += 1;
        }
        if self.location.is_some() {
            count += 1;
        }
        if !self.goals.is_empty() {
            count += 1;
        }
        if self.income.is_some() {
            count += 1;
        }
        if self.occupation.is_some() {
            count += 1;
        }
        if self.family_size.is_some() {
            count += 1;
        }
        count
    }
}
