//! Long-lived user profiles and the merge operation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::attributes::{EducationLevel, Gender, IncomeLevel, Location, ParsedAttributes};

/// A user's evolving profile, built up across messages.
///
/// Created on the first successful extraction and mutated by
/// [`UserProfile::merge`] on every subsequent message. Lifecycle (storage,
/// deletion) is owned by the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub id: Uuid,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub age: Option<u8>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub gender: Option<Gender>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub education: Option<EducationLevel>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<Location>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub goals: Vec<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub income: Option<IncomeLevel>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub occupation: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub family_size: Option<u8>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub disabilities: Vec<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub languages: Vec<String>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl UserProfile {
    /// Create an empty profile with a fresh identifier.
    pub fn new() -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            age: None,
            gender: None,
            education: None,
            location: None,
            goals: Vec::new(),
            income: None,
            occupation: None,
            family_size: None,
            disabilities: Vec::new(),
            languages: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Merge newly extracted attributes into a profile.
    ///
    /// Sparse overlay: only fields the extractor actually produced
    /// (`Some` values, non-empty lists) overwrite the profile; absent
    /// fields keep their prior value, so a message that omits a
    /// previously-known attribute never erases it. Merging the same
    /// attributes twice yields the same profile as merging once.
    ///
    /// With `existing == None` a new profile is created; `updated_at` is
    /// refreshed on every merge.
    pub fn merge(existing: Option<UserProfile>, parsed: &ParsedAttributes) -> UserProfile {
        let mut profile = existing.unwrap_or_else(UserProfile::new);

        if parsed.age.is_some() {
            profile.age = parsed.age;
        }
        if parsed.gender.is_some() {
            profile.gender = parsed.gender;
        }
        if parsed.education.is_some() {
            profile.education = parsed.education;
        }
        if parsed.location.is_some() {
            profile.location = parsed.location.clone();
        }
        if !parsed.goals.is_empty() {
            profile.goals = parsed.goals.clone();
        }
        if parsed.income.is_some() {
            profile.income = parsed.income;
        }
        if parsed.occupation.is_some() {
            profile.occupation = parsed.occupation.clone();
        }
        if parsed.family_size.is_some() {
            profile.family_size = parsed.family_size;
        }
        if !parsed.disabilities.is_empty() {
            profile.disabilities = parsed.disabilities.clone();
        }
        if !parsed.languages.is_empty() {
            profile.languages = parsed.languages.clone();
        }

        profile.updated_at = Utc::now();
        profile
    }

    /// Flattened `key: value` pairs for prompt context, skipping absent
    /// fields.
    pub fn context_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = Vec::new();
        if let Some(age) = self.age {
            pairs.push(("age".to_string(), age.to_string()));
        }
        if let Some(gender) = self.gender {
            pairs.push(("gender".to_string(), gender.as_str().to_string()));
        }
        if let Some(education) = self.education {
            pairs.push(("education".to_string(), education.as_str().to_string()));
        }
        if let Some(location) = &self.location {
            pairs.push(("location".to_string(), location.label().to_string()));
        }
        if !self.goals.is_empty() {
            pairs.push(("goals".to_string(), self.goals.join(", ")));
        }
        if let Some(income) = self.income {
            pairs.push(("income".to_string(), income.as_str().to_string()));
        }
        if let Some(occupation) = &self.occupation {
            pairs.push(("occupation".to_string(), occupation.clone()));
        }
        if let Some(family_size) = self.family_size {
            pairs.push(("familySize".to_string(), family_size.to_string()));
        }
        if !self.disabilities.is_empty() {
            pairs.push(("disabilities".to_string(), self.disabilities.join(", ")));
        }
        if !self.languages.is_empty() {
            pairs.push(("languages".to_string(), self.languages.join(", ")));
        }
        pairs
    }
}

impl Default for UserProfile {
    fn default() -> Self {
        Self::new()
    }
}
