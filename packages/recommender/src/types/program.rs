//! Candidate assistance programs and eligibility metadata.
//!
//! Programs are externally supplied (see [`crate::store::ProgramStore`])
//! and read-only from the pipeline's perspective.

use serde::{Deserialize, Serialize};

use super::attributes::Gender;

/// Closed set of program categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProgramCategory {
    Scholarship,
    Grant,
    Loan,
    SkillTraining,
    Employment,
    Business,
    Housing,
    Health,
    Disability,
    WomenEmpowerment,
    Youth,
    Agriculture,
    Technology,
}

/// All categories, in display order.
pub const ALL_CATEGORIES: [ProgramCategory; 13] = [
    ProgramCategory::Scholarship,
    ProgramCategory::Grant,
    ProgramCategory::Loan,
    ProgramCategory::SkillTraining,
    ProgramCategory::Employment,
    ProgramCategory::Business,
    ProgramCategory::Housing,
    ProgramCategory::Health,
    ProgramCategory::Disability,
    ProgramCategory::WomenEmpowerment,
    ProgramCategory::Youth,
    ProgramCategory::Agriculture,
    ProgramCategory::Technology,
];

impl ProgramCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProgramCategory::Scholarship => "scholarship",
            ProgramCategory::Grant => "grant",
            ProgramCategory::Loan => "loan",
            ProgramCategory::SkillTraining => "skill_training",
            ProgramCategory::Employment => "employment",
            ProgramCategory::Business => "business",
            ProgramCategory::Housing => "housing",
            ProgramCategory::Health => "health",
            ProgramCategory::Disability => "disability",
            ProgramCategory::WomenEmpowerment => "women_empowerment",
            ProgramCategory::Youth => "youth",
            ProgramCategory::Agriculture => "agriculture",
            ProgramCategory::Technology => "technology",
        }
    }
}

/// Gender restriction on a program.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GenderEligibility {
    Male,
    Female,
    All,
}

impl GenderEligibility {
    /// Whether a user of the given gender qualifies.
    pub fn admits(&self, gender: Gender) -> bool {
        match self {
            GenderEligibility::All => true,
            GenderEligibility::Male => gender == Gender::Male,
            GenderEligibility::Female => gender == Gender::Female,
        }
    }
}

/// Who a program is open to.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EligibilityCriteria {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub age_min: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub age_max: Option<u8>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub education_level: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub income_level: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub location: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gender: Option<GenderEligibility>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub disability_friendly: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub family_size_max: Option<u8>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub occupation: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub languages: Vec<String>,
}

/// Funding amount range for a program.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FundingRange {
    pub min: u64,
    pub max: u64,
    pub currency: String,
}

impl FundingRange {
    /// Human-readable form for fallback messages, e.g. "PKR 10000-50000".
    pub fn display(&self) -> String {
        format!("{} {}-{}", self.currency, self.min, self.max)
    }
}

/// A government assistance program.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Program {
    pub id: String,
    pub title: String,
    pub category: ProgramCategory,
    pub description: String,
    #[serde(default)]
    pub eligibility_criteria: EligibilityCriteria,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub benefits: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub requirements: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub funding_amount: Option<FundingRange>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub application_deadline: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub application_url: Option<String>,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

fn default_active() -> bool {
    true
}

impl Program {
    /// Minimal constructor for a program; eligibility and extras default
    /// to open/absent.
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        category: ProgramCategory,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            category,
            description: description.into(),
            eligibility_criteria: EligibilityCriteria::default(),
            benefits: Vec::new(),
            requirements: Vec::new(),
            funding_amount: None,
            application_deadline: None,
            application_url: None,
            is_active: true,
        }
    }
}

/// Filters for searching the program corpus.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProgramFilters {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub category: Vec<ProgramCategory>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub age: Option<u8>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub education: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub location: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub income_level: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gender: Option<GenderEligibility>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub disability_friendly: Option<bool>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub keywords: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_wire_format() {
        let json = serde_json::to_string(&ProgramCategory::SkillTraining).unwrap();
        assert_eq!(json, "\"skill_training\"");

        let cat: ProgramCategory = serde_json::from_str("\"women_empowerment\"").unwrap();
        assert_eq!(cat, ProgramCategory::WomenEmpowerment);
    }

    #[test]
    fn test_category_set_is_closed() {
        assert_eq!(ALL_CATEGORIES.len(), 13);
    }

    #[test]
    fn test_gender_eligibility() {
        assert!(GenderEligibility::All.admits(Gender::Other));
        assert!(GenderEligibility::Female.admits(Gender::Female));
        assert!(!GenderEligibility::Female.admits(Gender::Male));
    }

    #[test]
    fn test_program_deserializes_with_defaults() {
        let json = r#"{
            "id": "prog-1",
            "title": "Test Scholarship",
            "category": "scholarship",
            "description": "A test program"
        }"#;

        let program: Program = serde_json::from_str(json).unwrap();
        assert!(program.is_active);
        assert!(program.benefits.is_empty());
        assert_eq!(program.eligibility_criteria, EligibilityCriteria::default());
    }

    #[test]
    fn test_funding_display() {
        let funding = FundingRange {
            min: 10_000,
            max: 50_000,
            currency: "PKR".to_string(),
        };
        assert_eq!(funding.display(), "PKR 10000-50000");
    }
}
