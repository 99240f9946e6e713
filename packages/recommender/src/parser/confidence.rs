//! Confidence scoring and missing-field prompts.
//!
//! The score is a deterministic weighted sum over the eight extractable
//! fields plus flat bonuses for breadth. Partial extraction yields a
//! sub-total, not a renormalized fraction.

use crate::locale::Locale;
use crate::types::ParsedAttributes;

/// Callers treat a parse as usable above this confidence.
pub const USABLE_CONFIDENCE_THRESHOLD: f32 = 0.3;

const AGE_WEIGHT: f32 = 0.15;
const GENDER_WEIGHT: f32 = 0.10;
const EDUCATION_WEIGHT: f32 = 0.15;
const LOCATION_WEIGHT: f32 = 0.15;
const GOALS_WEIGHT: f32 = 0.20;
const INCOME_WEIGHT: f32 = 0.10;
const OCCUPATION_WEIGHT: f32 = 0.10;
const FAMILY_SIZE_WEIGHT: f32 = 0.05;

/// Flat bonus applied at 3 and again at 5 present fields.
const BREADTH_BONUS: f32 = 0.10;

/// Score an attribute set into [0, 1].
///
/// Monotone: adding a field never lowers the score.
pub fn score(attrs: &ParsedAttributes) -> f32 {
    let mut confidence = 0.0;

    if attrs.age.is_some() {
        confidence += AGE_WEIGHT;
    }
    if attrs.gender.is_some() {
        confidence += GENDER_WEIGHT;
    }
    if attrs.education.is_some() {
        confidence += EDUCATION_WEIGHT;
    }
    if attrs.location.is_some() {
        confidence += LOCATION_WEIGHT;
    }
    if !attrs.goals.is_empty() {
        confidence += GOALS_WEIGHT;
    }
    if attrs.income.is_some() {
        confidence += INCOME_WEIGHT;
    }
    if attrs.occupation.is_some() {
        confidence += OCCUPATION_WEIGHT;
    }
    if attrs.family_size.is_some() {
        confidence += FAMILY_SIZE_WEIGHT;
    }

    let present = attrs.weighted_fields_present();
    if present >= 3 {
        confidence += BREADTH_BONUS;
    }
    if present >= 5 {
        confidence += BREADTH_BONUS;
    }

    confidence.min(1.0)
}

/// Localized prompts for the absent core fields, in fixed order:
/// age, education, location, goals.
pub fn missing_field_suggestions(attrs: &ParsedAttributes, locale: Locale) -> Vec<String> {
    let mut suggestions = Vec::new();

    if attrs.age.is_none() {
        suggestions.push(
            match locale {
                Locale::En => "Please provide your age",
                Locale::Ur => "براہ کرم اپنی عمر بتائیں",
            }
            .to_string(),
        );
    }
    if attrs.education.is_none() {
        suggestions.push(
            match locale {
                Locale::En => "Please mention your education level",
                Locale::Ur => "براہ کرم اپنی تعلیمی سطح بتائیں",
            }
            .to_string(),
        );
    }
    if attrs.location.is_none() {
        suggestions.push(
            match locale {
                Locale::En => "Please provide your location",
                Locale::Ur => "براہ کرم اپنا مقام بتائیں",
            }
            .to_string(),
        );
    }
    if attrs.goals.is_empty() {
        suggestions.push(
            match locale {
                Locale::En => "Please mention your goals (scholarship, job, etc.)",
                Locale::Ur => "براہ کرم اپنے اہداف بتائیں (وظیفہ، ملازمت، وغیرہ)",
            }
            .to_string(),
        );
    }

    suggestions
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{EducationLevel, Gender, IncomeLevel, Location};

    #[test]
    fn test_empty_attributes_score_zero() {
        assert_eq!(score(&ParsedAttributes::default()), 0.0);
    }

    #[test]
    fn test_single_field_weights() {
        let attrs = ParsedAttributes {
            age: Some(25),
            ..Default::default()
        };
        assert!((score(&attrs) - 0.15).abs() < f32::EPSILON);

        let attrs = ParsedAttributes {
            goals: vec!["scholarship".to_string()],
            ..Default::default()
        };
        assert!((score(&attrs) - 0.20).abs() < f32::EPSILON);
    }

    #[test]
    fn test_breadth_bonuses() {
        // Three fields: 0.15 + 0.15 + 0.15 + 0.10 bonus.
        let attrs = ParsedAttributes {
            age: Some(25),
            education: Some(EducationLevel::Bachelor),
            location: Some(Location::city("Lahore", "Pakistan")),
            ..Default::default()
        };
        assert!((score(&attrs) - 0.55).abs() < 1e-6);

        // Five fields adds the second bonus.
        let attrs = ParsedAttributes {
            age: Some(25),
            education: Some(EducationLevel::Bachelor),
            location: Some(Location::city("Lahore", "Pakistan")),
            gender: Some(Gender::Female),
            income: Some(IncomeLevel::Low),
            ..Default::default()
        };
        let expected = 0.15 + 0.15 + 0.15 + 0.10 + 0.10 + 0.10 + 0.10;
        assert!((score(&attrs) - expected).abs() < 1e-6);
    }

    #[test]
    fn test_full_attributes_clamp_to_one() {
        let attrs = ParsedAttributes {
            age: Some(25),
            gender: Some(Gender::Male),
            education: Some(EducationLevel::Master),
            location: Some(Location::city("Karachi", "Pakistan")),
            goals: vec!["loan".to_string()],
            income: Some(IncomeLevel::Medium),
            occupation: Some("teacher".to_string()),
            family_size: Some(4),
            ..Default::default()
        };
        // 1.00 weighted + 0.20 bonuses, clamped.
        assert_eq!(score(&attrs), 1.0);
    }

    #[test]
    fn test_score_is_monotone_in_fields() {
        let mut attrs = ParsedAttributes::default();
        let mut previous = score(&attrs);

        attrs.age = Some(30);
        let with_age = score(&attrs);
        assert!(with_age >= previous);
        previous = with_age;

        attrs.goals = vec!["training".to_string()];
        let with_goals = score(&attrs);
        assert!(with_goals >= previous);
        previous = with_goals;

        attrs.income = Some(IncomeLevel::Low);
        assert!(score(&attrs) >= previous);
    }

    #[test]
    fn test_suggestions_fixed_order_and_localization() {
        let attrs = ParsedAttributes::default();

        let en = missing_field_suggestions(&attrs, Locale::En);
        assert_eq!(en.len(), 4);
        assert!(en[0].contains("age"));
        assert!(en[1].contains("education"));
        assert!(en[2].contains("location"));
        assert!(en[3].contains("goals"));

        let ur = missing_field_suggestions(&attrs, Locale::Ur);
        assert_eq!(ur.len(), 4);
        assert!(ur[0].contains("عمر"));
    }

    #[test]
    fn test_suggestions_only_for_missing() {
        let attrs = ParsedAttributes {
            age: Some(25),
            goals: vec!["job".to_string()],
            ..Default::default()
        };
        let suggestions = missing_field_suggestions(&attrs, Locale::En);
        assert_eq!(suggestions.len(), 2);
        assert!(suggestions[0].contains("education"));
        assert!(suggestions[1].contains("location"));
    }
}
