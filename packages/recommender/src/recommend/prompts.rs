//! Prompt construction and canned copy for the orchestrator.
//!
//! All text lives here so the state machine in `recommend::mod` stays
//! readable. Context builders are bounded: at most the first
//! [`PROMPT_CORPUS_LIMIT`] corpus entries are serialized.

use crate::search::SearchResult;
use crate::types::{Program, UserProfile};

/// Max corpus entries serialized into the prompt.
pub const PROMPT_CORPUS_LIMIT: usize = 10;

/// Programs shown by the deterministic fallback.
pub const FALLBACK_PROGRAM_COUNT: usize = 3;

/// Suggestions attached to the deterministic fallback.
pub const FALLBACK_SUGGESTIONS: [&str; 4] = [
    "Share your age for age-specific programs",
    "Tell us your education level for education programs",
    "Mention your location for local opportunities",
    "Describe your specific goals (scholarships, loans, training, etc.)",
];

/// Suggestions attached to the empty-corpus overview.
pub const CANNED_SUGGESTIONS: [&str; 4] = [
    "Tell us your age",
    "Share your education level",
    "Mention your location",
    "Describe your goals",
];

/// System prompt for the recommendation completion.
pub fn system_prompt(country: &str) -> String {
    format!(
        "You are Sahulat AI, a government program discovery assistant in {country}. \
Your PRIMARY goal is to RECOMMEND SPECIFIC PROGRAMS from the available list.

CRITICAL RULES:
1. ALWAYS recommend 2-3 specific programs from the available list first
2. NEVER just ask questions without providing program recommendations
3. Even with incomplete user profiles, recommend programs based on what you know
4. Provide specific details about each recommended program
5. Only ask for missing information AFTER providing recommendations

You must respond in JSON format with actual program recommendations."
    )
}

/// Serialize the corpus head as "- title (category): description" lines.
pub fn programs_context(corpus: &[Program]) -> String {
    corpus
        .iter()
        .take(PROMPT_CORPUS_LIMIT)
        .map(|p| format!("- {} ({}): {}", p.title, p.category.as_str(), p.description))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Serialize web hits as "- title: snippet (link)" lines.
pub fn web_context(results: &[SearchResult]) -> String {
    if results.is_empty() {
        return String::new();
    }
    let lines = results
        .iter()
        .map(|r| format!("- {}: {} ({})", r.title, r.snippet, r.link))
        .collect::<Vec<_>>()
        .join("\n");
    format!("\n\nAdditional opportunities found online:\n{}", lines)
}

/// Flatten the profile into "key: value" pairs.
pub fn profile_context(profile: &UserProfile) -> String {
    let pairs = profile.context_pairs();
    if pairs.is_empty() {
        return "Basic profile".to_string();
    }
    pairs
        .into_iter()
        .map(|(k, v)| format!("{}: {}", k, v))
        .collect::<Vec<_>>()
        .join(", ")
}

/// The full recommendation prompt.
pub fn recommendation_prompt(
    message: &str,
    profile: &UserProfile,
    corpus: &[Program],
    web_results: &[SearchResult],
    country: &str,
) -> String {
    format!(
        "You are Sahulat AI, a government program discovery assistant in {country}. \
You have access to {corpus_len} government programs in our database and {web_len} \
additional opportunities found online.

Available Programs in Database:
{programs}{web}

User Profile: {profile}
User Message: \"{message}\"

YOUR TASK - RECOMMEND PROGRAMS NOW:
1. IMMEDIATELY recommend 2-3 specific programs from the database list above
2. If relevant online opportunities are found, mention 1-2 of them as additional options
3. For each program, explain: what it is, why it's suitable, benefits, requirements, funding amount, deadline
4. Provide specific application steps for each program
5. Only after providing full program details, briefly mention 1-2 missing profile details if needed

RESPOND IN JSON FORMAT:
{{
  \"message\": \"Your detailed program recommendations\",
  \"recommendedPrograms\": [\"program_id_1\", \"program_id_2\"],
  \"webResults\": [\"url_1\", \"url_2\"],
  \"suggestions\": [\"Ask for age\", \"Ask for education level\"],
  \"confidence\": 0.85
}}",
        country = country,
        corpus_len = corpus.len(),
        web_len = web_results.len(),
        programs = programs_context(corpus),
        web = web_context(web_results),
        profile = profile_context(profile),
        message = message,
    )
}

/// Static categorized overview for the empty-corpus tier.
///
/// Enumerates every category in the closed set, grouped for readability.
pub fn canned_overview(country: &str) -> String {
    format!(
        "Here are the main types of government programs available in {country}:

**Scholarships & Education** (scholarship, grant)
- Student scholarships for various education levels
- Merit-based and need-based financial aid
- International study opportunities

**Business & Financial Support** (loan, business, agriculture)
- Small business loans and grants
- Entrepreneurship development programs
- Agricultural and farming support

**Skill Development & Training** (skill_training, technology)
- Technical and vocational training
- IT and digital skills programs
- Professional certification courses

**Employment & Jobs** (employment, youth)
- Job placement and career services
- Internship programs
- Public sector employment opportunities

**Housing & Infrastructure** (housing)
- Affordable housing schemes
- Home improvement grants
- Rural development programs

**Healthcare & Inclusion** (health, disability, women_empowerment)
- Health insurance schemes
- Medical treatment support
- Disability assistance and women's empowerment programs

To get specific program recommendations, please tell me about your age, \
education, location, and what type of support you're looking for."
    )
}

/// Deterministic fallback message embedding the first programs' details.
pub fn fallback_message(programs: &[Program], country: &str) -> String {
    let entries = programs
        .iter()
        .take(FALLBACK_PROGRAM_COUNT)
        .map(|p| {
            let benefits = if p.benefits.is_empty() {
                "Contact the program office for benefit details".to_string()
            } else {
                p.benefits.join(", ")
            };
            let requirements = if p.requirements.is_empty() {
                "See the program office for requirements".to_string()
            } else {
                p.requirements.join(", ")
            };
            let funding = p
                .funding_amount
                .as_ref()
                .map(|f| f.display())
                .unwrap_or_else(|| "Varies by applicant".to_string());
            let deadline = p
                .application_deadline
                .as_deref()
                .unwrap_or("Open / rolling");
            let apply = p
                .application_url
                .as_deref()
                .unwrap_or("Contact the program office for application details");

            format!(
                "**{title}** ({category})\n{description}\n\n\
**Benefits:** {benefits}\n\
**Requirements:** {requirements}\n\
**Funding Amount:** {funding}\n\
**Application Deadline:** {deadline}\n\
**How to Apply:** {apply}\n\n---",
                title = p.title,
                category = p.category.as_str(),
                description = p.description,
            )
        })
        .collect::<Vec<_>>()
        .join("\n\n");

    format!(
        "Here are specific government programs available for you in {country}:\n\n\
{entries}\n\n\
These programs are currently available and accepting applications. For more \
personalized recommendations, you can share your age, education level, \
location, and specific goals."
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Program, ProgramCategory};

    fn program(id: &str, title: &str) -> Program {
        Program::new(id, title, ProgramCategory::Scholarship, "A test program")
    }

    #[test]
    fn test_programs_context_bounded_to_ten() {
        let corpus: Vec<Program> = (0..15)
            .map(|i| program(&format!("p{}", i), &format!("Program {}", i)))
            .collect();

        let context = programs_context(&corpus);
        assert_eq!(context.lines().count(), 10);
        assert!(context.contains("Program 0 (scholarship)"));
        assert!(!context.contains("Program 10"));
    }

    #[test]
    fn test_web_context_empty_when_no_results() {
        assert_eq!(web_context(&[]), "");
    }

    #[test]
    fn test_profile_context_fallback_label() {
        let profile = crate::types::UserProfile::new();
        assert_eq!(profile_context(&profile), "Basic profile");
    }

    #[test]
    fn test_canned_overview_enumerates_all_categories() {
        let overview = canned_overview("Pakistan");
        for category in crate::types::ALL_CATEGORIES {
            assert!(
                overview.contains(category.as_str()),
                "overview missing category {}",
                category.as_str()
            );
        }
    }

    #[test]
    fn test_fallback_message_contains_first_three_titles() {
        let corpus: Vec<Program> = (0..5)
            .map(|i| program(&format!("p{}", i), &format!("Program {}", i)))
            .collect();

        let message = fallback_message(&corpus, "Pakistan");
        assert!(message.contains("Program 0"));
        assert!(message.contains("Program 1"));
        assert!(message.contains("Program 2"));
        assert!(!message.contains("Program 3"));
    }
}
