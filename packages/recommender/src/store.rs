//! Read-only program store boundary.
//!
//! The pipeline never writes programs; it only reads the corpus a
//! collaborator supplies. [`MemoryProgramStore`] backs tests and
//! development — data is lost on restart.

use async_trait::async_trait;
use std::sync::RwLock;

use crate::error::{RecommendError, Result};
use crate::types::{Program, ProgramCategory, ProgramFilters};

/// Read-only supplier of the candidate program corpus.
#[async_trait]
pub trait ProgramStore: Send + Sync {
    /// All active programs.
    async fn all_programs(&self) -> Result<Vec<Program>>;

    /// Look up one program by id.
    async fn program_by_id(&self, id: &str) -> Result<Option<Program>>;

    /// Active programs in one category.
    async fn programs_by_category(&self, category: ProgramCategory) -> Result<Vec<Program>>;

    /// Active programs matching the filters.
    async fn search(&self, filters: &ProgramFilters) -> Result<Vec<Program>>;
}

/// In-memory program store.
pub struct MemoryProgramStore {
    programs: RwLock<Vec<Program>>,
}

impl MemoryProgramStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self {
            programs: RwLock::new(Vec::new()),
        }
    }

    /// Create a store seeded with programs.
    pub fn with_programs(programs: Vec<Program>) -> Self {
        Self {
            programs: RwLock::new(programs),
        }
    }

    /// Add a program.
    pub fn insert(&self, program: Program) {
        self.programs
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .push(program);
    }

    /// Number of stored programs (active or not).
    pub fn len(&self) -> usize {
        self.programs.read().unwrap_or_else(|e| e.into_inner()).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Remove all programs.
    pub fn clear(&self) {
        self.programs
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .clear();
    }

    fn snapshot(&self) -> Result<Vec<Program>> {
        self.programs
            .read()
            .map(|guard| guard.clone())
            .map_err(|_| RecommendError::Storage("program store lock poisoned".to_string()))
    }
}

impl Default for MemoryProgramStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ProgramStore for MemoryProgramStore {
    async fn all_programs(&self) -> Result<Vec<Program>> {
        Ok(self
            .snapshot()?
            .into_iter()
            .filter(|p| p.is_active)
            .collect())
    }

    async fn program_by_id(&self, id: &str) -> Result<Option<Program>> {
        Ok(self.snapshot()?.into_iter().find(|p| p.id == id))
    }

    async fn programs_by_category(&self, category: ProgramCategory) -> Result<Vec<Program>> {
        Ok(self
            .snapshot()?
            .into_iter()
            .filter(|p| p.is_active && p.category == category)
            .collect())
    }

    async fn search(&self, filters: &ProgramFilters) -> Result<Vec<Program>> {
        Ok(self
            .snapshot()?
            .into_iter()
            .filter(|p| p.is_active && matches_filters(p, filters))
            .collect())
    }
}

/// Filter semantics: each populated filter must hold; list filters
/// require a non-empty overlap with the program's eligibility lists.
fn matches_filters(program: &Program, filters: &ProgramFilters) -> bool {
    let eligibility = &program.eligibility_criteria;

    if !filters.category.is_empty() && !filters.category.contains(&program.category) {
        return false;
    }

    if let Some(age) = filters.age {
        if let Some(min) = eligibility.age_min {
            if age < min {
                return false;
            }
        }
        if let Some(max) = eligibility.age_max {
            if age > max {
                return false;
            }
        }
    }

    if !filters.education.is_empty() && !overlaps(&filters.education, &eligibility.education_level)
    {
        return false;
    }

    if !filters.location.is_empty() && !overlaps(&filters.location, &eligibility.location) {
        return false;
    }

    if !filters.income_level.is_empty()
        && !overlaps(&filters.income_level, &eligibility.income_level)
    {
        return false;
    }

    if let Some(gender) = filters.gender {
        // A program without a gender restriction admits everyone.
        if let Some(program_gender) = eligibility.gender {
            use crate::types::GenderEligibility;
            if gender != GenderEligibility::All
                && program_gender != GenderEligibility::All
                && program_gender != gender
            {
                return false;
            }
        }
    }

    if filters.disability_friendly == Some(true) && eligibility.disability_friendly != Some(true) {
        return false;
    }

    if !filters.keywords.is_empty() {
        let haystack = format!("{} {}", program.title, program.description).to_lowercase();
        if !filters
            .keywords
            .iter()
            .any(|k| haystack.contains(&k.to_lowercase()))
        {
            return false;
        }
    }

    true
}

fn overlaps(filter: &[String], eligibility: &[String]) -> bool {
    filter
        .iter()
        .any(|f| eligibility.iter().any(|e| e.eq_ignore_ascii_case(f)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::sample_programs;
    use crate::types::GenderEligibility;

    fn store() -> MemoryProgramStore {
        MemoryProgramStore::with_programs(sample_programs())
    }

    #[tokio::test]
    async fn test_all_programs_filters_inactive() {
        let store = store();
        let mut inactive =
            Program::new("inactive-1", "Closed Program", ProgramCategory::Loan, "Closed");
        inactive.is_active = false;
        store.insert(inactive);

        let programs = store.all_programs().await.unwrap();
        assert!(programs.iter().all(|p| p.is_active));
        assert!(!programs.iter().any(|p| p.id == "inactive-1"));
    }

    #[tokio::test]
    async fn test_program_by_id() {
        let store = store();
        let first = sample_programs().remove(0);

        let found = store.program_by_id(&first.id).await.unwrap();
        assert_eq!(found.map(|p| p.id), Some(first.id));

        let missing = store.program_by_id("missing").await.unwrap();
        assert!(missing.is_none());
    }

    #[tokio::test]
    async fn test_programs_by_category() {
        let store = store();
        let scholarships = store
            .programs_by_category(ProgramCategory::Scholarship)
            .await
            .unwrap();
        assert!(!scholarships.is_empty());
        assert!(scholarships
            .iter()
            .all(|p| p.category == ProgramCategory::Scholarship));
    }

    #[tokio::test]
    async fn test_search_by_age_range() {
        let store = store();
        let filters = ProgramFilters {
            age: Some(16),
            ..Default::default()
        };

        let results = store.search(&filters).await.unwrap();
        for program in &results {
            let e = &program.eligibility_criteria;
            assert!(e.age_min.map_or(true, |min| 16 >= min));
            assert!(e.age_max.map_or(true, |max| 16 <= max));
        }
    }

    #[tokio::test]
    async fn test_search_by_keyword() {
        let store = store();
        let filters = ProgramFilters {
            keywords: vec!["scholarship".to_string()],
            ..Default::default()
        };

        let results = store.search(&filters).await.unwrap();
        assert!(!results.is_empty());
        for program in &results {
            let haystack =
                format!("{} {}", program.title, program.description).to_lowercase();
            assert!(haystack.contains("scholarship"));
        }
    }

    #[tokio::test]
    async fn test_search_gender_restriction() {
        let store = MemoryProgramStore::new();
        let mut women_only = Program::new(
            "w-1",
            "Women Entrepreneurs Fund",
            ProgramCategory::WomenEmpowerment,
            "Business grants for women",
        );
        women_only.eligibility_criteria.gender = Some(GenderEligibility::Female);
        store.insert(women_only);
        store.insert(Program::new(
            "open-1",
            "Open Fund",
            ProgramCategory::Grant,
            "Anyone may apply",
        ));

        let male_filters = ProgramFilters {
            gender: Some(GenderEligibility::Male),
            ..Default::default()
        };
        let results = store.search(&male_filters).await.unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].id, "open-1");
    }

    #[test]
    fn test_overlap_is_case_insensitive() {
        assert!(overlaps(
            &["Bachelor".to_string()],
            &["bachelor".to_string(), "master".to_string()]
        ));
        assert!(!overlaps(&["phd".to_string()], &["bachelor".to_string()]));
    }
}
