use std::collections::HashSet;

use crate::{
    models::RepositoryRef,
    services::keywords::{KeywordIndex, DEFAULT_REPOSITORIES, INTEREST_REPOSITORIES, SKILL_REPOSITORIES},
};

/// Picks candidate repositories for free-text skills and interests
///
/// Skill matches come first, then interest matches, then the default pool.
/// Duplicates are dropped by identifier (first occurrence kept) and the list
/// is cut at `cap`. The default pool guarantees a non-empty result.
pub fn select_candidates(skills: &str, interest: &str, cap: usize) -> Vec<RepositoryRef> {
    select_candidates_from(
        &SKILL_REPOSITORIES,
        &INTEREST_REPOSITORIES,
        &DEFAULT_REPOSITORIES,
        skills,
        interest,
        cap,
    )
}

/// Same as [`select_candidates`] over explicit tables
pub fn select_candidates_from(
    skill_index: &KeywordIndex,
    interest_index: &KeywordIndex,
    default_pool: &[RepositoryRef],
    skills: &str,
    interest: &str,
    cap: usize,
) -> Vec<RepositoryRef> {
    let mut seen = HashSet::new();

    skill_index
        .matches(skills)
        .chain(interest_index.matches(interest))
        .chain(default_pool.iter())
        .filter(|repo| seen.insert(repo.as_str().to_lowercase()))
        .take(cap)
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const CAP: usize = 10;

    fn names(repos: &[RepositoryRef]) -> Vec<&str> {
        repos.iter().map(RepositoryRef::as_str).collect()
    }

    #[test]
    fn test_no_keyword_match_returns_default_pool() {
        let selected = select_candidates("cobol", "knitting", CAP);
        let expected: Vec<&str> = DEFAULT_REPOSITORIES.iter().take(CAP).map(RepositoryRef::as_str).collect();
        assert_eq!(names(&selected), expected);
    }

    #[test]
    fn test_empty_input_returns_default_pool() {
        let selected = select_candidates("", "", CAP);
        assert_eq!(selected.len(), CAP);
        assert_eq!(selected[0].as_str(), "facebook/react");
    }

    #[test]
    fn test_skill_matches_come_first() {
        let selected = select_candidates("Rust", "", CAP);
        assert_eq!(selected[0].as_str(), "rust-lang/rust");
        assert_eq!(selected[1].as_str(), "facebook/react");
    }

    #[test]
    fn test_skills_then_interests_then_defaults() {
        let selected = select_candidates("java", "blockchain", CAP);
        assert_eq!(
            &names(&selected)[..4],
            &[
                "spring-projects/spring-framework",
                "ethereum/go-ethereum",
                "bitcoin/bitcoin",
                "facebook/react",
            ]
        );
    }

    #[test]
    fn test_output_is_unique_and_bounded() {
        let selected = select_candidates(
            "javascript typescript python react node ml web css devops",
            "web development frontend backend testing",
            CAP,
        );

        assert_eq!(selected.len(), CAP);
        let unique: HashSet<String> = selected.iter().map(|r| r.as_str().to_lowercase()).collect();
        assert_eq!(unique.len(), selected.len());
    }

    #[test]
    fn test_respects_custom_cap() {
        assert_eq!(select_candidates("react", "", 3).len(), 3);
        assert!(select_candidates("react", "", 0).is_empty());
    }

    #[test]
    fn test_explicit_tables() {
        let skills = KeywordIndex::from_table(&[("zig", &["ziglang/zig", "shared/repo"])]);
        let interests = KeywordIndex::from_table(&[("games", &["Shared/Repo", "bevyengine/bevy"])]);
        let pool = vec![RepositoryRef::new("default/one")];

        let selected = select_candidates_from(&skills, &interests, &pool, "I write Zig", "GAMES", CAP);

        assert_eq!(
            names(&selected),
            vec!["ziglang/zig", "shared/repo", "bevyengine/bevy", "default/one"]
        );
    }
}
