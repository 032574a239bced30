use rand::{seq::SliceRandom, Rng};
use std::cmp::Ordering;

use crate::models::{AggregatedIssue, ScoredIssue};

/// Per-label contribution to the score; unlisted labels count zero
const LABEL_WEIGHTS: &[(&str, f64)] = &[
    ("good first issue", 10.0),
    ("beginner", 8.0),
    ("easy", 6.0),
    ("bug", 4.0),
    ("enhancement", 3.0),
    ("feature", 2.0),
    ("documentation", 1.0),
    ("performance", 5.0),
    ("architecture", 7.0),
    ("security", 6.0),
];

const REACTION_WEIGHT: f64 = 4.0;
const COMMENT_WEIGHT: f64 = 2.0;
const MAX_STARS_WEIGHT: f64 = 10.0;

pub fn label_weight(label: &str) -> f64 {
    LABEL_WEIGHTS
        .iter()
        .find(|(name, _)| label.eq_ignore_ascii_case(name))
        .map(|(_, weight)| *weight)
        .unwrap_or(0.0)
}

pub fn label_boost(labels: &[String]) -> f64 {
    labels.iter().map(|label| label_weight(label)).sum()
}

/// `min(log10(stars + 1) * 2, 10)`
pub fn repo_stars_weight(stars: u64) -> f64 {
    ((stars as f64 + 1.0).log10() * 2.0).min(MAX_STARS_WEIGHT)
}

pub fn score_issue(issue: AggregatedIssue) -> ScoredIssue {
    let label_boost = label_boost(&issue.labels);
    let final_score = issue.reactions as f64 * REACTION_WEIGHT
        + issue.comments as f64 * COMMENT_WEIGHT
        + label_boost
        + repo_stars_weight(issue.repo_stars);

    ScoredIssue {
        issue,
        label_boost,
        final_score,
    }
}

/// Orders by `final_score` descending and keeps the top `cap`
///
/// Runs of exactly equal scores are shuffled with `rng`, so identical requests
/// may see tied issues in a different order. Issues with distinct scores are
/// always in score order.
pub fn rank_issues<R: Rng + ?Sized>(mut issues: Vec<ScoredIssue>, rng: &mut R, cap: usize) -> Vec<ScoredIssue> {
    issues.sort_by(|a, b| descending(a.final_score, b.final_score));

    let mut start = 0;
    while start < issues.len() {
        let score = issues[start].final_score;
        let end = issues[start..]
            .iter()
            .position(|issue| issue.final_score != score)
            .map_or(issues.len(), |offset| start + offset);
        issues[start..end].shuffle(rng);
        start = end;
    }

    issues.truncate(cap);
    issues
}

fn descending(a: f64, b: f64) -> Ordering {
    b.total_cmp(&a)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    fn issue(id: u64, reactions: u64, comments: u64, labels: &[&str], stars: u64) -> AggregatedIssue {
        AggregatedIssue {
            id,
            title: format!("Issue {}", id),
            html_url: format!("https://github.com/o/r/issues/{}", id),
            repo_name: "r".to_string(),
            labels: labels.iter().map(|l| l.to_string()).collect(),
            reactions,
            comments,
            repo_stars: stars,
        }
    }

    fn scored(id: u64, score: f64) -> ScoredIssue {
        ScoredIssue {
            issue: issue(id, 0, 0, &[], 0),
            label_boost: 0.0,
            final_score: score,
        }
    }

    #[test]
    fn test_reference_score() {
        let scored = score_issue(issue(1, 10, 5, &["bug"], 100));
        let expected = 40.0 + 10.0 + 4.0 + (101f64).log10() * 2.0;

        assert!((scored.final_score - expected).abs() < 1e-9);
        assert!((scored.final_score - 58.01).abs() < 0.01);
        assert_eq!(scored.label_boost, 4.0);
    }

    #[test]
    fn test_label_boost_sums_known_labels_case_insensitively() {
        let labels = vec![
            "Good First Issue".to_string(),
            "documentation".to_string(),
            "needs-triage".to_string(),
        ];
        assert_eq!(label_boost(&labels), 11.0);
        assert_eq!(label_boost(&[]), 0.0);
    }

    #[test]
    fn test_stars_weight_is_capped() {
        assert_eq!(repo_stars_weight(0), 0.0);
        assert!((repo_stars_weight(9) - 2.0).abs() < 1e-9);
        assert_eq!(repo_stars_weight(100_000), 10.0);
        assert_eq!(repo_stars_weight(u64::MAX), 10.0);
    }

    #[test]
    fn test_scoring_is_deterministic() {
        let a = score_issue(issue(1, 3, 7, &["easy", "feature"], 12_345));
        let b = score_issue(issue(1, 3, 7, &["easy", "feature"], 12_345));
        assert_eq!(a, b);
    }

    #[test]
    fn test_rank_orders_by_score_descending() {
        let mut rng = StdRng::seed_from_u64(7);
        let ranked = rank_issues(
            vec![scored(1, 3.0), scored(2, 10.0), scored(3, 5.5), scored(4, -1.0)],
            &mut rng,
            15,
        );

        let ids: Vec<u64> = ranked.iter().map(|s| s.issue.id).collect();
        assert_eq!(ids, vec![2, 3, 1, 4]);
    }

    #[test]
    fn test_rank_truncates_to_cap() {
        let mut rng = StdRng::seed_from_u64(1);
        let issues: Vec<ScoredIssue> = (0..40).map(|i| scored(i, i as f64)).collect();

        let ranked = rank_issues(issues, &mut rng, 15);
        assert_eq!(ranked.len(), 15);
        assert_eq!(ranked[0].issue.id, 39);
        assert_eq!(ranked[14].issue.id, 25);
    }

    #[test]
    fn test_ties_stay_inside_their_score_band() {
        let issues = vec![
            scored(1, 5.0),
            scored(2, 9.0),
            scored(3, 5.0),
            scored(4, 9.0),
            scored(5, 5.0),
            scored(6, 1.0),
        ];

        for seed in 0..20 {
            let mut rng = StdRng::seed_from_u64(seed);
            let ranked = rank_issues(issues.clone(), &mut rng, 15);
            let scores: Vec<f64> = ranked.iter().map(|s| s.final_score).collect();
            assert_eq!(scores, vec![9.0, 9.0, 5.0, 5.0, 5.0, 1.0]);

            let mut top: Vec<u64> = ranked[..2].iter().map(|s| s.issue.id).collect();
            top.sort();
            assert_eq!(top, vec![2, 4]);
        }
    }

    #[test]
    fn test_ties_are_shuffled_across_runs() {
        let issues: Vec<ScoredIssue> = (0..8).map(|i| scored(i, 3.0)).collect();

        let orders: std::collections::HashSet<Vec<u64>> = (0..20)
            .map(|seed| {
                let mut rng = StdRng::seed_from_u64(seed);
                rank_issues(issues.clone(), &mut rng, 15)
                    .iter()
                    .map(|s| s.issue.id)
                    .collect()
            })
            .collect();

        assert!(orders.len() > 1);
    }
}
