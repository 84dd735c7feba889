//! Recommendation ranking
//!
//! Every counted failure becomes one [`Recommendation`]. Failures that would
//! unlock the next level come first, then higher impact, then lower effort.
//! The list is capped at [`MAX_RECOMMENDATIONS`].

mod advice;

pub use advice::{lookup, Advice, ADVICE};

use crate::models::{
    Effort, Impact, LevelResult, Pillar, PillarScore, Recommendation, ResultsByPillar,
};
use std::cmp::Reverse;

pub const MAX_RECOMMENDATIONS: usize = 10;

/// Impact of fixing a criterion at `criterion_level` for a repository at `current`.
///
/// Criteria at or below the current level are `Low`: they no longer gate the
/// next level even though they count toward pillar scores.
pub fn impact_for(criterion_level: u8, current: u8) -> Impact {
    if criterion_level == current + 1 {
        Impact::High
    } else if criterion_level == current + 2 {
        Impact::Medium
    } else {
        Impact::Low
    }
}

/// Ranked remediation items for the failed, non-skipped criteria of one run
pub fn rank(
    pillars: &[Pillar],
    results: &ResultsByPillar,
    _scores: &[PillarScore],
    level: &LevelResult,
) -> Vec<Recommendation> {
    let current = level.level;

    let mut ranked: Vec<(u8, Recommendation)> = pillars
        .iter()
        .flat_map(|pillar| {
            let pillar_results = results.get(&pillar.id);
            pillar.criteria.iter().filter_map(move |criterion| {
                let result = pillar_results?
                    .iter()
                    .find(|r| r.criterion_id == criterion.id)?;
                if !result.is_failure() {
                    return None;
                }

                let (description, reason, effort) = match advice::lookup(&criterion.id) {
                    Some(a) => (a.description.to_string(), a.reason.to_string(), a.effort),
                    None => {
                        let (d, r) = advice::fallback(&criterion.id, &criterion.name);
                        (d, r, Effort::Medium)
                    }
                };

                Some((
                    criterion.level,
                    Recommendation {
                        title: criterion.name.clone(),
                        description,
                        reason,
                        effort,
                        impact: impact_for(criterion.level, current),
                        pillar_id: pillar.id.clone(),
                        criterion_id: criterion.id.clone(),
                    },
                ))
            })
        })
        .collect();

    // Stable: ties keep pillar/criterion order
    ranked.sort_by_key(|(criterion_level, rec)| {
        (
            Reverse(*criterion_level == current + 1),
            rec.impact,
            rec.effort,
        )
    });
    ranked.truncate(MAX_RECOMMENDATIONS);
    ranked.into_iter().map(|(_, rec)| rec).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::builtin_pillars;
    use crate::checks::Check;
    use crate::models::{CriterionResult, NextLevelProgress};

    fn at_level(level: u8) -> LevelResult {
        LevelResult {
            level,
            next_level_progress: NextLevelProgress {
                current: 0,
                needed: 0,
                remaining: 0,
                next_level: Some(level + 1),
            },
        }
    }

    fn failing_pillar(id: &str, criteria: &[(&str, u8)]) -> (Pillar, Vec<CriterionResult>) {
        let pillar = criteria.iter().fold(Pillar::new(id, id, "", ""), |p, (cid, lvl)| {
            p.criterion(*cid, *cid, *lvl, Check::FileExists(&["missing"]))
        });
        let results = criteria
            .iter()
            .map(|(cid, _)| CriterionResult::failed(*cid, "missing"))
            .collect();
        (pillar, results)
    }

    #[test]
    fn test_impact_by_distance() {
        assert_eq!(impact_for(2, 1), Impact::High);
        assert_eq!(impact_for(3, 1), Impact::Medium);
        assert_eq!(impact_for(5, 1), Impact::Low);
        assert_eq!(impact_for(1, 1), Impact::Low);
    }

    #[test]
    fn test_sorted_by_next_level_impact_then_effort() {
        // docs.architecture: medium effort, docs.changelog: low effort, both level 3
        let (pillar, rs) = failing_pillar(
            "docs",
            &[
                ("docs.published_docs", 5),
                ("docs.architecture", 3),
                ("docs.changelog", 3),
                ("docs.readme", 1),
                ("docs.agent_instructions_quality", 4),
            ],
        );
        let mut results = ResultsByPillar::new();
        results.insert("docs".into(), rs);

        let recs = rank(&[pillar], &results, &[], &at_level(2));
        let ids: Vec<_> = recs.iter().map(|r| r.criterion_id.as_str()).collect();
        assert_eq!(
            ids,
            vec![
                "docs.changelog",
                "docs.architecture",
                "docs.agent_instructions_quality",
                "docs.readme",
                "docs.published_docs",
            ]
        );
        assert_eq!(recs[0].impact, Impact::High);
        assert_eq!(recs[2].impact, Impact::Medium);
        assert_eq!(recs[3].impact, Impact::Low);
        assert_eq!(recs[3].effort, Effort::Low);
        assert_eq!(recs[4].effort, Effort::High);
    }

    #[test]
    fn test_ties_keep_catalog_order() {
        let (a, ra) = failing_pillar("a", &[("a.x", 2), ("a.y", 2)]);
        let (b, rb) = failing_pillar("b", &[("b.x", 2)]);
        let mut results = ResultsByPillar::new();
        results.insert("a".into(), ra);
        results.insert("b".into(), rb);

        let recs = rank(&[a, b], &results, &[], &at_level(1));
        let ids: Vec<_> = recs.iter().map(|r| r.criterion_id.as_str()).collect();
        assert_eq!(ids, vec!["a.x", "a.y", "b.x"]);
    }

    #[test]
    fn test_capped_at_ten() {
        let pillars = builtin_pillars();
        let mut results = ResultsByPillar::new();
        for p in &pillars {
            results.insert(
                p.id.clone(),
                p.criteria
                    .iter()
                    .map(|c| CriterionResult::failed(c.id.clone(), "missing"))
                    .collect(),
            );
        }
        let recs = rank(&pillars, &results, &[], &at_level(1));
        assert_eq!(recs.len(), MAX_RECOMMENDATIONS);
        assert!(recs.iter().all(|r| r.impact == Impact::High));
    }

    #[test]
    fn test_only_counted_failures_are_recommended() {
        let pillar = Pillar::new("p", "P", "", "")
            .criterion("p.pass", "Pass", 2, Check::FileExists(&["x"]))
            .criterion("p.skip", "Skip", 2, Check::FileExists(&["x"]))
            .criterion("p.fail", "Fail", 2, Check::FileExists(&["x"]))
            .criterion("p.missing", "Missing", 2, Check::FileExists(&["x"]));
        let mut results = ResultsByPillar::new();
        results.insert(
            "p".into(),
            vec![
                CriterionResult::passed("p.pass", "ok"),
                CriterionResult::skipped("p.skip", "Requires external evaluator"),
                CriterionResult::failed("p.fail", "no"),
            ],
        );
        let recs = rank(&[pillar], &results, &[], &at_level(1));
        assert_eq!(recs.len(), 1);
        assert_eq!(recs[0].criterion_id, "p.fail");
    }

    #[test]
    fn test_unknown_ids_get_generic_advice() {
        let (pillar, rs) = failing_pillar("custom", &[("custom.widget", 2)]);
        let mut results = ResultsByPillar::new();
        results.insert("custom".into(), rs);
        let recs = rank(&[pillar], &results, &[], &at_level(1));
        assert_eq!(recs[0].effort, Effort::Medium);
        assert!(recs[0].description.contains("custom.widget"));
        assert!(recs[0].reason.contains("custom.widget"));
    }

    #[test]
    fn test_every_builtin_criterion_has_advice() {
        for pillar in builtin_pillars() {
            for c in &pillar.criteria {
                assert!(lookup(&c.id).is_some(), "no advice for {}", c.id);
            }
        }
        assert_eq!(
            ADVICE.len(),
            builtin_pillars().iter().map(|p| p.criteria.len()).sum::<usize>()
        );
    }
}
