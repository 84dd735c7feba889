use super::LEVEL_PASS_THRESHOLD;
use crate::models::{LevelResult, NextLevelProgress, Pillar, ResultsByPillar, MAX_LEVEL, MIN_LEVEL};

#[derive(Debug, Default, Clone, Copy)]
struct Bucket {
    passed: usize,
    size: usize,
}

impl Bucket {
    fn clears(&self) -> bool {
        self.passed as f64 / self.size as f64 >= LEVEL_PASS_THRESHOLD
    }

    fn needed(&self) -> usize {
        (self.size as f64 * LEVEL_PASS_THRESHOLD).ceil() as usize
    }
}

/// Highest maturity level reached, plus progress toward the one above it.
///
/// A criterion without a recorded result counts as failed. Skipped results
/// are dropped before bucketing. An empty level neither blocks the walk nor
/// counts as achieved.
pub fn compute_level(pillars: &[Pillar], results: &ResultsByPillar) -> LevelResult {
    let mut buckets = [Bucket::default(); MAX_LEVEL as usize];

    for pillar in pillars {
        let pillar_results = results.get(&pillar.id);
        for criterion in &pillar.criteria {
            if !(MIN_LEVEL..=MAX_LEVEL).contains(&criterion.level) {
                continue;
            }
            let result =
                pillar_results.and_then(|rs| rs.iter().find(|r| r.criterion_id == criterion.id));
            let pass = match result {
                Some(r) if r.skipped => continue,
                Some(r) => r.pass,
                None => false,
            };
            let bucket = &mut buckets[(criterion.level - 1) as usize];
            bucket.size += 1;
            bucket.passed += usize::from(pass);
        }
    }

    let mut achieved = MIN_LEVEL;
    for level in MIN_LEVEL..=MAX_LEVEL {
        let bucket = buckets[(level - 1) as usize];
        if bucket.size == 0 {
            continue;
        }
        if !bucket.clears() {
            break;
        }
        achieved = level;
    }

    let next_level_progress = if achieved < MAX_LEVEL {
        let next = achieved + 1;
        let bucket = buckets[(next - 1) as usize];
        let needed = bucket.needed();
        NextLevelProgress {
            current: bucket.passed,
            needed,
            remaining: needed.saturating_sub(bucket.passed),
            next_level: Some(next),
        }
    } else {
        NextLevelProgress {
            current: 0,
            needed: 0,
            remaining: 0,
            next_level: None,
        }
    };

    LevelResult {
        level: achieved,
        next_level_progress,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checks::Check;
    use crate::models::CriterionResult;

    /// One entry per pillar: criteria as (level, outcome), where outcome is
    /// Some(pass) or None for skipped
    fn build(layout: &[(&str, &[(u8, Option<bool>)])]) -> (Vec<Pillar>, ResultsByPillar) {
        let mut pillars = Vec::new();
        let mut results = ResultsByPillar::new();
        for (pid, criteria) in layout {
            let mut pillar = Pillar::new(*pid, *pid, "", "");
            let mut rs = Vec::new();
            for (i, (level, outcome)) in criteria.iter().enumerate() {
                let id = format!("{}.{}", pid, i);
                pillar = pillar.criterion(id.clone(), "c", *level, Check::FileExists(&["x"]));
                rs.push(match outcome {
                    Some(true) => CriterionResult::passed(id, "ok"),
                    Some(false) => CriterionResult::failed(id, "no"),
                    None => CriterionResult::skipped(id, "skip"),
                });
            }
            pillars.push(pillar);
            results.insert(pid.to_string(), rs);
        }
        (pillars, results)
    }

    #[test]
    fn test_five_pillars_with_failing_level_two() {
        let row: &[(u8, Option<bool>)] = &[(1, Some(true)), (2, Some(false))];
        let (pillars, results) =
            build(&[("a", row), ("b", row), ("c", row), ("d", row), ("e", row)]);

        let level = compute_level(&pillars, &results);
        assert_eq!(level.level, 1);
        assert_eq!(
            level.next_level_progress,
            NextLevelProgress {
                current: 0,
                needed: 4,
                remaining: 4,
                next_level: Some(2),
            }
        );
    }

    #[test]
    fn test_only_skipped_results_stay_at_floor() {
        let (pillars, results) = build(&[("a", &[(3, None)])]);
        let level = compute_level(&pillars, &results);
        assert_eq!(level.level, 1);
        assert_eq!(
            level.next_level_progress,
            NextLevelProgress {
                current: 0,
                needed: 0,
                remaining: 0,
                next_level: Some(2),
            }
        );
    }

    #[test]
    fn test_threshold_is_inclusive() {
        let mut row = vec![(2u8, Some(true)); 8];
        row.extend([(2u8, Some(false)); 2]);
        let (pillars, results) = build(&[("a", &row)]);
        assert_eq!(compute_level(&pillars, &results).level, 2);

        let mut row = vec![(2u8, Some(true)); 7];
        row.extend([(2u8, Some(false)); 3]);
        let (pillars, results) = build(&[("a", &row)]);
        assert_eq!(compute_level(&pillars, &results).level, 1);
    }

    #[test]
    fn test_failed_level_gates_higher_levels() {
        // L3 fails, L4 and L5 are perfect but unreachable
        let (pillars, results) = build(&[(
            "a",
            &[
                (1, Some(true)),
                (2, Some(true)),
                (3, Some(false)),
                (4, Some(true)),
                (5, Some(true)),
            ],
        )]);
        let level = compute_level(&pillars, &results);
        assert_eq!(level.level, 2);
        assert_eq!(level.next_level_progress.next_level, Some(3));
        assert_eq!(level.next_level_progress.needed, 1);
        assert_eq!(level.next_level_progress.remaining, 1);
    }

    #[test]
    fn test_empty_levels_are_passed_through() {
        let (pillars, results) = build(&[("a", &[(1, Some(true)), (4, Some(true))])]);
        let level = compute_level(&pillars, &results);
        assert_eq!(level.level, 4);
        assert_eq!(level.next_level_progress.next_level, Some(5));
        assert_eq!(level.next_level_progress.needed, 0);
    }

    #[test]
    fn test_max_level_has_no_next() {
        let (pillars, results) = build(&[("a", &[(5, Some(true))])]);
        let level = compute_level(&pillars, &results);
        assert_eq!(level.level, 5);
        assert_eq!(level.next_level_progress.next_level, None);
        assert_eq!(level.next_level_progress.remaining, 0);
    }

    #[test]
    fn test_missing_result_counts_as_failure() {
        let (pillars, mut results) = build(&[("a", &[(1, Some(true)), (1, Some(true))])]);
        results["a"].pop();
        let level = compute_level(&pillars, &results);
        // 1 of 2 passes at level 1
        assert_eq!(level.level, 1);
        assert_eq!(level.next_level_progress.next_level, Some(2));
    }

    #[test]
    fn test_empty_input_is_level_one() {
        let level = compute_level(&[], &ResultsByPillar::new());
        assert_eq!(level.level, 1);
        assert_eq!(level.next_level_progress.next_level, Some(2));
    }

    #[test]
    fn test_same_input_same_output() {
        let (pillars, results) = build(&[("a", &[(1, Some(true)), (2, Some(false))])]);
        assert_eq!(
            compute_level(&pillars, &results),
            compute_level(&pillars, &results)
        );
    }
}
