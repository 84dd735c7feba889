//! Criterion execution engine
//!
//! Pillars run one after another in input order. Inside a pillar every
//! criterion runs on a rayon pool and the results are collected back in
//! criterion order. A criterion that errors or panics becomes a failing
//! result; it never aborts the run.

use crate::ai::Evaluator;
use crate::checks::{CheckContext, RepoIndex};
use crate::models::{Criterion, CriterionResult, Pillar, ProjectInfo, ResultsByPillar};
use anyhow::Result;
use rayon::prelude::*;
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, error, info};

/// Message used for evaluator-backed criteria when no evaluator is configured
pub const MISSING_EVALUATOR_MESSAGE: &str = "Requires external evaluator";

/// Progress notifications, delivered on the calling thread in pillar order
#[derive(Debug, Clone, Copy)]
pub enum ProgressEvent<'a> {
    PillarStarted {
        pillar: &'a Pillar,
        index: usize,
        total: usize,
    },
    PillarCompleted {
        pillar: &'a Pillar,
        results: &'a [CriterionResult],
    },
}

pub type ProgressCallback = Box<dyn for<'a> Fn(ProgressEvent<'a>) + Send + Sync>;

pub struct ExecutionEngine {
    /// Number of worker threads for one pillar's batch
    workers: usize,
    evaluator: Option<Arc<dyn Evaluator>>,
    progress_callback: Option<ProgressCallback>,
}

impl ExecutionEngine {
    /// Create an engine
    ///
    /// # Arguments
    /// * `workers` - Number of worker threads (0 = auto-detect, capped at 16)
    pub fn new(workers: usize) -> Self {
        let workers = if workers == 0 {
            std::thread::available_parallelism()
                .map(|p| p.get())
                .unwrap_or(4)
                .min(16)
        } else {
            workers
        };

        Self {
            workers,
            evaluator: None,
            progress_callback: None,
        }
    }

    pub fn with_evaluator(mut self, evaluator: Arc<dyn Evaluator>) -> Self {
        self.evaluator = Some(evaluator);
        self
    }

    pub fn with_progress_callback(mut self, callback: ProgressCallback) -> Self {
        self.progress_callback = Some(callback);
        self
    }

    pub fn workers(&self) -> usize {
        self.workers
    }

    pub fn has_evaluator(&self) -> bool {
        self.evaluator.is_some()
    }

    fn notify(&self, event: ProgressEvent<'_>) {
        if let Some(ref callback) = self.progress_callback {
            callback(event);
        }
    }

    /// Run every criterion of every pillar against the repository
    pub fn run(
        &self,
        pillars: &[Pillar],
        repo_path: &Path,
        project: &ProjectInfo,
    ) -> Result<ResultsByPillar> {
        let start = Instant::now();
        let index = RepoIndex::build(repo_path);
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.workers)
            .build()?;

        let ctx = CheckContext {
            repo_path,
            project,
            evaluator: self.evaluator.as_deref(),
            index: &index,
        };

        let mut results = ResultsByPillar::with_capacity(pillars.len());
        for (i, pillar) in pillars.iter().enumerate() {
            self.notify(ProgressEvent::PillarStarted {
                pillar,
                index: i,
                total: pillars.len(),
            });

            let pillar_results: Vec<CriterionResult> = pool.install(|| {
                pillar
                    .criteria
                    .par_iter()
                    .map(|criterion| self.run_criterion(criterion, &ctx))
                    .collect()
            });

            self.notify(ProgressEvent::PillarCompleted {
                pillar,
                results: &pillar_results,
            });
            results.insert(pillar.id.clone(), pillar_results);
        }

        info!(
            "Evaluated {} criteria across {} pillars in {:?}",
            results.values().map(Vec::len).sum::<usize>(),
            results.len(),
            start.elapsed()
        );
        Ok(results)
    }

    fn run_criterion(&self, criterion: &Criterion, ctx: &CheckContext<'_>) -> CriterionResult {
        if criterion.requires_external_evaluator && ctx.evaluator.is_none() {
            debug!("{}: skipped, no evaluator", criterion.id);
            return CriterionResult::skipped(criterion.id.clone(), MISSING_EVALUATOR_MESSAGE);
        }

        let outcome = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            criterion.check.run(ctx)
        }));

        match outcome {
            Ok(Ok(outcome)) => {
                debug!(
                    "{}: {}",
                    criterion.id,
                    if outcome.skipped {
                        "skipped"
                    } else if outcome.pass {
                        "pass"
                    } else {
                        "fail"
                    }
                );
                CriterionResult::from_outcome(criterion.id.clone(), outcome)
            }
            Ok(Err(e)) => {
                debug!("{}: check error: {:#}", criterion.id, e);
                CriterionResult::failed(criterion.id.clone(), format!("Check failed: {:#}", e))
            }
            Err(panic_info) => {
                let panic_msg = if let Some(s) = panic_info.downcast_ref::<&str>() {
                    s.to_string()
                } else if let Some(s) = panic_info.downcast_ref::<String>() {
                    s.clone()
                } else {
                    "Unknown panic".to_string()
                };
                error!("Criterion {} panicked: {}", criterion.id, panic_msg);
                CriterionResult::failed(
                    criterion.id.clone(),
                    format!("Check failed: {}", panic_msg),
                )
            }
        }
    }
}

impl Default for ExecutionEngine {
    fn default() -> Self {
        Self::new(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::{AiResult, Evaluation};
    use crate::checks::Check;
    use crate::models::CheckOutcome;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    fn pillar(id: &str, criteria: Vec<(&str, Check)>) -> Pillar {
        criteria
            .into_iter()
            .fold(Pillar::new(id, id, "", ""), |p, (cid, check)| {
                p.criterion(cid, cid, 1, check)
            })
    }

    fn passing(message: &'static str) -> Check {
        Check::custom(move |_| Ok(CheckOutcome::pass(message)))
    }

    struct Yes;

    impl Evaluator for Yes {
        fn evaluate(&self, _prompt: &str, _context: &str) -> AiResult<Evaluation> {
            Ok(Evaluation {
                pass: true,
                message: "yes".into(),
                details: None,
            })
        }
    }

    #[test]
    fn test_results_keep_criterion_order() {
        let criteria = (0..40)
            .map(|i| {
                let check = Check::custom(move |_| {
                    std::thread::sleep(std::time::Duration::from_millis((40 - i) as u64 % 7));
                    Ok(CheckOutcome::pass(format!("#{}", i)))
                });
                (format!("c{}", i), check)
            })
            .collect::<Vec<_>>();
        let p = criteria
            .into_iter()
            .fold(Pillar::new("p", "P", "", ""), |p, (id, check)| {
                p.criterion(id.clone(), id, 1, check)
            });

        let dir = tempfile::tempdir().unwrap();
        let results = ExecutionEngine::new(8)
            .run(&[p], dir.path(), &ProjectInfo::default())
            .unwrap();
        let ids: Vec<_> = results["p"].iter().map(|r| r.criterion_id.clone()).collect();
        let expected: Vec<_> = (0..40).map(|i| format!("c{}", i)).collect();
        assert_eq!(ids, expected);
    }

    #[test]
    fn test_missing_evaluator_skips_without_running() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let criterion = Criterion::new(
            "docs.quality",
            "Docs quality",
            "docs",
            4,
            Check::custom(move |_| {
                counter.fetch_add(1, Ordering::SeqCst);
                Ok(CheckOutcome::pass("ran"))
            }),
        )
        .requiring_evaluator();
        let p = Pillar::new("docs", "Docs", "", "").with_criterion(criterion);

        let dir = tempfile::tempdir().unwrap();
        let results = ExecutionEngine::new(2)
            .run(std::slice::from_ref(&p), dir.path(), &ProjectInfo::default())
            .unwrap();
        let r = &results["docs"][0];
        assert!(r.skipped);
        assert!(!r.pass);
        assert_eq!(r.message, MISSING_EVALUATOR_MESSAGE);
        assert_eq!(calls.load(Ordering::SeqCst), 0);

        // With an evaluator the same criterion runs
        let results = ExecutionEngine::new(2)
            .with_evaluator(Arc::new(Yes))
            .run(&[p], dir.path(), &ProjectInfo::default())
            .unwrap();
        assert!(results["docs"][0].pass);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_errors_and_panics_become_failures() {
        let p = pillar(
            "p",
            vec![
                ("err", Check::custom(|_| anyhow::bail!("disk on fire"))),
                ("panic", Check::custom(|_| panic!("unexpected layout"))),
                ("ok", passing("fine")),
            ],
        );
        let dir = tempfile::tempdir().unwrap();
        let results = ExecutionEngine::new(2)
            .run(&[p], dir.path(), &ProjectInfo::default())
            .unwrap();
        let rs = &results["p"];

        assert!(!rs[0].pass && !rs[0].skipped);
        assert_eq!(rs[0].message, "Check failed: disk on fire");
        assert!(!rs[1].pass && !rs[1].skipped);
        assert!(rs[1].message.contains("Check failed"));
        assert!(rs[1].message.contains("unexpected layout"));
        assert!(rs[2].pass);
    }

    #[test]
    fn test_progress_events_fire_in_pillar_order() {
        let events = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&events);
        let engine = ExecutionEngine::new(2).with_progress_callback(Box::new(move |event: ProgressEvent<'_>| {
            let entry = match event {
                ProgressEvent::PillarStarted { pillar, index, total } => {
                    format!("start {} {}/{}", pillar.id, index + 1, total)
                }
                ProgressEvent::PillarCompleted { pillar, results } => {
                    format!("done {} {}", pillar.id, results.len())
                }
            };
            sink.lock().unwrap().push(entry);
        }));

        let pillars = vec![
            pillar("a", vec![("a1", passing("x")), ("a2", passing("y"))]),
            pillar("b", vec![]),
            pillar("c", vec![("c1", passing("z"))]),
        ];
        let dir = tempfile::tempdir().unwrap();
        let results = engine
            .run(&pillars, dir.path(), &ProjectInfo::default())
            .unwrap();

        assert_eq!(
            results.keys().cloned().collect::<Vec<_>>(),
            vec!["a", "b", "c"]
        );
        assert_eq!(
            *events.lock().unwrap(),
            vec![
                "start a 1/3",
                "done a 2",
                "start b 2/3",
                "done b 0",
                "start c 3/3",
                "done c 1",
            ]
        );
    }

    #[test]
    fn test_auto_workers_are_capped() {
        let engine = ExecutionEngine::new(0);
        assert!(engine.workers() >= 1 && engine.workers() <= 16);
        assert!(!engine.has_evaluator());
    }
}
