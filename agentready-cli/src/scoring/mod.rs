//! Readiness scoring
//!
//! Two pure reductions over one run's results:
//!
//! - **Pillar scores**: pass ratio per pillar, ignoring skipped results.
//! - **Maturity level**: criteria are bucketed by level and the buckets are
//!   walked from 1 to 5. A bucket clears when at least 80% of its counted
//!   criteria pass; the first bucket below that stops the walk.
//!
//! ```text
//! L1 [###-] 75%  -> stop, level 1
//! L1 [####] 100% -> L2 [#####---] 62% -> stop, level 1 (L1 is the floor)
//! L1 [####] 100% -> L2 (empty) -> L3 [####-] 80% -> level 3
//! ```
//!
//! Neither reduction has side effects; the same results always produce the
//! same scores.

mod levels;
mod pillars;

pub use levels::compute_level;
pub use pillars::pillar_scores;

/// Share of a level's counted criteria that must pass for the level to clear
pub const LEVEL_PASS_THRESHOLD: f64 = 0.8;
