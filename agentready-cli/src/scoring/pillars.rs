use crate::models::{Pillar, PillarScore, ResultsByPillar};

/// Per-pillar pass counts over non-skipped results, in pillar order
pub fn pillar_scores(pillars: &[Pillar], results: &ResultsByPillar) -> Vec<PillarScore> {
    pillars
        .iter()
        .map(|pillar| {
            let (passed, total) = results
                .get(&pillar.id)
                .map(|rs| {
                    rs.iter().filter(|r| !r.skipped).fold((0, 0), |(p, t), r| {
                        (p + usize::from(r.pass), t + 1)
                    })
                })
                .unwrap_or((0, 0));

            PillarScore {
                pillar_id: pillar.id.clone(),
                passed,
                total,
                percentage: percentage(passed, total),
            }
        })
        .collect()
}

fn percentage(passed: usize, total: usize) -> u32 {
    if total == 0 {
        0
    } else {
        (passed as f64 / total as f64 * 100.0).round() as u32
    }
}
