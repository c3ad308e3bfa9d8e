//! Ranking presenter.
//!
//! Orders scored entities by total, highest first, and numbers them. Equal
//! totals keep their input order so rank badges are reproducible.

use crate::score::ScoreResult;
use serde::{Deserialize, Serialize};

/// A scored entity with its 1-based position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ranked<T> {
    pub rank: u32,
    pub entity: T,
    pub score: ScoreResult,
}

/// Stable sort by `total` descending, then assign ranks #1, #2, …
pub fn rank<T>(scored: Vec<(T, ScoreResult)>) -> Vec<Ranked<T>> {
    let mut scored = scored;
    // slice::sort_by is stable
    scored.sort_by(|(_, a), (_, b)| b.total.total_cmp(&a.total));

    scored
        .into_iter()
        .zip(1u32..)
        .map(|((entity, score), rank)| Ranked {
            rank,
            entity,
            score,
        })
        .collect()
}
