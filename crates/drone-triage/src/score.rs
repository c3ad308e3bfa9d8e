//! Weighted factor aggregation.
//!
//! A score is the plain sum of named factor contributions, each bounded to
//! `[0, ceiling]`, with one final clamp of the total to [`MAX_SCORE`].

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Upper bound of every composite score.
pub const MAX_SCORE: f64 = 100.0;

/// Total plus per-factor breakdown returned by a scorer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreResult {
    pub total: f64,
    pub factors: BTreeMap<String, f64>,
}

impl ScoreResult {
    /// Contribution of a single factor, if the scorer produced it.
    #[must_use]
    pub fn factor(&self, name: &str) -> Option<f64> {
        self.factors.get(name).copied()
    }

    /// Sum of all factor contributions before the final clamp.
    #[must_use]
    pub fn factor_sum(&self) -> f64 {
        self.factors.values().sum()
    }
}

/// One named, independently bounded contribution to a composite score.
pub struct Factor<I> {
    pub name: &'static str,
    pub ceiling: f64,
    pub eval: fn(&I) -> f64,
}

impl<I> Factor<I> {
    /// Evaluate the factor, bounded to its own range.
    pub fn contribution(&self, input: &I) -> f64 {
        let value = (self.eval)(input);
        if value.is_nan() {
            0.0
        } else {
            value.clamp(0.0, self.ceiling)
        }
    }
}

/// Ordered, declarative weighting model.
pub struct FactorTable<I: 'static> {
    factors: &'static [Factor<I>],
}

impl<I: 'static> FactorTable<I> {
    pub const fn new(factors: &'static [Factor<I>]) -> Self {
        Self { factors }
    }

    /// Factors in declaration order.
    pub fn factors(&self) -> &'static [Factor<I>] {
        self.factors
    }

    /// Sum of all ceilings.
    pub fn total_ceiling(&self) -> f64 {
        self.factors.iter().map(|f| f.ceiling).sum()
    }

    /// Evaluate every factor and aggregate.
    pub fn score(&self, input: &I) -> ScoreResult {
        let mut factors = BTreeMap::new();
        let mut total = 0.0;
        for factor in self.factors {
            let value = factor.contribution(input);
            total += value;
            factors.insert(factor.name.to_string(), value);
        }

        ScoreResult {
            total: total.min(MAX_SCORE),
            factors,
        }
    }
}
