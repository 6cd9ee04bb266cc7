use std::cmp::Ordering;

use serde::Serialize;

use crate::dataset::{Pokemon, Stat};

/// How many rows the ranked view keeps unless the caller asks otherwise.
pub const DEFAULT_TOP_N: usize = 10;

/// How well one record did against the six thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MatchScore {
    /// How many thresholds the record met, 0 through 6
    pub satisfied: u8,
    /// satisfied / 6, always in [0.0, 1.0]
    pub ratio: f64,
}

/// Count how many threshold predicates the record satisfies. A stat equal
/// to its minimum counts as satisfied.
pub fn satisfied_count(pokemon: &Pokemon, thresholds: &[(Stat, u16)]) -> u8 {
    thresholds
        .iter()
        .filter(|&&(stat, min)| pokemon.stat(stat) >= min)
        .count() as u8
}

/// Score every pool member against the thresholds, preserving pool order.
/// The divisor is the full stat count, so a record is never graded on a
/// partial predicate set.
pub fn score_pool(pool: &[Pokemon], thresholds: &[(Stat, u16)]) -> Vec<(Pokemon, MatchScore)> {
    pool.iter()
        .map(|pokemon| {
            let satisfied = satisfied_count(pokemon, thresholds);
            let score = MatchScore {
                satisfied,
                ratio: f64::from(satisfied) / Stat::ALL.len() as f64,
            };
            (pokemon.clone(), score)
        })
        .collect()
}

/// Rank scored records by match ratio, best first, and keep the top `n`.
/// The sort is stable and there is no secondary key, so equal ratios keep
/// their pool order.
pub fn top_n(mut scored: Vec<(Pokemon, MatchScore)>, n: usize) -> Vec<(Pokemon, MatchScore)> {
    scored.sort_by(|a, b| {
        b.1.ratio
            .partial_cmp(&a.1.ratio)
            .unwrap_or(Ordering::Equal)
    });
    scored.truncate(n);
    scored
}
