use crate::criteria::ExtraPredicate;
use crate::dataset::{Pokemon, Stat};

/// Narrow records to those passing every extra predicate. This is the
/// candidate pool both result views are computed from; with no extra
/// predicates it is the whole Pokedex in load order.
pub fn base_pool(records: &[Pokemon], extra: &[ExtraPredicate]) -> Vec<Pokemon> {
    records
        .iter()
        .filter(|pokemon| extra.iter().all(|predicate| predicate.matches(pokemon)))
        .cloned()
        .collect()
}

/// Keep only pool members meeting every threshold, sorted by total
/// descending. The sort is stable, so equal totals keep their pool order
/// and repeated runs over the same data always agree.
pub fn fully_matched(pool: &[Pokemon], thresholds: &[(Stat, u16)]) -> Vec<Pokemon> {
    let mut matched: Vec<Pokemon> = pool
        .iter()
        .filter(|pokemon| meets_all(pokemon, thresholds))
        .cloned()
        .collect();
    matched.sort_by(|a, b| b.total.cmp(&a.total));
    matched
}

/// True when the record meets every threshold.
pub fn meets_all(pokemon: &Pokemon, thresholds: &[(Stat, u16)]) -> bool {
    thresholds
        .iter()
        .all(|&(stat, min)| pokemon.stat(stat) >= min)
}
