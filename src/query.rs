use crate::criteria::{build_predicates, FilterCriteria};
use crate::dataset::Pokemon;
use crate::errors::CriteriaError;
use crate::filter::{base_pool, fully_matched};
use crate::scoring::{score_pool, top_n, MatchScore};

/// Both result views for one set of criteria.
#[derive(Debug, Clone)]
pub struct QueryOutput {
    /// Records meeting every threshold, total descending
    pub matched: Vec<Pokemon>,
    /// Best records by fraction of thresholds met, best first
    pub top: Vec<(Pokemon, MatchScore)>,
    /// Candidate pool size after the legendary and name filters
    pub pool_size: usize,
}

/// Run the whole pipeline for one interaction: build predicates, narrow
/// the candidate pool, then derive the fully-matched view and the ranked
/// view from that same pool. Called once per `list` invocation and on
/// every criteria change in the TUI.
///
/// # Errors
///
/// `CriteriaError` if a threshold is outside its stat's domain. The
/// store is left untouched either way.
pub fn run_query(
    records: &[Pokemon],
    criteria: &FilterCriteria,
    top: usize,
) -> Result<QueryOutput, CriteriaError> {
    let predicates = build_predicates(criteria)?;
    let pool = base_pool(records, &predicates.extra);
    let matched = fully_matched(&pool, &predicates.thresholds);
    let scored = score_pool(&pool, &predicates.thresholds);
    let top = top_n(scored, top);
    Ok(QueryOutput {
        matched,
        top,
        pool_size: pool.len(),
    })
}
