//! Filter and rank a Pokedex by minimum stat thresholds.
//!
//! The pipeline is load, build predicates, narrow the pool, then derive
//! two views: every record that meets all six minimums sorted by total,
//! and the closest matches ranked by how many minimums they meet.

pub mod config;
pub mod criteria;
pub mod dataset;
pub mod errors;
pub mod filter;
pub mod output;
pub mod query;
pub mod scoring;
pub mod tui;
