pub mod engine;

pub use engine::{satisfied_count, score_pool, top_n, MatchScore, DEFAULT_TOP_N};
