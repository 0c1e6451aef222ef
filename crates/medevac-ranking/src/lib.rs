//! # MEDEVAC Ranking
//!
//! Orders candidate strategies by contextual fit.
//!
//! Ranking is a capability behind [`StrategyRanker`]:
//! - [`ArbiterRanker`]: remote coherence scorer, one attempt, bounded by a timeout
//! - [`FallbackRanker`]: deterministic local heuristic
//!
//! [`RankingService`] tries the remote ranker and substitutes the fallback on
//! any failure, so callers always receive a fully ranked list. Doctrine
//! generation never depends on this crate.

pub mod arbiter;
pub mod fallback;
pub mod query;
pub mod ranker;

pub use arbiter::{ArbiterConfig, ArbiterRanker};
pub use fallback::FallbackRanker;
pub use query::constraint_query;
pub use ranker::{RankingService, StrategyRanker};
