//! # MEDEVAC Common
//!
//! Shared types and errors for the MEDEVAC field hospital doctrine service.
//!
//! ## Core Types
//!
//! - [`Severity`]: triage category (critical, urgent, delayed, minimal, expectant)
//! - [`Casualty`]: a single patient with injuries and a base survival probability
//! - [`Scenario`]: casualties, equipment stock, and operational constraints
//! - [`TierCounts`]: casualty counts per treatment tier, derived once per scenario
//! - [`MedicalStrategy`]: one doctrine's allocation outcome for a scenario
//! - [`RankedStrategy`]: a strategy paired with its coherence score

pub mod error;
pub mod types;

// Re-export commonly used types at crate root
pub use error::{DoctrineError, MedevacError, RankingError, Result};
pub use types::{
    casualty::{Casualty, Severity},
    scenario::{Scenario, TierCounts},
    strategy::{
        AllocationLine, DoctrineId, MedicalStrategy, ProtocolAllocation, RankedStrategy,
        RankingSource,
    },
};

/// MEDEVAC version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default timeout for the remote coherence ranker, in seconds
pub const DEFAULT_RANKING_TIMEOUT_SECS: u64 = 30;

/// Score assigned to a candidate the remote ranker did not score
pub const MISSING_COHERENCE_SCORE: f64 = 0.5;
