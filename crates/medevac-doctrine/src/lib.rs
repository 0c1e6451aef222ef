//! # MEDEVAC Doctrine
//!
//! Doctrine generation engine for field hospital mass-casualty response.
//!
//! ## Pipeline
//!
//! ```text
//! Scenario → tier counts → applicable doctrines → allocation × aggregator → strategies
//! ```
//!
//! - [`CostTable`]: unit cost per equipment item, passed explicitly
//! - [`aggregator`]: total cost and per-item consumption of an allocation
//! - [`doctrine`]: the six doctrine rows and their predicates
//! - [`DoctrineEngine`]: selects doctrines and builds one strategy each
//!
//! The engine is synchronous and holds no mutable state; one instance can
//! serve concurrent requests.

pub mod aggregator;
pub mod cost_table;
pub mod doctrine;
pub mod engine;

pub use aggregator::{aggregate, reserve, Aggregate};
pub use cost_table::CostTable;
pub use doctrine::{catalog, DoctrineSpec, ProtocolCatalogEntry, ScenarioProfile, Triage};
pub use engine::DoctrineEngine;
