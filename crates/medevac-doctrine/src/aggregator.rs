//! Protocol aggregation
//!
//! Prices a protocol allocation against a cost table for a given casualty
//! population and tallies per-item consumption. Nothing here is clamped
//! against the inventory: a reserve may go negative downstream, which is
//! how infeasible doctrines are reported.

use crate::cost_table::CostTable;
use medevac_common::{DoctrineError, ProtocolAllocation, TierCounts};
use rust_decimal::Decimal;
use std::collections::BTreeMap;

/// Cost and consumption of a protocol across a casualty population
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Aggregate {
    /// Σ quantity × unit cost × tier patients
    pub total_cost: Decimal,
    /// Σ quantity × tier patients, per item, across all tiers
    pub consumption: BTreeMap<String, u64>,
}

/// Aggregate a protocol over the given tier counts
pub fn aggregate(
    protocol: &ProtocolAllocation,
    costs: &CostTable,
    counts: &TierCounts,
) -> Result<Aggregate, DoctrineError> {
    let mut result = Aggregate::default();

    for (severity, lines) in protocol.tiers() {
        let patients = counts.get(severity);
        for line in lines {
            let per_patient = costs.line_cost(&line.item, line.quantity)?;
            result.total_cost += per_patient * Decimal::from(patients);

            *result.consumption.entry(line.item.clone()).or_insert(0) +=
                line.quantity as u64 * patients as u64;
        }
    }

    Ok(result)
}

/// Inventory remaining after consumption, for every stocked item
///
/// Items consumed but never stocked do not appear in the result.
pub fn reserve(
    inventory: &BTreeMap<String, u32>,
    consumption: &BTreeMap<String, u64>,
) -> BTreeMap<String, i64> {
    inventory
        .iter()
        .map(|(item, &stock)| {
            let used = consumption.get(item).copied().unwrap_or(0) as i64;
            (item.clone(), stock as i64 - used)
        })
        .collect()
}
