//! Strategy Types - protocol allocations and the strategies built from them
//!
//! A protocol allocation stores only quantities per patient. Costs are
//! priced against a cost table when the allocation is aggregated, so a
//! strategy's `total_cost` always reflects the table it was generated with.

use super::casualty::Severity;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Doctrine identifier, in the engine's fixed evaluation order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DoctrineId {
    /// MARCH protocol, the unconditional baseline
    ImmediateIntervention,
    /// Golden hour: stabilize and package for medevac
    EvacuationStabilization,
    /// Treat in place for hours or days
    ProlongedFieldCare,
    /// NATO Role 2 damage control surgery
    SurgicalIntervention,
    /// Expectant triage for overwhelming casualty load
    MassCasualtyTriage,
    /// Siege medicine: no resupply, no evacuation
    ExtremeConservation,
}

impl DoctrineId {
    /// All doctrines in evaluation order
    pub const ALL: [DoctrineId; 6] = [
        DoctrineId::ImmediateIntervention,
        DoctrineId::EvacuationStabilization,
        DoctrineId::ProlongedFieldCare,
        DoctrineId::SurgicalIntervention,
        DoctrineId::MassCasualtyTriage,
        DoctrineId::ExtremeConservation,
    ];
}

impl std::fmt::Display for DoctrineId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DoctrineId::ImmediateIntervention => write!(f, "immediate_intervention"),
            DoctrineId::EvacuationStabilization => write!(f, "evacuation_stabilization"),
            DoctrineId::ProlongedFieldCare => write!(f, "prolonged_field_care"),
            DoctrineId::SurgicalIntervention => write!(f, "surgical_intervention"),
            DoctrineId::MassCasualtyTriage => write!(f, "mass_casualty_triage"),
            DoctrineId::ExtremeConservation => write!(f, "extreme_conservation"),
        }
    }
}

/// One equipment line of a tier plan: `quantity` of `item` per patient
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllocationLine {
    pub item: String,
    pub quantity: u32,
}

impl AllocationLine {
    pub fn new(item: impl Into<String>, quantity: u32) -> Self {
        Self {
            item: item.into(),
            quantity,
        }
    }
}

/// Per-severity equipment plan for one doctrine
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProtocolAllocation {
    pub critical: Vec<AllocationLine>,
    pub urgent: Vec<AllocationLine>,
    pub delayed: Vec<AllocationLine>,
    pub minimal: Vec<AllocationLine>,
    /// Short human-readable summary of the plan
    pub rationale: String,
}

impl ProtocolAllocation {
    /// The four treatment tiers with their lines, most acute first
    pub fn tiers(&self) -> [(Severity, &[AllocationLine]); 4] {
        [
            (Severity::Critical, self.critical.as_slice()),
            (Severity::Urgent, self.urgent.as_slice()),
            (Severity::Delayed, self.delayed.as_slice()),
            (Severity::Minimal, self.minimal.as_slice()),
        ]
    }

    /// Lines for one severity (expectant patients get no plan lines)
    pub fn lines(&self, severity: Severity) -> &[AllocationLine] {
        match severity {
            Severity::Critical => &self.critical,
            Severity::Urgent => &self.urgent,
            Severity::Delayed => &self.delayed,
            Severity::Minimal => &self.minimal,
            Severity::Expectant => &[],
        }
    }
}

/// A doctrine's projected outcome for one scenario
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MedicalStrategy {
    pub doctrine: DoctrineId,
    pub name: String,
    /// Protocol summary; free of scenario-specific constraints
    pub description: String,
    pub protocol: ProtocolAllocation,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_cost: Decimal,
    /// Fixed per doctrine (0.0 - 1.0)
    pub estimated_survival_rate: f64,
    /// Inventory minus projected consumption; negative means the doctrine
    /// would exhaust that item
    pub equipment_preserved: BTreeMap<String, i64>,
    /// Projected consumption across the casualty population
    pub equipment_consumed: BTreeMap<String, u64>,
    /// Scenario-specific justification
    pub rationale: String,
}

impl MedicalStrategy {
    /// Items this strategy would drive below zero
    pub fn exhausted_items(&self) -> impl Iterator<Item = &str> {
        self.equipment_preserved
            .iter()
            .filter(|(_, remaining)| **remaining < 0)
            .map(|(item, _)| item.as_str())
    }

    /// Whether the inventory covers the projected consumption
    pub fn is_feasible(&self) -> bool {
        self.exhausted_items().next().is_none()
    }

    /// Sum of the remaining reserve across inventory items
    pub fn total_preserved(&self) -> i64 {
        self.equipment_preserved.values().sum()
    }
}

/// Where a coherence score came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RankingSource {
    Arbiter,
    Fallback,
}

/// A strategy with its coherence score
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankedStrategy {
    pub strategy: MedicalStrategy,
    /// Coherence score (0.0 - 1.0)
    pub coherence_score: f64,
    pub source: RankingSource,
}
