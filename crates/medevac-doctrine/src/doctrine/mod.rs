//! Doctrine table
//!
//! Each doctrine is one row: display text, a fixed survival estimate, and a
//! per-tier allocation plan. Applicability, triage split, and rationale are
//! selected by matching on the row's [`DoctrineId`], so adding a doctrine
//! means adding a row and its match arms, not a new generator.

mod table;

pub use table::TierPlan;

use crate::aggregator::{aggregate, reserve};
use crate::cost_table::CostTable;
use medevac_common::{
    AllocationLine, DoctrineError, DoctrineId, MedicalStrategy, ProtocolAllocation, Scenario,
    TierCounts,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Item given to expectant casualties as comfort care
pub const COMFORT_CARE_ITEM: &str = "morphine_dose";

/// Comfort-care doses per expectant casualty
pub const COMFORT_CARE_DOSES: u32 = 3;

/// Mass-casualty triage reclassifies floor(critical × 0.4) as expectant
pub fn expectant_count(critical: u32) -> u32 {
    critical * 2 / 5
}

/// Scenario-level aggregates read by the applicability predicates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScenarioProfile {
    pub counts: TierCounts,
    pub hours_until_resupply: f64,
    pub expected_incoming_casualties: u32,
    pub medevac_available: bool,
    pub surgical_capability: bool,
}

impl ScenarioProfile {
    pub fn from_scenario(scenario: &Scenario) -> Self {
        Self {
            counts: scenario.tier_counts(),
            hours_until_resupply: scenario.hours_until_resupply,
            expected_incoming_casualties: scenario.expected_incoming_casualties,
            medevac_available: scenario.medevac_available,
            surgical_capability: scenario.surgical_capability,
        }
    }
}

/// How a doctrine splits the casualty population
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Triage {
    /// Patients receiving the doctrine's tier plan
    pub treated: TierCounts,
    /// Critical patients moved to comfort care
    pub expectant: u32,
}

/// Catalog entry served by `GET /protocols`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProtocolCatalogEntry {
    pub name: String,
    pub description: String,
    pub use_case: String,
}

/// One doctrine row
#[derive(Debug)]
pub struct DoctrineSpec {
    pub id: DoctrineId,
    pub name: &'static str,
    /// Protocol summary handed to the ranker; must not reference scenario constraints
    pub description: &'static str,
    pub summary: &'static str,
    pub use_case: &'static str,
    pub protocol_rationale: &'static str,
    pub survival_rate: f64,
    pub plan: TierPlan,
}

static DOCTRINES: [DoctrineSpec; 6] = [
    DoctrineSpec {
        id: DoctrineId::ImmediateIntervention,
        name: "MARCH Immediate Intervention",
        description: "Full intervention for current critical casualties. Depletes majority of supplies treating current patient load. Maximizes immediate survival - requires rapid resupply or evacuation before additional casualties arrive",
        summary: "Massive hemorrhage, Airway, Respiration, Circulation, Hypothermia",
        use_case: "Immediate trauma response, stop the dying",
        protocol_rationale: "MARCH protocol: immediate hemorrhage control, airway, breathing",
        survival_rate: 0.92,
        plan: table::IMMEDIATE_INTERVENTION,
    },
    DoctrineSpec {
        id: DoctrineId::EvacuationStabilization,
        name: "Golden Hour Stabilization",
        description: "Minimal stabilization for rapid evacuation. Preserves supplies by transferring definitive care burden to Role 3 facility. Effective when medevac available within short timeframe",
        summary: "Stabilize for evacuation within 60 minutes",
        use_case: "When medevac available, no surgery needed",
        protocol_rationale: "Stabilize and package for evacuation - no surgery, keep them alive",
        survival_rate: 0.88,
        plan: table::EVACUATION_STABILIZATION,
    },
    DoctrineSpec {
        id: DoctrineId::ProlongedFieldCare,
        name: "Prolonged Field Care",
        description: "Sustained resource allocation for extended treatment in place. Ventilator and monitoring support for current patients. Suitable for delayed evacuation with moderate resupply timeline",
        summary: "Extended treatment in place with monitoring",
        use_case: "Swedish/NATO protocols for delayed evacuation",
        protocol_rationale: "Extended field care with monitoring - treating in place for hours/days",
        survival_rate: 0.85,
        plan: table::PROLONGED_FIELD_CARE,
    },
    DoctrineSpec {
        id: DoctrineId::SurgicalIntervention,
        name: "NATO Role 2 Surgical",
        description: "Maximum resource allocation for surgical intervention. Highest survival rate when surgical capability and sufficient supplies available. Consumes significant equipment per patient",
        summary: "Damage control surgery with full capability",
        use_case: "When surgical capability available",
        protocol_rationale: "Damage control surgery for critical patients - NATO Role 2 capability",
        survival_rate: 0.94,
        plan: table::SURGICAL_INTERVENTION,
    },
    DoctrineSpec {
        id: DoctrineId::MassCasualtyTriage,
        name: "Mass Casualty Protocol",
        description: "Allocate limited resources across total casualty load. Expectant classification for lowest survival probability. Preserves critical supplies for highest-probability survivors across multiple waves",
        summary: "Expectant triage for overwhelming casualties",
        use_case: "When casualties exceed capacity",
        protocol_rationale: "Expectant triage - focus resources on highest survival probability",
        survival_rate: 0.68,
        plan: table::MASS_CASUALTY_TRIAGE,
    },
    DoctrineSpec {
        id: DoctrineId::ExtremeConservation,
        name: "Siege Medicine",
        description: "Minimal intervention to maximize supply duration. Antibiotics and pain management only. Sustains operations for prolonged casualty flow without resupply or evacuation",
        summary: "Extreme conservation for prolonged isolation",
        use_case: "No resupply, no evacuation, extended operations",
        protocol_rationale: "Extreme conservation - no resupply, no evacuation, siege conditions",
        survival_rate: 0.62,
        plan: table::EXTREME_CONSERVATION,
    },
];

/// All doctrine rows in evaluation order
pub fn all() -> &'static [DoctrineSpec] {
    &DOCTRINES
}

/// Row for one doctrine
pub fn spec(id: DoctrineId) -> &'static DoctrineSpec {
    // Rows are stored in DoctrineId declaration order
    &DOCTRINES[id as usize]
}

/// Name, summary, and use case of every doctrine
pub fn catalog() -> Vec<ProtocolCatalogEntry> {
    DOCTRINES.iter().map(DoctrineSpec::catalog_entry).collect()
}

fn lines(plan: &[(&str, u32)]) -> Vec<AllocationLine> {
    plan.iter()
        .map(|&(item, quantity)| AllocationLine::new(item, quantity))
        .collect()
}

impl DoctrineSpec {
    /// Applicability predicate
    pub fn applies(&self, p: &ScenarioProfile) -> bool {
        match self.id {
            DoctrineId::ImmediateIntervention => true,
            DoctrineId::EvacuationStabilization => {
                p.medevac_available && p.hours_until_resupply < 3.0
            }
            DoctrineId::ProlongedFieldCare => p.hours_until_resupply > 4.0,
            DoctrineId::SurgicalIntervention => p.surgical_capability,
            DoctrineId::MassCasualtyTriage => {
                p.expected_incoming_casualties > 20 || p.counts.acute() > 15
            }
            DoctrineId::ExtremeConservation => {
                p.hours_until_resupply > 12.0 || p.expected_incoming_casualties > 30
            }
        }
    }

    /// Split the population into treated tiers and expectant patients
    pub fn triage(&self, counts: TierCounts) -> Triage {
        match self.id {
            DoctrineId::MassCasualtyTriage => {
                let expectant = expectant_count(counts.critical);
                Triage {
                    treated: TierCounts {
                        critical: counts.critical - expectant,
                        ..counts
                    },
                    expectant,
                }
            }
            _ => Triage {
                treated: counts,
                expectant: 0,
            },
        }
    }

    /// Materialize the tier plan as a protocol allocation
    pub fn allocation(&self) -> ProtocolAllocation {
        ProtocolAllocation {
            critical: lines(self.plan.critical),
            urgent: lines(self.plan.urgent),
            delayed: lines(self.plan.delayed),
            minimal: lines(self.plan.minimal),
            rationale: self.protocol_rationale.to_string(),
        }
    }

    pub fn catalog_entry(&self) -> ProtocolCatalogEntry {
        ProtocolCatalogEntry {
            name: self.name.to_string(),
            description: self.summary.to_string(),
            use_case: self.use_case.to_string(),
        }
    }

    /// Name listed in the service banner, with the doctrine's lineage where it has one
    pub fn title(&self) -> &'static str {
        match self.id {
            DoctrineId::ProlongedFieldCare => "Prolonged Field Care (Swedish/NATO)",
            _ => self.name,
        }
    }

    /// Build this doctrine's strategy for a scenario
    ///
    /// Applicability is the caller's concern; this prices the doctrine
    /// unconditionally.
    pub fn generate(
        &self,
        scenario: &Scenario,
        profile: &ScenarioProfile,
        costs: &CostTable,
    ) -> Result<MedicalStrategy, DoctrineError> {
        let triage = self.triage(profile.counts);
        let protocol = self.allocation();

        let aggregate = aggregate(&protocol, costs, &triage.treated)?;
        let mut total_cost = aggregate.total_cost;
        if triage.expectant > 0 {
            total_cost += costs.line_cost(COMFORT_CARE_ITEM, COMFORT_CARE_DOSES)?
                * rust_decimal::Decimal::from(triage.expectant);
        }

        let equipment_preserved = reserve(&scenario.equipment_inventory, &aggregate.consumption);

        let stocked = scenario.total_equipment();
        let preserved_pct = (stocked > 0).then(|| {
            equipment_preserved.values().sum::<i64>() as f64 / stocked as f64 * 100.0
        });
        let rationale = self.rationale(profile, &triage, preserved_pct);

        debug!(
            doctrine = %self.id,
            total_cost = %total_cost,
            expectant = triage.expectant,
            "Generated strategy"
        );

        Ok(MedicalStrategy {
            doctrine: self.id,
            name: self.name.to_string(),
            description: self.description.to_string(),
            protocol,
            total_cost,
            estimated_survival_rate: self.survival_rate,
            equipment_preserved,
            equipment_consumed: aggregate.consumption,
            rationale,
        })
    }

    fn rationale(&self, p: &ScenarioProfile, triage: &Triage, preserved_pct: Option<f64>) -> String {
        let c = p.counts.critical;
        let u = p.counts.urgent;
        let hours = p.hours_until_resupply;

        let mut text = match self.id {
            DoctrineId::ImmediateIntervention => format!(
                "Full MARCH intervention for {} critical patients. Stops the dying. Assumes medevac or resupply within {:.1}h.",
                c, hours
            ),
            DoctrineId::EvacuationStabilization => format!(
                "Medevac available. Stabilize {} critical + {} urgent for evacuation. Definitive care at Role 3.",
                c, u
            ),
            DoctrineId::ProlongedFieldCare => format!(
                "Resupply delayed {:.1}h. Full support for {} critical patients with ventilators. Stabilization for {} urgent.",
                hours, c, u
            ),
            DoctrineId::SurgicalIntervention => format!(
                "Surgical capability available. Operating on {} critical + {} urgent patients. Highest survival rate but consumes significant resources.",
                c, u
            ),
            DoctrineId::MassCasualtyTriage => format!(
                "Mass casualty event: {} total casualties. Implementing expectant triage - {} critical patients receive comfort care only. Resources focused on {} treatable patients.",
                c as u64 + u as u64 + p.expected_incoming_casualties as u64,
                triage.expectant,
                triage.treated.critical + u
            ),
            DoctrineId::ExtremeConservation => format!(
                "No resupply for {:.1}h. Expected {} additional casualties. Implementing siege protocols: minimal intervention, maximum conservation.",
                hours, p.expected_incoming_casualties
            ),
        };

        match preserved_pct {
            Some(pct) if pct < 0.0 => {
                text.push_str(" Equipment exhausted: projected use exceeds current stock.");
            }
            Some(pct) if self.id == DoctrineId::MassCasualtyTriage => {
                text.push_str(&format!(" Equipment preserved: {:.0}% for next wave.", pct));
            }
            Some(pct) => text.push_str(&format!(" Equipment preserved: {:.0}%.", pct)),
            None => {}
        }

        match self.id {
            DoctrineId::ImmediateIntervention => text.push_str(" Minimal equipment reserve."),
            DoctrineId::ExtremeConservation if preserved_pct.is_some_and(|pct| pct >= 0.0) => {
                text.push_str(" Could sustain operations for extended period.")
            }
            _ => {}
        }
        text
    }
}
