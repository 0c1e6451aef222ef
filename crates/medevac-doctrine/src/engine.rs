//! Doctrine selection engine
//!
//! Derives tier counts once, evaluates every applicability predicate in the
//! fixed doctrine order, and prices each applicable doctrine.

use crate::cost_table::CostTable;
use crate::doctrine::{self, ScenarioProfile};
use medevac_common::{DoctrineId, MedicalStrategy, Result, Scenario};
use std::sync::Arc;
use tracing::{info, instrument};

/// Synchronous, side-effect-free doctrine generation engine
///
/// Cheap to clone; the cost table is shared read-only.
#[derive(Debug, Clone)]
pub struct DoctrineEngine {
    costs: Arc<CostTable>,
}

impl DoctrineEngine {
    pub fn new(costs: CostTable) -> Self {
        Self {
            costs: Arc::new(costs),
        }
    }

    pub fn cost_table(&self) -> &CostTable {
        &self.costs
    }

    /// Doctrines whose predicates hold for the scenario, in evaluation order
    pub fn applicable_doctrines(&self, scenario: &Scenario) -> Vec<DoctrineId> {
        let profile = ScenarioProfile::from_scenario(scenario);
        doctrine::all()
            .iter()
            .filter(|d| d.applies(&profile))
            .map(|d| d.id)
            .collect()
    }

    /// One strategy per applicable doctrine; never empty for a valid scenario
    #[instrument(skip_all, fields(casualties = scenario.casualties.len()))]
    pub fn generate_strategies(&self, scenario: &Scenario) -> Result<Vec<MedicalStrategy>> {
        scenario.validate()?;

        let profile = ScenarioProfile::from_scenario(scenario);
        let strategies = doctrine::all()
            .iter()
            .filter(|d| d.applies(&profile))
            .map(|d| d.generate(scenario, &profile, &self.costs))
            .collect::<std::result::Result<Vec<_>, _>>()?;

        info!(
            critical = profile.counts.critical,
            urgent = profile.counts.urgent,
            delayed = profile.counts.delayed,
            minimal = profile.counts.minimal,
            strategies = strategies.len(),
            "Generated doctrine strategies"
        );

        Ok(strategies)
    }

    /// Price a single doctrine regardless of its predicate
    pub fn generate(&self, id: DoctrineId, scenario: &Scenario) -> Result<MedicalStrategy> {
        scenario.validate()?;
        let profile = ScenarioProfile::from_scenario(scenario);
        Ok(doctrine::spec(id).generate(scenario, &profile, &self.costs)?)
    }
}

impl Default for DoctrineEngine {
    fn default() -> Self {
        Self::new(CostTable::field_hospital())
    }
}
