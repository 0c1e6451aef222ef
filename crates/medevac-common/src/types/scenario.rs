//! Scenario - one evaluation request's view of the field hospital
//!
//! A scenario is built once per request and only read afterwards.

use super::casualty::{Casualty, Severity};
use crate::error::DoctrineError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Field hospital situation to evaluate
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scenario {
    /// Current casualties
    pub casualties: Vec<Casualty>,
    /// Equipment stock by item identifier
    pub equipment_inventory: BTreeMap<String, u32>,
    /// Hours until the next resupply arrives
    pub hours_until_resupply: f64,
    /// Intelligence estimate of additional casualties
    pub expected_incoming_casualties: u32,
    /// Whether medical evacuation is available
    pub medevac_available: bool,
    /// Whether damage control surgery is available
    pub surgical_capability: bool,
}

impl Scenario {
    /// Check the scenario-level invariants
    ///
    /// Inventory counts and the incoming estimate are unsigned; the resupply
    /// horizon must be finite and non-negative.
    pub fn validate(&self) -> Result<(), DoctrineError> {
        if !self.hours_until_resupply.is_finite() || self.hours_until_resupply < 0.0 {
            return Err(DoctrineError::InvalidScenario(format!(
                "hours_until_resupply must be a non-negative number, got {}",
                self.hours_until_resupply
            )));
        }
        Ok(())
    }

    /// Casualty counts per treatment tier
    pub fn tier_counts(&self) -> TierCounts {
        TierCounts::from_casualties(&self.casualties)
    }

    /// Total number of stocked items across all categories
    pub fn total_equipment(&self) -> u64 {
        self.equipment_inventory.values().map(|&c| c as u64).sum()
    }

    /// Current plus expected casualties
    pub fn total_potential_load(&self) -> u64 {
        self.casualties.len() as u64 + self.expected_incoming_casualties as u64
    }
}

/// Casualty counts per treatment tier
///
/// Expectant casualties are not part of any treatment tier.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TierCounts {
    pub critical: u32,
    pub urgent: u32,
    pub delayed: u32,
    pub minimal: u32,
}

impl TierCounts {
    pub fn new(critical: u32, urgent: u32, delayed: u32, minimal: u32) -> Self {
        Self {
            critical,
            urgent,
            delayed,
            minimal,
        }
    }

    /// Count casualties by severity in a single pass
    pub fn from_casualties(casualties: &[Casualty]) -> Self {
        let mut counts = Self::default();
        for casualty in casualties {
            match casualty.severity {
                Severity::Critical => counts.critical += 1,
                Severity::Urgent => counts.urgent += 1,
                Severity::Delayed => counts.delayed += 1,
                Severity::Minimal => counts.minimal += 1,
                Severity::Expectant => {}
            }
        }
        counts
    }

    /// Patients in the given tier (always 0 for expectant)
    pub fn get(&self, severity: Severity) -> u32 {
        match severity {
            Severity::Critical => self.critical,
            Severity::Urgent => self.urgent,
            Severity::Delayed => self.delayed,
            Severity::Minimal => self.minimal,
            Severity::Expectant => 0,
        }
    }

    /// Critical plus urgent patients
    pub fn acute(&self) -> u32 {
        self.critical + self.urgent
    }

    pub fn total(&self) -> u32 {
        self.critical + self.urgent + self.delayed + self.minimal
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scenario_with(casualties: Vec<Casualty>, hours: f64) -> Scenario {
        Scenario {
            casualties,
            equipment_inventory: BTreeMap::from([
                ("tourniquet".to_string(), 20),
                ("morphine_dose".to_string(), 200),
            ]),
            hours_until_resupply: hours,
            expected_incoming_casualties: 5,
            medevac_available: true,
            surgical_capability: false,
        }
    }

    #[test]
    fn test_tier_counts_skip_expectant() {
        let casualties = vec![
            Casualty::typical(Severity::Critical),
            Casualty::typical(Severity::Critical),
            Casualty::typical(Severity::Urgent),
            Casualty::typical(Severity::Minimal),
            Casualty::typical(Severity::Expectant),
        ];
        let counts = TierCounts::from_casualties(&casualties);

        assert_eq!(counts, TierCounts::new(2, 1, 0, 1));
        assert_eq!(counts.acute(), 3);
        assert_eq!(counts.total(), 4);
        assert_eq!(counts.get(Severity::Expectant), 0);
    }

    #[test]
    fn test_validate_rejects_negative_hours() {
        let scenario = scenario_with(vec![], -1.0);
        assert!(matches!(
            scenario.validate(),
            Err(DoctrineError::InvalidScenario(_))
        ));

        let scenario = scenario_with(vec![], f64::NAN);
        assert!(scenario.validate().is_err());

        let scenario = scenario_with(vec![], 0.0);
        assert!(scenario.validate().is_ok());
    }

    #[test]
    fn test_totals() {
        let scenario = scenario_with(vec![Casualty::typical(Severity::Urgent)], 2.0);
        assert_eq!(scenario.total_equipment(), 220);
        assert_eq!(scenario.total_potential_load(), 6);
    }
}
