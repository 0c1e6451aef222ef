//! Constraint query construction
//!
//! The query sent to the remote ranker states what exists and what limits
//! the unit: casualties, equipment, timeline, capabilities, surge. It never
//! names an action or a doctrine, so it cannot presuppose an answer.

use medevac_common::Scenario;

/// Neutral description of a scenario's constraints
pub fn constraint_query(scenario: &Scenario) -> String {
    let counts = scenario.tier_counts();
    let current = scenario.casualties.len() as u64;
    let incoming = scenario.expected_incoming_casualties as u64;
    let total_potential = scenario.total_potential_load();
    let total_equipment = scenario.total_equipment();

    let per_total = if total_potential > 0 {
        total_equipment as f64 / total_potential as f64
    } else {
        0.0
    };
    let surge_ratio = if current > 0 {
        incoming as f64 / current as f64
    } else {
        0.0
    };

    let mut q = String::new();
    q.push_str(&format!(
        "Field hospital. Current casualty status: {} critical severity, {} urgent severity, {} delayed severity, {} minimal severity. ",
        counts.critical, counts.urgent, counts.delayed, counts.minimal
    ));
    q.push_str(&format!(
        "Equipment availability: {} total items across {} categories. Current patients: {}. ",
        total_equipment,
        scenario.equipment_inventory.len(),
        current
    ));
    q.push_str(&format!(
        "Intelligence estimate: {} additional casualties expected. Total potential casualty load: {} patients ({} current + {} incoming). ",
        incoming, total_potential, current, incoming
    ));
    q.push_str(&format!(
        "Equipment-to-patient ratio across total load: {:.1} items per patient. ",
        per_total
    ));
    if let Some(adequacy) = supply_adequacy(per_total) {
        q.push_str(adequacy);
        q.push(' ');
    }

    q.push_str(&format!(
        "Resupply timeline: {:.1} hours. Operational tempo: {}. ",
        scenario.hours_until_resupply,
        tempo(scenario.hours_until_resupply)
    ));

    let mut capabilities = Vec::new();
    if scenario.surgical_capability {
        capabilities.push("surgical intervention");
    }
    if scenario.medevac_available {
        capabilities.push("medical evacuation");
    }
    if capabilities.is_empty() {
        q.push_str("Available capabilities: stabilization only, no surgery or evacuation. ");
    } else {
        q.push_str(&format!("Available capabilities: {}. ", capabilities.join(", ")));
    }

    q.push_str(&format!("Casualty flow: {}. ", surge_assessment(surge_ratio, per_total)));

    if surge_ratio >= 0.5 {
        q.push_str("Constraint: Resource allocation must sustain medical capability across both current patient load and incoming surge. ");
        q.push_str("Strategies that deplete supplies treating current patients will leave facility unable to treat incoming casualties. ");
    }

    q.trim_end().to_string()
}

fn supply_adequacy(per_total: f64) -> Option<&'static str> {
    if per_total < 2.0 {
        Some("Catastrophic supply deficit - insufficient equipment exists to provide standard care across total casualty burden.")
    } else if per_total < 5.0 {
        Some("Critical supply shortage - standard treatment protocols will exhaust supplies before completing care for total load.")
    } else if per_total < 10.0 {
        Some("Constrained supply situation - resource allocation must prioritize across total casualty burden.")
    } else {
        None
    }
}

fn tempo(hours: f64) -> &'static str {
    if hours < 3.0 {
        "short resupply window"
    } else if hours < 8.0 {
        "moderate resupply delay"
    } else {
        "extended resupply delay with high uncertainty"
    }
}

fn surge_assessment(surge_ratio: f64, per_total: f64) -> &'static str {
    if surge_ratio >= 1.0 && per_total < 3.0 {
        "major casualty surge matching or exceeding current load with insufficient supplies for total burden"
    } else if surge_ratio >= 1.0 {
        "major casualty surge matching or exceeding current load"
    } else if surge_ratio > 0.5 {
        "significant incoming casualties requiring resource preservation"
    } else {
        "manageable incoming volume"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use medevac_common::{Casualty, Severity};
    use std::collections::BTreeMap;

    fn scenario(per_tier: usize, stock: u32, hours: f64, incoming: u32) -> Scenario {
        let casualties = [Severity::Critical, Severity::Urgent, Severity::Delayed, Severity::Minimal]
            .iter()
            .flat_map(|s| std::iter::repeat(Casualty::typical(*s)).take(per_tier))
            .collect();
        Scenario {
            casualties,
            equipment_inventory: BTreeMap::from([
                ("tourniquet".to_string(), stock),
                ("morphine_dose".to_string(), stock),
            ]),
            hours_until_resupply: hours,
            expected_incoming_casualties: incoming,
            medevac_available: true,
            surgical_capability: false,
        }
    }

    #[test]
    fn test_query_states_counts_and_load() {
        let q = constraint_query(&scenario(2, 50, 8.0, 5));
        assert!(q.starts_with("Field hospital. Current casualty status: 2 critical severity, 2 urgent severity"));
        assert!(q.contains("100 total items across 2 categories"));
        assert!(q.contains("Total potential casualty load: 13 patients (8 current + 5 incoming)"));
        assert!(q.contains("7.7 items per patient"));
        assert!(q.contains("Constrained supply situation"));
        assert!(q.contains("Resupply timeline: 8.0 hours. Operational tempo: extended resupply delay"));
        assert!(q.contains("Available capabilities: medical evacuation."));
        assert!(q.contains("Casualty flow: significant incoming casualties"));
        assert!(q.contains("Constraint: Resource allocation must sustain"));
    }

    #[test]
    fn test_query_surge_with_deficit() {
        let mut s = scenario(1, 2, 1.0, 8);
        s.medevac_available = false;
        let q = constraint_query(&s);
        assert!(q.contains("Catastrophic supply deficit"));
        assert!(q.contains("short resupply window"));
        assert!(q.contains("stabilization only, no surgery or evacuation"));
        assert!(q.contains("with insufficient supplies for total burden"));
    }

    #[test]
    fn test_query_manageable_flow() {
        let q = constraint_query(&scenario(5, 500, 5.0, 2));
        assert!(q.contains("manageable incoming volume"));
        assert!(q.contains("moderate resupply delay"));
        assert!(!q.contains("Constraint:"));
        assert!(!q.contains("supply deficit"));
        assert!(!q.ends_with(' '));
    }

    #[test]
    fn test_query_does_not_name_doctrines() {
        let q = constraint_query(&scenario(3, 20, 14.0, 40));
        for name in ["MARCH", "Golden Hour", "Siege", "Role 2", "expectant", "Prolonged Field Care"] {
            assert!(!q.contains(name), "query leaks {}", name);
        }
    }

    #[test]
    fn test_query_empty_scenario() {
        let s = Scenario {
            casualties: vec![],
            equipment_inventory: BTreeMap::new(),
            hours_until_resupply: 0.0,
            expected_incoming_casualties: 0,
            medevac_available: false,
            surgical_capability: false,
        };
        let q = constraint_query(&s);
        assert!(q.contains("0.0 items per patient"));
    }
}
