//! Equipment cost table
//!
//! Unit costs in USD (2024 estimates) for the field hospital price list.
//! The table is immutable once built and is handed to the engine
//! explicitly, so alternate price lists can be evaluated side by side.

use medevac_common::{DoctrineError, MedevacError, Result};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// Built-in field hospital price list, grouped by MARCH category
const FIELD_HOSPITAL_COSTS: &[(&str, i64)] = &[
    // Hemorrhage control
    ("tourniquet", 30),
    ("hemostatic_gauze", 45),
    ("pressure_bandage", 15),
    // Airway management
    ("nasopharyngeal_airway", 8),
    ("cricothyrotomy_kit", 150),
    ("endotracheal_tube", 12),
    // Breathing
    ("chest_seal", 25),
    ("needle_decompression", 12),
    ("ventilator", 25_000),
    // Circulation
    ("iv_fluid_1L", 50),
    ("blood_unit_O_neg", 500),
    ("blood_unit_type_specific", 450),
    // Surgery
    ("surgical_pack_trauma", 3_000),
    ("anesthesia_kit", 500),
    ("suture_kit", 150),
    // Medications
    ("antibiotics_broad_spectrum", 200),
    ("morphine_dose", 15),
    ("tranexamic_acid", 80),
    ("epinephrine", 25),
    // Monitoring
    ("pulse_oximeter", 150),
    ("bp_cuff", 45),
];

/// Immutable mapping of equipment item to unit cost
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CostTable {
    costs: BTreeMap<String, Decimal>,
}

impl CostTable {
    /// Build a table from explicit prices; every cost must be positive
    pub fn new<I, S>(costs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (S, Decimal)>,
        S: Into<String>,
    {
        let costs: BTreeMap<String, Decimal> =
            costs.into_iter().map(|(item, cost)| (item.into(), cost)).collect();

        if let Some((item, cost)) = costs.iter().find(|(_, cost)| **cost <= Decimal::ZERO) {
            return Err(MedevacError::Config(format!(
                "Unit cost for {} must be positive, got {}",
                item, cost
            )));
        }

        Ok(Self { costs })
    }

    /// The built-in field hospital price list
    pub fn field_hospital() -> Self {
        Self {
            costs: FIELD_HOSPITAL_COSTS
                .iter()
                .map(|(item, cost)| (item.to_string(), Decimal::from(*cost)))
                .collect(),
        }
    }

    /// Parse a JSON object of `{"item": cost}`
    pub fn from_json_str(json: &str) -> Result<Self> {
        let costs: BTreeMap<String, Decimal> = serde_json::from_str(json)
            .map_err(|e| MedevacError::Config(format!("Failed to parse cost table: {}", e)))?;
        Self::new(costs)
    }

    /// Load a JSON cost table from disk
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            MedevacError::Config(format!(
                "Failed to read cost table {}: {}",
                path.display(),
                e
            ))
        })?;
        Self::from_json_str(&content)
    }

    /// Unit cost of an item
    pub fn unit_cost(&self, item: &str) -> std::result::Result<Decimal, DoctrineError> {
        self.costs
            .get(item)
            .copied()
            .ok_or_else(|| DoctrineError::UnknownItem(item.to_string()))
    }

    /// Cost of `quantity` units of an item
    pub fn line_cost(&self, item: &str, quantity: u32) -> std::result::Result<Decimal, DoctrineError> {
        Ok(self.unit_cost(item)? * Decimal::from(quantity))
    }

    /// Return a copy with one price replaced or added
    pub fn with_cost(mut self, item: impl Into<String>, cost: Decimal) -> Result<Self> {
        if cost <= Decimal::ZERO {
            return Err(MedevacError::Config(format!(
                "Unit cost must be positive, got {}",
                cost
            )));
        }
        self.costs.insert(item.into(), cost);
        Ok(self)
    }

    pub fn contains(&self, item: &str) -> bool {
        self.costs.contains_key(item)
    }

    /// Items and their unit costs in name order
    pub fn items(&self) -> impl Iterator<Item = (&str, Decimal)> {
        self.costs.iter().map(|(item, cost)| (item.as_str(), *cost))
    }

    pub fn len(&self) -> usize {
        self.costs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.costs.is_empty()
    }
}

impl Default for CostTable {
    fn default() -> Self {
        Self::field_hospital()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_field_hospital_prices() {
        let table = CostTable::field_hospital();
        assert_eq!(table.len(), 21);
        assert_eq!(table.unit_cost("tourniquet").unwrap(), dec!(30));
        assert_eq!(table.unit_cost("ventilator").unwrap(), dec!(25000));
        assert_eq!(table.unit_cost("morphine_dose").unwrap(), dec!(15));
        assert!(table.items().all(|(_, cost)| cost > Decimal::ZERO));
    }

    #[test]
    fn test_unknown_item() {
        let table = CostTable::field_hospital();
        let err = table.unit_cost("defibrillator").unwrap_err();
        assert!(matches!(err, DoctrineError::UnknownItem(ref item) if item == "defibrillator"));
    }

    #[test]
    fn test_line_cost() {
        let table = CostTable::field_hospital();
        assert_eq!(table.line_cost("hemostatic_gauze", 4).unwrap(), dec!(180));
        assert_eq!(table.line_cost("hemostatic_gauze", 0).unwrap(), dec!(0));
    }

    #[test]
    fn test_from_json() {
        let table = CostTable::from_json_str(r#"{"tourniquet": 32.5, "morphine_dose": 12}"#).unwrap();
        assert_eq!(table.unit_cost("tourniquet").unwrap(), dec!(32.5));
        assert_eq!(table.unit_cost("morphine_dose").unwrap(), dec!(12));
        assert!(!table.contains("ventilator"));
    }

    #[test]
    fn test_rejects_non_positive_cost() {
        assert!(CostTable::from_json_str(r#"{"tourniquet": 0}"#).is_err());
        assert!(CostTable::new([("tourniquet", dec!(-1))]).is_err());
        assert!(CostTable::field_hospital().with_cost("tourniquet", dec!(0)).is_err());
    }

    #[test]
    fn test_with_cost_overrides() {
        let table = CostTable::field_hospital()
            .with_cost("tourniquet", dec!(40))
            .unwrap();
        assert_eq!(table.unit_cost("tourniquet").unwrap(), dec!(40));
        assert_eq!(table, table.clone());
        assert_ne!(table, CostTable::field_hospital());
    }
}
