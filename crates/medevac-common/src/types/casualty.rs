//! Casualty - a single patient as seen by the triage officer
//!
//! Severity follows the NATO triage colours:
//! - Critical (red): immediate life threat
//! - Urgent (yellow): serious but stable
//! - Delayed (green): can wait hours
//! - Minimal (white): walking wounded
//! - Expectant (blue): under 10% survival probability

use crate::error::DoctrineError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Triage severity category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Critical,
    Urgent,
    Delayed,
    Minimal,
    Expectant,
}

impl Severity {
    /// Every severity, most to least acute (expectant last)
    pub const ALL: [Severity; 5] = [
        Severity::Critical,
        Severity::Urgent,
        Severity::Delayed,
        Severity::Minimal,
        Severity::Expectant,
    ];

    /// Lowercase wire name
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Critical => "critical",
            Severity::Urgent => "urgent",
            Severity::Delayed => "delayed",
            Severity::Minimal => "minimal",
            Severity::Expectant => "expectant",
        }
    }

    /// Typical combat injuries for a casualty of this severity
    pub fn typical_injuries(&self) -> &'static [&'static str] {
        match self {
            Severity::Critical => &["massive_hemorrhage", "tension_pneumothorax", "airway_compromise"],
            Severity::Urgent => &["compound_fracture", "abdominal_trauma", "significant_hemorrhage"],
            Severity::Delayed => &["simple_fracture", "soft_tissue_injury", "minor_hemorrhage"],
            Severity::Minimal => &["minor_laceration", "contusion", "minor_burn"],
            Severity::Expectant => &[],
        }
    }

    /// Base survival probability before any intervention
    pub fn base_survival_probability(&self) -> f64 {
        match self {
            Severity::Critical => 0.65,
            Severity::Urgent => 0.85,
            Severity::Delayed => 0.95,
            Severity::Minimal => 0.98,
            Severity::Expectant => 0.10,
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Severity {
    type Err = DoctrineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "critical" => Ok(Severity::Critical),
            "urgent" => Ok(Severity::Urgent),
            "delayed" => Ok(Severity::Delayed),
            "minimal" => Ok(Severity::Minimal),
            "expectant" => Ok(Severity::Expectant),
            _ => Err(DoctrineError::InvalidSeverity(s.to_string())),
        }
    }
}

/// A single casualty
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Casualty {
    /// Triage category
    pub severity: Severity,
    /// Injury tags, e.g. "massive_hemorrhage"
    pub injuries: Vec<String>,
    /// Survival probability (0.0 - 1.0)
    pub survival_probability: f64,
}

impl Casualty {
    /// Create a casualty; the probability is clamped into [0, 1]
    pub fn new(severity: Severity, injuries: Vec<String>, survival_probability: f64) -> Self {
        Self {
            severity,
            injuries,
            survival_probability: survival_probability.clamp(0.0, 1.0),
        }
    }

    /// Casualty with the typical injuries and base survival for its severity
    pub fn typical(severity: Severity) -> Self {
        Self::new(
            severity,
            severity.typical_injuries().iter().map(|s| s.to_string()).collect(),
            severity.base_survival_probability(),
        )
    }

    /// Override the injury list, keeping severity and probability
    pub fn with_injuries(mut self, injuries: Vec<String>) -> Self {
        self.injuries = injuries;
        self
    }
}
