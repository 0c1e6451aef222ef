//! Deterministic local coherence heuristic

use crate::ranker::StrategyRanker;
use async_trait::async_trait;
use medevac_common::{MedicalStrategy, RankingError, RankingSource, Scenario};
use rust_decimal::prelude::ToPrimitive;

const SURVIVAL_WEIGHT: f64 = 0.4;
const PRESERVATION_WEIGHT: f64 = 0.3;
const TIMELINE_BONUS: f64 = 0.2;
const EFFICIENCY_BONUS: f64 = 0.1;

/// Incoming volume above which preserving stock is rewarded
const SURGE_THRESHOLD: u32 = 20;
const COST_PER_SURVIVOR_CEILING: f64 = 5000.0;

/// Scores strategies from survival, reserve, resupply fit and cost per survivor
///
/// Pure function of its inputs: the same scenario and strategy set always
/// yield the same scores.
#[derive(Debug, Clone, Copy, Default)]
pub struct FallbackRanker;

impl FallbackRanker {
    pub fn scores(&self, scenario: &Scenario, strategies: &[MedicalStrategy]) -> Vec<f64> {
        strategies.iter().map(|s| self.score_one(scenario, s)).collect()
    }

    fn score_one(&self, scenario: &Scenario, strategy: &MedicalStrategy) -> f64 {
        let survival = strategy.estimated_survival_rate;
        let mut score = survival * SURVIVAL_WEIGHT;

        let inventory = scenario.total_equipment();
        let preservation = if inventory == 0 {
            0.0
        } else {
            strategy.total_preserved() as f64 / inventory as f64
        };

        if scenario.expected_incoming_casualties > SURGE_THRESHOLD {
            score += preservation * PRESERVATION_WEIGHT;
        } else {
            score += (1.0 - preservation) * PRESERVATION_WEIGHT;
        }

        let hours = scenario.hours_until_resupply;
        if hours < 3.0 {
            if preservation < 0.4 {
                score += TIMELINE_BONUS;
            }
        } else if hours > 10.0 && preservation > 0.6 {
            score += TIMELINE_BONUS;
        }

        let casualties = scenario.casualties.len() as f64;
        if casualties > 0.0 && survival > 0.0 {
            let cost = strategy.total_cost.to_f64().unwrap_or(f64::MAX);
            if cost / (survival * casualties) < COST_PER_SURVIVOR_CEILING {
                score += EFFICIENCY_BONUS;
            }
        }

        score.clamp(0.0, 1.0)
    }
}

#[async_trait]
impl StrategyRanker for FallbackRanker {
    async fn score(
        &self,
        scenario: &Scenario,
        strategies: &[MedicalStrategy],
    ) -> Result<Vec<f64>, RankingError> {
        Ok(self.scores(scenario, strategies))
    }

    fn source(&self) -> RankingSource {
        RankingSource::Fallback
    }
}
