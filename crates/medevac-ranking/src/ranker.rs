//! Ranking capability and the service that composes it with the fallback

use crate::fallback::FallbackRanker;
use async_trait::async_trait;
use medevac_common::{
    MedicalStrategy, RankedStrategy, RankingError, RankingSource, Scenario,
    MISSING_COHERENCE_SCORE,
};
use std::sync::Arc;
use tracing::{debug, instrument, warn};

/// Scores candidate strategies against a scenario
///
/// Implementations return one score per strategy, in input order.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StrategyRanker: Send + Sync {
    async fn score(
        &self,
        scenario: &Scenario,
        strategies: &[MedicalStrategy],
    ) -> Result<Vec<f64>, RankingError>;

    /// Label recorded on strategies this ranker scored
    fn source(&self) -> RankingSource;
}

/// Remote ranker with deterministic local fallback
pub struct RankingService {
    primary: Option<Arc<dyn StrategyRanker>>,
    fallback: FallbackRanker,
}

impl RankingService {
    pub fn new(primary: Arc<dyn StrategyRanker>) -> Self {
        Self {
            primary: Some(primary),
            fallback: FallbackRanker,
        }
    }

    /// Rank with the local heuristic only
    pub fn fallback_only() -> Self {
        Self {
            primary: None,
            fallback: FallbackRanker,
        }
    }

    pub fn has_primary(&self) -> bool {
        self.primary.is_some()
    }

    /// Score every strategy and sort by coherence, highest first
    ///
    /// Ties keep the engine's evaluation order.
    #[instrument(skip_all, fields(candidates = strategies.len()))]
    pub async fn rank(
        &self,
        scenario: &Scenario,
        strategies: Vec<MedicalStrategy>,
    ) -> Vec<RankedStrategy> {
        let (scores, source) = self.scores(scenario, &strategies).await;

        let mut ranked: Vec<RankedStrategy> = strategies
            .into_iter()
            .zip(scores)
            .map(|(strategy, coherence_score)| RankedStrategy {
                strategy,
                coherence_score,
                source,
            })
            .collect();

        ranked.sort_by(|a, b| b.coherence_score.total_cmp(&a.coherence_score));
        ranked
    }

    async fn scores(
        &self,
        scenario: &Scenario,
        strategies: &[MedicalStrategy],
    ) -> (Vec<f64>, RankingSource) {
        if let Some(primary) = &self.primary {
            match primary.score(scenario, strategies).await {
                Ok(scores) => {
                    debug!(returned = scores.len(), "Remote ranker responded");
                    return (normalize(scores, strategies.len()), primary.source());
                }
                Err(e) => {
                    warn!(error = %e, "Remote ranker failed, using fallback heuristic");
                }
            }
        }

        (
            self.fallback.scores(scenario, strategies),
            self.fallback.source(),
        )
    }
}

/// One score per candidate, each in [0, 1]; gaps get the neutral score
fn normalize(mut scores: Vec<f64>, candidates: usize) -> Vec<f64> {
    scores.resize(candidates, MISSING_COHERENCE_SCORE);
    scores
        .into_iter()
        .map(|s| {
            if s.is_finite() {
                s.clamp(0.0, 1.0)
            } else {
                MISSING_COHERENCE_SCORE
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use medevac_common::{Casualty, DoctrineId, Severity};
    use medevac_doctrine::DoctrineEngine;
    use std::collections::BTreeMap;

    fn scenario() -> Scenario {
        Scenario {
            casualties: vec![
                Casualty::typical(Severity::Critical),
                Casualty::typical(Severity::Urgent),
            ],
            equipment_inventory: BTreeMap::from([
                ("tourniquet".to_string(), 20),
                ("morphine_dose".to_string(), 100),
                ("ventilator".to_string(), 4),
            ]),
            hours_until_resupply: 8.0,
            expected_incoming_casualties: 15,
            medevac_available: true,
            surgical_capability: true,
        }
    }

    fn strategies(s: &Scenario) -> Vec<MedicalStrategy> {
        DoctrineEngine::default().generate_strategies(s).unwrap()
    }

    #[test]
    fn test_normalize() {
        assert_eq!(normalize(vec![0.2], 3), vec![0.2, 0.5, 0.5]);
        assert_eq!(normalize(vec![1.4, -0.1, f64::NAN], 3), vec![1.0, 0.0, 0.5]);
        assert_eq!(normalize(vec![0.1, 0.2, 0.3], 2), vec![0.1, 0.2]);
    }

    #[tokio::test]
    async fn test_primary_scores_sort_descending() {
        let mut primary = MockStrategyRanker::new();
        primary
            .expect_score()
            .times(1)
            .returning(|_, _| Ok(vec![0.3, 0.9, 0.6]));
        primary.expect_source().return_const(RankingSource::Arbiter);

        let service = RankingService::new(Arc::new(primary));
        let s = scenario();
        let ranked = service.rank(&s, strategies(&s)).await;

        let order: Vec<DoctrineId> = ranked.iter().map(|r| r.strategy.doctrine).collect();
        assert_eq!(
            order,
            vec![
                DoctrineId::ProlongedFieldCare,
                DoctrineId::SurgicalIntervention,
                DoctrineId::ImmediateIntervention,
            ]
        );
        assert!(ranked.iter().all(|r| r.source == RankingSource::Arbiter));
    }

    #[tokio::test]
    async fn test_primary_failure_falls_back() {
        let mut primary = MockStrategyRanker::new();
        primary
            .expect_score()
            .times(1)
            .returning(|_, _| Err(RankingError::Timeout { timeout_secs: 30 }));
        primary.expect_source().return_const(RankingSource::Arbiter);

        let service = RankingService::new(Arc::new(primary));
        let s = scenario();
        let ranked = service.rank(&s, strategies(&s)).await;

        assert_eq!(ranked.len(), 3);
        assert!(ranked.iter().all(|r| r.source == RankingSource::Fallback));

        let expected = RankingService::fallback_only().rank(&s, strategies(&s)).await;
        let scores: Vec<f64> = ranked.iter().map(|r| r.coherence_score).collect();
        let expected: Vec<f64> = expected.iter().map(|r| r.coherence_score).collect();
        assert_eq!(scores, expected);
    }

    #[tokio::test]
    async fn test_ties_keep_evaluation_order() {
        let mut primary = MockStrategyRanker::new();
        primary.expect_score().returning(|_, _| Ok(vec![]));
        primary.expect_source().return_const(RankingSource::Arbiter);

        let service = RankingService::new(Arc::new(primary));
        let s = scenario();
        let ranked = service.rank(&s, strategies(&s)).await;

        assert!(ranked.iter().all(|r| r.coherence_score == MISSING_COHERENCE_SCORE));
        assert_eq!(ranked[0].strategy.doctrine, DoctrineId::ImmediateIntervention);
        assert_eq!(ranked[2].strategy.doctrine, DoctrineId::SurgicalIntervention);
    }

    #[tokio::test]
    async fn test_fallback_only_is_deterministic() {
        let service = RankingService::fallback_only();
        assert!(!service.has_primary());

        let s = scenario();
        let first = service.rank(&s, strategies(&s)).await;
        let second = service.rank(&s, strategies(&s)).await;

        let first: Vec<_> = first.iter().map(|r| (r.strategy.doctrine, r.coherence_score)).collect();
        let second: Vec<_> = second.iter().map(|r| (r.strategy.doctrine, r.coherence_score)).collect();
        assert_eq!(first, second);
    }
}
