//! ARBITER coherence-scoring client

use crate::query::constraint_query;
use crate::ranker::StrategyRanker;
use async_trait::async_trait;
use medevac_common::{
    MedevacError, MedicalStrategy, RankingError, RankingSource, Scenario,
    DEFAULT_RANKING_TIMEOUT_SECS, MISSING_COHERENCE_SCORE,
};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, instrument};

pub const DEFAULT_ARBITER_URL: &str = "https://api.arbiter.traut.ai/v1/compare";

/// Remote ranker settings
#[derive(Debug, Clone)]
pub struct ArbiterConfig {
    pub url: String,
    /// Whole-request bound; a slower reply counts as a failure
    pub timeout: Duration,
}

impl Default for ArbiterConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_ARBITER_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_RANKING_TIMEOUT_SECS),
        }
    }
}

#[derive(Debug, Serialize)]
struct CompareRequest<'a> {
    query: String,
    candidates: Vec<&'a str>,
}

#[derive(Debug, Deserialize)]
struct CompareResponse {
    #[serde(default)]
    all: Vec<CompareResult>,
}

#[derive(Debug, Deserialize)]
struct CompareResult {
    #[serde(default)]
    score: Option<f64>,
}

/// Scores strategies by POSTing the constraint query and their descriptions
///
/// Rationales are never sent: they restate the scenario and would bias the
/// comparison.
#[derive(Debug, Clone)]
pub struct ArbiterRanker {
    client: Client,
    config: ArbiterConfig,
}

impl ArbiterRanker {
    pub fn new(config: ArbiterConfig) -> medevac_common::Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| MedevacError::Config(format!("ARBITER client: {e}")))?;
        Ok(Self { client, config })
    }

    pub fn config(&self) -> &ArbiterConfig {
        &self.config
    }

    fn map_send_error(&self, e: reqwest::Error) -> RankingError {
        if e.is_timeout() {
            RankingError::Timeout {
                timeout_secs: self.config.timeout.as_secs(),
            }
        } else {
            RankingError::Http(e.to_string())
        }
    }
}

#[async_trait]
impl StrategyRanker for ArbiterRanker {
    #[instrument(skip_all, fields(url = %self.config.url, candidates = strategies.len()))]
    async fn score(
        &self,
        scenario: &Scenario,
        strategies: &[MedicalStrategy],
    ) -> Result<Vec<f64>, RankingError> {
        let body = CompareRequest {
            query: constraint_query(scenario),
            candidates: strategies.iter().map(|s| s.description.as_str()).collect(),
        };

        let response = self
            .client
            .post(&self.config.url)
            .json(&body)
            .send()
            .await
            .map_err(|e| self.map_send_error(e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(RankingError::Status {
                status: status.as_u16(),
            });
        }

        let bytes = response.bytes().await.map_err(|e| self.map_send_error(e))?;
        let parsed: CompareResponse = serde_json::from_slice(&bytes)
            .map_err(|e| RankingError::MalformedResponse(e.to_string()))?;

        debug!(scores = parsed.all.len(), "ARBITER scores received");

        Ok(parsed
            .all
            .into_iter()
            .map(|r| r.score.unwrap_or(MISSING_COHERENCE_SCORE))
            .collect())
    }

    fn source(&self) -> RankingSource {
        RankingSource::Arbiter
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{http::StatusCode, routing::post, Json, Router};
    use medevac_common::{Casualty, Severity};
    use medevac_doctrine::DoctrineEngine;
    use serde_json::{json, Value};
    use std::collections::BTreeMap;
    use std::sync::{Arc, Mutex};

    async fn spawn(app: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{addr}/v1/compare")
    }

    fn ranker(url: String, timeout: Duration) -> ArbiterRanker {
        ArbiterRanker::new(ArbiterConfig { url, timeout }).unwrap()
    }

    fn scenario() -> Scenario {
        Scenario {
            casualties: vec![Casualty::typical(Severity::Critical)],
            equipment_inventory: BTreeMap::from([("tourniquet".to_string(), 30)]),
            hours_until_resupply: 8.0,
            expected_incoming_casualties: 4,
            medevac_available: false,
            surgical_capability: true,
        }
    }

    fn strategies(s: &Scenario) -> Vec<MedicalStrategy> {
        DoctrineEngine::default().generate_strategies(s).unwrap()
    }

    #[test]
    fn test_default_config() {
        let config = ArbiterConfig::default();
        assert_eq!(config.url, DEFAULT_ARBITER_URL);
        assert_eq!(config.timeout, Duration::from_secs(30));
    }

    #[tokio::test]
    async fn test_sends_descriptions_and_maps_scores() {
        let seen: Arc<Mutex<Option<Value>>> = Arc::default();
        let captured = seen.clone();
        let app = Router::new().route(
            "/v1/compare",
            post(move |Json(body): Json<Value>| {
                let captured = captured.clone();
                async move {
                    *captured.lock().unwrap() = Some(body);
                    Json(json!({ "all": [{ "score": 0.8 }, {}, { "score": 0.1 }] }))
                }
            }),
        );
        let url = spawn(app).await;

        let s = scenario();
        let strategies = strategies(&s);
        let scores = ranker(url, Duration::from_secs(5))
            .score(&s, &strategies)
            .await
            .unwrap();
        assert_eq!(scores, vec![0.8, 0.5, 0.1]);

        let body = seen.lock().unwrap().take().unwrap();
        assert_eq!(body["query"], json!(constraint_query(&s)));
        let candidates: Vec<&str> = strategies.iter().map(|s| s.description.as_str()).collect();
        assert_eq!(body["candidates"], json!(candidates));
        for strategy in &strategies {
            assert!(!body.to_string().contains(&strategy.rationale));
        }
    }

    #[tokio::test]
    async fn test_non_success_status() {
        let app = Router::new().route(
            "/v1/compare",
            post(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "boom") }),
        );
        let url = spawn(app).await;

        let s = scenario();
        let err = ranker(url, Duration::from_secs(5))
            .score(&s, &strategies(&s))
            .await
            .unwrap_err();
        assert!(matches!(err, RankingError::Status { status: 500 }));
    }

    #[tokio::test]
    async fn test_malformed_body() {
        let app = Router::new().route("/v1/compare", post(|| async { "not json" }));
        let url = spawn(app).await;

        let s = scenario();
        let err = ranker(url, Duration::from_secs(5))
            .score(&s, &strategies(&s))
            .await
            .unwrap_err();
        assert!(matches!(err, RankingError::MalformedResponse(_)));
    }

    #[tokio::test]
    async fn test_timeout() {
        let app = Router::new().route(
            "/v1/compare",
            post(|| async {
                tokio::time::sleep(Duration::from_secs(5)).await;
                Json(json!({ "all": [] }))
            }),
        );
        let url = spawn(app).await;

        let s = scenario();
        let err = ranker(url, Duration::from_millis(100))
            .score(&s, &strategies(&s))
            .await
            .unwrap_err();
        assert!(matches!(err, RankingError::Timeout { .. }));
    }

    #[tokio::test]
    async fn test_unreachable_host() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let s = scenario();
        let err = ranker(format!("http://{addr}/v1/compare"), Duration::from_secs(5))
            .score(&s, &strategies(&s))
            .await
            .unwrap_err();
        assert!(matches!(err, RankingError::Http(_)));
    }
}
