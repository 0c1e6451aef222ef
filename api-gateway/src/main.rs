//! MEDEVAC API Gateway
//!
//! Field hospital doctrine evaluation over HTTP:
//! - Doctrine: applicable protocols priced against the scenario's inventory
//! - Ranking: ARBITER coherence scores, local heuristic when unavailable

mod config;

use axum::{
    extract::{rejection::JsonRejection, FromRequest, State},
    http::{Method, StatusCode},
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use config::GatewayConfig;
use medevac_common::{
    Casualty, DoctrineError, DoctrineId, MedevacError, RankedStrategy, RankingSource, Scenario,
    Severity,
};
use medevac_doctrine::{catalog, doctrine, CostTable, DoctrineEngine, ProtocolCatalogEntry};
use medevac_ranking::{ArbiterRanker, RankingService};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::{collections::BTreeMap, sync::Arc};
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::{error, info, instrument, warn};
use uuid::Uuid;

/// Upper bound on expanded casualty records per request
const MAX_CASUALTIES_PER_REQUEST: u64 = 100_000;

// ============ STATE ============

#[derive(Clone)]
struct AppState {
    engine: Arc<DoctrineEngine>,
    ranking: Arc<RankingService>,
}

// ============ REQUEST / RESPONSE TYPES ============

#[derive(Debug, Deserialize)]
struct CasualtyInput {
    severity: String,
    count: u32,
    #[serde(default)]
    injuries: Option<Vec<String>>,
}

#[derive(Debug, Deserialize)]
struct ScenarioRequest {
    casualties: Vec<CasualtyInput>,
    equipment_inventory: BTreeMap<String, u32>,
    hours_until_resupply: f64,
    expected_incoming_casualties: u32,
    #[serde(default = "default_true")]
    medevac_available: bool,
    #[serde(default)]
    surgical_capability: bool,
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Serialize)]
struct StrategyResponse {
    doctrine: DoctrineId,
    name: String,
    description: String,
    #[serde(with = "rust_decimal::serde::float")]
    total_cost: Decimal,
    estimated_survival_rate: f64,
    equipment_preserved: BTreeMap<String, i64>,
    rationale: String,
    coherence_score: f64,
    ranking_source: RankingSource,
}

impl From<RankedStrategy> for StrategyResponse {
    fn from(ranked: RankedStrategy) -> Self {
        let s = ranked.strategy;
        Self {
            doctrine: s.doctrine,
            name: s.name,
            description: s.description,
            total_cost: s.total_cost,
            estimated_survival_rate: s.estimated_survival_rate,
            equipment_preserved: s.equipment_preserved,
            rationale: s.rationale,
            coherence_score: ranked.coherence_score,
            ranking_source: ranked.source,
        }
    }
}

#[derive(Debug, Serialize)]
struct ProtocolList {
    protocols: Vec<ProtocolCatalogEntry>,
}

// ============ ERRORS ============

/// Error surfaced to HTTP callers as `{detail}`
#[derive(Debug)]
enum ApiError {
    /// Body missing, not JSON, or not a valid scenario request
    Body(JsonRejection),
    Medevac(MedevacError),
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::Body(rejection)
    }
}

impl From<MedevacError> for ApiError {
    fn from(err: MedevacError) -> Self {
        Self::Medevac(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, detail) = match self {
            ApiError::Body(rejection) => {
                warn!(error = %rejection, "Rejected request body");
                (rejection.status(), rejection.body_text())
            }
            ApiError::Medevac(err) if err.is_client_error() => {
                warn!(error = %err, "Rejected evaluation request");
                (StatusCode::BAD_REQUEST, err.to_string())
            }
            ApiError::Medevac(err) => {
                error!(error = %err, "Evaluation failed");
                (StatusCode::INTERNAL_SERVER_ERROR, err.to_string())
            }
        };

        (status, Json(serde_json::json!({ "detail": detail }))).into_response()
    }
}

/// JSON body whose rejections are reported as `{detail}`
#[derive(FromRequest)]
#[from_request(via(Json), rejection(ApiError))]
struct JsonBody<T>(T);

// ============ REQUEST EXPANSION ============

/// One casualty record per counted patient
///
/// Missing or empty injury lists fall back to the typical injuries for the
/// severity. Survival probability always comes from the severity.
fn expand_casualties(inputs: &[CasualtyInput]) -> Result<Vec<Casualty>, MedevacError> {
    let total: u64 = inputs.iter().map(|c| c.count as u64).sum();
    if total > MAX_CASUALTIES_PER_REQUEST {
        return Err(DoctrineError::InvalidScenario(format!(
            "{total} casualties exceeds the limit of {MAX_CASUALTIES_PER_REQUEST}"
        ))
        .into());
    }

    let mut casualties = Vec::with_capacity(total as usize);
    for input in inputs {
        let severity: Severity = input.severity.parse()?;
        let template = match &input.injuries {
            Some(injuries) if !injuries.is_empty() => {
                Casualty::typical(severity).with_injuries(injuries.clone())
            }
            _ => Casualty::typical(severity),
        };
        casualties.extend(std::iter::repeat(template).take(input.count as usize));
    }

    Ok(casualties)
}

impl ScenarioRequest {
    fn into_scenario(self) -> Result<Scenario, MedevacError> {
        Ok(Scenario {
            casualties: expand_casualties(&self.casualties)?,
            equipment_inventory: self.equipment_inventory,
            hours_until_resupply: self.hours_until_resupply,
            expected_incoming_casualties: self.expected_incoming_casualties,
            medevac_available: self.medevac_available,
            surgical_capability: self.surgical_capability,
        })
    }
}

// ============ HANDLERS ============

async fn root() -> Json<serde_json::Value> {
    let protocols: Vec<&str> = doctrine::all().iter().map(|d| d.title()).collect();
    Json(serde_json::json!({
        "service": "MEDEVAC Field Hospital Protocol API",
        "version": env!("CARGO_PKG_VERSION"),
        "status": "operational",
        "protocols": protocols,
    }))
}

async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "healthy",
        "service": "medevac-api",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

async fn list_protocols() -> Json<ProtocolList> {
    Json(ProtocolList {
        protocols: catalog(),
    })
}

#[instrument(skip_all, fields(evaluation_id = %Uuid::now_v7()))]
async fn evaluate(
    State(state): State<AppState>,
    JsonBody(request): JsonBody<ScenarioRequest>,
) -> Result<Json<Vec<StrategyResponse>>, ApiError> {
    let scenario = request.into_scenario()?;
    let strategies = state.engine.generate_strategies(&scenario)?;
    let ranked = state.ranking.rank(&scenario, strategies).await;

    if let Some(top) = ranked.first() {
        info!(
            strategies = ranked.len(),
            top = %top.strategy.doctrine,
            source = ?top.source,
            "Evaluation complete"
        );
    }

    Ok(Json(ranked.into_iter().map(StrategyResponse::from).collect()))
}

// ============ ROUTER ============

fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(Any);

    Router::new()
        .route("/", get(root))
        .route("/health", get(health_check))
        .route("/protocols", get(list_protocols))
        .route("/evaluate", post(evaluate))
        // Middleware
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new())
        .layer(cors)
        .with_state(state)
}

// ============ MAIN ============

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("api_gateway=info".parse()?),
        )
        .json()
        .init();

    let config = GatewayConfig::load()?;

    let costs = match &config.cost_table_path {
        Some(path) => {
            info!(path = %path.display(), "Loading cost table");
            CostTable::from_json_file(path)?
        }
        None => CostTable::field_hospital(),
    };

    let ranking = if config.arbiter.enabled {
        info!(url = %config.arbiter.url, timeout_secs = config.arbiter.timeout_secs, "ARBITER ranking enabled");
        RankingService::new(Arc::new(ArbiterRanker::new(config.arbiter_config())?))
    } else {
        info!("ARBITER disabled, ranking with local heuristic");
        RankingService::fallback_only()
    };

    let state = AppState {
        engine: Arc::new(DoctrineEngine::new(costs)),
        ranking: Arc::new(ranking),
    };

    let addr = config.bind_addr();
    info!("MEDEVAC API Gateway starting on {}", addr);
    info!("Endpoints: /, /health, /protocols, /evaluate");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, router(state)).await?;

    Ok(())
}
