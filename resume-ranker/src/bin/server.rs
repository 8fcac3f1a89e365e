use axum::{
    extract::{Json, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use resume_ranker::{
    ErrorKind, RankerConfig, RankerError, RankingEngine, RankingResponse, SourceDocument,
};

#[derive(Clone)]
struct AppState {
    engine: Arc<RankingEngine>,
}

#[derive(Debug, Deserialize)]
struct RankRequest {
    job_description: String,
    #[serde(default)]
    resumes: Vec<SourceDocument>,
}

#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
}

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: String,
    version: String,
    model: String,
    strategy: String,
    vocabulary_terms: usize,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "resume_ranker_server=debug,resume_ranker=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = match std::env::var("RANKER_CONFIG") {
        Ok(path) => RankerConfig::load(path)?,
        Err(_) => RankerConfig::default(),
    }
    .apply_env()?;
    let port = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse::<u16>().ok())
        .unwrap_or(8090);

    tracing::info!("🚀 Starting Resume Ranker Server");
    tracing::info!("⚙️ Config: {}", config);
    tracing::info!("🔌 Port: {}", port);

    // Model is loaded once and shared read-only by all requests
    let engine = RankingEngine::from_config(&config)?;

    let state = AppState {
        engine: Arc::new(engine),
    };

    // Build router
    let app = Router::new()
        .route("/health", get(health_handler))
        .route("/v1/rank", post(rank_handler))
        .layer(CorsLayer::permissive())
        .with_state(state);

    // Start server
    let addr = format!("0.0.0.0:{}", port);
    tracing::info!("📄 Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: resume_ranker::VERSION.to_string(),
        model: state.engine.model_name().to_string(),
        strategy: state.engine.strategy_name().to_string(),
        vocabulary_terms: state.engine.vocabulary().len(),
    })
}

async fn rank_handler(
    State(state): State<AppState>,
    Json(req): Json<RankRequest>,
) -> Result<Json<RankingResponse>, AppError> {
    tracing::debug!("Rank request: {} resumes", req.resumes.len());

    // Scoring is CPU-bound; keep it off the async workers
    let engine = state.engine.clone();
    let result = tokio::task::spawn_blocking(move || {
        engine.rank_documents(req.job_description, req.resumes)
    })
    .await
    .map_err(|e| AppError::Internal(e.to_string()))??;

    if let Some(best) = result.top() {
        tracing::info!(
            "✅ {} resumes → {} ({:.3}, {:.2}ms)",
            result.records.len(),
            best.candidate_id,
            best.final_score,
            result.latency_ms
        );
    }

    Ok(Json(result))
}

// Error handling
enum AppError {
    Ranker(RankerError),
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::Ranker(e) => match e.kind() {
                ErrorKind::Precondition => (StatusCode::UNPROCESSABLE_ENTITY, e.to_string()),
                _ => (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()),
            },
            AppError::Internal(message) => (StatusCode::INTERNAL_SERVER_ERROR, message),
        };

        tracing::error!("❌ Error: {} - {}", status, message);

        (status, Json(ErrorResponse { error: message })).into_response()
    }
}

impl From<RankerError> for AppError {
    fn from(err: RankerError) -> Self {
        Self::Ranker(err)
    }
}
