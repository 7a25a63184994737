use crate::facts::{FactFetcher, FactOptions};
use crate::prelude::{eprintln, *};
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use numclass_core::classify::classify;
use numclass_core::input::{parse_number, Rejection, ValidationPolicy};
use serde::Deserialize;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

pub const CLASSIFY_ROUTE: &str = "/api/classify-number";

const WELCOME_MESSAGE: &str = "Welcome to the Number Classification API!";

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum Policy {
    /// Accept decimals and negatives; report bad input as 200 with `"error": true`
    Permissive,
    /// Accept non-negative integers only; report bad input as 400 with a `detail`
    Strict,
}

impl From<Policy> for ValidationPolicy {
    fn from(p: Policy) -> Self {
        match p {
            Policy::Permissive => ValidationPolicy::Permissive,
            Policy::Strict => ValidationPolicy::Strict,
        }
    }
}

#[derive(Debug, clap::Args)]
pub struct ServeOptions {
    /// Port to listen on
    #[arg(short, long, env = "NUMCLASS_PORT", default_value = "8000")]
    pub port: u16,

    /// Host to bind to
    #[arg(long, env = "NUMCLASS_HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// How invalid input is reported to the caller
    #[arg(long, env = "NUMCLASS_POLICY", default_value = "permissive")]
    pub policy: Policy,

    #[clap(flatten)]
    pub facts: FactOptions,
}

/// Shared, read-only state handed to every request
#[derive(Debug)]
pub struct AppState {
    pub fetcher: FactFetcher,
    pub policy: ValidationPolicy,
}

#[derive(Debug, Deserialize)]
pub struct ClassifyQuery {
    number: Option<String>,
}

pub async fn run(options: ServeOptions, global: crate::Global) -> Result<()> {
    let addr = f!("{}:{}", options.host, options.port);

    let state = AppState {
        fetcher: FactFetcher::from_options(&options.facts)?,
        policy: options.policy.into(),
    };

    if global.verbose {
        eprintln!("Number Classification API listening on http://{}", addr);
        eprintln!("Classify endpoint: http://{}{}", addr, CLASSIFY_ROUTE);
        eprintln!("Facts service: {}", options.facts.facts_url);
        eprintln!("Validation policy: {:?}", options.policy);
    }

    log::info!("Starting server on {addr} with {:?} policy", state.policy);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| eyre!("Failed to bind to {}: {}", addr, e))?;

    axum::serve(listener, router(state))
        .await
        .map_err(|e| eyre!("Server error: {e}"))?;

    Ok(())
}

/// Routes with an allow-all CORS layer
pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(root_handler))
        .route(CLASSIFY_ROUTE, get(classify_handler))
        .layer(cors)
        .with_state(Arc::new(state))
}

async fn root_handler() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "message": WELCOME_MESSAGE }))
}

async fn classify_handler(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ClassifyQuery>,
) -> Response {
    // A missing parameter is treated like an empty one.
    let raw = query.number.unwrap_or_default();

    match parse_number(&raw, state.policy) {
        Ok(number) => {
            let fun_fact = state.fetcher.fact_for(number).await;

            // Trial division on large inputs is CPU bound; keep it off the runtime workers.
            match tokio::task::spawn_blocking(move || classify(number, fun_fact)).await {
                Ok(result) => {
                    log::info!("Classified {number}");
                    Json(result).into_response()
                }
                Err(err) => {
                    log::error!("Classification of {number} failed: {err}");
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        Json(serde_json::json!({ "detail": "Classification failed" })),
                    )
                        .into_response()
                }
            }
        }
        Err(err) => {
            log::info!("Rejected {raw:?}: {err}");
            let rejection = Rejection::new(state.policy, &err);
            let status = match rejection {
                Rejection::Flagged { .. } => StatusCode::OK,
                Rejection::Detail { .. } => StatusCode::BAD_REQUEST,
            };
            (status, Json(rejection)).into_response()
        }
    }
}
