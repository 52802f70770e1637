use std::sync::Arc;

use axum::{
    extract::State,
    http::{header, Method, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use chrono::Utc;
use serde::Serialize;
use serde_json::json;
use tower_http::cors::{Any, CorsLayer};
use tracing::{error, info};

use crate::cache::{CatalogCache, SystemClock};
use crate::catalog::{CategoryEntry, ToolEntry};
use crate::fetcher::HttpFetcher;
use crate::query;

const SOURCE_REPO: &str = "https://github.com/ripienaar/free-for-dev";
const API_ENDPOINT: &str = "https://free-on.pages.dev/api/tools";
const DOCS_URL: &str = "https://free-on.pages.dev/about";
const CACHE_CONTROL: &str = "public, s-maxage=3600, stale-while-revalidate=86400";

const API_FEATURES: [&str; 5] = [
    "Real-time data from GitHub repository",
    "Automatic parsing and categorization",
    "RESTful API access",
    "CORS enabled for cross-origin requests",
    "Cached for optimal performance",
];

type SharedCache = Arc<CatalogCache<HttpFetcher, SystemClock>>;

pub async fn serve(port: u16) -> anyhow::Result<()> {
    let fetcher = HttpFetcher::new()?;
    let cache = Arc::new(CatalogCache::new(fetcher, SystemClock));
    let app = router(cache);

    let listener = tokio::net::TcpListener::bind(("0.0.0.0", port)).await?;
    info!("Serving catalog API on http://{}", listener.local_addr()?);
    axum::serve(listener, app).await?;
    Ok(())
}

pub fn router(cache: SharedCache) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE]);

    Router::new()
        .route("/api/tools", get(tools_handler))
        .route("/api/stats", get(stats_handler))
        .layer(cors)
        .with_state(cache)
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ToolsMeta {
    source: &'static str,
    last_updated: String,
    total_tools: usize,
    total_categories: usize,
    description: &'static str,
}

#[derive(Serialize)]
struct ToolsResponse {
    meta: ToolsMeta,
    tools: Vec<ToolEntry>,
    categories: Vec<CategoryEntry>,
}

async fn tools_handler(State(cache): State<SharedCache>) -> Response {
    let snapshot = cache.get().await;
    let body = ToolsResponse {
        meta: ToolsMeta {
            source: SOURCE_REPO,
            last_updated: Utc::now().to_rfc3339(),
            total_tools: snapshot.tools.len(),
            total_categories: snapshot.categories.len(),
            description: "Real-time parsed data from the free-for-dev GitHub repository",
        },
        tools: snapshot.tools,
        categories: snapshot.categories,
    };
    cached_json(&body, "Failed to fetch tools data")
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct StatsResponse {
    #[serde(flatten)]
    stats: query::CatalogStats,
    source: &'static str,
    api_endpoint: &'static str,
    documentation: &'static str,
    features: [&'static str; 5],
}

async fn stats_handler(State(cache): State<SharedCache>) -> Response {
    let snapshot = cache.get().await;
    let body = StatsResponse {
        stats: query::catalog_stats(&snapshot.tools, &snapshot.categories, snapshot.last_updated),
        source: SOURCE_REPO,
        api_endpoint: API_ENDPOINT,
        documentation: DOCS_URL,
        features: API_FEATURES,
    };
    cached_json(&body, "Failed to fetch metadata")
}

/// Serialize a body with the shared cache/CORS policy. Serialization
/// failures surface as HTTP 500 with a generic message, distinct from the
/// degrade-to-empty policy inside the cache.
fn cached_json<T: Serialize>(body: &T, error_message: &str) -> Response {
    match serde_json::to_value(body) {
        Ok(value) => (
            StatusCode::OK,
            [(header::CACHE_CONTROL, CACHE_CONTROL)],
            Json(value),
        )
            .into_response(),
        Err(e) => {
            error!("Failed to serialize response: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": error_message })),
            )
                .into_response()
        }
    }
}
