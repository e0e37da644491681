use std::path::Path;
use std::sync::Arc;

use axum::extract::{Query, State};
use axum::http::HeaderMap;
use axum::response::Html;
use axum::routing::get;
use axum::{Json, Router};
use bytes::Bytes;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::error;

use crate::cache::PageCache;
use crate::config::Config;
use crate::dispatch;
use crate::error::AppError;
use crate::records::{Record, RecordStore};
use crate::view::{self, Presenter};

// ── Shared state ────────────────────────────────────────────────────

/// Everything is built before the listener binds and is read-only after.
pub struct AppState {
    pub records: RecordStore,
    pub cache: PageCache,
    pub home: Bytes,
    pub sources: Bytes,
}

impl AppState {
    pub fn new(records: RecordStore, config: &Config, presenter: &dyn Presenter) -> Self {
        let cache = PageCache::prebuild(
            records.as_slice(),
            config.ordering,
            &config.img_source,
            presenter,
        );
        Self {
            records,
            cache,
            home: Bytes::from(view::home_page()),
            sources: Bytes::from(view::sources_page()),
        }
    }
}

// ── Router ──────────────────────────────────────────────────────────

pub fn router(state: Arc<AppState>, static_dir: &Path) -> Router {
    Router::new()
        // Pages
        .route("/", get(home))
        .route("/sources", get(sources))
        // Card grid fragments
        .route("/content", get(content))
        // Misc
        .route("/health", get(health))
        .route("/api/closest", get(closest))
        .nest_service("/static", ServeDir::new(static_dir))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

// ── Request types ───────────────────────────────────────────────────

/// Decoded query pairs in request order. Repeated keys never reject the
/// request; handlers read the first value with `dispatch::first_param`.
type QueryPairs = Query<Vec<(String, String)>>;

// ── Handlers ────────────────────────────────────────────────────────

async fn home(State(state): State<Arc<AppState>>) -> Html<Bytes> {
    Html(state.home.clone())
}

async fn sources(State(state): State<Arc<AppState>>) -> Html<Bytes> {
    Html(state.sources.clone())
}

async fn health() -> &'static str {
    "ok"
}

async fn content(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Query(params): QueryPairs,
) -> Result<Html<Bytes>, AppError> {
    let key = dispatch::cache_key(&headers, dispatch::first_param(&params, "sort"));
    match state.cache.lookup(&key) {
        Some(body) => Ok(Html(body)),
        None => {
            error!(key = %key, "content cache miss");
            Err(AppError::CacheMiss)
        }
    }
}

/// Record whose metric is nearest to `?both=`.
async fn closest(
    State(state): State<Arc<AppState>>,
    Query(params): QueryPairs,
) -> Result<Json<Record>, AppError> {
    let raw = dispatch::first_param(&params, "both")
        .ok_or_else(|| AppError::BadRequest("missing `both` parameter".into()))?;
    let target: f64 = raw
        .trim()
        .parse()
        .ok()
        .filter(|v: &f64| v.is_finite())
        .ok_or_else(|| AppError::BadRequest(format!("invalid `both`: {raw}")))?;

    state
        .records
        .closest(target)
        .cloned()
        .map(Json)
        .ok_or_else(|| AppError::NotFound("no records loaded".into()))
}
