//! API Handlers
//!
//! HTTP request handlers for each endpoint. Handlers validate input, call the
//! coordinator and translate outcomes; they hold no business logic.

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    Json,
};
use tracing::warn;

use crate::cache::MemoryCache;
use crate::config::Config;
use crate::coordinator::CacheAside;
use crate::error::{KvError, Result};
use crate::models::{
    GetResponse, HealthResponse, KeyQuery, SetQuery, SetRequest, SetResponse, StatsResponse,
};
use crate::observe::CallMetrics;
use crate::shard::ModuloRouter;
use crate::store::ShardedMemoryStore;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub coordinator: Arc<CacheAside>,
    pub metrics: Arc<CallMetrics>,
    /// In-process cache, when the coordinator runs over one; feeds `/stats`
    pub local_cache: Option<MemoryCache>,
}

impl AppState {
    pub fn new(coordinator: Arc<CacheAside>, metrics: Arc<CallMetrics>) -> Self {
        Self {
            coordinator,
            metrics,
            local_cache: None,
        }
    }

    /// Reports entry and eviction counts of `cache` in `/stats`.
    pub fn with_local_cache(mut self, cache: MemoryCache) -> Self {
        self.local_cache = Some(cache);
        self
    }

    /// Wires the in-memory cache and sharded store from configuration.
    ///
    /// Returns the cache handle alongside the state so the caller can run the
    /// TTL cleanup task against it.
    pub fn from_config(config: &Config) -> Result<(Self, MemoryCache)> {
        let cache = MemoryCache::new(config.cache_max_entries);
        let store = ShardedMemoryStore::new(config.shard_count);
        let router = ModuloRouter::new(config.shard_count)?;
        let metrics = Arc::new(CallMetrics::new());

        let coordinator = CacheAside::new(
            Arc::new(cache.clone()),
            Arc::new(store),
            Arc::new(router),
            metrics.clone(),
            config.cache_ttl(),
            config.request_timeout(),
        )?;

        let state = Self::new(Arc::new(coordinator), metrics).with_local_cache(cache.clone());
        Ok((state, cache))
    }
}

/// Handler for `GET /get?key=K`
pub async fn get_handler(
    State(state): State<AppState>,
    Query(query): Query<KeyQuery>,
) -> Result<Json<GetResponse>> {
    let key = query.into_key()?;
    read_key(&state, key).await
}

/// Handler for `GET /get/:key`
pub async fn get_path_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<GetResponse>> {
    let key = KeyQuery { key: Some(key) }.into_key()?;
    read_key(&state, key).await
}

/// Handler for `PUT /set` with a JSON body
///
/// Malformed or incomplete bodies are reported as `InvalidInput` (400).
pub async fn set_handler(
    State(state): State<AppState>,
    payload: std::result::Result<Json<SetRequest>, JsonRejection>,
) -> Result<Json<SetResponse>> {
    let Json(req) = payload.map_err(|rejection| KvError::InvalidInput(rejection.body_text()))?;
    req.validate()?;
    write_key(&state, req).await
}

/// Handler for `POST /set?key=K&value=V`
pub async fn set_query_handler(
    State(state): State<AppState>,
    Query(query): Query<SetQuery>,
) -> Result<Json<SetResponse>> {
    let req = SetRequest::try_from(query)?;
    write_key(&state, req).await
}

/// Handler for `GET /stats`
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    let (cache_entries, evictions) = match &state.local_cache {
        Some(cache) => (Some(cache.len().await), Some(cache.evictions().await)),
        None => (None, None),
    };

    Json(StatsResponse {
        shards: state.coordinator.shard_count(),
        cache_entries,
        evictions,
        metrics: state.metrics.snapshot(),
    })
}

/// Handler for `GET /health`
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}

async fn read_key(state: &AppState, key: String) -> Result<Json<GetResponse>> {
    let outcome = state.coordinator.read(&key).await.inspect_err(|err| {
        warn!(key = %key, error = %err, "read failed");
    })?;

    match outcome.into_value() {
        Some(value) => Ok(Json(GetResponse::new(key, value))),
        None => Err(KvError::NotFound(key)),
    }
}

async fn write_key(state: &AppState, req: SetRequest) -> Result<Json<SetResponse>> {
    state
        .coordinator
        .write(&req.key, &req.value)
        .await
        .inspect_err(|err| {
            warn!(key = %req.key, error = %err, "write failed");
        })?;

    Ok(Json(SetResponse::new(req.key)))
}
