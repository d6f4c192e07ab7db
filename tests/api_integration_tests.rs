//! Integration Tests for API Endpoints
//!
//! Tests the full request/response cycle through the router, including
//! cache and store outages injected behind the ports.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use serde_json::Value;
use shardcache::{
    api::create_router,
    cache::{CachePort, MemoryCache},
    observe::CallMetrics,
    shard::ModuloRouter,
    store::{ShardedMemoryStore, StorePort},
    AppState, CacheAside, Config, KvError,
};
use tower::ServiceExt;

// == Fault Injection ==

/// Memory cache that can be switched to fail every call.
#[derive(Clone)]
struct SwitchableCache {
    inner: MemoryCache,
    down: Arc<AtomicBool>,
}

impl SwitchableCache {
    fn new() -> Self {
        Self {
            inner: MemoryCache::new(100),
            down: Arc::new(AtomicBool::new(false)),
        }
    }

    fn set_down(&self, down: bool) {
        self.down.store(down, Ordering::SeqCst);
    }

    fn check(&self) -> shardcache::Result<()> {
        if self.down.load(Ordering::SeqCst) {
            Err(KvError::CacheUnavailable("connection reset".into()))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl CachePort for SwitchableCache {
    async fn get(&self, key: &str) -> shardcache::Result<Option<String>> {
        self.check()?;
        self.inner.get(key).await
    }

    async fn set(&self, key: &str, value: &str, ttl: Duration) -> shardcache::Result<()> {
        self.check()?;
        self.inner.set(key, value, ttl).await
    }
}

/// Sharded store that can be switched to fail every call.
struct SwitchableStore {
    inner: ShardedMemoryStore,
    down: AtomicBool,
}

impl SwitchableStore {
    fn check(&self) -> shardcache::Result<()> {
        if self.down.load(Ordering::SeqCst) {
            Err(KvError::StoreUnavailable("too many connections".into()))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl StorePort for SwitchableStore {
    async fn get(&self, shard: usize, key: &str) -> shardcache::Result<Option<String>> {
        self.check()?;
        self.inner.get(shard, key).await
    }

    async fn upsert(&self, shard: usize, key: &str, value: &str) -> shardcache::Result<()> {
        self.check()?;
        self.inner.upsert(shard, key, value).await
    }

    fn shard_count(&self) -> usize {
        self.inner.shard_count()
    }
}

// == Helper Functions ==

fn create_test_app() -> Router {
    let (state, _cache) = AppState::from_config(&Config::default()).unwrap();
    create_router(state)
}

fn create_faulty_app() -> (Router, SwitchableCache, Arc<SwitchableStore>) {
    let cache = SwitchableCache::new();
    let store = Arc::new(SwitchableStore {
        inner: ShardedMemoryStore::new(2),
        down: AtomicBool::new(false),
    });
    let metrics = Arc::new(CallMetrics::new());
    let coordinator = CacheAside::new(
        Arc::new(cache.clone()),
        store.clone(),
        Arc::new(ModuloRouter::new(2).unwrap()),
        metrics.clone(),
        Duration::from_secs(600),
        Duration::from_millis(500),
    )
    .unwrap();

    let app = create_router(AppState::new(Arc::new(coordinator), metrics));
    (app, cache, store)
}

async fn body_to_json(body: Body) -> Value {
    let bytes = axum::body::to_bytes(body, usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn put_json(body: &'static str) -> Request<Body> {
    Request::builder()
        .method("PUT")
        .uri("/set")
        .header("content-type", "application/json")
        .body(Body::from(body))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

// == SET Endpoint Tests ==

#[tokio::test]
async fn test_set_endpoint_success() {
    let response = create_test_app()
        .oneshot(put_json(r#"{"key":"test_key","value":"test_value"}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["key"], "test_key");
    assert!(json["message"].as_str().unwrap().contains("test_key"));
}

#[tokio::test]
async fn test_query_set_then_query_get() {
    let app = create_test_app();

    let set_response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/set?key=alice&value=x")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(set_response.status(), StatusCode::OK);

    let get_response = app.oneshot(get("/get?key=alice")).await.unwrap();
    assert_eq!(get_response.status(), StatusCode::OK);
    let json = body_to_json(get_response.into_body()).await;
    assert_eq!(json["value"], "x");
}

// == GET Endpoint Tests ==

#[tokio::test]
async fn test_get_endpoint_success() {
    let app = create_test_app();

    let set_response = app
        .clone()
        .oneshot(put_json(r#"{"key":"get_key","value":"get_value"}"#))
        .await
        .unwrap();
    assert_eq!(set_response.status(), StatusCode::OK);

    let get_response = app.oneshot(get("/get/get_key")).await.unwrap();

    assert_eq!(get_response.status(), StatusCode::OK);
    let json = body_to_json(get_response.into_body()).await;
    assert_eq!(json["key"], "get_key");
    assert_eq!(json["value"], "get_value");
}

#[tokio::test]
async fn test_empty_value_round_trips() {
    let app = create_test_app();

    app.clone()
        .oneshot(put_json(r#"{"key":"blank","value":""}"#))
        .await
        .unwrap();

    let response = app.oneshot(get("/get?key=blank")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["value"], "");
}

#[tokio::test]
async fn test_get_endpoint_not_found() {
    let response = create_test_app()
        .oneshot(get("/get?key=nonexistent_key"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let json = body_to_json(response.into_body()).await;
    assert!(json["error"].as_str().unwrap().contains("nonexistent_key"));
}

// == Fault Isolation Tests ==

#[tokio::test]
async fn test_cache_outage_fails_read_with_503() {
    let (app, cache, _store) = create_faulty_app();

    app.clone()
        .oneshot(put_json(r#"{"key":"alice","value":"x"}"#))
        .await
        .unwrap();
    cache.set_down(true);

    let response = app.oneshot(get("/get?key=alice")).await.unwrap();
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["error"], "Cache unavailable");
}

#[tokio::test]
async fn test_cache_outage_does_not_fail_write() {
    let (app, cache, store) = create_faulty_app();
    cache.set_down(true);

    let response = app
        .clone()
        .oneshot(put_json(r#"{"key":"alice","value":"x"}"#))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(store.get(1, "alice").await.unwrap().as_deref(), Some("x"));

    // Once the cache recovers the read falls through to the store.
    cache.set_down(false);
    let response = app.oneshot(get("/get?key=alice")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["value"], "x");
}

#[tokio::test]
async fn test_store_outage_fails_write_and_miss_with_503() {
    let (app, cache, store) = create_faulty_app();
    store.down.store(true, Ordering::SeqCst);

    let response = app
        .clone()
        .oneshot(put_json(r#"{"key":"alice","value":"x"}"#))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["error"], "Store unavailable");
    assert_eq!(cache.inner.get("alice").await.unwrap(), None);

    let response = app.oneshot(get("/get?key=alice")).await.unwrap();
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn test_cache_hit_survives_store_outage() {
    let (app, _cache, store) = create_faulty_app();

    app.clone()
        .oneshot(put_json(r#"{"key":"alice","value":"x"}"#))
        .await
        .unwrap();
    store.down.store(true, Ordering::SeqCst);

    let response = app.oneshot(get("/get?key=alice")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

// == STATS Endpoint Tests ==

#[tokio::test]
async fn test_stats_endpoint() {
    let app = create_test_app();

    // Write, hit, miss
    app.clone()
        .oneshot(put_json(r#"{"key":"stats_key","value":"stats_value"}"#))
        .await
        .unwrap();
    app.clone().oneshot(get("/get?key=stats_key")).await.unwrap();
    app.clone().oneshot(get("/get?key=nonexistent")).await.unwrap();

    let response = app.oneshot(get("/stats")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_to_json(response.into_body()).await;

    assert_eq!(json["shards"], 2);
    assert_eq!(json["cache_hits"], 1);
    assert_eq!(json["cache_misses"], 1);
    assert_eq!(json["calls"]["store.set"]["calls"], 1);
    assert_eq!(json["calls"]["cache.get"]["calls"], 2);
    assert_eq!(json["calls"]["store.get"]["calls"], 1);
    assert!(json["calls"]["cache.get"]["mean_micros"].is_u64());
    assert_eq!(json["cache_entries"], 1);
    assert_eq!(json["evictions"], 0);
}

// == HEALTH Endpoint Tests ==

#[tokio::test]
async fn test_health_endpoint() {
    let response = create_test_app().oneshot(get("/health")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["status"], "healthy");
    assert!(json.get("timestamp").is_some());
}

// == Error Response Tests ==

#[tokio::test]
async fn test_invalid_json_request() {
    let response = create_test_app()
        .oneshot(put_json(r#"{"invalid json"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_to_json(response.into_body()).await;
    assert!(json.get("error").is_some());
}

#[tokio::test]
async fn test_set_missing_key_field() {
    let response = create_test_app()
        .oneshot(put_json(r#"{"value":"x"}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_to_json(response.into_body()).await;
    assert!(json["error"].as_str().unwrap().contains("key"));
}

#[tokio::test]
async fn test_empty_key_request() {
    let response = create_test_app()
        .oneshot(put_json(r#"{"key":"","value":"test"}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_to_json(response.into_body()).await;
    assert!(json.get("error").is_some());
}

#[tokio::test]
async fn test_query_set_missing_value() {
    let response = create_test_app()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/set?key=k")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
