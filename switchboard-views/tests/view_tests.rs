use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use switchboard_client::{ResourceQueryEngine, SessionStore, TransportClient, TransportConfig};
use switchboard_views::{FieldSpec, ListView, ViewConfig, ViewEvent};
use tokio::time::timeout;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn engine_over(server: &MockServer) -> Arc<ResourceQueryEngine> {
    let config = TransportConfig {
        api_root: server.uri(),
        timeout_secs: 5,
    };
    let transport = TransportClient::new(config, SessionStore::new()).unwrap();
    Arc::new(ResourceQueryEngine::new(Arc::new(transport)))
}

fn users_view(engine: Arc<ResourceQueryEngine>) -> (ListView, tokio::sync::mpsc::Receiver<ViewEvent>) {
    let config = ViewConfig::new("admin/users")
        .page_size(20)
        .field(FieldSpec::deferred("search"))
        .field(FieldSpec::instant("isBanned"))
        .sync_url(true);
    ListView::new(engine, config)
}

fn page_body(marker: &str, total: u64) -> serde_json::Value {
    json!({"data": {"docs": [{"_id": marker}], "totalDocs": total}})
}

async fn recv(rx: &mut tokio::sync::mpsc::Receiver<ViewEvent>) -> ViewEvent {
    timeout(Duration::from_secs(5), rx.recv())
        .await
        .expect("timed out waiting for view event")
        .expect("event channel closed")
}

// ── Mount ────────────────────────────────────────────────────────

#[tokio::test]
async fn mount_fetches_the_first_page() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/admin/users"))
        .and(query_param("page", "1"))
        .and(query_param("limit", "20"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page_body("u1", 9)))
        .expect(1)
        .mount(&server)
        .await;

    let (view, mut rx) = users_view(engine_over(&server));
    view.mount(None).await;

    match recv(&mut rx).await {
        ViewEvent::Updated(result) => {
            assert_eq!(result.total, 9);
            assert_eq!(result.items[0]["_id"], "u1");
        }
        other => panic!("expected update, got {other:?}"),
    }
}

#[tokio::test]
async fn mount_hydrates_from_the_url() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/admin/users"))
        .and(query_param("search", "john"))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page_body("u2", 30)))
        .expect(1)
        .mount(&server)
        .await;

    let (view, mut rx) = users_view(engine_over(&server));
    view.mount(Some("search=john&page=2")).await;

    assert!(matches!(recv(&mut rx).await, ViewEvent::Updated(_)));
    // The applied state mirrors back into the URL.
    assert_eq!(view.url_query().await.unwrap(), "search=john&page=2");
}

// ── Instant vs deferred fields ───────────────────────────────────

#[tokio::test]
async fn deferred_edit_does_not_fetch_until_apply() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/admin/users"))
        .and(query_param("search", "john"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page_body("match", 1)))
        .expect(1)
        .mount(&server)
        .await;

    let (view, mut rx) = users_view(engine_over(&server));

    view.edit("search", "john").await;
    assert!(
        timeout(Duration::from_millis(200), rx.recv()).await.is_err(),
        "typing must not trigger a request"
    );

    view.apply().await;
    assert!(matches!(recv(&mut rx).await, ViewEvent::Updated(_)));
}

#[tokio::test]
async fn instant_edit_fetches_immediately() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/admin/users"))
        .and(query_param("isBanned", "true"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page_body("banned", 4)))
        .expect(1)
        .mount(&server)
        .await;

    let (view, mut rx) = users_view(engine_over(&server));
    view.edit("isBanned", true).await;

    match recv(&mut rx).await {
        ViewEvent::Updated(result) => assert_eq!(result.total, 4),
        other => panic!("expected update, got {other:?}"),
    }
}

// ── Ordering guarantee across real concurrency ───────────────────

#[tokio::test]
async fn slow_stale_response_never_overwrites_newer_state() {
    let server = MockServer::start().await;

    // The first query is slow; the second resolves immediately.
    Mock::given(method("GET"))
        .and(path("/admin/users"))
        .and(query_param("search", "slow"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(page_body("stale", 1))
                .set_delay(Duration::from_millis(400)),
        )
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/admin/users"))
        .and(query_param("search", "fast"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page_body("fresh", 2)))
        .mount(&server)
        .await;

    let (view, mut rx) = users_view(engine_over(&server));

    view.edit("search", "slow").await;
    view.apply().await;
    view.edit("search", "fast").await;
    view.apply().await;

    match recv(&mut rx).await {
        ViewEvent::Updated(result) => assert_eq!(result.items[0]["_id"], "fresh"),
        other => panic!("expected update, got {other:?}"),
    }

    // The slow response resolves later and must be discarded silently.
    assert!(
        timeout(Duration::from_millis(700), rx.recv()).await.is_err(),
        "stale response leaked into the view"
    );
    assert_eq!(view.result().await.unwrap().items[0]["_id"], "fresh");
}

// ── Failure and session end ──────────────────────────────────────

#[tokio::test]
async fn failure_keeps_previous_rows_and_notifies() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/admin/users"))
        .and(query_param("page", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page_body("ok", 5)))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/admin/users"))
        .and(query_param("page", "2"))
        .respond_with(
            ResponseTemplate::new(500).set_body_json(json!({"message": "backend down"})),
        )
        .mount(&server)
        .await;

    let (view, mut rx) = users_view(engine_over(&server));
    view.mount(None).await;
    assert!(matches!(recv(&mut rx).await, ViewEvent::Updated(_)));

    view.set_page(2).await;
    match recv(&mut rx).await {
        ViewEvent::Failed(message) => assert_eq!(message, "backend down"),
        other => panic!("expected failure, got {other:?}"),
    }
    // No flash of empty state.
    assert_eq!(view.result().await.unwrap().items[0]["_id"], "ok");
}

#[tokio::test]
async fn unauthorized_fetch_emits_session_ended() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/admin/users"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let (view, mut rx) = users_view(engine_over(&server));
    view.mount(None).await;

    assert!(matches!(recv(&mut rx).await, ViewEvent::SessionEnded));
}

// ── Clearing ─────────────────────────────────────────────────────

#[tokio::test]
async fn clear_refetches_the_unfiltered_first_page() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/admin/users"))
        .and(query_param("search", "john"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page_body("filtered", 1)))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/admin/users"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page_body("all", 50)))
        .mount(&server)
        .await;

    let (view, mut rx) = users_view(engine_over(&server));
    view.edit("search", "john").await;
    view.apply().await;
    assert!(matches!(recv(&mut rx).await, ViewEvent::Updated(_)));

    view.clear().await;
    match recv(&mut rx).await {
        ViewEvent::Updated(result) => assert_eq!(result.total, 50),
        other => panic!("expected update, got {other:?}"),
    }
    assert_eq!(view.url_query().await.unwrap(), "");
}
