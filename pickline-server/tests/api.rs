use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use chrono::{TimeZone, Utc};
use serde_json::{Value, json};
use tower::ServiceExt;

use pickline::{
    bson::{Bson, Uuid},
    prelude::{DocumentStore, DocumentStoreError, DocumentStoreResult, Query, StoreBackend},
};
use pickline_server::{
    gateway::{Credentials, Gateway},
    routes::{AppState, build_router},
    schema::{Blog, Legal, LegalSlug, Plan, PlanCode, Prediction, Testimonial},
    validate::Validated,
};

/// A reachable backend whose every operation fails.
#[derive(Debug)]
struct BrokenStore;

fn broken() -> DocumentStoreError {
    DocumentStoreError::Backend("connection reset by peer".to_string())
}

#[async_trait]
impl StoreBackend for BrokenStore {
    async fn insert_documents(&self, _documents: Vec<(Uuid, Bson)>, _collection: &str) -> DocumentStoreResult<()> {
        Err(broken())
    }

    async fn query_documents(&self, _query: Query, _collection: &str) -> DocumentStoreResult<Vec<Bson>> {
        Err(broken())
    }

    async fn list_collections(&self) -> DocumentStoreResult<Vec<String>> {
        Err(broken())
    }
}

fn failing() -> Gateway {
    Gateway::connected(
        DocumentStore::new(BrokenStore),
        Credentials {
            database_url: true,
            database_name: true,
        },
    )
}

fn app(gateway: &Gateway) -> axum::Router {
    build_router(AppState {
        gateway: gateway.clone(),
    })
}

fn offline() -> Gateway {
    Gateway::disconnected(Credentials::default())
}

/// Send a request and return (status, JSON body).
async fn send(gateway: &Gateway, request: Request<Body>) -> (StatusCode, Value) {
    let resp = app(gateway).oneshot(request).await.unwrap();
    let status = resp.status();
    let body = axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&body).unwrap())
}

async fn get(gateway: &Gateway, uri: &str) -> (StatusCode, Value) {
    send(gateway, Request::builder().uri(uri).body(Body::empty()).unwrap()).await
}

async fn post(gateway: &Gateway, uri: &str, body: Value) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(gateway, request).await
}

fn prediction(match_id: &str, league: &str, kickoff_iso: &str, odds: f64, confidence: i64) -> Prediction {
    serde_json::from_value(json!({
        "league": league,
        "match_id": match_id,
        "home_team": "Home",
        "away_team": "Away",
        "kickoff_iso": kickoff_iso,
        "pick": "home_win",
        "odds": odds,
        "confidence": confidence,
    }))
    .unwrap()
}

/// An in-memory gateway holding a small fixture set of predictions.
async fn seeded() -> Gateway {
    let gateway = Gateway::in_memory();
    for prediction in [
        prediction("M001", "Serie A", "2024-03-05T19:45:00Z", 1.85, 72),
        prediction("M002", "Serie A", "2024-03-06T20:00:00Z", 2.40, 55),
        prediction("M003", "Premier League", "2024-03-05T15:00:00Z", 1.50, 90),
        prediction("M004", "LaLiga", "2024-03-07T21:00:00Z", 3.10, 40),
    ] {
        gateway.create(&Validated::new(prediction).unwrap()).await.unwrap();
    }
    gateway
}

fn match_ids(body: &Value) -> Vec<&str> {
    body["items"]
        .as_array()
        .unwrap()
        .iter()
        .map(|item| item["match_id"].as_str().unwrap())
        .collect()
}

#[tokio::test]
async fn root_banner() {
    let (status, body) = get(&offline(), "/").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "message": "Sports Analytics API running" }));
}

#[tokio::test]
async fn health_never_fails() {
    let (status, body) = get(&offline(), "/test").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["backend"], "running");
    assert_eq!(body["connection_status"], "not connected");
    assert_eq!(body["database_url"], "not set");

    let (status, body) = get(&seeded().await, "/test").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["connection_status"], "connected");
    assert_eq!(body["collections"], json!(["prediction"]));
}

#[tokio::test]
async fn league_filter_is_exact() {
    let (status, body) = get(&seeded().await, "/predictions?league=Serie%20A").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(match_ids(&body), ["M001", "M002"]);

    let (_, body) = get(&seeded().await, "/predictions?league=serie%20a").await;
    assert!(match_ids(&body).is_empty());
}

#[tokio::test]
async fn date_filter_matches_kickoff_prefix() {
    let (status, body) = get(&seeded().await, "/predictions?date=2024-03-05").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(match_ids(&body), ["M001", "M003"]);
}

#[tokio::test]
async fn confidence_and_odds_bounds_are_inclusive() {
    let gateway = seeded().await;

    let (_, body) = get(&gateway, "/predictions?min_conf=55&max_conf=72").await;
    assert_eq!(match_ids(&body), ["M001", "M002"]);

    let (_, body) = get(&gateway, "/predictions?min_odds=1.85&max_odds=2.4").await;
    assert_eq!(match_ids(&body), ["M001", "M002"]);

    let (_, body) = get(&gateway, "/predictions?league=Serie%20A&min_odds=2").await;
    assert_eq!(match_ids(&body), ["M002"]);
}

#[tokio::test]
async fn zero_bound_is_applied() {
    let gateway = seeded().await;

    let (status, body) = get(&gateway, "/predictions?min_conf=0").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(match_ids(&body).len(), 4);

    let (status, body) = get(&gateway, "/predictions?max_odds=0").await;
    assert_eq!(status, StatusCode::OK);
    assert!(match_ids(&body).is_empty());
}

#[tokio::test]
async fn limit_truncates_in_insertion_order() {
    let gateway = seeded().await;

    let (_, body) = get(&gateway, "/predictions?limit=2").await;
    assert_eq!(match_ids(&body), ["M001", "M002"]);

    let (_, body) = get(&gateway, "/predictions?limit=0").await;
    assert_eq!(match_ids(&body).len(), 4);
}

#[tokio::test]
async fn filter_matching_nothing_is_an_empty_list() {
    let (status, body) = get(&seeded().await, "/predictions?league=Eredivisie").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "items": [] }));
}

#[tokio::test]
async fn malformed_query_parameter_is_rejected() {
    let (status, body) = get(&seeded().await, "/predictions?min_odds=abc").await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["detail"][0]["field"], "query");
}

#[tokio::test]
async fn prediction_by_match_id() {
    let gateway = seeded().await;

    let (status, body) = get(&gateway, "/predictions/M003").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["league"], "Premier League");
    assert!(body["_id"].is_string());

    let (status, body) = get(&gateway, "/predictions/NOPE").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "detail": "Not found" }));
}

#[tokio::test]
async fn blogs_list_and_lookup() {
    let gateway = Gateway::in_memory();
    for n in 1..=8 {
        let blog: Blog = serde_json::from_value(json!({
            "slug": format!("post-{n}"),
            "title": format!("Post {n}"),
            "content": "<p>...</p>",
        }))
        .unwrap();
        gateway.create(&Validated::new(blog).unwrap()).await.unwrap();
    }

    let (status, body) = get(&gateway, "/blogs").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["items"].as_array().unwrap().len(), 6);

    let (status, body) = get(&gateway, "/blogs/post-7").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["title"], "Post 7");
    assert_eq!(body["author"], "Analyst Team");

    let (status, _) = get(&gateway, "/blogs/missing").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn testimonials_default_to_ten() {
    let gateway = Gateway::in_memory();
    for n in 0..12 {
        let testimonial: Testimonial = serde_json::from_value(json!({
            "name": format!("Fan {n}"),
            "message": "Great picks",
        }))
        .unwrap();
        gateway.create(&Validated::new(testimonial).unwrap()).await.unwrap();
    }

    let (status, body) = get(&gateway, "/admin/testimonials").await;
    assert_eq!(status, StatusCode::OK);
    let items = body["items"].as_array().unwrap();
    assert_eq!(items.len(), 10);
    assert_eq!(items[0]["verified"], true);
}

#[tokio::test]
async fn subscription_email_is_stored_verbatim() {
    let gateway = Gateway::in_memory();

    let (status, body) = post(&gateway, "/subscribe", json!({ "email": "not-an-email" })).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "ok": true }));

    let stored = gateway
        .query("subscription", pickline::prelude::Filter::all(), None)
        .await
        .unwrap();
    let stored = stored[0].as_document().unwrap();
    assert_eq!(stored.get_str("email").unwrap(), "not-an-email");
    assert_eq!(stored.get_str("source").unwrap(), "landing");
}

#[tokio::test]
async fn contact_requires_fields() {
    let gateway = Gateway::in_memory();

    let (status, body) = post(&gateway, "/contact", json!({ "name": "Ana", "email": "ana@example.com" })).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["detail"][0]["field"], "body");

    let (status, body) = post(
        &gateway,
        "/contact",
        json!({ "name": "Ana", "email": "ana@example.com", "message": "Hi" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "ok": true }));
}

#[tokio::test]
async fn invalid_payload_is_rejected_before_write() {
    let (status, body) = post(&offline(), "/subscribe", json!({ "source": "landing" })).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body["detail"].is_array());
}

#[tokio::test]
async fn writes_fail_while_offline() {
    let (status, body) = post(&offline(), "/subscribe", json!({ "email": "fan@example.com" })).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({ "detail": "Database not available" }));
}

#[tokio::test]
async fn reads_fail_while_offline() {
    let gateway = offline();
    for uri in ["/predictions", "/predictions/M001", "/blogs", "/blogs/intro", "/admin/testimonials"] {
        let (status, body) = get(&gateway, uri).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR, "{uri}");
        assert_eq!(body, json!({ "detail": "Database not available" }), "{uri}");
    }
}

#[tokio::test]
async fn plans_fall_back_while_offline() {
    let (status, body) = get(&offline(), "/plans").await;
    assert_eq!(status, StatusCode::OK);
    let items = body["items"].as_array().unwrap();
    let codes: Vec<_> = items.iter().map(|plan| plan["code"].as_str().unwrap()).collect();
    assert_eq!(codes, ["free", "starter", "pro"]);
    assert_eq!(items[1]["monthly_price"], 19.0);
    assert_eq!(items[1]["currency"], "USD");
}

#[tokio::test]
async fn plans_come_from_the_store_when_connected() {
    let (status, body) = get(&Gateway::in_memory(), "/plans").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "items": [] }));
}

#[tokio::test]
async fn legal_pages_fall_back_while_offline() {
    let gateway = offline();

    let (status, body) = get(&gateway, "/legal/responsible-betting").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["title"], "Responsible Betting");
    assert_eq!(body["content"], "<p>Play responsibly.</p>");

    let (status, body) = get(&gateway, "/legal/cookies").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "detail": "Not found" }));
}

#[tokio::test]
async fn legal_page_missing_from_store_is_not_found() {
    let (status, _) = get(&Gateway::in_memory(), "/legal/terms").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn unreachable_store_starts_disconnected() {
    let gateway = Gateway::verified(DocumentStore::new(BrokenStore), Credentials::default()).await;
    assert!(!gateway.is_available());

    let (status, body) = get(&gateway, "/plans").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["items"].as_array().unwrap().len(), 3);

    let gateway = Gateway::verified(
        DocumentStore::new(pickline::memory::InMemoryStore::new()),
        Credentials::default(),
    )
    .await;
    assert!(gateway.is_available());
}

#[tokio::test]
async fn health_reports_listing_failure() {
    let (status, body) = get(&failing(), "/test").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["connection_status"], "connected");
    assert_eq!(body["database_url"], "set");
    assert_eq!(
        body["database"],
        "connected but error: Backend error: connection reset by peer"
    );
    assert_eq!(body["collections"], json!([]));
}

#[tokio::test]
async fn write_failure_is_a_server_error() {
    let (status, body) = post(&failing(), "/subscribe", json!({ "email": "fan@example.com" })).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({ "detail": "Failed to save" }));
}

#[tokio::test]
async fn read_failure_does_not_leak_backend_text() {
    let (status, body) = get(&failing(), "/predictions").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({ "detail": "Failed to load" }));
}

#[tokio::test]
async fn plans_and_legal_fall_back_on_read_failure() {
    let gateway = failing();

    let (status, body) = get(&gateway, "/plans").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["items"][0]["code"], "free");

    let (status, body) = get(&gateway, "/legal/privacy").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["title"], "Privacy Policy");

    let (status, _) = get(&gateway, "/legal/cookies").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn stored_plans_and_legal_pages_are_served() {
    let gateway = Gateway::in_memory();
    let plan_id = gateway
        .create(
            &Validated::new(Plan {
                code: PlanCode::Pro,
                name: "Pro Annual".to_string(),
                monthly_price: 45.0,
                yearly_price: 432.0,
                currency: "EUR".to_string(),
                features: vec!["All leagues".to_string()],
            })
            .unwrap(),
        )
        .await
        .unwrap();
    let legal_id = gateway
        .create(
            &Validated::new(Legal {
                slug: LegalSlug::Privacy,
                title: "Privacy Notice".to_string(),
                content: "<p>We store your email.</p>".to_string(),
                updated_at: Some(Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap()),
            })
            .unwrap(),
        )
        .await
        .unwrap();

    let (status, body) = get(&gateway, "/plans").await;
    assert_eq!(status, StatusCode::OK);
    let items = body["items"].as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["_id"], plan_id.to_string());
    assert_eq!(items[0]["currency"], "EUR");
    assert_eq!(items[0]["features"], json!(["All leagues"]));

    let (status, body) = get(&gateway, "/legal/privacy").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["_id"], legal_id.to_string());
    assert_eq!(body["title"], "Privacy Notice");

    let (status, _) = get(&gateway, "/legal/terms").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
