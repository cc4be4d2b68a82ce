//! Gateway integration tests.
//!
//! These drive the public router end to end with in-memory store stubs
//! behind the client traits, so no real stores are needed.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use serde_json::{json, Value};
use tower::ServiceExt;

use common::{AppError, AppResult, PageParams};
use domain::{Listing, ListingType, User};
use gateway_lib::clients::{ListingsApi, UsersApi};
use gateway_lib::config::GatewayConfig;
use gateway_lib::join::FilterMissPolicy;
use gateway_lib::routes::create_router;
use gateway_lib::state::AppState;

// =============================================================================
// Store stubs
// =============================================================================

#[derive(Clone, Copy)]
enum Failure {
    None,
    Contract,
    Transport,
}

struct StubListings {
    rows: Vec<Listing>,
    failure: Failure,
    pages: Arc<Mutex<Vec<PageParams>>>,
    created: Arc<Mutex<Vec<Value>>>,
}

#[async_trait]
impl ListingsApi for StubListings {
    async fn list_listings(&self, page: PageParams) -> AppResult<Vec<Listing>> {
        self.pages.lock().unwrap().push(page);
        match self.failure {
            Failure::None => Ok(self.rows.clone()),
            Failure::Contract => Err(AppError::upstream("listings key missing")),
            Failure::Transport => Err(AppError::StoreUnavailable("connection refused".into())),
        }
    }

    async fn create_listing(&self, payload: Value) -> AppResult<()> {
        self.created.lock().unwrap().push(payload);
        Ok(())
    }
}

struct StubUsers {
    rows: Vec<User>,
    failure: Failure,
    pages: Arc<Mutex<Vec<PageParams>>>,
    created: Arc<Mutex<Vec<Value>>>,
}

#[async_trait]
impl UsersApi for StubUsers {
    async fn list_users(&self, page: PageParams) -> AppResult<Vec<User>> {
        self.pages.lock().unwrap().push(page);
        match self.failure {
            Failure::None => Ok(self.rows.clone()),
            Failure::Contract => Err(AppError::upstream("users key missing")),
            Failure::Transport => Err(AppError::StoreUnavailable("connection refused".into())),
        }
    }

    async fn create_user(&self, payload: Value) -> AppResult<()> {
        self.created.lock().unwrap().push(payload);
        Ok(())
    }
}

// =============================================================================
// Test helpers
// =============================================================================

struct TestGateway {
    router: axum::Router,
    listings_pages: Arc<Mutex<Vec<PageParams>>>,
    users_pages: Arc<Mutex<Vec<PageParams>>>,
    created_listings: Arc<Mutex<Vec<Value>>>,
    created_users: Arc<Mutex<Vec<Value>>>,
}

fn build_gateway(
    listings: Vec<Listing>,
    users: Vec<User>,
    listings_failure: Failure,
    users_failure: Failure,
    config: GatewayConfig,
) -> TestGateway {
    let listings_pages = Arc::new(Mutex::new(Vec::new()));
    let users_pages = Arc::new(Mutex::new(Vec::new()));
    let created_listings = Arc::new(Mutex::new(Vec::new()));
    let created_users = Arc::new(Mutex::new(Vec::new()));

    let state = AppState::new(
        Arc::new(StubListings {
            rows: listings,
            failure: listings_failure,
            pages: listings_pages.clone(),
            created: created_listings.clone(),
        }),
        Arc::new(StubUsers {
            rows: users,
            failure: users_failure,
            pages: users_pages.clone(),
            created: created_users.clone(),
        }),
        config,
    );

    TestGateway {
        router: create_router(state),
        listings_pages,
        users_pages,
        created_listings,
        created_users,
    }
}

fn gateway_with(listings: Vec<Listing>, users: Vec<User>) -> TestGateway {
    build_gateway(
        listings,
        users,
        Failure::None,
        Failure::None,
        GatewayConfig::default(),
    )
}

fn listing(id: i64, user_id: i64) -> Listing {
    Listing {
        id,
        user_id,
        listing_type: ListingType::Rent,
        price: 1000 * id,
        created_at: id,
        updated_at: id,
    }
}

fn user(id: i64, name: &str) -> User {
    User {
        id,
        name: name.to_string(),
        created_at: id,
        updated_at: id,
    }
}

/// A page of N listings whose user_ids reverse-index into a page of N users,
/// position for position.
fn aligned_page(n: i64) -> (Vec<Listing>, Vec<User>) {
    let listings = (1..=n).map(|i| listing(i, i)).collect();
    let users = (1..=n).map(|i| user(100 + i, "Some Owner")).collect();
    (listings, users)
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn post(uri: &str, payload: &Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(payload.to_string()))
        .unwrap()
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

/// Wait for a fire-and-forget forward to land, polling with a deadline.
async fn forwarded(log: &Arc<Mutex<Vec<Value>>>) -> Vec<Value> {
    let deadline = tokio::time::Instant::now() + Duration::from_secs(5);
    while tokio::time::Instant::now() < deadline {
        {
            let entries = log.lock().unwrap();
            if !entries.is_empty() {
                return entries.clone();
            }
        }
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
    log.lock().unwrap().clone()
}

// =============================================================================
// Health check
// =============================================================================

#[tokio::test]
async fn ping_returns_plain_pong() {
    let gw = gateway_with(Vec::new(), Vec::new());
    let response = gw.router.oneshot(get("/public-api/ping")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let content_type = response
        .headers()
        .get(header::CONTENT_TYPE)
        .unwrap()
        .to_str()
        .unwrap()
        .to_string();
    assert!(!content_type.contains("json"));
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    assert_eq!(&bytes[..], b"pong!");
}

// =============================================================================
// Fan-out and pagination mirroring
// =============================================================================

#[tokio::test]
async fn pagination_is_mirrored_to_both_stores() {
    let (listings, users) = aligned_page(2);
    let gw = gateway_with(listings, users);

    let response = gw
        .router
        .oneshot(get("/public-api/listings?page_num=2&page_size=5"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let expected = PageParams {
        page_num: Some(2),
        page_size: Some(5),
    };
    assert_eq!(*gw.listings_pages.lock().unwrap(), vec![expected]);
    assert_eq!(*gw.users_pages.lock().unwrap(), vec![expected]);
}

#[tokio::test]
async fn partial_pagination_is_mirrored_verbatim() {
    let (listings, users) = aligned_page(1);
    let gw = gateway_with(listings, users);

    gw.router
        .oneshot(get("/public-api/listings?page_size=3"))
        .await
        .unwrap();

    let expected = PageParams {
        page_num: None,
        page_size: Some(3),
    };
    assert_eq!(*gw.listings_pages.lock().unwrap(), vec![expected]);
    assert_eq!(*gw.users_pages.lock().unwrap(), vec![expected]);
}

#[tokio::test]
async fn bare_request_sends_no_pagination_upstream() {
    let (listings, users) = aligned_page(1);
    let gw = gateway_with(listings, users);

    gw.router.oneshot(get("/public-api/listings")).await.unwrap();

    assert_eq!(*gw.listings_pages.lock().unwrap(), vec![PageParams::default()]);
    assert_eq!(*gw.users_pages.lock().unwrap(), vec![PageParams::default()]);
}

#[tokio::test]
async fn invalid_pagination_is_rejected_before_fanout() {
    let gw = gateway_with(Vec::new(), Vec::new());

    let response = gw
        .router
        .oneshot(get("/public-api/listings?page_num=first"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body, json!({"result": false, "errors": "invalid page_num"}));
    assert!(gw.listings_pages.lock().unwrap().is_empty());
    assert!(gw.users_pages.lock().unwrap().is_empty());
}

// =============================================================================
// Join semantics
// =============================================================================

#[tokio::test]
async fn joined_records_embed_the_owner_and_drop_user_id() {
    let (listings, users) = aligned_page(3);
    let gw = gateway_with(listings, users);

    let response = gw.router.oneshot(get("/public-api/listings")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["result"], true);
    let records = body["listings"].as_array().unwrap();
    assert_eq!(records.len(), 3);
    for record in records {
        assert!(record.get("user_id").is_none());
        for field in ["id", "name", "created_at", "updated_at"] {
            assert!(record["user"].get(field).is_some());
        }
    }
}

#[tokio::test]
async fn short_users_page_is_an_error_never_a_truncated_list() {
    let (listings, mut users) = aligned_page(3);
    users.pop();
    let gw = gateway_with(listings, users);

    let response = gw.router.oneshot(get("/public-api/listings")).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body, json!({"result": false, "errors": "invalid user_id"}));
}

// =============================================================================
// Post-join filter
// =============================================================================

#[tokio::test]
async fn filter_zero_yields_empty_regardless_of_contents() {
    let (listings, users) = aligned_page(3);
    let gw = gateway_with(listings, users);

    let response = gw
        .router
        .oneshot(get("/public-api/listings?user_id=0"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body, json!({"result": true, "listings": []}));
}

#[tokio::test]
async fn filter_selects_a_single_element_slice() {
    let (listings, users) = aligned_page(3);
    let gw = gateway_with(listings, users);

    let response = gw
        .router
        .oneshot(get("/public-api/listings?user_id=1"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    let records = body["listings"].as_array().unwrap();
    assert_eq!(records.len(), 1);
    // user_id 1 addresses the last element of the joined page.
    assert_eq!(records[0]["id"], 3);
}

#[tokio::test]
async fn filter_out_of_bounds_defaults_to_empty_list() {
    let (listings, users) = aligned_page(3);
    let gw = gateway_with(listings, users);

    let response = gw
        .router
        .oneshot(get("/public-api/listings?user_id=7"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body, json!({"result": true, "listings": []}));
}

#[tokio::test]
async fn filter_out_of_bounds_errors_under_the_strict_policy() {
    let (listings, users) = aligned_page(3);
    let config = GatewayConfig {
        filter_miss: FilterMissPolicy::Error,
        ..GatewayConfig::default()
    };
    let gw = build_gateway(listings, users, Failure::None, Failure::None, config);

    let response = gw
        .router
        .oneshot(get("/public-api/listings?user_id=7"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["errors"], "invalid user_id");
}

#[tokio::test]
async fn non_numeric_filter_is_rejected() {
    let gw = gateway_with(Vec::new(), Vec::new());

    let response = gw
        .router
        .oneshot(get("/public-api/listings?user_id=me"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["errors"], "invalid user_id");
}

// =============================================================================
// Upstream failures
// =============================================================================

#[tokio::test]
async fn upstream_contract_violation_is_a_service_error() {
    let gw = build_gateway(
        Vec::new(),
        vec![user(1, "Someone")],
        Failure::Contract,
        Failure::None,
        GatewayConfig::default(),
    );

    let response = gw.router.oneshot(get("/public-api/listings")).await.unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = body_json(response).await;
    assert_eq!(body, json!({"result": false, "errors": "service error"}));
}

#[tokio::test]
async fn upstream_transport_failure_is_a_bad_gateway() {
    let gw = build_gateway(
        vec![listing(1, 1)],
        Vec::new(),
        Failure::None,
        Failure::Transport,
        GatewayConfig::default(),
    );

    let response = gw.router.oneshot(get("/public-api/listings")).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    let body = body_json(response).await;
    assert_eq!(body["result"], false);
}

// =============================================================================
// Create listing
// =============================================================================

#[tokio::test]
async fn create_listing_echoes_the_raw_payload_and_forwards_it() {
    let gw = gateway_with(Vec::new(), Vec::new());
    let payload = json!({"user_id": "7", "listing_type": "sale", "price": "120000"});

    let response = gw
        .router
        .clone()
        .oneshot(post("/public-api/listings", &payload))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    // The raw payload comes back untouched, numeric strings included.
    assert_eq!(body_json(response).await, payload);

    assert_eq!(forwarded(&gw.created_listings).await, vec![payload]);
}

#[tokio::test]
async fn create_listing_collects_every_validation_failure() {
    let gw = gateway_with(Vec::new(), Vec::new());
    let payload = json!({"user_id": 1, "listing_type": "lease", "price": "free"});

    let response = gw
        .router
        .clone()
        .oneshot(post("/public-api/listings", &payload))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(
        body["errors"],
        json!([
            "invalid listing_type. Supported values: 'rent', 'sale'",
            "invalid price. Must be an integer",
        ])
    );

    // Validation fails before anything is spawned, so no forward exists.
    assert!(gw.created_listings.lock().unwrap().is_empty());
}

#[tokio::test]
async fn create_listing_rejects_zero_price() {
    let gw = gateway_with(Vec::new(), Vec::new());
    let payload = json!({"user_id": 1, "listing_type": "rent", "price": 0});

    let response = gw
        .router
        .oneshot(post("/public-api/listings", &payload))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["errors"], json!(["price must be greater than 0"]));
}

// =============================================================================
// Create user
// =============================================================================

#[tokio::test]
async fn create_user_accepts_alphabetic_names_with_spaces() {
    let gw = gateway_with(Vec::new(), Vec::new());
    let payload = json!({"name": "Daniel Radcliffe"});

    let response = gw
        .router
        .clone()
        .oneshot(post("/public-api/users", &payload))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, payload);

    assert_eq!(forwarded(&gw.created_users).await, vec![payload]);
}

#[tokio::test]
async fn create_user_rejects_non_alphabetic_names() {
    let gw = gateway_with(Vec::new(), Vec::new());

    for name in ["O'Brien", "Dan99"] {
        let response = gw
            .router
            .clone()
            .oneshot(post("/public-api/users", &json!({"name": name})))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body, json!({"result": false, "errors": ["invalid name"]}));
    }
}
