//! Listing handlers.

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{Path, Query, State},
    response::Json,
    routing::get,
    Router,
};
use serde::Deserialize;
use serde_json::{json, Value};

use common::{AppError, AppResult, PageParams};
use domain::validation::validate_listing;

use crate::repository::ListingRepository;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub repo: Arc<dyn ListingRepository>,
}

/// Raw pagination query values; parsing is done by hand so failures carry
/// the canonical error messages.
#[derive(Debug, Deserialize)]
pub struct ListQuery {
    page_num: Option<String>,
    page_size: Option<String>,
}

/// Create listing routes.
pub fn listing_routes() -> Router<AppState> {
    Router::new()
        .route("/listings", get(list_listings).post(create_listing))
        .route("/listings/ping", get(ping))
        .route("/listings/:id", get(get_listing))
}

async fn ping() -> &'static str {
    "pong!"
}

async fn list_listings(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<Value>> {
    let page = PageParams::parse(query.page_num.as_deref(), query.page_size.as_deref())?;
    let listings = state.repo.list(page).await?;
    Ok(Json(json!({"result": true, "listings": listings})))
}

async fn get_listing(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Value>> {
    let listing = state.repo.find_by_id(id).await?.ok_or(AppError::NotFound)?;
    Ok(Json(json!({"result": true, "listing": listing})))
}

async fn create_listing(State(state): State<AppState>, body: Bytes) -> AppResult<Json<Value>> {
    let payload: Value =
        serde_json::from_slice(&body).map_err(|_| AppError::bad_request("invalid json body"))?;
    let new = validate_listing(&payload)?;
    let listing = state.repo.create(new).await?;
    Ok(Json(json!({"result": true, "listing": listing})))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use domain::{Listing, ListingType};
    use mockall::predicate::eq;
    use tower::ServiceExt;

    use crate::repository::MockListingRepository;

    fn sample_listing(id: i64) -> Listing {
        Listing {
            id,
            user_id: 1,
            listing_type: ListingType::Rent,
            price: 4500,
            created_at: 1_700_000_000_000_000,
            updated_at: 1_700_000_000_000_000,
        }
    }

    fn router(repo: MockListingRepository) -> Router {
        listing_routes().with_state(AppState {
            repo: Arc::new(repo),
        })
    }

    async fn body_json(response: axum::response::Response) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn list_uses_parsed_pagination() {
        let mut repo = MockListingRepository::new();
        repo.expect_list()
            .with(eq(PageParams {
                page_num: Some(2),
                page_size: Some(5),
            }))
            .returning(|_| Ok(vec![sample_listing(1)]));

        let response = router(repo)
            .oneshot(
                Request::builder()
                    .uri("/listings?page_num=2&page_size=5")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["result"], true);
        assert_eq!(body["listings"][0]["listing_type"], "rent");
    }

    #[tokio::test]
    async fn list_rejects_bad_page_num() {
        let response = router(MockListingRepository::new())
            .oneshot(
                Request::builder()
                    .uri("/listings?page_num=abc")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["result"], false);
        assert_eq!(body["errors"], "invalid page_num");
    }

    #[tokio::test]
    async fn create_validates_before_touching_the_store() {
        // No expectations set: a store call would panic the mock.
        let response = router(MockListingRepository::new())
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/listings")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(
                        r#"{"user_id": "x", "listing_type": "lease", "price": 0}"#,
                    ))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["errors"].as_array().unwrap().len(), 3);
    }

    #[tokio::test]
    async fn create_returns_stored_row() {
        let mut repo = MockListingRepository::new();
        repo.expect_create()
            .returning(|new| {
                Ok(Listing {
                    id: 42,
                    user_id: new.user_id,
                    listing_type: new.listing_type,
                    price: new.price,
                    created_at: 1,
                    updated_at: 1,
                })
            });

        let response = router(repo)
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/listings")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(
                        r#"{"user_id": 7, "listing_type": "sale", "price": "120000"}"#,
                    ))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["listing"]["id"], 42);
        assert_eq!(body["listing"]["user_id"], 7);
        assert_eq!(body["listing"]["price"], 120000);
    }

    #[tokio::test]
    async fn read_by_id_miss_is_not_found() {
        let mut repo = MockListingRepository::new();
        repo.expect_find_by_id()
            .with(eq(99))
            .returning(|_| Ok(None));

        let response = router(repo)
            .oneshot(
                Request::builder()
                    .uri("/listings/99")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let body = body_json(response).await;
        assert_eq!(body["errors"], "id does not exist");
    }

    #[tokio::test]
    async fn ping_is_plain_text() {
        let response = router(MockListingRepository::new())
            .oneshot(
                Request::builder()
                    .uri("/listings/ping")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

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
}
