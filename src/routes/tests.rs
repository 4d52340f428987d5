//! Router tests driven through `oneshot`

use std::sync::Arc;

use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, StatusCode},
};
use serde_json::Value;
use tower::ServiceExt;

use super::router;
use crate::{
    Ctx,
    catalog::{
        CatalogConfig, CatalogService,
        tests::fakes::{FakeFallback, FakeReleases, kodik_hit, releases},
    },
};

fn app(service: CatalogService) -> Router {
    router(Ctx::new(Arc::new(service)), &["*".to_string()])
}

fn primary_only() -> Router {
    app(CatalogService::new(
        Arc::new(FakeReleases::new(releases(60))),
        CatalogConfig::default(),
    ))
}

async fn get_json(app: Router, uri: &str) -> (StatusCode, Value) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn test_health() {
    let (status, body) = get_json(primary_only(), "/api").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_latest_releases_are_decorated() {
    let (status, body) = get_json(primary_only(), "/api/anilibria/releases/latest?limit=2").await;

    assert_eq!(status, StatusCode::OK);
    let items = body.as_array().unwrap();
    assert_eq!(items.len(), 2);
    assert_eq!(items[0]["poster_url"], "https://anilibria.top/storage/0.jpg");
    assert_eq!(items[0]["source"], "anilibria");
}

#[tokio::test]
async fn test_limit_out_of_range_is_rejected() {
    for uri in [
        "/api/anilibria/releases/latest?limit=0",
        "/api/anilibria/releases/latest?limit=501",
        "/api/anilibria/releases/1/similar?limit=25",
        "/api/anilibria/search?query=x&limit=51",
        "/api/anilibria/torrents?limit=51",
        "/api/kodik/list?page=0",
    ] {
        let (status, body) = get_json(primary_only(), uri).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
        assert_eq!(body["code"], 400, "{uri}");
        assert!(body["data"].is_null(), "{uri}");
    }
}

#[tokio::test]
async fn test_missing_release_is_not_found() {
    let (status, body) = get_json(primary_only(), "/api/anilibria/releases/999").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], 404);
}

#[tokio::test]
async fn test_bad_genre_list_is_rejected() {
    let (status, body) = get_json(primary_only(), "/api/anilibria/search?genres=1,x").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["message"].as_str().unwrap().contains("x"));
}

#[tokio::test]
async fn test_search_falls_back_to_kodik() {
    let service = CatalogService::new(
        Arc::new(FakeReleases::new(releases(60))),
        CatalogConfig::default(),
    )
    .with_fallback(Arc::new(FakeFallback::new(vec![kodik_hit(
        Some("52991"),
        Some("Frieren"),
    )])));

    let (status, body) = get_json(app(service), "/api/anilibria/search?query=zzz-nonexistent").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body[0]["id"], 52991);
    assert_eq!(body[0]["source"], "kodik");
    assert_eq!(body[0]["type"], "Kodik");
    assert_eq!(body[0]["name"]["main"], "Frieren");
}

#[tokio::test]
async fn test_kodik_routes_without_fallback() {
    let (status, body) = get_json(primary_only(), "/api/kodik/anime/52991").await;

    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["code"], 503);
}

#[tokio::test]
async fn test_unknown_franchise_has_no_releases() {
    let (status, body) = get_json(primary_only(), "/api/anilibria/franchises/nope/releases").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, Value::Array(Vec::new()));
}

#[tokio::test]
async fn test_cors_allows_any_origin() {
    let response = primary_only()
        .oneshot(
            Request::builder()
                .uri("/api")
                .header("origin", "https://example.com")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(
        response.headers().get("access-control-allow-origin").unwrap(),
        "*"
    );
}

#[tokio::test]
async fn test_media_listings_use_defaults() {
    for uri in ["/api/anilibria/torrents", "/api/anilibria/videos?offset=5"] {
        let (status, body) = get_json(primary_only(), uri).await;
        assert_eq!(status, StatusCode::OK, "{uri}");
        assert!(body.is_array(), "{uri}");
    }
}

#[tokio::test]
async fn test_huge_offset_returns_empty_page() {
    let max = usize::MAX;
    for uri in [
        format!("/api/anilibria/search?genres=1&offset={max}"),
        format!("/api/anilibria/search?query=x&offset={max}"),
        format!("/api/anilibria/releases/latest?limit=500&offset={}", max - 10),
        format!("/api/anilibria/franchises?limit=500&offset={max}"),
    ] {
        let (status, body) = get_json(primary_only(), &uri).await;
        assert_eq!(status, StatusCode::OK, "{uri}");
        assert_eq!(body, Value::Array(Vec::new()), "{uri}");
    }
}

#[tokio::test]
async fn test_malformed_query_uses_error_envelope() {
    for uri in [
        "/api/anilibria/releases/latest?offset=-1",
        "/api/anilibria/search?year=soon",
        "/api/anilibria/videos?limit=many",
        "/api/kodik/list?page=first",
    ] {
        let (status, body) = get_json(primary_only(), uri).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
        assert_eq!(body["code"], 400, "{uri}");
        assert!(body["message"].is_string(), "{uri}");
        assert!(body["data"].is_null(), "{uri}");
    }
}
