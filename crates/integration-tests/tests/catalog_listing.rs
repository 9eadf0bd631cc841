//! Listing, filtering and JSON API tests.

#![allow(clippy::unwrap_used, clippy::indexing_slicing)]

use reqwest::StatusCode;
use serde_json::Value;
use stride_integration_tests::TestContext;

async fn api_ids(ctx: &TestContext, query: &str) -> Vec<i64> {
    let body: Value = ctx
        .client
        .get(ctx.url(&format!("/api/products{query}")))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    body.as_array()
        .unwrap()
        .iter()
        .map(|p| p["id"].as_i64().unwrap())
        .collect()
}

#[tokio::test]
async fn test_health() {
    let ctx = TestContext::start().await;
    let resp = ctx.client.get(ctx.url("/health")).send().await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    assert!(resp.headers().contains_key("x-request-id"));
    assert_eq!(resp.text().await.unwrap(), "ok");
}

#[tokio::test]
async fn test_unfiltered_listing_keeps_catalog_order() {
    let ctx = TestContext::start().await;
    assert_eq!(api_ids(&ctx, "").await, vec![1, 2, 3, 4, 5, 6]);
}

#[tokio::test]
async fn test_filters_compose() {
    let ctx = TestContext::start().await;
    assert_eq!(
        api_ids(&ctx, "?maxPrice=150&brand=nike&gender=MALE&sortBy=PriceLowToHigh").await,
        vec![1, 3]
    );
}

#[tokio::test]
async fn test_price_sorts_are_stable() {
    let ctx = TestContext::start().await;
    assert_eq!(
        api_ids(&ctx, "?sortBy=PriceLowToHigh").await,
        vec![4, 1, 6, 5, 3, 2]
    );
    assert_eq!(
        api_ids(&ctx, "?sortBy=PriceHighToLow").await,
        vec![2, 3, 5, 1, 6, 4]
    );
    assert_eq!(api_ids(&ctx, "?sortBy=Popular").await, vec![1, 2, 3, 4, 5, 6]);
}

#[tokio::test]
async fn test_invalid_max_price_is_ignored() {
    let ctx = TestContext::start().await;
    assert_eq!(api_ids(&ctx, "?maxPrice=").await.len(), 6);
    assert_eq!(api_ids(&ctx, "?maxPrice=lots").await.len(), 6);

    let resp = ctx
        .client
        .get(ctx.url("/products?maxPrice=lots"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_brands() {
    let ctx = TestContext::start().await;
    let brands: Vec<String> = ctx
        .client
        .get(ctx.url("/api/brands"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(brands, vec!["Adidas", "Asics", "Nike"]);
}

#[tokio::test]
async fn test_listing_page_renders_filters() {
    let ctx = TestContext::start().await;
    let resp = ctx
        .client
        .get(ctx.url("/products?brand=Asics"))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(resp.headers()["cache-control"], "no-store, max-age=0");

    let html = resp.text().await.unwrap();
    assert!(html.contains("Court Ace"));
    assert!(html.contains("Kayano"));
    assert!(!html.contains("Pegasus"));
    assert!(html.contains(r#"<option value="Asics" selected>"#));
    assert!(html.contains("£80.00"));
}

#[tokio::test]
async fn test_api_detail() {
    let ctx = TestContext::start().await;
    let body: Value = ctx
        .client
        .get(ctx.url("/api/products/1"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(body["name"], "Pegasus");
    assert_eq!(body["averageRating"], 4.5);
    assert_eq!(body["reviewCount"], 2);

    let related: Vec<i64> = body["related"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["id"].as_i64().unwrap())
        .collect();
    assert_eq!(related, vec![2, 3, 6]);
}

#[tokio::test]
async fn test_unknown_product_is_not_found() {
    let ctx = TestContext::start().await;

    for path in ["/products/99", "/products/shoe", "/api/products/99"] {
        let resp = ctx.client.get(ctx.url(path)).send().await.unwrap();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND, "{path}");
    }
}

#[tokio::test]
async fn test_empty_catalog_file_serves_empty_shop() {
    let ctx = TestContext::with_catalog(&[]).await;

    assert!(api_ids(&ctx, "").await.is_empty());
    let resp = ctx.client.get(ctx.url("/")).send().await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_static_assets_served() {
    let ctx = TestContext::start().await;
    let resp = ctx
        .client
        .get(ctx.url("/static/css/main.css"))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    assert!(!resp.headers().contains_key("cache-control"));
}
