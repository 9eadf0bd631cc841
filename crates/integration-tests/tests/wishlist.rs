//! Cookie-backed wishlist tests.

#![allow(clippy::unwrap_used, clippy::indexing_slicing)]

use reqwest::StatusCode;
use reqwest::header::{COOKIE, LOCATION, SET_COOKIE};
use stride_integration_tests::TestContext;

async fn wishlist_page(ctx: &TestContext) -> String {
    ctx.client
        .get(ctx.url("/wishlist"))
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap()
}

#[tokio::test]
async fn test_add_sets_cookie_and_redirects_to_listing() {
    let ctx = TestContext::start().await;
    let resp = ctx
        .client
        .post(ctx.url("/wishlist/add"))
        .form(&[("product_id", "3")])
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(resp.headers()[LOCATION], "/products");

    let cookie = resp.headers()[SET_COOKIE].to_str().unwrap().to_string();
    assert!(cookie.starts_with("Wishlist="));
    assert!(cookie.contains("HttpOnly"));
    assert!(cookie.contains("Max-Age=2592000"));

    assert!(wishlist_page(&ctx).await.contains("Air Walker"));
}

#[tokio::test]
async fn test_duplicate_add_does_not_reissue_cookie() {
    let ctx = TestContext::start().await;
    for _ in 0..2 {
        ctx.client
            .post(ctx.url("/wishlist/add"))
            .form(&[("product_id", "1")])
            .send()
            .await
            .unwrap();
    }

    let resp = ctx
        .client
        .post(ctx.url("/wishlist/add"))
        .form(&[("product_id", "1")])
        .send()
        .await
        .unwrap();
    assert!(!resp.headers().contains_key(SET_COOKIE));

    let html = wishlist_page(&ctx).await;
    assert_eq!(html.matches(r#"class="wishlist__item""#).count(), 1);
}

#[tokio::test]
async fn test_wishlist_lists_in_catalog_order() {
    let ctx = TestContext::start().await;
    for id in ["5", "2"] {
        ctx.client
            .post(ctx.url("/wishlist/add"))
            .form(&[("product_id", id)])
            .send()
            .await
            .unwrap();
    }

    let html = wishlist_page(&ctx).await;
    let ultraboost = html.find("Ultraboost").unwrap();
    let terrex = html.find("Terrex").unwrap();
    assert!(ultraboost < terrex);
}

#[tokio::test]
async fn test_remove_redirects_to_wishlist() {
    let ctx = TestContext::start().await;
    ctx.client
        .post(ctx.url("/wishlist/add"))
        .form(&[("product_id", "4")])
        .send()
        .await
        .unwrap();

    let resp = ctx
        .client
        .post(ctx.url("/wishlist/remove"))
        .form(&[("product_id", "4")])
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(resp.headers()[LOCATION], "/wishlist");
    assert!(resp.headers().contains_key(SET_COOKIE));
    assert!(wishlist_page(&ctx).await.contains("Nothing saved yet"));
}

#[tokio::test]
async fn test_remove_absent_id_leaves_cookie_alone() {
    let ctx = TestContext::start().await;
    let resp = ctx
        .client
        .post(ctx.url("/wishlist/remove"))
        .form(&[("product_id", "6")])
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert!(!resp.headers().contains_key(SET_COOKIE));
}

#[tokio::test]
async fn test_unknown_and_malformed_entries_are_tolerated() {
    let ctx = TestContext::start().await;
    let client = reqwest::Client::new();

    let html = client
        .get(ctx.url("/wishlist"))
        .header(COOKIE, "Wishlist=%5B2%2C404%5D")
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert!(html.contains("Ultraboost"));
    assert_eq!(html.matches(r#"class="wishlist__item""#).count(), 1);

    let resp = client
        .get(ctx.url("/wishlist"))
        .header(COOKIE, "Wishlist={broken")
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(resp.text().await.unwrap().contains("Nothing saved yet"));
}

#[tokio::test]
async fn test_detail_page_reflects_wishlist() {
    let ctx = TestContext::start().await;
    ctx.client
        .post(ctx.url("/wishlist/add"))
        .form(&[("product_id", "2")])
        .send()
        .await
        .unwrap();

    let html = ctx
        .client
        .get(ctx.url("/products/2"))
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert!(html.contains("Remove from wishlist"));
}
