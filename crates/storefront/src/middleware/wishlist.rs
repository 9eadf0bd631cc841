//! Wishlist cookie extractor and builder.
//!
//! The wishlist is a JSON array of product ids stored percent-encoded in the
//! `Wishlist` cookie. A missing or unreadable cookie is an empty wishlist.

use std::convert::Infallible;

use axum::{
    extract::FromRequestParts,
    http::{header::COOKIE, request::Parts},
};
use stride_core::catalog::Wishlist;
use stride_core::catalog::wishlist::{WISHLIST_COOKIE_NAME, WISHLIST_RETENTION_DAYS};
use tower_sessions::cookie::time::Duration;
use tower_sessions::cookie::{Cookie, SameSite};

/// The visitor's wishlist as read from the request cookies.
///
/// # Example
///
/// ```rust,ignore
/// async fn handler(VisitorWishlist(wishlist): VisitorWishlist) -> String {
///     format!("{} saved", wishlist.len())
/// }
/// ```
#[derive(Debug, Clone, Default)]
pub struct VisitorWishlist(pub Wishlist);

impl<S> FromRequestParts<S> for VisitorWishlist
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let wishlist = parts
            .headers
            .get_all(COOKIE)
            .iter()
            .filter_map(|value| value.to_str().ok())
            .find_map(wishlist_token)
            .map(|token| Wishlist::from_token(&token))
            .unwrap_or_default();

        Ok(Self(wishlist))
    }
}

/// Find the wishlist cookie in one `Cookie` header and decode its value.
fn wishlist_token(header: &str) -> Option<String> {
    Cookie::split_parse(header)
        .filter_map(Result::ok)
        .find(|cookie| cookie.name() == WISHLIST_COOKIE_NAME)
        .map(|cookie| {
            urlencoding::decode(cookie.value())
                .map_or_else(|_| cookie.value().to_string(), |v| v.into_owned())
        })
}

/// Build the `Set-Cookie` value persisting `wishlist` for 30 days.
///
/// # Errors
///
/// Returns an error if the wishlist cannot be serialized.
pub fn wishlist_cookie(
    wishlist: &Wishlist,
    secure: bool,
) -> Result<Cookie<'static>, serde_json::Error> {
    let token = wishlist.to_token()?;

    Ok(
        Cookie::build((WISHLIST_COOKIE_NAME, urlencoding::encode(&token).into_owned()))
            .path("/")
            .http_only(true)
            .secure(secure)
            .same_site(SameSite::Lax)
            .max_age(Duration::days(WISHLIST_RETENTION_DAYS))
            .build(),
    )
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use axum::http::Request;
    use stride_core::ProductId;

    use super::*;

    async fn extract(cookie: Option<&str>) -> Wishlist {
        let mut builder = Request::builder().uri("/wishlist");
        if let Some(cookie) = cookie {
            builder = builder.header(COOKIE, cookie);
        }
        let (mut parts, ()) = builder.body(()).unwrap().into_parts();

        VisitorWishlist::from_request_parts(&mut parts, &())
            .await
            .unwrap()
            .0
    }

    #[tokio::test]
    async fn test_missing_cookie_is_empty() {
        assert!(extract(None).await.is_empty());
        assert!(extract(Some("other=1")).await.is_empty());
    }

    #[tokio::test]
    async fn test_reads_encoded_and_plain_tokens() {
        let encoded = extract(Some("theme=dark; Wishlist=%5B3%2C1%5D")).await;
        assert_eq!(encoded.ids(), &[ProductId::new(3), ProductId::new(1)]);

        let plain = extract(Some("Wishlist=[2]")).await;
        assert_eq!(plain.ids(), &[ProductId::new(2)]);
    }

    #[tokio::test]
    async fn test_malformed_cookie_is_empty() {
        assert!(extract(Some("Wishlist=not-json")).await.is_empty());
    }

    #[tokio::test]
    async fn test_cookie_round_trip() {
        let mut wishlist = Wishlist::new();
        wishlist.add(ProductId::new(5));
        wishlist.add(ProductId::new(8));

        let cookie = wishlist_cookie(&wishlist, false).unwrap();
        let header = format!("{}={}", cookie.name(), cookie.value());

        assert_eq!(extract(Some(&header)).await, wishlist);
    }

    #[test]
    fn test_cookie_attributes() {
        let cookie = wishlist_cookie(&Wishlist::new(), true).unwrap();

        assert_eq!(cookie.name(), "Wishlist");
        assert_eq!(cookie.http_only(), Some(true));
        assert_eq!(cookie.secure(), Some(true));
        assert_eq!(cookie.same_site(), Some(SameSite::Lax));
        assert_eq!(cookie.path(), Some("/"));
        assert_eq!(cookie.max_age(), Some(Duration::days(30)));
    }
}
