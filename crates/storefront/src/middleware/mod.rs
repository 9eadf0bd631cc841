//! HTTP middleware stack for storefront.
//!
//! # Middleware Order (outermost first)
//!
//! 1. Sentry layers (hub per request, HTTP transaction)
//! 2. `TraceLayer` (request span)
//! 3. Request ID (recorded on the span, echoed in the response)
//! 4. Security headers
//! 5. Session layer (tower-sessions with an in-memory store)
//!
//! The wishlist is not a layer: handlers read it with the
//! [`VisitorWishlist`] extractor and answer with [`wishlist_cookie`].

pub mod request_id;
pub mod security_headers;
pub mod session;
pub mod wishlist;

pub use request_id::request_id_middleware;
pub use security_headers::security_headers_middleware;
pub use session::create_session_layer;
pub use wishlist::{VisitorWishlist, wishlist_cookie};
