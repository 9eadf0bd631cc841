//! Session models for storefront.
//!
//! Catalog types live in `stride_core`; this module only names what the
//! storefront keeps in the visitor session.

pub mod session;

pub use session::keys as session_keys;
