//! Authentication extractors.
//!
//! - [`auth::AuthUser`] -- Requires a valid JWT Bearer token.
//! - [`auth::MaybeAuth`] -- Accepts anonymous requests, still rejects bad tokens.

pub mod auth;
