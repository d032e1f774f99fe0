//! `content-admin-auth` — bearer-token storage and claim inspection.
//!
//! The admin panel never logs in: a static token is seeded from configuration
//! and attached to every request. This crate keeps that token, renders the
//! `Authorization` header value, and peeks at the JWT payload to warn about
//! expiry. Signatures are never verified here; the API does that.

pub mod claims;
pub mod roles;
pub mod session;
pub mod store;

pub use claims::{TokenClaims, TokenError, TokenValidationError, check_expiry};
pub use roles::Role;
pub use session::{SessionStatus, init_session, is_token_expired};
pub use store::{MemoryTokenStore, TOKEN_STORAGE_KEY, TokenStore};
