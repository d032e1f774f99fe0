//! Session bootstrap: seed the configured token and warn when it is stale.

use chrono::{DateTime, Utc};

use crate::claims::{TokenClaims, TokenValidationError, check_expiry};
use crate::store::TokenStore;

/// What [`init_session`] learned about the seeded token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionStatus {
    /// Token decoded and not yet expired.
    Valid { expires_at: Option<DateTime<Utc>> },
    /// Token decoded but its `exp` is in the past (or missing).
    Expired,
    /// Token could not be decoded as a JWT; it is still sent as-is.
    Unreadable,
    /// No token configured; requests go out unauthenticated.
    Anonymous,
}

/// True when there is no usable, unexpired token in `store`.
///
/// Missing, undecodable, and `exp`-less tokens all count as expired.
pub fn is_token_expired(store: &dyn TokenStore, now: DateTime<Utc>) -> bool {
    let Some(token) = store.token().filter(|t| !t.is_empty()) else {
        return true;
    };
    match TokenClaims::decode_unverified(&token) {
        Ok(claims) => check_expiry(&claims, now).is_err(),
        Err(_) => true,
    }
}

/// Seed `store` with `token` (if any) and report its state.
pub fn init_session(
    store: &dyn TokenStore,
    token: Option<&str>,
    now: DateTime<Utc>,
) -> SessionStatus {
    let Some(token) = token.map(str::trim).filter(|t| !t.is_empty()) else {
        store.remove_token();
        tracing::warn!("no bearer token configured; API requests will be anonymous");
        return SessionStatus::Anonymous;
    };

    store.set_token(token);

    let claims = match TokenClaims::decode_unverified(token) {
        Ok(claims) => claims,
        Err(e) => {
            tracing::warn!(error = %e, "bearer token is not a readable JWT");
            return SessionStatus::Unreadable;
        }
    };

    match check_expiry(&claims, now) {
        Ok(()) => {
            tracing::info!(
                user = claims.user_id.as_deref().unwrap_or("-"),
                expires_at = ?claims.expires_at(),
                "bearer token is valid"
            );
            SessionStatus::Valid { expires_at: claims.expires_at() }
        }
        Err(TokenValidationError::Expired) | Err(TokenValidationError::MissingExpiry) => {
            tracing::warn!(expires_at = ?claims.expires_at(), "bearer token is expired");
            SessionStatus::Expired
        }
    }
}
