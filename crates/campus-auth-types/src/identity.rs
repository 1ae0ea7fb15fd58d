//! Bearer-token identity extractor.

use axum::extract::{FromRef, FromRequestParts};
use http::StatusCode;
use http::request::Parts;
use uuid::Uuid;

use campus_domain::user::UserRole;

use crate::token::validate_access_token;

/// Signing secret handed to the extractor through axum state.
///
/// The service's `AppState` implements `FromRef<AppState> for JwtSecret`
/// so protected handlers can take `Identity` as an argument.
#[derive(Clone)]
pub struct JwtSecret(pub String);

/// Caller identity taken from the `Authorization: Bearer` header.
///
/// Returns 401 if the header is absent, not a bearer token, or the token
/// fails validation. The role carried here is the claim at issuance
/// time; authorization decisions re-load the actor from the store.
#[derive(Debug, Clone)]
pub struct Identity {
    pub user_id: Uuid,
    pub role: UserRole,
}

fn bearer_value(parts: &Parts) -> Option<String> {
    parts
        .headers
        .get(http::header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|s| s.strip_prefix("Bearer "))
        .map(|s| s.trim().to_owned())
}

impl<S> FromRequestParts<S> for Identity
where
    S: Send + Sync,
    JwtSecret: FromRef<S>,
{
    type Rejection = StatusCode;

    // axum-core 0.5 defines this as `fn -> impl Future + Send` (not `async fn`).
    // In Rust 1.82+ precise capturing, `async fn` captures lifetimes differently,
    // causing E0195. Fix: extract values synchronously, return a 'static async move block.
    fn from_request_parts(
        parts: &mut Parts,
        state: &S,
    ) -> impl std::future::Future<Output = Result<Self, Self::Rejection>> + Send {
        let secret = JwtSecret::from_ref(state);
        let token = bearer_value(parts);

        async move {
            let token = token.ok_or(StatusCode::UNAUTHORIZED)?;
            let info = validate_access_token(&token, &secret.0)
                .map_err(|_| StatusCode::UNAUTHORIZED)?;
            Ok(Self {
                user_id: info.user_id,
                role: info.role,
            })
        }
    }
}
