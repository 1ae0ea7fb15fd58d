use axum::{Json, extract::State, http::HeaderMap, http::StatusCode};
use serde::{Deserialize, Serialize};

use campus_auth_types::identity::Identity;

use crate::error::RegistryError;
use crate::handlers::user::UserResponse;
use crate::state::AppState;
use crate::usecase::token::{LoginInput, LoginUseCase, RefreshTokenUseCase};

fn bearer_token(headers: &HeaderMap) -> Option<String> {
    headers
        .get(axum::http::header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|s| s.strip_prefix("Bearer "))
        .map(|s| s.trim().to_owned())
}

// ── POST /auth/login ─────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Serialize)]
pub struct LoginResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub user: UserResponse,
}

pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, RegistryError> {
    let usecase = LoginUseCase {
        users: state.user_repo(),
        jwt_secret: state.jwt_secret.clone(),
    };
    let out = usecase
        .execute(LoginInput {
            email: body.email,
            password: body.password,
        })
        .await?;
    Ok(Json(LoginResponse {
        access_token: out.access_token,
        refresh_token: out.refresh_token,
        user: UserResponse::from(out.user),
    }))
}

// ── POST /auth/refresh ───────────────────────────────────────────────────────

#[derive(Serialize)]
pub struct RefreshResponse {
    pub access_token: String,
}

/// The refresh token travels as the bearer credential of this request;
/// the access-token extractor is deliberately not used here.
pub async fn refresh(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<RefreshResponse>, RegistryError> {
    let refresh_token = bearer_token(&headers).ok_or(RegistryError::InvalidRefreshToken)?;

    let usecase = RefreshTokenUseCase {
        users: state.user_repo(),
        jwt_secret: state.jwt_secret.clone(),
    };
    let out = usecase.execute(&refresh_token).await?;
    Ok(Json(RefreshResponse {
        access_token: out.access_token,
    }))
}

// ── POST /auth/logout ────────────────────────────────────────────────────────

// TODO: server-side revocation needs a token denylist; until then logout
// is a client-side discard of both tokens.
pub async fn logout(_identity: Identity) -> StatusCode {
    StatusCode::NO_CONTENT
}
