use anyhow::Context as _;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};
use uuid::Uuid;

use crate::domain::repository::UserRepository;
use crate::domain::types::User;
use crate::error::RegistryError;

/// Access-token lifetime in seconds (1 hour).
pub const ACCESS_TOKEN_EXP: u64 = 3600;

/// Refresh-token lifetime in seconds (30 days).
pub const REFRESH_TOKEN_EXP: u64 = 2_592_000;

/// JWT claims for both access and refresh tokens.
#[derive(Debug, Serialize, Deserialize)]
pub struct TokenClaims {
    pub sub: String,
    pub role: String,
    pub exp: u64,
}

fn now_secs() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("system clock before UNIX epoch")
        .as_secs()
}

pub fn issue_access_token(user: &User, secret: &str) -> Result<(String, u64), RegistryError> {
    let exp = now_secs() + ACCESS_TOKEN_EXP;
    let claims = TokenClaims {
        sub: user.id.to_string(),
        role: user.role.as_str().to_owned(),
        exp,
    };
    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| RegistryError::Internal(e.into()))?;
    Ok((token, exp))
}

pub fn issue_refresh_token(user: &User, secret: &str) -> Result<String, RegistryError> {
    let exp = now_secs() + REFRESH_TOKEN_EXP;
    let claims = TokenClaims {
        sub: user.id.to_string(),
        role: user.role.as_str().to_owned(),
        exp,
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| RegistryError::Internal(e.into()))
}

/// Validate a token and return its claims. Used for the refresh flow.
pub fn validate_token(token: &str, secret: &str) -> Result<TokenClaims, RegistryError> {
    let mut validation = Validation::new(jsonwebtoken::Algorithm::HS256);
    validation.validate_exp = true;
    validation.required_spec_claims.clear();
    validation.set_required_spec_claims(&["exp", "sub"]);

    let data = decode::<TokenClaims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation,
    )
    .map_err(|_| RegistryError::InvalidRefreshToken)?;

    Ok(data.claims)
}

// ── Login ────────────────────────────────────────────────────────────────────

pub struct LoginInput {
    pub email: String,
    pub password: String,
}

#[derive(Debug)]
pub struct LoginOutput {
    pub user: User,
    pub access_token: String,
    pub access_token_exp: u64,
    pub refresh_token: String,
}

pub struct LoginUseCase<U: UserRepository> {
    pub users: U,
    pub jwt_secret: String,
}

impl<U: UserRepository> LoginUseCase<U> {
    pub async fn execute(&self, input: LoginInput) -> Result<LoginOutput, RegistryError> {
        let email = input.email.trim().to_ascii_lowercase();

        // Unknown email and wrong password are indistinguishable to the
        // caller — both yield InvalidCredentials.
        let user = self
            .users
            .find_by_email(&email)
            .await?
            .ok_or(RegistryError::InvalidCredentials)?;

        let password_matches = bcrypt::verify(&input.password, &user.password_hash)
            .context("verify password hash")?;
        if !password_matches {
            return Err(RegistryError::InvalidCredentials);
        }

        let (access_token, access_token_exp) = issue_access_token(&user, &self.jwt_secret)?;
        let refresh_token = issue_refresh_token(&user, &self.jwt_secret)?;

        Ok(LoginOutput {
            user,
            access_token,
            access_token_exp,
            refresh_token,
        })
    }
}

// ── RefreshToken ─────────────────────────────────────────────────────────────

#[derive(Debug)]
pub struct RefreshTokenOutput {
    pub access_token: String,
    pub access_token_exp: u64,
}

pub struct RefreshTokenUseCase<U: UserRepository> {
    pub users: U,
    pub jwt_secret: String,
}

impl<U: UserRepository> RefreshTokenUseCase<U> {
    pub async fn execute(
        &self,
        refresh_token_value: &str,
    ) -> Result<RefreshTokenOutput, RegistryError> {
        // Validate refresh token (sig + exp); an expired access token is
        // irrelevant here.
        let claims = validate_token(refresh_token_value, &self.jwt_secret)?;

        let user_id = claims
            .sub
            .parse::<Uuid>()
            .map_err(|_| RegistryError::InvalidRefreshToken)?;

        // Reload the user so a revoked account stops refreshing and the new
        // token carries the current role.
        let user = self
            .users
            .find_by_id(user_id)
            .await?
            .ok_or(RegistryError::InvalidRefreshToken)?;

        let (access_token, access_token_exp) = issue_access_token(&user, &self.jwt_secret)?;

        Ok(RefreshTokenOutput {
            access_token,
            access_token_exp,
        })
    }
}
