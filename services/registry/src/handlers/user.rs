use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use campus_auth_types::identity::Identity;
use campus_domain::pagination::PageRequest;
use campus_domain::user::{ThemePreference, UserRole};

use crate::error::RegistryError;
use crate::state::AppState;
use crate::usecase::user::{
    CreateUserInput, CreateUserUseCase, DeleteUserUseCase, GetUserUseCase, ListUsersUseCase,
    UpdateUserInput, UpdateUserUseCase,
};

// ── Response types ───────────────────────────────────────────────────────────

/// Public user shape — the password hash never leaves the service.
#[derive(Serialize)]
pub struct UserResponse {
    pub id: Uuid,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub role: UserRole,
    pub theme_preference: ThemePreference,
    pub profile_image: Option<String>,
    #[serde(serialize_with = "campus_core::serde::to_rfc3339_ms")]
    pub created_at: chrono::DateTime<chrono::Utc>,
    #[serde(serialize_with = "campus_core::serde::to_rfc3339_ms")]
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl From<crate::domain::types::User> for UserResponse {
    fn from(user: crate::domain::types::User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            first_name: user.first_name,
            last_name: user.last_name,
            role: user.role,
            theme_preference: user.theme_preference,
            profile_image: user.profile_image,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

// ── GET /users ───────────────────────────────────────────────────────────────

pub async fn list_users(
    identity: Identity,
    State(state): State<AppState>,
    Query(page): Query<PageRequest>,
) -> Result<Json<Vec<UserResponse>>, RegistryError> {
    let usecase = ListUsersUseCase {
        users: state.user_repo(),
    };
    let users = usecase.execute(identity.user_id, page).await?;
    Ok(Json(users.into_iter().map(UserResponse::from).collect()))
}

// ── POST /users ──────────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct CreateUserRequest {
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    pub role: Option<UserRole>,
    pub theme_preference: Option<ThemePreference>,
    pub profile_image: Option<String>,
}

pub async fn create_user(
    identity: Identity,
    State(state): State<AppState>,
    Json(body): Json<CreateUserRequest>,
) -> Result<(StatusCode, Json<UserResponse>), RegistryError> {
    let usecase = CreateUserUseCase {
        users: state.user_repo(),
    };
    let user = usecase
        .execute(
            identity.user_id,
            CreateUserInput {
                email: body.email,
                password: body.password,
                first_name: body.first_name,
                last_name: body.last_name,
                role: body.role,
                theme_preference: body.theme_preference,
                profile_image: body.profile_image,
            },
        )
        .await?;
    Ok((StatusCode::CREATED, Json(UserResponse::from(user))))
}

// ── GET /users/me (also GET /auth/me) ────────────────────────────────────────

pub async fn get_me(
    identity: Identity,
    State(state): State<AppState>,
) -> Result<Json<UserResponse>, RegistryError> {
    let usecase = GetUserUseCase {
        users: state.user_repo(),
    };
    let user = usecase.execute(identity.user_id, identity.user_id).await?;
    Ok(Json(UserResponse::from(user)))
}

// ── PATCH /users/me ──────────────────────────────────────────────────────────

/// Self-service profile update. Role is deliberately absent — only the
/// admin route may change it.
#[derive(Deserialize)]
pub struct UpdateMeRequest {
    pub email: Option<String>,
    pub password: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub theme_preference: Option<ThemePreference>,
    pub profile_image: Option<String>,
}

pub async fn update_me(
    identity: Identity,
    State(state): State<AppState>,
    Json(body): Json<UpdateMeRequest>,
) -> Result<Json<UserResponse>, RegistryError> {
    let usecase = UpdateUserUseCase {
        users: state.user_repo(),
    };
    let user = usecase
        .execute(
            identity.user_id,
            identity.user_id,
            UpdateUserInput {
                email: body.email,
                password: body.password,
                first_name: body.first_name,
                last_name: body.last_name,
                role: None,
                theme_preference: body.theme_preference,
                profile_image: body.profile_image,
            },
        )
        .await?;
    Ok(Json(UserResponse::from(user)))
}

// ── GET /users/{user_id} ─────────────────────────────────────────────────────

pub async fn get_user(
    identity: Identity,
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> Result<Json<UserResponse>, RegistryError> {
    let usecase = GetUserUseCase {
        users: state.user_repo(),
    };
    let user = usecase.execute(identity.user_id, user_id).await?;
    Ok(Json(UserResponse::from(user)))
}

// ── PATCH /users/{user_id} ───────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct UpdateUserRequest {
    pub email: Option<String>,
    pub password: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub role: Option<UserRole>,
    pub theme_preference: Option<ThemePreference>,
    pub profile_image: Option<String>,
}

pub async fn update_user(
    identity: Identity,
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
    Json(body): Json<UpdateUserRequest>,
) -> Result<Json<UserResponse>, RegistryError> {
    let usecase = UpdateUserUseCase {
        users: state.user_repo(),
    };
    let user = usecase
        .execute(
            identity.user_id,
            user_id,
            UpdateUserInput {
                email: body.email,
                password: body.password,
                first_name: body.first_name,
                last_name: body.last_name,
                role: body.role,
                theme_preference: body.theme_preference,
                profile_image: body.profile_image,
            },
        )
        .await?;
    Ok(Json(UserResponse::from(user)))
}

// ── DELETE /users/{user_id} ──────────────────────────────────────────────────

pub async fn delete_user(
    identity: Identity,
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> Result<StatusCode, RegistryError> {
    let usecase = DeleteUserUseCase {
        users: state.user_repo(),
    };
    usecase.execute(identity.user_id, user_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
