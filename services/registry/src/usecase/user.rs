use anyhow::Context as _;
use chrono::Utc;
use uuid::Uuid;

use campus_domain::pagination::PageRequest;
use campus_domain::user::{ThemePreference, UserRole};

use crate::domain::policy::{Action, Decision, decide};
use crate::domain::repository::UserRepository;
use crate::domain::types::{User, UserChanges, validate_email};
use crate::error::RegistryError;

/// Minimum accepted password length.
const MIN_PASSWORD_LEN: usize = 6;

// ── CreateUser ───────────────────────────────────────────────────────────────

pub struct CreateUserInput {
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    pub role: Option<UserRole>,
    pub theme_preference: Option<ThemePreference>,
    pub profile_image: Option<String>,
}

pub struct CreateUserUseCase<U: UserRepository> {
    pub users: U,
}

impl<U: UserRepository> CreateUserUseCase<U> {
    pub async fn execute(
        &self,
        actor_id: Uuid,
        input: CreateUserInput,
    ) -> Result<User, RegistryError> {
        let actor = self
            .users
            .find_by_id(actor_id)
            .await?
            .ok_or(RegistryError::Unauthorized)?;
        if decide(&actor, &Action::CreateUser) == Decision::Deny {
            return Err(RegistryError::Forbidden);
        }

        let email = input.email.trim().to_ascii_lowercase();
        if !validate_email(&email) {
            return Err(RegistryError::InvalidEmail);
        }
        if input.password.len() < MIN_PASSWORD_LEN {
            return Err(RegistryError::PasswordTooShort);
        }

        let password_hash =
            bcrypt::hash(&input.password, bcrypt::DEFAULT_COST).context("hash password")?;

        let now = Utc::now();
        let user = User {
            id: Uuid::now_v7(),
            email,
            password_hash,
            first_name: input.first_name,
            last_name: input.last_name,
            role: input.role.unwrap_or(UserRole::Student),
            theme_preference: input.theme_preference.unwrap_or_default(),
            profile_image: input.profile_image,
            created_at: now,
            updated_at: now,
        };
        // Duplicate email surfaces from the store's unique constraint.
        self.users.create(&user).await?;
        Ok(user)
    }
}

// ── GetUser ──────────────────────────────────────────────────────────────────

pub struct GetUserUseCase<U: UserRepository> {
    pub users: U,
}

impl<U: UserRepository> GetUserUseCase<U> {
    pub async fn execute(&self, actor_id: Uuid, target_id: Uuid) -> Result<User, RegistryError> {
        let actor = self
            .users
            .find_by_id(actor_id)
            .await?
            .ok_or(RegistryError::Unauthorized)?;
        if decide(&actor, &Action::ViewUser { user_id: target_id }) == Decision::Deny {
            return Err(RegistryError::Forbidden);
        }
        if actor.id == target_id {
            return Ok(actor);
        }
        self.users
            .find_by_id(target_id)
            .await?
            .ok_or(RegistryError::UserNotFound)
    }
}

// ── UpdateUser ───────────────────────────────────────────────────────────────

#[derive(Default)]
pub struct UpdateUserInput {
    pub email: Option<String>,
    pub password: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub role: Option<UserRole>,
    pub theme_preference: Option<ThemePreference>,
    pub profile_image: Option<String>,
}

pub struct UpdateUserUseCase<U: UserRepository> {
    pub users: U,
}

impl<U: UserRepository> UpdateUserUseCase<U> {
    pub async fn execute(
        &self,
        actor_id: Uuid,
        target_id: Uuid,
        input: UpdateUserInput,
    ) -> Result<User, RegistryError> {
        let actor = self
            .users
            .find_by_id(actor_id)
            .await?
            .ok_or(RegistryError::Unauthorized)?;
        if decide(&actor, &Action::UpdateUser { user_id: target_id }) == Decision::Deny {
            return Err(RegistryError::Forbidden);
        }
        // Role assignment is an admin-only field on top of the self-update
        // allow-list.
        if input.role.is_some() && actor.role != UserRole::Admin {
            return Err(RegistryError::Forbidden);
        }

        let email = match input.email {
            Some(raw) => {
                let email = raw.trim().to_ascii_lowercase();
                if !validate_email(&email) {
                    return Err(RegistryError::InvalidEmail);
                }
                Some(email)
            }
            None => None,
        };

        let password_hash = match input.password {
            Some(password) => {
                if password.len() < MIN_PASSWORD_LEN {
                    return Err(RegistryError::PasswordTooShort);
                }
                Some(bcrypt::hash(&password, bcrypt::DEFAULT_COST).context("hash password")?)
            }
            None => None,
        };

        let changes = UserChanges {
            email,
            password_hash,
            first_name: input.first_name,
            last_name: input.last_name,
            role: input.role,
            theme_preference: input.theme_preference,
            profile_image: input.profile_image,
        };
        if changes.is_empty() {
            return Err(RegistryError::MissingData);
        }

        self.users.update(target_id, &changes).await
    }
}

// ── DeleteUser ───────────────────────────────────────────────────────────────

pub struct DeleteUserUseCase<U: UserRepository> {
    pub users: U,
}

impl<U: UserRepository> DeleteUserUseCase<U> {
    pub async fn execute(&self, actor_id: Uuid, target_id: Uuid) -> Result<(), RegistryError> {
        let actor = self
            .users
            .find_by_id(actor_id)
            .await?
            .ok_or(RegistryError::Unauthorized)?;
        if decide(&actor, &Action::DeleteUser { user_id: target_id }) == Decision::Deny {
            return Err(RegistryError::Forbidden);
        }

        // Classes taught or enrollments held surface as UserInUse from the
        // store's FK constraints.
        let deleted = self.users.delete(target_id).await?;
        if !deleted {
            return Err(RegistryError::UserNotFound);
        }
        Ok(())
    }
}

// ── ListUsers ────────────────────────────────────────────────────────────────

pub struct ListUsersUseCase<U: UserRepository> {
    pub users: U,
}

impl<U: UserRepository> ListUsersUseCase<U> {
    pub async fn execute(
        &self,
        actor_id: Uuid,
        page: PageRequest,
    ) -> Result<Vec<User>, RegistryError> {
        let actor = self
            .users
            .find_by_id(actor_id)
            .await?
            .ok_or(RegistryError::Unauthorized)?;
        if decide(&actor, &Action::ListUsers) == Decision::Deny {
            return Err(RegistryError::Forbidden);
        }
        self.users.list(page).await
    }
}
