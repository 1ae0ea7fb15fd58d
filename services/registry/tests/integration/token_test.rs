//! Login and refresh flows against the in-memory store.

use campus_domain::user::UserRole;

use campus_auth_types::token::validate_access_token;
use campus_registry::error::RegistryError;
use campus_registry::usecase::token::{
    LoginInput, LoginUseCase, RefreshTokenUseCase, validate_token,
};
use campus_registry::usecase::user::{GetUserUseCase, UpdateUserInput, UpdateUserUseCase};

use crate::helpers::{TEST_JWT_SECRET, TEST_PASSWORD, TestStore, user_fixture};

#[tokio::test]
async fn should_login_refresh_and_load_profile() {
    let store = TestStore::new();
    let student = store.seed_user(user_fixture(UserRole::Student, "student@example.com"));

    let login = LoginUseCase {
        users: store.user_repo(),
        jwt_secret: TEST_JWT_SECRET.to_owned(),
    };
    let out = login
        .execute(LoginInput {
            email: "student@example.com".into(),
            password: TEST_PASSWORD.into(),
        })
        .await
        .unwrap();

    // The access token validates through the extractor-facing API too.
    let info = validate_access_token(&out.access_token, TEST_JWT_SECRET).unwrap();
    assert_eq!(info.user_id, student.id);
    assert_eq!(info.role, UserRole::Student);

    // The refresh token yields a fresh access token for the same subject.
    let refresh = RefreshTokenUseCase {
        users: store.user_repo(),
        jwt_secret: TEST_JWT_SECRET.to_owned(),
    };
    let refreshed = refresh.execute(&out.refresh_token).await.unwrap();
    let claims = validate_token(&refreshed.access_token, TEST_JWT_SECRET).unwrap();
    assert_eq!(claims.sub, student.id.to_string());

    // The identity from the token loads the profile.
    let get = GetUserUseCase {
        users: store.user_repo(),
    };
    let profile = get.execute(info.user_id, info.user_id).await.unwrap();
    assert_eq!(profile.email, "student@example.com");
}

#[tokio::test]
async fn should_reject_login_after_password_change_with_old_password() {
    let store = TestStore::new();
    let student = store.seed_user(user_fixture(UserRole::Student, "student@example.com"));

    let update = UpdateUserUseCase {
        users: store.user_repo(),
    };
    update
        .execute(
            student.id,
            student.id,
            UpdateUserInput {
                password: Some("new-password".into()),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    let login = LoginUseCase {
        users: store.user_repo(),
        jwt_secret: TEST_JWT_SECRET.to_owned(),
    };
    let stale = login
        .execute(LoginInput {
            email: "student@example.com".into(),
            password: TEST_PASSWORD.into(),
        })
        .await;
    assert!(matches!(stale, Err(RegistryError::InvalidCredentials)));

    let fresh = login
        .execute(LoginInput {
            email: "student@example.com".into(),
            password: "new-password".into(),
        })
        .await;
    assert!(fresh.is_ok());
}

#[tokio::test]
async fn should_stop_refreshing_after_account_deletion() {
    let store = TestStore::new();
    let student = store.seed_user(user_fixture(UserRole::Student, "student@example.com"));

    let login = LoginUseCase {
        users: store.user_repo(),
        jwt_secret: TEST_JWT_SECRET.to_owned(),
    };
    let out = login
        .execute(LoginInput {
            email: "student@example.com".into(),
            password: TEST_PASSWORD.into(),
        })
        .await
        .unwrap();

    store.users.lock().unwrap().retain(|u| u.id != student.id);

    let refresh = RefreshTokenUseCase {
        users: store.user_repo(),
        jwt_secret: TEST_JWT_SECRET.to_owned(),
    };
    let result = refresh.execute(&out.refresh_token).await;
    assert!(matches!(result, Err(RegistryError::InvalidRefreshToken)));
}
