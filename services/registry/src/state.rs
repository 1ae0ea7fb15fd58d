use axum::extract::FromRef;
use sea_orm::DatabaseConnection;

use campus_auth_types::identity::JwtSecret;

use crate::infra::db::{
    DbClassEnrollmentRepository, DbClassRepository, DbCourseEnrollmentRepository,
    DbCourseRepository, DbUserRepository,
};

/// Shared application state passed to every handler via axum `State`.
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub jwt_secret: String,
}

impl AppState {
    pub fn user_repo(&self) -> DbUserRepository {
        DbUserRepository {
            db: self.db.clone(),
        }
    }

    pub fn course_repo(&self) -> DbCourseRepository {
        DbCourseRepository {
            db: self.db.clone(),
        }
    }

    pub fn class_repo(&self) -> DbClassRepository {
        DbClassRepository {
            db: self.db.clone(),
        }
    }

    pub fn course_enrollment_repo(&self) -> DbCourseEnrollmentRepository {
        DbCourseEnrollmentRepository {
            db: self.db.clone(),
        }
    }

    pub fn class_enrollment_repo(&self) -> DbClassEnrollmentRepository {
        DbClassEnrollmentRepository {
            db: self.db.clone(),
        }
    }
}

impl FromRef<AppState> for JwtSecret {
    fn from_ref(state: &AppState) -> JwtSecret {
        JwtSecret(state.jwt_secret.clone())
    }
}
