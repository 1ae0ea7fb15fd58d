use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

/// Registry service error variants.
///
/// Store-level constraint violations are translated into the `*Taken`,
/// `AlreadyEnrolled` and `*InUse` conflict variants at the repository
/// boundary — they never surface as `Internal`.
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    #[error("user not found")]
    UserNotFound,
    #[error("course not found")]
    CourseNotFound,
    #[error("class not found")]
    ClassNotFound,
    #[error("enrollment not found")]
    EnrollmentNotFound,
    #[error("email already in use")]
    EmailTaken,
    #[error("course code already exists")]
    CourseCodeTaken,
    #[error("class section already exists")]
    SectionTaken,
    #[error("already enrolled")]
    AlreadyEnrolled,
    #[error("user has dependent records")]
    UserInUse,
    #[error("course has dependent records")]
    CourseInUse,
    #[error("class has dependent records")]
    ClassInUse,
    #[error("assigned user is not a teacher")]
    NotATeacher,
    #[error("invalid email address")]
    InvalidEmail,
    #[error("password too short")]
    PasswordTooShort,
    #[error("missing data")]
    MissingData,
    #[error("invalid email or password")]
    InvalidCredentials,
    #[error("invalid refresh token")]
    InvalidRefreshToken,
    #[error("unauthorized")]
    Unauthorized,
    #[error("forbidden")]
    Forbidden,
    #[error("internal error")]
    Internal(#[from] anyhow::Error),
}

impl RegistryError {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::UserNotFound => "USER_NOT_FOUND",
            Self::CourseNotFound => "COURSE_NOT_FOUND",
            Self::ClassNotFound => "CLASS_NOT_FOUND",
            Self::EnrollmentNotFound => "ENROLLMENT_NOT_FOUND",
            Self::EmailTaken => "EMAIL_TAKEN",
            Self::CourseCodeTaken => "COURSE_CODE_TAKEN",
            Self::SectionTaken => "SECTION_TAKEN",
            Self::AlreadyEnrolled => "ALREADY_ENROLLED",
            Self::UserInUse => "USER_IN_USE",
            Self::CourseInUse => "COURSE_IN_USE",
            Self::ClassInUse => "CLASS_IN_USE",
            Self::NotATeacher => "NOT_A_TEACHER",
            Self::InvalidEmail => "INVALID_EMAIL",
            Self::PasswordTooShort => "PASSWORD_TOO_SHORT",
            Self::MissingData => "MISSING_DATA",
            Self::InvalidCredentials => "INVALID_CREDENTIALS",
            Self::InvalidRefreshToken => "INVALID_REFRESH_TOKEN",
            Self::Unauthorized => "UNAUTHORIZED",
            Self::Forbidden => "FORBIDDEN",
            Self::Internal(_) => "INTERNAL",
        }
    }
}

impl IntoResponse for RegistryError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::UserNotFound
            | Self::CourseNotFound
            | Self::ClassNotFound
            | Self::EnrollmentNotFound => StatusCode::NOT_FOUND,
            Self::EmailTaken
            | Self::CourseCodeTaken
            | Self::SectionTaken
            | Self::AlreadyEnrolled
            | Self::UserInUse
            | Self::CourseInUse
            | Self::ClassInUse => StatusCode::CONFLICT,
            Self::NotATeacher | Self::InvalidEmail | Self::PasswordTooShort => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            Self::MissingData => StatusCode::BAD_REQUEST,
            Self::InvalidCredentials | Self::InvalidRefreshToken | Self::Unauthorized => {
                StatusCode::UNAUTHORIZED
            }
            Self::Forbidden => StatusCode::FORBIDDEN,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        // Log 500s only — tower-http TraceLayer already records method/uri/status for all
        // requests. 4xx are expected client errors; logging them here would be noise.
        // Internal errors need the anyhow chain logged so the root cause is traceable.
        if let Self::Internal(ref e) = self {
            tracing::error!(error = %e, kind = "INTERNAL", "internal error");
        }
        let body = serde_json::json!({
            "kind": self.kind(),
            "message": self.to_string(),
        });
        (status, axum::Json(body)).into_response()
    }
}
