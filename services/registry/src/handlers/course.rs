use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use campus_auth_types::identity::Identity;
use campus_domain::enrollment::EnrollmentStatus;
use campus_domain::pagination::PageRequest;

use crate::domain::types::CourseChanges;
use crate::error::RegistryError;
use crate::state::AppState;
use crate::usecase::course::{
    CreateCourseInput, CreateCourseUseCase, DeleteCourseUseCase, GetCourseUseCase,
    ListCoursesUseCase, UpdateCourseUseCase,
};
use crate::usecase::enrollment::{EnrollInCourseUseCase, UnenrollFromCourseUseCase};

// ── Response types ───────────────────────────────────────────────────────────

#[derive(Serialize)]
pub struct CourseResponse {
    pub id: Uuid,
    pub course_code: String,
    pub title: String,
    pub description: String,
    pub teacher_id: Option<Uuid>,
    pub is_active: bool,
    #[serde(serialize_with = "campus_core::serde::to_rfc3339_ms")]
    pub created_at: chrono::DateTime<chrono::Utc>,
    #[serde(serialize_with = "campus_core::serde::to_rfc3339_ms")]
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl From<crate::domain::types::Course> for CourseResponse {
    fn from(course: crate::domain::types::Course) -> Self {
        Self {
            id: course.id,
            course_code: course.course_code,
            title: course.title,
            description: course.description,
            teacher_id: course.teacher_id,
            is_active: course.is_active,
            created_at: course.created_at,
            updated_at: course.updated_at,
        }
    }
}

#[derive(Serialize)]
pub struct CourseEnrollmentResponse {
    pub id: Uuid,
    pub student_id: Uuid,
    pub course_id: Uuid,
    pub status: EnrollmentStatus,
    #[serde(serialize_with = "campus_core::serde::to_rfc3339_ms")]
    pub enrollment_date: chrono::DateTime<chrono::Utc>,
}

impl From<crate::domain::types::CourseEnrollment> for CourseEnrollmentResponse {
    fn from(enrollment: crate::domain::types::CourseEnrollment) -> Self {
        Self {
            id: enrollment.id,
            student_id: enrollment.student_id,
            course_id: enrollment.course_id,
            status: enrollment.status,
            enrollment_date: enrollment.enrollment_date,
        }
    }
}

// ── GET /courses ─────────────────────────────────────────────────────────────

pub async fn list_courses(
    identity: Identity,
    State(state): State<AppState>,
    Query(page): Query<PageRequest>,
) -> Result<Json<Vec<CourseResponse>>, RegistryError> {
    let usecase = ListCoursesUseCase {
        users: state.user_repo(),
        courses: state.course_repo(),
    };
    let courses = usecase.execute(identity.user_id, page).await?;
    Ok(Json(courses.into_iter().map(CourseResponse::from).collect()))
}

// ── POST /courses ────────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct CreateCourseRequest {
    pub course_code: String,
    pub title: String,
    pub description: Option<String>,
    pub teacher_id: Option<Uuid>,
}

pub async fn create_course(
    identity: Identity,
    State(state): State<AppState>,
    Json(body): Json<CreateCourseRequest>,
) -> Result<(StatusCode, Json<CourseResponse>), RegistryError> {
    let usecase = CreateCourseUseCase {
        users: state.user_repo(),
        courses: state.course_repo(),
    };
    let course = usecase
        .execute(
            identity.user_id,
            CreateCourseInput {
                course_code: body.course_code,
                title: body.title,
                description: body.description,
                teacher_id: body.teacher_id,
            },
        )
        .await?;
    Ok((StatusCode::CREATED, Json(CourseResponse::from(course))))
}

// ── GET /courses/{course_id} ─────────────────────────────────────────────────

pub async fn get_course(
    identity: Identity,
    State(state): State<AppState>,
    Path(course_id): Path<Uuid>,
) -> Result<Json<CourseResponse>, RegistryError> {
    let usecase = GetCourseUseCase {
        users: state.user_repo(),
        courses: state.course_repo(),
    };
    let course = usecase.execute(identity.user_id, course_id).await?;
    Ok(Json(CourseResponse::from(course)))
}

// ── PATCH /courses/{course_id} ───────────────────────────────────────────────

#[derive(Deserialize)]
pub struct UpdateCourseRequest {
    pub course_code: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub is_active: Option<bool>,
}

pub async fn update_course(
    identity: Identity,
    State(state): State<AppState>,
    Path(course_id): Path<Uuid>,
    Json(body): Json<UpdateCourseRequest>,
) -> Result<Json<CourseResponse>, RegistryError> {
    let usecase = UpdateCourseUseCase {
        users: state.user_repo(),
        courses: state.course_repo(),
    };
    let course = usecase
        .execute(
            identity.user_id,
            course_id,
            CourseChanges {
                course_code: body.course_code,
                title: body.title,
                description: body.description,
                is_active: body.is_active,
            },
        )
        .await?;
    Ok(Json(CourseResponse::from(course)))
}

// ── DELETE /courses/{course_id} ──────────────────────────────────────────────

pub async fn delete_course(
    identity: Identity,
    State(state): State<AppState>,
    Path(course_id): Path<Uuid>,
) -> Result<StatusCode, RegistryError> {
    let usecase = DeleteCourseUseCase {
        users: state.user_repo(),
        courses: state.course_repo(),
    };
    usecase.execute(identity.user_id, course_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ── POST /courses/{course_id}/enroll ─────────────────────────────────────────

pub async fn enroll_course(
    identity: Identity,
    State(state): State<AppState>,
    Path(course_id): Path<Uuid>,
) -> Result<(StatusCode, Json<CourseEnrollmentResponse>), RegistryError> {
    let usecase = EnrollInCourseUseCase {
        users: state.user_repo(),
        courses: state.course_repo(),
        enrollments: state.course_enrollment_repo(),
    };
    let enrollment = usecase.execute(identity.user_id, course_id).await?;
    Ok((
        StatusCode::CREATED,
        Json(CourseEnrollmentResponse::from(enrollment)),
    ))
}

// ── DELETE /courses/{course_id}/enroll ───────────────────────────────────────

pub async fn unenroll_course(
    identity: Identity,
    State(state): State<AppState>,
    Path(course_id): Path<Uuid>,
) -> Result<StatusCode, RegistryError> {
    let usecase = UnenrollFromCourseUseCase {
        users: state.user_repo(),
        enrollments: state.course_enrollment_repo(),
    };
    usecase.execute(identity.user_id, course_id).await?;
    Ok(StatusCode::OK)
}
