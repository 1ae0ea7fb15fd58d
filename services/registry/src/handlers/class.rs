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

use crate::domain::types::ClassChanges;
use crate::error::RegistryError;
use crate::state::AppState;
use crate::usecase::class::{
    CreateClassInput, CreateClassUseCase, DeleteClassUseCase, GetClassUseCase, ListClassesUseCase,
    UpdateClassUseCase,
};
use crate::usecase::enrollment::{EnrollInClassUseCase, UnenrollFromClassUseCase};

// ── Response types ───────────────────────────────────────────────────────────

#[derive(Serialize)]
pub struct ClassResponse {
    pub id: Uuid,
    pub course_id: Uuid,
    pub teacher_id: Uuid,
    pub section_number: String,
    pub semester: String,
    pub year: i32,
    #[serde(serialize_with = "campus_core::serde::to_rfc3339_ms")]
    pub created_at: chrono::DateTime<chrono::Utc>,
    #[serde(serialize_with = "campus_core::serde::to_rfc3339_ms")]
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl From<crate::domain::types::Class> for ClassResponse {
    fn from(class: crate::domain::types::Class) -> Self {
        Self {
            id: class.id,
            course_id: class.course_id,
            teacher_id: class.teacher_id,
            section_number: class.section_number,
            semester: class.semester,
            year: class.year,
            created_at: class.created_at,
            updated_at: class.updated_at,
        }
    }
}

#[derive(Serialize)]
pub struct ClassEnrollmentResponse {
    pub id: Uuid,
    pub student_id: Uuid,
    pub class_id: Uuid,
    pub status: EnrollmentStatus,
    #[serde(serialize_with = "campus_core::serde::to_rfc3339_ms")]
    pub enrollment_date: chrono::DateTime<chrono::Utc>,
}

impl From<crate::domain::types::ClassEnrollment> for ClassEnrollmentResponse {
    fn from(enrollment: crate::domain::types::ClassEnrollment) -> Self {
        Self {
            id: enrollment.id,
            student_id: enrollment.student_id,
            class_id: enrollment.class_id,
            status: enrollment.status,
            enrollment_date: enrollment.enrollment_date,
        }
    }
}

// ── GET /classes ─────────────────────────────────────────────────────────────

pub async fn list_classes(
    identity: Identity,
    State(state): State<AppState>,
    Query(page): Query<PageRequest>,
) -> Result<Json<Vec<ClassResponse>>, RegistryError> {
    let usecase = ListClassesUseCase {
        users: state.user_repo(),
        classes: state.class_repo(),
    };
    let classes = usecase.execute(identity.user_id, page).await?;
    Ok(Json(classes.into_iter().map(ClassResponse::from).collect()))
}

// ── POST /classes ────────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct CreateClassRequest {
    pub course_id: Uuid,
    pub teacher_id: Uuid,
    pub section_number: String,
    pub semester: String,
    pub year: i32,
}

pub async fn create_class(
    identity: Identity,
    State(state): State<AppState>,
    Json(body): Json<CreateClassRequest>,
) -> Result<(StatusCode, Json<ClassResponse>), RegistryError> {
    let usecase = CreateClassUseCase {
        users: state.user_repo(),
        courses: state.course_repo(),
        classes: state.class_repo(),
    };
    let class = usecase
        .execute(
            identity.user_id,
            CreateClassInput {
                course_id: body.course_id,
                teacher_id: body.teacher_id,
                section_number: body.section_number,
                semester: body.semester,
                year: body.year,
            },
        )
        .await?;
    Ok((StatusCode::CREATED, Json(ClassResponse::from(class))))
}

// ── GET /classes/{class_id} ──────────────────────────────────────────────────

pub async fn get_class(
    identity: Identity,
    State(state): State<AppState>,
    Path(class_id): Path<Uuid>,
) -> Result<Json<ClassResponse>, RegistryError> {
    let usecase = GetClassUseCase {
        users: state.user_repo(),
        classes: state.class_repo(),
    };
    let class = usecase.execute(identity.user_id, class_id).await?;
    Ok(Json(ClassResponse::from(class)))
}

// ── PATCH /classes/{class_id} ────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct UpdateClassRequest {
    pub teacher_id: Option<Uuid>,
    pub section_number: Option<String>,
    pub semester: Option<String>,
    pub year: Option<i32>,
}

pub async fn update_class(
    identity: Identity,
    State(state): State<AppState>,
    Path(class_id): Path<Uuid>,
    Json(body): Json<UpdateClassRequest>,
) -> Result<Json<ClassResponse>, RegistryError> {
    let usecase = UpdateClassUseCase {
        users: state.user_repo(),
        classes: state.class_repo(),
    };
    let class = usecase
        .execute(
            identity.user_id,
            class_id,
            ClassChanges {
                teacher_id: body.teacher_id,
                section_number: body.section_number,
                semester: body.semester,
                year: body.year,
            },
        )
        .await?;
    Ok(Json(ClassResponse::from(class)))
}

// ── DELETE /classes/{class_id} ───────────────────────────────────────────────

pub async fn delete_class(
    identity: Identity,
    State(state): State<AppState>,
    Path(class_id): Path<Uuid>,
) -> Result<StatusCode, RegistryError> {
    let usecase = DeleteClassUseCase {
        users: state.user_repo(),
        classes: state.class_repo(),
    };
    usecase.execute(identity.user_id, class_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ── POST /classes/{class_id}/enroll ──────────────────────────────────────────

pub async fn enroll_class(
    identity: Identity,
    State(state): State<AppState>,
    Path(class_id): Path<Uuid>,
) -> Result<(StatusCode, Json<ClassEnrollmentResponse>), RegistryError> {
    let usecase = EnrollInClassUseCase {
        users: state.user_repo(),
        classes: state.class_repo(),
        enrollments: state.class_enrollment_repo(),
    };
    let enrollment = usecase.execute(identity.user_id, class_id).await?;
    Ok((
        StatusCode::CREATED,
        Json(ClassEnrollmentResponse::from(enrollment)),
    ))
}

// ── DELETE /classes/{class_id}/enroll ────────────────────────────────────────

pub async fn unenroll_class(
    identity: Identity,
    State(state): State<AppState>,
    Path(class_id): Path<Uuid>,
) -> Result<StatusCode, RegistryError> {
    let usecase = UnenrollFromClassUseCase {
        users: state.user_repo(),
        enrollments: state.class_enrollment_repo(),
    };
    usecase.execute(identity.user_id, class_id).await?;
    Ok(StatusCode::OK)
}
