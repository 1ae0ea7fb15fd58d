use chrono::Utc;
use uuid::Uuid;

use campus_domain::pagination::PageRequest;
use campus_domain::user::UserRole;

use crate::domain::policy::{Action, Decision, catalog_scope, decide};
use crate::domain::repository::{CourseRepository, UserRepository};
use crate::domain::types::{Course, CourseChanges};
use crate::error::RegistryError;

// ── CreateCourse ─────────────────────────────────────────────────────────────

pub struct CreateCourseInput {
    pub course_code: String,
    pub title: String,
    pub description: Option<String>,
    pub teacher_id: Option<Uuid>,
}

pub struct CreateCourseUseCase<U, C>
where
    U: UserRepository,
    C: CourseRepository,
{
    pub users: U,
    pub courses: C,
}

impl<U, C> CreateCourseUseCase<U, C>
where
    U: UserRepository,
    C: CourseRepository,
{
    pub async fn execute(
        &self,
        actor_id: Uuid,
        input: CreateCourseInput,
    ) -> Result<Course, RegistryError> {
        let actor = self
            .users
            .find_by_id(actor_id)
            .await?
            .ok_or(RegistryError::Unauthorized)?;
        if decide(&actor, &Action::CreateCourse) == Decision::Deny {
            return Err(RegistryError::Forbidden);
        }

        // The assigned teacher must exist and actually be a teacher.
        if let Some(teacher_id) = input.teacher_id {
            let teacher = self
                .users
                .find_by_id(teacher_id)
                .await?
                .ok_or(RegistryError::UserNotFound)?;
            if teacher.role != UserRole::Teacher {
                return Err(RegistryError::NotATeacher);
            }
        }

        let now = Utc::now();
        let course = Course {
            id: Uuid::now_v7(),
            course_code: input.course_code,
            title: input.title,
            description: input.description.unwrap_or_default(),
            teacher_id: input.teacher_id,
            is_active: true,
            created_at: now,
            updated_at: now,
        };
        // A colliding course_code surfaces from the store's unique
        // constraint as CourseCodeTaken.
        self.courses.create(&course).await?;
        Ok(course)
    }
}

// ── GetCourse ────────────────────────────────────────────────────────────────

pub struct GetCourseUseCase<U, C>
where
    U: UserRepository,
    C: CourseRepository,
{
    pub users: U,
    pub courses: C,
}

impl<U, C> GetCourseUseCase<U, C>
where
    U: UserRepository,
    C: CourseRepository,
{
    pub async fn execute(&self, actor_id: Uuid, course_id: Uuid) -> Result<Course, RegistryError> {
        // Any authenticated user may view course details.
        self.users
            .find_by_id(actor_id)
            .await?
            .ok_or(RegistryError::Unauthorized)?;
        self.courses
            .find_by_id(course_id)
            .await?
            .ok_or(RegistryError::CourseNotFound)
    }
}

// ── ListCourses ──────────────────────────────────────────────────────────────

pub struct ListCoursesUseCase<U, C>
where
    U: UserRepository,
    C: CourseRepository,
{
    pub users: U,
    pub courses: C,
}

impl<U, C> ListCoursesUseCase<U, C>
where
    U: UserRepository,
    C: CourseRepository,
{
    pub async fn execute(
        &self,
        actor_id: Uuid,
        page: PageRequest,
    ) -> Result<Vec<Course>, RegistryError> {
        let actor = self
            .users
            .find_by_id(actor_id)
            .await?
            .ok_or(RegistryError::Unauthorized)?;
        // Scoping narrows the result set instead of denying the request.
        let scope = catalog_scope(&actor);
        self.courses.list(scope, page).await
    }
}

// ── UpdateCourse ─────────────────────────────────────────────────────────────

pub struct UpdateCourseUseCase<U, C>
where
    U: UserRepository,
    C: CourseRepository,
{
    pub users: U,
    pub courses: C,
}

impl<U, C> UpdateCourseUseCase<U, C>
where
    U: UserRepository,
    C: CourseRepository,
{
    pub async fn execute(
        &self,
        actor_id: Uuid,
        course_id: Uuid,
        changes: CourseChanges,
    ) -> Result<Course, RegistryError> {
        let actor = self
            .users
            .find_by_id(actor_id)
            .await?
            .ok_or(RegistryError::Unauthorized)?;
        let course = self
            .courses
            .find_by_id(course_id)
            .await?
            .ok_or(RegistryError::CourseNotFound)?;
        if decide(&actor, &Action::UpdateCourse { course: &course }) == Decision::Deny {
            return Err(RegistryError::Forbidden);
        }
        // course_code is outside the teacher allow-list; only admins may
        // re-key a course.
        if changes.course_code.is_some() && actor.role != UserRole::Admin {
            return Err(RegistryError::Forbidden);
        }
        if changes.is_empty() {
            return Err(RegistryError::MissingData);
        }

        self.courses.update(course_id, &changes).await
    }
}

// ── DeleteCourse ─────────────────────────────────────────────────────────────

pub struct DeleteCourseUseCase<U, C>
where
    U: UserRepository,
    C: CourseRepository,
{
    pub users: U,
    pub courses: C,
}

impl<U, C> DeleteCourseUseCase<U, C>
where
    U: UserRepository,
    C: CourseRepository,
{
    pub async fn execute(&self, actor_id: Uuid, course_id: Uuid) -> Result<(), RegistryError> {
        let actor = self
            .users
            .find_by_id(actor_id)
            .await?
            .ok_or(RegistryError::Unauthorized)?;
        let course = self
            .courses
            .find_by_id(course_id)
            .await?
            .ok_or(RegistryError::CourseNotFound)?;
        if decide(&actor, &Action::DeleteCourse { course: &course }) == Decision::Deny {
            return Err(RegistryError::Forbidden);
        }

        // Existing sections or enrollments surface as CourseInUse from the
        // store's Restrict FKs — deletion rejects, it never cascades.
        let deleted = self.courses.delete(course_id).await?;
        if !deleted {
            return Err(RegistryError::CourseNotFound);
        }
        Ok(())
    }
}
