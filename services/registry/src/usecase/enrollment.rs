use chrono::Utc;
use uuid::Uuid;

use campus_domain::enrollment::EnrollmentStatus;

use crate::domain::policy::{Action, Decision, decide};
use crate::domain::repository::{
    ClassEnrollmentRepository, ClassRepository, CourseEnrollmentRepository, CourseRepository,
    UserRepository,
};
use crate::domain::types::{ClassEnrollment, CourseEnrollment};
use crate::error::RegistryError;

// Exactly-once semantics per (student, target) pair live in the store's
// unique index: the repositories attempt the insert and translate the
// constraint violation into AlreadyEnrolled. The existence checks here
// only produce friendly 404s — they are never the uniqueness guard.

// ── EnrollInCourse ───────────────────────────────────────────────────────────

pub struct EnrollInCourseUseCase<U, C, E>
where
    U: UserRepository,
    C: CourseRepository,
    E: CourseEnrollmentRepository,
{
    pub users: U,
    pub courses: C,
    pub enrollments: E,
}

impl<U, C, E> EnrollInCourseUseCase<U, C, E>
where
    U: UserRepository,
    C: CourseRepository,
    E: CourseEnrollmentRepository,
{
    pub async fn execute(
        &self,
        actor_id: Uuid,
        course_id: Uuid,
    ) -> Result<CourseEnrollment, RegistryError> {
        let actor = self
            .users
            .find_by_id(actor_id)
            .await?
            .ok_or(RegistryError::Unauthorized)?;
        if decide(&actor, &Action::EnrollSelf) == Decision::Deny {
            return Err(RegistryError::Forbidden);
        }

        if self.courses.find_by_id(course_id).await?.is_none() {
            return Err(RegistryError::CourseNotFound);
        }

        let enrollment = CourseEnrollment {
            id: Uuid::now_v7(),
            student_id: actor.id,
            course_id,
            status: EnrollmentStatus::Active,
            enrollment_date: Utc::now(),
        };
        self.enrollments.create(&enrollment).await?;
        Ok(enrollment)
    }
}

// ── UnenrollFromCourse ───────────────────────────────────────────────────────

pub struct UnenrollFromCourseUseCase<U, E>
where
    U: UserRepository,
    E: CourseEnrollmentRepository,
{
    pub users: U,
    pub enrollments: E,
}

impl<U, E> UnenrollFromCourseUseCase<U, E>
where
    U: UserRepository,
    E: CourseEnrollmentRepository,
{
    pub async fn execute(&self, actor_id: Uuid, course_id: Uuid) -> Result<(), RegistryError> {
        let actor = self
            .users
            .find_by_id(actor_id)
            .await?
            .ok_or(RegistryError::Unauthorized)?;
        if decide(&actor, &Action::UnenrollSelf) == Decision::Deny {
            return Err(RegistryError::Forbidden);
        }

        // Hard delete. A second unenroll finds no row and reports
        // EnrollmentNotFound — the operation is not idempotent.
        let deleted = self.enrollments.delete(actor.id, course_id).await?;
        if !deleted {
            return Err(RegistryError::EnrollmentNotFound);
        }
        Ok(())
    }
}

// ── EnrollInClass ────────────────────────────────────────────────────────────

pub struct EnrollInClassUseCase<U, C, E>
where
    U: UserRepository,
    C: ClassRepository,
    E: ClassEnrollmentRepository,
{
    pub users: U,
    pub classes: C,
    pub enrollments: E,
}

impl<U, C, E> EnrollInClassUseCase<U, C, E>
where
    U: UserRepository,
    C: ClassRepository,
    E: ClassEnrollmentRepository,
{
    pub async fn execute(
        &self,
        actor_id: Uuid,
        class_id: Uuid,
    ) -> Result<ClassEnrollment, RegistryError> {
        let actor = self
            .users
            .find_by_id(actor_id)
            .await?
            .ok_or(RegistryError::Unauthorized)?;
        if decide(&actor, &Action::EnrollSelf) == Decision::Deny {
            return Err(RegistryError::Forbidden);
        }

        if self.classes.find_by_id(class_id).await?.is_none() {
            return Err(RegistryError::ClassNotFound);
        }

        let enrollment = ClassEnrollment {
            id: Uuid::now_v7(),
            student_id: actor.id,
            class_id,
            status: EnrollmentStatus::Active,
            enrollment_date: Utc::now(),
        };
        self.enrollments.create(&enrollment).await?;
        Ok(enrollment)
    }
}

// ── UnenrollFromClass ────────────────────────────────────────────────────────

pub struct UnenrollFromClassUseCase<U, E>
where
    U: UserRepository,
    E: ClassEnrollmentRepository,
{
    pub users: U,
    pub enrollments: E,
}

impl<U, E> UnenrollFromClassUseCase<U, E>
where
    U: UserRepository,
    E: ClassEnrollmentRepository,
{
    pub async fn execute(&self, actor_id: Uuid, class_id: Uuid) -> Result<(), RegistryError> {
        let actor = self
            .users
            .find_by_id(actor_id)
            .await?
            .ok_or(RegistryError::Unauthorized)?;
        if decide(&actor, &Action::UnenrollSelf) == Decision::Deny {
            return Err(RegistryError::Forbidden);
        }

        let deleted = self.enrollments.delete(actor.id, class_id).await?;
        if !deleted {
            return Err(RegistryError::EnrollmentNotFound);
        }
        Ok(())
    }
}
