use chrono::Utc;
use uuid::Uuid;

use campus_domain::pagination::PageRequest;
use campus_domain::user::UserRole;

use crate::domain::policy::{Action, Decision, catalog_scope, decide};
use crate::domain::repository::{ClassRepository, CourseRepository, UserRepository};
use crate::domain::types::{Class, ClassChanges};
use crate::error::RegistryError;

// ── CreateClass ──────────────────────────────────────────────────────────────

pub struct CreateClassInput {
    pub course_id: Uuid,
    pub teacher_id: Uuid,
    pub section_number: String,
    pub semester: String,
    pub year: i32,
}

pub struct CreateClassUseCase<U, Co, Cl>
where
    U: UserRepository,
    Co: CourseRepository,
    Cl: ClassRepository,
{
    pub users: U,
    pub courses: Co,
    pub classes: Cl,
}

impl<U, Co, Cl> CreateClassUseCase<U, Co, Cl>
where
    U: UserRepository,
    Co: CourseRepository,
    Cl: ClassRepository,
{
    pub async fn execute(
        &self,
        actor_id: Uuid,
        input: CreateClassInput,
    ) -> Result<Class, RegistryError> {
        let actor = self
            .users
            .find_by_id(actor_id)
            .await?
            .ok_or(RegistryError::Unauthorized)?;
        if decide(&actor, &Action::CreateClass) == Decision::Deny {
            return Err(RegistryError::Forbidden);
        }

        if self.courses.find_by_id(input.course_id).await?.is_none() {
            return Err(RegistryError::CourseNotFound);
        }
        let teacher = self
            .users
            .find_by_id(input.teacher_id)
            .await?
            .ok_or(RegistryError::UserNotFound)?;
        if teacher.role != UserRole::Teacher {
            return Err(RegistryError::NotATeacher);
        }

        let now = Utc::now();
        let class = Class {
            id: Uuid::now_v7(),
            course_id: input.course_id,
            teacher_id: input.teacher_id,
            section_number: input.section_number,
            semester: input.semester,
            year: input.year,
            created_at: now,
            updated_at: now,
        };
        // A duplicate (course, section, semester, year) tuple surfaces from
        // the store's unique index as SectionTaken.
        self.classes.create(&class).await?;
        Ok(class)
    }
}

// ── GetClass ─────────────────────────────────────────────────────────────────

pub struct GetClassUseCase<U, Cl>
where
    U: UserRepository,
    Cl: ClassRepository,
{
    pub users: U,
    pub classes: Cl,
}

impl<U, Cl> GetClassUseCase<U, Cl>
where
    U: UserRepository,
    Cl: ClassRepository,
{
    pub async fn execute(&self, actor_id: Uuid, class_id: Uuid) -> Result<Class, RegistryError> {
        self.users
            .find_by_id(actor_id)
            .await?
            .ok_or(RegistryError::Unauthorized)?;
        self.classes
            .find_by_id(class_id)
            .await?
            .ok_or(RegistryError::ClassNotFound)
    }
}

// ── ListClasses ──────────────────────────────────────────────────────────────

pub struct ListClassesUseCase<U, Cl>
where
    U: UserRepository,
    Cl: ClassRepository,
{
    pub users: U,
    pub classes: Cl,
}

impl<U, Cl> ListClassesUseCase<U, Cl>
where
    U: UserRepository,
    Cl: ClassRepository,
{
    pub async fn execute(
        &self,
        actor_id: Uuid,
        page: PageRequest,
    ) -> Result<Vec<Class>, RegistryError> {
        let actor = self
            .users
            .find_by_id(actor_id)
            .await?
            .ok_or(RegistryError::Unauthorized)?;
        let scope = catalog_scope(&actor);
        self.classes.list(scope, page).await
    }
}

// ── UpdateClass ──────────────────────────────────────────────────────────────

pub struct UpdateClassUseCase<U, Cl>
where
    U: UserRepository,
    Cl: ClassRepository,
{
    pub users: U,
    pub classes: Cl,
}

impl<U, Cl> UpdateClassUseCase<U, Cl>
where
    U: UserRepository,
    Cl: ClassRepository,
{
    pub async fn execute(
        &self,
        actor_id: Uuid,
        class_id: Uuid,
        changes: ClassChanges,
    ) -> Result<Class, RegistryError> {
        let actor = self
            .users
            .find_by_id(actor_id)
            .await?
            .ok_or(RegistryError::Unauthorized)?;
        let class = self
            .classes
            .find_by_id(class_id)
            .await?
            .ok_or(RegistryError::ClassNotFound)?;
        if decide(&actor, &Action::UpdateClass { class: &class }) == Decision::Deny {
            return Err(RegistryError::Forbidden);
        }
        if changes.is_empty() {
            return Err(RegistryError::MissingData);
        }

        // Reassignment must point at an actual teacher.
        if let Some(teacher_id) = changes.teacher_id {
            let teacher = self
                .users
                .find_by_id(teacher_id)
                .await?
                .ok_or(RegistryError::UserNotFound)?;
            if teacher.role != UserRole::Teacher {
                return Err(RegistryError::NotATeacher);
            }
        }

        self.classes.update(class_id, &changes).await
    }
}

// ── DeleteClass ──────────────────────────────────────────────────────────────

pub struct DeleteClassUseCase<U, Cl>
where
    U: UserRepository,
    Cl: ClassRepository,
{
    pub users: U,
    pub classes: Cl,
}

impl<U, Cl> DeleteClassUseCase<U, Cl>
where
    U: UserRepository,
    Cl: ClassRepository,
{
    pub async fn execute(&self, actor_id: Uuid, class_id: Uuid) -> Result<(), RegistryError> {
        let actor = self
            .users
            .find_by_id(actor_id)
            .await?
            .ok_or(RegistryError::Unauthorized)?;
        let class = self
            .classes
            .find_by_id(class_id)
            .await?
            .ok_or(RegistryError::ClassNotFound)?;
        if decide(&actor, &Action::DeleteClass { class: &class }) == Decision::Deny {
            return Err(RegistryError::Forbidden);
        }

        let deleted = self.classes.delete(class_id).await?;
        if !deleted {
            return Err(RegistryError::ClassNotFound);
        }
        Ok(())
    }
}
