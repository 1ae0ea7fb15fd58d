#![allow(async_fn_in_trait)]

use uuid::Uuid;

use campus_domain::pagination::PageRequest;

use crate::domain::policy::ListScope;
use crate::domain::types::{
    Class, ClassChanges, ClassEnrollment, Course, CourseChanges, CourseEnrollment, User,
    UserChanges,
};
use crate::error::RegistryError;

/// Repository for user accounts.
///
/// `create` and `update` treat the store's unique-email violation as the
/// authoritative duplicate signal and surface it as `EmailTaken`.
pub trait UserRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, RegistryError>;
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RegistryError>;
    async fn list(&self, page: PageRequest) -> Result<Vec<User>, RegistryError>;
    async fn create(&self, user: &User) -> Result<(), RegistryError>;
    async fn update(&self, id: Uuid, changes: &UserChanges) -> Result<User, RegistryError>;

    /// Delete a user. Returns `true` if a row was deleted; dependent
    /// classes or enrollments surface as `UserInUse`.
    async fn delete(&self, id: Uuid) -> Result<bool, RegistryError>;
}

/// Repository for catalog courses.
pub trait CourseRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Course>, RegistryError>;

    /// List courses narrowed to the given scope. `EnrolledBy` follows the
    /// student's active course enrollments.
    async fn list(&self, scope: ListScope, page: PageRequest)
    -> Result<Vec<Course>, RegistryError>;

    async fn create(&self, course: &Course) -> Result<(), RegistryError>;
    async fn update(&self, id: Uuid, changes: &CourseChanges) -> Result<Course, RegistryError>;

    /// Delete a course. Dependent classes or enrollments surface as
    /// `CourseInUse`.
    async fn delete(&self, id: Uuid) -> Result<bool, RegistryError>;
}

/// Repository for class sections.
pub trait ClassRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Class>, RegistryError>;
    async fn list(&self, scope: ListScope, page: PageRequest) -> Result<Vec<Class>, RegistryError>;
    async fn create(&self, class: &Class) -> Result<(), RegistryError>;
    async fn update(&self, id: Uuid, changes: &ClassChanges) -> Result<Class, RegistryError>;
    async fn delete(&self, id: Uuid) -> Result<bool, RegistryError>;
}

/// Repository for course enrollments.
///
/// `create` must attempt the insert and translate the store's
/// unique-constraint violation into `AlreadyEnrolled` — a prior
/// existence check is not race-safe and must not be the guard.
pub trait CourseEnrollmentRepository: Send + Sync {
    async fn find(
        &self,
        student_id: Uuid,
        course_id: Uuid,
    ) -> Result<Option<CourseEnrollment>, RegistryError>;

    async fn create(&self, enrollment: &CourseEnrollment) -> Result<(), RegistryError>;

    /// Hard-delete the enrollment row. Returns `true` if a row was deleted.
    async fn delete(&self, student_id: Uuid, course_id: Uuid) -> Result<bool, RegistryError>;
}

/// Repository for class enrollments. Same contract as
/// [`CourseEnrollmentRepository`] with the class as target.
pub trait ClassEnrollmentRepository: Send + Sync {
    async fn find(
        &self,
        student_id: Uuid,
        class_id: Uuid,
    ) -> Result<Option<ClassEnrollment>, RegistryError>;

    async fn create(&self, enrollment: &ClassEnrollment) -> Result<(), RegistryError>;

    async fn delete(&self, student_id: Uuid, class_id: Uuid) -> Result<bool, RegistryError>;
}
