//! Sea-orm implementations of the repository traits.
//!
//! Uniqueness and referential integrity are enforced by the store; these
//! repositories attempt the write and translate `SqlErr` outcomes into
//! the matching `RegistryError` variants at the mutation boundary. No
//! repository performs a check-then-act uniqueness guard.

use anyhow::Context as _;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    JoinType, QueryFilter, QueryOrder, QuerySelect, RelationTrait, SqlErr,
};
use uuid::Uuid;

use campus_domain::enrollment::EnrollmentStatus;
use campus_domain::pagination::PageRequest;
use campus_registry_schema::{class_enrollments, classes, course_enrollments, courses, users};

use crate::domain::policy::ListScope;
use crate::domain::repository::{
    ClassEnrollmentRepository, ClassRepository, CourseEnrollmentRepository, CourseRepository,
    UserRepository,
};
use crate::domain::types::{
    Class, ClassChanges, ClassEnrollment, Course, CourseChanges, CourseEnrollment, User,
    UserChanges,
};
use crate::error::RegistryError;

// ── User repository ──────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbUserRepository {
    pub db: DatabaseConnection,
}

impl UserRepository for DbUserRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, RegistryError> {
        let model = users::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find user by id")?;
        model.map(user_from_model).transpose()
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RegistryError> {
        let model = users::Entity::find()
            .filter(users::Column::Email.eq(email))
            .one(&self.db)
            .await
            .context("find user by email")?;
        model.map(user_from_model).transpose()
    }

    async fn list(&self, page: PageRequest) -> Result<Vec<User>, RegistryError> {
        let PageRequest { per_page, page } = page.clamped();
        let models = users::Entity::find()
            .order_by_asc(users::Column::CreatedAt)
            .offset(((page - 1) * per_page) as u64)
            .limit(per_page as u64)
            .all(&self.db)
            .await
            .context("list users")?;
        models.into_iter().map(user_from_model).collect()
    }

    async fn create(&self, user: &User) -> Result<(), RegistryError> {
        let result = users::ActiveModel {
            id: Set(user.id),
            email: Set(user.email.clone()),
            password_hash: Set(user.password_hash.clone()),
            first_name: Set(user.first_name.clone()),
            last_name: Set(user.last_name.clone()),
            role: Set(user.role.as_str().to_owned()),
            theme_preference: Set(user.theme_preference.as_str().to_owned()),
            profile_image: Set(user.profile_image.clone()),
            created_at: Set(user.created_at),
            updated_at: Set(user.updated_at),
        }
        .insert(&self.db)
        .await;

        match result {
            Ok(_) => Ok(()),
            Err(e) => match e.sql_err() {
                Some(SqlErr::UniqueConstraintViolation(_)) => Err(RegistryError::EmailTaken),
                _ => Err(anyhow::Error::new(e).context("create user").into()),
            },
        }
    }

    async fn update(&self, id: Uuid, changes: &UserChanges) -> Result<User, RegistryError> {
        let mut am = users::ActiveModel {
            id: Set(id),
            ..Default::default()
        };
        if let Some(ref email) = changes.email {
            am.email = Set(email.clone());
        }
        if let Some(ref password_hash) = changes.password_hash {
            am.password_hash = Set(password_hash.clone());
        }
        if let Some(ref first_name) = changes.first_name {
            am.first_name = Set(first_name.clone());
        }
        if let Some(ref last_name) = changes.last_name {
            am.last_name = Set(last_name.clone());
        }
        if let Some(role) = changes.role {
            am.role = Set(role.as_str().to_owned());
        }
        if let Some(theme) = changes.theme_preference {
            am.theme_preference = Set(theme.as_str().to_owned());
        }
        if let Some(ref profile_image) = changes.profile_image {
            am.profile_image = Set(Some(profile_image.clone()));
        }
        am.updated_at = Set(Utc::now());

        match am.update(&self.db).await {
            Ok(model) => user_from_model(model),
            Err(DbErr::RecordNotUpdated) => Err(RegistryError::UserNotFound),
            Err(e) => match e.sql_err() {
                Some(SqlErr::UniqueConstraintViolation(_)) => Err(RegistryError::EmailTaken),
                _ => Err(anyhow::Error::new(e).context("update user").into()),
            },
        }
    }

    async fn delete(&self, id: Uuid) -> Result<bool, RegistryError> {
        match users::Entity::delete_by_id(id).exec(&self.db).await {
            Ok(result) => Ok(result.rows_affected > 0),
            Err(e) => match e.sql_err() {
                Some(SqlErr::ForeignKeyConstraintViolation(_)) => Err(RegistryError::UserInUse),
                _ => Err(anyhow::Error::new(e).context("delete user").into()),
            },
        }
    }
}

fn user_from_model(model: users::Model) -> Result<User, RegistryError> {
    let role = campus_domain::user::UserRole::from_str(&model.role)
        .ok_or_else(|| anyhow::anyhow!("unknown role {:?} for user {}", model.role, model.id))?;
    let theme_preference = campus_domain::user::ThemePreference::from_str(&model.theme_preference)
        .ok_or_else(|| {
            anyhow::anyhow!(
                "unknown theme {:?} for user {}",
                model.theme_preference,
                model.id
            )
        })?;
    Ok(User {
        id: model.id,
        email: model.email,
        password_hash: model.password_hash,
        first_name: model.first_name,
        last_name: model.last_name,
        role,
        theme_preference,
        profile_image: model.profile_image,
        created_at: model.created_at,
        updated_at: model.updated_at,
    })
}

// ── Course repository ────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbCourseRepository {
    pub db: DatabaseConnection,
}

impl CourseRepository for DbCourseRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Course>, RegistryError> {
        let model = courses::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find course by id")?;
        Ok(model.map(course_from_model))
    }

    async fn list(
        &self,
        scope: ListScope,
        page: PageRequest,
    ) -> Result<Vec<Course>, RegistryError> {
        let PageRequest { per_page, page } = page.clamped();
        let mut query = courses::Entity::find();
        query = match scope {
            ListScope::All => query,
            ListScope::TaughtBy(teacher_id) => {
                query.filter(courses::Column::TeacherId.eq(teacher_id))
            }
            ListScope::EnrolledBy(student_id) => query
                .join(
                    JoinType::InnerJoin,
                    courses::Relation::CourseEnrollments.def(),
                )
                .filter(course_enrollments::Column::StudentId.eq(student_id))
                .filter(
                    course_enrollments::Column::Status.eq(EnrollmentStatus::Active.as_str()),
                ),
        };
        let models = query
            .order_by_asc(courses::Column::CreatedAt)
            .offset(((page - 1) * per_page) as u64)
            .limit(per_page as u64)
            .all(&self.db)
            .await
            .context("list courses")?;
        Ok(models.into_iter().map(course_from_model).collect())
    }

    async fn create(&self, course: &Course) -> Result<(), RegistryError> {
        let result = courses::ActiveModel {
            id: Set(course.id),
            course_code: Set(course.course_code.clone()),
            title: Set(course.title.clone()),
            description: Set(course.description.clone()),
            teacher_id: Set(course.teacher_id),
            is_active: Set(course.is_active),
            created_at: Set(course.created_at),
            updated_at: Set(course.updated_at),
        }
        .insert(&self.db)
        .await;

        match result {
            Ok(_) => Ok(()),
            Err(e) => match e.sql_err() {
                Some(SqlErr::UniqueConstraintViolation(_)) => Err(RegistryError::CourseCodeTaken),
                // teacher_id FK: the assigned teacher vanished between the
                // usecase check and the insert.
                Some(SqlErr::ForeignKeyConstraintViolation(_)) => Err(RegistryError::UserNotFound),
                _ => Err(anyhow::Error::new(e).context("create course").into()),
            },
        }
    }

    async fn update(&self, id: Uuid, changes: &CourseChanges) -> Result<Course, RegistryError> {
        let mut am = courses::ActiveModel {
            id: Set(id),
            ..Default::default()
        };
        if let Some(ref course_code) = changes.course_code {
            am.course_code = Set(course_code.clone());
        }
        if let Some(ref title) = changes.title {
            am.title = Set(title.clone());
        }
        if let Some(ref description) = changes.description {
            am.description = Set(description.clone());
        }
        if let Some(is_active) = changes.is_active {
            am.is_active = Set(is_active);
        }
        am.updated_at = Set(Utc::now());

        match am.update(&self.db).await {
            Ok(model) => Ok(course_from_model(model)),
            Err(DbErr::RecordNotUpdated) => Err(RegistryError::CourseNotFound),
            Err(e) => match e.sql_err() {
                Some(SqlErr::UniqueConstraintViolation(_)) => Err(RegistryError::CourseCodeTaken),
                _ => Err(anyhow::Error::new(e).context("update course").into()),
            },
        }
    }

    async fn delete(&self, id: Uuid) -> Result<bool, RegistryError> {
        match courses::Entity::delete_by_id(id).exec(&self.db).await {
            Ok(result) => Ok(result.rows_affected > 0),
            Err(e) => match e.sql_err() {
                Some(SqlErr::ForeignKeyConstraintViolation(_)) => Err(RegistryError::CourseInUse),
                _ => Err(anyhow::Error::new(e).context("delete course").into()),
            },
        }
    }
}

fn course_from_model(model: courses::Model) -> Course {
    Course {
        id: model.id,
        course_code: model.course_code,
        title: model.title,
        description: model.description,
        teacher_id: model.teacher_id,
        is_active: model.is_active,
        created_at: model.created_at,
        updated_at: model.updated_at,
    }
}

// ── Class repository ─────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbClassRepository {
    pub db: DatabaseConnection,
}

impl ClassRepository for DbClassRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Class>, RegistryError> {
        let model = classes::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find class by id")?;
        Ok(model.map(class_from_model))
    }

    async fn list(&self, scope: ListScope, page: PageRequest) -> Result<Vec<Class>, RegistryError> {
        let PageRequest { per_page, page } = page.clamped();
        let mut query = classes::Entity::find();
        query = match scope {
            ListScope::All => query,
            ListScope::TaughtBy(teacher_id) => {
                query.filter(classes::Column::TeacherId.eq(teacher_id))
            }
            ListScope::EnrolledBy(student_id) => query
                .join(
                    JoinType::InnerJoin,
                    classes::Relation::ClassEnrollments.def(),
                )
                .filter(class_enrollments::Column::StudentId.eq(student_id))
                .filter(class_enrollments::Column::Status.eq(EnrollmentStatus::Active.as_str())),
        };
        let models = query
            .order_by_asc(classes::Column::CreatedAt)
            .offset(((page - 1) * per_page) as u64)
            .limit(per_page as u64)
            .all(&self.db)
            .await
            .context("list classes")?;
        Ok(models.into_iter().map(class_from_model).collect())
    }

    async fn create(&self, class: &Class) -> Result<(), RegistryError> {
        let result = classes::ActiveModel {
            id: Set(class.id),
            course_id: Set(class.course_id),
            teacher_id: Set(class.teacher_id),
            section_number: Set(class.section_number.clone()),
            semester: Set(class.semester.clone()),
            year: Set(class.year),
            created_at: Set(class.created_at),
            updated_at: Set(class.updated_at),
        }
        .insert(&self.db)
        .await;

        match result {
            Ok(_) => Ok(()),
            Err(e) => match e.sql_err() {
                Some(SqlErr::UniqueConstraintViolation(_)) => Err(RegistryError::SectionTaken),
                // course_id/teacher_id FK: the referenced row vanished
                // between the usecase check and the insert.
                Some(SqlErr::ForeignKeyConstraintViolation(_)) => {
                    Err(RegistryError::CourseNotFound)
                }
                _ => Err(anyhow::Error::new(e).context("create class").into()),
            },
        }
    }

    async fn update(&self, id: Uuid, changes: &ClassChanges) -> Result<Class, RegistryError> {
        let mut am = classes::ActiveModel {
            id: Set(id),
            ..Default::default()
        };
        if let Some(teacher_id) = changes.teacher_id {
            am.teacher_id = Set(teacher_id);
        }
        if let Some(ref section_number) = changes.section_number {
            am.section_number = Set(section_number.clone());
        }
        if let Some(ref semester) = changes.semester {
            am.semester = Set(semester.clone());
        }
        if let Some(year) = changes.year {
            am.year = Set(year);
        }
        am.updated_at = Set(Utc::now());

        match am.update(&self.db).await {
            Ok(model) => Ok(class_from_model(model)),
            Err(DbErr::RecordNotUpdated) => Err(RegistryError::ClassNotFound),
            Err(e) => match e.sql_err() {
                Some(SqlErr::UniqueConstraintViolation(_)) => Err(RegistryError::SectionTaken),
                Some(SqlErr::ForeignKeyConstraintViolation(_)) => Err(RegistryError::UserNotFound),
                _ => Err(anyhow::Error::new(e).context("update class").into()),
            },
        }
    }

    async fn delete(&self, id: Uuid) -> Result<bool, RegistryError> {
        match classes::Entity::delete_by_id(id).exec(&self.db).await {
            Ok(result) => Ok(result.rows_affected > 0),
            Err(e) => match e.sql_err() {
                Some(SqlErr::ForeignKeyConstraintViolation(_)) => Err(RegistryError::ClassInUse),
                _ => Err(anyhow::Error::new(e).context("delete class").into()),
            },
        }
    }
}

fn class_from_model(model: classes::Model) -> Class {
    Class {
        id: model.id,
        course_id: model.course_id,
        teacher_id: model.teacher_id,
        section_number: model.section_number,
        semester: model.semester,
        year: model.year,
        created_at: model.created_at,
        updated_at: model.updated_at,
    }
}

// ── Course enrollment repository ─────────────────────────────────────────────

#[derive(Clone)]
pub struct DbCourseEnrollmentRepository {
    pub db: DatabaseConnection,
}

impl CourseEnrollmentRepository for DbCourseEnrollmentRepository {
    async fn find(
        &self,
        student_id: Uuid,
        course_id: Uuid,
    ) -> Result<Option<CourseEnrollment>, RegistryError> {
        let model = course_enrollments::Entity::find()
            .filter(course_enrollments::Column::StudentId.eq(student_id))
            .filter(course_enrollments::Column::CourseId.eq(course_id))
            .one(&self.db)
            .await
            .context("find course enrollment")?;
        model.map(course_enrollment_from_model).transpose()
    }

    async fn create(&self, enrollment: &CourseEnrollment) -> Result<(), RegistryError> {
        let result = course_enrollments::ActiveModel {
            id: Set(enrollment.id),
            student_id: Set(enrollment.student_id),
            course_id: Set(enrollment.course_id),
            status: Set(enrollment.status.as_str().to_owned()),
            enrollment_date: Set(enrollment.enrollment_date),
        }
        .insert(&self.db)
        .await;

        match result {
            Ok(_) => Ok(()),
            Err(e) => match e.sql_err() {
                // The unique (student_id, course_id) index is the
                // authoritative duplicate signal — race-safe under
                // concurrent identical requests.
                Some(SqlErr::UniqueConstraintViolation(_)) => Err(RegistryError::AlreadyEnrolled),
                Some(SqlErr::ForeignKeyConstraintViolation(_)) => {
                    Err(RegistryError::CourseNotFound)
                }
                _ => Err(anyhow::Error::new(e).context("create course enrollment").into()),
            },
        }
    }

    async fn delete(&self, student_id: Uuid, course_id: Uuid) -> Result<bool, RegistryError> {
        let result = course_enrollments::Entity::delete_many()
            .filter(course_enrollments::Column::StudentId.eq(student_id))
            .filter(course_enrollments::Column::CourseId.eq(course_id))
            .exec(&self.db)
            .await
            .context("delete course enrollment")?;
        Ok(result.rows_affected > 0)
    }
}

fn course_enrollment_from_model(
    model: course_enrollments::Model,
) -> Result<CourseEnrollment, RegistryError> {
    let status = EnrollmentStatus::from_str(&model.status).ok_or_else(|| {
        anyhow::anyhow!("unknown status {:?} for enrollment {}", model.status, model.id)
    })?;
    Ok(CourseEnrollment {
        id: model.id,
        student_id: model.student_id,
        course_id: model.course_id,
        status,
        enrollment_date: model.enrollment_date,
    })
}

// ── Class enrollment repository ──────────────────────────────────────────────

#[derive(Clone)]
pub struct DbClassEnrollmentRepository {
    pub db: DatabaseConnection,
}

impl ClassEnrollmentRepository for DbClassEnrollmentRepository {
    async fn find(
        &self,
        student_id: Uuid,
        class_id: Uuid,
    ) -> Result<Option<ClassEnrollment>, RegistryError> {
        let model = class_enrollments::Entity::find()
            .filter(class_enrollments::Column::StudentId.eq(student_id))
            .filter(class_enrollments::Column::ClassId.eq(class_id))
            .one(&self.db)
            .await
            .context("find class enrollment")?;
        model.map(class_enrollment_from_model).transpose()
    }

    async fn create(&self, enrollment: &ClassEnrollment) -> Result<(), RegistryError> {
        let result = class_enrollments::ActiveModel {
            id: Set(enrollment.id),
            student_id: Set(enrollment.student_id),
            class_id: Set(enrollment.class_id),
            status: Set(enrollment.status.as_str().to_owned()),
            enrollment_date: Set(enrollment.enrollment_date),
        }
        .insert(&self.db)
        .await;

        match result {
            Ok(_) => Ok(()),
            Err(e) => match e.sql_err() {
                Some(SqlErr::UniqueConstraintViolation(_)) => Err(RegistryError::AlreadyEnrolled),
                Some(SqlErr::ForeignKeyConstraintViolation(_)) => Err(RegistryError::ClassNotFound),
                _ => Err(anyhow::Error::new(e).context("create class enrollment").into()),
            },
        }
    }

    async fn delete(&self, student_id: Uuid, class_id: Uuid) -> Result<bool, RegistryError> {
        let result = class_enrollments::Entity::delete_many()
            .filter(class_enrollments::Column::StudentId.eq(student_id))
            .filter(class_enrollments::Column::ClassId.eq(class_id))
            .exec(&self.db)
            .await
            .context("delete class enrollment")?;
        Ok(result.rows_affected > 0)
    }
}

fn class_enrollment_from_model(
    model: class_enrollments::Model,
) -> Result<ClassEnrollment, RegistryError> {
    let status = EnrollmentStatus::from_str(&model.status).ok_or_else(|| {
        anyhow::anyhow!("unknown status {:?} for enrollment {}", model.status, model.id)
    })?;
    Ok(ClassEnrollment {
        id: model.id,
        student_id: model.student_id,
        class_id: model.class_id,
        status,
        enrollment_date: model.enrollment_date,
    })
}
