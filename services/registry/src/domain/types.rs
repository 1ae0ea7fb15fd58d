use chrono::{DateTime, Utc};
use uuid::Uuid;

use campus_domain::enrollment::EnrollmentStatus;
use campus_domain::user::{ThemePreference, UserRole};

/// User account owned by the registry.
#[derive(Debug, Clone)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub password_hash: String,
    pub first_name: String,
    pub last_name: String,
    pub role: UserRole,
    pub theme_preference: ThemePreference,
    pub profile_image: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Catalog course. `teacher_id` is a weak reference to the owning
/// teacher, not ownership — the user record lives in the identity store.
#[derive(Debug, Clone)]
pub struct Course {
    pub id: Uuid,
    pub course_code: String,
    pub title: String,
    pub description: String,
    pub teacher_id: Option<Uuid>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Course section taught by a teacher in a given term.
#[derive(Debug, Clone)]
pub struct Class {
    pub id: Uuid,
    pub course_id: Uuid,
    pub teacher_id: Uuid,
    pub section_number: String,
    pub semester: String,
    pub year: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Join record linking a student to a course.
#[derive(Debug, Clone)]
pub struct CourseEnrollment {
    pub id: Uuid,
    pub student_id: Uuid,
    pub course_id: Uuid,
    pub status: EnrollmentStatus,
    pub enrollment_date: DateTime<Utc>,
}

/// Join record linking a student to a class section.
#[derive(Debug, Clone)]
pub struct ClassEnrollment {
    pub id: Uuid,
    pub student_id: Uuid,
    pub class_id: Uuid,
    pub status: EnrollmentStatus,
    pub enrollment_date: DateTime<Utc>,
}

/// Partial update for a user row. `None` fields are left untouched.
#[derive(Debug, Clone, Default)]
pub struct UserChanges {
    pub email: Option<String>,
    pub password_hash: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub role: Option<UserRole>,
    pub theme_preference: Option<ThemePreference>,
    pub profile_image: Option<String>,
}

impl UserChanges {
    pub fn is_empty(&self) -> bool {
        self.email.is_none()
            && self.password_hash.is_none()
            && self.first_name.is_none()
            && self.last_name.is_none()
            && self.role.is_none()
            && self.theme_preference.is_none()
            && self.profile_image.is_none()
    }
}

/// Partial update for a course row.
#[derive(Debug, Clone, Default)]
pub struct CourseChanges {
    pub course_code: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub is_active: Option<bool>,
}

impl CourseChanges {
    pub fn is_empty(&self) -> bool {
        self.course_code.is_none()
            && self.title.is_none()
            && self.description.is_none()
            && self.is_active.is_none()
    }
}

/// Partial update for a class row.
#[derive(Debug, Clone, Default)]
pub struct ClassChanges {
    pub teacher_id: Option<Uuid>,
    pub section_number: Option<String>,
    pub semester: Option<String>,
    pub year: Option<i32>,
}

impl ClassChanges {
    pub fn is_empty(&self) -> bool {
        self.teacher_id.is_none()
            && self.section_number.is_none()
            && self.semester.is_none()
            && self.year.is_none()
    }
}

/// Minimal shape check for an email address. Uniqueness and
/// case-insensitivity are handled by lowercasing at the usecase boundary
/// and the store's unique constraint.
pub fn validate_email(email: &str) -> bool {
    if email.is_empty() || email.len() > 254 {
        return false;
    }
    if email.chars().any(|c| c.is_whitespace()) {
        return false;
    }
    match email.split_once('@') {
        Some((local, domain)) => !local.is_empty() && domain.contains('.'),
        None => false,
    }
}
