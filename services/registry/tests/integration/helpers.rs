//! Shared in-memory store for usecase-level integration tests.
//!
//! The store emulates exactly the guarantees the real schema provides:
//! unique indexes (email, course_code, class section tuple, enrollment
//! pairs) and Restrict/SetNull foreign keys. Uniqueness is enforced
//! inside the mutex, the way the database enforces it inside the insert.

use std::sync::{Arc, Mutex};

use chrono::Utc;
use uuid::Uuid;

use campus_domain::enrollment::EnrollmentStatus;
use campus_domain::pagination::PageRequest;
use campus_domain::user::UserRole;

use campus_registry::domain::policy::ListScope;
use campus_registry::domain::repository::{
    ClassEnrollmentRepository, ClassRepository, CourseEnrollmentRepository, CourseRepository,
    UserRepository,
};
use campus_registry::domain::types::{
    Class, ClassChanges, ClassEnrollment, Course, CourseChanges, CourseEnrollment, User,
    UserChanges,
};
use campus_registry::error::RegistryError;

pub const TEST_JWT_SECRET: &str = "integration-test-jwt-secret";
pub const TEST_PASSWORD: &str = "password123";

#[derive(Clone, Default)]
pub struct TestStore {
    pub users: Arc<Mutex<Vec<User>>>,
    pub courses: Arc<Mutex<Vec<Course>>>,
    pub classes: Arc<Mutex<Vec<Class>>>,
    pub course_enrollments: Arc<Mutex<Vec<CourseEnrollment>>>,
    pub class_enrollments: Arc<Mutex<Vec<ClassEnrollment>>>,
}

impl TestStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn seed_user(&self, user: User) -> User {
        self.users.lock().unwrap().push(user.clone());
        user
    }

    pub fn seed_course(&self, course: Course) -> Course {
        self.courses.lock().unwrap().push(course.clone());
        course
    }

    pub fn seed_class(&self, class: Class) -> Class {
        self.classes.lock().unwrap().push(class.clone());
        class
    }

    pub fn user_repo(&self) -> InMemoryUserRepo {
        InMemoryUserRepo {
            store: self.clone(),
        }
    }

    pub fn course_repo(&self) -> InMemoryCourseRepo {
        InMemoryCourseRepo {
            store: self.clone(),
        }
    }

    pub fn class_repo(&self) -> InMemoryClassRepo {
        InMemoryClassRepo {
            store: self.clone(),
        }
    }

    pub fn course_enrollment_repo(&self) -> InMemoryCourseEnrollmentRepo {
        InMemoryCourseEnrollmentRepo {
            store: self.clone(),
        }
    }

    pub fn class_enrollment_repo(&self) -> InMemoryClassEnrollmentRepo {
        InMemoryClassEnrollmentRepo {
            store: self.clone(),
        }
    }
}

// ── Fixtures ─────────────────────────────────────────────────────────────────

pub fn user_fixture(role: UserRole, email: &str) -> User {
    User {
        id: Uuid::now_v7(),
        email: email.to_owned(),
        // MIN_COST keeps fixture hashing cheap.
        password_hash: bcrypt::hash(TEST_PASSWORD, 4).unwrap(),
        first_name: "Test".into(),
        last_name: match role {
            UserRole::Admin => "Admin".into(),
            UserRole::Teacher => "Teacher".into(),
            UserRole::Student => "Student".into(),
        },
        role,
        theme_preference: Default::default(),
        profile_image: None,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

pub fn course_fixture(code: &str, teacher_id: Option<Uuid>) -> Course {
    Course {
        id: Uuid::now_v7(),
        course_code: code.to_owned(),
        title: "Introduction to Computer Science".into(),
        description: "Basic programming concepts".into(),
        teacher_id,
        is_active: true,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

pub fn class_fixture(course_id: Uuid, teacher_id: Uuid, section: &str) -> Class {
    Class {
        id: Uuid::now_v7(),
        course_id,
        teacher_id,
        section_number: section.to_owned(),
        semester: "Fall".into(),
        year: 2026,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

// ── User repository ──────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct InMemoryUserRepo {
    pub store: TestStore,
}

impl UserRepository for InMemoryUserRepo {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, RegistryError> {
        Ok(self
            .store
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.id == id)
            .cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RegistryError> {
        Ok(self
            .store
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.email == email)
            .cloned())
    }

    async fn list(&self, page: PageRequest) -> Result<Vec<User>, RegistryError> {
        let PageRequest { per_page, page } = page.clamped();
        Ok(self
            .store
            .users
            .lock()
            .unwrap()
            .iter()
            .skip(((page - 1) * per_page) as usize)
            .take(per_page as usize)
            .cloned()
            .collect())
    }

    async fn create(&self, user: &User) -> Result<(), RegistryError> {
        let mut users = self.store.users.lock().unwrap();
        if users.iter().any(|u| u.email == user.email) {
            return Err(RegistryError::EmailTaken);
        }
        users.push(user.clone());
        Ok(())
    }

    async fn update(&self, id: Uuid, changes: &UserChanges) -> Result<User, RegistryError> {
        let mut users = self.store.users.lock().unwrap();
        if let Some(ref email) = changes.email {
            if users.iter().any(|u| u.email == *email && u.id != id) {
                return Err(RegistryError::EmailTaken);
            }
        }
        let user = users
            .iter_mut()
            .find(|u| u.id == id)
            .ok_or(RegistryError::UserNotFound)?;
        if let Some(ref email) = changes.email {
            user.email = email.clone();
        }
        if let Some(ref hash) = changes.password_hash {
            user.password_hash = hash.clone();
        }
        if let Some(ref first_name) = changes.first_name {
            user.first_name = first_name.clone();
        }
        if let Some(ref last_name) = changes.last_name {
            user.last_name = last_name.clone();
        }
        if let Some(role) = changes.role {
            user.role = role;
        }
        if let Some(theme) = changes.theme_preference {
            user.theme_preference = theme;
        }
        if let Some(ref image) = changes.profile_image {
            user.profile_image = Some(image.clone());
        }
        user.updated_at = Utc::now();
        Ok(user.clone())
    }

    async fn delete(&self, id: Uuid) -> Result<bool, RegistryError> {
        // Restrict FKs: classes taught and enrollments held block deletion.
        if self
            .store
            .classes
            .lock()
            .unwrap()
            .iter()
            .any(|c| c.teacher_id == id)
        {
            return Err(RegistryError::UserInUse);
        }
        if self
            .store
            .course_enrollments
            .lock()
            .unwrap()
            .iter()
            .any(|e| e.student_id == id)
            || self
                .store
                .class_enrollments
                .lock()
                .unwrap()
                .iter()
                .any(|e| e.student_id == id)
        {
            return Err(RegistryError::UserInUse);
        }
        // SetNull: courses lose their weak teacher reference.
        for course in self.store.courses.lock().unwrap().iter_mut() {
            if course.teacher_id == Some(id) {
                course.teacher_id = None;
            }
        }
        let mut users = self.store.users.lock().unwrap();
        let before = users.len();
        users.retain(|u| u.id != id);
        Ok(users.len() < before)
    }
}

// ── Course repository ────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct InMemoryCourseRepo {
    pub store: TestStore,
}

impl CourseRepository for InMemoryCourseRepo {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Course>, RegistryError> {
        Ok(self
            .store
            .courses
            .lock()
            .unwrap()
            .iter()
            .find(|c| c.id == id)
            .cloned())
    }

    async fn list(
        &self,
        scope: ListScope,
        page: PageRequest,
    ) -> Result<Vec<Course>, RegistryError> {
        let PageRequest { per_page, page } = page.clamped();
        let courses = self.store.courses.lock().unwrap();
        let filtered: Vec<Course> = match scope {
            ListScope::All => courses.clone(),
            ListScope::TaughtBy(id) => courses
                .iter()
                .filter(|c| c.teacher_id == Some(id))
                .cloned()
                .collect(),
            ListScope::EnrolledBy(id) => {
                let enrollments = self.store.course_enrollments.lock().unwrap();
                courses
                    .iter()
                    .filter(|c| {
                        enrollments.iter().any(|e| {
                            e.student_id == id
                                && e.course_id == c.id
                                && e.status == EnrollmentStatus::Active
                        })
                    })
                    .cloned()
                    .collect()
            }
        };
        Ok(filtered
            .into_iter()
            .skip(((page - 1) * per_page) as usize)
            .take(per_page as usize)
            .collect())
    }

    async fn create(&self, course: &Course) -> Result<(), RegistryError> {
        let mut courses = self.store.courses.lock().unwrap();
        if courses.iter().any(|c| c.course_code == course.course_code) {
            return Err(RegistryError::CourseCodeTaken);
        }
        courses.push(course.clone());
        Ok(())
    }

    async fn update(&self, id: Uuid, changes: &CourseChanges) -> Result<Course, RegistryError> {
        let mut courses = self.store.courses.lock().unwrap();
        if let Some(ref code) = changes.course_code {
            if courses.iter().any(|c| c.course_code == *code && c.id != id) {
                return Err(RegistryError::CourseCodeTaken);
            }
        }
        let course = courses
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or(RegistryError::CourseNotFound)?;
        if let Some(ref code) = changes.course_code {
            course.course_code = code.clone();
        }
        if let Some(ref title) = changes.title {
            course.title = title.clone();
        }
        if let Some(ref description) = changes.description {
            course.description = description.clone();
        }
        if let Some(is_active) = changes.is_active {
            course.is_active = is_active;
        }
        course.updated_at = Utc::now();
        Ok(course.clone())
    }

    async fn delete(&self, id: Uuid) -> Result<bool, RegistryError> {
        // Restrict FKs: sections and enrollments block deletion.
        if self
            .store
            .classes
            .lock()
            .unwrap()
            .iter()
            .any(|c| c.course_id == id)
            || self
                .store
                .course_enrollments
                .lock()
                .unwrap()
                .iter()
                .any(|e| e.course_id == id)
        {
            return Err(RegistryError::CourseInUse);
        }
        let mut courses = self.store.courses.lock().unwrap();
        let before = courses.len();
        courses.retain(|c| c.id != id);
        Ok(courses.len() < before)
    }
}

// ── Class repository ─────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct InMemoryClassRepo {
    pub store: TestStore,
}

fn same_section(a: &Class, b: &Class) -> bool {
    a.course_id == b.course_id
        && a.section_number == b.section_number
        && a.semester == b.semester
        && a.year == b.year
}

impl ClassRepository for InMemoryClassRepo {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Class>, RegistryError> {
        Ok(self
            .store
            .classes
            .lock()
            .unwrap()
            .iter()
            .find(|c| c.id == id)
            .cloned())
    }

    async fn list(&self, scope: ListScope, page: PageRequest) -> Result<Vec<Class>, RegistryError> {
        let PageRequest { per_page, page } = page.clamped();
        let classes = self.store.classes.lock().unwrap();
        let filtered: Vec<Class> = match scope {
            ListScope::All => classes.clone(),
            ListScope::TaughtBy(id) => classes
                .iter()
                .filter(|c| c.teacher_id == id)
                .cloned()
                .collect(),
            ListScope::EnrolledBy(id) => {
                let enrollments = self.store.class_enrollments.lock().unwrap();
                classes
                    .iter()
                    .filter(|c| {
                        enrollments.iter().any(|e| {
                            e.student_id == id
                                && e.class_id == c.id
                                && e.status == EnrollmentStatus::Active
                        })
                    })
                    .cloned()
                    .collect()
            }
        };
        Ok(filtered
            .into_iter()
            .skip(((page - 1) * per_page) as usize)
            .take(per_page as usize)
            .collect())
    }

    async fn create(&self, class: &Class) -> Result<(), RegistryError> {
        let mut classes = self.store.classes.lock().unwrap();
        if classes.iter().any(|c| same_section(c, class)) {
            return Err(RegistryError::SectionTaken);
        }
        classes.push(class.clone());
        Ok(())
    }

    async fn update(&self, id: Uuid, changes: &ClassChanges) -> Result<Class, RegistryError> {
        let mut classes = self.store.classes.lock().unwrap();
        let mut updated = classes
            .iter()
            .find(|c| c.id == id)
            .cloned()
            .ok_or(RegistryError::ClassNotFound)?;
        if let Some(teacher_id) = changes.teacher_id {
            updated.teacher_id = teacher_id;
        }
        if let Some(ref section) = changes.section_number {
            updated.section_number = section.clone();
        }
        if let Some(ref semester) = changes.semester {
            updated.semester = semester.clone();
        }
        if let Some(year) = changes.year {
            updated.year = year;
        }
        if classes.iter().any(|c| c.id != id && same_section(c, &updated)) {
            return Err(RegistryError::SectionTaken);
        }
        updated.updated_at = Utc::now();
        *classes.iter_mut().find(|c| c.id == id).unwrap() = updated.clone();
        Ok(updated)
    }

    async fn delete(&self, id: Uuid) -> Result<bool, RegistryError> {
        if self
            .store
            .class_enrollments
            .lock()
            .unwrap()
            .iter()
            .any(|e| e.class_id == id)
        {
            return Err(RegistryError::ClassInUse);
        }
        let mut classes = self.store.classes.lock().unwrap();
        let before = classes.len();
        classes.retain(|c| c.id != id);
        Ok(classes.len() < before)
    }
}

// ── Course enrollment repository ─────────────────────────────────────────────

#[derive(Clone)]
pub struct InMemoryCourseEnrollmentRepo {
    pub store: TestStore,
}

impl CourseEnrollmentRepository for InMemoryCourseEnrollmentRepo {
    async fn find(
        &self,
        student_id: Uuid,
        course_id: Uuid,
    ) -> Result<Option<CourseEnrollment>, RegistryError> {
        Ok(self
            .store
            .course_enrollments
            .lock()
            .unwrap()
            .iter()
            .find(|e| e.student_id == student_id && e.course_id == course_id)
            .cloned())
    }

    async fn create(&self, enrollment: &CourseEnrollment) -> Result<(), RegistryError> {
        // FK: target must still exist at insert time.
        if !self
            .store
            .courses
            .lock()
            .unwrap()
            .iter()
            .any(|c| c.id == enrollment.course_id)
        {
            return Err(RegistryError::CourseNotFound);
        }
        let mut enrollments = self.store.course_enrollments.lock().unwrap();
        if enrollments
            .iter()
            .any(|e| e.student_id == enrollment.student_id && e.course_id == enrollment.course_id)
        {
            return Err(RegistryError::AlreadyEnrolled);
        }
        enrollments.push(enrollment.clone());
        Ok(())
    }

    async fn delete(&self, student_id: Uuid, course_id: Uuid) -> Result<bool, RegistryError> {
        let mut enrollments = self.store.course_enrollments.lock().unwrap();
        let before = enrollments.len();
        enrollments.retain(|e| !(e.student_id == student_id && e.course_id == course_id));
        Ok(enrollments.len() < before)
    }
}

// ── Class enrollment repository ──────────────────────────────────────────────

#[derive(Clone)]
pub struct InMemoryClassEnrollmentRepo {
    pub store: TestStore,
}

impl ClassEnrollmentRepository for InMemoryClassEnrollmentRepo {
    async fn find(
        &self,
        student_id: Uuid,
        class_id: Uuid,
    ) -> Result<Option<ClassEnrollment>, RegistryError> {
        Ok(self
            .store
            .class_enrollments
            .lock()
            .unwrap()
            .iter()
            .find(|e| e.student_id == student_id && e.class_id == class_id)
            .cloned())
    }

    async fn create(&self, enrollment: &ClassEnrollment) -> Result<(), RegistryError> {
        if !self
            .store
            .classes
            .lock()
            .unwrap()
            .iter()
            .any(|c| c.id == enrollment.class_id)
        {
            return Err(RegistryError::ClassNotFound);
        }
        let mut enrollments = self.store.class_enrollments.lock().unwrap();
        if enrollments
            .iter()
            .any(|e| e.student_id == enrollment.student_id && e.class_id == enrollment.class_id)
        {
            return Err(RegistryError::AlreadyEnrolled);
        }
        enrollments.push(enrollment.clone());
        Ok(())
    }

    async fn delete(&self, student_id: Uuid, class_id: Uuid) -> Result<bool, RegistryError> {
        let mut enrollments = self.store.class_enrollments.lock().unwrap();
        let before = enrollments.len();
        enrollments.retain(|e| !(e.student_id == student_id && e.class_id == class_id));
        Ok(enrollments.len() < before)
    }
}
