//! End-to-end lifecycle against the in-memory store: catalog creation,
//! enrollment, role-scoped listing, unenrollment.

use campus_domain::pagination::PageRequest;
use campus_domain::user::UserRole;

use campus_registry::error::RegistryError;
use campus_registry::usecase::course::{
    CreateCourseInput, CreateCourseUseCase, ListCoursesUseCase,
};
use campus_registry::usecase::enrollment::{EnrollInCourseUseCase, UnenrollFromCourseUseCase};

use crate::helpers::{TestStore, user_fixture};

#[tokio::test]
async fn should_run_full_course_enrollment_lifecycle() {
    let store = TestStore::new();
    let admin = store.seed_user(user_fixture(UserRole::Admin, "admin@example.com"));
    let teacher = store.seed_user(user_fixture(UserRole::Teacher, "teacher@example.com"));
    let student = store.seed_user(user_fixture(UserRole::Student, "student@example.com"));

    // Admin creates CS101 assigned to the teacher.
    let create = CreateCourseUseCase {
        users: store.user_repo(),
        courses: store.course_repo(),
    };
    let course = create
        .execute(
            admin.id,
            CreateCourseInput {
                course_code: "CS101".into(),
                title: "Intro".into(),
                description: None,
                teacher_id: Some(teacher.id),
            },
        )
        .await
        .unwrap();

    // A second course with the same code is rejected.
    let duplicate = create
        .execute(
            admin.id,
            CreateCourseInput {
                course_code: "CS101".into(),
                title: "Intro again".into(),
                description: None,
                teacher_id: None,
            },
        )
        .await;
    assert!(matches!(duplicate, Err(RegistryError::CourseCodeTaken)));

    // Student enrolls; the second attempt conflicts without a second row.
    let enroll = EnrollInCourseUseCase {
        users: store.user_repo(),
        courses: store.course_repo(),
        enrollments: store.course_enrollment_repo(),
    };
    enroll.execute(student.id, course.id).await.unwrap();
    let second = enroll.execute(student.id, course.id).await;
    assert!(matches!(second, Err(RegistryError::AlreadyEnrolled)));
    assert_eq!(store.course_enrollments.lock().unwrap().len(), 1);

    // The student's course list now includes CS101.
    let list = ListCoursesUseCase {
        users: store.user_repo(),
        courses: store.course_repo(),
    };
    let listed = list
        .execute(student.id, PageRequest::default())
        .await
        .unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].id, course.id);

    // After unenrolling, the enrollment-scoped list is empty again.
    let unenroll = UnenrollFromCourseUseCase {
        users: store.user_repo(),
        enrollments: store.course_enrollment_repo(),
    };
    unenroll.execute(student.id, course.id).await.unwrap();

    let listed = list
        .execute(student.id, PageRequest::default())
        .await
        .unwrap();
    assert!(listed.is_empty());

    // The teacher still sees the course through the taught-by scope.
    let taught = list
        .execute(teacher.id, PageRequest::default())
        .await
        .unwrap();
    assert_eq!(taught.len(), 1);

    // The admin sees everything.
    let all = list.execute(admin.id, PageRequest::default()).await.unwrap();
    assert_eq!(all.len(), 1);
}

#[tokio::test]
async fn should_hide_other_teachers_courses_from_taught_scope() {
    let store = TestStore::new();
    let admin = store.seed_user(user_fixture(UserRole::Admin, "admin@example.com"));
    let teacher_a = store.seed_user(user_fixture(UserRole::Teacher, "a@example.com"));
    let teacher_b = store.seed_user(user_fixture(UserRole::Teacher, "b@example.com"));

    let create = CreateCourseUseCase {
        users: store.user_repo(),
        courses: store.course_repo(),
    };
    create
        .execute(
            admin.id,
            CreateCourseInput {
                course_code: "CS101".into(),
                title: "Intro".into(),
                description: None,
                teacher_id: Some(teacher_a.id),
            },
        )
        .await
        .unwrap();

    let list = ListCoursesUseCase {
        users: store.user_repo(),
        courses: store.course_repo(),
    };
    let seen_by_b = list
        .execute(teacher_b.id, PageRequest::default())
        .await
        .unwrap();
    assert!(seen_by_b.is_empty());
}
