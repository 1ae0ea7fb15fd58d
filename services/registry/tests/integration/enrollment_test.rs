//! Enrollment uniqueness and lifecycle against the in-memory store.

use campus_domain::user::UserRole;

use campus_registry::error::RegistryError;
use campus_registry::usecase::enrollment::{
    EnrollInClassUseCase, EnrollInCourseUseCase, UnenrollFromClassUseCase,
    UnenrollFromCourseUseCase,
};

use crate::helpers::{TestStore, class_fixture, course_fixture, user_fixture};

#[tokio::test]
async fn should_store_exactly_one_row_for_sixteen_concurrent_enrolls() {
    let store = TestStore::new();
    let student = store.seed_user(user_fixture(UserRole::Student, "student@example.com"));
    let course = store.seed_course(course_fixture("CS101", None));

    let mut handles = Vec::new();
    for _ in 0..16 {
        let store = store.clone();
        let student_id = student.id;
        let course_id = course.id;
        handles.push(tokio::spawn(async move {
            let uc = EnrollInCourseUseCase {
                users: store.user_repo(),
                courses: store.course_repo(),
                enrollments: store.course_enrollment_repo(),
            };
            uc.execute(student_id, course_id).await
        }));
    }

    let mut ok = 0;
    let mut conflicts = 0;
    for handle in handles {
        match handle.await.unwrap() {
            Ok(_) => ok += 1,
            Err(RegistryError::AlreadyEnrolled) => conflicts += 1,
            Err(other) => panic!("unexpected error: {other:?}"),
        }
    }

    assert_eq!(ok, 1);
    assert_eq!(conflicts, 15);
    assert_eq!(store.course_enrollments.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn should_allow_same_student_in_different_courses() {
    let store = TestStore::new();
    let student = store.seed_user(user_fixture(UserRole::Student, "student@example.com"));
    let first = store.seed_course(course_fixture("CS101", None));
    let second = store.seed_course(course_fixture("CS102", None));

    let uc = EnrollInCourseUseCase {
        users: store.user_repo(),
        courses: store.course_repo(),
        enrollments: store.course_enrollment_repo(),
    };
    uc.execute(student.id, first.id).await.unwrap();
    uc.execute(student.id, second.id).await.unwrap();

    assert_eq!(store.course_enrollments.lock().unwrap().len(), 2);
}

#[tokio::test]
async fn should_allow_different_students_in_same_course() {
    let store = TestStore::new();
    let alice = store.seed_user(user_fixture(UserRole::Student, "alice@example.com"));
    let bob = store.seed_user(user_fixture(UserRole::Student, "bob@example.com"));
    let course = store.seed_course(course_fixture("CS101", None));

    let uc = EnrollInCourseUseCase {
        users: store.user_repo(),
        courses: store.course_repo(),
        enrollments: store.course_enrollment_repo(),
    };
    uc.execute(alice.id, course.id).await.unwrap();
    uc.execute(bob.id, course.id).await.unwrap();

    assert_eq!(store.course_enrollments.lock().unwrap().len(), 2);
}

#[tokio::test]
async fn should_enforce_class_enrollment_uniqueness() {
    let store = TestStore::new();
    let teacher = store.seed_user(user_fixture(UserRole::Teacher, "teacher@example.com"));
    let student = store.seed_user(user_fixture(UserRole::Student, "student@example.com"));
    let course = store.seed_course(course_fixture("CS101", Some(teacher.id)));
    let class = store.seed_class(class_fixture(course.id, teacher.id, "001"));

    let uc = EnrollInClassUseCase {
        users: store.user_repo(),
        classes: store.class_repo(),
        enrollments: store.class_enrollment_repo(),
    };
    let enrollment = uc.execute(student.id, class.id).await.unwrap();
    assert_eq!(enrollment.class_id, class.id);

    let second = uc.execute(student.id, class.id).await;
    assert!(matches!(second, Err(RegistryError::AlreadyEnrolled)));
    assert_eq!(store.class_enrollments.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn should_report_not_found_for_unenroll_without_enrollment() {
    let store = TestStore::new();
    let student = store.seed_user(user_fixture(UserRole::Student, "student@example.com"));
    let course = store.seed_course(course_fixture("CS101", None));

    let uc = UnenrollFromCourseUseCase {
        users: store.user_repo(),
        enrollments: store.course_enrollment_repo(),
    };
    let result = uc.execute(student.id, course.id).await;
    assert!(matches!(result, Err(RegistryError::EnrollmentNotFound)));
}

#[tokio::test]
async fn should_unenroll_from_class_then_report_not_found() {
    let store = TestStore::new();
    let teacher = store.seed_user(user_fixture(UserRole::Teacher, "teacher@example.com"));
    let student = store.seed_user(user_fixture(UserRole::Student, "student@example.com"));
    let course = store.seed_course(course_fixture("CS101", Some(teacher.id)));
    let class = store.seed_class(class_fixture(course.id, teacher.id, "001"));

    let enroll = EnrollInClassUseCase {
        users: store.user_repo(),
        classes: store.class_repo(),
        enrollments: store.class_enrollment_repo(),
    };
    enroll.execute(student.id, class.id).await.unwrap();

    let unenroll = UnenrollFromClassUseCase {
        users: store.user_repo(),
        enrollments: store.class_enrollment_repo(),
    };
    unenroll.execute(student.id, class.id).await.unwrap();
    assert!(store.class_enrollments.lock().unwrap().is_empty());

    let repeat = unenroll.execute(student.id, class.id).await;
    assert!(matches!(repeat, Err(RegistryError::EnrollmentNotFound)));
}

#[tokio::test]
async fn should_forbid_teacher_self_enrollment_in_own_class() {
    let store = TestStore::new();
    let teacher = store.seed_user(user_fixture(UserRole::Teacher, "teacher@example.com"));
    let course = store.seed_course(course_fixture("CS101", Some(teacher.id)));
    let class = store.seed_class(class_fixture(course.id, teacher.id, "001"));

    let uc = EnrollInClassUseCase {
        users: store.user_repo(),
        classes: store.class_repo(),
        enrollments: store.class_enrollment_repo(),
    };
    let result = uc.execute(teacher.id, class.id).await;
    assert!(matches!(result, Err(RegistryError::Forbidden)));
}
