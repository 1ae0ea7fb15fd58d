use axum::{
    Router,
    routing::{delete, get, patch, post},
};
use tower_http::trace::TraceLayer;

use campus_core::health::{healthz, readyz};
use campus_core::middleware::request_id_layer;

use crate::handlers::{
    auth::{login, logout, refresh},
    class::{
        create_class, delete_class, enroll_class, get_class, list_classes, unenroll_class,
        update_class,
    },
    course::{
        create_course, delete_course, enroll_course, get_course, list_courses, unenroll_course,
        update_course,
    },
    user::{create_user, delete_user, get_me, get_user, list_users, update_me, update_user},
};
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Health
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        // Auth
        .route("/auth/login", post(login))
        .route("/auth/refresh", post(refresh))
        .route("/auth/logout", post(logout))
        .route("/auth/me", get(get_me))
        // Users
        .route("/users", get(list_users))
        .route("/users", post(create_user))
        .route("/users/me", get(get_me))
        .route("/users/me", patch(update_me))
        .route("/users/{user_id}", get(get_user))
        .route("/users/{user_id}", patch(update_user))
        .route("/users/{user_id}", delete(delete_user))
        // Courses
        .route("/courses", get(list_courses))
        .route("/courses", post(create_course))
        .route("/courses/{course_id}", get(get_course))
        .route("/courses/{course_id}", patch(update_course))
        .route("/courses/{course_id}", delete(delete_course))
        .route("/courses/{course_id}/enroll", post(enroll_course))
        .route("/courses/{course_id}/enroll", delete(unenroll_course))
        // Classes
        .route("/classes", get(list_classes))
        .route("/classes", post(create_class))
        .route("/classes/{class_id}", get(get_class))
        .route("/classes/{class_id}", patch(update_class))
        .route("/classes/{class_id}", delete(delete_class))
        .route("/classes/{class_id}/enroll", post(enroll_class))
        .route("/classes/{class_id}/enroll", delete(unenroll_class))
        .layer(TraceLayer::new_for_http())
        .layer(request_id_layer())
        .with_state(state)
}
