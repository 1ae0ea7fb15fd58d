//! Authorization policy.
//!
//! `decide` is a pure function over (actor, action) — no IO, no store
//! access, no mutation. Every mutating usecase consults it before
//! touching the store; a denial aborts the operation with `Forbidden`
//! and no side effect. List endpoints use [`catalog_scope`] instead:
//! scoping narrows the result set rather than denying the request.

use uuid::Uuid;

use campus_domain::user::UserRole;

use crate::domain::types::{Class, Course, User};

/// Everything the policy can be asked to approve.
///
/// Targets are carried by reference so ownership checks (course
/// teacher, profile self-access) stay inside the decision table.
#[derive(Debug)]
pub enum Action<'a> {
    CreateUser,
    ListUsers,
    ViewUser { user_id: Uuid },
    UpdateUser { user_id: Uuid },
    DeleteUser { user_id: Uuid },
    CreateCourse,
    UpdateCourse { course: &'a Course },
    DeleteCourse { course: &'a Course },
    CreateClass,
    UpdateClass { class: &'a Class },
    DeleteClass { class: &'a Class },
    EnrollSelf,
    UnenrollSelf,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Allow,
    Deny,
}

impl Decision {
    pub fn is_allow(self) -> bool {
        self == Decision::Allow
    }
}

fn allow_if(condition: bool) -> Decision {
    if condition { Decision::Allow } else { Decision::Deny }
}

/// The decision table. Roles are a flat set; every cell is spelled out
/// here rather than derived from a hierarchy.
pub fn decide(actor: &User, action: &Action<'_>) -> Decision {
    use UserRole::*;

    match action {
        Action::CreateUser | Action::ListUsers | Action::DeleteUser { .. } => {
            allow_if(actor.role == Admin)
        }
        Action::ViewUser { user_id } | Action::UpdateUser { user_id } => {
            allow_if(actor.role == Admin || actor.id == *user_id)
        }
        Action::CreateCourse => allow_if(actor.role == Admin),
        Action::UpdateCourse { course } | Action::DeleteCourse { course } => allow_if(
            actor.role == Admin
                || (actor.role == Teacher && course.teacher_id == Some(actor.id)),
        ),
        // Class mutation is admin-only; the assigned teacher is not granted.
        Action::CreateClass | Action::UpdateClass { .. } | Action::DeleteClass { .. } => {
            allow_if(actor.role == Admin)
        }
        Action::EnrollSelf | Action::UnenrollSelf => allow_if(actor.role == Student),
    }
}

/// How a catalog list is narrowed for the actor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListScope {
    /// Every row (admins).
    All,
    /// Rows where the actor is the assigned teacher.
    TaughtBy(Uuid),
    /// Rows reachable via the actor's active enrollments.
    EnrolledBy(Uuid),
}

pub fn catalog_scope(actor: &User) -> ListScope {
    match actor.role {
        UserRole::Admin => ListScope::All,
        UserRole::Teacher => ListScope::TaughtBy(actor.id),
        UserRole::Student => ListScope::EnrolledBy(actor.id),
    }
}
