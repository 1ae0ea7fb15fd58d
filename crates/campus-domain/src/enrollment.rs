//! Enrollment lifecycle types.

use serde::{Deserialize, Serialize};

/// Lifecycle state of an enrollment record.
///
/// New enrollments always start as `Active`. Unenrolling deletes the
/// row rather than flipping to `Dropped`; the remaining states exist
/// for grading/completion flows that close out a term.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EnrollmentStatus {
    Active,
    Completed,
    Dropped,
}

impl EnrollmentStatus {
    /// Parse from the stored string form. Returns `None` for unknown values.
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "active" => Some(Self::Active),
            "completed" => Some(Self::Completed),
            "dropped" => Some(Self::Dropped),
            _ => None,
        }
    }

    /// Stored string form.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Completed => "completed",
            Self::Dropped => "dropped",
        }
    }
}
