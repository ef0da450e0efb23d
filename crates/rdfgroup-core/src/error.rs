use crate::{
    group::AssignmentError, grouping::GroupingError, projection::ProjectionError,
};
use std::fmt;
use thiserror::Error as ThisError;

///
/// InternalError
///
/// Structured runtime error with a stable internal classification.
/// Not a stable API; intended for internal use and may change without notice.
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
#[error("{message}")]
pub struct InternalError {
    pub class: ErrorClass,
    pub origin: ErrorOrigin,
    pub message: String,
}

impl InternalError {
    pub fn new(class: ErrorClass, origin: ErrorOrigin, message: impl Into<String>) -> Self {
        Self {
            class,
            origin,
            message: message.into(),
        }
    }

    /// Construct a group-origin invariant violation.
    pub(crate) fn group_invariant(message: impl Into<String>) -> Self {
        Self::new(
            ErrorClass::InvariantViolation,
            ErrorOrigin::Group,
            message.into(),
        )
    }

    /// Construct a grouping-origin hard-limit failure.
    pub(crate) fn grouping_limit(message: impl Into<String>) -> Self {
        Self::new(
            ErrorClass::LimitExceeded,
            ErrorOrigin::Grouping,
            message.into(),
        )
    }

    /// Construct a projection-origin invariant violation.
    pub(crate) fn projection_invariant(message: impl Into<String>) -> Self {
        Self::new(
            ErrorClass::InvariantViolation,
            ErrorOrigin::Projection,
            message.into(),
        )
    }

    #[must_use]
    pub fn display_with_class(&self) -> String {
        format!("{}:{}: {}", self.origin, self.class, self.message)
    }
}

impl From<AssignmentError> for InternalError {
    fn from(err: AssignmentError) -> Self {
        Self::group_invariant(err.to_string())
    }
}

impl From<GroupingError> for InternalError {
    fn from(err: GroupingError) -> Self {
        match err {
            GroupingError::Assignment(inner) => inner.into(),
            GroupingError::GroupLimitExceeded { .. } => Self::grouping_limit(err.to_string()),
        }
    }
}

impl From<ProjectionError> for InternalError {
    fn from(err: ProjectionError) -> Self {
        Self::projection_invariant(err.to_string())
    }
}

///
/// ErrorClass
/// Internal error taxonomy for runtime classification.
/// Not a stable API; may change without notice.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ErrorClass {
    InvariantViolation,
    LimitExceeded,
}

impl fmt::Display for ErrorClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::InvariantViolation => "invariant_violation",
            Self::LimitExceeded => "limit_exceeded",
        };
        write!(f, "{label}")
    }
}

///
/// ErrorOrigin
/// Internal origin taxonomy for runtime classification.
/// Not a stable API; may change without notice.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ErrorOrigin {
    Group,
    Grouping,
    Projection,
}

impl fmt::Display for ErrorOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Group => "group",
            Self::Grouping => "grouping",
            Self::Projection => "projection",
        };
        write!(f, "{label}")
    }
}

///
/// TESTS
///
