use derive_more::Display;
use rdfgroup_core::{
    error::{ErrorClass, ErrorOrigin as CoreErrorOrigin, InternalError},
    group::AssignmentError,
    grouping::GroupingError,
    projection::ProjectionError,
};
use serde::{Deserialize, Serialize};
use thiserror::Error as ThisError;

///
/// Error
/// Public error type with a stable kind + origin taxonomy.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize, ThisError)]
#[error("{message}")]
pub struct Error {
    pub kind: ErrorKind,
    pub origin: ErrorOrigin,
    pub message: String,
}

impl Error {
    pub fn new(kind: ErrorKind, origin: ErrorOrigin, message: impl Into<String>) -> Self {
        Self {
            kind,
            origin,
            message: message.into(),
        }
    }
}

impl From<InternalError> for Error {
    fn from(err: InternalError) -> Self {
        let kind = match err.class {
            ErrorClass::InvariantViolation => ErrorKind::Query(QueryErrorKind::Invalid),
            ErrorClass::LimitExceeded => ErrorKind::Query(QueryErrorKind::LimitExceeded),
        };

        Self::new(kind, err.origin.into(), err.message)
    }
}

impl From<AssignmentError> for Error {
    fn from(err: AssignmentError) -> Self {
        InternalError::from(err).into()
    }
}

impl From<GroupingError> for Error {
    fn from(err: GroupingError) -> Self {
        InternalError::from(err).into()
    }
}

impl From<ProjectionError> for Error {
    fn from(err: ProjectionError) -> Self {
        InternalError::from(err).into()
    }
}

///
/// ErrorKind
/// Public error taxonomy for callers.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum ErrorKind {
    Query(QueryErrorKind),
}

///
/// QueryErrorKind
///

#[remain::sorted]
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum QueryErrorKind {
    /// The query is semantically invalid, e.g. one variable bound twice in a group.
    Invalid,

    /// Evaluation hit a configured hard limit.
    LimitExceeded,
}

///
/// ErrorOrigin
/// Public origin taxonomy for callers.
///

#[derive(Clone, Copy, Debug, Deserialize, Display, Eq, PartialEq, Serialize)]
pub enum ErrorOrigin {
    Group,
    Grouping,
    Projection,
}

impl From<CoreErrorOrigin> for ErrorOrigin {
    fn from(origin: CoreErrorOrigin) -> Self {
        match origin {
            CoreErrorOrigin::Group => Self::Group,
            CoreErrorOrigin::Grouping => Self::Grouping,
            CoreErrorOrigin::Projection => Self::Projection,
        }
    }
}

///
/// TESTS
///
