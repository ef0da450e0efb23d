//! Module: group
//! Responsibility: one GROUP BY partition of solution ids plus its per-group
//! variable assignments.
//! Does not own: partitioning policy, aggregate evaluation, or binding storage.
//! Boundary: produced by the grouping driver, read by result projection.


use crate::{value::Term, variable::normalize_name};
use derive_more::{Display, From};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error as ThisError;

///
/// SolutionId
///
/// Opaque reference to one candidate solution row held by the evaluator.
///

#[derive(
    Clone,
    Copy,
    Debug,
    Deserialize,
    Display,
    Eq,
    From,
    Hash,
    Ord,
    PartialEq,
    PartialOrd,
    Serialize,
)]
pub struct SolutionId(u64);

impl SolutionId {
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

///
/// AssignmentError
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum AssignmentError {
    #[error("variable ?{variable} is already assigned a value in this group")]
    AlreadyAssigned { variable: String },
}

///
/// Group
///
/// Ordered solution membership plus at-most-once variable assignments.
/// Membership is not deduplicated; keeping one solution in one group is the
/// grouping driver's job.
///
/// Assignment keys are normalized variable names, so `?x`, `$x` and `x`
/// name one variable. A variable may be assigned as explicitly unbound.
///

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Group {
    members: Vec<SolutionId>,
    assignments: BTreeMap<String, Option<Term>>,
}

impl Group {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            members: Vec::new(),
            assignments: BTreeMap::new(),
        }
    }

    /// Start a sub-group of `parent`: no members, and an owned copy of the
    /// parent's assignments taken at this instant.
    #[must_use]
    pub fn new_child(parent: &Self) -> Self {
        Self {
            members: Vec::new(),
            assignments: parent.assignments.clone(),
        }
    }

    pub fn add_member(&mut self, id: SolutionId) {
        self.members.push(id);
    }

    /// Member ids in insertion order. The iterator is cheap to clone, so
    /// callers can restart it.
    pub fn members(&self) -> impl Iterator<Item = SolutionId> + Clone + '_ {
        self.members.iter().copied()
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.members.len()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    #[must_use]
    pub fn contains_member(&self, id: SolutionId) -> bool {
        self.members.contains(&id)
    }

    /// Record the value computed for `variable` in this group.
    ///
    /// A second assignment to the same variable is rejected and leaves the
    /// first value in place.
    pub fn assign(
        &mut self,
        variable: impl AsRef<str>,
        value: Term,
    ) -> Result<(), AssignmentError> {
        self.insert_assignment(variable.as_ref(), Some(value))
    }

    /// Record that `variable` has no value in this group.
    ///
    /// Counts as the variable's one assignment, so a later `assign` fails.
    pub fn assign_unbound(&mut self, variable: impl AsRef<str>) -> Result<(), AssignmentError> {
        self.insert_assignment(variable.as_ref(), None)
    }

    fn insert_assignment(
        &mut self,
        variable: &str,
        value: Option<Term>,
    ) -> Result<(), AssignmentError> {
        let variable = normalize_name(variable);
        if self.assignments.contains_key(variable) {
            return Err(AssignmentError::AlreadyAssigned {
                variable: variable.to_string(),
            });
        }

        self.assignments.insert(variable.to_string(), value);
        Ok(())
    }

    /// Assigned variables in name order; `None` marks an explicitly unbound one.
    pub fn assignments(&self) -> impl Iterator<Item = (&str, Option<&Term>)> + Clone + '_ {
        self.assignments
            .iter()
            .map(|(variable, value)| (variable.as_str(), value.as_ref()))
    }

    #[must_use]
    pub fn assignment(&self, variable: &str) -> Option<&Term> {
        self.assignments
            .get(normalize_name(variable))
            .and_then(Option::as_ref)
    }

    /// True once `variable` was assigned, bound or not.
    #[must_use]
    pub fn is_assigned(&self, variable: &str) -> bool {
        self.assignments.contains_key(normalize_name(variable))
    }
}

impl<'a> IntoIterator for &'a Group {
    type Item = SolutionId;
    type IntoIter = std::iter::Copied<std::slice::Iter<'a, SolutionId>>;

    fn into_iter(self) -> Self::IntoIter {
        self.members.iter().copied()
    }
}
