//! Module: grouping
//! Responsibility: partition solution ids into groups for a GROUP BY clause,
//! refining parent groups into children one condition at a time.
//! Does not own: binding storage, key expression evaluation, or aggregates.
//! Boundary: reads bindings through `SolutionSource`, emits `Group`s.

mod config;

#[cfg(test)]
mod tests;

use crate::{
    group::{AssignmentError, Group, SolutionId},
    obs::sink::{MetricsEvent, record},
    value::Term,
    variable::normalize_name,
};
use std::collections::BTreeMap;
use thiserror::Error as ThisError;

// re-exports
pub use config::GroupingConfig;

///
/// SolutionSource
///
/// Read access to the variable bindings of candidate solutions.
///

pub trait SolutionSource {
    fn binding(&self, id: SolutionId, variable: &str) -> Option<&Term>;
}

impl SolutionSource for BTreeMap<SolutionId, BTreeMap<String, Term>> {
    fn binding(&self, id: SolutionId, variable: &str) -> Option<&Term> {
        self.get(&id).and_then(|row| row.get(variable))
    }
}

///
/// GroupingError
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum GroupingError {
    #[error(transparent)]
    Assignment(#[from] AssignmentError),

    #[error("grouping exceeded the hard limit of {limit} groups")]
    GroupLimitExceeded { limit: u64 },
}

///
/// GroupCondition
///
/// One GROUP BY key: `?var`, or `(?var AS ?alias)` when the key value is
/// also bound to an output variable of each group.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct GroupCondition {
    variable: String,
    alias: Option<String>,
}

impl GroupCondition {
    #[must_use]
    pub fn variable(name: impl AsRef<str>) -> Self {
        Self {
            variable: normalize_name(name.as_ref()).to_string(),
            alias: None,
        }
    }

    #[must_use]
    pub fn with_alias(mut self, alias: impl AsRef<str>) -> Self {
        self.alias = Some(normalize_name(alias.as_ref()).to_string());
        self
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.variable
    }

    #[must_use]
    pub fn alias(&self) -> Option<&str> {
        self.alias.as_deref()
    }
}

///
/// GroupBy
///

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct GroupBy {
    conditions: Vec<GroupCondition>,
    config: GroupingConfig,
}

impl GroupBy {
    #[must_use]
    pub fn new(conditions: impl IntoIterator<Item = GroupCondition>) -> Self {
        Self {
            conditions: conditions.into_iter().collect(),
            config: GroupingConfig::default(),
        }
    }

    #[must_use]
    pub const fn with_config(mut self, config: GroupingConfig) -> Self {
        self.config = config;
        self
    }

    #[must_use]
    pub fn conditions(&self) -> &[GroupCondition] {
        &self.conditions
    }

    #[must_use]
    pub const fn config(&self) -> GroupingConfig {
        self.config
    }

    /// Partition `ids` into groups.
    ///
    /// Without conditions every id lands in one implicit group, which exists
    /// even for an empty input. Within each parent, groups with a bound key
    /// are ordered by first occurrence of that key and members keep input
    /// order. Unbound keys share one group, placed after the bound ones, and
    /// an alias is assigned as explicitly unbound there.
    pub fn apply<S>(
        &self,
        ids: impl IntoIterator<Item = SolutionId>,
        source: &S,
    ) -> Result<Vec<Group>, GroupingError>
    where
        S: SolutionSource + ?Sized,
    {
        record(MetricsEvent::GroupingStart {
            conditions: self.conditions.len() as u64,
        });

        let mut root = Group::new();
        for id in ids {
            root.add_member(id);
        }
        let solutions = root.len() as u64;

        let result = self.partition(root, source);
        match &result {
            Ok(groups) => record(MetricsEvent::GroupingFinish {
                solutions,
                groups: groups.len() as u64,
            }),
            Err(GroupingError::Assignment(_)) => record(MetricsEvent::AssignmentRejected),
            Err(GroupingError::GroupLimitExceeded { .. }) => {}
        }

        result
    }

    fn partition<S>(&self, root: Group, source: &S) -> Result<Vec<Group>, GroupingError>
    where
        S: SolutionSource + ?Sized,
    {
        let mut groups = vec![root];
        self.ensure_within_limit(groups.len())?;

        for condition in &self.conditions {
            let mut refined = Vec::new();
            for parent in &groups {
                self.refine(parent, condition, source, &mut refined)?;
            }
            groups = refined;
        }

        Ok(groups)
    }

    // Split one parent by `condition`, appending children to `out`. Bound
    // keys keep first-occurrence order; the unbound-key child comes last.
    fn refine<S>(
        &self,
        parent: &Group,
        condition: &GroupCondition,
        source: &S,
        out: &mut Vec<Group>,
    ) -> Result<(), GroupingError>
    where
        S: SolutionSource + ?Sized,
    {
        let mut slots: BTreeMap<&Term, usize> = BTreeMap::new();
        let mut bound: Vec<(&Term, Group)> = Vec::new();
        let mut unbound: Option<Group> = None;

        for id in parent.members() {
            let child = match source.binding(id, condition.name()) {
                Some(key) => {
                    let slot = if let Some(&slot) = slots.get(key) {
                        slot
                    } else {
                        let open = bound.len() + usize::from(unbound.is_some());
                        self.ensure_within_limit(out.len() + open + 1)?;
                        bound.push((key, Group::new_child(parent)));
                        slots.insert(key, bound.len() - 1);
                        bound.len() - 1
                    };
                    &mut bound[slot].1
                }
                None => {
                    if unbound.is_none() {
                        self.ensure_within_limit(out.len() + bound.len() + 1)?;
                    }
                    unbound.get_or_insert_with(|| Group::new_child(parent))
                }
            };
            child.add_member(id);
        }

        for (key, mut child) in bound {
            if let Some(alias) = condition.alias() {
                child.assign(alias, key.clone())?;
            }
            out.push(child);
        }
        if let Some(mut child) = unbound {
            if let Some(alias) = condition.alias() {
                child.assign_unbound(alias)?;
            }
            out.push(child);
        }

        Ok(())
    }

    fn ensure_within_limit(&self, groups: usize) -> Result<(), GroupingError> {
        let limit = self.config.max_groups();
        if groups as u64 > limit {
            return Err(GroupingError::GroupLimitExceeded { limit });
        }

        Ok(())
    }
}
