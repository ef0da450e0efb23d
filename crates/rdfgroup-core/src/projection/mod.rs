//! Module: projection
//! Responsibility: turn finished groups into result rows using variable
//! descriptors to decide where each column's value comes from.
//! Does not own: aggregate/expression evaluation (assignments must already
//! be recorded on each group) or result serialization.


use crate::{
    grouping::SolutionSource,
    group::Group,
    obs::sink::{MetricsEvent, record},
    value::Term,
    variable::{Variable, VariableKind},
};
use thiserror::Error as ThisError;

///
/// ProjectionError
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum ProjectionError {
    #[error("derived variable ?{variable} has no value assigned in its group")]
    Unassigned { variable: String },
}

///
/// ProjectedRow
///
/// One output row: result variables in projection order, each possibly unbound.
///

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct ProjectedRow {
    columns: Vec<(String, Option<Term>)>,
}

impl ProjectedRow {
    #[must_use]
    pub fn get(&self, variable: &str) -> Option<&Term> {
        self.columns
            .iter()
            .find(|(name, _)| name == variable)
            .and_then(|(_, value)| value.as_ref())
    }

    pub fn columns(&self) -> impl Iterator<Item = (&str, Option<&Term>)> {
        self.columns
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_ref()))
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.columns.len()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

/// Project one row per group.
///
/// Aggregate and expression variables read the group's assignment. Plain
/// result variables prefer a group assignment (a GROUP BY alias), which may
/// be explicitly unbound, and otherwise fall back to the binding of the
/// group's first member.
pub fn project<S>(
    groups: &[Group],
    variables: &[Variable],
    source: &S,
) -> Result<Vec<ProjectedRow>, ProjectionError>
where
    S: SolutionSource + ?Sized,
{
    let rows = groups
        .iter()
        .map(|group| project_group(group, variables, source))
        .collect::<Result<Vec<_>, _>>()?;

    record(MetricsEvent::ProjectionFinish {
        rows: rows.len() as u64,
    });

    Ok(rows)
}

fn project_group<S>(
    group: &Group,
    variables: &[Variable],
    source: &S,
) -> Result<ProjectedRow, ProjectionError>
where
    S: SolutionSource + ?Sized,
{
    let mut columns = Vec::new();

    for variable in variables.iter().filter(|variable| variable.is_result()) {
        let name = variable.name();
        let value = match variable.kind() {
            VariableKind::Aggregate(_) | VariableKind::Expression(_) => {
                if !group.is_assigned(name) {
                    return Err(ProjectionError::Unassigned {
                        variable: name.to_string(),
                    });
                }
                group.assignment(name).cloned()
            }
            VariableKind::Plain { .. } if group.is_assigned(name) => {
                group.assignment(name).cloned()
            }
            VariableKind::Plain { .. } => group
                .members()
                .next()
                .and_then(|first| source.binding(first, name))
                .cloned(),
        };

        columns.push((name.to_string(), value));
    }

    Ok(ProjectedRow { columns })
}
