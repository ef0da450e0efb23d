//! Module: variable
//! Responsibility: descriptors for the output variables of a result projection.
//! Does not own: aggregate or expression evaluation.
//! Boundary: built once during algebra construction, read during projection.

mod aggregate;
mod expression;


use std::{fmt, sync::Arc};

// re-exports
pub use aggregate::{AggregateArgument, AggregateFunction, AggregateKind};
pub use expression::ExpressionText;

///
/// AggregateDef
///
/// An aggregate function definition. `Display` renders its query text.
///

pub trait AggregateDef: fmt::Debug + fmt::Display + Send + Sync {}

///
/// ExpressionDef
///
/// A scalar expression definition. `Display` renders its query text.
///

pub trait ExpressionDef: fmt::Debug + fmt::Display + Send + Sync {}

///
/// VariableKind
///
/// How an output variable obtains its value. Aggregate and expression
/// variables are always part of the result set.
///

#[derive(Clone, Debug)]
pub enum VariableKind {
    Plain { result: bool },
    Aggregate(Arc<dyn AggregateDef>),
    Expression(Arc<dyn ExpressionDef>),
}

///
/// Variable
///

#[derive(Clone, Debug)]
pub struct Variable {
    name: String,
    kind: VariableKind,
}

impl Variable {
    /// Pattern variable that is not selected for output.
    #[must_use]
    pub fn new_plain(name: impl AsRef<str>) -> Self {
        Self::with_kind(name, VariableKind::Plain { result: false })
    }

    /// Selected variable whose value comes straight from a solution binding.
    #[must_use]
    pub fn new_result(name: impl AsRef<str>) -> Self {
        Self::with_kind(name, VariableKind::Plain { result: true })
    }

    #[must_use]
    pub fn new_aggregate(name: impl AsRef<str>, aggregate: impl AggregateDef + 'static) -> Self {
        Self::with_kind(name, VariableKind::Aggregate(Arc::new(aggregate)))
    }

    #[must_use]
    pub fn new_expression(name: impl AsRef<str>, expression: impl ExpressionDef + 'static) -> Self {
        Self::with_kind(name, VariableKind::Expression(Arc::new(expression)))
    }

    /// Build from an already-shared kind, e.g. one aggregate reused by
    /// several descriptors.
    #[must_use]
    pub fn with_kind(name: impl AsRef<str>, kind: VariableKind) -> Self {
        Self {
            name: normalize_name(name.as_ref()).to_string(),
            kind,
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub const fn kind(&self) -> &VariableKind {
        &self.kind
    }

    #[must_use]
    pub const fn is_result(&self) -> bool {
        match self.kind {
            VariableKind::Plain { result } => result,
            VariableKind::Aggregate(_) | VariableKind::Expression(_) => true,
        }
    }

    #[must_use]
    pub const fn is_aggregate(&self) -> bool {
        matches!(self.kind, VariableKind::Aggregate(_))
    }

    #[must_use]
    pub const fn is_projection(&self) -> bool {
        matches!(self.kind, VariableKind::Expression(_))
    }

    #[must_use]
    pub fn aggregate(&self) -> Option<&dyn AggregateDef> {
        match &self.kind {
            VariableKind::Aggregate(aggregate) => Some(aggregate.as_ref()),
            _ => None,
        }
    }

    #[must_use]
    pub fn projection(&self) -> Option<&dyn ExpressionDef> {
        match &self.kind {
            VariableKind::Expression(expression) => Some(expression.as_ref()),
            _ => None,
        }
    }

    /// Canonical query text for diagnostics.
    #[must_use]
    pub fn render(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Variable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            VariableKind::Plain { .. } => write!(f, "?{}", self.name),
            VariableKind::Aggregate(aggregate) => write!(f, "({aggregate} AS ?{})", self.name),
            VariableKind::Expression(expression) => {
                write!(f, "({expression} AS ?{})", self.name)
            }
        }
    }
}

/// Drop one leading `?` or `$` marker from a variable name.
#[must_use]
pub fn normalize_name(name: &str) -> &str {
    name.strip_prefix('?')
        .or_else(|| name.strip_prefix('$'))
        .unwrap_or(name)
}
