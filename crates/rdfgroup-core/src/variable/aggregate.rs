use crate::variable::AggregateDef;
use std::fmt;

///
/// AggregateKind
///
/// SPARQL 1.1 set functions.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum AggregateKind {
    Count,
    Sum,
    Avg,
    Min,
    Max,
    Sample,
    GroupConcat,
}

impl AggregateKind {
    #[must_use]
    pub const fn keyword(self) -> &'static str {
        match self {
            Self::Count => "COUNT",
            Self::Sum => "SUM",
            Self::Avg => "AVG",
            Self::Min => "MIN",
            Self::Max => "MAX",
            Self::Sample => "SAMPLE",
            Self::GroupConcat => "GROUP_CONCAT",
        }
    }
}

///
/// AggregateArgument
///
/// `*` is only reachable through `AggregateFunction::count_star`.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum AggregateArgument {
    Star,
    Expression(String),
}

impl fmt::Display for AggregateArgument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Star => f.write_str("*"),
            Self::Expression(text) => f.write_str(text),
        }
    }
}

///
/// AggregateFunction
///
/// Descriptor of one aggregate call. Carries the argument as query text only;
/// evaluating it over a group happens elsewhere.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AggregateFunction {
    kind: AggregateKind,
    argument: AggregateArgument,
    distinct: bool,
    separator: Option<String>,
}

impl AggregateFunction {
    const fn with_argument(kind: AggregateKind, argument: AggregateArgument) -> Self {
        Self {
            kind,
            argument,
            distinct: false,
            separator: None,
        }
    }

    fn over(kind: AggregateKind, expression: impl Into<String>) -> Self {
        Self::with_argument(kind, AggregateArgument::Expression(expression.into()))
    }

    #[must_use]
    pub const fn count_star() -> Self {
        Self::with_argument(AggregateKind::Count, AggregateArgument::Star)
    }

    #[must_use]
    pub fn count(expression: impl Into<String>) -> Self {
        Self::over(AggregateKind::Count, expression)
    }

    #[must_use]
    pub fn sum(expression: impl Into<String>) -> Self {
        Self::over(AggregateKind::Sum, expression)
    }

    #[must_use]
    pub fn avg(expression: impl Into<String>) -> Self {
        Self::over(AggregateKind::Avg, expression)
    }

    #[must_use]
    pub fn min(expression: impl Into<String>) -> Self {
        Self::over(AggregateKind::Min, expression)
    }

    #[must_use]
    pub fn max(expression: impl Into<String>) -> Self {
        Self::over(AggregateKind::Max, expression)
    }

    #[must_use]
    pub fn sample(expression: impl Into<String>) -> Self {
        Self::over(AggregateKind::Sample, expression)
    }

    /// `GROUP_CONCAT`; without a separator the function defaults to a single space.
    #[must_use]
    pub fn group_concat(expression: impl Into<String>, separator: Option<String>) -> Self {
        Self {
            separator,
            ..Self::over(AggregateKind::GroupConcat, expression)
        }
    }

    #[must_use]
    pub const fn distinct(mut self) -> Self {
        self.distinct = true;
        self
    }

    #[must_use]
    pub const fn kind(&self) -> AggregateKind {
        self.kind
    }

    #[must_use]
    pub const fn argument(&self) -> &AggregateArgument {
        &self.argument
    }

    #[must_use]
    pub const fn is_distinct(&self) -> bool {
        self.distinct
    }

    #[must_use]
    pub fn separator(&self) -> Option<&str> {
        self.separator.as_deref()
    }
}

impl AggregateDef for AggregateFunction {}

impl fmt::Display for AggregateFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(", self.kind.keyword())?;
        if self.distinct {
            f.write_str("DISTINCT ")?;
        }
        write!(f, "{}", self.argument)?;

        if let Some(separator) = &self.separator {
            f.write_str(" ; SEPARATOR=\"")?;
            for ch in separator.chars() {
                match ch {
                    '"' => f.write_str("\\\"")?,
                    '\\' => f.write_str("\\\\")?,
                    _ => write!(f, "{ch}")?,
                }
            }
            f.write_str("\"")?;
        }

        f.write_str(")")
    }
}
