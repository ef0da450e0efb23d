//! ## Crate layout
//! - `core`: groups, variable descriptors, selectors, grouping and
//!   projection passes, and observability.
//! - `error`: the public error taxonomy returned to callers.
//!
//! The `prelude` module mirrors the vocabulary used by query evaluators.

pub use rdfgroup_core as core;

pub mod error;

//
// Consts
//

/// Workspace version re-export for downstream tooling/tests.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use error::Error;

///
/// Evaluator Prelude
/// using _ brings traits into scope and avoids name conflicts
///

pub mod prelude {
    pub use crate::core::{
        group::{Group, SolutionId},
        grouping::{GroupBy, GroupCondition, GroupingConfig, SolutionSource as _},
        projection::{ProjectedRow, project},
        select::{Selector as _, select},
        value::{Literal, Term, Triple},
        variable::{AggregateFunction, ExpressionText, Variable, VariableKind},
    };
    pub use crate::error::Error;
}
