//! Core runtime for rdfgroup: GROUP BY partitions, output variable
//! descriptors, selectors, and the grouping/projection passes built on them.
#![warn(unreachable_pub)]

// public exports are one module level down
pub mod error;
pub mod group;
pub mod grouping;
pub mod obs;
pub mod projection;
pub mod select;
pub mod value;
pub mod variable;

///
/// Prelude
///
/// Prelude contains only domain vocabulary.
/// No errors, sinks, or helpers are re-exported here.
///

pub mod prelude {
    pub use crate::{
        group::{Group, SolutionId},
        grouping::{GroupBy, GroupCondition, SolutionSource},
        select::Selector,
        value::{Literal, Term, Triple},
        variable::{AggregateDef, ExpressionDef, Variable, VariableKind},
    };
}
