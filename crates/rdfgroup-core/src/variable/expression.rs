use crate::variable::ExpressionDef;
use derive_more::{Deref, Display};

///
/// ExpressionText
///
/// Scalar expression held as its query text. Nothing here evaluates it.
///

#[derive(Clone, Debug, Deref, Display, Eq, PartialEq)]
pub struct ExpressionText(String);

impl ExpressionText {
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }
}

impl ExpressionDef for ExpressionText {}

impl From<&str> for ExpressionText {
    fn from(text: &str) -> Self {
        Self::new(text)
    }
}
