use crate::{
    select::Selector,
    value::{Term, Triple},
};

///
/// IsBlankNode
///

#[derive(Clone, Copy, Debug, Default)]
pub struct IsBlankNode;

impl Selector<Term> for IsBlankNode {
    fn accepts(&self, item: &Term) -> bool {
        item.is_blank()
    }
}

///
/// IsNotBlankNode
///

#[derive(Clone, Copy, Debug, Default)]
pub struct IsNotBlankNode;

impl Selector<Term> for IsNotBlankNode {
    fn accepts(&self, item: &Term) -> bool {
        !item.is_blank()
    }
}

///
/// IsSpecificBlankNode
///
/// Accepts exactly one blank node, compared by label.
///

#[derive(Clone, Debug)]
pub struct IsSpecificBlankNode {
    label: String,
}

impl IsSpecificBlankNode {
    /// Accepts the label with or without its `_:` prefix.
    #[must_use]
    pub fn new(label: impl AsRef<str>) -> Self {
        let label = label.as_ref();
        Self {
            label: label.strip_prefix("_:").unwrap_or(label).to_string(),
        }
    }

    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }
}

impl Selector<Term> for IsSpecificBlankNode {
    fn accepts(&self, item: &Term) -> bool {
        item.blank_label() == Some(self.label.as_str())
    }
}

///
/// HasBlankNode
///
/// Accepts statements with a blank node in any position.
///

#[derive(Clone, Copy, Debug, Default)]
pub struct HasBlankNode;

impl Selector<Triple> for HasBlankNode {
    fn accepts(&self, item: &Triple) -> bool {
        item.terms().any(Term::is_blank)
    }
}

///
/// HasNoBlankNode
///

#[derive(Clone, Copy, Debug, Default)]
pub struct HasNoBlankNode;

impl Selector<Triple> for HasNoBlankNode {
    fn accepts(&self, item: &Triple) -> bool {
        !HasBlankNode.accepts(item)
    }
}

///
/// MentionsBlankNode
///
/// Accepts statements that use one specific blank node in any position.
///

#[derive(Clone, Debug)]
pub struct MentionsBlankNode {
    node: IsSpecificBlankNode,
}

impl MentionsBlankNode {
    #[must_use]
    pub fn new(label: impl AsRef<str>) -> Self {
        Self {
            node: IsSpecificBlankNode::new(label),
        }
    }

    #[must_use]
    pub fn label(&self) -> &str {
        self.node.label()
    }
}

impl Selector<Triple> for MentionsBlankNode {
    fn accepts(&self, item: &Triple) -> bool {
        item.terms().any(|term| self.node.accepts(term))
    }
}
