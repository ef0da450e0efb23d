//! Module: select
//! Responsibility: the one-method predicate capability used to filter terms
//! and statements, plus the blank-node selectors built on it.
//! Does not own: graph storage or iteration order of the filtered source.

mod blank;


// re-exports
pub use blank::{
    HasBlankNode, HasNoBlankNode, IsBlankNode, IsNotBlankNode, IsSpecificBlankNode,
    MentionsBlankNode,
};

///
/// Selector
///
/// Accepts or rejects one item. Closures of shape `Fn(&T) -> bool` are
/// selectors too.
///

pub trait Selector<T: ?Sized> {
    fn accepts(&self, item: &T) -> bool;
}

impl<T: ?Sized, F> Selector<T> for F
where
    F: Fn(&T) -> bool,
{
    fn accepts(&self, item: &T) -> bool {
        self(item)
    }
}

/// Lazily keep the items `selector` accepts.
pub fn select<'a, T, I, S>(items: I, selector: &'a S) -> impl Iterator<Item = &'a T> + 'a
where
    T: 'a,
    I: IntoIterator<Item = &'a T>,
    I::IntoIter: 'a,
    S: Selector<T> + ?Sized,
{
    items.into_iter().filter(move |item| selector.accepts(item))
}
