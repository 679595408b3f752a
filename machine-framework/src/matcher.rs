use crate::context::RunContext;
use std::fmt;
use std::sync::Arc;

/// A predicate over the run context.
///
/// Predicates receive the context mutably because some of them, such as
/// [`Matcher::Pop`], consume state when they succeed.
pub type Predicate<I, X, T> = Arc<dyn Fn(&mut RunContext<I, X, T>) -> bool + Send + Sync>;

/// Converts a literal comparison value into a predicate.
pub type MatcherWrapper<I, X, T> = Arc<dyn Fn(I) -> Predicate<I, X, T> + Send + Sync>;

/// The left-hand side of a rule.
///
/// The variant is chosen when the rule is declared and resolved into a
/// [`Predicate`] right away, so nothing is inspected per item.
pub enum Matcher<I, X, T> {
    /// Compared against the current item through the builder's matcher wrapper.
    Literal(I),
    /// Used as the predicate unchanged.
    Predicate(Predicate<I, X, T>),
    /// True iff the current item equals the top of the value stack, which is
    /// removed on success.
    Pop,
}

impl<I, X, T> Matcher<I, X, T> {
    pub fn literal(value: I) -> Self {
        Matcher::Literal(value)
    }

    pub fn predicate<F>(f: F) -> Self
    where
        F: Fn(&mut RunContext<I, X, T>) -> bool + Send + Sync + 'static,
    {
        Matcher::Predicate(Arc::new(f))
    }
}

impl<I, X, T> Matcher<I, X, T>
where
    I: PartialEq + Send + Sync + 'static,
    X: 'static,
    T: 'static,
{
    pub(crate) fn resolve(self, wrapper: &MatcherWrapper<I, X, T>) -> Predicate<I, X, T> {
        match self {
            Matcher::Literal(value) => wrapper(value),
            Matcher::Predicate(predicate) => predicate,
            Matcher::Pop => Arc::new(|ctx: &mut RunContext<I, X, T>| ctx.pop_matching()),
        }
    }
}

impl<I: fmt::Debug, X, T> fmt::Debug for Matcher<I, X, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Matcher::Literal(value) => f.debug_tuple("Literal").field(value).finish(),
            Matcher::Predicate(_) => f.write_str("Predicate(..)"),
            Matcher::Pop => f.write_str("Pop"),
        }
    }
}

/// Matches the most recently pushed value and pops it.
pub fn pop<I, X, T>() -> Matcher<I, X, T> {
    Matcher::Pop
}

/// The default matcher wrapper: strict equality with the current item.
pub fn equality<I, X, T>() -> MatcherWrapper<I, X, T>
where
    I: PartialEq + Send + Sync + 'static,
    X: 'static,
    T: 'static,
{
    Arc::new(|value: I| -> Predicate<I, X, T> {
        Arc::new(move |ctx: &mut RunContext<I, X, T>| ctx.item() == Some(&value))
    })
}
