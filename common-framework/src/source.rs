use std::iter::Fuse;

/// A pull-based provider of input items.
///
/// `pull` returns the next item, or `None` once the input is exhausted.
/// Implementations must keep returning `None` when pulled again after
/// exhaustion.
pub trait Source {
    type Item;

    fn pull(&mut self) -> Option<Self::Item>;
}

impl<S: Source + ?Sized> Source for &mut S {
    type Item = S::Item;

    fn pull(&mut self) -> Option<Self::Item> {
        (**self).pull()
    }
}

impl<S: Source + ?Sized> Source for Box<S> {
    type Item = S::Item;

    fn pull(&mut self) -> Option<Self::Item> {
        (**self).pull()
    }
}

/// Adapts any iterator into a [`Source`].
///
/// The iterator is fused, so an iterator that would resume after returning
/// `None` still honours the source contract.
#[derive(Debug, Clone)]
pub struct IterSource<I: Iterator> {
    iter: Fuse<I>,
}

impl<I: Iterator> IterSource<I> {
    pub fn new<T>(items: T) -> Self
    where
        T: IntoIterator<IntoIter = I>,
    {
        Self {
            iter: items.into_iter().fuse(),
        }
    }
}

impl<I: Iterator> Source for IterSource<I> {
    type Item = I::Item;

    fn pull(&mut self) -> Option<Self::Item> {
        self.iter.next()
    }
}
