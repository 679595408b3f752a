use crate::action::Action;
use crate::context::RunContext;
use crate::definition::Definition;
use crate::error::RunError;
use common_framework::Source;
use std::iter::FusedIterator;

/// One lazy execution of a [`Definition`] over a [`Source`].
///
/// Nothing happens until the run is pulled. Each call to `next` either hands
/// out a token that is already queued, or pulls input items one at a time and
/// executes the matching actions until at least one token is queued or the
/// input ends.
///
/// The run is fused: after the end-of-input actions have executed and the
/// queue has drained, or after a fatal error has been yielded, every further
/// call returns `None`.
pub struct Run<S: Source, X, T> {
    definition: Definition<S::Item, X, T>,
    source: S,
    ctx: RunContext<S::Item, X, T>,
    finished: bool,
}

impl<S: Source, X, T> Run<S, X, T> {
    pub(crate) fn new(definition: Definition<S::Item, X, T>, source: S) -> Self {
        let ctx = definition.new_context();
        Self {
            definition,
            source,
            ctx,
            finished: false,
        }
    }

    pub fn definition(&self) -> &Definition<S::Item, X, T> {
        &self.definition
    }

    /// Read-only view of the run's context, for inspection between pulls.
    pub fn context(&self) -> &RunContext<S::Item, X, T> {
        &self.ctx
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Returns true once no further input will be read.
    ///
    /// Tokens queued by the end-of-input actions may still be pending.
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Stops the run. Queued tokens are dropped and no more input is read.
    pub fn cancel(&mut self) {
        self.finished = true;
        self.ctx.discard_queue();
    }
}

impl<S, X, T> Run<S, X, T>
where
    S: Source,
    S::Item: Clone,
{
    /// Pulls one item and executes one action list.
    fn step(&mut self) -> Result<(), RunError<S::Item>> {
        if let Some(name) = self.ctx.activate_pending() {
            log::trace!("entering state `{}`", name);
        }

        let item = self.source.pull();
        self.ctx.advance(item);

        let Some(state) = self.definition.state(self.ctx.state()) else {
            return Err(RunError::UnknownState {
                name: self.ctx.state().to_string(),
                position: self.ctx.position(),
                item: self.ctx.item().cloned(),
            });
        };

        if self.ctx.item().is_none() {
            self.finished = true;
            log::debug!(
                "end of input at position {} in state `{}`",
                self.ctx.position(),
                state.name()
            );
            return execute(state.on_end(), &mut self.ctx);
        }

        let ctx = &mut self.ctx;
        let actions = match state.rules().iter().position(|rule| rule.matches(ctx)) {
            Some(index) => {
                log::trace!(
                    "rule {} of `{}` matched at position {}",
                    index,
                    state.name(),
                    ctx.position()
                );
                state.rules()[index].actions()
            }
            None => state.fallback(),
        };
        execute(actions, ctx)
    }
}

fn execute<I: Clone, X, T>(
    actions: &[Action<I, X, T>],
    ctx: &mut RunContext<I, X, T>,
) -> Result<(), RunError<I>> {
    actions.iter().try_for_each(|action| action.apply(ctx))
}

impl<S, X, T> Iterator for Run<S, X, T>
where
    S: Source,
    S::Item: Clone,
{
    type Item = Result<T, RunError<S::Item>>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(token) = self.ctx.dequeue() {
                return Some(Ok(token));
            }
            if self.finished {
                return None;
            }
            if let Err(err) = self.step() {
                log::warn!(
                    "run failed at position {}: {}",
                    err.position(),
                    err.message()
                );
                self.cancel();
                return Some(Err(err));
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        // Queued tokens are certain; anything else depends on unread input.
        let queued = self.ctx.queued().count();
        if self.finished {
            (queued, Some(queued))
        } else {
            (queued, None)
        }
    }
}

impl<S, X, T> FusedIterator for Run<S, X, T>
where
    S: Source,
    S::Item: Clone,
{
}
