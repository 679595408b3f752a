use crate::context::RunContext;
use crate::error::RunError;
use std::fmt;
use std::sync::Arc;
use thiserror::Error;

/// Failure reported by an [`Action::Effect`]. Ends the run like `abort`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct Abort {
    pub message: String,
}

impl Abort {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// A context-mutating function supplied by a specialization.
pub type Effect<I, X, T> = Arc<dyn Fn(&mut RunContext<I, X, T>) -> Result<(), Abort> + Send + Sync>;

/// One step of a rule's action list.
pub enum Action<I, X, T> {
    /// Make `name` the active state from the next step on.
    Transition(String),
    /// Save the active state on the call stack, then transition to `name`.
    Call(String),
    /// Pop the call stack and transition back to the saved state.
    Return,
    /// Push the current item onto the value stack.
    Push,
    /// End the run with a diagnostic message.
    Abort(String),
    /// Specialization-defined mutation of the context.
    Effect(Effect<I, X, T>),
}

impl<I, X, T> Action<I, X, T> {
    /// The state name a `Transition` or `Call` refers to.
    pub fn target(&self) -> Option<&str> {
        match self {
            Action::Transition(name) | Action::Call(name) => Some(name),
            _ => None,
        }
    }
}

impl<I: Clone, X, T> Action<I, X, T> {
    pub(crate) fn apply(&self, ctx: &mut RunContext<I, X, T>) -> Result<(), RunError<I>> {
        match self {
            Action::Transition(name) => {
                log::trace!("{} -> {} at {}", ctx.state(), name, ctx.position());
                ctx.schedule(name);
            }
            Action::Call(name) => {
                log::debug!("call {} from {} at {}", name, ctx.state(), ctx.position());
                ctx.push_call();
                ctx.schedule(name);
            }
            Action::Return => match ctx.pop_call() {
                Some(name) => {
                    log::debug!("return {} -> {} at {}", ctx.state(), name, ctx.position());
                    ctx.schedule(&name);
                }
                None => {
                    return Err(RunError::EmptyCallStack {
                        state: ctx.state().to_string(),
                        position: ctx.position(),
                        item: ctx.item().cloned(),
                    })
                }
            },
            Action::Push => ctx.push_item(),
            Action::Abort(message) => return Err(aborted(ctx, message.clone())),
            Action::Effect(effect) => {
                effect(ctx).map_err(|Abort { message }| aborted(ctx, message))?;
            }
        }
        Ok(())
    }
}

fn aborted<I: Clone, X, T>(ctx: &RunContext<I, X, T>, message: String) -> RunError<I> {
    RunError::Aborted {
        message,
        position: ctx.position(),
        item: ctx.item().cloned(),
    }
}

impl<I, X, T> fmt::Debug for Action<I, X, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Transition(name) => f.debug_tuple("Transition").field(name).finish(),
            Action::Call(name) => f.debug_tuple("Call").field(name).finish(),
            Action::Return => f.write_str("Return"),
            Action::Push => f.write_str("Push"),
            Action::Abort(message) => f.debug_tuple("Abort").field(message).finish(),
            Action::Effect(_) => f.write_str("Effect(..)"),
        }
    }
}

pub fn transition<I, X, T>(name: impl Into<String>) -> Action<I, X, T> {
    Action::Transition(name.into())
}

pub fn call<I, X, T>(name: impl Into<String>) -> Action<I, X, T> {
    Action::Call(name.into())
}

/// `return` is a keyword, hence the short name.
pub fn ret<I, X, T>() -> Action<I, X, T> {
    Action::Return
}

pub fn push<I, X, T>() -> Action<I, X, T> {
    Action::Push
}

pub fn abort<I, X, T>(message: impl Into<String>) -> Action<I, X, T> {
    Action::Abort(message.into())
}

pub fn effect<I, X, T, F>(f: F) -> Action<I, X, T>
where
    F: Fn(&mut RunContext<I, X, T>) -> Result<(), Abort> + Send + Sync + 'static,
{
    Action::Effect(Arc::new(f))
}
