//! Machine Framework
//!
//! A rule-driven finite-state engine that turns a pull-based stream of input
//! items into a lazily produced stream of output tokens.
//!
//! A [`Definition`] is assembled once with a [`Builder`] and can then drive
//! any number of independent [`Run`]s. Each run owns its [`RunContext`]:
//! the active state, the current item and its position, the output queue and
//! the value and call stacks used by [`Action::Push`], [`Matcher::Pop`],
//! [`Action::Call`] and [`Action::Return`].

pub mod action;
pub mod context;
pub mod definition;
pub mod engine;
pub mod error;
pub mod matcher;
#[cfg(feature = "streaming")]
pub mod streaming;

pub use action::{abort, call, effect, push, ret, transition, Abort, Action, Effect};
pub use common_framework::{IterSource, Position, Source};
pub use context::RunContext;
pub use definition::{Builder, Definition, Rule, State};
pub use engine::Run;
pub use error::{BuildError, RunError};
pub use matcher::{pop, Matcher, MatcherWrapper, Predicate};
