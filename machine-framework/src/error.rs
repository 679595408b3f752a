use thiserror::Error;

/// Errors reported while assembling a [`Definition`](crate::Definition).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BuildError {
    /// A rule, fallback or end rule was declared before any state.
    #[error("`{0}` declared before any state was opened")]
    NoOpenState(&'static str),

    /// `finalize` was called without a single declared state.
    #[error("definition has no states")]
    NoStates,

    /// A `transition` or `call` names a state that was never declared.
    #[error("state `{state}` refers to undefined state `{target}`")]
    UndefinedTarget { state: String, target: String },
}

/// Fatal conditions that end a run.
///
/// Every variant carries the 0-based position of the item being processed
/// and the item itself (`None` when the input was already exhausted).
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RunError<I> {
    /// An `abort` action fired, or a specialization effect failed.
    #[error("{message} (position {position}, item {item:?})")]
    Aborted {
        message: String,
        position: usize,
        item: Option<I>,
    },

    /// The active state is not part of the definition.
    #[error("undefined state `{name}` (position {position}, item {item:?})")]
    UnknownState {
        name: String,
        position: usize,
        item: Option<I>,
    },

    /// `return` was executed with an empty call stack.
    #[error("return with empty call stack in state `{state}` (position {position}, item {item:?})")]
    EmptyCallStack {
        state: String,
        position: usize,
        item: Option<I>,
    },
}

impl<I> RunError<I> {
    /// Human readable description, without position information.
    pub fn message(&self) -> String {
        match self {
            RunError::Aborted { message, .. } => message.clone(),
            RunError::UnknownState { name, .. } => format!("undefined state `{name}`"),
            RunError::EmptyCallStack { state, .. } => {
                format!("return with empty call stack in state `{state}`")
            }
        }
    }

    /// 0-based position of the offending item.
    pub fn position(&self) -> usize {
        match self {
            RunError::Aborted { position, .. }
            | RunError::UnknownState { position, .. }
            | RunError::EmptyCallStack { position, .. } => *position,
        }
    }

    /// The offending item, `None` at end of input.
    pub fn item(&self) -> Option<&I> {
        match self {
            RunError::Aborted { item, .. }
            | RunError::UnknownState { item, .. }
            | RunError::EmptyCallStack { item, .. } => item.as_ref(),
        }
    }
}
