use common_framework::Position;
use machine_framework::RunError;
use thiserror::Error;

pub use machine_framework::BuildError;

/// A fatal lexing error, located by line and column.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{position}: {error}")]
pub struct LexError {
    #[source]
    pub error: RunError<char>,
    pub position: Position,
}

impl LexError {
    /// The diagnostic message, such as the text given to `abort`.
    pub fn message(&self) -> String {
        self.error.message()
    }

    /// 0-based index of the offending character.
    pub fn offset(&self) -> usize {
        self.error.position()
    }

    /// The offending character, `None` if the input ended.
    pub fn item(&self) -> Option<char> {
        self.error.item().copied()
    }
}

pub type Result<T> = std::result::Result<T, LexError>;
