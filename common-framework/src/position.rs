use std::fmt;

/// Represents the position of an input item in the source.
///
/// `offset` is the 0-based index of the item in the input sequence (items,
/// not bytes), which is the same counter the run engine reports. `line` and
/// `column` are only meaningful for character input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Position {
    /// Line number (1-indexed)
    pub line: usize,
    /// Column number (1-indexed)
    pub column: usize,
    /// Item index from the start of the input (0-indexed)
    pub offset: usize,
}

impl Position {
    /// Creates a new position at the start of the input.
    pub fn new() -> Self {
        Self {
            line: 1,
            column: 1,
            offset: 0,
        }
    }

    /// Creates a position with the given values.
    pub fn at(line: usize, column: usize, offset: usize) -> Self {
        Self {
            line,
            column,
            offset,
        }
    }

    /// Returns the position that follows `self` once `ch` has been consumed.
    pub fn after(self, ch: char) -> Self {
        if ch == '\n' {
            Self::at(self.line + 1, 1, self.offset + 1)
        } else {
            Self::at(self.line, self.column + 1, self.offset + 1)
        }
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}
