use common_framework::{Position, Source};

/// A character source that tracks line and column.
///
/// The cursor wraps another source and remembers the position of the
/// character it handed out last, which is the character the engine is
/// processing. Once the input is exhausted it reports the position just
/// past the final character.
#[derive(Debug, Clone)]
pub struct Cursor<S> {
    source: S,
    current: Position,
    next: Position,
}

impl<S> Cursor<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            current: Position::new(),
            next: Position::new(),
        }
    }

    /// Position of the most recently pulled character.
    pub fn position(&self) -> Position {
        self.current
    }

    pub fn get_ref(&self) -> &S {
        &self.source
    }

    pub fn into_inner(self) -> S {
        self.source
    }
}

impl<S: Source<Item = char>> Source for Cursor<S> {
    type Item = char;

    fn pull(&mut self) -> Option<char> {
        self.current = self.next;
        let ch = self.source.pull()?;
        self.next = self.next.after(ch);
        Some(ch)
    }
}
