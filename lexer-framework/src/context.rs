use crate::evaluator::{EvalError, Evaluators};
use crate::token::Token;
use machine_framework::RunContext;
use std::sync::Arc;

/// The run context of a character lexer.
pub type LexRunContext = RunContext<char, LexState, Token>;

/// Per-run data of a character lexer: the accumulation buffer and the
/// evaluator table shared by every run of the same [`Lexer`](crate::Lexer).
#[derive(Debug, Default)]
pub struct LexState {
    buffer: String,
    evaluators: Arc<Evaluators>,
}

impl LexState {
    pub fn new(evaluators: Arc<Evaluators>) -> Self {
        Self {
            buffer: String::new(),
            evaluators,
        }
    }

    pub fn buffer(&self) -> &str {
        &self.buffer
    }
}

/// Lexing operations on top of the engine's run context.
///
/// Rules and custom effects use these instead of reaching into [`LexState`]
/// directly.
pub trait LexContext {
    /// The character being processed, `None` at end of input.
    fn current_char(&self) -> Option<char>;

    /// Text accumulated since the last emit or skip.
    fn buffer(&self) -> &str;

    /// Appends the current character to the buffer. Does nothing at end of
    /// input.
    fn accept(&mut self);

    /// Appends `ch` to the buffer, whatever the current character is.
    fn accept_char(&mut self, ch: char);

    /// Empties the buffer and returns its contents.
    fn take_buffer(&mut self) -> String;

    /// Queues a token of `kind` built from the buffer and clears the buffer.
    fn emit(&mut self, kind: &str) -> Result<(), EvalError>;
}

impl LexContext for LexRunContext {
    fn current_char(&self) -> Option<char> {
        self.item().copied()
    }

    fn buffer(&self) -> &str {
        &self.data().buffer
    }

    fn accept(&mut self) {
        if let Some(ch) = self.current_char() {
            self.data_mut().buffer.push(ch);
        }
    }

    fn accept_char(&mut self, ch: char) {
        self.data_mut().buffer.push(ch);
    }

    fn take_buffer(&mut self) -> String {
        std::mem::take(&mut self.data_mut().buffer)
    }

    fn emit(&mut self, kind: &str) -> Result<(), EvalError> {
        let text = self.take_buffer();
        let value = self.data().evaluators.evaluate(kind, text)?;
        log::trace!("emit `{}` {:?} at position {}", kind, value, self.position());
        self.enqueue(Token {
            kind: kind.to_string(),
            value,
        });
        Ok(())
    }
}
