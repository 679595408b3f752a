use crate::actions::LexAction;
use crate::context::{LexContext, LexRunContext, LexState};
use crate::cursor::Cursor;
use crate::error::{BuildError, LexError};
use crate::evaluator::{EvalError, Evaluators};
use crate::matcher::CharMatcher;
use crate::token::{Token, Value};
use common_framework::{IterSource, Position, Source};
use machine_framework::{Builder, Definition, Predicate, Run};
use std::iter::FusedIterator;
use std::str::Chars;
use std::sync::Arc;

pub type LexDefinition = Definition<char, LexState, Token>;

type LexPredicate = Predicate<char, LexState, Token>;

/// Declares the states and rules of a [`Lexer`].
///
/// ```text
/// let lexer = LexerBuilder::new()
///     .state("text")
///     .rule('[', [emit("text"), transition("color")])
///     .fallback([accept()])
///     .on_end([emit("text")])
///     .state("color")
///     .rule(']', [emit("color"), transition("text")])
///     .fallback([accept()])
///     .on_end([abort("Unclosed color tag")])
///     .build()?;
/// ```
pub struct LexerBuilder {
    inner: Builder<char, LexState, Token>,
    evaluators: Evaluators,
}

impl LexerBuilder {
    pub fn new() -> Self {
        Self {
            inner: Builder::new(),
            evaluators: Evaluators::new(),
        }
    }

    /// Opens `name`, creating it on first use. The first state is initial.
    pub fn state(mut self, name: impl Into<String>) -> Self {
        self.inner = self.inner.state(name);
        self
    }

    /// Appends a rule to the open state. Earlier rules take precedence.
    pub fn rule<M, A>(mut self, matcher: M, actions: A) -> Self
    where
        M: Into<CharMatcher>,
        A: IntoIterator<Item = LexAction>,
    {
        self.inner = self.inner.rule(matcher.into(), actions);
        self
    }

    pub fn fallback<A>(mut self, actions: A) -> Self
    where
        A: IntoIterator<Item = LexAction>,
    {
        self.inner = self.inner.fallback(actions);
        self
    }

    pub fn on_end<A>(mut self, actions: A) -> Self
    where
        A: IntoIterator<Item = LexAction>,
    {
        self.inner = self.inner.on_end(actions);
        self
    }

    /// Appends `evaluator` to the chain applied to emitted `kind` tokens.
    pub fn evaluator<F>(mut self, kind: impl Into<String>, evaluator: F) -> Self
    where
        F: Fn(Value) -> Result<Value, EvalError> + Send + Sync + 'static,
    {
        self.evaluators.add(kind, evaluator);
        self
    }

    /// Compares literal characters of subsequently declared rules without
    /// regard to case.
    pub fn case_insensitive(mut self, enabled: bool) -> Self {
        self.inner = if enabled {
            self.inner.matcher_wrapper(|expected: char| -> LexPredicate {
                Arc::new(move |ctx: &mut LexRunContext| {
                    ctx.current_char()
                        .is_some_and(|ch| ch.to_lowercase().eq(expected.to_lowercase()))
                })
            })
        } else {
            self.inner.matcher_wrapper(|expected: char| -> LexPredicate {
                Arc::new(move |ctx: &mut LexRunContext| ctx.current_char() == Some(expected))
            })
        };
        self
    }

    pub fn build(self) -> Result<Lexer, BuildError> {
        log::debug!("building lexer, {:?}", self.evaluators);
        let evaluators = Arc::new(self.evaluators);
        let definition = self
            .inner
            .context_initializer(move || LexState::new(Arc::clone(&evaluators)))
            .finalize()?;
        Ok(Lexer { definition })
    }
}

impl Default for LexerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// A finished character lexer. Cheap to clone and shareable across threads.
#[derive(Debug, Clone)]
pub struct Lexer {
    definition: LexDefinition,
}

impl Lexer {
    pub fn definition(&self) -> &LexDefinition {
        &self.definition
    }

    /// Lexes characters pulled from `source`.
    pub fn run<S: Source<Item = char>>(&self, source: S) -> LexRun<S> {
        LexRun {
            run: self.definition.run(Cursor::new(source)),
        }
    }

    /// Lexes `input` lazily.
    pub fn lex<'a>(&self, input: &'a str) -> LexRun<IterSource<Chars<'a>>> {
        self.run(IterSource::new(input.chars()))
    }

    /// Lexes `input` to completion.
    pub fn tokenize(&self, input: &str) -> Result<Vec<Token>, LexError> {
        self.lex(input).collect()
    }
}

/// A lazy lexing run. Yields tokens until the input is exhausted or a fatal
/// error occurs; after either, it only yields `None`.
pub struct LexRun<S: Source<Item = char>> {
    run: Run<Cursor<S>, LexState, Token>,
}

impl<S: Source<Item = char>> LexRun<S> {
    /// Line and column of the character currently being processed.
    pub fn location(&self) -> Position {
        self.run.source().position()
    }

    /// Active state.
    pub fn state(&self) -> &str {
        self.run.context().state()
    }

    /// Text buffered but not yet emitted.
    pub fn buffer(&self) -> &str {
        LexContext::buffer(self.run.context())
    }

    pub fn is_finished(&self) -> bool {
        self.run.is_finished()
    }

    /// Stops the run; pending tokens are dropped.
    pub fn cancel(&mut self) {
        self.run.cancel();
    }
}

impl<S: Source<Item = char>> Iterator for LexRun<S> {
    type Item = Result<Token, LexError>;

    fn next(&mut self) -> Option<Self::Item> {
        let result = self.run.next()?;
        Some(result.map_err(|error| {
            let position = self.run.source().position();
            log::debug!("lexing failed at {}: {}", position, error.message());
            LexError { error, position }
        }))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.run.size_hint()
    }
}

impl<S: Source<Item = char>> FusedIterator for LexRun<S> {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actions::{abort, accept, emit, transition};

    fn words() -> Lexer {
        LexerBuilder::new()
            .state("space")
            .rule(' ', [])
            .fallback([accept(), transition("word")])
            .state("word")
            .rule(' ', [emit("word"), transition("space")])
            .fallback([accept()])
            .on_end([emit("word")])
            .build()
            .unwrap()
    }

    #[test]
    fn test_tokenize() {
        let tokens = words().tokenize("ab  cd").unwrap();
        assert_eq!(tokens, vec![Token::new("word", "ab"), Token::new("word", "cd")]);
    }

    #[test]
    fn test_lex_run_inspection() {
        let lexer = words();
        let mut run = lexer.lex("ab c");
        assert_eq!(run.next(), Some(Ok(Token::new("word", "ab"))));
        assert_eq!(run.location(), Position::at(1, 3, 2));
        assert_eq!(run.state(), "word");
        assert_eq!(run.buffer(), "");
    }

    #[test]
    fn test_error_carries_line_and_column() {
        let lexer = LexerBuilder::new()
            .state("s")
            .rule('!', [abort("bang")])
            .build()
            .unwrap();
        let err = lexer.tokenize("ok\nno!").unwrap_err();
        assert_eq!(err.position, Position::at(2, 3, 5));
        assert_eq!(err.offset(), 5);
        assert_eq!(err.item(), Some('!'));
        assert_eq!(err.message(), "bang");
        assert_eq!(err.to_string(), "2:3: bang (position 5, item Some('!'))");
    }

    #[test]
    fn test_location_through_mutable_borrow() {
        let lexer = LexerBuilder::new()
            .state("s")
            .rule('!', [abort("bang")])
            .fallback([accept(), emit("c")])
            .build()
            .unwrap();
        let mut run = lexer.lex("a\nb!");
        let borrowed = &mut run;

        assert_eq!(borrowed.next(), Some(Ok(Token::new("c", "a"))));
        assert_eq!(borrowed.location(), Position::at(1, 1, 0));
        assert_eq!(borrowed.nth(1), Some(Ok(Token::new("c", "b"))));
        assert_eq!(borrowed.location(), Position::at(2, 1, 2));

        let err = borrowed.next().unwrap().unwrap_err();
        assert_eq!(err.position, Position::at(2, 2, 3));
        assert_eq!(borrowed.location(), err.position);
    }

    #[test]
    fn test_case_insensitive_literals() {
        let lexer = LexerBuilder::new()
            .state("s")
            .case_insensitive(true)
            .rule('x', [accept(), emit("x")])
            .case_insensitive(false)
            .rule('y', [accept(), emit("y")])
            .build()
            .unwrap();
        let kinds: Vec<_> = lexer
            .tokenize("xXyY")
            .unwrap()
            .into_iter()
            .map(|t| t.value.to_string())
            .collect();
        assert_eq!(kinds, vec!["x", "X", "y"]);
    }

    #[test]
    fn test_build_errors() {
        assert_eq!(
            LexerBuilder::new().build().unwrap_err(),
            BuildError::NoStates
        );
        assert_eq!(
            LexerBuilder::new().fallback([]).state("s").build().unwrap_err(),
            BuildError::NoOpenState("fallback")
        );
    }
}
