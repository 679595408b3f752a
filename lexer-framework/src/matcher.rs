use crate::context::{LexRunContext, LexState};
use crate::token::Token;
use machine_framework::{Matcher, Predicate};
use regex::Regex;
use std::fmt;
use std::sync::Arc;

/// The left-hand side of a lexer rule.
pub enum CharMatcher {
    /// Equal to the current character (through the lexer's matcher wrapper).
    Char(char),
    /// The current character, as a one-character string, matches the pattern.
    Pattern(Regex),
    /// Arbitrary predicate over the run context.
    Predicate(Predicate<char, LexState, Token>),
    /// The current character equals the last pushed one, which is popped.
    Pop,
}

impl From<char> for CharMatcher {
    fn from(ch: char) -> Self {
        CharMatcher::Char(ch)
    }
}

impl From<Regex> for CharMatcher {
    fn from(regex: Regex) -> Self {
        CharMatcher::Pattern(regex)
    }
}

impl From<CharMatcher> for Matcher<char, LexState, Token> {
    fn from(matcher: CharMatcher) -> Self {
        match matcher {
            CharMatcher::Char(ch) => Matcher::Literal(ch),
            CharMatcher::Pattern(regex) => Matcher::predicate(move |ctx: &mut LexRunContext| {
                let mut utf8 = [0u8; 4];
                ctx.item()
                    .is_some_and(|ch| regex.is_match(ch.encode_utf8(&mut utf8)))
            }),
            CharMatcher::Predicate(predicate) => Matcher::Predicate(predicate),
            CharMatcher::Pop => Matcher::Pop,
        }
    }
}

impl fmt::Debug for CharMatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CharMatcher::Char(ch) => f.debug_tuple("Char").field(ch).finish(),
            CharMatcher::Pattern(regex) => {
                f.debug_tuple("Pattern").field(&regex.as_str()).finish()
            }
            CharMatcher::Predicate(_) => f.write_str("Predicate(..)"),
            CharMatcher::Pop => f.write_str("Pop"),
        }
    }
}

/// Compiles `src` into a pattern matcher.
pub fn pattern(src: &str) -> Result<CharMatcher, regex::Error> {
    Regex::new(src).map(CharMatcher::Pattern)
}

/// Matches any character.
pub fn any() -> CharMatcher {
    when(|_| true)
}

/// Matches any character contained in `chars`.
pub fn one_of(chars: &str) -> CharMatcher {
    let chars: Vec<char> = chars.chars().collect();
    when(move |ch| chars.contains(&ch))
}

/// Matches characters for which `f` returns true.
pub fn when<F>(f: F) -> CharMatcher
where
    F: Fn(char) -> bool + Send + Sync + 'static,
{
    CharMatcher::Predicate(Arc::new(move |ctx: &mut LexRunContext| {
        ctx.item().is_some_and(|&ch| f(ch))
    }))
}

/// Matches the most recently pushed character and pops it.
pub fn pop() -> CharMatcher {
    CharMatcher::Pop
}
