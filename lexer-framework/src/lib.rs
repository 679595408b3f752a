//! Lexer Framework
//!
//! A character lexer built on `machine-framework`. States and rules are
//! declared with a [`LexerBuilder`]; rules accumulate characters into a
//! buffer with [`accept`](actions::accept) and turn the buffer into
//! [`Token`]s with [`emit`](actions::emit). Emitted values can be
//! post-processed per token kind by [evaluators](evaluator).
//!
//! ```text
//! use lexer_framework::prelude::*;
//!
//! let lexer = LexerBuilder::new()
//!     .state("text")
//!     .rule('[', [emit("text"), transition("color")])
//!     .fallback([accept()])
//!     .on_end([emit("text")])
//!     .state("color")
//!     .rule(']', [emit("color"), transition("text")])
//!     .fallback([accept()])
//!     .on_end([abort("Unclosed color tag")])
//!     .build()?;
//!
//! for token in lexer.lex("a[b]c") {
//!     println!("{}", token?);
//! }
//! ```

pub mod actions;
pub mod context;
pub mod cursor;
pub mod error;
pub mod evaluator;
pub mod lexer;
pub mod matcher;
#[cfg(feature = "streaming")]
pub mod streaming;
pub mod token;

pub use common_framework::{IterSource, Position, Source};
pub use context::{LexContext, LexRunContext, LexState};
pub use cursor::Cursor;
pub use error::{BuildError, LexError};
pub use evaluator::{EvalError, Evaluator, Evaluators};
pub use lexer::{LexDefinition, LexRun, Lexer, LexerBuilder};
pub use matcher::CharMatcher;
#[cfg(feature = "streaming")]
pub use streaming::TokenProducer;
pub use token::{Token, Value};

/// Everything needed to declare and run a lexer.
pub mod prelude {
    pub use crate::actions::{
        abort, accept, accept_char, call, emit, push, ret, skip, transition, LexAction,
    };
    pub use crate::evaluator::{boolean, float, integer, trim};
    pub use crate::matcher::{any, one_of, pattern, pop, when};
    pub use crate::{LexContext, LexError, Lexer, LexerBuilder, Token, Value};
}
