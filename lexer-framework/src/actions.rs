//! The lexer's action vocabulary.
//!
//! `accept`, `accept_char`, `emit` and `skip` work on the accumulation
//! buffer; the rest are the engine's control actions with the lexer's types
//! filled in.

use crate::context::{LexContext, LexRunContext, LexState};
use crate::token::Token;
use machine_framework::{effect, Abort, Action};

pub type LexAction = Action<char, LexState, Token>;

/// Appends the current character to the buffer.
pub fn accept() -> LexAction {
    effect(|ctx: &mut LexRunContext| {
        ctx.accept();
        Ok(())
    })
}

/// Appends `ch` to the buffer instead of the current character.
pub fn accept_char(ch: char) -> LexAction {
    effect(move |ctx: &mut LexRunContext| {
        ctx.accept_char(ch);
        Ok(())
    })
}

/// Queues a `kind` token holding the (evaluated) buffer, then clears it.
pub fn emit(kind: impl Into<String>) -> LexAction {
    let kind = kind.into();
    effect(move |ctx: &mut LexRunContext| {
        ctx.emit(&kind)
            .map_err(|err| Abort::new(format!("invalid {kind} token: {err}")))
    })
}

/// Clears the buffer without emitting anything.
pub fn skip() -> LexAction {
    effect(|ctx: &mut LexRunContext| {
        ctx.take_buffer();
        Ok(())
    })
}

pub fn transition(state: impl Into<String>) -> LexAction {
    machine_framework::transition(state)
}

pub fn call(state: impl Into<String>) -> LexAction {
    machine_framework::call(state)
}

pub fn ret() -> LexAction {
    machine_framework::ret()
}

pub fn push() -> LexAction {
    machine_framework::push()
}

pub fn abort(message: impl Into<String>) -> LexAction {
    machine_framework::abort(message)
}
