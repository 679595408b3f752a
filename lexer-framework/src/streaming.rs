use crate::error::LexError;
use crate::lexer::LexRun;
use crate::token::Token;
use common_framework::{Inbound, Outbound, Source, StreamingSignal};

/// Produces tokens on demand, allowing lexers to be consumed in streaming
/// pipelines.
pub trait TokenProducer<Tok> {
    /// Attempts to emit the next token from the underlying producer.
    fn poll_token(&mut self) -> Option<Result<Tok, LexError>>;
}

impl<S: Source<Item = char>> TokenProducer<Token> for LexRun<S> {
    fn poll_token(&mut self) -> Option<Result<Token, LexError>> {
        self.next()
    }
}

impl<S: Source<Item = char>> Outbound<Token, LexError> for LexRun<S> {
    fn next_signal(&mut self) -> Option<StreamingSignal<Token, LexError>> {
        Some(match self.poll_token() {
            Some(Ok(token)) => StreamingSignal::SupplyToken(token),
            Some(Err(err)) => StreamingSignal::Failed(err),
            None => StreamingSignal::EndOfInput,
        })
    }
}

impl<S: Source<Item = char>> Inbound<Token, LexError> for LexRun<S> {
    fn handle_signal(&mut self, signal: StreamingSignal<Token, LexError>) {
        if let StreamingSignal::Abort(reason) = signal {
            log::debug!("lexer received abort: {}", reason);
            self.cancel();
        }
    }
}
