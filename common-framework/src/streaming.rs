/// Protocol-level signals exchanged between a token producer (a run) and
/// whoever drives it.
///
/// A producer reports through [`Outbound`]; a controller talks back through
/// [`Inbound`]. `Tok` is the token type and `Err` the producer's fatal error.
#[derive(Debug, Clone, PartialEq)]
pub enum StreamingSignal<Tok, Err> {
    /// Producer supplies the next token of its output sequence.
    SupplyToken(Tok),
    /// Producer hit a fatal condition; no further tokens will follow.
    Failed(Err),
    /// Producer has drained its input and its output queue.
    EndOfInput,
    /// Controller asks the producer to stop, with a reason.
    Abort(String),
}

impl<Tok, Err> StreamingSignal<Tok, Err> {
    /// Returns true if no further signals other than `EndOfInput` can follow.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            StreamingSignal::Failed(_) | StreamingSignal::EndOfInput | StreamingSignal::Abort(_)
        )
    }
}

/// Trait implemented by components that can **receive** streaming signals.
pub trait Inbound<Tok, Err> {
    fn handle_signal(&mut self, signal: StreamingSignal<Tok, Err>);
}

/// Trait implemented by components that can **emit** streaming signals.
///
/// Components that participate in the protocol expose an outbound channel so
/// that the controller can pull their latest status.
pub trait Outbound<Tok, Err> {
    fn next_signal(&mut self) -> Option<StreamingSignal<Tok, Err>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_terminal_signals() {
        let token: StreamingSignal<char, String> = StreamingSignal::SupplyToken('a');
        assert!(!token.is_terminal());
        assert!(StreamingSignal::<char, String>::EndOfInput.is_terminal());
        assert!(StreamingSignal::<char, String>::Failed("boom".into()).is_terminal());
        assert!(StreamingSignal::<char, String>::Abort("stop".into()).is_terminal());
    }
}
