use crate::engine::Run;
use crate::error::RunError;
use common_framework::{Inbound, Outbound, Source, StreamingSignal};

impl<S, X, T> Outbound<T, RunError<S::Item>> for Run<S, X, T>
where
    S: Source,
    S::Item: Clone,
{
    fn next_signal(&mut self) -> Option<StreamingSignal<T, RunError<S::Item>>> {
        Some(match self.next() {
            Some(Ok(token)) => StreamingSignal::SupplyToken(token),
            Some(Err(err)) => StreamingSignal::Failed(err),
            None => StreamingSignal::EndOfInput,
        })
    }
}

impl<S, X, T> Inbound<T, RunError<S::Item>> for Run<S, X, T>
where
    S: Source,
{
    fn handle_signal(&mut self, signal: StreamingSignal<T, RunError<S::Item>>) {
        if let StreamingSignal::Abort(reason) = signal {
            log::debug!("run received abort: {}", reason);
            self.cancel();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::{effect, Action};
    use crate::context::RunContext;
    use crate::definition::Builder;

    fn echo() -> Action<char, (), char> {
        effect(|ctx: &mut RunContext<char, (), char>| {
            if let Some(&c) = ctx.item() {
                ctx.enqueue(c);
            }
            Ok(())
        })
    }

    #[test]
    fn test_signals_follow_the_run() {
        let def = Builder::new().state("s").fallback([echo()]).finalize().unwrap();
        let mut run = def.run_iter("a".chars());
        assert_eq!(run.next_signal(), Some(StreamingSignal::SupplyToken('a')));
        assert_eq!(run.next_signal(), Some(StreamingSignal::EndOfInput));
        assert_eq!(run.next_signal(), Some(StreamingSignal::EndOfInput));
    }

    #[test]
    fn test_abort_signal_cancels() {
        let def = Builder::new().state("s").fallback([echo()]).finalize().unwrap();
        let mut run = def.run_iter("abc".chars());
        run.handle_signal(StreamingSignal::Abort("consumer gone".into()));
        assert!(run.is_finished());
        assert_eq!(run.next_signal(), Some(StreamingSignal::EndOfInput));
    }
}
