use std::collections::VecDeque;

/// Mutable state of one in-progress run.
///
/// A context is allocated when a run starts and dropped with it; it is never
/// shared between runs. `I` is the input item type, `X` the extension data a
/// specialization keeps per run (seeded by the definition's context
/// initializer) and `T` the output token type.
#[derive(Debug)]
pub struct RunContext<I, X, T> {
    state: String,
    pending: Option<String>,
    item: Option<I>,
    position: usize,
    pulled: usize,
    queue: VecDeque<T>,
    values: Vec<I>,
    calls: Vec<String>,
    data: X,
}

impl<I, X, T> RunContext<I, X, T> {
    /// Creates a context positioned before the first item of the input.
    pub fn new(initial_state: impl Into<String>, data: X) -> Self {
        Self {
            state: initial_state.into(),
            pending: None,
            item: None,
            position: 0,
            pulled: 0,
            queue: VecDeque::new(),
            values: Vec::new(),
            calls: Vec::new(),
            data,
        }
    }

    /// Name of the active state.
    ///
    /// A transition requested by an action only becomes active at the next
    /// step, so later actions of the same rule still see the old name here.
    pub fn state(&self) -> &str {
        &self.state
    }

    /// Name of the state scheduled to become active at the next step.
    pub fn pending_state(&self) -> Option<&str> {
        self.pending.as_deref()
    }

    /// The item being processed, `None` once the input is exhausted.
    pub fn item(&self) -> Option<&I> {
        self.item.as_ref()
    }

    /// 0-based index of the item being processed.
    ///
    /// At end of input this is the number of items the source produced.
    pub fn position(&self) -> usize {
        self.position
    }

    /// Returns true if the source has signalled exhaustion.
    pub fn at_end(&self) -> bool {
        self.pulled > 0 && self.item.is_none()
    }

    pub fn data(&self) -> &X {
        &self.data
    }

    pub fn data_mut(&mut self) -> &mut X {
        &mut self.data
    }

    /// Appends a token to the output queue.
    pub fn enqueue(&mut self, token: T) {
        self.queue.push_back(token);
    }

    /// Tokens queued but not yet handed to the consumer.
    pub fn queued(&self) -> impl Iterator<Item = &T> {
        self.queue.iter()
    }

    /// Values pushed by `push` and not yet popped, bottom first.
    pub fn value_stack(&self) -> &[I] {
        &self.values
    }

    /// State names saved by `call`, outermost first.
    pub fn call_stack(&self) -> &[String] {
        &self.calls
    }

    pub(crate) fn schedule(&mut self, state: &str) {
        self.pending = Some(state.to_string());
    }

    pub(crate) fn push_call(&mut self) {
        self.calls.push(self.state.clone());
    }

    pub(crate) fn pop_call(&mut self) -> Option<String> {
        self.calls.pop()
    }

    /// Makes the pending state active. Returns the newly active name, if any.
    pub(crate) fn activate_pending(&mut self) -> Option<&str> {
        let next = self.pending.take()?;
        self.state = next;
        Some(&self.state)
    }

    /// Records the result of one pull from the source.
    pub(crate) fn advance(&mut self, item: Option<I>) {
        self.position = self.pulled;
        self.pulled += 1;
        self.item = item;
    }

    pub(crate) fn dequeue(&mut self) -> Option<T> {
        self.queue.pop_front()
    }

    pub(crate) fn discard_queue(&mut self) {
        self.queue.clear();
    }
}

impl<I: Clone, X, T> RunContext<I, X, T> {
    pub(crate) fn push_item(&mut self) {
        if let Some(item) = &self.item {
            self.values.push(item.clone());
        }
    }
}

impl<I: PartialEq, X, T> RunContext<I, X, T> {
    /// Removes the top of the value stack if it equals the current item.
    ///
    /// Matching and removal are a single step: nothing is removed when the
    /// comparison fails.
    pub(crate) fn pop_matching(&mut self) -> bool {
        match (&self.item, self.values.last()) {
            (Some(item), Some(top)) if item == top => {
                self.values.pop();
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    type Ctx = RunContext<char, (), String>;

    #[test]
    fn test_new_context() {
        let ctx = Ctx::new("text", ());
        assert_eq!(ctx.state(), "text");
        assert_eq!(ctx.pending_state(), None);
        assert_eq!(ctx.item(), None);
        assert_eq!(ctx.position(), 0);
        assert!(!ctx.at_end());
    }

    #[test]
    fn test_advance_counts_pulls() {
        let mut ctx = Ctx::new("s", ());
        ctx.advance(Some('a'));
        assert_eq!((ctx.position(), ctx.item()), (0, Some(&'a')));
        ctx.advance(Some('b'));
        assert_eq!((ctx.position(), ctx.item()), (1, Some(&'b')));
        ctx.advance(None);
        assert_eq!(ctx.position(), 2);
        assert!(ctx.at_end());
    }

    #[test]
    fn test_schedule_is_deferred() {
        let mut ctx = Ctx::new("text", ());
        ctx.schedule("color");
        assert_eq!(ctx.state(), "text");
        assert_eq!(ctx.pending_state(), Some("color"));
        assert_eq!(ctx.activate_pending(), Some("color"));
        assert_eq!(ctx.state(), "color");
        assert_eq!(ctx.activate_pending(), None);
    }

    #[test]
    fn test_pop_matching_only_on_equal_top() {
        let mut ctx = Ctx::new("s", ());
        ctx.advance(Some('"'));
        ctx.push_item();
        ctx.advance(Some('\''));
        ctx.push_item();

        ctx.advance(Some('"'));
        assert!(!ctx.pop_matching());
        assert_eq!(ctx.value_stack(), &['"', '\'']);

        ctx.advance(Some('\''));
        assert!(ctx.pop_matching());
        assert_eq!(ctx.value_stack(), &['"']);
    }

    #[test]
    fn test_push_at_end_is_noop() {
        let mut ctx = Ctx::new("s", ());
        ctx.advance(None);
        ctx.push_item();
        assert!(ctx.value_stack().is_empty());
        assert!(!ctx.pop_matching());
    }

    #[test]
    fn test_queue_is_fifo() {
        let mut ctx = Ctx::new("s", ());
        ctx.enqueue("a".into());
        ctx.enqueue("b".into());
        assert_eq!(ctx.queued().count(), 2);
        assert_eq!(ctx.dequeue().as_deref(), Some("a"));
        assert_eq!(ctx.dequeue().as_deref(), Some("b"));
        assert_eq!(ctx.dequeue(), None);
    }
}
