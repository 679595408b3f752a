use crate::action::Action;
use crate::context::RunContext;
use crate::engine::Run;
use crate::error::BuildError;
use crate::matcher::{equality, Matcher, MatcherWrapper, Predicate};
use common_framework::{IterSource, Source};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

type Initializer<X> = Arc<dyn Fn() -> X + Send + Sync>;

/// A resolved matcher paired with the actions it triggers.
pub struct Rule<I, X, T> {
    predicate: Predicate<I, X, T>,
    actions: Vec<Action<I, X, T>>,
}

impl<I, X, T> Rule<I, X, T> {
    pub fn matches(&self, ctx: &mut RunContext<I, X, T>) -> bool {
        (self.predicate)(ctx)
    }

    pub fn actions(&self) -> &[Action<I, X, T>] {
        &self.actions
    }
}

/// A named bundle of rules with its fallback and end-of-input actions.
pub struct State<I, X, T> {
    name: String,
    rules: Vec<Rule<I, X, T>>,
    fallback: Vec<Action<I, X, T>>,
    on_end: Vec<Action<I, X, T>>,
}

impl<I, X, T> State<I, X, T> {
    fn new(name: String) -> Self {
        Self {
            name,
            rules: Vec::new(),
            fallback: Vec::new(),
            on_end: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Rules in declaration order.
    pub fn rules(&self) -> &[Rule<I, X, T>] {
        &self.rules
    }

    pub fn fallback(&self) -> &[Action<I, X, T>] {
        &self.fallback
    }

    pub fn on_end(&self) -> &[Action<I, X, T>] {
        &self.on_end
    }

    fn actions(&self) -> impl Iterator<Item = &Action<I, X, T>> {
        self.rules
            .iter()
            .flat_map(|rule| rule.actions.iter())
            .chain(self.fallback.iter())
            .chain(self.on_end.iter())
    }
}

struct Table<I, X, T> {
    states: HashMap<String, State<I, X, T>>,
    order: Vec<String>,
    init: Initializer<X>,
}

/// The immutable state table produced by [`Builder::finalize`].
///
/// Cloning is cheap and every clone refers to the same table, so one
/// definition can drive any number of runs, on any number of threads.
pub struct Definition<I, X, T> {
    table: Arc<Table<I, X, T>>,
}

impl<I, X, T> Clone for Definition<I, X, T> {
    fn clone(&self) -> Self {
        Self {
            table: Arc::clone(&self.table),
        }
    }
}

impl<I, X, T> Definition<I, X, T> {
    /// The first declared state.
    pub fn initial_state(&self) -> &str {
        // `finalize` refuses empty tables.
        &self.table.order[0]
    }

    pub fn state(&self, name: &str) -> Option<&State<I, X, T>> {
        self.table.states.get(name)
    }

    pub fn contains_state(&self, name: &str) -> bool {
        self.table.states.contains_key(name)
    }

    /// State names in declaration order.
    pub fn state_names(&self) -> impl Iterator<Item = &str> {
        self.table.order.iter().map(String::as_str)
    }

    /// Checks that every `transition` and `call` target is a declared state.
    ///
    /// Runs never call this; an undefined target otherwise only fails once a
    /// run tries to evaluate it.
    pub fn check_targets(&self) -> Result<(), BuildError> {
        for name in &self.table.order {
            let state = &self.table.states[name];
            if let Some(target) = state
                .actions()
                .filter_map(Action::target)
                .find(|target| !self.contains_state(target))
            {
                return Err(BuildError::UndefinedTarget {
                    state: name.clone(),
                    target: target.to_string(),
                });
            }
        }
        Ok(())
    }

    /// Creates a fresh context positioned at the initial state.
    pub fn new_context(&self) -> RunContext<I, X, T> {
        RunContext::new(self.initial_state(), (self.table.init)())
    }

    /// Starts a lazy run over `source`.
    pub fn run<S>(&self, source: S) -> Run<S, X, T>
    where
        S: Source<Item = I>,
    {
        Run::new(self.clone(), source)
    }

    /// Starts a lazy run over any iterable.
    pub fn run_iter<It>(&self, items: It) -> Run<IterSource<It::IntoIter>, X, T>
    where
        It: IntoIterator<Item = I>,
    {
        self.run(IterSource::new(items))
    }
}

impl<I, X, T> fmt::Debug for Definition<I, X, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Definition")
            .field("initial", &self.initial_state())
            .field("states", &self.table.order)
            .finish()
    }
}

/// Accumulates states and rules for a [`Definition`].
///
/// Every method takes the builder by value and returns it, so declarations
/// chain:
///
/// ```text
/// Builder::new()
///     .state("text")
///     .rule(Matcher::literal('['), [transition("color")])
///     .state("color")
///     .rule(Matcher::literal(']'), [transition("text")])
///     .finalize()
/// ```
///
/// Mistakes such as declaring a rule before any state are reported by
/// [`finalize`](Builder::finalize).
pub struct Builder<I, X, T> {
    states: HashMap<String, State<I, X, T>>,
    order: Vec<String>,
    open: Option<String>,
    wrapper: MatcherWrapper<I, X, T>,
    init: Initializer<X>,
    error: Option<BuildError>,
}

impl<I, X, T> Builder<I, X, T>
where
    I: PartialEq + Send + Sync + 'static,
    X: Default + 'static,
    T: 'static,
{
    pub fn new() -> Self {
        Self {
            states: HashMap::new(),
            order: Vec::new(),
            open: None,
            wrapper: equality(),
            init: Arc::new(X::default),
            error: None,
        }
    }
}

impl<I, X, T> Default for Builder<I, X, T>
where
    I: PartialEq + Send + Sync + 'static,
    X: Default + 'static,
    T: 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<I, X, T> Builder<I, X, T>
where
    I: PartialEq + Send + Sync + 'static,
    X: 'static,
    T: 'static,
{
    /// Opens `name`, creating it on first use.
    ///
    /// Reopening an existing state appends further rules to it, which lets a
    /// state be referenced before it is fully declared. The first state ever
    /// opened is the initial state.
    pub fn state(mut self, name: impl Into<String>) -> Self {
        let name = name.into();
        if !self.states.contains_key(&name) {
            self.states.insert(name.clone(), State::new(name.clone()));
            self.order.push(name.clone());
        }
        self.open = Some(name);
        self
    }

    /// Appends a rule to the open state.
    pub fn rule<M, A>(mut self, matcher: M, actions: A) -> Self
    where
        M: Into<Matcher<I, X, T>>,
        A: IntoIterator<Item = Action<I, X, T>>,
    {
        let predicate = matcher.into().resolve(&self.wrapper);
        if let Some(state) = self.open_state("rule") {
            state.rules.push(Rule {
                predicate,
                actions: actions.into_iter().collect(),
            });
        }
        self
    }

    /// Sets the actions run when no rule of the open state matches.
    pub fn fallback<A>(mut self, actions: A) -> Self
    where
        A: IntoIterator<Item = Action<I, X, T>>,
    {
        if let Some(state) = self.open_state("fallback") {
            state.fallback = actions.into_iter().collect();
        }
        self
    }

    /// Sets the actions run when the input ends while the open state is active.
    pub fn on_end<A>(mut self, actions: A) -> Self
    where
        A: IntoIterator<Item = Action<I, X, T>>,
    {
        if let Some(state) = self.open_state("on_end") {
            state.on_end = actions.into_iter().collect();
        }
        self
    }

    /// Replaces the conversion applied to [`Matcher::Literal`] values.
    ///
    /// Only rules declared after this call are affected.
    pub fn matcher_wrapper<F>(mut self, wrapper: F) -> Self
    where
        F: Fn(I) -> Predicate<I, X, T> + Send + Sync + 'static,
    {
        self.wrapper = Arc::new(wrapper);
        self
    }

    /// Sets the function that produces each run's extension data.
    pub fn context_initializer<F>(mut self, init: F) -> Self
    where
        F: Fn() -> X + Send + Sync + 'static,
    {
        self.init = Arc::new(init);
        self
    }

    /// Freezes the accumulated states into a [`Definition`].
    pub fn finalize(self) -> Result<Definition<I, X, T>, BuildError> {
        if let Some(err) = self.error {
            return Err(err);
        }
        if self.order.is_empty() {
            return Err(BuildError::NoStates);
        }
        log::debug!(
            "finalized definition with {} states, initial `{}`",
            self.order.len(),
            self.order[0]
        );
        Ok(Definition {
            table: Arc::new(Table {
                states: self.states,
                order: self.order,
                init: self.init,
            }),
        })
    }

    fn open_state(&mut self, what: &'static str) -> Option<&mut State<I, X, T>> {
        let state = self.open.as_ref().and_then(|name| self.states.get_mut(name));
        if state.is_none() && self.error.is_none() {
            self.error = Some(BuildError::NoOpenState(what));
        }
        state
    }
}

impl<I, X, T> From<Predicate<I, X, T>> for Matcher<I, X, T> {
    fn from(predicate: Predicate<I, X, T>) -> Self {
        Matcher::Predicate(predicate)
    }
}
