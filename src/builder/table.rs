//! Builder for constructing transition tables.

use crate::builder::error::{BuildError, MalformedTable};
use crate::builder::transition::{Transition, TransitionBuilder};
use crate::core::{State, Token};
use crate::engine::{Emitter, Hook, Table};
use std::convert::Infallible;
use std::sync::Arc;
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;
use tracing::warn;

/// Builder for constructing transition tables with a fluent API.
///
/// Rules are kept in declaration order. For any one state the first
/// declared rule that accepts a token wins, so specific matchers must come
/// before the wildcard.
///
/// # Example
///
/// ```rust
/// use mealy::TableBuilder;
///
/// #[derive(Debug, Default)]
/// struct Counter {
///     ones: u32,
/// }
///
/// let table = TableBuilder::<&str, u8, Counter, u32>::new()
///     .initial("start")
///     .with_transition(|t| t.from("start").to("end").on(0))
///     .unwrap()
///     .with_transition(|t| {
///         t.read("start").on(1).action(|counter, _, _| {
///             counter.ones += 1;
///             Ok(())
///         })
///     })
///     .unwrap()
///     .with_transition(|t| t.read("end"))
///     .unwrap()
///     .finish(|counter, out| {
///         out.emit(counter.ones);
///         Ok(())
///     })
///     .build()
///     .unwrap();
///
/// let emitted = table
///     .run_emitting(Counter::default(), [1, 1, 1, 1, 0, 1, 0, 0])
///     .unwrap();
/// assert_eq!(emitted, vec![4]);
/// ```
pub struct TableBuilder<S, T, U, O = (), E = Infallible> {
    initial: Option<S>,
    on_start: Option<Hook<U, O, E>>,
    on_finish: Option<Hook<U, O, E>>,
    transitions: Vec<Transition<S, T, U, O, E>>,
    problems: Vec<BuildError>,
}

impl<S: State, T: Token, U, O, E> TableBuilder<S, T, U, O, E> {
    /// Create a new builder.
    pub fn new() -> Self {
        Self {
            initial: None,
            on_start: None,
            on_finish: None,
            transitions: Vec::new(),
            problems: Vec::new(),
        }
    }

    /// Set the initial state (required, exactly once).
    pub fn initial(mut self, state: S) -> Self {
        if let Some(first) = &self.initial {
            self.problems.push(BuildError::DuplicateInitialState {
                first: format!("{first:?}"),
                second: format!("{state:?}"),
            });
        }
        self.initial = Some(state);
        self
    }

    /// Set the initial state together with the action run before any input.
    pub fn initial_with<F>(self, state: S, action: F) -> Self
    where
        F: Fn(&mut U, &mut Emitter<O>) -> Result<(), E> + Send + Sync + 'static,
    {
        let mut builder = self.initial(state);
        builder.on_start = Some(Arc::new(action));
        builder
    }

    /// Add a transition using a builder.
    /// Returns an error if the builder fails validation.
    pub fn transition(
        mut self,
        builder: TransitionBuilder<S, T, U, O, E>,
    ) -> Result<Self, BuildError> {
        let transition = builder.build()?;
        self.transitions.push(transition);
        Ok(self)
    }

    /// Declare a transition by configuring a fresh builder.
    pub fn with_transition<F>(self, configure: F) -> Result<Self, BuildError>
    where
        F: FnOnce(TransitionBuilder<S, T, U, O, E>) -> TransitionBuilder<S, T, U, O, E>,
    {
        self.transition(configure(TransitionBuilder::new()))
    }

    /// Add a pre-built transition.
    pub fn add_transition(mut self, transition: Transition<S, T, U, O, E>) -> Self {
        self.transitions.push(transition);
        self
    }

    /// Add multiple transitions at once.
    pub fn transitions(mut self, transitions: Vec<Transition<S, T, U, O, E>>) -> Self {
        self.transitions.extend(transitions);
        self
    }

    /// Set the action run once the input is exhausted (at most once).
    pub fn finish<F>(mut self, action: F) -> Self
    where
        F: Fn(&mut U, &mut Emitter<O>) -> Result<(), E> + Send + Sync + 'static,
    {
        if self.on_finish.is_some() {
            self.problems.push(BuildError::DuplicateFinishAction);
        }
        self.on_finish = Some(Arc::new(action));
        self
    }

    /// Check the declaration, accumulating ALL problems.
    /// Returns Validation::Success(()) if the table can be built.
    pub fn validate(&self) -> Validation<(), NonEmptyVec<BuildError>> {
        let mut checks: Vec<Validation<(), NonEmptyVec<BuildError>>> = Vec::new();

        let initial = if self.initial.is_some() {
            Validation::success(())
        } else {
            Validation::fail(BuildError::MissingInitialState)
        };
        checks.push(initial);

        for problem in &self.problems {
            checks.push(Validation::fail(problem.clone()));
        }

        Validation::all_vec(checks).map(|_| ())
    }

    /// Build the table.
    /// Returns every problem found if the declaration is malformed.
    pub fn build(self) -> Result<Table<S, T, U, O, E>, MalformedTable> {
        if let Validation::Failure(errors) = self.validate() {
            return Err(MalformedTable {
                errors: errors.iter().cloned().collect(),
            });
        }
        let initial = self.initial.ok_or(BuildError::MissingInitialState)?;

        let mut table = Table::new(initial, self.on_start, self.on_finish);
        for transition in self.transitions {
            for (from, rule) in transition.into_rules() {
                if table
                    .rules_for(&from)
                    .iter()
                    .any(|earlier| earlier.matcher.is_wildcard())
                {
                    warn!(
                        target: "mealy::builder",
                        state = ?from,
                        matcher = ?rule.matcher,
                        "Rule declared after a wildcard for the same state can never fire"
                    );
                }
                table.push_rule(from, rule);
            }
        }

        Ok(table)
    }
}

impl<S: State, T: Token, U, O, E> Default for TableBuilder<S, T, U, O, E> {
    fn default() -> Self {
        Self::new()
    }
}
