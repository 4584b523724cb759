//! Lazy emission stream.

use crate::config::RunConfig;
use crate::core::{State, Token};
use crate::engine::error::RunError;
use crate::engine::runner::Runner;
use crate::engine::table::Table;
use std::collections::VecDeque;

enum Phase<'t, S, T, U, O, E> {
    NotStarted(U),
    Running(Runner<'t, S, T, U, O, E>),
    Done,
}

/// Iterator over the values a run emits, produced on demand.
///
/// The run starts on the first call to `next` and pulls one token from the
/// input only when every value emitted so far has been yielded. A failure
/// is yielded once, after which the iterator is exhausted. Dropping the
/// iterator abandons the run without consuming the rest of the input.
///
/// # Example
///
/// ```rust
/// use mealy::{emissions, TableBuilder};
///
/// let table = TableBuilder::<&str, u32, (), u32>::new()
///     .initial("doubling")
///     .with_transition(|t| {
///         t.read("doubling").action(|_, out, step| {
///             out.emit(step.token * 2);
///             Ok(())
///         })
///     })
///     .unwrap()
///     .build()
///     .unwrap();
///
/// let first_two: Vec<u32> = emissions(&table, (), 1..)
///     .take(2)
///     .collect::<Result<_, _>>()
///     .unwrap();
///
/// assert_eq!(first_two, vec![2, 4]);
/// ```
pub struct Emissions<'t, S, T, U, O, E, I> {
    table: &'t Table<S, T, U, O, E>,
    input: I,
    phase: Phase<'t, S, T, U, O, E>,
    pending: VecDeque<O>,
}

impl<'t, S, T, U, O, E, I> Emissions<'t, S, T, U, O, E, I> {
    fn new(table: &'t Table<S, T, U, O, E>, user: U, input: I) -> Self {
        Self {
            table,
            input,
            phase: Phase::NotStarted(user),
            pending: VecDeque::new(),
        }
    }
}

impl<S, T, U, O, E, I> Iterator for Emissions<'_, S, T, U, O, E, I>
where
    S: State,
    T: Token,
    I: Iterator<Item = T>,
{
    type Item = Result<O, RunError<S, T, E>>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(value) = self.pending.pop_front() {
                return Some(Ok(value));
            }

            match std::mem::replace(&mut self.phase, Phase::Done) {
                Phase::NotStarted(user) => {
                    match Runner::start(self.table, user, RunConfig::collecting()) {
                        Ok((runner, emitted)) => {
                            self.pending.extend(emitted);
                            self.phase = Phase::Running(runner);
                        }
                        Err(err) => return Some(Err(err)),
                    }
                }
                Phase::Running(mut runner) => match self.input.next() {
                    Some(token) => match runner.step(token) {
                        Ok(emitted) => {
                            self.pending.extend(emitted);
                            self.phase = Phase::Running(runner);
                        }
                        Err(err) => return Some(Err(err)),
                    },
                    None => match runner.finish() {
                        Ok((_, emitted)) => self.pending.extend(emitted),
                        Err(err) => return Some(Err(err)),
                    },
                },
                Phase::Done => return None,
            }
        }
    }
}

/// Lazily run `input` through `table`, yielding each emitted value.
///
/// Yields the same values in the same order as
/// [`run_emitting`](crate::engine::run_emitting), but values emitted before
/// a failing token are observed before the failure.
pub fn emissions<'t, S, T, U, O, E, I>(
    table: &'t Table<S, T, U, O, E>,
    user: U,
    input: I,
) -> Emissions<'t, S, T, U, O, E, I::IntoIter>
where
    S: State,
    T: Token,
    I: IntoIterator<Item = T>,
{
    Emissions::new(table, user, input.into_iter())
}

impl<S: State, T: Token, U, O, E> Table<S, T, U, O, E> {
    /// See [`emissions`].
    pub fn emissions<I>(&self, user: U, input: I) -> Emissions<'_, S, T, U, O, E, I::IntoIter>
    where
        I: IntoIterator<Item = T>,
    {
        emissions(self, user, input)
    }
}
