//! Execution engine.
//!
//! A [`Runner`] walks one input through a [`Table`]: it runs the initial
//! action, resolves each token against the current state's rules (first
//! accepting rule wins), runs the matched rule's action and advances, then
//! runs the finish action once the input is exhausted.

use crate::config::{Emission, RunConfig};
use crate::core::{State, Token, Transcript, TranscriptEntry};
use crate::engine::emit::invoke;
use crate::engine::error::{RunError, UnmatchedToken};
use crate::engine::table::{Step, Table};
use chrono::Utc;
use std::convert::Infallible;
use tracing::{debug, trace};

/// Outcome of a completed run.
#[derive(Clone, Debug)]
pub struct Finished<S, U, T> {
    /// State the machine was in when the input ran out
    pub state: S,
    /// The shared user state, after the finish action
    pub user: U,
    /// Number of tokens consumed
    pub steps: usize,
    /// Present when the run was configured to record one
    pub transcript: Option<Transcript<S, T>>,
}

/// A single run in progress.
///
/// The runner owns the current state and the user state for the length of
/// the run. [`Runner::start`] performs step zero, [`Runner::step`] consumes
/// one token, and [`Runner::finish`] consumes the runner.
///
/// # Example
///
/// ```rust
/// use mealy::{RunConfig, Runner, TableBuilder};
///
/// let table = TableBuilder::<&str, char, Vec<char>, char>::new()
///     .initial("echo")
///     .with_transition(|t| {
///         t.read("echo").action(|seen, out, step| {
///             seen.push(*step.token);
///             out.emit(step.token.to_ascii_uppercase());
///             Ok(())
///         })
///     })
///     .unwrap()
///     .build()
///     .unwrap();
///
/// let (mut runner, _) = Runner::start(&table, Vec::new(), RunConfig::default()).unwrap();
/// assert_eq!(runner.step('a').unwrap(), vec!['A']);
/// assert_eq!(runner.step('b').unwrap(), vec!['B']);
///
/// let (finished, _) = runner.finish().unwrap();
/// assert_eq!(finished.user, vec!['a', 'b']);
/// ```
pub struct Runner<'t, S, T, U, O = (), E = Infallible> {
    table: &'t Table<S, T, U, O, E>,
    state: S,
    user: U,
    emission: Emission,
    steps: usize,
    transcript: Option<Transcript<S, T>>,
    halted: bool,
}

impl<'t, S: State, T: Token, U, O, E> Runner<'t, S, T, U, O, E> {
    /// Begin a run: enter the initial state and run the initial action.
    ///
    /// Returns the runner together with whatever the initial action emitted.
    pub fn start(
        table: &'t Table<S, T, U, O, E>,
        user: U,
        config: RunConfig,
    ) -> Result<(Self, Vec<O>), RunError<S, T, E>> {
        let (initial, on_start) = table.initial();
        debug!(target: "mealy::engine", initial = ?initial, emission = ?config.emission, "Starting run");

        let mut runner = Self {
            table,
            state: initial.clone(),
            user,
            emission: config.emission,
            steps: 0,
            transcript: config
                .record_transcript
                .then(|| Transcript::new(initial.clone())),
            halted: false,
        };

        let emitted = match on_start {
            Some(hook) => invoke(&mut runner.user, runner.emission, |user, out| hook(user, out))
                .map_err(RunError::Action)?,
            None => Vec::new(),
        };

        Ok((runner, emitted))
    }

    /// Consume one token.
    ///
    /// Fails with [`RunError::Unmatched`] when no rule of the current state
    /// accepts the token, and with [`RunError::Action`] when the matched
    /// rule's action fails. Either way the state is left unchanged and the
    /// runner is halted.
    pub fn step(&mut self, token: T) -> Result<Vec<O>, RunError<S, T, E>> {
        if self.halted {
            return Err(RunError::Halted);
        }

        let table = self.table;
        let Some(rule) = table.resolve(&self.state, &token) else {
            debug!(target: "mealy::engine", state = ?self.state, token = ?token, "Unmatched token");
            self.halted = true;
            return Err(UnmatchedToken {
                state: self.state.clone(),
                token,
            }
            .into());
        };

        let emitted = match &rule.action {
            Some(action) => {
                let step = Step {
                    token: &token,
                    from: &self.state,
                    to: &rule.to,
                };
                match invoke(&mut self.user, self.emission, |user, out| {
                    action(user, out, step)
                }) {
                    Ok(emitted) => emitted,
                    Err(err) => {
                        debug!(target: "mealy::engine", state = ?self.state, "Transition action failed");
                        self.halted = true;
                        return Err(RunError::Action(err));
                    }
                }
            }
            None => Vec::new(),
        };

        let from = std::mem::replace(&mut self.state, rule.to.clone());
        trace!(
            target: "mealy::engine",
            index = self.steps,
            from = ?from,
            to = ?self.state,
            emitted = emitted.len(),
            "Transition"
        );

        if let Some(transcript) = self.transcript.as_mut() {
            transcript.record(TranscriptEntry {
                index: self.steps,
                from,
                to: rule.to.clone(),
                token,
                timestamp: Utc::now(),
            });
        }
        self.steps += 1;

        Ok(emitted)
    }

    /// End the run: run the finish action and hand back the outcome.
    pub fn finish(self) -> Result<(Finished<S, U, T>, Vec<O>), RunError<S, T, E>> {
        if self.halted {
            return Err(RunError::Halted);
        }

        let Runner {
            table,
            state,
            mut user,
            emission,
            steps,
            transcript,
            ..
        } = self;

        let emitted = match table.finish_action() {
            Some(hook) => {
                invoke(&mut user, emission, |user, out| hook(user, out)).map_err(RunError::Action)?
            }
            None => Vec::new(),
        };
        debug!(target: "mealy::engine", state = ?state, steps, "Run finished");

        Ok((
            Finished {
                state,
                user,
                steps,
                transcript,
            },
            emitted,
        ))
    }

    /// Feed every token of `input` in order, collecting emissions.
    pub fn feed<I>(&mut self, input: I) -> Result<Vec<O>, RunError<S, T, E>>
    where
        I: IntoIterator<Item = T>,
    {
        let mut emitted = Vec::new();
        for token in input {
            emitted.extend(self.step(token)?);
        }
        Ok(emitted)
    }

    pub fn current_state(&self) -> &S {
        &self.state
    }

    pub fn user(&self) -> &U {
        &self.user
    }

    pub fn user_mut(&mut self) -> &mut U {
        &mut self.user
    }

    /// Number of tokens consumed so far.
    pub fn steps_taken(&self) -> usize {
        self.steps
    }

    pub fn transcript(&self) -> Option<&Transcript<S, T>> {
        self.transcript.as_ref()
    }

    /// Whether an earlier step failed.
    pub fn is_halted(&self) -> bool {
        self.halted
    }
}

/// Run `input` through `table` with an explicit configuration.
///
/// Returns the outcome and every value emitted by the initial action, each
/// step and the finish action, in invocation order.
pub fn run_with<S, T, U, O, E, I>(
    table: &Table<S, T, U, O, E>,
    user: U,
    input: I,
    config: &RunConfig,
) -> Result<(Finished<S, U, T>, Vec<O>), RunError<S, T, E>>
where
    S: State,
    T: Token,
    I: IntoIterator<Item = T>,
{
    let (mut runner, mut emitted) = Runner::start(table, user, config.clone())?;
    emitted.extend(runner.feed(input)?);
    let (finished, tail) = runner.finish()?;
    emitted.extend(tail);
    Ok((finished, emitted))
}

/// Run `input` through `table`, discarding emissions.
///
/// The terminal state and user state are returned; a result the caller
/// needs should be stored in the user state by the finish action.
pub fn run<S, T, U, O, E, I>(
    table: &Table<S, T, U, O, E>,
    user: U,
    input: I,
) -> Result<Finished<S, U, T>, RunError<S, T, E>>
where
    S: State,
    T: Token,
    I: IntoIterator<Item = T>,
{
    run_with(table, user, input, &RunConfig::discarding()).map(|(finished, _)| finished)
}

/// Run `input` through `table` and return every emitted value in order.
///
/// On failure nothing emitted before the failing token is returned.
pub fn run_emitting<S, T, U, O, E, I>(
    table: &Table<S, T, U, O, E>,
    user: U,
    input: I,
) -> Result<Vec<O>, RunError<S, T, E>>
where
    S: State,
    T: Token,
    I: IntoIterator<Item = T>,
{
    run_with(table, user, input, &RunConfig::collecting()).map(|(_, emitted)| emitted)
}

impl<S: State, T: Token, U, O, E> Table<S, T, U, O, E> {
    /// Start a tokenwise run over this table.
    pub fn runner(
        &self,
        user: U,
        config: RunConfig,
    ) -> Result<(Runner<'_, S, T, U, O, E>, Vec<O>), RunError<S, T, E>> {
        Runner::start(self, user, config)
    }

    /// See [`run`].
    pub fn run<I>(&self, user: U, input: I) -> Result<Finished<S, U, T>, RunError<S, T, E>>
    where
        I: IntoIterator<Item = T>,
    {
        run(self, user, input)
    }

    /// See [`run_emitting`].
    pub fn run_emitting<I>(&self, user: U, input: I) -> Result<Vec<O>, RunError<S, T, E>>
    where
        I: IntoIterator<Item = T>,
    {
        run_emitting(self, user, input)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::TableBuilder;
    use crate::core::Matcher;
    use thiserror::Error;

    #[derive(Clone, Copy, PartialEq, Debug)]
    enum Phase {
        Start,
        End,
    }

    #[derive(Debug, Default)]
    struct Counter {
        ones: u32,
        log: Vec<String>,
    }

    #[derive(Debug, Error, PartialEq)]
    #[error("refused token {0}")]
    struct Refused(u8);

    fn counter_table() -> Table<Phase, u8, Counter, u32> {
        TableBuilder::<Phase, u8, Counter, u32>::new()
            .initial_with(Phase::Start, |c, _| {
                c.log.push("start".into());
                Ok(())
            })
            .with_transition(|t| {
                t.read(Phase::Start).on(1).action(|c, _, _| {
                    c.ones += 1;
                    Ok(())
                })
            })
            .unwrap()
            .with_transition(|t| t.from(Phase::Start).to(Phase::End).on(0))
            .unwrap()
            .with_transition(|t| t.read(Phase::End))
            .unwrap()
            .finish(|c, out| {
                c.log.push("finish".into());
                out.emit(c.ones);
                Ok(())
            })
            .build()
            .unwrap()
    }

    #[test]
    fn self_loop_counts_until_zero() {
        let finished = run(&counter_table(), Counter::default(), [1, 1, 1, 1, 0]).unwrap();

        assert_eq!(finished.user.ones, 4);
        assert_eq!(finished.state, Phase::End);
        assert_eq!(finished.steps, 5);
    }

    #[test]
    fn trailing_input_is_absorbed_by_wildcard_loop() {
        let emitted = run_emitting(&counter_table(), Counter::default(), [1, 1, 0, 1, 0, 0]).unwrap();

        assert_eq!(emitted, vec![2]);
    }

    #[test]
    fn empty_input_runs_only_start_and_finish() {
        let finished = run(&counter_table(), Counter::default(), []).unwrap();

        assert_eq!(finished.user.log, vec!["start", "finish"]);
        assert_eq!(finished.state, Phase::Start);
        assert_eq!(finished.steps, 0);
    }

    #[test]
    fn unmatched_token_reports_state_and_token() {
        let err = run(&counter_table(), Counter::default(), [1, 7]).unwrap_err();

        assert_eq!(
            err.unmatched(),
            Some(&UnmatchedToken {
                state: Phase::Start,
                token: 7
            })
        );
    }

    #[test]
    fn discarding_mode_drops_emissions() {
        let (finished, emitted) = run_with(
            &counter_table(),
            Counter::default(),
            [1, 0],
            &RunConfig::discarding(),
        )
        .unwrap();

        assert!(emitted.is_empty());
        assert_eq!(finished.user.ones, 1);
    }

    #[test]
    fn transcript_records_each_step() {
        let config = RunConfig::default().with_transcript(true);
        let (finished, _) = run_with(&counter_table(), Counter::default(), [1, 0, 5], &config).unwrap();

        let transcript = finished.transcript.unwrap();
        assert_eq!(
            transcript.path(),
            vec![&Phase::Start, &Phase::Start, &Phase::End, &Phase::End]
        );
        assert_eq!(transcript.entries()[2].token, 5);
        assert_eq!(transcript.entries()[2].index, 2);
        assert!(transcript.entries()[0].is_loop());
    }

    #[test]
    fn transcript_is_off_by_default() {
        let finished = run(&counter_table(), Counter::default(), [0]).unwrap();
        assert!(finished.transcript.is_none());
    }

    #[test]
    fn action_receives_token_and_both_states() {
        let table = TableBuilder::<Phase, u8, Vec<(u8, Phase, Phase)>>::new()
            .initial(Phase::Start)
            .with_transition(|t| {
                t.from(Phase::Start)
                    .to(Phase::End)
                    .on(1)
                    .action(|seen, _, step| {
                        seen.push((*step.token, *step.from, *step.to));
                        Ok(())
                    })
            })
            .unwrap()
            .build()
            .unwrap();

        let finished = run(&table, Vec::new(), [1]).unwrap();

        assert_eq!(finished.user, vec![(1, Phase::Start, Phase::End)]);
    }

    #[test]
    fn action_error_propagates_and_keeps_state() {
        let table = TableBuilder::<Phase, u8, u32, (), Refused>::new()
            .initial(Phase::Start)
            .with_transition(|t| {
                t.from(Phase::Start).to(Phase::End).action(|_, _, step| {
                    if *step.token == 9 {
                        Err(Refused(9))
                    } else {
                        Ok(())
                    }
                })
            })
            .unwrap()
            .build()
            .unwrap();

        let (mut runner, _) = table.runner(0, RunConfig::default()).unwrap();
        let err = runner.step(9).unwrap_err();

        assert!(!err.is_unmatched());
        assert_eq!(err.into_action_error(), Some(Refused(9)));
        assert_eq!(runner.current_state(), &Phase::Start);
        assert!(runner.is_halted());
    }

    #[test]
    fn halted_runner_rejects_further_use() {
        let table = counter_table();
        let (mut runner, _) = table.runner(Counter::default(), RunConfig::default()).unwrap();

        assert!(runner.step(4).unwrap_err().is_unmatched());
        assert!(matches!(runner.step(1), Err(RunError::Halted)));
        assert!(matches!(runner.finish(), Err(RunError::Halted)));
    }

    #[test]
    fn state_without_rules_rejects_tokens() {
        let mut table: Table<Phase, u8, ()> = Table::new(Phase::Start, None, None);
        table.push_rule(
            Phase::Start,
            crate::engine::Rule {
                matcher: Matcher::exact(0),
                to: Phase::End,
                action: None,
            },
        );

        let err = run(&table, (), [0, 0]).unwrap_err();
        assert_eq!(
            err.unmatched(),
            Some(&UnmatchedToken {
                state: Phase::End,
                token: 0
            })
        );
    }

    #[test]
    fn user_state_is_reachable_mid_run() {
        let table = counter_table();
        let (mut runner, _) = table.runner(Counter::default(), RunConfig::default()).unwrap();

        runner.feed([1, 1]).unwrap();
        assert_eq!(runner.user().ones, 2);
        assert_eq!(runner.steps_taken(), 2);

        runner.user_mut().ones = 10;
        let (_, emitted) = runner.finish().unwrap();
        assert_eq!(emitted, vec![10]);
    }
}
