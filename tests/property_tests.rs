//! Property-based tests for the execution engine.
//!
//! These tests use proptest to verify properties hold across
//! many randomly generated inputs.

use mealy::{run_emitting, RunConfig, Table, TableBuilder};
use proptest::prelude::*;

#[derive(Clone, Copy, PartialEq, Debug)]
enum Phase {
    Start,
    End,
}

#[derive(Debug, Default, PartialEq)]
struct Counter {
    ones: usize,
    calls: Vec<&'static str>,
}

/// Count ones until a zero, then absorb everything.
fn counter_table() -> Table<Phase, u8, Counter, usize> {
    TableBuilder::<Phase, u8, Counter, usize>::new()
        .initial_with(Phase::Start, |c, _| {
            c.calls.push("initial");
            Ok(())
        })
        .with_transition(|t| {
            t.read(Phase::Start).on(1).action(|c, out, _| {
                c.ones += 1;
                out.emit(c.ones);
                Ok(())
            })
        })
        .unwrap()
        .with_transition(|t| t.from(Phase::Start).to(Phase::End).on(0))
        .unwrap()
        .with_transition(|t| t.read(Phase::End))
        .unwrap()
        .finish(|c, out| {
            c.calls.push("finish");
            out.emit(c.ones);
            Ok(())
        })
        .build()
        .unwrap()
}

/// Two rules on one state: a specific match then a wildcard.
fn priority_table() -> Table<Phase, char, (), &'static str> {
    TableBuilder::<Phase, char, (), &'static str>::new()
        .initial(Phase::Start)
        .with_transition(|t| {
            t.read(Phase::Start).on('a').action(|_, out, _| {
                out.emit("specific");
                Ok(())
            })
        })
        .unwrap()
        .with_transition(|t| {
            t.read(Phase::Start).action(|_, out, _| {
                out.emit("wildcard");
                Ok(())
            })
        })
        .unwrap()
        .build()
        .unwrap()
}

prop_compose! {
    fn ones_then_zero()(ones in 0..50usize, tail in prop::collection::vec(0..2u8, 0..10)) -> (usize, Vec<u8>) {
        let mut input = vec![1u8; ones];
        input.push(0);
        input.extend(tail);
        (ones, input)
    }
}

proptest! {
    #[test]
    fn runs_are_deterministic(input in prop::collection::vec(0..2u8, 0..40)) {
        let table = counter_table();

        let first = table.run_emitting(Counter::default(), input.clone()).unwrap();
        let second = table.run_emitting(Counter::default(), input).unwrap();

        prop_assert_eq!(first, second);
    }

    #[test]
    fn self_loop_counts_ones_before_zero((ones, input) in ones_then_zero()) {
        let finished = counter_table().run(Counter::default(), input.clone()).unwrap();

        prop_assert_eq!(finished.user.ones, ones);
        prop_assert_eq!(finished.state, Phase::End);
        prop_assert_eq!(finished.steps, input.len());
    }

    #[test]
    fn first_match_wins(input in prop::collection::vec(prop::char::range('a', 'e'), 0..30)) {
        let emitted = priority_table().run_emitting((), input.clone()).unwrap();

        let expected: Vec<&str> = input
            .iter()
            .map(|c| if *c == 'a' { "specific" } else { "wildcard" })
            .collect();
        prop_assert_eq!(emitted, expected);
    }

    #[test]
    fn unmatched_token_names_its_position(ones in 0..20usize, bad in 2..255u8) {
        let mut input = vec![1u8; ones];
        input.push(bad);
        input.push(1);

        let err = counter_table().run(Counter::default(), input).unwrap_err();
        let unmatched = err.unmatched().unwrap();

        prop_assert_eq!(unmatched.state, Phase::Start);
        prop_assert_eq!(unmatched.token, bad);
    }

    #[test]
    fn table_reuse_is_order_independent(
        a in prop::collection::vec(0..2u8, 0..20),
        b in prop::collection::vec(0..2u8, 0..20),
    ) {
        let table = counter_table();

        let a_first = table.run_emitting(Counter::default(), a.clone()).unwrap();
        let b_second = table.run_emitting(Counter::default(), b.clone()).unwrap();
        let b_first = table.run_emitting(Counter::default(), b).unwrap();
        let a_second = table.run_emitting(Counter::default(), a).unwrap();

        prop_assert_eq!(a_first, a_second);
        prop_assert_eq!(b_first, b_second);
    }

    #[test]
    fn lazy_and_eager_runs_agree(input in prop::collection::vec(0..3u8, 0..30)) {
        let table = counter_table();

        let eager = run_emitting(&table, Counter::default(), input.clone());
        let lazy: Result<Vec<usize>, _> = table.emissions(Counter::default(), input).collect();

        match (eager, lazy) {
            (Ok(eager), Ok(lazy)) => prop_assert_eq!(eager, lazy),
            (Err(eager), Err(lazy)) => prop_assert_eq!(eager.unmatched(), lazy.unmatched()),
            (eager, lazy) => prop_assert!(false, "modes disagree: {:?} vs {:?}", eager, lazy),
        }
    }

    #[test]
    fn transcript_path_follows_the_run((_, input) in ones_then_zero()) {
        let config = RunConfig::default().with_transcript(true);
        let (finished, _) = mealy::run_with(&counter_table(), Counter::default(), input.clone(), &config).unwrap();

        let transcript = finished.transcript.unwrap();
        prop_assert_eq!(transcript.len(), input.len());
        prop_assert_eq!(transcript.path().len(), input.len() + 1);
        prop_assert_eq!(*transcript.path()[input.len()], Phase::End);
    }
}

#[test]
fn empty_input_runs_only_initial_and_finish() {
    let finished = counter_table().run(Counter::default(), []).unwrap();

    assert_eq!(finished.user.calls, vec!["initial", "finish"]);
    assert_eq!(finished.steps, 0);
    assert_eq!(finished.state, Phase::Start);
}
