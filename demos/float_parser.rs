//! Float Parser
//!
//! Recognises decimal numbers one character at a time. The first bad
//! character moves the machine into an error state that records what went
//! wrong and absorbs the rest of the input.
//!
//! Run with: cargo run --example float_parser -- 1 1.0 .0 1.2.0

use mealy::{RunConfig, TableBuilder};
use tracing_subscriber::EnvFilter;

#[derive(Clone, Copy, PartialEq, Debug)]
enum Float {
    First,
    BeforeDot,
    AfterDot,
    Error,
}

#[derive(Debug, Default)]
struct Check {
    error: Option<String>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let digit = |c: &char| c.is_ascii_digit();

    let table = TableBuilder::<Float, char, Check>::new()
        .initial(Float::First)
        .with_transition(|t| t.from(Float::First).to(Float::BeforeDot).when(digit))?
        .with_transition(|t| t.read(Float::BeforeDot).when(digit))?
        .with_transition(|t| t.from(Float::BeforeDot).to(Float::AfterDot).on('.'))?
        .with_transition(|t| t.read(Float::AfterDot).when(digit))?
        .with_transition(|t| {
            t.from_each([Float::First, Float::BeforeDot, Float::AfterDot])
                .to(Float::Error)
                .action(|check, _, step| {
                    check.error = Some(format!("unexpected char {} @ {:?}", step.token, step.from));
                    Ok(())
                })
        })?
        .with_transition(|t| t.read(Float::Error))?
        .build()?;

    let args: Vec<String> = std::env::args().skip(1).collect();
    let inputs = if args.is_empty() {
        vec!["1".to_string(), "1.0".to_string(), ".0".to_string(), "1.2.0".to_string()]
    } else {
        args
    };

    println!("=== Float Parser ===\n");

    let config = RunConfig::discarding().with_transcript(true);
    for input in &inputs {
        let (finished, _) = mealy::run_with(&table, Check::default(), input.chars(), &config)?;
        let path = finished
            .transcript
            .as_ref()
            .map(|transcript| transcript.path())
            .unwrap_or_default();

        match &finished.user.error {
            None => println!("{input:>8}  ok        {path:?}"),
            Some(error) => println!("{input:>8}  {error}"),
        }
    }

    Ok(())
}
