//! Counter
//!
//! Reads ones until the first zero, then emits how many ones it read.
//! Everything after the zero is absorbed by a wildcard self-loop.
//!
//! Run with: cargo run --example counter -- 1 1 1 1 0 1 0 0
//! Set RUST_LOG=mealy=trace to watch every transition.

use mealy::TableBuilder;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Default)]
struct Counter {
    ones: u32,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let table = TableBuilder::<&str, u8, Counter, u32>::new()
        .initial_with("start", |counter, _| {
            counter.ones = 0;
            Ok(())
        })
        .with_transition(|t| t.from("start").to("end").on(0))?
        .with_transition(|t| {
            t.read("start").on(1).action(|counter, _, _| {
                counter.ones += 1;
                Ok(())
            })
        })?
        // once we are in "end" we stay there, but the rest of the input
        // still has to be read
        .with_transition(|t| t.read("end"))?
        .finish(|counter, out| {
            out.emit(counter.ones);
            Ok(())
        })
        .build()?;

    let args: Vec<String> = std::env::args().skip(1).collect();
    let input: Vec<u8> = if args.is_empty() {
        vec![1, 1, 1, 1, 0, 1, 0, 0]
    } else {
        args.iter()
            .map(|arg| arg.parse::<u8>())
            .collect::<Result<_, _>>()?
    };

    println!("=== Counter ===\n");
    println!("Input: {input:?}");

    match table.run_emitting(Counter::default(), input) {
        Ok(emitted) => println!("Ones before the first zero: {emitted:?}"),
        Err(err) => println!("Rejected: {err}"),
    }

    Ok(())
}
