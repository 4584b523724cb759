//! Per-invocation output collection.

use crate::config::Emission;

/// Output channel handed to every action invocation.
///
/// Each invocation gets a fresh emitter. The engine takes its values once
/// the action returns and appends them to the run's output in emission
/// order. With [`Emission::Discard`] the values are dropped on the spot.
#[derive(Debug)]
pub struct Emitter<O> {
    values: Vec<O>,
    emission: Emission,
}

impl<O> Emitter<O> {
    pub(crate) fn new(emission: Emission) -> Self {
        Self {
            values: Vec::new(),
            emission,
        }
    }

    /// Emit one value.
    pub fn emit(&mut self, value: O) {
        if self.emission == Emission::Collect {
            self.values.push(value);
        }
    }

    /// Emit every value of an iterator, in order.
    pub fn emit_all<I>(&mut self, values: I)
    where
        I: IntoIterator<Item = O>,
    {
        for value in values {
            self.emit(value);
        }
    }

    /// Whether emitted values are being kept.
    pub fn is_collecting(&self) -> bool {
        self.emission == Emission::Collect
    }

    /// Number of values kept so far in this invocation.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub(crate) fn into_values(self) -> Vec<O> {
        self.values
    }
}

/// Run one action invocation inside a fresh emission scope.
///
/// This is the only place actions are called from, so the emitting and
/// non-emitting modes share every other part of the engine.
pub(crate) fn invoke<U, O, E, F>(user: &mut U, emission: Emission, action: F) -> Result<Vec<O>, E>
where
    F: FnOnce(&mut U, &mut Emitter<O>) -> Result<(), E>,
{
    let mut emitter = Emitter::new(emission);
    action(user, &mut emitter)?;
    Ok(emitter.into_values())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collecting_keeps_emission_order() {
        let mut emitter = Emitter::new(Emission::Collect);
        emitter.emit(1);
        emitter.emit_all([2, 3]);

        assert_eq!(emitter.len(), 3);
        assert_eq!(emitter.into_values(), vec![1, 2, 3]);
    }

    #[test]
    fn discarding_drops_values() {
        let mut emitter = Emitter::new(Emission::Discard);
        emitter.emit("ignored");

        assert!(!emitter.is_collecting());
        assert!(emitter.is_empty());
    }

    #[test]
    fn invoke_returns_fresh_values_per_call() {
        let mut calls = 0;

        let first = invoke(&mut calls, Emission::Collect, |calls, out| {
            *calls += 1;
            out.emit(*calls);
            Ok::<_, ()>(())
        })
        .unwrap();
        let second = invoke(&mut calls, Emission::Collect, |calls, out| {
            *calls += 1;
            out.emit(*calls);
            Ok::<_, ()>(())
        })
        .unwrap();

        assert_eq!(first, vec![1]);
        assert_eq!(second, vec![2]);
    }

    #[test]
    fn invoke_propagates_action_error() {
        let mut user = 0u8;
        let result: Result<Vec<u8>, &str> = invoke(&mut user, Emission::Collect, |_, out| {
            out.emit(1);
            Err("boom")
        });

        assert_eq!(result, Err("boom"));
    }
}
