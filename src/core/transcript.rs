//! Transition transcripts.
//!
//! A transcript is the ordered record of the transitions one run took. It
//! lives in memory for the duration of the run and is handed back to the
//! caller with the run's result.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Record of a single accepted token.
///
/// # Example
///
/// ```rust
/// use mealy::core::TranscriptEntry;
/// use chrono::Utc;
///
/// let entry = TranscriptEntry {
///     index: 0,
///     from: "start",
///     to: "end",
///     token: 0,
///     timestamp: Utc::now(),
/// };
///
/// assert!(!entry.is_loop());
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TranscriptEntry<S, T> {
    /// Position of the token in the input, starting at zero
    pub index: usize,
    /// The state the token was read in
    pub from: S,
    /// The state the machine moved to
    pub to: S,
    /// The token that was accepted
    pub token: T,
    /// When the transition was taken
    pub timestamp: DateTime<Utc>,
}

impl<S: PartialEq, T> TranscriptEntry<S, T> {
    /// Whether this transition stayed in the same state.
    pub fn is_loop(&self) -> bool {
        self.from == self.to
    }
}

/// Ordered transcript of one run.
///
/// # Example
///
/// ```rust
/// use mealy::core::{Transcript, TranscriptEntry};
/// use chrono::Utc;
///
/// let mut transcript = Transcript::new("start");
///
/// transcript.record(TranscriptEntry {
///     index: 0,
///     from: "start",
///     to: "start",
///     token: 1,
///     timestamp: Utc::now(),
/// });
/// transcript.record(TranscriptEntry {
///     index: 1,
///     from: "start",
///     to: "end",
///     token: 0,
///     timestamp: Utc::now(),
/// });
///
/// assert_eq!(transcript.path(), vec![&"start", &"start", &"end"]);
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Transcript<S, T> {
    initial: S,
    entries: Vec<TranscriptEntry<S, T>>,
}

impl<S, T> Transcript<S, T> {
    /// Create an empty transcript starting at `initial`.
    pub fn new(initial: S) -> Self {
        Self {
            initial,
            entries: Vec::new(),
        }
    }

    /// Append an entry.
    pub fn record(&mut self, entry: TranscriptEntry<S, T>) {
        self.entries.push(entry);
    }

    /// The state the run started in.
    pub fn initial(&self) -> &S {
        &self.initial
    }

    /// All entries in the order they were taken.
    pub fn entries(&self) -> &[TranscriptEntry<S, T>] {
        &self.entries
    }

    /// Number of recorded transitions.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no transition was recorded.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Get the path of states traversed.
    ///
    /// Returns the initial state followed by the `to` state of each entry.
    pub fn path(&self) -> Vec<&S> {
        std::iter::once(&self.initial)
            .chain(self.entries.iter().map(|entry| &entry.to))
            .collect()
    }

    /// Time elapsed between the first and last recorded transition.
    ///
    /// Returns `None` for an empty transcript.
    pub fn duration(&self) -> Option<Duration> {
        if let (Some(first), Some(last)) = (self.entries.first(), self.entries.last()) {
            let duration = last.timestamp.signed_duration_since(first.timestamp);
            duration.to_std().ok()
        } else {
            None
        }
    }
}
