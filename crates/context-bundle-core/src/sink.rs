//! Delivery of suggestion results.
//!
//! The ranker never holds a reference to its consumer. Callers pass a
//! [`SuggestionSink`] per invocation; when two rankings overlap, whichever
//! delivers last wins.

use std::sync::Mutex;

/// Receives the final, ordered list of suggested file paths.
pub trait SuggestionSink: Send + Sync {
    fn deliver(&self, suggestions: &[String]);
}

impl<F> SuggestionSink for F
where
    F: Fn(&[String]) + Send + Sync,
{
    fn deliver(&self, suggestions: &[String]) {
        self(suggestions)
    }
}

/// Sink that records every delivery, for tests and embedding hosts that
/// poll for results.
#[derive(Default)]
pub struct CollectingSink {
    deliveries: Mutex<Vec<Vec<String>>>,
}

impl CollectingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// All deliveries so far, oldest first.
    pub fn deliveries(&self) -> Vec<Vec<String>> {
        self.deliveries.lock().map(|d| d.clone()).unwrap_or_default()
    }

    /// The most recent delivery, if any.
    pub fn last(&self) -> Option<Vec<String>> {
        self.deliveries.lock().ok().and_then(|d| d.last().cloned())
    }
}

impl SuggestionSink for CollectingSink {
    fn deliver(&self, suggestions: &[String]) {
        if let Ok(mut deliveries) = self.deliveries.lock() {
            deliveries.push(suggestions.to_vec());
        }
    }
}
