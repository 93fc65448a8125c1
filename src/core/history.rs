//! Bounded transition history.
//!
//! The registry records every committed transition here. The history is
//! capped; once full, the oldest record is evicted first.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::time::Duration;

/// Default number of transitions a registry remembers.
pub const DEFAULT_HISTORY_LIMIT: usize = 50;

/// Record of a single committed transition.
///
/// # Example
///
/// ```rust
/// use hookstate::core::StateTransition;
/// use chrono::Utc;
///
/// let transition = StateTransition {
///     from: "Idle",
///     to: "Running",
///     timestamp: Utc::now(),
/// };
/// assert!(!transition.is_self_transition());
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StateTransition<S> {
    /// The state being transitioned from
    pub from: S,
    /// The state being transitioned to
    pub to: S,
    /// When the transition was committed
    pub timestamp: DateTime<Utc>,
}

impl<S: PartialEq> StateTransition<S> {
    pub fn is_self_transition(&self) -> bool {
        self.from == self.to
    }
}

/// Ordered, bounded history of transitions.
///
/// # Example
///
/// ```rust
/// use hookstate::core::{StateHistory, StateTransition};
/// use chrono::Utc;
///
/// let mut history = StateHistory::with_limit(2);
/// for (from, to) in [("A", "B"), ("B", "C"), ("C", "D")] {
///     history.record(StateTransition { from, to, timestamp: Utc::now() });
/// }
///
/// // "A -> B" was evicted
/// assert_eq!(history.len(), 2);
/// assert_eq!(history.get_path(), vec![&"B", &"C", &"D"]);
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(from = "StoredHistory<S>")]
pub struct StateHistory<S> {
    transitions: VecDeque<StateTransition<S>>,
    limit: usize,
}

/// Wire shape of a history before the limit is applied.
#[derive(Deserialize)]
struct StoredHistory<S> {
    transitions: VecDeque<StateTransition<S>>,
    limit: usize,
}

impl<S> From<StoredHistory<S>> for StateHistory<S> {
    /// Keeps only the newest `limit` records.
    fn from(stored: StoredHistory<S>) -> Self {
        let StoredHistory {
            mut transitions,
            limit,
        } = stored;
        while transitions.len() > limit {
            transitions.pop_front();
        }
        Self { transitions, limit }
    }
}

impl<S> Default for StateHistory<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S> StateHistory<S> {
    /// Create an empty history holding up to [`DEFAULT_HISTORY_LIMIT`] records.
    pub fn new() -> Self {
        Self::with_limit(DEFAULT_HISTORY_LIMIT)
    }

    /// Create an empty history holding up to `limit` records.
    ///
    /// A limit of zero disables recording entirely.
    pub fn with_limit(limit: usize) -> Self {
        Self {
            transitions: VecDeque::with_capacity(limit.min(DEFAULT_HISTORY_LIMIT)),
            limit,
        }
    }

    /// Append a transition, evicting the oldest record when full.
    pub fn record(&mut self, transition: StateTransition<S>) {
        if self.limit == 0 {
            return;
        }
        while self.transitions.len() >= self.limit {
            self.transitions.pop_front();
        }
        self.transitions.push_back(transition);
    }

    /// Get the path of states traversed.
    ///
    /// Returns the `from` state of the oldest retained transition followed
    /// by the `to` state of every retained transition.
    pub fn get_path(&self) -> Vec<&S> {
        let mut path = Vec::with_capacity(self.transitions.len() + 1);
        if let Some(first) = self.transitions.front() {
            path.push(&first.from);
        }
        for transition in &self.transitions {
            path.push(&transition.to);
        }
        path
    }

    /// Time between the oldest and newest retained transitions.
    ///
    /// Returns `None` if there are no transitions.
    pub fn duration(&self) -> Option<Duration> {
        if let (Some(first), Some(last)) = (self.transitions.front(), self.transitions.back()) {
            let duration = last.timestamp.signed_duration_since(first.timestamp);
            duration.to_std().ok()
        } else {
            None
        }
    }

    /// Retained transitions, oldest first.
    pub fn transitions(&self) -> impl ExactSizeIterator<Item = &StateTransition<S>> {
        self.transitions.iter()
    }

    pub fn last(&self) -> Option<&StateTransition<S>> {
        self.transitions.back()
    }

    pub fn len(&self) -> usize {
        self.transitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transitions.is_empty()
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    pub fn clear(&mut self) {
        self.transitions.clear();
    }
}
