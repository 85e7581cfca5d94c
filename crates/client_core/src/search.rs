//! Debounced typeahead over the course search endpoint.
//!
//! Every keystroke re-arms a revocable delay timer. When a timer settles
//! uncancelled the resolver either clears the suggestions (query too short)
//! or hands back a [`SearchLookup`] tagged with a fresh generation. Results
//! are applied only when their generation is still the newest one, so a slow
//! reply for an older query can never overwrite a newer one. The
//! recommendation path deliberately has no such guard, see
//! [`crate::recommend`].

use shared::protocol::Suggestion;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::error::ApiCallError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DebounceTicket(pub u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Generation(pub u64);

/// Revocable handle to a pending debounce timer. Dropping it aborts the task.
pub struct DebounceHandle {
    ticket: DebounceTicket,
    task: JoinHandle<()>,
}

impl DebounceHandle {
    pub fn new(ticket: DebounceTicket, task: JoinHandle<()>) -> Self {
        Self { ticket, task }
    }

    pub fn ticket(&self) -> DebounceTicket {
        self.ticket
    }

    pub fn cancel(self) {
        drop(self);
    }
}

impl Drop for DebounceHandle {
    fn drop(&mut self) {
        self.task.abort();
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchLookup {
    pub generation: Generation,
    pub query: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DebounceOutcome {
    /// The timer was superseded by a later keystroke.
    Superseded,
    /// Query below the minimum length; suggestions cleared, nothing issued.
    Cleared,
    Lookup(SearchLookup),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookupOutcome {
    Applied { count: usize },
    /// Lookup failed; the suggestion set degraded to empty.
    Degraded,
    /// A newer generation exists; the result was dropped.
    Stale,
}

pub struct SearchResolver {
    query: String,
    suggestions: Vec<Suggestion>,
    pending_ticket: Option<DebounceTicket>,
    timer: Option<DebounceHandle>,
    last_ticket: u64,
    latest_generation: u64,
    min_query_chars: usize,
    limit: usize,
}

impl SearchResolver {
    pub fn new(min_query_chars: usize, limit: usize) -> Self {
        Self {
            query: String::new(),
            suggestions: Vec::new(),
            pending_ticket: None,
            timer: None,
            last_ticket: 0,
            latest_generation: 0,
            min_query_chars,
            limit,
        }
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn current_suggestions(&self) -> &[Suggestion] {
        &self.suggestions
    }

    pub fn latest_generation(&self) -> Generation {
        Generation(self.latest_generation)
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    pub fn has_pending_timer(&self) -> bool {
        self.pending_ticket.is_some()
    }

    /// Records the newest text and revokes any pending timer. The caller
    /// starts a timer for the returned ticket and hands it to [`Self::arm`].
    pub fn on_input(&mut self, text: &str) -> DebounceTicket {
        if let Some(timer) = self.timer.take() {
            timer.cancel();
        }
        self.query = text.to_string();
        self.last_ticket += 1;
        let ticket = DebounceTicket(self.last_ticket);
        self.pending_ticket = Some(ticket);
        ticket
    }

    pub fn arm(&mut self, handle: DebounceHandle) {
        if self.pending_ticket == Some(handle.ticket()) {
            self.timer = Some(handle);
        }
    }

    /// A timer fired. Its ticket is checked against the armed one because an
    /// abort can lose the race with a timer that already fired.
    pub fn on_debounce_elapsed(&mut self, ticket: DebounceTicket) -> DebounceOutcome {
        if self.pending_ticket != Some(ticket) {
            debug!(ticket = ticket.0, "search: ignoring superseded debounce timer");
            return DebounceOutcome::Superseded;
        }
        self.pending_ticket = None;
        self.timer = None;

        // Clearing also claims a generation so a lookup still in flight for
        // an older, longer query is stale when it lands.
        self.latest_generation += 1;
        let generation = Generation(self.latest_generation);

        if self.query.chars().count() < self.min_query_chars {
            self.suggestions.clear();
            return DebounceOutcome::Cleared;
        }

        DebounceOutcome::Lookup(SearchLookup {
            generation,
            query: self.query.clone(),
        })
    }

    pub fn apply_result(
        &mut self,
        generation: Generation,
        result: Result<Vec<Suggestion>, ApiCallError>,
    ) -> LookupOutcome {
        if generation.0 != self.latest_generation {
            debug!(
                generation = generation.0,
                latest = self.latest_generation,
                "search: dropping stale lookup result"
            );
            return LookupOutcome::Stale;
        }

        match result {
            Ok(mut suggestions) => {
                suggestions.truncate(self.limit);
                let count = suggestions.len();
                self.suggestions = suggestions;
                LookupOutcome::Applied { count }
            }
            Err(err) => {
                warn!(
                    generation = generation.0,
                    error = %err,
                    "search: lookup failed; clearing suggestions"
                );
                self.suggestions.clear();
                LookupOutcome::Degraded
            }
        }
    }

    /// Drops the query, the pending timer and the visible suggestions, and
    /// invalidates every lookup still in flight.
    pub fn reset(&mut self) {
        if let Some(timer) = self.timer.take() {
            timer.cancel();
        }
        self.pending_ticket = None;
        self.query.clear();
        self.suggestions.clear();
        self.latest_generation += 1;
    }
}

#[cfg(test)]
mod tests {
    use shared::domain::CourseCode;

    use super::*;

    fn suggestion(code: &str) -> Suggestion {
        Suggestion {
            code: CourseCode::from(code),
            title: format!("{code} title"),
        }
    }

    fn settle(resolver: &mut SearchResolver, text: &str) -> DebounceOutcome {
        let ticket = resolver.on_input(text);
        resolver.on_debounce_elapsed(ticket)
    }

    #[test]
    fn short_queries_never_issue_lookups() {
        for text in ["", "C", "é"] {
            let mut resolver = SearchResolver::new(2, 5);
            assert_eq!(settle(&mut resolver, text), DebounceOutcome::Cleared);
            assert!(resolver.current_suggestions().is_empty());
        }
    }

    #[test]
    fn minimum_length_query_issues_lookup() {
        let mut resolver = SearchResolver::new(2, 5);
        assert_eq!(settle(&mut resolver, "C"), DebounceOutcome::Cleared);
        match settle(&mut resolver, "CH") {
            DebounceOutcome::Lookup(lookup) => assert_eq!(lookup.query, "CH"),
            other => panic!("unexpected outcome: {other:?}"),
        }
    }

    #[test]
    fn query_length_counts_characters_not_bytes() {
        let mut resolver = SearchResolver::new(3, 5);
        assert_eq!(settle(&mut resolver, "éé"), DebounceOutcome::Cleared);
    }

    #[test]
    fn only_latest_ticket_settles() {
        let mut resolver = SearchResolver::new(2, 5);
        let first = resolver.on_input("CH");
        let second = resolver.on_input("CHEM");
        assert_eq!(
            resolver.on_debounce_elapsed(first),
            DebounceOutcome::Superseded
        );
        match resolver.on_debounce_elapsed(second) {
            DebounceOutcome::Lookup(lookup) => {
                assert_eq!(lookup.query, "CHEM");
                assert_eq!(lookup.generation, Generation(1));
            }
            other => panic!("unexpected outcome: {other:?}"),
        }
        assert!(!resolver.has_pending_timer());
        assert_eq!(
            resolver.on_debounce_elapsed(second),
            DebounceOutcome::Superseded
        );
    }

    #[test]
    fn newer_generation_wins_regardless_of_arrival_order() {
        let mut resolver = SearchResolver::new(2, 5);
        let DebounceOutcome::Lookup(g1) = settle(&mut resolver, "CHEM") else {
            panic!("expected lookup");
        };
        let DebounceOutcome::Lookup(g2) = settle(&mut resolver, "CHEM1") else {
            panic!("expected lookup");
        };
        assert!(g1.generation < g2.generation);

        assert_eq!(
            resolver.apply_result(g2.generation, Ok(vec![suggestion("CHEM121")])),
            LookupOutcome::Applied { count: 1 }
        );
        assert_eq!(
            resolver.apply_result(g1.generation, Ok(vec![suggestion("CHEM101")])),
            LookupOutcome::Stale
        );
        assert_eq!(resolver.current_suggestions(), &[suggestion("CHEM121")]);
    }

    #[test]
    fn shortening_the_query_invalidates_inflight_lookup() {
        let mut resolver = SearchResolver::new(2, 5);
        let DebounceOutcome::Lookup(lookup) = settle(&mut resolver, "CHEM") else {
            panic!("expected lookup");
        };
        assert_eq!(settle(&mut resolver, "C"), DebounceOutcome::Cleared);
        assert_eq!(
            resolver.apply_result(lookup.generation, Ok(vec![suggestion("CHEM121")])),
            LookupOutcome::Stale
        );
        assert!(resolver.current_suggestions().is_empty());
    }

    #[test]
    fn failed_lookup_degrades_to_empty() {
        let mut resolver = SearchResolver::new(2, 5);
        let DebounceOutcome::Lookup(first) = settle(&mut resolver, "CHEM") else {
            panic!("expected lookup");
        };
        resolver.apply_result(first.generation, Ok(vec![suggestion("CHEM121")]));

        let DebounceOutcome::Lookup(second) = settle(&mut resolver, "CHEMX") else {
            panic!("expected lookup");
        };
        let outcome = resolver.apply_result(
            second.generation,
            Err(ApiCallError::Status {
                status: 500,
                detail: None,
            }),
        );
        assert_eq!(outcome, LookupOutcome::Degraded);
        assert!(resolver.current_suggestions().is_empty());
    }

    #[test]
    fn results_are_truncated_to_limit() {
        let mut resolver = SearchResolver::new(2, 2);
        let DebounceOutcome::Lookup(lookup) = settle(&mut resolver, "COMP") else {
            panic!("expected lookup");
        };
        let many = vec![suggestion("COMP140"), suggestion("COMP182"), suggestion("COMP215")];
        assert_eq!(
            resolver.apply_result(lookup.generation, Ok(many)),
            LookupOutcome::Applied { count: 2 }
        );
    }

    #[test]
    fn reset_clears_state_and_stales_inflight() {
        let mut resolver = SearchResolver::new(2, 5);
        let DebounceOutcome::Lookup(lookup) = settle(&mut resolver, "CHEM") else {
            panic!("expected lookup");
        };
        let pending = resolver.on_input("CHEM12");
        resolver.reset();
        assert_eq!(resolver.query(), "");
        assert_eq!(
            resolver.on_debounce_elapsed(pending),
            DebounceOutcome::Superseded
        );
        assert_eq!(
            resolver.apply_result(lookup.generation, Ok(vec![suggestion("CHEM121")])),
            LookupOutcome::Stale
        );
    }
}
