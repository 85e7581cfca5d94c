//! One advising session: owns the resolver, the selection and the request
//! controller, and applies completions from spawned timers and network
//! calls one event at a time.
//!
//! Spawned tasks never touch session state. They post a [`SessionEvent`]
//! back over the session channel and the owner applies it through
//! [`AdvisorSession::handle_event`], so mutations never interleave.

use std::{sync::Arc, time::Duration};

use shared::{
    domain::{CourseCode, CreditsTarget, Track},
    protocol::{RecommendResponse, Suggestion},
};
use tokio::sync::mpsc;
use tracing::{debug, info};
use uuid::Uuid;

use crate::{
    api::AdvisorApi,
    config::ClientSettings,
    error::ApiCallError,
    feedback::FeedbackRecorder,
    recommend::{ProgramContext, RecommendationController, RequestState, SubmitTicket},
    search::{
        DebounceHandle, DebounceOutcome, DebounceTicket, Generation, LookupOutcome, SearchResolver,
    },
    selection::CourseSelection,
    view::{project, SessionView},
};

#[derive(Debug)]
pub enum SessionEvent {
    DebounceElapsed(DebounceTicket),
    SearchSettled {
        generation: Generation,
        result: Result<Vec<Suggestion>, ApiCallError>,
    },
    RecommendationSettled {
        ticket: SubmitTicket,
        result: Result<RecommendResponse, ApiCallError>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionChange {
    SearchIssued { generation: Generation, query: String },
    SuggestionsCleared,
    SuggestionsUpdated { count: usize },
    SuggestionsDegraded,
    /// Superseded timer or stale lookup; nothing visible changed.
    Ignored,
    RequestSettled { ticket: SubmitTicket },
}

pub struct AdvisorSession {
    session_id: Uuid,
    program: ProgramContext,
    api: Arc<dyn AdvisorApi>,
    debounce: Duration,
    search: SearchResolver,
    selection: CourseSelection,
    requests: RecommendationController,
    feedback: FeedbackRecorder,
    track: Option<Track>,
    credits_target: CreditsTarget,
    lookups_issued: u64,
    events_tx: mpsc::UnboundedSender<SessionEvent>,
    events_rx: mpsc::UnboundedReceiver<SessionEvent>,
}

impl AdvisorSession {
    pub fn new(
        program: ProgramContext,
        api: Arc<dyn AdvisorApi>,
        settings: &ClientSettings,
    ) -> Self {
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        let session_id = Uuid::new_v4();
        info!(%session_id, program_id = %program.program_id, "session: started");
        Self {
            session_id,
            program,
            api,
            debounce: settings.debounce(),
            search: SearchResolver::new(settings.min_query_chars, settings.suggestion_limit),
            selection: CourseSelection::new(),
            requests: RecommendationController::new(),
            feedback: FeedbackRecorder::new(),
            track: None,
            credits_target: CreditsTarget::default(),
            lookups_issued: 0,
            events_tx,
            events_rx,
        }
    }

    pub fn session_id(&self) -> Uuid {
        self.session_id
    }

    pub fn program(&self) -> &ProgramContext {
        &self.program
    }

    pub fn track(&self) -> Option<Track> {
        self.track
    }

    pub fn credits_target(&self) -> CreditsTarget {
        self.credits_target
    }

    pub fn current_suggestions(&self) -> &[Suggestion] {
        self.search.current_suggestions()
    }

    pub fn selection(&self) -> &CourseSelection {
        &self.selection
    }

    pub fn request_state(&self) -> &RequestState {
        self.requests.state()
    }

    pub fn feedback(&self) -> &FeedbackRecorder {
        &self.feedback
    }

    pub fn feedback_mut(&mut self) -> &mut FeedbackRecorder {
        &mut self.feedback
    }

    /// Number of search lookups sent so far.
    pub fn lookups_issued(&self) -> u64 {
        self.lookups_issued
    }

    pub fn view(&self) -> SessionView {
        project(&self.search, &self.selection, &self.requests)
    }

    pub fn set_track(&mut self, track: Option<Track>) {
        self.track = track;
    }

    pub fn set_credits_target(&mut self, credits_target: CreditsTarget) {
        self.credits_target = credits_target;
    }

    pub fn on_input(&mut self, text: &str) {
        let ticket = self.search.on_input(text);
        let tx = self.events_tx.clone();
        let delay = self.debounce;
        let task = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            if tx.send(SessionEvent::DebounceElapsed(ticket)).is_err() {
                debug!(ticket = ticket.0, "search: session gone before debounce elapsed");
            }
        });
        self.search.arm(DebounceHandle::new(ticket, task));
    }

    /// Adds `code` to the selection and resets the picker. Returns whether
    /// the selection changed; duplicate picks are no-ops.
    pub fn accept_suggestion(&mut self, code: CourseCode) -> bool {
        self.search.reset();
        let added = self.selection.add(code.clone());
        debug!(%code, added, "selection: accept suggestion");
        added
    }

    pub fn remove_selection(&mut self, code: &CourseCode) -> bool {
        let removed = self.selection.remove(code);
        debug!(%code, removed, "selection: remove");
        removed
    }

    /// Sends one recommendation request built from the current form.
    /// Calls are never coalesced; see [`crate::recommend`] for how
    /// overlapping responses are applied.
    pub fn submit(&mut self) -> SubmitTicket {
        let (ticket, request) = self.requests.submit(
            &self.program,
            self.track,
            &self.selection,
            self.credits_target,
        );
        let api = Arc::clone(&self.api);
        let tx = self.events_tx.clone();
        tokio::spawn(async move {
            let result = api.recommend(&request).await;
            if tx
                .send(SessionEvent::RecommendationSettled { ticket, result })
                .is_err()
            {
                debug!(ticket = ticket.0, "recommend: session gone before response");
            }
        });
        ticket
    }

    pub async fn next_event(&mut self) -> Option<SessionEvent> {
        self.events_rx.recv().await
    }

    /// Waits for the next completion and applies it.
    pub async fn process_next(&mut self) -> Option<SessionChange> {
        let event = self.next_event().await?;
        Some(self.handle_event(event))
    }

    pub fn handle_event(&mut self, event: SessionEvent) -> SessionChange {
        match event {
            SessionEvent::DebounceElapsed(ticket) => {
                match self.search.on_debounce_elapsed(ticket) {
                    DebounceOutcome::Superseded => SessionChange::Ignored,
                    DebounceOutcome::Cleared => SessionChange::SuggestionsCleared,
                    DebounceOutcome::Lookup(lookup) => {
                        self.spawn_lookup(lookup.generation, lookup.query.clone());
                        SessionChange::SearchIssued {
                            generation: lookup.generation,
                            query: lookup.query,
                        }
                    }
                }
            }
            SessionEvent::SearchSettled { generation, result } => {
                match self.search.apply_result(generation, result) {
                    LookupOutcome::Applied { count } => {
                        SessionChange::SuggestionsUpdated { count }
                    }
                    LookupOutcome::Degraded => SessionChange::SuggestionsDegraded,
                    LookupOutcome::Stale => SessionChange::Ignored,
                }
            }
            SessionEvent::RecommendationSettled { ticket, result } => {
                self.requests.resolve(ticket, result);
                self.feedback.reset();
                SessionChange::RequestSettled { ticket }
            }
        }
    }

    fn spawn_lookup(&mut self, generation: Generation, query: String) {
        self.lookups_issued += 1;
        debug!(generation = generation.0, query = %query, "search: issuing lookup");
        let api = Arc::clone(&self.api);
        let program_id = self.program.program_id.clone();
        let limit = self.search.limit();
        let tx = self.events_tx.clone();
        tokio::spawn(async move {
            let result = api.search_courses(&program_id, &query, limit).await;
            if tx
                .send(SessionEvent::SearchSettled { generation, result })
                .is_err()
            {
                debug!(generation = generation.0, "search: session gone before lookup settled");
            }
        });
    }
}
