//! Submit/pending/success/error lifecycle for recommendation requests.
//!
//! Unlike the search path there is no generation guard here: whichever
//! response lands last overwrites the state, even if it belongs to an older
//! submit. This mirrors the product behavior and is intentional; do not
//! "fix" it into the search policy. Out-of-order application is logged so it
//! stays visible.

use serde_json::Map;
use shared::{
    domain::{CreditsTarget, ProgramId, Track},
    protocol::{RecommendRequest, RecommendResponse},
};
use tracing::{info, warn};

use crate::{error::ApiCallError, selection::CourseSelection};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgramContext {
    pub university: String,
    pub program_id: ProgramId,
    pub major: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub enum RequestState {
    #[default]
    Idle,
    Pending,
    Success(RecommendResponse),
    Failed(String),
}

impl RequestState {
    pub fn is_pending(&self) -> bool {
        matches!(self, RequestState::Pending)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubmitTicket(pub u64);

#[derive(Debug, Default)]
pub struct RecommendationController {
    state: RequestState,
    last_ticket: u64,
    in_flight: usize,
}

impl RecommendationController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &RequestState {
        &self.state
    }

    pub fn in_flight(&self) -> usize {
        self.in_flight
    }

    /// Moves to `Pending` from any state and builds the one request the
    /// caller must send for the returned ticket.
    pub fn submit(
        &mut self,
        program: &ProgramContext,
        track: Option<Track>,
        selection: &CourseSelection,
        credits_target: CreditsTarget,
    ) -> (SubmitTicket, RecommendRequest) {
        self.last_ticket += 1;
        self.in_flight += 1;
        self.state = RequestState::Pending;

        let request = RecommendRequest {
            university: program.university.clone(),
            program_id: program.program_id.clone(),
            track,
            completed: selection.snapshot(),
            credits_target,
            preferences: Map::new(),
        };
        info!(
            ticket = self.last_ticket,
            program_id = %program.program_id,
            completed = request.completed.len(),
            credits_target = credits_target.get(),
            in_flight = self.in_flight,
            "recommend: submitted"
        );
        (SubmitTicket(self.last_ticket), request)
    }

    /// Applies a response unconditionally (last response wins).
    pub fn resolve(
        &mut self,
        ticket: SubmitTicket,
        outcome: Result<RecommendResponse, ApiCallError>,
    ) {
        self.in_flight = self.in_flight.saturating_sub(1);
        if ticket.0 < self.last_ticket {
            warn!(
                ticket = ticket.0,
                newest = self.last_ticket,
                "recommend: applying response from an older submit over newer state"
            );
        }

        self.state = match outcome {
            Ok(response) => {
                info!(
                    ticket = ticket.0,
                    recommendations = response.recommendations.len(),
                    warnings = response.warnings.len(),
                    "recommend: succeeded"
                );
                RequestState::Success(response)
            }
            Err(err) => {
                warn!(ticket = ticket.0, error = %err, "recommend: failed");
                RequestState::Failed(err.diagnostic())
            }
        };
    }
}

#[cfg(test)]
mod tests {
    use shared::{domain::CourseCode, protocol::Recommendation};

    use super::*;
    use crate::error::TransportKind;

    fn program() -> ProgramContext {
        ProgramContext {
            university: "Rice".into(),
            program_id: ProgramId::from("rice-cs-2025"),
            major: Some("Computer Science".into()),
        }
    }

    fn response_with(code: &str) -> RecommendResponse {
        RecommendResponse {
            recommendations: vec![Recommendation {
                code: CourseCode::from(code),
                title: "Course".into(),
                reason: "Needed".into(),
                fulfills: vec!["core".into()],
                prereq_ok: true,
                citations: Vec::new(),
            }],
            ..RecommendResponse::default()
        }
    }

    #[test]
    fn starts_idle() {
        let controller = RecommendationController::new();
        assert_eq!(controller.state(), &RequestState::Idle);
        assert_eq!(controller.in_flight(), 0);
    }

    #[test]
    fn submit_builds_request_from_snapshot() {
        let mut controller = RecommendationController::new();
        let mut selection = CourseSelection::new();
        selection.add(CourseCode::from("CHEM121"));

        let credits = CreditsTarget::new(15).expect("credits");
        let (ticket, request) =
            controller.submit(&program(), Some(Track::PreMed), &selection, credits);
        selection.add(CourseCode::from("MATH101"));

        assert_eq!(ticket, SubmitTicket(1));
        assert!(controller.state().is_pending());
        assert_eq!(request.university, "Rice");
        assert_eq!(request.completed, vec![CourseCode::from("CHEM121")]);
        assert_eq!(request.track, Some(Track::PreMed));
        assert_eq!(request.credits_target.get(), 15);
        assert!(request.preferences.is_empty());
    }

    #[test]
    fn last_resolved_response_wins_regardless_of_issue_order() {
        let mut controller = RecommendationController::new();
        let selection = CourseSelection::new();
        let (first, _) =
            controller.submit(&program(), None, &selection, CreditsTarget::default());
        let (second, _) =
            controller.submit(&program(), None, &selection, CreditsTarget::default());
        assert_eq!(controller.in_flight(), 2);

        controller.resolve(second, Ok(response_with("COMP182")));
        controller.resolve(first, Ok(response_with("COMP140")));

        assert_eq!(controller.in_flight(), 0);
        assert_eq!(
            controller.state(),
            &RequestState::Success(response_with("COMP140"))
        );
    }

    #[test]
    fn failure_is_recoverable_by_resubmitting() {
        let mut controller = RecommendationController::new();
        let selection = CourseSelection::new();
        let (ticket, _) =
            controller.submit(&program(), None, &selection, CreditsTarget::default());
        controller.resolve(
            ticket,
            Err(ApiCallError::transport(TransportKind::Connect, "connection refused")),
        );
        match controller.state() {
            RequestState::Failed(message) => assert!(!message.is_empty()),
            other => panic!("unexpected state: {other:?}"),
        }

        controller.submit(&program(), None, &selection, CreditsTarget::default());
        assert!(controller.state().is_pending());
    }

    #[test]
    fn resubmit_discards_prior_success() {
        let mut controller = RecommendationController::new();
        let selection = CourseSelection::new();
        let (ticket, _) =
            controller.submit(&program(), None, &selection, CreditsTarget::default());
        controller.resolve(ticket, Ok(response_with("COMP182")));
        controller.submit(&program(), None, &selection, CreditsTarget::default());
        assert_eq!(controller.state(), &RequestState::Pending);
    }

    #[test]
    fn malformed_payload_surfaces_as_failed() {
        let mut controller = RecommendationController::new();
        let (ticket, _) = controller.submit(
            &program(),
            None,
            &CourseSelection::new(),
            CreditsTarget::default(),
        );
        controller.resolve(ticket, Err(ApiCallError::Decode("missing field".into())));
        assert!(matches!(controller.state(), RequestState::Failed(_)));
    }
}
