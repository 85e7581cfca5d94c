//! Read-only projection consumed by renderers.

use shared::{
    domain::CourseCode,
    protocol::{Recommendation, Suggestion},
};

use crate::{
    recommend::{RecommendationController, RequestState},
    search::SearchResolver,
    selection::CourseSelection,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewPhase {
    Idle,
    Loading,
    Error(String),
    Populated,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Banners {
    pub warnings: Option<Vec<String>>,
    pub notes: Option<Vec<String>>,
    pub assumptions: Option<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SessionView {
    pub phase: ViewPhase,
    pub query: String,
    pub suggestions: Vec<Suggestion>,
    pub selection: Vec<CourseCode>,
    pub completed_count: usize,
    pub recommendations: Vec<Recommendation>,
    pub banners: Banners,
    pub submit_enabled: bool,
}

fn non_empty(lines: &[String]) -> Option<Vec<String>> {
    if lines.is_empty() {
        None
    } else {
        Some(lines.to_vec())
    }
}

pub fn project(
    search: &SearchResolver,
    selection: &CourseSelection,
    requests: &RecommendationController,
) -> SessionView {
    let (phase, recommendations, banners) = match requests.state() {
        RequestState::Idle => (ViewPhase::Idle, Vec::new(), Banners::default()),
        RequestState::Pending => (ViewPhase::Loading, Vec::new(), Banners::default()),
        RequestState::Failed(message) => (
            ViewPhase::Error(message.clone()),
            Vec::new(),
            Banners::default(),
        ),
        RequestState::Success(response) => (
            ViewPhase::Populated,
            response.recommendations.clone(),
            Banners {
                warnings: non_empty(&response.warnings),
                notes: non_empty(&response.notes),
                assumptions: non_empty(&response.assumptions),
            },
        ),
    };

    SessionView {
        submit_enabled: phase != ViewPhase::Loading,
        phase,
        query: search.query().to_string(),
        suggestions: search.current_suggestions().to_vec(),
        selection: selection.snapshot(),
        completed_count: selection.len(),
        recommendations,
        banners,
    }
}
