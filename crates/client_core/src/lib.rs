//! Client-side session controller for the course advisor: debounced course
//! typeahead, the completed-course selection, and the recommendation request
//! lifecycle, composed into a view a renderer can draw.

pub mod api;
pub mod config;
pub mod error;
pub mod feedback;
pub mod recommend;
pub mod search;
pub mod selection;
pub mod session;
pub mod view;

pub use api::{AdvisorApi, HttpAdvisorApi};
pub use config::{load_settings, ClientSettings};
pub use error::{ApiCallError, TransportKind};
pub use feedback::{FeedbackRecorder, Verdict};
pub use recommend::{ProgramContext, RecommendationController, RequestState, SubmitTicket};
pub use search::{Generation, SearchResolver};
pub use selection::CourseSelection;
pub use session::{AdvisorSession, SessionChange, SessionEvent};
pub use view::{Banners, SessionView, ViewPhase};

#[cfg(test)]
#[path = "tests/api_tests.rs"]
mod api_tests;

#[cfg(test)]
#[path = "tests/session_tests.rs"]
mod session_tests;
