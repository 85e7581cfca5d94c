use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::domain::{CourseCode, CreditsTarget, ProgramId, Track};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Suggestion {
    pub code: CourseCode,
    pub title: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchParams {
    pub program_id: ProgramId,
    pub q: String,
    pub limit: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendRequest {
    pub university: String,
    pub program_id: ProgramId,
    pub track: Option<Track>,
    pub completed: Vec<CourseCode>,
    pub credits_target: CreditsTarget,
    #[serde(default)]
    pub preferences: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub code: CourseCode,
    pub title: String,
    pub reason: String,
    pub fulfills: Vec<String>,
    pub prereq_ok: bool,
    pub citations: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RecommendResponse {
    pub recommendations: Vec<Recommendation>,
    #[serde(default)]
    pub notes: Vec<String>,
    #[serde(default)]
    pub assumptions: Vec<String>,
    #[serde(default)]
    pub warnings: Vec<String>,
}
