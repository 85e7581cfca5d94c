use chrono::{DateTime, Utc};
use tracing::info;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Helpful,
    NotHelpful,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedbackEntry {
    pub verdict: Verdict,
    pub comment: Option<String>,
    pub recorded_at: DateTime<Utc>,
}

/// Helpful / not-helpful recorder shown under a populated result. Entries
/// are logged, never sent or persisted.
#[derive(Debug, Default)]
pub struct FeedbackRecorder {
    verdict: Option<Verdict>,
    comment_open: bool,
    entries: Vec<FeedbackEntry>,
}

impl FeedbackRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn verdict(&self) -> Option<Verdict> {
        self.verdict
    }

    pub fn comment_open(&self) -> bool {
        self.comment_open
    }

    pub fn entries(&self) -> &[FeedbackEntry] {
        &self.entries
    }

    pub fn record(&mut self, verdict: Verdict) {
        self.verdict = Some(verdict);
        self.comment_open = verdict == Verdict::NotHelpful;
        info!(?verdict, "feedback: verdict recorded");
        self.entries.push(FeedbackEntry {
            verdict,
            comment: None,
            recorded_at: Utc::now(),
        });
    }

    /// Attaches `comment` to the verdict that opened the prompt. Returns
    /// false when no comment prompt is open or the comment is blank.
    pub fn submit_comment(&mut self, comment: &str) -> bool {
        let comment = comment.trim();
        if !self.comment_open || comment.is_empty() {
            return false;
        }
        let Some(entry) = self.entries.last_mut() else {
            return false;
        };
        info!(verdict = ?entry.verdict, comment, "feedback: comment recorded");
        entry.comment = Some(comment.to_string());
        self.comment_open = false;
        true
    }

    /// Forgets the on-screen verdict, e.g. when a new result replaces the old.
    pub fn reset(&mut self) {
        self.verdict = None;
        self.comment_open = false;
    }
}
