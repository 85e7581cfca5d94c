use std::error::Error as _;

use thiserror::Error;

/// What went wrong below the HTTP layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportKind {
    Connect,
    Timeout,
    Other,
}

/// Failure of a single call to the advisory service.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiCallError {
    #[error("advisory service unreachable: {message}")]
    Transport {
        kind: TransportKind,
        message: String,
    },
    #[error("advisory service returned HTTP {status}")]
    Status { status: u16, detail: Option<String> },
    #[error("malformed response payload: {0}")]
    Decode(String),
}

impl ApiCallError {
    pub fn transport(kind: TransportKind, message: impl Into<String>) -> Self {
        Self::Transport {
            kind,
            message: message.into(),
        }
    }

    pub fn from_reqwest(err: reqwest::Error) -> Self {
        if err.is_decode() {
            return Self::Decode(err.to_string());
        }
        if let Some(status) = err.status() {
            return Self::Status {
                status: status.as_u16(),
                detail: None,
            };
        }
        let kind = if err.is_timeout() {
            TransportKind::Timeout
        } else if err.is_connect() {
            TransportKind::Connect
        } else {
            TransportKind::Other
        };
        Self::transport(kind, error_chain(&err))
    }

    /// Short text suitable for the error banner.
    pub fn diagnostic(&self) -> String {
        match self {
            Self::Transport {
                kind: TransportKind::Timeout,
                ..
            } => "Advisor request timed out; retry in a moment.".to_string(),
            Self::Transport {
                kind: TransportKind::Connect,
                ..
            } => "Advisor service unreachable; check the API URL/network and retry.".to_string(),
            Self::Transport { message, .. } => format!("Network error: {message}"),
            Self::Status {
                status,
                detail: Some(detail),
            } => format!("HTTP error {status}: {detail}"),
            Self::Status { status, detail: None } => format!("HTTP error {status}"),
            Self::Decode(_) => "Advisor returned an unreadable response; please retry.".to_string(),
        }
    }
}

// reqwest's Display stops at the outermost layer; the cause is in the sources.
fn error_chain(err: &reqwest::Error) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}
