use thiserror::Error;

use crate::protocol::{
    FALLBACK_SERVER_ERROR, NOTICE_ERROR_PREFIX, NOTICE_NO_FILE_SELECTED, NOTICE_UNEXPECTED_PREFIX,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    Transport,
    Server,
    Protocol,
    ResponseParse,
}

/// Input rejected before any request is issued.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("no file selected")]
    NoFileSelected,
}

impl ValidationError {
    pub fn notice(&self) -> String {
        match self {
            ValidationError::NoFileSelected => NOTICE_NO_FILE_SELECTED.to_string(),
        }
    }
}

/// Reasons an issued request did not finish with a usable analysis.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RequestError {
    #[error("transport failure: {0}")]
    Transport(String),
    #[error("server responded with status {status}: {message}")]
    Server { status: u16, message: String },
    #[error("malformed error body for status {status}")]
    ResponseParse { status: u16 },
}

impl RequestError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            RequestError::Transport(_) => ErrorCategory::Transport,
            RequestError::Server { .. } => ErrorCategory::Server,
            RequestError::ResponseParse { .. } => ErrorCategory::ResponseParse,
        }
    }

    /// Text shown to the user. Transport and parse failures collapse into one message.
    pub fn user_message(&self) -> String {
        match self {
            RequestError::Server { message, .. } => message.clone(),
            RequestError::Transport(_) | RequestError::ResponseParse { .. } => {
                FALLBACK_SERVER_ERROR.to_string()
            }
        }
    }
}

/// A 200 response whose `status` is not `"done"`. Reported directly, never stored as an outcome.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unexpected response: {payload}")]
pub struct UnexpectedResponse {
    pub payload: String,
}

impl UnexpectedResponse {
    pub fn new(payload: impl Into<String>) -> Self {
        Self {
            payload: payload.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        ErrorCategory::Protocol
    }

    pub fn notice(&self) -> String {
        format!("{NOTICE_UNEXPECTED_PREFIX}{}", self.payload)
    }
}

pub fn failure_notice(message: &str) -> String {
    format!("{NOTICE_ERROR_PREFIX}{message}")
}
