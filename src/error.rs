use axum::http::StatusCode;
use serde::Serialize;
use thiserror::Error;

use crate::{queue::QueueError, validation::Violations};

/// Outcome of a rejected push hook request.
#[derive(Debug, Error)]
pub enum ErrorCode {
    AccessDenied,
    InvalidEventPayload(Violations),
    UnreadableBody(String),
    PayloadTooLarge(usize),
    QueueUnavailable(#[from] QueueError),
}

#[derive(Serialize)]
pub struct ErrorCodeDetail {
    #[serde(skip)]
    status_code: StatusCode,
    internal_code: u32,
    message: String,
    #[serde(skip_serializing_if = "Violations::is_empty")]
    violations: Violations,
}

impl ErrorCode {
    pub fn details(&self) -> ErrorCodeDetail {
        self.into()
    }
}

impl ErrorCodeDetail {
    pub fn with_status_code<T: Into<String>>(
        status_code: StatusCode,
        internal_code: u32,
        message: T,
    ) -> Self {
        Self {
            internal_code,
            status_code,
            message: message.into(),
            violations: Violations::new(),
        }
    }

    pub fn forbidden<T: Into<String>>(internal_code: u32, message: T) -> Self {
        Self::with_status_code(StatusCode::FORBIDDEN, internal_code, message)
    }

    pub fn bad_request<T: Into<String>>(internal_code: u32, message: T) -> Self {
        Self::with_status_code(StatusCode::BAD_REQUEST, internal_code, message)
    }

    pub fn service_unavailable<T: Into<String>>(internal_code: u32, message: T) -> Self {
        Self::with_status_code(StatusCode::SERVICE_UNAVAILABLE, internal_code, message)
    }

    pub fn payload_too_large<T: Into<String>>(internal_code: u32, message: T) -> Self {
        Self::with_status_code(StatusCode::PAYLOAD_TOO_LARGE, internal_code, message)
    }

    pub fn with_violations(mut self, violations: Violations) -> Self {
        self.violations = violations;
        self
    }

    pub fn status_code(&self) -> StatusCode {
        self.status_code
    }

    pub fn internal_code(&self) -> u32 {
        self.internal_code
    }

    pub fn violations(&self) -> &Violations {
        &self.violations
    }
}

impl From<&ErrorCode> for ErrorCodeDetail {
    fn from(value: &ErrorCode) -> Self {
        match value {
            ErrorCode::AccessDenied => Self::forbidden(1, "Access denied"),
            ErrorCode::InvalidEventPayload(violations) => {
                Self::bad_request(2, "Invalid event payload").with_violations(violations.clone())
            }
            ErrorCode::UnreadableBody(e) => {
                Self::bad_request(3, format!("Unreadable request body: '{}'", e))
            }
            ErrorCode::QueueUnavailable(e) => {
                Self::service_unavailable(4, format!("Build queue unavailable: '{}'", e))
            }
            ErrorCode::PayloadTooLarge(limit) => {
                Self::payload_too_large(5, format!("Request body exceeds {} bytes", limit))
            }
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let detail = ErrorCodeDetail::from(self);
        f.write_str(&detail.message)
    }
}
