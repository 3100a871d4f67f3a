//! Push hook pipeline: authenticate, validate, dispatch.
//!
//! Each step returns an [`ErrorCode`] on failure; mapping those to HTTP
//! responses is left to the transport.

use std::future::Future;

use serde_json::{value::RawValue, Value};

use crate::{
    auth::Token,
    error::ErrorCode,
    queue::{EnqueueReceipt, JobDescriptor},
    service::ServiceHandler,
    validation::{FieldPath, Violation, NOT_AN_OBJECT},
};

/// A push event that passed validation, kept as the text that was received.
#[derive(Debug)]
pub struct AcceptedEvent {
    raw: Box<RawValue>,
}

impl AcceptedEvent {
    pub fn as_str(&self) -> &str {
        self.raw.get()
    }

    pub fn into_raw(self) -> Box<RawValue> {
        self.raw
    }
}

#[derive(Debug)]
pub struct PushGateway {
    token: Token,
    services: ServiceHandler,
}

impl PushGateway {
    pub fn new(token: Token, services: ServiceHandler) -> Self {
        Self { token, services }
    }

    pub fn services(&self) -> &ServiceHandler {
        &self.services
    }

    /// Runs the whole pipeline. `body` is only awaited once the token has
    /// been accepted.
    #[tracing::instrument(skip_all)]
    pub async fn ingest<B>(&self, token: &str, body: B) -> Result<EnqueueReceipt, ErrorCode>
    where
        B: Future<Output = Result<Vec<u8>, ErrorCode>>,
    {
        self.authenticate(token)?;
        let body = body.await?;
        let event = self.validate(&body)?;
        self.dispatch(event).await
    }

    pub fn authenticate(&self, presented: &str) -> Result<(), ErrorCode> {
        if self.token.matches(presented) {
            Ok(())
        } else {
            Err(ErrorCode::AccessDenied)
        }
    }

    /// Checks `body` against the configured validator and reports every
    /// violation before failing.
    pub fn validate(&self, body: &[u8]) -> Result<AcceptedEvent, ErrorCode> {
        let parsed = parse_event(body);
        let mut violations = self
            .services
            .validator()
            .validate(parsed.as_ref().map(|(_, value)| value));

        if parsed.is_none() && violations.is_empty() {
            violations.push(Violation::new(FieldPath::root(), NOT_AN_OBJECT, Value::Null));
        }

        match parsed {
            Some((raw, _)) if violations.is_empty() => Ok(AcceptedEvent { raw }),
            _ => {
                for violation in &violations {
                    self.services.reporter().warn(violation);
                }

                Err(ErrorCode::InvalidEventPayload(violations))
            }
        }
    }

    pub async fn dispatch(&self, event: AcceptedEvent) -> Result<EnqueueReceipt, ErrorCode> {
        let job = JobDescriptor::build(event.into_raw());

        let receipt = self.services.queue().enqueue(job).await.map_err(|e| {
            tracing::error!(error = %e, "could not enqueue build job");
            ErrorCode::QueueUnavailable(e)
        })?;

        tracing::info!(id = %receipt.id, queue = %receipt.queue, "build job enqueued");
        Ok(receipt)
    }
}

/// Reads `body` as a JSON object. Anything else counts as an event with no
/// fields at all.
pub(crate) fn parse_event(body: &[u8]) -> Option<(Box<RawValue>, Value)> {
    let text = std::str::from_utf8(body).ok()?;
    let raw: Box<RawValue> = serde_json::from_str(text).ok()?;
    let value: Value = serde_json::from_str(raw.get()).ok()?;

    if value.is_object() {
        Some((raw, value))
    } else {
        None
    }
}
