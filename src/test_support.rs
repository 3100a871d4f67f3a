//! Fakes and fixtures shared by the unit tests.

use std::{any::Any, future::Ready, sync::Arc};

use async_trait::async_trait;
use pseudo::Mock;
use serde_json::{json, Value};

use crate::{
    auth::Token,
    error::ErrorCode,
    gateway::PushGateway,
    queue::{EnqueueReceipt, JobDescriptor, JobQueue, JobType, QueueError},
    service::ServiceHandler,
    validation::{EventValidator, SchemaValidator, Violation, ViolationReporter, Violations},
};

pub const TEST_TOKEN: &str = "abc123";

pub const SCENARIO_A_BODY: &str = r#"{"ref":"refs/heads/main","head":"deadbeef","repository":{"name":"repo","url":"https://example.com/repo","owner":{"name":"me"}}}"#;

#[derive(Debug)]
pub struct FakeJobQueue {
    pub enqueue: Mock<JobDescriptor, Result<EnqueueReceipt, QueueError>>,
}

impl FakeJobQueue {
    pub fn new() -> Self {
        Self {
            enqueue: Mock::new(Ok::<_, QueueError>(sample_receipt())),
        }
    }
}

#[async_trait]
impl JobQueue for FakeJobQueue {
    async fn enqueue(&self, job: JobDescriptor) -> Result<EnqueueReceipt, QueueError> {
        self.enqueue.call(job)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Records calls and delegates to the push event schema.
#[derive(Debug)]
pub struct FakeValidator {
    inner: SchemaValidator,
    pub validate: Mock<Option<Value>, ()>,
}

impl FakeValidator {
    pub fn new() -> Self {
        Self {
            inner: SchemaValidator::push_event(),
            validate: Mock::new(()),
        }
    }
}

impl EventValidator for FakeValidator {
    fn validate(&self, event: Option<&Value>) -> Violations {
        self.validate.call(event.cloned());
        self.inner.validate(event)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

#[derive(Debug)]
pub struct FakeReporter {
    pub warn: Mock<Violation, ()>,
}

impl FakeReporter {
    pub fn new() -> Self {
        Self {
            warn: Mock::new(()),
        }
    }
}

impl ViolationReporter for FakeReporter {
    fn warn(&self, violation: &Violation) {
        self.warn.call(violation.clone())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

pub fn sample_receipt() -> EnqueueReceipt {
    EnqueueReceipt {
        id: "0123456789abcdef".into(),
        queue: "build".into(),
        job: JobType::Build,
    }
}

pub fn valid_event() -> Value {
    json!({
        "ref": "refs/heads/main",
        "head": "deadbeef",
        "repository": {
            "name": "repo",
            "url": "https://example.com/repo",
            "owner": {"name": "me"}
        }
    })
}

pub fn body_of(text: &str) -> Ready<Result<Vec<u8>, ErrorCode>> {
    std::future::ready(Ok(text.as_bytes().to_vec()))
}

pub fn create_test_services() -> ServiceHandler {
    ServiceHandler::new(
        Arc::new(FakeJobQueue::new()),
        Arc::new(FakeValidator::new()),
        Arc::new(FakeReporter::new()),
    )
}

pub fn create_test_gateway(services: ServiceHandler) -> PushGateway {
    PushGateway::new(Token::new(TEST_TOKEN), services)
}

pub fn extract_fake_queue(services: &ServiceHandler) -> &FakeJobQueue {
    services
        .queue()
        .as_any()
        .downcast_ref::<FakeJobQueue>()
        .unwrap()
}

pub fn extract_fake_validator(services: &ServiceHandler) -> &FakeValidator {
    services
        .validator()
        .as_any()
        .downcast_ref::<FakeValidator>()
        .unwrap()
}

pub fn extract_fake_reporter(services: &ServiceHandler) -> &FakeReporter {
    services
        .reporter()
        .as_any()
        .downcast_ref::<FakeReporter>()
        .unwrap()
}
