use std::sync::Arc;

use crate::{
    config::{Config, ConfigError, QueueBackend},
    queue::{HttpQueue, JobQueue, SpoolQueue},
    validation::{EventValidator, SchemaValidator, TracingReporter, ViolationReporter},
};

#[derive(Debug, Clone)]
pub struct ServiceHandler {
    queue_service: Arc<dyn JobQueue>,
    validator_service: Arc<dyn EventValidator>,
    reporter_service: Arc<dyn ViolationReporter>,
}

impl ServiceHandler {
    pub fn new(
        queue_service: Arc<dyn JobQueue>,
        validator_service: Arc<dyn EventValidator>,
        reporter_service: Arc<dyn ViolationReporter>,
    ) -> Self {
        Self {
            queue_service,
            validator_service,
            reporter_service,
        }
    }

    /// Push event schema, warnings through `tracing`, and the queue backend
    /// selected by the configuration.
    pub fn from_config(config: &Config) -> Result<Self, ConfigError> {
        let queue_service: Arc<dyn JobQueue> = match config.queue_backend()? {
            QueueBackend::Spool(dir) => Arc::new(SpoolQueue::new(dir, config.queue_name())),
            QueueBackend::Http(url) => Arc::new(
                HttpQueue::new(url, config.queue_name())
                    .map_err(|e| ConfigError::QueueSetup(e.to_string()))?,
            ),
        };

        Ok(Self::new(
            queue_service,
            Arc::new(SchemaValidator::push_event()),
            Arc::new(TracingReporter),
        ))
    }

    pub fn queue(&self) -> &dyn JobQueue {
        self.queue_service.as_ref()
    }

    pub fn validator(&self) -> &dyn EventValidator {
        self.validator_service.as_ref()
    }

    pub fn reporter(&self) -> &dyn ViolationReporter {
        self.reporter_service.as_ref()
    }
}
